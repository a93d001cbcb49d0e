//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing mesh data on the GPU side. Every mesh
//! stores [`Vertex`] records and binds the subset of fields named by its [`AttributeMask`] to
//! consecutive attribute slots, in the order position, color, texture coordinates, normal.

use std::{fmt, sync::Arc};

use glow::HasContext;
use glsandbox_core::{Attribute, AttributeMask, DrawCall, Primitive, Vertex, VertexLayout};

use crate::{
    abs::{ShaderProgram, TextureHandle},
    error::GfxError,
};

fn gl_mode(primitive: Primitive) -> u32 {
    match primitive {
        Primitive::Triangles => glow::TRIANGLES,
        Primitive::Lines => glow::LINES,
        Primitive::LineStrip => glow::LINE_STRIP,
        Primitive::LineLoop => glow::LINE_LOOP,
        Primitive::Points => glow::POINTS,
    }
}

/// Reinterprets a slice of plain `#[repr(C)]` values as bytes.
fn as_bytes<T: Copy>(data: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(data.as_ptr() as *const u8, std::mem::size_of_val(data)) }
}

/// Represents a mesh stored on the GPU side.
///
/// The mesh owns its vertex array, vertex buffer and index buffer and releases them when
/// dropped. Textures are referenced through [`TextureHandle`]s; the textures themselves
/// must outlive the mesh.
pub struct Mesh {
    gl: Arc<glow::Context>,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: Option<glow::Buffer>,
    vertex_count: usize,
    index_count: usize,
    textures: Vec<TextureHandle>,
    attributes: AttributeMask,
    layout: VertexLayout,
    primitive: Primitive,
}

impl Mesh {
    /// Creates a new mesh that only binds vertex positions.
    pub fn new(
        gl: &Arc<glow::Context>,
        vertices: &[Vertex],
        indices: &[u32],
        textures: Vec<TextureHandle>,
    ) -> Result<Self, GfxError> {
        Self::with_attributes(gl, vertices, indices, textures, AttributeMask::default())
    }

    /// Creates a new triangle mesh binding the attributes named by `attributes`.
    pub fn with_attributes(
        gl: &Arc<glow::Context>,
        vertices: &[Vertex],
        indices: &[u32],
        textures: Vec<TextureHandle>,
        attributes: AttributeMask,
    ) -> Result<Self, GfxError> {
        Self::with_primitive(gl, vertices, indices, textures, attributes, Primitive::Triangles)
    }

    /// Creates a new mesh drawn as `primitive`.
    ///
    /// An empty vertex list produces a valid mesh that draws nothing. The index buffer is only
    /// allocated when `indices` is non-empty.
    pub fn with_primitive(
        gl: &Arc<glow::Context>,
        vertices: &[Vertex],
        indices: &[u32],
        textures: Vec<TextureHandle>,
        attributes: AttributeMask,
        primitive: Primitive,
    ) -> Result<Self, GfxError> {
        let layout = attributes.layout();

        unsafe {
            let vao = gl
                .create_vertex_array()
                .map_err(|e| GfxError::resource("vertex array", e))?;
            let vbo = match gl.create_buffer() {
                Ok(vbo) => vbo,
                Err(e) => {
                    gl.delete_vertex_array(vao);
                    return Err(GfxError::resource("vertex buffer", e));
                }
            };
            let ebo = if indices.is_empty() {
                None
            } else {
                match gl.create_buffer() {
                    Ok(ebo) => Some(ebo),
                    Err(e) => {
                        gl.delete_buffer(vbo);
                        gl.delete_vertex_array(vao);
                        return Err(GfxError::resource("index buffer", e));
                    }
                }
            };

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, as_bytes(vertices), glow::STATIC_DRAW);

            if let Some(ebo) = ebo {
                gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
                gl.buffer_data_u8_slice(
                    glow::ELEMENT_ARRAY_BUFFER,
                    as_bytes(indices),
                    glow::STATIC_DRAW,
                );
            }

            for binding in layout.bindings() {
                gl.enable_vertex_attrib_array(binding.slot);
                gl.vertex_attrib_pointer_f32(
                    binding.slot,
                    binding.components,
                    glow::FLOAT,
                    false,
                    VertexLayout::STRIDE,
                    binding.offset,
                );
            }

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

            let mesh = Self {
                gl: Arc::clone(gl),
                vao,
                vbo,
                ebo,
                vertex_count: vertices.len(),
                index_count: indices.len(),
                textures,
                attributes,
                layout,
                primitive,
            };
            if !mesh.has_position() {
                log::debug!("Mesh {vao:?} has no position attribute");
            }
            if mesh.texture_count() > 0 && !mesh.has_tex_coords() {
                log::warn!("Mesh {vao:?} has textures but no texture coordinates");
            }
            log::debug!("Created {mesh:?}");
            Ok(mesh)
        }
    }

    /// Draws the mesh with the given shader program.
    ///
    /// The program is activated, texture `i` is bound to texture unit `i`, and a single
    /// indexed draw is issued when the mesh has indices, otherwise a single non-indexed
    /// draw over every vertex. Uniforms that do not depend on the mesh must be set by the
    /// caller beforehand. Texture unit 0 is left active afterwards.
    pub fn draw(&self, shader: &ShaderProgram) {
        shader.use_program();
        for (unit, texture) in self.textures.iter().enumerate() {
            texture.bind(&self.gl, unit as u32);
        }

        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            match self.draw_call() {
                Some(DrawCall::Indexed { primitive, count }) => {
                    self.gl
                        .draw_elements(gl_mode(primitive), count, glow::UNSIGNED_INT, 0);
                }
                Some(DrawCall::Arrays { primitive, count }) => {
                    self.gl.draw_arrays(gl_mode(primitive), 0, count);
                }
                None => {}
            }
            self.gl.bind_vertex_array(None);
            self.gl.active_texture(glow::TEXTURE0);

            if cfg!(debug_assertions) {
                let error = self.gl.get_error();
                if error != glow::NO_ERROR {
                    log::warn!("GL error 0x{error:04X} while drawing mesh {:?}", self.vao);
                }
            }
        }
    }

    /// The draw call [`Mesh::draw`] issues, or `None` for an empty mesh.
    pub fn draw_call(&self) -> Option<DrawCall> {
        DrawCall::plan(self.primitive, self.index_count, self.vertex_count)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    // Zero for meshes drawn without an index buffer.
    pub fn index_count(&self) -> usize {
        self.index_count
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn attributes(&self) -> AttributeMask {
        self.attributes
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    pub fn has_position(&self) -> bool {
        self.attributes.contains(Attribute::Position)
    }

    pub fn has_color(&self) -> bool {
        self.attributes.contains(Attribute::Color)
    }

    pub fn has_tex_coords(&self) -> bool {
        self.attributes.contains(Attribute::TexCoords)
    }

    pub fn has_normal(&self) -> bool {
        self.attributes.contains(Attribute::Normal)
    }
}

impl fmt::Debug for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mesh")
            .field("vertices", &self.vertex_count())
            .field("indices", &self.index_count())
            .field("textures", &self.texture_count())
            .field("attributes", &self.attributes())
            .field("slots", &self.layout().len())
            .field("draw_call", &self.draw_call())
            .finish()
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
            if let Some(ebo) = self.ebo {
                self.gl.delete_buffer(ebo);
            }
            self.gl.delete_vertex_array(self.vao);
        }
    }
}
