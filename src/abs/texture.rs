//! Structs and functions for handling textures.
//!
//! The module provides the [`Texture`] struct which is a CPU representation of a GPU texture,
//! and the copyable [`TextureHandle`] that meshes and sprite sheets refer to it by.

use std::{num::NonZero, path::Path, sync::Arc};

use glow::HasContext;
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

use crate::error::GfxError;

/// Sampling parameters of a texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureParams {
    pub wrap_s: u32,
    pub wrap_t: u32,
    pub min_filter: u32,
    pub mag_filter: u32,
}

impl Default for TextureParams {
    fn default() -> Self {
        Self {
            wrap_s: glow::REPEAT,
            wrap_t: glow::REPEAT,
            min_filter: glow::LINEAR_MIPMAP_LINEAR,
            mag_filter: glow::LINEAR,
        }
    }
}

impl TextureParams {
    /// Nearest filtering without mipmaps, for pixel art and sprite sheets.
    pub fn pixelated() -> Self {
        Self {
            wrap_s: glow::CLAMP_TO_EDGE,
            wrap_t: glow::CLAMP_TO_EDGE,
            min_filter: glow::NEAREST,
            mag_filter: glow::NEAREST,
        }
    }

    fn uses_mipmaps(&self) -> bool {
        matches!(
            self.min_filter,
            glow::LINEAR_MIPMAP_LINEAR
                | glow::LINEAR_MIPMAP_NEAREST
                | glow::NEAREST_MIPMAP_LINEAR
                | glow::NEAREST_MIPMAP_NEAREST
        )
    }
}

/// Represents a handle to a texture.
///
/// A handle does not keep the texture alive; the [`Texture`] it came from must outlive
/// every user of the handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub NonZero<u32>, u32, u32);

impl TextureHandle {
    /// Binds the texture handle to the specified texture unit.
    pub fn bind(&self, gl: &glow::Context, unit: u32) {
        unsafe {
            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(glow::TEXTURE_2D, Some(glow::NativeTexture(self.0)));
        }
    }

    /// Returns the width of the texture.
    pub fn width(&self) -> u32 {
        self.1
    }

    /// Returns the height of the texture.
    pub fn height(&self) -> u32 {
        self.2
    }
}

/// Represents a texture stored on the GPU side.
pub struct Texture {
    gl: Arc<glow::Context>,
    id: glow::Texture,
    width: u32,
    height: u32,
    channels: u8,
}

impl Texture {
    /// Creates a new texture from the given [`image::DynamicImage`].
    pub fn new(
        gl: &Arc<glow::Context>,
        image: &DynamicImage,
        params: TextureParams,
    ) -> Result<Self, GfxError> {
        let (width, height) = image.dimensions();
        let channels = image.color().channel_count();
        let data = image.to_rgba8().into_raw();
        let mut texture = Self::new_from_data(gl, width, height, &data, params)?;
        texture.channels = channels;
        Ok(texture)
    }

    /// Loads a texture from an image file. Images are flipped vertically so the
    /// bottom edge of the image ends up at `v = 0`.
    pub fn from_path(
        gl: &Arc<glow::Context>,
        path: impl AsRef<Path>,
        params: TextureParams,
    ) -> Result<Self, GfxError> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| GfxError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let texture = Self::new(gl, &image.flipv(), params)?;
        log::debug!(
            "Loaded texture {} ({}x{}, {} channels)",
            path.display(),
            texture.width(),
            texture.height(),
            texture.channels()
        );
        Ok(texture)
    }

    /// Creates a new texture from the given raw RGBA data.
    pub fn new_from_data(
        gl: &Arc<glow::Context>,
        width: u32,
        height: u32,
        data: &[u8],
        params: TextureParams,
    ) -> Result<Self, GfxError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(GfxError::resource(
                "texture",
                format!("expected {expected} bytes of RGBA data, got {}", data.len()),
            ));
        }

        unsafe {
            let texture = gl
                .create_texture()
                .map_err(|e| GfxError::resource("texture", e))?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(data)),
            );
            if params.uses_mipmaps() {
                gl.generate_mipmap(glow::TEXTURE_2D);
            }
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, params.wrap_s as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, params.wrap_t as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                params.min_filter as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                params.mag_filter as i32,
            );
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
                width,
                height,
                channels: 4,
            })
        }
    }

    /// Generates a `size` x `size` checkerboard of `cells` x `cells` squares.
    pub fn checkerboard(
        gl: &Arc<glow::Context>,
        size: u32,
        cells: u32,
        colors: [[u8; 4]; 2],
        params: TextureParams,
    ) -> Result<Self, GfxError> {
        let cell = (size / cells.max(1)).max(1);
        let image = RgbaImage::from_fn(size, size, |x, y| {
            Rgba(colors[((x / cell + y / cell) % 2) as usize])
        });
        Self::new(gl, &DynamicImage::ImageRgba8(image), params)
    }

    /// Loads the image at `path` when one is given and readable, otherwise
    /// generates a checkerboard in its place.
    pub fn load_or_checkerboard(
        gl: &Arc<glow::Context>,
        path: Option<&Path>,
        colors: [[u8; 4]; 2],
        params: TextureParams,
    ) -> Result<Self, GfxError> {
        if let Some(path) = path {
            match Self::from_path(gl, path, params) {
                Ok(texture) => return Ok(texture),
                Err(e) => log::warn!("{e}, using a generated texture instead"),
            }
        }
        Self::checkerboard(gl, 256, 8, colors, params)
    }

    /// Returns the width of the texture.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the texture.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of color channels of the source image.
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Returns a handle to the texture.
    pub fn handle(&self) -> TextureHandle {
        TextureHandle(self.id.0, self.width, self.height)
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}
