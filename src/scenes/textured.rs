//! A textured quad whose corner colors tint the texture.

use std::sync::Arc;

use glam::{Mat4, Vec3, Vec4};
use glow::HasContext;
use glsandbox_core::{AttributeMask, SandboxConfig, shapes};
use sdl2::keyboard::Keycode;

use crate::{
    abs::{Mesh, ShaderProgram, Texture, TextureParams},
    error::GfxError,
    other::UpdateContext,
    scenes::{Scene, SceneSwitch, aspect_fit, common_switch},
    shader_program,
};

const CHECKER_COLORS: [[u8; 4]; 2] = [[230, 230, 230, 255], [60, 60, 70, 255]];

pub struct TexturedScene {
    mesh: Mesh,
    shader: ShaderProgram,
    // Referenced by `mesh` through its handle.
    _texture: Texture,
    tinted: bool,
}

impl TexturedScene {
    pub fn new(gl: &Arc<glow::Context>, config: &SandboxConfig) -> Result<Self, GfxError> {
        let shader = shader_program!(textured, gl, "..")?;
        let texture = Texture::load_or_checkerboard(
            gl,
            config.textures.albedo.as_deref(),
            CHECKER_COLORS,
            TextureParams::default(),
        )?;

        let (vertices, indices) = shapes::quad([
            Vec4::new(1.0, 0.0, 0.0, 1.0),
            Vec4::new(0.0, 1.0, 0.0, 1.0),
            Vec4::new(0.0, 0.0, 1.0, 1.0),
            Vec4::new(1.0, 1.0, 0.0, 1.0),
        ]);
        let mesh = Mesh::with_attributes(
            gl,
            &vertices,
            &indices,
            vec![texture.handle()],
            AttributeMask::POSITION | AttributeMask::COLOR | AttributeMask::TEX_COORDS,
        )?;

        shader.use_program();
        shader.set_uniform("uTexture", 0);

        Ok(Self {
            mesh,
            shader,
            _texture: texture,
            tinted: true,
        })
    }
}

impl Scene for TexturedScene {
    fn update(&mut self, ctx: &UpdateContext) -> SceneSwitch {
        if ctx.keyboard.was_pressed(Keycode::T) {
            self.tinted = !self.tinted;
            log::info!("Vertex color tint {}", if self.tinted { "on" } else { "off" });
        }
        common_switch(ctx)
    }

    fn render(&mut self, gl: &glow::Context, aspect_ratio: f32) {
        unsafe {
            gl.clear_color(0.1, 0.1, 0.1, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        let transform = aspect_fit(aspect_ratio) * Mat4::from_scale(Vec3::splat(1.5));
        self.shader.use_program();
        self.shader.set_uniform("uTransform", transform);
        self.shader
            .set_uniform("uMix", if self.tinted { 1.0f32 } else { 0.0 });
        self.mesh.draw(&self.shader);
    }
}
