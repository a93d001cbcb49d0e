//! The first demo: a single colored triangle spinning around the Z axis.

use std::sync::Arc;

use glam::Mat4;
use glow::HasContext;
use glsandbox_core::{AttributeMask, shapes};
use sdl2::keyboard::Keycode;

use crate::{
    abs::{Mesh, ShaderProgram},
    error::GfxError,
    other::UpdateContext,
    scenes::{Scene, SceneSwitch, aspect_fit, common_switch},
    shader_program,
};

/// Radians per second.
const SPIN_SPEED: f32 = 1.0;

pub struct TriangleScene {
    mesh: Mesh,
    shader: ShaderProgram,
    angle: f32,
    spinning: bool,
}

impl TriangleScene {
    pub fn new(gl: &Arc<glow::Context>) -> Result<Self, GfxError> {
        let shader = shader_program!(colored, gl, "..")?;
        // No indices, so the mesh is drawn with a plain array draw over its three vertices.
        let mesh = Mesh::with_attributes(
            gl,
            &shapes::triangle(),
            &[],
            Vec::new(),
            AttributeMask::POSITION | AttributeMask::COLOR,
        )?;

        Ok(Self {
            mesh,
            shader,
            angle: 0.0,
            spinning: true,
        })
    }
}

impl Scene for TriangleScene {
    fn update(&mut self, ctx: &UpdateContext) -> SceneSwitch {
        if ctx.keyboard.was_pressed(Keycode::Space) {
            self.spinning = !self.spinning;
        }
        if self.spinning {
            self.angle = (self.angle + SPIN_SPEED * ctx.delta_time()) % std::f32::consts::TAU;
        }
        common_switch(ctx)
    }

    fn render(&mut self, gl: &glow::Context, aspect_ratio: f32) {
        unsafe {
            gl.clear_color(0.2, 0.3, 0.3, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        let transform = aspect_fit(aspect_ratio) * Mat4::from_rotation_z(self.angle);
        self.shader.use_program();
        self.shader.set_uniform("uTransform", transform);
        self.mesh.draw(&self.shader);
    }
}
