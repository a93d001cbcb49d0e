//! Plots the butterfly curve `r = e^sin(θ) - 2cos(4θ)` as a line loop over a pair of axes.

use std::sync::Arc;

use glam::Vec4;
use glow::HasContext;
use glsandbox_core::{AttributeMask, Primitive, plot};
use sdl2::keyboard::Keycode;

use crate::{
    abs::{Mesh, ShaderProgram},
    error::GfxError,
    other::UpdateContext,
    scenes::{Scene, SceneSwitch, aspect_fit, common_switch},
    shader_program,
};

const EXTENT: f32 = 0.9;
const TURNS: f32 = 12.0;
const STEPS: [f32; 4] = [0.25, 1.0, 5.0, 20.0];

pub struct PolarScene {
    gl: Arc<glow::Context>,
    curve: Mesh,
    axes: Mesh,
    shader: ShaderProgram,
    step: usize,
}

impl PolarScene {
    pub fn new(gl: &Arc<glow::Context>) -> Result<Self, GfxError> {
        let shader = shader_program!(colored, gl, "..")?;
        let axes = Mesh::with_primitive(
            gl,
            &plot::axes(1.0, Vec4::new(0.5, 0.5, 0.5, 1.0)),
            &[],
            Vec::new(),
            AttributeMask::POSITION | AttributeMask::COLOR,
            Primitive::Lines,
        )?;
        let step = 1;
        let curve = Self::curve(gl, STEPS[step])?;

        Ok(Self {
            gl: Arc::clone(gl),
            curve,
            axes,
            shader,
            step,
        })
    }

    fn curve(gl: &Arc<glow::Context>, step_degrees: f32) -> Result<Mesh, GfxError> {
        let mut vertices = plot::sample_polar(
            plot::butterfly,
            TURNS,
            step_degrees,
            Vec4::new(1.0, 0.8, 0.2, 1.0),
        );
        plot::fit_to_extent(&mut vertices, EXTENT);
        log::debug!("Sampled butterfly curve with {} points", vertices.len());

        Mesh::with_primitive(
            gl,
            &vertices,
            &[],
            Vec::new(),
            AttributeMask::POSITION | AttributeMask::COLOR,
            Primitive::LineLoop,
        )
    }

    /// Resamples the curve with a finer or coarser step.
    fn set_step(&mut self, step: usize) {
        if step == self.step {
            return;
        }
        match Self::curve(&self.gl, STEPS[step]) {
            Ok(curve) => {
                self.curve = curve;
                self.step = step;
            }
            Err(e) => log::error!("Could not resample curve: {e}"),
        }
    }
}

impl Scene for PolarScene {
    fn update(&mut self, ctx: &UpdateContext) -> SceneSwitch {
        if ctx.keyboard.was_pressed(Keycode::Up) {
            self.set_step(self.step.saturating_sub(1));
        }
        if ctx.keyboard.was_pressed(Keycode::Down) {
            self.set_step((self.step + 1).min(STEPS.len() - 1));
        }
        common_switch(ctx)
    }

    fn render(&mut self, gl: &glow::Context, aspect_ratio: f32) {
        unsafe {
            gl.clear_color(0.05, 0.05, 0.1, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        self.shader.use_program();
        self.shader.set_uniform("uTransform", aspect_fit(aspect_ratio));
        self.axes.draw(&self.shader);
        self.curve.draw(&self.shader);
    }
}
