//! Module providing the `Scene` trait and all demo scenes.
//!
//! Exactly one demo is active at a time. Scenes ask for a switch to another demo, or to quit,
//! through the [`SceneSwitch`] returned from [`Scene::update`].

use std::{fmt, str::FromStr, sync::Arc};

use glam::{Mat4, Vec3};
use glsandbox_core::SandboxConfig;
use sdl2::keyboard::Keycode;

use crate::{error::GfxError, other::UpdateContext};

pub mod lighting;
pub mod polar;
pub mod sprites;
pub mod textured;
pub mod triangle;

/// The available demos, in key order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Demo {
    Triangle,
    Polar,
    Textured,
    Lighting,
    Sprites,
}

impl Demo {
    pub const ALL: [Demo; 5] = [
        Demo::Triangle,
        Demo::Polar,
        Demo::Textured,
        Demo::Lighting,
        Demo::Sprites,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Demo::Triangle => "triangle",
            Demo::Polar => "polar",
            Demo::Textured => "textured",
            Demo::Lighting => "lighting",
            Demo::Sprites => "sprites",
        }
    }

    /// The number key selecting the demo.
    fn key(self) -> Keycode {
        match self {
            Demo::Triangle => Keycode::Num1,
            Demo::Polar => Keycode::Num2,
            Demo::Textured => Keycode::Num3,
            Demo::Lighting => Keycode::Num4,
            Demo::Sprites => Keycode::Num5,
        }
    }

    /// Whether the demo wants the mouse captured for camera control.
    pub fn captures_mouse(self) -> bool {
        matches!(self, Demo::Lighting)
    }

    /// Builds the scene for the demo.
    pub fn build(
        self,
        gl: &Arc<glow::Context>,
        config: &SandboxConfig,
    ) -> Result<Box<dyn Scene>, GfxError> {
        let scene: Box<dyn Scene> = match self {
            Demo::Triangle => Box::new(triangle::TriangleScene::new(gl)?),
            Demo::Polar => Box::new(polar::PolarScene::new(gl)?),
            Demo::Textured => Box::new(textured::TexturedScene::new(gl, config)?),
            Demo::Lighting => Box::new(lighting::LightingScene::new(gl, config)?),
            Demo::Sprites => Box::new(sprites::SpriteScene::new(gl, config)?),
        };
        Ok(scene)
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Demo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Demo::ALL
            .into_iter()
            .find(|demo| demo.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<_> = Demo::ALL.iter().map(|demo| demo.name()).collect();
                format!("unknown demo {s:?}, expected one of {}", names.join(", "))
            })
    }
}

pub enum SceneSwitch {
    None,
    Switch(Demo),
    Quit,
}

/// Handles the keys shared by every scene: number keys switch demos and Escape quits.
pub fn common_switch(ctx: &UpdateContext) -> SceneSwitch {
    if ctx.keyboard.was_pressed(Keycode::Escape) {
        return SceneSwitch::Quit;
    }
    Demo::ALL
        .into_iter()
        .find(|demo| ctx.keyboard.was_pressed(demo.key()))
        .map_or(SceneSwitch::None, SceneSwitch::Switch)
}

/// Scales clip space so a unit square stays square in a window of the given aspect ratio.
pub fn aspect_fit(aspect_ratio: f32) -> Mat4 {
    if aspect_ratio >= 1.0 {
        Mat4::from_scale(Vec3::new(1.0 / aspect_ratio, 1.0, 1.0))
    } else {
        Mat4::from_scale(Vec3::new(1.0, aspect_ratio, 1.0))
    }
}

/// The Scene trait defines the common interface for all demo scenes.
pub trait Scene {
    /// Updates the scene state.
    fn update(&mut self, ctx: &UpdateContext) -> SceneSwitch {
        common_switch(ctx)
    }

    /// Renders the scene.
    fn render(&mut self, gl: &glow::Context, aspect_ratio: f32);
}

/// Owns the active scene and performs switches between demos.
pub struct SceneManager {
    current: Box<dyn Scene>,
    demo: Demo,
}

impl SceneManager {
    /// Creates a new SceneManager showing `demo`.
    pub fn new(
        gl: &Arc<glow::Context>,
        config: &SandboxConfig,
        demo: Demo,
    ) -> Result<Self, GfxError> {
        log::info!("Starting demo {demo}");
        Ok(Self {
            current: demo.build(gl, config)?,
            demo,
        })
    }

    pub fn demo(&self) -> Demo {
        self.demo
    }

    /// Updates the current scene and performs any requested switch. Returns `false` once the
    /// application should quit.
    ///
    /// A demo that fails to build is logged and the current one stays active.
    pub fn update(
        &mut self,
        ctx: &UpdateContext,
        gl: &Arc<glow::Context>,
        config: &SandboxConfig,
    ) -> bool {
        match self.current.update(ctx) {
            SceneSwitch::None => {}
            SceneSwitch::Switch(demo) if demo == self.demo => {}
            SceneSwitch::Switch(demo) => match demo.build(gl, config) {
                Ok(scene) => {
                    log::info!("Switching to demo {demo}");
                    self.current = scene;
                    self.demo = demo;
                }
                Err(e) => log::error!("Could not start demo {demo}: {e}"),
            },
            SceneSwitch::Quit => return false,
        }
        true
    }

    /// Renders the current scene.
    pub fn render(&mut self, gl: &glow::Context, aspect_ratio: f32) {
        self.current.render(gl, aspect_ratio);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_names_round_trip() {
        for demo in Demo::ALL {
            assert_eq!(demo.name().parse::<Demo>(), Ok(demo));
        }
        assert_eq!("LIGHTING".parse::<Demo>(), Ok(Demo::Lighting));
    }

    #[test]
    fn unknown_demo_lists_choices() {
        let err = "cube".parse::<Demo>().unwrap_err();
        assert!(err.contains("triangle"));
        assert!(err.contains("sprites"));
    }

    #[test]
    fn aspect_fit_keeps_squares_square() {
        let wide = aspect_fit(2.0).transform_point3(Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(wide, Vec3::new(0.5, 1.0, 0.0));

        let tall = aspect_fit(0.5).transform_point3(Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(tall, Vec3::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn escape_quits_and_number_keys_switch() {
        let mouse = glsandbox_core::MouseInput::new(100, 100);
        let timer = glsandbox_core::FrameTimer::new();

        let mut keyboard = crate::other::KeyboardState::default();
        keyboard.pressed.insert(Keycode::Num4);
        let ctx = UpdateContext::new(&keyboard, &mouse, &timer, false);
        assert!(matches!(
            common_switch(&ctx),
            SceneSwitch::Switch(Demo::Lighting)
        ));

        keyboard.pressed.insert(Keycode::Escape);
        let ctx = UpdateContext::new(&keyboard, &mouse, &timer, false);
        assert!(matches!(common_switch(&ctx), SceneSwitch::Quit));
    }
}
