//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::sync::Arc;

use glsandbox_core::config::WindowConfig;

use crate::error::GfxError;

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
}

impl App {
    /// Creates the window and a 3.3 core profile context described by `config`.
    /// The width and height are ignored when `fullscreen` is set.
    pub fn new(config: &WindowConfig) -> Result<Self, GfxError> {
        let sdl = sdl2::init().map_err(GfxError::ContextCreation)?;
        let video_subsystem = sdl.video().map_err(GfxError::ContextCreation)?;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);

        let (width, height) = if config.fullscreen {
            let display_mode = video_subsystem
                .current_display_mode(0)
                .map_err(GfxError::ContextCreation)?;
            (display_mode.w as u32, display_mode.h as u32)
        } else {
            (config.width, config.height)
        };

        let mut window = video_subsystem
            .window(&config.title, width, height)
            .opengl()
            .resizable()
            .build()
            .map_err(|e| GfxError::ContextCreation(e.to_string()))?;
        if config.fullscreen {
            window
                .set_fullscreen(sdl2::video::FullscreenType::Desktop)
                .map_err(GfxError::ContextCreation)?;
        }

        let gl_context = window
            .gl_create_context()
            .map_err(GfxError::ContextCreation)?;
        window
            .gl_make_current(&gl_context)
            .map_err(GfxError::ContextCreation)?;

        let interval = if config.vsync {
            sdl2::video::SwapInterval::VSync
        } else {
            sdl2::video::SwapInterval::Immediate
        };
        if let Err(e) = video_subsystem.gl_set_swap_interval(interval) {
            log::warn!("Could not set swap interval: {e}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let event_pump = sdl.event_pump().map_err(GfxError::ContextCreation)?;

        log::info!("Created {width}x{height} window \"{}\"", config.title);

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl: Arc::new(gl),
            event_pump,
        })
    }

    /// Size of the drawable area in pixels.
    pub fn drawable_size(&self) -> (u32, u32) {
        self.window.drawable_size()
    }

    /// Captures or releases the mouse. While captured the cursor is hidden and
    /// only relative motion is reported.
    pub fn set_mouse_captured(&self, captured: bool) {
        self.sdl.mouse().set_relative_mouse_mode(captured);
    }
}
