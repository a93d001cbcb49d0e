use glow::HasContext;
use glsandbox_core::{FrameTimer, MouseInput, SandboxConfig};
use sdl2::{event::Event, keyboard::Keycode};

use crate::{abs::App, error::GfxError, scenes::Demo};

mod abs;
mod error;
mod logging;
mod other;
mod scenes;

/// Compiles and links the program in `shaders/<name>/{vert,frag}.glsl`. `$path_prefix` leads
/// from the invoking file back to `src`.
#[macro_export]
macro_rules! shader_program {
    ($name:ident, $gl:expr, $path_prefix:literal) => {
        $crate::abs::ShaderProgram::from_sources(
            &$gl,
            include_str!(concat!(
                $path_prefix,
                "/shaders/",
                stringify!($name),
                "/vert.glsl"
            )),
            include_str!(concat!(
                $path_prefix,
                "/shaders/",
                stringify!($name),
                "/frag.glsl"
            )),
        )
    };
}

fn main() {
    let config = match SandboxConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}, using the default configuration");
            SandboxConfig::default()
        }
    };
    if let Err(e) = logging::init(config.log_level_filter()) {
        eprintln!("Could not install logger: {e}");
    }

    let demo = match std::env::args().nth(1) {
        Some(name) => name.parse::<Demo>(),
        None => config.start_demo.parse::<Demo>(),
    };
    let demo = demo.unwrap_or_else(|e| {
        log::warn!("{e}");
        Demo::Triangle
    });

    if let Err(e) = run(&config, demo) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(config: &SandboxConfig, demo: Demo) -> Result<(), GfxError> {
    let mut app = App::new(&config.window)?;

    unsafe {
        app.gl.enable(glow::DEPTH_TEST);
        app.gl.enable(glow::CULL_FACE);
        app.gl.cull_face(glow::BACK);
        app.gl.front_face(glow::CCW);
        app.gl.enable(glow::BLEND);
        app.gl
            .blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
    }

    let (mut width, mut height) = app.drawable_size();
    unsafe {
        app.gl.viewport(0, 0, width as i32, height as i32);
    }

    let mut keyboard_state = other::KeyboardState::default();
    let mut mouse_input = MouseInput::new(width, height);
    let mut timer = FrameTimer::new();

    let mut scene_manager = scenes::SceneManager::new(&app.gl, config, demo)?;
    let mut mouse_captured = scene_manager.demo().captures_mouse();
    app.set_mouse_captured(mouse_captured);

    'running: loop {
        timer.tick();

        for event in app.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::Window {
                    win_event: sdl2::event::WindowEvent::SizeChanged(..),
                    ..
                } => {
                    (width, height) = app.window.drawable_size();
                    unsafe {
                        app.gl.viewport(0, 0, width as i32, height as i32);
                    }
                    log::debug!("Resized to {width}x{height}");
                }
                Event::MouseMotion {
                    x, y, xrel, yrel, ..
                } => {
                    if mouse_captured {
                        mouse_input.cursor_moved_by(xrel as f64, yrel as f64);
                    } else {
                        mouse_input.cursor_moved(x as f64, y as f64);
                    }
                }
                Event::MouseWheel { x, y, .. } => {
                    mouse_input.scrolled(x as f64, y as f64);
                }
                Event::KeyDown {
                    keycode: Some(keycode),
                    repeat: false,
                    ..
                } => {
                    keyboard_state.down.insert(keycode);
                    keyboard_state.pressed.insert(keycode);
                }
                Event::KeyUp {
                    keycode: Some(keycode),
                    repeat: false,
                    ..
                } => {
                    keyboard_state.down.remove(&keycode);
                }
                _ => {}
            }
        }

        if keyboard_state.was_pressed(Keycode::LAlt) {
            mouse_captured = !mouse_captured;
            app.set_mouse_captured(mouse_captured);
            mouse_input.reset(width, height);
        }

        let shown = scene_manager.demo();
        let update_ctx =
            other::UpdateContext::new(&keyboard_state, &mouse_input, &timer, mouse_captured);
        if !scene_manager.update(&update_ctx, &app.gl, config) {
            break 'running;
        }
        if scene_manager.demo() != shown {
            mouse_captured = scene_manager.demo().captures_mouse();
            app.set_mouse_captured(mouse_captured);
            mouse_input.reset(width, height);
        }

        // A minimised window reports a zero-sized drawable.
        if width > 0 && height > 0 {
            scene_manager.render(&app.gl, width as f32 / height as f32);
            app.window.gl_swap_window();
        }

        keyboard_state.end_frame();
        mouse_input.end_frame();
    }

    log::info!(
        "Shutting down after {:.1}s, last frame at {:.0} fps",
        timer.elapsed().as_secs_f32(),
        timer.fps()
    );
    Ok(())
}
