//! Plays a sprite sheet animation on a quad.
//!
//! Without a configured sheet a 4x2 grid of pulsing discs is generated instead.

use std::{cell::Cell, rc::Rc, sync::Arc};

use glam::{Mat4, Vec3, Vec4};
use glow::HasContext;
use glsandbox_core::{Animation, AttributeMask, SandboxConfig, SpriteSheet, shapes};
use image::{DynamicImage, Rgba, RgbaImage};
use sdl2::keyboard::Keycode;

use crate::{
    abs::{Mesh, ShaderProgram, Texture, TextureParams},
    error::GfxError,
    other::UpdateContext,
    scenes::{Scene, SceneSwitch, aspect_fit, common_switch},
    shader_program,
};

const FRAME_DURATION: f32 = 0.12;
const GENERATED_SPRITE_SIZE: u32 = 32;
const GENERATED_COLUMNS: u32 = 4;
const GENERATED_ROWS: u32 = 2;

/// Draws frame `i` of the generated sheet as a disc whose radius grows with `i`.
fn generated_sheet() -> DynamicImage {
    let size = GENERATED_SPRITE_SIZE;
    let frames = (GENERATED_COLUMNS * GENERATED_ROWS) as f32;
    let image = RgbaImage::from_fn(size * GENERATED_COLUMNS, size * GENERATED_ROWS, |x, y| {
        let frame = (y / size * GENERATED_COLUMNS + x / size) as f32;
        let center = size as f32 / 2.0;
        let dx = (x % size) as f32 + 0.5 - center;
        let dy = (y % size) as f32 + 0.5 - center;
        let radius = center * (0.25 + 0.75 * (frame + 1.0) / frames);
        if dx * dx + dy * dy <= radius * radius {
            let t = frame / frames;
            Rgba([255, (80.0 + 175.0 * t) as u8, (255.0 * (1.0 - t)) as u8, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    DynamicImage::ImageRgba8(image)
}

pub struct SpriteScene {
    mesh: Mesh,
    shader: ShaderProgram,
    // Referenced by `mesh` through its handle.
    _texture: Texture,
    animation: Animation,
    frame_changes: Rc<Cell<u64>>,
}

impl SpriteScene {
    pub fn new(gl: &Arc<glow::Context>, config: &SandboxConfig) -> Result<Self, GfxError> {
        let shader = shader_program!(sprite, gl, "..")?;

        let configured = match &config.textures.sprite_sheet {
            Some(path) => match Texture::from_path(gl, path, TextureParams::pixelated()) {
                Ok(texture) => Some(texture),
                Err(e) => {
                    log::warn!("{e}, using a generated sprite sheet instead");
                    None
                }
            },
            None => None,
        };
        let (texture, [sprite_width, sprite_height]) = match configured {
            Some(texture) => (texture, config.textures.sprite_size),
            None => (
                Texture::new(gl, &generated_sheet(), TextureParams::pixelated())?,
                [GENERATED_SPRITE_SIZE; 2],
            ),
        };

        let handle = texture.handle();
        let sheet = SpriteSheet::new(handle.width(), handle.height(), sprite_width, sprite_height);
        if !sheet.is_valid() {
            log::warn!("Sprite sheet has no frames, showing the whole texture");
        }

        let mut animation = Animation::new(sheet, FRAME_DURATION, true);
        animation.add_all_frames();
        animation.set_on_complete(|| log::info!("Sprite animation finished"));
        let frame_changes = Rc::new(Cell::new(0));
        let counter = Rc::clone(&frame_changes);
        animation.set_on_frame_change(move || counter.set(counter.get() + 1));
        animation.play();
        log::info!(
            "Playing {} frames of a {}x{} sprite sheet",
            animation.total_frames(),
            sheet.columns(),
            sheet.rows()
        );

        let (vertices, indices) = shapes::quad([Vec4::ONE; 4]);
        let mesh = Mesh::with_attributes(
            gl,
            &vertices,
            &indices,
            vec![handle],
            AttributeMask::POSITION | AttributeMask::TEX_COORDS,
        )?;

        shader.use_program();
        shader.set_uniform("uTexture", 0);

        Ok(Self {
            mesh,
            shader,
            _texture: texture,
            animation,
            frame_changes,
        })
    }
}

impl Scene for SpriteScene {
    fn update(&mut self, ctx: &UpdateContext) -> SceneSwitch {
        let keyboard = ctx.keyboard;
        if keyboard.was_pressed(Keycode::Space) {
            if self.animation.is_playing() {
                self.animation.pause();
            } else {
                self.animation.play();
            }
        }
        if keyboard.was_pressed(Keycode::L) {
            let looping = !self.animation.is_looping();
            self.animation.set_looping(looping);
            log::info!("Sprite animation looping {}", if looping { "on" } else { "off" });
        }
        if keyboard.was_pressed(Keycode::R) {
            self.animation.stop();
            self.animation.play();
        }

        self.animation.update(ctx.delta_time());
        common_switch(ctx)
    }

    fn render(&mut self, gl: &glow::Context, aspect_ratio: f32) {
        unsafe {
            gl.clear_color(0.15, 0.15, 0.2, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        let sheet = self.animation.sheet();
        let sprite_aspect = if sheet.is_valid() {
            sheet.sprite_width() as f32 / sheet.sprite_height() as f32
        } else {
            1.0
        };
        let transform = aspect_fit(aspect_ratio)
            * Mat4::from_scale(Vec3::new(1.2 * sprite_aspect, 1.2, 1.0));

        self.shader.use_program();
        self.shader.set_uniform("uTransform", transform);
        self.shader.set_uniform("uUvRect", self.animation.current_uv());
        self.mesh.draw(&self.shader);
    }
}

impl Drop for SpriteScene {
    fn drop(&mut self) {
        log::debug!(
            "Sprite animation changed frame {} times",
            self.frame_changes.get()
        );
    }
}
