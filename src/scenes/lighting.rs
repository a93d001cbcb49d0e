//! A lit, textured cube viewed through the free-look camera.
//!
//! The cube binds position, texture coordinates and normal, so its shader reads them from
//! slots 0, 1 and 2. The small cube marking the light reuses the same vertices but binds
//! positions only.

use std::sync::Arc;

use glam::{Mat3, Mat4, Vec3};
use glow::HasContext;
use glsandbox_core::{AttributeMask, Camera, Light, Material, SandboxConfig, shapes};
use sdl2::keyboard::Keycode;

use crate::{
    abs::{Mesh, ShaderProgram, Texture, TextureParams},
    error::GfxError,
    other::UpdateContext,
    scenes::{Scene, SceneSwitch, common_switch},
    shader_program,
};

const DIFFUSE_COLORS: [[u8; 4]; 2] = [[181, 120, 72, 255], [120, 78, 46, 255]];
const SPECULAR_COLORS: [[u8; 4]; 2] = [[200, 200, 200, 255], [20, 20, 20, 255]];

/// Radius and angular speed (radians per second) of the light's orbit around the cube.
const ORBIT_RADIUS: f32 = 2.0;
const ORBIT_SPEED: f32 = 0.8;

pub struct LightingScene {
    cube: Mesh,
    lamp: Mesh,
    shader: ShaderProgram,
    lamp_shader: ShaderProgram,
    // Referenced by `cube` through their handles.
    _diffuse_map: Texture,
    _specular_map: Texture,
    camera: Camera,
    material: Material,
    light: Light,
    orbit_angle: f32,
    orbiting: bool,
}

impl LightingScene {
    pub fn new(gl: &Arc<glow::Context>, config: &SandboxConfig) -> Result<Self, GfxError> {
        let shader = shader_program!(lighting, gl, "..")?;
        let lamp_shader = shader_program!(light_cube, gl, "..")?;

        let textures = &config.textures;
        let diffuse_map = Texture::load_or_checkerboard(
            gl,
            textures.diffuse_map.as_deref(),
            DIFFUSE_COLORS,
            TextureParams::default(),
        )?;
        let specular_map = Texture::load_or_checkerboard(
            gl,
            textures.specular_map.as_deref(),
            SPECULAR_COLORS,
            TextureParams::default(),
        )?;

        // The shader samples both maps, and the mesh binds texture `i` to unit `i`.
        let material = config.material.with_packed_maps();
        let maps = if material.diffuse_map == Some(0) {
            vec![diffuse_map.handle(), specular_map.handle()]
        } else {
            vec![specular_map.handle(), diffuse_map.handle()]
        };

        let (vertices, indices) = shapes::cube();
        let cube = Mesh::with_attributes(
            gl,
            &vertices,
            &indices,
            maps,
            AttributeMask::POSITION | AttributeMask::TEX_COORDS | AttributeMask::NORMAL,
        )?;
        let lamp = Mesh::new(gl, &vertices, &indices, Vec::new())?;

        let light = config.light;
        Ok(Self {
            cube,
            lamp,
            shader,
            lamp_shader,
            _diffuse_map: diffuse_map,
            _specular_map: specular_map,
            camera: Camera::new(config.camera),
            material,
            light,
            orbit_angle: light.position.z.atan2(light.position.x),
            orbiting: true,
        })
    }

    fn update_camera(&mut self, ctx: &UpdateContext) {
        let keyboard = ctx.keyboard;
        let distance = self.camera.movement_speed() * ctx.delta_time();

        if keyboard.is_down(Keycode::W) {
            self.camera.move_forward(distance);
        }
        if keyboard.is_down(Keycode::S) {
            self.camera.move_forward(-distance);
        }
        if keyboard.is_down(Keycode::D) {
            self.camera.move_right(distance);
        }
        if keyboard.is_down(Keycode::A) {
            self.camera.move_right(-distance);
        }
        if keyboard.is_down(Keycode::Space) {
            self.camera.move_up(distance);
        }
        if keyboard.is_down(Keycode::LShift) {
            self.camera.move_up(-distance);
        }
        if keyboard.was_pressed(Keycode::R) {
            self.camera.reset();
        }

        if ctx.mouse_captured {
            let delta = ctx.mouse.delta();
            self.camera.rotate(delta.x, delta.y);
        }
        let scroll = ctx.mouse.scroll_delta().y;
        if scroll != 0.0 {
            self.camera.zoom(scroll);
        }
    }
}

impl Scene for LightingScene {
    fn update(&mut self, ctx: &UpdateContext) -> SceneSwitch {
        self.update_camera(ctx);

        if ctx.keyboard.was_pressed(Keycode::P) {
            self.orbiting = !self.orbiting;
        }
        if self.orbiting {
            self.orbit_angle = (self.orbit_angle + ORBIT_SPEED * ctx.delta_time())
                % std::f32::consts::TAU;
            let height = self.light.position.y;
            self.light.position = Vec3::new(
                ORBIT_RADIUS * self.orbit_angle.cos(),
                height,
                ORBIT_RADIUS * self.orbit_angle.sin(),
            );
        }

        common_switch(ctx)
    }

    fn render(&mut self, gl: &glow::Context, aspect_ratio: f32) {
        unsafe {
            gl.clear_color(0.1, 0.1, 0.12, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        let view = self.camera.view_matrix();
        let projection = self.camera.projection_matrix(aspect_ratio);
        let model = Mat4::IDENTITY;

        self.shader.use_program();
        self.shader.set_uniform("uModel", model);
        self.shader.set_uniform("uView", view);
        self.shader.set_uniform("uProjection", projection);
        self.shader
            .set_uniform("uNormalMatrix", Mat3::from_mat4(model).inverse().transpose());
        self.shader.set_uniform("uViewPos", self.camera.position());
        self.shader.set_uniforms(&self.material.uniforms("uMaterial"));
        self.shader.set_uniforms(&self.light.uniforms("uLight"));
        self.cube.draw(&self.shader);

        let lamp_model =
            Mat4::from_translation(self.light.position) * Mat4::from_scale(Vec3::splat(0.2));
        self.lamp_shader.use_program();
        self.lamp_shader.set_uniform("uModel", lamp_model);
        self.lamp_shader.set_uniform("uView", view);
        self.lamp_shader.set_uniform("uProjection", projection);
        self.lamp_shader.set_uniform("uLightColor", self.light.specular);
        self.lamp.draw(&self.lamp_shader);
    }
}
