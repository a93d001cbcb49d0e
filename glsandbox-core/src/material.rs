//! Phong materials and point lights.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::uniform::{UniformAssignment, UniformValue};

/// Surface response to light.
///
/// When a diffuse or specular map is set, the value is the texture unit the
/// map is bound to and replaces the matching color in the shader.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
    pub diffuse_map: Option<i32>,
    pub specular_map: Option<i32>,
}

impl Default for Material {
    /// A material sampled from a diffuse map on unit 0 and a specular map on unit 1. The
    /// ambient color is a plain tint of the diffuse map.
    fn default() -> Self {
        Self {
            ambient: Vec3::ONE,
            diffuse: Vec3::new(1.0, 0.5, 0.31),
            specular: Vec3::splat(0.5),
            shininess: 64.0,
            diffuse_map: Some(0),
            specular_map: Some(1),
        }
    }
}

impl Material {
    /// Returns the material with both maps on units 0 and 1, keeping the order of the
    /// configured units. A missing map takes the unit the other one leaves free.
    pub fn with_packed_maps(self) -> Self {
        let (diffuse, specular) = match (self.diffuse_map, self.specular_map) {
            (Some(d), Some(s)) => {
                if d == s {
                    log::warn!("Diffuse and specular maps share texture unit {d}");
                }
                if s < d { (1, 0) } else { (0, 1) }
            }
            (Some(d), None) => {
                if d > 0 { (1, 0) } else { (0, 1) }
            }
            (None, Some(s)) => {
                if s == 0 { (1, 0) } else { (0, 1) }
            }
            (None, None) => (0, 1),
        };
        if (Some(diffuse), Some(specular)) != (self.diffuse_map, self.specular_map) {
            log::debug!(
                "Material maps moved from units {:?}/{:?} to {diffuse}/{specular}",
                self.diffuse_map,
                self.specular_map
            );
        }
        Self {
            diffuse_map: Some(diffuse),
            specular_map: Some(specular),
            ..self
        }
    }

    /// Lists the uniforms of the material under the struct name `name`, for
    /// example `uMaterial.shininess`.
    pub fn uniforms(&self, name: &str) -> Vec<UniformAssignment> {
        let mut uniforms = vec![
            (format!("{name}.ambient"), UniformValue::Vec3(self.ambient)),
            (format!("{name}.shininess"), UniformValue::Float(self.shininess)),
        ];
        uniforms.push(match self.diffuse_map {
            Some(unit) => (format!("{name}.diffuse"), UniformValue::Int(unit)),
            None => (format!("{name}.diffuse"), UniformValue::Vec3(self.diffuse)),
        });
        uniforms.push(match self.specular_map {
            Some(unit) => (format!("{name}.specular"), UniformValue::Int(unit)),
            None => (format!("{name}.specular"), UniformValue::Vec3(self.specular)),
        });
        uniforms
    }
}

/// A point light.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Light {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::new(1.2, 1.0, 2.0),
            ambient: Vec3::splat(0.2),
            diffuse: Vec3::splat(0.5),
            specular: Vec3::ONE,
        }
    }
}

impl Light {
    /// Lists the uniforms of the light under the struct name `name`.
    pub fn uniforms(&self, name: &str) -> Vec<UniformAssignment> {
        vec![
            (format!("{name}.position"), UniformValue::Vec3(self.position)),
            (format!("{name}.ambient"), UniformValue::Vec3(self.ambient)),
            (format!("{name}.diffuse"), UniformValue::Vec3(self.diffuse)),
            (format!("{name}.specular"), UniformValue::Vec3(self.specular)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(uniforms: &'a [UniformAssignment], name: &str) -> &'a UniformValue {
        &uniforms
            .iter()
            .find(|(n, _)| n == name)
            .unwrap_or_else(|| panic!("missing uniform {name}"))
            .1
    }

    #[test]
    fn default_material_uses_sampler_units() {
        let uniforms = Material::default().uniforms("uMaterial");
        assert_eq!(uniforms.len(), 4);
        assert_eq!(find(&uniforms, "uMaterial.diffuse"), &UniformValue::Int(0));
        assert_eq!(find(&uniforms, "uMaterial.specular"), &UniformValue::Int(1));
        assert_eq!(
            find(&uniforms, "uMaterial.shininess"),
            &UniformValue::Float(64.0)
        );
    }

    #[test]
    fn plain_material_uses_colors() {
        let material = Material {
            diffuse_map: None,
            specular_map: None,
            ..Material::default()
        };
        let uniforms = material.uniforms("m");
        assert_eq!(find(&uniforms, "m.diffuse"), &UniformValue::Vec3(material.diffuse));
    }

    #[test]
    fn packed_maps_follow_configured_order() {
        let packed = |diffuse_map, specular_map| {
            let material = Material {
                diffuse_map,
                specular_map,
                ..Material::default()
            }
            .with_packed_maps();
            (material.diffuse_map, material.specular_map)
        };

        assert_eq!(packed(Some(0), Some(1)), (Some(0), Some(1)));
        assert_eq!(packed(Some(1), None), (Some(1), Some(0)));
        assert_eq!(packed(Some(4), Some(2)), (Some(1), Some(0)));
        assert_eq!(packed(None, Some(0)), (Some(1), Some(0)));
        assert_eq!(packed(None, None), (Some(0), Some(1)));
    }

    #[test]
    fn light_lists_every_field() {
        let light = Light::default();
        let uniforms = light.uniforms("uLight");
        assert_eq!(
            find(&uniforms, "uLight.position"),
            &UniformValue::Vec3(Vec3::new(1.2, 1.0, 2.0))
        );
        assert_eq!(uniforms.len(), 4);
    }
}
