//! Ready-made geometry used by the demos.

use glam::{Vec2, Vec3, Vec4};

use crate::vertex::Vertex;

/// A unit cube centred on the origin with per-face normals and texture
/// coordinates: 24 vertices and 36 indices.
pub fn cube() -> (Vec<Vertex>, Vec<u32>) {
    // (normal, u axis, v axis) for every face, wound counter-clockwise when
    // seen from outside.
    let faces = [
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    ];
    let corners = [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u_axis, v_axis) in faces {
        let base = vertices.len() as u32;
        for uv in corners {
            let position = normal * 0.5 + u_axis * (uv.x - 0.5) + v_axis * (uv.y - 0.5);
            vertices.push(
                Vertex::position(position)
                    .with_tex_coords(uv)
                    .with_normal(normal),
            );
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (vertices, indices)
}

/// A unit quad on the XY plane facing +Z, with texture coordinates and
/// per-corner colors.
pub fn quad(colors: [Vec4; 4]) -> (Vec<Vertex>, Vec<u32>) {
    let corners = [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ];
    let vertices = corners
        .into_iter()
        .zip(colors)
        .map(|(uv, color)| {
            Vertex::new(
                Vec3::new(uv.x - 0.5, uv.y - 0.5, 0.0),
                color,
                uv,
                Vec3::Z,
            )
        })
        .collect();

    (vertices, vec![0, 1, 2, 0, 2, 3])
}

/// The classic red, green and blue triangle.
pub fn triangle() -> Vec<Vertex> {
    vec![
        Vertex::position(Vec3::new(-0.5, -0.5, 0.0)).with_color(Vec4::new(1.0, 0.0, 0.0, 1.0)),
        Vertex::position(Vec3::new(0.5, -0.5, 0.0)).with_color(Vec4::new(0.0, 1.0, 0.0, 1.0)),
        Vertex::position(Vec3::new(0.0, 0.5, 0.0)).with_color(Vec4::new(0.0, 0.0, 1.0, 1.0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_24_vertices_and_36_indices() {
        let (vertices, indices) = cube();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn cube_faces_wind_outwards() {
        let (vertices, indices) = cube();
        for triangle in indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|k| Vec3::from_array(vertices[triangle[k] as usize].position));
            let normal = Vec3::from_array(vertices[triangle[0] as usize].normal);
            let face_normal = (b - a).cross(c - a).normalize();
            assert!(face_normal.abs_diff_eq(normal, 1e-5));
        }
    }

    #[test]
    fn cube_vertices_lie_on_the_unit_cube() {
        let (vertices, _) = cube();
        for vertex in vertices {
            let largest = vertex.position.iter().fold(0.0f32, |m, c| m.max(c.abs()));
            assert!((largest - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn quad_carries_colors_and_uvs() {
        let colors = [Vec4::X, Vec4::Y, Vec4::Z, Vec4::W];
        let (vertices, indices) = quad(colors);
        assert_eq!(indices.len(), 6);
        assert_eq!(vertices[2].tex_coords, [1.0, 1.0]);
        assert_eq!(vertices[3].color, [0.0, 0.0, 0.0, 1.0]);
    }
}
