//! Sampling of polar functions into line vertices.

use glam::{Vec3, Vec4};

use crate::vertex::Vertex;

/// `r(θ) = e^sin(θ) - 2cos(4θ)`, the butterfly curve.
pub fn butterfly(theta: f32) -> f32 {
    theta.sin().exp() - 2.0 * (4.0 * theta).cos()
}

/// Samples `f` over `turns` full revolutions with a step of `step_degrees`
/// and converts every `(r, θ)` pair to cartesian coordinates on the XY plane.
///
/// A non-positive step yields no vertices.
pub fn sample_polar(
    f: impl Fn(f32) -> f32,
    turns: f32,
    step_degrees: f32,
    color: Vec4,
) -> Vec<Vertex> {
    if step_degrees.is_nan() || step_degrees <= 0.0 || turns.is_nan() || turns <= 0.0 {
        log::warn!("Cannot sample polar function with step {step_degrees} over {turns} turns");
        return Vec::new();
    }

    let end = 360.0 * turns;
    let count = (end / step_degrees).ceil() as usize;
    (0..count)
        .map(|i| {
            let theta = (i as f32 * step_degrees).to_radians();
            let r = f(theta);
            Vertex::position(Vec3::new(r * theta.cos(), r * theta.sin(), 0.0)).with_color(color)
        })
        .collect()
}

/// Scales vertices on the XY plane so the largest coordinate magnitude becomes
/// `extent`.
pub fn fit_to_extent(vertices: &mut [Vertex], extent: f32) {
    let largest = vertices
        .iter()
        .flat_map(|v| [v.position[0].abs(), v.position[1].abs()])
        .fold(0.0f32, f32::max);
    if largest <= f32::EPSILON {
        return;
    }

    let scale = extent / largest;
    for vertex in vertices {
        vertex.position[0] *= scale;
        vertex.position[1] *= scale;
    }
}

/// The four vertices of the X and Y axes spanning `[-extent, extent]`, drawn
/// as two lines.
pub fn axes(extent: f32, color: Vec4) -> [Vertex; 4] {
    [
        Vertex::position(Vec3::new(-extent, 0.0, 0.0)).with_color(color),
        Vertex::position(Vec3::new(extent, 0.0, 0.0)).with_color(color),
        Vertex::position(Vec3::new(0.0, -extent, 0.0)).with_color(color),
        Vertex::position(Vec3::new(0.0, extent, 0.0)).with_color(color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_cover_every_turn() {
        let vertices = sample_polar(|_| 1.0, 2.0, 1.0, Vec4::ONE);
        assert_eq!(vertices.len(), 720);

        let quarter = vertices[90].position;
        assert!(quarter[0].abs() < 1e-5);
        assert!((quarter[1] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn invalid_step_samples_nothing() {
        assert!(sample_polar(butterfly, 1.0, 0.0, Vec4::ONE).is_empty());
        assert!(sample_polar(butterfly, -1.0, 1.0, Vec4::ONE).is_empty());
    }

    #[test]
    fn butterfly_matches_formula() {
        assert!((butterfly(0.0) - (1.0 - 2.0)).abs() < 1e-6);
    }

    #[test]
    fn fitting_scales_largest_coordinate() {
        let mut vertices = sample_polar(butterfly, 1.0, 0.5, Vec4::ONE);
        fit_to_extent(&mut vertices, 0.9);
        let largest = vertices
            .iter()
            .flat_map(|v| [v.position[0].abs(), v.position[1].abs()])
            .fold(0.0f32, f32::max);
        assert!((largest - 0.9).abs() < 1e-5);
    }

    #[test]
    fn axes_span_the_extent() {
        let axes = axes(0.8, Vec4::ONE);
        assert_eq!(axes[1].position, [0.8, 0.0, 0.0]);
        assert_eq!(axes[2].position, [0.0, -0.8, 0.0]);
    }
}
