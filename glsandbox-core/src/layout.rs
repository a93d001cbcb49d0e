//! Planning of vertex attribute bindings and draw calls.
//!
//! A mesh binds one attribute slot per field present in its
//! [`AttributeMask`]. Slots are handed out sequentially in canonical field
//! order (position, color, texture coordinates, normal), so slot `N` is the
//! `N`th present field and not the field's position inside [`Vertex`]. A
//! shader for a `Position | Normal` mesh therefore reads the normal from
//! location 1.

use crate::vertex::{Attribute, AttributeMask, Vertex};

/// A single enabled vertex attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttributeBinding {
    /// The shader input location.
    pub slot: u32,
    pub attribute: Attribute,
    /// Number of `f32` components read from each vertex.
    pub components: i32,
    /// Byte offset of the field inside a [`Vertex`].
    pub offset: i32,
}

/// The complete set of attribute bindings for one mesh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexLayout {
    bindings: Vec<AttributeBinding>,
}

impl VertexLayout {
    /// Distance in bytes between two consecutive vertices.
    pub const STRIDE: i32 = std::mem::size_of::<Vertex>() as i32;

    /// Builds the layout for the given mask.
    pub fn from_mask(mask: AttributeMask) -> Self {
        let bindings = mask
            .iter()
            .enumerate()
            .map(|(slot, attribute)| AttributeBinding {
                slot: slot as u32,
                attribute,
                components: attribute.components(),
                offset: attribute.offset(),
            })
            .collect();

        Self { bindings }
    }

    pub fn bindings(&self) -> &[AttributeBinding] {
        &self.bindings
    }

    /// Returns the slot bound to the attribute, if it is part of the layout.
    pub fn slot_of(&self, attribute: Attribute) -> Option<u32> {
        self.bindings
            .iter()
            .find(|binding| binding.attribute == attribute)
            .map(|binding| binding.slot)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl AttributeMask {
    /// Shorthand for [`VertexLayout::from_mask`].
    pub fn layout(self) -> VertexLayout {
        VertexLayout::from_mask(self)
    }
}

/// How consecutive vertices are assembled into primitives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Primitive {
    #[default]
    Triangles,
    Lines,
    LineStrip,
    LineLoop,
    Points,
}

/// The single draw call a mesh issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawCall {
    /// Draw `count` indices from the index buffer.
    Indexed { primitive: Primitive, count: i32 },
    /// Draw `count` vertices in order.
    Arrays { primitive: Primitive, count: i32 },
}

impl DrawCall {
    /// Chooses between an indexed and a non-indexed draw.
    ///
    /// Returns `None` when there is nothing to draw.
    pub fn plan(primitive: Primitive, index_count: usize, vertex_count: usize) -> Option<Self> {
        if index_count > 0 {
            Some(DrawCall::Indexed {
                primitive,
                count: index_count as i32,
            })
        } else if vertex_count > 0 {
            Some(DrawCall::Arrays {
                primitive,
                count: vertex_count as i32,
            })
        } else {
            None
        }
    }

    pub fn count(&self) -> i32 {
        match *self {
            DrawCall::Indexed { count, .. } | DrawCall::Arrays { count, .. } => count,
        }
    }

    pub fn primitive(&self) -> Primitive {
        match *self {
            DrawCall::Indexed { primitive, .. } | DrawCall::Arrays { primitive, .. } => primitive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mask_gets_sequential_slots() {
        for bits in 0u8..16 {
            let mask: AttributeMask = Attribute::ALL
                .into_iter()
                .enumerate()
                .filter(|(i, _)| bits & (1 << i) != 0)
                .map(|(_, attribute)| attribute)
                .collect();
            let layout = mask.layout();

            assert_eq!(layout.len(), bits.count_ones() as usize);
            let slots: Vec<u32> = layout.bindings().iter().map(|b| b.slot).collect();
            let expected: Vec<u32> = (0..layout.len() as u32).collect();
            assert_eq!(slots, expected);

            let order: Vec<Attribute> = layout.bindings().iter().map(|b| b.attribute).collect();
            assert_eq!(order, mask.iter().collect::<Vec<_>>());
        }
    }

    #[test]
    fn position_normal_mesh_binds_two_slots() {
        let layout = (Attribute::Position | Attribute::Normal).layout();
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.slot_of(Attribute::Position), Some(0));
        assert_eq!(layout.slot_of(Attribute::Normal), Some(1));
        assert_eq!(layout.slot_of(Attribute::Color), None);

        let normal = layout.bindings()[1];
        assert_eq!(normal.components, 3);
        assert_eq!(normal.offset, 36);
    }

    #[test]
    fn tex_coords_follow_color_when_both_present() {
        let layout = AttributeMask::ALL.layout();
        assert_eq!(layout.slot_of(Attribute::TexCoords), Some(2));
        assert_eq!(layout.bindings()[2].components, 2);
        assert_eq!(VertexLayout::STRIDE, 48);
    }

    #[test]
    fn indexed_draw_counts_indices() {
        let call = DrawCall::plan(Primitive::Triangles, 36, 24).unwrap();
        assert_eq!(
            call,
            DrawCall::Indexed {
                primitive: Primitive::Triangles,
                count: 36
            }
        );
    }

    #[test]
    fn non_indexed_draw_counts_vertices() {
        let call = DrawCall::plan(Primitive::LineLoop, 0, 90).unwrap();
        assert_eq!(call.count(), 90);
        assert!(matches!(call, DrawCall::Arrays { .. }));
        assert_eq!(call.primitive(), Primitive::LineLoop);
    }

    #[test]
    fn empty_mesh_draws_nothing() {
        assert_eq!(DrawCall::plan(Primitive::Triangles, 0, 0), None);
    }
}
