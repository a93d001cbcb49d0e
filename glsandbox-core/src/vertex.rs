//! Vertex records and the attribute mask that selects which of their fields
//! are bound to the pipeline.
//!
//! Every mesh shares the same [`Vertex`] record. A mesh only differs in which
//! fields it declares as present through its [`AttributeMask`].

use std::ops::{BitAnd, BitOr, BitOrAssign};

use glam::{Vec2, Vec3, Vec4};

/// A single vertex as uploaded to the GPU.
///
/// The layout is fixed: position at byte 0, color at 12, texture coordinates at
/// 28 and the normal at 36, for a stride of 48 bytes. Fields are stored as
/// plain arrays so the record has no SIMD padding.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            color: [1.0; 4],
            tex_coords: [0.0; 2],
            normal: [0.0; 3],
        }
    }
}

impl Vertex {
    /// Creates a vertex with every field given.
    pub fn new(position: Vec3, color: Vec4, tex_coords: Vec2, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
            tex_coords: tex_coords.to_array(),
            normal: normal.to_array(),
        }
    }

    /// Creates an opaque white vertex at the given position.
    pub fn position(position: Vec3) -> Self {
        Self {
            position: position.to_array(),
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color.to_array();
        self
    }

    pub fn with_tex_coords(mut self, tex_coords: Vec2) -> Self {
        self.tex_coords = tex_coords.to_array();
        self
    }

    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = normal.to_array();
        self
    }
}

/// One of the four semantic fields of a [`Vertex`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attribute {
    Position,
    Color,
    TexCoords,
    Normal,
}

impl Attribute {
    /// All attributes in canonical binding order.
    pub const ALL: [Attribute; 4] = [
        Attribute::Position,
        Attribute::Color,
        Attribute::TexCoords,
        Attribute::Normal,
    ];

    const fn bit(self) -> u8 {
        match self {
            Attribute::Position => 0b0001,
            Attribute::Color => 0b0010,
            Attribute::TexCoords => 0b0100,
            Attribute::Normal => 0b1000,
        }
    }

    /// Number of `f32` components the attribute occupies.
    pub const fn components(self) -> i32 {
        match self {
            Attribute::Position => 3,
            Attribute::Color => 4,
            Attribute::TexCoords => 2,
            Attribute::Normal => 3,
        }
    }

    /// Byte offset of the attribute inside a [`Vertex`].
    pub const fn offset(self) -> i32 {
        (match self {
            Attribute::Position => std::mem::offset_of!(Vertex, position),
            Attribute::Color => std::mem::offset_of!(Vertex, color),
            Attribute::TexCoords => std::mem::offset_of!(Vertex, tex_coords),
            Attribute::Normal => std::mem::offset_of!(Vertex, normal),
        }) as i32
    }
}

/// A set of [`Attribute`]s.
///
/// Masks are built with `|` and intersected with `&`:
///
/// ```
/// use glsandbox_core::{Attribute, AttributeMask};
///
/// let mask = Attribute::Position | Attribute::Normal;
/// assert!(mask.contains(Attribute::Normal));
/// assert!((mask & AttributeMask::COLOR).is_empty());
/// ```
///
/// Position is conventionally present for anything that is drawn, but a mask
/// without it is accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AttributeMask(u8);

impl AttributeMask {
    pub const EMPTY: Self = Self(0);
    pub const POSITION: Self = Self(Attribute::Position.bit());
    pub const COLOR: Self = Self(Attribute::Color.bit());
    pub const TEX_COORDS: Self = Self(Attribute::TexCoords.bit());
    pub const NORMAL: Self = Self(Attribute::Normal.bit());
    pub const ALL: Self = Self(0b1111);

    /// Returns whether the attribute is part of the mask.
    pub fn contains(self, attribute: Attribute) -> bool {
        self.0 & attribute.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of attributes in the mask.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates the attributes of the mask in canonical order.
    pub fn iter(self) -> impl Iterator<Item = Attribute> {
        Attribute::ALL
            .into_iter()
            .filter(move |attribute| self.contains(*attribute))
    }
}

impl Default for AttributeMask {
    fn default() -> Self {
        Self::POSITION
    }
}

impl From<Attribute> for AttributeMask {
    fn from(attribute: Attribute) -> Self {
        Self(attribute.bit())
    }
}

impl FromIterator<Attribute> for AttributeMask {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, |mask, attribute| mask | attribute)
    }
}

impl<T: Into<AttributeMask>> BitOr<T> for AttributeMask {
    type Output = AttributeMask;

    fn bitor(self, rhs: T) -> Self::Output {
        Self(self.0 | rhs.into().0)
    }
}

impl<T: Into<AttributeMask>> BitOr<T> for Attribute {
    type Output = AttributeMask;

    fn bitor(self, rhs: T) -> Self::Output {
        AttributeMask::from(self) | rhs
    }
}

impl<T: Into<AttributeMask>> BitOrAssign<T> for AttributeMask {
    fn bitor_assign(&mut self, rhs: T) {
        self.0 |= rhs.into().0;
    }
}

impl<T: Into<AttributeMask>> BitAnd<T> for AttributeMask {
    type Output = AttributeMask;

    fn bitand(self, rhs: T) -> Self::Output {
        Self(self.0 & rhs.into().0)
    }
}
