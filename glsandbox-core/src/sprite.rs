//! Sprite sheets: regular grids of equally sized sprites packed into one
//! texture.

use glam::{UVec2, Vec4};

/// The UV rectangle covering the whole texture, `(u0, v0, u1, v1)`.
pub const FULL_UV: Vec4 = Vec4::new(0.0, 0.0, 1.0, 1.0);

/// Splits a texture into a grid of sprites and maps grid cells to UV
/// rectangles.
///
/// The sheet only needs the pixel dimensions of its texture, so it can be
/// paired with any texture handle the caller keeps alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpriteSheet {
    texture_size: UVec2,
    sprite_size: UVec2,
    columns: u32,
    rows: u32,
}

impl SpriteSheet {
    /// Creates a sheet for a texture of `texture_width` x `texture_height`
    /// pixels holding sprites of `sprite_width` x `sprite_height` pixels.
    ///
    /// Zero-sized sprites, or sprites larger than the texture, produce an empty
    /// grid and are reported through the log.
    pub fn new(
        texture_width: u32,
        texture_height: u32,
        sprite_width: u32,
        sprite_height: u32,
    ) -> Self {
        let mut sheet = Self {
            texture_size: UVec2::new(texture_width, texture_height),
            sprite_size: UVec2::new(sprite_width, sprite_height),
            columns: 0,
            rows: 0,
        };

        if sprite_width == 0 || sprite_height == 0 {
            log::error!("Sprite dimensions cannot be zero ({sprite_width}x{sprite_height})");
            return sheet;
        }

        let columns = texture_width / sprite_width;
        let rows = texture_height / sprite_height;
        if columns == 0 || rows == 0 {
            log::error!(
                "Sprite dimensions {sprite_width}x{sprite_height} are larger than texture dimensions {texture_width}x{texture_height}"
            );
            return sheet;
        }

        sheet.columns = columns;
        sheet.rows = rows;
        sheet
    }

    /// Returns the UV rectangle `(u0, v0, u1, v1)` of the sprite at grid cell
    /// `(x, y)`.
    ///
    /// Cells outside the grid are logged and map to [`FULL_UV`].
    pub fn sprite_uv(&self, x: u32, y: u32) -> Vec4 {
        if !self.contains(x, y) {
            log::error!(
                "Requested sprite ({x}, {y}) but sheet only has {}x{} sprites",
                self.columns,
                self.rows
            );
            return FULL_UV;
        }

        let width = self.texture_size.x as f32;
        let height = self.texture_size.y as f32;
        let (sprite_w, sprite_h) = (self.sprite_size.x, self.sprite_size.y);
        Vec4::new(
            (x * sprite_w) as f32 / width,
            (y * sprite_h) as f32 / height,
            ((x + 1) * sprite_w) as f32 / width,
            ((y + 1) * sprite_h) as f32 / height,
        )
    }

    /// Returns whether `(x, y)` is a cell of the grid.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.columns && y < self.rows
    }

    /// A sheet is usable when its grid holds at least one sprite.
    pub fn is_valid(&self) -> bool {
        self.columns > 0 && self.rows > 0
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn frame_count(&self) -> u32 {
        self.columns * self.rows
    }

    pub fn sprite_width(&self) -> u32 {
        self.sprite_size.x
    }

    pub fn sprite_height(&self) -> u32 {
        self.sprite_size.y
    }

    pub fn texture_size(&self) -> UVec2 {
        self.texture_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_is_derived_from_texture() {
        let sheet = SpriteSheet::new(256, 128, 32, 32);
        assert!(sheet.is_valid());
        assert_eq!(sheet.columns(), 8);
        assert_eq!(sheet.rows(), 4);
        assert_eq!(sheet.frame_count(), 32);
    }

    #[test]
    fn in_range_uv_covers_the_cell() {
        let sheet = SpriteSheet::new(256, 128, 32, 32);
        assert_eq!(sheet.sprite_uv(0, 0), Vec4::new(0.0, 0.0, 0.125, 0.25));
        assert_eq!(sheet.sprite_uv(3, 2), Vec4::new(0.375, 0.5, 0.5, 0.75));
        assert_eq!(sheet.sprite_uv(7, 3), Vec4::new(0.875, 0.75, 1.0, 1.0));
    }

    #[test]
    fn out_of_range_uv_is_the_full_texture() {
        let sheet = SpriteSheet::new(256, 128, 32, 32);
        assert_eq!(sheet.sprite_uv(8, 0), FULL_UV);
        assert_eq!(sheet.sprite_uv(0, 4), FULL_UV);
        assert_eq!(sheet.sprite_uv(u32::MAX, u32::MAX), FULL_UV);
    }

    #[test]
    fn zero_sized_sprites_give_an_empty_grid() {
        let sheet = SpriteSheet::new(64, 64, 0, 16);
        assert!(!sheet.is_valid());
        assert_eq!(sheet.columns(), 0);
        assert_eq!(sheet.sprite_uv(0, 0), FULL_UV);
    }

    #[test]
    fn oversized_sprites_give_an_empty_grid() {
        let sheet = SpriteSheet::new(16, 16, 32, 8);
        assert!(!sheet.is_valid());
        assert_eq!(sheet.rows(), 0);
    }

    #[test]
    fn partial_cells_are_dropped() {
        let sheet = SpriteSheet::new(100, 50, 30, 20);
        assert_eq!(sheet.columns(), 3);
        assert_eq!(sheet.rows(), 2);
        assert_eq!(sheet.sprite_uv(2, 1), Vec4::new(0.6, 0.4, 0.9, 0.8));
    }
}
