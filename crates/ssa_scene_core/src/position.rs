//! Tile positions for placed scene entities

use serde::{Deserialize, Serialize};

/// Width and height of one background tile in pixels
pub const TILE_DIM: i32 = 8;

/// Offset flag value marking a half-tile shift on one axis
pub const HALF_TILE_OFFSET: u16 = 2;

/// Position of an entity on the tile grid
///
/// `x_offset`/`y_offset` carry the half-tile flag: when bit 1 is set the entity
/// sits half a tile further right (or down) than its tile coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScenePosition {
    pub x_relative: u16,
    pub y_relative: u16,
    #[serde(default)]
    pub x_offset: u16,
    #[serde(default)]
    pub y_offset: u16,
    /// Direction id, resolved through `ScriptData::directions`
    #[serde(default)]
    pub direction: u8,
}

impl ScenePosition {
    /// Create a position on a whole tile, facing direction 0
    pub fn new(x_relative: u16, y_relative: u16) -> Self {
        Self {
            x_relative,
            y_relative,
            ..Default::default()
        }
    }

    /// Builder-style direction setter
    pub fn with_direction(mut self, direction: u8) -> Self {
        self.direction = direction;
        self
    }

    /// Builder-style half-tile flags
    pub fn with_half_tile(mut self, x_half: bool, y_half: bool) -> Self {
        self.x_offset = if x_half { HALF_TILE_OFFSET } else { 0 };
        self.y_offset = if y_half { HALF_TILE_OFFSET } else { 0 };
        self
    }

    /// Absolute X coordinate in unscaled canvas pixels
    pub fn x_absolute(&self) -> i32 {
        self.x_relative as i32 * TILE_DIM + sub_tile_pixels(self.x_offset)
    }

    /// Absolute Y coordinate in unscaled canvas pixels
    pub fn y_absolute(&self) -> i32 {
        self.y_relative as i32 * TILE_DIM + sub_tile_pixels(self.y_offset)
    }

    /// Absolute (x, y) in unscaled canvas pixels
    pub fn absolute(&self) -> (i32, i32) {
        (self.x_absolute(), self.y_absolute())
    }

    /// Snap an absolute pixel position onto the tile grid, keeping the direction.
    ///
    /// Negative coordinates clamp to tile 0. A coordinate that does not divide
    /// evenly by `TILE_DIM` gets the half-tile flag.
    pub fn snapped_from_absolute(&self, x: i32, y: i32) -> Self {
        let (x_relative, x_offset) = snap_axis(x);
        let (y_relative, y_offset) = snap_axis(y);
        Self {
            x_relative,
            y_relative,
            x_offset,
            y_offset,
            direction: self.direction,
        }
    }
}

fn sub_tile_pixels(offset: u16) -> i32 {
    if offset & HALF_TILE_OFFSET != 0 {
        TILE_DIM / 2
    } else {
        0
    }
}

fn snap_axis(absolute: i32) -> (u16, u16) {
    if absolute <= 0 {
        return (0, 0);
    }
    let tile = u16::try_from(absolute / TILE_DIM).unwrap_or(u16::MAX);
    let offset = if absolute % TILE_DIM != 0 {
        HALF_TILE_OFFSET
    } else {
        0
    };
    (tile, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_position() {
        let pos = ScenePosition::new(5, 3);
        assert_eq!(pos.absolute(), (40, 24));

        let half = ScenePosition::new(5, 3).with_half_tile(true, false);
        assert_eq!(half.absolute(), (44, 24));
    }

    #[test]
    fn test_offset_flag_bit() {
        // Offset value 3 still carries the half-tile bit
        let mut pos = ScenePosition::new(1, 1);
        pos.y_offset = 3;
        assert_eq!(pos.y_absolute(), 12);
        pos.y_offset = 1;
        assert_eq!(pos.y_absolute(), 8);
    }

    #[test]
    fn test_snap_whole_tiles() {
        let pos = ScenePosition::new(0, 0).with_direction(4);
        let snapped = pos.snapped_from_absolute(56, 24);
        assert_eq!(snapped.x_relative, 7);
        assert_eq!(snapped.y_relative, 3);
        assert_eq!(snapped.x_offset, 0);
        assert_eq!(snapped.y_offset, 0);
        assert_eq!(snapped.direction, 4);
    }

    #[test]
    fn test_snap_remainder_sets_half_tile() {
        let snapped = ScenePosition::default().snapped_from_absolute(44, 27);
        assert_eq!((snapped.x_relative, snapped.x_offset), (5, HALF_TILE_OFFSET));
        assert_eq!((snapped.y_relative, snapped.y_offset), (3, HALF_TILE_OFFSET));
    }

    #[test]
    fn test_snap_clamps_negative() {
        let snapped = ScenePosition::default().snapped_from_absolute(-13, -1);
        assert_eq!(snapped.x_relative, 0);
        assert_eq!(snapped.y_relative, 0);
        assert_eq!(snapped.x_offset, 0);
        assert_eq!(snapped.y_offset, 0);
    }
}
