//! Conversions between canvas pixels, logical pixels and tiles
//!
//! Canvas pixels are what the pointer reports: scaled, and shifted by the
//! border drawn around the scene. Logical pixels are unscaled scene pixels.

use ssa_scene_core::TILE_DIM;

/// Width of the border between the canvas widget edge and scene pixel 0
pub const CANVAS_ORIGIN_OFFSET: f64 = 4.0;

/// A pointer position in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasPixel {
    pub x: f64,
    pub y: f64,
}

impl CanvasPixel {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in unscaled scene pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LogicalPoint {
    pub x: i32,
    pub y: i32,
}

impl LogicalPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A point on the tile grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TilePoint {
    pub x: i32,
    pub y: i32,
}

/// Map a canvas pixel to a logical pixel. Rounds toward negative infinity.
pub fn to_logical(pixel: CanvasPixel, scale: f64) -> LogicalPoint {
    LogicalPoint {
        x: ((pixel.x - CANVAS_ORIGIN_OFFSET) / scale).floor() as i32,
        y: ((pixel.y - CANVAS_ORIGIN_OFFSET) / scale).floor() as i32,
    }
}

/// Tile containing a logical pixel
pub fn to_tile(point: LogicalPoint) -> TilePoint {
    TilePoint {
        x: point.x.div_euclid(TILE_DIM),
        y: point.y.div_euclid(TILE_DIM),
    }
}

/// Canvas pixel of a logical pixel's top-left corner
pub fn to_canvas_pixel(point: LogicalPoint, scale: f64) -> CanvasPixel {
    CanvasPixel {
        x: point.x as f64 * scale + CANVAS_ORIGIN_OFFSET,
        y: point.y as f64 * scale + CANVAS_ORIGIN_OFFSET,
    }
}

/// Pointer travel in canvas pixels that turns a press into a drag
pub fn drag_threshold(scale: f64) -> f64 {
    TILE_DIM as f64 * scale
}

pub fn zoom_in(scale: f64) -> f64 {
    scale * 2.0
}

pub fn zoom_out(scale: f64) -> f64 {
    scale / 2.0
}
