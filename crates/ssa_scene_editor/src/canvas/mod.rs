//! Scene canvas geometry
//!
//! Everything here works in logical (unscaled) pixels. The egui painter in
//! `ui::canvas` converts to screen space.

pub mod coords;
mod hit_test;

pub use coords::{
    drag_threshold, to_canvas_pixel, to_logical, to_tile, zoom_in, zoom_out, CanvasPixel,
    LogicalPoint, TilePoint, CANVAS_ORIGIN_OFFSET,
};
pub use hit_test::{draw_order, hit_test, DRAW_KIND_ORDER};

use ssa_scene_core::{SceneEntity, ScenePosition, TILE_DIM};

/// Side length of the sprite footprint drawn for actors
pub const SPRITE_FOOTPRINT: i32 = 16;

/// Size of the canvas when no background is chosen
pub const SIZE_REQUEST_NONE: u32 = 500;

/// Axis-aligned rectangle in logical pixels, half-open on the far edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl CanvasRect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centred on a point
    pub fn centered(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Self::new(cx - w / 2, cy - h / 2, w, h)
    }

    pub fn contains(&self, point: LogicalPoint) -> bool {
        point.x >= self.x && point.x < self.x + self.w && point.y >= self.y && point.y < self.y + self.h
    }

    pub fn center(&self) -> LogicalPoint {
        LogicalPoint::new(self.x + self.w / 2, self.y + self.h / 2)
    }
}

/// Bounding box of an entity at its stored position
pub fn bounding_box(entity: SceneEntity<'_>) -> CanvasRect {
    bounding_box_at(entity, entity.position())
}

/// Bounding box of an entity if it stood at `pos`; used for drag previews
pub fn bounding_box_at(entity: SceneEntity<'_>, pos: &ScenePosition) -> CanvasRect {
    let (x, y) = pos.absolute();
    match entity {
        SceneEntity::Actor(_) => CanvasRect::centered(x, y, SPRITE_FOOTPRINT, SPRITE_FOOTPRINT),
        SceneEntity::Object(_) | SceneEntity::Performer(_) => match entity.extent() {
            Some((w, h)) if w > 0 && h > 0 => {
                CanvasRect::centered(x, y, w as i32 * TILE_DIM, h as i32 * TILE_DIM)
            }
            _ => CanvasRect::centered(x, y, SPRITE_FOOTPRINT, SPRITE_FOOTPRINT),
        },
        SceneEntity::Trigger(t) => CanvasRect::new(
            x,
            y,
            t.trigger_width as i32 * TILE_DIM,
            t.trigger_height as i32 * TILE_DIM,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssa_scene_core::{Actor, Object, Performer, Trigger};

    #[test]
    fn test_actor_box_is_centred_sprite() {
        let actor = Actor::new(0, ScenePosition::new(4, 4));
        let rect = bounding_box(SceneEntity::Actor(&actor));
        assert_eq!(rect, CanvasRect::new(24, 24, 16, 16));
        assert_eq!(rect.center(), LogicalPoint::new(32, 32));
    }

    #[test]
    fn test_object_box_uses_hitbox() {
        let object = Object::new(1, 3, 1, ScenePosition::new(10, 10));
        let rect = bounding_box(SceneEntity::Object(&object));
        assert_eq!(rect, CanvasRect::new(68, 76, 24, 8));
    }

    #[test]
    fn test_zero_hitbox_falls_back_to_sprite() {
        let performer = Performer::new(0, 0, 2, ScenePosition::new(2, 2));
        let rect = bounding_box(SceneEntity::Performer(&performer));
        assert_eq!(rect, CanvasRect::new(8, 8, 16, 16));
    }

    #[test]
    fn test_trigger_box_starts_at_position() {
        let trigger = Trigger::new(0, 2, 3, ScenePosition::new(1, 1).with_half_tile(true, true));
        let rect = bounding_box(SceneEntity::Trigger(&trigger));
        assert_eq!(rect, CanvasRect::new(12, 12, 16, 24));
    }

    #[test]
    fn test_contains_is_half_open() {
        let rect = CanvasRect::new(0, 0, 8, 8);
        assert!(rect.contains(LogicalPoint::new(0, 0)));
        assert!(rect.contains(LogicalPoint::new(7, 7)));
        assert!(!rect.contains(LogicalPoint::new(8, 0)));
        assert!(!rect.contains(LogicalPoint::new(-1, 3)));
    }
}
