//! Canvas pointer tool: press to select, drag to move
//!
//! A press on an entity selects it. Moving the pointer further than one tile
//! (scaled) turns the press into a drag; releasing a drag commits the snapped
//! position, releasing a plain press opens the entity's editor.

use ssa_scene_core::{EntityRef, Scene, ScenePosition};

use crate::canvas::{drag_threshold, to_logical, CanvasPixel, LogicalPoint};

/// State of the pointer tool between events
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Button held, pointer has not travelled far enough to drag
    Pressed {
        origin: CanvasPixel,
        target: Option<EntityRef>,
    },
    /// Dragging `target`; `offset` is the grab point relative to its position
    Dragging {
        origin: CanvasPixel,
        target: EntityRef,
        offset: LogicalPoint,
        preview: ScenePosition,
    },
}

/// What a button release resolved to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseOutcome {
    /// Nothing under the press, or no press at all
    Nothing,
    /// Press and release without a drag
    Click { target: EntityRef, anchor: CanvasPixel },
    /// A drag finished; `position` is the snapped, clamped new position
    Moved {
        target: EntityRef,
        position: ScenePosition,
    },
}

/// Press/drag/release state machine for the scene canvas
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Entity and candidate position while a drag is active
    pub fn preview(&self) -> Option<(EntityRef, ScenePosition)> {
        match self.state {
            DragState::Dragging {
                target, preview, ..
            } => Some((target, preview)),
            _ => None,
        }
    }

    /// Start a press; `target` is whatever the hit test found under `origin`
    pub fn press(&mut self, origin: CanvasPixel, target: Option<EntityRef>) {
        self.state = DragState::Pressed { origin, target };
    }

    /// Pointer moved. Returns true when the drag preview changed.
    pub fn motion(&mut self, pixel: CanvasPixel, scale: f64, scene: &Scene) -> bool {
        match self.state {
            DragState::Idle => false,
            DragState::Pressed { origin, target } => {
                let Some(target) = target else {
                    return false;
                };
                let threshold = drag_threshold(scale);
                if (origin.x - pixel.x).abs() <= threshold && (origin.y - pixel.y).abs() <= threshold
                {
                    return false;
                }
                let Some(entity) = scene.entity(target) else {
                    self.state = DragState::Idle;
                    return false;
                };
                let current = *entity.position();
                let grab = to_logical(origin, scale);
                let (x, y) = current.absolute();
                let offset = LogicalPoint::new(grab.x - x, grab.y - y);
                let preview = snapped(&current, pixel, scale, offset);
                self.state = DragState::Dragging {
                    origin,
                    target,
                    offset,
                    preview,
                };
                bevy::log::debug!("Started dragging {:?}", target);
                true
            }
            DragState::Dragging {
                origin,
                target,
                offset,
                preview,
            } => {
                let next = snapped(&preview, pixel, scale, offset);
                self.state = DragState::Dragging {
                    origin,
                    target,
                    offset,
                    preview: next,
                };
                next != preview
            }
        }
    }

    /// Button released. Always returns the tool to `Idle`.
    pub fn release(&mut self, pixel: CanvasPixel, scale: f64) -> ReleaseOutcome {
        let state = std::mem::take(&mut self.state);
        match state {
            DragState::Idle
            | DragState::Pressed {
                target: None, ..
            } => ReleaseOutcome::Nothing,
            DragState::Pressed {
                origin,
                target: Some(target),
            } => ReleaseOutcome::Click {
                target,
                anchor: origin,
            },
            DragState::Dragging {
                target,
                offset,
                preview,
                ..
            } => ReleaseOutcome::Moved {
                target,
                position: snapped(&preview, pixel, scale, offset),
            },
        }
    }

    /// Drop any press or drag without committing
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

fn snapped(
    base: &ScenePosition,
    pixel: CanvasPixel,
    scale: f64,
    offset: LogicalPoint,
) -> ScenePosition {
    let pointer = to_logical(pixel, scale);
    base.snapped_from_absolute(pointer.x - offset.x, pointer.y - offset.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssa_scene_core::{Actor, EntityKind, Layer};

    fn scene_with_actor(x: u16, y: u16) -> Scene {
        let mut layer = Layer::new();
        layer
            .actors
            .push(Actor::new(1, ScenePosition::new(x, y).with_direction(3)));
        Scene::new(vec![layer])
    }

    fn actor_ref() -> EntityRef {
        EntityRef::new(0, EntityKind::Actor, 0)
    }

    #[test]
    fn test_short_move_is_a_click() {
        let scene = scene_with_actor(2, 2);
        let mut drag = DragController::new();
        let origin = CanvasPixel::new(20.0, 20.0);
        drag.press(origin, Some(actor_ref()));
        assert!(!drag.motion(CanvasPixel::new(26.0, 27.0), 1.0, &scene));
        assert!(!drag.is_dragging());
        assert_eq!(
            drag.release(CanvasPixel::new(26.0, 27.0), 1.0),
            ReleaseOutcome::Click {
                target: actor_ref(),
                anchor: origin
            }
        );
        assert_eq!(*drag.state(), DragState::Idle);
    }

    #[test]
    fn test_long_move_snaps_to_tile() {
        // Actor at tile (2,2) = logical (16,16); grab it exactly at its position
        let scene = scene_with_actor(2, 2);
        let mut drag = DragController::new();
        drag.press(CanvasPixel::new(20.0, 20.0), Some(actor_ref()));
        assert!(drag.motion(CanvasPixel::new(60.0, 28.0), 1.0, &scene));
        assert!(drag.is_dragging());

        let outcome = drag.release(CanvasPixel::new(60.0, 28.0), 1.0);
        let ReleaseOutcome::Moved { target, position } = outcome else {
            panic!("expected a move, got {:?}", outcome);
        };
        assert_eq!(target, actor_ref());
        assert_eq!((position.x_relative, position.y_relative), (7, 3));
        assert_eq!((position.x_offset, position.y_offset), (0, 0));
        assert_eq!(position.direction, 3);
    }

    #[test]
    fn test_drag_keeps_grab_offset() {
        // Grab 5 pixels right of the actor's anchor at scale 2
        let scene = scene_with_actor(4, 4);
        let mut drag = DragController::new();
        let origin = CanvasPixel::new(4.0 + 37.0 * 2.0, 4.0 + 32.0 * 2.0);
        drag.press(origin, Some(actor_ref()));
        let pointer = CanvasPixel::new(4.0 + 61.0 * 2.0, 4.0 + 32.0 * 2.0);
        assert!(drag.motion(pointer, 2.0, &scene));
        let (_, preview) = drag.preview().unwrap();
        // 61 - 5 = 56 = tile 7
        assert_eq!((preview.x_relative, preview.x_offset), (7, 0));
        assert_eq!((preview.y_relative, preview.y_offset), (4, 0));
    }

    #[test]
    fn test_drag_off_canvas_clamps_to_zero() {
        let scene = scene_with_actor(1, 1);
        let mut drag = DragController::new();
        drag.press(CanvasPixel::new(12.0, 12.0), Some(actor_ref()));
        drag.motion(CanvasPixel::new(-40.0, -40.0), 1.0, &scene);
        let ReleaseOutcome::Moved { position, .. } = drag.release(CanvasPixel::new(-40.0, -40.0), 1.0)
        else {
            panic!("expected a move");
        };
        assert_eq!((position.x_relative, position.y_relative), (0, 0));
        assert_eq!((position.x_offset, position.y_offset), (0, 0));
    }

    #[test]
    fn test_press_on_nothing_never_drags() {
        let scene = scene_with_actor(1, 1);
        let mut drag = DragController::new();
        drag.press(CanvasPixel::new(300.0, 300.0), None);
        assert!(!drag.motion(CanvasPixel::new(10.0, 10.0), 1.0, &scene));
        assert_eq!(drag.release(CanvasPixel::new(10.0, 10.0), 1.0), ReleaseOutcome::Nothing);
    }

    #[test]
    fn test_release_without_press() {
        let mut drag = DragController::new();
        assert_eq!(drag.release(CanvasPixel::new(1.0, 1.0), 1.0), ReleaseOutcome::Nothing);
    }
}
