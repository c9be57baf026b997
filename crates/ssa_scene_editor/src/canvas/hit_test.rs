//! Draw order and hit testing

use ssa_scene_core::{EntityKind, EntityRef, Scene};

use super::{bounding_box, LogicalPoint};
use crate::layers::LayerVisibility;

/// Order kinds are drawn in within one sector; later kinds draw on top
pub const DRAW_KIND_ORDER: [EntityKind; 4] = [
    EntityKind::Trigger,
    EntityKind::Performer,
    EntityKind::Object,
    EntityKind::Actor,
];

/// Every entity of the scene in the order it is painted
pub fn draw_order(scene: &Scene) -> impl Iterator<Item = EntityRef> + '_ {
    scene
        .layers
        .iter()
        .enumerate()
        .flat_map(|(layer_idx, layer)| {
            DRAW_KIND_ORDER.iter().flat_map(move |&kind| {
                (0..layer.count(kind)).map(move |index| EntityRef::new(layer_idx, kind, index))
            })
        })
}

/// Find the topmost visible entity under a logical point
pub fn hit_test(
    scene: &Scene,
    visibility: &LayerVisibility,
    point: LogicalPoint,
) -> Option<EntityRef> {
    draw_order(scene)
        .filter(|entity| visibility.effective_visible(entity.layer))
        .filter(|entity| {
            scene
                .entity(*entity)
                .is_some_and(|e| bounding_box(e).contains(point))
        })
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssa_scene_core::{Actor, Layer, Object, ScenePosition, Trigger};

    fn overlapping_scene() -> Scene {
        let mut first = Layer::new();
        first
            .triggers
            .push(Trigger::new(0, 4, 4, ScenePosition::new(0, 0)));
        first.actors.push(Actor::new(1, ScenePosition::new(2, 2)));
        let mut second = Layer::new();
        second
            .objects
            .push(Object::new(3, 2, 2, ScenePosition::new(2, 2)));
        Scene::new(vec![first, second, Layer::new()])
    }

    #[test]
    fn test_draw_order() {
        let scene = overlapping_scene();
        let order: Vec<EntityRef> = draw_order(&scene).collect();
        assert_eq!(
            order,
            vec![
                EntityRef::new(0, EntityKind::Trigger, 0),
                EntityRef::new(0, EntityKind::Actor, 0),
                EntityRef::new(1, EntityKind::Object, 0),
            ]
        );
    }

    #[test]
    fn test_single_hit() {
        let mut layer = Layer::new();
        layer.actors.push(Actor::new(1, ScenePosition::new(10, 10)));
        let scene = Scene::new(vec![layer]);
        let visibility = LayerVisibility::new(1);
        assert_eq!(
            hit_test(&scene, &visibility, LogicalPoint::new(80, 80)),
            Some(EntityRef::new(0, EntityKind::Actor, 0))
        );
    }

    #[test]
    fn test_no_hit() {
        let scene = overlapping_scene();
        let visibility = LayerVisibility::new(3);
        assert_eq!(hit_test(&scene, &visibility, LogicalPoint::new(200, 200)), None);
        assert_eq!(
            hit_test(&Scene::default(), &LayerVisibility::new(0), LogicalPoint::new(0, 0)),
            None
        );
    }

    #[test]
    fn test_overlap_prefers_last_drawn() {
        let scene = overlapping_scene();
        let mut visibility = LayerVisibility::new(3);
        // Object in sector 1 is drawn after everything in sector 0
        assert_eq!(
            hit_test(&scene, &visibility, LogicalPoint::new(16, 16)),
            Some(EntityRef::new(1, EntityKind::Object, 0))
        );

        visibility.set_visible(1, false);
        // Actor is drawn after the trigger within sector 0
        assert_eq!(
            hit_test(&scene, &visibility, LogicalPoint::new(16, 16)),
            Some(EntityRef::new(0, EntityKind::Actor, 0))
        );
        assert_eq!(
            hit_test(&scene, &visibility, LogicalPoint::new(1, 1)),
            Some(EntityRef::new(0, EntityKind::Trigger, 0))
        );
    }

    #[test]
    fn test_hidden_layers_never_hit() {
        let scene = overlapping_scene();
        let mut visibility = LayerVisibility::new(3);
        visibility.set_solo(2, true);
        assert_eq!(hit_test(&scene, &visibility, LogicalPoint::new(16, 16)), None);
    }
}
