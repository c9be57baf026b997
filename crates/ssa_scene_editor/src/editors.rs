//! Property editors for the selected entity
//!
//! Editors only offer values from fixed choice lists, plus free text for
//! sizes. Anything that does not validate is dropped without touching the
//! scene.

use ssa_scene_core::{
    EntityRef, Scene, SceneEntity, SceneEntityMut, ScriptData, PERFORMER_TYPES, NO_SCRIPT,
};

use crate::canvas::CanvasPixel;
use crate::naming::{file_short_name, script_suffix_id, ScriptNames};

/// One entry of a choice list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice<T> {
    pub id: T,
    pub label: String,
}

impl<T> Choice<T> {
    pub fn new(id: T, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// Find the label of `id` in a choice list
pub fn choice_label<T: PartialEq>(choices: &[Choice<T>], id: &T) -> Option<String> {
    choices.iter().find(|c| c.id == *id).map(|c| c.label.clone())
}

fn contains<T: PartialEq>(choices: &[Choice<T>], id: &T) -> bool {
    choices.iter().any(|c| c.id == *id)
}

/// Choice lists offered by the entity editors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorChoices {
    pub actor_kinds: Vec<Choice<u16>>,
    pub object_kinds: Vec<Choice<u16>>,
    pub scripts: Vec<Choice<i16>>,
    pub directions: Vec<Choice<u8>>,
    pub performer_types: Vec<Choice<u16>>,
    pub triggers: Vec<Choice<u16>>,
    /// Sector list; the sector field is shown but not editable
    pub sectors: Vec<Choice<usize>>,
}

impl EditorChoices {
    pub fn build(names: &ScriptNames<'_>, data: &ScriptData, layer_count: usize) -> Self {
        let mut scripts = vec![Choice::new(NO_SCRIPT, "None")];
        scripts.extend(names.scripts.iter().map(|script| {
            Choice::new(
                script_suffix_id(script).unwrap_or(0),
                file_short_name(script),
            )
        }));

        Self {
            actor_kinds: data
                .level_entities
                .iter()
                .map(|k| Choice::new(k.id, k.name.clone()))
                .collect(),
            object_kinds: data
                .objects
                .iter()
                .map(|k| Choice::new(k.id, k.unique_name.clone()))
                .collect(),
            scripts,
            directions: data
                .directions
                .iter()
                .map(|d| Choice::new(d.id, d.name.clone()))
                .collect(),
            performer_types: PERFORMER_TYPES
                .iter()
                .map(|t| Choice::new(*t, format!("Type {}", t)))
                .collect(),
            triggers: names
                .events
                .iter()
                .enumerate()
                .filter_map(|(i, event)| {
                    let id = u16::try_from(i).ok()?;
                    Some(Choice::new(id, names.trigger_choice_label(event)))
                })
                .collect(),
            sectors: (0..layer_count)
                .map(|i| Choice::new(i, format!("Sector {}", i)))
                .collect(),
        }
    }
}

/// A single field change requested by an editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityEdit {
    /// Actor or object archetype
    Kind(u16),
    TalkScript(i16),
    Direction(u8),
    PerformerType(u16),
    TriggerId(u16),
    /// Raw text of the width field (hitbox or trigger area)
    Width(String),
    /// Raw text of the height field (hitbox or trigger area)
    Height(String),
}

/// Open editor popover for one entity
#[derive(Debug, Clone, PartialEq)]
pub struct Popover {
    pub target: EntityRef,
    /// Canvas pixel the popover points at
    pub anchor: CanvasPixel,
    /// Text buffers of the size fields, kept as typed
    pub width_text: String,
    pub height_text: String,
}

impl Popover {
    pub fn for_entity(target: EntityRef, entity: SceneEntity<'_>, anchor: CanvasPixel) -> Self {
        let (width_text, height_text) = entity
            .extent()
            .map(|(w, h)| (w.to_string(), h.to_string()))
            .unwrap_or_default();
        Self {
            target,
            anchor,
            width_text,
            height_text,
        }
    }
}

/// Apply an edit to `target`. Returns false when the edit was rejected.
pub fn apply_edit(
    scene: &mut Scene,
    target: EntityRef,
    edit: &EntityEdit,
    choices: &EditorChoices,
) -> bool {
    let Some(entity) = scene.entity_mut(target) else {
        return false;
    };
    match (entity, edit) {
        (SceneEntityMut::Actor(actor), EntityEdit::Kind(id))
            if contains(&choices.actor_kinds, id) =>
        {
            actor.kind = *id;
        }
        (SceneEntityMut::Object(object), EntityEdit::Kind(id))
            if contains(&choices.object_kinds, id) =>
        {
            object.kind = *id;
        }
        (SceneEntityMut::Actor(actor), EntityEdit::TalkScript(id))
            if contains(&choices.scripts, id) =>
        {
            actor.script_id = *id;
        }
        (SceneEntityMut::Object(object), EntityEdit::TalkScript(id))
            if contains(&choices.scripts, id) =>
        {
            object.script_id = *id;
        }
        (SceneEntityMut::Trigger(_), EntityEdit::Direction(_)) => return false,
        (mut entity, EntityEdit::Direction(id)) if contains(&choices.directions, id) => {
            entity.position_mut().direction = *id;
        }
        (SceneEntityMut::Performer(performer), EntityEdit::PerformerType(t))
            if contains(&choices.performer_types, t) =>
        {
            performer.performer_type = *t;
        }
        (SceneEntityMut::Trigger(trigger), EntityEdit::TriggerId(id))
            if contains(&choices.triggers, id) =>
        {
            trigger.trigger_id = *id;
        }
        (entity, EntityEdit::Width(text)) => {
            let Some(value) = parse_size(text) else {
                return false;
            };
            match entity {
                SceneEntityMut::Object(o) => o.hitbox_w = value,
                SceneEntityMut::Performer(p) => p.hitbox_w = value,
                SceneEntityMut::Trigger(t) => t.trigger_width = value,
                SceneEntityMut::Actor(_) => return false,
            }
        }
        (entity, EntityEdit::Height(text)) => {
            let Some(value) = parse_size(text) else {
                return false;
            };
            match entity {
                SceneEntityMut::Object(o) => o.hitbox_h = value,
                SceneEntityMut::Performer(p) => p.hitbox_h = value,
                SceneEntityMut::Trigger(t) => t.trigger_height = value,
                SceneEntityMut::Actor(_) => return false,
            }
        }
        _ => return false,
    }
    true
}

fn parse_size(text: &str) -> Option<u16> {
    text.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssa_scene_core::{
        Actor, ActorKind, EntityKind, Layer, Object, Performer, SceneEvent, SceneType, ScenePosition,
        Trigger,
    };

    fn scene() -> Scene {
        let mut layer = Layer::new();
        layer.actors.push(Actor::new(0, ScenePosition::new(1, 1)));
        layer
            .objects
            .push(Object::new(0, 2, 2, ScenePosition::new(3, 3)));
        layer
            .performers
            .push(Performer::new(0, 1, 1, ScenePosition::new(5, 5)));
        layer
            .triggers
            .push(Trigger::new(0, 4, 4, ScenePosition::new(6, 6)));
        let mut scene = Scene::new(vec![layer]);
        scene.events.push(SceneEvent {
            script_id: 0,
            coroutine: 0,
            unk2: 0,
            unk3: 0,
        });
        scene
    }

    fn choices(scene: &Scene) -> EditorChoices {
        let data = ScriptData {
            level_entities: vec![
                ActorKind {
                    id: 0,
                    name: "PLAYER".to_string(),
                    entid: 0,
                },
                ActorKind {
                    id: 10,
                    name: "NPC_A".to_string(),
                    entid: 0,
                },
            ],
            ..Default::default()
        };
        let scripts = vec!["SCRIPT/T01/m01a0101.ssb".to_string()];
        let names = ScriptNames {
            scene_type: SceneType::Ssa,
            scripts: &scripts,
            events: &scene.events,
            data: &data,
        };
        EditorChoices::build(&names, &data, scene.layers.len())
    }

    fn obj() -> EntityRef {
        EntityRef::new(0, EntityKind::Object, 0)
    }

    #[test]
    fn test_choice_lists() {
        let scene = scene();
        let c = choices(&scene);
        assert_eq!(c.scripts[0], Choice::new(-1, "None"));
        assert_eq!(c.scripts[1], Choice::new(1, "m01a0101.ssb"));
        assert_eq!(c.performer_types.len(), 6);
        assert_eq!(c.triggers.len(), 1);
        assert_eq!(c.sectors, vec![Choice::new(0, "Sector 0")]);
        assert_eq!(choice_label(&c.actor_kinds, &10), Some("NPC_A".to_string()));
    }

    #[test]
    fn test_width_accepts_numbers() {
        let mut scene = scene();
        let c = choices(&scene);
        assert!(apply_edit(&mut scene, obj(), &EntityEdit::Width("5".to_string()), &c));
        assert!(apply_edit(&mut scene, obj(), &EntityEdit::Height(" 3".to_string()), &c));
        assert_eq!(scene.layers[0].objects[0].hitbox_w, 5);
        assert_eq!(scene.layers[0].objects[0].hitbox_h, 3);

        let trigger = EntityRef::new(0, EntityKind::Trigger, 0);
        assert!(apply_edit(&mut scene, trigger, &EntityEdit::Width("7".to_string()), &c));
        assert_eq!(scene.layers[0].triggers[0].trigger_width, 7);
    }

    #[test]
    fn test_malformed_width_is_ignored() {
        let mut scene = scene();
        let c = choices(&scene);
        for text in ["-3", "abc", "", "70000", "2.5"] {
            assert!(!apply_edit(&mut scene, obj(), &EntityEdit::Width(text.to_string()), &c));
            assert!(!apply_edit(&mut scene, obj(), &EntityEdit::Height(text.to_string()), &c));
        }
        assert_eq!(scene.layers[0].objects[0].hitbox_w, 2);
        assert_eq!(scene.layers[0].objects[0].hitbox_h, 2);
    }

    #[test]
    fn test_choice_edits_validate_membership() {
        let mut scene = scene();
        let c = choices(&scene);
        let actor = EntityRef::new(0, EntityKind::Actor, 0);
        assert!(apply_edit(&mut scene, actor, &EntityEdit::Kind(10), &c));
        assert!(!apply_edit(&mut scene, actor, &EntityEdit::Kind(11), &c));
        assert_eq!(scene.layers[0].actors[0].kind, 10);

        assert!(apply_edit(&mut scene, actor, &EntityEdit::TalkScript(1), &c));
        assert!(!apply_edit(&mut scene, actor, &EntityEdit::TalkScript(4), &c));
        assert_eq!(scene.layers[0].actors[0].script_id, 1);

        assert!(apply_edit(&mut scene, actor, &EntityEdit::Direction(5), &c));
        assert!(!apply_edit(&mut scene, actor, &EntityEdit::Direction(0), &c));
        assert_eq!(scene.layers[0].actors[0].pos.direction, 5);

        let performer = EntityRef::new(0, EntityKind::Performer, 0);
        assert!(apply_edit(&mut scene, performer, &EntityEdit::PerformerType(5), &c));
        assert!(!apply_edit(&mut scene, performer, &EntityEdit::PerformerType(6), &c));
        assert_eq!(scene.layers[0].performers[0].performer_type, 5);

        let trigger = EntityRef::new(0, EntityKind::Trigger, 0);
        assert!(!apply_edit(&mut scene, trigger, &EntityEdit::TriggerId(1), &c));
        assert!(!apply_edit(&mut scene, trigger, &EntityEdit::Direction(1), &c));
    }

    #[test]
    fn test_mismatched_edits_are_rejected() {
        let mut scene = scene();
        let c = choices(&scene);
        let actor = EntityRef::new(0, EntityKind::Actor, 0);
        assert!(!apply_edit(&mut scene, actor, &EntityEdit::Width("2".to_string()), &c));
        assert!(!apply_edit(&mut scene, actor, &EntityEdit::PerformerType(1), &c));
        let missing = EntityRef::new(3, EntityKind::Actor, 0);
        assert!(!apply_edit(&mut scene, missing, &EntityEdit::Kind(0), &c));
    }

    #[test]
    fn test_popover_prefills_sizes() {
        let scene = scene();
        let entity = scene.entity(obj()).unwrap();
        let popover = Popover::for_entity(obj(), entity, CanvasPixel::new(10.0, 10.0));
        assert_eq!(popover.width_text, "2");
        assert_eq!(popover.height_text, "2");
    }
}
