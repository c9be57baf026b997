//! Placeable scene entities

use serde::{Deserialize, Serialize};

use crate::ScenePosition;

/// Talk script id meaning "no script attached"
pub const NO_SCRIPT: i16 = -1;

/// The four kinds of placeable entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Actor,
    Object,
    Performer,
    Trigger,
}

impl EntityKind {
    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            EntityKind::Actor => "Actor",
            EntityKind::Object => "Object",
            EntityKind::Performer => "Performer",
            EntityKind::Trigger => "Trigger",
        }
    }

    /// Plural name used for list panels
    pub fn plural_name(&self) -> &'static str {
        match self {
            EntityKind::Actor => "Actors",
            EntityKind::Object => "Objects",
            EntityKind::Performer => "Performers",
            EntityKind::Trigger => "Triggers",
        }
    }

    /// Returns all kinds for UI enumeration
    pub fn all() -> &'static [EntityKind] {
        &[
            EntityKind::Actor,
            EntityKind::Object,
            EntityKind::Performer,
            EntityKind::Trigger,
        ]
    }
}

/// Identity of an entity within one editing session: (sector, kind, index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityRef {
    pub layer: usize,
    pub kind: EntityKind,
    pub index: usize,
}

impl EntityRef {
    pub fn new(layer: usize, kind: EntityKind, index: usize) -> Self {
        Self { layer, kind, index }
    }
}

/// A character placed in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Level entity archetype id
    pub kind: u16,
    #[serde(default = "no_script")]
    pub script_id: i16,
    pub pos: ScenePosition,
}

/// An interactive object placed in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object {
    /// Object archetype id
    pub kind: u16,
    #[serde(default = "no_script")]
    pub script_id: i16,
    /// Hitbox size in tiles
    pub hitbox_w: u16,
    pub hitbox_h: u16,
    pub pos: ScenePosition,
}

/// A scripted performer (camera targets, effects)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Performer {
    /// Performer type code, see `PERFORMER_TYPES`
    #[serde(rename = "type")]
    pub performer_type: u16,
    pub hitbox_w: u16,
    pub hitbox_h: u16,
    pub pos: ScenePosition,
}

/// A trigger area firing one of the scene's events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    /// Index into `Scene::events`
    pub trigger_id: u16,
    /// Area size in tiles
    pub trigger_width: u16,
    pub trigger_height: u16,
    pub pos: ScenePosition,
}

fn no_script() -> i16 {
    NO_SCRIPT
}

impl Actor {
    pub fn new(kind: u16, pos: ScenePosition) -> Self {
        Self {
            kind,
            script_id: NO_SCRIPT,
            pos,
        }
    }
}

impl Object {
    pub fn new(kind: u16, hitbox_w: u16, hitbox_h: u16, pos: ScenePosition) -> Self {
        Self {
            kind,
            script_id: NO_SCRIPT,
            hitbox_w,
            hitbox_h,
            pos,
        }
    }
}

impl Performer {
    pub fn new(performer_type: u16, hitbox_w: u16, hitbox_h: u16, pos: ScenePosition) -> Self {
        Self {
            performer_type,
            hitbox_w,
            hitbox_h,
            pos,
        }
    }
}

impl Trigger {
    pub fn new(trigger_id: u16, trigger_width: u16, trigger_height: u16, pos: ScenePosition) -> Self {
        Self {
            trigger_id,
            trigger_width,
            trigger_height,
            pos,
        }
    }
}

/// Borrowed view of any entity kind
#[derive(Debug, Clone, Copy)]
pub enum SceneEntity<'a> {
    Actor(&'a Actor),
    Object(&'a Object),
    Performer(&'a Performer),
    Trigger(&'a Trigger),
}

impl<'a> SceneEntity<'a> {
    pub fn kind(&self) -> EntityKind {
        match self {
            SceneEntity::Actor(_) => EntityKind::Actor,
            SceneEntity::Object(_) => EntityKind::Object,
            SceneEntity::Performer(_) => EntityKind::Performer,
            SceneEntity::Trigger(_) => EntityKind::Trigger,
        }
    }

    pub fn position(&self) -> &'a ScenePosition {
        match *self {
            SceneEntity::Actor(a) => &a.pos,
            SceneEntity::Object(o) => &o.pos,
            SceneEntity::Performer(p) => &p.pos,
            SceneEntity::Trigger(t) => &t.pos,
        }
    }

    /// Talk script id, if this kind carries one
    pub fn script_id(&self) -> Option<i16> {
        match self {
            SceneEntity::Actor(a) => Some(a.script_id),
            SceneEntity::Object(o) => Some(o.script_id),
            SceneEntity::Performer(_) | SceneEntity::Trigger(_) => None,
        }
    }

    /// Kind-specific extent in tiles (hitbox or trigger area)
    pub fn extent(&self) -> Option<(u16, u16)> {
        match self {
            SceneEntity::Actor(_) => None,
            SceneEntity::Object(o) => Some((o.hitbox_w, o.hitbox_h)),
            SceneEntity::Performer(p) => Some((p.hitbox_w, p.hitbox_h)),
            SceneEntity::Trigger(t) => Some((t.trigger_width, t.trigger_height)),
        }
    }
}

/// Mutable view of any entity kind
#[derive(Debug)]
pub enum SceneEntityMut<'a> {
    Actor(&'a mut Actor),
    Object(&'a mut Object),
    Performer(&'a mut Performer),
    Trigger(&'a mut Trigger),
}

impl SceneEntityMut<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            SceneEntityMut::Actor(_) => EntityKind::Actor,
            SceneEntityMut::Object(_) => EntityKind::Object,
            SceneEntityMut::Performer(_) => EntityKind::Performer,
            SceneEntityMut::Trigger(_) => EntityKind::Trigger,
        }
    }

    pub fn position_mut(&mut self) -> &mut ScenePosition {
        match self {
            SceneEntityMut::Actor(a) => &mut a.pos,
            SceneEntityMut::Object(o) => &mut o.pos,
            SceneEntityMut::Performer(p) => &mut p.pos,
            SceneEntityMut::Trigger(t) => &mut t.pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_view_dispatch() {
        let object = Object::new(12, 2, 3, ScenePosition::new(4, 4));
        let view = SceneEntity::Object(&object);
        assert_eq!(view.kind(), EntityKind::Object);
        assert_eq!(view.extent(), Some((2, 3)));
        assert_eq!(view.script_id(), Some(NO_SCRIPT));
        assert_eq!(view.position().absolute(), (32, 32));

        let trigger = Trigger::new(0, 1, 1, ScenePosition::new(0, 0));
        assert_eq!(SceneEntity::Trigger(&trigger).script_id(), None);
    }

    #[test]
    fn test_mut_view_moves_position() {
        let mut actor = Actor::new(1, ScenePosition::new(1, 1));
        {
            let mut view = SceneEntityMut::Actor(&mut actor);
            view.position_mut().x_relative = 9;
        }
        assert_eq!(actor.pos.x_relative, 9);
    }

    #[test]
    fn test_missing_script_defaults_to_none() {
        let json = r#"{"kind": 3, "pos": {"x_relative": 1, "y_relative": 2}}"#;
        let actor: Actor = serde_json::from_str(json).unwrap();
        assert_eq!(actor.script_id, NO_SCRIPT);
        assert_eq!(actor.pos.direction, 0);
    }
}
