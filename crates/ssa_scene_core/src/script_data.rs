//! Static script data tables: archetypes, directions and routines

use serde::{Deserialize, Serialize};

/// Valid performer type codes
pub const PERFORMER_TYPES: [u16; 6] = [0, 1, 2, 3, 4, 5];

/// A level entity (actor) archetype
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorKind {
    pub id: u16,
    pub name: String,
    /// Sprite entity id
    #[serde(default)]
    pub entid: u16,
}

/// An object archetype
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectKind {
    pub id: u16,
    pub unique_name: String,
}

/// A facing direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionDef {
    pub id: u8,
    pub name: String,
}

/// A common routine a scene event can run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    pub id: u16,
    pub name: String,
}

/// Lookup tables the editor resolves ids against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptData {
    #[serde(default)]
    pub level_entities: Vec<ActorKind>,
    #[serde(default)]
    pub objects: Vec<ObjectKind>,
    #[serde(default = "default_directions")]
    pub directions: Vec<DirectionDef>,
    #[serde(default)]
    pub routines: Vec<Routine>,
}

impl Default for ScriptData {
    fn default() -> Self {
        Self {
            level_entities: Vec::new(),
            objects: Vec::new(),
            directions: default_directions(),
            routines: Vec::new(),
        }
    }
}

impl ScriptData {
    pub fn actor_kind(&self, id: u16) -> Option<&ActorKind> {
        self.level_entities.iter().find(|k| k.id == id)
    }

    pub fn object_kind(&self, id: u16) -> Option<&ObjectKind> {
        self.objects.iter().find(|k| k.id == id)
    }

    pub fn direction(&self, id: u8) -> Option<&DirectionDef> {
        self.directions.iter().find(|d| d.id == id)
    }

    pub fn routine(&self, id: u16) -> Option<&Routine> {
        self.routines.iter().find(|r| r.id == id)
    }
}

fn default_directions() -> Vec<DirectionDef> {
    [
        (1, "Down"),
        (2, "DownRight"),
        (3, "Right"),
        (4, "UpRight"),
        (5, "Up"),
        (6, "UpLeft"),
        (7, "Left"),
        (8, "DownLeft"),
    ]
    .into_iter()
    .map(|(id, name)| DirectionDef {
        id,
        name: name.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directions() {
        let data = ScriptData::default();
        assert_eq!(data.directions.len(), 8);
        assert_eq!(data.direction(1).map(|d| d.name.as_str()), Some("Down"));
        assert!(data.direction(0).is_none());
    }

    #[test]
    fn test_lookups() {
        let data: ScriptData = serde_json::from_str(
            r#"{
                "level_entities": [{"id": 0, "name": "PLAYER", "entid": 1}],
                "objects": [{"id": 5, "unique_name": "o_box"}],
                "routines": [{"id": 12, "name": "CORO_DEBUG"}]
            }"#,
        )
        .unwrap();
        assert_eq!(data.actor_kind(0).map(|k| k.name.as_str()), Some("PLAYER"));
        assert!(data.actor_kind(1).is_none());
        assert_eq!(data.object_kind(5).map(|k| k.unique_name.as_str()), Some("o_box"));
        assert_eq!(data.routine(12).map(|r| r.name.as_str()), Some("CORO_DEBUG"));
        // Directions fall back to the standard table when omitted
        assert_eq!(data.directions.len(), 8);
    }
}
