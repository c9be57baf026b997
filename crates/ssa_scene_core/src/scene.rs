//! Scenes and the files they are loaded from

use serde::{Deserialize, Serialize};

use crate::{EntityKind, EntityRef, Layer, SceneEntity, SceneEntityMut};

/// Scene file flavour, taken from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneType {
    /// Acting scene (cutscene)
    #[default]
    Ssa,
    /// Enter scene, one per map
    Sse,
    /// Sub scene
    Sss,
}

impl SceneType {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            SceneType::Ssa => "ssa",
            SceneType::Sse => "sse",
            SceneType::Sss => "sss",
        }
    }

    /// Detect the scene type from the last three characters of a file name
    pub fn from_file_name(name: &str) -> Option<Self> {
        let suffix = name.get(name.len().checked_sub(3)?..)?;
        match suffix {
            "ssa" => Some(SceneType::Ssa),
            "sse" => Some(SceneType::Sse),
            "sss" => Some(SceneType::Sss),
            _ => None,
        }
    }
}

impl std::fmt::Display for SceneType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Scene-level event: a talk script routine that triggers point at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneEvent {
    pub script_id: i16,
    /// Routine id, resolved through `ScriptData::routines`
    pub coroutine: u16,
    #[serde(default)]
    pub unk2: u16,
    #[serde(default)]
    pub unk3: u16,
}

/// A script scene: sectors plus the event table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub events: Vec<SceneEvent>,
}

impl Scene {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self {
            layers,
            events: Vec::new(),
        }
    }

    /// Get layer by index
    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Borrow the entity an `EntityRef` points to
    pub fn entity(&self, entity: EntityRef) -> Option<SceneEntity<'_>> {
        let layer = self.layers.get(entity.layer)?;
        match entity.kind {
            EntityKind::Actor => layer.actors.get(entity.index).map(SceneEntity::Actor),
            EntityKind::Object => layer.objects.get(entity.index).map(SceneEntity::Object),
            EntityKind::Performer => layer
                .performers
                .get(entity.index)
                .map(SceneEntity::Performer),
            EntityKind::Trigger => layer.triggers.get(entity.index).map(SceneEntity::Trigger),
        }
    }

    /// Mutably borrow the entity an `EntityRef` points to
    pub fn entity_mut(&mut self, entity: EntityRef) -> Option<SceneEntityMut<'_>> {
        let layer = self.layers.get_mut(entity.layer)?;
        match entity.kind {
            EntityKind::Actor => layer
                .actors
                .get_mut(entity.index)
                .map(SceneEntityMut::Actor),
            EntityKind::Object => layer
                .objects
                .get_mut(entity.index)
                .map(SceneEntityMut::Object),
            EntityKind::Performer => layer
                .performers
                .get_mut(entity.index)
                .map(SceneEntityMut::Performer),
            EntityKind::Trigger => layer
                .triggers
                .get_mut(entity.index)
                .map(SceneEntityMut::Trigger),
        }
    }

    /// All references of one kind, in sector then sequence order
    pub fn refs_of_kind(&self, kind: EntityKind) -> Vec<EntityRef> {
        self.layers
            .iter()
            .enumerate()
            .flat_map(|(layer_idx, layer)| {
                (0..layer.count(kind)).map(move |index| EntityRef::new(layer_idx, kind, index))
            })
            .collect()
    }
}

/// A scene loaded for editing, with the context it lives in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    /// Map (background list) name the scene belongs to
    pub map_name: String,
    /// Full path of the scene file, e.g. `SCRIPT/D01P11A/enter.sse`
    pub file_name: String,
    pub scene_type: SceneType,
    /// Talk script paths available to this scene
    #[serde(default)]
    pub scripts: Vec<String>,
    pub scene: Scene,
}

impl SceneFile {
    /// File name without directories
    pub fn short_name(&self) -> &str {
        self.file_name
            .rsplit('/')
            .next()
            .unwrap_or(self.file_name.as_str())
    }
}
