//! Sectors (layers) of a scene

use serde::{Deserialize, Serialize};

use crate::{Actor, EntityKind, Object, Performer, Trigger};

/// A sector: an independently toggleable group of entities
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    #[serde(default)]
    pub actors: Vec<Actor>,
    #[serde(default)]
    pub objects: Vec<Object>,
    #[serde(default)]
    pub performers: Vec<Performer>,
    #[serde(default)]
    pub triggers: Vec<Trigger>,
}

impl Layer {
    /// Create an empty sector
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entities of one kind
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Actor => self.actors.len(),
            EntityKind::Object => self.objects.len(),
            EntityKind::Performer => self.performers.len(),
            EntityKind::Trigger => self.triggers.len(),
        }
    }

    /// Total number of entities in this sector
    pub fn total(&self) -> usize {
        EntityKind::all().iter().map(|kind| self.count(*kind)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
