//! Core data structures for script scene editing
//!
//! This crate provides the in-memory model of a script scene file:
//! - `Scene` - Sectors (layers) plus the scene-level event table
//! - `Layer` - One sector holding actors, objects, performers and triggers
//! - `Actor`, `Object`, `Performer`, `Trigger` - Placeable entities
//! - `ScenePosition` - Tile position with half-tile offsets and a direction
//! - `ScriptData` - Static archetype, direction and routine tables
//! - `SceneFile` - A loaded scene together with its map and script context

mod entity;
mod layer;
mod position;
mod scene;
mod script_data;

pub use entity::{
    Actor, EntityKind, EntityRef, Object, Performer, SceneEntity, SceneEntityMut, Trigger,
    NO_SCRIPT,
};
pub use layer::Layer;
pub use position::{ScenePosition, HALF_TILE_OFFSET, TILE_DIM};
pub use scene::{Scene, SceneEvent, SceneFile, SceneType};
pub use script_data::{
    ActorKind, DirectionDef, ObjectKind, Routine, ScriptData, PERFORMER_TYPES,
};
