//! Editor session state that outlives a single open scene
//!
//! The session is handed to each `SceneEditor` when it opens and handed back
//! when it closes, so zoom level and panel layout carry over between scenes.

mod file;

pub use file::*;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::services::BackgroundCache;

/// Tabs of the left utility notebook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UtilityTab {
    Scenes,
    #[default]
    Layers,
    Actors,
    Objects,
    Performers,
    Triggers,
    Events,
    Scripts,
}

impl UtilityTab {
    pub fn all() -> &'static [UtilityTab] {
        &[
            UtilityTab::Scenes,
            UtilityTab::Layers,
            UtilityTab::Actors,
            UtilityTab::Objects,
            UtilityTab::Performers,
            UtilityTab::Triggers,
            UtilityTab::Events,
            UtilityTab::Scripts,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            UtilityTab::Scenes => "Scenes",
            UtilityTab::Layers => "Sectors",
            UtilityTab::Actors => "Actors",
            UtilityTab::Objects => "Objects",
            UtilityTab::Performers => "Performers",
            UtilityTab::Triggers => "Triggers",
            UtilityTab::Events => "Events",
            UtilityTab::Scripts => "Scripts",
        }
    }
}

/// Session-wide editor settings
#[derive(Debug, Clone, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct EditorSession {
    /// Canvas zoom; a power of two
    pub scale_factor: f64,
    pub last_tab: UtilityTab,
    pub panel_width: f32,
    pub show_grid: bool,
    /// Last decoded background. Not persisted.
    #[serde(skip)]
    pub background_cache: BackgroundCache,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            last_tab: UtilityTab::default(),
            panel_width: 260.0,
            show_grid: false,
            background_cache: BackgroundCache::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let session: EditorSession = serde_json::from_str(r#"{"scale_factor": 4.0}"#).unwrap();
        assert_eq!(session.scale_factor, 4.0);
        assert_eq!(session.last_tab, UtilityTab::Layers);
        assert!(!session.show_grid);
    }

    #[test]
    fn test_cache_is_not_serialized() {
        let json = serde_json::to_string(&EditorSession::default()).unwrap();
        assert!(!json.contains("background_cache"));
    }
}
