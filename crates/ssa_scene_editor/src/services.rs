//! Collaborators the scene editor talks to
//!
//! The editor never reads files or decodes backgrounds itself. It asks these
//! traits, which the workspace (or a test double) implements.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use ssa_scene_core::{SceneFile, SceneType};

use crate::workspace::WorkspaceError;

/// A decoded map background
#[derive(Debug, Clone)]
pub struct Background {
    pub image: Arc<image::RgbaImage>,
    pub width: u32,
    pub height: u32,
}

impl Background {
    pub fn new(image: image::RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            image: Arc::new(image),
            width,
            height,
        }
    }
}

/// An entry of the background chooser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundEntry {
    pub id: usize,
    pub name: String,
}

/// Loads scenes and lists the scenes of a map
pub trait SceneLoader: Send + Sync {
    fn load_scene(&self, file_name: &str) -> Result<SceneFile, WorkspaceError>;

    /// File names of every scene belonging to a map
    fn scenes_for_map(&self, map_name: &str) -> Vec<String>;
}

/// Lists and decodes map backgrounds
pub trait BackgroundProvider: Send + Sync {
    fn list_backgrounds(&self) -> Vec<BackgroundEntry>;

    fn get_background(&self, map_id: usize) -> Result<Background, WorkspaceError>;
}

/// Told whenever a scene is changed
pub trait ModificationSink: Send + Sync {
    fn mark_modified(&self, map_name: &str, scene_type: SceneType, file_name: &str);
}

/// A view the editor asks the host application to open
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenRequest {
    /// Background editor for a map background
    MapBackground(usize),
    /// The enter scene of a map
    SceneSse { map_name: String },
    SceneSsa { map_name: String, file_name: String },
    SceneSss { map_name: String, file_name: String },
}

impl OpenRequest {
    /// Request for a scene file, chosen by its extension
    pub fn for_scene(map_name: &str, file_name: &str) -> Option<Self> {
        let map_name = map_name.to_string();
        let file_name = file_name.to_string();
        match SceneType::from_file_name(&file_name)? {
            SceneType::Sse => Some(OpenRequest::SceneSse { map_name }),
            SceneType::Ssa => Some(OpenRequest::SceneSsa {
                map_name,
                file_name,
            }),
            SceneType::Sss => Some(OpenRequest::SceneSss {
                map_name,
                file_name,
            }),
        }
    }
}

/// Opens related views in the host application
pub trait NavigationRequester: Send + Sync {
    fn open_related_view(&self, request: OpenRequest);
}

/// Last decoded background, kept across scene switches
#[derive(Debug, Clone, Default)]
pub struct BackgroundCache {
    entry: Option<(usize, Background)>,
}

impl BackgroundCache {
    pub fn get(&self, map_id: usize) -> Option<&Background> {
        match &self.entry {
            Some((id, background)) if *id == map_id => Some(background),
            _ => None,
        }
    }

    /// Return the cached background or decode it through `provider`
    pub fn get_or_load(
        &mut self,
        map_id: usize,
        provider: &dyn BackgroundProvider,
    ) -> Result<Background, WorkspaceError> {
        if let Some(background) = self.get(map_id) {
            return Ok(background.clone());
        }
        let background = provider.get_background(map_id)?;
        self.entry = Some((map_id, background.clone()));
        Ok(background)
    }

    pub fn cached_id(&self) -> Option<usize> {
        self.entry.as_ref().map(|(id, _)| *id)
    }
}

/// Scene files changed since the last save, shared with the app
#[derive(Debug, Clone, Default)]
pub struct ModifiedScenes(Arc<Mutex<BTreeSet<String>>>);

impl ModifiedScenes {
    pub fn is_empty(&self) -> bool {
        self.0.lock().map(|set| set.is_empty()).unwrap_or(true)
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.0
            .lock()
            .map(|set| set.contains(file_name))
            .unwrap_or(false)
    }

    /// Take the set, leaving it empty
    pub fn take(&self) -> BTreeSet<String> {
        match self.0.lock() {
            Ok(mut set) => std::mem::take(&mut *set),
            Err(_) => BTreeSet::new(),
        }
    }
}

impl ModificationSink for ModifiedScenes {
    fn mark_modified(&self, map_name: &str, scene_type: SceneType, file_name: &str) {
        if let Ok(mut set) = self.0.lock() {
            if set.insert(file_name.to_string()) {
                bevy::log::debug!("Modified {} scene {} of {}", scene_type, file_name, map_name);
            }
        }
    }
}

/// Open requests waiting for the app to handle them
#[derive(Debug, Clone, Default)]
pub struct NavigationQueue(Arc<Mutex<Vec<OpenRequest>>>);

impl NavigationQueue {
    pub fn drain(&self) -> Vec<OpenRequest> {
        match self.0.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(_) => Vec::new(),
        }
    }
}

impl NavigationRequester for NavigationQueue {
    fn open_related_view(&self, request: OpenRequest) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push(request);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        loads: AtomicUsize,
    }

    impl BackgroundProvider for CountingProvider {
        fn list_backgrounds(&self) -> Vec<BackgroundEntry> {
            Vec::new()
        }

        fn get_background(&self, map_id: usize) -> Result<Background, WorkspaceError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if map_id > 3 {
                return Err(WorkspaceError::UnknownBackground(map_id));
            }
            Ok(Background::new(image::RgbaImage::new(16, 8)))
        }
    }

    #[test]
    fn test_cache_keeps_one_entry() {
        let provider = CountingProvider {
            loads: AtomicUsize::new(0),
        };
        let mut cache = BackgroundCache::default();
        let first = cache.get_or_load(1, &provider).unwrap();
        assert_eq!((first.width, first.height), (16, 8));
        cache.get_or_load(1, &provider).unwrap();
        assert_eq!(provider.loads.load(Ordering::SeqCst), 1);

        cache.get_or_load(2, &provider).unwrap();
        cache.get_or_load(1, &provider).unwrap();
        assert_eq!(provider.loads.load(Ordering::SeqCst), 3);
        assert_eq!(cache.cached_id(), Some(1));
    }

    #[test]
    fn test_failed_load_keeps_previous_entry() {
        let provider = CountingProvider {
            loads: AtomicUsize::new(0),
        };
        let mut cache = BackgroundCache::default();
        cache.get_or_load(0, &provider).unwrap();
        assert!(cache.get_or_load(9, &provider).is_err());
        assert_eq!(cache.cached_id(), Some(0));
    }

    #[test]
    fn test_open_request_by_extension() {
        assert_eq!(
            OpenRequest::for_scene("D01P11A", "SCRIPT/D01P11A/enter.sse"),
            Some(OpenRequest::SceneSse {
                map_name: "D01P11A".to_string()
            })
        );
        assert_eq!(
            OpenRequest::for_scene("D01P11A", "SCRIPT/D01P11A/s01p01a.sss"),
            Some(OpenRequest::SceneSss {
                map_name: "D01P11A".to_string(),
                file_name: "SCRIPT/D01P11A/s01p01a.sss".to_string()
            })
        );
        assert_eq!(OpenRequest::for_scene("D01P11A", "unionall.ssb"), None);
    }

    #[test]
    fn test_modified_scenes_dedup_and_take() {
        let modified = ModifiedScenes::default();
        let sink: Box<dyn ModificationSink> = Box::new(modified.clone());
        assert!(modified.is_empty());
        sink.mark_modified("T01P01", SceneType::Ssa, "SCRIPT/T01P01/m01a01.ssa");
        sink.mark_modified("T01P01", SceneType::Ssa, "SCRIPT/T01P01/m01a01.ssa");
        assert!(modified.contains("SCRIPT/T01P01/m01a01.ssa"));
        assert_eq!(modified.take().len(), 1);
        assert!(modified.is_empty());
    }

    #[test]
    fn test_navigation_queue_drain() {
        let queue = NavigationQueue::default();
        queue.open_related_view(OpenRequest::MapBackground(3));
        queue.open_related_view(OpenRequest::SceneSse {
            map_name: "D01P11A".to_string(),
        });
        let drained = queue.drain();
        assert_eq!(drained[0], OpenRequest::MapBackground(3));
        assert_eq!(drained.len(), 2);
        assert!(queue.drain().is_empty());
    }
}
