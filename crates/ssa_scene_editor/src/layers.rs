//! Per-sector visible/solo state

/// Flags shown in the layer list for one sector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerFlags {
    pub visible: bool,
    pub solo: bool,
}

impl Default for LayerFlags {
    fn default() -> Self {
        Self {
            visible: true,
            solo: false,
        }
    }
}

/// Visibility of every sector in the open scene
///
/// When any sector is solo, exactly the solo sectors are shown and the
/// visible flags are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerVisibility {
    flags: Vec<LayerFlags>,
}

impl LayerVisibility {
    /// All sectors visible, none solo
    pub fn new(layer_count: usize) -> Self {
        Self {
            flags: vec![LayerFlags::default(); layer_count],
        }
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn flags(&self, layer: usize) -> Option<LayerFlags> {
        self.flags.get(layer).copied()
    }

    pub fn set_visible(&mut self, layer: usize, visible: bool) {
        if let Some(flags) = self.flags.get_mut(layer) {
            flags.visible = visible;
        }
    }

    pub fn set_solo(&mut self, layer: usize, solo: bool) {
        if let Some(flags) = self.flags.get_mut(layer) {
            flags.solo = solo;
        }
    }

    /// Flip the visible flag, returning the new value
    pub fn toggle_visible(&mut self, layer: usize) -> Option<bool> {
        let flags = self.flags.get_mut(layer)?;
        flags.visible = !flags.visible;
        Some(flags.visible)
    }

    /// Flip the solo flag, returning the new value
    pub fn toggle_solo(&mut self, layer: usize) -> Option<bool> {
        let flags = self.flags.get_mut(layer)?;
        flags.solo = !flags.solo;
        Some(flags.solo)
    }

    pub fn any_solo(&self) -> bool {
        self.flags.iter().any(|f| f.solo)
    }

    /// Whether a sector is drawn and hit-testable. Unknown sectors never are.
    pub fn effective_visible(&self, layer: usize) -> bool {
        let Some(flags) = self.flags.get(layer) else {
            return false;
        };
        if self.any_solo() {
            flags.solo
        } else {
            flags.visible
        }
    }
}
