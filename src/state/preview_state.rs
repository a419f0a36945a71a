//! Single-slot photo preview state
//!
//! Every new selection bumps the generation; a completion carrying an older
//! generation is dropped, so a slow read can never overwrite a newer preview.

use crate::preview::{PreviewError, PreviewImage};

/// What the `photoPreview` region currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PreviewSlot {
    #[default]
    Empty,
    Loading {
        generation: u64,
        file_name: String,
    },
    Ready(PreviewImage),
    Failed(String),
}

#[derive(Debug, Default)]
pub struct PhotoPreview {
    generation: u64,
    pub slot: PreviewSlot,
}

impl PhotoPreview {
    /// Remove the preview and invalidate any pending load
    pub fn clear(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.slot = PreviewSlot::Empty;
    }

    /// Start a new load, returning the generation it must report back with
    pub fn begin(&mut self, file_name: &str) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.slot = PreviewSlot::Loading {
            generation: self.generation,
            file_name: file_name.to_string(),
        };
        self.generation
    }

    /// Apply a finished load; returns false when it was stale and ignored
    pub fn complete(
        &mut self,
        generation: u64,
        result: Result<PreviewImage, PreviewError>,
    ) -> bool {
        let pending = matches!(
            self.slot,
            PreviewSlot::Loading { generation: g, .. } if g == generation
        );
        if !pending || generation != self.generation {
            tracing::debug!(
                "Dropping stale preview generation {generation} (current {})",
                self.generation
            );
            return false;
        }

        self.slot = match result {
            Ok(image) => PreviewSlot::Ready(image),
            Err(e) => PreviewSlot::Failed(e.to_string()),
        };
        true
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.slot, PreviewSlot::Loading { .. })
    }

    pub fn image(&self) -> Option<&PreviewImage> {
        match &self.slot {
            PreviewSlot::Ready(image) => Some(image),
            _ => None,
        }
    }
}
