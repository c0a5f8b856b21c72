//! Result types for archive operations

use bard_core::AssetClass;
use serde::{Deserialize, Serialize};

/// Per-class outcome of an import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Audio files written
    pub audio_count: usize,

    /// Image files written
    pub image_count: usize,

    /// Data documents written
    pub data_count: usize,

    /// Classes that had content but could not be read or written
    ///
    /// A failed class keeps its previous contents.
    pub failures: Vec<ClassFailure>,
}

impl ImportSummary {
    pub fn count(&self, class: AssetClass) -> usize {
        match class {
            AssetClass::Audio => self.audio_count,
            AssetClass::Image => self.image_count,
            AssetClass::Data => self.data_count,
        }
    }

    pub(crate) fn record(&mut self, class: AssetClass, written: usize) {
        match class {
            AssetClass::Audio => self.audio_count = written,
            AssetClass::Image => self.image_count = written,
            AssetClass::Data => self.data_count = written,
        }
    }

    /// Total entries written across all classes
    pub fn total(&self) -> usize {
        self.audio_count + self.image_count + self.data_count
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A class whose import was abandoned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassFailure {
    pub class: AssetClass,
    pub message: String,
}
