//! Fine-tuning panel state
//!
//! Local-only companion to the session:
//! - Sampling parameters with sensible defaults
//! - Dataset selection for a future training upload
//!
//! Nothing here invokes a remote flow; saving and uploading only record
//! state and raise notices.

use canvas_flows::{Notice, Notifier};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Sampling method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMethod {
    /// Euler ancestral
    EulerA,
    /// DPM++ 2M Karras
    #[serde(rename = "dpm_2m_karras")]
    Dpm2mKarras,
    /// Latent consistency
    Lcm,
    /// DDIM
    Ddim,
}

/// Noise scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseScheduler {
    /// Karras sigmas
    Karras,
    /// Exponential sigmas
    Exponential,
    /// Linear sigmas
    Linear,
    /// SGM uniform
    SgmUniform,
}

/// Base model the tuning run starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseModel {
    /// SDXL
    Sdxl,
    /// SD 1.5
    #[serde(rename = "sd_1_5")]
    Sd15,
    /// User-provided checkpoint
    Custom,
}

/// Fine-tuning parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FineTuningSettings {
    /// Training steps
    pub training_steps: u32,
    /// Sampling method
    pub sampling_method: SamplingMethod,
    /// Noise scheduler
    pub noise_scheduler: NoiseScheduler,
    /// Base model
    pub base_model: BaseModel,
}

impl Default for FineTuningSettings {
    fn default() -> Self {
        Self {
            training_steps: 1000,
            sampling_method: SamplingMethod::EulerA,
            noise_scheduler: NoiseScheduler::Karras,
            base_model: BaseModel::Sdxl,
        }
    }
}

/// A dataset file picked for upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSelection {
    /// Original file name
    pub file_name: String,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Panel holding tuning parameters and the dataset selection
pub struct TuningPanel {
    /// Current parameters
    settings: Mutex<FineTuningSettings>,
    /// Currently selected dataset file, if any
    dataset: Mutex<Option<DatasetSelection>>,
    /// Notice sink
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for TuningPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TuningPanel")
            .field("settings", &self.settings)
            .field("dataset", &self.dataset)
            .finish_non_exhaustive()
    }
}

impl TuningPanel {
    /// Create new panel with default parameters
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            settings: Mutex::new(FineTuningSettings::default()),
            dataset: Mutex::new(None),
            notifier,
        }
    }

    /// Current parameters
    #[inline]
    #[must_use]
    pub fn settings(&self) -> FineTuningSettings {
        *self.settings.lock()
    }

    /// Replace the parameters
    pub fn save_settings(&self, settings: FineTuningSettings) {
        tracing::info!(
            steps = settings.training_steps,
            method = ?settings.sampling_method,
            "saving fine-tuning settings"
        );
        *self.settings.lock() = settings;
        self.notifier
            .notify(Notice::info("Settings Saved", "Fine-tuning parameters recorded."));
    }

    /// Currently selected dataset file, if any
    #[must_use]
    pub fn dataset(&self) -> Option<DatasetSelection> {
        self.dataset.lock().clone()
    }

    /// Pick a dataset file
    pub fn select_dataset(&self, file_name: impl Into<String>, size_bytes: u64) {
        let selection = DatasetSelection {
            file_name: file_name.into(),
            size_bytes,
        };
        let body = format!("{} is ready for upload.", selection.file_name);
        *self.dataset.lock() = Some(selection);
        self.notifier.notify(Notice::info("File Selected", body));
    }

    /// Drop the selected dataset file
    pub fn remove_dataset(&self) {
        if self.dataset.lock().take().is_some() {
            self.notifier
                .notify(Notice::info("File Removed", "The selected file has been removed."));
        }
    }

    /// Start uploading the selected dataset file
    ///
    /// Returns `false` (with a failure notice) when nothing is selected.
    /// The upload itself is not wired up yet; this only announces it.
    pub fn upload_dataset(&self) -> bool {
        let Some(selection) = self.dataset.lock().clone() else {
            self.notifier.notify(Notice::failure(
                "No File Selected",
                "Please select a file to upload.",
            ));
            return false;
        };

        tracing::info!(
            file = %selection.file_name,
            size_bytes = selection.size_bytes,
            "starting dataset upload"
        );
        self.notifier.notify(Notice::info(
            "Upload Started",
            format!("Uploading {}...", selection.file_name),
        ));
        true
    }
}
