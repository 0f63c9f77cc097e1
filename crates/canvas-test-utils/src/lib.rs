//! Testing utilities for the Canvas workspace
//!
//! Shared fixtures: recording notifiers, scripted and gated flow doubles.

#![allow(missing_docs)]

use async_trait::async_trait;
use canvas_core::{CanvasSession, SessionConfig};
use canvas_flows::{
    CannedFlows, FlowError, GenerateImageInput, GenerateImageOutput, ImageGeneration, Notice,
    Notifier, PromptImprovement, SuggestPromptImprovementsInput, SuggestPromptImprovementsOutput,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Notify;

/// Notifier that records every notice for later assertions
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.notices.lock().iter().map(|n| n.title.clone()).collect()
    }

    pub fn clear(&self) {
        self.notices.lock().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}

/// Flow double that replays queued results and records request prompts
///
/// Panics when invoked with an empty queue, so a test that forgets to
/// script a result fails loudly.
#[derive(Debug, Default)]
pub struct ScriptedFlows {
    generations: Mutex<VecDeque<Result<GenerateImageOutput, FlowError>>>,
    improvements: Mutex<VecDeque<Result<SuggestPromptImprovementsOutput, FlowError>>>,
    generation_prompts: Mutex<Vec<String>>,
    improvement_prompts: Mutex<Vec<String>>,
}

impl ScriptedFlows {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_image(&self, image_url: &str) {
        self.generations.lock().push_back(Ok(GenerateImageOutput {
            image_url: image_url.to_string(),
        }));
    }

    pub fn push_generate_failure(&self, message: &str) {
        self.generations.lock().push_back(Err(FlowError::remote(message)));
    }

    /// Queue a generation failure with no user-facing message
    pub fn push_generate_garbage(&self) {
        self.generations.lock().push_back(Err(garbage_error()));
    }

    pub fn push_improvement(&self, improved: &str) {
        self.improvements
            .lock()
            .push_back(Ok(SuggestPromptImprovementsOutput {
                improved_prompt: improved.to_string(),
            }));
    }

    pub fn push_improve_failure(&self, message: &str) {
        self.improvements.lock().push_back(Err(FlowError::remote(message)));
    }

    /// Queue an improvement failure with no user-facing message
    pub fn push_improve_garbage(&self) {
        self.improvements.lock().push_back(Err(garbage_error()));
    }

    pub fn generation_prompts(&self) -> Vec<String> {
        self.generation_prompts.lock().clone()
    }

    pub fn improvement_prompts(&self) -> Vec<String> {
        self.improvement_prompts.lock().clone()
    }
}

fn garbage_error() -> FlowError {
    serde_json::from_str::<serde_json::Value>("not json")
        .unwrap_err()
        .into()
}

#[async_trait]
impl ImageGeneration for ScriptedFlows {
    async fn generate_image(
        &self,
        input: GenerateImageInput,
    ) -> Result<GenerateImageOutput, FlowError> {
        self.generation_prompts.lock().push(input.prompt);
        self.generations
            .lock()
            .pop_front()
            .expect("no scripted generation result")
    }
}

#[async_trait]
impl PromptImprovement for ScriptedFlows {
    async fn suggest_prompt_improvements(
        &self,
        input: SuggestPromptImprovementsInput,
    ) -> Result<SuggestPromptImprovementsOutput, FlowError> {
        self.improvement_prompts.lock().push(input.prompt);
        self.improvements
            .lock()
            .pop_front()
            .expect("no scripted improvement result")
    }
}

/// Flow double that parks mid-call until the test releases it
///
/// Lets a test observe the session while an operation is in flight.
#[derive(Debug)]
pub struct GatedFlows {
    started: Notify,
    gate: Notify,
    fail_with: Mutex<Option<String>>,
}

impl GatedFlows {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            started: Notify::new(),
            gate: Notify::new(),
            fail_with: Mutex::new(None),
        })
    }

    /// Wait until a flow call is in flight
    pub async fn entered(&self) {
        self.started.notified().await;
    }

    /// Let the in-flight flow call finish
    pub fn release(&self) {
        self.gate.notify_one();
    }

    /// Make the next released call fail with this message
    pub fn fail_next(&self, message: &str) {
        *self.fail_with.lock() = Some(message.to_string());
    }

    async fn wait_for_release(&self) -> Option<String> {
        self.started.notify_one();
        self.gate.notified().await;
        self.fail_with.lock().take()
    }
}

#[async_trait]
impl ImageGeneration for GatedFlows {
    async fn generate_image(
        &self,
        _input: GenerateImageInput,
    ) -> Result<GenerateImageOutput, FlowError> {
        match self.wait_for_release().await {
            Some(message) => Err(FlowError::remote(message)),
            None => Ok(GenerateImageOutput {
                image_url: "http://example.test/gated.png".to_string(),
            }),
        }
    }
}

#[async_trait]
impl PromptImprovement for GatedFlows {
    async fn suggest_prompt_improvements(
        &self,
        _input: SuggestPromptImprovementsInput,
    ) -> Result<SuggestPromptImprovementsOutput, FlowError> {
        match self.wait_for_release().await {
            Some(message) => Err(FlowError::remote(message)),
            None => Ok(SuggestPromptImprovementsOutput {
                improved_prompt: "a gated improvement".to_string(),
            }),
        }
    }
}

pub fn session_config(dir: &Path) -> SessionConfig {
    SessionConfig::new().with_download_dir(dir)
}

pub fn scripted_session() -> (Arc<CanvasSession>, Arc<ScriptedFlows>, Arc<RecordingNotifier>) {
    let flows = ScriptedFlows::new();
    let notifier = RecordingNotifier::new();
    let session = Arc::new(CanvasSession::new(
        SessionConfig::default(),
        flows.clone(),
        flows.clone(),
        notifier.clone(),
    ));
    (session, flows, notifier)
}

pub fn scripted_session_in(
    dir: &Path,
) -> (Arc<CanvasSession>, Arc<ScriptedFlows>, Arc<RecordingNotifier>) {
    let flows = ScriptedFlows::new();
    let notifier = RecordingNotifier::new();
    let session = Arc::new(CanvasSession::new(
        session_config(dir),
        flows.clone(),
        flows.clone(),
        notifier.clone(),
    ));
    (session, flows, notifier)
}

pub fn gated_session() -> (Arc<CanvasSession>, Arc<GatedFlows>, Arc<RecordingNotifier>) {
    let flows = GatedFlows::new();
    let notifier = RecordingNotifier::new();
    let session = Arc::new(CanvasSession::new(
        SessionConfig::default(),
        flows.clone(),
        flows.clone(),
        notifier.clone(),
    ));
    (session, flows, notifier)
}

pub fn canned_session_in(dir: &Path) -> Arc<CanvasSession> {
    let flows = Arc::new(CannedFlows::new());
    Arc::new(CanvasSession::with_log_notifier(
        session_config(dir),
        flows.clone(),
        flows,
    ))
}
