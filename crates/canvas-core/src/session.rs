//! Canvas session controller
//!
//! The central coordinator that:
//! - Owns the prompt, artifact, and error state for one session
//! - Guards generation and improvement so only one runs at a time
//! - Reconciles flow outcomes into state and user-facing notices
//! - Hands finished images to the download exporter

use crate::error::SessionError;
use crate::guard::{OperationGuard, OperationKind, OperationState};
use crate::types::{SessionConfig, SessionId};
use canvas_artifact::{ImageArtifact, ImageExporter};
use canvas_flows::{
    GenerateImageInput, ImageGeneration, LogNotifier, Notice, Notifier, PromptImprovement,
    SuggestPromptImprovementsInput,
};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;

/// Mutable session state behind one lock
///
/// The lock is held only for synchronous reads and writes, never across
/// a flow invocation.
#[derive(Debug, Default)]
struct SessionState {
    /// Current prompt text
    prompt: String,
    /// Most recent finished image, if any
    artifact: Option<ImageArtifact>,
    /// Most recent failure message, if any
    error: Option<String>,
}

/// One user's prompt-to-image session
///
/// Owns the session state, manages the operation guard, and coordinates
/// the remote flows.
pub struct CanvasSession {
    /// Session identifier
    id: SessionId,
    /// Configuration
    config: SessionConfig,
    /// Prompt, artifact, and error state
    state: Mutex<SessionState>,
    /// One-operation-at-a-time guard
    guard: OperationGuard,
    /// Image generation collaborator
    generator: Arc<dyn ImageGeneration>,
    /// Prompt improvement collaborator
    improver: Arc<dyn PromptImprovement>,
    /// Notice sink
    notifier: Arc<dyn Notifier>,
    /// Download writer
    exporter: ImageExporter,
}

impl std::fmt::Debug for CanvasSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasSession")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("guard", &self.guard)
            .finish_non_exhaustive()
    }
}

impl CanvasSession {
    /// Create new session
    #[must_use]
    pub fn new(
        config: SessionConfig,
        generator: Arc<dyn ImageGeneration>,
        improver: Arc<dyn PromptImprovement>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let exporter = ImageExporter::new(config.download_dir.clone());
        Self {
            id: SessionId::new(),
            config,
            state: Mutex::new(SessionState::default()),
            guard: OperationGuard::new(),
            generator,
            improver,
            notifier,
            exporter,
        }
    }

    /// Create new session whose notices go to the log
    #[must_use]
    pub fn with_log_notifier(
        config: SessionConfig,
        generator: Arc<dyn ImageGeneration>,
        improver: Arc<dyn PromptImprovement>,
    ) -> Self {
        Self::new(config, generator, improver, Arc::new(LogNotifier))
    }

    /// Get session ID
    #[inline]
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current prompt text
    #[must_use]
    pub fn prompt(&self) -> String {
        self.state.lock().prompt.clone()
    }

    /// Replace the prompt text
    ///
    /// Unconditional; validation happens when an operation starts.
    pub fn set_prompt(&self, prompt: impl Into<String>) {
        self.state.lock().prompt = prompt.into();
    }

    /// Most recent finished image, if any
    #[must_use]
    pub fn artifact(&self) -> Option<ImageArtifact> {
        self.state.lock().artifact.clone()
    }

    /// Most recent failure message, if any
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    /// What the session is doing right now
    #[inline]
    #[must_use]
    pub fn operation_state(&self) -> OperationState {
        self.guard.current()
    }

    /// Check if an operation is in flight
    #[inline]
    #[must_use]
    pub fn is_busy(&self) -> bool {
        !self.guard.is_idle()
    }

    /// Generate an image from a prompt
    ///
    /// This is the main entry point for the session.
    ///
    /// # Workflow
    /// 1. Validate the prompt (whitespace-only is rejected)
    /// 2. Clear any failure message left by a previous attempt
    /// 3. Claim the operation guard, refusing if anything is in flight
    /// 4. Invoke the generation flow with the prompt as given
    /// 5. Replace the artifact on success, record the failure otherwise
    ///
    /// The guard is released on every exit path, including panic.
    ///
    /// # Errors
    /// - `SessionError::Validation` for an empty prompt
    /// - `SessionError::Busy` while another operation runs
    /// - `SessionError::Remote` when the flow fails
    pub async fn generate(&self, prompt: &str) -> Result<ImageArtifact, SessionError> {
        if prompt.trim().is_empty() {
            return Err(self.fail_validation("empty prompt"));
        }

        self.clear_error();

        let _permit = self
            .guard
            .try_acquire(OperationKind::Generate)
            .map_err(|active| SessionError::Busy { active })?;

        tracing::info!(session = %self.id, "generating image");

        match self
            .generator
            .generate_image(GenerateImageInput::new(prompt))
            .await
        {
            Ok(output) => {
                let artifact = ImageArtifact::new(output.image_url, prompt);
                self.state.lock().artifact = Some(artifact.clone());
                self.notifier
                    .notify(Notice::info("Image Generated!", "Your masterpiece is ready."));
                Ok(artifact)
            }
            Err(source) => {
                let message = source
                    .remote_message()
                    .unwrap_or("Failed to generate image. Please try again.")
                    .to_string();
                Err(self.fail_remote("Generation Failed", message, source))
            }
        }
    }

    /// Improve the prompt through the suggestion flow
    ///
    /// On success the session prompt is overwritten with the improved
    /// text; the original is not retained.
    ///
    /// # Errors
    /// - `SessionError::Validation` for an empty prompt
    /// - `SessionError::Busy` while another operation runs
    /// - `SessionError::Remote` when the flow fails
    pub async fn improve_prompt(&self, prompt: &str) -> Result<String, SessionError> {
        if prompt.trim().is_empty() {
            return Err(self.fail_validation("empty prompt for improvement"));
        }

        self.clear_error();

        let _permit = self
            .guard
            .try_acquire(OperationKind::Improve)
            .map_err(|active| SessionError::Busy { active })?;

        tracing::info!(session = %self.id, "improving prompt");

        match self
            .improver
            .suggest_prompt_improvements(SuggestPromptImprovementsInput::new(prompt))
            .await
        {
            Ok(output) => {
                self.state.lock().prompt = output.improved_prompt.clone();
                self.notifier.notify(Notice::info(
                    "Prompt Improved!",
                    "The AI has suggested an improved prompt.",
                ));
                Ok(output.improved_prompt)
            }
            Err(source) => {
                let message = source
                    .remote_message()
                    .unwrap_or("Failed to suggest prompt improvements.")
                    .to_string();
                Err(self.fail_remote("Improvement Failed", message, source))
            }
        }
    }

    /// Download the current artifact
    ///
    /// Writes the image into the configured download directory under a
    /// name derived from the artifact's source prompt. Mutates neither
    /// the artifact nor the prompt.
    ///
    /// # Errors
    /// - `SessionError::NoArtifact` when nothing has been generated yet
    /// - `SessionError::Export` when the image cannot be written
    pub fn download(&self) -> Result<PathBuf, SessionError> {
        let Some(artifact) = self.artifact() else {
            self.notifier
                .notify(Notice::failure("Error", "No image to download."));
            return Err(SessionError::NoArtifact);
        };

        let path = self.exporter.export(&artifact)?;
        self.notifier
            .notify(Notice::info("Download Started", "Your image is downloading."));
        Ok(path)
    }

    fn clear_error(&self) {
        self.state.lock().error = None;
    }

    fn fail_validation(&self, message: &str) -> SessionError {
        self.state.lock().error = Some(message.to_string());
        self.notifier.notify(Notice::failure("Error", message));
        SessionError::Validation(message.to_string())
    }

    fn fail_remote(
        &self,
        title: &str,
        message: String,
        source: canvas_flows::FlowError,
    ) -> SessionError {
        tracing::warn!(session = %self.id, cause = %source, "{title}: {message}");
        self.state.lock().error = Some(message.clone());
        self.notifier.notify(Notice::failure(title, message.as_str()));
        SessionError::Remote { message, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use canvas_flows::{
        FlowError, GenerateImageOutput, NoticeKind, SuggestPromptImprovementsOutput,
    };
    use mockall::mock;

    mock! {
        Generator {}

        #[async_trait]
        impl ImageGeneration for Generator {
            async fn generate_image(
                &self,
                input: GenerateImageInput,
            ) -> Result<GenerateImageOutput, FlowError>;
        }
    }

    mock! {
        Improver {}

        #[async_trait]
        impl PromptImprovement for Improver {
            async fn suggest_prompt_improvements(
                &self,
                input: SuggestPromptImprovementsInput,
            ) -> Result<SuggestPromptImprovementsOutput, FlowError>;
        }
    }

    #[derive(Default)]
    struct Recorder {
        notices: Mutex<Vec<Notice>>,
    }

    impl Notifier for Recorder {
        fn notify(&self, notice: Notice) {
            self.notices.lock().push(notice);
        }
    }

    fn session_with(
        generator: MockGenerator,
        improver: MockImprover,
    ) -> (CanvasSession, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let session = CanvasSession::new(
            SessionConfig::default(),
            Arc::new(generator),
            Arc::new(improver),
            recorder.clone(),
        );
        (session, recorder)
    }

    #[tokio::test]
    async fn generate_stores_artifact_with_provenance() {
        let mut generator = MockGenerator::new();
        generator
            .expect_generate_image()
            .withf(|input| input.prompt == "a red fox")
            .returning(|_| {
                Ok(GenerateImageOutput {
                    image_url: "http://x/1.png".to_string(),
                })
            });

        let (session, _recorder) = session_with(generator, MockImprover::new());

        let artifact = session.generate("a red fox").await.unwrap();
        assert_eq!(artifact.uri(), "http://x/1.png");
        assert_eq!(artifact.source_prompt(), "a red fox");
        assert_eq!(session.artifact(), Some(artifact));
        assert_eq!(session.last_error(), None);
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn empty_prompt_fails_validation_without_a_flow_call() {
        // No expectations set: any flow invocation would panic
        let (session, recorder) = session_with(MockGenerator::new(), MockImprover::new());

        let err = session.generate("   ").await.unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));
        assert_eq!(session.last_error().as_deref(), Some("empty prompt"));
        assert!(session.artifact().is_none());
        assert!(!session.is_busy());

        let last = recorder.notices.lock().last().cloned().unwrap();
        assert_eq!(last.title, "Error");
        assert_eq!(last.kind, NoticeKind::Failure);
    }

    #[tokio::test]
    async fn improve_overwrites_the_prompt() {
        let mut improver = MockImprover::new();
        improver.expect_suggest_prompt_improvements().returning(|_| {
            Ok(SuggestPromptImprovementsOutput {
                improved_prompt: "a majestic red fox at dawn".to_string(),
            })
        });

        let (session, _recorder) = session_with(MockGenerator::new(), improver);
        session.set_prompt("red fox");

        let improved = session.improve_prompt("red fox").await.unwrap();
        assert_eq!(improved, "a majestic red fox at dawn");
        assert_eq!(session.prompt(), "a majestic red fox at dawn");
    }

    #[tokio::test]
    async fn generate_failure_surfaces_the_remote_message() {
        let mut generator = MockGenerator::new();
        generator
            .expect_generate_image()
            .returning(|_| Err(FlowError::remote("quota exceeded")));

        let (session, recorder) = session_with(generator, MockImprover::new());

        let err = session.generate("a red fox").await.unwrap_err();
        assert_eq!(err.surfaced_message(), Some("quota exceeded"));
        assert_eq!(session.last_error().as_deref(), Some("quota exceeded"));
        assert!(session.artifact().is_none());
        assert!(!session.is_busy());

        let kinds: Vec<NoticeKind> = recorder.notices.lock().iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NoticeKind::Failure]);
    }

    #[tokio::test]
    async fn busy_session_refuses_new_operations() {
        let (session, recorder) = session_with(MockGenerator::new(), MockImprover::new());
        assert!(session.guard.try_begin(OperationKind::Improve));

        let err = session.generate("a red fox").await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Busy {
                active: OperationState::Improving
            }
        ));
        // A refusal leaves no trace: no error message, no notice
        assert_eq!(session.last_error(), None);
        assert!(recorder.notices.lock().is_empty());

        session.guard.end();
        assert!(!session.is_busy());
    }

    #[test]
    fn download_requires_an_artifact() {
        let (session, recorder) = session_with(MockGenerator::new(), MockImprover::new());

        let err = session.download().unwrap_err();
        assert!(matches!(err, SessionError::NoArtifact));

        let last = recorder.notices.lock().last().cloned().unwrap();
        assert_eq!(last.title, "Error");
        assert_eq!(last.body, "No image to download.");
    }
}
