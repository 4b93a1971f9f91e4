//! Chat session use case.
//!
//! [`ChatSessionController`] owns the transcript and the busy flag of a
//! chat window. It lives on the interactive loop and is the only thing that
//! mutates session state:
//!
//! ```text
//! interactive loop                         blocking worker
//!   submit() ── IDLE → BUSY
//!     └─ spawn_blocking ───────────────────> service.generate()
//!                                               │
//!   completion_rx.recv() <── GenerationCompleted┘
//!   complete() ── BUSY → IDLE
//! ```
//!
//! Only one request is ever in flight. Submissions while busy are dropped,
//! not queued.

use crate::config::SessionConfig;
use crate::model_service::ModelService;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::model_backend::BackendError;
use crate::ports::session_event::{CompletionSender, GenerationCompleted};
use orca_domain::generation::params::{parse_temperature, parse_token_limit};
use orca_domain::util::preview;
use orca_domain::{
    DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, GenerationParams, GenerationRequest,
    GenerationResult, Prompt, Transcript, Turn,
};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Why a submission was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyPrompt,
    Busy,
}

/// Result of [`ChatSessionController::submit`]
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// The request was accepted and handed to a worker
    Dispatched(GenerationRequest),
    /// Nothing happened
    Ignored(IgnoreReason),
}

impl SubmitOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, SubmitOutcome::Dispatched(_))
    }
}

/// A backend call that ended in an error.
///
/// The session is already back to idle when this is returned.
#[derive(Error, Debug)]
#[error("Generation failed: {source}")]
pub struct GenerationFailed {
    pub source: BackendError,
    pub elapsed: Duration,
}

/// Controller for one chat session
pub struct ChatSessionController {
    service: ModelService,
    transcript: Transcript,
    params: GenerationParams,
    busy: bool,
    show_timing: bool,
    completion_tx: CompletionSender,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ChatSessionController {
    pub fn new(service: ModelService, config: SessionConfig, completion_tx: CompletionSender) -> Self {
        Self {
            service,
            transcript: Transcript::new(),
            params: config.initial_params,
            busy: false,
            show_timing: config.show_timing,
            completion_tx,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Parameters of the most recent submission (initially the configured ones)
    pub fn params(&self) -> GenerationParams {
        self.params
    }

    pub fn show_timing(&self) -> bool {
        self.show_timing
    }

    pub fn set_show_timing(&mut self, show: bool) {
        self.show_timing = show;
    }

    pub fn model_name(&self) -> &str {
        self.service.model_name()
    }

    /// Submit a prompt with the raw contents of the two numeric fields.
    ///
    /// Must be called from within a Tokio runtime; the backend call runs on
    /// the blocking pool.
    pub fn submit(&mut self, prompt: &str, token_field: &str, temperature_field: &str) -> SubmitOutcome {
        let Some(prompt) = Prompt::try_new(prompt) else {
            return SubmitOutcome::Ignored(IgnoreReason::EmptyPrompt);
        };
        if self.busy {
            debug!("Submission ignored: generation already in progress");
            return SubmitOutcome::Ignored(IgnoreReason::Busy);
        }

        let params = resolve_params(token_field, temperature_field);
        let request = GenerationRequest::new(prompt, params);

        self.busy = true;
        self.params = params;
        self.transcript.push(Turn::user(request.prompt().content()));

        info!(
            "Dispatching generation (max_tokens={}, temperature={}): {}",
            params.max_tokens,
            params.temperature,
            preview(request.prompt().content(), 80)
        );
        self.conversation_logger.log(ConversationEvent::new(
            "prompt_submitted",
            serde_json::json!({
                "prompt": request.prompt().content(),
                "max_tokens": params.max_tokens,
                "temperature": params.temperature,
            }),
        ));

        self.dispatch(request.clone());
        SubmitOutcome::Dispatched(request)
    }

    fn dispatch(&self, request: GenerationRequest) {
        let service = self.service.clone();
        let tx = self.completion_tx.clone();

        tokio::task::spawn_blocking(move || {
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                service.generate(request.prompt().content(), &request.params())
            }))
            .unwrap_or_else(|panic| Err(BackendError::Panicked(panic_message(&*panic))));

            let elapsed = request.elapsed();
            let outcome = outcome.map(|text| GenerationResult::new(text, elapsed));

            if tx.send(GenerationCompleted { request, outcome }).is_err() {
                warn!("Interactive loop closed before generation finished; result dropped");
            }
        });
    }

    /// Apply a worker's completion. Returns the assistant turn that was
    /// appended, or the backend error.
    pub fn complete(&mut self, event: GenerationCompleted) -> Result<Turn, GenerationFailed> {
        self.busy = false;

        match event.outcome {
            Ok(result) => {
                let elapsed = self.show_timing.then_some(result.elapsed);
                let turn = Turn::assistant(result.cleaned_text(), elapsed);
                self.transcript.push(turn.clone());

                info!(
                    "Generation completed in {:.2}s ({} bytes)",
                    result.elapsed.as_secs_f64(),
                    result.text.len()
                );
                self.conversation_logger.log(ConversationEvent::new(
                    "generation_completed",
                    serde_json::json!({
                        "model": self.service.model_name(),
                        "elapsed_ms": result.elapsed.as_millis() as u64,
                        "bytes": result.text.len(),
                        "text": turn.text,
                    }),
                ));

                Ok(turn)
            }
            Err(source) => {
                let elapsed = event.request.elapsed();
                error!("Generation failed after {:.2}s: {}", elapsed.as_secs_f64(), source);
                self.conversation_logger.log(ConversationEvent::new(
                    "generation_failed",
                    serde_json::json!({
                        "model": self.service.model_name(),
                        "error": source.to_string(),
                    }),
                ));

                Err(GenerationFailed { source, elapsed })
            }
        }
    }
}

/// Lenient parse of the two fields, logging each fallback.
fn resolve_params(token_field: &str, temperature_field: &str) -> GenerationParams {
    let max_tokens = parse_token_limit(token_field).unwrap_or_else(|| {
        debug!("Token field {:?} unparseable, using {}", token_field, DEFAULT_MAX_TOKENS);
        DEFAULT_MAX_TOKENS
    });
    let temperature = parse_temperature(temperature_field).unwrap_or_else(|| {
        debug!(
            "Temperature field {:?} unparseable, using {}",
            temperature_field, DEFAULT_TEMPERATURE
        );
        DEFAULT_TEMPERATURE
    });
    GenerationParams {
        max_tokens,
        temperature,
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::model_backend::ModelBackend;
    use crate::ports::session_event::{CompletionReceiver, completion_channel};
    use orca_domain::Role;
    use std::sync::Mutex;
    use std::sync::mpsc as std_mpsc;

    // ==================== Test Mocks ====================

    /// Backend that replies with a fixed text and records every call
    struct ScriptedBackend {
        reply: Result<String, BackendError>,
        calls: Mutex<Vec<(String, GenerationParams)>>,
    }

    impl ScriptedBackend {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: BackendError) -> Self {
            Self {
                reply: Err(error),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl ModelBackend for ScriptedBackend {
        fn model_name(&self) -> &str {
            "scripted"
        }

        fn start_chat(&self) -> Result<(), BackendError> {
            Ok(())
        }

        fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, BackendError> {
            self.calls
                .lock()
                .unwrap()
                .push((prompt.to_string(), *params));
            self.reply.clone()
        }

        fn end_chat(&self) {}
    }

    /// Backend that blocks until the test releases it
    struct GatedBackend {
        gate: Mutex<std_mpsc::Receiver<()>>,
    }

    impl ModelBackend for GatedBackend {
        fn model_name(&self) -> &str {
            "gated"
        }

        fn start_chat(&self) -> Result<(), BackendError> {
            Ok(())
        }

        fn generate(&self, _prompt: &str, _params: &GenerationParams) -> Result<String, BackendError> {
            let _ = self.gate.lock().unwrap().recv();
            Ok("done".to_string())
        }

        fn end_chat(&self) {}
    }

    struct PanickingBackend;

    impl ModelBackend for PanickingBackend {
        fn model_name(&self) -> &str {
            "panicking"
        }

        fn start_chat(&self) -> Result<(), BackendError> {
            Ok(())
        }

        fn generate(&self, _prompt: &str, _params: &GenerationParams) -> Result<String, BackendError> {
            panic!("weights exploded");
        }

        fn end_chat(&self) {}
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    fn controller_with(
        backend: Arc<dyn ModelBackend>,
        config: SessionConfig,
    ) -> (ChatSessionController, CompletionReceiver) {
        let service = ModelService::open(backend).unwrap();
        let (tx, rx) = completion_channel();
        (ChatSessionController::new(service, config, tx), rx)
    }

    async fn next_completion(rx: &mut CompletionReceiver) -> GenerationCompleted {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("worker did not report back")
            .expect("channel closed")
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_empty_prompt_is_ignored() {
        let backend = Arc::new(ScriptedBackend::replying("unused"));
        let (mut controller, mut rx) = controller_with(backend.clone(), SessionConfig::default());

        let outcome = controller.submit("", "200", "0.7");

        assert!(matches!(outcome, SubmitOutcome::Ignored(IgnoreReason::EmptyPrompt)));
        assert!(!controller.is_busy());
        assert!(controller.transcript().is_empty());
        assert!(rx.try_recv().is_err());
        assert!(backend.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_then_complete_round_trip() {
        let backend = Arc::new(ScriptedBackend::replying(" hello"));
        let config = SessionConfig::default().with_show_timing(false);
        let (mut controller, mut rx) = controller_with(backend.clone(), config);

        let outcome = controller.submit("hi", "200", "0.7");
        assert!(outcome.is_dispatched());
        assert!(controller.is_busy());
        assert_eq!(controller.transcript().render(), "User:\thi\n");

        let event = next_completion(&mut rx).await;
        let turn = controller.complete(event).unwrap();

        assert!(!controller.is_busy());
        assert_eq!(turn.render(), "AI:\thello\n");
        assert_eq!(controller.transcript().render(), "User:\thi\nAI:\thello\n");
    }

    #[tokio::test]
    async fn test_timing_appended_when_enabled() {
        let backend = Arc::new(ScriptedBackend::replying("hello"));
        let (mut controller, mut rx) = controller_with(backend, SessionConfig::default());
        assert!(controller.show_timing());

        controller.submit("hi", "200", "0.7");
        let event = next_completion(&mut rx).await;
        let turn = controller.complete(event).unwrap();

        let rendered = turn.render();
        assert!(rendered.starts_with("AI:\thello\n("));
        let label = rendered.trim_end();
        assert!(label.ends_with(" s)"));

        // "(X.YY s)": exactly two digits after the decimal point
        let open = label.rfind('(').unwrap();
        let number = &label[open + 1..label.len() - 3];
        let (_, decimals) = number.split_once('.').unwrap();
        assert_eq!(decimals.len(), 2);
    }

    #[tokio::test]
    async fn test_timing_toggle_read_at_completion() {
        let backend = Arc::new(ScriptedBackend::replying("hello"));
        let (mut controller, mut rx) = controller_with(backend, SessionConfig::default());

        controller.submit("hi", "", "");
        controller.set_show_timing(false);
        let event = next_completion(&mut rx).await;
        let turn = controller.complete(event).unwrap();

        assert_eq!(turn.elapsed, None);
    }

    #[tokio::test]
    async fn test_submit_while_busy_is_ignored() {
        let (release, gate) = std_mpsc::channel();
        let backend = Arc::new(GatedBackend {
            gate: Mutex::new(gate),
        });
        let (mut controller, mut rx) = controller_with(backend, SessionConfig::default());

        assert!(controller.submit("first", "200", "0.7").is_dispatched());

        let second = controller.submit("second", "10", "0.1");
        assert!(matches!(second, SubmitOutcome::Ignored(IgnoreReason::Busy)));
        assert_eq!(controller.transcript().len(), 1);
        assert_eq!(controller.params().max_tokens, 200);

        release.send(()).unwrap();
        let event = next_completion(&mut rx).await;
        assert_eq!(event.request.prompt().content(), "first");
        controller.complete(event).unwrap();

        assert!(!controller.is_busy());
        assert!(controller.submit("third", "200", "0.7").is_dispatched());
        release.send(()).unwrap();
        let event = next_completion(&mut rx).await;
        controller.complete(event).unwrap();
    }

    #[tokio::test]
    async fn test_unparseable_fields_fall_back_to_defaults() {
        let backend = Arc::new(ScriptedBackend::replying("ok"));
        let (mut controller, mut rx) = controller_with(backend.clone(), SessionConfig::default());

        let outcome = controller.submit("hi", "", "abc");
        let SubmitOutcome::Dispatched(request) = outcome else {
            panic!("Expected Dispatched");
        };
        assert_eq!(request.params().max_tokens, 200);
        assert_eq!(request.params().temperature, 0.7);

        let event = next_completion(&mut rx).await;
        controller.complete(event).unwrap();

        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "hi");
        assert_eq!(calls[0].1, GenerationParams::default());
    }

    #[tokio::test]
    async fn test_field_values_reach_backend() {
        let backend = Arc::new(ScriptedBackend::replying("ok"));
        let (mut controller, mut rx) = controller_with(backend.clone(), SessionConfig::default());

        controller.submit("hi", "32", "1.25");
        let event = next_completion(&mut rx).await;
        controller.complete(event).unwrap();

        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls[0].1.max_tokens, 32);
        assert_eq!(calls[0].1.temperature, 1.25);
        assert_eq!(controller.params().max_tokens, 32);
    }

    #[tokio::test]
    async fn test_backend_failure_returns_to_idle() {
        let backend = Arc::new(ScriptedBackend::failing(BackendError::Inference(
            "out of memory".into(),
        )));
        let (mut controller, mut rx) = controller_with(backend, SessionConfig::default());

        controller.submit("hi", "200", "0.7");
        let event = next_completion(&mut rx).await;
        let err = controller.complete(event).unwrap_err();

        assert!(matches!(err.source, BackendError::Inference(_)));
        assert!(err.to_string().contains("out of memory"));
        assert!(!controller.is_busy());
        assert_eq!(controller.transcript().len(), 1);
        assert_eq!(controller.transcript().turns()[0].role, Role::User);
    }

    #[tokio::test]
    async fn test_backend_panic_is_reported() {
        let (mut controller, mut rx) =
            controller_with(Arc::new(PanickingBackend), SessionConfig::default());

        controller.submit("hi", "200", "0.7");
        let event = next_completion(&mut rx).await;
        let err = controller.complete(event).unwrap_err();

        assert_eq!(err.source, BackendError::Panicked("weights exploded".into()));
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_conversation_logger_receives_events() {
        let backend = Arc::new(ScriptedBackend::replying("ok"));
        let logger = Arc::new(RecordingLogger::default());
        let (controller, mut rx) = controller_with(backend, SessionConfig::default());
        let mut controller = controller.with_conversation_logger(logger.clone());

        controller.submit("", "200", "0.7");
        controller.submit("hi", "200", "0.7");
        let event = next_completion(&mut rx).await;
        controller.complete(event).unwrap();

        assert_eq!(
            *logger.events.lock().unwrap(),
            vec!["prompt_submitted", "generation_completed"]
        );
    }
}
