//! Process-wide model service handle.
//!
//! Wraps the loaded [`ModelBackend`] with an explicit lifecycle: the chat
//! scope is opened once at startup and closed once at shutdown. The handle
//! is cheap to clone so the controller and each generation worker can hold
//! one.

use crate::ports::model_backend::{BackendError, ModelBackend};
use orca_domain::GenerationParams;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

#[derive(Clone)]
pub struct ModelService {
    inner: Arc<ServiceInner>,
}

struct ServiceInner {
    backend: Arc<dyn ModelBackend>,
    open: AtomicBool,
}

impl ModelService {
    /// Open the backend's chat scope and wrap it.
    pub fn open(backend: Arc<dyn ModelBackend>) -> Result<Self, BackendError> {
        backend.start_chat()?;
        info!("Chat session opened on model {}", backend.model_name());
        Ok(Self {
            inner: Arc::new(ServiceInner {
                backend,
                open: AtomicBool::new(true),
            }),
        })
    }

    pub fn model_name(&self) -> &str {
        self.inner.backend.model_name()
    }

    pub fn is_open(&self) -> bool {
        self.inner.open.load(Ordering::SeqCst)
    }

    /// Blocking generation call. Never call this on the interactive thread.
    pub fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, BackendError> {
        self.inner.backend.generate(prompt, params)
    }

    /// End the chat scope. Safe to call more than once.
    pub fn close(&self) {
        if self.inner.open.swap(false, Ordering::SeqCst) {
            self.inner.backend.end_chat();
            info!("Chat session closed");
        }
    }
}

impl Drop for ServiceInner {
    fn drop(&mut self) {
        if self.open.swap(false, Ordering::SeqCst) {
            self.backend.end_chat();
        }
    }
}
