//! Loading flag and error slot shared by every form controller.
//!
//! The flag lives in a `watch` channel so a renderer can keep a receiver and
//! draw a spinner while the controller itself is mutably borrowed by the
//! in-flight call. [`SubmissionState::begin`] hands out a guard that lowers the
//! flag on drop, so the flag is cleared on success, on error, on panic and when
//! the future is dropped mid-flight.

use crate::validation::Field;
use std::fmt;
use tokio::sync::watch;

/// A user-visible failure, optionally tied to the input it concerns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowError {
    pub field: Option<Field>,
    pub message: String,
}

impl FlowError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    pub fn for_field(field: Field, message: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            message: message.into(),
        }
    }

    /// Whether the renderer should highlight `field`.
    #[must_use]
    pub fn concerns(&self, field: Field) -> bool {
        self.field == Some(field)
    }
}

impl fmt::Display for FlowError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

impl std::error::Error for FlowError {}

#[derive(Debug)]
pub struct SubmissionState {
    loading: watch::Sender<bool>,
    error: Option<FlowError>,
}

impl Default for SubmissionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionState {
    #[must_use]
    pub fn new() -> Self {
        let (loading, _) = watch::channel(false);
        Self {
            loading,
            error: None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Receiver that observes the loading flag for the lifetime of the form.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    #[must_use]
    pub fn error(&self) -> Option<&FlowError> {
        self.error.as_ref()
    }

    pub fn set_error(&mut self, error: FlowError) {
        self.error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Raises the loading flag until the returned guard is dropped.
    #[must_use = "the loading flag drops back to false as soon as the guard is dropped"]
    pub fn begin(&self) -> LoadingGuard {
        self.loading.send_replace(true);
        LoadingGuard {
            loading: self.loading.clone(),
        }
    }
}

/// Lowers the loading flag when dropped.
#[derive(Debug)]
pub struct LoadingGuard {
    loading: watch::Sender<bool>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.loading.send_replace(false);
    }
}
