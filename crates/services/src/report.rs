//! Pluggable failure reporting.
//!
//! Every failed collaborator call is logged by the orchestrator and then
//! handed to an [`ErrorReporter`]. The default reporter shows the user
//! nothing; [`ChannelReporter`] lets a front end surface notices.

use domains::ApiError;
use tokio::sync::mpsc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Bootstrap,
    UpdateProfile,
    UpdateAvatar,
    AddPhoto,
    ToggleLike,
    DeletePhoto,
    Register,
    Login,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Bootstrap => "bootstrap",
            Operation::UpdateProfile => "update-profile",
            Operation::UpdateAvatar => "update-avatar",
            Operation::AddPhoto => "add-photo",
            Operation::ToggleLike => "toggle-like",
            Operation::DeletePhoto => "delete-photo",
            Operation::Register => "register",
            Operation::Login => "login",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub operation: Operation,
    pub error: ApiError,
}

pub trait ErrorReporter: Send + Sync {
    fn report(&self, failure: &Failure);
}

/// Logs only; the user sees no notice.
#[derive(Debug, Default, Clone, Copy)]
pub struct QuietReporter;

impl ErrorReporter for QuietReporter {
    fn report(&self, _failure: &Failure) {}
}

/// Forwards failures to a receiver owned by the front end.
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    tx: mpsc::UnboundedSender<Failure>,
}

impl ChannelReporter {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Failure>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ErrorReporter for ChannelReporter {
    fn report(&self, failure: &Failure) {
        if self.tx.send(failure.clone()).is_err() {
            debug!(operation = failure.operation.as_str(), "notice receiver gone");
        }
    }
}
