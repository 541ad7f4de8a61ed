use domains::ApiError;
use thiserror::Error;

/// Why an intent did not take effect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntentError {
    /// A blocking request is already in flight.
    #[error("another request is still pending")]
    Busy,

    /// The collaborator failed; state was left unchanged.
    #[error(transparent)]
    Api(#[from] ApiError),
}
