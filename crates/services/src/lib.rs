//! # services
//!
//! The client-side view-state and session orchestrator.
//!
//! ```text
//! CredentialStore → SessionVerifier ─┐
//!                                     ├→ Orchestrator → ViewStore → watch::Receiver (views)
//! CardApi → CollectionBootstrap ─────┘        ↑
//!                        UI intents / KeyEventBus
//! ```

pub mod auth;
pub mod bootstrap;
pub mod error;
pub mod gate;
pub mod keys;
pub mod modal;
pub mod orchestrator;
pub mod reducer;
pub mod report;
pub mod session;
pub mod state;
pub mod store;

pub use bootstrap::{CollectionBootstrap, InitialData};
pub use error::IntentError;
pub use gate::{guard, RouteDecision};
pub use keys::{Key, KeyEvent, KeyEventBus, ListenerGuard};
pub use modal::{CloseTrigger, PointerTarget};
pub use orchestrator::{Collaborators, Orchestrator, OrchestratorOptions};
pub use reducer::{reduce, Action};
pub use report::{ChannelReporter, ErrorReporter, Failure, Operation, QuietReporter};
pub use session::{SessionResult, SessionVerifier};
pub use state::{ModalKind, ModalProps, ModalVisibility, Session, ViewState};
pub use store::ViewStore;
