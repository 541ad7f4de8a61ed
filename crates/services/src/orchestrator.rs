//! # View-State Orchestrator
//!
//! The single writer of [`ViewState`]. Front ends call intents on it and
//! render the snapshots it publishes.
//!
//! Every mutation waits for the server and applies the server's answer:
//! - profile, avatar and add-photo are *blocking*: PendingRequest is raised
//!   for the duration and the dialog closes only on success;
//! - like, unlike and delete are not gated and simply replace or remove the
//!   card by id when the server confirms.
//!
//! Failures are logged, handed to the [`ErrorReporter`], and returned to the
//! caller. State is never touched on failure.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use domains::{
    ApiError, AuthOutcome, BootstrapTrigger, Card, CardApi, CardId, CredentialStore, IdentityApi,
    Profile,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::bootstrap::{CollectionBootstrap, InitialData};
use crate::error::IntentError;
use crate::gate::{self, RouteDecision};
use crate::keys::{KeyEvent, KeyEventBus};
use crate::modal::CloseTrigger;
use crate::reducer::Action;
use crate::report::{ErrorReporter, Failure, Operation, QuietReporter};
use crate::session::{SessionResult, SessionVerifier};
use crate::state::{ModalKind, ViewState};
use crate::store::ViewStore;

/// The external systems the orchestrator talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub cards: Arc<dyn CardApi>,
    pub identity: Arc<dyn IdentityApi>,
    pub credentials: Arc<dyn CredentialStore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorOptions {
    pub bootstrap: BootstrapTrigger,
    /// Refuse a blocking mutation while another one is in flight.
    pub reject_while_pending: bool,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            bootstrap: BootstrapTrigger::OnMount,
            reject_while_pending: true,
        }
    }
}

pub struct Orchestrator {
    pub(crate) store: Arc<ViewStore>,
    pub(crate) cards: Arc<dyn CardApi>,
    pub(crate) identity: Arc<dyn IdentityApi>,
    pub(crate) credentials: Arc<dyn CredentialStore>,
    verifier: SessionVerifier,
    bootstrap: CollectionBootstrap,
    reporter: Arc<dyn ErrorReporter>,
    options: OrchestratorOptions,
    mounted: AtomicBool,
    bootstrapped: AtomicBool,
}

impl Orchestrator {
    pub fn new(
        collaborators: Collaborators,
        keys: Arc<KeyEventBus>,
        options: OrchestratorOptions,
    ) -> Self {
        let Collaborators {
            cards,
            identity,
            credentials,
        } = collaborators;
        Self {
            store: ViewStore::new(keys),
            verifier: SessionVerifier::new(Arc::clone(&identity), Arc::clone(&credentials)),
            bootstrap: CollectionBootstrap::new(Arc::clone(&cards)),
            cards,
            identity,
            credentials,
            reporter: Arc::new(QuietReporter),
            options,
            mounted: AtomicBool::new(false),
            bootstrapped: AtomicBool::new(false),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn snapshot(&self) -> Arc<ViewState> {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<ViewState>> {
        self.store.subscribe()
    }

    pub fn options(&self) -> OrchestratorOptions {
        self.options
    }

    // ====================================================================
    // Lifecycle
    // ====================================================================

    /// Restores the session and, depending on the bootstrap trigger, loads
    /// the collection. Only the first call does anything.
    pub async fn mount(&self) {
        if self.mounted.swap(true, Ordering::SeqCst) {
            debug!("already mounted");
            return;
        }
        match self.options.bootstrap {
            BootstrapTrigger::OnMount => {
                tokio::join!(self.restore_session(), self.load_collection());
            }
            BootstrapTrigger::OnAuthenticated => self.restore_session().await,
        }
    }

    async fn restore_session(&self) {
        if let SessionResult::Authenticated(_) = self.verifier.verify_stored().await {
            self.authenticated().await;
        }
    }

    pub(crate) async fn authenticated(&self) {
        self.store.dispatch(Action::SessionAuthenticated);
        if self.options.bootstrap == BootstrapTrigger::OnAuthenticated {
            self.load_collection().await;
        }
    }

    async fn load_collection(&self) {
        if self.bootstrapped.swap(true, Ordering::SeqCst) {
            return;
        }
        match self.bootstrap.fetch().await {
            Ok(InitialData { user, cards }) => {
                info!(user = %user.id, cards = cards.len(), "collection loaded");
                self.store.dispatch(Action::Bootstrapped { user, cards });
            }
            Err(error) => {
                self.failed(Operation::Bootstrap, error);
            }
        }
    }

    // ====================================================================
    // Dialogs
    // ====================================================================

    pub fn open_profile_editor(&self) {
        self.store.dispatch(Action::OpenModal(ModalKind::ProfileEditor));
    }

    pub fn open_avatar_editor(&self) {
        self.store.dispatch(Action::OpenModal(ModalKind::AvatarEditor));
    }

    pub fn open_add_photo(&self) {
        self.store.dispatch(Action::OpenModal(ModalKind::AddPhoto));
    }

    pub fn open_photo_viewer(&self, card: Card) {
        self.store.dispatch(Action::ViewCard(card));
    }

    pub fn open_auth_result(&self, outcome: AuthOutcome) {
        self.store.dispatch(Action::ShowAuthResult(outcome));
    }

    pub fn close_all(&self) {
        self.store.dispatch(Action::CloseAll);
    }

    /// Returns whether the trigger closed the dialogs.
    pub fn dismiss(&self, trigger: CloseTrigger) -> bool {
        if trigger.closes() {
            self.close_all();
        }
        trigger.closes()
    }

    /// Feeds a key press to the document-level listeners.
    pub fn press_key(&self, event: &KeyEvent) -> usize {
        self.store.keys().dispatch(event)
    }

    pub fn navigate(&self, path: &str) -> RouteDecision {
        let decision = gate::guard(path, self.snapshot().session);
        self.store.dispatch(Action::Navigated(decision.route()));
        decision
    }

    // ====================================================================
    // Blocking mutations
    // ====================================================================

    pub async fn update_profile(&self, name: &str, bio: &str) -> Result<Profile, IntentError> {
        let _pending = self.begin_request(Operation::UpdateProfile)?;
        let profile = self
            .cards
            .edit_profile(name, bio)
            .await
            .map_err(|error| self.failed(Operation::UpdateProfile, error))?;
        self.replace_user(profile.clone());
        Ok(profile)
    }

    pub async fn update_avatar(&self, url: &str) -> Result<Profile, IntentError> {
        let _pending = self.begin_request(Operation::UpdateAvatar)?;
        let profile = self
            .cards
            .edit_avatar(url)
            .await
            .map_err(|error| self.failed(Operation::UpdateAvatar, error))?;
        self.replace_user(profile.clone());
        Ok(profile)
    }

    pub async fn add_photo(&self, caption: &str, url: &str) -> Result<Card, IntentError> {
        let _pending = self.begin_request(Operation::AddPhoto)?;
        let card = self
            .cards
            .add_card(caption, url)
            .await
            .map_err(|error| self.failed(Operation::AddPhoto, error))?;
        info!(card = %card.id, "photo added");
        self.store.dispatch(Action::CardAdded(card.clone()));
        self.store.dispatch(Action::CloseAll);
        Ok(card)
    }

    fn replace_user(&self, profile: Profile) {
        info!(user = %profile.id, "profile updated");
        self.store.dispatch(Action::UserReplaced(profile));
        self.store.dispatch(Action::CloseAll);
    }

    fn begin_request(&self, operation: Operation) -> Result<PendingRequest, IntentError> {
        let reject = self.options.reject_while_pending;
        let started = self
            .store
            .dispatch_if(|state| !(reject && state.pending), Action::RequestStarted);
        if !started {
            debug!(operation = operation.as_str(), "another request is pending");
            return Err(IntentError::Busy);
        }
        Ok(PendingRequest {
            store: Arc::clone(&self.store),
        })
    }

    // ====================================================================
    // Feed mutations
    // ====================================================================

    /// Unlikes if the current user is in `card.liked_by`, likes otherwise.
    pub async fn toggle_like(&self, card: &Card) -> Result<Card, IntentError> {
        let liked = card.is_liked_by(self.snapshot().current_user_id());
        let result = if liked {
            self.cards.unlike_card(&card.id).await
        } else {
            self.cards.like_card(&card.id).await
        };
        let updated = result.map_err(|error| self.failed(Operation::ToggleLike, error))?;
        self.store.dispatch(Action::CardReplaced(updated.clone()));
        Ok(updated)
    }

    pub async fn delete_photo(&self, id: &CardId) -> Result<(), IntentError> {
        self.cards
            .delete_card(id)
            .await
            .map_err(|error| self.failed(Operation::DeletePhoto, error))?;
        info!(card = %id, "photo deleted");
        self.store.dispatch(Action::CardRemoved(id.clone()));
        Ok(())
    }

    pub(crate) fn failed(&self, operation: Operation, error: ApiError) -> IntentError {
        warn!(operation = operation.as_str(), %error, "request failed");
        self.reporter.report(&Failure {
            operation,
            error: error.clone(),
        });
        IntentError::Api(error)
    }
}

/// Clears PendingRequest when dropped: on success, on failure, and when the
/// intent's future is dropped mid-flight.
struct PendingRequest {
    store: Arc<ViewStore>,
}

impl Drop for PendingRequest {
    fn drop(&mut self) {
        self.store.dispatch(Action::RequestFinished);
    }
}
