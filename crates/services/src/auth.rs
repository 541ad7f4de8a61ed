//! Sign-in and registration intents.

use domains::{AuthOutcome, Credential, Identity, Result as ApiResult, Route};
use tracing::{info, warn};

use crate::error::IntentError;
use crate::orchestrator::Orchestrator;
use crate::reducer::Action;
use crate::report::Operation;

impl Orchestrator {
    /// On success the session becomes authenticated and the feed is shown.
    /// On failure the auth-result dialog reports the failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, IntentError> {
        match self.sign_in(email, password).await {
            Ok(identity) => {
                info!(user = %identity.id, "signed in");
                self.authenticated().await;
                Ok(identity)
            }
            Err(error) => {
                self.store.dispatch(Action::ShowAuthResult(AuthOutcome::Failure));
                Err(self.failed(Operation::Login, error))
            }
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> ApiResult<Identity> {
        let token = self.identity.login(email, password).await?;
        let identity = self.identity.get_identity(&token).await?;
        let credential = Credential {
            token,
            user_id: Some(identity.id.clone()),
        };
        // The session still works for this run without a persisted slot.
        if let Err(error) = self.credentials.save(&credential).await {
            warn!(%error, "credential not persisted");
        }
        Ok(identity)
    }

    /// Either way the auth-result dialog opens with the outcome; success
    /// also asks for the sign-in page, through the same gate as any other
    /// navigation.
    pub async fn register(&self, email: &str, password: &str) -> Result<Identity, IntentError> {
        match self.identity.register(email, password).await {
            Ok(identity) => {
                info!(user = %identity.id, "registered");
                self.store.dispatch(Action::ShowAuthResult(AuthOutcome::Success));
                self.navigate(Route::SignIn.path());
                Ok(identity)
            }
            Err(error) => {
                self.store.dispatch(Action::ShowAuthResult(AuthOutcome::Failure));
                Err(self.failed(Operation::Register, error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::tests::{build, empty_slot, seeded_api, ME};
    use crate::orchestrator::OrchestratorOptions;
    use domains::{
        ApiError, AuthToken, BootstrapTrigger, MockCardApi, MockCredentialStore, MockIdentityApi,
        UserId,
    };

    fn me() -> Identity {
        Identity {
            id: UserId::new(ME),
            email: "me@example.com".into(),
        }
    }

    fn accepting_identity() -> MockIdentityApi {
        let mut identity = MockIdentityApi::new();
        identity
            .expect_login()
            .returning(|_, _| Ok(AuthToken::new("fresh-jwt")));
        identity
            .expect_get_identity()
            .withf(|token| token.expose() == "fresh-jwt")
            .returning(|_| Ok(me()));
        identity
    }

    #[tokio::test]
    async fn login_persists_the_credential_and_opens_the_feed() {
        let mut slot = MockCredentialStore::new();
        slot.expect_save()
            .withf(|credential| {
                credential.token.expose() == "fresh-jwt"
                    && credential.user_id == Some(UserId::new(ME))
            })
            .times(1)
            .returning(|_| Ok(()));

        let orchestrator = build(
            MockCardApi::new(),
            accepting_identity(),
            slot,
            OrchestratorOptions::default(),
        );
        let identity = orchestrator.login("me@example.com", "hunter2").await.unwrap();

        assert_eq!(identity, me());
        let state = orchestrator.snapshot();
        assert!(state.session.authenticated);
        assert_eq!(state.route, Route::Feed);
        assert!(!state.modals.auth_result);
    }

    #[tokio::test]
    async fn unpersisted_credential_still_signs_in() {
        let mut slot = MockCredentialStore::new();
        slot.expect_save()
            .returning(|_| Err(ApiError::Storage("read-only filesystem".into())));

        let orchestrator = build(
            MockCardApi::new(),
            accepting_identity(),
            slot,
            OrchestratorOptions::default(),
        );
        assert!(orchestrator.login("me@example.com", "hunter2").await.is_ok());
        assert!(orchestrator.snapshot().session.authenticated);
    }

    #[tokio::test]
    async fn rejected_login_shows_failure() {
        let mut identity = MockIdentityApi::new();
        identity
            .expect_login()
            .returning(|_, _| Err(ApiError::Unauthorized("wrong password".into())));
        identity.expect_get_identity().never();
        let mut slot = MockCredentialStore::new();
        slot.expect_save().never();

        let orchestrator = build(MockCardApi::new(), identity, slot, OrchestratorOptions::default());
        let err = orchestrator.login("me@example.com", "nope").await.unwrap_err();

        assert_eq!(err, IntentError::Api(ApiError::Unauthorized("wrong password".into())));
        let state = orchestrator.snapshot();
        assert!(!state.session.authenticated);
        assert!(state.modals.auth_result);
        assert_eq!(state.auth_outcome, Some(AuthOutcome::Failure));
    }

    #[tokio::test]
    async fn login_triggers_a_gated_bootstrap() {
        let mut slot = empty_slot();
        slot.expect_save().returning(|_| Ok(()));

        let orchestrator = build(
            seeded_api(Vec::new()),
            accepting_identity(),
            slot,
            OrchestratorOptions {
                bootstrap: BootstrapTrigger::OnAuthenticated,
                ..OrchestratorOptions::default()
            },
        );
        orchestrator.mount().await;
        assert!(orchestrator.snapshot().current_user.is_none());

        orchestrator.login("me@example.com", "hunter2").await.unwrap();
        assert!(orchestrator.snapshot().current_user.is_some());
    }

    #[tokio::test]
    async fn registration_success_moves_to_sign_in() {
        let mut identity = MockIdentityApi::new();
        identity.expect_register().returning(|_, _| Ok(me()));

        let orchestrator = build(
            MockCardApi::new(),
            identity,
            MockCredentialStore::new(),
            OrchestratorOptions::default(),
        );
        orchestrator.navigate("/sign-up");
        orchestrator.register("me@example.com", "hunter2").await.unwrap();

        let state = orchestrator.snapshot();
        assert_eq!(state.auth_outcome, Some(AuthOutcome::Success));
        assert!(state.modals.auth_result);
        assert_eq!(state.route, Route::SignIn);
        assert!(!state.session.authenticated);
    }

    #[tokio::test]
    async fn registration_while_signed_in_stays_on_the_feed() {
        let mut identity = accepting_identity();
        identity.expect_register().returning(|_, _| Ok(me()));
        let mut slot = MockCredentialStore::new();
        slot.expect_save().returning(|_| Ok(()));

        let orchestrator = build(MockCardApi::new(), identity, slot, OrchestratorOptions::default());
        orchestrator.login("me@example.com", "hunter2").await.unwrap();
        orchestrator.close_all();

        orchestrator.register("other@example.com", "hunter2").await.unwrap();

        let state = orchestrator.snapshot();
        assert!(state.session.authenticated);
        assert_eq!(state.auth_outcome, Some(AuthOutcome::Success));
        assert!(state.modals.auth_result);
        assert_eq!(state.route, Route::Feed);
    }

    #[tokio::test]
    async fn registration_failure_stays_put() {
        let mut identity = MockIdentityApi::new();
        identity
            .expect_register()
            .returning(|_, _| Err(ApiError::Validation("email already taken".into())));

        let orchestrator = build(
            MockCardApi::new(),
            identity,
            MockCredentialStore::new(),
            OrchestratorOptions::default(),
        );
        orchestrator.navigate("/sign-up");
        assert!(orchestrator.register("me@example.com", "hunter2").await.is_err());

        let state = orchestrator.snapshot();
        assert_eq!(state.auth_outcome, Some(AuthOutcome::Failure));
        assert_eq!(state.route, Route::SignUp);
    }
}
