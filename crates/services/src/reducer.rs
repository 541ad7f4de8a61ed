//! # View Reducer
//!
//! Pure state transitions:
//! ```text
//! Intent → Collaborator → [Action → reduce] → ViewState → Views
//! ```
//!
//! Every change to [`ViewState`] is one of the actions below. Collaborator
//! results only enter the state through `Bootstrapped`, `UserReplaced` and
//! the `Card*` actions, always carrying the server's version.

use std::collections::HashSet;

use domains::{AuthOutcome, Card, CardId, Profile, Route};

use crate::state::{ModalKind, ModalVisibility, ViewState};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Sets one dialog flag; the others are left as they are.
    OpenModal(ModalKind),
    /// Selects a card and opens the photo viewer.
    ViewCard(Card),
    /// Records the auth outcome and opens the auth-result dialog.
    ShowAuthResult(AuthOutcome),
    /// Every dialog flag off, selection cleared.
    CloseAll,

    RequestStarted,
    RequestFinished,

    SessionAuthenticated,
    Navigated(Route),

    Bootstrapped { user: Profile, cards: Vec<Card> },
    UserReplaced(Profile),
    /// Prepends a freshly created card.
    CardAdded(Card),
    /// Swaps the card with the same id for the given one, keeping its position.
    CardReplaced(Card),
    CardRemoved(CardId),
}

pub fn reduce(state: &ViewState, action: Action) -> ViewState {
    let mut next = state.clone();
    match action {
        Action::OpenModal(kind) => next.modals.set(kind, true),
        Action::ViewCard(card) => {
            next.selected_card = Some(card);
            next.modals.set(ModalKind::PhotoViewer, true);
        }
        Action::ShowAuthResult(outcome) => {
            next.auth_outcome = Some(outcome);
            next.modals.set(ModalKind::AuthResult, true);
        }
        Action::CloseAll => {
            next.modals = ModalVisibility::default();
            next.selected_card = None;
        }
        Action::RequestStarted => {
            next.in_flight += 1;
            next.pending = true;
        }
        Action::RequestFinished => {
            next.in_flight = next.in_flight.saturating_sub(1);
            next.pending = next.in_flight > 0;
        }
        Action::SessionAuthenticated => {
            next.session.authenticated = true;
            next.route = Route::Feed;
        }
        Action::Navigated(route) => next.route = route,
        Action::Bootstrapped { user, cards } => {
            next.current_user = Some(user);
            next.cards = unique_by_id(cards);
        }
        Action::UserReplaced(user) => next.current_user = Some(user),
        Action::CardAdded(card) => {
            next.cards.retain(|existing| existing.id != card.id);
            next.cards.insert(0, card);
        }
        Action::CardReplaced(card) => {
            if let Some(selected) = next.selected_card.as_mut().filter(|s| s.id == card.id) {
                *selected = card.clone();
            }
            if let Some(slot) = next.cards.iter_mut().find(|existing| existing.id == card.id) {
                *slot = card;
            }
        }
        Action::CardRemoved(id) => next.cards.retain(|existing| existing.id != id),
    }
    next
}

/// Keeps the first occurrence of every id.
fn unique_by_id(cards: Vec<Card>) -> Vec<Card> {
    let mut seen = HashSet::new();
    cards
        .into_iter()
        .filter(|card| seen.insert(card.id.clone()))
        .collect()
}
