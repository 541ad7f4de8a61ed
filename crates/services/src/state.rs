//! # View State
//!
//! The single immutable record every view renders from. Only the reducer
//! produces new values of it.

use domains::{AuthOutcome, Card, CardId, Profile, Route, UserId};
use serde::Serialize;

/// The dialogs the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ModalKind {
    ProfileEditor,
    AvatarEditor,
    AddPhoto,
    PhotoViewer,
    AuthResult,
}

impl ModalKind {
    pub const ALL: [ModalKind; 5] = [
        ModalKind::ProfileEditor,
        ModalKind::AvatarEditor,
        ModalKind::AddPhoto,
        ModalKind::PhotoViewer,
        ModalKind::AuthResult,
    ];

    /// Dialogs whose submit button starts a blocking request.
    pub fn has_submit(self) -> bool {
        matches!(
            self,
            ModalKind::ProfileEditor | ModalKind::AvatarEditor | ModalKind::AddPhoto
        )
    }
}

/// One independent flag per dialog.
///
/// Nothing stops two flags from being true at once: opening a dialog does
/// not close the others. Callers close first when they want exclusivity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModalVisibility {
    pub profile_editor: bool,
    pub avatar_editor: bool,
    pub add_photo: bool,
    pub photo_viewer: bool,
    pub auth_result: bool,
}

impl ModalVisibility {
    pub fn is_open(&self, kind: ModalKind) -> bool {
        match kind {
            ModalKind::ProfileEditor => self.profile_editor,
            ModalKind::AvatarEditor => self.avatar_editor,
            ModalKind::AddPhoto => self.add_photo,
            ModalKind::PhotoViewer => self.photo_viewer,
            ModalKind::AuthResult => self.auth_result,
        }
    }

    pub(crate) fn set(&mut self, kind: ModalKind, open: bool) {
        let flag = match kind {
            ModalKind::ProfileEditor => &mut self.profile_editor,
            ModalKind::AvatarEditor => &mut self.avatar_editor,
            ModalKind::AddPhoto => &mut self.add_photo,
            ModalKind::PhotoViewer => &mut self.photo_viewer,
            ModalKind::AuthResult => &mut self.auth_result,
        };
        *flag = open;
    }

    /// Drives the document-level Escape listener.
    pub fn any_open(&self) -> bool {
        ModalKind::ALL.into_iter().any(|kind| self.is_open(kind))
    }

    pub fn open_kinds(&self) -> Vec<ModalKind> {
        ModalKind::ALL
            .into_iter()
            .filter(|kind| self.is_open(*kind))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    pub authenticated: bool,
}

/// What a dialog shell needs to render itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalProps {
    pub kind: ModalKind,
    pub is_open: bool,
    /// False while a blocking request is in flight.
    pub submit_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub session: Session,
    pub route: Route,
    pub modals: ModalVisibility,
    /// True exactly while a profile, avatar or add-photo request is outstanding.
    pub pending: bool,
    /// Outstanding blocking requests; `pending` is `in_flight > 0`.
    pub in_flight: u32,
    pub selected_card: Option<Card>,
    pub current_user: Option<Profile>,
    /// Newest first, ids unique.
    pub cards: Vec<Card>,
    pub auth_outcome: Option<AuthOutcome>,
}

impl ViewState {
    pub fn any_modal_open(&self) -> bool {
        self.modals.any_open()
    }

    pub fn current_user_id(&self) -> Option<&UserId> {
        self.current_user.as_ref().map(|user| &user.id)
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == id)
    }

    pub fn modal_props(&self, kind: ModalKind) -> ModalProps {
        ModalProps {
            kind,
            is_open: self.modals.is_open(kind),
            submit_enabled: !(kind.has_submit() && self.pending),
        }
    }
}
