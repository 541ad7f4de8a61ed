//! Plain-text views of a `ViewState` snapshot.

use std::fmt::Write;

use domains::Route;
use services::{ModalKind, ViewState};

pub fn summary(state: &ViewState) -> String {
    let user = state
        .current_user
        .as_ref()
        .map_or("-", |user| user.display_name.as_str());
    let dialogs: Vec<&str> = state
        .modals
        .open_kinds()
        .into_iter()
        .map(dialog_name)
        .collect();
    format!(
        "[{route}] {session} user={user} cards={cards} dialogs=[{dialogs}]{pending}",
        route = route_name(state.route),
        session = if state.session.authenticated { "signed-in" } else { "signed-out" },
        cards = state.cards.len(),
        dialogs = dialogs.join(","),
        pending = if state.pending { " saving..." } else { "" },
    )
}

pub fn feed(state: &ViewState) -> String {
    let me = state.current_user_id();
    let mut out = String::new();
    if let Some(user) = &state.current_user {
        let _ = writeln!(out, "{} ({})", user.display_name, user.bio);
    }
    if state.cards.is_empty() {
        out.push_str("  no photos yet\n");
    }
    for card in &state.cards {
        let _ = writeln!(
            out,
            "  {id:<12} {heart} {likes:>3}  {caption}{mine}",
            id = card.id.as_str(),
            heart = if card.is_liked_by(me) { "♥" } else { "♡" },
            likes = card.like_count(),
            caption = card.caption,
            mine = if card.is_owned_by(me) { "  [yours]" } else { "" },
        );
    }
    if let Some(card) = &state.selected_card {
        let _ = writeln!(out, "viewing: {} <{}>", card.caption, card.image_url);
    }
    if state.modals.is_open(ModalKind::AuthResult) {
        let _ = writeln!(out, "auth result: {:?}", state.auth_outcome);
    }
    out
}

fn route_name(route: Route) -> &'static str {
    match route {
        Route::Feed => "feed",
        Route::SignIn => "sign-in",
        Route::SignUp => "sign-up",
    }
}

fn dialog_name(kind: ModalKind) -> &'static str {
    match kind {
        ModalKind::ProfileEditor => "profile",
        ModalKind::AvatarEditor => "avatar",
        ModalKind::AddPhoto => "add-photo",
        ModalKind::PhotoViewer => "viewer",
        ModalKind::AuthResult => "auth-result",
    }
}
