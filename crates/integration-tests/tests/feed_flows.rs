mod fixtures;

use domains::{ApiError, CardId};
use fixtures::{ids, World};
use services::{IntentError, Operation};

#[tokio::test]
async fn like_then_unlike_restores_membership() {
    let world = World::new().await;
    let app = world.signed_in_app().await;
    let app = &app.orchestrator;
    let original = app.snapshot().card(&CardId::new("elbrus")).cloned().unwrap();

    let liked = app.toggle_like(&original).await.unwrap();
    assert!(liked.is_liked_by(Some(&world.me.id)));
    assert_eq!(liked.like_count(), original.like_count() + 1);
    assert_eq!(app.snapshot().card(&original.id), Some(&liked));

    let unliked = app.toggle_like(&liked).await.unwrap();
    assert_eq!(unliked.liked_by, original.liked_by);
    assert_eq!(app.snapshot().card(&original.id), Some(&unliked));
}

#[tokio::test]
async fn toggling_keeps_the_card_in_place_and_refreshes_the_viewer() {
    let world = World::new().await;
    let app = world.signed_in_app().await;
    let app = &app.orchestrator;
    let before = ids(&app.snapshot().cards);
    let card = app.snapshot().cards[1].clone();

    app.open_photo_viewer(card.clone());
    let liked = app.toggle_like(&card).await.unwrap();

    let state = app.snapshot();
    assert_eq!(ids(&state.cards), before);
    assert_eq!(state.selected_card.as_ref(), Some(&liked));
}

#[tokio::test]
async fn add_photo_prepends_one_fresh_card() {
    let world = World::new().await;
    let app = world.signed_in_app().await;
    let app = &app.orchestrator;
    let before = ids(&app.snapshot().cards);

    app.open_add_photo();
    let card = app
        .add_photo("Kamchatka", "https://img.example/kamchatka.jpg")
        .await
        .unwrap();

    let state = app.snapshot();
    assert!(!before.contains(&card.id.to_string()));
    assert_eq!(state.cards.len(), before.len() + 1);
    assert_eq!(state.cards[0], card);
    assert_eq!(ids(&state.cards[1..]), before);
    assert!(!state.modals.add_photo);
    assert!(!state.pending);
    assert!(card.is_owned_by(state.current_user_id()));
}

#[tokio::test]
async fn rejected_photo_keeps_the_dialog_open() {
    let world = World::new().await;
    let mut app = world.signed_in_app().await;
    let before = app.orchestrator.snapshot().cards.clone();

    app.orchestrator.open_add_photo();
    let err = app
        .orchestrator
        .add_photo("No link", "not-a-url")
        .await
        .unwrap_err();
    assert!(matches!(err, IntentError::Api(ApiError::Validation(_))));

    let state = app.orchestrator.snapshot();
    assert_eq!(state.cards, before);
    assert!(state.modals.add_photo);
    assert!(!state.pending);
    assert_eq!(app.notices.recv().await.unwrap().operation, Operation::AddPhoto);
}

#[tokio::test]
async fn delete_removes_exactly_that_card() {
    let world = World::new().await;
    let app = world.signed_in_app().await;
    let app = &app.orchestrator;

    app.delete_photo(&CardId::new("mine")).await.unwrap();

    assert_eq!(ids(&app.snapshot().cards), vec!["elbrus", "baikal"]);
}

#[tokio::test]
async fn deleting_an_unknown_card_changes_nothing_and_is_reported() {
    let world = World::new().await;
    let mut app = world.signed_in_app().await;
    let before = app.orchestrator.snapshot().cards.clone();

    let err = app
        .orchestrator
        .delete_photo(&CardId::new("ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, IntentError::Api(ApiError::NotFound(..))));
    assert_eq!(app.orchestrator.snapshot().cards, before);

    let notice = app.notices.recv().await.unwrap();
    assert_eq!(notice.operation, Operation::DeletePhoto);
}

#[tokio::test]
async fn someone_elses_card_cannot_be_deleted() {
    let world = World::new().await;
    let app = world.signed_in_app().await;
    let app = &app.orchestrator;

    let err = app.delete_photo(&CardId::new("elbrus")).await.unwrap_err();
    assert!(matches!(err, IntentError::Api(ApiError::Unauthorized(_))));
    assert_eq!(app.snapshot().cards.len(), 3);
}

#[tokio::test]
async fn profile_update_replaces_user_and_closes_editor() {
    let world = World::new().await;
    let app = world.signed_in_app().await;
    let app = &app.orchestrator;

    app.open_profile_editor();
    app.update_profile("Ada", "Engineer").await.unwrap();

    let state = app.snapshot();
    let user = state.current_user.as_ref().unwrap();
    assert_eq!(user.display_name, "Ada");
    assert_eq!(user.bio, "Engineer");
    assert_eq!(user.id, world.me.id);
    assert!(!state.modals.profile_editor);
    assert!(!state.pending);
}

#[tokio::test]
async fn failed_profile_update_changes_nothing_but_pending() {
    let world = World::new().await;
    let app = world.signed_in_app().await;
    let app = &app.orchestrator;
    let before = app.snapshot().current_user.clone();

    app.open_profile_editor();
    assert!(app.update_profile("", "Engineer").await.is_err());

    let state = app.snapshot();
    assert_eq!(state.current_user, before);
    assert!(state.modals.profile_editor);
    assert!(!state.pending);
}

#[tokio::test]
async fn avatar_update_is_server_confirmed() {
    let world = World::new().await;
    let app = world.signed_in_app().await;
    let app = &app.orchestrator;

    app.open_avatar_editor();
    let profile = app
        .update_avatar("https://img.example/ada-new.jpg")
        .await
        .unwrap();

    let state = app.snapshot();
    assert_eq!(state.current_user.as_ref(), Some(&profile));
    assert_eq!(profile.avatar_url, "https://img.example/ada-new.jpg");
    assert!(!state.modals.avatar_editor);
}
