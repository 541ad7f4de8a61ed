//! # ViewStore
//!
//! Owns the live [`ViewState`] and publishes every new snapshot on a watch
//! channel. Views read snapshots; only the orchestrator dispatches.
//!
//! The store also owns the document-level Escape listener: it is attached
//! when the first dialog opens and detached as soon as none is open.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::debug;

use crate::keys::{Key, KeyEventBus, ListenerGuard};
use crate::reducer::{reduce, Action};
use crate::state::ViewState;

pub struct ViewStore {
    state: watch::Sender<Arc<ViewState>>,
    keys: Arc<KeyEventBus>,
    /// `Some` exactly while any dialog is open. Also serializes dispatches.
    escape: Mutex<Option<ListenerGuard>>,
    this: Weak<ViewStore>,
}

impl ViewStore {
    pub fn new(keys: Arc<KeyEventBus>) -> Arc<Self> {
        let (state, _) = watch::channel(Arc::new(ViewState::default()));
        Arc::new_cyclic(|this| Self {
            state,
            keys,
            escape: Mutex::new(None),
            this: this.clone(),
        })
    }

    /// Current state (Arc clone, no data copy).
    pub fn snapshot(&self) -> Arc<ViewState> {
        Arc::clone(&self.state.borrow())
    }

    /// Read-only feed of snapshots for views.
    pub fn subscribe(&self) -> watch::Receiver<Arc<ViewState>> {
        self.state.subscribe()
    }

    pub fn keys(&self) -> &Arc<KeyEventBus> {
        &self.keys
    }

    pub fn dispatch(&self, action: Action) {
        self.dispatch_if(|_| true, action);
    }

    /// Applies `action` only if `accept` holds for the current state.
    ///
    /// The check and the transition happen under one lock, so no other
    /// dispatch can slip in between.
    pub fn dispatch_if<P>(&self, accept: P, action: Action) -> bool
    where
        P: FnOnce(&ViewState) -> bool,
    {
        let mut escape = self.escape.lock();
        let mut any_open = escape.is_some();
        let applied = self.state.send_if_modified(|state| {
            if !accept(state) {
                return false;
            }
            debug!(?action, "dispatch");
            *state = Arc::new(reduce(state, action));
            any_open = state.any_modal_open();
            true
        });
        self.sync_escape_listener(&mut escape, any_open);
        applied
    }

    fn sync_escape_listener(&self, slot: &mut Option<ListenerGuard>, any_open: bool) {
        match (any_open, slot.is_some()) {
            (true, false) => {
                let store = self.this.clone();
                *slot = Some(self.keys.subscribe(move |event| {
                    if event.key != Key::Escape {
                        return;
                    }
                    if let Some(store) = store.upgrade() {
                        store.dispatch(Action::CloseAll);
                    }
                }));
                debug!("escape listener attached");
            }
            (false, true) => {
                slot.take();
                debug!("escape listener detached");
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyEvent;
    use crate::state::ModalKind;

    #[test]
    fn listener_follows_any_open() {
        let keys = KeyEventBus::new();
        let store = ViewStore::new(Arc::clone(&keys));
        assert_eq!(keys.listener_count(), 0);

        store.dispatch(Action::OpenModal(ModalKind::AvatarEditor));
        assert_eq!(keys.listener_count(), 1);

        // A second dialog does not attach a second listener.
        store.dispatch(Action::OpenModal(ModalKind::AddPhoto));
        assert_eq!(keys.listener_count(), 1);

        store.dispatch(Action::CloseAll);
        assert_eq!(keys.listener_count(), 0);
    }

    #[test]
    fn escape_closes_everything_once() {
        let keys = KeyEventBus::new();
        let store = ViewStore::new(Arc::clone(&keys));
        let mut rx = store.subscribe();

        store.dispatch(Action::OpenModal(ModalKind::ProfileEditor));
        rx.borrow_and_update();

        assert_eq!(keys.dispatch(&KeyEvent::escape()), 1);
        assert!(rx.has_changed().unwrap());
        assert!(!store.snapshot().any_modal_open());
        assert_eq!(keys.listener_count(), 0);

        rx.borrow_and_update();
        assert_eq!(keys.dispatch(&KeyEvent::escape()), 0);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn other_keys_leave_dialogs_open() {
        let keys = KeyEventBus::new();
        let store = ViewStore::new(Arc::clone(&keys));
        store.dispatch(Action::OpenModal(ModalKind::PhotoViewer));

        keys.dispatch(&KeyEvent::named("Enter"));
        assert!(store.snapshot().modals.photo_viewer);
        assert_eq!(keys.listener_count(), 1);
    }

    #[test]
    fn rejected_dispatch_changes_nothing() {
        let store = ViewStore::new(KeyEventBus::new());
        store.dispatch(Action::RequestStarted);
        let mut rx = store.subscribe();

        let applied = store.dispatch_if(|state| !state.pending, Action::RequestStarted);
        assert!(!applied);
        assert!(!rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().pending);
    }

    #[test]
    fn dropping_the_store_detaches_the_listener() {
        let keys = KeyEventBus::new();
        let store = ViewStore::new(Arc::clone(&keys));
        store.dispatch(Action::OpenModal(ModalKind::AuthResult));
        drop(store);
        assert_eq!(keys.listener_count(), 0);
    }
}
