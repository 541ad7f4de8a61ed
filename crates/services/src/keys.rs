//! Document-level keyboard surface.
//!
//! Listeners are registered with [`KeyEventBus::subscribe`] and stay
//! attached exactly as long as the returned [`ListenerGuard`] lives.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use dashmap::DashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
}

impl KeyEvent {
    /// Builds an event from a DOM-style key name (`"Escape"`, `"Enter"`, `"a"`).
    pub fn named(name: &str) -> Self {
        let key = match name {
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            other => Key::Other(other.to_string()),
        };
        Self { key }
    }

    pub fn escape() -> Self {
        Self { key: Key::Escape }
    }
}

pub type KeyHandler = Arc<dyn Fn(&KeyEvent) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
pub struct KeyEventBus {
    listeners: DashMap<ListenerId, KeyHandler>,
    next_id: AtomicU64,
}

impl KeyEventBus {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Attaches `handler` until the guard is dropped.
    pub fn subscribe<F>(self: &Arc<Self>, handler: F) -> ListenerGuard
    where
        F: Fn(&KeyEvent) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.insert(id, Arc::new(handler));
        ListenerGuard {
            bus: Arc::downgrade(self),
            id,
        }
    }

    /// Delivers `event` to every attached listener and returns how many ran.
    ///
    /// Handlers are invoked after the listener map is released, so a handler
    /// may drop its own guard.
    pub fn dispatch(&self, event: &KeyEvent) -> usize {
        let handlers: Vec<KeyHandler> = self
            .listeners
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Detaches its listener on drop.
#[must_use = "dropping the guard detaches the listener immediately"]
pub struct ListenerGuard {
    bus: Weak<KeyEventBus>,
    id: ListenerId,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.listeners.remove(&self.id);
        }
    }
}
