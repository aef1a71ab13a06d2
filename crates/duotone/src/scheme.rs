//! OS color-scheme detection and change subscription.
//!
//! The [`SchemeProvider`] trait answers one question — does the OS prefer a
//! dark scheme right now? — and lets the controller subscribe to changes of
//! that answer.
//!
//! [`SystemScheme`] queries the OS through the `dark-light` crate. Since
//! the OS offers no push notification through that capability, hosts call
//! [`poll`](SystemScheme::poll) periodically; subscribers are notified only
//! when the answer actually changed.
//!
//! When the capability is unavailable entirely, [`system_or_inert`] hands
//! back an [`InertScheme`] that always reports "no dark preference" and
//! accepts (but ignores) subscriptions, so callers never special-case
//! absence.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Callback invoked with the new "prefers dark" value on each change.
pub type SchemeListener = Box<dyn Fn(bool) + Send + Sync>;

/// Identifies a subscription for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Capability for querying and watching the OS color-scheme preference.
pub trait SchemeProvider: Send + Sync {
    /// Returns true if the OS currently prefers a dark scheme.
    fn prefers_dark(&self) -> bool;

    /// Registers `listener` to be called whenever the preference changes.
    fn subscribe(&self, listener: SchemeListener) -> SubscriptionId;

    /// Removes a previously registered listener. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}

#[derive(Default)]
struct ListenerSet {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Arc<dyn Fn(bool) + Send + Sync>)>,
}

impl ListenerSet {
    fn add(&mut self, listener: SchemeListener) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.push((id, Arc::from(listener)));
        id
    }

    fn remove(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(existing, _)| *existing != id);
    }
}

/// Invokes listeners with the lock released, so a listener may call back
/// into subscribe/unsubscribe without self-deadlocking.
fn notify_all(listeners: &Mutex<ListenerSet>, prefers_dark: bool) {
    let snapshot: Vec<_> = listeners
        .lock()
        .unwrap()
        .listeners
        .iter()
        .map(|(_, listener)| Arc::clone(listener))
        .collect();
    for listener in snapshot {
        listener(prefers_dark);
    }
}

fn detect_prefers_dark() -> Option<bool> {
    match dark_light::detect() {
        Ok(dark_light::Mode::Dark) => Some(true),
        Ok(_) => Some(false),
        Err(_) => None,
    }
}

/// Scheme provider backed by the OS, via the `dark-light` crate.
///
/// `prefers_dark` queries the OS point-in-time. Change notification is
/// poll-based: hosts call [`poll`](Self::poll) on whatever cadence suits
/// them, and subscribers hear about transitions only.
#[derive(Default)]
pub struct SystemScheme {
    last_seen: AtomicBool,
    listeners: Mutex<ListenerSet>,
}

impl SystemScheme {
    /// Creates a provider seeded with the current OS preference.
    pub fn new() -> Self {
        let scheme = Self::default();
        scheme
            .last_seen
            .store(detect_prefers_dark().unwrap_or(false), Ordering::SeqCst);
        scheme
    }

    /// Re-queries the OS and notifies subscribers if the answer changed.
    pub fn poll(&self) {
        let Some(current) = detect_prefers_dark() else {
            return;
        };
        let previous = self.last_seen.swap(current, Ordering::SeqCst);
        if previous != current {
            notify_all(&self.listeners, current);
        }
    }
}

impl SchemeProvider for SystemScheme {
    fn prefers_dark(&self) -> bool {
        match detect_prefers_dark() {
            Some(current) => {
                self.last_seen.store(current, Ordering::SeqCst);
                current
            }
            None => self.last_seen.load(Ordering::SeqCst),
        }
    }

    fn subscribe(&self, listener: SchemeListener) -> SubscriptionId {
        self.listeners.lock().unwrap().add(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.lock().unwrap().remove(id);
    }
}

/// Stand-in for hosts where scheme detection is unavailable.
///
/// Always reports no dark preference; subscriptions are accepted and
/// ignored so the rest of the logic runs uniformly.
#[derive(Debug, Default, Clone, Copy)]
pub struct InertScheme;

impl InertScheme {
    /// Creates the inert provider.
    pub fn new() -> Self {
        Self
    }
}

impl SchemeProvider for InertScheme {
    fn prefers_dark(&self) -> bool {
        false
    }

    fn subscribe(&self, _listener: SchemeListener) -> SubscriptionId {
        SubscriptionId(0)
    }

    fn unsubscribe(&self, _id: SubscriptionId) {}
}

/// Returns the OS-backed provider when detection works, the inert shim
/// otherwise.
pub fn system_or_inert() -> Arc<dyn SchemeProvider> {
    match detect_prefers_dark() {
        Some(_) => Arc::new(SystemScheme::new()),
        None => Arc::new(InertScheme::new()),
    }
}

/// Scriptable scheme provider for tests.
///
/// # Example
///
/// ```rust
/// use duotone::{MockScheme, SchemeProvider};
///
/// let scheme = MockScheme::new(false);
/// scheme.subscribe(Box::new(|dark| assert!(dark)));
/// scheme.set_prefers_dark(true); // listener fires
/// ```
#[derive(Default)]
pub struct MockScheme {
    prefers_dark: AtomicBool,
    listeners: Mutex<ListenerSet>,
}

impl MockScheme {
    /// Creates a provider reporting the given preference.
    pub fn new(prefers_dark: bool) -> Self {
        let scheme = Self::default();
        scheme.prefers_dark.store(prefers_dark, Ordering::SeqCst);
        scheme
    }

    /// Changes the reported preference, notifying listeners on transitions.
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        let previous = self.prefers_dark.swap(prefers_dark, Ordering::SeqCst);
        if previous != prefers_dark {
            notify_all(&self.listeners, prefers_dark);
        }
    }
}

impl SchemeProvider for MockScheme {
    fn prefers_dark(&self) -> bool {
        self.prefers_dark.load(Ordering::SeqCst)
    }

    fn subscribe(&self, listener: SchemeListener) -> SubscriptionId {
        self.listeners.lock().unwrap().add(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.lock().unwrap().remove(id);
    }
}
