//! User session state.
//!
//! [`SessionService`] holds the identity that is current in this process and
//! tells observers about every guest/logged-in transition. Persisting a
//! snapshot is a separate, explicit call: transitions never touch the session
//! file on their own, so the in-memory identity and the file can disagree
//! until [`SessionService::save_session`] or [`SessionService::clear`] runs.

mod namespace;
mod persistence;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tokio::sync::mpsc;

use crate::models::{SessionSnapshot, UserIdentity, UserProfile};
use crate::util::unix_timestamp_now;

pub use namespace::{DataNamespace, UserDataDirectory};
pub use persistence::{FileSessionStore, SessionPersistence};

/// Handler invoked with `true` after a login and `false` after a logout.
pub type SessionObserver = Arc<dyn Fn(bool) + Send + Sync>;

/// Handle returned by [`SessionService::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Clone)]
enum Observer {
    Handler(SessionObserver),
    Channel(mpsc::UnboundedSender<bool>),
}

impl Observer {
    fn notify(&self, logged_in: bool) {
        match self {
            Self::Handler(handler) => handler(logged_in),
            // A closed channel is pruned after the transition.
            Self::Channel(sender) => {
                let _ = sender.send(logged_in);
            }
        }
    }

    fn is_closed(&self) -> bool {
        matches!(self, Self::Channel(sender) if sender.is_closed())
    }
}

pub struct SessionService<S: SessionPersistence = FileSessionStore> {
    store: S,
    namespace: Arc<dyn DataNamespace>,
    current: RwLock<UserIdentity>,
    observers: Mutex<Vec<(SubscriptionId, Observer)>>,
    next_subscription: AtomicU64,
    // Held across "set identity + notify" so observers see transitions in order.
    transition_lock: Mutex<()>,
}

impl<S: SessionPersistence> SessionService<S> {
    /// Create a service in guest mode.
    pub fn new(store: S, namespace: Arc<dyn DataNamespace>) -> Self {
        Self {
            store,
            namespace,
            current: RwLock::new(UserIdentity::Guest),
            observers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
            transition_lock: Mutex::new(()),
        }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn current_identity(&self) -> UserIdentity {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_logged_in()
    }

    /// Register a handler for login-state changes.
    ///
    /// Handlers run synchronously on the transitioning thread and must not
    /// trigger another transition themselves.
    pub fn subscribe(&self, handler: impl Fn(bool) + Send + Sync + 'static) -> SubscriptionId {
        self.register(Observer::Handler(Arc::new(handler)))
    }

    /// Receive every login-state change on a channel, in transition order.
    ///
    /// Dropping the receiver ends the subscription.
    pub fn subscribe_channel(&self) -> mpsc::UnboundedReceiver<bool> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.register(Observer::Channel(sender));
        receiver
    }

    /// Number of live subscriptions.
    pub fn observer_count(&self) -> usize {
        let mut observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        observers.retain(|(_, observer)| !observer.is_closed());
        observers.len()
    }

    fn register(&self, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        let mut observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        observers.retain(|(_, existing)| !existing.is_closed());
        observers.push((id, observer));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    pub fn set_guest_mode(&self) {
        tracing::info!("Switching to guest mode");
        self.transition(UserIdentity::Guest);
    }

    pub fn set_logged_in_user(&self, profile: UserProfile) {
        tracing::info!("Signed in as {}", profile.email);
        self.transition(UserIdentity::LoggedIn(profile));
    }

    /// Log out: switch to guest mode and delete the persisted session.
    pub fn clear(&self) {
        self.set_guest_mode();
        if let Err(error) = self.store.clear_session() {
            tracing::warn!("Failed to delete persisted session: {}", error);
        }
    }

    /// Persist `snapshot`. Failures are logged, not returned.
    pub fn save_session(&self, snapshot: &SessionSnapshot) {
        match self.store.save_session(snapshot) {
            Ok(()) => tracing::debug!("Saved session for {}", snapshot.user.email),
            Err(error) => tracing::warn!("Failed to save session: {}", error),
        }
    }

    /// Load the persisted snapshot. A missing or unreadable file means no session.
    pub fn load_session(&self) -> Option<SessionSnapshot> {
        match self.store.load_session() {
            Ok(snapshot) => snapshot,
            Err(error) => {
                tracing::warn!("Ignoring unreadable persisted session: {}", error);
                None
            }
        }
    }

    pub fn is_session_valid(&self) -> bool {
        self.is_session_valid_at(unix_timestamp_now())
    }

    pub fn is_session_valid_at(&self, now: i64) -> bool {
        self.load_session().is_some_and(|snapshot| snapshot.is_valid_at(now))
    }

    /// Adopt the persisted session if it is still valid.
    ///
    /// Returns whether the service is now logged in. An expired or missing
    /// snapshot leaves the current identity untouched.
    pub fn restore_session(&self) -> bool {
        self.restore_session_at(unix_timestamp_now())
    }

    pub fn restore_session_at(&self, now: i64) -> bool {
        match self.load_session() {
            Some(snapshot) if snapshot.is_valid_at(now) => {
                self.set_logged_in_user(snapshot.user);
                true
            }
            Some(_) => {
                tracing::info!("Persisted session has expired");
                false
            }
            None => false,
        }
    }

    fn transition(&self, identity: UserIdentity) {
        let _transition = self
            .transition_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let logged_in = match &identity {
            UserIdentity::Guest => {
                self.namespace.select_guest();
                false
            }
            UserIdentity::LoggedIn(profile) => {
                self.namespace.select_user(&profile.email);
                true
            }
        };
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = identity;

        let observers = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect::<Vec<_>>();
        for observer in &observers {
            observer.notify(logged_in);
        }

        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(_, observer)| !observer.is_closed());
    }
}
