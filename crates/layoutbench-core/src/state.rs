//! Reactive state primitives
//!
//! The run state and the result list are [`Signal`]s so display surfaces can
//! re-render when a run starts, finishes or appends a result.

use parking_lot::RwLock;
use slotmap::SlotMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

slotmap::new_key_type! {
    /// Handle returned by [`Signal::subscribe`], used to unsubscribe.
    pub struct SubscriptionId;
}

type Subscriber<T> = Box<dyn Fn(&T) + Send + Sync>;

struct Shared<T> {
    value: RwLock<T>,
    version: AtomicU64,
    subscribers: RwLock<SlotMap<SubscriptionId, Subscriber<T>>>,
}

/// Shared observable value. Clones observe the same value.
///
/// Subscribers run synchronously on the writing thread, after the value lock
/// has been released, so they may read the signal again.
pub struct Signal<T: Clone + Send + Sync + 'static> {
    shared: Arc<Shared<T>>,
}

impl<T: Clone + Send + Sync + 'static> Signal<T> {
    pub fn new(initial: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                value: RwLock::new(initial),
                version: AtomicU64::new(0),
                subscribers: RwLock::new(SlotMap::with_key()),
            }),
        }
    }

    /// Clone of the current value
    pub fn get(&self) -> T {
        self.shared.value.read().clone()
    }

    /// Borrow the current value for the duration of `f`
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.value.read())
    }

    /// Number of writes that notified subscribers
    pub fn version(&self) -> u64 {
        self.shared.version.load(Ordering::Acquire)
    }

    pub fn set(&self, value: T) {
        self.update_if(move |current| {
            *current = value;
            true
        });
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.update_if(|value| {
            f(value);
            true
        });
    }

    /// Check-and-set under a single write lock.
    ///
    /// `f` returns whether it changed the value; subscribers are only notified
    /// when it did.
    pub fn update_if(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        let snapshot = {
            let mut value = self.shared.value.write();
            if !f(&mut value) {
                return false;
            }
            self.shared.version.fetch_add(1, Ordering::AcqRel);
            value.clone()
        };
        for callback in self.shared.subscribers.read().values() {
            callback(&snapshot);
        }
        true
    }

    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> SubscriptionId {
        self.shared.subscribers.write().insert(Box::new(callback))
    }

    /// Returns false if `id` was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.subscribers.write().remove(id).is_some()
    }

    /// Signal holding `f` of this signal's value, kept in sync on every write.
    pub fn computed<U, F>(&self, f: F) -> Signal<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        let derived = Signal::new(self.with(&f));
        let target = derived.clone();
        self.subscribe(move |value| target.set(f(value)));
        derived
    }
}

impl<T: Clone + Send + Sync + 'static> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone + Send + Sync + Default + 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + Send + Sync + std::fmt::Debug + 'static> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("value", &*self.shared.value.read())
            .field("version", &self.version())
            .field("subscribers", &self.shared.subscribers.read().len())
            .finish()
    }
}
