//! Listener registry for live queries.
//!
//! Listeners are partitioned by their key (the owning uid for store queries,
//! `()` for session watchers), so a mutation only ever walks the matching
//! partition. Within a partition, listeners keep registration order.
//!
//! Notification is synchronous and reentrant-unsafe: `snapshot_for` hands the
//! caller a cloned listener list so the registry lock is released before any
//! callback runs, but a callback that mutates the same collection will
//! trigger a nested notification round with no cycle guard.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Locks without propagating poison: the runtime is a single logical
/// thread, so a poisoned lock only means an earlier callback panicked.
pub(crate) fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Registered<L> {
    id: u64,
    listener: L,
}

struct Partitions<K, L> {
    by_key: HashMap<K, Vec<Registered<L>>>,
    next_id: u64,
}

/// A set of listeners partitioned by key.
pub struct ListenerSet<K, L> {
    inner: Arc<Mutex<Partitions<K, L>>>,
}

impl<K, L> ListenerSet<K, L>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    L: Clone + Send + 'static,
{
    pub fn new() -> Self {
        ListenerSet {
            inner: Arc::new(Mutex::new(Partitions {
                by_key: HashMap::new(),
                next_id: 0,
            })),
        }
    }

    /// Registers a listener under `key` and returns the handle that removes
    /// it again. Removing one listener never affects the others.
    pub fn insert(&self, key: K, listener: L) -> Subscription {
        let id = {
            let mut inner = locked(&self.inner);
            let id = inner.next_id;
            inner.next_id += 1;
            inner
                .by_key
                .entry(key.clone())
                .or_default()
                .push(Registered { id, listener });
            id
        };

        let weak: Weak<Mutex<Partitions<K, L>>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                let mut inner = locked(&inner);
                if let Some(partition) = inner.by_key.get_mut(&key) {
                    partition.retain(|entry| entry.id != id);
                }
            }
        })
    }

    /// Clones the listeners registered under `key`, in registration order.
    /// The registry lock is released before this returns, so callers invoke
    /// the listeners without holding anything.
    pub fn snapshot_for(&self, key: &K) -> Vec<L> {
        locked(&self.inner)
            .by_key
            .get(key)
            .map(|partition| partition.iter().map(|entry| entry.listener.clone()).collect())
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub fn len_for(&self, key: &K) -> usize {
        locked(&self.inner)
            .by_key
            .get(key)
            .map_or(0, |partition| partition.len())
    }
}

impl<K, L> Default for ListenerSet<K, L>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    L: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned by every live registration. Dropping it does nothing;
/// deregistration is always an explicit call, mirroring the unsubscribe
/// functions handed out by the cloud SDK.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Subscription {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Deregisters the listener. The handle is consumed.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_snapshot_and_unsubscribe() {
        let set: ListenerSet<String, u32> = ListenerSet::new();
        let sub_a = set.insert("u1".to_string(), 1);
        let _sub_b = set.insert("u1".to_string(), 2);
        let _sub_c = set.insert("u2".to_string(), 3);

        assert_eq!(set.snapshot_for(&"u1".to_string()), vec![1, 2]);
        assert_eq!(set.snapshot_for(&"u2".to_string()), vec![3]);
        assert_eq!(set.snapshot_for(&"u3".to_string()), Vec::<u32>::new());

        sub_a.unsubscribe();
        assert_eq!(set.snapshot_for(&"u1".to_string()), vec![2]);
        assert_eq!(set.len_for(&"u2".to_string()), 1);
    }

    #[test]
    fn registration_order_is_preserved() {
        let set: ListenerSet<String, u32> = ListenerSet::new();
        for n in 0..8 {
            let _ = set.insert("u1".to_string(), n);
        }
        assert_eq!(
            set.snapshot_for(&"u1".to_string()),
            (0..8).collect::<Vec<_>>()
        );
    }
}
