//! Change subscriptions.
//!
//! A store keeps one [`Watchers`] registry per value it persists. Every
//! successful write notifies all live subscribers with the new value.
//! Subscriptions end when their [`WatchHandle`] is dropped or unsubscribed.

use std::sync::{Arc, Mutex, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Registry<T: ?Sized> {
    next_id: u64,
    callbacks: Vec<(u64, Callback<T>)>,
}

/// Subscriber registry for values of type `T`.
pub struct Watchers<T: ?Sized> {
    inner: Arc<Mutex<Registry<T>>>,
}

impl<T: ?Sized> Default for Watchers<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Registry {
                next_id: 0,
                callbacks: Vec::new(),
            })),
        }
    }
}

impl<T: ?Sized + 'static> Watchers<T> {
    /// Register `callback`; it runs after every write until the handle goes away.
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> WatchHandle {
        let id = match self.inner.lock() {
            Ok(mut registry) => {
                let id = registry.next_id;
                registry.next_id += 1;
                registry.callbacks.push((id, Arc::new(callback)));
                id
            }
            Err(error) => {
                tracing::warn!(%error, "watch registry poisoned; subscription ignored");
                return WatchHandle::detached();
            }
        };

        let weak: Weak<Mutex<Registry<T>>> = Arc::downgrade(&self.inner);
        WatchHandle {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade()
                    && let Ok(mut registry) = inner.lock()
                {
                    registry.callbacks.retain(|(cid, _)| *cid != id);
                }
            })),
        }
    }

    /// Call every live subscriber with `value`.
    ///
    /// Callbacks run outside the registry lock, so a callback may subscribe
    /// or unsubscribe without deadlocking.
    pub fn notify(&self, value: &T) {
        let callbacks: Vec<Callback<T>> = match self.inner.lock() {
            Ok(registry) => registry.callbacks.iter().map(|(_, cb)| Arc::clone(cb)).collect(),
            Err(error) => {
                tracing::warn!(%error, "watch registry poisoned; notification skipped");
                return;
            }
        };
        for callback in callbacks {
            callback(value);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().map_or(0, |r| r.callbacks.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Live subscription. Dropping it stops notifications.
#[must_use = "dropping a WatchHandle unsubscribes immediately"]
pub struct WatchHandle {
    unsubscribe: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl WatchHandle {
    const fn detached() -> Self {
        Self { unsubscribe: None }
    }

    /// Stop notifications now.
    pub fn unsubscribe(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl std::fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchHandle")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
