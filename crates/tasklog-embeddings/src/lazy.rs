//! Lazily loaded, shared model slot.
//!
//! Each service object owns one [`LazyModel`]. The first caller starts the
//! load; callers arriving while it is in flight wait on the same load instead
//! of starting their own. A failed load leaves the slot empty, so the next
//! call retries from scratch.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::OnceCell;

/// Observable load state of a [`LazyModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Uninitialized,
    Loading,
    Ready,
}

/// A model handle that is loaded at most once per owner.
#[derive(Debug)]
pub struct LazyModel<T> {
    cell: OnceCell<T>,
    loading: AtomicBool,
}

impl<T> Default for LazyModel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LazyModel<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
            loading: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn state(&self) -> LoadState {
        if self.cell.initialized() {
            LoadState::Ready
        } else if self.loading.load(Ordering::Acquire) {
            LoadState::Loading
        } else {
            LoadState::Uninitialized
        }
    }

    /// The loaded model, if a load has already succeeded.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    /// Return the loaded model, running `load` if no load has succeeded yet.
    ///
    /// Concurrent callers coalesce onto a single in-flight `load`.
    ///
    /// # Errors
    ///
    /// Returns whatever `load` returns. The slot stays empty afterwards.
    pub async fn get_or_load<F, Fut, E>(&self, load: F) -> Result<&T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(model) = self.cell.get() {
            return Ok(model);
        }

        self.cell
            .get_or_try_init(|| async {
                let _guard = LoadingGuard::start(&self.loading);
                load().await
            })
            .await
    }
}

/// Clears the loading flag even if the load future is dropped mid-flight.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn start(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
