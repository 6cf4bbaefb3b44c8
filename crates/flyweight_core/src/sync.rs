//! # Shared Pool
//!
//! A [`FlyweightPool`] behind a `parking_lot::Mutex` for callers on several
//! threads.
//!
//! The check-then-insert sequence of `get_or_create` runs inside one
//! critical section, so two threads racing on the same key can never both
//! create a flyweight.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::flyweight::Flyweight;
use crate::key::FlyweightKey;
use crate::pool::{FlyweightPool, Lookup, PoolListing, PoolStats};
use crate::state::IntrinsicState;

/// Cloneable, thread-safe handle to one flyweight pool.
///
/// Clones share the same underlying pool.
pub struct SharedFlyweightPool<S> {
    inner: Arc<Mutex<FlyweightPool<S>>>,
}

impl<S> Clone for SharedFlyweightPool<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> Default for SharedFlyweightPool<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> From<FlyweightPool<S>> for SharedFlyweightPool<S> {
    fn from(pool: FlyweightPool<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pool)),
        }
    }
}

impl<S> SharedFlyweightPool<S> {
    /// Creates an empty shared pool.
    #[must_use]
    pub fn new() -> Self {
        FlyweightPool::new().into()
    }

    /// Returns the number of distinct flyweights.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if the pool holds no flyweight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Looks up a flyweight by key without creating one.
    #[must_use]
    pub fn get(&self, key: &FlyweightKey) -> Option<Arc<Flyweight<S>>> {
        self.inner.lock().get(key)
    }

    /// Lists the keys currently in the pool, oldest first.
    #[must_use]
    pub fn list_flyweights(&self) -> Vec<FlyweightKey> {
        self.inner.lock().list_flyweights()
    }

    /// Returns a printable listing of the pool contents.
    #[must_use]
    pub fn listing(&self) -> PoolListing {
        self.inner.lock().listing()
    }

    /// Returns hit/miss counters and the current size.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        self.inner.lock().stats()
    }
}

impl<S: IntrinsicState> SharedFlyweightPool<S> {
    /// Returns the flyweight for `state`, creating it on first request.
    pub fn get_or_create(&self, state: S) -> Arc<Flyweight<S>> {
        self.inner.lock().get_or_create(state)
    }

    /// Like [`get_or_create`](Self::get_or_create), also reporting whether
    /// the flyweight already existed.
    pub fn get_or_create_with_outcome(&self, state: S) -> (Arc<Flyweight<S>>, Lookup) {
        self.inner.lock().get_or_create_with_outcome(state)
    }
}
