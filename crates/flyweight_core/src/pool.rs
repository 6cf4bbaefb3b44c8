//! # Flyweight Pool
//!
//! Deduplicating pool that maps each canonical key to exactly one shared
//! flyweight.
//!
//! ## Invariants
//!
//! - Equal intrinsic states always return the *same* `Arc` (`Arc::ptr_eq`)
//! - The pool grows by at most one entry per request and never shrinks
//! - Lookup is a single hash probe on the canonical key

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::flyweight::Flyweight;
use crate::key::FlyweightKey;
use crate::state::IntrinsicState;

/// Whether a request was served from the pool or created a new flyweight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lookup {
    /// An existing flyweight was reused.
    Hit,
    /// A new flyweight was created and stored.
    Miss,
}

/// Counters describing pool traffic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Requests served by an existing flyweight.
    pub hits: u64,
    /// Requests that created a flyweight.
    pub misses: u64,
    /// Distinct flyweights currently held.
    pub len: usize,
}

impl PoolStats {
    /// Total requests seen.
    #[inline]
    #[must_use]
    pub const fn requests(&self) -> u64 {
        self.hits + self.misses
    }
}

/// A pool of shared flyweights.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. Use [`crate::SharedFlyweightPool`] when
/// several threads need the same pool.
///
/// # Example
///
/// ```rust
/// use flyweight_core::{FieldSet, FlyweightPool};
/// use std::sync::Arc;
///
/// let mut pool = FlyweightPool::new();
/// let a = pool.get_or_create(FieldSet::new(["BMW", "M5", "red"])?);
/// let b = pool.get_or_create(FieldSet::new(["red", "M5", "BMW"])?);
///
/// assert!(Arc::ptr_eq(&a, &b));
/// assert_eq!(pool.len(), 1);
/// # Ok::<(), flyweight_core::FlyweightError>(())
/// ```
pub struct FlyweightPool<S> {
    /// Key -> shared flyweight.
    flyweights: HashMap<FlyweightKey, Arc<Flyweight<S>>>,
    /// Keys in the order they entered the pool.
    order: Vec<FlyweightKey>,
    /// Requests served from the pool.
    hits: u64,
    /// Requests that created a flyweight.
    misses: u64,
}

impl<S> Default for FlyweightPool<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> FlyweightPool<S> {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty pool with room for `capacity` distinct states.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            flyweights: HashMap::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the number of distinct flyweights.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no flyweight has been created yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Looks up a flyweight by key without creating one.
    #[inline]
    #[must_use]
    pub fn get(&self, key: &FlyweightKey) -> Option<Arc<Flyweight<S>>> {
        self.flyweights.get(key).cloned()
    }

    /// Returns true if a flyweight exists for `key`.
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &FlyweightKey) -> bool {
        self.flyweights.contains_key(key)
    }

    /// Lists the keys currently in the pool, oldest first.
    ///
    /// Diagnostic only: the order is insertion order.
    #[must_use]
    pub fn list_flyweights(&self) -> Vec<FlyweightKey> {
        self.order.clone()
    }

    /// Returns a printable listing of the pool contents.
    #[must_use]
    pub fn listing(&self) -> PoolListing {
        PoolListing {
            keys: self.list_flyweights(),
        }
    }

    /// Iterates over the flyweights, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Flyweight<S>>> {
        self.order.iter().filter_map(|key| self.flyweights.get(key))
    }

    /// Returns hit/miss counters and the current size.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            hits: self.hits,
            misses: self.misses,
            len: self.len(),
        }
    }
}

impl<S: IntrinsicState> FlyweightPool<S> {
    /// Creates a pool pre-populated with `states`.
    ///
    /// Repeated states collapse into one flyweight.
    #[must_use]
    pub fn with_initial<I>(states: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        let states = states.into_iter();
        let mut pool = Self::with_capacity(states.size_hint().0);
        pool.prepopulate(states);
        pool
    }

    /// Eagerly creates flyweights for `states`.
    ///
    /// Pre-population does not count towards hit/miss statistics.
    pub fn prepopulate<I>(&mut self, states: I)
    where
        I: IntoIterator<Item = S>,
    {
        for state in states {
            let key = state.canonical_key();
            if let Entry::Vacant(slot) = self.flyweights.entry(key) {
                self.order.push(slot.key().clone());
                slot.insert(Arc::new(Flyweight::new(state)));
            }
        }
        tracing::debug!(len = self.len(), "flyweight pool pre-populated");
    }

    /// Returns the flyweight for `state`, creating it on first request.
    ///
    /// This is a single hash probe; on a hit `state` is dropped and the
    /// stored flyweight is returned unchanged.
    pub fn get_or_create(&mut self, state: S) -> Arc<Flyweight<S>> {
        self.get_or_create_with_outcome(state).0
    }

    /// Like [`get_or_create`](Self::get_or_create), also reporting whether
    /// the flyweight already existed.
    pub fn get_or_create_with_outcome(&mut self, state: S) -> (Arc<Flyweight<S>>, Lookup) {
        let key = state.canonical_key();

        match self.flyweights.entry(key) {
            Entry::Occupied(slot) => {
                self.hits += 1;
                tracing::debug!(key = %slot.key(), "reusing existing flyweight");
                (Arc::clone(slot.get()), Lookup::Hit)
            }
            Entry::Vacant(slot) => {
                self.misses += 1;
                tracing::debug!(key = %slot.key(), "creating new flyweight");
                self.order.push(slot.key().clone());
                let flyweight = Arc::new(Flyweight::new(state));
                (Arc::clone(slot.insert(flyweight)), Lookup::Miss)
            }
        }
    }
}

impl<S> fmt::Debug for FlyweightPool<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlyweightPool")
            .field("keys", &self.order)
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish()
    }
}

/// Snapshot of the keys in a pool, printable as a report.
///
/// ```text
/// I have 2 flyweights:
/// BMW_M5_red
/// BMW_X6_white
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolListing {
    keys: Vec<FlyweightKey>,
}

impl PoolListing {
    /// The listed keys, oldest first.
    #[must_use]
    pub fn keys(&self) -> &[FlyweightKey] {
        &self.keys
    }
}

impl fmt::Display for PoolListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I have {} flyweights:", self.keys.len())?;
        for key in &self.keys {
            write!(f, "\n{key}")?;
        }
        Ok(())
    }
}
