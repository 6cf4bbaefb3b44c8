//! # Flyweight
//!
//! The shared, immutable holder of one intrinsic state.

use crate::key::FlyweightKey;
use crate::state::{IntrinsicState, Operation};

/// One shared intrinsic state together with its canonical key.
///
/// A flyweight is built once by the pool and then handed out behind an
/// `Arc`. It has no setters and never stores extrinsic state.
#[derive(Debug)]
pub struct Flyweight<S> {
    /// Key the pool stores this flyweight under.
    key: FlyweightKey,
    /// The shared state.
    state: S,
}

impl<S: IntrinsicState> Flyweight<S> {
    /// Wraps a state, deriving its key.
    #[must_use]
    pub fn new(state: S) -> Self {
        Self {
            key: state.canonical_key(),
            state,
        }
    }
}

impl<S> Flyweight<S> {
    /// Returns the canonical key.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &FlyweightKey {
        &self.key
    }

    /// Returns the shared intrinsic state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Runs the state's operation with per-instance extrinsic state.
    #[inline]
    pub fn operation<E: ?Sized>(&self, extrinsic: &E) -> S::Output
    where
        S: Operation<E>,
    {
        self.state.operation(extrinsic)
    }
}
