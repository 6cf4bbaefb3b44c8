//! # Flyweight Core
//!
//! A deduplicating object pool built on intrinsic/extrinsic state
//! separation:
//! - One shared, immutable [`Flyweight`] per distinct intrinsic state
//! - Extrinsic state is passed to [`Operation`]s, never stored
//! - O(1) lookup on a canonical [`FlyweightKey`]
//!
//! ## Architecture Rules
//!
//! 1. **No global registry** - every pool is constructed and owned by its caller
//! 2. **Validation before pooling** - malformed state is rejected when it is
//!    built, so the pool has no failure modes
//! 3. **Reference identity** - equal states return the same `Arc`
//!
//! ## Example
//!
//! ```rust
//! use flyweight_core::{FieldSet, FlyweightPool};
//!
//! let mut pool = FlyweightPool::with_initial([
//!     FieldSet::new(["Chevrolet", "Camaro2018", "pink"])?,
//!     FieldSet::new(["BMW", "M5", "red"])?,
//! ]);
//!
//! pool.get_or_create(FieldSet::new(["BMW", "M5", "red"])?);
//! pool.get_or_create(FieldSet::new(["BMW", "X1", "red"])?);
//! assert_eq!(pool.list_flyweights().len(), 3);
//! # Ok::<(), flyweight_core::FlyweightError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod flyweight;
pub mod key;
pub mod pool;
pub mod state;
pub mod sync;

pub use error::{FlyweightError, FlyweightResult};
pub use flyweight::Flyweight;
pub use key::FlyweightKey;
pub use pool::{FlyweightPool, Lookup, PoolListing, PoolStats};
pub use state::{FieldSet, IntrinsicState, Operation};
pub use sync::SharedFlyweightPool;
