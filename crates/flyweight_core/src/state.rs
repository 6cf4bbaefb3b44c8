//! # Intrinsic and Extrinsic State
//!
//! Intrinsic state is the part of an entity that many logical instances
//! share. It is immutable and identified by its [`FlyweightKey`].
//! Extrinsic state is unique per instance and only ever passed in as a
//! parameter of an [`Operation`].

use std::fmt;

use crate::error::{FlyweightError, FlyweightResult};
use crate::key::FlyweightKey;

/// A value that can be shared through a flyweight pool.
///
/// Two states with equal keys are the same flyweight. Implementors must
/// derive the key purely from their own fields.
pub trait IntrinsicState {
    /// Returns the canonical key of this state.
    fn canonical_key(&self) -> FlyweightKey;
}

/// Combines stored intrinsic state with caller-supplied extrinsic state.
///
/// Implementations must be pure: the result depends only on `self` and
/// `extrinsic`, and nothing of `extrinsic` is retained.
pub trait Operation<E: ?Sized> {
    /// What the operation produces.
    type Output;

    /// Runs the operation for one logical instance.
    fn operation(&self, extrinsic: &E) -> Self::Output;
}

/// An unordered set of string fields used as intrinsic state.
///
/// Field order carries no meaning: `["BMW", "M5", "red"]` and
/// `["red", "M5", "BMW"]` are the same state. The fields keep the order
/// they were given in for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSet {
    fields: Vec<String>,
}

impl FieldSet {
    /// Creates a field set.
    ///
    /// # Errors
    ///
    /// Returns [`FlyweightError::InvalidIntrinsicState`] if there are no
    /// fields or a field is empty or blank.
    pub fn new<I, T>(fields: I) -> FlyweightResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();

        if fields.is_empty() {
            return Err(FlyweightError::invalid_state("field set is empty"));
        }
        if let Some(index) = fields.iter().position(|f| f.trim().is_empty()) {
            return Err(FlyweightError::invalid_state(format!(
                "field {index} is blank"
            )));
        }

        Ok(Self { fields })
    }

    /// Returns the fields in the order they were given.
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns the number of fields.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false: empty field sets are rejected at construction.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl IntrinsicState for FieldSet {
    fn canonical_key(&self) -> FlyweightKey {
        FlyweightKey::from_unordered(&self.fields)
    }
}

impl fmt::Display for FieldSet {
    /// Renders as a quoted list: `["BMW", "M5", "red"]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field:?}")?;
        }
        f.write_str("]")
    }
}
