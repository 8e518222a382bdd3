//! `PropertySet` for pass communication.
//!
//! Passes share data through a [`PropertySet`]: the target profile the
//! circuit is compiled for, the violations found by the last constraint
//! check, and any typed custom property a pass chooses to publish.
//!
//! # Example
//!
//! ```
//! use quantra_compile::PropertySet;
//! use quantra_hal::BackendConstraints;
//!
//! #[derive(Debug, PartialEq)]
//! struct Note(&'static str);
//!
//! let mut props = PropertySet::new().with_target(BackendConstraints::ionq_simulator());
//! props.insert(Note("seen"));
//!
//! assert_eq!(props.target.as_ref().unwrap().max_qubits, 29);
//! assert_eq!(props.get::<Note>(), Some(&Note("seen")));
//! ```

use rustc_hash::FxHashMap;
use std::any::{Any, TypeId};

use quantra_hal::BackendConstraints;

use crate::validation::ValidationError;

/// Counters published by the legalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LegalizationStats {
    /// Gates rewritten into a fully supported sequence.
    pub decomposed: usize,
    /// Gates rewritten into a sequence that still has unsupported gates.
    pub partial: usize,
    /// Gates emitted in place of both.
    pub emitted: usize,
}

/// Properties shared between passes.
#[derive(Debug, Default)]
pub struct PropertySet {
    /// Profile the circuit is compiled for.
    pub target: Option<BackendConstraints>,

    /// Violations left after the last constraint check.
    pub violations: Vec<ValidationError>,

    /// Custom properties storage (type-erased).
    custom: FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl PropertySet {
    /// Create a new empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target profile.
    #[must_use]
    pub fn with_target(mut self, target: BackendConstraints) -> Self {
        self.target = Some(target);
        self
    }

    /// Insert a custom property, replacing any previous value of the same type.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) {
        self.custom.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Get a custom property.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.custom
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref())
    }

    /// Get a mutable custom property.
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.custom
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut())
    }

    /// Remove a custom property.
    pub fn remove<T: Any>(&mut self) -> Option<T> {
        self.custom
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast().ok())
            .map(|v| *v)
    }
}
