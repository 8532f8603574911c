#![forbid(unsafe_code)]

//! Change-tracked value containers.
//!
//! # Design
//!
//! [`Property<T>`] is a shared handle (`Rc<RefCell<..>>`) over a value, a
//! version counter, and a lazily-allocated change [`Notifier`]. The notifier
//! is only created on the first call to [`changed`](Property::changed), so a
//! property nobody observes costs one allocation and an equality check per
//! write.
//!
//! # Invariants
//!
//! 1. `set` with a value equal to the current one (exact `PartialEq`) is a
//!    no-op: no store, no version bump, no notification.
//! 2. On change the value is stored **before** subscribers run, so `get()`
//!    inside a callback observes the new value. This holds transitively
//!    across binding cascades.
//! 3. `version` increments exactly once per value-changing `set`.
//! 4. `get` and `with` never fail; `set` fails only if a subscriber in its
//!    cascade fails.
//!
//! Equality is whatever the value type's `PartialEq` says: no NaN handling,
//! no approximate comparison. A `Property<f64>` holding NaN therefore
//! notifies on every write, since NaN never equals itself.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::NotifyError;
use crate::notifier::{Notifier, Subscription};

struct PropertyInner<T> {
    value: T,
    version: u64,
    changed: Option<Notifier<T>>,
}

/// A mutable value container with equality-suppressed change notification.
///
/// Cloning a `Property` creates a new handle to the **same** value; owner
/// types hold `Property` fields directly and hand out handle clones.
pub struct Property<T> {
    inner: Rc<RefCell<PropertyInner<T>>>,
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Property")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("observed", &inner.changed.is_some())
            .finish()
    }
}

impl<T> Property<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(PropertyInner {
                value,
                version: 0,
                changed: None,
            })),
        }
    }

    /// Access the current value by reference without cloning.
    ///
    /// # Panics
    ///
    /// Panics if the closure calls `set` on the same property (re-entrant
    /// borrow).
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Number of value-changing writes so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Whether anyone has asked for the change notifier yet.
    #[must_use]
    pub fn is_observed(&self) -> bool {
        self.inner.borrow().changed.is_some()
    }
}

impl<T: Clone> Property<T> {
    /// Current value (cloned). Never fails.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }
}

impl<T: Clone + PartialEq + 'static> Property<T> {
    /// Store a new value and notify subscribers, unless it equals the
    /// current value, in which case nothing happens at all.
    ///
    /// The borrow on the inner cell is released before delivery, so
    /// subscribers may freely call `get`, `set`, or `changed` on this
    /// property. Fails only if a subscriber somewhere in the cascade fails.
    pub fn set(&self, value: T) -> Result<(), NotifyError> {
        let notifier = {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return Ok(());
            }
            inner.value = value.clone();
            inner.version += 1;
            inner.changed.clone()
        };
        match notifier {
            Some(notifier) => notifier.notify(&value),
            None => Ok(()),
        }
    }

    /// The change notifier for this property, allocated on first call.
    ///
    /// Subsequent calls return handles to the same notifier.
    #[must_use]
    pub fn changed(&self) -> Notifier<T> {
        let mut inner = self.inner.borrow_mut();
        inner.changed.get_or_insert_with(Notifier::new).clone()
    }

    /// Shorthand for `changed().subscribe(..)`.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.changed().subscribe(callback)
    }
}
