#![forbid(unsafe_code)]

//! Reactive change-tracking primitives for bindweed.
//!
//! This crate provides the building blocks that property bindings are made
//! of:
//!
//! - [`Property`]: a shared, version-tracked value container with
//!   equality-suppressed change notification.
//! - [`Notifier`]: an ordered publish/subscribe primitive with RAII
//!   [`Subscription`] guards, safe under reentrant mutation.
//! - [`weak_setter`] / [`weak_setter_filtered`]: subscriber adapters that
//!   hold their receiver weakly and report [`DanglingTarget`] when the
//!   receiver is gone.
//! - [`Computed`]: a lazily-evaluated, memoized value derived from one or
//!   more `Property` dependencies.
//!
//! # Architecture
//!
//! `Property<T>` and `Notifier<T>` use `Rc<RefCell<..>>` for single-threaded
//! shared ownership. Nothing here is `Send` or `Sync`; a property and its
//! notifier belong to one logical owner and all delivery happens
//! synchronously on the caller's stack, including across binding cascades.
//!
//! # Invariants
//!
//! 1. Setting a value equal to the current value is a no-op (no version
//!    bump, no notification).
//! 2. The new value is stored before subscribers run, so `get()` inside a
//!    callback observes the new value.
//! 3. Subscribers are notified in registration order.
//! 4. Subscriptions added during a notify pass are not invoked in that pass;
//!    removals of not-yet-visited entries are honored.
//! 5. A dangling binding target is reported, never silently skipped.

pub mod computed;
pub mod equality;
pub mod error;
pub mod notifier;
pub mod property;
pub mod subscriber;

pub use computed::Computed;
pub use equality::check_equality;
pub use error::{DanglingTarget, NotifyError, SubscriberError};
pub use notifier::{Notifier, Subscription, SubscriptionId};
pub use property::Property;
pub use subscriber::{weak_setter, weak_setter_filtered};
