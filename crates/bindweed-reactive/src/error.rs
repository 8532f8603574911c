#![forbid(unsafe_code)]

//! Error types for notification delivery.
//!
//! Delivery inside a notify pass is all-or-nothing per subscriber, never per
//! pass: one subscriber failing does not stop delivery to the rest. The
//! failures that did occur are collected into a [`NotifyError`] and returned
//! to whoever triggered the pass, with nested cascades flattened in delivery
//! order.

use thiserror::Error;

use crate::notifier::SubscriptionId;

/// A bound receiver's owner was dropped while its subscription was live.
///
/// This is a logic error in the caller's lifecycle management: the binding
/// should have been torn down (by dropping its handle) before the receiver.
/// It is surfaced on every occurrence rather than auto-unsubscribing, so the
/// bug stays visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("binding target was dropped while still subscribed")]
pub struct DanglingTarget;

/// Failure produced by a single subscriber invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscriberError {
    /// The subscriber's weak receiver could not be upgraded.
    #[error(transparent)]
    Dangling(#[from] DanglingTarget),
    /// The subscriber triggered a nested notify pass that itself failed.
    #[error("nested notify failed: {0}")]
    Cascade(#[from] NotifyError),
}

/// Aggregate failure of one notify pass.
///
/// `dangling` holds the subscriptions whose receiver was gone, in delivery
/// order. Ids from nested cascades are flattened into the same list; ids are
/// only unique per notifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} subscriber(s) hit a dangling binding target during notify", dangling.len())]
pub struct NotifyError {
    pub dangling: Vec<SubscriptionId>,
}
