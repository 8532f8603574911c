#![forbid(unsafe_code)]

//! Binding construction.
//!
//! # Design
//!
//! [`bind`] composes the reactive primitives: it installs a weak subscriber
//! adapter on the sender property's change notifier and then performs one
//! immediate synchronous sync of the receiver, so both sides agree before
//! the call returns. The receiver is held weakly; once its owner is gone,
//! every further send reports `DanglingTarget` through the sender's
//! [`NotifyError`]. The failure repeats on every pass until the binding is
//! torn down, keeping the lifecycle bug visible.
//!
//! [`bind_bidirectional`] is exactly two unidirectional binds, A←B then
//! B←A. The second bind's initial sync re-applies the shared value to B
//! through B's setter (a redundant write, suppressed at the property level
//! but visible to side-effectful setters). That composition, including the
//! redundant write, is part of the observable contract.

use std::rc::Rc;

use bindweed_reactive::error::NotifyError;
use bindweed_reactive::notifier::{Subscription, SubscriptionId};
use bindweed_reactive::property::Property;
use bindweed_reactive::subscriber::{weak_setter, weak_setter_filtered};

/// Owns one installed binding.
///
/// Dropping the handle tears the binding down; [`forget`](Self::forget)
/// leaves the binding in place for the sender's lifetime.
pub struct BindingHandle {
    subscription: Subscription,
}

impl BindingHandle {
    /// The subscription id inside the sender's notifier. Dangling reports in
    /// a [`NotifyError`] carry this id.
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.subscription.id()
    }

    /// Tear the binding down now.
    pub fn unbind(self) {
        self.subscription.cancel();
    }

    /// Consume the handle, leaving the binding installed.
    pub fn forget(self) {
        self.subscription.forget();
    }
}

impl std::fmt::Debug for BindingHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingHandle")
            .field("subscription", &self.subscription)
            .finish()
    }
}

/// Bind `sender`'s changes into `setter` on a weakly-held `receiver`.
///
/// The receiver is synchronized to the sender's current value once,
/// synchronously, before this returns. The returned handle tears the
/// binding down on drop.
///
/// Fails if the initial sync itself triggers a failing cascade.
pub fn bind<O, T>(
    receiver: &Rc<O>,
    setter: impl Fn(&O, &T) -> Result<(), NotifyError> + 'static,
    sender: &Property<T>,
) -> Result<BindingHandle, NotifyError>
where
    O: 'static,
    T: Clone + PartialEq + 'static,
{
    let setter = Rc::new(setter);
    let adapter = {
        let setter = Rc::clone(&setter);
        weak_setter(receiver, move |owner: &O, value: &T| setter(owner, value))
    };
    let subscription = sender.changed().subscribe_fallible(adapter);
    tracing::trace!(subscription = %subscription.id(), "binding installed");

    // Initial sync. The sender value is cloned out first so a cascade from
    // the setter cannot collide with a live borrow of the sender.
    let current = sender.get();
    setter(receiver.as_ref(), &current)?;

    Ok(BindingHandle { subscription })
}

/// Like [`bind`], with a pure transform applied while propagating.
///
/// Both the initial sync and every subsequent delivery pass the sender value
/// through `filter` before it reaches the setter.
pub fn bind_filtered<O, S, R>(
    receiver: &Rc<O>,
    setter: impl Fn(&O, R) -> Result<(), NotifyError> + 'static,
    sender: &Property<S>,
    filter: impl Fn(&S) -> R + 'static,
) -> Result<BindingHandle, NotifyError>
where
    O: 'static,
    S: Clone + PartialEq + 'static,
    R: 'static,
{
    let setter = Rc::new(setter);
    let filter = Rc::new(filter);
    let adapter = {
        let setter = Rc::clone(&setter);
        let filter = Rc::clone(&filter);
        weak_setter_filtered(
            receiver,
            move |owner: &O, value: R| setter(owner, value),
            move |value: &S| filter(value),
        )
    };
    let subscription = sender.changed().subscribe_fallible(adapter);
    tracing::trace!(subscription = %subscription.id(), "filtered binding installed");

    let current = sender.get();
    setter(receiver.as_ref(), filter(&current))?;

    Ok(BindingHandle { subscription })
}

/// Bind two properties to each other so a change on either side updates the
/// other.
///
/// Composed as two unidirectional binds, A←B first, then B←A. After setup
/// both sides hold B's original value; B's setter receives one redundant
/// write of that value during the second initial sync. Setter side effects
/// are not deduplicated.
pub fn bind_bidirectional<A, B, T>(
    a: &Rc<A>,
    property_a: impl Fn(&A) -> Property<T>,
    setter_a: impl Fn(&A, &T) -> Result<(), NotifyError> + 'static,
    b: &Rc<B>,
    property_b: impl Fn(&B) -> Property<T>,
    setter_b: impl Fn(&B, &T) -> Result<(), NotifyError> + 'static,
) -> Result<(BindingHandle, BindingHandle), NotifyError>
where
    A: 'static,
    B: 'static,
    T: Clone + PartialEq + 'static,
{
    let a_from_b = bind(a, setter_a, &property_b(b.as_ref()))?;
    let b_from_a = bind(b, setter_b, &property_a(a.as_ref()))?;
    Ok((a_from_b, b_from_a))
}
