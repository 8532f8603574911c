#![forbid(unsafe_code)]

//! Weak subscriber adapters.
//!
//! A binding must not keep its receiver alive: the subscriber callback holds
//! the receiver through [`rc::Weak`](std::rc::Weak). When the owner is gone
//! at invocation time the adapter reports [`DanglingTarget`] instead of
//! touching freed state or silently dropping the update.

use std::rc::Rc;

use crate::error::{DanglingTarget, NotifyError, SubscriberError};

/// Build a notifier callback that forwards values to `setter` on a weakly
/// held owner.
///
/// Returns [`DanglingTarget`] when the owner has been dropped; setter
/// failures from nested notify cascades surface as
/// [`SubscriberError::Cascade`].
///
/// The adapter captures only a `Weak<O>`, never the borrow of the owner
/// handle, so it outlives the call site and satisfies the `'static` bound
/// of [`Notifier::subscribe_fallible`](crate::Notifier::subscribe_fallible).
pub fn weak_setter<O, T, F>(
    owner: &Rc<O>,
    setter: F,
) -> impl Fn(&T) -> Result<(), SubscriberError> + use<O, T, F>
where
    F: Fn(&O, &T) -> Result<(), NotifyError>,
{
    let owner = Rc::downgrade(owner);
    move |value: &T| {
        let target = owner.upgrade().ok_or(DanglingTarget)?;
        setter(&target, value).map_err(SubscriberError::Cascade)
    }
}

/// Like [`weak_setter`], with a pure transform applied to the value before
/// it reaches the setter.
pub fn weak_setter_filtered<O, S, R, F, M>(
    owner: &Rc<O>,
    setter: F,
    filter: M,
) -> impl Fn(&S) -> Result<(), SubscriberError> + use<O, S, R, F, M>
where
    F: Fn(&O, R) -> Result<(), NotifyError>,
    M: Fn(&S) -> R,
{
    let owner = Rc::downgrade(owner);
    move |value: &S| {
        let target = owner.upgrade().ok_or(DanglingTarget)?;
        setter(&target, filter(value)).map_err(SubscriberError::Cascade)
    }
}
