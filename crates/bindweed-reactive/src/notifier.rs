#![forbid(unsafe_code)]

//! Ordered publish/subscribe with reentrancy-safe delivery.
//!
//! # Design
//!
//! A [`Notifier<T>`] holds its subscribers in registration order. Delivery
//! works off a snapshot of the entries taken at the start of the pass:
//! callbacks are free to subscribe, unsubscribe, or trigger nested notify
//! passes on the same notifier without corrupting the iteration.
//!
//! - Subscriptions added during a pass are **not** invoked in that pass.
//! - Entries removed during a pass are re-checked before each invocation
//!   and skipped if gone.
//!
//! # Failure modes
//!
//! A subscriber reporting [`DanglingTarget`](crate::DanglingTarget) does not
//! stop delivery to later subscribers; the failing subscription ids are
//! collected into the returned [`NotifyError`]. Subscriber panics are not
//! caught and unwind through `notify`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{NotifyError, SubscriberError};

/// Identifies one subscriber registration within a single [`Notifier`].
///
/// Ids are allocated from a per-notifier counter and never reused; two
/// different notifiers may hand out the same numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type Callback<T> = Rc<dyn Fn(&T) -> Result<(), SubscriberError>>;

struct Entry<T> {
    id: SubscriptionId,
    callback: Callback<T>,
}

struct NotifierInner<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

/// Publish/subscribe primitive parameterized by a value type.
///
/// Cloning a `Notifier` creates a new handle to the **same** subscriber
/// list. Typically obtained from [`Property::changed`](crate::Property::changed)
/// rather than constructed directly.
pub struct Notifier<T> {
    inner: Rc<RefCell<NotifierInner<T>>>,
}

impl<T> Clone for Notifier<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Default for Notifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Notifier<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.len())
            .finish()
    }
}

impl<T> Notifier<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(NotifierInner {
                entries: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Number of currently registered subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    /// Remove a registration. No-op if the id was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.borrow_mut().entries.retain(|e| e.id != id);
    }
}

impl<T: 'static> Notifier<T> {
    /// Register an infallible callback. Returns an RAII guard that
    /// unsubscribes on drop.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.subscribe_fallible(move |value| {
            callback(value);
            Ok(())
        })
    }

    /// Register a callback that may fail, e.g. a weak binding adapter built
    /// with [`weak_setter`](crate::weak_setter).
    pub fn subscribe_fallible(
        &self,
        callback: impl Fn(&T) -> Result<(), SubscriberError> + 'static,
    ) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = SubscriptionId(inner.next_id);
            inner.next_id += 1;
            inner.entries.push(Entry {
                id,
                callback: Rc::new(callback),
            });
            id
        };
        let weak = Rc::downgrade(&self.inner);
        Subscription {
            id,
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().entries.retain(|e| e.id != id);
                }
            })),
        }
    }

    /// Invoke every currently-registered callback in subscription order.
    ///
    /// Delivery is attempted for all subscribers even if earlier ones fail;
    /// failures are aggregated into the returned [`NotifyError`], with
    /// nested cascade failures flattened in delivery order.
    pub fn notify(&self, value: &T) -> Result<(), NotifyError> {
        // Snapshot the entry list so reentrant subscribe/unsubscribe cannot
        // invalidate the iteration. No borrow is held while callbacks run.
        let snapshot: Vec<(SubscriptionId, Callback<T>)> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|e| (e.id, Rc::clone(&e.callback)))
            .collect();

        let mut dangling = Vec::new();
        for (id, callback) in snapshot {
            let still_registered = self.inner.borrow().entries.iter().any(|e| e.id == id);
            if !still_registered {
                continue;
            }
            match callback(value) {
                Ok(()) => {}
                Err(SubscriberError::Dangling(_)) => {
                    tracing::warn!(
                        subscription = id.0,
                        "binding target dropped while still subscribed"
                    );
                    dangling.push(id);
                }
                Err(SubscriberError::Cascade(nested)) => {
                    dangling.extend(nested.dangling);
                }
            }
        }

        if dangling.is_empty() {
            Ok(())
        } else {
            Err(NotifyError { dangling })
        }
    }
}

/// RAII guard for one subscriber registration.
///
/// Dropping the guard removes the registration before the next notify pass.
/// Call [`forget`](Subscription::forget) to keep the registration alive for
/// the notifier's whole lifetime.
pub struct Subscription {
    id: SubscriptionId,
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// The id this guard controls, usable with [`Notifier::unsubscribe`].
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Remove the registration now instead of at drop time.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Consume the guard without unsubscribing.
    pub fn forget(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("live", &self.cancel.is_some())
            .finish()
    }
}
