#![forbid(unsafe_code)]

//! Lazy derived values that auto-invalidate from [`Property`] dependencies.
//!
//! A [`Computed<T>`] caches the result of a compute function and subscribes
//! to its source properties to mark itself dirty on change. Recomputation is
//! deferred until the next read, so a burst of source writes costs one
//! recompute.
//!
//! The dirty-marking subscriptions hold the computed state weakly: dropping
//! every `Computed` handle leaves inert subscriptions behind that simply do
//! nothing. Conversely, if a source property is dropped the computed value
//! keeps its last cached result and never goes dirty from that source again.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::notifier::Subscription;
use crate::property::Property;

struct ComputedState<T> {
    compute: Box<dyn Fn() -> T>,
    cached: RefCell<Option<T>>,
    dirty: Cell<bool>,
    version: Cell<u64>,
    // Kept alive for the lifetime of the computed; dropping them would
    // disconnect dirty tracking.
    _subscriptions: RefCell<Vec<Subscription>>,
}

/// A lazily-evaluated, memoized value derived from one or more
/// [`Property`] dependencies.
///
/// Cloning a `Computed` creates a new handle to the same cached state.
pub struct Computed<T> {
    state: Rc<ComputedState<T>>,
}

impl<T> Clone for Computed<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Computed<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Computed")
            .field("cached", &self.state.cached.borrow())
            .field("dirty", &self.state.dirty.get())
            .field("version", &self.state.version.get())
            .finish()
    }
}

impl<T: 'static> Computed<T> {
    fn with_compute(compute: impl Fn() -> T + 'static) -> Self {
        Self {
            state: Rc::new(ComputedState {
                compute: Box::new(compute),
                cached: RefCell::new(None),
                dirty: Cell::new(true),
                version: Cell::new(0),
                _subscriptions: RefCell::new(Vec::new()),
            }),
        }
    }

    fn track<S: Clone + PartialEq + 'static>(&self, source: &Property<S>) {
        let weak = Rc::downgrade(&self.state);
        let sub = source.subscribe(move |_| {
            if let Some(state) = weak.upgrade() {
                state.dirty.set(true);
            }
        });
        self.state._subscriptions.borrow_mut().push(sub);
    }

    /// Derive from a single property.
    pub fn from_property<S: Clone + PartialEq + 'static>(
        source: &Property<S>,
        map: impl Fn(&S) -> T + 'static,
    ) -> Self {
        let handle = source.clone();
        let computed = Self::with_compute(move || handle.with(|v| map(v)));
        computed.track(source);
        computed
    }

    /// Derive from two properties.
    pub fn from2<S1, S2>(
        first: &Property<S1>,
        second: &Property<S2>,
        map: impl Fn(&S1, &S2) -> T + 'static,
    ) -> Self
    where
        S1: Clone + PartialEq + 'static,
        S2: Clone + PartialEq + 'static,
    {
        let h1 = first.clone();
        let h2 = second.clone();
        let computed = Self::with_compute(move || h1.with(|a| h2.with(|b| map(a, b))));
        computed.track(first);
        computed.track(second);
        computed
    }

    /// Low-level constructor from a bare compute function and pre-built
    /// dirty-marking subscriptions. `invalidate` must be called manually if
    /// the subscriptions do not reach this computed's dirty flag.
    pub fn from_fn(compute: impl Fn() -> T + 'static, subscriptions: Vec<Subscription>) -> Self {
        let computed = Self::with_compute(compute);
        *computed.state._subscriptions.borrow_mut() = subscriptions;
        computed
    }

    fn refresh(&self) {
        if self.state.dirty.get() || self.state.cached.borrow().is_none() {
            // No borrow is held while computing, so the compute function may
            // read its sources (and even other computeds) freely.
            let value = (self.state.compute)();
            *self.state.cached.borrow_mut() = Some(value);
            self.state.dirty.set(false);
            self.state.version.set(self.state.version.get() + 1);
        }
    }

    /// Access the current value by reference, recomputing first if dirty.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.refresh();
        let cached = self.state.cached.borrow();
        f(cached.as_ref().expect("cached is Some after refresh"))
    }

    /// Whether the cached value is stale.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.state.dirty.get()
    }

    /// Force recomputation on the next read.
    pub fn invalidate(&self) {
        self.state.dirty.set(true);
    }

    /// Recomputation count.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.state.version.get()
    }
}

impl<T: Clone + 'static> Computed<T> {
    /// Current value (cloned), recomputing first if any dependency changed.
    #[must_use]
    pub fn get(&self) -> T {
        self.with(T::clone)
    }
}
