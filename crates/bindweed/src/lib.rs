#![forbid(unsafe_code)]

//! Public facade for bindweed.
//!
//! Re-exports the reactive primitives and binding functions from the member
//! crates. Most users want the [`prelude`].
//!
//! ```
//! use bindweed::prelude::*;
//! use std::rc::Rc;
//!
//! struct Sensor {
//!     degrees: Property<f64>,
//! }
//!
//! struct Readout {
//!     text: Property<String>,
//! }
//!
//! let sensor = Rc::new(Sensor { degrees: Property::new(20.0) });
//! let readout = Rc::new(Readout { text: Property::new(String::new()) });
//!
//! let _binding = bind_filtered(
//!     &readout,
//!     |r: &Readout, text: String| r.text.set(text),
//!     &sensor.degrees,
//!     |c: &f64| format!("{c} °C"),
//! )?;
//!
//! sensor.degrees.set(23.5)?;
//! assert_eq!(readout.text.get(), "23.5 °C");
//! # Ok::<(), bindweed::NotifyError>(())
//! ```

pub use bindweed_binding::{BindingHandle, bind, bind_bidirectional, bind_filtered};
pub use bindweed_reactive::{
    Computed, DanglingTarget, Notifier, NotifyError, Property, Subscription, SubscriberError,
    SubscriptionId, check_equality,
};

/// Everything needed for typical property-binding code.
pub mod prelude {
    pub use bindweed_binding::{BindingHandle, bind, bind_bidirectional, bind_filtered};
    pub use bindweed_reactive::{Computed, Notifier, NotifyError, Property, Subscription};
}
