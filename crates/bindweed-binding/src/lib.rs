#![forbid(unsafe_code)]

//! Property bindings for bindweed.
//!
//! A binding wires one property's change notifications into another owner's
//! setter, through a weak reference to the receiver. See [`bind`],
//! [`bind_filtered`], and [`bind_bidirectional`].
//!
//! # Invariants
//!
//! 1. Binding performs one synchronous initial sync before returning, so
//!    receiver and sender start out equal (modulo the filter).
//! 2. The binding never keeps the receiver alive; a receiver dropped while
//!    bound surfaces as a `DanglingTarget` failure on the next send.
//! 3. Dropping the [`BindingHandle`] tears the binding down.

pub mod bind;

pub use bind::{BindingHandle, bind, bind_bidirectional, bind_filtered};
