// SPDX-License-Identifier: MPL-2.0
//! Deferred publish/subscribe event bus.
//!
//! Listeners are registered per event kind and invoked on a later scheduler
//! tick, never inline with [`EventBus::emit`]. Deliveries that have not run
//! yet can be cancelled per kind with [`EventBus::cancel_emit`], or one
//! emission at a time through the handles [`EventBus::emit_tracked`] returns.

mod bus;

pub use bus::{BusEvent, EventBus, Listener};
