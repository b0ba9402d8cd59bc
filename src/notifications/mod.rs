// SPDX-License-Identifier: MPL-2.0
//! Toast notification orchestration.
//!
//! - [`Toaster`]: the dispatch facade. It assigns ids and routes requests.
//! - [`ToastContainer`]: owns toasts, enforces its display limit with a
//!   waiting queue, runs auto-close timers and reports live-count changes.
//! - [`render::group_by_position`]: buckets live toasts for the view layer.
//!
//! Containers and the toaster talk only through a deferred [`ToastBus`]; all
//! deliveries, updates and timers run on the shared
//! [`Scheduler`](crate::scheduler::Scheduler).
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use toastkit::notifications::{ContainerProps, ToastOptions, Toaster};
//!
//! let toaster = Toaster::new();
//! let container = toaster.container(ContainerProps::default());
//! container.mount();
//!
//! // Requests made before the container is registered are buffered.
//! let id = toaster.success("Saved", ToastOptions::new().with_auto_close(Duration::from_secs(2)));
//! toaster.scheduler().run_pending();
//! assert!(toaster.is_active(&id));
//!
//! toaster.scheduler().advance(Duration::from_secs(2));
//! assert!(!toaster.is_active(&id));
//! ```

mod container;
mod content;
mod event;
mod id;
mod options;
pub mod render;
mod toaster;

pub use container::{BuildOutcome, ContainerKey, ContainerRef, Rejection, Toast, ToastContainer};
pub use content::{CloseHandle, ContentBuilder, ToastContent, ToastContext, ToastData, ToastElement};
pub use event::{Event, EventKind, ToastBus};
pub use id::{generate_id, ContainerId, Id, ToastId};
pub use options::{
    resolve, AutoClose, CloseButton, ContainerProps, Position, Theme, ToastHook, ToastOptions,
    ToastProps, ToastType, UpdateOptions,
};
pub use render::{group_by_position, Positioned, ToastGroup};
pub use toaster::Toaster;
