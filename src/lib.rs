// SPDX-License-Identifier: MPL-2.0
//! `toastkit` orchestrates toast notifications for a UI layer.
//!
//! Producers call a [`Toaster`](notifications::Toaster) to show, update and
//! dismiss toasts; one or more [`ToastContainer`](notifications::ToastContainer)s
//! receive those requests over a deferred event bus, enforce display limits
//! with a FIFO waiting queue and expose the live toasts grouped by position.
//! Everything runs on a single-threaded [`Scheduler`](scheduler::Scheduler)
//! with a virtual clock, which a tokio driver can advance in real time.

#![doc(html_root_url = "https://docs.rs/toastkit/0.3.0")]

pub mod config;
pub mod error;
pub mod event;
pub mod notifications;
pub mod scheduler;

pub use error::{Error, Result};
