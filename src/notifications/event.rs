// SPDX-License-Identifier: MPL-2.0
//! Events exchanged between the toaster and its containers.

use super::container::ContainerRef;
use super::content::ToastContent;
use super::id::{ContainerId, ToastId};
use super::options::ToastOptions;
use crate::event::{BusEvent, EventBus};

/// Event kinds, used as bus subscription keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Show,
    Clear,
    ClearWaitingQueue,
    DidMount,
    WillUnmount,
    Change,
}

#[derive(Debug, Clone)]
pub enum Event {
    /// Build a toast. `options.toast_id` is always set.
    Show {
        content: ToastContent,
        options: ToastOptions,
    },
    /// Remove one toast, or every toast when `None`.
    Clear(Option<ToastId>),
    /// Drop queued toasts of the matching container, or of all when `None`.
    ClearWaitingQueue(Option<ContainerId>),
    DidMount(ContainerRef),
    WillUnmount(ContainerRef),
    /// A container's live-set size changed.
    Change {
        count: usize,
        container_id: Option<ContainerId>,
    },
}

impl BusEvent for Event {
    type Kind = EventKind;

    fn kind(&self) -> EventKind {
        match self {
            Event::Show { .. } => EventKind::Show,
            Event::Clear(_) => EventKind::Clear,
            Event::ClearWaitingQueue(_) => EventKind::ClearWaitingQueue,
            Event::DidMount(_) => EventKind::DidMount,
            Event::WillUnmount(_) => EventKind::WillUnmount,
            Event::Change { .. } => EventKind::Change,
        }
    }
}

/// The bus toasters and containers share.
pub type ToastBus = EventBus<Event>;
