// SPDX-License-Identifier: MPL-2.0
//! Dispatch facade.
//!
//! A [`Toaster`] is the orchestration context callers talk to: it assigns
//! toast ids, routes show/update/dismiss requests to mounted containers over
//! the shared bus, buffers requests made before any container is mounted and
//! keeps the registry of mounted containers.

use super::container::{ContainerKey, ContainerRef, Toast, ToastContainer};
use super::content::ToastContent;
use super::event::{Event, EventKind, ToastBus};
use super::id::{generate_id, resolve_id, ContainerId, Id, ToastId};
use super::options::{ContainerProps, ToastOptions, ToastType, UpdateOptions};
use crate::error::{Error, Result};
use crate::event::{EventBus, Listener};
use crate::scheduler::Scheduler;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, warn};

#[derive(Default)]
struct Registry {
    /// Mounted containers in registration order; the last one is the default
    /// target of id-less lookups.
    containers: Vec<(ContainerKey, ContainerRef)>,
    /// Show requests made while nothing was mounted.
    pending: Vec<(ToastContent, ToastOptions)>,
    /// Props of the container to mount on the first buffered request.
    lazy_props: Option<ContainerProps>,
    lazy_container: Option<ToastContainer>,
}

struct ToasterInner {
    scheduler: Rc<Scheduler>,
    bus: Rc<ToastBus>,
    registry: RefCell<Registry>,
}

/// Entry point for showing, updating and dismissing toasts.
///
/// Cloning is cheap; clones share the same registry, bus and scheduler.
///
/// # Usage
///
/// ```
/// use toastkit::notifications::{ContainerProps, ToastOptions, Toaster, UpdateOptions};
///
/// let toaster = Toaster::new();
/// let container = toaster.container(ContainerProps::default());
/// container.mount();
/// toaster.scheduler().run_pending();
///
/// let id = toaster.show("Uploading…", ToastOptions::new().loading(true));
/// toaster.update(id.clone(), UpdateOptions::new().render("Uploaded"));
/// toaster.scheduler().run_pending();
///
/// assert!(toaster.is_active(&id));
/// let toast = container.get_toast(&id).expect("live toast");
/// assert_eq!(toast.content.as_text(), Some("Uploaded"));
/// ```
#[derive(Clone)]
pub struct Toaster {
    inner: Rc<ToasterInner>,
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Toaster {
    /// Creates a toaster with its own scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::with_scheduler(Rc::new(Scheduler::new()))
    }

    /// Creates a toaster driven by an existing scheduler.
    #[must_use]
    pub fn with_scheduler(scheduler: Rc<Scheduler>) -> Self {
        let bus = Rc::new(EventBus::new(scheduler.clone()));
        let inner = Rc::new(ToasterInner {
            scheduler,
            bus,
            registry: RefCell::new(Registry::default()),
        });

        let weak = Rc::downgrade(&inner);
        let did_mount: Listener<Event> = {
            let weak = weak.clone();
            Rc::new(move |event: &Event| {
                if let (Event::DidMount(container), Some(toaster)) = (event, upgrade(&weak)) {
                    toaster.register(container);
                }
            })
        };
        let will_unmount: Listener<Event> = Rc::new(move |event: &Event| {
            if let (Event::WillUnmount(container), Some(toaster)) = (event, upgrade(&weak)) {
                toaster.deregister(container);
            }
        });
        inner
            .bus
            .on(EventKind::DidMount, did_mount)
            .on(EventKind::WillUnmount, will_unmount);

        Self { inner }
    }

    #[must_use]
    pub fn scheduler(&self) -> &Rc<Scheduler> {
        &self.inner.scheduler
    }

    #[must_use]
    pub fn bus(&self) -> &Rc<ToastBus> {
        &self.inner.bus
    }

    /// Creates an unmounted container attached to this toaster.
    #[must_use]
    pub fn container(&self, props: ContainerProps) -> ToastContainer {
        ToastContainer::new(self, props)
    }

    /// Requests a toast and returns its id.
    ///
    /// The id is final even when the toast is later rejected, queued or
    /// delayed. Content that turns out not to be renderable is reported by
    /// the container; use [`Toaster::try_show`] to fail early.
    pub fn show(&self, content: impl Into<ToastContent>, options: ToastOptions) -> ToastId {
        let mut options = options;
        let toast_id = resolve_id(&options);
        options.toast_id = Some(toast_id.clone());
        self.dispatch(content.into(), options);
        toast_id
    }

    /// Like [`Toaster::show`], but rejects non-renderable content up front.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidContent`] when `content` has no renderable shape.
    pub fn try_show(&self, content: impl Into<ToastContent>, options: ToastOptions) -> Result<ToastId> {
        let content = content.into();
        if !content.is_renderable() {
            return Err(Error::InvalidContent(format!("{content:?} cannot be rendered")));
        }
        Ok(self.show(content, options))
    }

    pub fn success(&self, content: impl Into<ToastContent>, options: ToastOptions) -> ToastId {
        self.show_typed(ToastType::Success, content.into(), options)
    }

    pub fn info(&self, content: impl Into<ToastContent>, options: ToastOptions) -> ToastId {
        self.show_typed(ToastType::Info, content.into(), options)
    }

    pub fn warning(&self, content: impl Into<ToastContent>, options: ToastOptions) -> ToastId {
        self.show_typed(ToastType::Warning, content.into(), options)
    }

    pub fn error(&self, content: impl Into<ToastContent>, options: ToastOptions) -> ToastId {
        self.show_typed(ToastType::Error, content.into(), options)
    }

    fn show_typed(&self, toast_type: ToastType, content: ToastContent, mut options: ToastOptions) -> ToastId {
        options.toast_type.get_or_insert(toast_type);
        self.show(content, options)
    }

    /// Updates a toast on the next tick.
    ///
    /// Deferring lets an update issued right after `show` find the toast the
    /// show is about to build. Omitted fields keep their previous values;
    /// a different valid `toast_id` in `update.options` swaps the toast's
    /// identity. Updates for unknown ids are dropped. Only the container the
    /// toast was found in applies the update.
    pub fn update(&self, id: impl Into<ToastId>, update: UpdateOptions) {
        let id = id.into();
        let weak = Rc::downgrade(&self.inner);
        self.inner.scheduler.defer(move || {
            if let Some(toaster) = upgrade(&weak) {
                toaster.apply_update(&id, update);
            }
        });
    }

    /// Completes a controlled progress bar, which closes the toast.
    pub fn done(&self, id: impl Into<ToastId>) {
        self.update(id, ToastOptions::new().with_progress(1.0).into());
    }

    fn apply_update(&self, id: &ToastId, update: UpdateOptions) {
        let UpdateOptions { render, options } = update;
        let Some(container) = self.find_container(options.container_id.as_ref()) else {
            debug!(toast_id = %id, "update without a target container dropped");
            return;
        };
        let Some(existing) = container.get_toast(id) else {
            debug!(toast_id = %id, "update for unknown toast dropped");
            return;
        };

        let mut next = existing.options.merged(&options);
        next.target = Some(container.key());
        match options.toast_id.filter(Id::is_valid) {
            Some(new_id) if new_id != *id => {
                next.toast_id = Some(new_id);
                next.stale_id = Some(id.clone());
            }
            _ => {
                next.toast_id = Some(id.clone());
                next.update_id = Some(generate_id());
            }
        }
        self.dispatch(render.unwrap_or(existing.content), next);
    }

    /// Removes one toast, or every toast when `id` is `None`. Does nothing
    /// while no container is mounted.
    pub fn dismiss(&self, id: Option<ToastId>) {
        if self.is_any_container_mounted() {
            self.inner.bus.emit(Event::Clear(id));
        }
    }

    /// Drops waiting toasts of limited containers, or of the one named.
    pub fn clear_waiting_queue(&self, container_id: Option<ContainerId>) {
        self.inner.bus.emit(Event::ClearWaitingQueue(container_id));
    }

    /// Whether any mounted container shows `id`.
    #[must_use]
    pub fn is_active(&self, id: &ToastId) -> bool {
        self.mounted_containers()
            .iter()
            .any(|container| container.is_toast_active(id))
    }

    /// Looks up a toast in the named container, or in the latest one.
    #[must_use]
    pub fn get_toast(&self, id: &ToastId, container_id: Option<&ContainerId>) -> Option<Toast> {
        self.find_container(container_id)?.get_toast(id)
    }

    /// Subscribes to live-count changes. Keep the returned listener to
    /// unsubscribe with [`Toaster::off_change`].
    pub fn on_change(&self, callback: impl Fn(usize, Option<&ContainerId>) + 'static) -> Listener<Event> {
        let listener: Listener<Event> = Rc::new(move |event: &Event| {
            if let Event::Change { count, container_id } = event {
                callback(*count, container_id.as_ref());
            }
        });
        self.inner.bus.on(EventKind::Change, listener.clone());
        listener
    }

    pub fn off_change(&self, listener: &Listener<Event>) {
        self.inner.bus.off(EventKind::Change, Some(listener));
    }

    /// Enables lazy mounting: the first request made while nothing is
    /// mounted mounts a container with `props`.
    pub fn configure(&self, props: ContainerProps) {
        self.inner.registry.borrow_mut().lazy_props = Some(props);
    }

    /// The container mounted by [`Toaster::configure`], once it exists.
    #[must_use]
    pub fn lazy_container(&self) -> Option<ToastContainer> {
        self.inner.registry.borrow().lazy_container.clone()
    }

    #[must_use]
    pub fn is_any_container_mounted(&self) -> bool {
        !self.mounted_containers().is_empty()
    }

    /// Registered containers that are still mounted, in registration order.
    #[must_use]
    pub fn mounted_containers(&self) -> Vec<ToastContainer> {
        self.inner
            .registry
            .borrow()
            .containers
            .iter()
            .filter_map(|(_, container)| container.upgrade())
            .filter(ToastContainer::is_mounted)
            .collect()
    }

    fn find_container(&self, container_id: Option<&ContainerId>) -> Option<ToastContainer> {
        let registry = self.inner.registry.borrow();
        let mut mounted = registry
            .containers
            .iter()
            .filter_map(|(key, container)| Some((key, container.upgrade()?)))
            .filter(|(_, container)| container.is_mounted());

        match container_id {
            Some(id) => mounted
                .filter(|(key, _)| matches!(key, ContainerKey::Named(named) if named == id))
                .last()
                .map(|(_, container)| container),
            None => mounted.last().map(|(_, container)| container),
        }
    }

    fn dispatch(&self, content: ToastContent, options: ToastOptions) {
        if self.is_any_container_mounted() {
            self.inner.bus.emit(Event::Show { content, options });
            return;
        }

        let lazy_props = {
            let mut registry = self.inner.registry.borrow_mut();
            debug!(toast_id = ?options.toast_id, "no container mounted, buffering toast");
            registry.pending.push((content, options));
            registry.lazy_props.take()
        };
        if let Some(props) = lazy_props {
            let container = self.container(props);
            container.mount();
            self.inner.registry.borrow_mut().lazy_container = Some(container);
        }
    }

    fn register(&self, container: &ContainerRef) {
        if !is_live(container) {
            return;
        }
        let key = container.key().clone();

        let pending = {
            let mut registry = self.inner.registry.borrow_mut();
            // Entries are per instance; a shared key never evicts a mounted
            // container, it only loses id lookups to the newer one.
            registry
                .containers
                .retain(|(_, existing)| !existing.same_instance(container) && is_live(existing));

            let shadowed = registry.containers.iter().any(|(k, _)| match (k, &key) {
                (ContainerKey::Instance(_), ContainerKey::Instance(_)) => true,
                (ContainerKey::Named(a), ContainerKey::Named(b)) => a == b,
                _ => false,
            });
            if shadowed {
                warn!(container = ?key, "container key already mounted; lookups use the latest");
            }
            registry.containers.push((key.clone(), container.clone()));
            std::mem::take(&mut registry.pending)
        };
        debug!(container = ?key, flushed = pending.len(), "container registered");

        for (content, options) in pending {
            self.inner.bus.emit(Event::Show { content, options });
        }
    }

    fn deregister(&self, container: &ContainerRef) {
        let (now_empty, lazy) = {
            let mut registry = self.inner.registry.borrow_mut();
            registry
                .containers
                .retain(|(_, existing)| !existing.same_instance(container) && is_live(existing));
            let now_empty = registry.containers.is_empty();
            let lazy = if now_empty {
                registry.lazy_container.take()
            } else {
                None
            };
            (now_empty, lazy)
        };
        debug!(container = ?container.key(), "container deregistered");

        if now_empty {
            self.inner
                .bus
                .off(EventKind::Show, None)
                .off(EventKind::Clear, None)
                .off(EventKind::ClearWaitingQueue, None);
        }
        drop(lazy);
    }
}

impl fmt::Debug for Toaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.inner.registry.borrow();
        f.debug_struct("Toaster")
            .field("containers", &registry.containers.len())
            .field("pending", &registry.pending.len())
            .field("lazy", &registry.lazy_props.is_some())
            .finish()
    }
}

fn is_live(container: &ContainerRef) -> bool {
    container.upgrade().is_some_and(|c| c.is_mounted())
}

fn upgrade(weak: &Weak<ToasterInner>) -> Option<Toaster> {
    weak.upgrade().map(|inner| Toaster { inner })
}
