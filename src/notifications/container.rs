// SPDX-License-Identifier: MPL-2.0
//! Container lifecycle management.
//!
//! A [`ToastContainer`] is one display surface. While mounted it listens to
//! the bus, owns every toast it accepted, enforces its display limit with a
//! FIFO waiting queue and runs auto-close timers.
//!
//! Per toast id the state moves `absent → building → (queued | delayed |
//! live) → removed`. Only live toasts are active and rendered; queued and
//! delayed ones already have a record so lookups and duplicate detection see
//! them.

use super::content::{CloseHandle, ToastContent, ToastContext};
use super::event::{Event, EventKind, ToastBus};
use super::id::{resolve_id, ContainerId, ToastId};
use super::options::{resolve, ContainerProps, ToastHook, ToastOptions, ToastProps};
use super::render::{group_by_position, ToastGroup};
use super::toaster::Toaster;
use crate::error::{Error, Result};
use crate::event::Listener;
use crate::scheduler::{Scheduler, TaskHandle};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, error, trace};

/// A built toast.
#[derive(Debug, Clone)]
pub struct Toast {
    pub content: ToastContent,
    pub props: ToastProps,
    /// Caller options the toast was built from; updates merge over these.
    pub options: ToastOptions,
    /// Whether this record replaced an earlier one.
    pub is_update: bool,
}

impl Toast {
    #[must_use]
    pub fn id(&self) -> &ToastId {
        &self.props.toast_id
    }
}

/// Why a show request had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotMounted,
    /// Addressed to another container.
    RoutingMismatch,
    /// Fresh creation for an id this container already holds.
    DuplicateId,
    /// In-place update for an id that is gone.
    MissingTarget,
}

/// Result of a show request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Live,
    Queued,
    /// Waiting for its entry delay.
    Delayed,
    /// Replaced an existing record in place.
    Updated,
    Rejected(Rejection),
}

/// Registry key of a container: its id, or its instance when unlabeled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContainerKey {
    Named(ContainerId),
    Instance(u64),
}

/// Non-owning reference carried by mount notifications.
#[derive(Clone)]
pub struct ContainerRef {
    key: ContainerKey,
    inner: Weak<ContainerInner>,
}

impl ContainerRef {
    #[must_use]
    pub fn key(&self) -> &ContainerKey {
        &self.key
    }

    #[must_use]
    pub fn upgrade(&self) -> Option<ToastContainer> {
        self.inner.upgrade().map(|inner| ToastContainer { inner })
    }

    pub(crate) fn same_instance(&self, other: &ContainerRef) -> bool {
        Weak::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContainerRef").field(&self.key).finish()
    }
}

struct AutoCloseTimer {
    handle: Option<TaskHandle>,
    remaining: Duration,
    total: Duration,
    started_at: Duration,
    hovered: bool,
    focus_lost: bool,
}

impl AutoCloseTimer {
    fn pause(&mut self, scheduler: &Scheduler) {
        if let Some(handle) = self.handle.take() {
            scheduler.cancel(handle);
            let elapsed = scheduler.now().saturating_sub(self.started_at);
            self.remaining = self.remaining.saturating_sub(elapsed);
        }
    }

    fn remaining_at(&self, now: Duration) -> Duration {
        if self.handle.is_some() {
            self.remaining
                .saturating_sub(now.saturating_sub(self.started_at))
        } else {
            self.remaining
        }
    }
}

/// Lifecycle hooks to run once the state borrow is released.
type Hooks = Vec<(ToastHook, ToastId)>;

#[derive(Default)]
struct ContainerState {
    collection: HashMap<ToastId, Toast>,
    live: Vec<ToastId>,
    queue: VecDeque<ToastId>,
    delayed: HashMap<ToastId, TaskHandle>,
    timers: HashMap<ToastId, AutoCloseTimer>,
    focus_lost: bool,
    next_key: u64,
}

/// What state transitions need from outside the state itself.
struct Runtime {
    scheduler: Rc<Scheduler>,
    this: Weak<ContainerInner>,
    limit: Option<usize>,
}

impl Runtime {
    fn close_later(&self, id: &ToastId, delay: Duration) -> TaskHandle {
        let this = self.this.clone();
        let id = id.clone();
        self.scheduler.schedule(delay, move || {
            if let Some(inner) = this.upgrade() {
                ToastContainer { inner }.remove_toast(Some(&id));
            }
        })
    }

    fn reveal_later(&self, id: &ToastId, delay: Duration) -> TaskHandle {
        let this = self.this.clone();
        let id = id.clone();
        self.scheduler.schedule(delay, move || {
            if let Some(inner) = this.upgrade() {
                ToastContainer { inner }.reveal(&id);
            }
        })
    }
}

impl ContainerState {
    /// Slots taken against the limit: live toasts plus pending delayed ones.
    fn occupied(&self) -> usize {
        self.live.len() + self.delayed.len()
    }

    fn is_saturated(&self, limit: Option<usize>) -> bool {
        limit.is_some_and(|limit| self.occupied() >= limit || !self.queue.is_empty())
    }

    fn allocate_key(&mut self) -> u64 {
        self.next_key += 1;
        self.next_key
    }

    fn go_live(&mut self, id: ToastId, rt: &Runtime, hooks: &mut Hooks) {
        if !self.live.contains(&id) {
            self.live.push(id.clone());
        }
        if let Some(hook) = self.collection.get(&id).and_then(|t| t.props.on_open.clone()) {
            hooks.push((hook, id.clone()));
        }
        self.start_timer(&id, rt);
    }

    fn install_fresh(
        &mut self,
        toast: Toast,
        delay: Option<Duration>,
        rt: &Runtime,
        hooks: &mut Hooks,
    ) -> BuildOutcome {
        let id = toast.id().clone();
        self.collection.insert(id.clone(), toast);

        // Entry delays do not interact with the limit: a toast is queued or
        // delayed, never both.
        if self.is_saturated(rt.limit) {
            self.queue.push_back(id);
            return BuildOutcome::Queued;
        }
        if let Some(delay) = delay {
            let handle = rt.reveal_later(&id, delay);
            self.delayed.insert(id, handle);
            return BuildOutcome::Delayed;
        }
        self.go_live(id, rt, hooks);
        BuildOutcome::Live
    }

    fn install_update(
        &mut self,
        toast: Toast,
        stale_id: Option<ToastId>,
        rt: &Runtime,
        hooks: &mut Hooks,
    ) -> BuildOutcome {
        let id = toast.id().clone();

        let Some(stale) = stale_id else {
            let Some(existing) = self.collection.get_mut(&id) else {
                return BuildOutcome::Rejected(Rejection::MissingTarget);
            };
            *existing = toast;
            if self.live.contains(&id) {
                self.start_timer(&id, rt);
            }
            return BuildOutcome::Updated;
        };

        if !self.collection.contains_key(&stale) {
            // Retired before the swap arrived; the new id starts over.
            return self.install_fresh(toast, None, rt, hooks);
        }

        let live_pos = self.live.iter().position(|x| *x == stale);
        let queue_pos = self.queue.iter().position(|x| *x == stale);
        self.stop_timer(&stale, rt);
        if let Some(handle) = self.delayed.remove(&stale) {
            rt.scheduler.cancel(handle);
        }
        self.collection.remove(&stale);
        self.collection.insert(id.clone(), toast);

        if let Some(pos) = live_pos {
            self.live.remove(pos);
            self.live.push(id.clone());
            self.start_timer(&id, rt);
        } else if let Some(pos) = queue_pos {
            self.queue[pos] = id;
        } else {
            self.go_live(id, rt, hooks);
        }
        BuildOutcome::Updated
    }

    /// Removes `id` wherever it is. Returns whether a record existed.
    fn detach(&mut self, id: &ToastId, rt: &Runtime, hooks: &mut Hooks) -> bool {
        let was_live = match self.live.iter().position(|x| x == id) {
            Some(pos) => {
                self.live.remove(pos);
                true
            }
            None => false,
        };
        self.queue.retain(|queued| queued != id);
        if let Some(handle) = self.delayed.remove(id) {
            rt.scheduler.cancel(handle);
        }
        self.stop_timer(id, rt);

        let removed = self.collection.remove(id);
        if was_live {
            if let Some(hook) = removed.as_ref().and_then(|t| t.props.on_close.clone()) {
                hooks.push((hook, id.clone()));
            }
        }
        removed.is_some()
    }

    fn clear_all(&mut self, rt: &Runtime, hooks: &mut Hooks) {
        for id in self.live.drain(..) {
            if let Some(hook) = self.collection.get(&id).and_then(|t| t.props.on_close.clone()) {
                hooks.push((hook, id));
            }
        }
        for (_, handle) in self.delayed.drain() {
            rt.scheduler.cancel(handle);
        }
        for (_, timer) in self.timers.drain() {
            if let Some(handle) = timer.handle {
                rt.scheduler.cancel(handle);
            }
        }
        self.queue.clear();
        self.collection.clear();
    }

    /// Moves queued toasts live, oldest first, while slots are free.
    fn promote(&mut self, rt: &Runtime, hooks: &mut Hooks) {
        while rt.limit.is_none_or(|limit| self.occupied() < limit) {
            let Some(id) = self.queue.pop_front() else {
                break;
            };
            trace!(toast_id = %id, "promoting queued toast");
            self.go_live(id, rt, hooks);
        }
    }

    fn start_timer(&mut self, id: &ToastId, rt: &Runtime) {
        // A restart keeps the hover pause; only `resume_toast` lifts it.
        let hovered = self.timers.get(id).is_some_and(|timer| timer.hovered);
        self.stop_timer(id, rt);
        let Some(toast) = self.collection.get(id) else {
            return;
        };
        let now = rt.scheduler.now();

        if let Some(progress) = toast.props.progress {
            // Controlled progress: the caller drives it, completion closes.
            if progress >= 1.0 {
                let handle = rt.close_later(id, Duration::ZERO);
                self.timers.insert(
                    id.clone(),
                    AutoCloseTimer {
                        handle: Some(handle),
                        remaining: Duration::ZERO,
                        total: Duration::ZERO,
                        started_at: now,
                        hovered: false,
                        focus_lost: false,
                    },
                );
            }
            return;
        }

        let Some(delay) = toast.props.auto_close.delay() else {
            return;
        };
        let focus_lost = self.focus_lost && toast.props.pause_on_focus_loss;
        let hovered = hovered && toast.props.pause_on_hover;
        let handle = (!focus_lost && !hovered).then(|| rt.close_later(id, delay));
        self.timers.insert(
            id.clone(),
            AutoCloseTimer {
                handle,
                remaining: delay,
                total: delay,
                started_at: now,
                hovered,
                focus_lost,
            },
        );
    }

    fn stop_timer(&mut self, id: &ToastId, rt: &Runtime) {
        if let Some(timer) = self.timers.remove(id) {
            if let Some(handle) = timer.handle {
                rt.scheduler.cancel(handle);
            }
        }
    }

    fn resume_timer(&mut self, id: &ToastId, rt: &Runtime) {
        let Some(timer) = self.timers.get_mut(id) else {
            return;
        };
        if timer.handle.is_some() || timer.hovered || timer.focus_lost {
            return;
        }
        timer.started_at = rt.scheduler.now();
        timer.handle = Some(rt.close_later(id, timer.remaining));
    }
}

pub(crate) struct ContainerInner {
    instance: u64,
    scheduler: Rc<Scheduler>,
    bus: Rc<ToastBus>,
    props: RefCell<ContainerProps>,
    state: RefCell<ContainerState>,
    mounted: Cell<bool>,
    subscriptions: RefCell<Vec<(EventKind, Listener<Event>)>>,
    /// Deliveries of this container's own unmount notification.
    pending_unmount: RefCell<Vec<TaskHandle>>,
}

impl Drop for ContainerInner {
    fn drop(&mut self) {
        for (kind, listener) in self.subscriptions.get_mut().drain(..) {
            self.bus.off(kind, Some(&listener));
        }
        let state = self.state.get_mut();
        for (_, handle) in state.delayed.drain() {
            self.scheduler.cancel(handle);
        }
        for (_, timer) in state.timers.drain() {
            if let Some(handle) = timer.handle {
                self.scheduler.cancel(handle);
            }
        }
    }
}

/// One display surface and the toasts it owns.
///
/// # Usage
///
/// ```
/// use toastkit::notifications::{ContainerProps, ToastOptions, Toaster};
///
/// let toaster = Toaster::new();
/// let container = toaster.container(ContainerProps::default().with_limit(1));
/// container.mount();
/// toaster.scheduler().run_pending();
///
/// let first = toaster.show("saved", ToastOptions::new());
/// let second = toaster.show("exported", ToastOptions::new());
/// toaster.scheduler().run_pending();
///
/// assert_eq!(container.live_ids(), vec![first.clone()]);
/// assert_eq!(container.queued_ids(), vec![second.clone()]);
///
/// toaster.dismiss(Some(first));
/// toaster.scheduler().run_pending();
/// assert_eq!(container.live_ids(), vec![second]);
/// ```
#[derive(Clone)]
pub struct ToastContainer {
    inner: Rc<ContainerInner>,
}

impl ToastContainer {
    /// Creates an unmounted container sharing `toaster`'s bus and scheduler.
    #[must_use]
    pub fn new(toaster: &Toaster, props: ContainerProps) -> Self {
        static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

        Self {
            inner: Rc::new(ContainerInner {
                instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
                scheduler: toaster.scheduler().clone(),
                bus: toaster.bus().clone(),
                props: RefCell::new(props),
                state: RefCell::new(ContainerState::default()),
                mounted: Cell::new(false),
                subscriptions: RefCell::new(Vec::new()),
                pending_unmount: RefCell::new(Vec::new()),
            }),
        }
    }

    #[must_use]
    pub fn container_id(&self) -> Option<ContainerId> {
        self.inner.props.borrow().container_id.clone()
    }

    #[must_use]
    pub fn key(&self) -> ContainerKey {
        match self.container_id() {
            Some(id) => ContainerKey::Named(id),
            None => ContainerKey::Instance(self.inner.instance),
        }
    }

    /// Current defaults.
    #[must_use]
    pub fn props(&self) -> ContainerProps {
        self.inner.props.borrow().clone()
    }

    /// Replaces the defaults. Toasts built afterwards resolve against the new
    /// props; a changed `container_id` is registered on the next mount.
    pub fn set_props(&self, props: ContainerProps) {
        *self.inner.props.borrow_mut() = props;
    }

    #[must_use]
    pub fn downgrade(&self) -> ContainerRef {
        ContainerRef {
            key: self.key(),
            inner: Rc::downgrade(&self.inner),
        }
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.get()
    }

    /// Subscribes to the bus and announces the container.
    ///
    /// Cancels this container's still-pending unmount notification so a fast
    /// unmount/mount cycle does not deregister it. Other containers' pending
    /// unmounts are left alone.
    pub fn mount(&self) {
        if self.inner.mounted.replace(true) {
            return;
        }

        let stale: Vec<_> = self.inner.pending_unmount.borrow_mut().drain(..).collect();
        for handle in stale {
            self.inner.scheduler.cancel(handle);
        }

        let weak = Rc::downgrade(&self.inner);
        let show = listener(&weak, |container, event| {
            if let Event::Show { content, options } = event {
                match container.build_toast(content.clone(), options.clone()) {
                    Ok(outcome) => trace!(?outcome, "show handled"),
                    Err(err) => error!(%err, toast_id = ?options.toast_id, "toast rejected"),
                }
            }
        });
        let clear = listener(&weak, |container, event| {
            if let Event::Clear(id) = event {
                container.remove_toast(id.as_ref());
            }
        });
        let clear_queue = listener(&weak, |container, event| {
            if let Event::ClearWaitingQueue(container_id) = event {
                container.clear_waiting_queue(container_id.as_ref());
            }
        });

        *self.inner.subscriptions.borrow_mut() = vec![
            (EventKind::Show, show.clone()),
            (EventKind::Clear, clear.clone()),
            (EventKind::ClearWaitingQueue, clear_queue.clone()),
        ];

        self.inner
            .bus
            .on(EventKind::Show, show)
            .on(EventKind::Clear, clear)
            .on(EventKind::ClearWaitingQueue, clear_queue)
            .emit(Event::DidMount(self.downgrade()));
        debug!(container = ?self.key(), "container mounted");
    }

    /// Unsubscribes, drops every toast and announces the teardown.
    pub fn unmount(&self) {
        if !self.inner.mounted.replace(false) {
            return;
        }

        let subscriptions: Vec<_> = self.inner.subscriptions.borrow_mut().drain(..).collect();
        for (kind, listener) in &subscriptions {
            self.inner.bus.off(*kind, Some(listener));
        }

        self.mutate(|state, rt, hooks| state.clear_all(rt, hooks));
        let handles = self.inner.bus.emit_tracked(Event::WillUnmount(self.downgrade()));
        *self.inner.pending_unmount.borrow_mut() = handles;
        debug!(container = ?self.key(), "container unmounted");
    }

    /// Builds a toast from a show request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidContent`] when the content, or what its builder
    /// produced, cannot be rendered. Routine rejections are `Ok` values.
    pub fn build_toast(&self, content: ToastContent, options: ToastOptions) -> Result<BuildOutcome> {
        if !content.is_renderable() {
            return Err(Error::InvalidContent(format!("{content:?} cannot be rendered")));
        }

        let props = self.props();
        let toast_id = resolve_id(&options);
        if let Some(rejection) = self.check(&toast_id, &options, &props) {
            debug!(toast_id = %toast_id, ?rejection, "show ignored");
            return Ok(BuildOutcome::Rejected(rejection));
        }

        let key = {
            let mut state = self.inner.state.borrow_mut();
            let kept = state
                .collection
                .get(&toast_id)
                .filter(|_| options.update_id.is_some())
                .map(|existing| existing.props.key);
            match kept {
                Some(key) => key,
                None => state.allocate_key(),
            }
        };
        let resolved = resolve(toast_id.clone(), &options, &props, key);
        let context = ToastContext {
            close: self.close_handle(&toast_id),
            props: resolved.clone(),
            data: options.data.clone(),
        };
        let content = content.materialize(&context);
        if !content.is_renderable() {
            return Err(Error::InvalidContent(format!(
                "content of toast {toast_id} produced nothing to render"
            )));
        }

        let is_update = options.is_update();
        let stale_id = options.stale_id.clone().filter(|stale| *stale != toast_id);
        let delay = options.delay.filter(|delay| !delay.is_zero());
        let mut stored = options;
        stored.toast_id = Some(toast_id.clone());
        stored.update_id = None;
        stored.stale_id = None;
        stored.target = None;
        stored.delay = None;

        let toast = Toast {
            content,
            props: resolved,
            options: stored,
            is_update,
        };
        let outcome = self.mutate(|state, rt, hooks| {
            if is_update {
                state.install_update(toast, stale_id, rt, hooks)
            } else {
                state.install_fresh(toast, delay, rt, hooks)
            }
        });
        debug!(toast_id = %toast_id, ?outcome, "toast built");
        Ok(outcome)
    }

    fn check(&self, toast_id: &ToastId, options: &ToastOptions, props: &ContainerProps) -> Option<Rejection> {
        if !self.is_mounted() {
            return Some(Rejection::NotMounted);
        }
        if props.enable_multi_container && options.container_id != props.container_id {
            return Some(Rejection::RoutingMismatch);
        }
        if options.target.as_ref().is_some_and(|target| *target != self.key()) {
            return Some(Rejection::RoutingMismatch);
        }
        if options.update_id.is_none() && self.inner.state.borrow().collection.contains_key(toast_id) {
            return Some(Rejection::DuplicateId);
        }
        None
    }

    /// Removes one toast, or all of them when `id` is `None` or not a valid id.
    /// Frees slots are refilled from the waiting queue.
    pub fn remove_toast(&self, id: Option<&ToastId>) {
        if !self.is_mounted() {
            return;
        }
        self.mutate(|state, rt, hooks| match id.filter(|id| id.is_valid()) {
            Some(id) => {
                if state.detach(id, rt, hooks) {
                    state.promote(rt, hooks);
                }
            }
            None => state.clear_all(rt, hooks),
        });
    }

    /// Drops the waiting queue when this container has a limit and
    /// `container_id` is absent or names it.
    pub fn clear_waiting_queue(&self, container_id: Option<&ContainerId>) {
        let props = self.props();
        if props.effective_limit().is_none() {
            return;
        }
        if container_id.is_some_and(|id| props.container_id.as_ref() != Some(id)) {
            return;
        }
        self.mutate(|state, _, _| {
            let queued: Vec<ToastId> = state.queue.drain(..).collect();
            for id in queued {
                state.collection.remove(&id);
            }
        });
    }

    fn reveal(&self, id: &ToastId) {
        self.mutate(|state, rt, hooks| {
            if state.delayed.remove(id).is_some() && state.collection.contains_key(id) {
                state.go_live(id.clone(), rt, hooks);
            }
        });
    }

    /// Pauses the toast's auto-close while hovered, when it allows it.
    pub fn pause_toast(&self, id: &ToastId) -> bool {
        let mut state = self.inner.state.borrow_mut();
        let allowed = state
            .collection
            .get(id)
            .is_some_and(|toast| toast.props.pause_on_hover);
        if !allowed {
            return false;
        }
        match state.timers.get_mut(id) {
            Some(timer) => {
                timer.hovered = true;
                timer.pause(&self.inner.scheduler);
                true
            }
            None => false,
        }
    }

    /// Resumes a hover pause with the remaining delay.
    pub fn resume_toast(&self, id: &ToastId) {
        let rt = self.runtime();
        let mut state = self.inner.state.borrow_mut();
        if let Some(timer) = state.timers.get_mut(id) {
            timer.hovered = false;
        }
        state.resume_timer(id, &rt);
    }

    /// The window lost focus: pause toasts that allow it.
    pub fn focus_lost(&self) {
        let mut state = self.inner.state.borrow_mut();
        state.focus_lost = true;
        let ContainerState {
            collection, timers, ..
        } = &mut *state;
        for (id, timer) in timers.iter_mut() {
            if collection
                .get(id)
                .is_some_and(|toast| toast.props.pause_on_focus_loss)
            {
                timer.focus_lost = true;
                timer.pause(&self.inner.scheduler);
            }
        }
    }

    /// The window regained focus: resume what focus loss paused.
    pub fn focus_gained(&self) {
        let rt = self.runtime();
        let mut state = self.inner.state.borrow_mut();
        state.focus_lost = false;
        let ids: Vec<ToastId> = state.timers.keys().cloned().collect();
        for id in ids {
            if let Some(timer) = state.timers.get_mut(&id) {
                timer.focus_lost = false;
            }
            state.resume_timer(&id, &rt);
        }
    }

    /// Closes a live toast on click, when it allows it.
    pub fn click_toast(&self, id: &ToastId) -> bool {
        let closes = {
            let state = self.inner.state.borrow();
            state.live.contains(id)
                && state
                    .collection
                    .get(id)
                    .is_some_and(|toast| toast.props.close_on_click)
        };
        if closes {
            self.remove_toast(Some(id));
        }
        closes
    }

    /// Progress of a toast in `0.0..=1.0`: the controlled value, or the
    /// elapsed share of its auto-close delay.
    #[must_use]
    pub fn progress(&self, id: &ToastId) -> Option<f64> {
        let state = self.inner.state.borrow();
        let toast = state.collection.get(id)?;
        if let Some(progress) = toast.props.progress {
            return Some(progress.clamp(0.0, 1.0));
        }
        let timer = state.timers.get(id)?;
        if timer.total.is_zero() {
            return Some(1.0);
        }
        let remaining = timer.remaining_at(self.inner.scheduler.now());
        Some(1.0 - remaining.as_secs_f64() / timer.total.as_secs_f64())
    }

    /// Whether `id` is in the live set.
    #[must_use]
    pub fn is_toast_active(&self, id: &ToastId) -> bool {
        self.inner.state.borrow().live.contains(id)
    }

    /// Looks up a live, queued or delayed toast.
    #[must_use]
    pub fn get_toast(&self, id: &ToastId) -> Option<Toast> {
        self.inner.state.borrow().collection.get(id).cloned()
    }

    #[must_use]
    pub fn live_ids(&self) -> Vec<ToastId> {
        self.inner.state.borrow().live.clone()
    }

    #[must_use]
    pub fn queued_ids(&self) -> Vec<ToastId> {
        self.inner.state.borrow().queue.iter().cloned().collect()
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.inner.state.borrow().live.len()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.inner.state.borrow().queue.len()
    }

    /// Live toasts grouped by position, in display order.
    #[must_use]
    pub fn toasts_to_render(&self) -> Vec<ToastGroup> {
        let toasts: Vec<Toast> = {
            let state = self.inner.state.borrow();
            state
                .live
                .iter()
                .filter_map(|id| state.collection.get(id).cloned())
                .collect()
        };
        group_by_position(toasts, self.inner.props.borrow().newest_on_top)
    }

    fn runtime(&self) -> Runtime {
        Runtime {
            scheduler: self.inner.scheduler.clone(),
            this: Rc::downgrade(&self.inner),
            limit: self.inner.props.borrow().effective_limit(),
        }
    }

    fn close_handle(&self, id: &ToastId) -> CloseHandle {
        let scheduler = Rc::downgrade(&self.inner.scheduler);
        let this = Rc::downgrade(&self.inner);
        let id = id.clone();
        CloseHandle::new(move || {
            let Some(scheduler) = scheduler.upgrade() else {
                return;
            };
            let this = this.clone();
            let id = id.clone();
            scheduler.defer(move || {
                if let Some(inner) = this.upgrade() {
                    ToastContainer { inner }.remove_toast(Some(&id));
                }
            });
        })
    }

    /// Applies a state transition, then announces a live-count change and
    /// runs lifecycle hooks with no borrow held.
    fn mutate<R>(&self, transition: impl FnOnce(&mut ContainerState, &Runtime, &mut Hooks) -> R) -> R {
        let rt = self.runtime();
        let mut hooks = Hooks::new();
        let (result, before, after) = {
            let mut state = self.inner.state.borrow_mut();
            let before = state.live.len();
            let result = transition(&mut state, &rt, &mut hooks);
            (result, before, state.live.len())
        };

        if before != after {
            self.inner.bus.emit(Event::Change {
                count: after,
                container_id: self.container_id(),
            });
        }
        for (hook, id) in hooks {
            hook(&id);
        }
        result
    }
}

impl fmt::Debug for ToastContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastContainer")
            .field("key", &self.key())
            .field("mounted", &self.is_mounted())
            .field("live", &self.live_count())
            .field("queued", &self.queued_count())
            .finish()
    }
}

fn listener(
    weak: &Weak<ContainerInner>,
    handle: impl Fn(&ToastContainer, &Event) + 'static,
) -> Listener<Event> {
    let weak = weak.clone();
    Rc::new(move |event: &Event| {
        if let Some(inner) = weak.upgrade() {
            handle(&ToastContainer { inner }, event);
        }
    })
}
