// SPDX-License-Identifier: MPL-2.0
//! Event bus implementation.

use crate::scheduler::{Scheduler, TaskHandle};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;
use tracing::trace;

/// An event that can travel on an [`EventBus`].
pub trait BusEvent: Clone + 'static {
    /// Key listeners subscribe to.
    type Kind: Copy + Eq + Hash + fmt::Debug + 'static;

    /// Returns the kind this event is delivered under.
    fn kind(&self) -> Self::Kind;
}

/// Listener callback. Identity (for [`EventBus::off`]) is the `Rc` allocation.
pub type Listener<E> = Rc<dyn Fn(&E)>;

/// Named-event registry with deferred delivery.
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use toastkit::event::{BusEvent, EventBus, Listener};
/// use toastkit::scheduler::Scheduler;
///
/// #[derive(Clone)]
/// struct Ping;
///
/// impl BusEvent for Ping {
///     type Kind = &'static str;
///     fn kind(&self) -> &'static str {
///         "ping"
///     }
/// }
///
/// let scheduler = Rc::new(Scheduler::new());
/// let bus = EventBus::new(scheduler.clone());
/// let hits = Rc::new(Cell::new(0));
/// let counter = hits.clone();
/// let listener: Listener<Ping> = Rc::new(move |_: &Ping| counter.set(counter.get() + 1));
///
/// bus.on("ping", listener).emit(Ping);
/// assert_eq!(hits.get(), 0);
/// scheduler.run_pending();
/// assert_eq!(hits.get(), 1);
/// ```
pub struct EventBus<E: BusEvent> {
    scheduler: Rc<Scheduler>,
    listeners: RefCell<HashMap<E::Kind, Vec<Listener<E>>>>,
    emit_queue: RefCell<HashMap<E::Kind, Vec<TaskHandle>>>,
}

impl<E: BusEvent> EventBus<E> {
    /// Creates an empty bus delivering through `scheduler`.
    #[must_use]
    pub fn new(scheduler: Rc<Scheduler>) -> Self {
        Self {
            scheduler,
            listeners: RefCell::new(HashMap::new()),
            emit_queue: RefCell::new(HashMap::new()),
        }
    }

    /// Returns the scheduler deliveries are queued on.
    #[must_use]
    pub fn scheduler(&self) -> &Rc<Scheduler> {
        &self.scheduler
    }

    /// Subscribes `listener` to `kind`. Listeners of one kind are delivered
    /// in subscription order.
    pub fn on(&self, kind: E::Kind, listener: Listener<E>) -> &Self {
        self.listeners
            .borrow_mut()
            .entry(kind)
            .or_default()
            .push(listener);
        self
    }

    /// Removes one listener, or every listener of `kind` when `listener` is
    /// `None`. Removing something that is not registered is a no-op.
    pub fn off(&self, kind: E::Kind, listener: Option<&Listener<E>>) -> &Self {
        let mut listeners = self.listeners.borrow_mut();
        match listener {
            Some(target) => {
                if let Some(registered) = listeners.get_mut(&kind) {
                    registered.retain(|l| !Rc::ptr_eq(l, target));
                    if registered.is_empty() {
                        listeners.remove(&kind);
                    }
                }
            }
            None => {
                listeners.remove(&kind);
            }
        }
        self
    }

    /// Schedules one delivery of `event` per listener currently subscribed
    /// to its kind. Listeners added after this call do not receive it.
    pub fn emit(&self, event: E) -> &Self {
        self.emit_tracked(event);
        self
    }

    /// Like [`emit`](Self::emit), returning the scheduled deliveries so the
    /// caller can cancel this one emission without touching others of the
    /// same kind.
    pub fn emit_tracked(&self, event: E) -> Vec<TaskHandle> {
        let kind = event.kind();
        let listeners = self
            .listeners
            .borrow()
            .get(&kind)
            .cloned()
            .unwrap_or_default();

        if listeners.is_empty() {
            trace!(?kind, "emit without listeners");
            return Vec::new();
        }

        trace!(?kind, listeners = listeners.len(), "scheduling event delivery");
        let handles: Vec<TaskHandle> = listeners
            .into_iter()
            .map(|listener| {
                let event = event.clone();
                self.scheduler.defer(move || listener(&event))
            })
            .collect();

        let mut queue = self.emit_queue.borrow_mut();
        let pending = queue.entry(kind).or_default();
        pending.retain(|handle| self.scheduler.is_pending(*handle));
        pending.extend(handles.iter().copied());
        handles
    }

    /// Cancels every delivery of `kind` that has not run yet.
    pub fn cancel_emit(&self, kind: E::Kind) -> &Self {
        let cancelled = self.emit_queue.borrow_mut().remove(&kind);
        if let Some(handles) = cancelled {
            let dropped = handles
                .into_iter()
                .filter(|handle| self.scheduler.cancel(*handle))
                .count();
            if dropped > 0 {
                trace!(?kind, dropped, "cancelled pending deliveries");
            }
        }
        self
    }

    /// Number of listeners subscribed to `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: E::Kind) -> usize {
        self.listeners.borrow().get(&kind).map_or(0, Vec::len)
    }

    /// Returns whether anything listens to `kind`.
    #[must_use]
    pub fn has_listeners(&self, kind: E::Kind) -> bool {
        self.listener_count(kind) > 0
    }

    /// Drops every listener and cancels every pending delivery.
    pub fn clear(&self) {
        self.listeners.borrow_mut().clear();
        let queued: Vec<TaskHandle> = self
            .emit_queue
            .borrow_mut()
            .drain()
            .flat_map(|(_, handles)| handles)
            .collect();
        for handle in queued {
            self.scheduler.cancel(handle);
        }
    }
}

impl<E: BusEvent> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<E::Kind> = self.listeners.borrow().keys().copied().collect();
        f.debug_struct("EventBus").field("kinds", &kinds).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        Change,
        Clear,
        Show,
    }

    #[derive(Debug, Clone)]
    struct TestEvent(Kind, u32);

    impl BusEvent for TestEvent {
        type Kind = Kind;

        fn kind(&self) -> Kind {
            self.0
        }
    }

    fn bus() -> (Rc<Scheduler>, EventBus<TestEvent>) {
        let scheduler = Rc::new(Scheduler::new());
        let bus = EventBus::new(scheduler.clone());
        (scheduler, bus)
    }

    fn counting(hits: &Rc<Cell<u32>>) -> Listener<TestEvent> {
        let hits = hits.clone();
        Rc::new(move |_: &TestEvent| hits.set(hits.get() + 1))
    }

    #[test]
    fn registers_listeners_for_each_kind() {
        let (_, bus) = bus();
        let hits = Rc::new(Cell::new(0));
        bus.on(Kind::Change, counting(&hits))
            .on(Kind::Clear, counting(&hits))
            .on(Kind::Show, counting(&hits));

        assert!(bus.has_listeners(Kind::Change));
        assert!(bus.has_listeners(Kind::Clear));
        assert!(bus.has_listeners(Kind::Show));
    }

    #[test]
    fn emit_is_delivered_on_the_next_tick() {
        let (scheduler, bus) = bus();
        let hits = Rc::new(Cell::new(0));
        bus.on(Kind::Change, counting(&hits));

        bus.emit(TestEvent(Kind::Change, 1));
        assert_eq!(hits.get(), 0);

        scheduler.run_pending();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn delivers_payload_in_subscription_order() {
        let (scheduler, bus) = bus();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for tag in ["a", "b"] {
            let seen = seen.clone();
            bus.on(
                Kind::Show,
                Rc::new(move |event: &TestEvent| seen.borrow_mut().push((tag, event.1))),
            );
        }

        bus.emit(TestEvent(Kind::Show, 7));
        scheduler.run_pending();

        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn off_removes_a_specific_listener() {
        let (scheduler, bus) = bus();
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let cb1 = counting(&first);
        bus.on(Kind::Change, cb1.clone()).on(Kind::Change, counting(&second));

        bus.emit(TestEvent(Kind::Change, 1));
        scheduler.run_pending();
        bus.off(Kind::Change, Some(&cb1));
        bus.emit(TestEvent(Kind::Change, 1));
        scheduler.run_pending();

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
    }

    #[test]
    fn off_without_listener_drops_the_whole_kind() {
        let (_, bus) = bus();
        let hits = Rc::new(Cell::new(0));
        bus.on(Kind::Change, counting(&hits))
            .on(Kind::Change, counting(&hits));

        bus.off(Kind::Change, None).off(Kind::Change, None);
        assert_eq!(bus.listener_count(Kind::Change), 0);
    }

    #[test]
    fn cancel_emit_suppresses_pending_delivery() {
        let (scheduler, bus) = bus();
        let hits = Rc::new(Cell::new(0));
        bus.on(Kind::Change, counting(&hits));

        bus.emit(TestEvent(Kind::Change, 1)).cancel_emit(Kind::Change);
        scheduler.run_pending();

        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn cancel_emit_leaves_other_kinds_alone() {
        let (scheduler, bus) = bus();
        let hits = Rc::new(Cell::new(0));
        bus.on(Kind::Change, counting(&hits))
            .on(Kind::Show, counting(&hits));

        bus.emit(TestEvent(Kind::Change, 1))
            .emit(TestEvent(Kind::Show, 1))
            .cancel_emit(Kind::Change);
        scheduler.run_pending();

        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn tracked_emission_cancels_alone() {
        let (scheduler, bus) = bus();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        bus.on(
            Kind::Change,
            Rc::new(move |event: &TestEvent| sink.borrow_mut().push(event.1)),
        );

        let first = bus.emit_tracked(TestEvent(Kind::Change, 1));
        bus.emit(TestEvent(Kind::Change, 2));
        assert_eq!(first.len(), 1);
        for handle in first {
            scheduler.cancel(handle);
        }
        scheduler.run_pending();

        assert_eq!(*seen.borrow(), vec![2]);
    }

    #[test]
    fn emit_without_listeners_is_a_no_op() {
        let (scheduler, bus) = bus();
        bus.emit(TestEvent(Kind::Clear, 0));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn listeners_added_after_emit_miss_the_event() {
        let (scheduler, bus) = bus();
        let early = Rc::new(Cell::new(0));
        let late = Rc::new(Cell::new(0));
        bus.on(Kind::Show, counting(&early));

        bus.emit(TestEvent(Kind::Show, 1));
        bus.on(Kind::Show, counting(&late));
        scheduler.run_pending();

        assert_eq!(early.get(), 1);
        assert_eq!(late.get(), 0);
    }

    #[test]
    fn clear_cancels_everything() {
        let (scheduler, bus) = bus();
        let hits = Rc::new(Cell::new(0));
        bus.on(Kind::Show, counting(&hits));
        bus.emit(TestEvent(Kind::Show, 1));

        bus.clear();
        scheduler.run_pending();

        assert_eq!(hits.get(), 0);
        assert!(!bus.has_listeners(Kind::Show));
    }
}
