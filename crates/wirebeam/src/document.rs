//! The layout host beams are mounted on.
//!
//! [`Document`] stands in for the rendering surface: it stores element
//! bounding boxes and the viewport size, delivers resize notifications, and
//! runs deferred timers against a manually advanced clock. Everything runs on
//! one thread; callbacks are invoked with no internal borrow held, so they may
//! read layout, mutate it, or drop subscriptions.
//!
//! # Delivery model
//!
//! - Element observers are notified when their target's size changes
//!   (including mount and unmount) and once right after observation starts
//!   if the target is already mounted. Position-only changes do not notify.
//! - Viewport observers are notified when the viewport size changes.
//! - Notifications are coalesced per observer and delivered by
//!   [`Document::run_frame`].
//! - Timers fire from [`Document::advance`], once each, in due order.
//!
//! ```
//! use std::{cell::Cell, rc::Rc};
//!
//! use wirebeam::document::{Document, ObserveTarget};
//! use wirebeam::geometry::{Bounds, Size};
//! use wirebeam::identifier::Id;
//!
//! let document = Document::new(Size::new(1280.0, 720.0));
//! let hits = Rc::new(Cell::new(0));
//!
//! let counter = Rc::clone(&hits);
//! let subscription = document.observe(ObserveTarget::Element(Id::new("panel")), move |_| {
//!     counter.set(counter.get() + 1);
//! });
//!
//! document.set_rect(Id::new("panel"), Bounds::from_rect(0.0, 0.0, 100.0, 50.0));
//! document.run_frame();
//! assert_eq!(hits.get(), 1);
//!
//! drop(subscription);
//! document.set_rect(Id::new("panel"), Bounds::from_rect(0.0, 0.0, 200.0, 50.0));
//! document.run_frame();
//! assert_eq!(hits.get(), 1);
//! ```

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
    time::Duration,
};

use indexmap::IndexMap;
use log::{debug, trace};

use wirebeam_core::{
    geometry::{Bounds, Size},
    identifier::Id,
};

use crate::{
    layout::LayoutSource,
    subscription::{Registration, Subscription},
};

/// Callback invoked by a [`Document`] notification or timer.
pub type Callback = Rc<dyn Fn(&Document)>;

/// What an observer watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObserveTarget {
    /// Size changes of one element
    Element(Id),
    /// Size changes of the viewport
    Viewport,
}

struct Observer {
    target: ObserveTarget,
    callback: Callback,
    pending: bool,
}

struct Timer {
    due: Duration,
    callback: Callback,
}

#[derive(Default)]
struct Registry {
    next_key: u64,
    observers: IndexMap<u64, Observer>,
    timers: IndexMap<u64, Timer>,
}

impl Registry {
    fn next_key(&mut self) -> u64 {
        let key = self.next_key;
        self.next_key += 1;
        key
    }

    fn remove(&mut self, registration: Registration) -> Option<Callback> {
        match registration {
            Registration::Observer(key) => self.observers.shift_remove(&key).map(|o| o.callback),
            Registration::Timer(key) => self.timers.shift_remove(&key).map(|t| t.callback),
        }
    }

    fn contains(&self, registration: Registration) -> bool {
        match registration {
            Registration::Observer(key) => self.observers.contains_key(&key),
            Registration::Timer(key) => self.timers.contains_key(&key),
        }
    }
}

/// Shared state behind a [`Document`]. Subscriptions hold a weak reference to it.
pub(crate) struct Host {
    layout: RefCell<IndexMap<Id, Bounds>>,
    viewport: Cell<Size>,
    clock: Cell<Duration>,
    registry: RefCell<Registry>,
}

impl Host {
    /// Removes a registration. Returns true if it was still registered.
    pub(crate) fn release(&self, registration: Registration) -> bool {
        let removed = self.registry.borrow_mut().remove(registration);
        // Dropped outside the borrow: a callback may own subscriptions of its own.
        let released = removed.is_some();
        drop(removed);
        released
    }

    pub(crate) fn is_registered(&self, registration: Registration) -> bool {
        self.registry.borrow().contains(registration)
    }
}

/// Single-threaded layout host. Cloning yields another handle to the same document.
#[derive(Clone)]
pub struct Document {
    host: Rc<Host>,
}

impl Document {
    pub fn new(viewport: Size) -> Self {
        Self {
            host: Rc::new(Host {
                layout: RefCell::new(IndexMap::new()),
                viewport: Cell::new(viewport),
                clock: Cell::new(Duration::ZERO),
                registry: RefCell::new(Registry::default()),
            }),
        }
    }

    /// Mounts `element` or updates its bounding box.
    ///
    /// Observers of the element are notified if this mounts it or changes its size.
    pub fn set_rect(&self, element: Id, bounds: Bounds) {
        let previous = self.host.layout.borrow_mut().insert(element, bounds);
        let resized = previous.is_none_or(|previous| previous.to_size() != bounds.to_size());

        trace!(element = element.to_string(), bounds:?, resized; "Element laid out");
        if resized {
            self.notify(ObserveTarget::Element(element));
        }
    }

    /// Removes `element` from the layout. Returns false if it was not mounted.
    pub fn unmount(&self, element: Id) -> bool {
        let removed = self.host.layout.borrow_mut().shift_remove(&element);
        if removed.is_some() {
            debug!(element = element.to_string(); "Element unmounted");
            self.notify(ObserveTarget::Element(element));
        }
        removed.is_some()
    }

    pub fn viewport(&self) -> Size {
        self.host.viewport.get()
    }

    /// Resizes the viewport, notifying viewport observers if the size changed.
    pub fn resize_viewport(&self, size: Size) {
        let previous = self.host.viewport.replace(size);
        if previous != size {
            debug!(width = size.width(), height = size.height(); "Viewport resized");
            self.notify(ObserveTarget::Viewport);
        }
    }

    /// Current time on the document clock.
    pub fn now(&self) -> Duration {
        self.host.clock.get()
    }

    /// Starts observing `target`. The observation lasts as long as the returned subscription.
    pub fn observe(
        &self,
        target: ObserveTarget,
        callback: impl Fn(&Document) + 'static,
    ) -> Subscription {
        let initial = match target {
            ObserveTarget::Element(element) => self.host.layout.borrow().contains_key(&element),
            ObserveTarget::Viewport => false,
        };

        let key = {
            let mut registry = self.host.registry.borrow_mut();
            let key = registry.next_key();
            registry.observers.insert(
                key,
                Observer {
                    target,
                    callback: Rc::new(callback),
                    pending: initial,
                },
            );
            key
        };

        debug!(key, target:?; "Observer registered");
        Subscription::new(Rc::downgrade(&self.host), Registration::Observer(key))
    }

    /// Schedules `callback` to run once, `delay` after the current document time.
    ///
    /// Dropping the returned subscription before it fires cancels the timer.
    pub fn set_timeout(
        &self,
        delay: Duration,
        callback: impl Fn(&Document) + 'static,
    ) -> Subscription {
        let due = self.now() + delay;
        let key = {
            let mut registry = self.host.registry.borrow_mut();
            let key = registry.next_key();
            registry.timers.insert(
                key,
                Timer {
                    due,
                    callback: Rc::new(callback),
                },
            );
            key
        };

        debug!(key, due_ms = due.as_millis() as u64; "Timer scheduled");
        Subscription::new(Rc::downgrade(&self.host), Registration::Timer(key))
    }

    /// Delivers pending resize notifications. Returns the number delivered.
    pub fn run_frame(&self) -> usize {
        let pending: Vec<(u64, Callback)> = {
            let mut registry = self.host.registry.borrow_mut();
            registry
                .observers
                .iter_mut()
                .filter(|(_, observer)| observer.pending)
                .map(|(key, observer)| {
                    observer.pending = false;
                    (*key, Rc::clone(&observer.callback))
                })
                .collect()
        };

        let mut delivered = 0;
        for (key, callback) in pending {
            // An earlier callback in this frame may have cancelled this one.
            if !self.host.is_registered(Registration::Observer(key)) {
                continue;
            }
            callback(self);
            delivered += 1;
        }

        trace!(delivered; "Frame complete");
        delivered
    }

    /// Moves the clock forward by `elapsed` and fires every timer now due.
    ///
    /// Returns the number of timers fired.
    pub fn advance(&self, elapsed: Duration) -> usize {
        let now = self.now() + elapsed;
        self.host.clock.set(now);

        let mut fired = 0;
        while let Some(timer) = self.take_due_timer(now) {
            (timer.callback)(self);
            fired += 1;
        }

        trace!(now_ms = now.as_millis() as u64, fired; "Clock advanced");
        fired
    }

    /// Advances the clock, then runs a frame. Returns the total callbacks invoked.
    pub fn tick(&self, elapsed: Duration) -> usize {
        self.advance(elapsed) + self.run_frame()
    }

    /// Number of live observers.
    pub fn observer_count(&self) -> usize {
        self.host.registry.borrow().observers.len()
    }

    /// Number of timers that have neither fired nor been cancelled.
    pub fn timer_count(&self) -> usize {
        self.host.registry.borrow().timers.len()
    }

    fn notify(&self, target: ObserveTarget) {
        let mut registry = self.host.registry.borrow_mut();
        for observer in registry.observers.values_mut() {
            if observer.target == target {
                observer.pending = true;
            }
        }
    }

    fn take_due_timer(&self, now: Duration) -> Option<Timer> {
        let mut registry = self.host.registry.borrow_mut();
        let key = registry
            .timers
            .iter()
            .filter(|(_, timer)| timer.due <= now)
            .min_by_key(|(key, timer)| (timer.due, **key))
            .map(|(key, _)| *key)?;
        registry.timers.shift_remove(&key)
    }
}

impl LayoutSource for Document {
    fn bounding_rect(&self, element: Id) -> Option<Bounds> {
        self.host.layout.borrow().get(&element).copied()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("viewport", &self.viewport())
            .field("now", &self.now())
            .field("elements", &self.host.layout.borrow().len())
            .field("observers", &self.observer_count())
            .field("timers", &self.timer_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn counter() -> (Rc<Cell<usize>>, impl Fn(&Document) + 'static) {
        let count = Rc::new(Cell::new(0));
        let inner = Rc::clone(&count);
        (count, move |_: &Document| inner.set(inner.get() + 1))
    }

    fn doc() -> Document {
        Document::new(Size::new(1024.0, 768.0))
    }

    #[test]
    fn test_set_rect_and_unmount() {
        let document = doc();
        let id = Id::new("doc-card");
        let rect = Bounds::from_rect(10.0, 10.0, 40.0, 40.0);

        document.set_rect(id, rect);
        assert_eq!(document.bounding_rect(id), Some(rect));

        assert!(document.unmount(id));
        assert_eq!(document.bounding_rect(id), None);
        assert!(!document.unmount(id));
    }

    #[test]
    fn test_observe_mounted_element_gets_initial_notification() {
        let document = doc();
        let id = Id::new("doc-initial");
        document.set_rect(id, Bounds::from_rect(0.0, 0.0, 10.0, 10.0));

        let (count, callback) = counter();
        let _subscription = document.observe(ObserveTarget::Element(id), callback);

        assert_eq!(count.get(), 0, "delivery waits for the next frame");
        assert_eq!(document.run_frame(), 1);
        assert_eq!(count.get(), 1);
        assert_eq!(document.run_frame(), 0);
    }

    #[test]
    fn test_observe_unmounted_element_waits_for_mount() {
        let document = doc();
        let id = Id::new("doc-late");
        let (count, callback) = counter();
        let _subscription = document.observe(ObserveTarget::Element(id), callback);

        document.run_frame();
        assert_eq!(count.get(), 0);

        document.set_rect(id, Bounds::from_rect(0.0, 0.0, 10.0, 10.0));
        document.run_frame();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_position_only_change_does_not_notify() {
        let document = doc();
        let id = Id::new("doc-moving");
        document.set_rect(id, Bounds::from_rect(0.0, 0.0, 10.0, 10.0));
        let (count, callback) = counter();
        let _subscription = document.observe(ObserveTarget::Element(id), callback);
        document.run_frame();

        document.set_rect(id, Bounds::from_rect(50.0, 50.0, 10.0, 10.0));
        document.run_frame();
        assert_eq!(count.get(), 1);

        document.set_rect(id, Bounds::from_rect(50.0, 50.0, 20.0, 10.0));
        document.run_frame();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_notifications_coalesce_within_a_frame() {
        let document = doc();
        let id = Id::new("doc-coalesce");
        let (count, callback) = counter();
        let _subscription = document.observe(ObserveTarget::Element(id), callback);

        for width in [10.0, 20.0, 30.0] {
            document.set_rect(id, Bounds::from_rect(0.0, 0.0, width, 10.0));
        }
        assert_eq!(document.run_frame(), 1);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_viewport_observer() {
        let document = doc();
        let (count, callback) = counter();
        let _subscription = document.observe(ObserveTarget::Viewport, callback);

        document.run_frame();
        assert_eq!(count.get(), 0);

        document.resize_viewport(Size::new(1024.0, 768.0));
        document.run_frame();
        assert_eq!(count.get(), 0, "same size is not a resize");

        document.resize_viewport(Size::new(390.0, 844.0));
        document.run_frame();
        assert_eq!(count.get(), 1);
        assert_eq!(document.viewport(), Size::new(390.0, 844.0));
    }

    #[test]
    fn test_dropping_subscription_stops_delivery() {
        let document = doc();
        let id = Id::new("doc-drop");
        let (count, callback) = counter();
        let subscription = document.observe(ObserveTarget::Element(id), callback);
        assert_eq!(document.observer_count(), 1);

        drop(subscription);
        assert_eq!(document.observer_count(), 0);

        document.set_rect(id, Bounds::from_rect(0.0, 0.0, 10.0, 10.0));
        document.run_frame();
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_timer_fires_once_when_due() {
        let document = doc();
        let (count, callback) = counter();
        let subscription = document.set_timeout(Duration::from_millis(100), callback);

        assert_eq!(document.advance(Duration::from_millis(99)), 0);
        assert!(subscription.is_active());

        assert_eq!(document.advance(Duration::from_millis(1)), 1);
        assert_eq!(count.get(), 1);
        assert!(!subscription.is_active());

        document.advance(Duration::from_secs(10));
        assert_eq!(count.get(), 1);
        assert_eq!(document.now(), Duration::from_millis(10_100));
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let document = doc();
        let (count, callback) = counter();
        let subscription = document.set_timeout(Duration::from_millis(100), callback);

        subscription.cancel();
        assert_eq!(document.timer_count(), 0);
        document.advance(Duration::from_secs(1));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_timers_fire_in_due_order() {
        let document = doc();
        let order = Rc::new(RefCell::new(Vec::new()));

        let mut subscriptions = Vec::new();
        for (label, delay) in [("late", 300), ("early", 100), ("middle", 200)] {
            let order = Rc::clone(&order);
            subscriptions.push(document.set_timeout(Duration::from_millis(delay), move |_| {
                order.borrow_mut().push(label);
            }));
        }

        assert_eq!(document.advance(Duration::from_secs(1)), 3);
        assert_eq!(*order.borrow(), vec!["early", "middle", "late"]);
    }

    #[test]
    fn test_callback_may_cancel_a_later_observer() {
        let document = doc();
        let id = Id::new("doc-reentrant");
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let slot = Rc::clone(&victim);
        let _first = document.observe(ObserveTarget::Element(id), move |_| {
            slot.borrow_mut().take();
        });
        let (count, callback) = counter();
        *victim.borrow_mut() = Some(document.observe(ObserveTarget::Element(id), callback));

        document.set_rect(id, Bounds::from_rect(0.0, 0.0, 10.0, 10.0));
        assert_eq!(document.run_frame(), 1);
        assert_eq!(count.get(), 0);
        assert_eq!(document.observer_count(), 1);
    }

    #[test]
    fn test_callback_may_read_and_write_layout() {
        let document = doc();
        let source = Id::new("doc-source");
        let mirror = Id::new("doc-mirror");

        let _subscription = document.observe(ObserveTarget::Element(source), move |doc| {
            if let Some(rect) = doc.bounding_rect(source) {
                doc.set_rect(
                    mirror,
                    rect.translate(wirebeam_core::geometry::Point::new(0.0, 100.0)),
                );
            }
        });

        document.set_rect(source, Bounds::from_rect(5.0, 5.0, 10.0, 10.0));
        document.run_frame();
        assert_eq!(
            document.bounding_rect(mirror),
            Some(Bounds::from_rect(5.0, 105.0, 10.0, 10.0))
        );
    }

    #[test]
    fn test_subscription_outliving_document_is_inert() {
        let document = doc();
        let (_count, callback) = counter();
        let subscription = document.set_timeout(Duration::from_millis(5), callback);

        drop(document);
        assert!(!subscription.is_active());
        drop(subscription);
    }
}
