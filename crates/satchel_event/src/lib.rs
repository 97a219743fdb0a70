//! # satchel_event - Per-instance Signals
//!
//! Small observer primitives shared by the meter and inventory crates:
//! - [`Signal`]: a listener set owned by a single value (a meter, an entry, a session)
//! - Priority-based delivery within a signal
//! - [`EventChannel`]: a thread-safe fire-and-forget queue
//! - [`Recorder`]: a listener that captures events for later inspection
//!
//! There is no global bus. Every observable value owns its own [`Signal`], and
//! observers subscribe to exactly the instances they care about.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// Listener priority
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Low = 0,
    Normal = 1,
    High = 2,
    Critical = 3,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Normal
    }
}

/// Listener function type
pub type Listener<E> = Box<dyn Fn(&E) + Send + Sync>;

/// Subscriber ID, unique within the signal that issued it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u64);

/// Listener set owned by one observable value.
///
/// Emission is synchronous: `emit` returns after every listener has run.
/// Higher priorities run first; equal priorities run in registration order.
pub struct Signal<E> {
    listeners: Vec<(SubscriberId, Priority, Listener<E>)>,
    next_subscriber_id: u64,
}

impl<E> Signal<E> {
    /// Create an empty signal
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_subscriber_id: 1,
        }
    }

    /// Subscribe a listener
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriberId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.subscribe_with_priority(listener, Priority::Normal)
    }

    /// Subscribe with priority
    pub fn subscribe_with_priority<F>(&mut self, listener: F, priority: Priority) -> SubscriberId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = SubscriberId(self.next_subscriber_id);
        self.next_subscriber_id += 1;

        self.listeners.push((id, priority, Box::new(listener)));

        // Stable sort keeps registration order within a priority
        self.listeners.sort_by(|a, b| b.1.cmp(&a.1));

        id
    }

    /// Unsubscribe. Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub_id, _, _)| *sub_id != id);
        self.listeners.len() != before
    }

    /// Deliver an event to every listener
    pub fn emit(&self, event: &E) {
        for (_, _, listener) in &self.listeners {
            listener(event);
        }
    }

    /// Number of listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Check if nobody is listening
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Drop all listeners
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

impl<E> Default for Signal<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Signal<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Channel for single-type events
pub struct EventChannel<E> {
    queue: Mutex<VecDeque<E>>,
}

impl<E> EventChannel<E> {
    /// Create a new channel
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
        }
    }

    /// Send an event
    pub fn send(&self, event: E) {
        self.queue.lock().push_back(event);
    }

    /// Receive an event
    pub fn receive(&self) -> Option<E> {
        self.queue.lock().pop_front()
    }

    /// Drain all events
    pub fn drain(&self) -> Vec<E> {
        self.queue.lock().drain(..).collect()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Get pending count
    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }
}

impl<E> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Captures every event it is subscribed to.
///
/// Clones share the same buffer, so one clone can be handed to a signal
/// while another is kept for inspection.
pub struct Recorder<E> {
    events: Arc<Mutex<Vec<E>>>,
}

impl<E: Clone + Send + 'static> Recorder<E> {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Listener closure that appends to this recorder
    pub fn listener(&self) -> impl Fn(&E) + Send + Sync + 'static {
        let events = Arc::clone(&self.events);
        move |event: &E| events.lock().push(event.clone())
    }

    /// Copy of everything recorded so far
    pub fn snapshot(&self) -> Vec<E> {
        self.events.lock().clone()
    }

    /// Take everything recorded so far, leaving the recorder empty
    pub fn take(&self) -> Vec<E> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl<E> Clone for Recorder<E> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
        }
    }
}

impl<E: Clone + Send + 'static> Default for Recorder<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Prelude
pub mod prelude {
    pub use crate::{EventChannel, Listener, Priority, Recorder, Signal, SubscriberId};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Clone, Debug, PartialEq)]
    struct TestEvent(i32);

    #[test]
    fn test_signal_emit() {
        let mut signal: Signal<TestEvent> = Signal::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        signal.subscribe(move |_: &TestEvent| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        signal.emit(&TestEvent(42));
        signal.emit(&TestEvent(43));

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unsubscribe() {
        let mut signal: Signal<TestEvent> = Signal::new();
        let recorder: Recorder<TestEvent> = Recorder::new();

        let id = signal.subscribe(recorder.listener());
        signal.emit(&TestEvent(1));

        assert!(signal.unsubscribe(id));
        assert!(!signal.unsubscribe(id));
        signal.emit(&TestEvent(2));

        assert_eq!(recorder.snapshot(), vec![TestEvent(1)]);
        assert!(signal.is_empty());
    }

    #[test]
    fn test_priority() {
        let mut signal: Signal<TestEvent> = Signal::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        let order1 = order.clone();
        let order2 = order.clone();
        let order3 = order.clone();

        signal.subscribe_with_priority(
            move |e: &TestEvent| {
                order1.lock().push(("low", e.0));
            },
            Priority::Low,
        );
        signal.subscribe_with_priority(
            move |e: &TestEvent| {
                order2.lock().push(("high", e.0));
            },
            Priority::High,
        );
        signal.subscribe(move |e: &TestEvent| {
            order3.lock().push(("normal", e.0));
        });

        signal.emit(&TestEvent(42));

        let received = order.lock();
        assert_eq!(received[0].0, "high");
        assert_eq!(received[1].0, "normal");
        assert_eq!(received[2].0, "low");
    }

    #[test]
    fn test_event_channel() {
        let channel: EventChannel<TestEvent> = EventChannel::new();

        channel.send(TestEvent(1));
        channel.send(TestEvent(2));
        channel.send(TestEvent(3));

        assert_eq!(channel.len(), 3);
        assert_eq!(channel.receive(), Some(TestEvent(1)));

        let events = channel.drain();
        assert_eq!(events, vec![TestEvent(2), TestEvent(3)]);
        assert!(channel.is_empty());
    }

    #[test]
    fn test_recorder_take() {
        let recorder: Recorder<TestEvent> = Recorder::new();
        let listener = recorder.listener();

        listener(&TestEvent(7));
        assert_eq!(recorder.len(), 1);
        assert_eq!(recorder.take(), vec![TestEvent(7)]);
        assert!(recorder.is_empty());
    }
}
