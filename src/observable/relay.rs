//! Replay-latest and publish-only observables.

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex};
use tokio::sync::mpsc;

use super::subscription::Subscription;

type Observer<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Registered observers in registration order.
struct ObserverList<T> {
    next_id: u64,
    entries: Vec<(u64, Observer<T>)>,
}

impl<T> ObserverList<T> {
    fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    fn insert(&mut self, observer: Observer<T>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    fn remove(&mut self, id: u64) {
        self.entries.retain(|(entry_id, _)| *entry_id != id);
    }

    fn snapshot(&self) -> Vec<Observer<T>> {
        self.entries.iter().map(|(_, o)| Arc::clone(o)).collect()
    }
}

/// Shared core of [`Relay`] and [`Signal`].
///
/// `emit` serializes notifications across threads while still allowing an
/// observer to publish again from the notifying thread. Observers are always
/// invoked with `observers` unlocked so they may subscribe or unsubscribe.
struct Hub<T> {
    emit: ReentrantMutex<()>,
    observers: Mutex<ObserverList<T>>,
}

impl<T: Send + 'static> Hub<T> {
    fn new() -> Self {
        Self {
            emit: ReentrantMutex::new(()),
            observers: Mutex::new(ObserverList::new()),
        }
    }

    fn notify(&self, value: &T) {
        let observers = self.observers.lock().snapshot();
        for observer in observers {
            observer(value);
        }
    }

    fn register(self: &Arc<Self>, observer: Observer<T>) -> Subscription {
        let id = self.observers.lock().insert(observer);
        let hub: Weak<Self> = Arc::downgrade(self);
        Subscription::new(move || {
            if let Some(hub) = hub.upgrade() {
                hub.observers.lock().remove(id);
            }
        })
    }

    fn observer_count(&self) -> usize {
        self.observers.lock().entries.len()
    }
}

/// Observable value that replays its latest value to new subscribers.
///
/// Every [`accept`](Relay::accept) stores the value and then notifies all
/// observers synchronously, in registration order. Equal values are
/// delivered again; nothing is deduplicated.
pub struct Relay<T> {
    value: Arc<Mutex<T>>,
    hub: Arc<Hub<T>>,
}

impl<T> Clone for Relay<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            hub: Arc::clone(&self.hub),
        }
    }
}

impl<T: Clone + Send + 'static> Relay<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: Arc::new(Mutex::new(initial)),
            hub: Arc::new(Hub::new()),
        }
    }

    /// Current value.
    pub fn value(&self) -> T {
        self.value.lock().clone()
    }

    /// Stores `value` and notifies every observer.
    pub fn accept(&self, value: T) {
        let _emit = self.hub.emit.lock();
        *self.value.lock() = value.clone();
        self.hub.notify(&value);
    }

    /// Calls `observer` with the current value now, then with every update.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let observer: Observer<T> = Arc::new(observer);
        let _emit = self.hub.emit.lock();
        let current = self.value();
        observer(&current);
        self.hub.register(observer)
    }

    /// Like [`subscribe`](Relay::subscribe) but skips the current value.
    pub fn subscribe_changes<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let _emit = self.hub.emit.lock();
        self.hub.register(Arc::new(observer))
    }

    /// Async receiver yielding the current value followed by every update.
    pub fn updates(&self) -> Updates<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscription = self.subscribe(move |value: &T| {
            let _ = tx.send(value.clone());
        });
        Updates::new(rx, subscription)
    }

    /// Async receiver yielding only values accepted after this call.
    pub fn changes(&self) -> Updates<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscription = self.subscribe_changes(move |value: &T| {
            let _ = tx.send(value.clone());
        });
        Updates::new(rx, subscription)
    }

    pub fn observer_count(&self) -> usize {
        self.hub.observer_count()
    }

    /// Read-only handle over the same value and observers.
    pub fn property(&self) -> Property<T> {
        Property {
            relay: self.clone(),
        }
    }
}

impl<T: Clone + Send + std::fmt::Debug + 'static> std::fmt::Debug for Relay<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relay")
            .field("value", &*self.value.lock())
            .field("observers", &self.hub.observer_count())
            .finish()
    }
}

/// Publish-only observable: events are delivered to current observers and
/// never replayed.
pub struct Signal<T> {
    hub: Arc<Hub<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            hub: Arc::clone(&self.hub),
        }
    }
}

impl<T: Clone + Send + 'static> Signal<T> {
    pub fn new() -> Self {
        Self {
            hub: Arc::new(Hub::new()),
        }
    }

    pub fn emit(&self, value: T) {
        let _emit = self.hub.emit.lock();
        self.hub.notify(&value);
    }

    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let _emit = self.hub.emit.lock();
        self.hub.register(Arc::new(observer))
    }

    pub fn updates(&self) -> Updates<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscription = self.subscribe(move |value: &T| {
            let _ = tx.send(value.clone());
        });
        Updates::new(rx, subscription)
    }

    pub fn observer_count(&self) -> usize {
        self.hub.observer_count()
    }
}

impl<T: Clone + Send + 'static> Signal<T> {
    /// Read-only handle: observers can subscribe but not emit.
    pub fn events(&self) -> Events<T> {
        Events {
            signal: self.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal").finish_non_exhaustive()
    }
}

/// Read side of a [`Relay`].
///
/// Only the owner of the relay can change the value:
///
/// ```compile_fail
/// use profile_projector::observable::Relay;
///
/// let relay = Relay::new(1);
/// relay.property().accept(2);
/// ```
pub struct Property<T> {
    relay: Relay<T>,
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            relay: self.relay.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> Property<T> {
    pub fn value(&self) -> T {
        self.relay.value()
    }

    /// See [`Relay::subscribe`].
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.relay.subscribe(observer)
    }

    pub fn subscribe_changes<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.relay.subscribe_changes(observer)
    }

    pub fn updates(&self) -> Updates<T> {
        self.relay.updates()
    }

    pub fn changes(&self) -> Updates<T> {
        self.relay.changes()
    }

    pub fn observer_count(&self) -> usize {
        self.relay.observer_count()
    }
}

impl<T: Clone + Send + std::fmt::Debug + 'static> std::fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Property").field(&self.relay.value()).finish()
    }
}

/// Read side of a [`Signal`].
///
/// ```compile_fail
/// use profile_projector::observable::Signal;
///
/// let signal: Signal<u32> = Signal::new();
/// signal.events().emit(1);
/// ```
pub struct Events<T> {
    signal: Signal<T>,
}

impl<T> Clone for Events<T> {
    fn clone(&self) -> Self {
        Self {
            signal: self.signal.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> Events<T> {
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.signal.subscribe(observer)
    }

    pub fn updates(&self) -> Updates<T> {
        self.signal.updates()
    }

    pub fn observer_count(&self) -> usize {
        self.signal.observer_count()
    }
}

impl<T> std::fmt::Debug for Events<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Events").finish_non_exhaustive()
    }
}

/// Values delivered to a subscription, buffered for async consumers.
///
/// The subscription stays registered until this receiver is dropped. The
/// buffer is unbounded: a receiver that is kept alive but never read holds
/// every delivered value. Drop it, or call [`drain`](Updates::drain), once
/// the values are no longer wanted.
pub struct Updates<T> {
    rx: mpsc::UnboundedReceiver<T>,
    _subscription: Subscription,
}

impl<T> Updates<T> {
    fn new(rx: mpsc::UnboundedReceiver<T>, subscription: Subscription) -> Self {
        Self {
            rx,
            _subscription: subscription,
        }
    }

    /// Waits for the next delivered value.
    pub async fn next(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Next already-delivered value, without waiting.
    pub fn try_next(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Drops everything delivered so far.
    pub fn drain(&mut self) -> usize {
        let mut drained = 0;
        while self.rx.try_recv().is_ok() {
            drained += 1;
        }
        drained
    }
}

impl<T> std::fmt::Debug for Updates<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Updates").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observable::SubscriptionBag;

    fn recorder<T: Clone + Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl Fn(&T) + Send + Sync) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |value: &T| sink.lock().push(value.clone()))
    }

    #[test]
    fn subscribe_replays_current_value() {
        let relay = Relay::new("initial".to_string());
        let (seen, observer) = recorder::<String>();
        let _sub = relay.subscribe(observer);
        relay.accept("next".to_string());
        assert_eq!(*seen.lock(), vec!["initial".to_string(), "next".to_string()]);
    }

    #[test]
    fn late_subscriber_sees_latest_value() {
        let relay = Relay::new(1);
        relay.accept(2);
        relay.accept(3);
        let (seen, observer) = recorder::<i32>();
        let _sub = relay.subscribe(observer);
        assert_eq!(*seen.lock(), vec![3]);
    }

    #[test]
    fn subscribe_changes_skips_current_value() {
        let relay = Relay::new(0);
        let (seen, observer) = recorder::<i32>();
        let _sub = relay.subscribe_changes(observer);
        relay.accept(1);
        assert_eq!(*seen.lock(), vec![1]);
    }

    #[test]
    fn equal_values_are_delivered_again() {
        let relay = Relay::new(0);
        let (seen, observer) = recorder::<i32>();
        let _sub = relay.subscribe_changes(observer);
        relay.accept(5);
        relay.accept(5);
        assert_eq!(*seen.lock(), vec![5, 5]);
    }

    #[test]
    fn dropping_subscription_unregisters() {
        let relay = Relay::new(0);
        let (seen, observer) = recorder::<i32>();
        let sub = relay.subscribe_changes(observer);
        assert_eq!(relay.observer_count(), 1);
        drop(sub);
        assert_eq!(relay.observer_count(), 0);
        relay.accept(1);
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn bag_releases_on_drop() {
        let relay = Relay::new(0);
        let mut bag = SubscriptionBag::new();
        relay.subscribe(|_| {}).disposed_by(&mut bag);
        relay.subscribe_changes(|_| {}).disposed_by(&mut bag);
        assert_eq!(relay.observer_count(), 2);
        drop(bag);
        assert_eq!(relay.observer_count(), 0);
    }

    #[test]
    fn observer_may_publish_reentrantly() {
        let source = Relay::new(0);
        let doubled = Relay::new(0);
        let target = doubled.clone();
        let _sub = source.subscribe_changes(move |value| target.accept(value * 2));
        source.accept(21);
        assert_eq!(doubled.value(), 42);
    }

    #[test]
    fn property_tracks_relay_value() {
        let relay = Relay::new(1);
        let property = relay.property();
        let (seen, observer) = recorder::<i32>();
        let _sub = property.subscribe_changes(observer);
        relay.accept(2);
        assert_eq!(property.value(), 2);
        assert_eq!(*seen.lock(), vec![2]);
        assert_eq!(relay.observer_count(), 1);
    }

    #[test]
    fn events_deliver_emitted_values() {
        let signal = Signal::new();
        let (seen, observer) = recorder::<String>();
        let _sub = signal.events().subscribe(observer);
        signal.emit("boom".to_string());
        assert_eq!(*seen.lock(), vec!["boom".to_string()]);
    }

    #[test]
    fn signal_does_not_replay() {
        let signal = Signal::new();
        signal.emit("lost".to_string());
        let (seen, observer) = recorder::<String>();
        let _sub = signal.subscribe(observer);
        signal.emit("kept".to_string());
        assert_eq!(*seen.lock(), vec!["kept".to_string()]);
    }

    #[tokio::test]
    async fn updates_yield_current_then_changes() {
        let relay = Relay::new(1);
        let mut updates = relay.updates();
        relay.accept(2);
        assert_eq!(updates.next().await, Some(1));
        assert_eq!(updates.next().await, Some(2));
        assert_eq!(updates.try_next(), None);
    }

    #[tokio::test]
    async fn changes_skip_current_value() {
        let relay = Relay::new(1);
        let mut changes = relay.changes();
        relay.accept(2);
        assert_eq!(changes.next().await, Some(2));
    }

    #[test]
    fn drain_discards_buffered_values() {
        let relay = Relay::new(1);
        let mut updates = relay.updates();
        relay.accept(2);
        assert_eq!(updates.drain(), 2);
        assert_eq!(updates.try_next(), None);
    }
}
