//! Observable value cell.
//!
//! [`Published`] keeps the current value in a `tokio::sync::watch` channel for
//! async observers and additionally fans every change out to synchronous
//! sinks. Sinks run on the publishing thread after the value is stored, with no
//! lock held, so a sink may publish again without deadlocking.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, Weak};

use tokio::sync::watch;

type Sink<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct SinkRegistry<T> {
    next_id: u64,
    sinks: BTreeMap<u64, Sink<T>>,
}

impl<T> SinkRegistry<T> {
    fn new() -> Self {
        Self {
            next_id: 0,
            sinks: BTreeMap::new(),
        }
    }
}

pub struct Published<T> {
    tx: watch::Sender<T>,
    sinks: Arc<Mutex<SinkRegistry<T>>>,
}

impl<T> Published<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self {
            tx,
            sinks: Arc::new(Mutex::new(SinkRegistry::new())),
        }
    }

    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Async observer; starts marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Stores `value` without notifying sinks. Callers follow up with
    /// [`notify`](Self::notify) once their own locks are released.
    pub fn store(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Delivers the latest stored value to every registered sink.
    pub fn notify(&self) {
        let sinks: Vec<Sink<T>> = match self.sinks.lock() {
            Ok(registry) => registry.sinks.values().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().sinks.values().cloned().collect(),
        };
        if sinks.is_empty() {
            return;
        }
        let value = self.get();
        for sink in sinks {
            sink(&value);
        }
    }

    pub fn publish(&self, value: T) {
        self.store(value);
        self.notify();
    }

    /// Registers `f`, calls it once with the current value and returns a guard
    /// that removes it again.
    pub fn sink<F>(&self, f: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let sink: Sink<T> = Arc::new(f);
        let id = {
            let mut registry = match self.sinks.lock() {
                Ok(registry) => registry,
                Err(poisoned) => poisoned.into_inner(),
            };
            let id = registry.next_id;
            registry.next_id += 1;
            registry.sinks.insert(id, sink.clone());
            id
        };

        sink(&self.get());

        let weak: Weak<Mutex<SinkRegistry<T>>> = Arc::downgrade(&self.sinks);
        let source = weak.clone();
        Subscription::new(move || source.strong_count() > 0, move || {
            if let Some(registry) = weak.upgrade() {
                let mut registry = match registry.lock() {
                    Ok(registry) => registry,
                    Err(poisoned) => poisoned.into_inner(),
                };
                registry.sinks.remove(&id);
            }
        })
    }

    pub fn sink_count(&self) -> usize {
        match self.sinks.lock() {
            Ok(registry) => registry.sinks.len(),
            Err(poisoned) => poisoned.into_inner().sinks.len(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Published<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Published")
            .field("value", &*self.tx.borrow())
            .finish()
    }
}

/// Cancellation guard for a sink. Dropping it cancels the sink.
#[must_use = "dropping a Subscription cancels it immediately"]
pub struct Subscription {
    source_alive: Box<dyn Fn() -> bool + Send + Sync>,
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    fn new<A, F>(source_alive: A, cancel: F) -> Self
    where
        A: Fn() -> bool + Send + Sync + 'static,
        F: FnOnce() + Send + Sync + 'static,
    {
        Self {
            source_alive: Box::new(source_alive),
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        self.run_cancel();
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }

    /// False once the publishing cell has been dropped.
    pub fn is_source_alive(&self) -> bool {
        (self.source_alive)()
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
