use std::any::{Any, TypeId, type_name};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

use crate::event::{Handler, Message};

/// Configuration errors raised while wiring subscribers to the bus
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BusError {
    #[error("{subscriber} is already subscribed to {message}")]
    DuplicateSubscription {
        message: &'static str,
        subscriber: &'static str,
    },
}

type ErasedHandler = Rc<dyn Fn(&dyn Any, &MessageBus)>;

struct Subscription {
    /// Address of the subscriber cell, used to reject double registration
    subscriber: usize,
    handler: ErasedHandler,
}

/// Messages queued by a handler while it runs.
///
/// The bus posts them as soon as the handler returns, before the next
/// handler of the current message is invoked.
#[derive(Default)]
pub struct Outbox {
    pending: Vec<Box<dyn FnOnce(&MessageBus)>>,
}

impl std::fmt::Debug for Outbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Outbox")
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a message for delivery once the current handler returns
    pub fn post<M: Message>(&mut self, message: M) {
        self.pending.push(Box::new(move |bus: &MessageBus| bus.post(message)));
    }

    /// Deliver every queued message, in the order it was queued
    pub fn flush(self, bus: &MessageBus) {
        for deliver in self.pending {
            deliver(bus);
        }
    }
}

/// Synchronous publish/subscribe router with exact-type dispatch
pub struct MessageBus {
    handlers: RefCell<HashMap<TypeId, Vec<Subscription>>>,
}

impl std::fmt::Debug for MessageBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count: usize = self.handlers.borrow().values().map(Vec::len).sum();
        f.debug_struct("MessageBus")
            .field("handlers", &format!("<{} handlers>", count))
            .finish()
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageBus {
    /// Creates a new message bus with no subscribers
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(HashMap::new()),
        }
    }

    /// Subscribe `subscriber` to messages of exactly type `M`.
    ///
    /// Fails immediately if the same subscriber is already registered for `M`.
    pub fn register<M, S>(&self, subscriber: &Rc<RefCell<S>>) -> Result<(), BusError>
    where
        M: Message,
        S: Handler<M> + 'static,
    {
        let key = Rc::as_ptr(subscriber) as *const () as usize;
        let mut handlers = self.handlers.borrow_mut();
        let subscriptions = handlers.entry(TypeId::of::<M>()).or_default();

        if subscriptions.iter().any(|s| s.subscriber == key) {
            return Err(BusError::DuplicateSubscription {
                message: type_name::<M>(),
                subscriber: type_name::<S>(),
            });
        }

        let target = Rc::clone(subscriber);
        let handler: ErasedHandler = Rc::new(move |message: &dyn Any, bus: &MessageBus| {
            let Some(message) = message.downcast_ref::<M>() else {
                return;
            };
            let mut outbox = Outbox::new();
            target.borrow_mut().handle(message, &mut outbox);
            outbox.flush(bus);
        });

        subscriptions.push(Subscription {
            subscriber: key,
            handler,
        });
        log::debug!("{} subscribed to {}", type_name::<S>(), type_name::<M>());
        Ok(())
    }

    /// Deliver `message` to every handler registered for its exact type.
    ///
    /// Returns only after all handlers, and everything they queued, have run.
    pub fn post<M: Message>(&self, message: M) {
        // Snapshot the handler list so handlers may post or register re-entrantly
        let handlers: Vec<ErasedHandler> = self
            .handlers
            .borrow()
            .get(&TypeId::of::<M>())
            .map(|subs| subs.iter().map(|s| Rc::clone(&s.handler)).collect())
            .unwrap_or_default();

        log::trace!("post {:?} -> {} handler(s)", message, handlers.len());

        for handler in handlers {
            handler(&message, self);
        }
    }

    /// Number of handlers registered for messages of type `M`
    pub fn subscriber_count<M: Message>(&self) -> usize {
        self.handlers
            .borrow()
            .get(&TypeId::of::<M>())
            .map_or(0, Vec::len)
    }
}
