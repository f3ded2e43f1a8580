mod bus;
mod events;
mod handlers;

use std::any::Any;
use std::fmt::Debug;

pub use bus::{BusError, MessageBus, Outbox};
pub use events::*;

/// Marker for values that can travel over the [`MessageBus`].
///
/// A message's identity is its concrete type; handlers never see messages
/// of any other type, even closely related ones.
pub trait Message: Any + Debug {}

/// Implemented once per message type a subscriber wants to receive
pub trait Handler<M: Message> {
    fn handle(&mut self, message: &M, outbox: &mut Outbox);
}
