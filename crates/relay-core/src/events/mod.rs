//! Event system for Relay.
//! String-keyed listener registry, synchronous snapshot dispatch, capability
//! trait for host types.

pub mod dispatcher;
pub mod event;
pub mod listener;
pub mod registry;

pub use dispatcher::EventDispatcher;
pub use event::{Event, TargetId};
pub use listener::{EventHandler, Listener};
pub use registry::ListenerRegistry;
