//! Core event dispatch capability for Relay.
//! Event envelope, listener registry, and the `EventDispatcher` trait that
//! grants any host type the five dispatch operations by composition.

pub mod errors;
pub mod events;
pub mod tracing;

pub use errors::EventError;
pub use events::{Event, EventDispatcher, EventHandler, Listener, ListenerRegistry, TargetId};
