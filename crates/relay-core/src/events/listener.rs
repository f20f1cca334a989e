//! Listener handles: plain callbacks or handler objects, identity-compared.

use std::fmt;
use std::sync::Arc;

use super::event::Event;

/// Boxed callback form of a listener. Returns whether it handled the event.
pub type ListenerFn = dyn Fn(&Event) -> bool + Send + Sync;

/// Handler-object form of a listener.
///
/// All state the handler needs lives on the implementing type; `Send + Sync`
/// so handles can be shared across threaded hosts.
pub trait EventHandler: Send + Sync {
    /// Handle a dispatched event. Return `true` if the event was handled.
    fn handle_event(&self, event: &Event) -> bool;
}

/// A registered listener: either a plain callback or a handler object.
///
/// Cloning is a ref-count bump; the clone and the original compare equal.
/// Equality is reference identity (`Arc::ptr_eq`) — two separately created
/// listeners with identical behavior are distinct, which is what removal
/// keys on.
#[derive(Clone)]
pub enum Listener {
    Callback(Arc<ListenerFn>),
    Handler(Arc<dyn EventHandler>),
}

impl Listener {
    /// Wrap a callback as a listener handle.
    pub fn callback(f: impl Fn(&Event) -> bool + Send + Sync + 'static) -> Self {
        Self::Callback(Arc::new(f))
    }

    /// Wrap a handler object as a listener handle.
    pub fn handler(h: Arc<dyn EventHandler>) -> Self {
        Self::Handler(h)
    }

    /// Invoke the listener for `event`.
    pub fn invoke(&self, event: &Event) -> bool {
        match self {
            Self::Callback(f) => f(event),
            Self::Handler(h) => h.handle_event(event),
        }
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Callback(a), Self::Callback(b)) => Arc::ptr_eq(a, b),
            (Self::Handler(a), Self::Handler(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callback(cb) => write!(f, "Listener::Callback({:p})", Arc::as_ptr(cb)),
            Self::Handler(h) => write!(f, "Listener::Handler({:p})", Arc::as_ptr(h)),
        }
    }
}
