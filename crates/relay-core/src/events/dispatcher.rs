//! EventDispatcher — the dispatch capability as a composable trait.

use super::event::{Event, TargetId};
use super::listener::Listener;
use super::registry::ListenerRegistry;

/// Grants a host type the full event dispatch surface by composition.
///
/// Embed a [`ListenerRegistry`] field and implement the one accessor; the
/// five operations are provided methods delegating to it. No inheritance,
/// no wrapper types:
///
/// ```
/// use relay_core::{EventDispatcher, Listener, ListenerRegistry};
///
/// struct Stage {
///     listeners: ListenerRegistry,
/// }
///
/// impl EventDispatcher for Stage {
///     fn listeners(&self) -> &ListenerRegistry {
///         &self.listeners
///     }
/// }
///
/// let stage = Stage {
///     listeners: ListenerRegistry::for_owner("stage"),
/// };
/// let seen = stage.add_event_listener("tick", Listener::callback(|_| true));
/// assert!(stage.dispatch_event("tick"));
/// stage.remove_event_listener("tick", &seen);
/// assert!(!stage.has_event_listener("tick"));
/// ```
pub trait EventDispatcher {
    /// The embedded listener registry backing this dispatcher.
    fn listeners(&self) -> &ListenerRegistry;

    /// Register `listener` for one or more space-separated event types and
    /// return the handle. Re-adding an identical handle is idempotent per
    /// type.
    fn add_event_listener(&self, types: &str, listener: Listener) -> Listener {
        self.listeners().add_listener(types, listener)
    }

    /// Remove `listener` from one or more space-separated event types.
    /// Silent no-op for unknown types or unregistered listeners.
    fn remove_event_listener(&self, types: &str, listener: &Listener) {
        self.listeners().remove_listener(types, listener);
    }

    /// Remove all listeners for the given space-separated types, or all
    /// listeners outright when `types` is `None`.
    fn remove_all_event_listeners(&self, types: Option<&str>) {
        self.listeners().remove_all_listeners(types);
    }

    /// Dispatch an event (or a bare type string) to its listeners. The
    /// event's target is set to the registry owner. Returns `true` if any
    /// listener returned `true`.
    fn dispatch_event(&self, event: impl Into<Event>) -> bool {
        self.listeners().dispatch(event, None)
    }

    /// Dispatch with an explicit target overriding the registry owner.
    fn dispatch_event_to(&self, event: impl Into<Event>, target: impl Into<TargetId>) -> bool {
        self.listeners().dispatch(event, Some(target.into()))
    }

    /// Whether at least one listener is registered for `event_type`.
    fn has_event_listener(&self, event_type: &str) -> bool {
        self.listeners().has_listener(event_type)
    }

    /// Number of listeners registered for `event_type`.
    fn listener_count(&self, event_type: &str) -> usize {
        self.listeners().listener_count(event_type)
    }
}

/// A registry is its own dispatcher.
impl EventDispatcher for ListenerRegistry {
    fn listeners(&self) -> &ListenerRegistry {
        self
    }
}
