//! String-keyed listener registry with synchronous snapshot dispatch.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::event::{Event, TargetId};
use super::listener::Listener;

/// Most types have one or two listeners; keep them inline.
type ListenerList = SmallVec<[Listener; 2]>;

/// Ordered listener table keyed by event type.
///
/// All methods take `&self`; state lives behind a mutex that is held only
/// for table manipulation, never while a listener runs. Listeners may
/// therefore re-enter any operation (including a nested dispatch) from
/// inside a callback.
///
/// Invariant: no entry is ever an empty list. Removing the last listener
/// for a type deletes the entry, so `has_listener` is a single key lookup.
///
/// Absent types, unknown listeners, and empty type strings are silent
/// no-ops throughout; none of these operations can fail.
pub struct ListenerRegistry {
    owner: Option<TargetId>,
    table: Mutex<FxHashMap<String, ListenerList>>,
}

impl ListenerRegistry {
    /// Create an anonymous registry. Dispatched events get no default
    /// target.
    pub fn new() -> Self {
        Self {
            owner: None,
            table: Mutex::new(FxHashMap::default()),
        }
    }

    /// Create a registry owned by `owner`. Dispatched events have their
    /// target set to this identity unless an explicit target is supplied.
    pub fn for_owner(owner: impl Into<TargetId>) -> Self {
        Self {
            owner: Some(owner.into()),
            table: Mutex::new(FxHashMap::default()),
        }
    }

    /// The identity dispatched events are targeted at by default.
    pub fn owner(&self) -> Option<&TargetId> {
        self.owner.as_ref()
    }

    // A poisoned lock means a listener panicked mid-registration on another
    // thread; the table itself is still structurally sound.
    fn table(&self) -> MutexGuard<'_, FxHashMap<String, ListenerList>> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `listener` for one or more space-separated event types.
    ///
    /// Re-adding an identical handle for a type it is already registered
    /// under moves it to the end of that type's list instead of duplicating
    /// it. Returns the handle so callers can define-and-register inline and
    /// keep it for later removal.
    pub fn add_listener(&self, types: &str, listener: Listener) -> Listener {
        let mut table = self.table();
        for ty in split_types(types) {
            if let Some(list) = table.get_mut(ty) {
                list.retain(|l| *l != listener);
            }
            table.entry(ty.to_owned()).or_default().push(listener.clone());
            trace!(event_type = ty, "listener added");
        }
        listener
    }

    /// Remove `listener` from one or more space-separated event types.
    ///
    /// At most one occurrence is removed per type. Unknown types and
    /// unregistered listeners are ignored.
    pub fn remove_listener(&self, types: &str, listener: &Listener) {
        let mut table = self.table();
        for ty in split_types(types) {
            let Some(list) = table.get_mut(ty) else {
                continue;
            };
            if let Some(pos) = list.iter().position(|l| l == listener) {
                list.remove(pos);
                trace!(event_type = ty, "listener removed");
            }
            if list.is_empty() {
                table.remove(ty);
            }
        }
    }

    /// Remove every listener for the given space-separated types, or every
    /// listener for every type when `types` is `None`.
    pub fn remove_all_listeners(&self, types: Option<&str>) {
        let mut table = self.table();
        match types {
            Some(types) if !types.trim().is_empty() => {
                for ty in split_types(types) {
                    table.remove(ty);
                    debug!(event_type = ty, "all listeners removed");
                }
            }
            _ => {
                table.clear();
                debug!("listener table cleared");
            }
        }
    }

    /// Whether at least one listener is registered for `event_type`.
    pub fn has_listener(&self, event_type: &str) -> bool {
        self.table().contains_key(event_type)
    }

    /// Number of listeners registered for `event_type`.
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.table().get(event_type).map_or(0, |list| list.len())
    }

    /// Dispatch `event` to every listener registered for its type, in
    /// registration order.
    ///
    /// Returns `true` if any listener returned `true`; every listener runs
    /// regardless of earlier results. When no listener is registered for
    /// the type, returns `false` without touching the event. Otherwise the
    /// event's target is set to `target`, falling back to the registry
    /// owner.
    ///
    /// The listener list is snapshotted before iteration: listeners added
    /// or removed by a callback take effect from the next dispatch, never
    /// the in-flight one. A panicking listener aborts the rest of the pass;
    /// panics are not caught here.
    pub fn dispatch(&self, event: impl Into<Event>, target: Option<TargetId>) -> bool {
        let mut event = event.into();

        // Snapshot under the lock, run callbacks outside it.
        let snapshot: ListenerList = {
            let table = self.table();
            match table.get(event.event_type()) {
                Some(list) => list.clone(),
                None => return false,
            }
        };

        if let Some(target) = target.or_else(|| self.owner.clone()) {
            event.set_target(target);
        }

        debug!(
            event_type = event.event_type(),
            listeners = snapshot.len(),
            "dispatching event"
        );

        let mut handled = false;
        for listener in &snapshot {
            handled |= listener.invoke(&event);
        }
        handled
    }
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[EventDispatcher]")
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table();
        f.debug_struct("ListenerRegistry")
            .field("owner", &self.owner)
            .field("types", &table.len())
            .finish()
    }
}

fn split_types(types: &str) -> impl Iterator<Item = &str> {
    types.split(' ').filter(|ty| !ty.is_empty())
}
