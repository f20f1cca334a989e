//! Tests for registry bookkeeping: removal semantics, bulk removal,
//! snapshot/reentrancy guarantees, and a model-based property test.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use proptest::prelude::*;

use relay_core::{Listener, ListenerRegistry};

fn counting_listener(count: &Arc<AtomicUsize>) -> Listener {
    let count = Arc::clone(count);
    Listener::callback(move |_| {
        count.fetch_add(1, Ordering::Relaxed);
        true
    })
}

#[test]
fn removing_last_listener_clears_the_type() {
    let registry = ListenerRegistry::new();
    let count = Arc::new(AtomicUsize::new(0));

    let listener = registry.add_listener("tick", counting_listener(&count));
    registry.remove_listener("tick", &listener);

    assert!(!registry.has_listener("tick"));
    assert!(!registry.dispatch("tick", None));
    assert_eq!(count.load(Ordering::Relaxed), 0);
}

#[test]
fn removal_is_scoped_to_the_named_types() {
    let registry = ListenerRegistry::new();
    let count = Arc::new(AtomicUsize::new(0));

    let listener = registry.add_listener("tick render", counting_listener(&count));
    registry.remove_listener("tick", &listener);

    assert!(!registry.has_listener("tick"));
    assert!(registry.has_listener("render"));
    assert!(registry.dispatch("render", None));
    assert_eq!(count.load(Ordering::Relaxed), 1);
}

#[test]
fn removing_unknown_type_or_listener_is_a_silent_noop() {
    let registry = ListenerRegistry::new();
    let stranger = Listener::callback(|_| true);

    // Registry has never seen this type or this listener.
    registry.remove_listener("ghost", &stranger);

    registry.add_listener("tick", Listener::callback(|_| true));
    registry.remove_listener("tick", &stranger);
    assert_eq!(registry.listener_count("tick"), 1);
}

#[test]
fn identity_not_behavior_keys_removal() {
    let registry = ListenerRegistry::new();
    let count = Arc::new(AtomicUsize::new(0));

    let first = registry.add_listener("tick", counting_listener(&count));
    registry.add_listener("tick", counting_listener(&count));
    assert_eq!(registry.listener_count("tick"), 2);

    registry.remove_listener("tick", &first);
    assert_eq!(registry.listener_count("tick"), 1);
}

#[test]
fn remove_all_without_types_discards_everything() {
    let registry = ListenerRegistry::new();
    registry.add_listener("a", Listener::callback(|_| true));
    registry.add_listener("b c", Listener::callback(|_| true));

    registry.remove_all_listeners(None);

    for ty in ["a", "b", "c"] {
        assert!(!registry.has_listener(ty));
    }
}

#[test]
fn remove_all_with_types_prunes_only_those() {
    let registry = ListenerRegistry::new();
    registry.add_listener("a b keep", Listener::callback(|_| true));

    registry.remove_all_listeners(Some("a b never-registered"));

    assert!(!registry.has_listener("a"));
    assert!(!registry.has_listener("b"));
    assert!(registry.has_listener("keep"));
}

#[test]
fn removal_during_dispatch_does_not_skip_the_current_pass() {
    let registry = Arc::new(ListenerRegistry::new());
    let second_fired = Arc::new(AtomicUsize::new(0));

    let second = counting_listener(&second_fired);
    let remover = {
        let registry = Arc::clone(&registry);
        let second = second.clone();
        Listener::callback(move |_| {
            registry.remove_listener("go", &second);
            true
        })
    };

    registry.add_listener("go", remover);
    registry.add_listener("go", second);

    // First pass runs on a snapshot: the second listener still fires.
    registry.dispatch("go", None);
    assert_eq!(second_fired.load(Ordering::Relaxed), 1);

    // It is gone from the next pass.
    registry.dispatch("go", None);
    assert_eq!(second_fired.load(Ordering::Relaxed), 1);
    assert_eq!(registry.listener_count("go"), 1);
}

#[test]
fn addition_during_dispatch_fires_from_the_next_pass() {
    let registry = Arc::new(ListenerRegistry::new());
    let late_fired = Arc::new(AtomicUsize::new(0));

    let late = counting_listener(&late_fired);
    let adder = {
        let registry = Arc::clone(&registry);
        let late = late.clone();
        Listener::callback(move |_| {
            registry.add_listener("go", late.clone());
            true
        })
    };

    registry.add_listener("go", adder);

    registry.dispatch("go", None);
    assert_eq!(late_fired.load(Ordering::Relaxed), 0);

    registry.dispatch("go", None);
    assert_eq!(late_fired.load(Ordering::Relaxed), 1);
}

#[test]
fn nested_dispatch_from_a_listener_works() {
    let registry = Arc::new(ListenerRegistry::new());
    let inner_fired = Arc::new(AtomicUsize::new(0));

    registry.add_listener("inner", counting_listener(&inner_fired));
    let outer = {
        let registry = Arc::clone(&registry);
        Listener::callback(move |_| registry.dispatch("inner", None))
    };
    registry.add_listener("outer", outer);

    assert!(registry.dispatch("outer", None));
    assert_eq!(inner_fired.load(Ordering::Relaxed), 1);
}

const TYPES: [&str; 3] = ["alpha", "beta", "gamma"];

#[derive(Debug, Clone)]
enum Op {
    Add(usize, usize),
    Remove(usize, usize),
    RemoveAllForType(usize),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..TYPES.len(), 0..4usize).prop_map(|(t, l)| Op::Add(t, l)),
        3 => (0..TYPES.len(), 0..4usize).prop_map(|(t, l)| Op::Remove(t, l)),
        1 => (0..TYPES.len()).prop_map(Op::RemoveAllForType),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    /// The registry agrees with a naive model under arbitrary operation
    /// sequences: presence, counts, and per-type dispatch order.
    #[test]
    fn registry_matches_model(ops in proptest::collection::vec(op_strategy(), 1..64)) {
        let registry = ListenerRegistry::new();
        let log: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));

        let listeners: Vec<Listener> = (0..4)
            .map(|idx| {
                let log = Arc::clone(&log);
                Listener::callback(move |_| {
                    log.lock().unwrap().push(idx);
                    true
                })
            })
            .collect();

        let mut model: Vec<Vec<usize>> = vec![Vec::new(); TYPES.len()];

        for op in ops {
            match op {
                Op::Add(t, l) => {
                    registry.add_listener(TYPES[t], listeners[l].clone());
                    model[t].retain(|&idx| idx != l);
                    model[t].push(l);
                }
                Op::Remove(t, l) => {
                    registry.remove_listener(TYPES[t], &listeners[l]);
                    if let Some(pos) = model[t].iter().position(|&idx| idx == l) {
                        model[t].remove(pos);
                    }
                }
                Op::RemoveAllForType(t) => {
                    registry.remove_all_listeners(Some(TYPES[t]));
                    model[t].clear();
                }
                Op::Clear => {
                    registry.remove_all_listeners(None);
                    for entry in &mut model {
                        entry.clear();
                    }
                }
            }
        }

        for (t, ty) in TYPES.into_iter().enumerate() {
            prop_assert_eq!(registry.has_listener(ty), !model[t].is_empty());
            prop_assert_eq!(registry.listener_count(ty), model[t].len());

            log.lock().unwrap().clear();
            let handled = registry.dispatch(ty, None);
            prop_assert_eq!(handled, !model[t].is_empty());
            prop_assert_eq!(&*log.lock().unwrap(), &model[t]);
        }
    }
}
