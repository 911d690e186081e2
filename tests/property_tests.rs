//! Property-based tests for the engine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated graphs and inputs.

use proptest::prelude::*;
use statewire::{States, Subscriber};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const NAMES: [&str; 5] = ["a", "b", "c", "d", "e"];
const ACTIONS: [&str; 3] = ["go", "back", "skip"];

prop_compose! {
    fn state_name()(index in 0..NAMES.len()) -> &'static str {
        NAMES[index]
    }
}

prop_compose! {
    fn action_name()(index in 0..ACTIONS.len()) -> &'static str {
        ACTIONS[index]
    }
}

prop_compose! {
    fn edge()(from in state_name(), to in state_name(), action in action_name()) -> (&'static str, &'static str, &'static str) {
        (from, to, action)
    }
}

fn build(edges: &[(&str, &str, &str)]) -> States {
    let mut states = States::with_id("prop");
    for (from, to, action) in edges {
        states.when(from, to, Some(*action), None).unwrap();
    }
    states
}

proptest! {
    #[test]
    fn first_added_state_stays_current(names in prop::collection::vec(state_name(), 1..10)) {
        let mut states = States::with_id("prop");
        for name in &names {
            states.add(name).unwrap();
        }
        prop_assert_eq!(states.current(), Some(names[0]));
    }

    #[test]
    fn state_names_stay_unique(names in prop::collection::vec(state_name(), 0..20)) {
        let mut states = States::with_id("prop");
        for name in &names {
            states.add(name).unwrap();
        }

        let mut registered: Vec<&str> = states.states().iter().map(|m| m.name()).collect();
        let total = registered.len();
        registered.sort_unstable();
        registered.dedup();
        prop_assert_eq!(registered.len(), total);
    }

    #[test]
    fn transition_endpoints_are_registered(edges in prop::collection::vec(edge(), 1..12)) {
        let states = build(&edges);
        prop_assert_eq!(states.transitions().len(), edges.len());
        for transition in states.transitions() {
            prop_assert!(states.has_state(transition.from().name()));
            prop_assert!(states.has_state(transition.to().name()));
        }
    }

    #[test]
    fn current_is_always_registered(
        edges in prop::collection::vec(edge(), 1..12),
        actions in prop::collection::vec(action_name(), 0..20),
    ) {
        let mut states = build(&edges);
        for action in &actions {
            states.execute(action).unwrap();
            let current = states.current().unwrap();
            prop_assert!(states.has_state(current));
        }
    }

    #[test]
    fn failed_execute_leaves_current(
        edges in prop::collection::vec(edge(), 1..12),
        action in action_name(),
    ) {
        let mut states = build(&edges);
        let before = states.current().map(str::to_string);
        if !states.execute(action).unwrap() {
            prop_assert_eq!(states.current().map(str::to_string), before);
        }
    }

    #[test]
    fn every_traversal_notifies_once(
        edges in prop::collection::vec(edge(), 1..12),
        actions in prop::collection::vec(action_name(), 0..20),
    ) {
        let mut states = build(&edges);
        let notified = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&notified);
        states.subscribe(Subscriber::new(move |_| { sink.fetch_add(1, Ordering::SeqCst); }), false);

        let moved = actions
            .iter()
            .filter(|action| states.execute(action).unwrap())
            .count();

        prop_assert_eq!(notified.load(Ordering::SeqCst), moved);
        prop_assert_eq!(states.history().len(), moved);
    }

    #[test]
    fn locked_engine_rejects_all_wiring(
        edges in prop::collection::vec(edge(), 1..8),
        extra in prop::collection::vec(edge(), 1..8),
    ) {
        let mut states = build(&edges);
        states.lock("token").unwrap();
        let (state_count, edge_count) = (states.states().len(), states.transitions().len());

        for (from, to, action) in &extra {
            prop_assert!(states.when(from, to, Some(*action), None).is_err());
            prop_assert!(states.add(from).is_err());
        }
        prop_assert_eq!(states.states().len(), state_count);
        prop_assert_eq!(states.transitions().len(), edge_count);
    }

    #[test]
    fn actions_and_metas_agree(edges in prop::collection::vec(edge(), 1..12), base in state_name()) {
        let states = build(&edges);
        let actions = states.actions(Some(base));
        let metas = states.metas(Some(base));

        prop_assert_eq!(actions.len(), metas.len());
        for (transition, meta) in actions.iter().zip(metas.iter()) {
            prop_assert_eq!(transition.from().name(), base);
            prop_assert_eq!(transition.to().name(), meta.name());
        }
    }

    #[test]
    fn dispose_always_empties(edges in prop::collection::vec(edge(), 0..12)) {
        let mut states = build(&edges);
        states.dispose();
        prop_assert!(states.current().is_none());
        prop_assert!(states.states().is_empty());
        prop_assert!(states.transitions().is_empty());
        prop_assert_eq!(states.subscriber_count(), 0);
    }
}
