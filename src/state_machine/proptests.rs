//! Property-based tests for the conversation machine
//!
//! Random message sequences drawn from the command grammar (plus noise)
//! are fed through a machine backed by an in-memory store.

use super::state::Input;
use super::transition::transition;
use super::*;
use crate::book::ListBook;
use crate::store::memory::MemoryStore;
use proptest::prelude::*;

// ============================================================================
// Generators
// ============================================================================

fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![Just("a".to_string()), Just("b".to_string()), Just("c".to_string())]
}

fn arb_global() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("/list help".to_string()),
        Just("/list all".to_string()),
        Just("/list bogus".to_string()),
        arb_name().prop_map(|n| format!("/list view {n}")),
        arb_name().prop_map(|n| format!("/list new {n}")),
        arb_name().prop_map(|n| format!("/list del {n}")),
        arb_name().prop_map(|n| format!("/list edit {n}")),
    ]
}

fn arb_edit() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("/help".to_string()),
        Just("/end".to_string()),
        "[a-z]{1,6}".prop_map(|t| format!("/append {t}")),
        (0usize..5).prop_map(|i| format!("/rm {i}")),
        (0usize..5, "[a-z]{1,6}").prop_map(|(i, t)| format!("/add {i} {t}")),
        (0usize..5, 0usize..5).prop_map(|(f, t)| format!("/mv {f} {t}")),
        (0usize..5, "[a-z]{1,6}").prop_map(|(i, t)| format!("/edit {i} {t}")),
    ]
}

fn arb_message() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => arb_global(),
        3 => arb_edit(),
        1 => prop_oneof![Just("yes".to_string()), Just("no".to_string())],
        1 => "[a-z ]{0,12}",
        1 => "[a-z\r\n]{1,12}",
    ]
}

fn fresh() -> (Machine, ListBook<MemoryStore>) {
    let book = ListBook::open(MemoryStore::with_lists(vec![("a", vec!["x", "y"])])).unwrap();
    (Machine::new(), book)
}

/// States the machine may rest in between messages
fn is_resting(state: State) -> bool {
    transition(state, &Input::Advance).is_none()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// After every message the machine waits for input
    #[test]
    fn prop_machine_always_settles(messages in proptest::collection::vec(arb_message(), 0..30)) {
        let (mut machine, mut book) = fresh();
        for msg in &messages {
            machine.process(&mut book, msg);
            prop_assert!(is_resting(machine.state()), "rests in {} after {:?}", machine.state(), msg);
        }
    }

    /// Memory and storage agree after every message
    #[test]
    fn prop_store_mirrors_lists(messages in proptest::collection::vec(arb_message(), 0..30)) {
        let (mut machine, mut book) = fresh();
        for msg in &messages {
            machine.process(&mut book, msg);
            prop_assert_eq!(book.store().file_count(), book.len());
            let names: Vec<String> = book.names().map(String::from).collect();
            for name in names {
                let stored = book.store().contents(&name).cloned();
                prop_assert_eq!(stored, Some(book.get(&name).unwrap().items.clone()));
            }
        }
    }

    /// Every item fits on one line, so it reads back from disk unchanged
    #[test]
    fn prop_items_are_single_lines(messages in proptest::collection::vec(arb_message(), 0..30)) {
        let (mut machine, mut book) = fresh();
        for msg in &messages {
            machine.process(&mut book, msg);
        }
        for name in book.names() {
            for item in &book.get(name).unwrap().items {
                prop_assert!(!item.contains('\n'), "item {:?} of '{}' spans lines", item, name);
                prop_assert!(!item.ends_with('\r'), "item {:?} of '{}' ends in CR", item, name);
            }
        }
    }

    /// A current list is bound exactly while a workflow is running
    #[test]
    fn prop_binding_only_outside_idle(messages in proptest::collection::vec(arb_message(), 0..30)) {
        let (mut machine, mut book) = fresh();
        for msg in &messages {
            machine.process(&mut book, msg);
            if machine.state() == State::Idle {
                prop_assert_eq!(book.current_name(), None);
            } else {
                prop_assert!(book.current().is_ok(), "{} without a list", machine.state());
            }
        }
    }

    /// With storage failing, nothing a user types changes any list
    #[test]
    fn prop_failed_saves_change_nothing(messages in proptest::collection::vec(arb_message(), 0..30)) {
        let (mut machine, mut book) = fresh();
        book.store_mut().fail_saves(true);
        book.store_mut().fail_removes(true);
        for msg in &messages {
            machine.process(&mut book, msg);
        }
        prop_assert_eq!(book.names().collect::<Vec<_>>(), vec!["a"]);
        prop_assert_eq!(&book.get("a").unwrap().items, &vec!["x".to_string(), "y".to_string()]);
    }

    /// Plain text never starts a workflow
    #[test]
    fn prop_idle_ignores_text(text in "[a-z ]{0,20}") {
        let (mut machine, mut book) = fresh();
        prop_assert_eq!(machine.process(&mut book, &text), "");
        prop_assert_eq!(machine.state(), State::Idle);
    }
}
