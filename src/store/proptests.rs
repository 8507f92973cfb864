//! Property-based tests for the sequence operations

use super::*;
use proptest::prelude::*;

fn arb_items() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-z]{1,8}", 1..12)
}

/// A non-empty list together with two in-range indices
fn arb_items_with_pair() -> impl Strategy<Value = (Vec<String>, usize, usize)> {
    arb_items().prop_flat_map(|items| {
        let len = items.len();
        (Just(items), 0..len, 0..len)
    })
}

/// A list together with an index at or past its end
fn arb_items_with_overflow() -> impl Strategy<Value = (Vec<String>, usize)> {
    proptest::collection::vec("[a-z]{1,8}", 0..12).prop_flat_map(|items| {
        let len = items.len();
        (Just(items), len..len + 50)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_move_round_trip((items, from, to) in arb_items_with_pair()) {
        let mut moved = items.clone();
        move_item(&mut moved, from, to).unwrap();
        prop_assert_eq!(&moved[to], &items[from]);

        move_item(&mut moved, to, from).unwrap();
        prop_assert_eq!(moved, items);
    }

    #[test]
    fn prop_move_preserves_multiset((items, from, to) in arb_items_with_pair()) {
        let mut moved = items.clone();
        move_item(&mut moved, from, to).unwrap();

        let mut a = items;
        let mut b = moved;
        a.sort();
        b.sort();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_out_of_range_leaves_list_untouched((items, index) in arb_items_with_overflow()) {
        let mut work = items.clone();

        prop_assert!(
            matches!(remove(&mut work, index), Err(ListError::InvalidIndex { .. })),
            "remove({}) on {} items was accepted",
            index,
            items.len()
        );
        prop_assert!(
            matches!(
                replace_at(&mut work, index, "x".to_string()),
                Err(ListError::InvalidIndex { .. })
            ),
            "replace_at({}) was accepted",
            index
        );
        prop_assert!(
            matches!(
                insert(&mut work, index + 1, "x".to_string()),
                Err(ListError::InvalidIndex { .. })
            ),
            "insert({}) was accepted",
            index + 1
        );
        prop_assert!(
            matches!(
                move_item(&mut work, index, 0),
                Err(ListError::InvalidIndex { role: IndexRole::From, .. })
            ),
            "move_item({}, 0) did not reject the source index",
            index
        );
        if !work.is_empty() {
            prop_assert!(
                matches!(
                    move_item(&mut work, 0, index),
                    Err(ListError::InvalidIndex { role: IndexRole::To, .. })
                ),
                "move_item(0, {}) did not reject the target index",
                index
            );
        }

        prop_assert_eq!(work, items);
    }

    #[test]
    fn prop_insert_then_remove_restores((items, index) in arb_items().prop_flat_map(|items| {
        let len = items.len();
        (Just(items), 0..=len)
    })) {
        let mut work = items.clone();
        insert(&mut work, index, "new".to_string()).unwrap();
        prop_assert_eq!(work.len(), items.len() + 1);
        prop_assert_eq!(remove(&mut work, index).unwrap(), "new");
        prop_assert_eq!(work, items);
    }
}
