//! Properties that hold for every input, for both execution strategies:
//! permutation validity, stability, sortedness, multiset preservation, strategy equivalence
//! and idempotence.

use modelsort::model::VecModel;
use modelsort::value::{Row, Value, row};
use modelsort::{Direction, SortOptions, plan, sort, sort_model};
use proptest::prelude::*;

fn rows_from(keys: &[i32]) -> Vec<Row> {
    keys.iter()
        .enumerate()
        .map(|(id, &k)| row([("k", Value::from(k)), ("id", Value::from(id as u32))]))
        .collect()
}

fn id_of(r: &Row) -> u32 {
    match r["id"] {
        Value::Number(n) => n as u32,
        ref other => panic!("unexpected id {other:?}"),
    }
}

fn any_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Ascending), Just(Direction::Descending)]
}

fn any_strategy() -> impl Strategy<Value = modelsort::Strategy> {
    prop_oneof![
        Just(modelsort::Strategy::CloneSwap),
        Just(modelsort::Strategy::MinimalMove)
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// The plan is a bijection on `[0, N)`.
    #[test]
    fn plan_is_a_permutation(
        keys in proptest::collection::vec(-20i32..20, 0..64),
        direction in any_direction(),
    ) {
        let model = rows_from(&keys);
        let mut order = plan(&model, "k", direction).unwrap();
        order.sort_unstable();
        prop_assert_eq!(order, (0..keys.len()).collect::<Vec<_>>());
    }

    /// After the sort, no adjacent pair is out of order and equal keys keep their original
    /// relative order.
    #[test]
    fn sorted_and_stable(
        keys in proptest::collection::vec(0i32..6, 0..64),
        direction in any_direction(),
        strategy in any_strategy(),
    ) {
        let mut model = VecModel::from(rows_from(&keys));
        let options = SortOptions::new("k").with_direction(direction).with_strategy(strategy);
        sort_model(&mut model, &options).unwrap();

        for pair in model.as_slice().windows(2) {
            let ord = direction.orient(pair[0]["k"].partial_cmp(&pair[1]["k"]).unwrap());
            prop_assert_ne!(ord, std::cmp::Ordering::Greater);
            if ord == std::cmp::Ordering::Equal {
                prop_assert!(id_of(&pair[0]) < id_of(&pair[1]));
            }
        }
    }

    /// Both strategies keep every record exactly once and agree on the final contents.
    #[test]
    fn strategies_agree_and_preserve_records(
        keys in proptest::collection::vec(-5i32..5, 0..64),
        direction in any_direction(),
    ) {
        let original = rows_from(&keys);
        let descending = direction == Direction::Descending;

        let mut swapped = VecModel::from(original.clone());
        let mut moved = VecModel::from(original.clone());
        sort(&mut swapped, "k", descending, false).unwrap();
        sort(&mut moved, "k", descending, true).unwrap();

        prop_assert_eq!(swapped.as_slice(), moved.as_slice());

        let mut ids: Vec<u32> = moved.as_slice().iter().map(id_of).collect();
        ids.sort_unstable();
        prop_assert_eq!(ids, (0..keys.len() as u32).collect::<Vec<_>>());

        prop_assert_eq!(swapped.counts().moves, 0);
        prop_assert_eq!(moved.counts().sets, 0);
    }

    /// Sorting an already sorted model issues no mutating primitive.
    #[test]
    fn second_sort_is_a_noop(
        keys in proptest::collection::vec(0i32..10, 0..64),
        direction in any_direction(),
        strategy in any_strategy(),
    ) {
        let mut model = VecModel::from(rows_from(&keys));
        let options = SortOptions::new("k").with_direction(direction).with_strategy(strategy);
        sort_model(&mut model, &options).unwrap();

        model.reset_counts();
        let stats = sort_model(&mut model, &options).unwrap();
        prop_assert!(stats.is_noop());
        prop_assert_eq!(model.counts().sets, 0);
        prop_assert_eq!(model.counts().moves, 0);
    }

    /// Clone-swap never needs more than one swap per displaced item.
    #[test]
    fn swap_count_is_bounded(
        keys in proptest::collection::vec(0i32..100, 0..64),
    ) {
        let mut model = VecModel::from(rows_from(&keys));
        let stats = sort(&mut model, "k", false, false).unwrap();
        prop_assert!(stats.swaps < stats.displaced.max(1));
        prop_assert_eq!(model.counts().sets, 2 * stats.swaps);
    }
}
