//! Property tests for IndexAllocator
//!
//! Random operation sequences are replayed against the allocator and a plain
//! `BTreeSet` model over a small window; after every step the range list must
//! describe exactly the model's set, in canonical form.
//!
//! Run with: cargo test --test index_proptests

use std::collections::BTreeSet;
use obs_bridge::osn::{IndexAllocator, IndexConfig};
use proptest::prelude::*;

const LAST: u32 = 63;

#[derive(Debug, Clone)]
enum Op {
    Allocate,
    Mark(u32, bool),
    MarkRange(u32, u32, bool),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Allocate),
        4 => (0..=LAST, any::<bool>()).prop_map(|(id, used)| Op::Mark(id, used)),
        1 => (0..=LAST, 0..=LAST, any::<bool>())
            .prop_map(|(a, b, used)| Op::MarkRange(a.min(b), a.max(b), used)),
    ]
}

fn check_canonical(index: &IndexAllocator) -> Result<(), TestCaseError> {
    for range in index.ranges() {
        prop_assert!(range.min <= range.max);
    }
    for pair in index.ranges().windows(2) {
        prop_assert!(
            u64::from(pair[0].max) + 1 < u64::from(pair[1].min),
            "{:?} and {:?} overlap or touch",
            pair[0],
            pair[1]
        );
    }
    Ok(())
}

fn check_matches_model(index: &IndexAllocator, model: &BTreeSet<u32>) -> Result<(), TestCaseError> {
    for id in 0..=LAST {
        prop_assert_eq!(index.is_used(id), model.contains(&id), "id {}", id);
    }
    prop_assert_eq!(index.count(true), model.len() as u64);
    prop_assert_eq!(index.count(false), u64::from(LAST) + 1 - model.len() as u64);
    Ok(())
}

fn window() -> IndexAllocator {
    IndexAllocator::with_config(IndexConfig::window(0, LAST)).unwrap()
}

proptest! {
    #[test]
    fn prop_operations_match_model(ops in prop::collection::vec(op_strategy(), 1..200)) {
        let mut index = window();
        let mut model = BTreeSet::new();

        for op in ops {
            match op {
                Op::Allocate => match index.allocate() {
                    Some(id) => {
                        prop_assert!(id <= LAST);
                        prop_assert!(model.insert(id), "allocated used id {}", id);
                    }
                    None => prop_assert_eq!(model.len() as u64, u64::from(LAST) + 1),
                },
                Op::Mark(id, used) => {
                    index.mark(id, used);
                    if used {
                        model.insert(id);
                    } else {
                        model.remove(&id);
                    }
                }
                Op::MarkRange(start, end, used) => {
                    index.mark_range(start..=end, used);
                    for id in start..=end {
                        if used {
                            model.insert(id);
                        } else {
                            model.remove(&id);
                        }
                    }
                }
            }
            check_canonical(&index)?;
            check_matches_model(&index, &model)?;
        }
    }

    #[test]
    fn prop_allocations_are_unique(count in 1usize..=64) {
        let mut index = window();
        let mut seen = BTreeSet::new();
        for _ in 0..count {
            let id = index.allocate();
            prop_assert!(id.is_some());
            prop_assert!(seen.insert(id));
        }
    }

    #[test]
    fn prop_mark_round_trip(id in any::<u32>()) {
        let mut index = IndexAllocator::new();
        index.mark(id, true);
        prop_assert!(index.is_used(id));
        index.mark(id, false);
        prop_assert!(!index.is_used(id));
        prop_assert!(index.is_empty());
    }

    #[test]
    fn prop_mark_is_idempotent(
        setup in prop::collection::vec((0..=LAST, any::<bool>()), 0..40),
        id in 0..=LAST,
        used in any::<bool>(),
    ) {
        let mut index = window();
        for (setup_id, setup_used) in setup {
            index.mark(setup_id, setup_used);
        }

        index.mark(id, used);
        let once = index.ranges().to_vec();
        index.mark(id, used);
        prop_assert_eq!(index.ranges(), once.as_slice());
    }

    #[test]
    fn prop_freed_id_can_be_reallocated(
        used in prop::collection::btree_set(0..=LAST, 1..=32),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut index = window();
        for id in &used {
            index.mark(*id, true);
        }
        let ids: Vec<u32> = used.iter().copied().collect();
        let victim = ids[pick.index(ids.len())];

        index.mark(victim, false);
        prop_assert!(index.allocate().is_some());
    }
}
