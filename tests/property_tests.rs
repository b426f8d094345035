//! Property-based tests using proptest
//!
//! These tests generate random sequences of operations and verify
//! that the heap invariants are always maintained.

use proptest::prelude::*;
use prioheap::{BinaryHeap, Comparator};
use std::cmp::Ordering;

/// Every parent ranks at least as high as each of its children.
fn check_heap_property<T, C: Comparator<T>>(heap: &BinaryHeap<T, C>) -> Result<(), TestCaseError> {
    let data = heap.as_slice();
    for i in 1..data.len() {
        let parent = (i - 1) / 2;
        prop_assert!(
            heap.comparator().compare(&data[parent], &data[i]) != Ordering::Less,
            "child at {} outranks its parent",
            i
        );
    }
    Ok(())
}

fn drain<T, C: Comparator<T>>(heap: &mut BinaryHeap<T, C>) -> Vec<T> {
    let mut out = Vec::new();
    while let Some(item) = heap.pop() {
        out.push(item);
    }
    out
}

/// Test that push and pop maintain heap property and size
fn test_push_pop_invariant(ops: Vec<(bool, i32)>) -> Result<(), TestCaseError> {
    let mut heap: BinaryHeap<i32> = BinaryHeap::default();
    let mut inserted = Vec::new();

    for (should_pop, value) in ops {
        if should_pop {
            let expected = inserted.iter().max().copied();
            prop_assert_eq!(heap.pop(), expected);
            if let Some(max) = expected {
                let pos = inserted.iter().position(|&p| p == max).unwrap();
                inserted.remove(pos);
            }
        } else {
            let size = heap.push(value);
            inserted.push(value);
            prop_assert_eq!(size, inserted.len());
        }

        check_heap_property(&heap)?;
        prop_assert_eq!(heap.len(), inserted.len());
        prop_assert_eq!(heap.top(), inserted.iter().max());
    }

    Ok(())
}

/// Test that heapify then draining yields non-increasing order
fn test_heapify_sorts(values: Vec<i32>) -> Result<(), TestCaseError> {
    let mut heap: BinaryHeap<i32> = BinaryHeap::default();
    heap.heapify(values.iter().copied());
    check_heap_property(&heap)?;
    prop_assert_eq!(heap.len(), values.len());

    let mut expected = values;
    expected.sort_by(|a, b| b.cmp(a));
    prop_assert_eq!(drain(&mut heap), expected);
    Ok(())
}

proptest! {
    #[test]
    fn push_pop_invariant(ops in prop::collection::vec((prop::bool::ANY, -100i32..100), 0..200)) {
        test_push_pop_invariant(ops)?;
    }

    #[test]
    fn heapify_sorts(values in prop::collection::vec(-100i32..100, 0..200)) {
        test_heapify_sorts(values)?;
    }

    #[test]
    fn heapify_is_permutation_independent(mut values in prop::collection::vec(-20i32..20, 0..50), seed in any::<u64>()) {
        let mut first: BinaryHeap<i32> = BinaryHeap::default();
        first.heapify(values.iter().copied());

        // rotate by a seed-derived amount to get another permutation
        if !values.is_empty() {
            let by = (seed % values.len() as u64) as usize;
            values.rotate_left(by);
            values.reverse();
        }
        let mut second: BinaryHeap<i32> = BinaryHeap::default();
        second.heapify(values);

        prop_assert_eq!(drain(&mut first), drain(&mut second));
    }

    #[test]
    fn custom_comparator_drains_ascending(values in prop::collection::vec(-1000i32..1000, 0..100)) {
        let mut heap = BinaryHeap::new(|a: &i32, b: &i32| b.cmp(a));
        for value in &values {
            heap.enq(*value);
        }
        check_heap_property(&heap)?;

        let mut expected = values;
        expected.sort();
        prop_assert_eq!(drain(&mut heap), expected);
    }

    #[test]
    fn into_sorted_vec_is_ascending(values in prop::collection::vec(any::<i16>(), 0..100)) {
        let heap: BinaryHeap<i16> = values.iter().copied().collect();
        let mut expected = values;
        expected.sort();
        prop_assert_eq!(heap.into_sorted_vec(), expected);
    }

    #[test]
    fn extend_keeps_invariant(
        left in prop::collection::vec(-100i32..100, 0..60),
        right in prop::collection::vec(-100i32..100, 0..60)
    ) {
        let mut heap: BinaryHeap<i32> = BinaryHeap::from(left.clone());
        heap.extend(&right);

        check_heap_property(&heap)?;
        prop_assert_eq!(heap.len(), left.len() + right.len());
    }
}
