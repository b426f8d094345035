//! A binary-heap priority queue that orders its elements with a comparator supplied at
//! construction, rather than through the [`Ord`] trait.
//!
//! The comparator may be any [`Fn(&T, &T) -> Ordering`](Comparator) closure or any other
//! type implementing [`Comparator`].  Where no comparator is given, [`DefaultOrder`]
//! orders numbers numerically and text lexicographically.
//!
//! ```
//! use prioheap::BinaryHeap;
//!
//! struct Job {
//!     priority: i32,
//! }
//!
//! // The lowest priority number is served first.
//! let mut queue = BinaryHeap::new(|a: &Job, b: &Job| b.priority.cmp(&a.priority));
//! queue.enq(Job { priority: 100 });
//! queue.enq(Job { priority: -1 });
//! queue.enq(Job { priority: 5 });
//!
//! assert_eq!(queue.deq().map(|job| job.priority), Some(-1));
//! assert_eq!(queue.size(), 2);
//! ```
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]

extern crate alloc;

use core::cmp::Ordering;

pub mod binary_heap;
pub mod default;

pub use binary_heap::BinaryHeap;
pub use default::{default_compare, DefaultOrder, NaturalOrder, Primitive};

/// A strategy for ordering values of type `T` by priority.
///
/// [`compare`] returns [`Greater`] when `this` has strictly higher priority than `that`,
/// [`Equal`] when they have equal priority and [`Less`] otherwise.  A heap always serves
/// the element that compares greatest.
///
/// A comparator must give the same answer for two elements for as long as both sit in
/// one heap.  If it does not, the heap's pop order becomes unspecified, but the heap
/// stays memory safe.
///
/// Every `Fn(&T, &T) -> Ordering` is a comparator, so closures can be passed directly:
///
/// ```
/// use prioheap::Comparator;
///
/// let shortest_first = |a: &&str, b: &&str| b.len().cmp(&a.len());
/// assert!(shortest_first.compare(&"ab", &"abc").is_gt());
/// ```
///
/// [`compare`]: Comparator::compare
/// [`Greater`]: Ordering::Greater
/// [`Equal`]: Ordering::Equal
/// [`Less`]: Ordering::Less
pub trait Comparator<T: ?Sized> {
    /// Compares the priorities of `this` and `that`.
    fn compare(&self, this: &T, that: &T) -> Ordering;

    /// Whether `this` has strictly higher priority than `that`.
    #[inline]
    fn outranks(&self, this: &T, that: &T) -> bool {
        self.compare(this, that).is_gt()
    }

    /// Whether `this` has priority at least as high as `that`.
    #[inline]
    fn ranks_with(&self, this: &T, that: &T) -> bool {
        self.compare(this, that).is_ge()
    }
}

impl<T: ?Sized, F: ?Sized + Fn(&T, &T) -> Ordering> Comparator<T> for F {
    #[inline]
    fn compare(&self, this: &T, that: &T) -> Ordering {
        self(this, that)
    }
}
