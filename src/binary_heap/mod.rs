//! A priority queue stored as an array-backed binary tree.
//!
//! Element `i` of the storage has its children at `2i + 1` and `2i + 2`, and every parent
//! ranks at least as high as its children under the heap's [`Comparator`]. Pushing and
//! popping cost *O*(log(*n*)) comparisons, reading the top is *O*(1), and building a heap
//! out of an existing sequence sinks each inner node once, for *O*(*n*) in total.
//!
//! # Examples
//!
//! A scheduler that serves the earliest deadline first, breaking ties by name:
//!
//! ```
//! use core::cmp::Ordering;
//! use prioheap::BinaryHeap;
//!
//! struct Deadline {
//!     due: u32,
//!     name: &'static str,
//! }
//!
//! fn earliest_first(a: &Deadline, b: &Deadline) -> Ordering {
//!     b.due.cmp(&a.due).then_with(|| b.name.cmp(a.name))
//! }
//!
//! let mut agenda = BinaryHeap::new(earliest_first);
//! agenda.push(Deadline { due: 30, name: "taxes" });
//! agenda.push(Deadline { due: 7, name: "rent" });
//! agenda.push(Deadline { due: 7, name: "phone" });
//! agenda.push(Deadline { due: 12, name: "dentist" });
//!
//! let order: Vec<_> = core::iter::from_fn(|| agenda.pop()).map(|d| d.name).collect();
//! assert_eq!(order, ["phone", "rent", "dentist", "taxes"]);
//! ```

use core::fmt;
use core::iter::{FromIterator, FusedIterator};
use core::mem::ManuallyDrop;
use core::ptr;

use alloc::slice;
use alloc::vec::{self, Vec};

use crate::{Comparator, DefaultOrder};


/// A priority queue that serves the element its comparator ranks highest.
///
/// The comparator is fixed when the heap is built; [`with_comparator`] moves the
/// elements into a heap ordered by a different one.
///
/// Changing an element's priority while it sits in the heap (through interior
/// mutability, say) is a logic error. The heap stays memory safe, but the order in
/// which elements come out is then unspecified.
///
/// # Examples
///
/// ```
/// use prioheap::BinaryHeap;
///
/// // numbers rank numerically by default
/// let mut heap: BinaryHeap<i32> = BinaryHeap::default();
/// assert_eq!(heap.top(), None);
///
/// heap.push(1);
/// heap.push(5);
/// heap.push(2);
/// assert_eq!(heap.top(), Some(&5));
/// assert_eq!(heap.len(), 3);
///
/// assert_eq!(heap.pop(), Some(5));
/// assert_eq!(heap.pop(), Some(2));
/// assert_eq!(heap.pop(), Some(1));
/// assert_eq!(heap.pop(), None);
/// ```
///
/// Reversing the comparator turns it into a min-heap:
///
/// ```
/// use prioheap::BinaryHeap;
///
/// let mut heap = BinaryHeap::new(|a: &i32, b: &i32| b.cmp(a));
/// heap.push(1);
/// heap.push(5);
/// heap.push(2);
///
/// assert_eq!(heap.pop(), Some(1));
/// assert_eq!(heap.pop(), Some(2));
/// ```
///
/// [`with_comparator`]: BinaryHeap::with_comparator
#[derive(Clone)]
pub struct BinaryHeap<T, C = DefaultOrder<T>> {
    data: Vec<T>,
    comparator: C,
}

impl<T, C: Comparator<T> + Default> Default for BinaryHeap<T, C> {
    /// An empty heap ordered by `C::default()`.
    #[inline]
    fn default() -> BinaryHeap<T, C> {
        BinaryHeap::new(C::default())
    }
}

impl<T: fmt::Debug, C> fmt::Debug for BinaryHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.data).finish()
    }
}

impl<T, C: Comparator<T>> BinaryHeap<T, C> {
    /// Creates an empty heap ordered by `comparator`.
    ///
    /// ```
    /// use prioheap::BinaryHeap;
    /// let mut heap = BinaryHeap::new(|a: &u8, b: &u8| a.cmp(b));
    /// heap.push(4);
    /// ```
    #[must_use]
    pub fn new(comparator: C) -> BinaryHeap<T, C> {
        BinaryHeap { data: Vec::new(), comparator }
    }

    /// Creates an empty heap ordered by `comparator`, with room for `capacity` elements
    /// before the storage reallocates.
    ///
    /// ```
    /// use prioheap::{BinaryHeap, DefaultOrder};
    /// let mut heap = BinaryHeap::with_capacity(DefaultOrder::new(), 10);
    /// heap.push(4);
    /// assert!(heap.capacity() >= 10);
    /// ```
    #[must_use]
    pub fn with_capacity(comparator: C, capacity: usize) -> BinaryHeap<T, C> {
        BinaryHeap { data: Vec::with_capacity(capacity), comparator }
    }

    /// Reorders `vec` in place into a heap under `comparator`. *O*(*n*).
    ///
    /// ```
    /// use prioheap::BinaryHeap;
    /// let heap = BinaryHeap::from_vec(vec![3, 9, 4], |a: &i32, b: &i32| b.cmp(a));
    /// assert_eq!(heap.top(), Some(&3));
    /// ```
    #[must_use]
    pub fn from_vec(vec: Vec<T>, comparator: C) -> BinaryHeap<T, C> {
        let mut heap = BinaryHeap { data: vec, comparator };
        heap.rebuild();
        heap
    }

    /// Moves the elements into a heap ordered by `comparator`.
    ///
    /// ```
    /// use prioheap::BinaryHeap;
    /// let heap: BinaryHeap<i32> = BinaryHeap::from([1, 5, 2]);
    /// assert_eq!(heap.top(), Some(&5));
    ///
    /// let heap = heap.with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// assert_eq!(heap.top(), Some(&1));
    /// ```
    #[must_use]
    pub fn with_comparator<D: Comparator<T>>(self, comparator: D) -> BinaryHeap<T, D> {
        BinaryHeap::from_vec(self.data, comparator)
    }

    /// Removes and returns the top element, or `None` when the heap is empty.
    ///
    /// The last element of the storage takes the root's place and sinks: it trades
    /// places with a child for as long as one ranks at least as high as it does,
    /// preferring the right child when both do.
    ///
    /// If the comparator panics, the element being removed is put back at the end of
    /// the storage before the panic propagates, so nothing is lost.
    ///
    /// ```
    /// use prioheap::BinaryHeap;
    /// let mut heap: BinaryHeap<i32> = BinaryHeap::from([1, 3]);
    ///
    /// assert_eq!(heap.pop(), Some(3));
    /// assert_eq!(heap.pop(), Some(1));
    /// assert_eq!(heap.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        let mut top = self.data.pop()?;
        let Some(root) = self.data.first_mut() else { return Some(top) };
        core::mem::swap(&mut top, root);

        let mut restore = PushBackOnUnwind { data: &mut self.data, item: Some(top) };
        // SAFETY: the storage kept its root, so 0 < restore.data.len().
        unsafe { sift_down(&mut restore.data[..], &self.comparator, 0) };
        restore.item.take()
    }

    /// Appends `item` and returns the new number of elements.
    ///
    /// The item climbs only past parents it strictly outranks, so it settles below
    /// any ancestor of equal priority.
    ///
    /// ```
    /// use prioheap::BinaryHeap;
    /// let mut heap: BinaryHeap<i32> = BinaryHeap::default();
    /// assert_eq!(heap.push(3), 1);
    /// assert_eq!(heap.push(5), 2);
    /// assert_eq!(heap.push(1), 3);
    ///
    /// assert_eq!(heap.top(), Some(&5));
    /// ```
    pub fn push(&mut self, item: T) -> usize {
        let last = self.data.len();
        self.data.push(item);
        // SAFETY: `last` indexes the element just pushed.
        unsafe { sift_up(&mut self.data, &self.comparator, last) };
        self.data.len()
    }

    /// Replaces the contents with the items of `iter`, then restores the heap order
    /// bottom-up in *O*(*n*).
    ///
    /// Pass `items.iter().cloned()` to build from a collection that must be kept.
    ///
    /// ```
    /// use prioheap::BinaryHeap;
    /// let input = vec![1, 8, 4, 3, 7, 2];
    /// let mut heap: BinaryHeap<i32> = BinaryHeap::from([100]);
    ///
    /// heap.heapify(input.iter().copied());
    /// assert_eq!(heap.into_sorted_vec(), [1, 2, 3, 4, 7, 8]);
    /// assert_eq!(input, [1, 8, 4, 3, 7, 2]);
    /// ```
    pub fn heapify<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.data.clear();
        self.data.extend(iter);
        self.rebuild();
    }

    /// Sorts the storage in place, lowest priority first, and returns it.
    ///
    /// ```
    /// use prioheap::BinaryHeap;
    ///
    /// let mut heap: BinaryHeap<i32> = BinaryHeap::from([1, 2, 4, 5, 7]);
    /// heap.push(6);
    /// heap.push(3);
    ///
    /// assert_eq!(heap.into_sorted_vec(), [1, 2, 3, 4, 5, 6, 7]);
    /// ```
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        for end in (1..self.data.len()).rev() {
            self.data.swap(0, end);
            // SAFETY: 0 < end, and the prefix `..end` still holds the unsorted heap.
            unsafe { sift_down(&mut self.data[..end], &self.comparator, 0) };
        }
        self.data
    }

    fn rebuild(&mut self) {
        for parent in (0..self.data.len() / 2).rev() {
            // SAFETY: parent < len / 2 <= len.
            unsafe { sift_down(&mut self.data, &self.comparator, parent) };
        }
    }

    /// Alias of [`push`](Self::push).
    #[inline]
    pub fn enq(&mut self, item: T) -> usize {
        self.push(item)
    }

    /// Alias of [`pop`](Self::pop).
    #[inline]
    pub fn deq(&mut self) -> Option<T> {
        self.pop()
    }
}

impl<T, C> BinaryHeap<T, C> {
    /// Iterates over the storage in array order.
    ///
    /// Array order is not priority order: only the first element is known to rank
    /// highest. Each call starts a fresh traversal.
    ///
    /// ```
    /// use prioheap::BinaryHeap;
    /// let heap: BinaryHeap<i32> = BinaryHeap::from([1, 2, 3, 4]);
    /// assert_eq!(heap.iter().len(), 4);
    /// assert_eq!(heap.iter().next(), Some(&4));
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { iter: self.data.iter() }
    }

    /// Calls `f` with every element and its index in the storage, in array order.
    ///
    /// ```
    /// use prioheap::BinaryHeap;
    /// let mut heap: BinaryHeap<&str> = BinaryHeap::default();
    /// heap.enq("a");
    /// heap.enq("b");
    ///
    /// let mut visited = Vec::new();
    /// heap.for_each(|element, index| visited.push((*element, index)));
    /// assert_eq!(visited, [("b", 0), ("a", 1)]);
    /// ```
    pub fn for_each<F: FnMut(&T, usize)>(&self, mut f: F) {
        self.data.iter().enumerate().for_each(|(index, element)| f(element, index));
    }

    /// The element that [`pop`](Self::pop) would return, or `None` when empty.
    #[must_use]
    pub fn top(&self) -> Option<&T> {
        self.data.first()
    }

    /// Alias of [`top`](Self::top).
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.top()
    }

    /// The comparator ordering this heap.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// How many elements fit before the storage reallocates.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Makes room for at least `additional` more elements.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows [`usize`].
    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    /// The storage, in array order.
    ///
    /// ```
    /// use prioheap::BinaryHeap;
    /// let heap: BinaryHeap<i32> = BinaryHeap::from([1, 8, 4]);
    /// assert_eq!(heap.as_slice(), [8, 1, 4]);
    /// ```
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Unwraps the storage, in array order.
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// The number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Alias of [`len`](Self::len).
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Whether the heap holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Empties the heap, yielding the removed elements in array order. Elements the
    /// iterator has not yielded when it is dropped are dropped with it.
    ///
    /// ```
    /// use prioheap::BinaryHeap;
    /// let mut heap: BinaryHeap<i32> = BinaryHeap::from([1, 3]);
    ///
    /// assert_eq!(heap.drain().count(), 2);
    /// assert!(heap.is_empty());
    /// ```
    #[inline]
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain { iter: self.data.drain(..) }
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

// Both sifts lift one element out of the slice and slide its neighbours into the
// gap it leaves, writing the element back once at the end. `Hole` owns the lifted
// element and writes it back when dropped, so a panicking comparator leaves every
// element in the slice exactly once.

/// Lets the element at `pos` climb while it strictly outranks its parent.
///
/// # Safety
///
/// `pos < data.len()`.
unsafe fn sift_up<T, C: Comparator<T>>(data: &mut [T], comparator: &C, pos: usize) {
    // SAFETY: guaranteed by the caller.
    let mut hole = unsafe { Hole::new(data, pos) };

    while hole.pos() > 0 {
        let parent = (hole.pos() - 1) / 2;
        // SAFETY: parent < hole.pos() < data.len().
        let above = unsafe { hole.get(parent) };
        if !comparator.outranks(hole.element(), above) {
            break;
        }
        // SAFETY: as above.
        unsafe { hole.move_to(parent) };
    }
}

/// Sinks the element at `pos` through `data`.
///
/// At each level the best candidate starts as the sinking element. The left child
/// replaces it if it ranks at least as high, then the right child replaces the
/// winner if it ranks at least as high. The element stops once it is still the
/// candidate.
///
/// # Safety
///
/// `pos < data.len()`.
unsafe fn sift_down<T, C: Comparator<T>>(data: &mut [T], comparator: &C, pos: usize) {
    let end = data.len();
    // SAFETY: guaranteed by the caller.
    let mut hole = unsafe { Hole::new(data, pos) };

    loop {
        let left = 2 * hole.pos() + 1;
        if left >= end {
            return;
        }
        let right = left + 1;

        let mut winner = None;
        // SAFETY: both children lie inside `..end` and below the hole.
        if comparator.ranks_with(unsafe { hole.get(left) }, hole.element()) {
            winner = Some(left);
        }
        if right < end {
            let best = match winner {
                Some(index) => unsafe { hole.get(index) },
                None => hole.element(),
            };
            if comparator.ranks_with(unsafe { hole.get(right) }, best) {
                winner = Some(right);
            }
        }

        let Some(child) = winner else { return };
        // SAFETY: `child` is one of the in-bounds children checked above.
        unsafe { hole.move_to(child) };
    }
}

/// A slice with one slot lifted out.
///
/// The lifted element lives in `elt`; slot `pos` holds a stale bitwise copy that must
/// never be read or dropped. Dropping the `Hole` writes `elt` into `pos`.
struct Hole<'a, T> {
    data: &'a mut [T],
    elt: ManuallyDrop<T>,
    pos: usize,
}

impl<'a, T> Hole<'a, T> {
    /// # Safety
    ///
    /// `pos < data.len()`.
    #[inline]
    unsafe fn new(data: &'a mut [T], pos: usize) -> Self {
        debug_assert!(pos < data.len());
        // SAFETY: in bounds per the caller; the copy is written back by `drop`.
        let elt = unsafe { ptr::read(data.as_ptr().add(pos)) };
        Hole { data, elt: ManuallyDrop::new(elt), pos }
    }

    #[inline]
    fn pos(&self) -> usize {
        self.pos
    }

    /// The lifted element.
    #[inline]
    fn element(&self) -> &T {
        &self.elt
    }

    /// # Safety
    ///
    /// `index < self.data.len()` and `index != self.pos()`.
    #[inline]
    unsafe fn get(&self, index: usize) -> &T {
        debug_assert!(index < self.data.len() && index != self.pos);
        unsafe { self.data.get_unchecked(index) }
    }

    /// Copies the element at `index` into the gap, leaving the gap at `index`.
    ///
    /// # Safety
    ///
    /// `index < self.data.len()` and `index != self.pos()`.
    #[inline]
    unsafe fn move_to(&mut self, index: usize) {
        debug_assert!(index < self.data.len() && index != self.pos);
        let base = self.data.as_mut_ptr();
        // SAFETY: two distinct in-bounds slots.
        unsafe { ptr::copy_nonoverlapping(base.add(index), base.add(self.pos), 1) };
        self.pos = index;
    }
}

impl<T> Drop for Hole<'_, T> {
    #[inline]
    fn drop(&mut self) {
        // SAFETY: `pos` is in bounds and holds only the stale copy, and `elt` is
        //  never touched again.
        unsafe {
            let elt = ManuallyDrop::take(&mut self.elt);
            ptr::write(self.data.as_mut_ptr().add(self.pos), elt);
        }
    }
}

/// Holds the element `pop` is about to return. If the sink unwinds, the element goes
/// back onto the end of the storage instead of being dropped with the panic.
struct PushBackOnUnwind<'a, T> {
    data: &'a mut Vec<T>,
    item: Option<T>,
}

impl<T> Drop for PushBackOnUnwind<'_, T> {
    fn drop(&mut self) {
        if let Some(item) = self.item.take() {
            self.data.push(item);
        }
    }
}

/// Borrowing iterator over a heap's storage in array order, from
/// [`BinaryHeap::iter`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    iter: slice::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.iter.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        self.iter.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator over a heap's storage in array order, from the heap's
/// [`IntoIterator`] impl.
pub struct IntoIter<T> {
    iter: vec::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.iter.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

/// Iterator emptying a heap in array order, from [`BinaryHeap::drain`].
pub struct Drain<'a, T> {
    iter: vec::Drain<'a, T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.iter.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T, C: Comparator<T> + Default> From<Vec<T>> for BinaryHeap<T, C> {
    /// Heapifies `vec` in place under `C::default()`.
    fn from(vec: Vec<T>) -> BinaryHeap<T, C> {
        BinaryHeap::from_vec(vec, C::default())
    }
}

impl<T, C: Comparator<T> + Default, const N: usize> From<[T; N]> for BinaryHeap<T, C> {
    /// ```
    /// use prioheap::BinaryHeap;
    ///
    /// let heap: BinaryHeap<i32> = [1, 4, 2, 3].into();
    /// assert_eq!(heap.into_sorted_vec(), [1, 2, 3, 4]);
    /// ```
    fn from(arr: [T; N]) -> Self {
        Self::from_iter(arr)
    }
}

impl<T, C> From<BinaryHeap<T, C>> for Vec<T> {
    /// Unwraps the storage without moving it.
    fn from(heap: BinaryHeap<T, C>) -> Vec<T> {
        heap.data
    }
}

impl<T, C: Comparator<T> + Default> FromIterator<T> for BinaryHeap<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> BinaryHeap<T, C> {
        BinaryHeap::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T, C> IntoIterator for BinaryHeap<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { iter: self.data.into_iter() }
    }
}

impl<'a, T, C> IntoIterator for &'a BinaryHeap<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, C: Comparator<T>> Extend<T> for BinaryHeap<T, C> {
    /// Pushes each item in turn.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: 'a + Copy, C: Comparator<T>> Extend<&'a T> for BinaryHeap<T, C> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}
