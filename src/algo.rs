//! Generic algorithms over random-access cursor ranges.
//!
//! Every function takes a `(first, last)` pair of [`RandomAccessCursor`]s with
//! `last = first + len`, the same shape
//! [`ProjectionIterator`](crate::iter::ProjectionIterator) ranges have.
//! They work on plain [`SliceCursor`]s and on projected views alike.
//!
//! - **Sorting**: introsort. Median-of-three quicksort, insertion sort for
//!   short partitions, heapsort once the recursion gets too deep.
//! - **Searching**: [`partition_point`], [`lower_bound`], [`binary_search`].
//! - **Misc**: [`is_sorted`], [`reverse`], [`to_vec`], [`iter`].
//!
//! The raw functions are `unsafe`: they dereference every position in
//! `[first, last)` without checks. [`sort_projected`], [`sort_projected_by`]
//! and [`projected_to_vec`] are the safe entry points for slices; they
//! validate the projection once and then run the unchecked code.

use std::cmp::Ordering;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr;

use tracing::trace;

use crate::core::{Projection, RandomAccessCursor, SliceCursor};
use crate::iter::make_projection_iterator;
use crate::projection::{ProjectionError, projection_table};

/// Partitions at or below this length are insertion sorted.
pub const INSERTION_SORT_THRESHOLD: isize = 16;

#[inline(always)]
fn at<C: RandomAccessCursor>(first: &C, offset: isize) -> *mut C::Item {
    let mut cursor = first.clone();
    cursor.jump(offset);
    cursor.as_ptr()
}

#[inline(always)]
unsafe fn less_at<C, F>(first: &C, i: isize, j: isize, is_less: &mut F) -> bool
where
    C: RandomAccessCursor,
    F: FnMut(&C::Item, &C::Item) -> bool,
{
    unsafe { is_less(&*at(first, i), &*at(first, j)) }
}

#[inline(always)]
unsafe fn swap_at<C: RandomAccessCursor>(first: &C, i: isize, j: isize) {
    unsafe { ptr::swap(at(first, i), at(first, j)) }
}

/// Sorts `[first, last)` in ascending order.
///
/// Not stable. O(n log n) comparisons in the worst case.
///
/// # Safety
///
/// Every position in `[first, last)` must dereference to a distinct,
/// initialized element, and no references to those elements may be live.
/// For a [`ProjectionIterator`](crate::iter::ProjectionIterator) this means
/// the projection maps the range one-to-one into the base sequence.
///
/// # Examples
///
/// ```
/// use projiter::prelude::*;
///
/// let mut data = vec![3, 9, 6, 0, 1, 5, 4, 7, 2, 8];
/// let len = data.len();
/// let first = make_projection_iterator(SliceCursor::begin(&mut data), FoldedInterleave::new(len));
/// let last = first + len as isize;
///
/// // SAFETY: the folded interleave is a bijection onto 0..len.
/// unsafe { projiter::algo::sort(first, last) };
///
/// assert_eq!(data, [0, 9, 1, 8, 2, 7, 3, 6, 4, 5]);
/// ```
pub unsafe fn sort<C>(first: C, last: C)
where
    C: RandomAccessCursor,
    C::Item: Ord,
{
    unsafe { sort_by(first, last, Ord::cmp) }
}

/// Sorts `[first, last)` with a comparator.
///
/// # Safety
///
/// Same as [`sort`].
pub unsafe fn sort_by<C, F>(first: C, last: C, mut compare: F)
where
    C: RandomAccessCursor,
    F: FnMut(&C::Item, &C::Item) -> Ordering,
{
    let len = last.distance_from(&first);
    if len < 2 {
        return;
    }

    let limit = 2 * (usize::BITS - (len as usize).leading_zeros());
    let mut is_less = |a: &C::Item, b: &C::Item| compare(a, b) == Ordering::Less;
    unsafe { introsort(&first, len, &mut is_less, limit) }
}

/// Sorts `[first, last)` by a key extracted from each element.
///
/// # Safety
///
/// Same as [`sort`].
pub unsafe fn sort_by_key<C, K, F>(first: C, last: C, mut key: F)
where
    C: RandomAccessCursor,
    K: Ord,
    F: FnMut(&C::Item) -> K,
{
    unsafe { sort_by(first, last, |a, b| key(a).cmp(&key(b))) }
}

unsafe fn introsort<C, F>(first: &C, mut len: isize, is_less: &mut F, mut limit: u32)
where
    C: RandomAccessCursor,
    F: FnMut(&C::Item, &C::Item) -> bool,
{
    let mut first = first.clone();
    loop {
        if len <= INSERTION_SORT_THRESHOLD {
            unsafe { insertion_sort(&first, len, is_less) };
            return;
        }
        if limit == 0 {
            unsafe { heapsort(&first, len, is_less) };
            return;
        }
        limit -= 1;

        let mid = unsafe {
            median_of_three_to_front(&first, len, is_less);
            partition(&first, len, is_less)
        };

        // Recurse into the shorter side, loop on the longer one.
        let left_len = mid;
        let right_len = len - mid - 1;
        let mut right = first.clone();
        right.jump(mid + 1);
        if left_len < right_len {
            unsafe { introsort(&first, left_len, is_less, limit) };
            first = right;
            len = right_len;
        } else {
            unsafe { introsort(&right, right_len, is_less, limit) };
            len = left_len;
        }
    }
}

unsafe fn insertion_sort<C, F>(first: &C, len: isize, is_less: &mut F)
where
    C: RandomAccessCursor,
    F: FnMut(&C::Item, &C::Item) -> bool,
{
    for i in 1..len {
        let mut j = i;
        while j > 0 && unsafe { less_at(first, j, j - 1, is_less) } {
            unsafe { swap_at(first, j, j - 1) };
            j -= 1;
        }
    }
}

unsafe fn median_of_three_to_front<C, F>(first: &C, len: isize, is_less: &mut F)
where
    C: RandomAccessCursor,
    F: FnMut(&C::Item, &C::Item) -> bool,
{
    let (a, b, c) = (0, len / 2, len - 1);
    unsafe {
        if less_at(first, b, a, is_less) {
            swap_at(first, a, b);
        }
        if less_at(first, c, b, is_less) {
            swap_at(first, b, c);
        }
        if less_at(first, b, a, is_less) {
            swap_at(first, a, b);
        }
        swap_at(first, 0, b);
    }
}

/// Partitions around the pivot at offset 0 and returns its final offset.
///
/// Afterwards `[0, mid)` holds elements not greater than the pivot and
/// `(mid, len)` elements not less than it.
unsafe fn partition<C, F>(first: &C, len: isize, is_less: &mut F) -> isize
where
    C: RandomAccessCursor,
    F: FnMut(&C::Item, &C::Item) -> bool,
{
    let mut i = 1;
    let mut j = len - 1;
    unsafe {
        loop {
            while i <= j && less_at(first, i, 0, is_less) {
                i += 1;
            }
            while i <= j && less_at(first, 0, j, is_less) {
                j -= 1;
            }
            if i >= j {
                break;
            }
            swap_at(first, i, j);
            i += 1;
            j -= 1;
        }
        swap_at(first, 0, j);
    }
    j
}

unsafe fn heapsort<C, F>(first: &C, len: isize, is_less: &mut F)
where
    C: RandomAccessCursor,
    F: FnMut(&C::Item, &C::Item) -> bool,
{
    unsafe {
        for node in (0..len / 2).rev() {
            sift_down(first, node, len, is_less);
        }
        for end in (1..len).rev() {
            swap_at(first, 0, end);
            sift_down(first, 0, end, is_less);
        }
    }
}

unsafe fn sift_down<C, F>(first: &C, mut node: isize, end: isize, is_less: &mut F)
where
    C: RandomAccessCursor,
    F: FnMut(&C::Item, &C::Item) -> bool,
{
    loop {
        let mut child = 2 * node + 1;
        if child >= end {
            break;
        }
        unsafe {
            if child + 1 < end && less_at(first, child, child + 1, is_less) {
                child += 1;
            }
            if !less_at(first, node, child, is_less) {
                break;
            }
            swap_at(first, node, child);
        }
        node = child;
    }
}

/// Returns `true` if `[first, last)` is in ascending order.
///
/// # Safety
///
/// Every position in `[first, last)` must dereference to an initialized
/// element with no mutable references live.
pub unsafe fn is_sorted<C>(first: C, last: C) -> bool
where
    C: RandomAccessCursor,
    C::Item: PartialOrd,
{
    unsafe { is_sorted_by(first, last, |a, b| a <= b) }
}

/// Returns `true` if `in_order` holds for every adjacent pair of `[first, last)`.
///
/// # Safety
///
/// Same as [`is_sorted`].
pub unsafe fn is_sorted_by<C, F>(first: C, last: C, mut in_order: F) -> bool
where
    C: RandomAccessCursor,
    F: FnMut(&C::Item, &C::Item) -> bool,
{
    let len = last.distance_from(&first);
    (1..len).all(|i| unsafe { in_order(&*at(&first, i - 1), &*at(&first, i)) })
}

/// Returns the offset of the first element for which `pred` is false.
///
/// `[first, last)` must be partitioned by `pred` (all `true` before all
/// `false`). Returns `len` if every element satisfies it.
///
/// # Safety
///
/// Same as [`is_sorted`].
pub unsafe fn partition_point<C, F>(first: C, last: C, mut pred: F) -> isize
where
    C: RandomAccessCursor,
    F: FnMut(&C::Item) -> bool,
{
    let mut low = 0;
    let mut size = last.distance_from(&first);
    while size > 0 {
        let half = size / 2;
        let mid = low + half;
        if unsafe { pred(&*at(&first, mid)) } {
            low = mid + 1;
            size -= half + 1;
        } else {
            size = half;
        }
    }
    low
}

/// Returns a cursor at the first element not less than `value`.
///
/// # Safety
///
/// Same as [`is_sorted`]; `[first, last)` must be sorted.
pub unsafe fn lower_bound<C>(first: C, last: C, value: &C::Item) -> C
where
    C: RandomAccessCursor,
    C::Item: Ord,
{
    let offset = unsafe { partition_point(first.clone(), last, |elem| elem < value) };
    let mut cursor = first;
    cursor.jump(offset);
    cursor
}

/// Binary searches a sorted `[first, last)` for `value`.
///
/// Returns `Ok(offset)` of a matching element, or `Err(offset)` where it
/// could be inserted keeping the order, like [`slice::binary_search`].
///
/// # Safety
///
/// Same as [`lower_bound`].
pub unsafe fn binary_search<C>(first: C, last: C, value: &C::Item) -> Result<isize, isize>
where
    C: RandomAccessCursor,
    C::Item: Ord,
{
    let len = last.distance_from(&first);
    let offset = unsafe { partition_point(first.clone(), last, |elem| elem < value) };
    if offset < len && unsafe { &*at(&first, offset) } == value {
        Ok(offset)
    } else {
        Err(offset)
    }
}

/// Reverses the order of `[first, last)`.
///
/// # Safety
///
/// Same as [`sort`].
pub unsafe fn reverse<C: RandomAccessCursor>(first: C, last: C) {
    let len = last.distance_from(&first);
    for i in 0..len / 2 {
        unsafe { swap_at(&first, i, len - 1 - i) };
    }
}

/// Clones `[first, last)` into a vector, in cursor order.
///
/// # Safety
///
/// Same as [`is_sorted`].
pub unsafe fn to_vec<C>(first: C, last: C) -> Vec<C::Item>
where
    C: RandomAccessCursor,
    C::Item: Clone,
{
    unsafe { iter(first, last) }.cloned().collect()
}

/// Returns a borrowing iterator over `[first, last)`.
///
/// # Safety
///
/// Every position in `[first, last)` must dereference to an initialized
/// element that stays alive and unmodified for `'r`.
pub unsafe fn iter<'r, C>(first: C, last: C) -> Iter<'r, C>
where
    C: RandomAccessCursor,
{
    Iter {
        front: first,
        back: last,
        _marker: PhantomData,
    }
}

/// Iterator over the elements of a cursor range, created by [`iter`].
pub struct Iter<'r, C: RandomAccessCursor> {
    front: C,
    back: C,
    _marker: PhantomData<&'r C::Item>,
}

impl<'r, C: RandomAccessCursor> Iterator for Iter<'r, C> {
    type Item = &'r C::Item;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.back.distance_from(&self.front) <= 0 {
            return None;
        }
        let ptr = self.front.as_ptr();
        self.front.step();
        // Safety: upheld by the caller of `iter`.
        Some(unsafe { &*ptr })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back.distance_from(&self.front).max(0) as usize;
        (len, Some(len))
    }
}

impl<C: RandomAccessCursor> DoubleEndedIterator for Iter<'_, C> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.back.distance_from(&self.front) <= 0 {
            return None;
        }
        self.back.step_back();
        // Safety: upheld by the caller of `iter`.
        Some(unsafe { &*self.back.as_ptr() })
    }
}

impl<C: RandomAccessCursor> ExactSizeIterator for Iter<'_, C> {}

impl<C: RandomAccessCursor> FusedIterator for Iter<'_, C> {}

/// Sorts `data` so that it is ascending when read through `projection`.
///
/// The projection is evaluated once per element, up front, into an
/// O(n) offset table that is checked to be a bijection. The sort then runs in
/// place through that table, so a projection that changes its answers later
/// cannot reach outside `data`.
///
/// # Examples
///
/// ```
/// use projiter::prelude::*;
///
/// let mut data = vec![3, 9, 6, 0, 1, 5, 4, 7, 2, 8];
/// let fip = FoldedInterleave::new(data.len());
/// sort_projected(&mut data, fip)?;
///
/// assert_eq!(data, [0, 9, 1, 8, 2, 7, 3, 6, 4, 5]);
/// assert_eq!(projected_to_vec(&data, fip)?, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
/// # Ok::<(), projiter::ProjectionError>(())
/// ```
pub fn sort_projected<T, P>(data: &mut [T], projection: P) -> Result<(), ProjectionError>
where
    T: Ord,
    P: Projection,
{
    sort_projected_by(data, projection, T::cmp)
}

/// Like [`sort_projected`], with a comparator.
pub fn sort_projected_by<T, P, F>(
    data: &mut [T],
    projection: P,
    compare: F,
) -> Result<(), ProjectionError>
where
    P: Projection,
    F: FnMut(&T, &T) -> Ordering,
{
    let table = projection_table(data.len(), &projection)?;
    // The table rejects lengths past isize::MAX.
    let len = data.len() as isize;
    trace!(len, "sorting through projection table");

    let lookup = |index: isize| table[index as usize];
    let first = make_projection_iterator(SliceCursor::begin(data), lookup);
    let last = first + len;
    // SAFETY: `table` is a bijection onto 0..len that nothing can mutate
    // while the sort runs, and the lookup is bounds-checked, so every
    // position in [first, last) is a distinct element of `data`, which the
    // cursor borrows exclusively.
    unsafe { sort_by(first, last, compare) };
    Ok(())
}

/// Collects `data` in the order `projection` presents it.
///
/// Evaluates the projection once per element, like [`sort_projected`].
pub fn projected_to_vec<T, P>(data: &[T], projection: P) -> Result<Vec<T>, ProjectionError>
where
    T: Clone,
    P: Projection,
{
    let table = projection_table(data.len(), &projection)?;
    Ok(table.into_iter().map(|offset| data[offset].clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::FoldedInterleave;

    fn fip_range(data: &mut [i32]) -> (impl RandomAccessCursor<Item = i32> + Copy + '_, isize) {
        let len = data.len();
        let first = make_projection_iterator(SliceCursor::begin(data), FoldedInterleave::new(len));
        (first, len as isize)
    }

    #[test]
    fn sorts_plain_slices() {
        let mut data = vec![5, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5];
        let mut expected = data.clone();
        expected.sort();

        let (first, last) = SliceCursor::bounds(&mut data);
        unsafe { sort(first, last) };
        assert_eq!(data, expected);
    }

    #[test]
    fn heapsort_fallback_sorts() {
        let mut data: Vec<i32> = (0..200).rev().collect();
        let (first, _) = SliceCursor::bounds(&mut data);
        unsafe { heapsort(&first, 200, &mut |a: &i32, b: &i32| a < b) };
        assert_eq!(data, (0..200).collect::<Vec<_>>());
    }

    #[test]
    fn partition_places_pivot() {
        let mut data = vec![5, 8, 1, 9, 5, 2, 7, 5, 0];
        let (first, _) = SliceCursor::bounds(&mut data);
        let mid = unsafe { partition(&first, 9, &mut |a: &i32, b: &i32| a < b) };
        assert_eq!(data[mid as usize], 5);
        assert!(data[..mid as usize].iter().all(|&x| x <= 5));
        assert!(data[mid as usize + 1..].iter().all(|&x| x >= 5));
    }

    #[test]
    fn sort_by_descending_through_projection() {
        let mut data: Vec<i32> = (0..10).collect();
        let (first, len) = fip_range(&mut data);
        unsafe { sort_by(first, advanced(first, len), |a, b| b.cmp(a)) };
        assert_eq!(data, [9, 0, 8, 1, 7, 2, 6, 3, 5, 4]);
    }

    fn advanced<C: RandomAccessCursor>(mut cursor: C, delta: isize) -> C {
        cursor.jump(delta);
        cursor
    }

    #[test]
    fn sort_by_key_sorts_by_key() {
        let mut data = vec![(2, 'b'), (0, 'z'), (1, 'a')];
        let (first, last) = SliceCursor::bounds(&mut data);
        unsafe { sort_by_key(first, last, |&(k, _)| k) };
        assert_eq!(data, [(0, 'z'), (1, 'a'), (2, 'b')]);
    }

    #[test]
    fn searches_through_projection() {
        let mut data = vec![3, 9, 6, 0, 1, 5, 4, 7, 2, 8];
        let (first, len) = fip_range(&mut data);
        let last = advanced(first, len);
        unsafe {
            sort(first, last);
            assert!(is_sorted(first, last));
            assert_eq!(binary_search(first, last, &7), Ok(7));
            assert_eq!(binary_search(first, last, &10), Err(10));
            assert_eq!(lower_bound(first, last, &4).distance_from(&first), 4);
            assert_eq!(partition_point(first, last, |&x| x < 3), 3);
        }
    }

    #[test]
    fn reverse_and_collect() {
        let mut data = vec![0, 1, 2, 3, 4];
        let (first, last) = SliceCursor::bounds(&mut data);
        unsafe {
            reverse(first, last);
            assert_eq!(to_vec(first, last), [4, 3, 2, 1, 0]);
            assert!(!is_sorted(first, last));
        }
    }

    #[test]
    fn iter_is_double_ended() {
        let mut data = vec![1, 2, 3, 4];
        let (first, last) = SliceCursor::bounds(&mut data);
        let mut it = unsafe { iter(first, last) };
        assert_eq!(it.len(), 4);
        assert_eq!(it.next(), Some(&1));
        assert_eq!(it.next_back(), Some(&4));
        assert_eq!(it.len(), 2);
        assert_eq!(it.collect::<Vec<_>>(), [&2, &3]);
    }

    #[test]
    fn short_ranges_are_left_alone() {
        let mut data = vec![2, 1];
        let (first, _) = SliceCursor::bounds(&mut data);
        unsafe { sort(first, first) };
        assert_eq!(data, [2, 1]);
    }

    #[test]
    fn checked_sort_rejects_bad_projections() {
        let mut data = vec![3, 1, 2];
        let err = sort_projected(&mut data, |index: isize| index + 1).unwrap_err();
        assert!(matches!(err, ProjectionError::OutOfRange { index: 2, .. }));
        assert_eq!(data, [3, 1, 2]);

        assert!(projected_to_vec(&data, |_: isize| 0).is_err());
    }
}
