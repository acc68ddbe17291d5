//! The projection iterator.
//!
//! [`ProjectionIterator`] wraps a base [`RandomAccessCursor`], a [`Projection`]
//! and a virtual offset. Advancing it only changes the virtual offset; every
//! access translates virtual offset -> projected offset -> concrete position:
//!
//! ```text
//! position = jump(copy of base, projection(index))
//! ```
//!
//! The iterator is itself a [`RandomAccessCursor`], so it plugs into every
//! algorithm in [`crate::algo`] and can serve as the base of another
//! projection.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::ptr;

use crate::core::{BidirectionalCursor, Borrowed, Cursor, Offset, Projection, RandomAccessCursor};

/// Returns an iterator viewing the sequence behind `base` through `projection`.
///
/// The iterator starts at virtual offset 0 and owns its projection. Both
/// capability requirements are checked at compile time: `base` must be a
/// [`RandomAccessCursor`] and `projection` must produce an integer.
///
/// It is up to the caller to keep every projected offset inside the
/// sequence. See [`crate::projection::validate_projection`] for a checked
/// test of that.
///
/// # Examples
///
/// ```
/// use projiter::prelude::*;
///
/// let mut data = [1, 2, 3, 4];
/// let reverse = |index: isize| 3 - index;
/// let first = make_projection_iterator(SliceCursor::begin(&mut data), reverse);
///
/// // SAFETY: 3 - 1 is inside the four-element array.
/// assert_eq!(unsafe { (first + 1).read() }, 3);
/// ```
#[inline]
pub fn make_projection_iterator<B, P>(base: B, projection: P) -> ProjectionIterator<B, P>
where
    B: RandomAccessCursor,
    P: Projection,
{
    ProjectionIterator::new(base, projection)
}

/// Like [`make_projection_iterator`], but borrows the projection.
///
/// Use this when the projection is large or carries state that several
/// iterators should observe. The returned iterator cannot outlive it.
#[inline]
pub fn make_borrowed_projection_iterator<B, P>(
    base: B,
    projection: &P,
) -> ProjectionIterator<B, Borrowed<'_, P>>
where
    B: RandomAccessCursor,
    P: Projection + ?Sized,
{
    ProjectionIterator::new(base, Borrowed(projection))
}

/// A random-access cursor whose element order is a permutation of its base.
///
/// Equality, ordering, hashing and distance only look at the virtual offset.
/// Comparing iterators built from different bases or projections compiles
/// but has no meaning.
///
/// Cloning copies the base, the projection and the offset alike, so
/// `clone_from` between iterators with different projections rebinds the
/// projection as well.
#[derive(Clone, Copy)]
pub struct ProjectionIterator<B, P> {
    base: B,
    projection: P,
    index: isize,
}

impl<B, P> ProjectionIterator<B, P>
where
    B: RandomAccessCursor,
    P: Projection,
{
    /// Creates an iterator at virtual offset 0.
    #[inline]
    pub fn new(base: B, projection: P) -> Self {
        Self {
            base,
            projection,
            index: 0,
        }
    }

    /// Returns the concrete offset the current virtual offset maps to.
    #[inline(always)]
    pub fn projected_offset(&self) -> isize {
        self.projection.project(self.index).to_offset()
    }

    /// Returns a copy of the base cursor moved to the projected position.
    ///
    /// The stored base is left where it is.
    #[inline(always)]
    pub fn position(&self) -> B {
        let mut position = self.base.clone();
        position.jump(self.projected_offset());
        position
    }

    /// Returns a pointer to the element at the projected position.
    #[inline(always)]
    pub fn as_ptr(&self) -> *mut B::Item {
        self.position().as_ptr()
    }

    /// Returns a reference to the element at the projected position.
    ///
    /// # Safety
    ///
    /// The projected position must lie inside the underlying sequence, and
    /// no mutable reference to that element may be live.
    #[inline(always)]
    pub unsafe fn get(&self) -> &B::Item {
        unsafe { &*self.as_ptr() }
    }

    /// Returns a mutable reference to the element at the projected position.
    ///
    /// # Safety
    ///
    /// The projected position must lie inside the underlying sequence, and
    /// no other reference to that element may be live.
    #[inline(always)]
    pub unsafe fn get_mut(&mut self) -> &mut B::Item {
        unsafe { &mut *self.as_ptr() }
    }

    /// Copies out the element at the projected position.
    ///
    /// # Safety
    ///
    /// Same as [`get`](Self::get).
    #[inline(always)]
    pub unsafe fn read(&self) -> B::Item
    where
        B::Item: Copy,
    {
        unsafe { *self.as_ptr() }
    }

    /// Replaces the element at the projected position, dropping the old one.
    ///
    /// # Safety
    ///
    /// Same as [`get_mut`](Self::get_mut).
    #[inline(always)]
    pub unsafe fn write(&self, value: B::Item) {
        unsafe { *self.as_ptr() = value }
    }

    /// Swaps the elements behind `self` and `other`, which may be the same.
    ///
    /// # Safety
    ///
    /// Both projected positions must lie inside the underlying sequence,
    /// and no references to either element may be live.
    #[inline(always)]
    pub unsafe fn swap_with(&self, other: &Self) {
        unsafe { ptr::swap(self.as_ptr(), other.as_ptr()) }
    }
}

impl<B, P> ProjectionIterator<B, P> {
    /// Returns the virtual offset.
    #[inline(always)]
    pub fn index(&self) -> isize {
        self.index
    }

    /// Returns the base cursor the iterator was built from.
    #[inline]
    pub fn base(&self) -> &B {
        &self.base
    }

    /// Returns the projection.
    #[inline]
    pub fn projection(&self) -> &P {
        &self.projection
    }

    /// Moves to the next virtual offset.
    #[inline(always)]
    pub fn increment(&mut self) -> &mut Self {
        self.index += 1;
        self
    }

    /// Moves to the previous virtual offset.
    #[inline(always)]
    pub fn decrement(&mut self) -> &mut Self {
        self.index -= 1;
        self
    }

    /// Moves to the next virtual offset, returning the prior state.
    #[inline]
    pub fn post_increment(&mut self) -> Self
    where
        Self: Clone,
    {
        let prior = self.clone();
        self.index += 1;
        prior
    }

    /// Moves to the previous virtual offset, returning the prior state.
    #[inline]
    pub fn post_decrement(&mut self) -> Self
    where
        Self: Clone,
    {
        let prior = self.clone();
        self.index -= 1;
        prior
    }
}

impl<B, P> fmt::Debug for ProjectionIterator<B, P>
where
    B: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectionIterator")
            .field("base", &self.base)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl<B, P> PartialEq for ProjectionIterator<B, P> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<B, P> Eq for ProjectionIterator<B, P> {}

impl<B, P> PartialOrd for ProjectionIterator<B, P> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }

    #[inline(always)]
    fn lt(&self, other: &Self) -> bool {
        self.index < other.index
    }
}

impl<B, P> Ord for ProjectionIterator<B, P> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl<B, P> Hash for ProjectionIterator<B, P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<B, P> AddAssign<isize> for ProjectionIterator<B, P> {
    #[inline(always)]
    fn add_assign(&mut self, delta: isize) {
        self.index += delta;
    }
}

impl<B, P> SubAssign<isize> for ProjectionIterator<B, P> {
    #[inline(always)]
    fn sub_assign(&mut self, delta: isize) {
        self.index -= delta;
    }
}

impl<B, P> Add<isize> for ProjectionIterator<B, P> {
    type Output = Self;

    #[inline(always)]
    fn add(mut self, delta: isize) -> Self {
        self += delta;
        self
    }
}

impl<B, P> Sub<isize> for ProjectionIterator<B, P> {
    type Output = Self;

    #[inline(always)]
    fn sub(mut self, delta: isize) -> Self {
        self -= delta;
        self
    }
}

impl<B, P> Sub for ProjectionIterator<B, P> {
    type Output = isize;

    #[inline(always)]
    fn sub(self, rhs: Self) -> isize {
        self.index - rhs.index
    }
}

impl<B, P> Sub for &ProjectionIterator<B, P> {
    type Output = isize;

    #[inline(always)]
    fn sub(self, rhs: Self) -> isize {
        self.index - rhs.index
    }
}

impl<B, P> Cursor for ProjectionIterator<B, P>
where
    B: RandomAccessCursor,
    P: Projection + Clone,
{
    type Item = B::Item;

    #[inline(always)]
    fn as_ptr(&self) -> *mut B::Item {
        ProjectionIterator::as_ptr(self)
    }

    #[inline(always)]
    fn step(&mut self) {
        self.index += 1;
    }

    #[inline(always)]
    fn advance_by(&mut self, delta: isize) {
        self.index += delta;
    }
}

impl<B, P> BidirectionalCursor for ProjectionIterator<B, P>
where
    B: RandomAccessCursor,
    P: Projection + Clone,
{
    #[inline(always)]
    fn step_back(&mut self) {
        self.index -= 1;
    }
}

impl<B, P> RandomAccessCursor for ProjectionIterator<B, P>
where
    B: RandomAccessCursor,
    P: Projection + Clone,
{
    #[inline(always)]
    fn jump(&mut self, delta: isize) {
        self.index += delta;
    }

    #[inline(always)]
    fn distance_from(&self, origin: &Self) -> isize {
        self.index - origin.index
    }
}
