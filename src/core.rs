//! Core traits and types for projiter.
//!
//! This module defines:
//! - [`Cursor`], [`BidirectionalCursor`], [`RandomAccessCursor`]: the capability
//!   tiers of a position into a sequence.
//! - [`Projection`] and [`Offset`]: the mapping from a virtual offset to a concrete one.
//! - [`Borrowed`]: a projection held by reference instead of by value.
//! - [`SliceCursor`]: the random-access base position over a mutable slice.

use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// A copyable position into a sequence.
///
/// A cursor is a pointer with arithmetic: it knows how to move and where its
/// element lives, but it never checks that it is in bounds. Producing the
/// element pointer is safe, dereferencing it is up to the caller.
///
/// `Cursor` alone is the forward-only tier.
pub trait Cursor: Clone {
    /// The element type the cursor points at.
    type Item;

    /// Returns a pointer to the element at the current position.
    ///
    /// The pointer is only dereferenceable while the position lies inside the
    /// underlying sequence.
    fn as_ptr(&self) -> *mut Self::Item;

    /// Moves one position forward.
    fn step(&mut self);

    /// Moves `delta` positions.
    ///
    /// The default walks one step at a time, O(k), and supports only
    /// non-negative deltas. Random-access code paths use
    /// [`RandomAccessCursor::jump`] instead.
    #[inline]
    fn advance_by(&mut self, delta: isize) {
        debug_assert!(delta >= 0, "forward-only cursor cannot move backwards");
        for _ in 0..delta {
            self.step();
        }
    }
}

/// A cursor that can also move backwards.
pub trait BidirectionalCursor: Cursor {
    /// Moves one position backward.
    fn step_back(&mut self);

    /// Walks `delta` positions in either direction, one step at a time.
    ///
    /// Bidirectional cursors without O(1) arithmetic forward their
    /// [`Cursor::advance_by`] here.
    #[inline]
    fn walk(&mut self, delta: isize) {
        if delta >= 0 {
            for _ in 0..delta {
                self.step();
            }
        } else {
            for _ in 0..delta.unsigned_abs() {
                self.step_back();
            }
        }
    }
}

/// A cursor with constant-time jumps and distances.
///
/// Both methods are required, so a type without O(1) signed arithmetic
/// cannot claim this tier. Generic algorithms in [`crate::algo`] and
/// [`crate::iter::ProjectionIterator`] move only through [`jump`](Self::jump).
pub trait RandomAccessCursor: BidirectionalCursor {
    /// Moves `delta` positions in either direction in O(1).
    fn jump(&mut self, delta: isize);

    /// Returns the signed number of positions from `origin` to `self`.
    ///
    /// Only meaningful for two cursors into the same sequence.
    fn distance_from(&self, origin: &Self) -> isize;
}

mod sealed {
    pub trait Sealed {}
}

/// The integral result of a [`Projection`].
///
/// Implemented for the primitive integer types only, so a projection that
/// returns anything else is rejected at compile time.
pub trait Offset: Copy + sealed::Sealed {
    /// Converts the value into a signed position delta.
    fn to_offset(self) -> isize;
}

macro_rules! impl_offset {
    ($($t:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl Offset for $t {
                #[inline(always)]
                fn to_offset(self) -> isize {
                    self as isize
                }
            }
        )*
    };
}

impl_offset!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// A mapping from a virtual offset to a concrete offset relative to a base cursor.
///
/// Any `Fn(isize) -> I` with `I` a primitive integer is a projection. The
/// mapping must be a pure function of its argument: sort and search
/// algorithms call it repeatedly and expect stable answers.
///
/// # Examples
///
/// ```
/// use projiter::core::Projection;
///
/// let reverse = |index: isize| 9 - index;
/// assert_eq!(reverse.project(2), 7);
/// ```
pub trait Projection {
    /// The integer type the projection produces.
    type Output: Offset;

    /// Maps `index` to a concrete offset.
    fn project(&self, index: isize) -> Self::Output;
}

impl<F, O> Projection for F
where
    F: Fn(isize) -> O,
    O: Offset,
{
    type Output = O;

    #[inline(always)]
    fn project(&self, index: isize) -> O {
        self(index)
    }
}

/// A projection held by shared reference.
///
/// Lets several iterators drive one externally-owned projection without
/// copying it. The borrow keeps the projection alive for as long as any
/// iterator using it.
#[derive(Debug)]
pub struct Borrowed<'a, P: ?Sized>(pub &'a P);

impl<P: ?Sized> Clone for Borrowed<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: ?Sized> Copy for Borrowed<'_, P> {}

impl<P: Projection + ?Sized> Projection for Borrowed<'_, P> {
    type Output = P::Output;

    #[inline(always)]
    fn project(&self, index: isize) -> P::Output {
        self.0.project(index)
    }
}

/// A random-access cursor over a mutably borrowed slice.
///
/// Holds the slice's start pointer plus a signed position. Copies share the
/// same storage, which is what lets a projected view write into the slice.
/// Moving the cursor never touches memory; only dereferencing does.
pub struct SliceCursor<'a, T> {
    start: NonNull<T>,
    pos: isize,
    _marker: PhantomData<&'a mut [T]>,
}

impl<'a, T> SliceCursor<'a, T> {
    /// Returns a cursor at the first element of `slice`.
    #[inline]
    pub fn begin(slice: &'a mut [T]) -> Self {
        Self {
            start: NonNull::from(slice).cast::<T>(),
            pos: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the `(begin, end)` cursor pair spanning `slice`.
    #[inline]
    pub fn bounds(slice: &'a mut [T]) -> (Self, Self) {
        // Slices never exceed isize::MAX elements unless T is zero-sized.
        let len = slice.len() as isize;
        let begin = Self::begin(slice);
        let mut end = begin;
        end.pos = len;
        (begin, end)
    }

    /// Returns the position relative to the start of the slice.
    #[inline]
    pub fn position(&self) -> isize {
        self.pos
    }
}

impl<T> Clone for SliceCursor<'_, T> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SliceCursor<'_, T> {}

impl<T> fmt::Debug for SliceCursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceCursor")
            .field("start", &self.start)
            .field("pos", &self.pos)
            .finish()
    }
}

impl<T> PartialEq for SliceCursor<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.pos == other.pos
    }
}

impl<T> Eq for SliceCursor<'_, T> {}

// Same auto traits as the `&mut [T]` the cursor was built from.
unsafe impl<T: Send> Send for SliceCursor<'_, T> {}
unsafe impl<T: Sync> Sync for SliceCursor<'_, T> {}

impl<T> Cursor for SliceCursor<'_, T> {
    type Item = T;

    #[inline(always)]
    fn as_ptr(&self) -> *mut T {
        self.start.as_ptr().wrapping_offset(self.pos)
    }

    #[inline(always)]
    fn step(&mut self) {
        self.pos += 1;
    }

    #[inline(always)]
    fn advance_by(&mut self, delta: isize) {
        self.pos += delta;
    }
}

impl<T> BidirectionalCursor for SliceCursor<'_, T> {
    #[inline(always)]
    fn step_back(&mut self) {
        self.pos -= 1;
    }
}

impl<T> RandomAccessCursor for SliceCursor<'_, T> {
    #[inline(always)]
    fn jump(&mut self, delta: isize) {
        self.pos += delta;
    }

    #[inline(always)]
    fn distance_from(&self, origin: &Self) -> isize {
        self.pos - origin.pos
    }
}
