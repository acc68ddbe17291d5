//! # projiter
//!
//! `projiter` provides random-access *projection iterators*: cursors that walk a
//! sequence in an order defined by a caller-supplied function from virtual offset
//! to concrete offset.
//!
//! A [`ProjectionIterator`] dereferences straight into the underlying storage, so
//! sorting through it rearranges the base sequence in the projected order, in
//! place, with no auxiliary copy.
//!
//! ## Key Features
//!
//! - **Zero-overhead adaptor**: advancing only touches a virtual offset; each access
//!   costs one projection call plus one O(1) cursor jump.
//! - **Compile-time capability checks**: the base must be a [`RandomAccessCursor`]
//!   and the projection must return a primitive integer, or the code does not build.
//! - **Composable**: a projection iterator is itself a [`RandomAccessCursor`], so
//!   the algorithms in [`algo`] accept it and projections can be stacked.
//! - **Owned or borrowed projections**: [`make_projection_iterator`] owns the
//!   projection, [`make_borrowed_projection_iterator`] borrows it.
//!
//! ## Usage
//!
//! ### Checked
//!
//! [`sort_projected`] validates the projection once and then sorts in place.
//!
//! ```rust
//! use projiter::prelude::*;
//!
//! let mut data = vec![3, 9, 6, 0, 1, 5, 4, 7, 2, 8];
//! let fip = FoldedInterleave::new(data.len());
//! sort_projected(&mut data, fip)?;
//!
//! // Lower half on even slots ascending, upper half on odd slots descending.
//! assert_eq!(data, [0, 9, 1, 8, 2, 7, 3, 6, 4, 5]);
//! # Ok::<(), projiter::ProjectionError>(())
//! ```
//!
//! ### Unchecked
//!
//! Build the iterator pair yourself and hand it to any algorithm in [`algo`].
//! Keeping every projected position inside the sequence is on you, hence `unsafe`.
//!
//! ```rust
//! use projiter::prelude::*;
//!
//! let mut data = vec![5, 3, 1, 4, 2];
//! let reverse = |index: isize| 4 - index;
//! let first = make_projection_iterator(SliceCursor::begin(&mut data), reverse);
//! let last = first + 5;
//!
//! // SAFETY: `4 - index` maps 0..5 one-to-one onto 0..5.
//! unsafe { projiter::algo::sort(first, last) };
//!
//! assert_eq!(data, [5, 4, 3, 2, 1]);
//! ```
//!
//! ## Undefined Behaviour
//!
//! The adaptor never checks bounds. Projecting outside the sequence, dereferencing
//! past its end, or mixing iterators from different bases is undefined behaviour,
//! exactly like misusing raw pointers. Every operation that can trigger it is an
//! `unsafe fn` with a `# Safety` section; [`validate_projection`] is the opt-in check.

pub mod algo;
pub mod core;
pub mod iter;
pub mod projection;

pub use crate::algo::{projected_to_vec, sort_projected, sort_projected_by};
pub use crate::core::{
    BidirectionalCursor, Borrowed, Cursor, Offset, Projection, RandomAccessCursor, SliceCursor,
};
pub use crate::iter::{ProjectionIterator, make_borrowed_projection_iterator, make_projection_iterator};
pub use crate::projection::{
    FoldedInterleave, ProjectionError, projection_table, validate_projection,
};

pub mod prelude {
    pub use crate::algo::{projected_to_vec, sort_projected, sort_projected_by};
    pub use crate::core::{
        BidirectionalCursor, Borrowed, Cursor, Offset, Projection, RandomAccessCursor,
        SliceCursor,
    };
    pub use crate::iter::{
        ProjectionIterator, make_borrowed_projection_iterator, make_projection_iterator,
    };
    pub use crate::projection::{
        FoldedInterleave, ProjectionError, projection_table, validate_projection,
    };
}
