//! Built-in projections and the checked validator.
//!
//! The adaptor itself never checks a projection. [`validate_projection`] is
//! the opt-in, one-off O(n) check that a projection is a bijection onto
//! `0..len`; the safe helpers in [`crate::algo`] run it before handing raw
//! cursors to the unchecked algorithms.

use thiserror::Error;
use tracing::debug;

use crate::core::{Offset, Projection};

/// Why a projection cannot safely view a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    #[error("sequence length {len} exceeds isize::MAX")]
    TooLong { len: usize },

    #[error("projection maps index {index} to offset {offset}, outside 0..{len}")]
    OutOfRange {
        index: isize,
        offset: isize,
        len: usize,
    },

    #[error("projection maps indices {previous} and {index} to the same offset {offset}")]
    Collision {
        index: isize,
        previous: isize,
        offset: isize,
    },
}

/// Checks that `projection` maps `0..len` one-to-one onto `0..len`.
///
/// Fails on the first virtual offset whose projection leaves the range or
/// lands on an already claimed offset. Needs O(n) scratch space.
///
/// # Examples
///
/// ```
/// use projiter::prelude::*;
///
/// assert!(validate_projection(10, &FoldedInterleave::new(10)).is_ok());
///
/// let halve = |index: isize| index / 2;
/// assert!(matches!(
///     validate_projection(4, &halve),
///     Err(ProjectionError::Collision { index: 1, previous: 0, offset: 0 })
/// ));
/// ```
pub fn validate_projection<P>(len: usize, projection: &P) -> Result<(), ProjectionError>
where
    P: Projection + ?Sized,
{
    claim_offsets(len, projection, |_| {})
}

/// Evaluates `projection` once per virtual offset and returns the results.
///
/// `table[i]` is the concrete offset of virtual offset `i`. The table passes
/// the same checks as [`validate_projection`], and unlike the projection it
/// cannot change its answers afterwards, so safe code may index a sequence
/// of `len` elements through it.
///
/// # Examples
///
/// ```
/// use projiter::prelude::*;
///
/// let table = projection_table(5, &FoldedInterleave::new(5))?;
/// assert_eq!(table, [0, 2, 4, 3, 1]);
/// # Ok::<(), projiter::ProjectionError>(())
/// ```
pub fn projection_table<P>(len: usize, projection: &P) -> Result<Vec<usize>, ProjectionError>
where
    P: Projection + ?Sized,
{
    let mut table = Vec::with_capacity(len);
    claim_offsets(len, projection, |offset| table.push(offset))?;
    Ok(table)
}

/// Projects every virtual offset in order, handing each one-to-one offset to `visit`.
fn claim_offsets<P, V>(len: usize, projection: &P, mut visit: V) -> Result<(), ProjectionError>
where
    P: Projection + ?Sized,
    V: FnMut(usize),
{
    let bound = isize::try_from(len).map_err(|_| ProjectionError::TooLong { len })?;

    let mut claimed = vec![false; len];
    for index in 0..bound {
        let offset = projection.project(index).to_offset();
        if !(0..bound).contains(&offset) {
            debug!(index, offset, len, "projection out of range");
            return Err(ProjectionError::OutOfRange { index, offset, len });
        }

        let slot = offset as usize;
        if claimed[slot] {
            // Only the error path pays for finding the earlier claimant.
            let previous = (0..index)
                .find(|&earlier| projection.project(earlier).to_offset() == offset)
                .unwrap_or(index);
            debug!(index, previous, offset, "projection collision");
            return Err(ProjectionError::Collision {
                index,
                previous,
                offset,
            });
        }
        claimed[slot] = true;
        visit(slot);
    }

    Ok(())
}

/// The folded-interleave projection for a sequence of `len` elements.
///
/// Virtual offsets in the lower half land on even slots ascending, the upper
/// half on odd slots descending. Sorting `0..10` through it lays memory out as
///
/// ```text
/// 0, 9, 1, 8, 2, 7, 3, 6, 4, 5
/// ```
///
/// Offsets are computed as `2i` when `2i < len`, else `2len - 2i - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FoldedInterleave {
    len: isize,
}

impl FoldedInterleave {
    /// Creates the projection for a sequence of `len` elements.
    ///
    /// Lengths past `isize::MAX / 2` overflow the offset arithmetic.
    pub fn new(len: usize) -> Self {
        Self { len: len as isize }
    }

    /// Returns the sequence length the projection was built for.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns `true` for the projection of an empty sequence.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maps a virtual offset to its concrete offset.
    #[inline(always)]
    pub fn project(&self, index: isize) -> isize {
        let doubled = 2 * index;
        if doubled >= self.len {
            2 * self.len - doubled - 1
        } else {
            doubled
        }
    }

    /// Maps a concrete offset back to the virtual offset that projects onto it.
    #[inline]
    pub fn inverse(&self, offset: isize) -> isize {
        if offset % 2 == 0 {
            offset / 2
        } else {
            (2 * self.len - 1 - offset) / 2
        }
    }
}

impl Projection for FoldedInterleave {
    type Output = isize;

    #[inline(always)]
    fn project(&self, index: isize) -> isize {
        FoldedInterleave::project(self, index)
    }
}
