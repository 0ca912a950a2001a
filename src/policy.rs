//! Capacity growth and shrink rules.
//!
//! Appends grow geometrically, inserts grow by exactly one slot, and removals
//! give memory back once the buffer is at least `SHRINK_RATIO` times larger
//! than the live elements.

use crate::DynArrayError;

/// Multiplier applied to the capacity when an append finds the buffer full.
pub const GROWTH_FACTOR: usize = 2;

/// `capacity / len` at or above which a removal shrinks the buffer.
pub const SHRINK_RATIO: usize = 4;

/// Capacity to grow to when `push_back` finds `len == capacity`.
pub fn grown_capacity(capacity: usize) -> Result<usize, DynArrayError> {
    if capacity == 0 {
        return Ok(1);
    }
    capacity
        .checked_mul(GROWTH_FACTOR)
        .ok_or(DynArrayError::CapacityOverflow { requested: usize::MAX })
}

/// Capacity needed by `insert` when the buffer is full.
pub fn insert_capacity(len: usize) -> Result<usize, DynArrayError> {
    len.checked_add(1)
        .ok_or(DynArrayError::CapacityOverflow { requested: usize::MAX })
}

/// Shrink check after `pop_back`. An emptied buffer keeps its storage.
#[inline(always)]
pub fn should_shrink_after_pop(len: usize, capacity: usize) -> bool {
    len > 0 && capacity / len >= SHRINK_RATIO
}

/// Shrink check after `erase`. An emptied buffer is released.
#[inline(always)]
pub fn should_shrink_after_erase(len: usize, capacity: usize) -> bool {
    if len == 0 {
        capacity > 0
    } else {
        capacity / len >= SHRINK_RATIO
    }
}
