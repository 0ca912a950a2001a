use std::error::Error;
use std::fmt::{self, Display};

/// Errors returned by fallible `DynArray` operations.
///
/// A failed operation never leaves the container half-modified: length,
/// capacity and element values are exactly what they were before the call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DynArrayError {
    /// The global allocator returned null for a request of `bytes` bytes.
    AllocationFailure {
        /// Size of the allocation that failed.
        bytes: usize,
    },
    /// The requested element count can not be represented, either because
    /// doubling the capacity overflowed `usize` or because the byte size
    /// exceeds `isize::MAX`.
    CapacityOverflow {
        /// Element count that was asked for, saturated at `usize::MAX`.
        requested: usize,
    },
    /// An index was not valid for the current length.
    IndexOutOfBounds {
        /// The rejected index.
        index: usize,
        /// Length of the container at the time of the call.
        len: usize,
    },
    /// Removal from a container with no elements.
    EmptyContainer,
}

impl Display for DynArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynArrayError::AllocationFailure { bytes } => write!(f, "Could not allocate {} bytes", bytes),
            DynArrayError::CapacityOverflow { requested } => write!(f, "Capacity overflow, {} elements can not be represented", requested),
            DynArrayError::IndexOutOfBounds { index, len } => write!(f, "Index {} is out of bounds for length {}", index, len),
            DynArrayError::EmptyContainer => Display::fmt("Container is empty", f),
        }
    }
}

impl Error for DynArrayError {}
