use crate::raw::RawBuf;
use crate::{policy, DynArrayError, Iter};
use std::fmt::Debug;
use std::ptr;

/// Growable contiguous array.
///
/// Elements live in a single heap allocation, at indices `[0, len)` with no
/// gaps. Appends grow the buffer geometrically (see [`policy`](crate::policy)),
/// inserts grow it by exactly one slot, and removals shrink it again when it
/// becomes mostly empty.
///
/// Every operation that can allocate returns a `Result`. A failed call leaves
/// length, capacity and element values untouched.
///
/// References returned by accessors borrow the array, so they can not outlive
/// the next mutation, which may move the storage.
pub struct DynArray<T> {
    buf: RawBuf<T>,
    len: usize,
}

impl<T> DynArray<T> {
    /// Creates an empty array. Nothing is allocated until the first element
    /// is added or capacity is reserved.
    pub const fn new() -> DynArray<T> {
        DynArray {
            buf: RawBuf::empty(),
            len: 0,
        }
    }

    /// Creates an empty array with room for exactly `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Result<DynArray<T>, DynArrayError> {
        let mut array = DynArray::new();
        array.reserve(capacity)?;
        Ok(array)
    }

    /// Size of a single element in bytes.
    #[inline(always)]
    pub fn elem_size(&self) -> usize {
        std::mem::size_of::<T>()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Makes sure the array can hold `new_capacity` elements without
    /// reallocating. The buffer is resized to exactly `new_capacity`.
    ///
    /// Requests that do not exceed the current capacity, including zero, do nothing.
    pub fn reserve(&mut self, new_capacity: usize) -> Result<(), DynArrayError> {
        if new_capacity == 0 {
            debug!("reserve(0) requested, nothing to do");
            return Ok(());
        }
        if new_capacity <= self.capacity() {
            return Ok(());
        }
        unsafe { self.buf.relocate(self.len, new_capacity) }
    }

    /// Reallocates the buffer to exactly `len` elements. An empty array gives
    /// its storage back entirely.
    pub fn shrink_to_fit(&mut self) -> Result<(), DynArrayError> {
        if self.capacity() > self.len {
            unsafe { self.buf.relocate(self.len, self.len) }
        } else {
            Ok(())
        }
    }

    fn shrink_best_effort(&mut self) {
        if let Err(_e) = self.shrink_to_fit() {
            warn!("could not shrink buffer of {} to {} elements: {}", self.capacity(), self.len, _e);
        }
    }

    /// Appends `value` at the end, doubling the capacity first if the array is full.
    ///
    /// On failure the value is dropped and the array is unchanged.
    pub fn push_back(&mut self, value: T) -> Result<(), DynArrayError> {
        if self.len == self.capacity() {
            let new_capacity = policy::grown_capacity(self.capacity())?;
            self.reserve(new_capacity)?;
        }
        unsafe { self.buf.ptr().add(self.len).write(value) };
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the last element.
    ///
    /// May shrink the buffer afterwards; an array popped down to zero keeps its storage.
    pub fn pop_back(&mut self) -> Result<T, DynArrayError> {
        if self.len == 0 {
            trace!("pop_back on empty array");
            return Err(DynArrayError::EmptyContainer);
        }

        self.len -= 1;
        let value = unsafe { self.buf.ptr().add(self.len).read() };

        if policy::should_shrink_after_pop(self.len, self.capacity()) {
            self.shrink_best_effort();
        }

        Ok(value)
    }

    /// Returns the element at `index`.
    pub fn at(&self, index: usize) -> Result<&T, DynArrayError> {
        let len = self.len;
        self.as_slice().get(index).ok_or_else(|| {
            trace!("at({}) rejected, len {}", index, len);
            DynArrayError::IndexOutOfBounds { index, len }
        })
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, DynArrayError> {
        let len = self.len;
        self.as_mut_slice().get_mut(index).ok_or_else(|| {
            trace!("at_mut({}) rejected, len {}", index, len);
            DynArrayError::IndexOutOfBounds { index, len }
        })
    }

    #[inline(always)]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    #[inline(always)]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    #[inline(always)]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    #[inline(always)]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Inserts `value` at `index`, moving everything after it one slot to the
    /// right. `index == len` appends.
    ///
    /// A full buffer grows by exactly one slot here, unlike `push_back`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), DynArrayError> {
        if index > self.len {
            trace!("insert({}) rejected, len {}", index, self.len);
            return Err(DynArrayError::IndexOutOfBounds { index, len: self.len });
        }

        if self.len == self.capacity() {
            let new_capacity = policy::insert_capacity(self.len)?;
            self.reserve(new_capacity)?;
        }

        unsafe {
            let slot = self.buf.ptr().add(index);
            if index < self.len {
                ptr::copy(slot, slot.add(1), self.len - index);
            }
            slot.write(value);
        }
        self.len += 1;

        Ok(())
    }

    /// Removes and returns the element at `index`, moving everything after it
    /// one slot to the left.
    ///
    /// May shrink the buffer afterwards; erasing the last element releases the storage.
    pub fn erase(&mut self, index: usize) -> Result<T, DynArrayError> {
        if index >= self.len {
            trace!("erase({}) rejected, len {}", index, self.len);
            return Err(DynArrayError::IndexOutOfBounds { index, len: self.len });
        }

        let value = unsafe {
            let slot = self.buf.ptr().add(index);
            let value = slot.read();
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            value
        };
        self.len -= 1;

        if policy::should_shrink_after_erase(self.len, self.capacity()) {
            self.shrink_best_effort();
        }

        Ok(value)
    }

    /// Drops every element. The capacity is kept for reuse.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Drops every element and frees the storage, leaving a fresh empty array.
    /// Calling it again is a no-op.
    pub fn destroy(&mut self) {
        self.clear();
        self.buf.release();
    }

    fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let tail = ptr::slice_from_raw_parts_mut(unsafe { self.buf.ptr().add(new_len) }, self.len - new_len);
        // Length goes first, so a panicking drop can not cause a double drop.
        self.len = new_len;
        unsafe { ptr::drop_in_place(tail) };
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { std::slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    /// Iterates over the live elements from front to back.
    #[inline(always)]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.as_slice())
    }
}

impl<T> DynArray<T> where T: Default {
    /// Changes the length to `new_len`.
    ///
    /// Growing reserves exactly `new_len` when needed and fills the new slots
    /// with `T::default()`. Shrinking drops the tail and then tries to shrink the
    /// buffer to fit; if that reallocation fails, the array keeps the larger buffer.
    pub fn resize(&mut self, new_len: usize) -> Result<(), DynArrayError> {
        if new_len > self.len {
            self.reserve(new_len)?;
            while self.len < new_len {
                unsafe { self.buf.ptr().add(self.len).write(T::default()) };
                self.len += 1;
            }
        } else if new_len < self.len {
            self.truncate(new_len);
            self.shrink_best_effort();
        }
        Ok(())
    }
}

impl<T> DynArray<T> where T: Clone {
    /// Copies the live elements into a new array with capacity equal to `len`.
    pub fn try_clone(&self) -> Result<DynArray<T>, DynArrayError> {
        let mut copy = DynArray::with_capacity(self.len)?;
        for item in self.iter() {
            copy.push_back(item.clone())?;
        }
        Ok(copy)
    }
}

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        DynArray::new()
    }
}

impl<T> Debug for DynArray<T> where T: Debug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, U> PartialEq<DynArray<U>> for DynArray<T> where T: PartialEq<U> {
    fn eq(&self, other: &DynArray<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T> Eq for DynArray<T> where T: Eq {}

impl<T, U> PartialEq<[U]> for DynArray<T> where T: PartialEq<U> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U, const N: usize> PartialEq<[U; N]> for DynArray<T> where T: PartialEq<U> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == &other[..]
    }
}
