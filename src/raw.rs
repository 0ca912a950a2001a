/*!

Owned backing storage for `DynArray`.

`RawBuf` only knows about the allocation: a pointer and how many `T` slots it
spans. It never reads, writes or drops elements on its own; the caller tells it
how many leading slots are initialized whenever memory has to move.

*/

use crate::DynArrayError;
use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    capacity: usize,
    _marker: PhantomData<T>,
}

unsafe impl<T: Send> Send for RawBuf<T> {}
unsafe impl<T: Sync> Sync for RawBuf<T> {}

impl<T> RawBuf<T> {
    const IS_ZST: bool = std::mem::size_of::<T>() == 0;

    #[inline(always)]
    pub const fn empty() -> RawBuf<T> {
        RawBuf {
            ptr: NonNull::dangling(),
            capacity: 0,
            _marker: PhantomData,
        }
    }

    #[inline(always)]
    pub fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn layout(capacity: usize) -> Result<Layout, DynArrayError> {
        Layout::array::<T>(capacity).map_err(|_| DynArrayError::CapacityOverflow { requested: capacity })
    }

    /// Moves the first `len` elements into a fresh allocation of exactly
    /// `new_capacity` slots and frees the previous one. A `new_capacity` of zero
    /// leaves the buffer unallocated.
    ///
    /// On error nothing is freed or moved and `self` still owns the old allocation.
    ///
    /// # Safety
    ///
    /// The first `len` slots must be initialized, and `len` must not exceed either
    /// the current or the new capacity.
    pub unsafe fn relocate(&mut self, len: usize, new_capacity: usize) -> Result<(), DynArrayError> {
        debug_assert!(len <= self.capacity, "relocate: len <= capacity");
        debug_assert!(len <= new_capacity, "relocate: len <= new_capacity");

        if new_capacity == self.capacity {
            return Ok(());
        }

        if Self::IS_ZST {
            self.capacity = new_capacity;
            return Ok(());
        }

        let new_ptr = if new_capacity == 0 {
            NonNull::dangling()
        } else {
            let layout = Self::layout(new_capacity)?;
            let raw = alloc::alloc(layout) as *mut T;
            NonNull::new(raw).ok_or(DynArrayError::AllocationFailure { bytes: layout.size() })?
        };

        if len > 0 {
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), len);
        }

        debug!("relocate {} elements: capacity {} -> {}", len, self.capacity, new_capacity);

        self.release();
        self.ptr = new_ptr;
        self.capacity = new_capacity;

        Ok(())
    }

    /// Frees the allocation, if any. Elements are not dropped.
    pub fn release(&mut self) {
        if self.capacity > 0 && !Self::IS_ZST {
            // Same layout that was used to allocate, so this can not fail.
            if let Ok(layout) = Layout::array::<T>(self.capacity) {
                unsafe { alloc::dealloc(self.ptr.as_ptr() as *mut u8, layout) };
            }
        }
        self.ptr = NonNull::dangling();
        self.capacity = 0;
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod raw_tests {
    use super::RawBuf;
    use crate::DynArrayError;

    #[test]
    fn starts_unallocated() {
        let buf = RawBuf::<u64>::empty();
        assert_eq!(0, buf.capacity());
    }

    #[test]
    fn relocate_keeps_initialized_prefix() {
        let mut buf = RawBuf::<u32>::empty();
        unsafe {
            buf.relocate(0, 2).unwrap();
            buf.ptr().write(10);
            buf.ptr().add(1).write(20);
            buf.relocate(2, 8).unwrap();
            assert_eq!(8, buf.capacity());
            assert_eq!(10, *buf.ptr());
            assert_eq!(20, *buf.ptr().add(1));
            buf.relocate(2, 2).unwrap();
            assert_eq!(2, buf.capacity());
            assert_eq!(20, *buf.ptr().add(1));
        }
    }

    #[test]
    fn relocate_to_zero_releases() {
        let mut buf = RawBuf::<u8>::empty();
        unsafe { buf.relocate(0, 16).unwrap() };
        unsafe { buf.relocate(0, 0).unwrap() };
        assert_eq!(0, buf.capacity());
    }

    #[test]
    fn unrepresentable_size_is_overflow_and_keeps_buffer() {
        let mut buf = RawBuf::<u64>::empty();
        unsafe {
            buf.relocate(0, 4).unwrap();
            buf.ptr().write(99);
            let result = buf.relocate(1, usize::MAX / 2);
            assert_eq!(Err(DynArrayError::CapacityOverflow { requested: usize::MAX / 2 }), result);
            assert_eq!(4, buf.capacity());
            assert_eq!(99, *buf.ptr());
        }
    }

    #[test]
    fn zero_sized_elements_never_allocate() {
        let mut buf = RawBuf::<()>::empty();
        unsafe { buf.relocate(0, 1024).unwrap() };
        assert_eq!(1024, buf.capacity());
        buf.release();
        assert_eq!(0, buf.capacity());
    }
}
