use core::{
    mem,
    ptr::NonNull,
};

use crate::{
    allocator::Allocator,
    errors::CapacityError,
    global_alloc::GLOBAL_ALLOC,
};

/// An owned block of `capacity` uninitialized slots.
///
/// The block is returned to the allocator when dropped, unless it was handed
/// off with [`RawBlock::into_raw`]. It never drops the values inside it.
pub(super) struct RawBlock<T> {
    ptr: NonNull<T>,
    capacity: usize,
}

impl<T> RawBlock<T> {

    #[inline(always)]
    pub fn allocate(capacity: usize) -> Result<Self, CapacityError> {
        let ptr = unsafe { GLOBAL_ALLOC.allocate_uninit::<T>(capacity)? };
        Ok(Self {
            ptr,
            capacity,
        })
    }

    /// # Safety
    /// `ptr` must come from [`RawBlock::into_raw`] of a block with the same
    /// `capacity`, or be dangling with a `capacity` of zero.
    #[inline(always)]
    pub unsafe fn from_raw(ptr: NonNull<T>, capacity: usize) -> Self {
        Self {
            ptr,
            capacity,
        }
    }

    #[inline(always)]
    pub fn as_non_null(&self) -> NonNull<T> {
        self.ptr
    }

    #[inline(always)]
    pub fn into_raw(self) -> NonNull<T> {
        let ptr = self.ptr;
        mem::forget(self);
        ptr
    }
}

impl<T> Drop for RawBlock<T> {

    fn drop(&mut self) {
        if self.capacity != 0 {
            unsafe { GLOBAL_ALLOC.free_uninit(self.ptr, self.capacity) }
        }
    }
}
