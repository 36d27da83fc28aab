use core::{
    alloc::Layout,
    ptr::NonNull,
};

use crate::errors::CapacityError;

pub(crate) trait Allocator {

    unsafe fn allocate_raw(&self, layout: Layout) -> Option<NonNull<u8>>;

    unsafe fn free_raw(&self, ptr: NonNull<u8>, layout: Layout);

    /// Zero-sized requests never reach the allocator and yield a dangling pointer.
    unsafe fn allocate_uninit<T>(&self, count: usize) -> Result<NonNull<T>, CapacityError> {
        let layout = Layout::array::<T>(count)
            .map_err(|_| CapacityError::MaxCapacityExceeded {
                max_capacity: max_capacity::<T>()
            })?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling())
        }
        unsafe { self
            .allocate_raw(layout)
            .map(|ptr| ptr.cast::<T>())
            .ok_or(CapacityError::AllocFailed { new_capacity: count })
        }
    }

    unsafe fn free_uninit<T>(&self, ptr: NonNull<T>, count: usize) {
        let Ok(layout) = Layout::array::<T>(count) else {
            return
        };
        if layout.size() == 0 {
            return
        }
        unsafe { self.free_raw(ptr.cast::<u8>(), layout) }
    }
}

#[inline(always)]
pub(crate) const fn max_capacity<T>() -> usize {
    if size_of::<T>() == 0 {
        usize::MAX
    }
    else {
        isize::MAX as usize / size_of::<T>()
    }
}
