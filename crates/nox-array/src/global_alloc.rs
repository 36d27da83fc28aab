use core::{
    alloc::Layout,
    ptr::NonNull,
};

use alloc::alloc::{alloc, dealloc};

use crate::allocator::Allocator;

pub(crate) struct GlobalAlloc;

pub(crate) static GLOBAL_ALLOC: GlobalAlloc = GlobalAlloc;

impl Allocator for GlobalAlloc {

    unsafe fn allocate_raw(&self, layout: Layout) -> Option<NonNull<u8>> {
        debug_assert!(layout.size() != 0);
        NonNull::new(unsafe { alloc(layout) })
    }

    unsafe fn free_raw(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { dealloc(ptr.as_ptr(), layout) }
    }
}
