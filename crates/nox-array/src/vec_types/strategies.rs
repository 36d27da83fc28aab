use core::{
    mem::{self, needs_drop},
    ptr::{self, NonNull},
};

/// Relocates `len` live values from `src` into the uninitialized slots at `dst`.
///
/// The source slots are left logically uninitialized, but keep their bits
/// until overwritten.
#[inline(always)]
pub(super) unsafe fn move_elements<T>(src: NonNull<T>, dst: NonNull<T>, len: usize) {
    unsafe {
        src.copy_to_nonoverlapping(dst, len);
    }
}

/// Drops `len` values starting at `ptr`, in increasing index order.
#[inline(always)]
pub(super) unsafe fn drop_in_place<T>(ptr: NonNull<T>, len: usize) {
    if needs_drop::<T>() {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr.as_ptr(), len));
        }
    }
}

/// Writes values into consecutive uninitialized slots.
///
/// Until [`PartialFill::commit`] is called, dropping the fill (for example
/// while unwinding out of a panicking constructor) drops every value it wrote,
/// last written first.
pub(super) struct PartialFill<T> {
    dst: NonNull<T>,
    written: usize,
}

impl<T> PartialFill<T> {

    /// # Safety
    /// Every slot reached through [`PartialFill::write`] must be uninitialized
    /// and inside the same allocation as `dst`.
    #[inline(always)]
    pub unsafe fn new(dst: NonNull<T>) -> Self {
        Self {
            dst,
            written: 0,
        }
    }

    #[inline(always)]
    pub unsafe fn write(&mut self, value: T) {
        unsafe { self.dst.add(self.written).write(value) }
        self.written += 1;
    }

    #[inline(always)]
    pub fn commit(self) -> usize {
        let written = self.written;
        mem::forget(self);
        written
    }
}

impl<T> Drop for PartialFill<T> {

    fn drop(&mut self) {
        if needs_drop::<T>() {
            for i in (0..self.written).rev() {
                unsafe { self.dst.add(i).drop_in_place() }
            }
        }
    }
}

#[inline(always)]
pub(super) unsafe fn clone_elements<T: Clone>(src: &[T], dst: NonNull<T>) {
    let mut fill = unsafe { PartialFill::new(dst) };
    for value in src {
        unsafe { fill.write(value.clone()) }
    }
    fill.commit();
}

#[inline(always)]
pub(super) unsafe fn fill_with<T, F>(dst: NonNull<T>, count: usize, mut f: F)
    where
        F: FnMut() -> T,
{
    let mut fill = unsafe { PartialFill::new(dst) };
    for _ in 0..count {
        unsafe { fill.write(f()) }
    }
    fill.commit();
}

/// Clones `value` into the first `count - 1` slots and moves it into the last.
#[inline(always)]
pub(super) unsafe fn fill_clone<T: Clone>(dst: NonNull<T>, count: usize, value: T) {
    if count == 0 {
        return
    }
    let mut fill = unsafe { PartialFill::new(dst) };
    for _ in 1..count {
        unsafe { fill.write(value.clone()) }
    }
    unsafe { fill.write(value) }
    fill.commit();
}
