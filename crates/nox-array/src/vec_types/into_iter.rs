use core::{
    iter::FusedIterator,
    ptr::NonNull,
};

use super::{
    raw::RawBlock,
    strategies::drop_in_place,
};

/// Owning iterator returned by `DynArray::into_iter`.
///
/// Elements that were not yielded are dropped together with the storage.
pub struct IntoIter<T> {
    data: NonNull<T>,
    capacity: usize,
    start: usize,
    end: usize,
}

unsafe impl<T: Send> Send for IntoIter<T> {}

unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T> IntoIter<T> {

    /// # Safety
    /// `data` must be the block of a dissolved array with `len` live values.
    #[inline(always)]
    pub(super) unsafe fn new(data: NonNull<T>, capacity: usize, len: usize) -> Self {
        Self {
            data,
            capacity,
            start: 0,
            end: len,
        }
    }

    /// Elements not yet yielded.
    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        unsafe {
            core::slice::from_raw_parts(self.data.add(self.start).as_ptr(), self.end - self.start)
        }
    }
}

impl<T> Iterator for IntoIter<T> {

    type Item = T;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None
        }
        let value = unsafe { self.data.add(self.start).read() };
        self.start += 1;
        Some(value)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {

    #[inline(always)]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None
        }
        self.end -= 1;
        Some(unsafe { self.data.add(self.end).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {

    fn drop(&mut self) {
        let _block = unsafe { RawBlock::from_raw(self.data, self.capacity) };
        unsafe { drop_in_place(self.data.add(self.start), self.end - self.start) }
    }
}
