use core::{
    iter::FusedIterator,
    marker::PhantomData,
    ptr::NonNull,
};

/// Positional iterator over the live elements of a [`DynArray`](super::DynArray).
///
/// Tracks a remaining count instead of an end pointer so that zero-sized
/// element types iterate the right number of times.
pub struct Iter<'a, T> {
    ptr: NonNull<T>,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

pub struct IterMut<'a, T> {
    ptr: NonNull<T>,
    remaining: usize,
    _marker: PhantomData<&'a mut T>,
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<'a, T> Iter<'a, T> {

    /// # Safety
    /// `ptr` must point at `len` live values that outlive `'a`.
    #[inline(always)]
    pub(super) unsafe fn new(ptr: NonNull<T>, len: usize) -> Self {
        Self {
            ptr,
            remaining: len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> IterMut<'a, T> {

    /// # Safety
    /// `ptr` must point at `len` live values that outlive `'a` and are not
    /// otherwise borrowed.
    #[inline(always)]
    pub(super) unsafe fn new(ptr: NonNull<T>, len: usize) -> Self {
        Self {
            ptr,
            remaining: len,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for Iter<'_, T> {

    #[inline(always)]
    fn clone(&self) -> Self {
        Self {
            ptr: self.ptr,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {

    type Item = &'a T;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None
        }
        let item = unsafe { self.ptr.as_ref() };
        self.ptr = unsafe { self.ptr.add(1) };
        self.remaining -= 1;
        Some(item)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {

    #[inline(always)]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None
        }
        self.remaining -= 1;
        Some(unsafe { self.ptr.add(self.remaining).as_ref() })
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> Iterator for IterMut<'a, T> {

    type Item = &'a mut T;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None
        }
        let item = unsafe { self.ptr.as_mut() };
        self.ptr = unsafe { self.ptr.add(1) };
        self.remaining -= 1;
        Some(item)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {

    #[inline(always)]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None
        }
        self.remaining -= 1;
        Some(unsafe { self.ptr.add(self.remaining).as_mut() })
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}
