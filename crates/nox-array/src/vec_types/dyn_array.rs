use core::{
    fmt,
    iter::Rev,
    marker::PhantomData,
    mem,
    ops::{Deref, DerefMut},
    ptr::{self, NonNull},
    slice,
};

use crate::{
    allocator::max_capacity,
    errors::CapacityError,
    Result,
};

use super::{
    raw::RawBlock,
    strategies::{
        move_elements,
        drop_in_place,
        clone_elements,
        fill_with,
        fill_clone,
        PartialFill,
    },
    Iter,
    IterMut,
    IntoIter,
};

use CapacityError::{IndexOutOfBounds, MaxCapacityExceeded};

/// Capacity of the first block an empty array allocates when appending.
pub const INITIAL_CAPACITY: usize = 2;

/// Factor a full array multiplies its capacity by when appending.
pub const GROWTH_FACTOR: usize = 2;

/// An owning, contiguous, growable array.
///
/// Slots `[0, len)` hold live values, slots `[len, capacity)` are allocated
/// but uninitialized. When `capacity` is zero no storage is held at all.
///
/// Every operation that reallocates or changes `len` invalidates iterators
/// and references obtained before it; the borrow checker rejects such uses.
///
/// Operations that allocate report failure through [`Result`]. A panic while
/// constructing an element (`Default`, `Clone` or a construction closure)
/// unwinds through the array leaving it valid: elements constructed by the
/// failed operation are dropped in reverse order and storage it allocated is
/// released. [`reserve`](Self::reserve), [`shrink_to_fit`](Self::shrink_to_fit)
/// and the append operations leave the array exactly as it was.
pub struct DynArray<T> {
    data: NonNull<T>,
    capacity: usize,
    len: usize,
    _marker: PhantomData<T>,
}

unsafe impl<T: Send> Send for DynArray<T> {}

unsafe impl<T: Sync> Sync for DynArray<T> {}

const_assert!(size_of::<DynArray<u32>>() == size_of::<Option<DynArray<u32>>>());

impl<T> DynArray<T> {

    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            data: NonNull::dangling(),
            capacity: 0,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates exactly `capacity` slots without constructing any element.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Ok(Self::new())
        }
        let block = RawBlock::allocate(capacity)?;
        Ok(unsafe { Self::from_raw_parts(block.into_raw(), capacity, 0) })
    }

    /// Allocates exactly `len` slots and fills them with `T::default()`.
    pub fn with_default(len: usize) -> Result<Self>
        where
            T: Default
    {
        Self::with_len_with(len, T::default)
    }

    /// Allocates exactly `len` slots and fills them with copies of `value`.
    pub fn with_len(len: usize, value: T) -> Result<Self>
        where
            T: Clone
    {
        if len == 0 {
            return Ok(Self::new())
        }
        let block = RawBlock::allocate(len)?;
        unsafe {
            fill_clone(block.as_non_null(), len, value);
            Ok(Self::from_raw_parts(block.into_raw(), len, len))
        }
    }

    /// Allocates exactly `len` slots and fills them in order with values from `f`.
    pub fn with_len_with<F>(len: usize, f: F) -> Result<Self>
        where
            F: FnMut() -> T
    {
        if len == 0 {
            return Ok(Self::new())
        }
        let block = RawBlock::allocate(len)?;
        unsafe {
            fill_with(block.as_non_null(), len, f);
            Ok(Self::from_raw_parts(block.into_raw(), len, len))
        }
    }

    /// Clones every element of an exact-size iterator, in order.
    ///
    /// Exactly `iter.len()` slots are allocated before any element is cloned.
    pub fn from_exact_iter<'a, I>(iter: I) -> Result<Self>
        where
            I: IntoIterator<Item = &'a T>,
            I::IntoIter: ExactSizeIterator,
            T: Clone + 'a,
    {
        let iter = iter.into_iter();
        let capacity = iter.len();
        if capacity == 0 {
            return Ok(Self::new())
        }
        let block = RawBlock::allocate(capacity)?;
        let mut fill = unsafe { PartialFill::new(block.as_non_null()) };
        for value in iter.take(capacity) {
            unsafe { fill.write(value.clone()) }
        }
        let len = fill.commit();
        Ok(unsafe { Self::from_raw_parts(block.into_raw(), capacity, len) })
    }

    #[inline(always)]
    pub fn from_slice(values: &[T]) -> Result<Self>
        where
            T: Clone
    {
        Self::from_exact_iter(values)
    }

    /// Copies `self` into a new array with the same capacity.
    pub fn try_clone(&self) -> Result<Self>
        where
            T: Clone
    {
        if self.capacity == 0 {
            return Ok(Self::new())
        }
        let block = RawBlock::allocate(self.capacity)?;
        unsafe {
            clone_elements(self.as_slice(), block.as_non_null());
            Ok(Self::from_raw_parts(block.into_raw(), self.capacity, self.len))
        }
    }

    /// Replaces the contents of `self` with copies of `source`'s elements.
    ///
    /// The current block is reused when it can hold `source.len()` elements,
    /// otherwise it is released and a block of `source.capacity()` slots is
    /// allocated. If an allocation or a clone fails, `self` is left empty.
    pub fn try_clone_from(&mut self, source: &Self) -> Result<()>
        where
            T: Clone
    {
        self.clear();
        if self.capacity < source.len {
            drop(unsafe { self.replace_block(NonNull::dangling(), 0) });
            let block = RawBlock::allocate(source.capacity)?;
            self.data = block.into_raw();
            self.capacity = source.capacity;
        }
        unsafe { clone_elements(source.as_slice(), self.data); }
        self.len = source.len;
        Ok(())
    }

    /// Moves the contents out of `other`, leaving it empty with no storage.
    #[inline(always)]
    pub fn take(other: &mut Self) -> Self {
        mem::take(other)
    }

    /// Drops the contents of `self` and adopts the storage of `from`, which is
    /// left empty with no storage.
    #[inline(always)]
    pub fn move_from(&mut self, from: &mut Self) {
        *self = mem::take(from);
    }

    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Base address of the storage, or null when no storage is held.
    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        if self.capacity == 0 {
            ptr::null()
        }
        else {
            self.data.as_ptr()
        }
    }

    /// Base address of the storage, or null when no storage is held.
    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        if self.capacity == 0 {
            ptr::null_mut()
        }
        else {
            self.data.as_ptr()
        }
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.data.as_ptr(), self.len) }
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.data.as_ptr(), self.len) }
    }

    /// Checked access.
    #[inline(always)]
    pub fn at(&self, index: usize) -> Result<&T> {
        if index >= self.len {
            return Err(IndexOutOfBounds { index, len: self.len }.into())
        }
        Ok(unsafe { self.data.add(index).as_ref() })
    }

    /// Checked mutable access.
    #[inline(always)]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        if index >= self.len {
            return Err(IndexOutOfBounds { index, len: self.len }.into())
        }
        Ok(unsafe { self.data.add(index).as_mut() })
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

    /// Drops every element, keeping the storage.
    pub fn clear(&mut self) {
        let len = self.len;
        self.len = 0;
        unsafe { drop_in_place(self.data, len) }
    }

    /// Drops the elements at `[len, self.len())`. No-op if `len >= self.len()`.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return
        }
        let tail = self.len - len;
        self.len = len;
        unsafe { drop_in_place(self.data.add(len), tail) }
    }

    /// Grows the storage to exactly `capacity` slots. Never shrinks.
    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        if capacity <= self.capacity {
            return Ok(())
        }
        self.relocate(capacity)
    }

    /// Shrinks the storage to exactly `len` slots, releasing it when empty.
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        if self.capacity == self.len {
            return Ok(())
        }
        if self.len == 0 {
            drop(unsafe { self.replace_block(NonNull::dangling(), 0) });
            return Ok(())
        }
        self.relocate(self.len)
    }

    /// Resizes to `len`, filling new slots with copies of `value`.
    ///
    /// Growing past the capacity allocates exactly `len` slots.
    pub fn resize(&mut self, len: usize, value: T) -> Result<()>
        where
            T: Clone
    {
        self.resize_impl(len, |dst, count| unsafe { fill_clone(dst, count, value) })
    }

    /// Resizes to `len`, filling new slots with `T::default()`.
    pub fn resize_default(&mut self, len: usize) -> Result<()>
        where
            T: Default
    {
        self.resize_with(len, T::default)
    }

    /// Resizes to `len`, filling new slots in order with values from `f`.
    pub fn resize_with<F>(&mut self, len: usize, f: F) -> Result<()>
        where
            F: FnMut() -> T
    {
        self.resize_impl(len, |dst, count| unsafe { fill_with(dst, count, f) })
    }

    /// Appends `value`.
    #[inline(always)]
    pub fn push(&mut self, value: T) -> Result<&mut T> {
        self.emplace_back_with(move || value)
    }

    /// Appends a clone of `value`.
    #[inline(always)]
    pub fn push_clone(&mut self, value: &T) -> Result<&mut T>
        where
            T: Clone
    {
        self.emplace_back_with(|| value.clone())
    }

    /// Appends the value constructed by `f`.
    ///
    /// An empty array allocates [`INITIAL_CAPACITY`] slots, a full one
    /// multiplies its capacity by [`GROWTH_FACTOR`]. When growing, the new
    /// element is constructed in the new block before the existing ones are
    /// relocated, so a panicking `f` leaves the array untouched.
    pub fn emplace_back_with<F>(&mut self, f: F) -> Result<&mut T>
        where
            F: FnOnce() -> T
    {
        if self.len < self.capacity {
            let mut ptr = unsafe { self.data.add(self.len) };
            unsafe { ptr.write(f()) };
            self.len += 1;
            return Ok(unsafe { ptr.as_mut() })
        }
        let new_capacity =
            if self.capacity == 0 {
                INITIAL_CAPACITY
            }
            else {
                self.capacity
                    .checked_mul(GROWTH_FACTOR)
                    .ok_or(MaxCapacityExceeded { max_capacity: max_capacity::<T>() })?
            };
        let block = RawBlock::allocate(new_capacity)?;
        let mut ptr = unsafe { block.as_non_null().add(self.len) };
        unsafe {
            ptr.write(f());
            move_elements(self.data, block.as_non_null(), self.len);
            drop(self.replace_block(block.into_raw(), new_capacity));
        }
        self.len += 1;
        Ok(unsafe { ptr.as_mut() })
    }

    /// Removes and returns the last element.
    #[inline(always)]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None
        }
        self.len -= 1;
        Some(unsafe { self.data.add(self.len).read() })
    }

    /// Exchanges storage, length and capacity with `other`.
    #[inline(always)]
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(self, other)
    }

    #[inline(always)]
    pub fn iter(&self) -> Iter<'_, T> {
        unsafe { Iter::new(self.data, self.len) }
    }

    #[inline(always)]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        unsafe { IterMut::new(self.data, self.len) }
    }

    #[inline(always)]
    pub fn riter(&self) -> Rev<Iter<'_, T>> {
        self.iter().rev()
    }

    #[inline(always)]
    pub fn riter_mut(&mut self) -> Rev<IterMut<'_, T>> {
        self.iter_mut().rev()
    }

    #[inline(always)]
    unsafe fn from_raw_parts(data: NonNull<T>, capacity: usize, len: usize) -> Self {
        debug_assert!(len <= capacity);
        Self {
            data,
            capacity,
            len,
            _marker: PhantomData,
        }
    }

    /// Decomposes `self` into its block, capacity and length without dropping anything.
    #[inline(always)]
    pub(super) fn into_raw_parts(self) -> (NonNull<T>, usize, usize) {
        let this = mem::ManuallyDrop::new(self);
        (this.data, this.capacity, this.len)
    }

    /// Installs a new block and hands back the old one. The live elements must
    /// already be in the new block.
    #[inline(always)]
    unsafe fn replace_block(&mut self, data: NonNull<T>, capacity: usize) -> RawBlock<T> {
        let old = unsafe { RawBlock::from_raw(self.data, self.capacity) };
        self.data = data;
        self.capacity = capacity;
        old
    }

    /// Moves the live elements into a fresh block of exactly `capacity` slots.
    fn relocate(&mut self, capacity: usize) -> Result<()> {
        debug_assert!(capacity >= self.len);
        let block = RawBlock::allocate(capacity)?;
        unsafe {
            move_elements(self.data, block.as_non_null(), self.len);
            drop(self.replace_block(block.into_raw(), capacity));
        }
        Ok(())
    }

    fn resize_impl<F>(&mut self, len: usize, fill: F) -> Result<()>
        where
            F: FnOnce(NonNull<T>, usize),
    {
        if len <= self.len {
            self.truncate(len);
            return Ok(())
        }
        let count = len - self.len;
        if len <= self.capacity {
            fill(unsafe { self.data.add(self.len) }, count);
            self.len = len;
            return Ok(())
        }
        let block = RawBlock::allocate(len)?;
        unsafe {
            move_elements(self.data, block.as_non_null(), self.len);
        }
        // The old block still holds the relocated bits until the fill commits.
        fill(unsafe { block.as_non_null().add(self.len) }, count);
        drop(unsafe { self.replace_block(block.into_raw(), len) });
        self.len = len;
        Ok(())
    }
}

impl<T> Drop for DynArray<T> {

    fn drop(&mut self) {
        self.clear();
        drop(unsafe { RawBlock::from_raw(self.data, self.capacity) });
    }
}

impl<T> Default for DynArray<T> {

    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynArray<T> {

    /// # Panics
    ///
    /// Panics if the allocation fails.
    fn clone(&self) -> Self {
        self.try_clone()
            .unwrap_or_else(|err| panic!("{}", err))
    }

    /// # Panics
    ///
    /// Panics if the allocation fails.
    fn clone_from(&mut self, source: &Self) {
        self.try_clone_from(source)
            .unwrap_or_else(|err| panic!("{}", err))
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> AsRef<[T]> for DynArray<T> {

    #[inline(always)]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynArray<T> {

    #[inline(always)]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Deref for DynArray<T> {

    type Target = [T];

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for DynArray<T> {

    #[inline(always)]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<'vec, T> IntoIterator for &'vec DynArray<T> {

    type Item = &'vec T;
    type IntoIter = Iter<'vec, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'vec, T> IntoIterator for &'vec mut DynArray<T> {

    type Item = &'vec mut T;
    type IntoIter = IterMut<'vec, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for DynArray<T> {

    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        let (data, capacity, len) = self.into_raw_parts();
        unsafe { IntoIter::new(data, capacity, len) }
    }
}

impl<T, const N: usize> From<[T; N]> for DynArray<T> {

    /// Allocates exactly `N` slots and moves the values in.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails.
    fn from(values: [T; N]) -> Self {
        let mut arr = Self::with_capacity(N)
            .unwrap_or_else(|err| panic!("{}", err));
        for value in values {
            unsafe { arr.data.add(arr.len).write(value) };
            arr.len += 1;
        }
        arr
    }
}

impl<T> Extend<T> for DynArray<T> {

    /// # Panics
    ///
    /// Panics if growing the storage fails.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            if let Err(err) = self.push(value) {
                panic!("{}", err)
            }
        }
    }
}

impl<'a, T: Clone + 'a> Extend<&'a T> for DynArray<T> {

    /// # Panics
    ///
    /// Panics if growing the storage fails.
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for value in iter {
            if let Err(err) = self.push_clone(value) {
                panic!("{}", err)
            }
        }
    }
}

impl<T> FromIterator<T> for DynArray<T> {

    /// # Panics
    ///
    /// Panics if growing the storage fails.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arr = Self::new();
        arr.extend(iter);
        arr
    }
}
