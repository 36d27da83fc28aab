//! Lexicographic ordering.
//!
//! Only `<` is computed; equality and every other comparison derive from it,
//! so all of them agree with each other. Between arrays, one without storage
//! is less than one with storage, even an empty one, and two arrays without
//! storage are equal. Otherwise the live elements decide.

use core::cmp::Ordering;

use super::DynArray;

#[inline(always)]
fn lexicographic_lt<T: PartialOrd>(a: &[T], b: &[T]) -> bool {
    for (x, y) in a.iter().zip(b) {
        if x < y {
            return true
        }
        if y < x {
            return false
        }
    }
    a.len() < b.len()
}

#[inline(always)]
fn array_lt<T: PartialOrd>(a: &DynArray<T>, b: &DynArray<T>) -> bool {
    match (a.capacity() == 0, b.capacity() == 0) {
        (true, true) => false,
        (true, false) => true,
        (false, true) => false,
        (false, false) => lexicographic_lt(a, b),
    }
}

/// Equal means neither side is less than the other.
#[inline(always)]
fn derived_ordering<A: ?Sized>(a: &A, b: &A, lt: impl Fn(&A, &A) -> bool) -> Ordering {
    if lt(a, b) {
        Ordering::Less
    }
    else if lt(b, a) {
        Ordering::Greater
    }
    else {
        Ordering::Equal
    }
}

#[inline(always)]
fn array_ordering<T: PartialOrd>(a: &DynArray<T>, b: &DynArray<T>) -> Ordering {
    derived_ordering(a, b, array_lt)
}

#[inline(always)]
fn slice_ordering<T: PartialOrd>(a: &[T], b: &[T]) -> Ordering {
    derived_ordering(a, b, lexicographic_lt)
}

impl<T: PartialOrd> PartialOrd for DynArray<T> {

    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(array_ordering(self, other))
    }

    #[inline(always)]
    fn lt(&self, other: &Self) -> bool {
        array_lt(self, other)
    }
}

impl<T: PartialOrd> PartialEq for DynArray<T> {

    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        array_ordering(self, other) == Ordering::Equal
    }
}

impl<T: Ord> Eq for DynArray<T> {}

impl<T: Ord> Ord for DynArray<T> {

    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        array_ordering(self, other)
    }
}

impl<T: PartialOrd> PartialEq<[T]> for DynArray<T> {

    #[inline(always)]
    fn eq(&self, other: &[T]) -> bool {
        slice_ordering(self, other) == Ordering::Equal
    }
}

impl<T: PartialOrd, const N: usize> PartialEq<[T; N]> for DynArray<T> {

    #[inline(always)]
    fn eq(&self, other: &[T; N]) -> bool {
        slice_ordering(self, other) == Ordering::Equal
    }
}
