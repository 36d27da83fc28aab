#[macro_export]
macro_rules! const_assert {
    ($check:expr $(,$msg:tt)*) => {
        const _: () = assert!($check $(,$msg)*);
    };
}

/// Builds a [`DynArray`](crate::DynArray) from a literal list, or from `value; n` repetitions.
///
/// A literal list allocates exactly as many slots as it has elements.
///
/// # Panics
///
/// Panics if the allocation fails.
#[macro_export]
macro_rules! dynarr {
    () => (
        $crate::DynArray::new()
    );
    ($value:expr; $n:expr) => (
        $crate::DynArray::with_len($n, $value)
            .unwrap_or_else(|err| panic!("{}", err))
    );
    [$($elem:expr),+ $(,)?] => {
        $crate::DynArray::from([$($elem),+])
    };
}
