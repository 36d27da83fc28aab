#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod allocator;
mod global_alloc;
mod errors;
pub mod vec_types;

pub use errors::CapacityError;
pub use vec_types::{DynArray, VecError, Iter, IterMut, IntoIter};
pub use vec_types::{INITIAL_CAPACITY, GROWTH_FACTOR};

pub type Result<T> = core::result::Result<T, VecError>;
