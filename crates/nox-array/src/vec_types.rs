mod error;
mod raw;
mod strategies;
mod dyn_array;
mod iter;
mod into_iter;
mod cmp;


pub use error::VecError;
pub use dyn_array::{DynArray, INITIAL_CAPACITY, GROWTH_FACTOR};
pub use iter::{Iter, IterMut};
pub use into_iter::IntoIter;
