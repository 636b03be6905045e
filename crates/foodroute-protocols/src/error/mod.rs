//! Error types for the foodroute protocol layer.

mod matrix;
mod place;
mod store;

pub use matrix::*;
pub use place::*;
pub use store::*;
