mod dense;
mod error;
mod misc;

pub use dense::{Matrix, Shape, EPSILON};
pub use error::{Error, Result};
