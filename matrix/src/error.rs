use crate::dense::Shape;
use thiserror::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum Error {
    #[error("matrix of {rows}x{cols} cells does not fit one allocation")]
    InvalidDimension { rows: usize, cols: usize },
    #[error("index ({row}, {col}) is out of range for {shape} matrix")]
    IndexOutOfRange { row: usize, col: usize, shape: Shape },
    #[error("dimension mismatch: {lhs} and {rhs}")]
    DimensionMismatch { lhs: Shape, rhs: Shape },
    #[error("{0} matrix is not square")]
    NotSquare(Shape),
    #[error("matrix is singular (determinant {0})")]
    Singular(f64),
}
