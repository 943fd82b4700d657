use crate::{
    error::{Error, Result},
    misc::cartesian,
};
use core::{
    fmt::{self, Display, Formatter},
    iter::repeat_with,
    mem::size_of,
    ops::{Index, IndexMut},
};
use rand::{distributions::Distribution, RngCore};

mod det;
mod ops;

/// Absolute tolerance used by matrix equality and the singularity check.
pub const EPSILON: f64 = 1e-7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, derive_more::Display)]
#[display(fmt = "{}x{}", rows, cols)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

/// Dense row-major matrix of `f64` owning a single contiguous buffer.
///
/// Equality is tolerant: two matrices are equal when they have the same shape
/// and every pair of cells differs by at most [`EPSILON`].
#[derive(Clone, Debug, Default)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

// Number of cells, rejecting shapes that cannot be backed by one allocation.
fn cell_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols)
        .filter(|len| *len <= isize::MAX as usize / size_of::<f64>())
        .ok_or(Error::InvalidDimension { rows, cols })
}

impl Matrix {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Zero-filled `rows x cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let len = cell_count(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            data: vec![0.; len],
        })
    }

    pub fn identity(n: usize) -> Result<Self> {
        let mut identity = Self::new(n, n)?;
        (0..n).for_each(|i| identity[(i, i)] = 1.);
        Ok(identity)
    }

    /// Fills cells with `1, 2, 3, ...` in row-major order.
    pub fn sequential(rows: usize, cols: usize) -> Result<Self> {
        let mut matrix = Self::new(rows, cols)?;
        matrix.data.iter_mut().zip(1..).for_each(|(cell, k)| *cell = k as f64);
        Ok(matrix)
    }

    pub fn from_rows<R: AsRef<[f64]>>(rows: impl IntoIterator<Item = R>) -> Result<Self> {
        let mut matrix = Self::default();
        for (i, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            if i == 0 {
                matrix.cols = row.len();
            } else if row.len() != matrix.cols {
                return Err(Error::DimensionMismatch {
                    lhs: matrix.shape(),
                    rhs: Shape {
                        rows: 1,
                        cols: row.len(),
                    },
                });
            }
            matrix.data.extend_from_slice(row);
            matrix.rows += 1;
        }
        Ok(matrix)
    }

    pub fn sample(
        rows: usize,
        cols: usize,
        dist: impl Distribution<f64>,
        rng: &mut impl RngCore,
    ) -> Result<Self> {
        let len = cell_count(rows, cols)?;
        let data = repeat_with(|| dist.sample(rng)).take(len).collect();
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> Shape {
        Shape {
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// # Panics
    ///
    /// Panics if `i >= self.rows()`.
    pub fn row(&self, i: usize) -> &[f64] {
        assert!(i < self.rows, "row {i} is out of range for {} matrix", self.shape());
        &self.data[i * self.cols..][..self.cols]
    }

    /// # Panics
    ///
    /// Panics if `j >= self.cols()`.
    pub fn col(&self, j: usize) -> impl Iterator<Item = &f64> + Clone {
        assert!(j < self.cols, "column {j} is out of range for {} matrix", self.shape());
        self.data.iter().skip(j).step_by(self.cols)
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.rows).map(|i| self.row(i))
    }

    fn offset(&self, row: usize, col: usize) -> Result<usize> {
        if row < self.rows && col < self.cols {
            Ok(row * self.cols + col)
        } else {
            Err(Error::IndexOutOfRange {
                row,
                col,
                shape: self.shape(),
            })
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        Ok(self.data[self.offset(row, col)?])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut f64> {
        let offset = self.offset(row, col)?;
        Ok(&mut self.data[offset])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        *self.get_mut(row, col)? = value;
        Ok(())
    }

    /// Resizes to `rows` rows, keeping the overlapping cells and zero-filling
    /// any new ones. On error the matrix is left untouched.
    pub fn set_rows(&mut self, rows: usize) -> Result<()> {
        if rows != self.rows {
            *self = self.resized(rows, self.cols)?;
        }
        Ok(())
    }

    /// Column counterpart of [`Matrix::set_rows`].
    pub fn set_cols(&mut self, cols: usize) -> Result<()> {
        if cols != self.cols {
            *self = self.resized(self.rows, cols)?;
        }
        Ok(())
    }

    fn resized(&self, rows: usize, cols: usize) -> Result<Self> {
        let mut resized = Self::new(rows, cols)?;
        let keep = self.cols.min(cols);
        (0..self.rows.min(rows)).for_each(|i| {
            resized.data[i * cols..][..keep].copy_from_slice(&self.row(i)[..keep])
        });
        Ok(resized)
    }

    pub fn transpose(&self) -> Self {
        let data = cartesian!(0..self.cols, 0..self.rows)
            .map(|(i, j)| self.data[j * self.cols + i])
            .collect();
        Self {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }
}

impl From<&Matrix> for Matrix {
    fn from(value: &Matrix) -> Self {
        value.clone()
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        match self.offset(row, col) {
            Ok(offset) => &self.data[offset],
            Err(err) => panic!("{err}"),
        }
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        match self.offset(row, col) {
            Ok(offset) => &mut self.data[offset],
            Err(err) => panic!("{err}"),
        }
    }
}

impl Display for Matrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.iter_rows().enumerate().try_for_each(|(i, row)| {
            if i > 0 {
                writeln!(f)?;
            }
            if let Some((first, rest)) = row.split_first() {
                write!(f, "{first}")?;
                rest.iter().try_for_each(|value| write!(f, " {value}"))?;
            }
            Ok(())
        })
    }
}
