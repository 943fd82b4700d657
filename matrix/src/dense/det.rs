use crate::{
    dense::{Matrix, EPSILON},
    error::{Error, Result},
    misc::{cartesian, izip_eq},
};

fn sign(parity: usize) -> f64 {
    if parity % 2 == 0 {
        1.
    } else {
        -1.
    }
}

impl Matrix {
    // Caller guarantees a non-empty square matrix and in-range indices.
    pub(crate) fn minor(&self, row: usize, col: usize) -> Self {
        let data = izip_eq!(cartesian!(0..self.rows, 0..self.cols), &self.data)
            .filter(|((i, j), _)| *i != row && *j != col)
            .map(|(_, value)| *value)
            .collect();
        Self {
            rows: self.rows - 1,
            cols: self.cols - 1,
            data,
        }
    }

    fn check_square(&self) -> Result<usize> {
        if self.rows != self.cols {
            return Err(Error::NotSquare(self.shape()));
        }
        Ok(self.rows)
    }

    /// Determinant by recursive cofactor expansion along the first row.
    ///
    /// This is `O(n!)`. The empty `0x0` matrix has determinant `1`.
    pub fn determinant(&self) -> Result<f64> {
        self.check_square()?;
        Ok(self.det())
    }

    fn det(&self) -> f64 {
        match self.rows {
            0 => 1.,
            1 => self.data[0],
            2 => self.data[0] * self.data[3] - self.data[2] * self.data[1],
            _ => self
                .row(0)
                .iter()
                .enumerate()
                .map(|(j, value)| sign(j) * value * self.minor(0, j).det())
                .fold(0., |acc, term| acc + term),
        }
    }

    /// Matrix of cofactors, `(-1)^(i + j) * det(minor(i, j))`.
    pub fn calc_complements(&self) -> Result<Self> {
        let n = self.check_square()?;
        // Checkerboard sign. A single sign flipped after every row-major cell
        // agrees only on odd widths and gives wrong cofactors on even ones.
        let data = cartesian!(0..n, 0..n)
            .map(|(i, j)| sign(i + j) * self.minor(i, j).det())
            .collect();
        Ok(Self {
            rows: n,
            cols: n,
            data,
        })
    }

    /// Fails with [`Error::Singular`] when `|det| < EPSILON`.
    pub fn inverse_matrix(&self) -> Result<Self> {
        let det = self.determinant()?;
        if det.abs() < EPSILON {
            return Err(Error::Singular(det));
        }
        Ok(self.calc_complements()?.transpose() * (1. / det))
    }
}
