use crate::{
    dense::{Matrix, EPSILON},
    error::{Error, Result},
    misc::{cartesian, izip_eq, Dot},
};
use core::ops::{Mul, MulAssign, Neg};

impl Matrix {
    /// Same shape and no pair of cells further apart than [`EPSILON`]. Shape
    /// mismatch is simply unequal. A NaN difference does not count as apart, so
    /// matching NaN or infinite cells compare equal.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn eq_matrix(&self, other: &Self) -> bool {
        self.shape() == other.shape()
            && izip_eq!(&self.data, &other.data).all(|(lhs, rhs)| !((lhs - rhs).abs() > EPSILON))
    }

    fn check_same_shape(&self, other: &Self) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(Error::DimensionMismatch {
                lhs: self.shape(),
                rhs: other.shape(),
            });
        }
        Ok(())
    }

    pub fn sum_matrix(&mut self, other: &Self) -> Result<()> {
        self.check_same_shape(other)?;
        izip_eq!(&mut self.data, &other.data).for_each(|(lhs, rhs)| *lhs += rhs);
        Ok(())
    }

    pub fn sub_matrix(&mut self, other: &Self) -> Result<()> {
        self.check_same_shape(other)?;
        izip_eq!(&mut self.data, &other.data).for_each(|(lhs, rhs)| *lhs -= rhs);
        Ok(())
    }

    pub fn mul_number(&mut self, num: f64) {
        self.data.iter_mut().for_each(|value| *value *= num);
    }

    /// Replaces `self` with `self * other`. Requires `self.cols() == other.rows()`.
    pub fn mul_matrix(&mut self, other: &Self) -> Result<()> {
        if self.cols != other.rows {
            return Err(Error::DimensionMismatch {
                lhs: self.shape(),
                rhs: other.shape(),
            });
        }
        let data = cartesian!(0..self.rows, 0..other.cols)
            .map(|(i, j)| self.row(i).dot(other.col(j)))
            .collect();
        *self = Self {
            rows: self.rows,
            cols: other.cols,
            data,
        };
        Ok(())
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.eq_matrix(other)
    }
}

// Operator traits cannot return `Result`, so a shape mismatch panics with the
// error message. Use the named methods for the checked path.
macro_rules! impl_op_assign {
    ($(impl $trait:ident<$rhs:ty> for Matrix => $method:ident),* $(,)?) => {
        $(
            paste::paste! {
                impl core::ops::$trait<$rhs> for Matrix {
                    fn [<$trait:snake>](&mut self, rhs: $rhs) {
                        let rhs: &Matrix = core::borrow::Borrow::borrow(&rhs);
                        if let Err(err) = self.$method(rhs) {
                            panic!("{err}")
                        }
                    }
                }
            }
        )*
    };
}

macro_rules! impl_op {
    ($(impl $trait:ident<$rhs:ty> for $lhs:ty),* $(,)?) => {
        $(
            paste::paste! {
                impl core::ops::$trait<$rhs> for $lhs {
                    type Output = Matrix;

                    fn [<$trait:lower>](self, rhs: $rhs) -> Matrix {
                        let mut lhs = Matrix::from(self);
                        core::ops::[<$trait Assign>]::[<$trait:lower _assign>](&mut lhs, rhs);
                        lhs
                    }
                }
            }
        )*
    };
}

impl_op_assign!(
    impl AddAssign<Matrix> for Matrix => sum_matrix,
    impl AddAssign<&Matrix> for Matrix => sum_matrix,
    impl SubAssign<Matrix> for Matrix => sub_matrix,
    impl SubAssign<&Matrix> for Matrix => sub_matrix,
    impl MulAssign<Matrix> for Matrix => mul_matrix,
    impl MulAssign<&Matrix> for Matrix => mul_matrix,
);

impl MulAssign<f64> for Matrix {
    fn mul_assign(&mut self, rhs: f64) {
        self.mul_number(rhs)
    }
}

impl_op!(
    impl Add<Matrix> for Matrix,
    impl Add<&Matrix> for Matrix,
    impl Add<Matrix> for &Matrix,
    impl Add<&Matrix> for &Matrix,
    impl Sub<Matrix> for Matrix,
    impl Sub<&Matrix> for Matrix,
    impl Sub<Matrix> for &Matrix,
    impl Sub<&Matrix> for &Matrix,
    impl Mul<Matrix> for Matrix,
    impl Mul<&Matrix> for Matrix,
    impl Mul<Matrix> for &Matrix,
    impl Mul<&Matrix> for &Matrix,
    impl Mul<f64> for Matrix,
    impl Mul<f64> for &Matrix,
);

impl Mul<Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        rhs * self
    }
}

impl Mul<&Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        rhs * self
    }
}

impl Neg for Matrix {
    type Output = Matrix;

    fn neg(mut self) -> Matrix {
        self.data.iter_mut().for_each(|value| *value = -*value);
        self
    }
}

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        -self.clone()
    }
}

#[cfg(test)]
mod test {
    use crate::{dense::Shape, Error, Matrix};
    use rand::{distributions::Uniform, thread_rng};

    #[test]
    fn eq_matrix() {
        let mut a = Matrix::sequential(3, 3).unwrap();
        let b = Matrix::sequential(3, 3).unwrap();
        assert!(a.eq_matrix(&b) && b.eq_matrix(&a));
        assert!(a == b && b == a);
        a[(0, 0)] = 10.;
        assert!(!a.eq_matrix(&b) && !b.eq_matrix(&a));
        assert!(a != b && b != a);
    }

    #[test]
    fn eq_matrix_tolerance() {
        let a = Matrix::sequential(2, 2).unwrap();
        let mut b = a.clone();
        b[(1, 1)] += 1e-8;
        assert_eq!(a, b);
        b[(1, 1)] += 1e-6;
        assert_ne!(a, b);
        assert_ne!(Matrix::new(2, 3).unwrap(), Matrix::new(3, 2).unwrap());
        assert_eq!(Matrix::new(0, 3).unwrap(), Matrix::new(0, 3).unwrap());
        assert_ne!(Matrix::new(0, 3).unwrap(), Matrix::empty());
    }

    #[test]
    fn sum_matrix() {
        let mut a = Matrix::sequential(2, 2).unwrap();
        a += Matrix::sequential(2, 2).unwrap();
        assert_eq!(a.as_slice(), [2., 4., 6., 8.]);
    }

    #[test]
    fn sub_matrix() {
        let mut a = Matrix::sequential(2, 2).unwrap();
        let b = Matrix::sequential(2, 2).unwrap();
        a *= 3.;
        a -= &b;
        assert_eq!(a.as_slice(), [2., 4., 6., 8.]);
    }

    #[test]
    fn shape_mismatch_leaves_receiver() {
        let mut a = Matrix::sequential(2, 2).unwrap();
        let b = Matrix::sequential(2, 3).unwrap();
        let mismatch = Err(Error::DimensionMismatch {
            lhs: Shape { rows: 2, cols: 2 },
            rhs: Shape { rows: 2, cols: 3 },
        });
        assert_eq!(a.sum_matrix(&b), mismatch);
        assert_eq!(a.sub_matrix(&b), mismatch);
        assert_eq!(a, Matrix::sequential(2, 2).unwrap());
        let mut c = b.clone();
        assert_eq!(
            c.mul_matrix(&a),
            Err(Error::DimensionMismatch {
                lhs: Shape { rows: 2, cols: 3 },
                rhs: Shape { rows: 2, cols: 2 },
            })
        );
        assert_eq!(c.shape(), Shape { rows: 2, cols: 3 });
        assert_eq!(c.as_slice(), b.as_slice());
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn add_shape_mismatch() {
        let _ = Matrix::new(2, 2).unwrap() + Matrix::new(3, 2).unwrap();
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn mul_shape_mismatch() {
        let mut a = Matrix::new(2, 3).unwrap();
        a *= Matrix::new(2, 3).unwrap();
    }

    #[test]
    fn pure_ops_keep_operands() {
        let mut rng = thread_rng();
        let dist = Uniform::new(-10., 10.);
        let a = Matrix::sample(3, 4, dist, &mut rng).unwrap();
        let b = Matrix::sample(3, 4, dist, &mut rng).unwrap();
        let (a0, b0) = (a.clone(), b.clone());
        let sum = &a + &b;
        let diff = &a - &b;
        assert_eq!(&sum - &b, a);
        assert_eq!(&diff + &b, a);
        assert_eq!(&sum + &diff, &a * 2.);
        assert_eq!(-&a + &a, Matrix::new(3, 4).unwrap());
        assert_eq!(&a * &b.transpose(), a.clone() * b.transpose());
        assert_eq!((a, b), (a0, b0));
    }

    #[test]
    fn mul_number() {
        let a = Matrix::sequential(2, 2).unwrap();
        assert_eq!((3. * &a).as_slice(), [3., 6., 9., 12.]);
        assert_eq!((&a * 3.).as_slice(), [3., 6., 9., 12.]);
        assert_eq!(3. * a.clone(), a.clone() * 3.);

        let mut b = a.clone();
        b.mul_number(f64::NAN);
        assert!(b.as_slice().iter().all(|v| v.is_nan()));
        let mut c = a.clone();
        c.mul_number(f64::NEG_INFINITY);
        assert!(c.as_slice().iter().all(|v| *v == f64::NEG_INFINITY));
        let mut d = Matrix::new(1, 1).unwrap();
        d *= f64::INFINITY;
        assert!(d[(0, 0)].is_nan());
    }

    #[test]
    fn eq_matrix_non_finite() {
        for num in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let mut a = Matrix::sequential(2, 2).unwrap();
            a.mul_number(num);
            assert!(a.eq_matrix(&a.clone()));
            assert_eq!(a, a.clone());
        }
        let mut a = Matrix::sequential(2, 2).unwrap();
        a[(0, 0)] = f64::INFINITY;
        assert_ne!(a, Matrix::sequential(2, 2).unwrap());
    }

    #[test]
    fn mul_matrix() {
        let mut a = Matrix::from_rows([[1., 4.], [2., 5.], [3., 6.]]).unwrap();
        let b = Matrix::from_rows([[1., -1., 1.], [2., 3., 4.]]).unwrap();
        let expected = Matrix::from_rows([[9., 11., 17.], [12., 13., 22.], [15., 15., 27.]]).unwrap();
        assert_eq!(&a * &b, expected);
        a *= &b;
        assert_eq!(a, expected);
        assert_eq!(a.shape(), Shape { rows: 3, cols: 3 });
    }

    #[test]
    fn mul_matrix_inner_zero() {
        let a = Matrix::new(2, 0).unwrap();
        let b = Matrix::new(0, 3).unwrap();
        let c = &a * &b;
        assert_eq!(c, Matrix::new(2, 3).unwrap());
        assert!(c.as_slice().iter().all(|v| v.is_sign_positive()));
        assert_eq!(c.to_string(), "0 0 0\n0 0 0");
    }

    #[test]
    fn mul_matrix_negative_zero_terms() {
        let a = Matrix::from_rows([[0.]]).unwrap();
        let b = Matrix::from_rows([[-1.]]).unwrap();
        assert_eq!((&a * &b).to_string(), "0");
    }

    #[test]
    fn mul_identity() {
        let mut rng = thread_rng();
        let dist = Uniform::new(-10., 10.);
        for rows in 0..6 {
            for cols in 0..6 {
                let a = Matrix::sample(rows, cols, dist, &mut rng).unwrap();
                assert_eq!(&a * &Matrix::identity(cols).unwrap(), a);
                assert_eq!(&Matrix::identity(rows).unwrap() * &a, a);
            }
        }
    }
}
