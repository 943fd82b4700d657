use core::ops::Mul;
use num_traits::Zero;

// Zips iterators of equal length, panicking on a length mismatch.
macro_rules! izip_eq {
    (@closure $p:pat => $tup:expr) => {
        |$p| $tup
    };
    (@closure $p:pat => ($($tup:tt)*) , $_iter:expr $(, $tail:expr)*) => {
        $crate::misc::izip_eq!(@closure ($p, b) => ($($tup)*, b) $(, $tail)*)
    };
    ($first:expr $(,)*) => {
        core::iter::IntoIterator::into_iter($first)
    };
    ($first:expr, $second:expr $(,)*) => {
        itertools::Itertools::zip_eq($crate::misc::izip_eq!($first), $second)
    };
    ($first:expr $(, $rest:expr)* $(,)*) => {{
        let t = $crate::misc::izip_eq!($first);
        $(let t = $crate::misc::izip_eq!(t, $rest);)*
        t.map($crate::misc::izip_eq!(@closure a => (a) $(, $rest)*))
    }};
}

// Row-major index pairs, `cartesian!(0..rows, 0..cols)`.
macro_rules! cartesian {
    ($first:expr, $second:expr $(,)*) => {
        itertools::Itertools::cartesian_product(core::iter::IntoIterator::into_iter($first), $second)
    };
}

pub(crate) use {cartesian, izip_eq};

pub(crate) trait Dot<Rhs> {
    type Output;

    fn dot(self, rhs: Rhs) -> Self::Output;
}

impl<'a, L, R, IL, IR> Dot<IR> for IL
where
    IL: IntoIterator<Item = &'a L>,
    IR: IntoIterator<Item = R>,
    L: 'a + Zero,
    for<'t> &'t L: Mul<R, Output = L>,
{
    type Output = L;

    fn dot(self, rhs: IR) -> Self::Output {
        izip_eq!(self, rhs).fold(L::zero(), |acc, (lhs, rhs)| acc + lhs * rhs)
    }
}
