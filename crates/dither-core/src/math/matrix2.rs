//! 2×2 matrices, used for rotating ordered-dither lattices.

use std::ops::Mul;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2(pub [[f64; 2]; 2]);

impl Default for Matrix2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix2 {
    pub const IDENTITY: Matrix2 = Matrix2([[1.0, 0.0], [0.0, 1.0]]);

    /// Counter-clockwise rotation by `angle` radians.
    pub fn rotation(angle: f64) -> Matrix2 {
        let (s, c) = angle.sin_cos();
        Matrix2([[c, -s], [s, c]])
    }

    pub fn transpose(&self) -> Matrix2 {
        let m = &self.0;
        Matrix2([[m[0][0], m[1][0]], [m[0][1], m[1][1]]])
    }

    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        m[0][0] * m[1][1] - m[0][1] * m[1][0]
    }

    #[inline]
    pub fn mul_vec(&self, v: [f64; 2]) -> [f64; 2] {
        let m = &self.0;
        [m[0][0] * v[0] + m[0][1] * v[1], m[1][0] * v[0] + m[1][1] * v[1]]
    }
}

impl Mul for Matrix2 {
    type Output = Matrix2;

    fn mul(self, rhs: Matrix2) -> Matrix2 {
        let a = &self.0;
        let b = &rhs.0;
        Matrix2([
            [
                a[0][0] * b[0][0] + a[0][1] * b[1][0],
                a[0][0] * b[0][1] + a[0][1] * b[1][1],
            ],
            [
                a[1][0] * b[0][0] + a[1][1] * b[1][0],
                a[1][0] * b[0][1] + a[1][1] * b[1][1],
            ],
        ])
    }
}
