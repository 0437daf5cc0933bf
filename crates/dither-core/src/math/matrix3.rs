//! 3×3 matrices: products, symmetric eigen-decomposition, rotation blending
//!
//! Matrices are row-major. Eigenvectors and rotation bases are stored as
//! columns.

use std::ops::Mul;

/// Number of cyclic Jacobi sweeps. Color covariances are small and well
/// conditioned, so a fixed budget is used instead of a convergence loop.
pub const JACOBI_SWEEPS: usize = 15;

/// Rotations closer than this to identity are treated as identity.
const ANGLE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3(pub [[f64; 3]; 3]);

/// Eigenvalues (descending) and matching unit eigenvectors as columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eigen3 {
    pub values: [f64; 3],
    pub vectors: Matrix3,
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix3 {
    pub const IDENTITY: Matrix3 = Matrix3([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    #[inline]
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Matrix3(rows)
    }

    pub fn from_columns(c0: [f64; 3], c1: [f64; 3], c2: [f64; 3]) -> Self {
        Matrix3([
            [c0[0], c1[0], c2[0]],
            [c0[1], c1[1], c2[1]],
            [c0[2], c1[2], c2[2]],
        ])
    }

    #[inline]
    pub fn column(&self, j: usize) -> [f64; 3] {
        [self.0[0][j], self.0[1][j], self.0[2][j]]
    }

    pub fn transpose(&self) -> Matrix3 {
        let m = &self.0;
        Matrix3([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    pub fn mul_vec(&self, v: [f64; 3]) -> [f64; 3] {
        let m = &self.0;
        [
            m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
            m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
            m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
        ]
    }

    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    pub fn trace(&self) -> f64 {
        self.0[0][0] + self.0[1][1] + self.0[2][2]
    }

    /// Largest absolute element-wise difference to `other`.
    pub fn max_abs_diff(&self, other: &Matrix3) -> f64 {
        let mut max = 0.0_f64;
        for i in 0..3 {
            for j in 0..3 {
                max = max.max((self.0[i][j] - other.0[i][j]).abs());
            }
        }
        max
    }

    pub fn is_identity(&self, tolerance: f64) -> bool {
        self.max_abs_diff(&Matrix3::IDENTITY) <= tolerance
    }

    /// Eigen-decomposition of a symmetric matrix by cyclic Jacobi rotations.
    ///
    /// Runs exactly [`JACOBI_SWEEPS`] sweeps (skipping rotations whose
    /// off-diagonal element is already negligible) and returns the best
    /// estimate; there is no failure mode. Only the upper triangle's
    /// symmetry is assumed, not checked.
    pub fn jacobi_eigen(&self) -> Eigen3 {
        let mut a = self.0;
        let mut v = Matrix3::IDENTITY.0;

        for _ in 0..JACOBI_SWEEPS {
            for (p, q) in [(0, 1), (0, 2), (1, 2)] {
                let apq = a[p][q];
                if apq.abs() < 1e-15 {
                    continue;
                }
                let theta = (a[q][q] - a[p][p]) / (2.0 * apq);
                let sign = if theta >= 0.0 { 1.0 } else { -1.0 };
                let t = sign / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..3 {
                    if k != p && k != q {
                        let akp = a[k][p];
                        let akq = a[k][q];
                        a[k][p] = c * akp - s * akq;
                        a[p][k] = a[k][p];
                        a[k][q] = s * akp + c * akq;
                        a[q][k] = a[k][q];
                    }
                }
                a[p][p] -= t * apq;
                a[q][q] += t * apq;
                a[p][q] = 0.0;
                a[q][p] = 0.0;

                for row in v.iter_mut() {
                    let vkp = row[p];
                    let vkq = row[q];
                    row[p] = c * vkp - s * vkq;
                    row[q] = s * vkp + c * vkq;
                }
            }
        }

        let mut order = [0usize, 1, 2];
        order.sort_by(|&i, &j| a[j][j].total_cmp(&a[i][i]));

        let vectors = Matrix3::from_columns(
            column_of(&v, order[0]),
            column_of(&v, order[1]),
            column_of(&v, order[2]),
        );
        Eigen3 {
            values: [a[order[0]][order[0]], a[order[1]][order[1]], a[order[2]][order[2]]],
            vectors,
        }
    }

    /// Flip the last column when the determinant is negative so the columns
    /// form a right-handed basis.
    pub fn ensure_right_handed(mut self) -> Matrix3 {
        if self.determinant() < 0.0 {
            for row in self.0.iter_mut() {
                row[2] = -row[2];
            }
        }
        self
    }

    /// Rotation of `angle` radians about the unit `axis` (Rodrigues).
    pub fn from_axis_angle(axis: [f64; 3], angle: f64) -> Matrix3 {
        let [x, y, z] = normalize(axis);
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        Matrix3([
            [t * x * x + c, t * x * y - s * z, t * x * z + s * y],
            [t * x * y + s * z, t * y * y + c, t * y * z - s * x],
            [t * x * z - s * y, t * y * z + s * x, t * z * z + c],
        ])
    }

    /// Axis and angle (radians, 0..=π) of a rotation matrix.
    ///
    /// Returns `None` for (near-)identity rotations, where the axis is
    /// undefined.
    pub fn to_axis_angle(&self) -> Option<([f64; 3], f64)> {
        let m = &self.0;
        let cos = ((self.trace() - 1.0) / 2.0).clamp(-1.0, 1.0);
        let angle = cos.acos();
        if angle < ANGLE_EPSILON {
            return None;
        }

        let raw = [m[2][1] - m[1][2], m[0][2] - m[2][0], m[1][0] - m[0][1]];
        let sin = angle.sin();
        if sin > 1e-6 {
            let axis = raw.map(|c| c / (2.0 * sin));
            return Some((normalize(axis), angle));
        }

        // Angle ≈ π: the antisymmetric part vanishes, recover the axis from
        // the symmetric part instead.
        let diag = [m[0][0], m[1][1], m[2][2]];
        let i = (0..3)
            .max_by(|&a, &b| diag[a].total_cmp(&diag[b]))
            .unwrap_or(0);
        let mut axis = [0.0; 3];
        axis[i] = ((diag[i] + 1.0) / 2.0).max(0.0).sqrt();
        if axis[i] <= 0.0 {
            return None;
        }
        for j in 0..3 {
            if j != i {
                axis[j] = (m[i][j] + m[j][i]) / (4.0 * axis[i]);
            }
        }
        Some((normalize(axis), angle))
    }

    /// Scale the rotation angle of `self` by `strength` (clamped to 0..=1).
    ///
    /// Strength 0 gives identity and strength 1 gives `self`; values between
    /// move continuously along the same axis.
    pub fn blend_rotation(&self, strength: f64) -> Matrix3 {
        let strength = if strength.is_finite() {
            strength.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if strength <= 0.0 || self.is_identity(ANGLE_EPSILON) {
            return Matrix3::IDENTITY;
        }
        match self.to_axis_angle() {
            Some((axis, angle)) => Matrix3::from_axis_angle(axis, angle * strength),
            None => Matrix3::IDENTITY,
        }
    }
}

impl Mul for Matrix3 {
    type Output = Matrix3;

    fn mul(self, rhs: Matrix3) -> Matrix3 {
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.0[i][k] * rhs.0[k][j]).sum();
            }
        }
        Matrix3(out)
    }
}

fn column_of(m: &[[f64; 3]; 3], j: usize) -> [f64; 3] {
    [m[0][j], m[1][j], m[2][j]]
}

fn normalize(v: [f64; 3]) -> [f64; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len > 0.0 {
        v.map(|c| c / len)
    } else {
        [1.0, 0.0, 0.0]
    }
}
