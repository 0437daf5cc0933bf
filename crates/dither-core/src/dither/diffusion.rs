//! Error diffusion state
//!
//! [`ErrorDiffusionContext`] keeps one `width * 3` row of pending error for
//! every row the kernel can reach, in a ring addressed by a rotation index.
//! Advancing a scanline clears the finished row and reuses it as the
//! furthest future row; nothing is reallocated during a pass.

use super::kernel::Kernel;

#[derive(Debug, Clone)]
pub struct ErrorDiffusionContext {
    kernel: Kernel,
    width: usize,
    height: usize,
    /// `max_dy + 1` rows of interleaved RGB error
    rows: Vec<Vec<f32>>,
    /// Ring index of the current scanline
    head: usize,
    /// Image row the head belongs to
    y: usize,
}

impl ErrorDiffusionContext {
    pub fn new(kernel: Kernel, width: usize, height: usize) -> Self {
        let depth = kernel.max_dy + 1;
        Self {
            kernel,
            width,
            height,
            rows: (0..depth).map(|_| vec![0.0; width * 3]).collect(),
            head: 0,
            y: 0,
        }
    }

    #[inline]
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Image row currently being processed.
    #[inline]
    pub fn row(&self) -> usize {
        self.y
    }

    /// Error accumulated so far for pixel `x` of the current row.
    #[inline]
    pub fn accumulated(&self, x: usize) -> [f32; 3] {
        if x >= self.width {
            return [0.0; 3];
        }
        let row = &self.rows[self.head];
        [row[x * 3], row[x * 3 + 1], row[x * 3 + 2]]
    }

    /// Spread `residual * strength / divisor * weight` to every kernel
    /// neighbor of `x` on the current row. Neighbors outside the image
    /// are dropped.
    pub fn diffuse(&mut self, x: usize, residual: [f64; 3], strength: f64) {
        if !strength.is_finite() || strength == 0.0 {
            return;
        }
        let depth = self.rows.len();
        let factor = strength / self.kernel.divisor as f64;

        for &(dx, dy, weight) in self.kernel.entries {
            let tx = x as i64 + dx as i64;
            if tx < 0 || tx >= self.width as i64 {
                continue;
            }
            let dy = dy as usize;
            if self.y + dy >= self.height {
                continue;
            }
            let row = &mut self.rows[(self.head + dy) % depth];
            let base = tx as usize * 3;
            let share = factor * weight as f64;
            for c in 0..3 {
                row[base + c] += (residual[c] * share) as f32;
            }
        }
    }

    /// Finish the current scanline.
    pub fn advance_row(&mut self) {
        self.rows[self.head].fill(0.0);
        self.head = (self.head + 1) % self.rows.len();
        self.y += 1;
    }

    /// Sum of all error still waiting in the ring, per channel.
    pub fn pending_total(&self) -> [f64; 3] {
        let mut total = [0.0; 3];
        for row in &self.rows {
            for px in row.chunks_exact(3) {
                for c in 0..3 {
                    total[c] += px[c] as f64;
                }
            }
        }
        total
    }
}
