//! Error diffusion kernel definitions.
//!
//! Each kernel lists the not-yet-visited neighbors that receive a share of a
//! pixel's quantization residual. A neighbor at `(dx, dy)` receives
//! `residual * strength * weight / divisor`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An error diffusion kernel.
///
/// `max_dy` is how many rows ahead the kernel reaches; the diffusion ring
/// holds `max_dy + 1` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    /// (dx, dy, weight) entries; `dy` is never negative
    pub entries: &'static [(i32, i32, u8)],
    pub divisor: u8,
    pub max_dy: usize,
}

impl Kernel {
    /// Sum of all weights; equals `divisor` except for Atkinson.
    pub fn weight_sum(&self) -> u32 {
        self.entries.iter().map(|&(_, _, w)| w as u32).sum()
    }
}

/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[(1, 0, 7), (-1, 1, 3), (0, 1, 5), (1, 1, 1)],
    divisor: 16,
    max_dy: 1,
};

/// ```text
///            X   7   5
///    3   5   7   5   3
///    1   3   5   3   1
/// ```
pub const JARVIS_JUDICE_NINKE: Kernel = Kernel {
    entries: &[
        (1, 0, 7),
        (2, 0, 5),
        (-2, 1, 3),
        (-1, 1, 5),
        (0, 1, 7),
        (1, 1, 5),
        (2, 1, 3),
        (-2, 2, 1),
        (-1, 2, 3),
        (0, 2, 5),
        (1, 2, 3),
        (2, 2, 1),
    ],
    divisor: 48,
    max_dy: 2,
};

/// ```text
///            X   8   4
///    2   4   8   4   2
///    1   2   4   2   1
/// ```
pub const STUCKI: Kernel = Kernel {
    entries: &[
        (1, 0, 8),
        (2, 0, 4),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 8),
        (1, 1, 4),
        (2, 1, 2),
        (-2, 2, 1),
        (-1, 2, 2),
        (0, 2, 4),
        (1, 2, 2),
        (2, 2, 1),
    ],
    divisor: 42,
    max_dy: 2,
};

/// Propagates only 6/8 of the residual, the rest is dropped.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
pub const ATKINSON: Kernel = Kernel {
    entries: &[(1, 0, 1), (2, 0, 1), (-1, 1, 1), (0, 1, 1), (1, 1, 1), (0, 2, 1)],
    divisor: 8,
    max_dy: 2,
};

/// ```text
///            X   8   4
///    2   4   8   4   2
/// ```
pub const BURKES: Kernel = Kernel {
    entries: &[
        (1, 0, 8),
        (2, 0, 4),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 8),
        (1, 1, 4),
        (2, 1, 2),
    ],
    divisor: 32,
    max_dy: 1,
};

/// ```text
///            X   5   3
///    2   4   5   4   2
///        2   3   2
/// ```
pub const SIERRA: Kernel = Kernel {
    entries: &[
        (1, 0, 5),
        (2, 0, 3),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 5),
        (1, 1, 4),
        (2, 1, 2),
        (-1, 2, 2),
        (0, 2, 3),
        (1, 2, 2),
    ],
    divisor: 32,
    max_dy: 2,
};

/// ```text
///    X   2
///    1   1
/// ```
pub const SIERRA_LITE: Kernel = Kernel {
    entries: &[(1, 0, 2), (-1, 1, 1), (0, 1, 1)],
    divisor: 4,
    max_dy: 1,
};

/// Named kernel selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiffusionKernel {
    #[default]
    FloydSteinberg,
    JarvisJudiceNinke,
    Stucki,
    Atkinson,
    Burkes,
    Sierra,
    SierraLite,
}

impl DiffusionKernel {
    pub const ALL: [DiffusionKernel; 7] = [
        DiffusionKernel::FloydSteinberg,
        DiffusionKernel::JarvisJudiceNinke,
        DiffusionKernel::Stucki,
        DiffusionKernel::Atkinson,
        DiffusionKernel::Burkes,
        DiffusionKernel::Sierra,
        DiffusionKernel::SierraLite,
    ];

    pub fn kernel(self) -> Kernel {
        match self {
            DiffusionKernel::FloydSteinberg => FLOYD_STEINBERG,
            DiffusionKernel::JarvisJudiceNinke => JARVIS_JUDICE_NINKE,
            DiffusionKernel::Stucki => STUCKI,
            DiffusionKernel::Atkinson => ATKINSON,
            DiffusionKernel::Burkes => BURKES,
            DiffusionKernel::Sierra => SIERRA,
            DiffusionKernel::SierraLite => SIERRA_LITE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DiffusionKernel::FloydSteinberg => "floyd-steinberg",
            DiffusionKernel::JarvisJudiceNinke => "jarvis-judice-ninke",
            DiffusionKernel::Stucki => "stucki",
            DiffusionKernel::Atkinson => "atkinson",
            DiffusionKernel::Burkes => "burkes",
            DiffusionKernel::Sierra => "sierra",
            DiffusionKernel::SierraLite => "sierra-lite",
        }
    }
}

impl fmt::Display for DiffusionKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
