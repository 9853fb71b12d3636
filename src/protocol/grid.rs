//! Dimension solver
//!
//! Turns a cell count into the near-square grid the frame is packed into:
//! `width = ceil(sqrt(n))` and `height = round(sqrt(n))`, rounding half up.
//! Both are computed with an integer square root so the grid can never come
//! out one cell short.

use std::fmt;

/// Grid dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl GridSize {
    /// Create a grid size
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of cells in the grid
    #[must_use]
    pub const fn cells(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Channel-bytes the grid can carry
    #[must_use]
    pub const fn capacity(&self) -> u64 {
        self.cells() * super::CHANNELS_PER_PIXEL as u64
    }

    /// Check if the grid has no cells
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Pick the smallest near-square grid holding at least `cells` cells
///
/// `solve(0)` is the empty `0x0` grid. Returns `None` when a side would not
/// fit in `u32`, i.e. for counts above `(2^32 - 1)^2`.
#[must_use]
pub fn solve(cells: u64) -> Option<GridSize> {
    let root = cells.isqrt();
    let (width, mut height) = if root * root == cells {
        (root, root)
    } else {
        // round(sqrt(n)) == root exactly when n < root^2 + root + 1/4
        let height = if cells <= root * root + root {
            root
        } else {
            root + 1
        };
        (root + 1, height)
    };
    if u128::from(width) * u128::from(height) < u128::from(cells) {
        height += 1;
    }

    Some(GridSize::new(
        u32::try_from(width).ok()?,
        u32::try_from(height).ok()?,
    ))
}
