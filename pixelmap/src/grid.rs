//! Canonical 2-gMap of an `R x C` pixel grid.
//!
//! Each pixel owns 8 darts, two per side, numbered clockwise from the top-left
//! corner: `0,1` top, `2,3` right, `4,5` bottom, `6,7` left. The outer boundary
//! ring of an unbounded grid follows the `8 * R * C` pixel darts.

use crate::error::GmapError;
use crate::limits;
use crate::model::{Dart, DARTS_PER_PIXEL};

pub const SQUARE_ALPHA0: [Dart; 8] = [1, 0, 3, 2, 5, 4, 7, 6];
pub const SQUARE_ALPHA1: [Dart; 8] = [7, 2, 1, 4, 3, 6, 5, 0];

// (left pixel, right pixel) and (top pixel, bottom pixel) local pairs
const HORIZONTAL_SEAM: [(Dart, Dart); 2] = [(2, 7), (3, 6)];
const VERTICAL_SEAM: [(Dart, Dart); 2] = [(4, 1), (5, 0)];

pub fn n_grid_darts(rows: usize, cols: usize, bounded: bool) -> Result<usize, GmapError> {
    if rows == 0 || cols == 0 {
        return Err(GmapError::EmptyShape { rows, cols });
    }
    let pixels = rows.checked_mul(cols).and_then(|p| p.checked_mul(DARTS_PER_PIXEL as usize));
    let ring = if bounded { Some(0) } else { rows.checked_add(cols).and_then(|s| s.checked_mul(4)) };
    match pixels.zip(ring).and_then(|(p, r)| p.checked_add(r)) {
        Some(n) if limits::in_dart_bounds(n) => Ok(n),
        Some(n) => Err(GmapError::TooLarge { n_darts: n }),
        None => Err(GmapError::TooLarge { n_darts: usize::MAX }),
    }
}

/// Involution arrays of the grid. Identical arguments give identical arrays.
pub fn grid_alphas(rows: usize, cols: usize, sew: bool, bounded: bool) -> Result<[Vec<Dart>; 3], GmapError> {
    let n = n_grid_darts(rows, cols, bounded)?;
    let n_pixel_darts = rows * cols * DARTS_PER_PIXEL as usize;
    let mut a0 = Vec::with_capacity(n);
    let mut a1 = Vec::with_capacity(n);
    for p in 0..(rows * cols) as Dart {
        let base = p * DARTS_PER_PIXEL;
        a0.extend(SQUARE_ALPHA0.iter().map(|l| base + l));
        a1.extend(SQUARE_ALPHA1.iter().map(|l| base + l));
    }
    let mut a2: Vec<Dart> = (0..n as Dart).collect();

    if sew {
        let dart = |r: usize, c: usize, local: Dart| ((r * cols + c) as Dart) * DARTS_PER_PIXEL + local;
        for r in 0..rows {
            for c in 0..cols {
                if c + 1 < cols {
                    for (x, y) in HORIZONTAL_SEAM {
                        a2.swap(dart(r, c, x) as usize, dart(r, c + 1, y) as usize);
                    }
                }
                if r + 1 < rows {
                    for (x, y) in VERTICAL_SEAM {
                        a2.swap(dart(r, c, x) as usize, dart(r + 1, c, y) as usize);
                    }
                }
            }
        }
    }

    if !bounded {
        let rim = boundary_walk(rows, cols);
        let len = rim.len() as Dart;
        for (k, &d) in rim.iter().enumerate() {
            let b = (n_pixel_darts + k) as Dart;
            a2[d as usize] = b;
            a2[b as usize] = d;
            let k = k as Dart;
            a0.push(n_pixel_darts as Dart + (k ^ 1));
            let partner = match k {
                0 => len - 1,
                k if k == len - 1 => 0,
                k if k % 2 == 1 => k + 1,
                k => k - 1,
            };
            a1.push(n_pixel_darts as Dart + partner);
        }
    }
    Ok([a0, a1, a2])
}

/// Rim darts in counter-clockwise order: left column down, bottom row right,
/// right column up, top row left.
pub fn boundary_walk(rows: usize, cols: usize) -> Vec<Dart> {
    let dart = |r: usize, c: usize, local: Dart| ((r * cols + c) as Dart) * DARTS_PER_PIXEL + local;
    let mut walk = Vec::with_capacity(4 * (rows + cols));
    for r in 0..rows {
        walk.extend([dart(r, 0, 7), dart(r, 0, 6)]);
    }
    for c in 0..cols {
        walk.extend([dart(rows - 1, c, 5), dart(rows - 1, c, 4)]);
    }
    for r in (0..rows).rev() {
        walk.extend([dart(r, cols - 1, 3), dart(r, cols - 1, 2)]);
    }
    for c in (0..cols).rev() {
        walk.extend([dart(0, c, 1), dart(0, c, 0)]);
    }
    walk
}
