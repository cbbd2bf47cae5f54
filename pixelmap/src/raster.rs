use serde::{Deserialize, Serialize};

use crate::error::GmapError;

/// Row-major `rows x cols` array used for label input and per-pixel output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Raster<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Raster<T> {
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, GmapError> {
        let expected = rows.checked_mul(cols).ok_or(GmapError::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;
        if data.len() != expected {
            return Err(GmapError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        debug_assert!(self.contains(row, col));
        row * self.cols + col
    }
}

impl<T: Copy> Raster<T> {
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[self.offset(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        let k = self.offset(row, col);
        self.data[k] = value;
    }
}

impl<T: Clone> Raster<T> {
    pub fn new_fill(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Builds from nested rows; ragged input is a size mismatch.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, GmapError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(GmapError::SizeMismatch {
                    expected: n_cols,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.data.chunks(self.cols).map(<[T]>::to_vec).collect()
    }

    /// Copy of rows `r0..r1`, cols `c0..c1`, clipped to the raster.
    pub fn window(&self, r0: usize, c0: usize, r1: usize, c1: usize) -> Self {
        let r1 = r1.min(self.rows);
        let c1 = c1.min(self.cols);
        let (r0, c0) = (r0.min(r1), c0.min(c1));
        let mut data = Vec::with_capacity((r1 - r0) * (c1 - c0));
        for r in r0..r1 {
            let start = r * self.cols;
            data.extend_from_slice(&self.data[start + c0..start + c1]);
        }
        Self {
            rows: r1 - r0,
            cols: c1 - c0,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_rejects_ragged_input() {
        assert!(Raster::from_rows(vec![vec![1, 2], vec![3]]).is_err());
        let r = Raster::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(r.get(1, 0), 3);
        assert_eq!(r.to_rows(), vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn window_is_clipped() {
        let r = Raster::from_vec(3, 3, (0..9).collect::<Vec<i32>>()).unwrap();
        let w = r.window(1, 1, 5, 5);
        assert_eq!(w.shape(), (2, 2));
        assert_eq!(w.data(), &[4, 5, 7, 8]);
    }
}
