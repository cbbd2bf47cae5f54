//! Approximate distance transform of a binary image through one coarse level.

use crate::algorithms::images::wave_propagation_dt_image;
use crate::error::GmapError;
use crate::limits::in_pixel_bounds;
use crate::model::Label;
use crate::raster::Raster;

/// Shrinks `image` by `stride`: a block is 0 if any of its pixels is 0.
/// Blocks overhanging the border see the missing pixels as 1.
pub fn reduce_size_binary_image(image: &Raster<Label>, stride: usize) -> Result<Raster<Label>, GmapError> {
    if stride == 0 {
        return Err(GmapError::InvalidStride);
    }
    let rows = image.rows().div_ceil(stride);
    let cols = image.cols().div_ceil(stride);
    let mut out = Raster::new_fill(rows, cols, 1);
    for i in 0..rows {
        for j in 0..cols {
            let (r0, c0) = (i * stride, j * stride);
            let block = image.window(r0, c0, r0.saturating_add(stride), c0.saturating_add(stride));
            if block.data().contains(&0) {
                out.set(i, j, 0);
            }
        }
    }
    Ok(out)
}

/// Expands a coarse distance image by `stride`.
///
/// Each coarse value, scaled by `stride`, seeds the top-left pixel of its block.
/// A wave of radius `stride - 1` around every seed proposes `seed + steps`,
/// and the smallest proposal wins. Pixels no window covers stay `-1`.
pub fn interpolate_dt_binary_image(dt_reduced: &Raster<i64>, stride: usize) -> Result<Raster<i64>, GmapError> {
    if stride == 0 {
        return Err(GmapError::InvalidStride);
    }
    let too_large = || GmapError::StrideTooLarge { stride, rows: dt_reduced.rows(), cols: dt_reduced.cols() };
    let rows = dt_reduced.rows().checked_mul(stride).ok_or_else(too_large)?;
    let cols = dt_reduced.cols().checked_mul(stride).ok_or_else(too_large)?;
    if !in_pixel_bounds(rows, cols) {
        return Err(too_large());
    }
    expand(dt_reduced, stride, rows, cols)
}

/// reduce, exact distance transform, interpolate, crop to the input shape.
pub fn pyramidal_dt_binary_image(image: &Raster<Label>, stride: usize) -> Result<Raster<i64>, GmapError> {
    let reduced = reduce_size_binary_image(image, stride)?;
    let dt = wave_propagation_dt_image(&reduced, None)?;
    expand(&dt, stride, image.rows(), image.cols())
}

// Interpolation restricted to the top-left `rows x cols` of the expanded image.
// Every seed that can reach that area lies inside it.
fn expand(dt_reduced: &Raster<i64>, stride: usize, rows: usize, cols: usize) -> Result<Raster<i64>, GmapError> {
    let too_large = || GmapError::StrideTooLarge { stride, rows: dt_reduced.rows(), cols: dt_reduced.cols() };
    let mut out = Raster::new_fill(rows, cols, -1i64);
    let mut centers = Vec::new();
    for i in 0..dt_reduced.rows() {
        let Some(cr) = i.checked_mul(stride).filter(|&r| r < rows) else { break };
        for j in 0..dt_reduced.cols() {
            let Some(cc) = j.checked_mul(stride).filter(|&c| c < cols) else { break };
            let v = dt_reduced.get(i, j);
            if v >= 0 {
                let value = i128::from(v)
                    .checked_mul(stride as i128)
                    .and_then(|x| i64::try_from(x).ok())
                    .ok_or_else(too_large)?;
                out.set(cr, cc, value);
                centers.push((cr, cc, value));
            }
        }
    }
    let radius = stride - 1;
    for (cr, cc, value) in centers {
        let (r0, c0) = (cr.saturating_sub(radius), cc.saturating_sub(radius));
        let r1 = cr.saturating_add(stride).min(rows);
        let c1 = cc.saturating_add(stride).min(cols);
        let window: Raster<Label> = Raster::new_fill(r1 - r0, c1 - c0, 1);
        let steps = wave_propagation_dt_image(&window, Some(&[(cr - r0, cc - c0)]))?;
        for i in 0..steps.rows() {
            for j in 0..steps.cols() {
                let proposed = value.saturating_add(steps.get(i, j));
                let current = out.get(r0 + i, c0 + j);
                if current < 0 || proposed < current {
                    out.set(r0 + i, c0 + j, proposed);
                }
            }
        }
    }
    Ok(out)
}
