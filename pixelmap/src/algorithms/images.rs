//! Per-pixel views of a map and image-level entry points.

use rand::Rng;

use crate::algorithms::propagation::Propagation;
use crate::error::GmapError;
use crate::model::{Accumulation, Dart, Label, EXCLUDED, NO_LABEL, UNREACHED};
use crate::raster::Raster;
use crate::PixelMap;

impl PixelMap {
    // Live dart standing for the pixel, or None if it was removed and the
    // caller does not interpolate.
    fn pixel_representative(&self, row: usize, col: usize, interpolate: bool) -> Option<Dart> {
        let d = self.pixel_dart_unchecked(row, col);
        if self.gmap.is_live(d) {
            Some(d)
        } else if interpolate {
            Some(self.gmap.follow_redirects(d))
        } else {
            None
        }
    }

    fn per_pixel<T: Clone>(&self, fill: T, mut f: impl FnMut(usize, usize) -> T) -> Raster<T> {
        let mut out = Raster::new_fill(self.n_rows, self.n_cols, fill);
        for r in 0..self.n_rows {
            for c in 0..self.n_cols {
                out.data_mut()[r * self.n_cols + c] = f(r, c);
            }
        }
        out
    }

    /// Distance per pixel.
    ///
    /// `-2` marks pixels outside `propagation_labels` or never reached; `-1`
    /// marks removed pixels when `interpolate_missing_values` is off.
    /// Otherwise removed pixels take the value of the dart their face merged into.
    pub fn build_dt_image(&self, propagation_labels: &[Label], interpolate_missing_values: bool) -> Raster<i64> {
        self.per_pixel(EXCLUDED, |r, c| {
            let d = self.pixel_dart_unchecked(r, c);
            if !propagation_labels.contains(&self.attrs.image_labels[d as usize]) {
                return EXCLUDED;
            }
            match self.pixel_representative(r, c, interpolate_missing_values) {
                None => UNREACHED,
                Some(d) => match self.attrs.distances[d as usize] {
                    UNREACHED => EXCLUDED,
                    v => v,
                },
            }
        })
    }

    /// Label per pixel, read through redirects for removed pixels.
    pub fn get_label_image(&self, interpolate_missing_values: bool) -> Raster<Label> {
        self.per_pixel(NO_LABEL, |r, c| {
            self.pixel_representative(r, c, interpolate_missing_values)
                .map_or(NO_LABEL, |d| self.attrs.image_labels[d as usize])
        })
    }

    /// Region label of the seed each pixel's distance came from; `-1` where no
    /// distance was computed or the pixel is outside `propagation_labels`.
    pub fn build_voronoi_image(&self, propagation_labels: &[Label]) -> Raster<Label> {
        self.per_pixel(NO_LABEL, |r, c| {
            let d = self.pixel_dart_unchecked(r, c);
            if !propagation_labels.contains(&self.attrs.image_labels[d as usize]) {
                return NO_LABEL;
            }
            let d = self.gmap.follow_redirects(d) as usize;
            if self.attrs.distances[d] < 0 {
                NO_LABEL
            } else {
                self.attrs.dt_connected_components_labels[d]
            }
        })
    }

    fn pixel_distances(&self) -> Raster<i64> {
        self.per_pixel(UNREACHED, |r, c| self.attrs.distances[self.pixel_dart_unchecked(r, c) as usize])
    }
}

/// City-block distance of every pixel to the nearest seed pixel.
///
/// Seeds default to the pixels equal to 0. Unreachable pixels are `-1`.
pub fn wave_propagation_dt_image(image: &Raster<Label>, seeds: Option<&[(usize, usize)]>) -> Result<Raster<i64>, GmapError> {
    let mut map = PixelMap::from_labels_with(image, None, false)?;
    let seed_darts: Vec<Dart> = match seeds {
        Some(pixels) => pixels
            .iter()
            .map(|&(r, c)| map.pixel_dart(r, c))
            .collect::<Result<_, _>>()?,
        None => (0..image.rows())
            .flat_map(|r| (0..image.cols()).map(move |c| (r, c)))
            .filter(|&(r, c)| image.get(r, c) == 0)
            .map(|(r, c)| map.pixel_dart_unchecked(r, c))
            .collect(),
    };
    map.wave_propagation(Some(&seed_darts), Accumulation::Face)?;
    Ok(map.pixel_distances())
}

/// Face-accumulation wave from `seed_labels` through `propagation_labels`.
/// Excluded pixels are `-2`, unreached ones `-1`.
pub fn generalized_wave_propagation_image(
    image: &Raster<Label>,
    seed_labels: &[Label],
    propagation_labels: &[Label],
) -> Result<Raster<i64>, GmapError> {
    let mut map = PixelMap::from_labels_with(image, None, false)?;
    let p = Propagation::new(Accumulation::Face)
        .with_seed_labels(seed_labels)
        .with_propagation_labels(propagation_labels);
    map.generalized_wave_propagation(&p)?;
    Ok(map.pixel_distances())
}

/// Builds a map, reduces it, propagates and reads the distances back per
/// pixel with removed pixels interpolated.
pub fn compute_dt_reduction<R: Rng>(
    labels: &Raster<Label>,
    reduction_factor: f64,
    rng: &mut R,
    seed_labels: &[Label],
    propagation_labels: &[Label],
    accumulation: Accumulation,
) -> Result<Raster<i64>, GmapError> {
    let mut map = PixelMap::from_labels(labels)?;
    map.remove_edges(rng, reduction_factor)?;
    map.remove_vertices()?;
    let p = Propagation::new(accumulation)
        .with_seed_labels(seed_labels)
        .with_propagation_labels(propagation_labels);
    map.generalized_wave_propagation(&p)?;
    Ok(map.build_dt_image(propagation_labels, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_seed_pixels_override_zeros() {
        let image = Raster::from_rows(vec![vec![0, 1, 1]]).unwrap();
        let dt = wave_propagation_dt_image(&image, Some(&[(0, 2)])).unwrap();
        assert_eq!(dt.data(), &[2, 1, 0]);
        assert!(matches!(
            wave_propagation_dt_image(&image, Some(&[(1, 0)])),
            Err(GmapError::PixelOutOfRange { row: 1, col: 0 })
        ));
    }

    #[test]
    fn generalized_image_marks_excluded_pixels() {
        let image = Raster::from_rows(vec![vec![0, 5, 5, 9, 5]]).unwrap();
        let dt = generalized_wave_propagation_image(&image, &[0], &[5]).unwrap();
        assert_eq!(dt.data(), &[0, 1, 2, EXCLUDED, UNREACHED]);
    }
}
