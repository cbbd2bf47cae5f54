use pixelmap::{Accumulation, GmapError, Label, Propagation, Raster, ReductionReport, ReductionRng};
use wasm_bindgen::prelude::*;
mod api;
pub use api::{pyramidal_dt_res, set_panic_hook};
mod error;
mod interop;

/// Which propagation strategy `propagate` runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    Wave,
    Dijkstra,
    ImprovedVertex,
}

impl Strategy {
    pub fn from_code(code: u8) -> Option<Strategy> {
        match code {
            0 => Some(Strategy::Wave),
            1 => Some(Strategy::Dijkstra),
            2 => Some(Strategy::ImprovedVertex),
            _ => None,
        }
    }
}

#[wasm_bindgen]
pub struct PixelMap {
    pub(crate) inner: pixelmap::PixelMap,
    pub(crate) rng: ReductionRng,
}

impl PixelMap {
    pub fn rs_from_labels(rows: usize, cols: usize, labels: Vec<Label>, seed: u64) -> Result<PixelMap, GmapError> {
        let labels = Raster::from_vec(rows, cols, labels)?;
        let inner = pixelmap::PixelMap::from_labels(&labels)?;
        Ok(PixelMap { inner, rng: pixelmap::reduction_rng(seed) })
    }

    pub fn rs_from_shape(rows: usize, cols: usize, bounded: bool, seed: u64) -> Result<PixelMap, GmapError> {
        let inner = pixelmap::PixelMap::from_shape(rows, cols, true, bounded)?;
        Ok(PixelMap { inner, rng: pixelmap::reduction_rng(seed) })
    }

    pub fn rs_from_json(json: &str, seed: u64) -> Result<PixelMap, GmapError> {
        let v: serde_json::Value = serde_json::from_str(json)?;
        let inner = pixelmap::PixelMap::from_json_value(v)?;
        Ok(PixelMap { inner, rng: pixelmap::reduction_rng(seed) })
    }

    pub fn rs_inner(&self) -> &pixelmap::PixelMap { &self.inner }

    pub fn rs_reseed(&mut self, seed: u64) { self.rng = pixelmap::reduction_rng(seed); }

    pub fn rs_remove_edges(&mut self, factor: f64) -> Result<ReductionReport, GmapError> {
        self.inner.remove_edges(&mut self.rng, factor)
    }

    pub fn rs_remove_vertices(&mut self) -> Result<usize, GmapError> { self.inner.remove_vertices() }

    /// Runs one strategy. An empty `propagation_labels` lets the wave cross every label.
    pub fn rs_propagate(
        &mut self,
        strategy: Strategy,
        accumulation: Accumulation,
        seed_labels: &[Label],
        propagation_labels: &[Label],
        seeds: Option<&[u32]>,
    ) -> Result<(), GmapError> {
        let p = Propagation {
            accumulation,
            seed_labels,
            propagation_labels: (!propagation_labels.is_empty()).then_some(propagation_labels),
            seeds,
        };
        match strategy {
            Strategy::Wave => self.inner.generalized_wave_propagation(&p),
            Strategy::Dijkstra => self.inner.generalized_dijkstra(&p, None),
            Strategy::ImprovedVertex => self.inner.improved_wave_propagation_gmap_vertex(&p),
        }
    }

    pub fn rs_dt_image(&self, propagation_labels: &[Label], interpolate: bool) -> Vec<i64> {
        self.inner.build_dt_image(propagation_labels, interpolate).into_vec()
    }

    pub fn rs_label_image(&self, interpolate: bool) -> Vec<Label> {
        self.inner.get_label_image(interpolate).into_vec()
    }

    pub fn rs_voronoi_image(&self, propagation_labels: &[Label]) -> Vec<Label> {
        self.inner.build_voronoi_image(propagation_labels).into_vec()
    }

    pub fn rs_to_json(&self) -> String { self.inner.to_json_value().to_string() }
}

pub fn rs_pyramidal_dt(rows: usize, cols: usize, image: Vec<Label>, stride: usize) -> Result<Vec<i64>, GmapError> {
    let image = Raster::from_vec(rows, cols, image)?;
    Ok(pixelmap::pyramidal_dt_binary_image(&image, stride)?.into_vec())
}
