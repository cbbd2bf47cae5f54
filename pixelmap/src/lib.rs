pub mod attributes;
pub mod error;
pub mod gmap;
pub mod grid;
pub mod limits;
pub mod model;
pub mod raster;
pub mod algorithms {
    pub mod dijkstra;
    pub mod images;
    pub mod propagation;
    pub mod pyramid;
    pub mod reduction;
    pub mod vertex_wave;
}
mod json;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub use algorithms::dijkstra::CostFn;
pub use algorithms::reduction::{EdgeClass, ReductionReport};
use attributes::Attributes;
pub use algorithms::images::{compute_dt_reduction, generalized_wave_propagation_image, wave_propagation_dt_image};
pub use algorithms::propagation::Propagation;
pub use algorithms::pyramid::{interpolate_dt_binary_image, pyramidal_dt_binary_image, reduce_size_binary_image};
pub use error::GmapError;
pub use gmap::GMap;
pub use model::{Accumulation, Dart, Label, Vec2, EXCLUDED, NO_LABEL, OUTER_LABEL, UNREACHED};
pub use raster::Raster;

/// Random stream driving edge removal decisions.
pub type ReductionRng = StdRng;

pub fn reduction_rng(seed: u64) -> ReductionRng {
    StdRng::seed_from_u64(seed)
}

/// 2-gMap of a labelled pixel grid with its per-dart attributes.
///
/// Pixel `(row, col)` owns darts `8 * (row * n_cols + col) .. + 8`; darts of
/// the outer boundary of an unbounded map follow all pixel darts.
#[derive(Clone, Debug)]
pub struct PixelMap {
    pub(crate) gmap: GMap,
    pub(crate) n_rows: usize,
    pub(crate) n_cols: usize,
    pub(crate) bounded: bool,
    pub(crate) attrs: Attributes,
}

impl PixelMap {
    /// Grid map with every label set to 0.
    pub fn from_shape(rows: usize, cols: usize, sew: bool, bounded: bool) -> Result<Self, GmapError> {
        let alphas = grid::grid_alphas(rows, cols, sew, bounded)?;
        let gmap = GMap::from_alphas(alphas)?;
        let attrs = Attributes::new(Raster::new_fill(rows, cols, 0), None, gmap.n_darts(), true)?;
        Ok(PixelMap { gmap, n_rows: rows, n_cols: cols, bounded, attrs })
    }

    pub fn from_labels(labels: &Raster<Label>) -> Result<Self, GmapError> {
        Self::from_labels_with(labels, None, true)
    }

    /// Bounded, sewn grid carrying `labels` and, optionally, a connected
    /// component id per pixel used to tell same-label regions apart.
    pub fn from_labels_with(
        labels: &Raster<Label>,
        connected_components: Option<&Raster<Label>>,
        add_polyline: bool,
    ) -> Result<Self, GmapError> {
        let (rows, cols) = labels.shape();
        let gmap = GMap::from_alphas(grid::grid_alphas(rows, cols, true, true)?)?;
        let attrs = Attributes::new(labels.clone(), connected_components, gmap.n_darts(), add_polyline)?;
        Ok(PixelMap { gmap, n_rows: rows, n_cols: cols, bounded: true, attrs })
    }

    pub fn gmap(&self) -> &GMap {
        &self.gmap
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn is_bounded(&self) -> bool {
        self.bounded
    }

    pub fn n_darts(&self) -> usize {
        self.gmap.n_darts()
    }

    pub(crate) fn n_pixel_darts(&self) -> usize {
        self.n_rows * self.n_cols * model::DARTS_PER_PIXEL as usize
    }

    /// First dart (local 0) of pixel `(row, col)`.
    pub fn pixel_dart(&self, row: usize, col: usize) -> Result<Dart, GmapError> {
        if row >= self.n_rows || col >= self.n_cols {
            return Err(GmapError::PixelOutOfRange { row, col });
        }
        Ok(self.pixel_dart_unchecked(row, col))
    }

    #[inline]
    pub(crate) fn pixel_dart_unchecked(&self, row: usize, col: usize) -> Dart {
        ((row * self.n_cols + col) as Dart) * model::DARTS_PER_PIXEL
    }

    /// Pixel owning `d`, `None` for boundary darts.
    pub fn pixel_of(&self, d: Dart) -> Option<(usize, usize)> {
        let k = d as usize;
        if k >= self.n_pixel_darts() {
            return None;
        }
        let p = k / model::DARTS_PER_PIXEL as usize;
        Some((p / self.n_cols, p % self.n_cols))
    }

    pub fn labels(&self) -> &Raster<Label> {
        &self.attrs.labels
    }

    pub fn image_labels(&self) -> &[Label] {
        &self.attrs.image_labels
    }

    pub fn connected_components_labels(&self) -> Option<&[Label]> {
        self.attrs.connected_components_labels.as_deref()
    }

    /// Region label of the seed each dart's distance came from.
    pub fn dt_connected_components_labels(&self) -> &[Label] {
        &self.attrs.dt_connected_components_labels
    }

    pub fn weights(&self) -> &[i64] {
        &self.attrs.weights
    }

    pub fn distances(&self) -> &[i64] {
        &self.attrs.distances
    }

    pub fn polyline(&self, d: Dart) -> Result<&[Vec2], GmapError> {
        self.check_index(d)?;
        Ok(&self.attrs.polylines[d as usize])
    }

    /// Label of the pixel owning `d`; removed darts keep their pixel.
    pub fn value(&self, d: Dart) -> Result<Label, GmapError> {
        self.check_index(d)?;
        Ok(match self.pixel_of(d) {
            Some((r, c)) => self.attrs.labels.get(r, c),
            None => OUTER_LABEL,
        })
    }

    fn check_index(&self, d: Dart) -> Result<(), GmapError> {
        if d as usize >= self.n_darts() {
            return Err(GmapError::DartOutOfRange { dart: d, n_darts: self.n_darts() });
        }
        Ok(())
    }

    pub fn set_weight(&mut self, d: Dart, weight: i64) -> Result<(), GmapError> {
        self.gmap.check_dart(d)?;
        self.attrs.weights[d as usize] = weight;
        Ok(())
    }

    pub fn set_weights(&mut self, weights: Vec<i64>) -> Result<(), GmapError> {
        if weights.len() != self.n_darts() {
            return Err(GmapError::SizeMismatch { expected: self.n_darts(), actual: weights.len() });
        }
        self.attrs.weights = weights;
        Ok(())
    }

    pub fn reset_distances(&mut self) {
        self.attrs.distances.fill(UNREACHED);
        self.attrs.dt_connected_components_labels.fill(NO_LABEL);
    }

    // Reduction

    pub fn classify_edge(&self, d: Dart) -> Result<EdgeClass, GmapError> {
        self.gmap.check_dart(d)?;
        Ok(algorithms::reduction::classify_edge(self, d))
    }

    /// Removes removable edges (dangling or between same-label pixels), each
    /// with probability `reduction_factor`, drawing from `rng`.
    pub fn remove_edges<R: Rng>(&mut self, rng: &mut R, reduction_factor: f64) -> Result<ReductionReport, GmapError> {
        algorithms::reduction::remove_edges_impl(self, rng, reduction_factor)
    }

    pub fn remove_edge(&mut self, d: Dart) -> Result<Vec<Dart>, GmapError> {
        self.gmap.remove_i_cell(1, d)
    }

    pub fn remove_vertex(&mut self, d: Dart) -> Result<(), GmapError> {
        algorithms::reduction::remove_vertex_impl(self, d)
    }

    pub fn remove_vertices(&mut self) -> Result<usize, GmapError> {
        algorithms::reduction::remove_vertices_impl(self)
    }

    // Propagation

    /// Uniform-cost wave from `seeds`, or from the darts labelled 0, over
    /// every label.
    pub fn wave_propagation(&mut self, seeds: Option<&[Dart]>, accumulation: Accumulation) -> Result<(), GmapError> {
        let p = Propagation { accumulation, seed_labels: &[0], propagation_labels: None, seeds };
        algorithms::propagation::wave_propagation_impl(self, &p)
    }

    pub fn generalized_wave_propagation(&mut self, p: &Propagation) -> Result<(), GmapError> {
        algorithms::propagation::wave_propagation_impl(self, p)
    }

    pub fn generalized_dijkstra(&mut self, p: &Propagation, cost: Option<CostFn>) -> Result<(), GmapError> {
        algorithms::dijkstra::generalized_dijkstra_impl(self, p, cost)
    }

    /// Same distances as the vertex-accumulation wave, computed per vertex.
    pub fn improved_wave_propagation_gmap_vertex(&mut self, p: &Propagation) -> Result<(), GmapError> {
        algorithms::vertex_wave::improved_wave_propagation_vertex_impl(self, p)
    }

    // Persistence
    pub fn to_json_value(&self) -> serde_json::Value {
        json::to_json_impl(self)
    }

    pub fn from_json_value(v: serde_json::Value) -> Result<Self, GmapError> {
        json::from_json_impl(v)
    }
}
