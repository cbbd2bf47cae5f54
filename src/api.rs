use crate::interop::{arr_i32, arr_i64_as_f64, arr_points, arr_u32};
use crate::{error, PixelMap, Strategy};
use pixelmap::Accumulation;
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub fn pyramidal_dt_res(rows: usize, cols: usize, image: Vec<i32>, stride: usize) -> JsValue {
    error::result(crate::rs_pyramidal_dt(rows, cols, image, stride).map(|dt| arr_i64_as_f64(&dt).into()))
}

#[wasm_bindgen]
impl PixelMap {
    /// Map over a row-major label image; `seed` drives edge removal draws.
    #[wasm_bindgen(constructor)]
    pub fn new(rows: usize, cols: usize, labels: Vec<i32>, seed: u64) -> Result<PixelMap, JsValue> {
        PixelMap::rs_from_labels(rows, cols, labels, seed).map_err(|e| error::from_gmap(&e))
    }
    pub fn from_shape(rows: usize, cols: usize, bounded: bool, seed: u64) -> Result<PixelMap, JsValue> {
        PixelMap::rs_from_shape(rows, cols, bounded, seed).map_err(|e| error::from_gmap(&e))
    }
    pub fn from_json(json: &str, seed: u64) -> Result<PixelMap, JsValue> {
        PixelMap::rs_from_json(json, seed).map_err(|e| error::from_gmap(&e))
    }
    pub fn to_json(&self) -> String {
        self.rs_to_json()
    }
    pub fn reseed(&mut self, seed: u64) {
        self.rs_reseed(seed)
    }

    pub fn n_rows(&self) -> usize {
        self.inner.n_rows()
    }
    pub fn n_cols(&self) -> usize {
        self.inner.n_cols()
    }
    pub fn n_darts(&self) -> usize {
        self.inner.n_darts()
    }
    pub fn n_live_darts(&self) -> usize {
        self.inner.gmap().n_live_darts()
    }
    pub fn alpha_res(&self, i: usize, dart: u32) -> JsValue {
        error::result(self.inner.gmap().alpha(i, dart).map(|d| JsValue::from_f64(d as f64)))
    }
    pub fn cell_res(&self, i: usize, dart: u32) -> JsValue {
        error::result(self.inner.gmap().cell(i, dart).map(|c| arr_u32(&c).into()))
    }

    // Reduction
    pub fn remove_edges_res(&mut self, factor: f64) -> JsValue {
        error::result(self.rs_remove_edges(factor).map(|r| serde_wasm_bindgen::to_value(&r).unwrap_or(JsValue::NULL)))
    }
    pub fn remove_vertices_res(&mut self) -> JsValue {
        error::result(self.rs_remove_vertices().map(|n| JsValue::from_f64(n as f64)))
    }

    // Propagation
    /// `strategy`: 0 wave, 1 weighted, 2 per-vertex wave. `accumulation`:
    /// 0 dart, 1 vertex, 2 edge, 3 face, 4 vertex+edge, 5 vertex+face, 6 edge+face.
    pub fn propagate_res(
        &mut self,
        strategy: u8,
        accumulation: u8,
        seed_labels: Vec<i32>,
        propagation_labels: Vec<i32>,
        seeds: Option<Vec<u32>>,
    ) -> JsValue {
        let Some(strategy) = Strategy::from_code(strategy) else {
            return error::err("invalid_strategy", "strategy must be 0:wave, 1:dijkstra, 2:improved_vertex", None);
        };
        let accumulation = match Accumulation::try_from(accumulation) {
            Ok(a) => a,
            Err(e) => return error::from_gmap(&e),
        };
        let r = self.rs_propagate(strategy, accumulation, &seed_labels, &propagation_labels, seeds.as_deref());
        error::result(r.map(|_| JsValue::UNDEFINED))
    }
    pub fn set_weights_res(&mut self, weights: Vec<f64>) -> JsValue {
        if weights.iter().any(|w| !w.is_finite() || w.fract() != 0.0) {
            return error::err("non_integer", "weights must be finite integers", None);
        }
        let weights = weights.into_iter().map(|w| w as i64).collect();
        error::result(self.inner.set_weights(weights).map(|_| JsValue::UNDEFINED))
    }

    // Read-only views for rendering
    pub fn labels(&self) -> js_sys::Int32Array {
        arr_i32(self.inner.labels().data())
    }
    pub fn image_labels(&self) -> js_sys::Int32Array {
        arr_i32(self.inner.image_labels())
    }
    pub fn distances(&self) -> js_sys::Float64Array {
        arr_i64_as_f64(self.inner.distances())
    }
    pub fn weights(&self) -> js_sys::Float64Array {
        arr_i64_as_f64(self.inner.weights())
    }
    pub fn polyline_res(&self, dart: u32) -> JsValue {
        error::result(self.inner.polyline(dart).map(|p| arr_points(p).into()))
    }
    pub fn dt_image(&self, propagation_labels: Vec<i32>, interpolate: bool) -> js_sys::Float64Array {
        arr_i64_as_f64(&self.rs_dt_image(&propagation_labels, interpolate))
    }
    pub fn label_image(&self, interpolate: bool) -> js_sys::Int32Array {
        arr_i32(&self.rs_label_image(interpolate))
    }
    pub fn voronoi_image(&self, propagation_labels: Vec<i32>) -> js_sys::Int32Array {
        arr_i32(&self.rs_voronoi_image(&propagation_labels))
    }
}
