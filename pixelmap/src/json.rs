use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::attributes::{Attributes, Polyline};
use crate::error::GmapError;
use crate::gmap::GMap;
use crate::model::{Dart, Label, NO_LABEL, DARTS_PER_PIXEL};
use crate::raster::Raster;
use crate::{grid, limits, PixelMap};

#[derive(Serialize, Deserialize)]
struct MapDoc {
    version: u32,
    n_rows: usize,
    n_cols: usize,
    bounded: bool,
    alpha0: Vec<Dart>,
    alpha1: Vec<Dart>,
    alpha2: Vec<Dart>,
    #[serde(default)]
    removed: Vec<Dart>,
    #[serde(default)]
    redirects: Vec<(Dart, Dart)>,
    // one per pixel, row-major
    labels: Vec<Label>,
    #[serde(default)]
    connected_components: Option<Vec<Label>>,
    weights: Vec<i64>,
    distances: Vec<i64>,
    #[serde(default)]
    dt_components: Vec<Label>,
    // empty when the map carries no geometry
    #[serde(default)]
    polylines: Vec<Polyline>,
}

pub fn to_json_impl(m: &PixelMap) -> Value {
    let connected_components = m.attrs.connected_components_labels.as_ref().map(|cc| {
        (0..m.n_rows * m.n_cols)
            .map(|p| cc[p * DARTS_PER_PIXEL as usize])
            .collect()
    });
    let has_geometry = m.attrs.polylines.iter().any(|p| !p.is_empty());
    let [alpha0, alpha1, alpha2] = m.gmap.alphas.clone();
    serde_json::to_value(MapDoc {
        version: limits::DOCUMENT_VERSION,
        n_rows: m.n_rows,
        n_cols: m.n_cols,
        bounded: m.bounded,
        alpha0,
        alpha1,
        alpha2,
        removed: m.gmap.removed_darts().collect(),
        redirects: m.gmap.redirects().collect(),
        labels: m.attrs.labels.data().to_vec(),
        connected_components,
        weights: m.attrs.weights.clone(),
        distances: m.attrs.distances.clone(),
        dt_components: m.attrs.dt_connected_components_labels.clone(),
        polylines: if has_geometry { m.attrs.polylines.clone() } else { Vec::new() },
    })
    .unwrap_or_default()
}

/// Parses and validates a map document. Nothing is built unless every limit,
/// length and involution check passes.
pub fn from_json_impl(v: Value) -> Result<PixelMap, GmapError> {
    let doc: MapDoc = serde_json::from_value(v)?;
    if doc.version != limits::DOCUMENT_VERSION {
        return Err(GmapError::Format(format!("unsupported version {}", doc.version)));
    }
    let n = grid::n_grid_darts(doc.n_rows, doc.n_cols, doc.bounded)?;
    let per_dart = [
        doc.alpha0.len(),
        doc.alpha1.len(),
        doc.alpha2.len(),
        doc.weights.len(),
        doc.distances.len(),
    ];
    if let Some(&actual) = per_dart.iter().find(|&&len| len != n) {
        return Err(GmapError::SizeMismatch { expected: n, actual });
    }
    for optional in [doc.dt_components.len(), doc.polylines.len()] {
        if optional != 0 && optional != n {
            return Err(GmapError::SizeMismatch { expected: n, actual: optional });
        }
    }
    check_polylines(&doc.polylines)?;

    let labels = Raster::from_vec(doc.n_rows, doc.n_cols, doc.labels)?;
    let cc = doc
        .connected_components
        .map(|cc| Raster::from_vec(doc.n_rows, doc.n_cols, cc))
        .transpose()?;
    let gmap = GMap::from_parts([doc.alpha0, doc.alpha1, doc.alpha2], &doc.removed, &doc.redirects)?;
    let mut attrs = Attributes::new(labels, cc.as_ref(), n, false)?;
    attrs.weights = doc.weights;
    attrs.distances = doc.distances;
    attrs.dt_connected_components_labels = if doc.dt_components.is_empty() {
        vec![NO_LABEL; n]
    } else {
        doc.dt_components
    };
    if !doc.polylines.is_empty() {
        attrs.polylines = doc.polylines;
    }
    Ok(PixelMap {
        gmap,
        n_rows: doc.n_rows,
        n_cols: doc.n_cols,
        bounded: doc.bounded,
        attrs,
    })
}

fn check_polylines(polylines: &[Polyline]) -> Result<(), GmapError> {
    let mut total = 0usize;
    for (d, line) in polylines.iter().enumerate() {
        if line.len() > limits::MAX_POLYLINE_POINTS_PER_DART {
            return Err(GmapError::Format(format!(
                "polyline of dart {d} has more than {} points",
                limits::MAX_POLYLINE_POINTS_PER_DART
            )));
        }
        total += line.len();
        if total > limits::MAX_POLYLINE_POINTS_TOTAL {
            return Err(GmapError::Format(format!(
                "polylines exceed {} points",
                limits::MAX_POLYLINE_POINTS_TOTAL
            )));
        }
        if line.iter().any(|p| !limits::in_coord_bounds(p.x) || !limits::in_coord_bounds(p.y)) {
            return Err(GmapError::Format(format!("polyline of dart {d} out of bounds")));
        }
    }
    Ok(())
}
