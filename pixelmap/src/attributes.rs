use crate::error::GmapError;
use crate::model::{Dart, Label, Vec2, DARTS_PER_PIXEL, NO_LABEL, OUTER_LABEL, UNREACHED};
use crate::raster::Raster;

pub type Polyline = Vec<Vec2>;

const H: f32 = 0.475;

/// Boundary segment drawn by each local dart of pixel (0, 0), in (x=col, y=row)
/// units. Each segment runs from the pixel corner to the midpoint of its side.
pub const DART_POLYLINES_00: [[(f32, f32); 2]; 8] = [
    [(-H, -H), (0.0, -H)],
    [(H, -H), (0.0, -H)],
    [(H, -H), (H, 0.0)],
    [(H, H), (H, 0.0)],
    [(H, H), (0.0, H)],
    [(-H, H), (0.0, H)],
    [(-H, H), (-H, 0.0)],
    [(-H, -H), (-H, 0.0)],
];

/// Per-dart attribute arrays, parallel to the dart id space.
#[derive(Clone, Debug, PartialEq)]
pub struct Attributes {
    pub(crate) labels: Raster<Label>,
    pub(crate) image_labels: Vec<Label>,
    pub(crate) connected_components_labels: Option<Vec<Label>>,
    pub(crate) dt_connected_components_labels: Vec<Label>,
    pub(crate) weights: Vec<i64>,
    pub(crate) distances: Vec<i64>,
    pub(crate) polylines: Vec<Polyline>,
}

impl Attributes {
    pub(crate) fn new(
        labels: Raster<Label>,
        connected_components: Option<&Raster<Label>>,
        n_darts: usize,
        add_polyline: bool,
    ) -> Result<Self, GmapError> {
        if let Some(cc) = connected_components {
            if cc.shape() != labels.shape() {
                return Err(GmapError::SizeMismatch {
                    expected: labels.data().len(),
                    actual: cc.data().len(),
                });
            }
        }
        let image_labels = replicate(labels.data(), n_darts);
        let connected_components_labels = connected_components.map(|cc| replicate(cc.data(), n_darts));
        let polylines = if add_polyline {
            pixel_polylines(labels.cols(), labels.data().len(), n_darts)
        } else {
            vec![Vec::new(); n_darts]
        };
        Ok(Attributes {
            labels,
            image_labels,
            connected_components_labels,
            dt_connected_components_labels: vec![NO_LABEL; n_darts],
            weights: vec![1; n_darts],
            distances: vec![UNREACHED; n_darts],
            polylines,
        })
    }

    /// Connected component label if present, else the image label.
    pub(crate) fn region_label(&self, d: Dart) -> Label {
        match &self.connected_components_labels {
            Some(cc) => cc[d as usize],
            None => self.image_labels[d as usize],
        }
    }
}

// Pixel values copied onto the 8 darts of each pixel; ring darts get OUTER_LABEL.
fn replicate(per_pixel: &[Label], n_darts: usize) -> Vec<Label> {
    let mut out = Vec::with_capacity(n_darts);
    for &v in per_pixel {
        out.extend(std::iter::repeat(v).take(DARTS_PER_PIXEL as usize));
    }
    out.resize(n_darts, OUTER_LABEL);
    out
}

fn pixel_polylines(cols: usize, n_pixels: usize, n_darts: usize) -> Vec<Polyline> {
    let mut out = Vec::with_capacity(n_darts);
    for p in 0..n_pixels {
        let (x, y) = ((p % cols) as f32, (p / cols) as f32);
        out.extend(DART_POLYLINES_00.iter().map(|seg| {
            seg.iter().map(|&(dx, dy)| Vec2 { x: x + dx, y: y + dy }).collect::<Polyline>()
        }));
    }
    out.resize(n_darts, Vec::new());
    out
}
