use log::debug;
use rand::Rng;
use serde::Serialize;

use crate::error::GmapError;
use crate::model::Dart;
use crate::PixelMap;

/// How an edge is treated by [`PixelMap::remove_edges`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeClass {
    /// On the rim of a bounded map; never removed.
    Boundary,
    /// Dart folded back onto itself around a vertex.
    DanglingDart,
    DanglingEdge,
    /// Both sides belong to the same face; never removed.
    Bridge,
    /// Separates pixels of the same class.
    LowContrast,
    Contrast,
}

impl EdgeClass {
    pub fn is_candidate(self) -> bool {
        matches!(self, EdgeClass::DanglingDart | EdgeClass::DanglingEdge | EdgeClass::LowContrast)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReductionReport {
    pub visited: usize,
    pub boundary: usize,
    pub bridges: usize,
    pub contrast: usize,
    pub candidates: usize,
    pub removed: usize,
    /// Candidates drawn for removal that failed the removability check.
    pub rejected: usize,
}

pub(crate) fn classify_edge(map: &PixelMap, d: Dart) -> EdgeClass {
    let g = &map.gmap;
    let e = g.a2(d);
    if d == e {
        EdgeClass::Boundary
    } else if d == g.a1(e) {
        EdgeClass::DanglingDart
    } else if d == g.a0(g.a1(g.a0(e))) {
        EdgeClass::DanglingEdge
    } else if g.cell_darts(2, e).contains(&d) {
        EdgeClass::Bridge
    } else if same_region(map, d, e) {
        EdgeClass::LowContrast
    } else {
        EdgeClass::Contrast
    }
}

fn same_region(map: &PixelMap, d: Dart, e: Dart) -> bool {
    let a = &map.attrs;
    let (d, e) = (d as usize, e as usize);
    a.image_labels[d] == a.image_labels[e]
        && a.connected_components_labels.as_ref().map_or(true, |cc| cc[d] == cc[e])
}

/// Removes each candidate edge with probability `factor`, one draw per
/// candidate in edge-representative order.
pub(crate) fn remove_edges_impl<R: Rng>(
    map: &mut PixelMap,
    rng: &mut R,
    factor: f64,
) -> Result<ReductionReport, GmapError> {
    if !(0.0..=1.0).contains(&factor) {
        return Err(GmapError::InvalidReductionFactor(factor));
    }
    let edges: Vec<Dart> = map.gmap.darts_of_i_cells(1)?.collect();
    let mut report = ReductionReport::default();
    for d in edges {
        if !map.gmap.is_live(d) {
            continue;
        }
        report.visited += 1;
        let class = classify_edge(map, d);
        match class {
            EdgeClass::Boundary => report.boundary += 1,
            EdgeClass::Bridge => report.bridges += 1,
            EdgeClass::Contrast => report.contrast += 1,
            _ => report.candidates += 1,
        }
        if !class.is_candidate() {
            debug!("edge {d}: {class:?}, kept");
            continue;
        }
        if rng.gen::<f64>() >= factor {
            continue;
        }
        match map.gmap.remove_i_cell(1, d) {
            Ok(_) => {
                debug!("edge {d}: {class:?}, removed");
                report.removed += 1;
            }
            Err(err) if err.is_structural() => {
                debug!("edge {d}: {class:?}, {err}");
                report.rejected += 1;
            }
            Err(err) => return Err(err),
        }
    }
    debug!("remove_edges(factor={factor}): {report:?}");
    Ok(report)
}

/// Removes a degree-two vertex, folding each removed dart's geometry and
/// weight onto its α0 partner.
pub(crate) fn remove_vertex_impl(map: &mut PixelMap, d: Dart) -> Result<(), GmapError> {
    if !map.gmap.is_i_removable(0, d)? {
        return Err(GmapError::NotRemovable { dim: 0, dart: d });
    }
    let attrs = &mut map.attrs;
    for x in map.gmap.cell_darts(0, d) {
        let (x, e) = (x as usize, map.gmap.a0(x) as usize);
        let mut tail = std::mem::take(&mut attrs.polylines[x]);
        tail.reverse();
        attrs.polylines[e].extend(tail);
        attrs.weights[e] = attrs.weights[e].saturating_add(attrs.weights[x]);
    }
    map.gmap.remove_i_cell(0, d)?;
    Ok(())
}

/// Tries every vertex present when the call starts; returns how many went.
pub(crate) fn remove_vertices_impl(map: &mut PixelMap) -> Result<usize, GmapError> {
    let vertices: Vec<Dart> = map.gmap.darts_of_i_cells(0)?.collect();
    let mut removed = 0;
    for d in vertices {
        if !map.gmap.is_live(d) {
            continue;
        }
        match remove_vertex_impl(map, d) {
            Ok(()) => {
                debug!("vertex {d} removed");
                removed += 1;
            }
            Err(err) if err.is_structural() => debug!("vertex {d} not removable"),
            Err(err) => return Err(err),
        }
    }
    debug!("remove_vertices: {removed} removed");
    Ok(removed)
}
