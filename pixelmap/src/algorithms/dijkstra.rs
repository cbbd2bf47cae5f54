use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::debug;

use crate::algorithms::propagation::{prepare, validate_seeds, Propagation};
use crate::error::GmapError;
use crate::model::{Dart, Label, NO_LABEL, UNREACHED};
use crate::PixelMap;

/// Per-dart cost of entering a dart through an accumulating involution.
pub type CostFn<'a> = &'a dyn Fn(Dart) -> i64;

/// Weighted propagation. Entering a dart through an accumulating involution
/// costs that dart's weight (or `cost(dart)`), zero-cost generators add
/// nothing. Equal costs pop in insertion order.
pub(crate) fn generalized_dijkstra_impl(
    map: &mut PixelMap,
    p: &Propagation,
    cost: Option<CostFn>,
) -> Result<(), GmapError> {
    let PixelMap { gmap, attrs, .. } = map;
    validate_seeds(gmap, p)?;
    let mut costs = vec![0i64; gmap.n_darts()];
    for d in gmap.darts() {
        let w = match cost {
            Some(f) => f(d),
            None => attrs.weights[d as usize],
        };
        if w < 0 {
            return Err(GmapError::NegativeWeight { dart: d, weight: w });
        }
        costs[d as usize] = w;
    }
    let seeds = prepare(gmap, attrs, p)?;
    let accumulating = p.accumulation.accumulating();

    let n = gmap.n_darts();
    let mut best = vec![i64::MAX; n];
    let mut via: Vec<Label> = vec![NO_LABEL; n];
    let mut heap = BinaryHeap::new();
    let mut seq: u64 = 0;
    for s in seeds {
        let k = s as usize;
        if attrs.distances[k] == UNREACHED && best[k] > 0 {
            best[k] = 0;
            via[k] = attrs.region_label(s);
            heap.push(Reverse((0i64, seq, s)));
            seq += 1;
        }
    }
    while let Some(Reverse((c, _, d))) = heap.pop() {
        let k = d as usize;
        if attrs.distances[k] != UNREACHED {
            continue;
        }
        attrs.distances[k] = c;
        attrs.dt_connected_components_labels[k] = via[k];
        for i in 0..3 {
            let e = gmap.ai(i, d);
            let ke = e as usize;
            if attrs.distances[ke] != UNREACHED {
                continue;
            }
            let step = if accumulating[i] { costs[ke] } else { 0 };
            let nc = c.saturating_add(step);
            if nc < best[ke] {
                best[ke] = nc;
                via[ke] = via[k];
                heap.push(Reverse((nc, seq, e)));
                seq += 1;
            }
        }
    }
    debug!("dijkstra({}): {seq} pushes", p.accumulation);
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::algorithms::propagation::Propagation;
    use crate::error::GmapError;
    use crate::model::Accumulation;
    use crate::PixelMap;

    #[test]
    fn heavy_pixel_is_routed_around() {
        let mut m = PixelMap::from_shape(2, 2, true, true).unwrap();
        for d in 8..16 {
            m.set_weight(d, 10).unwrap();
        }
        let seeds = [0];
        let p = Propagation::new(Accumulation::Face).with_seeds(&seeds);
        m.generalized_dijkstra(&p, None).unwrap();
        assert_eq!(m.distances()[24], 2);
        assert_eq!(m.distances()[8], 10);
    }

    #[test]
    fn negative_cost_is_rejected_before_mutation() {
        let mut m = PixelMap::from_shape(1, 2, true, true).unwrap();
        let before = m.distances().to_vec();
        let seeds = [0];
        let p = Propagation::new(Accumulation::Face).with_seeds(&seeds);
        let cost: &dyn Fn(u32) -> i64 = &|d| if d == 9 { -3 } else { 1 };
        let err = m.generalized_dijkstra(&p, Some(cost)).unwrap_err();
        assert!(matches!(err, GmapError::NegativeWeight { dart: 9, weight: -3 }));
        assert_eq!(m.distances(), &before[..]);
    }
}
