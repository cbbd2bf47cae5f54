use std::collections::VecDeque;

use log::debug;

use crate::attributes::Attributes;
use crate::error::GmapError;
use crate::gmap::GMap;
use crate::model::{Accumulation, Dart, Label, EXCLUDED, NO_LABEL, UNREACHED};
use crate::PixelMap;

/// Parameters shared by every propagation strategy.
#[derive(Clone, Copy, Debug, Default)]
pub struct Propagation<'a> {
    pub accumulation: Accumulation,
    /// Live darts carrying one of these labels start at distance 0.
    pub seed_labels: &'a [Label],
    /// Labels the wave may cross; `None` lets it cross every label.
    pub propagation_labels: Option<&'a [Label]>,
    /// Explicit seed darts; overrides `seed_labels` when present.
    pub seeds: Option<&'a [Dart]>,
}

impl<'a> Propagation<'a> {
    pub fn new(accumulation: Accumulation) -> Self {
        Propagation { accumulation, ..Default::default() }
    }

    pub fn with_seed_labels(mut self, labels: &'a [Label]) -> Self {
        self.seed_labels = labels;
        self
    }

    pub fn with_propagation_labels(mut self, labels: &'a [Label]) -> Self {
        self.propagation_labels = Some(labels);
        self
    }

    pub fn with_seeds(mut self, seeds: &'a [Dart]) -> Self {
        self.seeds = Some(seeds);
        self
    }

    fn is_eligible(&self, label: Label) -> bool {
        match self.propagation_labels {
            None => true,
            Some(allowed) => allowed.contains(&label) || self.seed_labels.contains(&label),
        }
    }
}

pub(crate) fn validate_seeds(gmap: &GMap, p: &Propagation) -> Result<(), GmapError> {
    for &s in p.seeds.unwrap_or_default() {
        gmap.check_dart(s)?;
    }
    Ok(())
}

/// Validates the seeds, then resets `distances` and the per-dart seed origin.
/// Returns the seeds in the order they enter the frontier.
pub(crate) fn prepare(gmap: &GMap, attrs: &mut Attributes, p: &Propagation) -> Result<Vec<Dart>, GmapError> {
    validate_seeds(gmap, p)?;
    for d in 0..gmap.n_darts() {
        attrs.distances[d] = if gmap.removed[d] || p.is_eligible(attrs.image_labels[d]) {
            UNREACHED
        } else {
            EXCLUDED
        };
    }
    attrs.dt_connected_components_labels.fill(NO_LABEL);
    let seeds: Vec<Dart> = match p.seeds {
        Some(seeds) => seeds.to_vec(),
        None => gmap
            .darts()
            .filter(|&d| p.seed_labels.contains(&attrs.image_labels[d as usize]))
            .collect(),
    };
    for &s in &seeds {
        attrs.distances[s as usize] = UNREACHED;
    }
    Ok(seeds)
}

/// Breadth-first wave: one accumulating hop costs 1, zero-cost generators are
/// flooded so a whole cell settles at once.
pub(crate) fn wave_propagation_impl(map: &mut PixelMap, p: &Propagation) -> Result<(), GmapError> {
    let PixelMap { gmap, attrs, .. } = map;
    let seeds = prepare(gmap, attrs, p)?;
    let accumulating = p.accumulation.accumulating();
    let zero_cost = p.accumulation.zero_cost();

    debug!("wave({}): {} seeds", p.accumulation, seeds.len());
    let mut queue = VecDeque::new();
    for s in seeds {
        if attrs.distances[s as usize] == UNREACHED {
            let origin = attrs.region_label(s);
            settle_cell(gmap, attrs, &zero_cost, s, 0, origin, &mut queue);
        }
    }
    while let Some(d) = queue.pop_front() {
        let next = attrs.distances[d as usize] + 1;
        let origin = attrs.dt_connected_components_labels[d as usize];
        for i in (0..3).filter(|&i| accumulating[i]) {
            let e = gmap.ai(i, d);
            if attrs.distances[e as usize] == UNREACHED {
                settle_cell(gmap, attrs, &zero_cost, e, next, origin, &mut queue);
            }
        }
    }
    Ok(())
}

// Assigns `value` to `d` and to every unreached dart joined to it by zero-cost
// generators. The queue doubles as the closure worklist.
fn settle_cell(
    gmap: &GMap,
    attrs: &mut Attributes,
    zero_cost: &[bool; 3],
    d: Dart,
    value: i64,
    origin: Label,
    queue: &mut VecDeque<Dart>,
) {
    let mut k = queue.len();
    attrs.distances[d as usize] = value;
    attrs.dt_connected_components_labels[d as usize] = origin;
    queue.push_back(d);
    while k < queue.len() {
        let x = queue[k];
        k += 1;
        for i in (0..3).filter(|&i| zero_cost[i]) {
            let y = gmap.ai(i, x);
            if attrs.distances[y as usize] == UNREACHED {
                attrs.distances[y as usize] = value;
                attrs.dt_connected_components_labels[y as usize] = origin;
                queue.push_back(y);
            }
        }
    }
}
