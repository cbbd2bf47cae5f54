use std::collections::VecDeque;

use log::debug;

use crate::algorithms::propagation::{prepare, Propagation};
use crate::error::GmapError;
use crate::model::{Accumulation, Dart, Label, NO_LABEL, UNREACHED};
use crate::PixelMap;

const NONE: u32 = u32::MAX;

/// Eligible darts grouped by the vertex they share, restricted to darts the
/// wave may enter. Stored as compressed rows: `members[starts[c]..starts[c+1]]`.
struct VertexComponents {
    of_dart: Vec<u32>,
    members: Vec<Dart>,
    starts: Vec<usize>,
}

impl VertexComponents {
    fn build(map: &PixelMap) -> Self {
        let (gmap, distances) = (&map.gmap, &map.attrs.distances);
        let n = gmap.n_darts();
        let eligible = |d: Dart| !gmap.removed[d as usize] && distances[d as usize] == UNREACHED;
        let mut of_dart = vec![NONE; n];
        let mut members = Vec::new();
        let mut starts = vec![0];
        for d in 0..n as Dart {
            if of_dart[d as usize] != NONE || !eligible(d) {
                continue;
            }
            let c = (starts.len() - 1) as u32;
            let mut k = members.len();
            of_dart[d as usize] = c;
            members.push(d);
            while k < members.len() {
                let x = members[k];
                k += 1;
                for y in [gmap.a1(x), gmap.a2(x)] {
                    if of_dart[y as usize] == NONE && eligible(y) {
                        of_dart[y as usize] = c;
                        members.push(y);
                    }
                }
            }
            starts.push(members.len());
        }
        VertexComponents { of_dart, members, starts }
    }

    fn len(&self) -> usize {
        self.starts.len() - 1
    }

    fn members(&self, c: u32) -> &[Dart] {
        &self.members[self.starts[c as usize]..self.starts[c as usize + 1]]
    }
}

/// Vertex-accumulation wave run over whole vertices instead of darts.
/// Distances match the dart-level wave with [`Accumulation::Vertex`].
pub(crate) fn improved_wave_propagation_vertex_impl(map: &mut PixelMap, p: &Propagation) -> Result<(), GmapError> {
    if p.accumulation != Accumulation::Vertex {
        return Err(GmapError::UnsupportedAccumulation(p.accumulation.to_string()));
    }
    let seeds = prepare(&map.gmap, &mut map.attrs, p)?;
    let comps = VertexComponents::build(map);
    debug!("vertex wave: {} components", comps.len());

    let mut level = vec![UNREACHED; comps.len()];
    let mut origin: Vec<Label> = vec![NO_LABEL; comps.len()];
    let mut queue = VecDeque::new();
    for s in seeds {
        let c = comps.of_dart[s as usize];
        if c != NONE && level[c as usize] == UNREACHED {
            level[c as usize] = 0;
            origin[c as usize] = map.attrs.region_label(s);
            queue.push_back(c);
        }
    }
    while let Some(c) = queue.pop_front() {
        for &x in comps.members(c) {
            let ce = comps.of_dart[map.gmap.a0(x) as usize];
            if ce != NONE && level[ce as usize] == UNREACHED {
                level[ce as usize] = level[c as usize] + 1;
                origin[ce as usize] = origin[c as usize];
                queue.push_back(ce);
            }
        }
    }
    for c in 0..comps.len() as u32 {
        if level[c as usize] == UNREACHED {
            continue;
        }
        for &x in comps.members(c) {
            map.attrs.distances[x as usize] = level[c as usize];
            map.attrs.dt_connected_components_labels[x as usize] = origin[c as usize];
        }
    }
    Ok(())
}
