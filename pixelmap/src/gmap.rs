use std::collections::{HashSet, VecDeque};

use crate::error::GmapError;
use crate::model::Dart;

/// Generators of the orbit forming an i-cell: vertex, edge, face.
pub const CELL_GENERATORS: [[usize; 2]; 3] = [[1, 2], [0, 2], [0, 1]];

/// 2-gMap stored as three dense involution arrays indexed by dart id.
///
/// Darts are never deallocated. A removed dart becomes a fixed point of every
/// involution and keeps, in `redirect`, the dart that was live next to it in
/// the merged cell when it was removed. Following redirects always ends on a
/// live dart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GMap {
    pub(crate) alphas: [Vec<Dart>; 3],
    pub(crate) removed: Vec<bool>,
    pub(crate) redirect: Vec<Dart>,
}

impl GMap {
    pub fn from_alphas(alphas: [Vec<Dart>; 3]) -> Result<Self, GmapError> {
        Self::from_parts(alphas, &[], &[])
    }

    /// Rebuilds a map from involution arrays, removed darts and their redirects.
    pub fn from_parts(
        alphas: [Vec<Dart>; 3],
        removed: &[Dart],
        redirects: &[(Dart, Dart)],
    ) -> Result<Self, GmapError> {
        let n = alphas[0].len();
        if !crate::limits::in_dart_bounds(n) {
            return Err(GmapError::TooLarge { n_darts: n });
        }
        for a in &alphas[1..] {
            if a.len() != n {
                return Err(GmapError::SizeMismatch { expected: n, actual: a.len() });
            }
        }
        for (i, a) in alphas.iter().enumerate() {
            if let Some((d, e)) = a.iter().enumerate().find(|(_, &e)| e as usize >= n) {
                return Err(GmapError::Format(format!("alpha{i}({d}) = {e} out of range")));
            }
        }
        let mut g = GMap {
            alphas,
            removed: vec![false; n],
            redirect: (0..n as Dart).collect(),
        };
        for &d in removed {
            if d as usize >= n {
                return Err(GmapError::DartOutOfRange { dart: d, n_darts: n });
            }
            g.removed[d as usize] = true;
        }
        for &(d, t) in redirects {
            if d as usize >= n || t as usize >= n {
                return Err(GmapError::Format(format!("redirect {d} -> {t} out of range")));
            }
            if !g.removed[d as usize] {
                return Err(GmapError::Format(format!("redirect recorded for live dart {d}")));
            }
            g.redirect[d as usize] = t;
        }
        if let Some(msg) = g.first_violation() {
            return Err(GmapError::Format(msg));
        }
        Ok(g)
    }

    pub fn n_darts(&self) -> usize {
        self.removed.len()
    }

    pub fn n_live_darts(&self) -> usize {
        self.removed.iter().filter(|r| !**r).count()
    }

    pub fn is_live(&self, d: Dart) -> bool {
        (d as usize) < self.n_darts() && !self.removed[d as usize]
    }

    /// Live darts in ascending id order.
    pub fn darts(&self) -> impl Iterator<Item = Dart> + '_ {
        (0..self.n_darts() as Dart).filter(move |&d| !self.removed[d as usize])
    }

    pub fn removed_darts(&self) -> impl Iterator<Item = Dart> + '_ {
        (0..self.n_darts() as Dart).filter(move |&d| self.removed[d as usize])
    }

    pub(crate) fn check_dart(&self, d: Dart) -> Result<(), GmapError> {
        if d as usize >= self.n_darts() {
            return Err(GmapError::DartOutOfRange { dart: d, n_darts: self.n_darts() });
        }
        if self.removed[d as usize] {
            return Err(GmapError::RemovedDart(d));
        }
        Ok(())
    }

    pub fn alpha(&self, i: usize, d: Dart) -> Result<Dart, GmapError> {
        if i > 2 {
            return Err(GmapError::InvalidInvolution(i));
        }
        self.check_dart(d)?;
        Ok(self.ai(i, d))
    }

    #[inline]
    pub(crate) fn ai(&self, i: usize, d: Dart) -> Dart {
        self.alphas[i][d as usize]
    }

    #[inline]
    pub(crate) fn a0(&self, d: Dart) -> Dart {
        self.alphas[0][d as usize]
    }

    #[inline]
    pub(crate) fn a1(&self, d: Dart) -> Dart {
        self.alphas[1][d as usize]
    }

    #[inline]
    pub(crate) fn a2(&self, d: Dart) -> Dart {
        self.alphas[2][d as usize]
    }

    pub fn alpha_array(&self, i: usize) -> Result<&[Dart], GmapError> {
        self.alphas.get(i).map(Vec::as_slice).ok_or(GmapError::InvalidInvolution(i))
    }

    /// Closure of `d` under the given involutions, in discovery order.
    ///
    /// Two-generator orbits are returned as the walk alternating both
    /// generators, so a face comes back in boundary order.
    pub fn orbit(&self, generators: &[usize], d: Dart) -> Result<Vec<Dart>, GmapError> {
        if let Some(&i) = generators.iter().find(|&&i| i > 2) {
            return Err(GmapError::InvalidInvolution(i));
        }
        self.check_dart(d)?;
        Ok(self.orbit_unchecked(generators, d))
    }

    pub(crate) fn orbit_unchecked(&self, generators: &[usize], d: Dart) -> Vec<Dart> {
        match *generators {
            [a, b] if a != b => self.alternating_orbit(a, b, d),
            _ => {
                let mut seen = HashSet::from([d]);
                let mut out = vec![d];
                let mut queue = VecDeque::from([d]);
                while let Some(x) = queue.pop_front() {
                    for &i in generators {
                        let y = self.ai(i, x);
                        if seen.insert(y) {
                            out.push(y);
                            queue.push_back(y);
                        }
                    }
                }
                out
            }
        }
    }

    fn alternating_orbit(&self, a: usize, b: usize, d: Dart) -> Vec<Dart> {
        let mut out = vec![d];
        let (mut cur, mut gen) = (d, a);
        loop {
            let next = self.ai(gen, cur);
            if next == d {
                return out;
            }
            if next == cur {
                break;
            }
            out.push(next);
            cur = next;
            gen = if gen == a { b } else { a };
        }
        // open chain: collect the part behind `d` too
        let mut back = Vec::new();
        let (mut cur, mut gen) = (d, b);
        loop {
            let next = self.ai(gen, cur);
            if next == cur {
                break;
            }
            back.push(next);
            cur = next;
            gen = if gen == a { b } else { a };
        }
        back.reverse();
        back.extend(out);
        back
    }

    pub(crate) fn cell_darts(&self, i: usize, d: Dart) -> Vec<Dart> {
        self.orbit_unchecked(&CELL_GENERATORS[i], d)
    }

    pub fn cell(&self, i: usize, d: Dart) -> Result<Vec<Dart>, GmapError> {
        let generators = CELL_GENERATORS.get(i).ok_or(GmapError::UnsupportedDimension(i))?;
        self.orbit(generators, d)
    }

    pub fn cell_0(&self, d: Dart) -> Result<Vec<Dart>, GmapError> {
        self.cell(0, d)
    }

    pub fn cell_1(&self, d: Dart) -> Result<Vec<Dart>, GmapError> {
        self.cell(1, d)
    }

    pub fn cell_2(&self, d: Dart) -> Result<Vec<Dart>, GmapError> {
        self.cell(2, d)
    }

    /// One representative dart (the smallest live id) per i-cell, lazily.
    pub fn darts_of_i_cells(&self, i: usize) -> Result<CellRepresentatives<'_>, GmapError> {
        let generators = CELL_GENERATORS.get(i).ok_or(GmapError::UnsupportedDimension(i))?;
        Ok(CellRepresentatives {
            gmap: self,
            generators,
            visited: vec![false; self.n_darts()],
            next: 0,
        })
    }

    pub fn is_i_removable(&self, i: usize, d: Dart) -> Result<bool, GmapError> {
        self.check_dart(d)?;
        match i {
            0 => Ok(self.is_vertex_removable(d)),
            1 => Ok(self.is_edge_removable(d)),
            _ => Err(GmapError::UnsupportedDimension(i)),
        }
    }

    // Degree two, no loop on the vertex, α1 and α2 commute around it.
    fn is_vertex_removable(&self, d: Dart) -> bool {
        let vertex = self.cell_darts(0, d);
        vertex.iter().all(|&x| {
            !vertex.contains(&self.a0(x))
                && self.a1(x) != self.a2(x)
                && self.a1(self.a2(x)) == self.a2(self.a1(x))
        })
    }

    // Not on the boundary, and either dangling (but not isolated) or separating two faces.
    fn is_edge_removable(&self, d: Dart) -> bool {
        let edge = self.cell_darts(1, d);
        if edge.iter().any(|&x| self.a2(x) == x) {
            return false;
        }
        if edge.iter().any(|&x| edge.contains(&self.a1(x))) {
            return edge.iter().any(|&x| !edge.contains(&self.a1(x)));
        }
        !self.cell_darts(2, self.a2(d)).contains(&d)
    }

    /// Splices the i-cell of `d` out of the map and returns its darts.
    pub fn remove_i_cell(&mut self, i: usize, d: Dart) -> Result<Vec<Dart>, GmapError> {
        if !self.is_i_removable(i, d)? {
            return Err(GmapError::NotRemovable { dim: i, dart: d });
        }
        let cell = self.cell_darts(i, d);
        let j = i + 1;
        let mut relinks = Vec::with_capacity(cell.len());
        for &x in &cell {
            let y = self.ai(i, x);
            if cell.contains(&y) {
                continue;
            }
            let mut t = self.ai(j, x);
            let mut steps = 0;
            while cell.contains(&self.ai(i, t)) {
                t = self.ai(j, self.ai(i, t));
                steps += 1;
                assert!(steps <= cell.len(), "alpha{i}/alpha{j} walk from dart {x} never leaves the cell");
            }
            relinks.push((y, self.ai(i, t)));
        }
        let survivors: Vec<Dart> = cell.iter().map(|&x| self.survivor(i, x, &cell)).collect();
        for (y, z) in relinks {
            self.alphas[i][y as usize] = z;
        }
        for (&x, s) in cell.iter().zip(survivors) {
            let k = x as usize;
            self.removed[k] = true;
            self.redirect[k] = s;
            for a in self.alphas.iter_mut() {
                a[k] = x;
            }
        }
        Ok(cell)
    }

    // Live dart of the same face that stays after `x` is removed with `cell`.
    fn survivor(&self, i: usize, x: Dart, cell: &[Dart]) -> Dart {
        let candidates = match i {
            0 => [self.a0(x); 4],
            _ => {
                let y = self.a2(x);
                [self.a1(x), self.a1(self.a0(x)), self.a1(y), self.a1(self.a0(y))]
            }
        };
        match candidates.into_iter().find(|c| !cell.contains(c)) {
            Some(s) => s,
            None => panic!("{i}-cell at dart {x} has no neighbour outside itself"),
        }
    }

    /// Follows redirects from `d` to the live dart now standing for its cell.
    pub fn resolve(&self, d: Dart) -> Result<Dart, GmapError> {
        if d as usize >= self.n_darts() {
            return Err(GmapError::DartOutOfRange { dart: d, n_darts: self.n_darts() });
        }
        Ok(self.follow_redirects(d))
    }

    pub(crate) fn follow_redirects(&self, d: Dart) -> Dart {
        match self.try_follow_redirects(d) {
            Some(live) => live,
            None => panic!("redirect chain from dart {d} never reaches a live dart"),
        }
    }

    fn try_follow_redirects(&self, d: Dart) -> Option<Dart> {
        let mut cur = d;
        for _ in 0..=self.n_darts() {
            if !self.removed[cur as usize] {
                return Some(cur);
            }
            cur = self.redirect[cur as usize];
        }
        None
    }

    pub fn redirects(&self) -> impl Iterator<Item = (Dart, Dart)> + '_ {
        self.removed_darts().map(move |d| (d, self.redirect[d as usize]))
    }

    /// True when every involution is self-inverse over the live darts.
    pub fn is_valid(&self) -> bool {
        self.first_violation().is_none()
    }

    fn first_violation(&self) -> Option<String> {
        for d in 0..self.n_darts() as Dart {
            if self.removed[d as usize] {
                if (0..3).any(|i| self.ai(i, d) != d) {
                    return Some(format!("removed dart {d} is still linked"));
                }
                if self.try_follow_redirects(d).is_none() {
                    return Some(format!("redirect chain from dart {d} has no live end"));
                }
                continue;
            }
            for i in 0..3 {
                let e = self.ai(i, d);
                if self.removed[e as usize] || self.ai(i, e) != d {
                    return Some(format!("alpha{i} is not an involution at dart {d}"));
                }
            }
            if self.a0(d) == d || self.a1(d) == d {
                return Some(format!("dart {d} is a fixed point of alpha0 or alpha1"));
            }
        }
        None
    }
}

/// Lazy, finite, single-pass sequence of i-cell representatives.
pub struct CellRepresentatives<'a> {
    gmap: &'a GMap,
    generators: &'static [usize; 2],
    visited: Vec<bool>,
    next: usize,
}

impl Iterator for CellRepresentatives<'_> {
    type Item = Dart;

    fn next(&mut self) -> Option<Dart> {
        while self.next < self.gmap.n_darts() {
            let d = self.next as Dart;
            self.next += 1;
            if self.visited[d as usize] || self.gmap.removed[d as usize] {
                continue;
            }
            for x in self.gmap.orbit_unchecked(self.generators, d) {
                self.visited[x as usize] = true;
            }
            return Some(d);
        }
        None
    }
}
