use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GmapError;

/// Dart id. For grid maps, `id = 8 * (row * n_cols + col) + local`.
pub type Dart = u32;
/// Pixel class carried by every dart of the pixel.
pub type Label = i32;

pub const DARTS_PER_PIXEL: u32 = 8;

/// Distance of a dart no propagation reached.
pub const UNREACHED: i64 = -1;
/// Distance of a dart whose label kept it out of propagation.
pub const EXCLUDED: i64 = -2;

/// Label of the synthesized darts of the outer boundary face.
pub const OUTER_LABEL: Label = Label::MIN;
/// Placeholder for "no label" in component and per-pixel outputs.
pub const NO_LABEL: Label = -1;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// Which involutions cost one step during propagation.
///
/// Generators that do not accumulate link darts of the same cell and are
/// crossed at zero cost, so every dart of e.g. a face receives the same value
/// under [`Accumulation::Face`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accumulation {
    /// Every involution is a step; each dart is its own cell.
    #[default]
    Dart = 0,
    Vertex = 1,
    Edge = 2,
    Face = 3,
    VertexEdge = 4,
    VertexFace = 5,
    EdgeFace = 6,
}

impl Accumulation {
    pub const ALL: [Accumulation; 7] = [
        Accumulation::Dart,
        Accumulation::Vertex,
        Accumulation::Edge,
        Accumulation::Face,
        Accumulation::VertexEdge,
        Accumulation::VertexFace,
        Accumulation::EdgeFace,
    ];

    /// `[α0, α1, α2]`, true where crossing the involution adds one step.
    pub fn accumulating(self) -> [bool; 3] {
        match self {
            Accumulation::Dart => [true, true, true],
            Accumulation::Vertex => [true, false, false],
            Accumulation::Edge => [false, true, false],
            Accumulation::Face => [false, false, true],
            Accumulation::VertexEdge => [true, true, false],
            Accumulation::VertexFace => [true, false, true],
            Accumulation::EdgeFace => [false, true, true],
        }
    }

    /// `[α0, α1, α2]`, true where the involution stays inside the cell.
    pub fn zero_cost(self) -> [bool; 3] {
        let [a0, a1, a2] = self.accumulating();
        [!a0, !a1, !a2]
    }

    pub fn from_mask(mask: [bool; 3]) -> Result<Self, GmapError> {
        Self::ALL
            .into_iter()
            .find(|a| a.accumulating() == mask)
            .ok_or_else(|| GmapError::UnsupportedAccumulation(format!("{mask:?}")))
    }

    pub fn name(self) -> &'static str {
        match self {
            Accumulation::Dart => "dart",
            Accumulation::Vertex => "vertex",
            Accumulation::Edge => "edge",
            Accumulation::Face => "face",
            Accumulation::VertexEdge => "vertex_edge",
            Accumulation::VertexFace => "vertex_face",
            Accumulation::EdgeFace => "edge_face",
        }
    }
}

impl TryFrom<u8> for Accumulation {
    type Error = GmapError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| GmapError::UnsupportedAccumulation(value.to_string()))
    }
}

impl FromStr for Accumulation {
    type Err = GmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['+', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|a| a.name() == key)
            .ok_or_else(|| GmapError::UnsupportedAccumulation(s.to_string()))
    }
}

impl fmt::Display for Accumulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulation_parses_names_and_codes() {
        assert_eq!("vertex+face".parse::<Accumulation>().unwrap(), Accumulation::VertexFace);
        assert_eq!("Face".parse::<Accumulation>().unwrap(), Accumulation::Face);
        assert_eq!(Accumulation::try_from(2).unwrap(), Accumulation::Edge);
        assert!(Accumulation::try_from(7).is_err());
        assert!("diagonal".parse::<Accumulation>().is_err());
    }

    #[test]
    fn mask_round_trips_and_rejects_empty() {
        for a in Accumulation::ALL {
            assert_eq!(Accumulation::from_mask(a.accumulating()).unwrap(), a);
        }
        assert!(Accumulation::from_mask([false, false, false]).is_err());
    }
}
