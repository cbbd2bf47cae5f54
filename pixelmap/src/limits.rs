// Caps applied to grid construction and to untrusted map documents

// Dart ids are u32 and index dense arrays
pub const MAX_DARTS: usize = 1 << 30;

// Images handed out by the pyramid; each pixel becomes 8 darts in a window wave
pub const MAX_PIXELS: usize = MAX_DARTS / 8;

// Polylines grow by concatenation on vertex removal
pub const MAX_POLYLINE_POINTS_PER_DART: usize = 1 << 20;
pub const MAX_POLYLINE_POINTS_TOTAL: usize = 1 << 26;

// Polyline coordinates live in pixel units around the grid
pub const COORD_MIN: f32 = -10_000_000.0;
pub const COORD_MAX: f32 = 10_000_000.0;

pub const DOCUMENT_VERSION: u32 = 1;

#[inline]
pub fn in_dart_bounds(n: usize) -> bool { n <= MAX_DARTS }

#[inline]
pub fn in_pixel_bounds(rows: usize, cols: usize) -> bool { rows.checked_mul(cols).is_some_and(|n| n <= MAX_PIXELS) }

#[inline]
pub fn in_coord_bounds(x: f32) -> bool { x.is_finite() && (COORD_MIN..=COORD_MAX).contains(&x) }
