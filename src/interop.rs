use js_sys::{Float32Array, Float64Array, Int32Array, Uint32Array};

pub fn arr_i32(slice: &[i32]) -> Int32Array {
    let arr = Int32Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice); arr
}
pub fn arr_u32(slice: &[u32]) -> Uint32Array {
    let arr = Uint32Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice); arr
}
// Distances and weights fit f64 exactly for any grid a browser can hold
pub fn arr_i64_as_f64(slice: &[i64]) -> Float64Array {
    let tmp: Vec<f64> = slice.iter().map(|&v| v as f64).collect();
    let arr = Float64Array::new_with_length(tmp.len() as u32);
    arr.copy_from(&tmp); arr
}
/// Flattened `[x0, y0, x1, y1, ...]` points of one polyline.
pub fn arr_points(points: &[pixelmap::Vec2]) -> Float32Array {
    let flat: Vec<f32> = points.iter().flat_map(|p| [p.x, p.y]).collect();
    let arr = Float32Array::new_with_length(flat.len() as u32);
    arr.copy_from(&flat); arr
}
