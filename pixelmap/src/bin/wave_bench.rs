use pixelmap::{reduction_rng, Accumulation, PixelMap, Raster};
use rand::Rng;
use std::time::Instant;

// Square binary image with background (0) pixels drawn at `seed_prob`.
fn random_image(size: usize, seed_prob: f64, seed: u64) -> Raster<i32> {
    let mut rng = reduction_rng(seed);
    let data = (0..size * size).map(|_| if rng.gen::<f64>() < seed_prob { 0 } else { 1 }).collect();
    Raster::from_vec(size, size, data).unwrap()
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut sizes = vec![32usize, 64, 128, 256];
    let mut seed_prob = 0.05f64;
    let mut seed = 42u64;
    let mut accumulation = Accumulation::Face;
    let mut assert_ms: Option<f64> = None;
    for a in &args[1..] {
        if let Some(val)=a.strip_prefix("--sizes=") { let v: Vec<usize> = val.split(',').filter_map(|s| s.parse().ok()).collect(); if !v.is_empty() { sizes=v; } }
        else if let Some(val)=a.strip_prefix("--seed-prob=") { if let Ok(v)=val.parse() { seed_prob=v; } }
        else if let Some(val)=a.strip_prefix("--seed=") { if let Ok(v)=val.parse() { seed=v; } }
        else if let Some(val)=a.strip_prefix("--accumulation=") { if let Ok(v)=val.parse() { accumulation=v; } }
        else if let Some(val)=a.strip_prefix("--assert-ms=") { if let Ok(v)=val.parse() { assert_ms=Some(v); } }
    }

    let mut worst_ms = 0.0f64;
    for &size in &sizes {
        let image = random_image(size, seed_prob, seed);
        let t_build = Instant::now();
        let mut map = PixelMap::from_labels_with(&image, None, false).unwrap();
        let build_ms = t_build.elapsed().as_secs_f64() * 1000.0;

        let t0 = Instant::now();
        map.wave_propagation(None, accumulation).unwrap();
        let wave_ms = t0.elapsed().as_secs_f64() * 1000.0;
        let reached = map.distances().iter().filter(|&&d| d >= 0).count();
        let max_dt = map.distances().iter().copied().max().unwrap_or(-1);
        worst_ms = worst_ms.max(wave_ms);
        println!("size={} darts={} accumulation={} reached={} max_dt={} build_ms={:.3} wave_ms={:.3}", size, map.n_darts(), accumulation, reached, max_dt, build_ms, wave_ms);
    }
    if let Some(th) = assert_ms { if worst_ms > th { eprintln!("FAIL: wave {:.3} ms > threshold {:.3} ms", worst_ms, th); std::process::exit(1); } }
}
