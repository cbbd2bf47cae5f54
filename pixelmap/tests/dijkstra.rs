use pixelmap::{reduction_rng, Accumulation, GmapError, PixelMap, Propagation, Raster};

fn labels() -> Raster<i32> {
    Raster::from_rows(vec![
        vec![0, 255, 255, 255, 255, 255],
        vec![255, 255, 195, 195, 255, 255],
        vec![255, 255, 195, 195, 255, 0],
        vec![255, 255, 255, 255, 255, 255],
    ])
    .unwrap()
}

#[test]
fn unit_weights_match_the_wave_for_every_accumulation() {
    for accumulation in Accumulation::ALL {
        let p = Propagation::new(accumulation).with_seed_labels(&[0]).with_propagation_labels(&[255]);
        let mut wave = PixelMap::from_labels(&labels()).unwrap();
        let mut dijkstra = PixelMap::from_labels(&labels()).unwrap();
        wave.generalized_wave_propagation(&p).unwrap();
        dijkstra.generalized_dijkstra(&p, None).unwrap();
        assert_eq!(dijkstra.distances(), wave.distances(), "{accumulation}");
    }
}

#[test]
fn unit_weights_match_the_wave_on_a_reduced_map() {
    let p = Propagation::new(Accumulation::Face).with_seed_labels(&[0]).with_propagation_labels(&[255]);
    let mut wave = PixelMap::from_labels(&labels()).unwrap();
    wave.remove_edges(&mut reduction_rng(7), 0.5).unwrap();
    wave.remove_vertices().unwrap();
    let mut dijkstra = wave.clone();
    wave.generalized_wave_propagation(&p).unwrap();
    dijkstra.set_weights(vec![1; dijkstra.n_darts()]).unwrap();
    dijkstra.generalized_dijkstra(&p, None).unwrap();
    assert_eq!(dijkstra.distances(), wave.distances());
}

#[test]
fn cost_function_scales_distances() {
    let p = Propagation::new(Accumulation::Face).with_seed_labels(&[0]).with_propagation_labels(&[255, 195]);
    let mut wave = PixelMap::from_labels(&labels()).unwrap();
    let mut dijkstra = PixelMap::from_labels(&labels()).unwrap();
    wave.generalized_wave_propagation(&p).unwrap();
    let triple: &dyn Fn(u32) -> i64 = &|_| 3;
    dijkstra.generalized_dijkstra(&p, Some(triple)).unwrap();
    for (w, d) in wave.distances().iter().zip(dijkstra.distances()) {
        if *w >= 0 {
            assert_eq!(*d, 3 * w);
        } else {
            assert_eq!(d, w);
        }
    }
}

#[test]
fn zero_weight_region_is_crossed_for_free() {
    let labels = Raster::from_rows(vec![vec![0, 1, 1, 1, 1]]).unwrap();
    let mut m = PixelMap::from_labels(&labels).unwrap();
    for d in 8..24 {
        m.set_weight(d, 0).unwrap();
    }
    let p = Propagation::new(Accumulation::Face).with_seed_labels(&[0]);
    m.generalized_dijkstra(&p, None).unwrap();
    let per_pixel: Vec<i64> = m.distances().chunks(8).map(|c| c[0]).collect();
    assert_eq!(per_pixel, vec![0, 0, 0, 1, 2]);
    assert!(m.dt_connected_components_labels().iter().all(|&l| l == 0));
}

#[test]
fn negative_weight_is_rejected_without_touching_distances() {
    let mut m = PixelMap::from_labels(&labels()).unwrap();
    let p = Propagation::new(Accumulation::Face).with_seed_labels(&[0]);
    m.generalized_dijkstra(&p, None).unwrap();
    let before = m.distances().to_vec();
    m.set_weight(20, -1).unwrap();
    let err = m.generalized_dijkstra(&p, None).unwrap_err();
    assert!(matches!(err, GmapError::NegativeWeight { dart: 20, weight: -1 }));
    assert_eq!(m.distances(), &before[..]);
}
