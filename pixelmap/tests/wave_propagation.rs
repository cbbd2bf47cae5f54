use pixelmap::{wave_propagation_dt_image, Accumulation, PixelMap, Propagation, Raster, EXCLUDED, UNREACHED};

fn binary_image_1() -> Raster<i32> {
    Raster::from_rows(vec![
        vec![1, 1, 1, 1, 0],
        vec![1, 1, 1, 0, 1],
        vec![0, 1, 1, 1, 1],
        vec![1, 1, 1, 1, 1],
        vec![1, 1, 1, 1, 1],
    ])
    .unwrap()
}

fn two_region_labels() -> Raster<i32> {
    Raster::from_rows(vec![
        vec![9, 9, 9, 9, 9],
        vec![9, 0, 0, 5, 5],
        vec![9, 0, 5, 5, 5],
        vec![9, 5, 5, 7, 5],
        vec![9, 5, 5, 5, 5],
    ])
    .unwrap()
}

#[test]
fn binary_image_city_block_distances() {
    let dt = wave_propagation_dt_image(&binary_image_1(), None).unwrap();
    assert_eq!(
        dt.to_rows(),
        vec![
            vec![2, 3, 2, 1, 0],
            vec![1, 2, 1, 0, 1],
            vec![0, 1, 2, 1, 2],
            vec![1, 2, 3, 2, 3],
            vec![2, 3, 4, 3, 4],
        ]
    );
}

#[test]
fn dart_accumulation_on_2x2_grid() {
    let mut m = PixelMap::from_shape(2, 2, true, true).unwrap();
    assert_eq!(m.n_darts(), 32);
    m.wave_propagation(Some(&[2, 4, 7]), Accumulation::Dart).unwrap();
    let expected: Vec<i64> = vec![
        1, 1, 0, 1, 0, 1, 1, 0, //
        2, 3, 4, 5, 4, 3, 2, 1, //
        2, 1, 2, 3, 4, 5, 4, 3, //
        4, 5, 6, 7, 6, 5, 4, 3,
    ];
    assert_eq!(m.distances(), &expected[..]);
}

#[test]
fn vertex_accumulation_on_2x2_grid() {
    let mut m = PixelMap::from_shape(2, 2, true, true).unwrap();
    m.wave_propagation(Some(&[0, 7]), Accumulation::Vertex).unwrap();
    let expected: Vec<i64> = vec![
        0, 1, 1, 2, 2, 1, 1, 0, //
        1, 2, 2, 3, 3, 2, 2, 1, //
        1, 2, 2, 3, 3, 2, 2, 1, //
        2, 3, 3, 4, 4, 3, 3, 2,
    ];
    assert_eq!(m.distances(), &expected[..]);
}

#[test]
fn face_accumulation_on_2x2_grid() {
    let mut m = PixelMap::from_shape(2, 2, true, true).unwrap();
    let seeds: Vec<u32> = (0..8).collect();
    m.wave_propagation(Some(&seeds), Accumulation::Face).unwrap();
    let per_pixel: Vec<i64> = m.distances().chunks(8).map(|c| {
        assert!(c.iter().all(|&v| v == c[0]));
        c[0]
    }).collect();
    assert_eq!(per_pixel, vec![0, 1, 1, 2]);
}

#[test]
fn corner_seed_on_unbounded_grid_reaches_the_outer_face() {
    let mut m = PixelMap::from_shape(2, 2, true, false).unwrap();
    m.wave_propagation(Some(&[7]), Accumulation::Face).unwrap();
    assert!(m.distances()[..32].iter().all(|&v| v >= 0));
    // the outer face is one step from every rim pixel
    assert!(m.distances()[32..].iter().all(|&v| v == 1));
}

#[test]
fn generalized_wave_respects_label_sets() {
    let labels = two_region_labels();
    let mut m = PixelMap::from_labels(&labels).unwrap();
    let p = Propagation::new(Accumulation::Face).with_seed_labels(&[0]).with_propagation_labels(&[5]);
    m.generalized_wave_propagation(&p).unwrap();
    let dt = m.build_dt_image(&[0, 5], true);
    assert_eq!(
        dt.to_rows(),
        vec![
            vec![-2, -2, -2, -2, -2],
            vec![-2, 0, 0, 1, 2],
            vec![-2, 0, 1, 2, 3],
            vec![-2, 1, 2, -2, 4],
            vec![-2, 2, 3, 4, 5],
        ]
    );
    assert_eq!(m.distances()[0], EXCLUDED);
    let voronoi = m.build_voronoi_image(&[5]);
    assert_eq!(voronoi.get(4, 4), 0);
    assert_eq!(voronoi.get(1, 1), -1);
}

#[test]
fn unreached_darts_stay_unreached() {
    let labels = Raster::from_rows(vec![vec![0, 3, 5]]).unwrap();
    let mut m = PixelMap::from_labels(&labels).unwrap();
    let p = Propagation::new(Accumulation::Face).with_seed_labels(&[0]).with_propagation_labels(&[5]);
    m.generalized_wave_propagation(&p).unwrap();
    assert_eq!(m.distances()[8], EXCLUDED);
    assert_eq!(m.distances()[16], UNREACHED);
    assert_eq!(m.build_dt_image(&[5], true).data(), &[-2, -2, -2]);
}

#[test]
fn improved_vertex_wave_matches_generalized_wave() {
    let labels = two_region_labels();
    let p = Propagation::new(Accumulation::Vertex).with_seed_labels(&[0]).with_propagation_labels(&[5]);

    let mut expected = PixelMap::from_labels(&labels).unwrap();
    expected.generalized_wave_propagation(&p).unwrap();
    let mut actual = PixelMap::from_labels(&labels).unwrap();
    actual.improved_wave_propagation_gmap_vertex(&p).unwrap();
    assert_eq!(actual.distances(), expected.distances());

    let mut rng = pixelmap::reduction_rng(42);
    let mut expected = PixelMap::from_labels(&labels).unwrap();
    expected.remove_edges(&mut rng, 1.0).unwrap();
    expected.remove_vertices().unwrap();
    let mut actual = expected.clone();
    expected.generalized_wave_propagation(&p).unwrap();
    actual.improved_wave_propagation_gmap_vertex(&p).unwrap();
    assert_eq!(actual.distances(), expected.distances());
}

#[test]
fn rebuilding_from_the_same_labels_gives_the_same_distances() {
    let labels = two_region_labels();
    let p = Propagation::new(Accumulation::VertexFace).with_seed_labels(&[0]).with_propagation_labels(&[5, 7]);
    let mut a = PixelMap::from_labels(&labels).unwrap();
    let mut b = PixelMap::from_labels(&labels).unwrap();
    a.generalized_wave_propagation(&p).unwrap();
    b.generalized_wave_propagation(&p).unwrap();
    assert_eq!(a.distances(), b.distances());
    a.generalized_wave_propagation(&p).unwrap();
    assert_eq!(a.distances(), b.distances());
}
