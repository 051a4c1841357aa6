use lassoplot::geometry::{point_in_polygon, LinearScale};

const SQUARE: [[f64; 2]; 4] = [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]];

#[test]
fn square_contains_interior_points_only() {
    assert!(point_in_polygon([5.0, 5.0], &SQUARE));
    assert!(point_in_polygon([0.5, 9.5], &SQUARE));
    assert!(!point_in_polygon([15.0, 5.0], &SQUARE));
    assert!(!point_in_polygon([5.0, -0.1], &SQUARE));
}

#[test]
fn boundary_and_vertices_are_outside() {
    assert!(!point_in_polygon([10.0, 5.0], &SQUARE));
    assert!(!point_in_polygon([5.0, 0.0], &SQUARE));
    assert!(!point_in_polygon([0.0, 0.0], &SQUARE));
    assert!(!point_in_polygon([10.0, 10.0], &SQUARE));
}

#[test]
fn closing_vertex_is_optional() {
    let mut closed = SQUARE.to_vec();
    closed.push(SQUARE[0]);
    for p in [[5.0, 5.0], [2.0, 8.0], [11.0, 1.0]] {
        assert_eq!(point_in_polygon(p, &closed), point_in_polygon(p, &SQUARE));
    }
}

#[test]
fn degenerate_polygons_contain_nothing() {
    assert!(!point_in_polygon([0.0, 0.0], &[]));
    assert!(!point_in_polygon([0.0, 0.0], &[[0.0, 0.0]]));
    assert!(!point_in_polygon([0.5, 0.0], &[[0.0, 0.0], [1.0, 0.0]]));
    // Collinear triangle has no interior.
    assert!(!point_in_polygon([1.0, 1.0], &[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]));
}

#[test]
fn self_intersecting_polygon_uses_even_odd() {
    let bowtie = [[0.0, 0.0], [10.0, 10.0], [10.0, 0.0], [0.0, 10.0]];
    assert!(point_in_polygon([2.0, 5.0], &bowtie));
    assert!(point_in_polygon([8.0, 5.0], &bowtie));
    assert!(!point_in_polygon([5.0, 2.0], &bowtie));
    assert!(!point_in_polygon([5.0, 8.0], &bowtie));
}

#[test]
fn concave_polygon_excludes_notch() {
    // "U" shape open at the top between x = 4 and x = 6.
    let u = [
        [0.0, 0.0],
        [10.0, 0.0],
        [10.0, 10.0],
        [6.0, 10.0],
        [6.0, 4.0],
        [4.0, 4.0],
        [4.0, 10.0],
        [0.0, 10.0],
    ];
    assert!(point_in_polygon([2.0, 8.0], &u));
    assert!(point_in_polygon([8.0, 8.0], &u));
    assert!(point_in_polygon([5.0, 2.0], &u));
    assert!(!point_in_polygon([5.0, 8.0], &u));
}

#[test]
fn scale_maps_and_inverts() {
    let s = LinearScale::new([0.0, 10.0], [40.0, 780.0]);
    assert!((s.apply(5.0) - 410.0).abs() < 1e-9);
    assert!((s.invert(410.0) - 5.0).abs() < 1e-9);
    // Flipped range, as used for the y axis.
    let y = LinearScale::new([0.0, 10.0], [570.0, 20.0]);
    assert!((y.apply(10.0) - 20.0).abs() < 1e-9);
    assert!((y.apply(2.0) - 460.0).abs() < 1e-9);
}

#[test]
fn degenerate_domain_maps_to_range_midpoint() {
    let s = LinearScale::new([3.0, 3.0], [0.0, 100.0]);
    assert_eq!(s.apply(3.0), 50.0);
    assert_eq!(s.apply(-7.0), 50.0);
}

#[test]
fn extent_of_nothing_is_none() {
    assert!(LinearScale::from_extent(Vec::<f64>::new(), [0.0, 1.0]).is_none());
    assert!(LinearScale::from_extent(vec![f64::NAN], [0.0, 1.0]).is_none());
    let s = LinearScale::from_extent(vec![3.0, -1.0, 2.0], [0.0, 1.0]).unwrap();
    assert_eq!(s.domain(), [-1.0, 3.0]);
}

#[test]
fn ticks_are_round_and_ascending() {
    let s = LinearScale::new([0.0, 100.0], [0.0, 500.0]);
    let ticks = s.ticks(10);
    assert_eq!(ticks.len(), 11);
    assert_eq!(ticks[0], 0.0);
    assert_eq!(ticks[10], 100.0);
    assert_eq!(ticks[3], 30.0);

    let reversed = LinearScale::new([10.0, 0.0], [0.0, 500.0]);
    let ticks = reversed.ticks(10);
    assert_eq!(ticks.first(), Some(&0.0));
    assert_eq!(ticks.last(), Some(&10.0));
    assert!(ticks.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn fractional_ticks_have_exact_decimal_values() {
    let s = LinearScale::new([0.0, 1.0], [0.0, 500.0]);
    let ticks = s.ticks(10);
    assert_eq!(ticks.len(), 11);
    assert_eq!(ticks[3], 0.3);
    assert_eq!(ticks[7], 0.7);
}

#[test]
fn ticks_stay_inside_domain() {
    let s = LinearScale::new([-0.37, 2.91], [0.0, 500.0]);
    let ticks = s.ticks(10);
    assert!(!ticks.is_empty());
    assert!(ticks.iter().all(|t| *t >= -0.37 && *t <= 2.91));
    assert!((s.tick_step(10) - 0.5).abs() < 1e-12);
}

#[test]
fn tick_labels_follow_step_precision() {
    let fine = LinearScale::new([0.0, 1.0], [0.0, 500.0]);
    let f = fine.tick_format(10);
    assert_eq!(f.precision(), 1);
    assert_eq!(f.format(0.5), "0.5");
    assert_eq!(f.format(-0.0001), "0.0");

    let coarse = LinearScale::new([0.0, 10_000.0], [0.0, 500.0]);
    let f = coarse.tick_format(10);
    assert_eq!(f.precision(), 0);
    assert_eq!(f.format(5000.0), "5,000");
    assert_eq!(f.format(-12000.0), "-12,000");
}
