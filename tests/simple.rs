use trapezoid_rs::{
    deviation, Error, LineSegment, Options, Point, Polygon, RandomizedIncrementalConstruction,
    Shuffled, TrapezoidMap,
};

fn square() -> Polygon<f64> {
    let data = [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]];
    Polygon::new(data, &[] as &[u32]).unwrap()
}

fn assert_locates_samples(ric: &RandomizedIncrementalConstruction<f64>) {
    for (id, trapezoid) in ric.trapezoidal_map().iter() {
        if let Some(sample) = trapezoid.sample_point() {
            assert!(trapezoid.contains(&sample));
            assert_eq!(ric.locate(&sample), Some(id), "sample {} of {}", sample, id);
        }
    }
}

fn bounded_by(map: &TrapezoidMap<f64>, segment: &LineSegment<f64>) -> usize {
    map.iter()
        .filter(|(_, t)| t.top == *segment || t.bottom == *segment)
        .count()
}

#[test]
fn test_square() {
    let ric = RandomizedIncrementalConstruction::new(square()).unwrap();
    assert_eq!(ric.trapezoidal_map().len(), 7);
    assert_eq!(ric.skipped(), 2);
    assert_eq!(ric.check_invariants(), Ok(()));
    assert!(deviation(ric.trapezoidal_map(), ric.bounding_box()).unwrap() < 1e-12);
    assert_locates_samples(&ric);
}

#[test]
fn test_single_crossing_edge() {
    let mut ric = RandomizedIncrementalConstruction::bounded(square(), Options::default());
    let diagonal = LineSegment::new(Point::new(0.0, 0.0), Point::new(4.0, 4.0));
    ric.insert_segment(diagonal).unwrap();

    let map = ric.trapezoidal_map();
    let below: Vec<_> = map.iter().filter(|(_, t)| t.top == diagonal).collect();
    let above: Vec<_> = map.iter().filter(|(_, t)| t.bottom == diagonal).collect();
    assert_eq!(below.len(), 1);
    assert_eq!(above.len(), 1);
    assert_eq!(bounded_by(map, &diagonal), 2);
}

#[test]
fn test_diagonal_through_square() {
    let mut ric = RandomizedIncrementalConstruction::new(square()).unwrap();
    let diagonal = LineSegment::new(Point::new(4.0, 4.0), Point::new(0.0, 0.0));
    ric.insert_segment(diagonal).unwrap();

    let map = ric.trapezoidal_map();
    assert_eq!(map.len(), 8);
    let wide = map
        .iter()
        .filter(|(_, t)| t.width() > 0.0 && (t.top == diagonal || t.bottom == diagonal))
        .count();
    assert_eq!(wide, 2);
    assert_eq!(ric.check_invariants(), Ok(()));
    assert_locates_samples(&ric);

    let below = ric.locate(&Point::new(3.0, 1.0)).unwrap();
    assert_eq!(map[below].top, diagonal);
    let above = ric.locate(&Point::new(1.0, 3.0)).unwrap();
    assert_eq!(map[above].bottom, diagonal);
}

#[test]
fn test_bounding_box() {
    let data = [[1.0, 2.0], [5.0, 3.0], [4.0, 6.0], [2.0, 5.0]];
    let polygon = Polygon::new(data, &[] as &[u32]).unwrap();
    let ric = RandomizedIncrementalConstruction::bounded(polygon, Options::default());

    let (_, root) = ric.trapezoidal_map().iter().next().unwrap();
    assert!(root.left_p.x <= 0.0);
    assert!(root.right_p.x >= 6.0);
    assert_eq!(ric.bounding_box().min, Point::new(0.0, 1.0));
    assert_eq!(ric.bounding_box().max, Point::new(6.0, 7.0));

    let options = Options {
        margin: 10.0,
        ..Options::default()
    };
    let polygon = Polygon::new(data, &[] as &[u32]).unwrap();
    let ric = RandomizedIncrementalConstruction::bounded(polygon, options);
    assert_eq!(ric.bounding_box().min, Point::new(-9.0, -8.0));
}

#[test]
fn test_vertical_edge_skip() {
    let mut ric = RandomizedIncrementalConstruction::new(square()).unwrap();
    let before = ric.trapezoidal_map().len();
    let vertical = LineSegment::new(Point::new(2.0, 1.0), Point::new(2.0, 3.0));
    ric.insert_segment(vertical).unwrap();
    assert_eq!(ric.trapezoidal_map().len(), before);
    assert_eq!(ric.skipped(), 3);
}

#[test]
fn test_hole() {
    let data = [
        [0.0, 0.0],
        [10.0, 0.0],
        [10.0, 10.0],
        [0.0, 10.0],
        [2.0, 2.0],
        [8.0, 2.0],
        [5.0, 8.0],
    ];
    let polygon = Polygon::new(data, &[4u32]).unwrap();
    polygon.check_simple().unwrap();
    let ric = RandomizedIncrementalConstruction::new(polygon).unwrap();
    // 1 + 7 distinct endpoints + 5 non-vertical edges
    assert_eq!(ric.trapezoidal_map().len(), 13);
    assert_eq!(ric.check_invariants(), Ok(()));
    assert!(deviation(ric.trapezoidal_map(), ric.bounding_box()).unwrap() < 1e-12);
    assert_locates_samples(&ric);

    // inside the hole: between its bottom edge and its two upper edges
    let id = ric.locate(&Point::new(5.0, 4.0)).unwrap();
    let t = &ric.trapezoidal_map()[id];
    assert_eq!(
        t.bottom,
        LineSegment::new(Point::new(2.0, 2.0), Point::new(8.0, 2.0))
    );
}

#[test]
fn test_shuffled_order() {
    let data = [
        [0.0, 0.0],
        [3.0, -1.0],
        [7.0, 1.0],
        [9.0, 5.0],
        [6.0, 8.0],
        [2.0, 7.0],
        [-1.0, 4.0],
    ];
    let input = RandomizedIncrementalConstruction::new(Polygon::new(data, &[] as &[u32]).unwrap())
        .unwrap();
    for seed in 0..8 {
        let polygon = Polygon::new(data, &[] as &[u32]).unwrap();
        let ric =
            RandomizedIncrementalConstruction::with_order(polygon, &mut Shuffled::new(seed))
                .unwrap();
        assert_eq!(
            ric.trapezoidal_map().len(),
            input.trapezoidal_map().len(),
            "seed {}",
            seed
        );
        assert_eq!(ric.check_invariants(), Ok(()));
        assert_locates_samples(&ric);
    }
    assert_eq!(input.trapezoidal_map().len(), 1 + 7 + 7);
}

#[test]
fn test_errors() {
    let vertical = LineSegment::new(Point::new(1.0, 0.0), Point::new(1.0, 5.0));
    assert_eq!(
        vertical.above_line(&Point::new(0.0, 0.0)),
        Err(Error::VerticalSegment)
    );
    assert_eq!(vertical.y_at(1.0), Err(Error::VerticalSegment));

    let line = [[0.0, 0.0], [100.0, 200.0]];
    assert_eq!(
        Polygon::new(line, &[] as &[u32]).unwrap_err(),
        Error::DegenerateRing { ring: 0 }
    );

    let bowtie = [[0.0, 0.0], [2.0, 2.0], [2.0, 0.0], [0.0, 2.0]];
    let polygon = Polygon::new(bowtie, &[] as &[u32]).unwrap();
    assert_eq!(
        polygon.check_simple(),
        Err(Error::SelfIntersection {
            first: 1,
            second: 3
        })
    );
    assert_eq!(
        Error::SelfIntersection {
            first: 1,
            second: 3
        }
        .to_string(),
        "edges 1 and 3 intersect"
    );
}

#[test]
fn test_locate_outside() {
    let ric = RandomizedIncrementalConstruction::new(square()).unwrap();
    assert_eq!(ric.locate(&Point::new(-2.0, 2.0)), None);
    assert_eq!(ric.locate(&Point::new(2.0, 100.0)), None);
    let inside = ric.locate(&Point::new(2.0, 2.0)).unwrap();
    let t = &ric.trapezoidal_map()[inside];
    assert_eq!(
        t.bottom,
        LineSegment::new(Point::new(0.0, 0.0), Point::new(4.0, 0.0))
    );
    assert_eq!(
        t.top,
        LineSegment::new(Point::new(0.0, 4.0), Point::new(4.0, 4.0))
    );
}
