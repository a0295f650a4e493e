//! Kernel integration tests.
//!
//! These exercise the public shape surface end to end: containment,
//! intersection and closest/farthest-point queries must all agree with
//! the pixel enumerators they are built on.

use pixelgeom::{
    circle_contains, crossings_from_path_point, intersects_segment_segment, Circle, GeometryKit,
    LinePixelIter, MultiShape, OrientedPoint, Path, PixelKit, Point, Rect, Segment, Shape,
    WindingRule, SHAPE_INTERSECTS,
};

/// The unit square path used across the scenarios.
fn square_path(rule: WindingRule) -> Path {
    let mut p = Path::new(rule);
    p.move_to(0, 0);
    p.line_to(10, 0);
    p.line_to(10, 10);
    p.line_to(0, 10);
    p.close();
    p
}

#[test]
fn scenario_circle_3_4_5() {
    // Circle center (0,0) radius 5: (3,4) is exactly on the circle and
    // yielded by the perimeter walker.
    let c = Circle::new(0, 0, 5);
    assert!(c.contains_point(3, 4));
    assert!(c.point_iter().any(|p| p == Point::new(3, 4)));
}

#[test]
fn scenario_segment_through_rect() {
    let s = Segment::new(0, 0, 10, 0);
    let r = Rect::from_corners(Point::new(-1, -1), Point::new(1, 1));
    assert!(s.intersects_rect(&r));
    assert!(r.intersects_segment(&s));
}

#[test]
fn scenario_square_path_contains() {
    let p = square_path(WindingRule::NonZero);
    assert!(p.contains_point(5, 5));
    assert!(!p.contains_point(20, 20));
}

#[test]
fn scenario_crossing_diagonals() {
    assert!(intersects_segment_segment(0, 0, 10, 10, 0, 10, 10, 0));
    let a = Segment::new(0, 0, 10, 10);
    let b = Segment::new(0, 10, 10, 0);
    assert!(a.intersects_segment(&b));
    // Both diagonals pass through the center pixel.
    assert!(a.contains_point(5, 5));
    assert!(b.contains_point(5, 5));
}

#[test]
fn scenario_quad_path_misses_hull_only_rect() {
    // The control hull of the arch reaches y=20 but the curve only
    // reaches y=10: a rectangle touching just the hull must not
    // intersect.
    let mut p = Path::new(WindingRule::NonZero);
    p.move_to(0, 0);
    p.quad_to(10, 20, 20, 0);
    p.close();
    let hull_only = Rect::from_coords(5, 15, 15, 18);
    assert!(!p.intersects_rect(&hull_only));
    let through = Rect::from_coords(5, 2, 15, 8);
    assert!(p.intersects_rect(&through));
}

#[test]
fn property_perimeter_consistency() {
    for r in 0..=12 {
        let c = Circle::new(3, -7, r);
        for p in c.point_iter() {
            assert!(
                circle_contains(3, -7, r, p.x, p.y),
                "perimeter pixel {p:?} outside circle r={r}"
            );
        }
    }
}

#[test]
fn property_bresenham_endpoint_exactness() {
    for &(x0, y0, x1, y1) in &[(0, 0, 17, 5), (-3, 9, 4, -11), (6, 6, 6, 6)] {
        let pts: Vec<Point> = LinePixelIter::new(x0, y0, x1, y1).collect();
        assert_eq!(pts.first().copied(), Some(Point::new(x0, y0)));
        assert_eq!(pts.last().copied(), Some(Point::new(x1, y1)));
        let mut rev: Vec<Point> = LinePixelIter::new(x1, y1, x0, y0).collect();
        rev.reverse();
        assert_eq!(pts, rev);
    }
}

#[test]
fn property_crossing_mask_containment_equivalence() {
    // For a simple closed polygon, containment equals the masked
    // crossing number for both winding rules.
    for rule in [WindingRule::NonZero, WindingRule::EvenOdd] {
        let p = square_path(rule);
        for (x, y) in [(5, 5), (20, 20), (-3, 4), (9, 1)] {
            let crossings = crossings_from_path_point(&mut p.iter(), x, y, true).unwrap();
            assert_ne!(crossings, SHAPE_INTERSECTS, "({x},{y}) is not on an edge");
            let masked = (crossings & rule.mask()) != 0;
            assert_eq!(p.contains_point(x, y), masked, "rule {rule:?} at ({x},{y})");
        }
    }
}

#[test]
fn property_sentinel_soundness() {
    // Genuinely crossing boundaries must produce the sentinel, not a
    // finite count that masks to "no intersection".
    let p = square_path(WindingRule::EvenOdd);
    let crossing_edge = Segment::new(5, 5, 15, 5);
    assert!(p.intersects_segment(&crossing_edge));
    let c = pixelgeom::crossings_from_path_segment(&mut p.iter(), 5, 5, 15, 5, true).unwrap();
    assert_eq!(c, SHAPE_INTERSECTS);
}

#[test]
fn property_translate_round_trip() {
    let mut shapes: Vec<Shape> = vec![
        Shape::Circle(Circle::new(1, 2, 7)),
        Shape::Rect(Rect::from_coords(-3, -3, 9, 4)),
        Shape::Segment(Segment::new(0, 0, 13, -5)),
        Shape::Path(square_path(WindingRule::NonZero)),
        Shape::OrientedPoint(OrientedPoint::new(4, 4, 0, 1)),
    ];
    for shape in &mut shapes {
        let original = shape.clone();
        shape.translate(101, -57);
        shape.translate(-101, 57);
        assert_eq!(*shape, original);
    }
}

#[test]
fn property_closest_point_idempotence() {
    let kit = PixelKit;
    let c = Circle::new(0, 0, 5);
    assert_eq!(c.closest_point_to(1, -2), Point::new(1, -2));
    let r = Rect::from_coords(0, 0, 8, 8);
    assert_eq!(r.closest_point_to(8, 0), Point::new(8, 0));
    let p = square_path(WindingRule::NonZero);
    assert_eq!(p.closest_point_to(10, 10), Point::new(10, 10));
    // And through the kit-generic surface.
    let probe = kit.point(4, 4);
    let q = pixelgeom::Shape2D::<PixelKit>::closest_point_to(&r, &kit, &probe);
    assert_eq!(q, probe);
}

#[test]
fn multishape_aggregates_members() {
    let mut ms = MultiShape::new();
    ms.push(Shape::Circle(Circle::new(0, 0, 5)));
    ms.push(Shape::Segment(Segment::new(20, 20, 30, 30)));

    assert!(ms.contains_point(0, 5));
    assert!(ms.contains_point(25, 25));
    assert!(!ms.contains_point(12, 12));

    let probe = Rect::from_coords(24, 24, 26, 26);
    assert!(ms.intersects_rect(&probe));
    assert!(!ms.intersects_rect(&Rect::from_coords(40, 40, 50, 50)));
}

#[test]
fn path_vs_path_intersections() {
    let a = square_path(WindingRule::NonZero);

    let mut crossing = Path::new(WindingRule::NonZero);
    crossing.move_to(5, 5);
    crossing.line_to(15, 5);
    crossing.line_to(15, 15);
    crossing.close();
    assert!(a.intersects_path(&crossing));

    let mut nested = Path::new(WindingRule::NonZero);
    nested.move_to(3, 3);
    nested.line_to(7, 3);
    nested.line_to(7, 7);
    nested.line_to(3, 7);
    nested.close();
    assert!(a.intersects_path(&nested));
    assert!(nested.intersects_path(&a));

    let mut far = Path::new(WindingRule::NonZero);
    far.move_to(100, 100);
    far.line_to(110, 100);
    far.line_to(110, 110);
    far.close();
    assert!(!a.intersects_path(&far));
}

#[test]
fn closest_pair_between_path_and_segment() {
    let p = square_path(WindingRule::NonZero);
    let (on_path, on_query) = p.closest_point_to_segment(15, 5, 20, 5).unwrap();
    assert_eq!(on_path, Point::new(10, 5));
    assert_eq!(on_query, Point::new(15, 5));
}

#[test]
fn kit_generic_consumers_can_use_their_own_points() {
    // A consumer-supplied kit with its own point representation drives
    // the same queries.
    use pixelgeom::{Point2D, Vector2D};

    #[derive(Debug, Clone, PartialEq)]
    struct MyPoint([i32; 2]);

    impl Point2D for MyPoint {
        fn x(&self) -> i32 {
            self.0[0]
        }
        fn y(&self) -> i32 {
            self.0[1]
        }
        fn set_x(&mut self, x: i32) {
            self.0[0] = x;
        }
        fn set_y(&mut self, y: i32) {
            self.0[1] = y;
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct MyVector([i32; 2]);

    impl Point2D for MyVector {
        fn x(&self) -> i32 {
            self.0[0]
        }
        fn y(&self) -> i32 {
            self.0[1]
        }
        fn set_x(&mut self, x: i32) {
            self.0[0] = x;
        }
        fn set_y(&mut self, y: i32) {
            self.0[1] = y;
        }
    }

    impl Vector2D for MyVector {}

    struct MyKit;

    impl GeometryKit for MyKit {
        type Point = MyPoint;
        type Vector = MyVector;

        fn point(&self, x: i32, y: i32) -> MyPoint {
            MyPoint([x, y])
        }
        fn vector(&self, x: i32, y: i32) -> MyVector {
            MyVector([x, y])
        }
    }

    let kit = MyKit;
    let c = Circle::new(0, 0, 5);
    let probe = kit.point(12, 0);
    let q = pixelgeom::Shape2D::<MyKit>::closest_point_to(&c, &kit, &probe);
    assert_eq!(q, MyPoint([5, 0]));
}
