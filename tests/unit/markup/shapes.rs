use pretty_assertions::assert_eq;

use super::*;
use crate::ir::path::CommandKind;

fn rect(width: f64, height: f64, rx: f64, ry: f64) -> Shape {
    Shape::Rect {
        x: 0.0,
        y: 0.0,
        width,
        height,
        rx,
        ry,
    }
}

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

#[test]
fn square_rect_is_five_commands() {
    assert_eq!(
        shape_commands(&rect(10.0, 10.0, 0.0, 0.0)).unwrap(),
        vec![
            PathCommand::move_to(0.0, 0.0),
            PathCommand::line_to(10.0, 0.0),
            PathCommand::line_to(10.0, 10.0),
            PathCommand::line_to(0.0, 10.0),
            PathCommand::ClosePath,
        ]
    );
}

#[test]
fn rounded_rect_alternates_edges_and_corners() {
    let cmds = shape_commands(&rect(20.0, 10.0, 4.0, 2.0)).unwrap();
    assert_eq!(cmds.len(), 10);
    assert_eq!(cmds[0], PathCommand::move_to(4.0, 0.0));
    assert_eq!(cmds[1], PathCommand::line_to(16.0, 0.0));
    assert_eq!(cmds[9], PathCommand::ClosePath);
    for (i, cmd) in cmds[1..9].iter().enumerate() {
        let expected = if i % 2 == 0 {
            CommandKind::LineTo
        } else {
            CommandKind::CubicBezierTo
        };
        assert_eq!(cmd.kind(), expected, "command {}", i + 1);
    }
    // Top-right corner ends halfway down the corner radius.
    assert_eq!(cmds[2].end_point(), Some(Point::new(20.0, 2.0)));
    // The last corner closes back on the start.
    assert_eq!(cmds[8].end_point(), Some(Point::new(4.0, 0.0)));
}

#[test]
fn rounded_rect_clamps_radii_to_half_sides() {
    let cmds = shape_commands(&rect(10.0, 4.0, 50.0, 50.0)).unwrap();
    assert_eq!(cmds[0], PathCommand::move_to(5.0, 0.0));
    // Edges collapse to zero length once clamped.
    assert_eq!(cmds[1], PathCommand::line_to(5.0, 0.0));
    assert_eq!(cmds[2].end_point(), Some(Point::new(10.0, 2.0)));
}

#[test]
fn circle_is_four_quadrant_cubics() {
    let cmds = shape_commands(&Shape::Circle {
        cx: 0.0,
        cy: 0.0,
        r: 5.0,
    })
    .unwrap();
    assert_eq!(cmds.len(), 6);
    assert_eq!(cmds[0], PathCommand::move_to(5.0, 0.0));
    assert_eq!(cmds[5], PathCommand::ClosePath);
    let ends = [
        Point::new(0.0, 5.0),
        Point::new(-5.0, 0.0),
        Point::new(0.0, -5.0),
        Point::new(5.0, 0.0),
    ];
    for (cmd, end) in cmds[1..5].iter().zip(ends) {
        assert_eq!(cmd.kind(), CommandKind::CubicBezierTo);
        assert!(close(cmd.end_point().unwrap(), end), "{cmd:?}");
    }
    if let PathCommand::CubicBezierTo { ctrl1, .. } = cmds[1] {
        assert!(close(ctrl1, Point::new(5.0, 5.0 * KAPPA)));
    }
}

#[test]
fn ellipse_applies_radii_per_axis() {
    let cmds = shape_commands(&Shape::Ellipse {
        cx: 10.0,
        cy: 10.0,
        rx: 4.0,
        ry: 2.0,
    })
    .unwrap();
    assert_eq!(cmds[0], PathCommand::move_to(14.0, 10.0));
    assert!(close(cmds[1].end_point().unwrap(), Point::new(10.0, 12.0)));
    assert!(close(cmds[2].end_point().unwrap(), Point::new(6.0, 10.0)));
}

#[test]
fn degenerate_shapes_produce_nothing() {
    assert!(shape_commands(&rect(0.0, 10.0, 0.0, 0.0)).is_none());
    assert!(shape_commands(&rect(10.0, 0.0, 2.0, 2.0)).is_none());
    assert!(
        shape_commands(&Shape::Circle {
            cx: 1.0,
            cy: 1.0,
            r: 0.0
        })
        .is_none()
    );
    assert!(
        shape_commands(&Shape::Ellipse {
            cx: 1.0,
            cy: 1.0,
            rx: 3.0,
            ry: 0.0
        })
        .is_none()
    );
    assert!(shape_commands(&Shape::Polygon(vec![Point::new(1.0, 1.0)])).is_none());
    assert!(shape_commands(&Shape::Polyline(vec![])).is_none());
}

#[test]
fn polygon_closes_and_polyline_stays_open() {
    let pts = vec![
        Point::new(0.0, 0.0),
        Point::new(5.0, 0.0),
        Point::new(5.0, 5.0),
    ];
    let poly = shape_commands(&Shape::Polygon(pts.clone())).unwrap();
    assert_eq!(poly.len(), 4);
    assert_eq!(poly[3], PathCommand::ClosePath);

    let line = shape_commands(&Shape::Polyline(pts)).unwrap();
    assert_eq!(
        line,
        vec![
            PathCommand::move_to(0.0, 0.0),
            PathCommand::line_to(5.0, 0.0),
            PathCommand::line_to(5.0, 5.0),
        ]
    );
}

#[test]
fn line_is_two_open_commands() {
    let cmds = shape_commands(&Shape::Line {
        x1: 1.0,
        y1: 2.0,
        x2: 3.0,
        y2: 4.0,
    })
    .unwrap();
    assert_eq!(
        cmds,
        vec![PathCommand::move_to(1.0, 2.0), PathCommand::line_to(3.0, 4.0)]
    );
}

#[test]
fn style_normalizes_none_paint() {
    let path = shape_to_path(
        &rect(1.0, 1.0, 0.0, 0.0),
        ShapeStyle {
            fill: Some("none".to_string()),
            stroke: Some("#000".to_string()),
            stroke_width: Some(0.0),
        },
    )
    .unwrap();
    assert_eq!(path.fill, None);
    assert_eq!(path.stroke.as_deref(), Some("#000"));
    assert_eq!(path.stroke_width, None);
}

#[test]
fn each_conversion_gets_a_fresh_id() {
    let a = shape_to_path(&rect(1.0, 1.0, 0.0, 0.0), ShapeStyle::default()).unwrap();
    let b = shape_to_path(&rect(1.0, 1.0, 0.0, 0.0), ShapeStyle::default()).unwrap();
    assert_ne!(a.id, b.id);
}
