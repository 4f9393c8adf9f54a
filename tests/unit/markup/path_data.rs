use pretty_assertions::assert_eq;

use super::*;
use crate::ir::path_string::commands_to_path_string;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn parse(d: &str) -> Vec<PathCommand> {
    parse_path_data(d).unwrap()
}

#[test]
fn empty_input_yields_no_commands() {
    assert!(parse("").is_empty());
    assert!(parse("  \n\t ").is_empty());
}

#[test]
fn move_repeats_as_lines_in_the_same_mode() {
    assert_eq!(
        parse("M10 10 20 20 30 30"),
        vec![
            PathCommand::move_to(10.0, 10.0),
            PathCommand::line_to(20.0, 20.0),
            PathCommand::line_to(30.0, 30.0),
        ]
    );
    assert_eq!(
        parse("m10 10 5 5 5 5"),
        vec![
            PathCommand::move_to(10.0, 10.0),
            PathCommand::line_to(15.0, 15.0),
            PathCommand::line_to(20.0, 20.0),
        ]
    );
}

#[test]
fn horizontal_and_vertical_reuse_other_axis() {
    assert_eq!(
        parse("M0 0 h10 v10 H0 z"),
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
fn repeated_relative_commands_resolve_per_repetition() {
    assert_eq!(
        parse("M0 0 c0 1 1 1 1 0 0 1 1 1 1 0"),
        vec![
            PathCommand::move_to(0.0, 0.0),
            PathCommand::cubic_to(p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0)),
            PathCommand::cubic_to(p(1.0, 1.0), p(2.0, 1.0), p(2.0, 0.0)),
        ]
    );
    assert_eq!(
        parse("M0 0 l1 2 3 4"),
        vec![
            PathCommand::move_to(0.0, 0.0),
            PathCommand::line_to(1.0, 2.0),
            PathCommand::line_to(4.0, 6.0),
        ]
    );
}

#[test]
fn smooth_cubic_reflects_previous_control() {
    let cmds = parse("M0 0 C0 10 10 10 10 0 S20 -10 20 0");
    assert_eq!(
        cmds[2],
        PathCommand::cubic_to(p(10.0, -10.0), p(20.0, -10.0), p(20.0, 0.0))
    );
}

#[test]
fn smooth_cubic_without_previous_curve_is_sharp() {
    let cmds = parse("M0 0 L10 0 S20 10 30 0");
    assert_eq!(
        cmds[2],
        PathCommand::cubic_to(p(10.0, 0.0), p(20.0, 10.0), p(30.0, 0.0))
    );
}

#[test]
fn smooth_quadratic_reflects_only_after_quadratic() {
    let cmds = parse("M0 0 Q5 10 10 0 T20 0");
    assert_eq!(cmds[2], PathCommand::quad_to(p(15.0, -10.0), p(20.0, 0.0)));

    let cmds = parse("M0 0 L5 5 T10 0");
    assert_eq!(cmds[2], PathCommand::quad_to(p(5.0, 5.0), p(10.0, 0.0)));

    // A cubic does not feed quadratic smoothing.
    let cmds = parse("M0 0 C0 10 10 10 10 0 T20 0");
    assert_eq!(cmds[2], PathCommand::quad_to(p(10.0, 0.0), p(20.0, 0.0)));
}

#[test]
fn arcs_degrade_to_lines() {
    assert_eq!(
        parse("M0 0 A5 5 0 1 0 10 0"),
        vec![
            PathCommand::move_to(0.0, 0.0),
            PathCommand::line_to(10.0, 0.0)
        ]
    );
}

#[test]
fn arc_flags_may_be_packed() {
    assert_eq!(
        parse("M2 2 a1 1 0 011 1"),
        vec![PathCommand::move_to(2.0, 2.0), PathCommand::line_to(3.0, 3.0)]
    );
}

#[test]
fn close_returns_to_subpath_start() {
    assert_eq!(
        parse("M5 5 L10 5 Z l1 1"),
        vec![
            PathCommand::move_to(5.0, 5.0),
            PathCommand::line_to(10.0, 5.0),
            PathCommand::ClosePath,
            PathCommand::line_to(6.0, 6.0),
        ]
    );
}

#[test]
fn number_forms_follow_svg_grammar() {
    assert_eq!(parse("M0.5.5"), vec![PathCommand::move_to(0.5, 0.5)]);
    assert_eq!(parse("M1e2,-1E-1"), vec![PathCommand::move_to(100.0, -0.1)]);
    assert_eq!(parse("M+3-4"), vec![PathCommand::move_to(3.0, -4.0)]);
}

#[test]
fn malformed_input_is_a_parse_error() {
    for d in [
        "M 10",
        "M10 10 L20 abc",
        "10 10 M0 0",
        "M0 0 Z 5",
        "M0 0 L1e 5",
        "M0 0 X",
        "M0 0 A1 1 0 2 0 5 5",
        "M0 0 L",
        "M0 0 L-. 4",
    ] {
        let err = parse_path_data(d).unwrap_err();
        assert!(
            matches!(err, NottieError::Parse(_)),
            "expected parse error for {d:?}, got {err:?}"
        );
    }
}

#[test]
fn data_must_open_with_a_move() {
    let err = parse_path_data("L10 10").unwrap_err();
    assert!(matches!(err, NottieError::Parse(_)));
}

#[test]
fn errors_name_the_position() {
    let err = parse_path_data("M0 0 X").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("invalid path data"), "{msg}");
    assert!(msg.contains("position"), "{msg}");
}

#[test]
fn compact_signs_separate_numbers() {
    assert_eq!(
        parse("M0,0 L10-5 L20,0"),
        vec![
            PathCommand::move_to(0.0, 0.0),
            PathCommand::line_to(10.0, -5.0),
            PathCommand::line_to(20.0, 0.0),
        ]
    );
}

#[test]
fn absolute_subset_round_trips_exactly() {
    for d in [
        "M0 0 L10 0 L10 10 Z",
        "M1.25 -3 C0.1 0.2 0.3 0.4 1e-3 7 Q5 5 6 6 Z M100 100 L0.333 1",
        "M-0.5 0 Q1 2 3 4 L5 6",
    ] {
        let first = parse(d);
        let again = parse(&commands_to_path_string(&first));
        assert_eq!(first, again);
    }
}
