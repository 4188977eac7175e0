// tests/parse_commands.rs
use pretty_assertions::assert_eq;
use turtle_board::{ActionKind, TurtleOp, has_drawable_actions, parse};

#[test]
fn test_square_side_and_turn() {
    let actions = parse("draw mode\nforward 2\nright\nforward 2\n");

    assert_eq!(actions.len(), 3);
    assert_eq!(
        actions.ops(),
        vec![
            TurtleOp::Step(2.0),
            TurtleOp::TurnRight(90.0),
            TurtleOp::Step(2.0)
        ]
    );
}

#[test]
fn test_output_before_marker_is_ignored() {
    let actions = parse("hello\nforward 5\ndraw mode\nforward");
    assert_eq!(actions.ops(), vec![TurtleOp::Step(1.0)]);

    assert!(parse("forward").is_empty(), "No marker means no commands");
    assert!(parse("").is_empty());
}

#[test]
fn test_matching_is_case_insensitive() {
    let upper = parse("DRAW MODE\nFORWARD 3");
    let lower = parse("draw mode\nforward 3");

    assert_eq!(upper.ops(), lower.ops());
    assert_eq!(upper.ops(), vec![TurtleOp::Step(3.0)]);
    // The source line is kept as printed.
    assert_eq!(upper.get(0).unwrap().source_line, "FORWARD 3");
}

#[test]
fn test_unrecognized_lines_are_skipped() {
    let actions = parse("draw mode\nblah blah\nforward 1\n\nDEBUG: x=3\ndraw mode");
    assert_eq!(actions.ops(), vec![TurtleOp::Step(1.0)]);
}

#[test]
fn test_argument_defaults() {
    let actions = parse("draw mode\nleft\nright 45.5\nright\nleft 30");

    assert_eq!(
        actions.ops(),
        vec![
            TurtleOp::TurnLeft(90.0),
            TurtleOp::TurnRight(45.5),
            TurtleOp::TurnRight(90.0),
            TurtleOp::TurnLeft(30.0),
        ]
    );
}

#[test]
fn test_say_preserves_message() {
    let actions = parse("draw mode\nsay Hello, World\nSAY Mixed CASE!\nsay");

    assert_eq!(actions.len(), 2);
    let first = actions.get(0).unwrap();
    assert_eq!(first.kind(), ActionKind::Say);
    assert_eq!(first.text_value(), "Hello, World");
    assert_eq!(actions.get(1).unwrap().text_value(), "Mixed CASE!");
}

#[test]
fn test_color_commands() {
    let actions = parse(
        "draw mode\ncolor red\ncolour #F5C0E2\ncolor OFF\ncolour off\ncolor rgba(0, 0, 0, 0.3)",
    );

    assert_eq!(
        actions.ops(),
        vec![
            TurtleOp::SetColor("red".into()),
            TurtleOp::SetColor("#F5C0E2".into()),
            TurtleOp::SetColor(String::new()),
            TurtleOp::SetColor(String::new()),
            TurtleOp::SetColor("rgba(0, 0, 0, 0.3)".into()),
        ]
    );
}

#[test]
fn test_width_requires_a_number() {
    let actions = parse("draw mode\nwidth\nwidth 3.5\nwidth thick");
    assert_eq!(actions.ops(), vec![TurtleOp::SetWidth(3.5)]);
    assert_eq!(actions.get(0).unwrap().numeric_value(), 3.5);
}

#[test]
fn test_malformed_numbers_are_skipped() {
    let actions = parse(
        "draw mode\nforward -2\nforward 1.\nforward .5\nforward  2\nforward 2x\nleft -90\nforward 1e3\nforward 0.25",
    );
    assert_eq!(actions.ops(), vec![TurtleOp::Step(0.25)]);
}

#[test]
fn test_overflowing_number_is_skipped() {
    let huge = "9".repeat(60);
    let actions = parse(&format!("draw mode\nforward {huge}\nforward 4"));
    assert_eq!(actions.ops(), vec![TurtleOp::Step(4.0)]);
}

#[test]
fn test_lines_are_trimmed() {
    let actions = parse("  draw mode \r\n\t forward 2   \r\n");

    assert_eq!(actions.len(), 1);
    assert_eq!(actions.get(0).unwrap().source_line, "forward 2");
}

#[test]
fn test_drawable_actions_query() {
    assert!(has_drawable_actions(&parse("draw mode\nsay hi")));
    assert!(!has_drawable_actions(&parse("draw mode\nnothing to see")));
    assert!(!has_drawable_actions(&parse("hello, world")));
}
