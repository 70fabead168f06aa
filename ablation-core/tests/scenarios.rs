//! Interaction Scenario Tests
//!
//! End-to-end flows through the engine:
//! - Symmetric difference of two circles
//! - Full-turn rotation of a square
//! - Drag clamping at the surface edge
//! - Triple-click deletion

use ablation_core::{
    AblationEngine, Compositor, EngineConfig, InputEvent, InteractionState, Intent, Point,
    PointerButton, SelectOutcome, Shape, ShapeKind, Sizing,
};

fn engine() -> AblationEngine {
    AblationEngine::new(EngineConfig::free()).expect("valid config")
}

/// Place a shape through the public intent path.
fn place(engine: &mut AblationEngine, kind: ShapeKind, x: f64, y: f64) {
    assert!(engine.apply(&Intent::SelectShapeType { kind }));
    assert!(engine.apply(&Intent::CreateShapeAt {
        at: Point::new(x, y)
    }));
}

fn press(x: f64, y: f64, timestamp_ms: u64) -> InputEvent {
    InputEvent::PointerDown {
        x,
        y,
        button: PointerButton::Primary,
        timestamp_ms,
    }
}

// ============================================================================
// Scenario A: two circles, symmetric difference
// ============================================================================

#[test]
fn test_two_circles_light_only_outer_parts() {
    let mut engine = engine();
    place(&mut engine, ShapeKind::Circle, 260.0, 300.0);
    place(&mut engine, ShapeKind::Circle, 340.0, 300.0);

    let region = engine.region().clone();

    // Non-overlapping parts of each disc.
    for x in [225, 240, 255, 290] {
        assert!(region.is_lit(x, 300), "left disc pixel {x} should be lit");
    }
    for x in [310, 345, 360, 375] {
        assert!(region.is_lit(x, 300), "right disc pixel {x} should be lit");
    }
    // Intersection (just the tangent point for centers 80px apart).
    assert!(!region.is_lit(300, 300));
    // Outside both discs.
    assert!(!region.is_lit(300, 250));
    assert!(!region.is_lit(150, 300));
}

#[test]
fn test_overlapping_circles_cancel_in_lens() {
    let mut engine = engine();
    place(&mut engine, ShapeKind::Circle, 280.0, 300.0);
    place(&mut engine, ShapeKind::Circle, 320.0, 300.0);

    let region = engine.region().clone();
    for x in 285..=315 {
        assert!(!region.is_lit(x, 300), "lens pixel {x} should be unlit");
    }
    assert!(region.is_lit(250, 300));
    assert!(region.is_lit(350, 300));
}

// ============================================================================
// Scenario B: square rotated four times
// ============================================================================

#[test]
fn test_square_four_turns_restore_mask() {
    let mut engine = engine();
    place(&mut engine, ShapeKind::Square, 300.0, 300.0);
    let original = engine.region().clone();

    for turn in 1..=4 {
        assert!(engine.apply(&Intent::RotateActive));
        let rotation = engine.active_shape().map(|s| s.rotation_degrees);
        assert_eq!(rotation, Some(45 * turn));
        if turn % 2 == 1 {
            // Diamond orientation.
            assert_ne!(engine.region().diff_count(&original), 0);
        } else {
            assert_eq!(engine.region().diff_count(&original), 0, "turn {turn}");
        }
    }

    assert_eq!(
        engine.active_shape().map(|s| s.rotation_degrees),
        Some(180)
    );
    assert_eq!(engine.region().diff_count(&original), 0);
}

#[test]
fn test_square_eight_turns_wrap_to_zero() {
    let mut engine = engine();
    place(&mut engine, ShapeKind::Square, 300.0, 300.0);
    let original = engine.region().clone();

    for _ in 0..8 {
        assert!(engine.apply(&Intent::RotateActive));
    }

    assert_eq!(engine.active_shape().map(|s| s.rotation_degrees), Some(0));
    assert_eq!(engine.region().diff_count(&original), 0);
}

#[test]
fn test_square_quarter_turn_masks_match_full_recompute() {
    let compositor = Compositor::new(600);
    let upright = compositor.compute_region(&[Shape::new(
        ShapeKind::Square,
        Point::new(300.0, 300.0),
    )]);
    for degrees in [90, 180, 270] {
        let turned = Shape::new(ShapeKind::Square, Point::new(300.0, 300.0))
            .with_rotation(degrees);
        let region = compositor.compute_region(&[turned]);
        assert_eq!(region.diff_count(&upright), 0, "{degrees} degrees");
    }
}

// ============================================================================
// Scenario C: drag clamps a triangle inside the surface
// ============================================================================

#[test]
fn test_drag_clamps_triangle_to_surface() {
    let mut engine = engine();
    place(&mut engine, ShapeKind::Triangle, 300.0, 300.0);
    assert!(engine.apply(&Intent::ResizeActive { direction: 1 }));
    let radius = engine.active_shape().map(|s| s.radius()).expect("active");

    engine.handle_input(&press(300.0, 300.0, 0));
    assert!(engine.handle_input(&InputEvent::PointerMove { x: 650.0, y: -40.0 }));

    let shape = engine.active_shape().expect("still active");
    assert!((shape.center.x - (600.0 - radius)).abs() < 1e-9);
    assert!((shape.center.y - radius).abs() < 1e-9);
    assert!(shape.fits_within(600.0));

    // Pushing further changes nothing.
    assert!(!engine.handle_input(&InputEvent::PointerMove { x: 700.0, y: -80.0 }));
    assert!(engine.handle_input(&InputEvent::PointerUp));
}

#[test]
fn test_grid_drag_snaps_inside_surface() {
    let mut engine = AblationEngine::new(EngineConfig::grid()).expect("valid config");
    place(&mut engine, ShapeKind::Triangle, 300.0, 300.0);

    assert!(engine.apply(&Intent::StartDrag {
        at: Point::new(300.0, 300.0)
    }));
    engine.apply(&Intent::DragTo {
        at: Point::new(3.0, 597.0),
    });

    let shape = engine.active_shape().expect("active");
    // Radius ~34.6 -> innermost grid lines are 40 and 560.
    assert_eq!(shape.center, Point::new(40.0, 560.0));
    assert!(shape.fits_within(600.0));
}

#[test]
fn test_resize_refused_at_edge() {
    let mut engine = engine();
    place(&mut engine, ShapeKind::Square, 0.0, 0.0);
    // Level 4 square (radius ~56.6) clamped into the corner.
    assert!(!engine.apply(&Intent::ResizeActive { direction: 1 }));
    assert_eq!(engine.active_shape().map(|s| s.sizing), Some(Sizing::Level(4)));
    assert!(engine.apply(&Intent::ResizeActive { direction: -1 }));
}

#[test]
fn test_resize_at_ladder_end_is_noop() {
    let mut engine = engine();
    place(&mut engine, ShapeKind::Triangle, 300.0, 300.0);
    assert!(engine.apply(&Intent::ResizeActive { direction: -1 }));
    assert!(engine.apply(&Intent::ResizeActive { direction: -1 }));
    assert_eq!(engine.active_shape().map(|s| s.sizing), Some(Sizing::Scale(0.5)));

    assert!(!engine.apply(&Intent::ResizeActive { direction: -1 }));
    assert_eq!(engine.active_shape().map(|s| s.sizing), Some(Sizing::Scale(0.5)));
}

// ============================================================================
// Scenario D: triple-click delete
// ============================================================================

#[test]
fn test_triple_click_deletes_shape() {
    let mut engine = engine();
    place(&mut engine, ShapeKind::Circle, 300.0, 300.0);
    place(&mut engine, ShapeKind::Square, 100.0, 100.0);
    let at = Point::new(300.0, 300.0);

    assert!(matches!(engine.select_at(at, 1000), SelectOutcome::Selected(_)));
    engine.end_drag();
    assert!(matches!(engine.select_at(at, 1100), SelectOutcome::Selected(_)));
    engine.end_drag();
    assert!(matches!(engine.select_at(at, 1250), SelectOutcome::Deleted(_)));

    assert_eq!(engine.shapes().len(), 1);
    assert!(engine.active_shape().is_none());
    assert_eq!(*engine.state(), InteractionState::Idle);
    assert_eq!(engine.shapes()[0].kind, ShapeKind::Square);

    let expected = Compositor::new(600).compute_region(engine.shapes());
    assert_eq!(engine.region().diff_count(&expected), 0);
}

#[test]
fn test_slow_clicks_do_not_delete() {
    let mut engine = engine();
    place(&mut engine, ShapeKind::Circle, 300.0, 300.0);

    for (i, t) in [0_u64, 150, 400, 550].into_iter().enumerate() {
        engine.handle_input(&press(300.0, 300.0, t));
        engine.handle_input(&InputEvent::PointerUp);
        assert_eq!(engine.shapes().len(), 1, "click {i} must not delete");
    }
}

#[test]
fn test_clicking_lower_shape_raises_it() {
    let mut engine = engine();
    place(&mut engine, ShapeKind::Circle, 280.0, 300.0);
    place(&mut engine, ShapeKind::Square, 330.0, 300.0);
    let circle = engine.shapes()[0].id;

    // Only the circle covers x=245.
    engine.select_at(Point::new(245.0, 300.0), 0);
    assert_eq!(engine.shapes().last().map(|s| s.id), Some(circle));

    // Both cover x=300; the circle is now on top and wins.
    assert_eq!(
        engine.select_at(Point::new(300.0, 300.0), 5000),
        SelectOutcome::Selected(circle)
    );
}

#[test]
fn test_script_replay() {
    let script = r#"[
        {"intent": "select_shape_type", "kind": "circle"},
        {"intent": "create_shape_at", "at": {"x": 260.0, "y": 300.0}},
        {"intent": "select_shape_type", "kind": "triangle"},
        {"intent": "create_shape_at", "at": {"x": 340.0, "y": 300.0}},
        {"intent": "rotate_active"},
        {"intent": "move_active", "dx": -20.0, "dy": 0.0},
        {"intent": "delete_active"}
    ]"#;
    let mut engine = engine();
    for intent in Intent::parse_script(script).expect("valid script") {
        engine.try_apply(&intent).expect("intent applies");
    }
    assert_eq!(engine.shapes().len(), 1);
    assert_eq!(engine.shapes()[0].kind, ShapeKind::Circle);
}
