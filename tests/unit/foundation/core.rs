use super::*;

#[test]
fn frame_index_orders_and_measures() {
    assert!(FrameIndex(3) < FrameIndex(10));
    assert_eq!(FrameIndex(10).since(FrameIndex(3)), Some(7));
    assert_eq!(FrameIndex(3).since(FrameIndex(10)), None);
}

#[test]
fn canvas_rejects_degenerate_sizes() {
    assert!(Canvas::new(0.0, 10.0).is_err());
    assert!(Canvas::new(10.0, -1.0).is_err());
    assert!(Canvas::new(f64::NAN, 10.0).is_err());
    let c = Canvas::new(320.5, 240.0).unwrap();
    assert_eq!(c.width, 320.5);
}

#[test]
fn canvas_default_is_800_by_600() {
    let c = Canvas::default();
    assert_eq!((c.width, c.height), (800.0, 600.0));
}
