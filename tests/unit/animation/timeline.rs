use pretty_assertions::assert_eq;

use super::*;
use crate::ir::path::PathData;

fn layer_with(paths: Vec<PathData>) -> Layer {
    let mut layer = Layer::new("L");
    layer.paths = paths;
    layer
}

fn key(frame: u64) -> Keyframe {
    Keyframe {
        frame: FrameIndex(frame),
        snapshots: BTreeMap::new(),
        easing: Easing::Linear,
    }
}

#[test]
fn insert_keeps_frames_sorted() {
    let mut tl = Timeline::new();
    for f in [30, 0, 10, 20] {
        assert!(tl.insert(key(f)).is_none());
    }
    let frames: Vec<u64> = tl.iter().map(|k| k.frame.0).collect();
    assert_eq!(frames, vec![0, 10, 20, 30]);
    assert!(tl.validate().is_ok());
}

#[test]
fn insert_at_existing_frame_replaces() {
    let mut tl = Timeline::new();
    tl.insert(key(10));
    let mut eased = key(10);
    eased.easing = Easing::EaseIn;
    let replaced = tl.insert(eased).unwrap();
    assert_eq!(replaced.easing, Easing::Linear);
    assert_eq!(tl.len(), 1);
    assert_eq!(tl.get(FrameIndex(10)).unwrap().easing, Easing::EaseIn);
}

#[test]
fn remove_drops_only_the_matching_frame() {
    let mut tl: Timeline = [key(0), key(5), key(9)].into_iter().collect();
    assert!(tl.remove(FrameIndex(4)).is_none());
    assert_eq!(tl.remove(FrameIndex(5)).unwrap().frame, FrameIndex(5));
    let frames: Vec<u64> = tl.iter().map(|k| k.frame.0).collect();
    assert_eq!(frames, vec![0, 9]);
}

#[test]
fn capture_deep_copies_every_path() {
    let a = PathData::with_id("a".into(), vec![PathCommand::move_to(0.0, 0.0)]);
    let b = PathData::with_id("b".into(), vec![PathCommand::line_to(1.0, 1.0)]);
    let mut layers = vec![layer_with(vec![a]), layer_with(vec![b])];

    let mut tl = Timeline::new();
    tl.insert(Keyframe::capture(FrameIndex(3), Easing::EaseOut, &layers));

    layers[0].paths[0].commands[0] = PathCommand::move_to(9.0, 9.0);

    let k = tl.get(FrameIndex(3)).unwrap();
    assert_eq!(k.easing, Easing::EaseOut);
    assert_eq!(k.snapshots.len(), 2);
    assert_eq!(
        k.snapshot(&"a".into()),
        Some(&[PathCommand::move_to(0.0, 0.0)][..])
    );
}

#[test]
fn qualifying_filters_by_snapshot_membership() {
    let mut with_a = key(4);
    with_a.snapshots.insert("a".into(), Vec::new());
    let tl: Timeline = [key(0), with_a, key(8)].into_iter().collect();
    let id = PathId::from("a");
    let frames: Vec<u64> = tl.qualifying(&id).map(|k| k.frame.0).collect();
    assert_eq!(frames, vec![4]);
}

#[test]
fn validate_rejects_unsorted_or_duplicate_frames() {
    let json = r#"[
        {"frame": 5, "snapshots": {}, "easing": "linear"},
        {"frame": 5, "snapshots": {}}
    ]"#;
    let tl: Timeline = serde_json::from_str(json).unwrap();
    let err = tl.validate().unwrap_err();
    assert!(matches!(err, NottieError::Animation(_)));
}
