use pretty_assertions::assert_eq;

use super::*;
use crate::{animation::ease::Easing, foundation::error::NottieError, ir::path::PathCommand};

fn session_with_layer() -> (Session, LayerId) {
    let mut session = Session::default();
    let layer = Layer::new("main");
    let id = layer.id.clone();
    session.perform(|s| s.add_layer(layer));
    (session, id)
}

#[test]
fn every_edit_inverse_round_trips() {
    let (mut session, layer) = session_with_layer();
    let path = PathData::with_id("p".into(), vec![PathCommand::move_to(1.0, 2.0)]);
    let path_id = path.id.clone();

    let steps: Vec<Box<dyn Fn(&mut AnimationState) -> Option<Edit>>> = vec![
        Box::new(move |s: &mut AnimationState| s.add_path_to_layer(&layer, path.clone())),
        Box::new(|s: &mut AnimationState| Some(s.add_keyframe(FrameIndex(0), Easing::EaseIn))),
        Box::new({
            let id = path_id.clone();
            move |s: &mut AnimationState| s.update_path(&id, |p| p.fill = Some("#00ff00".into()))
        }),
        Box::new(|s: &mut AnimationState| Some(s.add_keyframe(FrameIndex(0), Easing::Linear))),
        Box::new(|s: &mut AnimationState| s.set_fps(60)),
        Box::new(|s: &mut AnimationState| s.set_current_frame(12)),
        Box::new(|s: &mut AnimationState| s.set_total_frames(10)),
        Box::new(|s: &mut AnimationState| s.set_canvas_size(Canvas::new(10.0, 20.0).unwrap())),
        Box::new(|s: &mut AnimationState| s.set_background_color("#000000")),
        Box::new({
            let id = path_id.clone();
            move |s: &mut AnimationState| s.remove_path(&id)
        }),
        Box::new(|s: &mut AnimationState| s.remove_keyframe(FrameIndex(0))),
        Box::new(|s: &mut AnimationState| Some(s.clear_all())),
    ];

    for step in &steps {
        let before = session.state.clone();
        assert!(session.perform(|s| step(s)));
        let after = session.state.clone();
        assert_ne!(before, after);

        assert!(session.undo());
        assert_eq!(session.state, before);
        assert!(session.redo());
        assert_eq!(session.state, after);
    }
}

#[test]
fn undo_restores_layer_position() {
    let (mut session, first) = session_with_layer();
    session.perform(|s| s.add_layer(Layer::new("second")));
    session.perform(|s| s.remove_layer(&first));
    assert_eq!(session.state.layers.len(), 1);
    session.undo();
    assert_eq!(session.state.layers[0].id, first);
    assert_eq!(session.state.layers[1].name, "second");
}

#[test]
fn toggles_are_self_inverse() {
    let (mut session, layer) = session_with_layer();
    session.perform(|s| s.toggle_layer_visibility(&layer));
    session.perform(|s| s.toggle_layer_lock(&layer));
    assert!(!session.state.layers[0].visible);
    assert!(session.state.layers[0].locked);
    session.undo();
    session.undo();
    assert!(session.state.layers[0].visible);
    assert!(!session.state.layers[0].locked);
}

#[test]
fn new_edit_clears_redo() {
    let (mut session, _) = session_with_layer();
    session.perform(|s| s.set_fps(24));
    session.undo();
    assert!(session.history.can_redo());
    session.perform(|s| s.set_fps(12));
    assert!(!session.history.can_redo());
    assert!(!session.redo());
}

#[test]
fn no_op_mutations_are_not_recorded() {
    let (mut session, _) = session_with_layer();
    let recorded = session.history.undo_len();
    assert!(!session.perform(|s| s.set_fps(30)));
    assert!(!session.perform(|s| s.remove_layer(&"ghost".into())));
    assert_eq!(session.history.undo_len(), recorded);
}

#[test]
fn stacks_are_bounded() {
    let mut history = History::with_capacity(3);
    let mut state = AnimationState::default();
    for fps in 1..=5 {
        if let Some(edit) = state.set_fps(fps + 30) {
            history.record(edit);
        }
    }
    assert_eq!(history.undo_len(), 3);
    while history.undo(&mut state) {}
    // The two oldest edits fell off, so undo stops at fps 32.
    assert_eq!(state.fps, 32);
    assert_eq!(history.redo_len(), 3);
}

#[test]
fn empty_history_does_nothing() {
    let mut session = Session::default();
    assert!(!session.undo());
    assert!(!session.redo());
    assert_eq!(session.state, AnimationState::default());
}

#[test]
fn fallible_imports_record_only_on_success() {
    let mut session = Session::default();
    let svg = r#"<svg width="40" height="30"><path d="M0 0 L5 5"/></svg>"#;
    assert!(session.try_perform(|s| s.import_svg(svg)).unwrap());
    assert_eq!(session.state.canvas.width, 40.0);
    assert_eq!(session.history.undo_len(), 1);

    let err = session
        .try_perform(|s| s.import_svg("<svg><path d='M0 0 L1'/></svg>"))
        .unwrap_err();
    assert!(matches!(err, NottieError::Parse(_)));
    assert_eq!(session.history.undo_len(), 1);

    assert!(session.undo());
    assert_eq!(session.state, AnimationState::default());
}
