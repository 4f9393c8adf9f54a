use std::collections::VecDeque;

use crate::{
    animation::timeline::{Keyframe, Timeline},
    foundation::{
        core::{Canvas, FrameIndex},
        error::NottieResult,
    },
    ir::{ids::LayerId, layer::Layer, path::PathData},
    state::document::AnimationState,
};

/// Default number of edits kept on each of the undo and redo stacks.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// The parts of a state replaced wholesale by imports and clears.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// All layers.
    pub layers: Vec<Layer>,
    /// All keyframes.
    pub timeline: Timeline,
    /// Playhead.
    pub current_frame: FrameIndex,
    /// Stage size.
    pub canvas: Canvas,
}

/// One recorded change to an [`AnimationState`].
///
/// An edit carries everything needed to perform it again, and
/// [`Edit::inverse`] carries everything needed to take it back.
#[derive(Clone, Debug, PartialEq)]
pub enum Edit {
    /// Insert `layer` at `index` in the layer stack.
    InsertLayer {
        /// Stack position.
        index: usize,
        /// The inserted layer.
        layer: Layer,
    },
    /// Remove `layer`, which sat at `index`.
    RemoveLayer {
        /// Stack position it is restored to.
        index: usize,
        /// The removed layer, paths included.
        layer: Layer,
    },
    /// Insert `path` at `index` in layer `layer`.
    InsertPath {
        /// Owning layer.
        layer: LayerId,
        /// Position within the layer.
        index: usize,
        /// The inserted path.
        path: PathData,
    },
    /// Remove `path`, which sat at `index` in layer `layer`.
    RemovePath {
        /// Owning layer.
        layer: LayerId,
        /// Position it is restored to.
        index: usize,
        /// The removed path.
        path: PathData,
    },
    /// Both sides share the same path id.
    ReplacePath {
        /// Path before the change.
        before: PathData,
        /// Path after the change.
        after: PathData,
    },
    /// Flip a layer's visibility. Its own inverse.
    ToggleVisibility(LayerId),
    /// Flip a layer's lock flag. Its own inverse.
    ToggleLock(LayerId),
    /// Covers adding, replacing and removing the keyframe at `frame`.
    SetKeyframe {
        /// Keyframe position.
        frame: FrameIndex,
        /// Keyframe there before, if any.
        before: Option<Keyframe>,
        /// Keyframe there after, if any.
        after: Option<Keyframe>,
    },
    /// Move the playhead.
    SetCurrentFrame {
        /// Old playhead.
        before: FrameIndex,
        /// New playhead.
        after: FrameIndex,
    },
    /// `(total_frames, current_frame)` pairs.
    SetTotalFrames {
        /// Old pair.
        before: (u64, FrameIndex),
        /// New pair.
        after: (u64, FrameIndex),
    },
    /// Change the frame rate.
    SetFps {
        /// Old rate.
        before: u32,
        /// New rate.
        after: u32,
    },
    /// Resize the stage.
    SetCanvas {
        /// Old size.
        before: Canvas,
        /// New size.
        after: Canvas,
    },
    /// Change the stage color.
    SetBackground {
        /// Old color.
        before: String,
        /// New color.
        after: String,
    },
    /// Swap layers, keyframes, playhead and canvas at once.
    ReplaceScene {
        /// Scene before the swap.
        before: Box<Scene>,
        /// Scene after the swap.
        after: Box<Scene>,
    },
}

impl Edit {
    /// The edit that undoes `self`.
    pub fn inverse(&self) -> Edit {
        match self.clone() {
            Self::InsertLayer { index, layer } => Self::RemoveLayer { index, layer },
            Self::RemoveLayer { index, layer } => Self::InsertLayer { index, layer },
            Self::InsertPath { layer, index, path } => Self::RemovePath { layer, index, path },
            Self::RemovePath { layer, index, path } => Self::InsertPath { layer, index, path },
            Self::ReplacePath { before, after } => Self::ReplacePath {
                before: after,
                after: before,
            },
            toggle @ (Self::ToggleVisibility(_) | Self::ToggleLock(_)) => toggle,
            Self::SetKeyframe {
                frame,
                before,
                after,
            } => Self::SetKeyframe {
                frame,
                before: after,
                after: before,
            },
            Self::SetCurrentFrame { before, after } => Self::SetCurrentFrame {
                before: after,
                after: before,
            },
            Self::SetTotalFrames { before, after } => Self::SetTotalFrames {
                before: after,
                after: before,
            },
            Self::SetFps { before, after } => Self::SetFps {
                before: after,
                after: before,
            },
            Self::SetCanvas { before, after } => Self::SetCanvas {
                before: after,
                after: before,
            },
            Self::SetBackground { before, after } => Self::SetBackground {
                before: after,
                after: before,
            },
            Self::ReplaceScene { before, after } => Self::ReplaceScene {
                before: after,
                after: before,
            },
        }
    }

    /// Perform the edit on `state`. Edits naming layers or paths that no
    /// longer exist change nothing.
    pub fn apply(&self, state: &mut AnimationState) {
        match self {
            Self::InsertLayer { index, layer } => {
                let index = (*index).min(state.layers.len());
                state.layers.insert(index, layer.clone());
            }
            Self::RemoveLayer { layer, .. } => {
                state.layers.retain(|l| l.id != layer.id);
            }
            Self::InsertPath { layer, index, path } => {
                if let Some(l) = state.layer_mut(layer) {
                    let index = (*index).min(l.paths.len());
                    l.paths.insert(index, path.clone());
                }
            }
            Self::RemovePath { layer, path, .. } => {
                if let Some(l) = state.layer_mut(layer) {
                    l.paths.retain(|p| p.id != path.id);
                }
            }
            Self::ReplacePath { after, .. } => {
                if let Some(p) = state.path_mut(&after.id) {
                    *p = after.clone();
                }
            }
            Self::ToggleVisibility(id) => {
                if let Some(l) = state.layer_mut(id) {
                    l.visible = !l.visible;
                }
            }
            Self::ToggleLock(id) => {
                if let Some(l) = state.layer_mut(id) {
                    l.locked = !l.locked;
                }
            }
            Self::SetKeyframe { frame, after, .. } => {
                state.timeline.remove(*frame);
                if let Some(key) = after {
                    state.timeline.insert(key.clone());
                }
            }
            Self::SetCurrentFrame { after, .. } => state.current_frame = *after,
            Self::SetTotalFrames { after, .. } => {
                (state.total_frames, state.current_frame) = *after;
            }
            Self::SetFps { after, .. } => state.fps = *after,
            Self::SetCanvas { after, .. } => state.canvas = *after,
            Self::SetBackground { after, .. } => state.background_color.clone_from(after),
            Self::ReplaceScene { after, .. } => {
                let scene = after.as_ref().clone();
                state.layers = scene.layers;
                state.timeline = scene.timeline;
                state.current_frame = scene.current_frame;
                state.canvas = scene.canvas;
            }
        }
    }
}

/// Bounded undo and redo stacks.
#[derive(Clone, Debug)]
pub struct History {
    undo: VecDeque<Edit>,
    redo: VecDeque<Edit>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl History {
    /// Empty history with [`DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `capacity` edits per stack; the oldest are dropped first.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record an edit that has already been applied. Clears the redo stack.
    pub fn record(&mut self, edit: Edit) {
        self.redo.clear();
        push_bounded(&mut self.undo, edit, self.capacity);
    }

    /// Revert the most recent edit. Returns `false` when there is none.
    pub fn undo(&mut self, state: &mut AnimationState) -> bool {
        let Some(edit) = self.undo.pop_back() else {
            return false;
        };
        edit.inverse().apply(state);
        push_bounded(&mut self.redo, edit, self.capacity);
        true
    }

    /// Re-apply the most recently undone edit. Returns `false` when there is none.
    pub fn redo(&mut self, state: &mut AnimationState) -> bool {
        let Some(edit) = self.redo.pop_back() else {
            return false;
        };
        edit.apply(state);
        push_bounded(&mut self.undo, edit, self.capacity);
        true
    }

    /// Whether an edit is available to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether an edit is available to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Edits on the undo stack.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Edits on the redo stack.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Forget every recorded edit.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

fn push_bounded(stack: &mut VecDeque<Edit>, edit: Edit, capacity: usize) {
    if stack.len() == capacity {
        stack.pop_front();
    }
    stack.push_back(edit);
}

/// A state together with its edit history.
#[derive(Clone, Debug, Default)]
pub struct Session {
    /// The live state.
    pub state: AnimationState,
    /// Edits recorded against `state`.
    pub history: History,
}

impl Session {
    /// Start a session with an empty history.
    pub fn new(state: AnimationState) -> Self {
        Self {
            state,
            history: History::new(),
        }
    }

    /// Run a mutation and record the edit it reports.
    ///
    /// Returns whether anything was recorded.
    pub fn perform<E>(&mut self, f: impl FnOnce(&mut AnimationState) -> E) -> bool
    where
        E: Into<Option<Edit>>,
    {
        match f(&mut self.state).into() {
            Some(edit) => {
                self.history.record(edit);
                true
            }
            None => false,
        }
    }

    /// Like [`Session::perform`], for mutations that can fail.
    ///
    /// Errors are returned unchanged and leave the history untouched.
    pub fn try_perform<E>(
        &mut self,
        f: impl FnOnce(&mut AnimationState) -> NottieResult<E>,
    ) -> NottieResult<bool>
    where
        E: Into<Option<Edit>>,
    {
        let edit = f(&mut self.state)?;
        Ok(self.perform(|_| edit))
    }

    /// Revert the most recent edit. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.state)
    }

    /// Reapply the most recently undone edit.
    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.state)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/history.rs"]
mod tests;
