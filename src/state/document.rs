use std::{borrow::Cow, ops::Range};

use rayon::prelude::*;

use crate::{
    animation::{
        ease::Easing,
        interpolate::sample_path,
        timeline::{Keyframe, Timeline},
    },
    foundation::{
        core::{Canvas, FrameIndex, Point},
        error::{NottieError, NottieResult},
    },
    ir::{
        ids::{LayerId, PathId},
        layer::Layer,
        path::{PathCommand, PathData},
    },
    markup::document::parse_svg,
    state::history::{Edit, Scene},
};

/// Lowest accepted frame rate.
pub const MIN_FPS: u32 = 1;
/// Highest accepted frame rate.
pub const MAX_FPS: u32 = 120;

/// Everything that makes up one animation project.
///
/// Mutating methods return the [`Edit`] they performed so callers can keep an
/// undo history; `None` means nothing changed (unknown id, out-of-range index,
/// or a value equal to the current one).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationState {
    /// Layers, bottom first.
    pub layers: Vec<Layer>,
    /// Keyframes shared by every path.
    #[serde(rename = "keyframes")]
    pub timeline: Timeline,
    /// Playhead; always below `total_frames`.
    pub current_frame: FrameIndex,
    /// Animation length in frames.
    pub total_frames: u64,
    /// Frames per second, in `MIN_FPS..=MAX_FPS`.
    pub fps: u32,
    /// Stage size.
    pub canvas: Canvas,
    /// Stage color (hex or named).
    pub background_color: String,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            layers: Vec::new(),
            timeline: Timeline::new(),
            current_frame: FrameIndex(0),
            total_frames: 60,
            fps: 30,
            canvas: Canvas::default(),
            background_color: "#ffffff".to_string(),
        }
    }
}

impl AnimationState {
    /// Parse a state from JSON and validate it.
    pub fn from_json(json: &str) -> NottieResult<Self> {
        let state: Self = serde_json::from_str(json)?;
        state.validate()?;
        Ok(state)
    }

    /// Serialize the state, pretty-printed or compact.
    pub fn to_json(&self, pretty: bool) -> NottieResult<String> {
        Ok(if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        })
    }

    /// Check the invariants a loaded state must satisfy.
    pub fn validate(&self) -> NottieResult<()> {
        if !(MIN_FPS..=MAX_FPS).contains(&self.fps) {
            return Err(NottieError::validation(format!(
                "fps must be in {MIN_FPS}..={MAX_FPS}, got {}",
                self.fps
            )));
        }
        if self.total_frames == 0 {
            return Err(NottieError::validation("total_frames must be >= 1"));
        }
        if self.current_frame.0 >= self.total_frames {
            return Err(NottieError::validation(format!(
                "current_frame {} is outside 0..{}",
                self.current_frame.0, self.total_frames
            )));
        }
        self.canvas.validate()?;
        self.timeline.validate()?;

        let mut seen = std::collections::HashSet::new();
        for path in self.layers.iter().flat_map(|l| l.paths.iter()) {
            if !seen.insert(&path.id) {
                return Err(NottieError::validation(format!("duplicate path id '{}'", path.id)));
            }
        }
        Ok(())
    }

    /// Layer `id`.
    pub fn layer(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| &l.id == id)
    }

    /// Mutable access to layer `id`. Changes made here bypass the edit log.
    pub fn layer_mut(&mut self, id: &LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| &l.id == id)
    }

    /// Path `id` in any layer.
    pub fn path(&self, id: &PathId) -> Option<&PathData> {
        self.layers.iter().find_map(|l| l.path(id))
    }

    /// Mutable access to path `id`. Changes made here bypass the edit log.
    pub fn path_mut(&mut self, id: &PathId) -> Option<&mut PathData> {
        self.layers.iter_mut().find_map(|l| l.path_mut(id))
    }

    /// Layer id and index of the path with `id`.
    fn locate_path(&self, id: &PathId) -> Option<(LayerId, usize)> {
        self.layers.iter().find_map(|l| {
            let i = l.paths.iter().position(|p| &p.id == id)?;
            Some((l.id.clone(), i))
        })
    }

    fn clamp_frame(&self, frame: u64) -> FrameIndex {
        FrameIndex(frame.min(self.total_frames.saturating_sub(1)))
    }

    fn commit(&mut self, edit: Edit) -> Edit {
        edit.apply(self);
        edit
    }

    // Layers and paths

    /// Append `layer` on top of the stack.
    pub fn add_layer(&mut self, layer: Layer) -> Edit {
        let index = self.layers.len();
        self.commit(Edit::InsertLayer { index, layer })
    }

    /// Remove layer `id` with all its paths.
    pub fn remove_layer(&mut self, id: &LayerId) -> Option<Edit> {
        let index = self.layers.iter().position(|l| &l.id == id)?;
        let layer = self.layers[index].clone();
        Some(self.commit(Edit::RemoveLayer { index, layer }))
    }

    /// Append `path` to layer `layer`.
    pub fn add_path_to_layer(&mut self, layer: &LayerId, path: PathData) -> Option<Edit> {
        let index = self.layer(layer)?.paths.len();
        Some(self.commit(Edit::InsertPath {
            layer: layer.clone(),
            index,
            path,
        }))
    }

    /// Remove path `id` from whichever layer holds it. Keyframe snapshots are kept.
    pub fn remove_path(&mut self, id: &PathId) -> Option<Edit> {
        let (layer, index) = self.locate_path(id)?;
        let path = self.path(id)?.clone();
        Some(self.commit(Edit::RemovePath { layer, index, path }))
    }

    /// Modify a path in place. The id is kept even if `f` changes it.
    pub fn update_path(&mut self, id: &PathId, f: impl FnOnce(&mut PathData)) -> Option<Edit> {
        let before = self.path(id)?.clone();
        let mut after = before.clone();
        f(&mut after);
        after.id = before.id.clone();
        if after == before {
            return None;
        }
        Some(self.commit(Edit::ReplacePath { before, after }))
    }

    /// Move one point of one command; `point` indexes [`PathCommand::points`].
    pub fn update_path_point(
        &mut self,
        id: &PathId,
        command: usize,
        point: usize,
        to: Point,
    ) -> Option<Edit> {
        let valid = self
            .path(id)?
            .commands
            .get(command)
            .is_some_and(|c| point < c.kind().arity());
        if !valid {
            return None;
        }
        self.update_path(id, |p| {
            if let Some(slot) = p.commands[command].point_mut(point) {
                *slot = to;
            }
        })
    }

    /// Flip the visibility of layer `id`.
    pub fn toggle_layer_visibility(&mut self, id: &LayerId) -> Option<Edit> {
        self.layer(id)?;
        Some(self.commit(Edit::ToggleVisibility(id.clone())))
    }

    /// Flip the lock flag of layer `id`.
    pub fn toggle_layer_lock(&mut self, id: &LayerId) -> Option<Edit> {
        self.layer(id)?;
        Some(self.commit(Edit::ToggleLock(id.clone())))
    }

    // Keyframes

    /// Snapshot every path into a keyframe at `frame`, replacing any keyframe
    /// already there.
    #[tracing::instrument(skip(self))]
    pub fn add_keyframe(&mut self, frame: FrameIndex, easing: Easing) -> Edit {
        let after = Keyframe::capture(frame, easing, &self.layers);
        tracing::debug!(paths = after.snapshots.len(), "keyframe captured");
        let before = self.timeline.get(frame).cloned();
        self.commit(Edit::SetKeyframe {
            frame,
            before,
            after: Some(after),
        })
    }

    /// Drop the keyframe at `frame`.
    pub fn remove_keyframe(&mut self, frame: FrameIndex) -> Option<Edit> {
        let before = self.timeline.get(frame)?.clone();
        Some(self.commit(Edit::SetKeyframe {
            frame,
            before: Some(before),
            after: None,
        }))
    }

    // Playback settings

    /// Move the playhead, clamped to `0..total_frames`.
    pub fn set_current_frame(&mut self, frame: u64) -> Option<Edit> {
        let after = self.clamp_frame(frame);
        (after != self.current_frame).then(|| {
            self.commit(Edit::SetCurrentFrame {
                before: self.current_frame,
                after,
            })
        })
    }

    /// Set the frame count (at least 1), pulling the playhead back inside.
    pub fn set_total_frames(&mut self, frames: u64) -> Option<Edit> {
        let total = frames.max(1);
        let current = FrameIndex(self.current_frame.0.min(total - 1));
        let before = (self.total_frames, self.current_frame);
        let after = (total, current);
        (after != before).then(|| self.commit(Edit::SetTotalFrames { before, after }))
    }

    /// Set the frame rate, clamped to `1..=120`.
    pub fn set_fps(&mut self, fps: u32) -> Option<Edit> {
        let after = fps.clamp(MIN_FPS, MAX_FPS);
        (after != self.fps).then(|| {
            self.commit(Edit::SetFps {
                before: self.fps,
                after,
            })
        })
    }

    /// Resize the stage. Paths are not rescaled.
    pub fn set_canvas_size(&mut self, canvas: Canvas) -> Option<Edit> {
        (canvas != self.canvas).then(|| {
            self.commit(Edit::SetCanvas {
                before: self.canvas,
                after: canvas,
            })
        })
    }

    /// Change the stage color.
    pub fn set_background_color(&mut self, color: impl Into<String>) -> Option<Edit> {
        let after = color.into();
        (after != self.background_color).then(|| {
            self.commit(Edit::SetBackground {
                before: self.background_color.clone(),
                after,
            })
        })
    }

    // Whole-scene operations

    fn scene(&self) -> Scene {
        Scene {
            layers: self.layers.clone(),
            timeline: self.timeline.clone(),
            current_frame: self.current_frame,
            canvas: self.canvas,
        }
    }

    /// Replace all layers, dropping every keyframe and rewinding to frame 0.
    pub fn import_layers(&mut self, layers: Vec<Layer>) -> Edit {
        let before = self.scene();
        let after = Scene {
            layers,
            timeline: Timeline::new(),
            current_frame: FrameIndex(0),
            canvas: self.canvas,
        };
        self.commit(Edit::ReplaceScene {
            before: Box::new(before),
            after: Box::new(after),
        })
    }

    /// Ingest SVG markup as the new scene, adopting its canvas size.
    #[tracing::instrument(skip(self, svg), fields(len = svg.len()))]
    pub fn import_svg(&mut self, svg: &str) -> NottieResult<Edit> {
        let parsed = parse_svg(svg)?;
        let canvas = Canvas::new(parsed.width, parsed.height)?;
        let before = self.scene();
        let after = Scene {
            layers: parsed.layers,
            timeline: Timeline::new(),
            current_frame: FrameIndex(0),
            canvas,
        };
        Ok(self.commit(Edit::ReplaceScene {
            before: Box::new(before),
            after: Box::new(after),
        }))
    }

    /// Drop every layer and keyframe.
    pub fn clear_all(&mut self) -> Edit {
        self.import_layers(Vec::new())
    }

    // Queries

    /// Commands of path `id` at `frame`, or `None` for an unknown id.
    pub fn path_at_frame(&self, id: &PathId, frame: FrameIndex) -> Option<Cow<'_, [PathCommand]>> {
        Some(sample_path(self.path(id)?, &self.timeline, frame))
    }

    /// Paths of visible layers, in z-order, with their geometry at `frame`.
    pub fn paths_at(&self, frame: FrameIndex) -> Vec<PathData> {
        self.layers
            .iter()
            .filter(|l| l.visible)
            .flat_map(|l| l.paths.iter())
            .map(|p| PathData {
                commands: sample_path(p, &self.timeline, frame).into_owned(),
                ..p.clone()
            })
            .collect()
    }

    /// [`AnimationState::paths_at`] the current frame.
    pub fn interpolated_paths(&self) -> Vec<PathData> {
        self.paths_at(self.current_frame)
    }

    /// [`AnimationState::paths_at`] for every frame in `frames`, sampled in
    /// parallel. The result is in frame order.
    pub fn sample_frames(&self, frames: Range<u64>) -> Vec<Vec<PathData>> {
        frames
            .into_par_iter()
            .map(|f| self.paths_at(FrameIndex(f)))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/document.rs"]
mod tests;
