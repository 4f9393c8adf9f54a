use std::collections::BTreeMap;

use crate::{
    animation::ease::Easing,
    foundation::{
        core::FrameIndex,
        error::{NottieError, NottieResult},
    },
    ir::{ids::PathId, layer::Layer, path::PathCommand},
};

/// Captured geometry of every path at one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    /// Frame the snapshot was taken at.
    pub frame: FrameIndex,
    /// Owned copies of each path's commands at capture time. Entries may name
    /// paths that have since been deleted; those are never sampled.
    pub snapshots: BTreeMap<PathId, Vec<PathCommand>>,
    /// Curve used on the way from this keyframe to the next one.
    #[serde(default)]
    pub easing: Easing,
}

impl Keyframe {
    /// Copy the current commands of every path across all `layers`.
    pub fn capture(frame: FrameIndex, easing: Easing, layers: &[Layer]) -> Self {
        let snapshots = layers
            .iter()
            .flat_map(|l| l.paths.iter())
            .map(|p| (p.id.clone(), p.commands.clone()))
            .collect();
        Self {
            frame,
            snapshots,
            easing,
        }
    }

    /// Commands captured for `id`, if this keyframe holds any.
    pub fn snapshot(&self, id: &PathId) -> Option<&[PathCommand]> {
        self.snapshots.get(id).map(Vec::as_slice)
    }
}

/// Keyframes sorted ascending by frame, at most one per frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    keys: Vec<Keyframe>,
}

impl Timeline {
    /// An empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key`, replacing any keyframe already at its frame.
    ///
    /// Returns the replaced keyframe.
    pub fn insert(&mut self, key: Keyframe) -> Option<Keyframe> {
        match self.keys.binary_search_by_key(&key.frame, |k| k.frame) {
            Ok(i) => Some(std::mem::replace(&mut self.keys[i], key)),
            Err(i) => {
                self.keys.insert(i, key);
                None
            }
        }
    }

    /// Drop the keyframe at `frame`. Neighbors are left untouched.
    pub fn remove(&mut self, frame: FrameIndex) -> Option<Keyframe> {
        let i = self.keys.binary_search_by_key(&frame, |k| k.frame).ok()?;
        Some(self.keys.remove(i))
    }

    /// Keyframe at exactly `frame`.
    pub fn get(&self, frame: FrameIndex) -> Option<&Keyframe> {
        let i = self.keys.binary_search_by_key(&frame, |k| k.frame).ok()?;
        Some(&self.keys[i])
    }

    /// All keyframes in frame order.
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Iterate keyframes in frame order.
    pub fn iter(&self) -> std::slice::Iter<'_, Keyframe> {
        self.keys.iter()
    }

    /// Number of keyframes.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether there are no keyframes.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Drop every keyframe.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Keyframes holding a snapshot of `id`, in frame order.
    pub fn qualifying<'a>(&'a self, id: &'a PathId) -> impl Iterator<Item = &'a Keyframe> + 'a {
        self.keys.iter().filter(move |k| k.snapshots.contains_key(id))
    }

    pub(crate) fn validate(&self) -> NottieResult<()> {
        for pair in self.keys.windows(2) {
            if pair[0].frame >= pair[1].frame {
                return Err(NottieError::animation(format!(
                    "keyframes must be strictly ascending by frame (frame {} follows frame {})",
                    pair[1].frame.0, pair[0].frame.0
                )));
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Keyframe;
    type IntoIter = std::slice::Iter<'a, Keyframe>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

impl FromIterator<Keyframe> for Timeline {
    fn from_iter<I: IntoIterator<Item = Keyframe>>(iter: I) -> Self {
        let mut timeline = Self::new();
        for key in iter {
            timeline.insert(key);
        }
        timeline
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
