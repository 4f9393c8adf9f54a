use crate::foundation::error::{NottieError, NottieResult};

pub use kurbo::{BezPath, Point};

/// Zero-based frame number on the animation timeline.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Frames elapsed from `earlier` to `self`, or `None` when `earlier` is later.
    pub fn since(self, earlier: FrameIndex) -> Option<u64> {
        self.0.checked_sub(earlier.0)
    }
}

impl From<u64> for FrameIndex {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Pixel dimensions of the drawing surface.
///
/// Markup dimensions may be fractional, so both axes are `f64`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Canvas {
    /// Construct a canvas, rejecting non-positive or non-finite sizes.
    pub fn new(width: f64, height: f64) -> NottieResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    pub(crate) fn validate(&self) -> NottieResult<()> {
        if !(self.width.is_finite() && self.height.is_finite()) {
            return Err(NottieError::validation("canvas width/height must be finite"));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(NottieError::validation("canvas width/height must be > 0"));
        }
        Ok(())
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
