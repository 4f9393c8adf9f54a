use kurbo::PathEl;
use smallvec::SmallVec;

use crate::{
    foundation::core::{BezPath, Point},
    ir::ids::PathId,
};

/// One drawing instruction of a path, in absolute coordinates.
///
/// Each variant carries exactly the points its kind needs, so a command can
/// never hold the wrong number of points.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum PathCommand {
    /// Start a new subpath at `to`.
    MoveTo {
        /// Subpath start point.
        to: Point,
    },
    /// Straight segment to `to`.
    LineTo {
        /// Segment end point.
        to: Point,
    },
    /// Cubic Bézier segment.
    CubicBezierTo {
        /// First control point.
        ctrl1: Point,
        /// Second control point.
        ctrl2: Point,
        /// Segment end point.
        to: Point,
    },
    /// Quadratic Bézier segment.
    QuadraticBezierTo {
        /// Control point.
        ctrl: Point,
        /// Segment end point.
        to: Point,
    },
    /// Close the current subpath.
    ClosePath,
}

/// Discriminant of a [`PathCommand`], without its points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// [`PathCommand::MoveTo`].
    MoveTo,
    /// [`PathCommand::LineTo`].
    LineTo,
    /// [`PathCommand::CubicBezierTo`].
    CubicBezierTo,
    /// [`PathCommand::QuadraticBezierTo`].
    QuadraticBezierTo,
    /// [`PathCommand::ClosePath`].
    ClosePath,
}

impl CommandKind {
    /// Number of points a command of this kind carries.
    pub fn arity(self) -> usize {
        match self {
            Self::MoveTo | Self::LineTo => 1,
            Self::CubicBezierTo => 3,
            Self::QuadraticBezierTo => 2,
            Self::ClosePath => 0,
        }
    }
}

impl PathCommand {
    /// A move to `(x, y)`.
    pub fn move_to(x: f64, y: f64) -> Self {
        Self::MoveTo {
            to: Point::new(x, y),
        }
    }

    /// A line to `(x, y)`.
    pub fn line_to(x: f64, y: f64) -> Self {
        Self::LineTo {
            to: Point::new(x, y),
        }
    }

    /// A cubic Bézier segment.
    pub fn cubic_to(ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        Self::CubicBezierTo { ctrl1, ctrl2, to }
    }

    /// A quadratic Bézier segment.
    pub fn quad_to(ctrl: Point, to: Point) -> Self {
        Self::QuadraticBezierTo { ctrl, to }
    }

    /// The kind of this command.
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::MoveTo { .. } => CommandKind::MoveTo,
            Self::LineTo { .. } => CommandKind::LineTo,
            Self::CubicBezierTo { .. } => CommandKind::CubicBezierTo,
            Self::QuadraticBezierTo { .. } => CommandKind::QuadraticBezierTo,
            Self::ClosePath => CommandKind::ClosePath,
        }
    }

    /// Points in storage order: controls first, end point last.
    pub fn points(&self) -> SmallVec<[Point; 3]> {
        match *self {
            Self::MoveTo { to } | Self::LineTo { to } => smallvec::smallvec![to],
            Self::CubicBezierTo { ctrl1, ctrl2, to } => smallvec::smallvec![ctrl1, ctrl2, to],
            Self::QuadraticBezierTo { ctrl, to } => smallvec::smallvec![ctrl, to],
            Self::ClosePath => SmallVec::new(),
        }
    }

    /// The point the pen rests on after this command, if it carries one.
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            Self::MoveTo { to }
            | Self::LineTo { to }
            | Self::CubicBezierTo { to, .. }
            | Self::QuadraticBezierTo { to, .. } => Some(to),
            Self::ClosePath => None,
        }
    }

    /// Mutable access to the point at `index` in [`PathCommand::points`] order.
    pub fn point_mut(&mut self, index: usize) -> Option<&mut Point> {
        match (self, index) {
            (Self::MoveTo { to } | Self::LineTo { to }, 0) => Some(to),
            (Self::CubicBezierTo { ctrl1, .. }, 0) => Some(ctrl1),
            (Self::CubicBezierTo { ctrl2, .. }, 1) => Some(ctrl2),
            (Self::CubicBezierTo { to, .. }, 2) => Some(to),
            (Self::QuadraticBezierTo { ctrl, .. }, 0) => Some(ctrl),
            (Self::QuadraticBezierTo { to, .. }, 1) => Some(to),
            _ => None,
        }
    }

    /// Interpolate every point toward `other` at `t`.
    ///
    /// Returns `None` when the two commands are of different kinds.
    pub fn lerp(&self, other: &Self, t: f64) -> Option<Self> {
        let l = |a: Point, b: Point| a.lerp(b, t);
        Some(match (*self, *other) {
            (Self::MoveTo { to: a }, Self::MoveTo { to: b }) => Self::MoveTo { to: l(a, b) },
            (Self::LineTo { to: a }, Self::LineTo { to: b }) => Self::LineTo { to: l(a, b) },
            (
                Self::CubicBezierTo {
                    ctrl1: a1,
                    ctrl2: a2,
                    to: a,
                },
                Self::CubicBezierTo {
                    ctrl1: b1,
                    ctrl2: b2,
                    to: b,
                },
            ) => Self::CubicBezierTo {
                ctrl1: l(a1, b1),
                ctrl2: l(a2, b2),
                to: l(a, b),
            },
            (
                Self::QuadraticBezierTo { ctrl: ac, to: a },
                Self::QuadraticBezierTo { ctrl: bc, to: b },
            ) => Self::QuadraticBezierTo {
                ctrl: l(ac, bc),
                to: l(a, b),
            },
            (Self::ClosePath, Self::ClosePath) => Self::ClosePath,
            _ => return None,
        })
    }
}

/// A single drawable path with optional paint.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathData {
    /// Stable identity, used as the key into keyframe snapshots.
    pub id: PathId,
    /// Drawing sequence; order is significant.
    pub commands: Vec<PathCommand>,
    /// Fill paint (hex or named color).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Stroke paint (hex or named color).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Stroke width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

impl PathData {
    /// New unpainted path with a fresh id.
    pub fn new(commands: Vec<PathCommand>) -> Self {
        Self::with_id(PathId::new_v4(), commands)
    }

    /// New unpainted path with the given id.
    pub fn with_id(id: PathId, commands: Vec<PathCommand>) -> Self {
        Self {
            id,
            commands,
            fill: None,
            stroke: None,
            stroke_width: None,
        }
    }

    /// Convert the command sequence to a [`BezPath`].
    pub fn to_bez_path(&self) -> BezPath {
        commands_to_bez_path(&self.commands)
    }
}

/// Convert a command sequence to a [`BezPath`].
///
/// kurbo requires every subpath to open with a `MoveTo`; drawing commands that
/// arrive without one start from the origin or, after a close, from the start
/// of the closed subpath.
pub fn commands_to_bez_path(commands: &[PathCommand]) -> BezPath {
    let mut path = BezPath::new();
    let mut subpath_start = Point::ZERO;
    let mut needs_move = true;
    for cmd in commands {
        let el = match *cmd {
            PathCommand::MoveTo { to } => {
                subpath_start = to;
                needs_move = false;
                path.push(PathEl::MoveTo(to));
                continue;
            }
            PathCommand::LineTo { to } => PathEl::LineTo(to),
            PathCommand::CubicBezierTo { ctrl1, ctrl2, to } => PathEl::CurveTo(ctrl1, ctrl2, to),
            PathCommand::QuadraticBezierTo { ctrl, to } => PathEl::QuadTo(ctrl, to),
            PathCommand::ClosePath => {
                if !needs_move {
                    path.push(PathEl::ClosePath);
                    needs_move = true;
                }
                continue;
            }
        };
        if needs_move {
            path.push(PathEl::MoveTo(subpath_start));
            needs_move = false;
        }
        path.push(el);
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/ir/path.rs"]
mod tests;
