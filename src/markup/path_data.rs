use svgtypes::{PathParser, PathSegment};

use crate::{
    foundation::{
        core::Point,
        error::{NottieError, NottieResult},
    },
    ir::path::PathCommand,
};

/// Parse SVG path data (the `d` attribute grammar) into absolute commands.
///
/// Tokenizing is done by [`svgtypes::PathParser`]. `H`/`V`, `S`/`T` and
/// relative forms are then resolved into the five IR command kinds. Elliptical
/// arcs (`A`) are degraded to a single straight `LineTo` their endpoint.
/// Malformed input is rejected with [`NottieError::Parse`].
#[tracing::instrument(level = "trace", skip(d), fields(len = d.len()))]
pub fn parse_path_data(d: &str) -> NottieResult<Vec<PathCommand>> {
    let mut pen = Pen::default();
    for segment in PathParser::from(d) {
        let segment =
            segment.map_err(|e| NottieError::parse(format!("invalid path data: {e}")))?;
        pen.segment(segment);
    }
    Ok(pen.commands)
}

/// Resolves tokenized segments against the current point.
#[derive(Default)]
struct Pen {
    commands: Vec<PathCommand>,
    current: Point,
    subpath_start: Point,
}

impl Pen {
    fn segment(&mut self, segment: PathSegment) {
        match segment {
            PathSegment::MoveTo { abs, x, y } => {
                let to = self.resolve(abs, x, y);
                self.current = to;
                self.subpath_start = to;
                self.commands.push(PathCommand::MoveTo { to });
            }
            PathSegment::LineTo { abs, x, y } => {
                let to = self.resolve(abs, x, y);
                self.emit_line(to);
            }
            PathSegment::HorizontalLineTo { abs, x } => {
                let x = if abs { x } else { self.current.x + x };
                self.emit_line(Point::new(x, self.current.y));
            }
            PathSegment::VerticalLineTo { abs, y } => {
                let y = if abs { y } else { self.current.y + y };
                self.emit_line(Point::new(self.current.x, y));
            }
            PathSegment::CurveTo {
                abs,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let ctrl1 = self.resolve(abs, x1, y1);
                let ctrl2 = self.resolve(abs, x2, y2);
                let to = self.resolve(abs, x, y);
                self.emit_cubic(ctrl1, ctrl2, to);
            }
            PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                let ctrl1 = match self.commands.last() {
                    Some(PathCommand::CubicBezierTo { ctrl2, .. }) => reflect(*ctrl2, self.current),
                    _ => self.current,
                };
                let ctrl2 = self.resolve(abs, x2, y2);
                let to = self.resolve(abs, x, y);
                self.emit_cubic(ctrl1, ctrl2, to);
            }
            PathSegment::Quadratic { abs, x1, y1, x, y } => {
                let ctrl = self.resolve(abs, x1, y1);
                let to = self.resolve(abs, x, y);
                self.emit_quad(ctrl, to);
            }
            PathSegment::SmoothQuadratic { abs, x, y } => {
                let ctrl = match self.commands.last() {
                    Some(PathCommand::QuadraticBezierTo { ctrl, .. }) => {
                        reflect(*ctrl, self.current)
                    }
                    _ => self.current,
                };
                let to = self.resolve(abs, x, y);
                self.emit_quad(ctrl, to);
            }
            PathSegment::EllipticalArc { abs, x, y, .. } => {
                let to = self.resolve(abs, x, y);
                tracing::trace!(x = to.x, y = to.y, "elliptical arc degraded to a line");
                self.emit_line(to);
            }
            PathSegment::ClosePath { .. } => {
                self.commands.push(PathCommand::ClosePath);
                self.current = self.subpath_start;
            }
        }
    }

    /// Absolute point for `x y`, offset from the current point when relative.
    fn resolve(&self, abs: bool, x: f64, y: f64) -> Point {
        if abs {
            Point::new(x, y)
        } else {
            Point::new(self.current.x + x, self.current.y + y)
        }
    }

    fn emit_line(&mut self, to: Point) {
        self.commands.push(PathCommand::LineTo { to });
        self.current = to;
    }

    fn emit_cubic(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.commands
            .push(PathCommand::CubicBezierTo { ctrl1, ctrl2, to });
        self.current = to;
    }

    fn emit_quad(&mut self, ctrl: Point, to: Point) {
        self.commands.push(PathCommand::QuadraticBezierTo { ctrl, to });
        self.current = to;
    }
}

/// Mirror `ctrl` through `about`.
fn reflect(ctrl: Point, about: Point) -> Point {
    Point::new(2.0 * about.x - ctrl.x, 2.0 * about.y - ctrl.y)
}

#[cfg(test)]
#[path = "../../tests/unit/markup/path_data.rs"]
mod tests;
