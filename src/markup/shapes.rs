use crate::{
    foundation::core::Point,
    ir::path::{PathCommand, PathData},
};

/// Control-point distance, as a fraction of the radius, for approximating a
/// quarter ellipse with one cubic Bézier.
pub const KAPPA: f64 = 0.5522847498;

/// Declarative primitive shapes accepted from markup.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle; `rx`/`ry` round the corners.
    Rect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// Horizontal corner radius.
        rx: f64,
        /// Vertical corner radius.
        ry: f64,
    },
    /// Circle.
    Circle {
        /// Center x.
        cx: f64,
        /// Center y.
        cy: f64,
        /// Radius.
        r: f64,
    },
    /// Axis-aligned ellipse.
    Ellipse {
        /// Center x.
        cx: f64,
        /// Center y.
        cy: f64,
        /// Horizontal radius.
        rx: f64,
        /// Vertical radius.
        ry: f64,
    },
    /// Closed vertex run.
    Polygon(Vec<Point>),
    /// Open vertex run.
    Polyline(Vec<Point>),
    /// Single segment.
    Line {
        /// Start x.
        x1: f64,
        /// Start y.
        y1: f64,
        /// End x.
        x2: f64,
        /// End y.
        y2: f64,
    },
}

/// Paint attributes copied from a markup element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeStyle {
    /// `fill` attribute.
    pub fill: Option<String>,
    /// `stroke` attribute.
    pub stroke: Option<String>,
    /// `stroke-width` attribute.
    pub stroke_width: Option<f64>,
}

impl ShapeStyle {
    /// Drop `"none"`/empty paints and zero stroke widths.
    pub fn normalize(self) -> Self {
        fn paint(p: Option<String>) -> Option<String> {
            p.filter(|s| !s.is_empty() && s != "none")
        }
        Self {
            fill: paint(self.fill),
            stroke: paint(self.stroke),
            stroke_width: self.stroke_width.filter(|w| *w != 0.0 && !w.is_nan()),
        }
    }
}

/// Convert a primitive to a path with a fresh id.
///
/// Returns `None` for degenerate input: a zero width, height or radius, or a
/// vertex run with fewer than two points.
pub fn shape_to_path(shape: &Shape, style: ShapeStyle) -> Option<PathData> {
    Some(styled_path(shape_commands(shape)?, style))
}

/// Wrap commands in a fresh path carrying the normalized style.
pub(crate) fn styled_path(commands: Vec<PathCommand>, style: ShapeStyle) -> PathData {
    let style = style.normalize();
    let mut path = PathData::new(commands);
    path.fill = style.fill;
    path.stroke = style.stroke;
    path.stroke_width = style.stroke_width;
    path
}

/// The command sequence of a primitive, or `None` when it is degenerate.
pub fn shape_commands(shape: &Shape) -> Option<Vec<PathCommand>> {
    match *shape {
        Shape::Rect {
            x,
            y,
            width,
            height,
            rx,
            ry,
        } => {
            if width == 0.0 || height == 0.0 {
                return None;
            }
            Some(rect_commands(x, y, width, height, rx, ry))
        }
        Shape::Circle { cx, cy, r } => {
            if r == 0.0 {
                return None;
            }
            Some(ellipse_commands(cx, cy, r, r))
        }
        Shape::Ellipse { cx, cy, rx, ry } => {
            if rx == 0.0 || ry == 0.0 {
                return None;
            }
            Some(ellipse_commands(cx, cy, rx, ry))
        }
        Shape::Polygon(ref pts) => {
            let mut cmds = vertex_run(pts)?;
            cmds.push(PathCommand::ClosePath);
            Some(cmds)
        }
        Shape::Polyline(ref pts) => vertex_run(pts),
        Shape::Line { x1, y1, x2, y2 } => Some(vec![
            PathCommand::move_to(x1, y1),
            PathCommand::line_to(x2, y2),
        ]),
    }
}

fn rect_commands(x: f64, y: f64, w: f64, h: f64, rx: f64, ry: f64) -> Vec<PathCommand> {
    if rx == 0.0 && ry == 0.0 {
        return vec![
            PathCommand::move_to(x, y),
            PathCommand::line_to(x + w, y),
            PathCommand::line_to(x + w, y + h),
            PathCommand::line_to(x, y + h),
            PathCommand::ClosePath,
        ];
    }

    let rx = rx.min(w / 2.0);
    let ry = ry.min(h / 2.0);
    let (kx, ky) = (rx * KAPPA, ry * KAPPA);
    let pt = Point::new;

    // Clockwise from the end of the top-left corner.
    vec![
        PathCommand::move_to(x + rx, y),
        PathCommand::line_to(x + w - rx, y),
        PathCommand::cubic_to(
            pt(x + w - rx + kx, y),
            pt(x + w, y + ry - ky),
            pt(x + w, y + ry),
        ),
        PathCommand::line_to(x + w, y + h - ry),
        PathCommand::cubic_to(
            pt(x + w, y + h - ry + ky),
            pt(x + w - rx + kx, y + h),
            pt(x + w - rx, y + h),
        ),
        PathCommand::line_to(x + rx, y + h),
        PathCommand::cubic_to(
            pt(x + rx - kx, y + h),
            pt(x, y + h - ry + ky),
            pt(x, y + h - ry),
        ),
        PathCommand::line_to(x, y + ry),
        PathCommand::cubic_to(pt(x, y + ry - ky), pt(x + rx - kx, y), pt(x + rx, y)),
        PathCommand::ClosePath,
    ]
}

fn ellipse_commands(cx: f64, cy: f64, rx: f64, ry: f64) -> Vec<PathCommand> {
    let (kx, ky) = (rx * KAPPA, ry * KAPPA);
    let pt = Point::new;
    vec![
        PathCommand::move_to(cx + rx, cy),
        PathCommand::cubic_to(pt(cx + rx, cy + ky), pt(cx + kx, cy + ry), pt(cx, cy + ry)),
        PathCommand::cubic_to(pt(cx - kx, cy + ry), pt(cx - rx, cy + ky), pt(cx - rx, cy)),
        PathCommand::cubic_to(pt(cx - rx, cy - ky), pt(cx - kx, cy - ry), pt(cx, cy - ry)),
        PathCommand::cubic_to(pt(cx + kx, cy - ry), pt(cx + rx, cy - ky), pt(cx + rx, cy)),
        PathCommand::ClosePath,
    ]
}

fn vertex_run(pts: &[Point]) -> Option<Vec<PathCommand>> {
    let (first, rest) = pts.split_first()?;
    if rest.is_empty() {
        return None;
    }
    let mut cmds = Vec::with_capacity(pts.len() + 1);
    cmds.push(PathCommand::MoveTo { to: *first });
    cmds.extend(rest.iter().map(|&to| PathCommand::LineTo { to }));
    Some(cmds)
}

#[cfg(test)]
#[path = "../../tests/unit/markup/shapes.rs"]
mod tests;
