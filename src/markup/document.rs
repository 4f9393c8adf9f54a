use std::str::FromStr;

use roxmltree::{Document, Node, ParsingOptions};
use svgtypes::{Length, PointsParser};

use crate::{
    foundation::{
        core::Point,
        error::{NottieError, NottieResult},
    },
    ir::{
        layer::Layer,
        path::PathData,
    },
    markup::{
        path_data::parse_path_data,
        shapes::{Shape, ShapeStyle, shape_to_path, styled_path},
    },
};

/// Name given to the single layer produced by an import.
pub const IMPORTED_LAYER_NAME: &str = "Imported SVG";

const DEFAULT_WIDTH: f64 = 800.0;
const DEFAULT_HEIGHT: f64 = 600.0;

/// The `viewBox` rectangle of a root `<svg>` element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width; always positive.
    pub width: f64,
    /// Height; always positive.
    pub height: f64,
}

/// Result of ingesting an SVG document.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedSvg {
    /// One layer holding every converted element, or empty when nothing converted.
    pub layers: Vec<Layer>,
    /// Document width: the `width` attribute, else the viewBox width, else 800.
    pub width: f64,
    /// Document height, resolved like `width`; defaults to 600.
    pub height: f64,
    /// The root viewBox, when present and valid.
    pub view_box: Option<ViewBox>,
}

impl ParsedSvg {
    /// Total number of paths across all layers.
    pub fn path_count(&self) -> usize {
        self.layers.iter().map(|l| l.paths.len()).sum()
    }
}

/// Element kinds, in the order their conversions are appended to the layer.
const ELEMENT_ORDER: [&str; 7] = [
    "path", "rect", "circle", "ellipse", "polygon", "polyline", "line",
];

/// Ingest an SVG document: find the root `<svg>` element, read its size, and
/// convert every supported child element into a path.
///
/// Fails with [`NottieError::Parse`] when the text is not XML, when no `<svg>`
/// element exists, or when an element carries malformed numbers or path data.
#[tracing::instrument(skip(svg), fields(len = svg.len()))]
pub fn parse_svg(svg: &str) -> NottieResult<ParsedSvg> {
    let mut opts = ParsingOptions::default();
    opts.allow_dtd = true;
    let doc = Document::parse_with_options(svg, opts)
        .map_err(|e| NottieError::parse(format!("invalid SVG markup: {e}")))?;

    let root = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "svg")
        .ok_or_else(|| NottieError::parse("Invalid SVG: no svg element found"))?;

    let mut width = match non_empty_attr(root, "width") {
        Some(v) => parse_length(v, "width")?,
        None => DEFAULT_WIDTH,
    };
    let mut height = match non_empty_attr(root, "height") {
        Some(v) => parse_length(v, "height")?,
        None => DEFAULT_HEIGHT,
    };

    let view_box = root.attribute("viewBox").and_then(parse_view_box);
    if let Some(vb) = view_box {
        if !root.has_attribute("width") {
            width = vb.width;
        }
        if !root.has_attribute("height") {
            height = vb.height;
        }
    }

    let mut paths = Vec::new();
    for kind in ELEMENT_ORDER {
        for node in root
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == kind)
        {
            if let Some(path) = convert_element(node, kind)? {
                paths.push(path);
            }
        }
    }

    tracing::debug!(paths = paths.len(), width, height, "svg ingested");

    let layers = if paths.is_empty() {
        Vec::new()
    } else {
        let mut layer = Layer::new(IMPORTED_LAYER_NAME);
        layer.paths = paths;
        vec![layer]
    };

    Ok(ParsedSvg {
        layers,
        width,
        height,
        view_box,
    })
}

fn convert_element(node: Node<'_, '_>, kind: &str) -> NottieResult<Option<PathData>> {
    let style = read_style(node)?;
    let num = |name: &str| num_attr(node, name);

    if kind == "path" {
        let Some(d) = non_empty_attr(node, "d") else {
            return Ok(None);
        };
        let commands = parse_path_data(d)?;
        if commands.is_empty() {
            return Ok(None);
        }
        return Ok(Some(styled_path(commands, style)));
    }

    let shape = match kind {
        "rect" => {
            let rx = num("rx")?;
            let ry = match non_empty_attr(node, "ry") {
                Some(v) => parse_length(v, "ry")?,
                None => rx,
            };
            Shape::Rect {
                x: num("x")?,
                y: num("y")?,
                width: num("width")?,
                height: num("height")?,
                rx,
                ry,
            }
        }
        "circle" => Shape::Circle {
            cx: num("cx")?,
            cy: num("cy")?,
            r: num("r")?,
        },
        "ellipse" => Shape::Ellipse {
            cx: num("cx")?,
            cy: num("cy")?,
            rx: num("rx")?,
            ry: num("ry")?,
        },
        "polygon" | "polyline" => {
            let Some(points) = non_empty_attr(node, "points") else {
                return Ok(None);
            };
            let points = parse_points(points);
            if kind == "polygon" {
                Shape::Polygon(points)
            } else {
                Shape::Polyline(points)
            }
        }
        "line" => Shape::Line {
            x1: num("x1")?,
            y1: num("y1")?,
            x2: num("x2")?,
            y2: num("y2")?,
        },
        other => {
            tracing::warn!(element = other, "unsupported element skipped");
            return Ok(None);
        }
    };

    let path = shape_to_path(&shape, style);
    if path.is_none() {
        tracing::debug!(element = kind, "degenerate shape skipped");
    }
    Ok(path)
}

fn read_style(node: Node<'_, '_>) -> NottieResult<ShapeStyle> {
    Ok(ShapeStyle {
        fill: non_empty_attr(node, "fill").map(str::to_owned),
        stroke: non_empty_attr(node, "stroke").map(str::to_owned),
        stroke_width: match non_empty_attr(node, "stroke-width") {
            Some(v) => Some(parse_length(v, "stroke-width")?),
            None => None,
        },
    })
}

fn non_empty_attr<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name).filter(|v| !v.trim().is_empty())
}

/// Numeric attribute; missing or empty means 0.
fn num_attr(node: Node<'_, '_>, name: &str) -> NottieResult<f64> {
    match non_empty_attr(node, name) {
        Some(v) => parse_length(v, name),
        None => Ok(0.0),
    }
}

/// A length attribute read by [`svgtypes::Length`]; units such as `px` are
/// accepted and dropped.
fn parse_length(value: &str, attr: &str) -> NottieResult<f64> {
    Length::from_str(value.trim())
        .map(|length| length.number)
        .map_err(|e| {
            NottieError::parse(format!("invalid number '{value}' in attribute '{attr}': {e}"))
        })
}

fn parse_view_box(value: &str) -> Option<ViewBox> {
    match svgtypes::ViewBox::from_str(value) {
        Ok(vb) => Some(ViewBox {
            x: vb.x,
            y: vb.y,
            width: vb.w,
            height: vb.h,
        }),
        Err(e) => {
            tracing::warn!(view_box = value, error = %e, "viewBox ignored");
            None
        }
    }
}

/// `points` attribute as `x y` pairs. Parsing stops at the first incomplete
/// or malformed pair, keeping the points before it.
fn parse_points(value: &str) -> Vec<Point> {
    PointsParser::from(value)
        .map(|(x, y)| Point::new(x, y))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/markup/document.rs"]
mod tests;
