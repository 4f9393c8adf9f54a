use kurbo::QuadBez;

use crate::{
    animation::{ease::Easing, timeline::Timeline},
    export::lottie::{
        EaseHandle, LayerTransform, LottieAnimation, PathGeometry, PathKeyframe, PathValue,
        Property, SHAPE_LAYER_TYPE, ShapeItem, ShapeLayer,
    },
    foundation::{
        color::{Rgba, hex_to_rgba},
        core::Point,
        error::NottieResult,
    },
    ir::{
        layer::Layer,
        path::{PathCommand, PathData},
    },
    state::document::AnimationState,
};

/// Settings for [`export_animation`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Written to the document's `nm`.
    pub name: String,
    /// Written to the document's `v`.
    pub version: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            name: "Nottie Export".to_string(),
            version: "5.7.4".to_string(),
        }
    }
}

/// Paint used when a color string cannot be understood.
const FALLBACK_PAINT: Rgba = [0.0, 0.0, 0.0, 1.0];
const DEFAULT_STROKE_WIDTH: f64 = 1.0;
const FULL_OPACITY: f64 = 100.0;

/// Build the Lottie document for `state`.
///
/// Hidden layers are left out; the others keep their 1-based position among
/// all layers as their index.
#[tracing::instrument(skip(state, opts), fields(layers = state.layers.len()))]
pub fn export_animation(state: &AnimationState, opts: &ExportOptions) -> LottieAnimation {
    let layers: Vec<ShapeLayer> = state
        .layers
        .iter()
        .enumerate()
        .filter(|(_, layer)| layer.visible)
        .map(|(i, layer)| shape_layer(layer, i + 1, state))
        .collect();

    tracing::debug!(exported = layers.len(), "lottie document built");

    LottieAnimation {
        version: opts.version.clone(),
        frame_rate: state.fps,
        in_point: 0,
        out_point: state.total_frames,
        width: state.canvas.width,
        height: state.canvas.height,
        name: opts.name.clone(),
        three_d: 0,
        assets: Vec::new(),
        layers,
    }
}

fn shape_layer(layer: &Layer, index: usize, state: &AnimationState) -> ShapeLayer {
    let shapes = layer
        .paths
        .iter()
        .enumerate()
        .map(|(i, path)| path_group(path, i + 1, &state.timeline))
        .collect();
    ShapeLayer {
        three_d: 0,
        index,
        layer_type: SHAPE_LAYER_TYPE,
        name: layer.name.clone(),
        time_stretch: 1.0,
        transform: LayerTransform::default(),
        auto_orient: 0,
        shapes,
        in_point: 0,
        out_point: state.total_frames,
        start_time: 0,
        blend_mode: 0,
    }
}

/// Group for one path: stroke, fill, geometry, then an identity transform.
fn path_group(path: &PathData, number: usize, timeline: &Timeline) -> ShapeItem {
    let mut it = Vec::with_capacity(4);
    if let Some(stroke) = &path.stroke {
        it.push(ShapeItem::Stroke {
            nm: "Stroke".to_string(),
            c: Property::fixed(paint(stroke)),
            o: Property::fixed(FULL_OPACITY),
            w: Property::fixed(path.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH)),
        });
    }
    if let Some(fill) = &path.fill {
        it.push(ShapeItem::Fill {
            nm: "Fill".to_string(),
            c: Property::fixed(paint(fill)),
            o: Property::fixed(FULL_OPACITY),
        });
    }
    it.push(path_shape(path, timeline));
    it.push(ShapeItem::identity_transform());
    ShapeItem::Group {
        nm: format!("Path {number}"),
        it,
    }
}

fn paint(color: &str) -> Rgba {
    hex_to_rgba(color).unwrap_or_else(|| {
        tracing::warn!(color, "unsupported paint exported as black");
        FALLBACK_PAINT
    })
}

/// Geometry item for `path`.
///
/// With two or more keyframes holding this path, every such keyframe becomes
/// an entry with easing handles, followed by a handle-less hold entry at the
/// last keyframe's frame. Otherwise the current commands are written as a
/// fixed shape.
pub fn path_shape(path: &PathData, timeline: &Timeline) -> ShapeItem {
    let keys: Vec<(u64, &[PathCommand], Easing)> = timeline
        .qualifying(&path.id)
        .filter_map(|k| Some((k.frame.0, k.snapshot(&path.id)?, k.easing)))
        .collect();

    let ks = match keys.as_slice() {
        [] | [_] => Property::fixed(PathValue::Static(commands_to_geometry(&path.commands))),
        [.., (last_frame, last_cmds, _)] => {
            let mut entries: Vec<PathKeyframe> = keys
                .iter()
                .map(|&(frame, cmds, easing)| {
                    let (ease_in, ease_out) = easing_handles(easing);
                    PathKeyframe {
                        time: frame,
                        start: vec![commands_to_geometry(cmds)],
                        ease_in: Some(ease_in),
                        ease_out: Some(ease_out),
                    }
                })
                .collect();
            entries.push(PathKeyframe {
                time: *last_frame,
                start: vec![commands_to_geometry(last_cmds)],
                ease_in: None,
                ease_out: None,
            });
            Property::keyframed(entries)
        }
    };

    ShapeItem::Path {
        nm: "Path".to_string(),
        ks,
    }
}

/// Flatten commands into Lottie's vertex and tangent arrays.
///
/// Curves write their first control point into the previous vertex's out
/// tangent. Quadratics are raised to cubics first. `ClosePath` only marks the
/// geometry closed.
pub fn commands_to_geometry(commands: &[PathCommand]) -> PathGeometry {
    let mut geom = PathGeometry::default();
    let mut current = Point::ZERO;

    for cmd in commands {
        match *cmd {
            PathCommand::MoveTo { to } | PathCommand::LineTo { to } => {
                geom.vertices.push([to.x, to.y]);
                geom.in_tangents.push([0.0, 0.0]);
                geom.out_tangents.push([0.0, 0.0]);
                current = to;
            }
            PathCommand::CubicBezierTo { ctrl1, ctrl2, to } => {
                push_curve(&mut geom, ctrl1, ctrl2, to);
                current = to;
            }
            PathCommand::QuadraticBezierTo { ctrl, to } => {
                let cubic = QuadBez::new(current, ctrl, to).raise();
                push_curve(&mut geom, cubic.p1, cubic.p2, to);
                current = to;
            }
            PathCommand::ClosePath => geom.closed = true,
        }
    }
    geom
}

fn push_curve(geom: &mut PathGeometry, ctrl1: Point, ctrl2: Point, to: Point) {
    if let (Some(out), Some(prev)) = (geom.out_tangents.last_mut(), geom.vertices.last()) {
        *out = [ctrl1.x - prev[0], ctrl1.y - prev[1]];
    }
    geom.vertices.push([to.x, to.y]);
    geom.in_tangents.push([ctrl2.x - to.x, ctrl2.y - to.y]);
    geom.out_tangents.push([0.0, 0.0]);
}

/// Fixed `(in, out)` timing handles for each easing curve.
pub fn easing_handles(easing: Easing) -> (EaseHandle, EaseHandle) {
    let h = |x, y| EaseHandle { x, y };
    match easing {
        Easing::Linear => (h(0.167, 0.167), h(0.167, 0.167)),
        Easing::EaseIn => (h(0.42, 0.0), h(1.0, 1.0)),
        Easing::EaseOut => (h(0.0, 0.0), h(0.58, 1.0)),
        Easing::EaseInOut => (h(0.42, 0.0), h(0.58, 1.0)),
    }
}

/// Serialize a Lottie document, pretty-printed or compact.
pub fn to_json(animation: &LottieAnimation, pretty: bool) -> NottieResult<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(animation)?
    } else {
        serde_json::to_string(animation)?
    })
}

#[cfg(test)]
#[path = "../../tests/unit/export/serialize.rs"]
mod tests;
