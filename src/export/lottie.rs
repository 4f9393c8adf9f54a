//! Serde model of the subset of the Lottie schema that Nottie writes.
//!
//! Field names are spelled out in Rust and renamed to Lottie's one- and
//! two-letter keys on the wire.

use crate::foundation::color::Rgba;

/// Top-level animation document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LottieAnimation {
    /// Schema version.
    #[serde(rename = "v")]
    pub version: String,
    /// Frames per second.
    #[serde(rename = "fr")]
    pub frame_rate: u32,
    /// First frame.
    #[serde(rename = "ip")]
    pub in_point: u64,
    /// One past the last frame.
    #[serde(rename = "op")]
    pub out_point: u64,
    /// Canvas width in pixels.
    #[serde(rename = "w")]
    pub width: f64,
    /// Canvas height in pixels.
    #[serde(rename = "h")]
    pub height: f64,
    /// Display name.
    #[serde(rename = "nm")]
    pub name: String,
    /// 3D flag; always 0.
    #[serde(rename = "ddd")]
    pub three_d: u8,
    /// Always empty; nothing is precomposed.
    pub assets: Vec<serde_json::Value>,
    /// Shape layers, topmost first.
    pub layers: Vec<ShapeLayer>,
}

/// Lottie layer type code for shape layers.
pub const SHAPE_LAYER_TYPE: u8 = 4;

/// A shape layer: one group per visible path.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeLayer {
    /// 3D flag; always 0.
    #[serde(rename = "ddd")]
    pub three_d: u8,
    /// 1-based layer index.
    #[serde(rename = "ind")]
    pub index: usize,
    /// Always [`SHAPE_LAYER_TYPE`].
    #[serde(rename = "ty")]
    pub layer_type: u8,
    /// Layer name.
    #[serde(rename = "nm")]
    pub name: String,
    /// Time stretch factor.
    #[serde(rename = "sr")]
    pub time_stretch: f64,
    /// Layer transform.
    #[serde(rename = "ks")]
    pub transform: LayerTransform,
    /// Auto-orient flag.
    #[serde(rename = "ao")]
    pub auto_orient: u8,
    /// One group per path.
    pub shapes: Vec<ShapeItem>,
    /// First frame the layer is shown.
    #[serde(rename = "ip")]
    pub in_point: u64,
    /// One past the last frame the layer is shown.
    #[serde(rename = "op")]
    pub out_point: u64,
    /// Start time offset.
    #[serde(rename = "st")]
    pub start_time: u64,
    /// Blend mode; 0 is normal.
    #[serde(rename = "bm")]
    pub blend_mode: u8,
}

/// A property value. `a` is 1 when `k` holds keyframes, 0 when it holds a
/// single fixed value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Property<K> {
    /// Animated flag.
    pub a: u8,
    /// Value or keyframes.
    pub k: K,
}

impl<K> Property<K> {
    /// An unanimated property.
    pub fn fixed(k: K) -> Self {
        Self { a: 0, k }
    }

    /// Whether `k` holds keyframes.
    pub fn is_animated(&self) -> bool {
        self.a == 1
    }
}

impl Property<PathValue> {
    /// An animated path property.
    pub fn keyframed(keys: Vec<PathKeyframe>) -> Self {
        Self {
            a: 1,
            k: PathValue::Keyframed(keys),
        }
    }
}

/// Layer-level transform. The default is the identity.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerTransform {
    /// Opacity in percent.
    #[serde(rename = "o")]
    pub opacity: Property<Vec<f64>>,
    /// Rotation in degrees.
    #[serde(rename = "r")]
    pub rotation: Property<f64>,
    /// Position.
    #[serde(rename = "p")]
    pub position: Property<Vec<f64>>,
    /// Anchor point.
    #[serde(rename = "a")]
    pub anchor: Property<Vec<f64>>,
    /// Scale in percent.
    #[serde(rename = "s")]
    pub scale: Property<Vec<f64>>,
}

impl Default for LayerTransform {
    fn default() -> Self {
        Self {
            opacity: Property::fixed(vec![100.0]),
            rotation: Property::fixed(0.0),
            position: Property::fixed(vec![0.0, 0.0, 0.0]),
            anchor: Property::fixed(vec![0.0, 0.0, 0.0]),
            scale: Property::fixed(vec![100.0, 100.0, 100.0]),
        }
    }
}

/// Items of a shape layer, tagged by Lottie's `ty` code.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "ty")]
pub enum ShapeItem {
    /// A group of items.
    #[serde(rename = "gr")]
    Group {
        /// Name.
        nm: String,
        /// Items in paint order; a transform item comes last.
        it: Vec<ShapeItem>,
    },
    /// Path geometry.
    #[serde(rename = "sh")]
    Path {
        /// Name.
        nm: String,
        /// Geometry, fixed or keyframed.
        ks: Property<PathValue>,
    },
    /// Stroke paint.
    #[serde(rename = "st")]
    Stroke {
        /// Name.
        nm: String,
        /// Color.
        c: Property<Rgba>,
        /// Opacity in percent.
        o: Property<f64>,
        /// Width.
        w: Property<f64>,
    },
    /// Fill paint.
    #[serde(rename = "fl")]
    Fill {
        /// Name.
        nm: String,
        /// Color.
        c: Property<Rgba>,
        /// Opacity in percent.
        o: Property<f64>,
    },
    /// Group transform.
    #[serde(rename = "tr")]
    Transform {
        /// Name.
        nm: String,
        /// Position.
        p: Property<[f64; 2]>,
        /// Anchor point.
        a: Property<[f64; 2]>,
        /// Scale in percent.
        s: Property<[f64; 2]>,
        /// Rotation in degrees.
        r: Property<f64>,
        /// Opacity in percent.
        o: Property<f64>,
    },
}

impl ShapeItem {
    /// Two-letter `ty` code of this item.
    pub fn type_code(&self) -> &'static str {
        match self {
            Self::Group { .. } => "gr",
            Self::Path { .. } => "sh",
            Self::Stroke { .. } => "st",
            Self::Fill { .. } => "fl",
            Self::Transform { .. } => "tr",
        }
    }

    /// Identity transform closing every group.
    pub fn identity_transform() -> Self {
        Self::Transform {
            nm: "Transform".to_string(),
            p: Property::fixed([0.0, 0.0]),
            a: Property::fixed([0.0, 0.0]),
            s: Property::fixed([100.0, 100.0]),
            r: Property::fixed(0.0),
            o: Property::fixed(100.0),
        }
    }
}

/// Geometry of a path property: one fixed shape or a keyframe list.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PathValue {
    /// Unanimated geometry.
    Static(PathGeometry),
    /// Geometry per keyframe.
    Keyframed(Vec<PathKeyframe>),
}

/// Vertices with in/out tangents stored relative to their own vertex.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathGeometry {
    /// Incoming tangent of each vertex.
    #[serde(rename = "i")]
    pub in_tangents: Vec<[f64; 2]>,
    /// Outgoing tangent of each vertex.
    #[serde(rename = "o")]
    pub out_tangents: Vec<[f64; 2]>,
    /// Absolute vertex positions.
    #[serde(rename = "v")]
    pub vertices: Vec<[f64; 2]>,
    /// Whether the last vertex connects back to the first.
    #[serde(rename = "c")]
    pub closed: bool,
}

/// Path geometry at one frame. The hold entry at the end carries no handles.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathKeyframe {
    /// Frame number.
    #[serde(rename = "t")]
    pub time: u64,
    /// Geometry, wrapped in a one-element list.
    #[serde(rename = "s")]
    pub start: Vec<PathGeometry>,
    /// In timing handle.
    #[serde(rename = "i", default, skip_serializing_if = "Option::is_none")]
    pub ease_in: Option<EaseHandle>,
    /// Out timing handle.
    #[serde(rename = "o", default, skip_serializing_if = "Option::is_none")]
    pub ease_out: Option<EaseHandle>,
}

/// One Bézier timing handle in normalized time/value space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EaseHandle {
    /// Time component.
    pub x: f64,
    /// Progress component.
    pub y: f64,
}
