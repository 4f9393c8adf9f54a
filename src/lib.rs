//! Nottie is a vector-path animation toolchain.
//!
//! It turns SVG drawings into keyframed path animations and writes them out as
//! Lottie JSON.
//!
//! # Pipeline overview
//!
//! 1. **Ingest**: SVG markup -> [`Layer`]s of [`PathData`] ([`parse_svg`], [`parse_path_data`],
//!    [`shape_to_path`])
//! 2. **Author**: mutate an [`AnimationState`], capturing [`Keyframe`] snapshots of every path
//! 3. **Sample**: [`sample_path`] yields the geometry of one path at any frame
//! 4. **Export**: [`export_animation`] builds a [`LottieAnimation`], [`to_json`] writes it
//!
//! Every mutation on [`AnimationState`] returns the [`Edit`] it performed; a [`Session`] pairs a
//! state with a bounded undo/redo [`History`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod export;
mod foundation;
mod ir;
mod markup;
mod state;

pub use animation::ease::Easing;
pub use animation::interpolate::{interpolate_commands, sample_path};
pub use animation::timeline::{Keyframe, Timeline};
pub use export::lottie::{
    EaseHandle, LayerTransform, LottieAnimation, PathGeometry, PathKeyframe, PathValue, Property,
    SHAPE_LAYER_TYPE, ShapeItem, ShapeLayer,
};
pub use export::serialize::{
    ExportOptions, commands_to_geometry, easing_handles, export_animation, path_shape, to_json,
};
pub use foundation::color::{Rgba, hex_to_rgba};
pub use foundation::core::{BezPath, Canvas, FrameIndex, Point};
pub use foundation::error::{NottieError, NottieResult};
pub use ir::ids::{LayerId, PathId};
pub use ir::layer::Layer;
pub use ir::path::{CommandKind, PathCommand, PathData, commands_to_bez_path};
pub use ir::path_string::commands_to_path_string;
pub use markup::document::{IMPORTED_LAYER_NAME, ParsedSvg, ViewBox, parse_svg};
pub use markup::path_data::parse_path_data;
pub use markup::shapes::{KAPPA, Shape, ShapeStyle, shape_commands, shape_to_path};
pub use state::document::{AnimationState, MAX_FPS, MIN_FPS};
pub use state::history::{DEFAULT_CAPACITY, Edit, History, Scene, Session};
