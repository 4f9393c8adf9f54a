use std::borrow::Cow;

use crate::{
    animation::timeline::Timeline,
    foundation::core::FrameIndex,
    ir::path::{PathCommand, PathData},
};

/// Progress at which a structural mismatch switches from `prev` to `next`.
const SWITCH_THRESHOLD: f64 = 0.5;

/// Blend two command sequences at eased progress `t`.
///
/// Sequences of different length cannot be matched, so the whole path snaps
/// to whichever side `t` is closer to. Otherwise commands are paired by
/// position; a pair of different kinds snaps the same way while the other
/// pairs interpolate point by point.
pub fn interpolate_commands<'a>(
    prev: &'a [PathCommand],
    next: &'a [PathCommand],
    t: f64,
) -> Cow<'a, [PathCommand]> {
    let snap_to_prev = t < SWITCH_THRESHOLD;
    if prev.len() != next.len() {
        return Cow::Borrowed(if snap_to_prev { prev } else { next });
    }
    prev.iter()
        .zip(next)
        .map(|(a, b)| {
            a.lerp(b, t)
                .unwrap_or(if snap_to_prev { *a } else { *b })
        })
        .collect::<Vec<_>>()
        .into()
}

/// Commands of `path` as they appear at `frame`.
///
/// Only keyframes holding a snapshot of this path take part. Before the first
/// of them the path is unanimated; at or after the last one the last snapshot
/// holds.
pub fn sample_path<'a>(
    path: &'a PathData,
    timeline: &'a Timeline,
    frame: FrameIndex,
) -> Cow<'a, [PathCommand]> {
    let keys: Vec<(FrameIndex, &[PathCommand], _)> = timeline
        .qualifying(&path.id)
        .filter_map(|k| Some((k.frame, k.snapshot(&path.id)?, k.easing)))
        .collect();

    let idx = keys.partition_point(|(f, _, _)| *f <= frame);
    if idx == 0 {
        return Cow::Borrowed(&path.commands);
    }
    let (a_frame, a_cmds, a_ease) = keys[idx - 1];
    if idx >= keys.len() || a_frame == frame {
        return Cow::Borrowed(a_cmds);
    }

    let (b_frame, b_cmds, _) = keys[idx];
    let (Some(elapsed), Some(span)) = (frame.since(a_frame), b_frame.since(a_frame)) else {
        return Cow::Borrowed(a_cmds);
    };
    let t = elapsed as f64 / span as f64;
    interpolate_commands(a_cmds, b_cmds, a_ease.apply(t))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
