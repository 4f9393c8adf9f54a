use std::fmt::Write as _;

use crate::ir::path::PathCommand;

/// Re-serialize commands as absolute path data (`M x y L x y C … Q … Z`).
///
/// Numbers use the shortest representation that parses back to the same
/// `f64`, so parsing the output yields identical commands.
pub fn commands_to_path_string(commands: &[PathCommand]) -> String {
    let mut out = String::new();
    for cmd in commands {
        if !out.is_empty() {
            out.push(' ');
        }
        let letter = match cmd {
            PathCommand::MoveTo { .. } => 'M',
            PathCommand::LineTo { .. } => 'L',
            PathCommand::CubicBezierTo { .. } => 'C',
            PathCommand::QuadraticBezierTo { .. } => 'Q',
            PathCommand::ClosePath => 'Z',
        };
        out.push(letter);
        for pt in cmd.points() {
            // Writing into a String cannot fail.
            let _ = write!(out, " {} {}", pt.x, pt.y);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/ir/path_string.rs"]
mod tests;
