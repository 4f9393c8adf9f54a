/// Straight-alpha color with channels normalized to `[0, 1]`, in `[r, g, b, a]` order.
pub type Rgba = [f64; 4];

const NAMED_COLORS: &[(&str, &str)] = &[
    ("black", "000000"),
    ("white", "ffffff"),
    ("red", "ff0000"),
    ("green", "00ff00"),
    ("blue", "0000ff"),
    ("yellow", "ffff00"),
    ("cyan", "00ffff"),
    ("magenta", "ff00ff"),
];

/// Convert a paint string to normalized RGBA.
///
/// Accepts `#rgb`, `#rrggbb` (the `#` is optional) or one of a small table of
/// named colors. Alpha is always 1; transparency is not modeled. Returns `None`
/// for anything else.
pub fn hex_to_rgba(color: &str) -> Option<Rgba> {
    let color = color.trim();
    let lowered = color.to_ascii_lowercase();
    let hex = NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lowered)
        .map(|(_, hex)| *hex)
        .unwrap_or_else(|| lowered.strip_prefix('#').unwrap_or(&lowered));

    fn hex_byte(pair: &str) -> Option<u8> {
        u8::from_str_radix(pair, 16).ok()
    }

    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let (r, g, b) = match hex.len() {
        3 => {
            let mut channels = hex.chars().map(|c| {
                let doubled: String = [c, c].iter().collect();
                hex_byte(&doubled)
            });
            (channels.next()??, channels.next()??, channels.next()??)
        }
        6 => (
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
        ),
        _ => return None,
    };

    Some([
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        1.0,
    ])
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
