//! Background colour directive parsing and canonical formatting

use image::Rgba;

const NAMED_COLORS: [(&str, [u8; 4]); 8] = [
    ("white", [255, 255, 255, 255]),
    ("black", [0, 0, 0, 255]),
    ("gray", [128, 128, 128, 255]),
    ("grey", [128, 128, 128, 255]),
    ("red", [255, 0, 0, 255]),
    ("green", [0, 128, 0, 255]),
    ("blue", [0, 0, 255, 255]),
    ("transparent", [0, 0, 0, 0]),
];

/// Parse the value tokens of a `background` directive
///
/// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, a single grey level, three
/// channel values or a colour name. Returns `None` for anything else.
pub fn parse_color(tokens: &[&str]) -> Option<Rgba<u8>> {
    match tokens {
        [single] => parse_single(single),
        [r, g, b] => Some(Rgba([
            r.parse().ok()?,
            g.parse().ok()?,
            b.parse().ok()?,
            255,
        ])),
        _ => None,
    }
}

fn parse_single(token: &str) -> Option<Rgba<u8>> {
    if let Some(hex) = token.strip_prefix('#') {
        return parse_hex(hex);
    }

    if let Ok(level) = token.parse::<u8>() {
        return Some(Rgba([level, level, level, 255]));
    }

    let lowered = token.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lowered)
        .map(|&(_, rgba)| Rgba(rgba))
}

fn parse_hex(hex: &str) -> Option<Rgba<u8>> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|digits| u8::from_str_radix(digits, 16).ok())
    };

    match hex.len() {
        3 => {
            // Short form doubles each digit: #f80 -> #ff8800
            let short = |i: usize| channel(i..i + 1).map(|v| v * 17);
            Some(Rgba([short(0)?, short(1)?, short(2)?, 255]))
        }
        6 => Some(Rgba([channel(0..2)?, channel(2..4)?, channel(4..6)?, 255])),
        8 => Some(Rgba([
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            channel(6..8)?,
        ])),
        _ => None,
    }
}

/// Canonical text form, `#rrggbb` or `#rrggbbaa` when not opaque
pub fn format_color(color: Rgba<u8>) -> String {
    let [r, g, b, a] = color.0;
    if a == 255 {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}
