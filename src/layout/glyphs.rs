//! Embedded 5x7 digit glyphs for guide cell labels

use crate::layout::geometry::CellRect;
use crate::layout::surface::Surface;
use image::Rgba;

/// Glyph advance including one column of spacing
pub const GLYPH_ADVANCE: u32 = 6;
/// Glyph height in pixels
pub const GLYPH_HEIGHT: u32 = 7;

// Each glyph: 7 rows, lower 5 bits per row, MSB on the left
#[rustfmt::skip]
const DIGITS_5X7: [[u8; 7]; 10] = [
    [0x0E,0x11,0x13,0x15,0x19,0x11,0x0E], // '0'
    [0x04,0x0C,0x04,0x04,0x04,0x04,0x0E], // '1'
    [0x0E,0x11,0x01,0x02,0x04,0x08,0x1F], // '2'
    [0x1F,0x02,0x04,0x02,0x01,0x11,0x0E], // '3'
    [0x02,0x06,0x0A,0x12,0x1F,0x02,0x02], // '4'
    [0x1F,0x10,0x1E,0x01,0x01,0x11,0x0E], // '5'
    [0x06,0x08,0x10,0x1E,0x11,0x11,0x0E], // '6'
    [0x1F,0x01,0x02,0x04,0x08,0x08,0x08], // '7'
    [0x0E,0x11,0x11,0x0E,0x11,0x11,0x0E], // '8'
    [0x0E,0x11,0x11,0x0F,0x01,0x02,0x0C], // '9'
];

/// Width in pixels of `value` rendered in decimal
pub fn number_width(value: usize) -> u32 {
    let digits = value.to_string().len() as u32;
    digits * GLYPH_ADVANCE - 1
}

/// Draw `value` in decimal with its top-left corner at `(x, y)`
pub fn draw_number<S: Surface + ?Sized>(
    surface: &mut S,
    x: u32,
    y: u32,
    value: usize,
    color: Rgba<u8>,
) {
    for (position, digit) in value.to_string().bytes().enumerate() {
        let Some(glyph) = DIGITS_5X7.get(usize::from(digit - b'0')) else {
            continue;
        };
        let origin_x = x + position as u32 * GLYPH_ADVANCE;

        for (row, &bits) in glyph.iter().enumerate() {
            for column in 0..5u32 {
                if bits & (0x10 >> column) != 0 {
                    surface.fill_rect(
                        CellRect {
                            x: origin_x + column,
                            y: y + row as u32,
                            width: 1,
                            height: 1,
                        },
                        color,
                    );
                }
            }
        }
    }
}
