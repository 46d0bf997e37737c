//! Tests for guide label glyph rendering

#[cfg(test)]
mod tests {
    use image::Rgba;
    use imagegrid::layout::glyphs::{GLYPH_ADVANCE, GLYPH_HEIGHT, draw_number, number_width};
    use imagegrid::layout::surface::{RasterSurface, Surface};

    const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    // Tests label widths exclude trailing spacing
    // Verified by counting the spacing column
    #[test]
    fn test_number_width() {
        assert_eq!(number_width(7), GLYPH_ADVANCE - 1);
        assert_eq!(number_width(12), 2 * GLYPH_ADVANCE - 1);
        assert_eq!(number_width(100), 3 * GLYPH_ADVANCE - 1);
    }

    // Tests digits stay inside their advertised box
    // Verified by widening the glyph loop
    #[test]
    fn test_draw_number_bounds() {
        let mut surface = RasterSurface::new(40, 20);
        surface.clear(Rgba([255, 255, 255, 255]));
        draw_number(&mut surface, 2, 3, 48, INK);

        let width = number_width(48);
        let mut inked = 0;
        for (x, y, pixel) in surface.image().enumerate_pixels() {
            if *pixel == INK {
                inked += 1;
                assert!((2..2 + width).contains(&x));
                assert!((3..3 + GLYPH_HEIGHT).contains(&y));
            }
        }
        assert!(inked > 0);
    }

    // Tests different digits produce different pixels
    // Verified by rendering every digit with the same glyph
    #[test]
    fn test_digits_differ() {
        let mut one = RasterSurface::new(10, 10);
        let mut eight = RasterSurface::new(10, 10);
        draw_number(&mut one, 0, 0, 1, INK);
        draw_number(&mut eight, 0, 0, 8, INK);

        assert_ne!(one.image(), eight.image());
    }
}
