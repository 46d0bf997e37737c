//! Tests for parameter defaults and safety limits

#[cfg(test)]
mod tests {
    use imagegrid::io::configuration::{
        DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH, DEFAULT_COLUMNS, DEFAULT_FILE_NAME, DEFAULT_GAP,
        DEFAULT_ROWS, GUIDE_DEBOUNCE_MS, MAX_CELL_SIZE, MAX_GAP, MAX_GRID_CELLS_PER_AXIS,
        MAX_OUTPUT_DIMENSION, SUPPORTED_EXTENSIONS,
    };
    use imagegrid::layout::geometry::GridGeometry;
    use imagegrid::params::{DEFAULT_STRING, ParameterSet, parse};

    // Tests the default grid shape
    // Verified by changing the default row count
    #[test]
    fn test_default_grid_values() {
        assert_eq!((DEFAULT_ROWS, DEFAULT_COLUMNS), (3, 3));
        assert_eq!((DEFAULT_CELL_WIDTH, DEFAULT_CELL_HEIGHT), (256, 256));
        assert_eq!(DEFAULT_GAP, 8);
        assert_eq!(DEFAULT_FILE_NAME, "grid-image.png");
    }

    // Tests the default text and default values agree
    // Verified by editing one value in the default text
    #[test]
    fn test_default_string_matches_defaults() {
        assert_eq!(parse(DEFAULT_STRING), ParameterSet::default());
        assert_eq!(ParameterSet::default().stringify(), DEFAULT_STRING);
    }

    // Tests the defaults sit inside the parser limits
    // Verified by lowering the cell size limit below the default
    #[test]
    fn test_defaults_within_limits() {
        assert!(DEFAULT_ROWS <= MAX_GRID_CELLS_PER_AXIS);
        assert!(DEFAULT_COLUMNS <= MAX_GRID_CELLS_PER_AXIS);
        assert!(DEFAULT_CELL_WIDTH <= MAX_CELL_SIZE);
        assert!(DEFAULT_GAP <= MAX_GAP);

        let (width, height) = GridGeometry::new(&ParameterSet::default()).output_size();
        assert!(width <= MAX_OUTPUT_DIMENSION && height <= MAX_OUTPUT_DIMENSION);
    }

    // Tests extensions are stored lowercase for case-insensitive matching
    // Verified by adding an uppercase extension
    #[test]
    fn test_supported_extensions_lowercase() {
        for ext in SUPPORTED_EXTENSIONS {
            assert_eq!(ext, ext.to_ascii_lowercase());
        }
        assert!(SUPPORTED_EXTENSIONS.contains(&"png"));
    }

    // Tests the guide debounce window is short but nonzero
    // Verified by setting the window to zero
    #[test]
    fn test_debounce_window() {
        assert!(GUIDE_DEBOUNCE_MS > 0);
        assert!(GUIDE_DEBOUNCE_MS <= 250);
    }
}
