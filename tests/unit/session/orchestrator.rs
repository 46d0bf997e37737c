//! Tests for the generation sequence, guide mode and display of results

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use imagegrid::io::configuration::{BUSY_BACKGROUND, GUIDE_LINE_COLOR};
    use imagegrid::layout::display::Viewport;
    use imagegrid::session::loader::{
        ImageHandle, ImageLoader, LoadCompleter, LoadOptions, PendingLoad,
    };
    use imagegrid::session::orchestrator::{
        GenerateRequest, GenerationEvent, GenerationState, Orchestrator,
    };
    use imagegrid::session::pool::ImageSource;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    const VIEWPORT: Viewport = Viewport {
        width: 1024,
        height: 768,
    };

    /// Decodes every requested file to a small solid image right away
    #[derive(Default)]
    struct MemoryLoader {
        requests: Rc<RefCell<Vec<(Vec<ImageSource>, LoadOptions)>>>,
        broken: Vec<ImageSource>,
    }

    impl ImageLoader for MemoryLoader {
        fn load(&self, files: Vec<ImageSource>, options: LoadOptions) -> PendingLoad {
            let handles = files
                .iter()
                .filter(|source| !self.broken.contains(source))
                .map(|source| {
                    ImageHandle::new(
                        source.clone(),
                        RgbaImage::from_pixel(16, 16, Rgba([200, 40, 40, 255])),
                    )
                })
                .collect();
            self.requests.borrow_mut().push((files, options));
            PendingLoad::ready(handles)
        }
    }

    /// Holds loads open until the test completes them
    #[derive(Default)]
    struct ManualLoader {
        pending: Rc<RefCell<Vec<(Vec<ImageSource>, LoadCompleter)>>>,
    }

    impl ImageLoader for ManualLoader {
        fn load(&self, files: Vec<ImageSource>, _options: LoadOptions) -> PendingLoad {
            let (completer, pending) = PendingLoad::channel();
            self.pending.borrow_mut().push((files, completer));
            pending
        }
    }

    fn session_with(files: usize) -> Orchestrator<MemoryLoader> {
        let mut session = Orchestrator::new(MemoryLoader::default(), VIEWPORT, Some(11));
        for i in 0..files {
            session.add_file(format!("pool-{i}.png"));
        }
        session
    }

    // Tests a 2x2 grid from a pool of five fills every cell
    // Verified by sampling the whole pool
    #[test]
    fn test_two_by_two_from_five() {
        let mut session = session_with(5);
        session.edit_parameters("rows 2\ncolumns 2", Instant::now());

        assert_eq!(
            session.request_generate(),
            GenerateRequest::Started { selected: 4 }
        );
        assert_eq!(session.state(), GenerationState::Loading);
        assert!(session.is_processing());

        assert_eq!(
            session.poll(),
            Some(GenerationEvent::Completed { placed: 4 })
        );
        let grid = session.grid_image().unwrap();
        assert_eq!((grid.width(), grid.height()), (520, 520));
        assert_eq!(session.state(), GenerationState::Idle);
        assert!(!session.is_processing());
        assert_eq!(session.pool().len(), 5);
    }

    // Tests a grid without rows is a no-op and guides a bare border
    // Verified by starting a load for an empty grid
    #[test]
    fn test_zero_rows_is_noop() {
        let mut session = session_with(3);
        session.edit_parameters("rows 0", Instant::now());

        assert_eq!(session.request_generate(), GenerateRequest::Degenerate);
        assert!(!session.is_processing());
        assert!(session.grid_image().is_none());
        assert_eq!(session.poll(), None);

        session.set_guide_mode(true);
        let canvas = session.working_canvas();
        assert_eq!(*canvas.get_pixel(0, 0), Rgba(GUIDE_LINE_COLOR));
        assert_ne!(*canvas.get_pixel(512, 384), Rgba(GUIDE_LINE_COLOR));
    }

    // Tests requests during a load are dropped
    // Verified by queueing the second request
    #[test]
    fn test_second_request_dropped_while_loading() {
        let loader = ManualLoader::default();
        let pending = Rc::clone(&loader.pending);
        let mut session = Orchestrator::new(loader, VIEWPORT, Some(5));
        session.add_file("a.png");
        session.add_file("b.png");

        assert_eq!(
            session.request_generate(),
            GenerateRequest::Started { selected: 2 }
        );
        assert_eq!(session.request_generate(), GenerateRequest::Busy);
        assert_eq!(session.poll(), None);
        assert_eq!(pending.borrow().len(), 1);

        let (files, completer) = pending.borrow_mut().remove(0);
        let handles = files
            .into_iter()
            .map(|source| ImageHandle::new(source, RgbaImage::new(8, 8)))
            .collect();
        completer.complete(handles);

        assert_eq!(
            session.poll(),
            Some(GenerationEvent::Completed { placed: 2 })
        );
        assert!(pending.borrow().is_empty());
        assert_eq!(
            session.request_generate(),
            GenerateRequest::Started { selected: 2 }
        );
    }

    // Tests a small pool fills leading cells and leaves the rest background
    // Verified by repeating images to fill the grid
    #[test]
    fn test_small_pool_partial_grid() {
        let mut session = session_with(3);

        assert_eq!(
            session.request_generate(),
            GenerateRequest::Started { selected: 3 }
        );
        assert_eq!(
            session.wait(),
            Some(GenerationEvent::Completed { placed: 3 })
        );

        let grid = session.grid_image().unwrap();
        // Last cell centre stays background white
        assert_eq!(
            *grid.image().get_pixel(2 * 264 + 128, 2 * 264 + 128),
            Rgba([255, 255, 255, 255])
        );
        // First cell centre holds an image
        assert_eq!(*grid.image().get_pixel(128, 128), Rgba([200, 40, 40, 255]));
    }

    // Tests an empty pool produces no composite and clears processing
    // Verified by compositing an empty grid
    #[test]
    fn test_empty_pool() {
        let mut session = session_with(0);

        assert_eq!(
            session.request_generate(),
            GenerateRequest::Started { selected: 0 }
        );
        assert_eq!(session.wait(), Some(GenerationEvent::Empty));
        assert!(session.grid_image().is_none());
        assert!(!session.is_processing());
        assert_eq!(session.state(), GenerationState::Idle);
    }

    // Tests a load where every file fails behaves like an empty pool
    // Verified by compositing the failed selection
    #[test]
    fn test_all_loads_failed() {
        let loader = MemoryLoader {
            broken: vec![ImageSource::new("only.png")],
            ..MemoryLoader::default()
        };
        let mut session = Orchestrator::new(loader, VIEWPORT, Some(1));
        session.add_file("only.png");

        session.request_generate();
        assert_eq!(session.poll(), Some(GenerationEvent::Empty));
        assert!(session.grid_image().is_none());
    }

    // Tests an empty load leaves the busy canvas and display placement alone
    // Verified by repainting the previous composite on every outcome
    #[test]
    fn test_empty_load_keeps_canvas() {
        let loader = ManualLoader::default();
        let pending = Rc::clone(&loader.pending);
        let mut session = Orchestrator::new(loader, VIEWPORT, Some(8));
        session.add_file("a.png");
        session.edit_parameters("rows 1\ncolumns 1\ncell 64", Instant::now());

        session.request_generate();
        let (files, completer) = pending.borrow_mut().remove(0);
        let handles = files
            .into_iter()
            .map(|source| {
                ImageHandle::new(source, RgbaImage::from_pixel(64, 64, Rgba([9, 9, 9, 255])))
            })
            .collect();
        completer.complete(handles);
        assert_eq!(
            session.poll(),
            Some(GenerationEvent::Completed { placed: 1 })
        );

        assert_eq!(
            session.request_generate(),
            GenerateRequest::Started { selected: 1 }
        );
        let busy = session.working_canvas().clone();
        let display = session.display();
        assert!(busy.pixels().all(|pixel| *pixel == Rgba(BUSY_BACKGROUND)));

        let (_, completer) = pending.borrow_mut().remove(0);
        completer.complete(Vec::new());
        assert_eq!(session.poll(), Some(GenerationEvent::Empty));

        assert_eq!(session.working_canvas(), &busy);
        assert_eq!(session.display(), display);
        assert!(!session.is_processing());
    }

    // Tests the loader is asked to shrink images to the cell size
    // Verified by loading at full resolution
    #[test]
    fn test_load_options_bound_by_cell() {
        let loader = MemoryLoader::default();
        let requests = Rc::clone(&loader.requests);
        let mut session = Orchestrator::new(loader, VIEWPORT, Some(2));
        session.add_file("x.png");
        session.edit_parameters("cell_width 120\ncell_height 90", Instant::now());

        session.request_generate();
        session.wait();

        let requests = requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].1.max_dimension, Some(120));
    }

    // Tests a composite smaller than the viewport is shown at 1:1 and centred
    // Verified by stretching the result to the viewport
    #[test]
    fn test_display_never_enlarges() {
        let mut session = session_with(4);
        session.edit_parameters("rows 2\ncolumns 2", Instant::now());
        session.request_generate();
        session.wait();

        let display = session.display().unwrap();
        assert!((display.scale - 1.0).abs() < f64::EPSILON);
        assert_eq!((display.width, display.height), (520, 520));
        assert_eq!((display.x, display.y), (252, 124));
        assert_eq!(
            *session.working_canvas().get_pixel(0, 0),
            Rgba(BUSY_BACKGROUND)
        );
    }

    // Tests a large composite is shown shrunk while the saved pixels stay full size
    // Verified by replacing the composite with its displayed copy
    #[test]
    fn test_display_shrinks_large_result() {
        let mut session = session_with(9);
        session.edit_parameters("cell_width 600\ncell_height 600", Instant::now());
        session.request_generate();
        session.wait();

        let display = session.display().unwrap();
        assert!(display.scale < 1.0);
        assert!(display.x + display.width <= VIEWPORT.width);
        assert!(display.y + display.height <= VIEWPORT.height);
        assert_eq!(session.grid_image().map(|g| g.width()), Some(1816));
    }

    // Tests guide redraws wait for the debounce window and need guide mode
    // Verified by redrawing on every edit
    #[test]
    fn test_guide_tick_debounced() {
        let start = Instant::now();
        let mut session = session_with(0);

        session.edit_parameters("rows 2", start);
        assert!(session.tick(start + Duration::from_secs(1)).is_none());

        session.set_guide_mode(true);
        assert!(session.guide_mode());
        session.edit_parameters("rows 4", start);
        assert!(session.tick(start).is_none());

        let report = session.tick(start + Duration::from_millis(100)).unwrap();
        assert_eq!(report.division_y.len(), 3);
        assert_eq!(report.division_x.len(), 2);
        assert!(session.tick(start + Duration::from_secs(2)).is_none());
    }

    // Tests leaving guide mode restores the last composite
    // Verified by leaving the guide on the canvas
    #[test]
    fn test_guide_mode_toggle_restores_result() {
        let mut session = session_with(4);
        session.edit_parameters("rows 2\ncolumns 2", Instant::now());
        session.request_generate();
        session.wait();
        let shown = session.working_canvas().clone();

        session.set_guide_mode(true);
        assert_ne!(session.working_canvas(), &shown);

        session.set_guide_mode(false);
        assert_eq!(session.working_canvas(), &shown);
    }

    // Tests saving before and after a generation
    // Verified by writing a blank image when nothing was generated
    #[test]
    fn test_save() {
        let dir = TempDir::new().unwrap();
        let mut session = session_with(2);
        session.edit_parameters("rows 1\ncolumns 2\nfile out", Instant::now());

        assert!(session.save(dir.path()).unwrap().is_none());

        session.request_generate();
        session.wait();
        let saved = session.save(dir.path()).unwrap().unwrap();
        assert_eq!(saved, dir.path().join("out.png"));
        assert!(saved.exists());

        let renamed = session.save_as(dir.path(), "copy.png").unwrap().unwrap();
        assert_eq!(image::open(renamed).unwrap().width(), 520);
    }

    // Tests parameter text starts at the defaults and tracks edits
    // Verified by parsing only the first edit
    #[test]
    fn test_parameter_text() {
        let mut session = session_with(0);
        assert_eq!(session.parameters().rows, 3);

        session.edit_parameters("columns 5", Instant::now());
        assert_eq!(session.parameter_text(), "columns 5");
        assert_eq!(session.parameters().columns, 5);
        assert_eq!(session.viewport(), VIEWPORT);
    }
}
