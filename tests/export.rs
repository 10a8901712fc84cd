use egui::Color32;
use xenedit::{DrawingEngine, EngineConfig, ExportError, ExportFormat, Tool};

fn create_test_engine() -> DrawingEngine {
    let mut engine = DrawingEngine::new(&EngineConfig {
        canvas_width: 50,
        canvas_height: 40,
        ..EngineConfig::default()
    });
    engine.set_color(Color32::from_rgb(20, 120, 220));
    engine.set_stroke_width(6);
    engine.on_press(5, 5);
    engine.on_drag(45, 35);
    engine.on_release(45, 35).unwrap();
    engine.set_tool(Tool::Arrow);
    engine.on_press(45, 5);
    engine.on_drag(5, 35);
    engine.on_release(5, 35).unwrap();
    engine
}

#[test]
fn test_png_export_matches_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");
    let engine = create_test_engine();
    let expected = engine.rasterize();

    assert_eq!(engine.export_image(&path).unwrap(), ExportFormat::Png);

    let reopened = image::open(&path).unwrap().to_rgba8();
    assert_eq!(reopened, expected);
}

#[test]
fn test_jpeg_export_keeps_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let engine = create_test_engine();
    for name in ["out.jpg", "out.JPEG"] {
        let path = dir.path().join(name);
        assert_eq!(engine.export_image(&path).unwrap(), ExportFormat::Jpeg);
        let reopened = image::open(&path).unwrap();
        assert_eq!((reopened.width(), reopened.height()), (50, 40));
    }
}

#[test]
fn test_pdf_export_is_single_page() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");
    let engine = create_test_engine();

    assert_eq!(engine.export_image(&path).unwrap(), ExportFormat::Pdf);

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    let doc = lopdf::Document::load(&path).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 1);

    let page_id = *pages.values().next().unwrap();
    let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
    // 50x40 px at 100 dpi
    assert!((media_box[2].as_float().unwrap() - 36.0).abs() < 1e-3);
    assert!((media_box[3].as_float().unwrap() - 28.8).abs() < 1e-3);
}

#[test]
fn test_unsupported_extension_leaves_state_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.tiff");
    let engine = create_test_engine();
    let before = engine.rasterize();
    let (undo_len, redo_len) = (engine.undo_len(), engine.redo_len());

    assert!(matches!(
        engine.export_image(&path),
        Err(ExportError::UnsupportedFormat { .. })
    ));
    assert!(!path.exists());
    assert_eq!(engine.rasterize(), before);
    assert_eq!((engine.undo_len(), engine.redo_len()), (undo_len, redo_len));
}

#[test]
fn test_unwritable_path_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.png");
    let engine = create_test_engine();

    assert!(matches!(engine.export_image(&path), Err(ExportError::Io(_))));
}

#[test]
fn test_failed_encode_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    // JPEG cannot encode a side longer than 65535 pixels
    let pixels = image::RgbaImage::new(65_536, 1);

    let fresh = dir.path().join("wide.jpg");
    let result = xenedit::export::write_image(&pixels, &fresh, 100.0);
    assert!(matches!(result, Err(ExportError::Encode(_))));
    assert!(!fresh.exists());

    let existing = dir.path().join("keep.jpg");
    std::fs::write(&existing, b"previous export").unwrap();
    assert!(xenedit::export::write_image(&pixels, &existing, 100.0).is_err());
    assert_eq!(std::fs::read(&existing).unwrap(), b"previous export");
}
