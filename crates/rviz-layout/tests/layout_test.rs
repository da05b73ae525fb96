//! Integration tests for loading, validating, editing and saving layouts.

use std::path::{Path, PathBuf};

use rviz_layout::*;

const SEGMENTATION: &str = include_str!("fixtures/segmentation.rviz");

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// A scratch directory unique to one test.
fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rviz-layout-{}-{test}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("failed to create scratch dir");
    dir
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_load_segmentation_layout() {
    init_logging();
    let doc = load(fixture("segmentation.rviz")).expect("load failed");

    let panels = doc.panels.as_ref().unwrap();
    assert_eq!(panels.len(), 5);
    assert_eq!(panels[0].class, "rviz/Displays");
    assert_eq!(doc.toolbars.as_ref().unwrap().tool_button_style, Some(2));

    let manager = doc.visualization_manager.as_ref().unwrap();
    let options = manager.global_options.as_ref().unwrap();
    assert_eq!(options.fixed_frame.as_deref(), Some("measured/base_link"));
    assert_eq!(options.frame_rate, Some(30));
    assert_eq!(manager.tools.as_ref().unwrap().len(), 8);

    let displays = doc.displays().unwrap();
    let names: Vec<&str> = displays.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(
        names,
        ["Grid", "DepthCloud", "Segmentation", "Labels", "TF", "Camera"]
    );
    assert_eq!(displays.total_len(), 8);

    let DisplayKind::DepthCloud(cloud) = displays.get("DepthCloud").unwrap().kind() else {
        panic!("expected a depth cloud");
    };
    assert_eq!(cloud.max_intensity, Some(4096.0));
    assert_eq!(cloud.min_intensity, Some(0.0));
    assert_eq!(
        cloud.depth_map_topic.as_deref(),
        Some("/camera/aligned_depth_to_color/image_raw")
    );

    let DisplayKind::Image(labels) = displays.get("Labels").unwrap().kind() else {
        panic!("expected an image");
    };
    assert_eq!(labels.image_topic.as_deref(), Some("/seg_label"));
    assert_eq!(
        labels.transport_hint.as_ref().and_then(Choice::get),
        Some(TransportHint::Compressed)
    );
    assert!(!displays.get("Labels").unwrap().is_enabled());

    let marker = displays.find("Marker").unwrap();
    assert_eq!(marker.class(), "rviz/Marker");
    assert_eq!(*marker.kind(), DisplayKind::Other);
    assert_eq!(marker.extra.len(), 3);

    let geometry = doc.window_geometry.as_ref().unwrap();
    assert_eq!(geometry.width, Some(1853));
    assert_eq!(geometry.is_collapsed("Views"), Some(true));
    assert!(geometry.main_window_state.is_some());
}

#[test]
fn test_segmentation_layout_is_valid() {
    let doc = parse(SEGMENTATION).unwrap();
    assert_eq!(validate(&doc), Ok(()));

    // Strict mode only objects to the marker display
    let errors = validate_with(&doc, &ValidationOptions::strict()).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].path,
        "Visualization Manager/Displays/Camera/Displays/Marker/Class"
    );
    assert_eq!(
        errors[0].kind,
        ValidationErrorKind::UnknownClass("rviz/Marker".to_string())
    );
}

#[test]
fn test_segmentation_round_trip() {
    let doc = parse(SEGMENTATION).unwrap();
    let text = serialize(&doc).unwrap();
    let reparsed = parse(&text).unwrap();
    assert_eq!(reparsed, doc);
    assert_eq!(serialize(&reparsed).unwrap(), text);

    // Unknown keys survive
    assert!(text.contains("Enable Stereo Rendering"));
    assert!(text.contains("Marker Topic: /visualization_marker"));
    assert!(text.contains("SyncSource: Segmentation"));
    // Integral floats keep the host's spelling
    assert!(text.contains("Max Intensity: 4096\n"));
}

#[test]
fn test_unknown_keys_in_fixed_blocks_survive() {
    let text = SEGMENTATION.replace(
        "        Value: Lines\n",
        "        Value: Lines\n        Dash Length: 0.2\n",
    );
    let doc = parse(&text).unwrap();
    let DisplayKind::Grid(grid) = doc.displays().unwrap().get("Grid").unwrap().kind() else {
        panic!("expected a grid");
    };
    let line_style = grid.line_style.as_ref().unwrap();
    assert_eq!(line_style.extra.len(), 1);

    let out = serialize(&doc).unwrap();
    assert!(out.contains("Dash Length: 0.2"));
    assert_eq!(parse(&out).unwrap(), doc);
}

#[test]
fn test_unknown_offset_axis_is_parse_error() {
    let text = SEGMENTATION.replace("        Z: 0\n", "        Z: 0\n        Frame: odom\n");
    let err = parse(&text).unwrap_err();
    assert_eq!(err.path, "Visualization Manager/Displays/Grid/Offset/Frame");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedField("Frame".to_string()));
}

#[test]
fn test_invalid_transport_hint_rejected() {
    let text = SEGMENTATION.replace("Transport Hint: compressed", "Transport Hint: jpeg");
    let doc = parse(&text).unwrap();
    let errors = validate(&doc).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].path,
        "Visualization Manager/Displays/Labels/Transport Hint"
    );
    assert!(matches!(
        &errors[0].kind,
        ValidationErrorKind::UnknownVariant { value, allowed }
            if value == "jpeg" && allowed == &["raw", "compressed"]
    ));
}

#[test]
fn test_non_numeric_intensity_is_parse_error() {
    let text = SEGMENTATION.replace("Min Intensity: 0", "Min Intensity: zero");
    let err = parse(&text).unwrap_err();
    assert_eq!(
        err.path,
        "Visualization Manager/Displays/DepthCloud/Min Intensity"
    );
    assert!(matches!(err.kind, ParseErrorKind::TypeMismatch { .. }));
    assert!(err.to_string().contains("Min Intensity"));
}

#[test]
fn test_out_of_range_values_all_reported() {
    let text = SEGMENTATION
        .replace("    - Alpha: 0.5\n", "    - Alpha: 1.5\n")
        .replace("Frame Rate: 30", "Frame Rate: 0")
        .replace("Color: 160; 160; 164", "Color: 160; 300; 164");
    let doc = parse(&text).unwrap();
    let errors = validate(&doc).unwrap_err();
    let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(errors.len(), 3, "{paths:?}");
    assert!(paths.contains(&"Visualization Manager/Displays/Grid/Alpha"));
    assert!(paths.contains(&"Visualization Manager/Displays/Grid/Color"));
    assert!(paths.contains(&"Visualization Manager/Global Options/Frame Rate"));
}

#[test]
fn test_duplicate_display_names_reported() {
    let text = SEGMENTATION.replace("Name: Labels", "Name: Segmentation");
    let doc = parse(&text).unwrap();
    let errors = validate(&doc).unwrap_err();
    assert!(errors
        .iter()
        .any(|e| e.kind == ValidationErrorKind::DuplicateName("Segmentation".to_string())));

    let relaxed = ValidationOptions {
        require_unique_names: false,
        ..ValidationOptions::default()
    };
    assert!(validate_with(&doc, &relaxed).is_ok());
}

#[test]
fn test_geometry_without_state_blob() {
    let doc = load(fixture("minimal.rviz")).unwrap();
    let geometry = doc.window_geometry.as_ref().unwrap();
    assert_eq!(geometry.main_window_state, None);
    assert_eq!(geometry.height, Some(800));
    assert!(validate(&doc).is_ok());
}

#[test]
fn test_layout_edit_and_save() {
    init_logging();
    let dir = scratch_dir("edit");
    let path = dir.join("segmentation.rviz");
    std::fs::write(&path, SEGMENTATION).unwrap();

    let mut layout = Layout::open(&path).unwrap();
    assert!(!layout.is_dirty());

    layout
        .add_display(
            Display::from_kind(
                "Depth",
                DisplayKind::Image(Image::subscribed("/camera/aligned_depth_to_color/image_raw")),
            )
            .unwrap(),
        )
        .unwrap();
    assert!(matches!(
        layout.add_display(Display::new("rviz/Grid", "Grid")),
        Err(LayoutError::DisplayExists(_))
    ));
    layout.move_display("Depth", 0).unwrap();
    layout.set_display_enabled("Color", false).unwrap();
    layout.remove_display("Labels").unwrap();
    assert!(layout.is_dirty());

    layout.save().unwrap();
    assert!(!layout.is_dirty());

    let reloaded = Layout::open(&path).unwrap();
    let displays = reloaded.displays();
    assert_eq!(displays.position("Depth"), Some(0));
    assert!(!displays.contains("Labels"));
    assert!(!reloaded.find_display("Color").unwrap().is_enabled());
    assert_eq!(reloaded.document(), layout.document());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_save_checked_refuses_invalid() {
    let dir = scratch_dir("checked");
    let path = dir.join("out.rviz");
    let _ = std::fs::remove_file(&path);

    let mut layout = Layout::from_document(parse(SEGMENTATION).unwrap(), &path);
    let grid = layout.displays_mut().get_mut("Grid").unwrap();
    if let DisplayKind::Grid(settings) = grid.kind_mut() {
        settings.plane = Some(Choice::from_raw("AB"));
    }

    let err = layout.save_checked().unwrap_err();
    let LayoutError::Invalid(errors) = &err else {
        panic!("expected validation errors, got {err:?}");
    };
    assert_eq!(errors[0].path, "Visualization Manager/Displays/Grid/Plane");
    assert!(!path.exists());
    assert!(layout.is_dirty());

    let grid = layout.displays_mut().get_mut("Grid").unwrap();
    if let DisplayKind::Grid(settings) = grid.kind_mut() {
        settings.plane = Some(Choice::new(GridPlane::XZ));
    }
    layout.save_checked().unwrap();
    assert!(path.exists());

    let copy = dir.join("copy.rviz");
    layout.save_as(&copy).unwrap();
    assert_eq!(layout.path(), copy.as_path());
    assert_eq!(load(&copy).unwrap(), load(&path).unwrap());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Layout::open(fixture("does-not-exist.rviz")).unwrap_err();
    assert!(matches!(err, LayoutError::IoError(_)));
}
