use super::*;

#[test]
fn defaults_are_valid() {
    let cfg = StudioConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.canvas.width, 1000);
    assert_eq!(cfg.canvas.height, 650);
    assert_eq!(cfg.padding_px, 150.0);
    assert_eq!(cfg.default_color().to_hex(), "#8E44AD");
    assert_eq!(cfg.default_size(), 12.0);
}

#[test]
fn partial_json_fills_defaults() {
    let cfg: StudioConfig =
        serde_json::from_str(r##"{ "padding_px": 40, "guide_color": "#112233" }"##).unwrap();
    assert_eq!(cfg.padding_px, 40.0);
    assert_eq!(cfg.guide_color, Rgba8::opaque(0x11, 0x22, 0x33));
    assert_eq!(cfg.palette.len(), 8);
    cfg.validate().unwrap();
}

#[test]
fn validate_rejects_bad_values() {
    let mut cfg = StudioConfig {
        padding_px: 700.0,
        ..StudioConfig::default()
    };
    assert!(cfg.validate().is_err());

    cfg.padding_px = 150.0;
    cfg.threshold_factor = f64::NAN;
    assert!(cfg.validate().is_err());

    cfg.threshold_factor = 0.95;
    cfg.default_size_index = 9;
    assert!(cfg.validate().is_err());

    cfg.default_size_index = 0;
    cfg.palette.clear();
    assert!(cfg.validate().is_err());
}

#[test]
fn from_json_file_reports_serde_errors() {
    let dir = std::env::temp_dir().join("paleo_canvas_config_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("bad.json");
    std::fs::write(&path, b"{ not json").unwrap();

    let err = StudioConfig::from_json_file(&path).unwrap_err();
    assert!(matches!(err, PaleoError::Serde(_)));

    let missing = StudioConfig::from_json_file(&dir.join("missing.json")).unwrap_err();
    assert!(matches!(missing, PaleoError::Other(_)));
}
