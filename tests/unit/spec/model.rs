use super::*;

fn caption(text: &str) -> CaptionSpec {
    CaptionSpec {
        text: text.to_string(),
        size_px: 28.0,
        color: ColorSpec::rgba(1.0, 1.0, 1.0, 1.0),
        font_source: None,
    }
}

#[test]
fn default_config_is_fully_disabled() {
    let c = StyleConfig::default();
    assert_eq!(c.gradient.kind, GradientKind::None);
    assert!(c.gradient.stops.is_empty());
    assert_eq!(c.modules.shape, ModuleShape::Square);
    assert_eq!(c.frame.style, FrameStyle::None);
    assert!(c.logo.is_none());
    c.validate().unwrap();
}

#[test]
fn parses_full_config_json() {
    let json = r##"{
        "gradient": { "kind": "linear_vertical", "stops": ["#000000", "#2a2a72"] },
        "modules": { "shape": "extra-rounded", "corner_radius_ratio": 0.4 },
        "frame": {
            "style": "banner",
            "color": { "r": 0.1, "g": 0.1, "b": 0.1 },
            "caption": { "text": "SCAN ME", "size_px": 30.0 }
        },
        "logo": { "source": "logo.png", "size_percent": 18.0 }
    }"##;
    let c = StyleConfig::from_reader(json.as_bytes()).unwrap();

    assert_eq!(c.gradient.kind, GradientKind::LinearVertical);
    assert_eq!(c.gradient.stops.len(), 2);
    assert_eq!(c.modules.shape, ModuleShape::ExtraRounded);
    assert_eq!(c.frame.style, FrameStyle::Banner);

    let cap = c.frame.caption.as_ref().unwrap();
    assert_eq!(cap.text, "SCAN ME");
    assert_eq!(cap.size_px, 30.0);
    // Unspecified caption fields fall back to their defaults.
    assert_eq!(cap.color, ColorSpec::rgba(1.0, 1.0, 1.0, 1.0));
    assert!(cap.font_source.is_none());

    let logo = c.logo.as_ref().unwrap();
    assert_eq!(logo.source, "logo.png");
    assert_eq!(logo.size_percent, 18.0);

    c.validate().unwrap();
}

#[test]
fn kebab_case_aliases_parse() {
    let json = r##"{ "gradient": { "kind": "linear-vertical", "stops": ["#ffffff"] } }"##;
    let c = StyleConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(c.gradient.kind, GradientKind::LinearVertical);

    let json = r##"{ "modules": { "shape": "classy-rounded" } }"##;
    let c = StyleConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(c.modules.shape, ModuleShape::ClassyRounded);
}

#[test]
fn unknown_enum_values_fail_at_parse() {
    let bad = r#"{ "modules": { "shape": "hexagon" } }"#;
    assert!(StyleConfig::from_reader(bad.as_bytes()).is_err());

    let bad = r##"{ "gradient": { "kind": "conic", "stops": ["#000000"] } }"##;
    assert!(StyleConfig::from_reader(bad.as_bytes()).is_err());

    let bad = r#"{ "frame": { "style": "shadow" } }"#;
    assert!(StyleConfig::from_reader(bad.as_bytes()).is_err());
}

#[test]
fn validation_catches_out_of_range_values() {
    let mut c = StyleConfig::default();
    c.gradient.kind = GradientKind::Radial;
    assert!(c.validate().is_err());
    c.gradient.stops.push(ColorSpec::rgba(0.0, 0.0, 0.0, 1.0));
    c.validate().unwrap();

    let mut c = StyleConfig::default();
    c.modules.corner_radius_ratio = 0.6;
    assert!(c.validate().is_err());
    c.modules.corner_radius_ratio = f64::NAN;
    assert!(c.validate().is_err());

    let mut c = StyleConfig::default();
    c.logo = Some(LogoSpec {
        source: "logo.png".to_string(),
        size_percent: 0.0,
    });
    assert!(c.validate().is_err());
    c.logo = Some(LogoSpec {
        source: "logo.png".to_string(),
        size_percent: 101.0,
    });
    assert!(c.validate().is_err());
    c.logo = Some(LogoSpec {
        source: "  ".to_string(),
        size_percent: 20.0,
    });
    assert!(c.validate().is_err());
}

#[test]
fn caption_requires_a_frame_style() {
    let mut c = StyleConfig::default();
    c.frame.caption = Some(caption("hi"));
    assert!(c.validate().is_err());

    c.frame.style = FrameStyle::Basic;
    c.validate().unwrap();
}

#[test]
fn blank_caption_text_is_inert() {
    let mut c = StyleConfig::default();
    c.frame.caption = Some(caption("   "));
    // Blank captions never render, so no frame style is required.
    c.validate().unwrap();
    assert!(c.frame.effective_caption().is_none());

    c.frame.caption = Some(caption("hi"));
    assert!(c.frame.effective_caption().is_some());
}

#[test]
fn from_path_reads_json_file() {
    let tmp = std::env::temp_dir().join(format!(
        "qrylic_model_test_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&tmp).unwrap();

    let path = tmp.join("style.json");
    std::fs::write(&path, r#"{ "modules": { "shape": "dots" } }"#).unwrap();

    let c = StyleConfig::from_path(&path).unwrap();
    assert_eq!(c.modules.shape, ModuleShape::Dots);

    assert!(StyleConfig::from_path(tmp.join("missing.json")).is_err());
}
