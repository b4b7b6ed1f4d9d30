use super::*;

#[test]
fn minimal_json_gets_site_defaults() {
    let cfg = SequenceConfig::from_reader(r#"{ "base_path": "/im" }"#.as_bytes()).unwrap();
    assert_eq!(cfg, SequenceConfig::new("/im"));
    assert_eq!(cfg.frame_count, 240);
    assert_eq!(cfg.stride, 1);
    assert_eq!(cfg.last_frame_index, 240);
    assert_eq!(cfg.px_per_frame, 15.0);
    assert_eq!(cfg.min_display_ms, 3500);
    assert_eq!(cfg.exit_delay_ms, 800);
    assert_eq!(cfg.threads, None);
    cfg.validate().unwrap();
}

#[test]
fn missing_base_path_is_a_serde_error() {
    let err = SequenceConfig::from_reader("{}".as_bytes()).unwrap_err();
    assert!(matches!(err, ScrubError::Serde(_)), "{err}");
}

#[test]
fn unknown_fields_are_rejected() {
    let err =
        SequenceConfig::from_reader(r#"{ "base_path": "/im", "framecount": 3 }"#.as_bytes())
            .unwrap_err();
    assert!(matches!(err, ScrubError::Serde(_)));
}

#[test]
fn validate_rejects_zero_stride_and_count() {
    let mut cfg = SequenceConfig::new("/im");
    cfg.stride = 0;
    assert!(cfg.validate().is_err());
    cfg.stride = 1;
    cfg.frame_count = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn validate_rejects_bad_scalars() {
    let mut cfg = SequenceConfig::new("/im");
    cfg.px_per_frame = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = SequenceConfig::new("/im");
    cfg.threads = Some(0);
    assert!(cfg.validate().is_err());

    let mut cfg = SequenceConfig::new("/im");
    cfg.prefix.clear();
    assert!(cfg.validate().is_err());
}

#[test]
fn derived_settings_follow_fields() {
    let mut cfg = SequenceConfig::new("/frames");
    cfg.frame_count = 10;
    cfg.min_display_ms = 0;
    cfg.exit_delay_ms = 5;

    let req = cfg.preload_request(2).unwrap();
    assert_eq!(req.base_path, "/frames");
    assert_eq!(req.schedule.total_to_load(), 5);
    assert_eq!(req.naming.file_name(1), "ezgif-frame-001.jpg");

    let opts = cfg.indicator_opts();
    assert_eq!(opts.min_display, Duration::ZERO);
    assert_eq!(opts.exit_delay, Duration::from_millis(5));
    assert_eq!(opts.ready_percent, 99.0);

    assert_eq!(cfg.section().unwrap().height, 150.0);
}

#[test]
fn from_path_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seq.json");
    std::fs::write(&path, r#"{ "base_path": "/im", "frame_count": 12, "stride": 3 }"#).unwrap();
    let cfg = SequenceConfig::from_path(&path).unwrap();
    assert_eq!(cfg.frame_count, 12);
    assert_eq!(cfg.stride, 3);

    assert!(SequenceConfig::from_path(dir.path().join("missing.json")).is_err());
}
