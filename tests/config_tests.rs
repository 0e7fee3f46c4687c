use std::fs;
use std::time::Duration;

use seva_carousel::config::{Configuration, Presentation, RegionKind};
use tempfile::tempdir;

#[test]
fn parse_kebab_case_config() {
    let yaml = r#"
regions:
  - name: gallery
    kind: gallery
    items: ["img/community.jpg", "img/classroom.jpg"]
  - name: donor-projects
    kind: donor-projects
    items: ["well", "library"]
  - name: promotions
    kind: promotions
    interval: 7s
    items: ["slide-1", "slide-2", "slide-3"]
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    let cfg = cfg.validated().unwrap();
    assert_eq!(cfg.regions.len(), 3);
    assert_eq!(cfg.command_buffer, 16);
    assert_eq!(cfg.event_buffer, 64);

    let promos = cfg.region("promotions").expect("promotions region");
    assert_eq!(promos.kind, RegionKind::Promotions);
    assert_eq!(promos.effective_interval(), Duration::from_secs(7));
    assert!(promos.autoplay_armed());
    assert_eq!(promos.presentation(), Presentation::Carousel);

    let donors = cfg.region("donor-projects").expect("donor region");
    assert!(!donors.autoplay_armed());
    assert_eq!(donors.presentation(), Presentation::Lightbox);
}

#[test]
fn empty_config_is_valid() {
    let cfg: Configuration = serde_yaml::from_str("{}").unwrap();
    let cfg = cfg.validated().unwrap();
    assert!(cfg.regions.is_empty());
}

#[test]
fn duplicate_region_names_rejected() {
    let yaml = r#"
regions:
  - name: promos
    kind: promotions
  - name: promos
    kind: announcements
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    let err = cfg.validated().unwrap_err();
    assert!(
        err.to_string().contains("used by more than one region"),
        "unexpected error: {err}"
    );
}

#[test]
fn invalid_region_reports_its_name() {
    let yaml = r#"
regions:
  - name: alerts
    kind: announcements
    interval: 0ms
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    let err = cfg.validated().unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("'alerts'"), "unexpected error: {chain}");
    assert!(chain.contains("regions[0].interval"), "unexpected error: {chain}");
}

#[test]
fn unbounded_interval_rejected_before_engine_is_built() {
    let yaml = r#"
regions:
  - name: promos
    kind: promotions
    interval: 300000000000years
    items: [a, b]
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    let chain = format!("{:#}", cfg.validated().unwrap_err());
    assert!(chain.contains("'promos'"), "unexpected error: {chain}");
    assert!(chain.contains("regions[0].interval must be at most"), "unexpected error: {chain}");
}

#[test]
fn zero_buffers_rejected() {
    let cfg: Configuration = serde_yaml::from_str("event-buffer: 0").unwrap();
    assert!(cfg.validated().is_err());
    let cfg: Configuration = serde_yaml::from_str("command-buffer: 0").unwrap();
    assert!(cfg.validated().is_err());
}

#[test]
fn unknown_top_level_keys_rejected() {
    let parsed: Result<Configuration, _> = serde_yaml::from_str("carousels: []");
    assert!(parsed.is_err());
}

#[test]
fn unknown_region_kind_rejected() {
    let yaml = r#"
regions:
  - name: header
    kind: sticky-header
"#;
    let parsed: Result<Configuration, _> = serde_yaml::from_str(yaml);
    assert!(parsed.is_err());
}

#[test]
fn loads_from_yaml_file() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("site.yaml");
    fs::write(
        &path,
        r#"
event-buffer: 8
regions:
  - name: alerts
    kind: announcements
    items:
      - "Emergency relief for flood victims"
      - "Computer literacy classes now open"
"#,
    )
    .unwrap();

    let cfg = Configuration::from_yaml_file(&path)
        .unwrap()
        .validated()
        .unwrap();
    assert_eq!(cfg.event_buffer, 8);
    let alerts = cfg.region("alerts").unwrap();
    assert!(alerts.autoplay_armed());
    assert_eq!(alerts.effective_interval(), Duration::from_millis(5000));
    assert_eq!(alerts.items.len(), 2);
}

#[test]
fn missing_file_is_an_error() {
    let tmp = tempdir().unwrap();
    assert!(Configuration::from_yaml_file(tmp.path().join("absent.yaml")).is_err());
}

#[test]
fn bundled_site_config_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.yaml");
    let cfg = Configuration::from_yaml_file(path)
        .unwrap()
        .validated()
        .unwrap();
    let kinds: Vec<RegionKind> = cfg.regions.iter().map(|region| region.kind).collect();
    assert_eq!(
        kinds,
        vec![
            RegionKind::Announcements,
            RegionKind::Gallery,
            RegionKind::DonorProjects,
            RegionKind::Promotions,
        ]
    );
    assert_eq!(cfg.region("alerts").unwrap().items.len(), 4);
}
