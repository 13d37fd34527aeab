#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Layered configuration loading: defaults, YAML file and environment

use std::io::Write;

use armkit_bootstrap::{AppConfig, LogFormat};

const ENV_KEYS: [&str; 3] = [
    "ARMKIT__SERVER__BIND_ADDR",
    "ARMKIT__PAGINATION__MAX_TOP",
    "ARMKIT__LOGGING__FORMAT",
];

fn yaml_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn without_env<R>(f: impl FnOnce() -> R) -> R {
    temp_env::with_vars_unset(ENV_KEYS, f)
}

#[test]
fn defaults_without_file() {
    let config = without_env(|| AppConfig::load_or_default(None).unwrap());
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.pagination.min_top, 5);
    assert_eq!(config.pagination.max_top, 1000);
}

#[test]
fn yaml_file_overrides_defaults() {
    let file = yaml_file(
        r"
server:
  bind_addr: 0.0.0.0:9443
pagination:
  default_page_size: 50
logging:
  format: json
",
    );
    let config = without_env(|| AppConfig::load_or_default(Some(file.path())).unwrap());
    assert_eq!(config.server.bind_addr.port(), 9443);
    assert_eq!(config.pagination.default_page_size, 50);
    assert_eq!(config.pagination.max_top, 1000);
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn environment_overrides_file() {
    let file = yaml_file("pagination:\n  max_top: 200\n");
    let config = temp_env::with_vars(
        [
            ("ARMKIT__PAGINATION__MAX_TOP", Some("300")),
            ("ARMKIT__SERVER__BIND_ADDR", Some("127.0.0.1:7000")),
        ],
        || AppConfig::load_or_default(Some(file.path())).unwrap(),
    );
    assert_eq!(config.pagination.max_top, 300);
    assert_eq!(config.server.bind_addr.port(), 7000);
}

#[test]
fn unknown_keys_are_rejected() {
    let file = yaml_file("pagination:\n  page_size: 10\n");
    let err = without_env(|| AppConfig::load_or_default(Some(file.path())).unwrap_err());
    assert!(format!("{err:#}").contains("page_size"));
}

#[test]
fn inconsistent_bounds_are_rejected() {
    let file = yaml_file("pagination:\n  min_top: 100\n  max_top: 10\n");
    assert!(without_env(|| AppConfig::load_or_default(Some(file.path()))).is_err());
}

#[test]
fn yaml_rendering_reloads_to_the_same_config() {
    let mut config = AppConfig::default();
    config.pagination.default_page_size = 40;
    let rendered = config.to_yaml().unwrap();
    let file = yaml_file(&rendered);
    let reloaded = without_env(|| AppConfig::load_or_default(Some(file.path())).unwrap());
    assert_eq!(reloaded, config);
}
