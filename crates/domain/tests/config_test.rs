use tapguard_domain::config::{ConfigError, InputKind};
use tapguard_domain::{CliOverrides, Config};

#[test]
fn test_default_config_is_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.input.kind, InputKind::Socket);
    assert_eq!(config.decoder.host_ttl_secs, 3600);
    assert_eq!(config.decoder.lookup_timeout_ms, 1000);
    assert_eq!(config.influx.measurement, "queries");
    assert!(!config.cloak.enabled);
}

#[test]
fn test_partial_toml_uses_defaults() {
    let config = Config::from_toml(
        r#"
        [input]
        path = "/tmp/tap.fstrm"
        kind = "file"

        [cloak]
        enabled = true
        port = 9000
        "#,
    )
    .unwrap();

    assert_eq!(config.input.path, "/tmp/tap.fstrm");
    assert_eq!(config.input.kind, InputKind::File);
    assert_eq!(config.input.buffer_size, 1000);
    assert!(config.cloak.enabled);
    assert_eq!(config.cloak.port, 9000);
    assert_eq!(config.cloak.zone_type, "always_nxdomain");
    assert_eq!(config.influx.bucket, "dns");
}

#[test]
fn test_reload_listener_defaults_to_all_interfaces() {
    let config = Config::default();
    assert_eq!(config.cloak.bind_address, "0.0.0.0");
    assert_eq!(config.cloak.port, 8053);

    let addr: std::net::SocketAddr = format!("{}:{}", config.cloak.bind_address, config.cloak.port)
        .parse()
        .unwrap();
    assert!(addr.ip().is_unspecified());
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let result = Config::from_toml("[input\npath = 3");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_cli_overrides_apply() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tapguard.toml");
    std::fs::write(&path, "[influx]\nbucket = \"from-file\"\n").unwrap();

    let overrides = CliOverrides {
        input_path: Some("/tmp/capture.fstrm".to_string()),
        input_is_file: true,
        influx_bucket: Some("from-cli".to_string()),
        enable_cloak: true,
        log_level: Some("debug".to_string()),
        ..Default::default()
    };
    let config = Config::load(path.to_str(), overrides).unwrap();

    assert_eq!(config.input.path, "/tmp/capture.fstrm");
    assert_eq!(config.input.kind, InputKind::File);
    assert_eq!(config.influx.bucket, "from-cli");
    assert!(config.cloak.enabled);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_missing_config_file_is_read_error() {
    let result = Config::load(Some("/nonexistent/tapguard.toml"), CliOverrides::default());
    assert!(matches!(result, Err(ConfigError::FileRead(_, _))));
}

#[test]
fn test_validate_rejects_bad_resolver() {
    let mut config = Config::default();
    config.decoder.resolver = "not-an-address".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Validation { field: "decoder.resolver", .. })
    ));
}

#[test]
fn test_validate_rejects_zero_port_when_cloak_enabled() {
    let mut config = Config::default();
    config.cloak.enabled = true;
    config.cloak.port = 0;
    assert!(config.validate().is_err());

    config.cloak.enabled = false;
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_ignores_influx_when_disabled() {
    let mut config = Config::default();
    config.influx.batch_size = 0;
    assert!(config.validate().is_err());

    config.influx.enabled = false;
    assert!(config.validate().is_ok());
}
