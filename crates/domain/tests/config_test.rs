use webless_domain::config::Config;

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.server.bind_address, "0.0.0.0");
    assert_eq!(config.server.dns_port, 53);
    assert_eq!(config.zone.suffix, "web.webless.org");
    assert_eq!(config.zone.primary_ns, "ns1.webless.org");
    assert_eq!(config.zone.hostmaster, "hostmaster.webless.org");
    assert_eq!(config.zone.refresh, 3600);
    assert_eq!(config.zone.retry, 1800);
    assert_eq!(config.zone.expire, 604_800);
    assert_eq!(config.zone.minimum, 60);
    assert!(config.health.user_agent.starts_with("Mozilla/5.0"));
    assert_eq!(config.cache.max_entries, 1_000_000);
    assert_eq!(config.cache.idle_timeout_days, 30);
    assert_eq!(config.cache.sweep_interval_secs, 3600);
    assert_eq!(config.logging.level, "info");
    assert!(config.logging.query_events);
    assert!(config.seeds.valid.is_empty());
    assert!(config.seeds.invalid.is_empty());

    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_file_fills_defaults() {
    let toml_str = r#"
        [server]
        dns_port = 5353

        [zone]
        suffix = "nxweb.example.net"
    "#;

    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.server.dns_port, 5353);
    assert_eq!(config.server.bind_address, "0.0.0.0");
    assert_eq!(config.zone.suffix, "nxweb.example.net");
    assert_eq!(config.zone.retry, 1800);
    assert_eq!(config.cache.max_entries, 1_000_000);
    assert!(config.logging.query_events);
}

#[test]
fn test_seeds_section() {
    let toml_str = r#"
        [seeds]
        valid = ["webless.org"]
        invalid = ["spammer.example"]
    "#;

    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.seeds.valid, vec!["webless.org"]);
    assert_eq!(config.seeds.invalid, vec!["spammer.example"]);
}

#[test]
fn test_validate_rejects_zero_port() {
    let mut config = Config::default();
    config.server.dns_port = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_empty_suffix() {
    let mut config = Config::default();
    config.zone.suffix.clear();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_zero_capacity() {
    let mut config = Config::default();
    config.cache.max_entries = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_zero_sweep_interval() {
    let mut config = Config::default();
    config.cache.sweep_interval_secs = 0;
    assert!(config.validate().is_err());
}
