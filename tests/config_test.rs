use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use spotydown::config::Config;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults() {
    let config = Config::from_lookup(lookup(&[])).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.api_base_url, "https://spotydown.com");
    assert_eq!(config.timeout(), Duration::from_secs(15));
    assert_eq!(config.output_dir, PathBuf::from("downloads"));
    assert_eq!(config.chunk_size, 1024 * 1024);
    assert_eq!(config.size_tolerance, 0.05);
    assert!(config.probe_size);
}

#[test]
fn test_endpoints() {
    let config = Config::default();
    assert_eq!(
        config.metadata_endpoint(),
        "https://spotydown.com/api/get-metadata"
    );
    assert_eq!(
        config.resolve_endpoint(),
        "https://spotydown.com/api/download-track"
    );
}

#[test]
fn test_overrides() {
    let config = Config::from_lookup(lookup(&[
        ("SPOTYDOWN_API_URL", "http://localhost:8080/"),
        ("SPOTYDOWN_TIMEOUT_SECONDS", "3"),
        ("SPOTYDOWN_DOWNLOAD_TIMEOUT_SECONDS", "60"),
        ("SPOTYDOWN_OUTPUT_DIR", "/tmp/music"),
        ("SPOTYDOWN_CHUNK_SIZE", "8192"),
        ("SPOTYDOWN_SIZE_TOLERANCE", "0.1"),
        ("SPOTYDOWN_PROBE_SIZE", "off"),
    ]))
    .unwrap();

    assert_eq!(config.api_base_url, "http://localhost:8080");
    assert_eq!(config.metadata_endpoint(), "http://localhost:8080/api/get-metadata");
    assert_eq!(config.timeout_seconds, 3);
    assert_eq!(config.download_timeout(), Duration::from_secs(60));
    assert_eq!(config.output_dir, PathBuf::from("/tmp/music"));
    assert_eq!(config.chunk_size, 8192);
    assert_eq!(config.size_tolerance, 0.1);
    assert!(!config.probe_size);
}

#[test]
fn test_empty_values_keep_defaults() {
    let config = Config::from_lookup(lookup(&[
        ("SPOTYDOWN_TIMEOUT_SECONDS", ""),
        ("SPOTYDOWN_OUTPUT_DIR", "   "),
    ]))
    .unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_invalid_values_are_rejected() {
    let cases = [
        ("SPOTYDOWN_TIMEOUT_SECONDS", "soon"),
        ("SPOTYDOWN_TIMEOUT_SECONDS", "0"),
        ("SPOTYDOWN_TIMEOUT_SECONDS", "-1"),
        ("SPOTYDOWN_DOWNLOAD_TIMEOUT_SECONDS", "0"),
        ("SPOTYDOWN_CHUNK_SIZE", "0"),
        ("SPOTYDOWN_SIZE_TOLERANCE", "1.5"),
        ("SPOTYDOWN_SIZE_TOLERANCE", "-0.1"),
        ("SPOTYDOWN_PROBE_SIZE", "maybe"),
    ];

    for (key, value) in cases {
        let result = Config::from_lookup(lookup(&[(key, value)]));
        let err = result.expect_err(&format!("{}={} should be rejected", key, value));
        assert!(err.contains(key), "error {:?} should name {}", err, key);
    }
}

#[test]
fn test_env_template_matches_defaults() {
    let template = include_str!("../.env.example");
    let pairs: Vec<(&str, &str)> = template
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .collect();

    assert!(!pairs.is_empty());
    assert!(pairs.iter().all(|(key, _)| key.starts_with("SPOTYDOWN_")));
    assert_eq!(Config::from_lookup(lookup(&pairs)).unwrap(), Config::default());
}
