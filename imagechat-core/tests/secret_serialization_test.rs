//! The API key survives persistence but never formatting

use imagechat_core::config::{load_from_json, load_from_yaml, AppConfig, SecretString};
use tempfile::TempDir;

#[test]
fn test_config_written_as_yaml_reloads_with_key() {
    let mut config = AppConfig::new("sk-persisted-key-0001");
    config.image_models = vec!["gpt-image-1".to_string()];

    let yaml = serde_yaml::to_string(&config).unwrap();
    assert!(yaml.contains("sk-persisted-key-0001"));
    assert!(!yaml.contains("[REDACTED]"));

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("imagechat.yaml");
    std::fs::write(&path, yaml).unwrap();

    let reloaded = load_from_yaml(&path).unwrap();
    assert_eq!(reloaded, config);
    assert_eq!(reloaded.api_key.expose_secret(), "sk-persisted-key-0001");
}

#[test]
fn test_config_written_as_json_reloads_with_key() {
    let config = AppConfig::new("sk-persisted-key-0002");

    let json = serde_json::to_string_pretty(&config).unwrap();
    assert!(json.contains("\"api_key\": \"sk-persisted-key-0002\""));

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("imagechat.json");
    std::fs::write(&path, json).unwrap();

    assert_eq!(load_from_json(&path).unwrap(), config);
}

#[test]
fn test_formatting_never_shows_key() {
    let config = AppConfig::new("sk-live-should-not-leak");

    let debug_output = format!("{:?}", config);
    assert!(!debug_output.contains("sk-live-should-not-leak"));
    assert!(debug_output.contains("api_key: [REDACTED]"));

    assert_eq!(config.api_key.to_string(), "[REDACTED]");
    assert_eq!(config.api_key.partial_redact(), "sk-...leak");
}

#[test]
fn test_bare_secret_is_transparent_in_json() {
    let secret: SecretString = serde_json::from_str("\"sk-inline\"").unwrap();
    assert_eq!(secret.expose_secret(), "sk-inline");
    assert_eq!(serde_json::to_string(&secret).unwrap(), "\"sk-inline\"");
}
