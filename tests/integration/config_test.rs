use std::time::Duration;
use tempfile::TempDir;
use ys_monitor::core::config::{Config, PollIntervals};
use ys_monitor::core::ProductId;

fn sample_config() -> Config {
    Config::new(
        "https://discord.com/api/webhooks/123/abc".to_string(),
        vec![ProductId::new("FX4145"), ProductId::new("FY2903")],
    )
}

#[test]
fn test_config_save_and_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.json");

    let mut config = sample_config();
    config.intervals = PollIntervals {
        error_secs: 5,
        not_loaded_secs: 120,
        standard_secs: 20,
    };
    config.save(&path).unwrap();

    let loaded = Config::load(Some(&path)).unwrap();

    assert_eq!(loaded.skus, config.skus);
    assert_eq!(loaded.webhook, config.webhook);
    assert_eq!(loaded.intervals.not_loaded(), Duration::from_secs(120));
}

#[test]
fn test_config_load_minimal_file() {
    // Files holding only `webhook` and `skus` keep working
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"webhook":"https://discord.com/api/webhooks/9/tok","skus":["FX4145"]}"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.skus, vec![ProductId::new("FX4145")]);
    assert_eq!(config.intervals, PollIntervals::default());
    assert_eq!(config.webhook_target().unwrap().id(), "9");
}

#[test]
fn test_config_load_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let result = Config::load_from(&temp_dir.path().join("missing.json"));

    assert!(result.is_err());
}

#[test]
fn test_config_load_rejects_invalid_content() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");

    std::fs::write(&path, r#"{"webhook":"https://discord.com/api/webhooks/9/tok","skus":[]}"#)
        .unwrap();
    assert!(Config::load_from(&path).is_err());

    std::fs::write(&path, "not json").unwrap();
    assert!(Config::load_from(&path).is_err());
}
