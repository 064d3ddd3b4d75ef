use rulekit::config::RulekitConfig;
use tempfile::TempDir;
use tokio::fs;

#[test]
fn test_default_config() {
    let config = RulekitConfig::default();

    assert_eq!(config.registry.extension, "mdc");
    assert!(!config.registry.follow_links);
    assert!(config.matcher.action_triggers);
    assert_eq!(config.display.description_width, 80);
}

#[test]
fn test_validate_rejects_empty_extension() {
    let mut config = RulekitConfig::default();
    config.registry.extension = String::new();

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_dotted_extension() {
    let mut config = RulekitConfig::default();
    config.registry.extension = ".mdc".to_string();

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_zero_description_width() {
    let mut config = RulekitConfig::default();
    config.display.description_width = 0;

    assert!(config.validate().is_err());
}

#[tokio::test]
async fn test_load_missing_file_falls_back_to_defaults() {
    let temp = TempDir::new().unwrap();

    let config = RulekitConfig::load(temp.path()).await.unwrap();

    assert_eq!(config.registry.extension, "mdc");
}

#[tokio::test]
async fn test_save_load_round_trip() {
    let temp = TempDir::new().unwrap();

    let mut config = RulekitConfig::default();
    config.registry.extension = "rule".to_string();
    config.matcher.action_triggers = false;
    config.save(temp.path()).await.unwrap();

    let loaded = RulekitConfig::load(temp.path()).await.unwrap();
    assert_eq!(loaded.registry.extension, "rule");
    assert!(!loaded.matcher.action_triggers);
    assert_eq!(loaded.display.description_width, 80);
}

#[tokio::test]
async fn test_load_partial_file_keeps_section_defaults() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("rulekit.toml"),
        "[registry]\nextension = \"rule\"\n",
    )
    .await
    .unwrap();

    let config = RulekitConfig::load(temp.path()).await.unwrap();

    assert_eq!(config.registry.extension, "rule");
    assert!(config.matcher.action_triggers);
    assert_eq!(config.display.description_width, 80);
}

#[tokio::test]
async fn test_load_rejects_invalid_values() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("rulekit.toml"),
        "[registry]\nextension = \"\"\n",
    )
    .await
    .unwrap();

    assert!(RulekitConfig::load(temp.path()).await.is_err());
}
