/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use log::LevelFilter;
use std::path::PathBuf;

use answer_checker::app_config::{Config, LogLevel};
use answer_checker::submission::FormVariant;

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.endpoint, "http://localhost:5000/evaluate");
    assert_eq!(config.variant, FormVariant::Paired);
    assert_eq!(config.timeout_secs, None);
    assert_eq!(config.review_dir, None);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());

    config.endpoint = "ftp://localhost:5000/evaluate".to_string();
    assert!(config.validate().is_err());

    config.endpoint = "https://grader.example.org/evaluate".to_string();
    assert!(config.validate().is_ok());

    config.timeout_secs = Some(0);
    assert!(config.validate().is_err());

    config.timeout_secs = Some(30);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_deserialize_withPartialJson_shouldFillDefaults() -> Result<()> {
    let config: Config = serde_json::from_str(r#"{ "variant": "single", "log_level": "debug" }"#)?;

    assert_eq!(config.variant, FormVariant::Single);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.endpoint, "http://localhost:5000/evaluate");
    assert_eq!(config.timeout_secs, None);

    Ok(())
}

#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaultConfig() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;

    assert!(path.exists());
    assert_eq!(config.endpoint, Config::default().endpoint);

    let written: Config = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(written.variant, FormVariant::Paired);

    Ok(())
}

#[test]
fn test_load_or_create_withExistingFile_shouldReadIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");
    std::fs::write(
        &path,
        r#"{
            "endpoint": "http://grader:8080/evaluate",
            "variant": "single",
            "timeout_secs": 15,
            "review_dir": "reviews"
        }"#,
    )?;

    let config = Config::load_or_create(&path)?;

    assert_eq!(config.endpoint, "http://grader:8080/evaluate");
    assert_eq!(config.variant, FormVariant::Single);
    assert_eq!(config.timeout_secs, Some(15));
    assert_eq!(config.review_dir(), PathBuf::from("reviews"));

    Ok(())
}

#[test]
fn test_load_or_create_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");
    std::fs::write(&path, "{ endpoint: ")?;

    assert!(Config::load_or_create(&path).is_err());

    Ok(())
}

#[test]
fn test_logLevel_toLevelFilter_shouldMapEveryLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), LevelFilter::Error);
    assert_eq!(LogLevel::Warn.to_level_filter(), LevelFilter::Warn);
    assert_eq!(LogLevel::Info.to_level_filter(), LevelFilter::Info);
    assert_eq!(LogLevel::Debug.to_level_filter(), LevelFilter::Debug);
    assert_eq!(LogLevel::Trace.to_level_filter(), LevelFilter::Trace);
}

#[test]
fn test_endpointUrl_withDefaultConfig_shouldPointAtPort5000() -> Result<()> {
    let url = Config::default().endpoint_url()?;

    assert_eq!(url.host_str(), Some("localhost"));
    assert_eq!(url.port(), Some(5000));
    assert_eq!(url.path(), "/evaluate");

    Ok(())
}
