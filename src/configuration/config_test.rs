use anyhow::Result;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();
    assert!(toml_res.is_ok());

    assert!(res.contains("api-base-url = \"http://localhost:8000\""));
    assert!(res.contains("# auth-token = \"\""));
    assert!(res.contains("# username = \"\""));
    assert!(!res.contains("config-file"));
}

#[test]
fn it_uses_kebab_case_keys() {
    assert_eq!(ConfigKey::ApiBaseURL.to_string(), "api-base-url");
    assert_eq!(ConfigKey::AuthToken.to_string(), "auth-token");
    assert_eq!(ConfigKey::ConfigFile.to_string(), "config-file");
}

#[test]
fn it_defaults_the_username() {
    assert!(!Config::default(ConfigKey::Username).is_empty());
    assert!(Config::default(ConfigKey::AuthToken).is_empty());
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec![
        "coachbot",
        "-c",
        "./config.example.toml",
        "chat",
    ])?;
    Config::load(cli::build(), vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::ApiBaseURL), "http://localhost:8000");
    assert!(!Config::get(ConfigKey::Username).is_empty());

    return Ok(());
}

#[tokio::test]
async fn it_fails_to_loads_config_from_file() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec![
        "coachbot",
        "-c",
        "./test/bad-config.toml",
        "chat",
    ])?;
    let res = Config::load(cli::build(), vec![&matches]).await;
    assert!(res.is_err());
    return Ok(());
}

#[tokio::test]
async fn it_rejects_invalid_urls_from_file() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec![
        "coachbot",
        "-c",
        "./test/bad-url-config.toml",
        "chat",
    ])?;
    let res = Config::load(cli::build(), vec![&matches]).await;
    assert!(res.is_err());
    return Ok(());
}

#[tokio::test]
async fn it_rejects_invalid_urls_from_flags() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec![
        "coachbot",
        "--api-base-url",
        "localhost without scheme",
        "-c",
        "./config.example.toml",
        "chat",
    ])?;
    let res = Config::load(cli::build(), vec![&matches]).await;
    assert!(res.is_err());
    return Ok(());
}
