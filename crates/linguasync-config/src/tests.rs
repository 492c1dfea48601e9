//! Unit tests for configuration loading.

use camino::Utf8PathBuf;
use rstest::rstest;
use tempfile::TempDir;

use super::*;

fn path() -> Utf8PathBuf {
    Utf8PathBuf::from("linguasync.json")
}

#[test]
fn empty_object_yields_defaults() {
    let config = Config::from_json(&path(), "{}").expect("parse");
    assert_eq!(config, Config::default());
    assert_eq!(config.tool_timeout(), Duration::from_secs(120));
    assert_eq!(config.log_format, LogFormat::Compact);
}

#[test]
fn full_configuration_parses() {
    let config = Config::from_json(
        &path(),
        r#"{
            "log_filter": "debug",
            "log_format": "json",
            "tool_timeout_secs": 30,
            "component": {
                "filemask": "locale/*/LC_MESSAGES/demo.po",
                "new_base": "locale/demo.pot",
                "report_source_bugs": "bugs@example.com"
            },
            "addons": [
                {"name": "gettext.linguas"},
                {"name": "gettext.msgmerge", "settings": {"previous": false}}
            ]
        }"#,
    )
    .expect("parse");
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.component.new_base.as_deref(), Some("locale/demo.pot"));
    assert_eq!(config.component.source_language, "en");
    assert_eq!(config.addons.len(), 2);
    assert!(config.addons.first().is_some_and(|addon| addon.settings.is_null()));
}

#[rstest]
#[case::unknown_key(r#"{"log_level": "info"}"#, "log_level")]
#[case::zero_timeout(r#"{"tool_timeout_secs": 0}"#, "tool_timeout_secs")]
#[case::no_wildcard(r#"{"component": {"filemask": "po/de.po"}}"#, "filemask")]
#[case::absolute_base(r#"{"component": {"new_base": "/po/demo.pot"}}"#, "new_base")]
#[case::blank_addon(r#"{"addons": [{"name": " "}]}"#, "addons")]
fn invalid_configuration_is_rejected(#[case] text: &str, #[case] expected: &str) {
    let error = Config::from_json(&path(), text).expect_err("must fail");
    let message = error.to_string();
    assert!(message.contains(expected), "unexpected error: {message}");
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let file = Utf8PathBuf::from_path_buf(dir.path().join(CONFIG_FILE_NAME)).expect("utf8 path");
    assert_eq!(Config::load(&file).expect("load"), Config::default());
}

#[test]
fn overrides_take_precedence() {
    let config = Config::default()
        .with_overrides(ConfigOverrides {
            log_filter: Some("trace".to_owned()),
            log_format: Some(LogFormat::Json),
            tool_timeout_secs: Some(5),
        })
        .expect("overrides");
    assert_eq!(config.log_filter, "trace");
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.tool_timeout_secs, 5);

    let rejected = Config::default().with_overrides(ConfigOverrides {
        tool_timeout_secs: Some(0),
        ..ConfigOverrides::default()
    });
    assert!(rejected.is_err());
}

#[rstest]
#[case::json("json", LogFormat::Json)]
#[case::mixed_case("Compact", LogFormat::Compact)]
fn log_format_parses_case_insensitively(#[case] text: &str, #[case] expected: LogFormat) {
    assert_eq!(text.parse::<LogFormat>().expect("parse"), expected);
}

#[test]
fn state_paths_live_below_repository() {
    let dir = TempDir::new().expect("temp dir");
    let paths = StatePaths::from_config(&Config::default(), dir.path()).expect("paths");
    assert!(paths.state_dir().is_dir());
    assert!(paths.lock_path().starts_with(dir.path().join(".linguasync")));
    assert!(paths.alerts_path().ends_with("alerts.json"));
}
