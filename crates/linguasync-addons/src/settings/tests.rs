//! Unit tests for addon settings.

use rstest::rstest;
use serde_json::json;

use super::*;

#[test]
fn null_selects_defaults() {
    let settings: XgettextSettings = parse("gettext.xgettext", &Value::Null).expect("parse");
    assert_eq!(settings, XgettextSettings::default());
    assert_eq!(settings.files_from(), "POTFILES.in");
    assert_eq!(settings.arguments(), vec!["--from-code=UTF-8".to_owned()]);
}

#[test]
fn unknown_keys_are_rejected() {
    let error = parse::<MsgmergeSettings>("gettext.msgmerge", &json!({"fuzzzy": false}))
        .expect_err("unknown key");
    assert!(matches!(error, AddonError::Settings { ref name, .. } if name == "gettext.msgmerge"));
}

#[rstest]
#[case::defaults(json!({}), &["--previous"])]
#[case::strict(json!({"fuzzy": false, "previous": false}), &["--no-fuzzy-matching"])]
#[case::no_location(json!({"no_location": true}), &["--previous", "--no-location"])]
fn msgmerge_flags(#[case] value: Value, #[case] expected: &[&str]) {
    let settings: MsgmergeSettings = parse("gettext.msgmerge", &value).expect("parse");
    assert_eq!(settings.arguments(), expected);
}

#[test]
fn xgettext_flags_follow_configuration() {
    let settings: XgettextSettings = parse(
        "gettext.xgettext",
        &json!({
            "directory": "src",
            "from_code": "ISO-8859-1",
            "add_comments_tags": ["TRANSLATORS:", " "],
            "no_default_keywords": true,
            "keywords": ["_", "N_"],
            "flags": ["_:1:pass-c-format"],
        }),
    )
    .expect("parse");
    assert_eq!(
        settings.arguments(),
        vec![
            "--directory=src",
            "--from-code=ISO-8859-1",
            "--add-comments=TRANSLATORS:",
            "--keyword",
            "--keyword=_",
            "--keyword=N_",
            "--flag=_:1:pass-c-format",
        ]
    );
}

#[test]
fn add_comments_overrides_tags() {
    let settings: XgettextSettings = parse(
        "gettext.xgettext",
        &json!({"add_comments": true, "add_comments_tags": ["TRANSLATORS:"], "from_code": ""}),
    )
    .expect("parse");
    assert_eq!(settings.arguments(), vec!["--add-comments"]);
}

#[test]
fn dot_directory_means_repository_root() {
    let settings: XgettextSettings =
        parse("gettext.xgettext", &json!({"directory": "."})).expect("parse");
    assert_eq!(settings.directory(), "");
}

#[rstest]
#[case::blank_files_from(json!({"files_from": "  "}))]
#[case::absolute_directory(json!({"directory": "/usr/src"}))]
fn invalid_xgettext_settings(#[case] value: Value) {
    assert!(parse::<XgettextSettings>("gettext.xgettext", &value).is_err());
}

#[rstest]
#[case::default(json!(null), true)]
#[case::no_wrap(json!({"width": -1}), true)]
#[case::long(json!({"width": 65535}), true)]
#[case::zero(json!({"width": 0}), false)]
#[case::negative(json!({"width": -5}), false)]
fn customize_width_validation(#[case] value: Value, #[case] valid: bool) {
    assert_eq!(parse::<CustomizeSettings>("gettext.customize", &value).is_ok(), valid);
}

#[test]
fn mo_path_falls_back_to_default() {
    let settings: MoSettings = parse("gettext.mo", &json!({"path": ""})).expect("parse");
    assert_eq!(settings.path(), DEFAULT_MO_PATH);
    assert!(!settings.fuzzy());
}

#[test]
fn mo_path_template_is_validated() {
    let error = parse::<MoSettings>("gettext.mo", &json!({"path": "{{ project }}.mo"}))
        .expect_err("bad template");
    assert!(error.to_string().contains("project"));
}

#[rstest]
#[case::bot("Translation Bot <noreply@example.org>", true)]
#[case::human("Jane Doe <jane@example.com>", false)]
fn authors_ignore_patterns(#[case] author: &str, #[case] ignored: bool) {
    assert_eq!(AuthorsSettings::default().is_ignored(author), ignored);
}

#[test]
fn settingsless_addons_reject_keys() {
    assert!(parse::<NoSettings>("gettext.linguas", &json!({})).is_ok());
    assert!(parse::<NoSettings>("gettext.linguas", &json!({"x": 1})).is_err());
}
