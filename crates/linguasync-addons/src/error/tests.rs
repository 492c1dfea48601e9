//! Unit tests for addon error types.

use std::path::PathBuf;

use rstest::rstest;

use super::*;

#[test]
fn unknown_addon_message_includes_name() {
    let error = AddonError::UnknownAddon {
        name: "gettext.bogus".into(),
    };
    let message = error.to_string();
    assert!(
        message.contains("gettext.bogus"),
        "expected name in message: {message}"
    );
}

#[rstest]
#[case::settings(
    AddonError::Settings {
        name: "gettext.xgettext".into(),
        message: "files_from must not be empty".into(),
    },
    "files_from must not be empty"
)]
#[case::not_installable(
    AddonError::NotInstallable {
        name: "gettext.msgmerge".into(),
        reason: "msgmerge not found".into(),
    },
    "msgmerge not found"
)]
#[case::invalid_path(
    AddonError::InvalidPath {
        path: "../etc/passwd".into(),
        message: "outside repository".into(),
    },
    "../etc/passwd"
)]
fn error_message_includes_detail(#[case] error: AddonError, #[case] expected: &str) {
    let message = error.to_string();
    assert!(
        message.contains(expected),
        "expected {expected} in message: {message}"
    );
}

#[test]
fn io_error_includes_path_and_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AddonError>();
    let error = AddonError::io(
        PathBuf::from("po/LINGUAS"),
        std::io::Error::other("disk full"),
    );
    let message = error.to_string();
    assert!(message.contains("po/LINGUAS"), "missing path: {message}");
    assert!(message.contains("disk full"), "missing cause: {message}");
}
