//! MO generation scenarios.

use std::fs;
use std::sync::Arc;

use rstest::rstest;
use serde_json::json;

use super::support::{FakeCompiler, FakeComponent};
use crate::addon::{Addon, AddonEvent};
use crate::orchestrator::GenerateMo;
use crate::settings::{MoSettings, parse};

fn addon(settings: serde_json::Value) -> GenerateMo {
    let settings: MoSettings = parse("gettext.mo", &settings).expect("settings");
    GenerateMo::new(settings, Arc::new(FakeCompiler)).expect("addon")
}

fn component() -> FakeComponent {
    let component = FakeComponent::new().with_translation("de", "po/de.po");
    component.write("po/de.po", "msgid \"\"\nmsgstr \"\"\n");
    component
}

#[test]
fn writes_mo_next_to_catalogue() {
    let component = component();
    let translation = component.translation("de");
    let event = AddonEvent::PreCommit {
        translation: &translation,
        author: "Jane <jane@example.com>",
    };

    let report = addon(json!(null)).on_event(&component, &event).expect("run");

    assert_eq!(report.files(), ["po/de.mo"]);
    let written = fs::read(component.root().join("po/de.mo")).expect("read mo");
    assert_eq!(written, FakeCompiler::payload(&translation, false));
}

#[test]
fn identical_bytes_are_not_rewritten() {
    let component = component();
    let translation = component.translation("de");
    fs::write(
        component.root().join("po/de.mo"),
        FakeCompiler::payload(&translation, true),
    )
    .expect("seed");
    let event = AddonEvent::PreCommit {
        translation: &translation,
        author: "Jane",
    };

    let report = addon(json!({"fuzzy": true}))
        .on_event(&component, &event)
        .expect("run");

    assert!(report.is_empty());
}

#[test]
fn template_can_build_locale_tree() {
    let component = component();
    let translation = component.translation("de");
    let event = AddonEvent::PreCommit {
        translation: &translation,
        author: "Jane",
    };

    let report = addon(json!({"path": "locale/{{ language_code }}/LC_MESSAGES/demo.mo"}))
        .on_event(&component, &event)
        .expect("run");

    assert_eq!(report.files(), ["locale/de/LC_MESSAGES/demo.mo"]);
    assert!(component.root().join("locale/de/LC_MESSAGES/demo.mo").is_file());
}

#[rstest]
#[case::parent("../{{ language_code }}.mo")]
#[case::absolute("/tmp/{{ language_code }}.mo")]
fn paths_outside_repository_are_skipped(#[case] template: &str) {
    let component = component();
    let translation = component.translation("de");
    let event = AddonEvent::PreCommit {
        translation: &translation,
        author: "Jane",
    };

    let report = addon(json!({"path": template}))
        .on_event(&component, &event)
        .expect("run");

    assert!(report.is_empty());
}
