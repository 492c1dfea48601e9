//! msgmerge batch scenarios.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::support::{FakeComponent, MockExecutor, ScriptedExecutor};
use crate::addon::{Addon, AddonEvent, ArgumentContributor};
use crate::alert::AlertKind;
use crate::orchestrator::{Customize, Msgmerge};
use crate::settings::{CustomizeSettings, MsgmergeSettings, parse};
use crate::tool::ToolOutcome;

const MERGED: &str = "msgid \"\"\nmsgstr \"\"\n\nmsgid \"Hello\"\nmsgstr \"\"\n";
const LATIN1_MERGED: &[u8] =
    b"msgid \"\"\nmsgstr \"\"\n\"Content-Type: text/plain; charset=ISO-8859-1\\n\"\n\nmsgid \"caf\xe9\"\nmsgstr \"Kaffee\"\n";

#[fixture]
fn component() -> FakeComponent {
    let component = FakeComponent::new()
        .with_new_base("po/demo.pot")
        .with_source("en", "po/en.po", false)
        .with_translation("de", "po/de.po")
        .with_translation("cs", "po/cs.po")
        .with_translation("fr", "po/fr.po");
    component.write("po/demo.pot", MERGED);
    component.write("po/en.po", "source\n");
    component.write("po/de.po", "old de\n");
    component.write("po/cs.po", "old cs\n");
    component
}

fn update(previous_head: Option<&str>) -> AddonEvent<'_> {
    AddonEvent::PostUpdate { previous_head }
}

#[rstest]
fn failure_is_isolated_to_one_catalogue(component: FakeComponent) {
    let executor = Arc::new(ScriptedExecutor::writing(MERGED).failing_when("de.po"));
    let addon = Msgmerge::new(MsgmergeSettings::default(), executor.clone());

    let report = addon.on_event(&component, &update(None)).expect("run");

    // en is a plain source catalogue and fr.po does not exist.
    assert_eq!(executor.invocations().len(), 2);
    assert_eq!(report.files(), ["po/cs.po"]);
    assert_eq!(component.read("po/cs.po"), MERGED);
    assert_eq!(component.read("po/de.po"), "old de\n");

    let alerts = component.last_alerts(AlertKind::Msgmerge).expect("alerts triggered");
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts.first().map(|alert| alert.addon()), Some("gettext.msgmerge"));
    assert!(component.has_pending(AlertKind::Msgmerge));
}

#[rstest]
fn irrelevant_change_skips_everything(component: FakeComponent) {
    let component = component.with_changed_files(&["src/main.c"]);
    let executor = Arc::new(ScriptedExecutor::writing(MERGED));
    let addon = Msgmerge::new(MsgmergeSettings::default(), executor.clone());

    let report = addon.on_event(&component, &update(Some("abc"))).expect("run");

    assert!(report.is_empty());
    assert!(executor.invocations().is_empty());
    assert!(component.triggered().is_empty());
}

#[rstest]
fn template_change_runs_and_clears_alerts(component: FakeComponent) {
    let component = component.with_changed_files(&["po/demo.pot"]);
    let executor = Arc::new(ScriptedExecutor::writing(MERGED));
    let addon = Msgmerge::new(MsgmergeSettings::default(), executor.clone());

    let report = addon.on_event(&component, &update(Some("abc"))).expect("run");

    assert_eq!(report.files(), ["po/de.po", "po/cs.po"]);
    assert_eq!(component.last_alerts(AlertKind::Msgmerge), Some(Vec::new()));
}

#[rstest]
fn pending_alert_forces_retry(component: FakeComponent) {
    let component = component
        .with_changed_files(&[])
        .with_pending_alert(AlertKind::Msgmerge);
    let executor = Arc::new(ScriptedExecutor::writing(MERGED));
    let addon = Msgmerge::new(MsgmergeSettings::default(), executor.clone());

    addon.on_event(&component, &update(Some("abc"))).expect("run");

    assert_eq!(executor.invocations().len(), 2);
    assert!(!component.has_pending(AlertKind::Msgmerge));
}

#[rstest]
fn latin1_catalogues_merge_without_alerts(component: FakeComponent) {
    component.write_bytes("po/de.po", LATIN1_MERGED);
    component.write_bytes("po/cs.po", b"msgid \"\"\nmsgstr \"\"\n\nmsgid \"\xe8\"\nmsgstr \"\"\n");
    let executor = Arc::new(ScriptedExecutor::writing_bytes(LATIN1_MERGED));
    let addon = Msgmerge::new(MsgmergeSettings::default(), executor.clone());

    let report = addon.on_event(&component, &update(None)).expect("run");

    assert_eq!(executor.invocations().len(), 2);
    assert_eq!(report.files(), ["po/cs.po"]);
    assert_eq!(component.read_bytes("po/de.po"), LATIN1_MERGED);
    assert_eq!(component.read_bytes("po/cs.po"), LATIN1_MERGED);
    assert_eq!(component.last_alerts(AlertKind::Msgmerge), Some(Vec::new()));
}

#[test]
fn missing_template_raises_alert() {
    let component = FakeComponent::new()
        .with_new_base("po/demo.pot")
        .with_translation("de", "po/de.po");
    component.write("po/de.po", "old\n");
    let executor = Arc::new(ScriptedExecutor::writing(MERGED));
    let addon = Msgmerge::new(MsgmergeSettings::default(), executor.clone());

    let report = addon.on_event(&component, &update(None)).expect("run");

    assert!(report.is_empty());
    assert!(executor.invocations().is_empty());
    let alerts = component.last_alerts(AlertKind::Msgmerge).expect("alert");
    assert_eq!(
        alerts.first().map(|alert| alert.error()),
        Some("Template for new translations not found")
    );
}

#[rstest]
fn arguments_include_contributions(component: FakeComponent) {
    let settings: MsgmergeSettings =
        parse("gettext.msgmerge", &serde_json::json!({"fuzzy": false})).expect("settings");
    let customize: Arc<dyn ArgumentContributor> = Arc::new(Customize::new(
        parse::<CustomizeSettings>("gettext.customize", &serde_json::json!({"width": -1}))
            .expect("settings"),
    ));

    let mut executor = MockExecutor::new();
    executor
        .expect_execute()
        .withf(|invocation| {
            let args = invocation.arguments();
            invocation.executable() == "msgmerge"
                && args.get(..3)
                    == Some(
                        &[
                            "--no-fuzzy-matching".to_owned(),
                            "--previous".to_owned(),
                            "--no-wrap".to_owned(),
                        ][..],
                    )
                && args.get(3).is_some_and(|arg| arg.starts_with("--output-file="))
                && args.last().is_some_and(|arg| arg.ends_with("demo.pot"))
        })
        .times(2)
        .returning(|invocation| ToolOutcome::success(invocation.command_line(), ""));

    let addon = Msgmerge::new(settings, Arc::new(executor)).with_contributor(customize);
    addon.on_event(&component, &update(None)).expect("run");
}

#[test]
fn install_requires_msgmerge() {
    let component = FakeComponent::new();
    let mut executor = MockExecutor::new();
    executor.expect_locate().returning(|_| None);
    let addon = Msgmerge::new(MsgmergeSettings::default(), Arc::new(executor));
    assert!(!addon.can_install(&component).is_eligible());
}
