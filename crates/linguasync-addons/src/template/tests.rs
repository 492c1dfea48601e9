//! Unit tests for path templates.

use std::collections::BTreeMap;

use rstest::rstest;

use super::*;

fn vars<'a>(filename: &'a str, language_code: &'a str) -> BTreeMap<&'static str, &'a str> {
    BTreeMap::from([("filename", filename), ("language_code", language_code)])
}

#[rstest]
#[case::default("{{ filename|stripext }}.mo", "po/de.po", "po/de.mo")]
#[case::no_spaces("{{filename|stripext}}.mo", "po/de.po", "po/de.mo")]
#[case::dirname("{{ filename|dirname }}/{{ language_code }}.mo", "po/de.po", "po/de.mo")]
#[case::parentdir("mo/{{ filename|parentdir|stripext }}.mo", "po/sub/de.po", "mo/sub/de.mo")]
#[case::locale_tree(
    "locale/{{ language_code }}/LC_MESSAGES/demo.mo",
    "po/de.po",
    "locale/de/LC_MESSAGES/demo.mo"
)]
#[case::hidden_file("{{ filename|stripext }}", "po/.hidden", "po/.hidden")]
#[case::dotted_dir("{{ filename|stripext }}.mo", "po.d/de", "po.d/de.mo")]
fn renders_templates(#[case] source: &str, #[case] filename: &str, #[case] expected: &str) {
    let template = PathTemplate::parse(source).expect("parse");
    assert_eq!(template.render(&vars(filename, "de")).expect("render"), expected);
}

#[rstest]
#[case::unterminated("{{ filename", TemplateError::Unterminated { offset: 0 })]
#[case::empty("a{{ }}", TemplateError::EmptyPlaceholder { offset: 1 })]
#[case::variable("{{ project }}", TemplateError::UnknownVariable { name: "project".into() })]
#[case::filter("{{ filename|upper }}", TemplateError::UnknownFilter { name: "upper".into() })]
fn rejects_malformed_templates(#[case] source: &str, #[case] expected: TemplateError) {
    assert_eq!(PathTemplate::parse(source), Err(expected));
}

#[test]
fn missing_value_is_reported() {
    let template = PathTemplate::parse("{{ language_code }}.mo").expect("parse");
    let only_filename = BTreeMap::from([("filename", "po/de.po")]);
    assert_eq!(
        template.render(&only_filename),
        Err(TemplateError::MissingValue {
            name: "language_code".into()
        })
    );
}

#[test]
fn literal_templates_render_verbatim() {
    let template = PathTemplate::parse("fixed.mo").expect("parse");
    assert_eq!(template.source(), "fixed.mo");
    assert_eq!(template.render(&vars("x", "y")).expect("render"), "fixed.mo");
}
