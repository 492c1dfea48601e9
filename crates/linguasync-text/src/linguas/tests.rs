//! Unit tests for `LINGUAS` reconciliation.

use std::collections::BTreeSet;

use rstest::rstest;

use super::*;

fn codes(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

fn lines(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

fn listed_codes(result: &Reconciliation) -> BTreeSet<String> {
    result
        .lines()
        .iter()
        .map(|line| code_token(line))
        .filter(|code| !code.is_empty())
        .map(str::to_owned)
        .collect()
}

#[rstest]
#[case::plain("fr\n", "fr")]
#[case::trailing_comment("fr # French\n", "fr")]
#[case::comment("# header\n", "")]
#[case::blank("   \n", "")]
#[case::crlf("de\r\n", "de")]
fn code_token_strips_comments_and_whitespace(#[case] line: &str, #[case] expected: &str) {
    assert_eq!(code_token(line), expected);
}

#[test]
fn appends_missing_codes_in_sorted_order() {
    let result = reconcile(lines(&["de\n"]), &codes(&["pt", "de", "cs"]));
    assert!(result.changed());
    assert_eq!(result.lines(), ["de\n", "cs\n", "pt\n"]);
}

#[test]
fn removes_codes_no_longer_desired() {
    let result = reconcile(lines(&["de\n", "fr\n", "it\n"]), &codes(&["fr"]));
    assert!(result.changed());
    assert_eq!(result.lines(), ["fr\n"]);
}

#[test]
fn second_run_is_idempotent() {
    let desired = codes(&["de", "fr", "ja"]);
    let first = reconcile(lines(&["# langs\n", "de\n", "it\n"]), &desired);
    assert!(first.changed());
    let second = reconcile(first.lines().to_vec(), &desired);
    assert!(!second.changed());
    assert_eq!(second.lines(), first.lines());
}

#[rstest]
#[case::empty(&[], &["de"])]
#[case::mixed(&["# x\n", "de\n", "\n", "fr # y\n", "it\n"], &["fr", "pl"])]
#[case::all_removed(&["de\n", "fr\n"], &[])]
#[case::duplicates(&["de\n", "de\n"], &["de"])]
fn listed_codes_equal_desired(#[case] input: &[&str], #[case] desired: &[&str]) {
    let result = reconcile(lines(input), &codes(desired));
    assert_eq!(listed_codes(&result), codes(desired));
}

#[test]
fn empty_document_receives_only_desired_codes() {
    let result = reconcile(Vec::new(), &codes(&["fr", "de"]));
    assert!(result.changed());
    assert_eq!(result.lines(), ["de\n", "fr\n"]);
}

#[test]
fn single_line_list_is_rewritten_sorted() {
    let result = reconcile(lines(&["en fr de\n"]), &codes(&["fr", "de", "es"]));
    assert!(result.changed());
    assert_eq!(result.lines(), ["de es fr\n"]);
}

#[test]
fn single_line_list_already_matching_is_unchanged() {
    let result = reconcile(lines(&["de en fr\n"]), &codes(&["de", "en", "fr"]));
    assert!(!result.changed());
    assert_eq!(result.lines(), ["de en fr\n"]);
}

#[test]
fn single_line_list_stops_scanning() {
    let input = lines(&["# header\n", "de fr\n", "stray\n"]);
    let result = reconcile(input, &codes(&["de", "fr"]));
    assert!(!result.changed());
    assert_eq!(result.lines(), ["# header\n", "de fr\n", "stray\n"]);
}

#[test]
fn comments_and_blank_lines_are_preserved() {
    let input = lines(&["# header\n", "\n", "fr\n"]);
    let result = reconcile(input.clone(), &codes(&["fr"]));
    assert!(!result.changed());
    assert_eq!(result.lines(), input.as_slice());
}

#[test]
fn unterminated_last_line_is_terminated_before_appending() {
    let result = reconcile(lines(&["de"]), &codes(&["de", "fr"]));
    assert!(result.changed());
    assert_eq!(result.to_text(), "de\nfr\n");
}
