//! Unit tests for manifest parsing and path normalisation.

use std::collections::BTreeSet;
use std::fs;

use rstest::rstest;

use super::*;

fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

#[test]
fn parses_entries_and_keeps_blank_lines() {
    let entries = parse_manifest("# comment\nsrc/a.c  \n\nsrc/b.c\n");
    assert_eq!(entries, ["src/a.c", "", "src/b.c"]);
    assert_eq!(manifest_paths(&entries, ""), set(&["src/a.c", "src/b.c"]));
}

#[rstest]
#[case::tabs_and_cr("src/a.c\t \r\n", "src/a.c")]
#[case::leading_blank_kept("  src/a.c\n", "  src/a.c")]
#[case::no_final_newline("src/a.c", "src/a.c")]
fn trailing_whitespace_is_trimmed(#[case] text: &str, #[case] expected: &str) {
    assert_eq!(parse_manifest(text), [expected]);
}

#[test]
fn indented_hash_is_not_a_comment() {
    assert_eq!(parse_manifest(" # not a comment\n"), [" # not a comment"]);
}

#[test]
fn directory_prefix_is_applied() {
    let entries = vec![String::from("a.c"), String::from("./lib/b.c")];
    assert_eq!(manifest_paths(&entries, "src"), set(&["src/a.c", "src/lib/b.c"]));
}

#[test]
fn duplicate_entries_collapse() {
    let entries = vec![String::from("a.c"), String::from("./a.c")];
    assert_eq!(manifest_paths(&entries, ""), set(&["a.c"]));
}

#[rstest]
#[case::dot_segments("src/./x/../a.c", "src/a.c")]
#[case::leading_slashes("//a.c", "a.c")]
#[case::escaping("src/../../a.c", "../a.c")]
#[case::empty("", "")]
fn cleanup_path_normalises(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(cleanup_path(input), expected);
}

#[test]
fn read_manifest_parses_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("POTFILES.in");
    fs::write(&path, "# files\nsrc/main.c\n").expect("write manifest");
    assert_eq!(read_manifest(&path).expect("read"), ["src/main.c"]);
}
