use std::fs::{create_dir, write};
use std::path::{Path, PathBuf};

use pdx_tree::{
    parse_dir, parse_file, parse_files, parse_merge, parse_str, parse_walk, Channel, Colorspace,
    Date, ErrorKey, Game, LoadOptions, LogReport, ParseError, Primitive, Severity, Tree, Value,
    MAX_DEPTH,
};
use tempfile::tempdir;

fn parse_ok(text: &str) -> (Tree, Vec<LogReport>) {
    let mut reports: Vec<LogReport> = Vec::new();
    let tree = parse_str(text, Path::new("test.txt"), &mut reports).unwrap();
    (tree, reports)
}

fn take_report_contains(vec: &mut Vec<LogReport>, msg_contains: &str) -> Option<LogReport> {
    let index = vec.iter().position(|report| report.msg.contains(msg_contains))?;
    Some(vec.remove(index))
}

#[test]
fn test_province_file() {
    let path = PathBuf::from("tests/files/history/provinces/151 - Constantinople.txt");
    let mut reports: Vec<LogReport> = Vec::new();
    let tree = parse_file(&path, Game::Eu4, &mut reports).unwrap();
    assert!(reports.is_empty(), "{reports:?}");

    assert_eq!(tree.get("owner").and_then(Value::as_str), Some("BYZ"));
    let cores: Vec<&str> = tree.get_all("add_core").filter_map(Value::as_str).collect();
    assert_eq!(cores, vec!["BYZ", "TUR"]);
    assert_eq!(tree.get("hre").and_then(Value::as_bool), Some(false));
    assert_eq!(tree.get("base_tax").and_then(Value::as_int), Some(10));
    assert_eq!(tree.get("extra_cost").and_then(Value::as_real), Some(0.5));
    assert_eq!(tree.pre_comments_at(0).unwrap(), [" Constantinople".to_string()]);
    assert_eq!(tree.line_comment_at(3), Some(" claimed"));

    let discovered: Vec<String> =
        tree.get_group("discovered_by").iter().map(ToString::to_string).collect();
    assert_eq!(discovered, vec!["eastern", "western", "muslim", "ottoman"]);

    let fall = tree.get_tree("1453.5.29").unwrap();
    assert_eq!(tree.entry(17).unwrap().key, Primitive::Date(Date::new(1453, 5, 29)));
    assert_eq!(fall.get("owner").and_then(Value::as_str), Some("TUR"));
    assert_eq!(fall.pre_comments_at(2).unwrap(), [" the city falls".to_string()]);

    let tint = tree.get("tint").and_then(Value::get_color).unwrap();
    assert_eq!(tint.colorspace(), Colorspace::Rgb);
    assert_eq!(tint.to_rgb(), [200, 30, 40]);

    let owners = tree.find_all_recursive("owner");
    assert_eq!(owners.len(), 2);
}

#[test]
fn test_deterministic() {
    let text = "a = 1\n# c\nb = { c = { 1 2 } d = rgb { 1 2 3 } }\ne = f # g";
    let (first, _) = parse_ok(text);
    let (second, _) = parse_ok(text);
    assert_eq!(first, second);
}

#[test]
fn test_duplicate_keys_kept() {
    let (tree, _) = parse_ok("a = 1\na = 2");
    assert_eq!(tree.len(), 2);
    let values: Vec<i64> = tree.get_all("a").filter_map(Value::as_int).collect();
    assert_eq!(values, vec![1, 2]);
}

#[test]
fn test_empty_block_is_tree() {
    let (tree, _) = parse_ok("key = { }");
    let block = tree.get("key").and_then(Value::get_tree).unwrap();
    assert!(block.is_empty());
}

#[test]
fn test_bare_list_is_group() {
    let (tree, _) = parse_ok("key = { 1 2 3 }");
    assert_eq!(tree.len(), 3);
    assert!(tree.iter().all(|entry| entry.in_group));
    let members: Vec<i64> = tree.get_group("key").iter().filter_map(|p| p.as_int()).collect();
    assert_eq!(members, vec![1, 2, 3]);
}

#[test]
fn test_operator_makes_tree() {
    let (tree, _) = parse_ok("key = { a = 1 }");
    let block = tree.get_tree("key").unwrap();
    assert_eq!(block.len(), 1);
    assert_eq!(block.get("a").and_then(Value::as_int), Some(1));
}

#[test]
fn test_nesting_makes_tree() {
    let (tree, reports) = parse_ok("key = { { 1 2 } }");
    assert_eq!(tree.len(), 1);
    assert!(!tree.entry(0).unwrap().in_group);
    assert!(tree.get_tree("key").is_some());
    // Inside a tree, `{` can't be a key and `1 2` lacks an operator.
    assert_eq!(reports[0].key, ErrorKey::InvalidKey);
    assert_eq!(reports[1].key, ErrorKey::MissingOperator);
}

#[test]
fn test_color_literal() {
    let (tree, reports) = parse_ok("tint = rgb { 255 0 0 }");
    assert!(reports.is_empty());
    let color = tree.get("tint").and_then(Value::get_color).unwrap();
    assert_eq!(color.colorspace(), Colorspace::Rgb);
    assert_eq!(color.channels(), [Channel::Int(255), Channel::Int(0), Channel::Int(0)]);
    assert_eq!(color.to_string(), "rgb { 255 0 0 }");
}

#[test]
fn test_line_comments() {
    let (tree, _) = parse_ok("a = 1 # note\n");
    assert_eq!(tree.line_comment_at(0), Some(" note"));

    // `}` is followed by the second comment on the line of `x`.
    let (tree, _) = parse_ok("x = 1 # one\n}# two");
    assert_eq!(tree.line_comment_at(0), Some(" one"));
    assert_eq!(tree.post_comments_at(0).unwrap(), [" two".to_string()]);
}

#[test]
fn test_carriage_return_line_endings() {
    let (tree, reports) = parse_ok("a = 1 # note\rb = 2\r");
    assert!(reports.is_empty());
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.line_comment_at(0), Some(" note"));
    assert_eq!(tree.get("b").and_then(Value::as_int), Some(2));
    assert_eq!(tree.entry(1).unwrap().loc.as_ref().unwrap().line, 2);

    let (mixed, _) = parse_ok("a = 1 # note\r\nb = 2\n");
    assert_eq!(tree, mixed);
}

#[test]
fn test_unmatched_brace() {
    let (tree, mut reports) = parse_ok("a = 1\n}\nb = 2");
    assert_eq!(tree.len(), 2);
    let report = take_report_contains(&mut reports, "unmatched closing bracket").unwrap();
    assert_eq!(report.key, ErrorKey::BraceMismatch);
    assert_eq!(report.primary().loc.line, 2);
    assert!(reports.is_empty());
}

#[test]
fn test_unclosed_block() {
    let mut reports: Vec<LogReport> = Vec::new();
    let result = parse_str("a = 1\nouter = {\n  inner = 2\n", Path::new("test.txt"), &mut reports);
    match result {
        Err(ParseError::UnclosedBlock { loc, key }) => {
            assert_eq!(key, "outer");
            assert_eq!(loc.line, 2);
        }
        other => panic!("expected unclosed block error, got {other:?}"),
    }
}

#[test]
fn test_encoding_fallback() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("names.txt");
    // "Gen\xe8ve" is Genève in cp1252 and invalid utf-8
    write(&path, b"name = \"Gen\xe8ve\"\n").unwrap();

    let mut reports: Vec<LogReport> = Vec::new();
    let tree = parse_file(&path, Game::Hoi4, &mut reports).unwrap();
    assert_eq!(tree.get("name").and_then(Value::as_str), Some("Genève"));
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].key, ErrorKey::Encoding);

    // EU4 tries cp1252 first, so nothing to report
    let mut reports: Vec<LogReport> = Vec::new();
    parse_file(&path, Game::Eu4, &mut reports).unwrap();
    assert!(reports.is_empty());
}

#[test]
fn test_all_encodings_fail() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.txt");
    write(&path, b"name = \x81\xff\n").unwrap();

    let mut reports: Vec<LogReport> = Vec::new();
    let result = parse_file(&path, Game::Stellaris, &mut reports);
    assert!(matches!(result, Err(ParseError::Undecodable { .. })));
    assert_eq!(reports.len(), 2);
}

#[test]
fn test_dir_and_merge() {
    let dir = tempdir().unwrap();
    write(dir.path().join("b.txt"), "ideas = { b = 2 }\nx = 2\n").unwrap();
    write(dir.path().join("a.txt"), "ideas = { a = 1 }\nx = 1\n").unwrap();
    write(dir.path().join("broken.txt"), "oops = { a = 1\n").unwrap();
    write(dir.path().join("notes.md"), "not = script = at all").unwrap();
    create_dir(dir.path().join("sub")).unwrap();
    write(dir.path().join("sub").join("c.txt"), "y = 3\n").unwrap();

    let options = LoadOptions::new(Game::Hoi4);
    let mut reports: Vec<LogReport> = Vec::new();
    let files = parse_dir(dir.path(), &options, &mut reports).unwrap();
    let names: Vec<String> =
        files.iter().map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned()).collect();
    assert_eq!(names, ["a.txt", "b.txt", "broken.txt"]);
    assert!(files[2].result.is_err());
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].severity, Severity::Fatal);
    assert_eq!(reports[0].key, ErrorKey::ParseError);

    let mut reports: Vec<LogReport> = Vec::new();
    let files = parse_walk(dir.path(), &options, &mut reports).unwrap();
    assert_eq!(files.len(), 4);
    assert!(files[3].path.ends_with("sub/c.txt"));

    let mut reports: Vec<LogReport> = Vec::new();
    let merged = parse_merge(dir.path(), &options, 0, &mut reports).unwrap();
    assert_eq!(merged.get_all("ideas").count(), 2);
    let xs: Vec<i64> = merged.get_all("x").filter_map(Value::as_int).collect();
    assert_eq!(xs, vec![1, 2]);

    let mut reports: Vec<LogReport> = Vec::new();
    let merged = parse_merge(dir.path(), &options, 1, &mut reports).unwrap();
    assert_eq!(merged.get_all("ideas").count(), 1);
    let ideas = merged.get_tree("ideas").unwrap();
    assert_eq!(ideas.keys().map(ToString::to_string).collect::<Vec<_>>(), ["a", "b"]);
}

#[test]
fn test_missing_dir() {
    let dir = tempdir().unwrap();
    let mut reports: Vec<LogReport> = Vec::new();
    let result = parse_dir(&dir.path().join("nope"), &LoadOptions::default(), &mut reports);
    assert!(result.is_err());
}

#[test]
fn test_deep_nesting_fails_only_that_file() {
    let dir = tempdir().unwrap();
    let depth = MAX_DEPTH * 20;
    write(dir.path().join("a.txt"), "x = 1\n").unwrap();
    write(dir.path().join("b.txt"), "a = { ".repeat(depth) + &"} ".repeat(depth)).unwrap();

    let mut reports: Vec<LogReport> = Vec::new();
    let files = parse_dir(dir.path(), &LoadOptions::default(), &mut reports).unwrap();
    assert!(files[0].result.is_ok());
    assert!(matches!(files[1].result, Err(ParseError::TooDeep { .. })));
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].key, ErrorKey::ParseError);
}

#[test]
fn test_unreadable_file_in_batch() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.txt");
    let mut reports: Vec<LogReport> = Vec::new();
    let files = parse_files(&[missing], &LoadOptions::default(), &mut reports);
    assert!(matches!(files[0].result, Err(ParseError::Read { .. })));
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].key, ErrorKey::ReadError);
    assert_eq!(reports[0].severity, Severity::Fatal);
}
