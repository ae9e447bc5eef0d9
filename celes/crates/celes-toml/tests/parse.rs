//! End-to-end tests for the public TOML API.

use celes_toml::{open, parse_str, TomlError, TomlType};

#[test]
fn single_pair() {
    let root = parse_str("t", "Name = \"celes\"").unwrap();
    assert_eq!(root.len(), 1);
    assert_eq!(root.get_string("Name"), Some("celes"));
}

#[test]
fn pair_inside_section() {
    let root = parse_str("t", "[Build]\nName = \"x\"").unwrap();
    assert_eq!(root.section_string("Build", "Name"), Some("x"));
}

#[test]
fn real_value() {
    let root = parse_str("t", "n = -50.001e-54").unwrap();
    assert_eq!(root.value_type("n"), Some(TomlType::Real));
    let n = root.get_real("n").unwrap();
    assert!((n - -5.0001e-53).abs() < 1e-3);
}

#[test]
fn binary_value() {
    let root = parse_str("t", "v = 0b10010010101000").unwrap();
    assert_eq!(root.value_type("v"), Some(TomlType::Integer));
    assert_eq!(root.get_int("v"), Some(9512));
}

#[test]
fn escaped_newline_in_string() {
    let root = parse_str("t", "k = \"a\\nb\"").unwrap();
    assert_eq!(root.get_string("k"), Some("a\nb"));
    assert_eq!(root.get_string("k").unwrap().as_bytes(), b"a\x0ab");
}

#[test]
fn unterminated_string_reports_eof() {
    let err = parse_str("t", "k = \"a").unwrap_err();
    let diagnostics = err.diagnostics().expect("parse error");
    assert_eq!(diagnostics.len(), 1);

    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(diag.row, 1);
    assert_eq!(diag.message, "Unexpected end of file");
}

#[test]
fn assignment_colliding_with_table() {
    let err = parse_str("t", "a.b = 1\na = 2").unwrap_err();
    let diagnostics = err.diagnostics().expect("parse error");
    assert!(diagnostics.has_errors());
    assert!(diagnostics
        .iter()
        .next()
        .unwrap()
        .message
        .starts_with("Invalid identifier"));
}

#[test]
fn table_array_appends_elements() {
    let root = parse_str(
        "t",
        "[[servers]]\nhost = \"h1\"\n[[servers]]\nhost = \"h2\"",
    )
    .unwrap();

    let servers = root.get_array("servers").unwrap();
    assert_eq!(servers.len(), 2);
    assert_eq!(servers.get_table(0).unwrap().get_string("host"), Some("h1"));
    assert_eq!(servers.get_table(1).unwrap().get_string("host"), Some("h2"));
}

#[test]
fn dotted_key_order_does_not_matter() {
    let root = parse_str("t", "a.b = 1\na.c = 2").unwrap();
    let a = root.get_table("a").unwrap();
    assert_eq!(a.get_int("b"), Some(1));
    assert_eq!(a.get_int("c"), Some(2));
    assert_eq!(a.len(), 2);
}

#[test]
fn underscore_groupings_are_invisible() {
    let root = parse_str("t", "a = 1_000\nb = 1000").unwrap();
    assert_eq!(root.get_int("a"), root.get_int("b"));
}

#[test]
fn integer_bases_round_trip() {
    for n in [0i64, 1, 7, 9512, 65535, -1, -9512, i64::MAX, i64::MIN + 1] {
        let decimal = format!("v = {}", n);
        assert_eq!(parse_str("t", &decimal).unwrap().get_int("v"), Some(n));

        let magnitude = n.unsigned_abs();
        let sign = if n < 0 { "-" } else { "" };
        for source in [
            format!("v = {}0b{:b}", sign, magnitude),
            format!("v = {}0o{:o}", sign, magnitude),
            format!("v = {}0x{:x}", sign, magnitude),
            format!("v = {}0X{:X}", sign, magnitude),
        ] {
            assert_eq!(
                parse_str("t", &source).unwrap().get_int("v"),
                Some(n),
                "input {:?}",
                source
            );
        }
    }
}

#[test]
fn booleans_parse_and_continue() {
    let root = parse_str("t", "flag = true\nother = false\nn = 1").unwrap();
    assert_eq!(root.get_bool("flag"), Some(true));
    assert_eq!(root.get_bool("other"), Some(false));
    assert_eq!(root.get_int("n"), Some(1));
}

#[test]
fn comments_are_trivia() {
    let root = parse_str(
        "t",
        "# leading comment\nName = \"x\"\n# trailing comment\n[Build]\n# inside section\nJobs = 2\n",
    )
    .unwrap();
    assert_eq!(root.get_string("Name"), Some("x"));
    assert_eq!(root.section_int("Build", "Jobs"), Some(2));
}

#[test]
fn multiline_strings() {
    let root = parse_str("t", "k = \"\"\"line one\nline two\"\"\"").unwrap();
    assert_eq!(root.get_string("k"), Some("line one\nline two"));

    let root = parse_str("t", "k = '''raw \\n text'''").unwrap();
    assert_eq!(root.get_string("k"), Some("raw \\n text"));
}

#[test]
fn quoted_keys() {
    let root = parse_str("t", "\"my key\" = 1\n'other key' = 2").unwrap();
    assert_eq!(root.get_int("my key"), Some(1));
    assert_eq!(root.get_int("other key"), Some(2));
}

#[test]
fn sections_with_dotted_headers() {
    let root = parse_str("t", "[a.b]\nc = 1").unwrap();
    let a = root.get_table("a").unwrap();
    let b = a.get_table("b").unwrap();
    assert_eq!(b.get_int("c"), Some(1));

    // The key lives two levels down, not directly under `a`.
    assert_eq!(root.section_int("a", "c"), None);
}

#[test]
fn duplicate_section_is_an_error() {
    let err = parse_str("t", "[a]\nx = 1\n[a]\ny = 2").unwrap_err();
    assert!(err.diagnostics().unwrap().has_errors());
}

#[test]
fn table_array_with_subtable_section() {
    let root = parse_str(
        "t",
        "[[fruit]]\nname = \"apple\"\n[fruit.physical]\ncolor = \"red\"",
    )
    .unwrap();

    let fruit = root.get_array("fruit").unwrap();
    assert_eq!(fruit.len(), 1);

    let first = fruit.get_table(0).unwrap();
    assert_eq!(first.get_string("name"), Some("apple"));
    assert_eq!(first.section_string("physical", "color"), Some("red"));
}

#[test]
fn table_array_colliding_with_value() {
    let err = parse_str("t", "servers = 1\n[[servers]]\nhost = \"h\"").unwrap_err();
    assert!(err.diagnostics().unwrap().has_errors());
}

#[test]
fn empty_input_is_an_empty_table() {
    let root = parse_str("t", "").unwrap();
    assert!(root.is_empty());

    let root = parse_str("t", "   \n\t\n").unwrap();
    assert!(root.is_empty());
}

#[test]
fn inline_containers_are_unimplemented() {
    for source in ["k = [1, 2]", "k = {a = 1}"] {
        let err = parse_str("t", source).unwrap_err();
        let diagnostics = err.diagnostics().unwrap();
        assert!(!diagnostics.is_empty(), "input {:?}", source);
        assert!(
            diagnostics.iter().next().unwrap().message.contains("unsupported"),
            "input {:?}",
            source
        );
    }
}

#[test]
fn first_diagnostic_cites_offending_token() {
    let err = parse_str("t", "ok = 1\nbad = @\nnever = 2").unwrap_err();
    let diag = err.diagnostics().unwrap().iter().next().unwrap();
    assert_eq!((diag.row, diag.col), (2, 7));
}

#[test]
fn open_missing_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = open(dir.path().join("Project.toml")).unwrap_err();
    assert!(matches!(err, TomlError::FileNotFound { .. }));
}

#[test]
fn open_valid_file_with_bom() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("Project.toml");
    std::fs::write(&path, b"\xEF\xBB\xBF[Build]\nName = \"demo\"\n").unwrap();

    let root = open(&path).unwrap();
    assert_eq!(root.section_string("Build", "Name"), Some("demo"));
}

#[test]
fn open_broken_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("Project.toml");
    std::fs::write(&path, "Name = @@@\n").unwrap();

    let err = open(&path).unwrap_err();
    assert!(matches!(err, TomlError::Parse(_)));
    assert!(err.to_string().contains("(1, 8)"));
}

#[test]
fn open_empty_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("Project.toml");
    std::fs::write(&path, "").unwrap();

    assert!(open(&path).unwrap().is_empty());
}
