use savedvars_core::{parse_str, Key, Root, Table, Value};

/// Helper: parse input that is expected to be valid.
fn parse(input: &str) -> Root {
    parse_str(input).unwrap_or_else(|e| panic!("parse failed for {input:?}: {e}"))
}

/// Helper: the table bound to `name`.
fn table<'a>(root: &'a Root, name: &str) -> &'a Table {
    root.var(name)
        .and_then(Value::as_table)
        .unwrap_or_else(|| panic!("{name} is not a table"))
}

fn keys(t: &Table) -> Vec<Key> {
    t.iter().map(|(k, _)| k.clone()).collect()
}

// ============================================================================
// Top-level assignments
// ============================================================================

#[test]
fn single_assignment() {
    let root = parse("X = 1");
    assert_eq!(root.var("X").and_then(Value::as_i64), Some(1));
    assert_eq!(root.len(), 1);
}

#[test]
fn multiple_assignments() {
    let root = parse("A = 1\nB = 2");
    assert_eq!(root.var("A").and_then(Value::as_i64), Some(1));
    assert_eq!(root.var("B").and_then(Value::as_i64), Some(2));
    assert_eq!(root.names().collect::<Vec<_>>(), vec!["A", "B"]);
}

#[test]
fn duplicate_top_level_last_write_wins() {
    let root = parse("A = 1\nB = 0\nA = 2");
    assert_eq!(root.var("A").and_then(Value::as_i64), Some(2));
    // The rebinding keeps A's original position.
    assert_eq!(root.names().collect::<Vec<_>>(), vec!["A", "B"]);
}

#[test]
fn assignment_without_spaces() {
    let root = parse("Flag=true");
    assert_eq!(root.var("Flag"), Some(&Value::Boolean(true)));
}

#[test]
fn assignment_with_newline_before_equals() {
    let root = parse("Name\n=\n\"x\"");
    assert_eq!(root.var("Name").and_then(Value::as_str), Some("x"));
}

#[test]
fn empty_input_yields_empty_root() {
    assert!(parse("").is_empty());
    assert!(parse("   \n\t\n").is_empty());
    assert!(parse("-- only a comment").is_empty());
}

#[test]
fn leading_comment_is_ignored() {
    let root = parse("-- comment\nX = 1");
    assert_eq!(root.var("X").and_then(Value::as_i64), Some(1));
}

#[test]
fn trailing_comment_on_assignment_line() {
    let root = parse("X = 1 -- the answer\nY = 2");
    assert_eq!(root.var("X").and_then(Value::as_i64), Some(1));
    assert_eq!(root.var("Y").and_then(Value::as_i64), Some(2));
}

// ============================================================================
// Lenient statement skipping
// ============================================================================

#[test]
fn unknown_punctuation_between_assignments_is_skipped() {
    let root = parse("A = 1\n;;; @@@ !!\nB = 2");
    assert_eq!(root.var("A").and_then(Value::as_i64), Some(1));
    assert_eq!(root.var("B").and_then(Value::as_i64), Some(2));
}

#[test]
fn local_statement_does_not_fail_the_file() {
    let root = parse("local x = 1\nDB = {}");
    assert!(root.var("DB").is_some());
    // Skipping proceeds one character at a time, so the `x = 1` tail is
    // picked up as an assignment of its own.
    assert_eq!(root.var("x").and_then(Value::as_i64), Some(1));
    assert!(root.var("local").is_none());
}

#[test]
fn equality_is_not_an_assignment() {
    let root = parse("if a == b then end\nX = 1");
    assert!(root.var("a").is_none());
    assert_eq!(root.var("X").and_then(Value::as_i64), Some(1));
}

#[test]
fn non_ascii_bytes_between_statements_are_skipped() {
    let root = parse("→ ✓\nX = \"ok\"");
    assert_eq!(root.var("X").and_then(Value::as_str), Some("ok"));
}

// ============================================================================
// Tables
// ============================================================================

#[test]
fn positional_entries_start_at_one() {
    let root = parse("VarName = {1,2,3}");
    let t = table(&root, "VarName");
    assert_eq!(keys(t), vec![Key::Integer(1), Key::Integer(2), Key::Integer(3)]);
    for i in 1..=3 {
        assert_eq!(t.get_index(i).and_then(Value::as_i64), Some(i));
    }
}

#[test]
fn explicit_keys_do_not_advance_auto_index() {
    let root = parse(r#"T = {a=1, [2]="x", 5}"#);
    let t = table(&root, "T");
    assert_eq!(t.get_str("a").and_then(Value::as_i64), Some(1));
    assert_eq!(t.get_index(2).and_then(Value::as_str), Some("x"));
    assert_eq!(t.get_index(1).and_then(Value::as_i64), Some(5));
    assert_eq!(
        keys(t),
        vec![Key::from("a"), Key::Integer(2), Key::Integer(1)]
    );
}

#[test]
fn positional_entry_overwrites_explicit_index_in_place() {
    // No renumbering around explicit integer keys.
    let root = parse(r#"T = {[1] = "x", "y", "z"}"#);
    let t = table(&root, "T");
    assert_eq!(t.len(), 2);
    assert_eq!(t.get_index(1).and_then(Value::as_str), Some("y"));
    assert_eq!(t.get_index(2).and_then(Value::as_str), Some("z"));
    assert_eq!(keys(t), vec![Key::Integer(1), Key::Integer(2)]);
}

#[test]
fn duplicate_keys_keep_first_position() {
    let root = parse("T = {a = 1, b = 2, a = 3}");
    let t = table(&root, "T");
    assert_eq!(keys(t), vec![Key::from("a"), Key::from("b")]);
    assert_eq!(t.get_str("a").and_then(Value::as_i64), Some(3));
}

#[test]
fn empty_table() {
    let root = parse("T = {}");
    assert!(table(&root, "T").is_empty());
}

#[test]
fn trailing_comma_is_optional() {
    let with = parse("T = {1, 2, 3,}");
    let without = parse("T = {1, 2, 3}");
    assert_eq!(with, without);
}

#[test]
fn entries_without_commas() {
    let root = parse("T = {a = 1 b = 2}");
    let t = table(&root, "T");
    assert_eq!(t.get_str("a").and_then(Value::as_i64), Some(1));
    assert_eq!(t.get_str("b").and_then(Value::as_i64), Some(2));
}

#[test]
fn nested_tables() {
    let root = parse("T = {a={b=1}}");
    let a = table(&root, "T").get_str("a").and_then(Value::as_table).unwrap();
    assert_eq!(a.get_str("b").and_then(Value::as_i64), Some(1));
}

#[test]
fn client_style_multiline_table() {
    let source = r#"
MyAddonDB = {
	["profileKeys"] = {
		["Thrall - Durotan"] = "Default",
	},
	["profiles"] = {
		["Default"] = {
			["minimap"] = {
				["hide"] = false,
				["minimapPos"] = 203.5,
			},
			["history"] = {
				"first", -- [1]
				"second", -- [2]
			},
		},
	},
}
"#;
    let root = parse(source);
    assert_eq!(
        root.get("MyAddonDB.profileKeys.Thrall - Durotan").and_then(Value::as_str),
        Some("Default")
    );
    assert_eq!(
        root.get("MyAddonDB.profiles.Default.minimap.minimapPos").and_then(Value::as_f64),
        Some(203.5)
    );
    assert_eq!(
        root.get("MyAddonDB.profiles.Default.minimap.hide"),
        Some(&Value::Boolean(false))
    );
    assert_eq!(
        root.get("MyAddonDB.profiles.Default.history.2").and_then(Value::as_str),
        Some("second")
    );
}

#[test]
fn bracket_key_with_whitespace_and_comments() {
    let root = parse("T = { [ \"k\" ] -- note\n = 7 }");
    assert_eq!(table(&root, "T").get_str("k").and_then(Value::as_i64), Some(7));
}

#[test]
fn identifier_key_with_comment_before_equals() {
    let root = parse("T = { a -- note\n = 7, [\"b\"] -- note\n = 8 }");
    let t = table(&root, "T");
    assert_eq!(t.get_str("a").and_then(Value::as_i64), Some(7));
    assert_eq!(t.get_str("b").and_then(Value::as_i64), Some(8));
}

#[test]
fn positional_identifier_followed_by_comment() {
    let root = parse("T = { FOO -- note\n b = 1 }");
    let t = table(&root, "T");
    assert_eq!(t.get_index(1).and_then(Value::as_str), Some("FOO"));
    assert_eq!(t.get_str("b").and_then(Value::as_i64), Some(1));
}

#[test]
fn bracket_key_with_negative_integer() {
    let root = parse("T = {[-3] = true}");
    assert_eq!(table(&root, "T").get_index(-3), Some(&Value::Boolean(true)));
}

#[test]
fn degenerate_bracket_keys_are_kept() {
    let root = parse("T = {[true] = 1, [1.5] = 2, [nil] = 3, [{1}] = 4}");
    let t = table(&root, "T");
    assert_eq!(
        keys(t),
        vec![
            Key::Other("true".into()),
            Key::Other("1.5".into()),
            Key::Other("nil".into()),
            Key::Other("{[1] = 1}".into()),
        ]
    );
    assert_eq!(t.get(&Key::Other("1.5".into())).and_then(Value::as_i64), Some(2));
}

#[test]
fn bracket_key_bare_identifier_is_string_key() {
    let root = parse("T = {[FOO] = 1}");
    assert_eq!(table(&root, "T").get_str("FOO").and_then(Value::as_i64), Some(1));
}

#[test]
fn identifier_key_requires_single_equals() {
    // `a == 1` is not an identifier key: `a` is a positional bare identifier,
    // after which `=` cannot start a value.
    assert!(parse_str("T = {a == 1}").is_err());
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn double_quoted_string_with_newline_escape() {
    let root = parse(r#"S = "line1\nline2""#);
    assert_eq!(root.var("S").and_then(Value::as_str), Some("line1\nline2"));
}

#[test]
fn single_quoted_string_with_escaped_quote() {
    let root = parse(r"S2='it\'s'");
    assert_eq!(root.var("S2").and_then(Value::as_str), Some("it's"));
}

#[test]
fn other_quote_kind_does_not_terminate() {
    let root = parse(r#"A = "it's" B = 'say "hi"'"#);
    assert_eq!(root.var("A").and_then(Value::as_str), Some("it's"));
    assert_eq!(root.var("B").and_then(Value::as_str), Some("say \"hi\""));
}

#[test]
fn all_escapes() {
    let root = parse(r#"S = "a\tb\rc\\d\"e\qf""#);
    assert_eq!(root.var("S").and_then(Value::as_str), Some("a\tb\rc\\d\"eqf"));
}

#[test]
fn raw_newline_in_string_advances_line_count() {
    let err = parse_str("S = \"a\nb\"\nX = @").unwrap_err();
    assert_eq!(err.line(), Some(3));
}

#[test]
fn unicode_string_content() {
    let root = parse("S = \"Zul'jin — ☠ 日本\"");
    assert_eq!(root.var("S").and_then(Value::as_str), Some("Zul'jin — ☠ 日本"));
}

#[test]
fn escaped_multibyte_character_keeps_payload() {
    let root = parse(r#"S = "\é""#);
    assert_eq!(root.var("S").and_then(Value::as_str), Some("é"));
}

#[test]
fn comment_marker_inside_string_is_text() {
    let root = parse("S = \"a -- b\"");
    assert_eq!(root.var("S").and_then(Value::as_str), Some("a -- b"));
}

#[test]
fn empty_strings() {
    let root = parse(r#"A = "" B = ''"#);
    assert_eq!(root.var("A").and_then(Value::as_str), Some(""));
    assert_eq!(root.var("B").and_then(Value::as_str), Some(""));
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn integer_and_float_literals() {
    let root = parse("I = 42 N = -7 F = 3.14 E = 1e3 G = -2.5E-2");
    let i = root.var("I").and_then(Value::as_number).unwrap();
    assert!(i.is_integer());
    assert_eq!(i.as_i64(), Some(42));
    assert_eq!(root.var("N").and_then(Value::as_i64), Some(-7));

    let f = root.var("F").and_then(Value::as_number).unwrap();
    assert!(!f.is_integer());
    assert_eq!(f.as_f64(), 3.14);
    assert_eq!(f.as_i64(), None);

    assert_eq!(root.var("E").and_then(Value::as_f64), Some(1000.0));
    assert_eq!(root.var("G").and_then(Value::as_f64), Some(-0.025));
}

#[test]
fn number_keeps_source_text() {
    let root = parse("F = 1.50 Z = 007");
    let f = root.var("F").and_then(Value::as_number).unwrap();
    assert_eq!(f.as_str(), "1.50");
    assert_eq!(f.as_f64(), 1.5);
    let z = root.var("Z").and_then(Value::as_number).unwrap();
    assert_eq!(z.as_str(), "007");
    assert_eq!(z.as_i64(), Some(7));
}

#[test]
fn integer_beyond_i64_keeps_magnitude() {
    let root = parse("Big = 123456789012345678901234");
    let n = root.var("Big").and_then(Value::as_number).unwrap();
    assert!(n.is_integer());
    assert_eq!(n.as_i64(), None);
    assert!(n.as_f64() > 1.2e23);
}

#[test]
fn booleans_and_nil() {
    let root = parse("B = true C = false N = nil");
    assert_eq!(root.var("B"), Some(&Value::Boolean(true)));
    assert_eq!(root.var("C"), Some(&Value::Boolean(false)));
    assert_eq!(root.var("N"), Some(&Value::Nil));
}

#[test]
fn keyword_prefixes_are_identifiers() {
    let root = parse("T = {trueish, nilly, falsey}");
    let t = table(&root, "T");
    assert_eq!(t.get_index(1).and_then(Value::as_str), Some("trueish"));
    assert_eq!(t.get_index(2).and_then(Value::as_str), Some("nilly"));
    assert_eq!(t.get_index(3).and_then(Value::as_str), Some("falsey"));
}

#[test]
fn bare_identifier_value_is_string() {
    let root = parse("Class = WARRIOR");
    assert_eq!(root.var("Class").and_then(Value::as_str), Some("WARRIOR"));
}

#[test]
fn nil_entries_are_stored() {
    let root = parse("T = {nil, 2}");
    let t = table(&root, "T");
    assert_eq!(t.get_index(1), Some(&Value::Nil));
    assert_eq!(t.get_index(2).and_then(Value::as_i64), Some(2));
}
