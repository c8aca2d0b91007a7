//! Parser integration tests using insta snapshots.
//!
//! Each test parses a program, renders the tree view, and appends any
//! diagnostics with their line:column positions.

use insta::assert_snapshot;
use swl_common::diagnostic::Diagnostics;
use swl_parser::{debug_tree, format_source, parse, Shape, Switch};

fn parse_source(source: &str) -> (Switch, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let ast = parse(source, &mut diagnostics);
    (ast, diagnostics)
}

fn parse_and_debug(source: &str) -> String {
    let (ast, diagnostics) = parse_source(source);
    let tree = debug_tree(&ast);
    if diagnostics.has_errors() {
        format!(
            "{}errors:\n{}",
            tree,
            diagnostics
                .iter()
                .map(|d| format!("  - {} @{}:{}", d.message, d.line, d.column))
                .collect::<Vec<_>>()
                .join("\n")
        )
    } else {
        tree
    }
}

// ── Valid programs ─────────────────────────────────────────────────────

#[test]
fn basic_fixture_tree() {
    let source = include_str!("../../../tests/fixtures/basic.swl");
    assert_snapshot!(parse_and_debug(source), @r#"
    SWITCH (I) {
      CASE 1:
        print("one");
      BREAK;
      CASE 2:
        print("two");
        print("2");
      BREAK;
      DEFAULT:
        print("other");
    }
    "#);
}

#[test]
fn basic_fixture_formatted() {
    let source = include_str!("../../../tests/fixtures/basic.swl");
    let (ast, diagnostics) = parse_source(source);
    assert!(!diagnostics.has_errors());
    assert_snapshot!(format_source(&ast), @r#"
    switch (I) {
        case 1:
            print("one");
            break;
        case 2:
            print("two");
            print("2");
            break;
        default:
            print("other");
    }
    "#);
}

#[test]
fn duplicate_values_parse_cleanly() {
    // Duplicates are a semantic problem, not a syntax one.
    let source = include_str!("../../../tests/fixtures/duplicate_case.swl");
    let (ast, diagnostics) = parse_source(source);
    assert!(!diagnostics.has_errors());
    assert_eq!(ast.case_values(), vec!["3", "3"]);
}

// ── Round trip ─────────────────────────────────────────────────────────

#[test]
fn round_trip_minimal_program() {
    let source = r#"switch(I){case 0: print("x"); break; default: print("y");}"#;
    let (first, diagnostics) = parse_source(source);
    assert!(!diagnostics.has_errors());

    let printed = format_source(&first);
    let (second, diagnostics) = parse_source(&printed);
    assert!(!diagnostics.has_errors(), "reparse failed:\n{printed}");

    assert_eq!(Shape::of(&first), Shape::of(&second));
    assert_eq!(format_source(&second), printed);
}

#[test]
fn round_trip_keeps_escapes() {
    let source = r#"switch (I) { case 5: print("tab\t \"q\""); break; default: print("\\"); }"#;
    let (first, _) = parse_source(source);
    let (second, diagnostics) = parse_source(&format_source(&first));
    assert!(!diagnostics.has_errors());
    assert_eq!(second.cases[0].actions[0].text(), r#"tab\t \"q\""#);
    assert_eq!(Shape::of(&first), Shape::of(&second));
}

// ── Errors and recovery ────────────────────────────────────────────────

#[test]
fn wrong_variable() {
    assert_snapshot!(
        parse_and_debug(r#"switch(J){case 1: print("x"); break; default: print("y");}"#),
        @r#"
    SWITCH (J) {
      CASE 1:
        print("x");
      BREAK;
      DEFAULT:
        print("y");
    }
    errors:
      - expected variable 'I', found 'J' @1:8
    "#
    );
}

#[test]
fn syntax_errors_fixture_recovers() {
    let source = include_str!("../../../tests/fixtures/syntax_errors.swl");
    assert_snapshot!(parse_and_debug(source), @r#"
    SWITCH (I) {
      CASE 1:
        print("missing colon");
      BREAK;
      CASE 2:
        print("missing semicolon");
      BREAK;
      DEFAULT:
        print("ok");
    }
    errors:
      - expected ':' after case value @3:9
      - expected ';' after print statement @7:9
      - expected 'break' at end of case @8:5
    "#);
}

#[test]
fn unknown_character_inside_case() {
    assert_snapshot!(
        parse_and_debug(r#"switch (I) { case 1: print("a"); @ break; default: print("b"); }"#),
        @r#"
    SWITCH (I) {
      CASE 1:
        print("a");
      BREAK;
      DEFAULT:
        print("b");
    }
    errors:
      - unknown character: @ @1:34
    "#
    );
}

#[test]
fn missing_default_tree() {
    assert_snapshot!(
        parse_and_debug(r#"switch (I) { case 4: print("four"); break; }"#),
        @r#"
    SWITCH (I) {
      CASE 4:
        print("four");
      BREAK;
    }
    errors:
      - expected 'default' branch @1:44
    "#
    );
}

#[test]
fn ast_serializes_to_json() {
    let (ast, _) = parse_source(r#"switch (I) { case 1: print("a"); break; default: print("b"); }"#);
    let json = serde_json::to_value(&ast).unwrap();
    assert_eq!(json["variable"]["kind"], "Ident");
    assert_eq!(json["cases"][0]["value"]["lexeme"], "1");
    assert_eq!(json["cases"][0]["actions"][0]["text"]["lexeme"], "a");
    assert_eq!(json["default"]["actions"][0]["text"]["kind"], "StringLiteral");
}
