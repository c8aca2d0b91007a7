//! Text renderings of the AST.
//!
//! [`debug_tree`] is the human-facing tree view (upper-case node labels, two
//! spaces per level). [`format_source`] prints canonical swl source that
//! parses back to the same tree shape.

use crate::ast::{Node, Switch};

/// Render the tree view:
///
/// ```text
/// SWITCH (I) {
///   CASE 1:
///     print("one");
///   BREAK;
///   DEFAULT:
///     print("other");
/// }
/// ```
pub fn debug_tree(ast: &Switch) -> String {
    let mut out = String::new();
    write_tree(&mut out, ast.as_node(), 0);
    out
}

fn write_tree(out: &mut String, node: Node<'_>, indent: usize) {
    let pad = " ".repeat(indent);
    match node {
        Node::Switch(switch) => {
            out.push_str(&format!("{pad}SWITCH ({}) {{\n", switch.variable.lexeme));
            for child in node.children() {
                write_tree(out, child, indent + 2);
            }
            out.push_str(&format!("{pad}}}\n"));
        }
        Node::Case(case) => {
            out.push_str(&format!("{pad}CASE {}:\n", case.value.lexeme));
            for child in node.children() {
                write_tree(out, child, indent + 2);
            }
            out.push_str(&format!("{pad}BREAK;\n"));
        }
        Node::Default(_) => {
            out.push_str(&format!("{pad}DEFAULT:\n"));
            for child in node.children() {
                write_tree(out, child, indent + 2);
            }
        }
        Node::Print(print) => {
            out.push_str(&format!("{pad}print(\"{}\");\n", print.text()));
        }
    }
}

/// Render canonical source text, four spaces per level.
///
/// String lexemes are written back verbatim, so backslash sequences
/// survive a round trip unchanged.
pub fn format_source(ast: &Switch) -> String {
    let mut out = String::new();
    write_source(&mut out, ast.as_node(), 0);
    out
}

fn write_source(out: &mut String, node: Node<'_>, indent: usize) {
    let pad = "    ".repeat(indent);
    match node {
        Node::Switch(switch) => {
            out.push_str(&format!("{pad}switch ({}) {{\n", switch.variable.lexeme));
            for child in node.children() {
                write_source(out, child, indent + 1);
            }
            out.push_str(&format!("{pad}}}\n"));
        }
        Node::Case(case) => {
            out.push_str(&format!("{pad}case {}:\n", case.value.lexeme));
            for child in node.children() {
                write_source(out, child, indent + 1);
            }
            out.push_str(&format!("{pad}    break;\n"));
        }
        Node::Default(_) => {
            out.push_str(&format!("{pad}default:\n"));
            for child in node.children() {
                write_source(out, child, indent + 1);
            }
        }
        Node::Print(print) => {
            out.push_str(&format!("{pad}print(\"{}\");\n", print.text()));
        }
    }
}
