//! swl parser: recursive descent parser producing an owned AST.
//!
//! This crate pulls tokens from `swl-lexer` one at a time and builds the
//! [`ast::Switch`] tree. Syntax errors are appended to a caller-owned
//! [`Diagnostics`] sink; parsing never fails outright, it returns whatever
//! structure it could recover.

pub mod ast;
mod parser;
pub mod printer;

pub use ast::{Case, DefaultBranch, Node, Print, Shape, Switch};
pub use parser::Parser;
pub use printer::{debug_tree, format_source};

use swl_common::diagnostic::Diagnostics;

/// Parse a swl source text.
///
/// Diagnostics are appended to `diagnostics`, which is not cleared first.
/// Callers decide success by comparing its length before and after.
pub fn parse(source: &str, diagnostics: &mut Diagnostics) -> Switch {
    Parser::new(source, diagnostics).parse()
}
