//! Shared types for the swl toolchain: source spans, tokens, diagnostics
//! and configuration. Every other swl crate depends on this one.

pub mod config;
pub mod diagnostic;
pub mod span;
pub mod token;

pub use config::{Config, OnErrors};
pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
pub use span::Span;
pub use token::{LexError, Token, TokenKind};
