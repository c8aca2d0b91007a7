//! Ariadne-based rendering of collected diagnostics.
//!
//! Output is colorless so it stays stable in tests. Each report carries the
//! diagnostic code, the message, a label on the offending token when there
//! is one, and a short help line for the semantic rules.

use std::ops::Range;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use swl_common::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};

// ── Labels and Help ────────────────────────────────────────────────────

fn label_message(diagnostic: &Diagnostic) -> &'static str {
    match diagnostic.kind {
        DiagnosticKind::Lex => "invalid token",
        DiagnosticKind::Syntax => "unexpected input here",
        DiagnosticKind::Semantic => match diagnostic.code {
            "S0003" => "value already used by an earlier case",
            "S0004" => "this case has no actions",
            _ => "rejected here",
        },
    }
}

fn help(diagnostic: &Diagnostic) -> Option<&'static str> {
    match diagnostic.code {
        "S0001" => Some("the switch variable is always `I`"),
        "S0002" => Some("case values are integers from 0 to 2147483647"),
        "S0003" => Some("remove this case or give it a different value"),
        "S0004" => Some("add a `print(\"...\");` statement"),
        "S0005" => Some("print a non-empty string"),
        "L0001" => Some("close the string with `\"`"),
        _ => None,
    }
}

// ── Rendering ──────────────────────────────────────────────────────────

/// Render one diagnostic against `source` using ariadne.
pub fn render_diagnostic(diagnostic: &Diagnostic, source: &str, filename: &str) -> String {
    // Spans are byte offsets into the UTF-8 source.
    let config = Config::default()
        .with_color(false)
        .with_index_type(IndexType::Byte);
    let source_len = source.len();

    // Ariadne needs a non-empty span inside the source. A zero-width span
    // widens to cover the whole character at its start.
    let clamp = |r: Range<usize>| -> Range<usize> {
        let s = r.start.min(source_len);
        let e = r.end.min(source_len).max(s);
        if s == e {
            let width = source
                .get(s..)
                .and_then(|rest| rest.chars().next())
                .map_or(0, char::len_utf8);
            s..s + width
        } else {
            s..e
        }
    };

    let range = match diagnostic.span {
        Some(span) => clamp(span.range()),
        None => clamp(0..0),
    };

    let mut builder = Report::build(ReportKind::Error, (filename, range.clone()))
        .with_code(diagnostic.code)
        .with_message(&diagnostic.message)
        .with_config(config);

    if diagnostic.is_positioned() {
        builder = builder.with_label(
            Label::new((filename, range))
                .with_message(label_message(diagnostic))
                .with_color(Color::Red),
        );
    }
    if let Some(help) = help(diagnostic) {
        builder = builder.with_help(help);
    }

    let report = builder.finish();

    let mut buf = Vec::new();
    if let Err(err) = report.write((filename, Source::from(source)), &mut buf) {
        log::warn!("failed to render diagnostic {}: {}", diagnostic.code, err);
        return format!("{}: {}", filename, diagnostic);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Render every diagnostic in the sink, in report order.
pub fn render_all(diagnostics: &Diagnostics, source: &str, filename: &str) -> Vec<String> {
    diagnostics
        .iter()
        .map(|d| render_diagnostic(d, source, filename))
        .collect()
}
