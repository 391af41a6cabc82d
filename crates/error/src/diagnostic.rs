//! Rendering of errors as human-readable diagnostics pointing into the
//! JavaScript source that was being compiled.
//!
//! Only errors that were raised while processing a particular AST node carry a
//! span, and so only those can be rendered against the source. Everything else
//! is rendered by the caller using its `Display` implementation.

use ariadne::{Config, Label, Report, ReportKind, Source};

use crate::compile::{self, Span};

/// A diagnostic report whose labels point into a named source file.
pub type Diagnostic = Report<'static, (String, Span)>;

/// Builds a diagnostic report for the provided compilation `error`, labelling
/// the offending node in the file called `name`.
///
/// Setting `color` to `false` produces plain text, which is what you want when
/// the output is not going to a terminal.
#[must_use]
pub fn report(error: &compile::Error, name: &str, color: bool) -> Diagnostic {
    let span = error.span();
    let label = match error {
        compile::Error::ComputedMemberAccess { .. } => {
            "use a dotted property name here instead".to_string()
        }
        _ => format!("`{}` cannot be compiled", error.kind()),
    };

    Report::build(ReportKind::Error, name.to_string(), span.start)
        .with_config(Config::default().with_color(color))
        .with_message(error.to_string())
        .with_label(Label::new((name.to_string(), span)).with_message(label))
        .finish()
}

/// Renders the provided compilation `error` against the `source` text of the
/// file called `name`, returning the rendered diagnostic.
///
/// # Errors
///
/// - [`std::io::Error`] if the report cannot be written.
pub fn render(error: &compile::Error, name: &str, source: &str) -> std::io::Result<String> {
    let mut buffer = Vec::new();
    report(&clamp(error, source), name, false)
        .write((name.to_string(), Source::from(source.to_string())), &mut buffer)?;

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Prints the provided compilation `error` to standard error, rendered
/// against the `source` text of the file called `name`.
///
/// # Errors
///
/// - [`std::io::Error`] if writing to standard error fails.
pub fn eprint(error: &compile::Error, name: &str, source: &str, color: bool) -> std::io::Result<()> {
    report(&clamp(error, source), name, color)
        .eprint((name.to_string(), Source::from(source.to_string())))
}

/// Makes sure that the span of `error` lies within `source`, as the parser and
/// the caller may disagree about the exact text that was compiled.
fn clamp(error: &compile::Error, source: &str) -> compile::Error {
    let len = source.chars().count();
    let Span { start, end } = error.span();
    let start = start.min(len.saturating_sub(1));
    let span = start..end.clamp(start, len);

    match error.clone() {
        compile::Error::ComputedMemberAccess { .. } => {
            compile::Error::ComputedMemberAccess { span }
        }
        compile::Error::UnsupportedStatement { kind, .. } => {
            compile::Error::UnsupportedStatement { kind, span }
        }
        compile::Error::UnsupportedExpression { kind, .. } => {
            compile::Error::UnsupportedExpression { kind, span }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{compile::Error, diagnostic::render};

    #[test]
    fn renders_message_and_file_name() -> std::io::Result<()> {
        let err = Error::UnsupportedStatement {
            kind: "WhileStatement".to_string(),
            span: 0..12,
        };
        let text = render(&err, "loop.js", "while (x) {}\n")?;

        assert!(text.contains("Unsupported statement type `WhileStatement`"));
        assert!(text.contains("loop.js"));

        Ok(())
    }

    #[test]
    fn clamps_spans_past_the_end_of_the_source() -> std::io::Result<()> {
        let err = Error::ComputedMemberAccess { span: 40..90 };
        let text = render(&err, "short.js", "a.b\n")?;

        assert!(text.contains("Computed member access is not supported"));

        Ok(())
    }
}
