//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.

use ariadne::{Color, Label, Report, ReportKind};
use std::{any::Any, fmt::Debug, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur while building or manipulating an expression.
pub trait ErrorKind: Debug + Send {
    /// Returns the concrete kind for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'a, (&'a str, Range<usize>)>;
}

/// Builds a report in the shape every kind in this workspace uses: one highlighted label
/// per span, paired with the label text at the same position, plus an optional help
/// footer.
pub fn report<'a>(
    src_id: &'a str,
    spans: &[Range<usize>],
    message: String,
    labels: &[String],
    help: Option<String>,
) -> Report<'a, (&'a str, Range<usize>)> {
    let offset = spans.first().map(|span| span.start).unwrap_or(0);
    let mut builder = Report::build(ReportKind::Error, src_id, offset)
        .with_message(message)
        .with_labels(spans.iter().zip(labels).map(|(span, text)| {
            let mut label = Label::new((src_id, span.clone())).with_color(EXPR);
            if !text.is_empty() {
                label = label.with_message(text);
            }
            label
        }));
    if let Some(help) = help {
        builder.set_help(help);
    }
    builder.finish()
}

/// An error associated with regions of the source text that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source text that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<'a, (&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ariadne::Source;

    #[derive(Debug, PartialEq)]
    struct BadToken;

    impl ErrorKind for BadToken {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn build_report<'a>(
            &self,
            src_id: &'a str,
            spans: &[Range<usize>],
        ) -> Report<'a, (&'a str, Range<usize>)> {
            report(
                src_id,
                spans,
                "bad token".to_string(),
                &["here".to_string()],
                Some("remove the token".to_string()),
            )
        }
    }

    #[test]
    fn report_points_at_span() {
        let src = "+ x ?";
        let err = Error::new(vec![4..5], BadToken);

        let mut out = Vec::new();
        err.build_report("input")
            .write(("input", Source::from(src)), &mut out)
            .unwrap();

        let text = String::from_utf8(strip_ansi_escapes::strip(&out)).unwrap();
        assert!(text.contains("bad token"));
        assert!(text.contains("here"));
        assert!(text.contains("remove the token"));
    }

    #[test]
    fn kind_downcasts_to_the_concrete_type() {
        let err = Error::new(vec![0..1], BadToken);
        assert_eq!(err.kind.as_any().downcast_ref::<BadToken>(), Some(&BadToken));
    }
}
