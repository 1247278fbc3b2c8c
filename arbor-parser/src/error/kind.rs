use arbor_error::{report, ErrorKind, EXPR};
use ariadne::{Fmt, Report};
use std::any::Any;
use std::ops::Range;

/// An intentionally useless error for states the builders cannot actually reach.
#[derive(Debug, Clone, PartialEq)]
pub struct Internal;

impl ErrorKind for Internal {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> Report<'a, (&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            "an internal error occurred while building the expression".to_string(),
            &["here".to_string()],
            Some("you should never see this error; please report this as a bug".to_string()),
        )
    }
}

/// A character that is not an operator, an integer, or a lowercase letter.
#[derive(Debug, Clone, PartialEq)]
pub struct UnexpectedCharacter {
    /// The raw text that could not be tokenized.
    pub lexeme: String,
}

impl ErrorKind for UnexpectedCharacter {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> Report<'a, (&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            format!("unexpected character: `{}`", self.lexeme),
            &["here".to_string()],
            Some(format!(
                "expected an operator, an integer, or a {}",
                "single lowercase letter".fg(EXPR),
            )),
        )
    }
}

/// An operator was reached with fewer operands available than it consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingOperands {
    /// The operator that could not be applied.
    pub operator: String,
}

impl ErrorKind for MissingOperands {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> Report<'a, (&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            format!("not enough operands for `{}`", self.operator),
            &["this operator is missing an operand".to_string()],
            None,
        )
    }
}

/// The expression left more than one operand on the stack.
#[derive(Debug, Clone, PartialEq)]
pub struct LeftoverOperands;

impl ErrorKind for LeftoverOperands {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> Report<'a, (&'a str, Range<usize>)> {
        let labels = spans
            .iter()
            .map(|_| "this operand is never consumed".to_string())
            .collect::<Vec<_>>();
        report(
            src_id,
            spans,
            "the expression does not reduce to a single tree".to_string(),
            &labels,
            Some("every operand except the result must be consumed by an operator".to_string()),
        )
    }
}

/// The input contained no instructions or tokens at all.
#[derive(Debug, Clone, PartialEq)]
pub struct EmptyExpression;

impl ErrorKind for EmptyExpression {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> Report<'a, (&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            "the expression is empty".to_string(),
            &[],
            None,
        )
    }
}

/// An exponent operand that does not evaluate to an exact rational constant.
#[derive(Debug, Clone, PartialEq)]
pub struct NonConstantExponent;

impl ErrorKind for NonConstantExponent {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> Report<'a, (&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            "the exponent must reduce to a constant".to_string(),
            &["this exponent has no exact rational value".to_string()],
            Some(format!(
                "exponents are restricted to {}; symbols are not allowed here",
                "exact rational constants".fg(EXPR),
            )),
        )
    }
}

/// A node index in a program line that does not name an already-built node.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidIndex {
    /// How many nodes the program had built when the index was used.
    pub len: usize,
}

impl ErrorKind for InvalidIndex {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> Report<'a, (&'a str, Range<usize>)> {
        let help = if self.len == 0 {
            "no nodes have been built yet; define a leaf with a `.` line first".to_string()
        } else {
            format!(
                "the program has built {} nodes so far; indices run from 0 to {}",
                self.len,
                self.len - 1,
            )
        };
        report(
            src_id,
            spans,
            "invalid node index".to_string(),
            &["this is not the index of an already-built node".to_string()],
            Some(help),
        )
    }
}

/// An instruction line starting with something other than `.` or an operator.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownOperator {
    /// The unrecognized leading token.
    pub name: String,
}

impl ErrorKind for UnknownOperator {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> Report<'a, (&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            format!("unknown operator: `{}`", self.name),
            &["here".to_string()],
            Some(format!(
                "each line must start with `.` or one of {}",
                "`+`, `-`, `*`, `/`, `^`".fg(EXPR),
            )),
        )
    }
}
