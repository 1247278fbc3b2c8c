//! Text front ends that build [`Node`](arbor_compute::Node) trees.
//!
//! Two notations are supported:
//!
//! - [`polish`] parses whitespace-separated prefix notation, processed right to left with a
//!   stack: `+ x 1` builds the sum of `x` and `1`;
//! - [`program`] parses an indexed linear program, one instruction per line: a `.` line
//!   defines a leaf, an operator line combines previously built nodes by index, and the
//!   last line's node is the result.
//!
//! Both report failures as [`error::Error`]s carrying source spans, renderable as
//! [`ariadne`] reports.

pub mod error;
pub mod polish;
pub mod program;
pub mod tokenizer;
