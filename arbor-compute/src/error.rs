//! The error type shared by construction, evaluation, and the rewrite passes.

use thiserror::Error;

/// Any error the kernel can produce. All of these are permanent, caller-fixable input
/// errors; no operation leaves a tree partially built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A rational number was constructed with a denominator of zero.
    #[error("the denominator of a rational number cannot be zero")]
    ZeroDenominator,

    /// A symbol (or differentiation variable) outside `a`-`z`.
    #[error("`{0}` is not a valid symbol; symbols are single letters from `a` to `z`")]
    InvalidSymbol(char),

    /// A sum or product was constructed with no children.
    #[error("sum and product nodes require at least one child")]
    EmptyNodeList,

    /// Numeric evaluation reached a symbol leaf.
    #[error("cannot numerically evaluate an expression containing a symbol")]
    SymbolicEvaluation,

    /// Numeric evaluation reached a power with no exact rational value, such as `2^(1/2)`.
    #[error("the power has no exact rational value")]
    InexactPower,

    /// The simplifier reduced a power to `0^0`.
    #[error("indeterminate form 0^0")]
    IndeterminateForm,
}
