//! The rewrite passes.
//!
//! Each pass is a pure function from a tree to a freshly built tree, with one match arm per
//! node variant. Passes never mutate their input; unchanged subtrees are cloned, not shared,
//! so the output is always independent of the input.

mod derivative;
mod expand;
mod simplify;

pub use derivative::derivative;
pub use expand::expand;
pub use simplify::simplify;
