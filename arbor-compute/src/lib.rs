//! Algebraic manipulation of immutable expression trees.
//!
//! # Expression representation
//!
//! Expressions are n-ary trees of [`Node`]s built from exact rational constants
//! ([`Rational`]), single-letter symbols, powers with a fixed rational exponent, and n-ary
//! sums and products. Sums and products store their children in a **canonical order**, fixed
//! once at construction time, so two trees built from the same multiset of children compare
//! equal no matter the order they were supplied in:
//!
//! ```
//! use arbor_compute::Node;
//!
//! let x = Node::symbol('x').unwrap();
//! let one = Node::integer(1);
//!
//! let a = Node::sum(vec![x.clone(), one.clone()]).unwrap();
//! let b = Node::sum(vec![one, x]).unwrap();
//! assert_eq!(a, b);
//! ```
//!
//! Equality is **structural** equality on the canonical form, not mathematical equivalence:
//! `x + y` and `y + x` are equal, but `2 * x` and `x + x` are not until
//! [`simplify`](rewrite::simplify) normalizes them.
//!
//! # Rewrite passes
//!
//! Three passes transform a tree into a new, independent tree; the input is never mutated:
//!
//! - [`rewrite::simplify`] folds constants, flattens nested sums/products, and collects like
//!   terms and like factors;
//! - [`rewrite::derivative`] differentiates with respect to a fixed [`Symbol`];
//! - [`rewrite::expand`] distributes multiplication over addition.
//!
//! Passes compose: a typical pipeline is simplify, then differentiate or expand, then
//! simplify again.
//!
//! ```
//! use arbor_compute::{rewrite::{derivative, simplify}, Node, Rational, Symbol};
//!
//! // d/dx x^3 = 3 * x^2
//! let x = Symbol::new('x').unwrap();
//! let cube = Node::power(Node::Symbol(x), Rational::from_integer(3));
//!
//! let slope = simplify(&derivative(&cube, x).unwrap()).unwrap();
//! let expected = Node::product(vec![
//!     Node::integer(3),
//!     Node::power(Node::Symbol(x), Rational::from_integer(2)),
//! ]).unwrap();
//! assert_eq!(slope, simplify(&expected).unwrap());
//! ```

pub mod consts;
pub mod error;
pub mod expr;
pub mod primitive;
pub mod rational;
pub mod rewrite;

pub use error::Error;
pub use expr::{Node, NodeKind, Symbol};
pub use rational::Rational;
