//! Structural differentiation.

use crate::consts;
use crate::error::Error;
use crate::expr::{Node, Symbol};
use crate::rational::Rational;

/// Differentiates the tree with respect to `variable`.
///
/// Differentiation is purely structural, one rule per variant. The output is not
/// simplified; callers typically follow with [`simplify`](super::simplify). Since exponents
/// are always numeric there is no chain rule through the exponent; the power rule multiplies
/// by the exponent leaf itself:
///
/// `d(base^e) = base^(e-1) * d(base) * e`
pub fn derivative(node: &Node, variable: Symbol) -> Result<Node, Error> {
    match node {
        Node::Rational(_) => Ok(Node::Rational(consts::ZERO.clone())),
        Node::Symbol(symbol) => {
            if *symbol == variable {
                Ok(Node::Rational(consts::ONE.clone()))
            } else {
                Ok(Node::Rational(consts::ZERO.clone()))
            }
        }
        Node::Power { base, exponent } => {
            let reduced = Node::power((**base).clone(), exponent - &*consts::ONE);
            Node::product(vec![
                reduced,
                derivative(base, variable)?,
                Node::Rational(exponent.clone()),
            ])
        }
        Node::Sum(terms) => {
            let derived = terms
                .iter()
                .map(|term| derivative(term, variable))
                .collect::<Result<Vec<_>, _>>()?;
            Node::sum(derived)
        }
        // generalized product rule: sum over i of (all factors but the i-th) * d(factor_i)
        Node::Product(factors) => {
            let mut terms = Vec::with_capacity(factors.len());
            for (i, factor) in factors.iter().enumerate() {
                let mut product = factors
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, other)| other.clone())
                    .collect::<Vec<_>>();
                product.push(derivative(factor, variable)?);
                terms.push(Node::product(product)?);
            }
            Node::sum(terms)
        }
    }
}
