//! Distribution of multiplication over addition.

use crate::consts;
use crate::error::Error;
use crate::expr::Node;
use crate::rational::Rational;

/// Expands the tree by distributing products over sums and rewriting powers as repeated
/// self-products.
///
/// The power rewrite is exact for integer exponents: `base^p` with integer `p` becomes the
/// `|p|`-fold self-product of the expanded base, distributed out if the base is a sum, and
/// inverted symbolically when `p` is negative. Fractional exponents keep their denominator
/// on a wrapping power node; a power with numerator -1 is left unexpanded.
pub fn expand(node: &Node) -> Result<Node, Error> {
    match node {
        Node::Rational(_) | Node::Symbol(_) => Ok(node.clone()),
        Node::Power { base, exponent } => expand_power(base, exponent),
        Node::Sum(terms) => {
            let expanded = terms.iter().map(expand).collect::<Result<Vec<_>, _>>()?;
            Node::sum(expanded)
        }
        Node::Product(factors) => expand_product(factors),
    }
}

fn expand_power(base: &Node, exponent: &Rational) -> Result<Node, Error> {
    let expanded = expand(base)?;

    if exponent.is_zero() {
        return Ok(Node::Rational(consts::ONE.clone()));
    }
    if exponent.is_one() {
        return Ok(expanded);
    }
    // unit negative numerators are not expanded
    if *exponent.numer() == -1 {
        return Ok(Node::power(base.clone(), exponent.clone()));
    }

    let Some(copies) = exponent.numer().clone().abs().to_usize() else {
        // the numerator exceeds any buildable self-product
        return Ok(Node::power(expanded, exponent.clone()));
    };

    let product = if copies == 1 {
        expanded
    } else {
        let self_product = Node::product(vec![expanded.clone(); copies])?;
        if matches!(expanded, Node::Sum(_)) {
            expand(&self_product)?
        } else {
            self_product
        }
    };

    // the integer part of sign / denominator decides whether a wrapping power remains
    let negative = *exponent.numer() < 0;
    if !negative && *exponent.denom() == 1 {
        Ok(product)
    } else {
        let sign = if negative { -1 } else { 1 };
        Ok(Node::power(
            product,
            Rational::new(sign, exponent.denom().clone())?,
        ))
    }
}

fn expand_product(factors: &[Node]) -> Result<Node, Error> {
    let (last, leading_factors) = match factors {
        [] => return Err(Error::EmptyNodeList),
        [only] => return Ok(only.clone()),
        [leading_factors @ .., last] => (last, leading_factors),
    };

    // additive operands are counted before their own expansion for the leading group and
    // after it for the last factor
    let last = expand(last)?;
    let mut sums = usize::from(matches!(last, Node::Sum(_)));
    let mut leading = Vec::with_capacity(leading_factors.len());
    for factor in leading_factors {
        sums += usize::from(matches!(factor, Node::Sum(_)));
        leading.push(expand(factor)?);
    }

    if sums == 0 {
        leading.push(last);
        return Node::product(leading);
    }

    // with more than two additive operands, flatten the leading group into a single sum
    // (or a flat factor list) before distributing against the last factor
    if sums > 2 {
        match expand(&Node::product(leading)?)? {
            Node::Product(inner) => leading = inner,
            other => leading = vec![other],
        }
    }

    let mut terms = Vec::new();
    for node in leading {
        match (node, &last) {
            (Node::Sum(left), Node::Sum(right)) => {
                for a in &left {
                    for b in right {
                        terms.push(Node::product(vec![a.clone(), b.clone()])?);
                    }
                }
            }
            (Node::Sum(left), other) => {
                for a in left {
                    terms.push(Node::product(vec![a, other.clone()])?);
                }
            }
            (node, Node::Sum(right)) => {
                for b in right {
                    terms.push(Node::product(vec![node.clone(), b.clone()])?);
                }
            }
            // neither side is additive: this pairing contributes nothing
            _ => {}
        }
    }
    Node::sum(terms)
}
