//! Constant folding, flattening, and like-term collection.

use crate::consts;
use crate::error::Error;
use crate::expr::Node;
use crate::rational::Rational;
use std::collections::HashMap;

/// Simplifies the tree, recursively simplifying children before normalizing at each node.
///
/// Normalization folds rational constants, flattens nested sums and products, collects sum
/// terms sharing a structural base by summing their coefficients, collects product factors
/// sharing a structural base by summing their exponents, and collapses fully numeric powers
/// to exact rationals where possible.
///
/// Fails with [`Error::IndeterminateForm`] if a power's base simplifies to 0 while its
/// exponent is 0.
pub fn simplify(node: &Node) -> Result<Node, Error> {
    match node {
        Node::Rational(value) => Ok(Node::Rational(value.clone())),
        Node::Symbol(symbol) => Ok(Node::Symbol(*symbol)),
        Node::Power { base, exponent } => simplify_power(base, exponent),
        Node::Sum(terms) => simplify_sum(terms),
        Node::Product(factors) => simplify_product(factors),
    }
}

fn simplify_power(base: &Node, exponent: &Rational) -> Result<Node, Error> {
    let base = simplify(base)?;

    if exponent.is_one() {
        return Ok(base);
    }

    match base {
        Node::Rational(value) => {
            if value.is_zero() && exponent.is_zero() {
                return Err(Error::IndeterminateForm);
            }
            value.pow_node(exponent)
        }
        // nested power: combine the exponents multiplicatively
        Node::Power { base: inner, exponent: inner_exponent } => {
            let combined = &inner_exponent * exponent;
            if combined.is_zero() {
                return Ok(Node::Rational(consts::ONE.clone()));
            }
            if matches!(&*inner, Node::Rational(value) if value.is_zero()) {
                return Ok(Node::Rational(consts::ZERO.clone()));
            }
            if has_symbol(&inner) {
                Ok(Node::power(*inner, combined))
            } else {
                inner.evaluate()?.pow_node(&combined)
            }
        }
        base => Ok(Node::power(base, exponent.clone())),
    }
}

fn has_symbol(node: &Node) -> bool {
    node.post_order_iter()
        .any(|descendant| matches!(descendant, Node::Symbol(_)))
}

fn simplify_sum(terms: &[Node]) -> Result<Node, Error> {
    // simplify every term, splicing in the children of any term that became a sum
    let mut flattened = Vec::with_capacity(terms.len());
    for term in terms {
        match simplify(term)? {
            Node::Sum(inner) => flattened.extend(inner),
            other => flattened.push(other),
        }
    }

    let mut rest = Vec::new();
    let mut constant = consts::ZERO.clone();
    for node in flattened {
        match node {
            Node::Rational(value) => {
                if !value.is_zero() {
                    constant = &constant + &value;
                }
            }
            other => rest.push(other),
        }
    }
    if rest.is_empty() {
        return Ok(Node::Rational(constant));
    }
    if !constant.is_zero() {
        rest.push(Node::Rational(constant));
    }

    // collect like terms: merge terms with a structurally equal base by summing their
    // rational coefficients
    let mut coefficients: HashMap<Node, Rational> = HashMap::new();
    for node in rest {
        let (base, coefficient) = split_coefficient(node)?;
        let entry = coefficients
            .entry(base)
            .or_insert_with(|| consts::ZERO.clone());
        *entry = &*entry + &coefficient;
    }

    let mut collected = Vec::with_capacity(coefficients.len());
    for (base, coefficient) in coefficients {
        if coefficient.is_one() {
            collected.push(base);
            continue;
        }
        match base {
            // prepend the coefficient rather than wrapping the product in another product
            Node::Product(factors) => {
                let mut with_coefficient = Vec::with_capacity(factors.len() + 1);
                with_coefficient.push(Node::Rational(coefficient));
                with_coefficient.extend(factors);
                collected.push(Node::product(with_coefficient)?);
            }
            base => {
                collected.push(Node::product(vec![Node::Rational(coefficient), base])?);
            }
        }
    }
    Node::sum(collected)
}

/// Decomposes a simplified sum term into its rational coefficient and residual base. A
/// product splits into the product of its rational factors and the remaining factors; any
/// other node is its own base with coefficient 1.
fn split_coefficient(node: Node) -> Result<(Node, Rational), Error> {
    match node {
        Node::Product(factors) => {
            let mut coefficient = consts::ONE.clone();
            let mut rest = Vec::with_capacity(factors.len());
            for factor in factors {
                match factor {
                    Node::Rational(value) => coefficient = &coefficient * &value,
                    other => rest.push(other),
                }
            }
            Ok((Node::product(rest)?, coefficient))
        }
        other => Ok((other, consts::ONE.clone())),
    }
}

fn simplify_product(factors: &[Node]) -> Result<Node, Error> {
    let mut flattened = Vec::with_capacity(factors.len());
    for factor in factors {
        match simplify(factor)? {
            Node::Product(inner) => flattened.extend(inner),
            other => flattened.push(other),
        }
    }

    let mut rest = Vec::new();
    let mut constant = consts::ONE.clone();
    for node in flattened {
        match node {
            Node::Rational(value) => {
                if value.is_zero() {
                    return Ok(Node::Rational(consts::ZERO.clone()));
                }
                constant = &constant * &value;
            }
            other => rest.push(other),
        }
    }
    if !constant.is_one() {
        rest.push(Node::Rational(constant));
    }
    if rest.is_empty() {
        return Ok(Node::Rational(consts::ONE.clone()));
    }

    // collect like factors: merge factors with a structurally equal base by summing their
    // exponents
    let mut exponents: HashMap<Node, Rational> = HashMap::new();
    for node in rest {
        let (base, exponent) = match node {
            Node::Power { base, exponent } => {
                let (base, exponent) = match simplify(&base)? {
                    Node::Power { base: inner, exponent: inner_exponent } => {
                        (*inner, &exponent * &inner_exponent)
                    }
                    other => (other, exponent),
                };
                if exponent.is_zero() {
                    continue;
                }
                (base, exponent)
            }
            other => (other, consts::ONE.clone()),
        };
        let entry = exponents
            .entry(base)
            .or_insert_with(|| consts::ZERO.clone());
        *entry = &*entry + &exponent;
    }

    let mut collected = Vec::with_capacity(exponents.len());
    for (base, exponent) in exponents {
        // a merged exponent of zero means the factors cancelled outright
        if exponent.is_zero() {
            continue;
        }
        if exponent.is_one() {
            collected.push(base);
        } else {
            collected.push(Node::power(base, exponent));
        }
    }
    if collected.is_empty() {
        return Ok(Node::Rational(consts::ONE.clone()));
    }
    Node::product(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sym(letter: char) -> Node {
        Node::symbol(letter).unwrap()
    }

    fn rat(numer: i64, denom: i64) -> Rational {
        Rational::new(numer, denom).unwrap()
    }

    #[test]
    fn leaves_are_untouched() {
        assert_eq!(simplify(&Node::integer(3)), Ok(Node::integer(3)));
        assert_eq!(simplify(&sym('x')), Ok(sym('x')));
    }

    #[test]
    fn unit_exponent_unwraps() {
        let tree = Node::power(sym('x'), rat(1, 1));
        assert_eq!(simplify(&tree), Ok(sym('x')));
    }

    #[test]
    fn exact_power_collapses() {
        let tree = Node::power(Node::integer(4), rat(1, 2));
        assert_eq!(simplify(&tree), Ok(Node::integer(2)));

        // no exact real root: stays a symbolic power
        let tree = Node::power(Node::integer(2), rat(1, 2));
        assert_eq!(simplify(&tree), Ok(tree.clone()));
    }

    #[test]
    fn indeterminate_form_fails() {
        let tree = Node::power(Node::integer(0), rat(0, 1));
        assert_eq!(simplify(&tree), Err(Error::IndeterminateForm));

        // the base only becomes 0 after its own simplification
        let inner = Node::product(vec![Node::integer(0), sym('x')]).unwrap();
        let tree = Node::power(inner, rat(0, 1));
        assert_eq!(simplify(&tree), Err(Error::IndeterminateForm));
    }

    #[test]
    fn nested_powers_combine() {
        // (x^2)^3 = x^6
        let tree = Node::power(Node::power(sym('x'), rat(2, 1)), rat(3, 1));
        assert_eq!(simplify(&tree), Ok(Node::power(sym('x'), rat(6, 1))));

        // ((2)^(1/2))^2 is fully numeric and collapses to 2
        let tree = Node::power(Node::power(Node::integer(2), rat(1, 2)), rat(2, 1));
        assert_eq!(simplify(&tree), Ok(Node::integer(2)));

        // exponents that cancel yield 1
        let tree = Node::power(Node::power(sym('x'), rat(2, 1)), rat(0, 1));
        assert_eq!(simplify(&tree), Ok(Node::integer(1)));
    }

    #[test]
    fn sum_folds_constants_and_flattens() {
        // (1 + x) + (2 + y) = 3 + x + y
        let tree = Node::sum(vec![
            Node::sum(vec![Node::integer(1), sym('x')]).unwrap(),
            Node::sum(vec![Node::integer(2), sym('y')]).unwrap(),
        ])
        .unwrap();
        let expected = Node::sum(vec![Node::integer(3), sym('x'), sym('y')]).unwrap();
        assert_eq!(simplify(&tree), Ok(expected));
    }

    #[test]
    fn sum_collects_like_terms() {
        // x + x = 2x
        let tree = Node::sum(vec![sym('x'), sym('x')]).unwrap();
        let expected = Node::product(vec![Node::integer(2), sym('x')]).unwrap();
        assert_eq!(simplify(&tree), Ok(expected));

        // 2xy + 3xy = 5xy
        let term = |c: i64| {
            Node::product(vec![Node::integer(c), sym('x'), sym('y')]).unwrap()
        };
        let tree = Node::sum(vec![term(2), term(3)]).unwrap();
        assert_eq!(simplify(&tree), Ok(term(5)));
    }

    #[test]
    fn all_constant_sum_folds_to_a_leaf() {
        let tree = Node::sum(vec![
            Node::Rational(rat(1, 2)),
            Node::Rational(rat(1, 3)),
            Node::integer(0),
        ])
        .unwrap();
        assert_eq!(simplify(&tree), Ok(Node::Rational(rat(5, 6))));
    }

    #[test]
    fn product_zero_short_circuits() {
        let tree = Node::product(vec![Node::integer(0), sym('x'), sym('y')]).unwrap();
        assert_eq!(simplify(&tree), Ok(Node::integer(0)));
    }

    #[test]
    fn product_folds_constants_and_flattens() {
        // (2 * x) * (3 * y) = 6xy
        let tree = Node::product(vec![
            Node::product(vec![Node::integer(2), sym('x')]).unwrap(),
            Node::product(vec![Node::integer(3), sym('y')]).unwrap(),
        ])
        .unwrap();
        let expected = Node::product(vec![Node::integer(6), sym('x'), sym('y')]).unwrap();
        assert_eq!(simplify(&tree), Ok(expected));
    }

    #[test]
    fn product_collects_like_factors() {
        // x * x^2 = x^3
        let tree = Node::product(vec![sym('x'), Node::power(sym('x'), rat(2, 1))]).unwrap();
        assert_eq!(simplify(&tree), Ok(Node::power(sym('x'), rat(3, 1))));
    }

    #[test]
    fn cancelling_factors_yield_one() {
        // x * x^-1 = 1
        let tree = Node::product(vec![sym('x'), Node::power(sym('x'), rat(-1, 1))]).unwrap();
        assert_eq!(simplify(&tree), Ok(Node::integer(1)));
    }

    #[test]
    fn unit_product_folds_to_one() {
        let tree = Node::product(vec![Node::integer(1), Node::integer(1)]).unwrap();
        assert_eq!(simplify(&tree), Ok(Node::integer(1)));
    }

    #[test]
    fn cancelling_terms_keep_a_zero_coefficient() {
        // x + (-1 * x) collects to a zero-coefficient product, not the leaf 0
        let tree = Node::sum(vec![
            sym('x'),
            Node::product(vec![Node::integer(-1), sym('x')]).unwrap(),
        ])
        .unwrap();
        let expected = Node::product(vec![Node::integer(0), sym('x')]).unwrap();
        assert_eq!(simplify(&tree), Ok(expected));
    }

    #[test]
    fn simplification_is_idempotent() {
        let trees = [
            Node::sum(vec![
                Node::product(vec![Node::integer(2), sym('x')]).unwrap(),
                Node::power(sym('y'), rat(2, 1)),
                Node::Rational(rat(1, 2)),
            ])
            .unwrap(),
            Node::product(vec![
                sym('x'),
                Node::power(sym('x'), rat(2, 1)),
                Node::integer(3),
            ])
            .unwrap(),
            Node::power(Node::power(sym('x'), rat(2, 1)), rat(3, 1)),
        ];
        for tree in trees {
            let once = simplify(&tree).unwrap();
            let twice = simplify(&once).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn nested_numeric_power_rebuilds_from_base() {
        // ((2)^(1/2))^(1/3) has no exact value; the combined power is rebuilt from the
        // numeric base instead
        let tree = Node::power(Node::power(Node::integer(2), rat(1, 2)), rat(1, 3));
        assert_eq!(
            simplify(&tree),
            Ok(Node::power(Node::integer(2), rat(1, 6))),
        );
    }
}
