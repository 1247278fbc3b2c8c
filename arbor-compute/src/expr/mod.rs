//! The expression tree.
//!
//! Expressions are immutable n-ary trees built from five node variants. The derived [`Ord`]
//! on [`Node`] is the canonical order of the system: variants compare by declaration order
//! (rationals before symbols before powers before products before sums), and nodes of the
//! same variant compare structurally. The [`Node::sum`] and [`Node::product`] constructors
//! sort their operands once, so equal expressions built in any operand order are
//! structurally equal.

pub mod fmt;
pub mod iter;

use crate::consts;
use crate::error::Error;
use crate::rational::Rational;
use std::fmt::{Display, Formatter};

/// A single-letter variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(char);

impl Symbol {
    /// Creates a symbol from a lowercase ASCII letter.
    pub fn new(letter: char) -> Result<Self, Error> {
        if letter.is_ascii_lowercase() {
            Ok(Self(letter))
        } else {
            Err(Error::InvalidSymbol(letter))
        }
    }

    pub fn letter(&self) -> char {
        self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node in an expression tree.
///
/// The variant declaration order is load-bearing: the derived [`Ord`] uses it as the
/// canonical order between different kinds of node. Construct sums and products through
/// [`Node::sum`] and [`Node::product`] so the operand lists stay sorted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Node {
    /// An exact rational constant.
    Rational(Rational),

    /// A variable.
    Symbol(Symbol),

    /// A base raised to a fixed rational exponent.
    Power {
        base: Box<Node>,
        exponent: Rational,
    },

    /// An n-ary product of two or more factors, kept in canonical order.
    Product(Vec<Node>),

    /// An n-ary sum of two or more terms, kept in canonical order.
    Sum(Vec<Node>),
}

/// The kind of a [`Node`], used by front ends that dispatch on shape without caring about
/// the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Rational,
    Symbol,
    Power,
    Product,
    Sum,
}

impl Node {
    /// Creates a whole-number leaf.
    pub fn integer(value: impl Into<rug::Integer>) -> Self {
        Self::Rational(Rational::from_integer(value))
    }

    /// Creates a variable leaf.
    pub fn symbol(letter: char) -> Result<Self, Error> {
        Ok(Self::Symbol(Symbol::new(letter)?))
    }

    /// Creates a power node.
    pub fn power(base: Node, exponent: Rational) -> Self {
        Self::Power {
            base: Box::new(base),
            exponent,
        }
    }

    /// Creates a sum, sorting the terms into canonical order. At least one term is
    /// required; a single term collapses to the term itself.
    pub fn sum(terms: Vec<Node>) -> Result<Self, Error> {
        Self::nary(terms, Self::Sum)
    }

    /// Creates a product, sorting the factors into canonical order. At least one factor is
    /// required; a single factor collapses to the factor itself.
    pub fn product(factors: Vec<Node>) -> Result<Self, Error> {
        Self::nary(factors, Self::Product)
    }

    fn nary(mut operands: Vec<Node>, build: fn(Vec<Node>) -> Node) -> Result<Self, Error> {
        match operands.len() {
            0 => Err(Error::EmptyNodeList),
            1 => Ok(operands.remove(0)),
            _ => {
                operands.sort();
                Ok(build(operands))
            }
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Rational(_) => NodeKind::Rational,
            Self::Symbol(_) => NodeKind::Symbol,
            Self::Power { .. } => NodeKind::Power,
            Self::Product(_) => NodeKind::Product,
            Self::Sum(_) => NodeKind::Sum,
        }
    }

    /// The label shown for this node in tree diagrams: the value for leaves, the operator
    /// character for interior nodes.
    pub fn label(&self) -> String {
        match self {
            Self::Rational(value) => value.to_string(),
            Self::Symbol(symbol) => symbol.to_string(),
            Self::Power { .. } => "^".to_string(),
            Self::Product(_) => "*".to_string(),
            Self::Sum(_) => "+".to_string(),
        }
    }

    /// The children of this node, materializing a power's exponent as a rational leaf.
    /// Leaves have no children.
    pub fn children(&self) -> Vec<Node> {
        match self {
            Self::Rational(_) | Self::Symbol(_) => Vec::new(),
            Self::Power { base, exponent } => {
                vec![(**base).clone(), Self::Rational(exponent.clone())]
            }
            Self::Product(factors) => factors.clone(),
            Self::Sum(terms) => terms.clone(),
        }
    }

    /// Returns `true` if `symbol` occurs anywhere in this tree.
    pub fn contains_symbol(&self, symbol: Symbol) -> bool {
        match self {
            Self::Rational(_) => false,
            Self::Symbol(inner) => *inner == symbol,
            Self::Power { base, .. } => base.contains_symbol(symbol),
            Self::Product(operands) | Self::Sum(operands) => {
                operands.iter().any(|operand| operand.contains_symbol(symbol))
            }
        }
    }

    /// Evaluates a constant expression to a single rational value. Fails with
    /// [`Error::SymbolicEvaluation`] if the tree contains a symbol and with
    /// [`Error::InexactPower`] if a power has no exact rational value.
    pub fn evaluate(&self) -> Result<Rational, Error> {
        match self {
            Self::Rational(value) => Ok(value.clone()),
            Self::Symbol(_) => Err(Error::SymbolicEvaluation),
            Self::Power { base, exponent } => {
                match base.evaluate()?.pow_node(exponent)? {
                    Self::Rational(value) => Ok(value),
                    _ => Err(Error::InexactPower),
                }
            }
            Self::Product(factors) => {
                let mut acc = consts::ONE.clone();
                for factor in factors {
                    acc = &acc * &factor.evaluate()?;
                }
                Ok(acc)
            }
            Self::Sum(terms) => {
                let mut acc = consts::ZERO.clone();
                for term in terms {
                    acc = &acc + &term.evaluate()?;
                }
                Ok(acc)
            }
        }
    }
}

/// Renders the tree in functional notation, such as `+(*(2, x), ^(y, 2))`.
impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rational(value) => write!(f, "{}", value),
            Self::Symbol(symbol) => write!(f, "{}", symbol),
            Self::Power { base, exponent } => write!(f, "^({}, {})", base, exponent),
            Self::Product(factors) => write_nary(f, "*", factors),
            Self::Sum(terms) => write_nary(f, "+", terms),
        }
    }
}

fn write_nary(f: &mut Formatter<'_>, name: &str, operands: &[Node]) -> std::fmt::Result {
    write!(f, "{}(", name)?;
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", operand)?;
    }
    write!(f, ")")
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
    fn symbol_must_be_a_letter() {
        assert!(Node::symbol('x').is_ok());
        assert_eq!(Node::symbol('Q'), Err(Error::InvalidSymbol('Q')));
        assert_eq!(Node::symbol('3'), Err(Error::InvalidSymbol('3')));
        assert_eq!(Node::symbol('+'), Err(Error::InvalidSymbol('+')));
    }

    #[test]
    fn canonical_variant_order() {
        let rational = Node::integer(5);
        let symbol = sym('a');
        let power = Node::power(sym('a'), rat(2, 1));
        let product = Node::product(vec![sym('a'), sym('b')]).unwrap();
        let sum = Node::sum(vec![sym('a'), sym('b')]).unwrap();

        let mut nodes = vec![sum, product, power, symbol, rational];
        nodes.sort();
        let kinds = nodes.iter().map(Node::kind).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Rational,
                NodeKind::Symbol,
                NodeKind::Power,
                NodeKind::Product,
                NodeKind::Sum,
            ],
        );
    }

    #[test]
    fn ordering_is_a_total_order() {
        use std::cmp::Ordering;

        let nodes = [
            Node::Rational(rat(1, 2)),
            Node::integer(5),
            sym('a'),
            sym('b'),
            Node::power(sym('a'), rat(2, 1)),
            Node::power(sym('b'), rat(1, 2)),
            Node::product(vec![sym('a'), sym('b')]).unwrap(),
            Node::sum(vec![sym('a'), sym('b')]).unwrap(),
            Node::sum(vec![sym('a'), sym('b'), sym('c')]).unwrap(),
        ];

        for a in &nodes {
            // reflexivity
            assert_eq!(a.cmp(a), Ordering::Equal);
            for b in &nodes {
                // antisymmetry
                match a.cmp(b) {
                    Ordering::Less => assert_eq!(b.cmp(a), Ordering::Greater),
                    Ordering::Greater => assert_eq!(b.cmp(a), Ordering::Less),
                    Ordering::Equal => assert_eq!(a, b),
                }
                // transitivity
                for c in &nodes {
                    if a <= b && b <= c {
                        assert!(a <= c);
                    }
                }
            }
        }
    }

    #[test]
    fn sorting_is_idempotent() {
        let tree = Node::sum(vec![
            sym('y'),
            Node::power(sym('x'), rat(2, 1)),
            Node::product(vec![Node::integer(2), sym('x')]).unwrap(),
            Node::integer(3),
        ])
        .unwrap();

        let Node::Sum(terms) = &tree else {
            panic!("expected a sum");
        };
        let mut resorted = terms.clone();
        resorted.sort();
        assert_eq!(&resorted, terms);

        // rebuilding from the already-canonical children is a no-op
        assert_eq!(Node::sum(resorted), Ok(tree.clone()));
    }

    #[test]
    fn operand_order_does_not_matter() {
        let ab = Node::sum(vec![sym('a'), sym('b')]).unwrap();
        let ba = Node::sum(vec![sym('b'), sym('a')]).unwrap();
        assert_eq!(ab, ba);

        let xy2 = Node::product(vec![sym('y'), Node::integer(2), sym('x')]).unwrap();
        let x2y = Node::product(vec![Node::integer(2), sym('x'), sym('y')]).unwrap();
        assert_eq!(xy2, x2y);
    }

    #[test]
    fn singleton_collapses_and_empty_fails() {
        assert_eq!(Node::sum(vec![sym('x')]), Ok(sym('x')));
        assert_eq!(Node::product(vec![Node::integer(3)]), Ok(Node::integer(3)));
        assert_eq!(Node::sum(Vec::new()), Err(Error::EmptyNodeList));
        assert_eq!(Node::product(Vec::new()), Err(Error::EmptyNodeList));
    }

    #[test]
    fn contains_symbol_searches_deep() {
        let tree = Node::sum(vec![
            Node::integer(1),
            Node::power(
                Node::product(vec![sym('x'), Node::integer(2)]).unwrap(),
                rat(3, 1),
            ),
        ])
        .unwrap();
        assert!(tree.contains_symbol(Symbol::new('x').unwrap()));
        assert!(!tree.contains_symbol(Symbol::new('y').unwrap()));
    }

    #[test]
    fn evaluates_constant_trees() {
        // 2 * (3 + 1/2) = 7
        let tree = Node::product(vec![
            Node::integer(2),
            Node::sum(vec![Node::integer(3), Node::Rational(rat(1, 2))]).unwrap(),
        ])
        .unwrap();
        assert_eq!(tree.evaluate(), Ok(rat(7, 1)));
    }

    #[test]
    fn evaluation_failure_modes() {
        let tree = Node::sum(vec![Node::integer(1), sym('x')]).unwrap();
        assert_eq!(tree.evaluate(), Err(Error::SymbolicEvaluation));

        let tree = Node::power(Node::integer(2), rat(1, 2));
        assert_eq!(tree.evaluate(), Err(Error::InexactPower));

        let tree = Node::power(Node::integer(0), rat(-1, 1));
        assert_eq!(tree.evaluate(), Err(Error::ZeroDenominator));
    }

    #[test]
    fn display_is_functional_notation() {
        let tree = Node::sum(vec![
            Node::product(vec![Node::integer(2), sym('x')]).unwrap(),
            Node::power(sym('y'), rat(2, 1)),
        ])
        .unwrap();
        assert_eq!(tree.to_string(), "+(*(2, x), ^(y, 2))");
    }
}
