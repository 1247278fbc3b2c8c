//! The prefix ("Polish") notation builder.

use crate::error::{kind, Error};
use crate::tokenizer::{tokenize_complete, Token, TokenKind};
use arbor_compute::primitive::int_from_str;
use arbor_compute::{Node, Rational};
use std::ops::Range;

/// Parses a whitespace-separated prefix expression into a tree.
///
/// Tokens are processed right to left with a stack: a leaf token pushes a node, and an
/// operator token pops its left and then its right operand. Subtraction and division are
/// rewritten at build time, `a - b` as `a + (-1 * b)` and `a / b` as `a * b^-1`. The
/// exponent operand of `^` must evaluate to an exact rational constant.
///
/// The input must reduce to exactly one tree; operands that no operator consumes are an
/// error.
pub fn parse(input: &str) -> Result<Node, Error> {
    let tokens = tokenize_complete(input);
    let tokens = tokens
        .iter()
        .filter(|token| !token.is_whitespace())
        .collect::<Vec<_>>();
    if tokens.is_empty() {
        return Err(Error::new(Vec::new(), kind::EmptyExpression));
    }

    let mut stack: Vec<(Node, Range<usize>)> = Vec::new();
    for token in tokens.into_iter().rev() {
        match token.kind {
            TokenKind::Int | TokenKind::Letter => {
                stack.push((leaf(token)?, token.span.clone()));
            }
            TokenKind::Add | TokenKind::Sub | TokenKind::Mul | TokenKind::Div
            | TokenKind::Exp => {
                let node = apply_operator(token, &mut stack)?;
                stack.push((node, token.span.clone()));
            }
            _ => {
                return Err(Error::new(
                    vec![token.span.clone()],
                    kind::UnexpectedCharacter { lexeme: token.lexeme.to_string() },
                ));
            }
        }
    }

    let Some((result, _)) = stack.pop() else {
        return Err(Error::new(Vec::new(), kind::EmptyExpression));
    };
    if !stack.is_empty() {
        let spans = stack.into_iter().map(|(_, span)| span).collect();
        return Err(Error::new(spans, kind::LeftoverOperands));
    }
    Ok(result)
}

/// Builds a leaf node from an integer or letter token.
fn leaf(token: &Token) -> Result<Node, Error> {
    let unexpected = || {
        Error::new(
            vec![token.span.clone()],
            kind::UnexpectedCharacter { lexeme: token.lexeme.to_string() },
        )
    };
    match token.kind {
        TokenKind::Int => {
            let value = int_from_str(token.lexeme).ok_or_else(unexpected)?;
            Ok(Node::Rational(Rational::from_integer(value)))
        }
        TokenKind::Letter => {
            let letter = token.lexeme.chars().next().ok_or_else(unexpected)?;
            Node::symbol(letter).map_err(|_| unexpected())
        }
        _ => Err(unexpected()),
    }
}

/// Pops two operands and pushes the operator's composition of them.
fn apply_operator(
    token: &Token,
    stack: &mut Vec<(Node, Range<usize>)>,
) -> Result<Node, Error> {
    let mut pop = || {
        stack.pop().ok_or_else(|| {
            Error::new(
                vec![token.span.clone()],
                kind::MissingOperands { operator: token.lexeme.to_string() },
            )
        })
    };
    let (left, _) = pop()?;
    let (right, right_span) = pop()?;

    // the two-operand constructors cannot fail on non-empty input
    let internal = |span: &Range<usize>| Error::new(vec![span.clone()], kind::Internal);

    match token.kind {
        TokenKind::Add => {
            Node::sum(vec![left, right]).map_err(|_| internal(&token.span))
        }
        TokenKind::Sub => {
            let negated = Node::product(vec![Node::integer(-1), right])
                .map_err(|_| internal(&token.span))?;
            Node::sum(vec![left, negated]).map_err(|_| internal(&token.span))
        }
        TokenKind::Mul => {
            Node::product(vec![left, right]).map_err(|_| internal(&token.span))
        }
        TokenKind::Div => {
            let inverted = Node::power(right, Rational::from_integer(-1));
            Node::product(vec![left, inverted]).map_err(|_| internal(&token.span))
        }
        TokenKind::Exp => {
            let exponent = right
                .evaluate()
                .map_err(|_| Error::new(vec![right_span], kind::NonConstantExponent))?;
            Ok(Node::power(left, exponent))
        }
        _ => Err(internal(&token.span)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sym(letter: char) -> Node {
        Node::symbol(letter).unwrap()
    }

    #[test]
    fn leaf_expressions() {
        assert_eq!(parse("x").unwrap(), sym('x'));
        assert_eq!(parse("42").unwrap(), Node::integer(42));
        assert_eq!(parse("-5").unwrap(), Node::integer(-5));
    }

    #[test]
    fn addition() {
        let expected = Node::sum(vec![sym('x'), Node::integer(1)]).unwrap();
        assert_eq!(parse("+ x 1").unwrap(), expected);
    }

    #[test]
    fn subtraction_rewrites_to_a_negated_product() {
        // a - b = a + (-1 * b)
        let expected = Node::sum(vec![
            sym('a'),
            Node::product(vec![Node::integer(-1), sym('b')]).unwrap(),
        ])
        .unwrap();
        assert_eq!(parse("- a b").unwrap(), expected);
    }

    #[test]
    fn division_rewrites_to_an_inverse_power() {
        // a / b = a * b^-1
        let expected = Node::product(vec![
            sym('a'),
            Node::power(sym('b'), Rational::from_integer(-1)),
        ])
        .unwrap();
        assert_eq!(parse("/ a b").unwrap(), expected);
    }

    #[test]
    fn exponent_evaluates_to_a_constant() {
        let expected = Node::power(sym('x'), Rational::from_integer(2));
        assert_eq!(parse("^ x 2").unwrap(), expected);

        // the exponent operand may itself be an expression
        let expected = Node::power(sym('x'), Rational::from_integer(5));
        assert_eq!(parse("^ x + 2 3").unwrap(), expected);
    }

    #[test]
    fn nested_operators() {
        // (a + b) * c
        let expected = Node::product(vec![
            Node::sum(vec![sym('a'), sym('b')]).unwrap(),
            sym('c'),
        ])
        .unwrap();
        assert_eq!(parse("* + a b c").unwrap(), expected);
    }

    #[test]
    fn symbolic_exponent_is_rejected() {
        let err = parse("^ x y").unwrap_err();
        assert!(err.kind.as_any().is::<kind::NonConstantExponent>());
    }

    #[test]
    fn missing_operands() {
        let err = parse("+ x").unwrap_err();
        assert_eq!(
            err.kind.as_any().downcast_ref::<kind::MissingOperands>(),
            Some(&kind::MissingOperands { operator: "+".to_string() }),
        );
    }

    #[test]
    fn leftover_operands() {
        let err = parse("1 2").unwrap_err();
        assert!(err.kind.as_any().is::<kind::LeftoverOperands>());
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn empty_input() {
        let err = parse("   ").unwrap_err();
        assert!(err.kind.as_any().is::<kind::EmptyExpression>());
    }

    #[test]
    fn unexpected_character() {
        let err = parse("+ x $").unwrap_err();
        assert_eq!(
            err.kind.as_any().downcast_ref::<kind::UnexpectedCharacter>(),
            Some(&kind::UnexpectedCharacter { lexeme: "$".to_string() }),
        );
    }
}
