//! The linear-program notation builder.

use crate::error::{kind, Error};
use crate::tokenizer::{tokenize_complete, Token, TokenKind};
use arbor_compute::primitive::int_from_str;
use arbor_compute::{Node, Rational};

/// Parses an indexed linear program into a tree.
///
/// Each non-blank line is one instruction. A `.` line defines a leaf from its operand and
/// appends it to the node list; an operator line (`+`, `-`, `*`, `/`, `^`) names integer
/// indices into the list and appends the composition of the named nodes. An operator with
/// a single index returns that node unchanged. The last line's node is the result.
///
/// The n-ary forms mirror the stack builder's rewrites: `-` subtracts every later operand
/// from the first, `/` divides the first by every later operand, and `^` folds the
/// exponents right to left into one constant, which must be exact.
pub fn parse(input: &str) -> Result<Node, Error> {
    let mut nodes: Vec<Node> = Vec::new();

    let mut pos = 0;
    for raw_line in input.split('\n') {
        let line_start = pos;
        pos += raw_line.len() + 1;

        let line = raw_line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let tokens = tokenize_complete(line);
        let mut tokens = tokens
            .iter()
            .filter(|token| !token.is_whitespace())
            .map(|token| Token {
                span: token.span.start + line_start..token.span.end + line_start,
                kind: token.kind,
                lexeme: token.lexeme,
            })
            .collect::<Vec<_>>();
        if tokens.is_empty() {
            continue;
        }
        let op = tokens.remove(0);

        match op.kind {
            TokenKind::Dot => {
                let Some(operand) = tokens.first() else {
                    return Err(Error::new(
                        vec![op.span.clone()],
                        kind::MissingOperands { operator: op.lexeme.to_string() },
                    ));
                };
                nodes.push(leaf(operand)?);
            }
            TokenKind::Add | TokenKind::Sub | TokenKind::Mul | TokenKind::Div
            | TokenKind::Exp => {
                if tokens.is_empty() {
                    return Err(Error::new(
                        vec![op.span.clone()],
                        kind::MissingOperands { operator: op.lexeme.to_string() },
                    ));
                }
                let mut picked = Vec::with_capacity(tokens.len());
                for token in &tokens {
                    picked.push(lookup(&nodes, token)?);
                }
                let node = combine(&op, picked, &tokens)?;
                nodes.push(node);
            }
            _ => {
                return Err(Error::new(
                    vec![op.span.clone()],
                    kind::UnknownOperator { name: op.lexeme.to_string() },
                ));
            }
        }
    }

    match nodes.pop() {
        Some(result) => Ok(result),
        None => Err(Error::new(Vec::new(), kind::EmptyExpression)),
    }
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

/// Resolves an index token against the already-built node list.
fn lookup(nodes: &[Node], token: &Token) -> Result<Node, Error> {
    let invalid = || Error::new(vec![token.span.clone()], kind::InvalidIndex { len: nodes.len() });
    if token.kind != TokenKind::Int {
        return Err(invalid());
    }
    let index = token.lexeme.parse::<usize>().map_err(|_| invalid())?;
    nodes.get(index).cloned().ok_or_else(invalid)
}

/// Composes the picked nodes under the line's operator. A single picked node is returned
/// unchanged regardless of the operator.
fn combine(op: &Token, mut picked: Vec<Node>, tokens: &[Token]) -> Result<Node, Error> {
    if picked.len() == 1 {
        return Ok(picked.remove(0));
    }

    let internal = || Error::new(vec![op.span.clone()], kind::Internal);

    match op.kind {
        TokenKind::Add => Node::sum(picked).map_err(|_| internal()),
        TokenKind::Sub => {
            let mut terms = Vec::with_capacity(picked.len());
            let mut rest = picked.into_iter();
            terms.extend(rest.next());
            for node in rest {
                let negated = Node::product(vec![node, Node::integer(-1)])
                    .map_err(|_| internal())?;
                terms.push(negated);
            }
            Node::sum(terms).map_err(|_| internal())
        }
        TokenKind::Mul => Node::product(picked).map_err(|_| internal()),
        TokenKind::Div => {
            let mut factors = Vec::with_capacity(picked.len());
            let mut rest = picked.into_iter();
            factors.extend(rest.next());
            for node in rest {
                factors.push(Node::power(node, Rational::from_integer(-1)));
            }
            Node::product(factors).map_err(|_| internal())
        }
        // fold the exponent operands right to left into a single constant
        TokenKind::Exp => {
            let base = picked.remove(0);
            let non_constant = |index: usize| {
                let span = tokens
                    .get(index)
                    .map(|token| token.span.clone())
                    .unwrap_or_else(|| op.span.clone());
                Error::new(vec![span], kind::NonConstantExponent)
            };

            let last_index = picked.len() - 1;
            let mut exponent = picked
                .pop()
                .ok_or_else(internal)?
                .evaluate()
                .map_err(|_| non_constant(last_index + 1))?;
            for (i, node) in picked.into_iter().enumerate().rev() {
                exponent = node
                    .evaluate()
                    .and_then(|value| value.pow_node(&exponent))
                    .and_then(|power| power.evaluate())
                    .map_err(|_| non_constant(i + 1))?;
            }
            Ok(Node::power(base, exponent))
        }
        _ => Err(internal()),
    }
}
