//! Exact rational arithmetic over arbitrary-precision integers.

use crate::error::Error;
use crate::expr::Node;
use crate::primitive::int;
use rug::ops::Pow;
use rug::Integer;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// An exact fraction with a signed numerator and a positive denominator, always stored in
/// lowest terms. Every arithmetic operation returns a new normalized value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rational {
    numer: Integer,
    denom: Integer,
}

impl Rational {
    /// Creates a rational number from a numerator and a denominator, normalizing the sign
    /// onto the numerator and reducing by the greatest common divisor.
    pub fn new(numer: impl Into<Integer>, denom: impl Into<Integer>) -> Result<Self, Error> {
        let denom = denom.into();
        if denom == 0 {
            return Err(Error::ZeroDenominator);
        }
        let mut numer = numer.into();
        let mut denom = denom;
        if denom < 0 {
            numer = -numer;
            denom = -denom;
        }
        Ok(Self::reduced(numer, denom))
    }

    /// Creates a whole number.
    pub fn from_integer(numer: impl Into<Integer>) -> Self {
        Self { numer: numer.into(), denom: int(1) }
    }

    /// Reduces an already sign-normalized fraction to lowest terms. The denominator must be
    /// positive.
    fn reduced(mut numer: Integer, mut denom: Integer) -> Self {
        let gcd = Integer::from(numer.gcd_ref(&denom));
        numer /= &gcd;
        denom /= &gcd;
        Self { numer, denom }
    }

    pub fn numer(&self) -> &Integer {
        &self.numer
    }

    pub fn denom(&self) -> &Integer {
        &self.denom
    }

    pub fn is_zero(&self) -> bool {
        self.numer == 0
    }

    pub fn is_one(&self) -> bool {
        self.numer == 1 && self.denom == 1
    }

    /// Computes `self ^ exponent`, returning an exact [`Node::Rational`] leaf when the power
    /// has an exact rational value and a symbolic [`Node::Power`] otherwise. An inexact root
    /// is not an error; the only failure mode is a division by zero, such as `0 ^ -1`.
    ///
    /// A negative base under an even root has no real value, so that case is rewritten
    /// algebraically (reciprocal and sign flip for a negative exponent numerator) and kept
    /// symbolic.
    pub fn pow_node(&self, exponent: &Rational) -> Result<Node, Error> {
        let negative_base = self.numer < 0;
        let mut numer = Integer::from(self.numer.abs_ref());
        let mut denom = self.denom.clone();
        let mut exp_numer = exponent.numer.clone();
        let exp_denom = exponent.denom.clone();

        if negative_base && exp_denom.is_even() {
            return if exp_numer < 0 {
                Ok(Node::power(
                    Node::Rational(Rational::new(-denom, numer)?),
                    Rational::new(-exp_numer, exp_denom)?,
                ))
            } else {
                Ok(Node::power(
                    Node::Rational(Rational::new(-numer, denom)?),
                    exponent.clone(),
                ))
            };
        }

        let negative_exponent = exp_numer < 0;
        if negative_exponent {
            exp_numer = -exp_numer;
            std::mem::swap(&mut numer, &mut denom);
        }

        let roots = match (exact_root(&numer, &exp_denom), exact_root(&denom, &exp_denom)) {
            (Some(root_numer), Some(root_denom)) => Some((root_numer, root_denom)),
            _ => None,
        };

        if negative_base {
            numer = -numer;
        }

        if let (Some((root_numer, root_denom)), Some(exp)) = (roots, exp_numer.to_u32()) {
            let mut pow_numer = root_numer.pow(exp);
            let pow_denom = root_denom.pow(exp);
            if negative_base && exp_numer.is_odd() {
                pow_numer = -pow_numer;
            }
            return Ok(Node::Rational(Rational::new(pow_numer, pow_denom)?));
        }

        // irreducible radical: keep the (possibly reciprocal) base symbolic
        if negative_exponent {
            Ok(Node::power(
                Node::Rational(Rational::new(numer, denom)?),
                Rational::new(exp_numer, exp_denom)?,
            ))
        } else {
            Ok(Node::power(
                Node::Rational(Rational::new(numer, denom)?),
                exponent.clone(),
            ))
        }
    }
}

/// Computes the `degree`-th root of a non-negative integer, returning it only when it is
/// exact. The floor root is round-trip checked by raising it back to `degree`.
fn exact_root(value: &Integer, degree: &Integer) -> Option<Integer> {
    let degree = degree.to_u32()?;
    let root = value.clone().root(degree);
    if Integer::from((&root).pow(degree)) == *value {
        Some(root)
    } else {
        None
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: Self) -> Rational {
        let numer = Integer::from(&self.numer * &rhs.denom) + Integer::from(&rhs.numer * &self.denom);
        let denom = Integer::from(&self.denom * &rhs.denom);
        Rational::reduced(numer, denom)
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, rhs: Self) -> Rational {
        let numer = Integer::from(&self.numer * &rhs.denom) - Integer::from(&rhs.numer * &self.denom);
        let denom = Integer::from(&self.denom * &rhs.denom);
        Rational::reduced(numer, denom)
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: Self) -> Rational {
        let numer = Integer::from(&self.numer * &rhs.numer);
        let denom = Integer::from(&self.denom * &rhs.denom);
        Rational::reduced(numer, denom)
    }
}

/// Orders by numeric value, comparing the full-width cross products so the comparison can
/// never overflow.
impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = Integer::from(&self.numer * &other.denom);
        let rhs = Integer::from(&other.numer * &self.denom);
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom == 1 {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}
