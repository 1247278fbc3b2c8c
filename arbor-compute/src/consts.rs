//! Rational constants used throughout the library.

use crate::rational::Rational;
use once_cell::sync::Lazy;

pub static ZERO: Lazy<Rational> = Lazy::new(|| Rational::from_integer(0));

pub static ONE: Lazy<Rational> = Lazy::new(|| Rational::from_integer(1));
