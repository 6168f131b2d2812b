//! Packed proposition ids and signed literals.
//!
//! Every `Symbol(x, y)` proposition is packed into one [`Var`] id, starting
//! at 1 so that ids line up with DIMACS variables. A [`Lit`] is that id with
//! a sign; `-lit` asserts the proposition is false.

use std::fmt;
use std::ops::Neg;

/// Packed id of one proposition. Never 0.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u32);

impl Var {
    /// # Panics
    ///
    /// Panics on 0, which DIMACS reserves as the clause terminator.
    pub fn new(id: u32) -> Self {
        assert_ne!(id, 0, "proposition ids start at 1");
        Var(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }

    /// The id as a `usize`, for arithmetic on the packed encoding.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Zero-based variable index, as the SAT backend numbers variables.
    pub fn backend_index(self) -> u32 {
        self.0 - 1
    }

    /// The proposition holds.
    pub fn pos(self) -> Lit {
        Lit(self.0 as i32)
    }

    /// The proposition does not hold.
    pub fn neg(self) -> Lit {
        Lit(-(self.0 as i32))
    }
}

/// A literal: a variable or its negation.
///
/// Positive values are positive literals, negative values are negated
/// variables. Zero is not a valid literal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Lit(i32);

impl Lit {
    /// Creates a literal from its DIMACS representation.
    ///
    /// # Panics
    ///
    /// Panics if `lit` is zero.
    pub fn from_dimacs(lit: i32) -> Self {
        assert_ne!(lit, 0, "Literal cannot be zero");
        Lit(lit)
    }

    /// Returns the signed DIMACS representation.
    pub fn to_dimacs(self) -> i32 {
        self.0
    }

    /// Returns the underlying variable.
    pub fn var(self) -> Var {
        Var(self.0.unsigned_abs())
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Dense index for per-literal tables: `2 * var + (negated as usize)`.
    pub fn code(self) -> usize {
        ((self.0.unsigned_abs() as usize) << 1) + self.is_negative() as usize
    }
}

impl Neg for Lit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Lit(-self.0)
    }
}

impl From<Lit> for i32 {
    fn from(lit: Lit) -> Self {
        lit.0
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_positive() {
            write!(f, "x{}", self.0)
        } else {
            write!(f, "¬x{}", -self.0)
        }
    }
}
