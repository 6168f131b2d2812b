//! Bijective packing of `(symbol, x, y)` propositions into solver literals.
//!
//! A proposition gets the variable `symbol_id * n² + x * n + y + 1`, where
//! `n` is the grid size. The layout is positional in base `n`, so it stays
//! injective for every grid size; the only bound is that the largest variable
//! must fit in an `i32`, which [`MAX_GRID_SIZE`] keeps far away.

use std::fmt;

use crate::error::EncodingError;
use crate::grid::Cell;
use crate::symbol::Symbol;
use crate::types::{Lit, Var};

/// Largest supported grid side.
pub const MAX_GRID_SIZE: usize = 128;

/// A decoded atomic proposition: "`symbol` holds at `(x, y)`".
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Proposition {
    pub symbol: Symbol,
    pub x: usize,
    pub y: usize,
}

impl Proposition {
    pub fn cell(&self) -> Cell {
        Cell::new(self.x, self.y)
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({},{})", self.symbol, self.x, self.y)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PropositionEncoder {
    grid_size: usize,
}

impl PropositionEncoder {
    pub fn new(grid_size: usize) -> Result<Self, EncodingError> {
        if grid_size == 0 {
            return Err(EncodingError::EmptyGrid);
        }
        if grid_size > MAX_GRID_SIZE {
            return Err(EncodingError::GridTooLarge {
                size: grid_size,
                max: MAX_GRID_SIZE,
            });
        }
        Ok(Self { grid_size })
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Number of variables in the codomain.
    pub fn num_vars(&self) -> usize {
        Symbol::COUNT * self.grid_size * self.grid_size
    }

    /// Positive literal for `symbol` at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the grid.
    pub fn encode(&self, symbol: Symbol, x: usize, y: usize) -> Lit {
        let n = self.grid_size;
        assert!(x < n && y < n, "coordinate ({}, {}) outside {}x{} grid", x, y, n, n);
        let id = symbol.id() * n * n + x * n + y + 1;
        Var::new(id as u32).pos()
    }

    pub fn encode_cell(&self, symbol: Symbol, cell: Cell) -> Lit {
        self.encode(symbol, cell.row, cell.col)
    }

    /// Inverse of [`encode`][Self::encode]. The sign of `lit` is ignored.
    ///
    /// # Panics
    ///
    /// Panics if `lit` lies outside the codomain of this encoder.
    pub fn decode(&self, lit: Lit) -> Proposition {
        let n = self.grid_size;
        let raw = lit.var().index() - 1;
        let symbol = Symbol::from_id(raw / (n * n))
            .unwrap_or_else(|| panic!("literal {} is outside the encoder range", lit));
        let rest = raw % (n * n);
        Proposition {
            symbol,
            x: rest / n,
            y: rest % n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    use crate::symbol::{Element, Percept};

    #[test]
    fn test_round_trip_all_sizes() {
        for n in [1, 2, 4, 9, 10, 17, 32] {
            let enc = PropositionEncoder::new(n).unwrap();
            let mut seen = HashSet::new();
            for symbol in Symbol::ALL {
                for x in 0..n {
                    for y in 0..n {
                        let lit = enc.encode(symbol, x, y);
                        assert!(seen.insert(lit), "collision at n={} for {}({},{})", n, symbol, x, y);
                        assert_eq!(enc.decode(lit), Proposition { symbol, x, y });
                        assert_eq!(enc.decode(-lit), Proposition { symbol, x, y });
                    }
                }
            }
            assert_eq!(seen.len(), enc.num_vars());
        }
    }

    #[test]
    fn test_largest_literal_fits() {
        let enc = PropositionEncoder::new(MAX_GRID_SIZE).unwrap();
        let last = enc.encode(Symbol::Percept(Percept::Scream), MAX_GRID_SIZE - 1, MAX_GRID_SIZE - 1);
        assert_eq!(last.var().index(), enc.num_vars());
    }

    #[test]
    fn test_rejects_bad_sizes() {
        assert_eq!(PropositionEncoder::new(0), Err(EncodingError::EmptyGrid));
        assert!(matches!(
            PropositionEncoder::new(MAX_GRID_SIZE + 1),
            Err(EncodingError::GridTooLarge { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "outside 4x4 grid")]
    fn test_out_of_bounds_panics() {
        let enc = PropositionEncoder::new(4).unwrap();
        enc.encode(Symbol::Element(Element::Pit), 4, 0);
    }

    #[test]
    fn test_display() {
        let enc = PropositionEncoder::new(4).unwrap();
        let lit = enc.encode(Element::Pit.into(), 2, 3);
        assert_eq!(enc.decode(lit).to_string(), "P(2,3)");
    }
}
