//! Clauses and the append-only clause store.

use std::collections::HashSet;
use std::fmt;
use std::io::{self, Write};

use crate::types::Lit;

/// A disjunction of literals, kept sorted by variable with duplicates removed.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Clause {
    lits: Vec<Lit>,
}

impl Clause {
    pub fn new(lits: impl IntoIterator<Item = Lit>) -> Self {
        let mut lits: Vec<Lit> = lits.into_iter().collect();
        lits.sort_by_key(|lit| (lit.var(), lit.is_negative()));
        lits.dedup();
        Self { lits }
    }

    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }

    /// A clause containing both `x` and `¬x` is always true.
    pub fn is_tautology(&self) -> bool {
        // Sorted by variable, so complementary literals are neighbors.
        self.lits.windows(2).any(|w| w[0] == -w[1])
    }

    pub fn to_dimacs(&self) -> String {
        let mut s = String::new();
        for lit in &self.lits {
            s.push_str(&lit.to_dimacs().to_string());
            s.push(' ');
        }
        s.push('0');
        s
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lits.is_empty() {
            return write!(f, "⊥");
        }
        for (i, lit) in self.lits.iter().enumerate() {
            if i > 0 {
                write!(f, " ∨ ")?;
            }
            write!(f, "{}", lit)?;
        }
        Ok(())
    }
}

/// Durable, deduplicated record of every clause ever added.
#[derive(Debug, Default, Clone)]
pub(crate) struct ClauseStore {
    clauses: Vec<Clause>,
    seen: HashSet<Clause>,
    max_var: u32,
}

impl ClauseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the clause; returns `false` if it was already present.
    pub fn insert(&mut self, clause: Clause) -> bool {
        if self.seen.contains(&clause) {
            return false;
        }
        if let Some(max) = clause.lits().iter().map(|lit| lit.var().id()).max() {
            self.max_var = self.max_var.max(max);
        }
        self.seen.insert(clause.clone());
        self.clauses.push(clause);
        true
    }

    pub fn contains(&self, clause: &Clause) -> bool {
        self.seen.contains(clause)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn max_var(&self) -> u32 {
        self.max_var
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Writes the store in DIMACS CNF format.
    pub fn write_dimacs<W: Write>(&self, mut w: W) -> io::Result<()> {
        writeln!(w, "p cnf {} {}", self.max_var, self.clauses.len())?;
        for clause in &self.clauses {
            writeln!(w, "{}", clause.to_dimacs())?;
        }
        Ok(())
    }
}
