//! The agent's knowledge base: a monotone CNF over encoded propositions,
//! backed by a live [`Solver`].
//!
//! # Entailment
//!
//! `query(L)` holds iff the clause set together with `¬L` is unsatisfiable.
//! Clauses are never retracted, so once a literal is entailed it stays
//! entailed; positive answers are therefore cached forever, while negative
//! answers are cached only until the next new clause.
//!
//! # Hazard inference
//!
//! Every standing percept `P` has one associated element `E` (STENCH and
//! WUMPUS, BREEZE and PIT, GLOW and GOLD, WHIFF and POISONOUS_GAS). Once the
//! value of `P(x,y)` is known, the biconditional
//!
//! ```text
//! P(x,y) <=> E(n1) ∨ ... ∨ E(nk)
//! ```
//!
//! over the in-bounds neighbors of `(x,y)` is added as CNF: one clause
//! `¬P(x,y) ∨ E(n1) ∨ ... ∨ E(nk)` and one clause `P(x,y) ∨ ¬E(ni)` per
//! neighbor. A known-false percept is what proves the neighbors of a quiet
//! cell free of `E`.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Debug;
use std::io::{self, Write};

use log::{debug, info, trace};

use crate::cache::Cache;
use crate::cnf::{Clause, ClauseStore};
use crate::encoder::{Proposition, PropositionEncoder};
use crate::error::EncodingError;
use crate::grid::Cell;
use crate::solver::{Solver, SolverStats};
use crate::symbol::{Element, Percept, Symbol};
use crate::types::Lit;

/// An element newly proven present at a cell by hazard inference.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Discovery {
    pub element: Element,
    pub cell: Cell,
}

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct KbStats {
    pub clauses: usize,
    pub queries: usize,
    pub short_circuits: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
    pub solver: SolverStats,
}

pub struct KnowledgeBase {
    encoder: PropositionEncoder,
    store: ClauseStore,
    solver: Solver,
    entailed: HashSet<Lit>,
    cache: Cache<Lit, bool>,
    /// Percept rules already emitted, with the known value of the percept.
    expanded: BTreeMap<(Percept, Cell), bool>,
    reported: HashSet<Discovery>,
    checked_len: usize,
    queries: usize,
    short_circuits: usize,
}

impl Debug for KnowledgeBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeBase")
            .field("grid_size", &self.grid_size())
            .field("clauses", &self.store.len())
            .field("max_var", &self.store.max_var())
            .field("expanded", &self.expanded.len())
            .field("entailed", &self.entailed.len())
            .finish()
    }
}

impl KnowledgeBase {
    pub fn new(grid_size: usize) -> Result<Self, EncodingError> {
        debug_assert!(crate::symbol::associations_are_complete());
        Ok(Self {
            encoder: PropositionEncoder::new(grid_size)?,
            store: ClauseStore::new(),
            solver: Solver::new(),
            entailed: HashSet::new(),
            cache: Cache::new(16),
            expanded: BTreeMap::new(),
            reported: HashSet::new(),
            checked_len: 0,
            queries: 0,
            short_circuits: 0,
        })
    }

    pub fn grid_size(&self) -> usize {
        self.encoder.grid_size()
    }

    pub fn encoder(&self) -> &PropositionEncoder {
        &self.encoder
    }

    pub fn encode(&self, symbol: impl Into<Symbol>, cell: Cell) -> Lit {
        self.encoder.encode_cell(symbol.into(), cell)
    }

    pub fn decode(&self, lit: Lit) -> Proposition {
        self.encoder.decode(lit)
    }

    /// Human-readable form of a literal, e.g. `¬P(1,2)`.
    pub fn describe(&self, lit: Lit) -> String {
        let prop = self.decode(lit);
        if lit.is_negative() {
            format!("¬{}", prop)
        } else {
            prop.to_string()
        }
    }

    pub fn describe_clause(&self, clause: &Clause) -> String {
        let parts: Vec<String> = clause.lits().iter().map(|&lit| self.describe(lit)).collect();
        parts.join(" ∨ ")
    }

    /// # Panics
    ///
    /// Panics if the SAT backend rejects the clause.
    pub fn add_clause(&mut self, lits: impl IntoIterator<Item = Lit>) {
        let clause = Clause::new(lits);
        if clause.is_tautology() {
            trace!("add_clause: skipping tautology {}", clause);
            return;
        }
        if self.store.contains(&clause) {
            return;
        }
        debug!("add_clause: {}", self.describe_clause(&clause));
        if let Err(e) = self.solver.add_clause(&clause) {
            panic!("solver rejected {}: {}", clause, e);
        }
        self.store.insert(clause);
        self.cache.invalidate();
    }

    /// Asserts `symbol` at `cell` (or its negation when `holds` is false).
    pub fn add_fact(&mut self, symbol: impl Into<Symbol>, cell: Cell, holds: bool) {
        let lit = self.encode(symbol, cell);
        self.add_clause([if holds { lit } else { -lit }]);
    }

    /// Panics if the clause set itself has become unsatisfiable.
    fn ensure_consistent(&mut self) {
        if self.checked_len == self.store.len() {
            return;
        }
        let consistent = match self.solver.solve() {
            Ok(sat) => sat,
            Err(e) => panic!("consistency check failed: {}", e),
        };
        assert!(
            consistent,
            "knowledge base is unsatisfiable after {} clauses",
            self.store.len()
        );
        self.checked_len = self.store.len();
    }

    /// Returns `true` iff the knowledge base entails `lit`.
    ///
    /// # Panics
    ///
    /// Panics if the clause set is unsatisfiable, or if the SAT backend
    /// fails to reach a verdict.
    pub fn query(&mut self, lit: Lit) -> bool {
        self.queries += 1;
        if self.entailed.contains(&lit) {
            return true;
        }
        if let Some(&result) = self.cache.get(&lit) {
            return result;
        }
        self.ensure_consistent();

        let result = if self.solver.mentions(lit.var()) {
            match self.solver.solve_with(&[-lit]) {
                Ok(sat) => !sat,
                Err(e) => panic!("query({}) failed: {}", self.describe(lit), e),
            }
        } else {
            // A satisfiable base leaves an unconstrained variable free.
            self.short_circuits += 1;
            false
        };
        trace!("query({}) = {}", self.describe(lit), result);

        if result {
            self.entailed.insert(lit);
        }
        self.cache.insert(&lit, result);
        result
    }

    /// Entails that `symbol` holds at `cell`.
    pub fn holds(&mut self, symbol: impl Into<Symbol>, cell: Cell) -> bool {
        let lit = self.encode(symbol, cell);
        self.query(lit)
    }

    /// Entails that `symbol` does not hold at `cell`.
    pub fn excludes(&mut self, symbol: impl Into<Symbol>, cell: Cell) -> bool {
        let lit = self.encode(symbol, cell);
        self.query(-lit)
    }

    /// Asserts each percept as a fact, then runs hazard inference.
    pub fn update(&mut self, percepts: &[(Percept, Cell)]) -> Vec<Discovery> {
        for &(percept, cell) in percepts {
            self.add_fact(percept, cell, true);
        }
        self.infer_hazards()
    }

    fn expand_rule(&mut self, percept: Percept, element: Element, cell: Cell) {
        let p = self.encode(percept, cell);
        let neighbors: Vec<Lit> = cell
            .neighbors(self.grid_size())
            .map(|n| self.encode(element, n))
            .collect();

        self.add_clause(std::iter::once(-p).chain(neighbors.iter().copied()));
        for &e in &neighbors {
            self.add_clause([p, -e]);
        }
    }

    /// Runs the percept-to-element rule over the whole grid and reports
    /// elements that became entailed since the previous run.
    pub fn infer_hazards(&mut self) -> Vec<Discovery> {
        let n = self.grid_size();

        loop {
            let mut added = 0;
            for percept in Percept::INFERABLE {
                let Some(element) = percept.element() else {
                    continue;
                };
                for cell in Cell::all(n) {
                    if self.expanded.contains_key(&(percept, cell)) {
                        continue;
                    }
                    let p = self.encode(percept, cell);
                    let value = if self.query(p) {
                        true
                    } else if self.query(-p) {
                        false
                    } else {
                        continue;
                    };
                    debug!(
                        "infer_hazards: expanding {}{} at {}",
                        if value { "" } else { "¬" },
                        percept.name(),
                        cell
                    );
                    self.expand_rule(percept, element, cell);
                    self.expanded.insert((percept, cell), value);
                    added += 1;
                }
            }
            if added == 0 {
                break;
            }
        }

        let sources: Vec<(Percept, Cell)> = self
            .expanded
            .iter()
            .filter(|(_, &value)| value)
            .map(|(&key, _)| key)
            .collect();

        let mut found = Vec::new();
        for (percept, cell) in sources {
            let Some(element) = percept.element() else {
                continue;
            };
            for neighbor in cell.neighbors(n) {
                let discovery = Discovery {
                    element,
                    cell: neighbor,
                };
                if self.reported.contains(&discovery) {
                    continue;
                }
                if self.holds(element, neighbor) {
                    info!("Inferred {} at {}", element.name(), neighbor);
                    self.reported.insert(discovery);
                    found.push(discovery);
                }
            }
        }
        found
    }

    pub fn num_clauses(&self) -> usize {
        self.store.len()
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.store.iter()
    }

    /// Dumps the accumulated clauses in DIMACS CNF format.
    pub fn write_dimacs<W: Write>(&self, w: W) -> io::Result<()> {
        self.store.write_dimacs(w)
    }

    pub fn stats(&self) -> KbStats {
        KbStats {
            clauses: self.store.len(),
            queries: self.queries,
            short_circuits: self.short_circuits,
            cache_hits: self.cache.hits(),
            cache_misses: self.cache.misses(),
            solver: self.solver.stats(),
        }
    }
}
