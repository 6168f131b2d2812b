//! Incremental satisfiability through `rustsat`, backed by BatSat.
//!
//! Clauses are added one at a time and never removed. Assumptions passed to
//! [`Solver::solve_with`] hold for that call only. Clauses arrive already
//! normalized by [`Clause::new`], so they are forwarded to the backend as-is.

use std::fmt::Debug;

use log::trace;
use rustsat::solvers::{Solve, SolveIncremental, SolverResult};
use rustsat::types::{Clause as BackendClause, Lit as BackendLit, TernaryVal};
use rustsat_batsat::BasicSolver;

use crate::cnf::Clause;
use crate::error::SolverError;
use crate::types::{Lit, Var};

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct SolverStats {
    pub solves: usize,
    pub sat: usize,
    pub unsat: usize,
    pub clauses: usize,
}

/// Backend literals are 0-based and carry a negation flag.
fn to_backend(lit: Lit) -> BackendLit {
    BackendLit::new(lit.var().backend_index(), lit.is_negative())
}

#[derive(Default)]
pub struct Solver {
    backend: BasicSolver,
    mentioned: Vec<bool>,
    stats: SolverStats,
}

impl Debug for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solver")
            .field("backend", &"BatSat")
            .field("vars", &self.mentioned.iter().filter(|&&m| m).count())
            .field("stats", &self.stats)
            .finish()
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> SolverStats {
        self.stats
    }

    /// Whether `var` occurs in any clause added so far.
    pub fn mentions(&self, var: Var) -> bool {
        self.mentioned.get(var.index()).copied().unwrap_or(false)
    }

    fn mention(&mut self, var: Var) {
        if self.mentioned.len() <= var.index() {
            self.mentioned.resize(var.index() + 1, false);
        }
        self.mentioned[var.index()] = true;
    }

    /// Adds a clause. The empty clause makes the solver permanently
    /// unsatisfiable.
    pub fn add_clause(&mut self, clause: &Clause) -> Result<(), SolverError> {
        for lit in clause.lits() {
            self.mention(lit.var());
        }
        let backend: BackendClause = clause.lits().iter().map(|&lit| to_backend(lit)).collect();
        self.backend
            .add_clause(backend)
            .map_err(|e| SolverError::Backend(e.to_string()))?;
        self.stats.clauses += 1;
        Ok(())
    }

    /// Value of `lit` in the model found by the last satisfiable solve.
    pub fn value(&self, lit: Lit) -> Option<bool> {
        if !self.mentions(lit.var()) {
            return None;
        }
        match self.backend.lit_val(to_backend(lit)) {
            Ok(TernaryVal::True) => Some(true),
            Ok(TernaryVal::False) => Some(false),
            Ok(TernaryVal::DontCare) | Err(_) => None,
        }
    }

    pub fn solve(&mut self) -> Result<bool, SolverError> {
        self.solve_with(&[])
    }

    /// Checks satisfiability of the clause set together with `assumptions`.
    pub fn solve_with(&mut self, assumptions: &[Lit]) -> Result<bool, SolverError> {
        self.stats.solves += 1;
        let assumps: Vec<BackendLit> = assumptions.iter().map(|&lit| to_backend(lit)).collect();
        let result = self
            .backend
            .solve_assumps(&assumps)
            .map_err(|e| SolverError::Backend(e.to_string()))?;
        trace!("solve_with({} assumptions) = {}", assumptions.len(), result);
        match result {
            SolverResult::Sat => {
                self.stats.sat += 1;
                Ok(true)
            }
            SolverResult::Unsat => {
                self.stats.unsat += 1;
                Ok(false)
            }
            SolverResult::Interrupted => Err(SolverError::Interrupted),
        }
    }
}
