//! # wumpus-kb: a SAT-backed Wumpus-world agent
//!
//! **`wumpus-kb`** is the inference core of a logic agent exploring the
//! Wumpus world: a square cave hiding pits, a Wumpus, poisonous gas, gold, and
//! healing potions. The agent never sees the hazards directly. It senses
//! percepts (breeze, stench, glow, whiff) in the cell it stands on, records
//! them as propositional facts, and only moves onto cells that the knowledge
//! base *proves* safe.
//!
//! ## How it works
//!
//! - Every proposition `Symbol(x, y)` is packed into a single DIMACS-style
//!   literal by the [`PropositionEncoder`][crate::encoder::PropositionEncoder].
//! - The [`KnowledgeBase`][crate::knowledge_base::KnowledgeBase] is a
//!   monotone CNF. A literal `L` is entailed iff `KB ∧ ¬L` is unsatisfiable,
//!   which is decided by the incremental [`Solver`][crate::solver::Solver]
//!   under a single assumption.
//! - Whenever the value of a percept at a cell becomes known, the
//!   biconditional linking it to the associated element in the neighboring
//!   cells is added to the knowledge base, and inference is repeated until
//!   nothing new follows.
//! - The [`InferenceEngine`][crate::inference::InferenceEngine] ranks the
//!   provably safe neighbors, and the
//!   [`MoveSelectionPolicy`][crate::policy::MoveSelectionPolicy] turns the
//!   best one into turns, a forward step, and optionally a grab or a climb.
//!
//! ## Basic Usage
//!
//! ```rust
//! use wumpus_kb::knowledge_base::KnowledgeBase;
//! use wumpus_kb::grid::Cell;
//! use wumpus_kb::symbol::{Element, Percept};
//!
//! // The textbook 2x2 corner: breezes on both sides of (0,0).
//! let mut kb = KnowledgeBase::new(2).unwrap();
//! for hazard in Element::HAZARDS {
//!     kb.add_fact(hazard, Cell::new(1, 1), false);
//! }
//! kb.update(&[
//!     (Percept::Breeze, Cell::new(1, 0)),
//!     (Percept::Breeze, Cell::new(0, 1)),
//! ]);
//! assert!(kb.holds(Element::Pit, Cell::new(0, 0)));
//! ```
//!
//! A whole episode can be run headless against a [`GridWorld`][crate::world::GridWorld]:
//!
//! ```rust
//! use wumpus_kb::agent::Agent;
//! use wumpus_kb::config::AgentConfig;
//! use wumpus_kb::episode::{run_episode, EpisodeConfig};
//! use wumpus_kb::grid::Cell;
//! use wumpus_kb::symbol::Element;
//! use wumpus_kb::world::GridWorld;
//!
//! let start = Cell::new(1, 0);
//! let mut world = GridWorld::new(2, start).unwrap().with(Cell::new(0, 0), Element::Gold).unwrap();
//! let mut agent = Agent::new(start, 2, AgentConfig::default()).unwrap();
//! let outcome = run_episode(&mut world, &mut agent, &EpisodeConfig::default()).unwrap();
//! assert!(outcome.won);
//! ```
//!
//! ## Core Components
//!
//! - **[`knowledge_base`]**: entailment queries and the percept rules.
//! - **[`solver`]**: incremental SAT through `rustsat` and BatSat.
//! - **[`inference`]**: safety proofs and candidate ranking.
//! - **[`agent`]**, **[`world`]**, **[`episode`]**: the perceive/act loop.

pub mod agent;
pub mod cache;
pub mod cnf;
pub mod config;
pub mod encoder;
pub mod episode;
pub mod error;
pub mod grid;
pub mod inference;
pub mod knowledge_base;
pub mod policy;
pub mod solver;
pub mod symbol;
pub mod types;
pub mod world;
