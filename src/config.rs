//! Tunable constants, passed into constructors.

use crate::symbol::{Element, Percept, Symbol};

/// Per-symbol weights used to rank already-safe candidate cells.
///
/// Weights never justify stepping onto an unsafe cell; they only order the
/// cells the knowledge base has already proven safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicWeights {
    weights: [i64; Symbol::COUNT],
}

impl HeuristicWeights {
    /// Score given to the agent's own cell when it holds an ungrabbed item.
    /// Larger than any sum of symbol weights, so a grab always ranks first.
    pub const GRAB: i64 = i64::MAX;

    pub fn zero() -> Self {
        Self {
            weights: [0; Symbol::COUNT],
        }
    }

    pub fn weight(&self, symbol: Symbol) -> i64 {
        self.weights[symbol.id()]
    }

    pub fn with(mut self, symbol: impl Into<Symbol>, weight: i64) -> Self {
        self.weights[symbol.into().id()] = weight;
        self
    }
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        HeuristicWeights::zero()
            .with(Element::Wumpus, -1000)
            .with(Element::Pit, -1000)
            .with(Element::PoisonousGas, -500)
            .with(Element::Gold, 1000)
            .with(Element::HealingPotion, 500)
            .with(Percept::Breeze, -10)
            .with(Percept::Stench, -10)
            .with(Percept::Whiff, -5)
            .with(Percept::Glow, 10)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub initial_health: u32,
    pub max_health: u32,
    pub potion_heal: u32,
    pub gas_damage: u32,
    pub move_penalty: i64,
    pub shoot_penalty: i64,
    pub gold_reward: i64,
    pub climb_reward: i64,
    pub weights: HeuristicWeights,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            initial_health: 100,
            max_health: 100,
            potion_heal: 25,
            gas_damage: 25,
            move_penalty: 10,
            shoot_penalty: 100,
            gold_reward: 5000,
            climb_reward: 10,
            weights: HeuristicWeights::default(),
        }
    }
}
