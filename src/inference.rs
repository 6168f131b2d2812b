//! Safety proofs and candidate ranking on top of the [`KnowledgeBase`].

use std::collections::{BTreeSet, HashSet};

use log::{debug, info};

use crate::config::HeuristicWeights;
use crate::grid::Cell;
use crate::knowledge_base::KnowledgeBase;
use crate::symbol::{Element, Percept, Symbol};

/// Cells proven to hold a hazard, tagged by the hazard kind.
pub type DangerSet = BTreeSet<(Element, Cell)>;

pub fn is_dangerous(dangerous: &DangerSet, cell: Cell) -> bool {
    dangerous.iter().any(|&(_, c)| c == cell)
}

#[derive(Debug)]
pub struct InferenceEngine {
    kb: KnowledgeBase,
    weights: HeuristicWeights,
}

impl InferenceEngine {
    pub fn new(kb: KnowledgeBase, weights: HeuristicWeights) -> Self {
        Self { kb, weights }
    }

    pub fn kb(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn kb_mut(&mut self) -> &mut KnowledgeBase {
        &mut self.kb
    }

    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }

    pub fn grid_size(&self) -> usize {
        self.kb.grid_size()
    }

    /// Asserts the element actually found at `cell`.
    pub fn add_element(&mut self, cell: Cell, element: Element) {
        self.kb.add_fact(element, cell, true);
    }

    /// Closed-world sweep: every other element is absent from `cell`.
    ///
    /// `Agent` and `Safe` never take part in the sweep.
    pub fn infer_not_elements(&mut self, cell: Cell, element: Element) {
        for other in Element::ALL {
            if other != element && other.is_sweepable() {
                self.kb.add_fact(other, cell, false);
            }
        }
    }

    /// Closed-world sweep: every standing percept not observed is absent.
    pub fn infer_not_percepts(&mut self, cell: Cell, percepts: &HashSet<Percept>) {
        for percept in Percept::INFERABLE {
            if !percepts.contains(&percept) {
                self.kb.add_fact(percept, cell, false);
            }
        }
    }

    /// Records everything observed on a newly visited cell.
    pub fn observe(&mut self, cell: Cell, element: Element, percepts: &HashSet<Percept>) {
        debug!("observe {}: element {}, percepts {:?}", cell, element.name(), percepts);
        self.add_element(cell, element);
        self.infer_not_elements(cell, element);
        self.infer_not_percepts(cell, percepts);
    }

    /// Whether `cell` is provably free of every hazard. Unknown is unsafe.
    pub fn is_safe(&mut self, cell: Cell) -> bool {
        Element::HAZARDS
            .iter()
            .all(|&hazard| self.kb.excludes(hazard, cell))
    }

    pub fn entailed_hazards(&mut self, cell: Cell) -> Vec<Element> {
        Element::HAZARDS
            .into_iter()
            .filter(|&hazard| self.kb.holds(hazard, cell))
            .collect()
    }

    pub fn infer_gold(&mut self, cell: Cell) -> bool {
        self.kb.holds(Element::Gold, cell)
    }

    pub fn infer_healing_potion(&mut self, cell: Cell) -> bool {
        self.kb.holds(Element::HealingPotion, cell)
    }

    /// Every symbol whose value at `cell` is decided, with that value.
    pub fn known_at(&mut self, cell: Cell) -> Vec<(Symbol, bool)> {
        let mut known = Vec::new();
        for symbol in Symbol::ALL {
            if self.kb.holds(symbol, cell) {
                known.push((symbol, true));
            } else if self.kb.excludes(symbol, cell) {
                known.push((symbol, false));
            }
        }
        known
    }

    /// Sum of the weights of every symbol entailed at `cell`.
    pub fn evaluate_heuristic(&mut self, cell: Cell) -> i64 {
        let mut score = 0i64;
        for symbol in Symbol::ALL {
            let weight = self.weights.weight(symbol);
            if weight != 0 && self.kb.holds(symbol, cell) {
                score = score.saturating_add(weight);
            }
        }
        score
    }

    /// Ranked list of recommended next cells.
    ///
    /// A first entry equal to `position` means "grab here". Unsafe neighbors
    /// with an entailed hazard are added to `dangerous`. An empty result means
    /// no safe move is known and the caller has to backtrack.
    pub fn infer_safe_moves(
        &mut self,
        position: Cell,
        grabbed_gold: &HashSet<Cell>,
        grabbed_potions: &HashSet<Cell>,
        visited: &HashSet<Cell>,
        dangerous: &mut DangerSet,
        start: Cell,
    ) -> Vec<Cell> {
        let n = self.grid_size();
        let mut scored: Vec<(Cell, i64)> = Vec::new();

        let gold_here = !grabbed_gold.contains(&position) && self.infer_gold(position);
        let potion_here = !grabbed_potions.contains(&position) && self.infer_healing_potion(position);
        if gold_here || potion_here {
            scored.push((position, HeuristicWeights::GRAB));
        }

        for neighbor in position.neighbors(n) {
            if is_dangerous(dangerous, neighbor) {
                continue;
            }
            if self.is_safe(neighbor) {
                if !visited.contains(&neighbor) {
                    let score = self.evaluate_heuristic(neighbor);
                    scored.push((neighbor, score));
                }
                continue;
            }

            let hazards = self.entailed_hazards(neighbor);
            if hazards.is_empty() {
                continue;
            }
            for &hazard in &hazards {
                info!("Marking {} as dangerous ({})", neighbor, hazard.name());
                dangerous.insert((hazard, neighbor));
            }
            // A cell holds a single element.
            for other in Element::ALL {
                if other.is_sweepable() && !hazards.contains(&other) {
                    self.kb.add_fact(other, neighbor, false);
                }
            }
        }

        scored.sort_by(|a, b| b.1.cmp(&a.1));
        let moves: Vec<Cell> = scored.into_iter().map(|(cell, _)| cell).collect();

        if !moves.is_empty() {
            debug!("safe moves from {}: {:?}", position, moves);
            return moves;
        }

        let mut covered: HashSet<Cell> = visited.clone();
        covered.extend(dangerous.iter().map(|&(_, cell)| cell));
        if covered.len() == n * n && position.is_adjacent(start) {
            info!("Grid exhausted, heading back to {}", start);
            return vec![start];
        }
        Vec::new()
    }
}
