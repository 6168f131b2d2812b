//! The Wumpus-world agent: state, scoring, and the perceive/decide cycle.

use std::collections::{HashMap, HashSet};

use log::{debug, info, warn};

use crate::config::AgentConfig;
use crate::error::{EncodingError, PolicyError};
use crate::grid::{Cell, Direction};
use crate::inference::{DangerSet, InferenceEngine};
use crate::knowledge_base::{Discovery, KnowledgeBase};
use crate::policy::{Action, DecisionKind, MoveSelectionPolicy};
use crate::symbol::{Element, Percept};

#[derive(Debug)]
pub struct Agent {
    engine: InferenceEngine,
    config: AgentConfig,
    grid_size: usize,
    start: Cell,
    position: Cell,
    facing: Direction,
    health: u32,
    score: i64,
    potions: u32,
    game_over: bool,
    game_won: bool,
    death: Option<Element>,
    current_percepts: HashSet<Percept>,
    current_actions: Vec<(Action, Cell)>,
    grabbed_gold: HashSet<Cell>,
    grabbed_potions: HashSet<Cell>,
    visited: HashSet<Cell>,
    parents: HashMap<Cell, Cell>,
    dangerous: DangerSet,
}

impl Agent {
    pub fn new(start: Cell, grid_size: usize, config: AgentConfig) -> Result<Self, EncodingError> {
        let kb = KnowledgeBase::new(grid_size)?;
        let engine = InferenceEngine::new(kb, config.weights.clone());
        Ok(Self {
            engine,
            grid_size,
            start,
            position: start,
            facing: Direction::North,
            health: config.initial_health,
            score: 0,
            potions: 0,
            game_over: false,
            game_won: false,
            death: None,
            current_percepts: HashSet::new(),
            current_actions: Vec::new(),
            grabbed_gold: HashSet::new(),
            grabbed_potions: HashSet::new(),
            visited: HashSet::new(),
            parents: HashMap::new(),
            dangerous: DangerSet::new(),
            config,
        })
    }

    /// Decides the next batch of actions from what is observed at the
    /// current cell.
    pub fn choose_action(
        &mut self,
        percepts: &[(Percept, Cell)],
        element: (Element, Cell),
    ) -> Result<Vec<Action>, PolicyError> {
        if self.visited.insert(self.position) {
            self.current_percepts = percepts.iter().map(|&(p, _)| p).collect();
            let (found_element, cell) = element;
            self.engine.observe(cell, found_element, &self.current_percepts);
            let found = self.engine.kb_mut().update(percepts);
            self.record(found);
        }

        let moves = self.engine.infer_safe_moves(
            self.position,
            &self.grabbed_gold,
            &self.grabbed_potions,
            &self.visited,
            &mut self.dangerous,
            self.start,
        );

        let policy = MoveSelectionPolicy {
            position: self.position,
            facing: self.facing,
            start: self.start,
            parents: &self.parents,
        };
        let decision = policy.select(&moves)?;

        if decision.kind == DecisionKind::Advance {
            if let Some(destination) = decision.destination {
                if !self.visited.contains(&destination) {
                    self.parents.entry(destination).or_insert(self.position);
                }
            }
        }

        self.current_actions = decision
            .actions
            .iter()
            .map(|&action| {
                let at = if action == Action::Climb { self.start } else { self.position };
                (action, at)
            })
            .collect();
        info!("At {} facing {}: {}", self.position, self.facing, self.action_string());
        Ok(decision.actions)
    }

    fn record(&mut self, found: Vec<Discovery>) {
        for discovery in found {
            if discovery.element.is_hazard() {
                self.dangerous.insert((discovery.element, discovery.cell));
            }
        }
    }

    /// Re-runs hazard inference after the environment reports an event.
    ///
    /// A scream is only logged. The Wumpus cell stays a known hazard.
    pub fn update_knowledge(&mut self, event: Option<(Percept, Cell)>) {
        if let Some((Percept::Scream, cell)) = event {
            info!("Scream: the Wumpus at {} is dead", cell);
        }
        let found = self.engine.kb_mut().infer_hazards();
        self.record(found);
    }

    pub fn is_game_over(&mut self) -> bool {
        if self.health == 0 {
            self.game_over = true;
        }
        self.game_over
    }

    pub fn is_game_won(&self) -> bool {
        self.game_won
    }

    pub fn handle_forward(&mut self) -> bool {
        self.score -= self.config.move_penalty;
        match self.position.step(self.facing, self.grid_size) {
            Some(next) => {
                self.position = next;
                true
            }
            None => {
                warn!("Bumped into the wall at {} facing {}", self.position, self.facing);
                false
            }
        }
    }

    pub fn turn_left(&mut self) {
        self.score -= self.config.move_penalty;
        self.facing = self.facing.turn_left();
    }

    pub fn turn_right(&mut self) {
        self.score -= self.config.move_penalty;
        self.facing = self.facing.turn_right();
    }

    /// The cell an arrow shot now would hit.
    pub fn aim(&self) -> Option<Cell> {
        self.position.step(self.facing, self.grid_size)
    }

    pub fn handle_shoot(&mut self, killed: bool) {
        self.score -= self.config.shoot_penalty;
        debug!("shoot from {} facing {}: hit = {}", self.position, self.facing, killed);
    }

    pub fn handle_grab(&mut self) {
        self.score -= self.config.move_penalty;
        let here = self.position;

        if !self.grabbed_potions.contains(&here) && self.engine.infer_healing_potion(here) {
            self.grabbed_potions.insert(here);
            self.potions += 1;
            info!("Grabbed a healing potion at {}", here);
            self.heal();
        }

        if !self.grabbed_gold.contains(&here) && self.engine.infer_gold(here) {
            self.score += self.config.gold_reward;
            self.grabbed_gold.insert(here);
            info!("Grabbed gold at {}", here);
        }
    }

    pub fn heal(&mut self) {
        self.score -= self.config.move_penalty;
        if self.potions > 0 {
            self.health = (self.health + self.config.potion_heal).min(self.config.max_health);
            self.potions -= 1;
        }
    }

    pub fn handle_climb(&mut self) {
        self.score += self.config.climb_reward;
        if self.position == self.start {
            info!("Climbed out with score {}", self.score);
            self.game_won = true;
        } else {
            warn!("Tried to climb at {}, away from the exit", self.position);
        }
    }

    pub fn handle_gas(&mut self) {
        self.take_damage(self.config.gas_damage);
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
        debug!("Took {} damage, health {}", amount, self.health);
        if self.health == 0 {
            self.game_over = true;
        }
    }

    /// Ends the episode: the agent entered a lethal cell.
    pub fn die(&mut self, cause: Element) {
        warn!("Agent killed by {} at {}", cause.name(), self.position);
        self.health = 0;
        self.death = Some(cause);
        self.game_over = true;
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut InferenceEngine {
        &mut self.engine
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn potions(&self) -> u32 {
        self.potions
    }

    pub fn death(&self) -> Option<Element> {
        self.death
    }

    pub fn visited(&self) -> &HashSet<Cell> {
        &self.visited
    }

    pub fn parents(&self) -> &HashMap<Cell, Cell> {
        &self.parents
    }

    pub fn dangerous(&self) -> &DangerSet {
        &self.dangerous
    }

    pub fn grabbed_gold(&self) -> &HashSet<Cell> {
        &self.grabbed_gold
    }

    pub fn grabbed_potions(&self) -> &HashSet<Cell> {
        &self.grabbed_potions
    }

    pub fn data_string(&self) -> String {
        format!("Position: {}, Health: {}, Score: {}", self.position, self.health, self.score)
    }

    /// Percepts at the last newly visited cell, e.g. `BREEZE, STENCH`.
    pub fn percept_string(&self) -> String {
        let mut names: Vec<&str> = self.current_percepts.iter().map(|p| p.name()).collect();
        if names.is_empty() {
            return "None".to_string();
        }
        names.sort_unstable();
        names.join(", ")
    }

    pub fn action_string(&self) -> String {
        if self.current_actions.is_empty() {
            return "None".to_string();
        }
        let names: Vec<&str> = self.current_actions.iter().map(|(a, _)| a.name()).collect();
        names.join(", ")
    }

    pub fn dangerous_cells_string(&self) -> String {
        let parts: Vec<String> = self
            .dangerous
            .iter()
            .map(|(element, cell)| format!("({}, {}, {})", element.code(), cell.row, cell.col))
            .collect();
        parts.join(", ")
    }

    /// The last decided actions as `(x, y): ACTION` lines.
    pub fn action_log_lines(&self) -> Vec<String> {
        self.current_actions
            .iter()
            .map(|(action, cell)| format!("({}, {}): {}", cell.row, cell.col, action.name()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn c(row: usize, col: usize) -> Cell {
        Cell::new(row, col)
    }

    fn agent(start: Cell, n: usize) -> Agent {
        Agent::new(start, n, AgentConfig::default()).unwrap()
    }

    #[test]
    fn test_rejects_bad_grid() {
        assert!(Agent::new(c(0, 0), 0, AgentConfig::default()).is_err());
    }

    #[test]
    fn test_first_move_from_quiet_start() {
        let mut a = agent(c(1, 0), 2);
        let actions = a.choose_action(&[], (Element::Agent, c(1, 0))).unwrap();
        // Neighbors in order: up (0,0), right (1,1); equal scores keep order.
        assert_eq!(actions, vec![Action::Forward]);
        assert_eq!(a.parents().get(&c(0, 0)), Some(&c(1, 0)));
        assert_eq!(a.action_log_lines(), vec!["(1, 0): FORWARD".to_string()]);
    }

    #[test]
    fn test_scream_leaves_knowledge_unchanged() {
        let mut a = agent(c(1, 0), 2);
        a.engine_mut().kb_mut().add_fact(Element::Wumpus, c(0, 0), true);
        let clauses = a.engine().kb().num_clauses();
        a.update_knowledge(Some((Percept::Scream, c(0, 0))));
        assert_eq!(a.engine().kb().num_clauses(), clauses);
        assert!(a.engine_mut().kb_mut().holds(Element::Wumpus, c(0, 0)));
    }

    #[test]
    fn test_turns_and_moves_cost() {
        let mut a = agent(c(1, 1), 3);
        a.turn_right();
        assert_eq!(a.facing(), Direction::East);
        assert!(a.handle_forward());
        assert_eq!(a.position(), c(1, 2));
        assert!(!a.handle_forward());
        assert_eq!(a.position(), c(1, 2));
        assert_eq!(a.score(), -30);
    }

    #[test]
    fn test_grab_gold_once() {
        let mut a = agent(c(0, 0), 2);
        a.choose_action(&[], (Element::Gold, c(0, 0))).unwrap();
        a.handle_grab();
        assert_eq!(a.score(), 5000 - 10);
        a.handle_grab();
        assert_eq!(a.score(), 5000 - 20);
        assert!(a.grabbed_gold().contains(&c(0, 0)));
    }

    #[test]
    fn test_potion_heals_up_to_max() {
        let mut a = agent(c(0, 0), 2);
        a.take_damage(50);
        a.choose_action(&[], (Element::HealingPotion, c(0, 0))).unwrap();
        a.handle_grab();
        assert_eq!(a.health(), 75);
        assert_eq!(a.potions(), 0);
    }

    #[test]
    fn test_death() {
        let mut a = agent(c(0, 0), 2);
        a.die(Element::Pit);
        assert!(a.is_game_over());
        assert_eq!(a.death(), Some(Element::Pit));
    }

    #[test]
    fn test_climb_only_wins_at_start() {
        let mut a = agent(c(0, 0), 2);
        a.turn_right();
        a.handle_forward();
        a.handle_climb();
        assert!(!a.is_game_won());
        a.turn_left();
        a.turn_left();
        a.handle_forward();
        a.handle_climb();
        assert!(a.is_game_won());
    }

    #[test]
    fn test_strings() {
        let mut a = agent(c(0, 0), 3);
        a.choose_action(
            &[(Percept::Stench, c(0, 0)), (Percept::Breeze, c(0, 0))],
            (Element::Agent, c(0, 0)),
        )
        .unwrap();
        assert_eq!(a.percept_string(), "BREEZE, STENCH");
        assert_eq!(a.data_string(), "Position: (0, 0), Health: 100, Score: 0");
        assert_eq!(a.dangerous_cells_string(), "");
    }
}
