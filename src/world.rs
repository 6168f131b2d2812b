//! The environment side of the perceive/act loop.
//!
//! [`Environment`] is the contract the agent relies on; [`GridWorld`] is a
//! small ground-truth implementation used by the episode driver, demos, and
//! tests.

use log::{debug, info};

use crate::agent::Agent;
use crate::encoder::MAX_GRID_SIZE;
use crate::error::{EncodingError, WorldError};
use crate::grid::Cell;
use crate::policy::Action;
use crate::symbol::{Element, Percept};

pub trait Environment {
    fn size(&self) -> usize;

    fn agent_start(&self) -> Cell;

    /// Standing percepts at `cell`; never `Scream`.
    fn percepts(&self, cell: Cell) -> Vec<(Percept, Cell)>;

    /// The single element occupying `cell` (`Agent` or `Safe` when empty).
    fn element(&self, cell: Cell) -> (Element, Cell);

    /// Executes `actions` for `agent`, applying their consequences.
    /// Returns a `Scream` event when an arrow killed the Wumpus.
    fn update(&mut self, agent: &mut Agent, actions: &[Action]) -> Option<(Percept, Cell)>;
}

/// A square cave with at most one element per cell.
///
/// Percepts are derived from the layout the world was built with: grabbing
/// gold or killing the Wumpus changes what occupies a cell, but not what the
/// neighbors sense.
#[derive(Debug, Clone)]
pub struct GridWorld {
    size: usize,
    start: Cell,
    cells: Vec<Element>,
    initial: Vec<Element>,
}

impl GridWorld {
    pub fn new(size: usize, start: Cell) -> Result<Self, WorldError> {
        if size == 0 {
            return Err(EncodingError::EmptyGrid.into());
        }
        if size > MAX_GRID_SIZE {
            return Err(EncodingError::GridTooLarge {
                size,
                max: MAX_GRID_SIZE,
            }
            .into());
        }
        if !start.in_bounds(size) {
            return Err(WorldError::OutOfBounds { cell: start, size });
        }
        let mut cells = vec![Element::Safe; size * size];
        cells[start.row * size + start.col] = Element::Agent;
        Ok(Self {
            size,
            start,
            initial: cells.clone(),
            cells,
        })
    }

    fn index(&self, cell: Cell) -> usize {
        cell.row * self.size + cell.col
    }

    /// Places `element` on an empty cell.
    pub fn place(&mut self, cell: Cell, element: Element) -> Result<(), WorldError> {
        if !cell.in_bounds(self.size) {
            return Err(WorldError::OutOfBounds { cell, size: self.size });
        }
        if cell == self.start {
            if element.is_hazard() {
                return Err(WorldError::HazardAtStart(cell));
            }
        } else {
            let existing = self.cells[self.index(cell)];
            if existing != Element::Safe {
                return Err(WorldError::Occupied { cell, existing });
            }
        }
        let i = self.index(cell);
        self.cells[i] = element;
        self.initial[i] = element;
        Ok(())
    }

    /// Builder-style [`place`][Self::place].
    pub fn with(mut self, cell: Cell, element: Element) -> Result<Self, WorldError> {
        self.place(cell, element)?;
        Ok(self)
    }

    pub fn at(&self, cell: Cell) -> Element {
        self.cells[self.index(cell)]
    }

    /// Cells holding `element` right now.
    pub fn cells_with(&self, element: Element) -> Vec<Cell> {
        Cell::all(self.size).filter(|&c| self.at(c) == element).collect()
    }

    fn initial_at(&self, cell: Cell) -> Element {
        self.initial[self.index(cell)]
    }

    fn execute(&mut self, agent: &mut Agent, action: Action) -> Option<(Percept, Cell)> {
        debug!("execute {} at {}", action, agent.position());
        match action {
            Action::TurnLeft => agent.turn_left(),
            Action::TurnRight => agent.turn_right(),
            Action::Forward => {
                if agent.handle_forward() {
                    match self.at(agent.position()) {
                        element @ (Element::Pit | Element::Wumpus) => agent.die(element),
                        Element::PoisonousGas => agent.handle_gas(),
                        _ => {}
                    }
                }
            }
            Action::Grab => {
                agent.handle_grab();
                let here = agent.position();
                if self.at(here).is_pickup() {
                    let i = self.index(here);
                    self.cells[i] = Element::Safe;
                }
            }
            Action::Shoot => {
                let target = agent.aim();
                let killed = target.is_some_and(|t| self.at(t) == Element::Wumpus);
                agent.handle_shoot(killed);
                if let (true, Some(t)) = (killed, target) {
                    info!("Arrow killed the Wumpus at {}", t);
                    let i = self.index(t);
                    self.cells[i] = Element::Safe;
                    return Some((Percept::Scream, t));
                }
            }
            Action::Climb => agent.handle_climb(),
        }
        None
    }
}

impl Environment for GridWorld {
    fn size(&self) -> usize {
        self.size
    }

    fn agent_start(&self) -> Cell {
        self.start
    }

    fn percepts(&self, cell: Cell) -> Vec<(Percept, Cell)> {
        Percept::INFERABLE
            .into_iter()
            .filter(|&percept| {
                cell.neighbors(self.size)
                    .any(|n| self.initial_at(n).percept() == Some(percept))
            })
            .map(|percept| (percept, cell))
            .collect()
    }

    fn element(&self, cell: Cell) -> (Element, Cell) {
        (self.at(cell), cell)
    }

    fn update(&mut self, agent: &mut Agent, actions: &[Action]) -> Option<(Percept, Cell)> {
        let mut event = None;
        for &action in actions {
            if agent.is_game_over() || agent.is_game_won() {
                break;
            }
            if let Some(e) = self.execute(agent, action) {
                event = Some(e);
            }
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::config::AgentConfig;

    fn c(row: usize, col: usize) -> Cell {
        Cell::new(row, col)
    }

    #[test]
    fn test_percepts_from_layout() {
        let world = GridWorld::new(3, c(2, 0))
            .and_then(|w| w.with(c(0, 0), Element::Pit))
            .and_then(|w| w.with(c(1, 1), Element::Wumpus))
            .unwrap();
        assert_eq!(world.percepts(c(1, 0)), vec![(Percept::Stench, c(1, 0)), (Percept::Breeze, c(1, 0))]);
        assert!(world.percepts(c(2, 2)).is_empty());
        assert_eq!(world.element(c(2, 0)), (Element::Agent, c(2, 0)));
        assert_eq!(world.element(c(2, 2)), (Element::Safe, c(2, 2)));
    }

    #[test]
    fn test_place_rejects_conflicts() {
        let mut world = GridWorld::new(3, c(0, 0)).unwrap();
        assert_eq!(world.place(c(0, 0), Element::Pit), Err(WorldError::HazardAtStart(c(0, 0))));
        world.place(c(1, 1), Element::Gold).unwrap();
        assert_eq!(
            world.place(c(1, 1), Element::Pit),
            Err(WorldError::Occupied {
                cell: c(1, 1),
                existing: Element::Gold
            })
        );
        assert!(matches!(world.place(c(3, 0), Element::Pit), Err(WorldError::OutOfBounds { .. })));
        assert!(GridWorld::new(0, c(0, 0)).is_err());
    }

    #[test]
    fn test_forward_into_pit_kills() {
        let mut world = GridWorld::new(2, c(1, 0)).unwrap().with(c(0, 0), Element::Pit).unwrap();
        let mut agent = Agent::new(c(1, 0), 2, AgentConfig::default()).unwrap();
        world.update(&mut agent, &[Action::Forward, Action::TurnRight]);
        assert!(agent.is_game_over());
        assert_eq!(agent.death(), Some(Element::Pit));
        // Actions after death are not executed.
        assert_eq!(agent.facing(), crate::grid::Direction::North);
    }

    #[test]
    fn test_gas_damages() {
        let mut world = GridWorld::new(2, c(1, 0))
            .unwrap()
            .with(c(0, 0), Element::PoisonousGas)
            .unwrap();
        let mut agent = Agent::new(c(1, 0), 2, AgentConfig::default()).unwrap();
        world.update(&mut agent, &[Action::Forward]);
        assert_eq!(agent.health(), 75);
        assert!(!agent.is_game_over());
    }

    #[test]
    fn test_shoot_kills_wumpus() {
        let mut world = GridWorld::new(2, c(1, 0)).unwrap().with(c(0, 0), Element::Wumpus).unwrap();
        let mut agent = Agent::new(c(1, 0), 2, AgentConfig::default()).unwrap();
        let event = world.update(&mut agent, &[Action::Shoot]);
        assert_eq!(event, Some((Percept::Scream, c(0, 0))));
        assert_eq!(world.at(c(0, 0)), Element::Safe);
        assert_eq!(agent.score(), -100);
        // Stench stays: percepts follow the initial layout.
        assert_eq!(world.percepts(c(1, 0)), vec![(Percept::Stench, c(1, 0))]);
    }

    #[test]
    fn test_grab_removes_item() {
        let mut world = GridWorld::new(2, c(1, 0)).unwrap().with(c(1, 0), Element::Gold).unwrap();
        let mut agent = Agent::new(c(1, 0), 2, AgentConfig::default()).unwrap();
        let percepts = world.percepts(c(1, 0));
        let element = world.element(c(1, 0));
        let actions = agent.choose_action(&percepts, element).unwrap();
        assert_eq!(actions[0], Action::Grab);
        world.update(&mut agent, &actions[..1]);
        assert_eq!(world.at(c(1, 0)), Element::Safe);
        assert!(agent.grabbed_gold().contains(&c(1, 0)));
    }
}
