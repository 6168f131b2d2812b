//! Turning a ranked candidate list into an action sequence.

use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::error::PolicyError;
use crate::grid::{Cell, Direction};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Action {
    TurnLeft,
    TurnRight,
    Forward,
    Grab,
    Shoot,
    Climb,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::TurnLeft => "TURN_LEFT",
            Action::TurnRight => "TURN_RIGHT",
            Action::Forward => "FORWARD",
            Action::Grab => "GRAB",
            Action::Shoot => "SHOOT",
            Action::Climb => "CLIMB",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

const STAY: &[Action] = &[];
const LEFT: &[Action] = &[Action::TurnLeft];
const RIGHT: &[Action] = &[Action::TurnRight];
const BACK: &[Action] = &[Action::TurnLeft, Action::TurnLeft];

/// `TURNS[from][to]`, directions indexed N, E, S, W.
static TURNS: [[&[Action]; 4]; 4] = [
    [STAY, RIGHT, BACK, LEFT],
    [LEFT, STAY, RIGHT, BACK],
    [BACK, LEFT, STAY, RIGHT],
    [RIGHT, BACK, LEFT, STAY],
];

fn direction_index(direction: Direction) -> usize {
    match direction {
        Direction::North => 0,
        Direction::East => 1,
        Direction::South => 2,
        Direction::West => 3,
    }
}

/// Minimal turn sequence rotating `from` to `to`.
pub fn turns(from: Direction, to: Direction) -> &'static [Action] {
    TURNS[direction_index(from)][direction_index(to)]
}

pub fn target_direction(from: Cell, to: Cell) -> Result<Direction, PolicyError> {
    Direction::between(from, to).ok_or(PolicyError::NotAdjacent { from, to })
}

/// Turns followed by one FORWARD, moving from `position` to the adjacent
/// `destination`.
pub fn step_actions(position: Cell, facing: Direction, destination: Cell) -> Result<Vec<Action>, PolicyError> {
    let target = target_direction(position, destination)?;
    let mut actions = turns(facing, target).to_vec();
    actions.push(Action::Forward);
    Ok(actions)
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DecisionKind {
    /// Move to a newly recommended cell.
    Advance,
    /// Retreat to the parent cell.
    Backtrack,
    /// Leave the cave; the episode ends.
    Climb,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Decision {
    pub actions: Vec<Action>,
    pub destination: Option<Cell>,
    pub kind: DecisionKind,
}

/// Agent-side view needed to pick the next actions.
#[derive(Debug)]
pub struct MoveSelectionPolicy<'a> {
    pub position: Cell,
    pub facing: Direction,
    pub start: Cell,
    pub parents: &'a HashMap<Cell, Cell>,
}

impl MoveSelectionPolicy<'_> {
    pub fn select(&self, candidates: &[Cell]) -> Result<Decision, PolicyError> {
        let mut actions = Vec::new();
        let mut rest = candidates;
        if rest.first() == Some(&self.position) {
            actions.push(Action::Grab);
            rest = &rest[1..];
        }

        if let Some(&destination) = rest.first() {
            actions.extend(step_actions(self.position, self.facing, destination)?);
            let kind = if destination == self.start {
                actions.push(Action::Climb);
                DecisionKind::Climb
            } else {
                DecisionKind::Advance
            };
            debug!("select: {:?} towards {}", kind, destination);
            return Ok(Decision {
                actions,
                destination: Some(destination),
                kind,
            });
        }

        match self.parents.get(&self.position) {
            Some(&parent) => {
                debug!("select: backtracking from {} to {}", self.position, parent);
                actions.extend(step_actions(self.position, self.facing, parent)?);
                Ok(Decision {
                    actions,
                    destination: Some(parent),
                    kind: DecisionKind::Backtrack,
                })
            }
            None if self.position == self.start => {
                actions.push(Action::Climb);
                Ok(Decision {
                    actions,
                    destination: None,
                    kind: DecisionKind::Climb,
                })
            }
            None => Err(PolicyError::Stranded(self.position)),
        }
    }
}
