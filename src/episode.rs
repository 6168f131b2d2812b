//! Headless perceive/decide/act loop.

use log::{debug, info, warn};

use crate::agent::Agent;
use crate::error::PolicyError;
use crate::symbol::Element;
use crate::world::Environment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeConfig {
    /// Upper bound on decision rounds before the episode is cut off.
    pub max_steps: usize,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self { max_steps: 1000 }
    }
}

/// How an episode ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub steps: usize,
    pub score: i64,
    pub health: u32,
    pub won: bool,
    pub death: Option<Element>,
    pub truncated: bool,
    /// Every executed decision as `(x, y): ACTION` lines.
    pub log: Vec<String>,
}

impl Outcome {
    pub fn is_dead(&self) -> bool {
        self.health == 0
    }
}

pub fn run_episode<E: Environment + ?Sized>(
    env: &mut E,
    agent: &mut Agent,
    config: &EpisodeConfig,
) -> Result<Outcome, PolicyError> {
    let mut steps = 0;
    let mut log = Vec::new();
    let mut truncated = false;

    while !agent.is_game_over() && !agent.is_game_won() {
        if steps >= config.max_steps {
            warn!("Episode cut off after {} steps", steps);
            truncated = true;
            break;
        }

        let position = agent.position();
        let percepts = env.percepts(position);
        let element = env.element(position);
        let actions = agent.choose_action(&percepts, element)?;
        log.extend(agent.action_log_lines());

        let event = env.update(agent, &actions);
        agent.update_knowledge(event);
        steps += 1;
        debug!("step {}: {}", steps, agent.data_string());
    }

    let outcome = Outcome {
        steps,
        score: agent.score(),
        health: agent.health(),
        won: agent.is_game_won(),
        death: agent.death(),
        truncated,
        log,
    };
    info!(
        "Episode finished after {} steps: won={}, score={}, health={}",
        outcome.steps, outcome.won, outcome.score, outcome.health
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::config::AgentConfig;
    use crate::grid::Cell;
    use crate::world::GridWorld;

    fn c(row: usize, col: usize) -> Cell {
        Cell::new(row, col)
    }

    #[test]
    fn test_empty_cave_is_explored_and_left() {
        let mut world = GridWorld::new(2, c(1, 0)).unwrap();
        let mut agent = Agent::new(c(1, 0), 2, AgentConfig::default()).unwrap();
        let outcome = run_episode(&mut world, &mut agent, &EpisodeConfig::default()).unwrap();
        assert!(outcome.won);
        assert!(!outcome.truncated);
        assert_eq!(outcome.death, None);
        assert_eq!(agent.visited().len(), 4);
        assert_eq!(agent.position(), c(1, 0));
        assert_eq!(outcome.log.last().map(String::as_str), Some("(1, 0): CLIMB"));
    }

    #[test]
    fn test_step_limit() {
        let mut world = GridWorld::new(3, c(2, 0)).unwrap();
        let mut agent = Agent::new(c(2, 0), 3, AgentConfig::default()).unwrap();
        let config = EpisodeConfig { max_steps: 2 };
        let outcome = run_episode(&mut world, &mut agent, &config).unwrap();
        assert!(outcome.truncated);
        assert!(!outcome.won);
        assert_eq!(outcome.steps, 2);
    }

    #[test]
    fn test_gold_next_to_start() {
        let mut world = GridWorld::new(2, c(1, 0)).unwrap().with(c(0, 0), Element::Gold).unwrap();
        let mut agent = Agent::new(c(1, 0), 2, AgentConfig::default()).unwrap();
        let outcome = run_episode(&mut world, &mut agent, &EpisodeConfig::default()).unwrap();
        assert!(outcome.won);
        assert!(agent.grabbed_gold().contains(&c(0, 0)));
        assert!(outcome.score > 4000);
        assert!(outcome.log.iter().any(|line| line == "(0, 0): GRAB"));
    }
}
