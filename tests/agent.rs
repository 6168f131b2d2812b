//! End-to-end tests: the agent exploring ground-truth caves.
//!
//! Tests cover the textbook cave, safety over random layouts, exhaustion,
//! and the monotonicity of what the agent has proven.

use std::collections::HashSet;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use test_log::test;

use wumpus_kb::agent::Agent;
use wumpus_kb::config::AgentConfig;
use wumpus_kb::episode::{run_episode, EpisodeConfig};
use wumpus_kb::grid::Cell;
use wumpus_kb::symbol::Element;
use wumpus_kb::world::{Environment, GridWorld};

fn c(row: usize, col: usize) -> Cell {
    Cell::new(row, col)
}

fn textbook() -> (GridWorld, Agent) {
    let start = c(3, 0);
    let world = GridWorld::new(4, start)
        .and_then(|w| w.with(c(1, 0), Element::Wumpus))
        .and_then(|w| w.with(c(1, 1), Element::Gold))
        .and_then(|w| w.with(c(3, 2), Element::Pit))
        .and_then(|w| w.with(c(1, 2), Element::Pit))
        .and_then(|w| w.with(c(0, 3), Element::Pit))
        .unwrap();
    let agent = Agent::new(start, 4, AgentConfig::default()).unwrap();
    (world, agent)
}

fn random_world(size: usize, seed: u64) -> GridWorld {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let start = c(size - 1, 0);
    let mut world = GridWorld::new(size, start).unwrap();
    let mut cells: Vec<Cell> = Cell::all(size).filter(|&cell| cell != start).collect();
    cells.shuffle(&mut rng);

    let pits = rng.random_range(1..=3);
    let mut elements = vec![Element::Wumpus, Element::Gold, Element::PoisonousGas, Element::HealingPotion];
    elements.extend(std::iter::repeat(Element::Pit).take(pits));
    for (cell, element) in cells.into_iter().zip(elements) {
        world.place(cell, element).unwrap();
    }
    world
}

// ─── Textbook Cave ─────────────────────────────────────────────────────────────

#[test]
fn textbook_cave_is_won_with_gold() {
    let (mut world, mut agent) = textbook();
    let outcome = run_episode(&mut world, &mut agent, &EpisodeConfig::default()).unwrap();

    assert!(outcome.won);
    assert_eq!(outcome.death, None);
    assert_eq!(outcome.health, 100);
    assert!(agent.grabbed_gold().contains(&c(1, 1)));
    assert!(outcome.score > 4000);
    assert_eq!(agent.position(), c(3, 0));
}

#[test]
fn textbook_cave_marks_proven_hazards() {
    let (mut world, mut agent) = textbook();
    run_episode(&mut world, &mut agent, &EpisodeConfig::default()).unwrap();

    assert!(agent.dangerous().contains(&(Element::Wumpus, c(1, 0))));
    assert!(agent.dangerous().contains(&(Element::Pit, c(3, 2))));
    for &(element, cell) in agent.dangerous() {
        assert_eq!(world.at(cell), element, "wrongly marked {} at {}", element, cell);
    }
}

#[test]
fn first_decision_in_textbook_cave() {
    let (world, mut agent) = textbook();
    let start = world.agent_start();
    let actions = agent
        .choose_action(&world.percepts(start), world.element(start))
        .unwrap();
    // Quiet start: both neighbors are safe, north comes first.
    assert_eq!(actions, vec![wumpus_kb::policy::Action::Forward]);
    assert!(agent.engine_mut().is_safe(c(2, 0)));
    assert!(agent.engine_mut().is_safe(c(3, 1)));
}

// ─── Safety ────────────────────────────────────────────────────────────────────

#[test]
fn agent_never_steps_onto_a_hazard() {
    for seed in 0..40 {
        let size = 3 + (seed as usize % 3);
        let mut world = random_world(size, seed);
        let start = world.agent_start();
        let mut agent = Agent::new(start, size, AgentConfig::default()).unwrap();
        let outcome = run_episode(&mut world, &mut agent, &EpisodeConfig::default()).unwrap();

        assert_eq!(outcome.death, None, "seed {}", seed);
        assert_eq!(outcome.health, 100, "seed {}", seed);
        assert!(!outcome.truncated, "seed {}", seed);
        assert!(outcome.won, "seed {}", seed);
        assert_eq!(agent.position(), start, "seed {}", seed);

        for &cell in agent.visited() {
            assert!(!world.at(cell).is_hazard(), "seed {}: visited {}", seed, cell);
        }
        for cell in Cell::all(size) {
            if world.at(cell).is_hazard() {
                assert!(!agent.engine_mut().is_safe(cell), "seed {}: {} proven safe", seed, cell);
            }
        }
    }
}

#[test]
fn proven_hazards_are_real() {
    for seed in 100..120 {
        let mut world = random_world(4, seed);
        let start = world.agent_start();
        let mut agent = Agent::new(start, 4, AgentConfig::default()).unwrap();
        run_episode(&mut world, &mut agent, &EpisodeConfig::default()).unwrap();
        for &(element, cell) in agent.dangerous() {
            assert_eq!(world.at(cell), element, "seed {}", seed);
        }
    }
}

// ─── Exhaustion ────────────────────────────────────────────────────────────────

#[test]
fn empty_cave_is_fully_explored() {
    let start = c(2, 0);
    let mut world = GridWorld::new(3, start).unwrap();
    let mut agent = Agent::new(start, 3, AgentConfig::default()).unwrap();
    let outcome = run_episode(&mut world, &mut agent, &EpisodeConfig::default()).unwrap();

    assert!(outcome.won);
    assert_eq!(agent.visited().len(), 9);
    assert_eq!(agent.position(), start);
    assert!(agent.dangerous().is_empty());
}

#[test]
fn boxed_in_start_climbs_immediately() {
    // A breeze at the start leaves both neighbors unproven.
    let start = c(1, 0);
    let mut world = GridWorld::new(2, start).unwrap().with(c(0, 0), Element::Pit).unwrap();
    let mut agent = Agent::new(start, 2, AgentConfig::default()).unwrap();
    let outcome = run_episode(&mut world, &mut agent, &EpisodeConfig::default()).unwrap();

    assert!(outcome.won);
    assert_eq!(outcome.steps, 1);
    assert_eq!(outcome.log, vec!["(1, 0): CLIMB".to_string()]);
    assert_eq!(outcome.score, 10);
}

// ─── Knowledge Base Properties ─────────────────────────────────────────────────

#[test]
fn proven_safety_is_never_retracted() {
    let (mut world, mut agent) = textbook();
    let n = world.size();
    let mut proven: HashSet<Cell> = HashSet::new();

    while !agent.is_game_over() && !agent.is_game_won() {
        let position = agent.position();
        let actions = agent
            .choose_action(&world.percepts(position), world.element(position))
            .unwrap();
        let event = world.update(&mut agent, &actions);
        agent.update_knowledge(event);

        for &cell in &proven {
            assert!(agent.engine_mut().is_safe(cell), "{} lost its proof", cell);
        }
        for cell in Cell::all(n) {
            if agent.engine_mut().is_safe(cell) {
                proven.insert(cell);
            }
        }
    }
    assert!(proven.contains(&c(3, 0)));
}

#[test]
fn inference_reaches_a_fixpoint() {
    let (mut world, mut agent) = textbook();
    run_episode(&mut world, &mut agent, &EpisodeConfig::default()).unwrap();

    let kb = agent.engine_mut().kb_mut();
    let clauses = kb.num_clauses();
    assert!(kb.infer_hazards().is_empty());
    assert_eq!(kb.num_clauses(), clauses);
}
