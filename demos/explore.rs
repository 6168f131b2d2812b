//! Explores a randomly generated cave.
//!
//! ```bash
//! cargo run --example explore -- --size 6 --seed 7 --dimacs kb.cnf
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use wumpus_kb::agent::Agent;
use wumpus_kb::config::AgentConfig;
use wumpus_kb::episode::{run_episode, EpisodeConfig};
use wumpus_kb::grid::Cell;
use wumpus_kb::symbol::Element;
use wumpus_kb::world::GridWorld;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Side length of the cave.
    #[clap(long, value_name = "INT", default_value = "5")]
    size: usize,

    /// Seed for the cave layout.
    #[clap(long, value_name = "INT", default_value = "42")]
    seed: u64,

    /// Number of pits.
    #[clap(long, value_name = "INT", default_value = "3")]
    pits: usize,

    /// Maximum number of decision rounds.
    #[clap(long, value_name = "INT", default_value = "1000")]
    max_steps: usize,

    /// Write the final knowledge base in DIMACS format.
    #[clap(long, value_name = "FILE")]
    dimacs: Option<PathBuf>,
}

fn random_world(size: usize, pits: usize, rng: &mut impl Rng) -> color_eyre::Result<GridWorld> {
    let start = Cell::new(size.saturating_sub(1), 0);
    let mut world = GridWorld::new(size, start)?;
    let mut cells: Vec<Cell> = Cell::all(size).filter(|&c| c != start).collect();
    cells.shuffle(rng);

    let mut elements = vec![Element::Wumpus, Element::Gold, Element::PoisonousGas, Element::HealingPotion];
    elements.extend(std::iter::repeat(Element::Pit).take(pits));
    for (cell, element) in cells.into_iter().zip(elements) {
        world.place(cell, element)?;
    }
    Ok(world)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut world = random_world(args.size, args.pits, &mut rng)?;
    for element in [Element::Wumpus, Element::Gold, Element::Pit, Element::PoisonousGas, Element::HealingPotion] {
        println!("{}: {:?}", element.name(), world.cells_with(element));
    }

    let start = Cell::new(args.size.saturating_sub(1), 0);
    let mut agent = Agent::new(start, args.size, AgentConfig::default())?;
    let config = EpisodeConfig {
        max_steps: args.max_steps,
    };
    let outcome = run_episode(&mut world, &mut agent, &config)?;

    println!("{}", agent.data_string());
    println!("Visited {} of {} cells", agent.visited().len(), args.size * args.size);
    println!("Dangerous: {}", agent.dangerous_cells_string());
    println!(
        "Won: {}, death: {:?}, steps: {}, score: {}",
        outcome.won, outcome.death, outcome.steps, outcome.score
    );
    println!("stats = {:?}", agent.engine().kb().stats());

    if let Some(path) = &args.dimacs {
        let file = BufWriter::new(File::create(path)?);
        agent.engine().kb().write_dimacs(file)?;
        println!("Wrote {} clauses to {}", agent.engine().kb().num_clauses(), path.display());
    }

    println!("Total time: {:.3} s", time_total.elapsed().as_secs_f64());
    Ok(())
}
