//! Runs the agent through the classic 4x4 cave and prints every decision.

use clap::Parser;

use wumpus_kb::agent::Agent;
use wumpus_kb::config::AgentConfig;
use wumpus_kb::episode::{run_episode, EpisodeConfig};
use wumpus_kb::grid::Cell;
use wumpus_kb::symbol::Element;
use wumpus_kb::world::GridWorld;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Maximum number of decision rounds.
    #[clap(long, value_name = "INT", default_value = "200")]
    max_steps: usize,

    /// Print the knowledge base statistics at the end.
    #[clap(long)]
    stats: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    println!("args = {:?}", args);

    // Bottom-left start, Wumpus two rows up, gold next to it.
    let start = Cell::new(3, 0);
    let mut world = GridWorld::new(4, start)?
        .with(Cell::new(1, 0), Element::Wumpus)?
        .with(Cell::new(1, 1), Element::Gold)?
        .with(Cell::new(3, 2), Element::Pit)?
        .with(Cell::new(1, 2), Element::Pit)?
        .with(Cell::new(0, 3), Element::Pit)?;

    let mut agent = Agent::new(start, 4, AgentConfig::default())?;
    let config = EpisodeConfig {
        max_steps: args.max_steps,
    };
    let outcome = run_episode(&mut world, &mut agent, &config)?;

    for line in &outcome.log {
        println!("{}", line);
    }
    println!("{}", agent.data_string());
    println!("Dangerous: {}", agent.dangerous_cells_string());
    println!(
        "Won: {}, steps: {}, score: {}",
        outcome.won, outcome.steps, outcome.score
    );
    if args.stats {
        println!("stats = {:?}", agent.engine().kb().stats());
    }

    Ok(())
}
