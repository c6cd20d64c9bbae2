use stair_robot::algorithm::a_star_search;
use stair_robot::common::SearchResult;
use stair_robot::config::{Cli, Config};
use stair_robot::stat::Stats;

use anyhow::{bail, Context};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    let config = if let Some(config_file) = cli.config.as_ref() {
        let config_str = std::fs::read_to_string(config_file)
            .with_context(|| format!("error reading config file: {config_file}"))?;
        Config::from_yaml_str(&config_str)
            .with_context(|| format!("error with config file: {config_file}"))?
    } else {
        info!("No config file specified, using default config");
        Config::default()
    }
    .override_from_command_line(&cli)?;

    let scenario = match &config.puzzle {
        Some(puzzle) => puzzle.clone(),
        None => {
            let mut rng = StdRng::seed_from_u64(config.seed);
            config.random.generate(&mut rng)?
        }
    };
    let start = scenario.to_state().context("invalid puzzle")?;
    info!(
        "Solve: robot {:?} lamp {:?} lamp height {} with {:?} heuristic",
        start.robot_location(),
        start.lamp_location(),
        start.lamp_height(),
        config.heuristic
    );

    let mut stats = Stats::default();
    let result = a_star_search(
        &start,
        config.heuristic.function(),
        &config.search_options(),
        &mut stats,
    );
    stats.print();

    match result {
        SearchResult::Solved(solution) => {
            for node in &solution.nodes {
                match node.action {
                    Some(action) => info!(
                        "{action} -> robot {:?} held {} (g {})",
                        node.state.robot_location(),
                        node.state.stairs_held(),
                        node.g
                    ),
                    None => info!(
                        "start at {:?} held {}",
                        node.state.robot_location(),
                        node.state.stairs_held()
                    ),
                }
            }
            if !solution.verify() {
                bail!("search returned an inconsistent path");
            }
            info!("Solved with cost {}", solution.cost());
        }
        SearchResult::Unsolvable => error!("No path found: the lamp height cannot be reached"),
        SearchResult::ExpansionLimitReached => {
            warn!("Gave up after {} expansions", stats.expanded_nodes)
        }
    }

    Ok(())
}
