use anyhow::anyhow;
use clap::Parser;
use serde::Deserialize;

use crate::algorithm::SearchOptions;
use crate::heuristic::HeuristicKind;
use crate::scenario::{RandomScenario, Scenario};

#[derive(Parser, Debug)]
#[command(
    name = "Stair Robot",
    about = "A* search for the stair carrying robot puzzle.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(long, help = "Path to the YAML config file")]
    pub config: Option<String>,

    #[arg(long, value_enum, help = "Heuristic to guide the search")]
    pub heuristic: Option<HeuristicKind>,

    #[arg(
        long,
        help = "Reopen closed states when a cheaper path is found",
        default_value_t = false
    )]
    pub allow_reopening: bool,

    #[arg(long, help = "Maximum number of node expansions")]
    pub max_expansions: Option<usize>,

    #[arg(long, help = "Seed for the random scenario generator")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub heuristic: HeuristicKind,
    pub allow_reopening: bool,
    pub max_expansions: Option<usize>,
    pub seed: u64,
    /// Solved as given; a random scenario is generated when absent.
    pub puzzle: Option<Scenario>,
    pub random: RandomScenario,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            heuristic: HeuristicKind::Base,
            allow_reopening: false,
            max_expansions: None,
            seed: 0,
            puzzle: None,
            random: RandomScenario::default(),
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn override_from_command_line(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if let Some(heuristic) = cli.heuristic {
            self.heuristic = heuristic;
        }
        if cli.allow_reopening {
            self.allow_reopening = true;
        }
        if let Some(max_expansions) = cli.max_expansions {
            self.max_expansions = Some(max_expansions);
        }
        if let Some(seed) = cli.seed {
            self.seed = seed;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_expansions == Some(0) {
            return Err(anyhow!("Max expansions must be at least 1, got 0"));
        }

        if let Some(puzzle) = &self.puzzle {
            puzzle.to_state()?;
        } else if self.random.rows == 0 || self.random.cols == 0 {
            return Err(anyhow!(
                "Random map must have at least one row and column, got {}x{}",
                self.random.rows,
                self.random.cols
            ));
        }
        Ok(())
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            allow_reopening: self.allow_reopening,
            max_expansions: self.max_expansions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("stair_robot").chain(args.iter().copied()))
    }

    #[test]
    fn test_read_config() {
        let yaml = "
heuristic: advanced
max_expansions: 1000
puzzle:
  map:
    - [0, 3]
    - [0, 0]
  robot: [0, 0]
  lamp: [1, 1]
  lamp_height: 3
";
        let config = Config::from_yaml_str(yaml).unwrap();
        assert_eq!(config.heuristic, HeuristicKind::Advanced);
        assert!(!config.allow_reopening);
        assert_eq!(config.max_expansions, Some(1000));
        assert_eq!(config.random, RandomScenario::default());
        assert!(config.validate().is_ok());

        let puzzle = config.puzzle.unwrap();
        assert_eq!(puzzle.lamp, [1, 1]);
    }

    #[test]
    fn test_reject_unknown_field() {
        assert!(Config::from_yaml_str("heuristics: base").is_err());
    }

    #[test]
    fn test_override_from_command_line() {
        let config = Config::default()
            .override_from_command_line(&cli(&[
                "--heuristic",
                "zero",
                "--allow-reopening",
                "--seed",
                "9",
            ]))
            .unwrap();
        assert_eq!(config.heuristic, HeuristicKind::Zero);
        assert_eq!(config.seed, 9);
        assert_eq!(
            config.search_options(),
            SearchOptions {
                allow_reopening: true,
                max_expansions: None,
            }
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(Config::default()
            .override_from_command_line(&cli(&["--max-expansions", "0"]))
            .is_err());

        let config = Config {
            puzzle: Some(Scenario {
                map: vec![vec![0, 0]],
                robot: [0, 5],
                lamp: [0, 1],
                lamp_height: 0,
                stairs_held: 0,
            }),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
