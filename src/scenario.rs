use anyhow::{bail, Result};
use rand::prelude::*;
use serde::Deserialize;
use tracing::info;

use crate::common::StateError;
use crate::map::{HeightMap, OBSTACLE};
use crate::state::GridRobotState;

/// A puzzle as written in a config file. Locations are `[row, col]`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Scenario {
    pub map: Vec<Vec<i32>>,
    pub robot: [usize; 2],
    pub lamp: [usize; 2],
    pub lamp_height: i32,
    #[serde(default)]
    pub stairs_held: i32,
}

impl Scenario {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_state(&self) -> Result<GridRobotState, StateError> {
        let map = HeightMap::from_rows(self.map.clone())?;
        GridRobotState::new(
            (self.robot[0], self.robot[1]),
            map,
            self.lamp_height,
            (self.lamp[0], self.lamp[1]),
            self.stairs_held,
        )
    }
}

/// Parameters for drawing a random puzzle.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RandomScenario {
    pub rows: usize,
    pub cols: usize,
    pub stairs: usize,
    pub max_stair_height: i32,
    pub obstacles: usize,
    /// Drawn from `1..=` the total stair height when absent.
    pub lamp_height: Option<i32>,
}

impl Default for RandomScenario {
    fn default() -> Self {
        RandomScenario {
            rows: 4,
            cols: 4,
            stairs: 3,
            max_stair_height: 2,
            obstacles: 2,
            lamp_height: None,
        }
    }
}

impl RandomScenario {
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Scenario> {
        let cells = self.rows * self.cols;
        if cells < self.obstacles + self.stairs + 2 {
            bail!(
                "a {}x{} map cannot hold {} obstacles, {} stairs, the robot and the lamp",
                self.rows,
                self.cols,
                self.obstacles,
                self.stairs
            );
        }
        if self.stairs > 0 && self.max_stair_height < 1 {
            bail!(
                "max stair height must be at least 1, got {}",
                self.max_stair_height
            );
        }

        let mut positions: Vec<(usize, usize)> = (0..self.rows)
            .flat_map(|x| (0..self.cols).map(move |y| (x, y)))
            .collect();
        positions.shuffle(rng);

        let mut map = vec![vec![0; self.cols]; self.rows];
        let mut free = positions.into_iter();
        for (x, y) in free.by_ref().take(self.obstacles) {
            map[x][y] = OBSTACLE;
        }

        // Robot and lamp take the next two cells, stairs may share them.
        let robot = free.next().map(|(x, y)| [x, y]);
        let lamp = free.next().map(|(x, y)| [x, y]);
        let (Some(robot), Some(lamp)) = (robot, lamp) else {
            bail!("ran out of free cells unexpectedly");
        };

        let mut stair_cells: Vec<(usize, usize)> = free.collect();
        stair_cells.push((robot[0], robot[1]));
        stair_cells.push((lamp[0], lamp[1]));
        stair_cells.shuffle(rng);

        let mut total_height = 0;
        for &(x, y) in stair_cells.iter().take(self.stairs) {
            let height = rng.gen_range(1..=self.max_stair_height);
            map[x][y] = height;
            total_height += height;
        }

        let lamp_height = match self.lamp_height {
            Some(lamp_height) => lamp_height,
            None if total_height > 0 => rng.gen_range(1..=total_height),
            None => 0,
        };

        let scenario = Scenario {
            map,
            robot,
            lamp,
            lamp_height,
            stairs_held: 0,
        };
        info!("Generate scenario: {scenario:?}");
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn test_read_scenario() {
        let yaml = "
map:
  - [0, 3]
  - [0, 0]
robot: [0, 0]
lamp: [1, 1]
lamp_height: 3
";
        let scenario = Scenario::from_yaml_str(yaml).unwrap();
        assert_eq!(scenario.map, vec![vec![0, 3], vec![0, 0]]);
        assert_eq!(scenario.stairs_held, 0);

        let state = scenario.to_state().unwrap();
        assert_eq!(state.robot_location(), (0, 0));
        assert_eq!(state.lamp_location(), (1, 1));
        assert_eq!(state.lamp_height(), 3);
    }

    #[test]
    fn test_reject_malformed_location() {
        let yaml = "
map: [[0, 0]]
robot: [0, 0, 1]
lamp: [0, 1]
lamp_height: 0
";
        assert!(Scenario::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn test_reject_ragged_map() {
        let scenario = Scenario {
            map: vec![vec![0, 0], vec![0]],
            robot: [0, 0],
            lamp: [0, 1],
            lamp_height: 0,
            stairs_held: 0,
        };
        assert!(matches!(
            scenario.to_state(),
            Err(StateError::RaggedRow { row: 1, .. })
        ));
    }

    #[test]
    fn test_generate_random_scenario() {
        let mut rng = StdRng::seed_from_u64(7);
        let generator = RandomScenario::default();

        for _ in 0..20 {
            let scenario = generator.generate(&mut rng).unwrap();
            let state = scenario.to_state().unwrap();
            let map = state.map();

            let obstacles = map.to_rows().iter().flatten().filter(|&&v| v == OBSTACLE).count();
            let stairs: Vec<_> = map.stairs().collect();
            let total: i32 = stairs.iter().map(|(_, height)| height).sum();

            assert_eq!(obstacles, generator.obstacles);
            assert_eq!(stairs.len(), generator.stairs);
            assert!(stairs.iter().all(|&(_, h)| (1..=2).contains(&h)));
            assert!((1..=total).contains(&state.lamp_height()));
            assert!(map.is_passable(scenario.robot[0], scenario.robot[1]));
            assert!(map.is_passable(scenario.lamp[0], scenario.lamp[1]));
            assert_ne!(scenario.robot, scenario.lamp);
        }
    }

    #[test]
    fn test_generate_rejects_crowded_map() {
        let generator = RandomScenario {
            rows: 2,
            cols: 2,
            stairs: 2,
            obstacles: 1,
            ..RandomScenario::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(generator.generate(&mut rng).is_err());
    }
}
