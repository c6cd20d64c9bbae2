use crate::common::Location;
use crate::state::GridRobotState;

use serde::Deserialize;

/// Estimate for states from which the goal is provably unreachable.
pub const DEAD_END: usize = usize::MAX;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[value(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum HeuristicKind {
    Zero,
    Base,
    Advanced,
}

impl HeuristicKind {
    pub fn function(self) -> fn(&GridRobotState) -> usize {
        match self {
            HeuristicKind::Zero => zero_heuristic,
            HeuristicKind::Base => base_heuristic,
            HeuristicKind::Advanced => advanced_heuristic,
        }
    }
}

fn manhattan(a: Location, b: Location) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

pub fn zero_heuristic(_state: &GridRobotState) -> usize {
    0
}

/// Manhattan distance from the robot to the lamp. Every move costs at least
/// one, so this never overestimates.
pub fn base_heuristic(state: &GridRobotState) -> usize {
    manhattan(state.robot_location(), state.lamp_location())
}

/// Manhattan distance plus a penalty for the height still missing at the
/// lamp and the walk to the nearest stair segment.
///
/// Not admissible: the missing height is charged per unit even though a
/// single pick up or merge moves a whole stack.
pub fn advanced_heuristic(state: &GridRobotState) -> usize {
    let robot = state.robot_location();
    let lamp = state.lamp_location();
    let distance_to_lamp = manhattan(robot, lamp);

    let current_stairs_at_lamp = state.map().get(lamp);
    let stairs_needed =
        (state.lamp_height() - (current_stairs_at_lamp + state.stairs_held())).max(0) as usize;
    if stairs_needed == 0 {
        return distance_to_lamp;
    }

    let mut stairs_penalty = stairs_needed;
    if state.stairs_held() > 0 {
        // Placing what is carried.
        stairs_penalty += 1;
    }

    // No stairs left on the map means the missing height can never be found.
    let Some(nearest_stairs_distance) = state
        .map()
        .stairs()
        .map(|(position, _)| manhattan(robot, position))
        .min()
    else {
        return DEAD_END;
    };

    distance_to_lamp + stairs_penalty + nearest_stairs_distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::HeightMap;

    fn make_state(
        rows: Vec<Vec<i32>>,
        robot: Location,
        lamp: Location,
        lamp_height: i32,
        stairs_held: i32,
    ) -> GridRobotState {
        let map = HeightMap::from_rows(rows).unwrap();
        GridRobotState::new(robot, map, lamp_height, lamp, stairs_held).unwrap()
    }

    #[test]
    fn test_base_heuristic_is_manhattan() {
        let state = make_state(vec![vec![0; 4]; 3], (0, 3), (2, 0), 0, 0);
        assert_eq!(base_heuristic(&state), 5);
        assert_eq!(zero_heuristic(&state), 0);
    }

    #[test]
    fn test_advanced_heuristic_without_missing_height() {
        let state = make_state(vec![vec![0, 0], vec![0, 3]], (0, 0), (1, 1), 3, 0);
        assert_eq!(advanced_heuristic(&state), 2);

        // What is carried already covers the lamp.
        let carrying = make_state(vec![vec![0, 0], vec![0, 0]], (0, 0), (1, 1), 3, 3);
        assert_eq!(advanced_heuristic(&carrying), 2);
    }

    #[test]
    fn test_advanced_heuristic_penalties() {
        // 2 to the lamp, 3 missing, nearest stair 1 away.
        let empty_handed = make_state(vec![vec![0, 3], vec![0, 0]], (0, 0), (1, 1), 3, 0);
        assert_eq!(advanced_heuristic(&empty_handed), 2 + 3 + 1);

        // 1 to the lamp, 2 missing plus placement, nearest stair under the robot.
        let carrying = make_state(vec![vec![0, 2], vec![0, 0]], (0, 1), (1, 1), 3, 1);
        assert_eq!(advanced_heuristic(&carrying), 1 + 2 + 1);
    }

    #[test]
    fn test_advanced_heuristic_dead_end() {
        let state = make_state(vec![vec![0, 0], vec![0, 0]], (0, 0), (1, 1), 5, 4);
        assert_eq!(advanced_heuristic(&state), DEAD_END);
    }

    #[test]
    fn test_heuristic_kind_mapping() {
        let state = make_state(vec![vec![0, 3], vec![0, 0]], (0, 0), (1, 1), 3, 0);
        assert_eq!(HeuristicKind::Zero.function()(&state), 0);
        assert_eq!(HeuristicKind::Base.function()(&state), 2);
        assert_eq!(HeuristicKind::Advanced.function()(&state), 6);
    }
}
