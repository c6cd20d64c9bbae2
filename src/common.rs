mod node;

pub use node::{NodeId, SearchNode, SearchTree};

use std::fmt;
use thiserror::Error;

pub type Location = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Left,
    Down,
    Up,
}

impl Direction {
    /// Expansion order of move actions.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    /// (row, col) offset.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Right => (0, 1),
            Direction::Left => (0, -1),
            Direction::Down => (1, 0),
            Direction::Up => (-1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Move(Direction),
    PickUp,
    Drop,
    /// Carried stairs are stacked onto the cell; the robot ends empty-handed.
    MergeIntoCell,
    /// The cell's stairs are stacked onto the carried ones; the cell ends empty.
    MergeIntoCarry,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move(direction) => write!(f, "move {direction:?}"),
            Action::PickUp => write!(f, "pick up"),
            Action::Drop => write!(f, "drop"),
            Action::MergeIntoCell => write!(f, "merge into cell"),
            Action::MergeIntoCarry => write!(f, "merge into carry"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("map must have at least one row and one column")]
    EmptyMap,
    #[error("map row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("cell {position:?} has invalid height {value}")]
    InvalidCell { position: Location, value: i32 },
    #[error("{what} location {location:?} is outside the {height}x{width} map")]
    OutOfBounds {
        what: &'static str,
        location: Location,
        height: usize,
        width: usize,
    },
    #[error("robot cannot start on the obstacle at {location:?}")]
    RobotOnObstacle { location: Location },
    #[error("{what} must be non-negative, got {value}")]
    NegativeHeight { what: &'static str, value: i32 },
}

#[derive(Debug, Clone)]
pub struct Solution {
    /// Start node first, goal node last.
    pub nodes: Vec<SearchNode>,
}

impl Solution {
    pub fn cost(&self) -> usize {
        self.nodes.last().map_or(0, |node| node.g)
    }

    pub fn actions(&self) -> Vec<Action> {
        self.nodes.iter().filter_map(|node| node.action).collect()
    }

    /// Every step must be one legal action whose cost matches the g increase,
    /// and the last node must satisfy the goal.
    pub fn verify(&self) -> bool {
        let Some(first) = self.nodes.first() else {
            return false;
        };
        if first.g != 0 || first.action.is_some() {
            return false;
        }

        for pair in self.nodes.windows(2) {
            let (parent, child) = (&pair[0], &pair[1]);
            let Some(action) = child.action else {
                return false;
            };
            let legal = parent
                .state
                .successors()
                .into_iter()
                .any(|(state, successor_action, cost)| {
                    successor_action == action
                        && state == child.state
                        && parent.g + cost == child.g
                });
            if !legal {
                return false;
            }
        }

        self.nodes
            .last()
            .is_some_and(|node| node.state.is_goal())
    }
}

#[derive(Debug, Clone)]
pub enum SearchResult {
    Solved(Solution),
    /// The open set ran dry without reaching the goal.
    Unsolvable,
    ExpansionLimitReached,
}

impl SearchResult {
    pub fn solution(self) -> Option<Solution> {
        match self {
            SearchResult::Solved(solution) => Some(solution),
            _ => None,
        }
    }
}
