use crate::common::{Action, Location, StateError};
use crate::map::HeightMap;

use std::hash::{Hash, Hasher};

/// Snapshot of the puzzle: where the robot stands, what it carries, and the
/// stairs on the map. The lamp fields are fixed for a whole search.
///
/// Equality and hashing only look at the robot location, the carried
/// height and the map contents; that triple identifies a search state.
#[derive(Debug, Clone)]
pub struct GridRobotState {
    robot_location: Location,
    map: HeightMap,
    lamp_height: i32,
    lamp_location: Location,
    stairs_held: i32,
}

impl GridRobotState {
    pub fn new(
        robot_location: Location,
        map: HeightMap,
        lamp_height: i32,
        lamp_location: Location,
        stairs_held: i32,
    ) -> Result<Self, StateError> {
        for (what, location) in [("robot", robot_location), ("lamp", lamp_location)] {
            if !map.in_bounds(location) {
                return Err(StateError::OutOfBounds {
                    what,
                    location,
                    height: map.height,
                    width: map.width,
                });
            }
        }
        if !map.is_passable(robot_location.0, robot_location.1) {
            return Err(StateError::RobotOnObstacle {
                location: robot_location,
            });
        }
        if lamp_height < 0 {
            return Err(StateError::NegativeHeight {
                what: "lamp height",
                value: lamp_height,
            });
        }
        if stairs_held < 0 {
            return Err(StateError::NegativeHeight {
                what: "stairs held",
                value: stairs_held,
            });
        }

        Ok(GridRobotState {
            robot_location,
            map,
            lamp_height,
            lamp_location,
            stairs_held,
        })
    }

    pub fn robot_location(&self) -> Location {
        self.robot_location
    }

    pub fn map(&self) -> &HeightMap {
        &self.map
    }

    pub fn lamp_height(&self) -> i32 {
        self.lamp_height
    }

    pub fn lamp_location(&self) -> Location {
        self.lamp_location
    }

    pub fn stairs_held(&self) -> i32 {
        self.stairs_held
    }

    pub fn is_goal(&self) -> bool {
        self.robot_location == self.lamp_location
            && self.map.get(self.lamp_location) == self.lamp_height
    }

    fn child(&self, robot_location: Location, map: HeightMap, stairs_held: i32) -> Self {
        GridRobotState {
            robot_location,
            map,
            lamp_height: self.lamp_height,
            lamp_location: self.lamp_location,
            stairs_held,
        }
    }

    /// Every legal successor with the action producing it and its cost.
    pub fn successors(&self) -> Vec<(GridRobotState, Action, usize)> {
        let mut successors = Vec::new();
        let (x, y) = self.robot_location;
        let cell = self.map.get(self.robot_location);

        // Carrying a stack makes every step more expensive.
        let move_cost = 1 + self.stairs_held as usize;
        for (direction, neighbor) in self.map.get_neighbors(x, y) {
            successors.push((
                self.child(neighbor, self.map.clone(), self.stairs_held),
                Action::Move(direction),
                move_cost,
            ));
        }

        if self.stairs_held == 0 && cell > 0 {
            successors.push((
                self.child(self.robot_location, self.map.with_cell((x, y), 0), cell),
                Action::PickUp,
                1,
            ));
        }

        if self.stairs_held > 0 && cell == 0 {
            successors.push((
                self.child(
                    self.robot_location,
                    self.map.with_cell((x, y), self.stairs_held),
                    0,
                ),
                Action::Drop,
                1,
            ));
        }

        // A stack taller than the lamp can never be lowered again.
        let combined = self.stairs_held + cell;
        if self.stairs_held > 0 && cell > 0 && combined <= self.lamp_height {
            successors.push((
                self.child(self.robot_location, self.map.with_cell((x, y), combined), 0),
                Action::MergeIntoCell,
                1,
            ));
            successors.push((
                self.child(self.robot_location, self.map.with_cell((x, y), 0), combined),
                Action::MergeIntoCarry,
                1,
            ));
        }

        successors
    }
}

impl PartialEq for GridRobotState {
    fn eq(&self, other: &Self) -> bool {
        self.robot_location == other.robot_location
            && self.stairs_held == other.stairs_held
            && self.map == other.map
    }
}

impl Eq for GridRobotState {}

impl Hash for GridRobotState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.robot_location.hash(state);
        self.stairs_held.hash(state);
        self.map.hash(state);
    }
}
