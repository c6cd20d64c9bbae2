use crate::common::SearchNode;
use crate::state::GridRobotState;

use std::collections::HashMap;

/// States that have been fully expanded, with the g they were expanded at.
#[derive(Debug, Default)]
pub(crate) struct ClosedSet {
    closed: HashMap<GridRobotState, usize>,
}

impl ClosedSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn mark_closed(&mut self, node: &SearchNode) {
        self.closed.insert(node.state.clone(), node.g);
    }

    pub(crate) fn is_closed(&self, state: &GridRobotState) -> bool {
        self.closed.contains_key(state)
    }

    pub(crate) fn closed_g(&self, state: &GridRobotState) -> Option<usize> {
        self.closed.get(state).copied()
    }

    /// Only used when reopening is enabled.
    pub(crate) fn reopen(&mut self, state: &GridRobotState) -> bool {
        self.closed.remove(state).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.closed.len()
    }
}
