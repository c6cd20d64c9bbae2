use crate::common::NodeId;
use crate::state::GridRobotState;

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Live reference to a node in the open set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OpenEntry {
    pub(crate) node: NodeId,
    pub(crate) priority: usize,
    pub(crate) counter: u64,
}

/// Min-priority frontier keyed by state.
///
/// Updating a state does not touch the heap: the index is pointed at the new
/// entry and the old one turns stale. Stale entries are recognised by their
/// counter no longer matching the index and are dropped when popped.
#[derive(Debug, Default)]
pub(crate) struct OpenSet {
    heap: BinaryHeap<Reverse<(usize, u64, NodeId)>>,
    index: HashMap<GridRobotState, OpenEntry>,
    counter: u64,
}

impl OpenSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert `node` for `state`, superseding any active entry for it.
    /// Equal priorities pop in insertion order.
    pub(crate) fn insert_or_update(
        &mut self,
        state: GridRobotState,
        node: NodeId,
        priority: usize,
    ) {
        let counter = self.counter;
        self.counter += 1;

        self.index.insert(
            state,
            OpenEntry {
                node,
                priority,
                counter,
            },
        );
        self.heap.push(Reverse((priority, counter, node)));
    }

    /// Pop the active entry with the lowest (priority, counter). `state_of`
    /// resolves a node back to its state so its index slot can be released.
    pub(crate) fn extract_min<'a, F>(&mut self, state_of: F) -> Option<OpenEntry>
    where
        F: Fn(NodeId) -> &'a GridRobotState,
    {
        while let Some(Reverse((priority, counter, node))) = self.heap.pop() {
            let state = state_of(node);
            let is_active = self
                .index
                .get(state)
                .is_some_and(|entry| entry.counter == counter);
            if is_active {
                self.index.remove(state);
                return Some(OpenEntry {
                    node,
                    priority,
                    counter,
                });
            }
        }
        None
    }

    pub(crate) fn lookup(&self, state: &GridRobotState) -> Option<OpenEntry> {
        self.index.get(state).copied()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    /// Heap size including stale entries.
    pub(crate) fn heap_len(&self) -> usize {
        self.heap.len()
    }
}
