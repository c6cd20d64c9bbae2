use crate::common::Action;
use crate::state::GridRobotState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub struct SearchNode {
    pub state: GridRobotState,
    pub g: usize,
    pub h: usize,
    pub f: usize,
    /// Action that produced this node from its predecessor, `None` for the start.
    pub action: Option<Action>,
    pub predecessor: Option<NodeId>,
}

impl SearchNode {
    pub fn new(
        state: GridRobotState,
        g: usize,
        h: usize,
        action: Option<Action>,
        predecessor: Option<NodeId>,
    ) -> Self {
        SearchNode {
            state,
            g,
            h,
            // Dead-end estimates are usize::MAX.
            f: g.saturating_add(h),
            action,
            predecessor,
        }
    }
}

/// Arena owning every node created during a single search. Nodes are never
/// removed, so a `NodeId` stays valid for the lifetime of the tree.
#[derive(Debug, Default)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: SearchNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes from the start to `goal`, following predecessor links.
    pub fn construct_path(&self, goal: NodeId) -> Vec<SearchNode> {
        let mut path = vec![self.get(goal).clone()];
        let mut current = goal;
        while let Some(predecessor) = self.get(current).predecessor {
            path.push(self.get(predecessor).clone());
            current = predecessor;
        }
        path.reverse();
        path
    }
}
