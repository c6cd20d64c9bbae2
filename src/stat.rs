use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    pub costs: usize,
    pub time_us: usize,
    pub expanded_nodes: usize,
    pub generated_nodes: usize,
    pub duplicates_pruned: usize,
    pub dead_ends: usize,
    pub reopened_nodes: usize,
    pub closed_states: usize,
}

impl Stats {
    pub fn print(&self) {
        info!(
            "Cost {:?} Time(microseconds) {:?} Expanded nodes: {:?} Generated nodes: {:?} Pruned duplicates: {:?} Dead ends: {:?} Reopened nodes: {:?}",
            self.costs,
            self.time_us,
            self.expanded_nodes,
            self.generated_nodes,
            self.duplicates_pruned,
            self.dead_ends,
            self.reopened_nodes
        );
    }
}
