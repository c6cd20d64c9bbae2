use super::closed::ClosedSet;
use super::open::OpenSet;
use crate::common::{SearchNode, SearchResult, SearchTree, Solution};
use crate::heuristic::DEAD_END;
use crate::stat::Stats;
use crate::state::GridRobotState;

use std::time::Instant;
use tracing::{debug, instrument, trace};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Put a closed state back into the open set when a strictly cheaper
    /// path to it shows up. Needed for optimality with an admissible but
    /// inconsistent heuristic.
    pub allow_reopening: bool,
    /// Give up after this many expansions.
    pub max_expansions: Option<usize>,
}

#[instrument(skip_all, name = "a_star", fields(robot = ?start.robot_location(), lamp = ?start.lamp_location(), lamp_height = start.lamp_height()), level = "debug")]
pub fn a_star_search<H>(
    start: &GridRobotState,
    heuristic: H,
    options: &SearchOptions,
    stats: &mut Stats,
) -> SearchResult
where
    H: Fn(&GridRobotState) -> usize,
{
    let search_start_time = Instant::now();
    let mut tree = SearchTree::new();
    let mut open = OpenSet::new();
    let mut closed = ClosedSet::new();
    let mut expanded = 0;

    let start_node = SearchNode::new(start.clone(), 0, heuristic(start), None, None);
    let start_f = start_node.f;
    let start_id = tree.push(start_node);
    open.insert_or_update(start.clone(), start_id, start_f);

    let result = loop {
        if open.is_empty() {
            break SearchResult::Unsolvable;
        }
        let Some(current) = open.extract_min(|id| &tree.get(id).state) else {
            break SearchResult::Unsolvable;
        };
        let current_id = current.node;
        let node = tree.get(current_id);
        debug!(
            "expand node: f {} g {} h {} robot {:?} held {}",
            current.priority,
            node.g,
            node.h,
            node.state.robot_location(),
            node.state.stairs_held()
        );

        if node.state.is_goal() {
            let path = tree.construct_path(current_id);
            for step in &path {
                debug!(
                    "path: g {} robot {:?} held {} action {:?}",
                    step.g,
                    step.state.robot_location(),
                    step.state.stairs_held(),
                    step.action
                );
            }
            break SearchResult::Solved(Solution { nodes: path });
        }

        if options.max_expansions.is_some_and(|limit| expanded >= limit) {
            break SearchResult::ExpansionLimitReached;
        }

        closed.mark_closed(node);
        expanded += 1;
        stats.expanded_nodes += 1;

        let parent_g = node.g;
        for (child, action, cost) in node.state.successors() {
            stats.generated_nodes += 1;
            let g = parent_g + cost;

            if let Some(entry) = open.lookup(&child) {
                if tree.get(entry.node).g <= g {
                    trace!("prune open duplicate {action:?} at g {g}");
                    stats.duplicates_pruned += 1;
                    continue;
                }
            }

            let mut reopen = false;
            if closed.is_closed(&child) {
                let cheaper = closed
                    .closed_g(&child)
                    .is_some_and(|closed_g| g < closed_g);
                if !(options.allow_reopening && cheaper) {
                    trace!("prune closed duplicate {action:?} at g {g}");
                    stats.duplicates_pruned += 1;
                    continue;
                }
                reopen = true;
            }

            let h = heuristic(&child);
            if h == DEAD_END {
                trace!("prune dead end {action:?}");
                stats.dead_ends += 1;
                continue;
            }

            if reopen {
                debug!("reopen closed state at g {g}");
                closed.reopen(&child);
                stats.reopened_nodes += 1;
            }

            let child_node = SearchNode::new(child.clone(), g, h, Some(action), Some(current_id));
            let f = child_node.f;
            let child_id = tree.push(child_node);
            open.insert_or_update(child, child_id, f);
        }
    };

    if let SearchResult::Solved(solution) = &result {
        stats.costs = solution.cost();
    }
    stats.closed_states = closed.len();
    stats.time_us += search_start_time.elapsed().as_micros() as usize;
    debug!(
        "search finished: {} expansions, {} nodes, {} open ({} heap entries), {} closed",
        expanded,
        tree.len(),
        open.len(),
        open.heap_len(),
        closed.len()
    );

    result
}
