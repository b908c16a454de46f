use crate::algorithms::common::NeighborRule;
use crate::config::Costs;
use crate::graph::NodeGraph;
use crate::grid::Coord;
use crate::node::NodeId;
use tracing::{debug, trace};

/// Result of a successful search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Nodes from start to goal, both included.
    pub path: Vec<NodeId>,
    /// Accumulated edge cost of `path`.
    pub cost: u32,
    /// Number of nodes moved to the closed list.
    pub expanded: usize,
}

/// Finds the cheapest path from `start` to `goal` under `rule`.
///
/// # Arguments
///
/// * `graph` - The node graph; all search state in it is reset first.
/// * `rule` - Movement model supplying successors and endpoint policy.
/// * `costs` - Weights for both the edge cost and the heuristic.
/// * `start` - Grid coordinate of the first node.
/// * `goal` - Grid coordinate of the last node.
///
/// # Returns
///
/// `None` when an endpoint has no node, when the start is not walkable, when
/// the rule rejects the goal, or when the open list runs dry before the goal
/// is popped.
pub fn find_path(
    graph: &mut NodeGraph,
    rule: &dyn NeighborRule,
    costs: Costs,
    start: Coord,
    goal: Coord,
) -> Option<SearchOutcome> {
    graph.reset(rule.uses_virtual_nodes());

    let Some(start_id) = rule.lookup(graph, start) else {
        debug!(%start, rule = rule.name(), "start does not resolve to a node");
        return None;
    };
    if !graph.node(start_id).is_walkable {
        debug!(%start, rule = rule.name(), "start is inside a solid tile");
        return None;
    }
    let Some(goal_id) = rule.lookup(graph, goal) else {
        debug!(%goal, rule = rule.name(), "goal does not resolve to a node");
        return None;
    };
    if !rule.accepts_goal(graph, goal_id) {
        debug!(%goal, rule = rule.name(), "goal has nowhere to stand");
        return None;
    }

    let mut open = vec![start_id];
    let mut in_open = vec![false; graph.len()];
    let mut closed = vec![false; graph.len()];
    in_open[start_id.index()] = true;
    graph
        .node_mut(start_id)
        .set_costs(0, costs.distance(start, goal));

    let mut candidates = Vec::with_capacity(8);
    let mut expanded = 0;

    while let Some(slot) = lowest_f(graph, &open) {
        let current = open[slot];
        if current == goal_id {
            let cost = graph.node(goal_id).g();
            let path = reconstruct_path(graph, goal_id);
            debug!(
                rule = rule.name(),
                %start,
                %goal,
                cost,
                expanded,
                steps = path.len(),
                "path found"
            );
            return Some(SearchOutcome {
                path,
                cost,
                expanded,
            });
        }

        open.remove(slot);
        in_open[current.index()] = false;
        closed[current.index()] = true;
        expanded += 1;

        let current_at = graph.node(current).coord();
        let current_g = graph.node(current).g();
        trace!(at = %current_at, g = current_g, open = open.len(), "expanding");

        candidates.clear();
        rule.neighbors(graph, current, &mut candidates);

        for &next in &candidates {
            let node = graph.node(next);
            if closed[next.index()] || !node.is_walkable {
                continue;
            }

            let next_at = node.coord();
            let tentative = current_g.saturating_add(costs.distance(current_at, next_at));
            if tentative < node.g() || !in_open[next.index()] {
                let h = costs.distance(next_at, goal);
                let node = graph.node_mut(next);
                node.set_previous(Some(current));
                node.set_costs(tentative, h);

                if !in_open[next.index()] {
                    in_open[next.index()] = true;
                    open.push(next);
                }
            }
        }
    }

    debug!(rule = rule.name(), %start, %goal, expanded, "goal unreachable");
    None
}

/// Slot of the open entry with the lowest `f`; the first one wins ties.
fn lowest_f(graph: &NodeGraph, open: &[NodeId]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (slot, id) in open.iter().enumerate() {
        let f = graph.node(*id).f();
        if best.map_or(true, |(_, lowest)| f < lowest) {
            best = Some((slot, f));
        }
    }
    best.map(|(slot, _)| slot)
}

/// Walk the predecessor chain back from `goal`, marking each node as part
/// of the current path, and return it start-first.
pub(crate) fn reconstruct_path(graph: &mut NodeGraph, goal: NodeId) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(id) = current {
        let node = graph.node_mut(id);
        node.walking_over = true;
        path.push(id);
        current = node.previous();
    }
    path.reverse();
    path
}
