use crate::algorithms::common::NeighborRule;
use crate::config::Costs;
use crate::graph::NodeGraph;
use crate::node::NodeId;
use pathfinding::prelude::dijkstra;

/// Cheapest cost from `start` to `goal` under `rule`, found by an
/// exhaustive Dijkstra search with the `pathfinding` crate.
///
/// Used as a yardstick for the A* result. The graph must already be reset
/// for the same rule so virtual nodes exist. Costs are summed in `u64` and
/// saturate at `u32::MAX` like the A* `g` values.
pub fn optimal_cost(
    graph: &NodeGraph,
    rule: &dyn NeighborRule,
    costs: Costs,
    start: NodeId,
    goal: NodeId,
) -> Option<u32> {
    let result = dijkstra(
        &start,
        |&id| {
            let mut candidates = Vec::new();
            rule.neighbors(graph, id, &mut candidates);
            let from = graph.node(id).coord();
            candidates
                .into_iter()
                .filter(|next| graph.node(*next).is_walkable)
                .map(|next| {
                    let step = costs.distance(from, graph.node(next).coord());
                    (next, u64::from(step))
                })
                .collect::<Vec<_>>()
        },
        |&id| id == goal,
    );

    result.map(|(_, cost)| u32::try_from(cost).unwrap_or(u32::MAX))
}
