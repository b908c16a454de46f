use crate::algorithms::platformer::PlatformerRule;
use crate::algorithms::standard::StandardRule;
use crate::graph::NodeGraph;
use crate::grid::Coord;
use crate::node::NodeId;

/// Movement model consulted by the search core.
pub trait NeighborRule {
    /// Append every node reachable from `current` in one step to `out`.
    /// Candidates may be non-walkable or repeated; the search filters them.
    fn neighbors(&self, graph: &NodeGraph, current: NodeId, out: &mut Vec<NodeId>);

    /// Resolve a search endpoint.
    fn lookup(&self, graph: &NodeGraph, at: Coord) -> Option<NodeId>;

    /// Whether an agent can end its path on `goal`.
    fn accepts_goal(&self, _graph: &NodeGraph, _goal: NodeId) -> bool {
        true
    }

    /// Whether the graph reset should materialize virtual nodes.
    fn uses_virtual_nodes(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str;
}

/// Pick the ruleset for one search.
pub fn select_rule(platformer: bool) -> Box<dyn NeighborRule> {
    if platformer {
        Box::new(PlatformerRule)
    } else {
        Box::new(StandardRule)
    }
}
