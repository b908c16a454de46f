use crate::algorithms::common::NeighborRule;
use crate::graph::NodeGraph;
use crate::grid::Coord;
use crate::node::NodeId;

/// 8-directional movement inside the grid rectangle.
///
/// Cardinal neighbors are always offered. A diagonal is offered only when
/// both cardinal cells around that corner are walkable, so the agent never
/// squeezes past a solid corner.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardRule;

impl NeighborRule for StandardRule {
    fn neighbors(&self, graph: &NodeGraph, current: NodeId, out: &mut Vec<NodeId>) {
        let at = graph.node(current).coord();
        let down = graph.get_in_bounds(at.below());
        let up = graph.get_in_bounds(at.above());

        out.extend(down);
        out.extend(up);

        for dir in [-1, 1] {
            let side = graph.get_in_bounds(at.offset(dir, 0));
            out.extend(side);

            if !graph.is_walkable(side) {
                continue;
            }
            if graph.is_walkable(down) {
                out.extend(graph.get_in_bounds(at.offset(dir, -1)));
            }
            if graph.is_walkable(up) {
                out.extend(graph.get_in_bounds(at.offset(dir, 1)));
            }
        }
    }

    fn lookup(&self, graph: &NodeGraph, at: Coord) -> Option<NodeId> {
        graph.get_in_bounds(at)
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}
