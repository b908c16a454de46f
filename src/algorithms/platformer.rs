use crate::algorithms::common::NeighborRule;
use crate::graph::NodeGraph;
use crate::grid::Coord;
use crate::node::NodeId;

/// Gravity-bound movement.
///
/// From a node the agent can walk onto a neighboring cell that has a floor,
/// fall from a ledge to the first floor below, or jump up one or two cells
/// while moving sideways. Lookups see virtual nodes, so the agent can stand
/// on top of the grid's highest tiles.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlatformerRule;

impl PlatformerRule {
    fn directed(
        &self,
        graph: &NodeGraph,
        at: Coord,
        up: Option<NodeId>,
        down: Option<NodeId>,
        dir: i32,
        out: &mut Vec<NodeId>,
    ) {
        let side = at.offset(dir, 0);
        let Some(dir_node) = graph.get(side) else {
            return;
        };
        let dir_down = graph.get(side.below());
        let dir_up = graph.get(side.above());
        let dir_two_down = graph.get(side.offset(dir, -1));

        // Hop over a one-cell gap, landing one cell up.
        if graph.is_walkable(up)
            && graph.is_solid(down)
            && graph.is_walkable(dir_down)
            && graph.is_walkable(dir_up)
            && graph.is_solid(dir_two_down)
        {
            out.extend(dir_up);
        }

        if graph.is_walkable(Some(dir_node)) {
            if let Some(dir_down) = dir_down {
                if graph.node(dir_down).is_walkable {
                    out.push(lowest(graph, dir_node));

                    // Second landing one further cell out, only onto a floor.
                    if let Some(far) = graph.get(side.offset(dir, 0)) {
                        if graph.node(far).is_walkable {
                            let landing = lowest(graph, far);
                            let floor = graph.get(graph.node(landing).coord().below());
                            if graph.is_solid(floor) {
                                out.push(landing);
                            }
                        }
                    }
                } else {
                    out.push(dir_node);
                }
            }
        } else if graph.is_walkable(up) && graph.is_walkable(dir_up) {
            out.extend(dir_up);
        }

        if graph.is_walkable(up) && graph.is_solid(dir_up) {
            let up_two = graph.get(at.offset(0, 2));
            let dir_up_two = graph.get(side.offset(0, 2));
            if graph.is_walkable(up_two) && graph.is_walkable(dir_up_two) {
                out.extend(dir_up_two);
            }
        }
    }
}

/// Follow walkable cells straight down from `from` and return the last one.
pub(crate) fn lowest(graph: &NodeGraph, from: NodeId) -> NodeId {
    let mut current = from;
    loop {
        let below = graph.get(graph.node(current).coord().below());
        match below {
            Some(next) if graph.node(next).is_walkable => current = next,
            _ => return current,
        }
    }
}

impl NeighborRule for PlatformerRule {
    fn neighbors(&self, graph: &NodeGraph, current: NodeId, out: &mut Vec<NodeId>) {
        let at = graph.node(current).coord();
        let up = graph.get(at.above());
        let down = graph.get(at.below());

        self.directed(graph, at, up, down, -1, out);
        self.directed(graph, at, up, down, 1, out);
    }

    fn lookup(&self, graph: &NodeGraph, at: Coord) -> Option<NodeId> {
        graph.get(at)
    }

    /// The goal needs a solid node directly beneath it to stand on.
    fn accepts_goal(&self, graph: &NodeGraph, goal: NodeId) -> bool {
        let below = graph.node(goal).coord().below();
        graph.is_solid(graph.get(below))
    }

    fn uses_virtual_nodes(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "platformer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TileMap;

    fn graph(text: &str) -> NodeGraph {
        let map: TileMap = text.parse().unwrap();
        let mut graph = NodeGraph::build(&map);
        graph.reset(true);
        graph
    }

    fn neighbors_of(graph: &NodeGraph, at: Coord) -> Vec<Coord> {
        let mut out = Vec::new();
        PlatformerRule.neighbors(graph, graph.get(at).unwrap(), &mut out);
        out.into_iter().map(|id| graph.node(id).coord()).collect()
    }

    #[test]
    fn walks_along_a_floor() {
        let g = graph("\
.....
.....
#####
");
        assert_eq!(
            neighbors_of(&g, Coord::new(2, 1)),
            vec![Coord::new(1, 1), Coord::new(3, 1)]
        );
    }

    #[test]
    fn falls_to_the_first_floor_in_a_deep_shaft() {
        let mut text = String::from("......\n##....\n");
        for _ in 0..12 {
            text.push_str("......\n");
        }
        text.push_str("######\n");
        let g = graph(&text);
        let top = g.size().1 - 1;

        let found = neighbors_of(&g, Coord::new(1, top));
        assert!(found.contains(&Coord::new(2, 1)));
        assert!(found.contains(&Coord::new(3, 1)));
        assert!(found
            .iter()
            .filter(|c| c.x == 2)
            .all(|c| *c == Coord::new(2, 1)));
    }

    #[test]
    fn second_landing_needs_a_floor() {
        // The far column has no floor, so only the near landing is offered.
        let g = graph("\
....
##..
....
###.
");
        let found = neighbors_of(&g, Coord::new(1, 3));
        assert!(found.contains(&Coord::new(2, 1)));
        assert!(!found.iter().any(|c| c.x == 3));
    }

    #[test]
    fn steps_up_onto_a_single_block() {
        let g = graph("\
....
....
.#..
####
");
        let found = neighbors_of(&g, Coord::new(0, 1));
        assert!(found.contains(&Coord::new(1, 2)));
    }

    #[test]
    fn jumps_two_onto_a_double_block() {
        let g = graph("\
....
....
.#..
.#..
####
");
        let found = neighbors_of(&g, Coord::new(0, 1));
        assert_eq!(found, vec![Coord::new(1, 3)]);
    }

    #[test]
    fn no_jump_without_headroom() {
        let g = graph("\
##..
.#..
####
");
        let found = neighbors_of(&g, Coord::new(0, 1));
        assert!(found.is_empty());
    }

    #[test]
    fn hops_a_one_cell_gap() {
        let g = graph("\
.....
.....
.....
##.##
");
        let found = neighbors_of(&g, Coord::new(1, 1));
        assert!(found.contains(&Coord::new(2, 2)));
        // The fall into the gap lands at the bottom row.
        assert!(found.contains(&Coord::new(2, 0)));
        assert!(found.contains(&Coord::new(0, 1)));
    }

    #[test]
    fn climbs_onto_virtual_nodes_above_the_top_row() {
        let g = graph("\
.#
##
");
        let found = neighbors_of(&g, Coord::new(0, 1));
        let landing = g.get(Coord::new(1, 2)).unwrap();
        assert!(g.node(landing).reachable_outside);
        assert!(found.contains(&Coord::new(1, 2)));
    }

    #[test]
    fn goal_needs_solid_ground() {
        let g = graph("\
...
...
#..
");
        let rule = PlatformerRule;
        assert!(rule.accepts_goal(&g, g.get(Coord::new(0, 1)).unwrap()));
        assert!(!rule.accepts_goal(&g, g.get(Coord::new(1, 1)).unwrap()));
        assert!(!rule.accepts_goal(&g, g.get(Coord::new(1, 0)).unwrap()));
    }
}
