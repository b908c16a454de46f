use crate::algorithms::a_star;
use crate::algorithms::common::select_rule;
use crate::algorithms::reference;
use crate::config::Costs;
use crate::graph::NodeGraph;
use crate::grid::{Coord, TileGrid, WorldPos};
use tracing::debug;

/// A path expressed in grid coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPath {
    pub coords: Vec<Coord>,
    pub cost: u32,
    pub expanded: usize,
}

impl GridPath {
    pub fn start(&self) -> Coord {
        self.coords[0]
    }

    pub fn goal(&self) -> Coord {
        self.coords[self.coords.len() - 1]
    }

    /// Number of moves, one less than the number of coordinates.
    pub fn steps(&self) -> usize {
        self.coords.len().saturating_sub(1)
    }
}

/// Owns a tile grid and the node graph built from it.
///
/// Searches reset the graph in place. Call [`Pathfinder::load_graph`]
/// after changing the tiles behind [`Pathfinder::grid_mut`].
pub struct Pathfinder<G: TileGrid> {
    grid: G,
    graph: NodeGraph,
    costs: Costs,
}

impl<G: TileGrid> Pathfinder<G> {
    pub fn new(grid: G, costs: Costs) -> Self {
        let graph = NodeGraph::build(&grid);
        Pathfinder { grid, graph, costs }
    }

    /// Rebuild the node graph from the current tiles.
    pub fn load_graph(&mut self) {
        self.graph = NodeGraph::build(&self.grid);
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut G {
        &mut self.grid
    }

    pub fn graph(&self) -> &NodeGraph {
        &self.graph
    }

    pub(crate) fn graph_mut(&mut self) -> &mut NodeGraph {
        &mut self.graph
    }

    pub fn costs(&self) -> Costs {
        self.costs
    }

    /// Search between two world positions and return world-space waypoints.
    pub fn find_path(
        &mut self,
        start: WorldPos,
        goal: WorldPos,
        platformer: bool,
    ) -> Option<Vec<WorldPos>> {
        let start = self.grid.nearest_grid_coordinate(start);
        let goal = self.grid.nearest_grid_coordinate(goal);
        let path = self.find_grid_path(start, goal, platformer)?;
        Some(
            path.coords
                .into_iter()
                .map(|at| self.grid.world_position(at))
                .collect(),
        )
    }

    pub fn find_grid_path(
        &mut self,
        start: Coord,
        goal: Coord,
        platformer: bool,
    ) -> Option<GridPath> {
        let rule = select_rule(platformer);
        let outcome = a_star::find_path(&mut self.graph, rule.as_ref(), self.costs, start, goal)?;
        Some(GridPath {
            coords: outcome
                .path
                .iter()
                .map(|id| self.graph.node(*id).coord())
                .collect(),
            cost: outcome.cost,
            expanded: outcome.expanded,
        })
    }

    /// Exhaustive cheapest cost between two coordinates, for comparison with
    /// [`Pathfinder::find_grid_path`]. Applies the same endpoint policy.
    pub fn optimal_cost(&mut self, start: Coord, goal: Coord, platformer: bool) -> Option<u32> {
        let rule = select_rule(platformer);
        self.graph.reset(rule.uses_virtual_nodes());

        let start_id = rule.lookup(&self.graph, start)?;
        if !self.graph.node(start_id).is_walkable {
            return None;
        }
        let goal_id = rule.lookup(&self.graph, goal)?;
        if !rule.accepts_goal(&self.graph, goal_id) {
            return None;
        }
        let cost = reference::optimal_cost(&self.graph, rule.as_ref(), self.costs, start_id, goal_id);
        debug!(%start, %goal, ?cost, rule = rule.name(), "reference search finished");
        cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, TileMap};

    #[test]
    fn world_positions_snap_through_the_grid() {
        let map = TileMap::new(4, 4).with_cell_size(2.0, 2.0);
        let mut pathfinder = Pathfinder::new(map, Costs::new(14, 10));

        let path = pathfinder
            .find_path(WorldPos::new(0.3, 0.2), WorldPos::new(5.8, 0.4), false)
            .unwrap();
        assert_eq!(
            path,
            vec![
                WorldPos::new(0.0, 0.0),
                WorldPos::new(2.0, 0.0),
                WorldPos::new(4.0, 0.0),
                WorldPos::new(6.0, 0.0),
            ]
        );
        assert!(pathfinder
            .find_path(WorldPos::new(0.0, 0.0), WorldPos::new(40.0, 0.0), false)
            .is_none());
    }

    #[test]
    fn load_graph_picks_up_map_edits() {
        let mut pathfinder = Pathfinder::new(TileMap::new(3, 1), Costs::default());
        assert!(pathfinder
            .find_grid_path(Coord::new(0, 0), Coord::new(2, 0), false)
            .is_some());

        pathfinder.grid_mut().set(Coord::new(1, 0), Cell::Solid);
        pathfinder.load_graph();
        assert!(pathfinder
            .find_grid_path(Coord::new(0, 0), Coord::new(2, 0), false)
            .is_none());
    }

    #[test]
    fn reference_cost_matches_on_a_plain_floor() {
        let map: TileMap = "......\n######\n".parse().unwrap();
        let mut pathfinder = Pathfinder::new(map, Costs::default());
        let path = pathfinder
            .find_grid_path(Coord::new(0, 1), Coord::new(5, 1), true)
            .unwrap();
        assert_eq!(path.steps(), 5);
        assert_eq!(path.start(), Coord::new(0, 1));
        assert_eq!(path.goal(), Coord::new(5, 1));
        assert_eq!(
            pathfinder.optimal_cost(Coord::new(0, 1), Coord::new(5, 1), true),
            Some(path.cost)
        );
        assert_eq!(
            pathfinder.optimal_cost(Coord::new(0, 0), Coord::new(5, 1), true),
            None
        );
    }
}
