use crate::grid::{Coord, TileGrid};
use crate::node::{NodeId, PathNode};
use rustc_hash::FxHashMap;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dense arena of [`PathNode`]s keyed by grid coordinate.
///
/// Grid cells are materialized once by [`NodeGraph::build`]. Platformer
/// resets may append virtual nodes; nothing is ever removed, so a `NodeId`
/// stays valid until the graph is rebuilt.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeGraph {
    width: i32,
    height: i32,
    nodes: Vec<PathNode>,
    index: FxHashMap<Coord, NodeId>,
}

impl NodeGraph {
    /// One node per grid cell: occupied cells are solid, empty cells walkable.
    pub fn build<G: TileGrid + ?Sized>(grid: &G) -> Self {
        let (width, height) = grid.grid_size();
        let (width, height) = (width.max(0), height.max(0));
        let cells = (width as usize).saturating_mul(height as usize);

        let mut graph = NodeGraph {
            width,
            height,
            nodes: Vec::with_capacity(cells),
            index: FxHashMap::with_capacity_and_hasher(cells, Default::default()),
        };
        for y in 0..height {
            for x in 0..width {
                let at = Coord::new(x, y);
                graph.insert(PathNode::new(at, !grid.tile_at(at)));
            }
        }

        debug!(width, height, nodes = graph.nodes.len(), "built node graph");
        graph
    }

    fn insert(&mut self, node: PathNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.index.insert(node.coord(), id);
        self.nodes.push(node);
        id
    }

    /// Clear all search state. In platformer mode also make sure every solid
    /// tile has a node one and two cells above it, creating walkable virtual
    /// nodes where none exist.
    pub fn reset(&mut self, platformer: bool) {
        let mut pending = Vec::new();
        for node in &mut self.nodes {
            node.reset();

            if platformer && !node.reachable_outside && !node.is_walkable {
                let at = node.coord();
                for above in [at.offset(0, 1), at.offset(0, 2)] {
                    if !self.index.contains_key(&above) {
                        pending.push(above);
                    }
                }
            }
        }

        // Materialized after the scan; two solid tiles may request the same cell.
        let mut created = 0;
        for at in pending {
            if self.index.contains_key(&at) {
                continue;
            }
            let mut node = PathNode::new(at, true);
            node.reachable_outside = true;
            node.reset();
            self.insert(node);
            created += 1;
        }
        if created > 0 {
            debug!(created, total = self.nodes.len(), "materialized virtual nodes");
        }
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn in_bounds(&self, at: Coord) -> bool {
        at.x >= 0 && at.x < self.width && at.y >= 0 && at.y < self.height
    }

    /// Any node at `at`, virtual ones included.
    pub fn get(&self, at: Coord) -> Option<NodeId> {
        self.index.get(&at).copied()
    }

    /// The node at `at` if it lies inside the grid rectangle.
    pub fn get_in_bounds(&self, at: Coord) -> Option<NodeId> {
        if self.in_bounds(at) {
            self.get(at)
        } else {
            None
        }
    }

    pub fn node(&self, id: NodeId) -> &PathNode {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut PathNode {
        &mut self.nodes[id.0]
    }

    /// `true` when `id` names a walkable node.
    pub fn is_walkable(&self, id: Option<NodeId>) -> bool {
        id.is_some_and(|id| self.node(id).is_walkable)
    }

    /// `true` when `id` names a non-walkable node. Absent nodes are neither
    /// walkable nor solid.
    pub fn is_solid(&self, id: Option<NodeId>) -> bool {
        id.is_some_and(|id| !self.node(id).is_walkable)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &PathNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn virtual_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.reachable_outside).count()
    }

    /// Highest row holding a node; virtual rows sit above the grid.
    pub fn top(&self) -> i32 {
        self.nodes.iter().map(|n| n.y).max().unwrap_or(-1)
    }
}
