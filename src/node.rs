use crate::grid::Coord;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cost sentinel for nodes the current search has not reached.
pub const INF: u32 = u32::MAX;

/// Index of a node inside its [`NodeGraph`](crate::graph::NodeGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One cell of the search graph.
///
/// `f` is kept equal to `g + h` (saturating at [`INF`]) by every method that
/// writes either term.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathNode {
    pub x: i32,
    pub y: i32,
    g: u32,
    h: u32,
    f: u32,
    pub is_walkable: bool,
    /// Set on virtual nodes created above platforms in platformer mode.
    pub reachable_outside: bool,
    /// Set on nodes of the most recently reconstructed path.
    pub walking_over: bool,
    previous: Option<NodeId>,
}

impl PathNode {
    pub fn new(at: Coord, is_walkable: bool) -> Self {
        PathNode {
            x: at.x,
            y: at.y,
            g: INF,
            h: 0,
            f: INF,
            is_walkable,
            reachable_outside: false,
            walking_over: false,
            previous: None,
        }
    }

    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }

    pub fn g(&self) -> u32 {
        self.g
    }

    pub fn h(&self) -> u32 {
        self.h
    }

    pub fn f(&self) -> u32 {
        self.f
    }

    pub fn previous(&self) -> Option<NodeId> {
        self.previous
    }

    pub(crate) fn reset(&mut self) {
        self.previous = None;
        self.walking_over = false;
        self.set_costs(INF, 0);
    }

    pub(crate) fn set_costs(&mut self, g: u32, h: u32) {
        self.g = g;
        self.h = h;
        self.f = g.saturating_add(h);
    }

    pub(crate) fn set_previous(&mut self, previous: Option<NodeId>) {
        self.previous = previous;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f_tracks_g_plus_h() {
        let mut node = PathNode::new(Coord::new(2, 3), true);
        assert_eq!(node.f(), INF);

        node.set_costs(14, 30);
        assert_eq!(node.f(), 44);

        node.set_previous(Some(NodeId(4)));
        node.walking_over = true;
        node.reset();
        assert_eq!((node.g(), node.h(), node.f()), (INF, 0, INF));
        assert_eq!(node.previous(), None);
        assert!(!node.walking_over);
        assert_eq!(node.coord(), Coord::new(2, 3));
    }
}
