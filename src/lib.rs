//! Grid path search with two movement models: free 8-directional movement
//! and gravity-bound platformer movement with falls and short jumps.

pub mod algorithms;
pub mod config;
pub mod debug;
pub mod error;
pub mod graph;
pub mod grid;
pub mod node;
pub mod pathfinder;
pub mod statistics;

pub use config::Costs;
pub use graph::NodeGraph;
pub use grid::{Cell, Coord, TileGrid, TileMap, WorldPos};
pub use node::{NodeId, PathNode};
pub use pathfinder::{GridPath, Pathfinder};
