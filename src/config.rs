use crate::grid::Coord;
use clap::Parser;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Edge and heuristic weights.
///
/// The distance between two coordinates is
/// `diagonal * min(dx, dy) + straight * |dx - dy|`; the same value is used as
/// the traversal cost of a single search step and as the heuristic. The
/// result saturates at `u32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Costs {
    pub diagonal: u32,
    pub straight: u32,
}

impl Default for Costs {
    fn default() -> Self {
        Costs {
            diagonal: 10,
            straight: 14,
        }
    }
}

impl Costs {
    pub fn new(diagonal: u32, straight: u32) -> Self {
        Costs { diagonal, straight }
    }

    pub fn distance(&self, a: Coord, b: Coord) -> u32 {
        let dx = a.x.abs_diff(b.x);
        let dy = a.y.abs_diff(b.y);
        self.diagonal
            .saturating_mul(dx.min(dy))
            .saturating_add(self.straight.saturating_mul(dx.abs_diff(dy)))
    }
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Text map to load; a random map is generated when absent.
    #[arg(long)]
    pub map: Option<PathBuf>,

    #[arg(long, default_value_t = 24)]
    pub width: usize,

    #[arg(long, default_value_t = 12)]
    pub height: usize,

    #[arg(long, default_value_t = 40)]
    pub num_tiles: usize,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Start coordinate as `x,y`; overrides the map's `S` marker.
    #[arg(long)]
    pub start: Option<Coord>,

    /// Goal coordinate as `x,y`; overrides the map's `G` marker.
    #[arg(long)]
    pub goal: Option<Coord>,

    #[arg(long, default_value_t = false)]
    pub platformer: bool,

    #[arg(long, default_value_t = 10)]
    pub diagonal_cost: u32,

    #[arg(long, default_value_t = 14)]
    pub straight_cost: u32,

    #[arg(long, default_value_t = 1.0)]
    pub cell_size: f32,

    /// Enumerate every position reachable from the start instead of
    /// searching for a single goal.
    #[arg(long, default_value_t = false)]
    pub reachable: bool,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Config {
    pub fn costs(&self) -> Costs {
        Costs::new(self.diagonal_cost, self.straight_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_distance_prefers_diagonals() {
        let costs = Costs::default();
        assert_eq!(costs.distance(Coord::new(0, 0), Coord::new(4, 4)), 40);
        assert_eq!(costs.distance(Coord::new(0, 0), Coord::new(3, 0)), 42);
        assert_eq!(costs.distance(Coord::new(5, 1), Coord::new(2, 3)), 34);
    }

    #[test]
    fn distance_saturates_with_huge_weights() {
        let costs = Costs::new(10, 2_000_000_000);
        assert_eq!(costs.distance(Coord::new(0, 0), Coord::new(4, 0)), u32::MAX);
        assert_eq!(costs.distance(Coord::new(0, 0), Coord::new(1, 0)), 2_000_000_000);

        let costs = Costs::new(u32::MAX, u32::MAX);
        assert_eq!(costs.distance(Coord::new(0, 0), Coord::new(3, 5)), u32::MAX);
    }

    #[test]
    fn parses_command_line() {
        let config = Config::parse_from([
            "platform_pathfinding",
            "--start",
            "1,2",
            "--goal",
            "7,1",
            "--platformer",
            "--straight-cost",
            "10",
            "--diagonal-cost",
            "14",
        ]);
        assert_eq!(config.start, Some(Coord::new(1, 2)));
        assert_eq!(config.goal, Some(Coord::new(7, 1)));
        assert!(config.platformer);
        assert_eq!(config.costs(), Costs::new(14, 10));
        assert_eq!(config.width, 24);
    }
}
