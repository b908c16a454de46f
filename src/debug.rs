use crate::algorithms::platformer::lowest;
use crate::graph::NodeGraph;
use crate::grid::{Coord, TileGrid};
use crate::pathfinder::Pathfinder;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use tracing::debug;

/// Every position a path was found to from one reference point, plus the
/// distinct path segments used to get there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reachability {
    pub reference: Coord,
    pub positions: Vec<Coord>,
    pub segments: Vec<(Coord, Coord)>,
}

impl Reachability {
    /// Overlay for [`render_graph`]: `S` on the reference, `o` elsewhere.
    pub fn overlay(&self) -> FxHashMap<Coord, char> {
        let mut marks: FxHashMap<Coord, char> =
            self.positions.iter().map(|at| (*at, 'o')).collect();
        marks.insert(self.reference, 'S');
        marks
    }

    fn record(&mut self, known: &mut FxHashSet<(Coord, Coord)>, coords: &[Coord]) {
        for pair in coords.windows(2) {
            let segment = (pair[0], pair[1]);
            if known.insert(segment) {
                self.segments.push(segment);
            }
        }
    }
}

impl fmt::Display for Reachability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} reachable positions from {}",
            self.positions.len(),
            self.reference
        )?;
        for (from, to) in &self.segments {
            writeln!(f, "  {} -> {}", from, to)?;
        }
        Ok(())
    }
}

impl<G: TileGrid> Pathfinder<G> {
    /// Search from `reference` to every candidate standing position and
    /// collect the ones that succeed.
    ///
    /// Candidates are every node in standard mode, and the cell above every
    /// solid node in platformer mode. Runs one full search per candidate.
    ///
    /// In platformer mode the segments also include the route back from each
    /// reached position, and the fall off either side of every standable
    /// candidate when a search confirms the landing. Candidates need not be
    /// reachable from `reference` for their falls to be listed.
    pub fn enumerate_reachable_positions(
        &mut self,
        reference: Coord,
        platformer: bool,
    ) -> Reachability {
        // A platformer reset creates the virtual nodes the candidates sit on.
        self.graph_mut().reset(platformer);

        let mut seen = FxHashSet::default();
        let candidates: Vec<Coord> = self
            .graph()
            .nodes()
            .filter_map(|(_, node)| {
                if !platformer {
                    Some(node.coord())
                } else if !node.is_walkable {
                    Some(node.coord().above())
                } else {
                    None
                }
            })
            .filter(|at| seen.insert(*at))
            .collect();

        let mut reach = Reachability {
            reference,
            ..Reachability::default()
        };
        let mut known = FxHashSet::default();
        for &at in &candidates {
            let Some(path) = self.find_grid_path(reference, at, platformer) else {
                continue;
            };
            reach.positions.push(at);
            reach.record(&mut known, &path.coords);

            if platformer {
                if let Some(back) = self.find_grid_path(at, reference, true) {
                    reach.record(&mut known, &back.coords);
                }
            }
        }

        if platformer {
            for &at in &candidates {
                for dir in [-1, 1] {
                    let Some(landing) = self.fall_landing(at, dir) else {
                        continue;
                    };
                    if known.contains(&(at, landing)) {
                        continue;
                    }
                    if self.find_grid_path(at, landing, true).is_some() {
                        reach.record(&mut known, &[at, landing]);
                    }
                }
            }
        }

        debug!(
            %reference,
            platformer,
            positions = reach.positions.len(),
            segments = reach.segments.len(),
            "enumerated reachable positions"
        );
        reach
    }

    /// Where an agent standing at `at` lands after stepping off toward
    /// `dir`, if that cell is open and the drop is at least one cell.
    fn fall_landing(&self, at: Coord, dir: i32) -> Option<Coord> {
        let graph = self.graph();
        let id = graph.get(at)?;
        let side = graph.get(at.offset(dir, 0))?;
        if !graph.node(id).is_walkable || !graph.node(side).is_walkable {
            return None;
        }
        let landing = graph.node(lowest(graph, side)).coord();
        (landing.y < at.y).then_some(landing)
    }
}

/// Draw the graph as text, top row first.
///
/// `#` solid, `.` walkable, `:` virtual, `*` on the last reconstructed path,
/// blank where no node exists. `overlay` characters take precedence.
pub fn render_graph(graph: &NodeGraph, overlay: &FxHashMap<Coord, char>) -> String {
    let (width, _) = graph.size();
    let mut out = String::new();
    for y in (0..=graph.top()).rev() {
        for x in 0..width {
            let at = Coord::new(x, y);
            let ch = match (overlay.get(&at), graph.get(at)) {
                (Some(mark), _) => *mark,
                (None, None) => ' ',
                (None, Some(id)) => {
                    let node = graph.node(id);
                    if !node.is_walkable {
                        '#'
                    } else if node.walking_over {
                        '*'
                    } else if node.reachable_outside {
                        ':'
                    } else {
                        '.'
                    }
                }
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Costs;
    use crate::grid::TileMap;

    #[test]
    fn standard_sweep_stops_at_walls() {
        let map: TileMap = "\
..#.
..#.
"
        .parse()
        .unwrap();
        let mut pathfinder = Pathfinder::new(map, Costs::default());
        let reach = pathfinder.enumerate_reachable_positions(Coord::new(0, 0), false);

        let mut positions = reach.positions.clone();
        positions.sort();
        assert_eq!(
            positions,
            vec![
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(1, 0),
                Coord::new(1, 1),
            ]
        );
        assert!(reach.segments.iter().all(|(a, b)| a.x < 2 && b.x < 2));
        let unique: FxHashSet<_> = reach.segments.iter().collect();
        assert_eq!(unique.len(), reach.segments.len());
    }

    #[test]
    fn platformer_sweep_lists_standing_spots() {
        let map: TileMap = "\
.....
.....
#####
"
        .parse()
        .unwrap();
        let mut pathfinder = Pathfinder::new(map, Costs::default());
        let reach = pathfinder.enumerate_reachable_positions(Coord::new(0, 1), true);

        assert_eq!(
            reach.positions,
            (0..5).map(|x| Coord::new(x, 1)).collect::<Vec<_>>()
        );
        // Four steps out along the floor and four back.
        assert_eq!(reach.segments.len(), 8);
        assert!(reach
            .segments
            .contains(&(Coord::new(1, 1), Coord::new(0, 1))));
        assert!(reach.to_string().starts_with("5 reachable positions from (0, 1)"));
    }

    #[test]
    fn platformer_sweep_adds_return_routes_and_ledge_falls() {
        let map: TileMap = "\
......
##....
......
......
######
"
        .parse()
        .unwrap();
        let mut pathfinder = Pathfinder::new(map, Costs::default());
        let reach = pathfinder.enumerate_reachable_positions(Coord::new(0, 1), true);

        // The ledge is too high to climb onto from the floor.
        assert!(!reach.positions.contains(&Coord::new(1, 4)));
        assert!(reach.positions.contains(&Coord::new(5, 1)));

        // Only the route back from (5, 1) walks leftwards from it.
        assert!(reach
            .segments
            .contains(&(Coord::new(5, 1), Coord::new(4, 1))));
        // Stepping off the ledge drops to the floor below.
        assert!(reach
            .segments
            .contains(&(Coord::new(1, 4), Coord::new(2, 1))));
        assert!(!reach
            .segments
            .iter()
            .any(|(from, to)| *from == Coord::new(1, 4) && to.y == 2));
    }

    #[test]
    fn renders_path_and_virtual_rows() {
        let map: TileMap = "\
..#
###
"
        .parse()
        .unwrap();
        let mut pathfinder = Pathfinder::new(map, Costs::default());
        pathfinder
            .find_grid_path(Coord::new(0, 1), Coord::new(2, 2), true)
            .unwrap();

        let mut overlay = FxHashMap::default();
        overlay.insert(Coord::new(0, 1), 'S');
        let text = render_graph(pathfinder.graph(), &overlay);
        assert_eq!(text, "  :\n::*\nS*#\n###\n");
    }
}
