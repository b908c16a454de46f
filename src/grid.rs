use crate::error::{CoordParseError, MapError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Integer grid coordinate. `y` grows upwards, so `below()` is `y - 1`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Coord::new(self.x + dx, self.y + dy)
    }

    pub const fn above(self) -> Self {
        self.offset(0, 1)
    }

    pub const fn below(self) -> Self {
        self.offset(0, -1)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for Coord {
    type Err = CoordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || CoordParseError(s.to_string());
        let (x, y) = s.split_once(',').ok_or_else(err)?;
        let x = x.trim().parse().map_err(|_| err())?;
        let y = y.trim().parse().map_err(|_| err())?;
        Ok(Coord::new(x, y))
    }
}

/// Continuous position in map space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub const fn new(x: f32, y: f32) -> Self {
        WorldPos { x, y }
    }
}

/// Read-only view of a tile map, as consumed by the node graph builder.
pub trait TileGrid {
    /// Number of cells along x and y.
    fn grid_size(&self) -> (i32, i32);

    /// World-space size of one cell.
    fn cell_size(&self) -> (f32, f32);

    /// Whether a tile occupies `at`. Out-of-bounds coordinates are empty.
    fn tile_at(&self, at: Coord) -> bool;

    /// Snap a world position to the closest grid coordinate. The result is
    /// not clamped to the grid.
    fn nearest_grid_coordinate(&self, pos: WorldPos) -> Coord {
        let (w, h) = self.cell_size();
        Coord::new((pos.x / w).round() as i32, (pos.y / h).round() as i32)
    }

    fn world_position(&self, at: Coord) -> WorldPos {
        let (w, h) = self.cell_size();
        WorldPos::new(at.x as f32 * w, at.y as f32 * h)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Solid,
}

/// Dense in-memory tile map.
///
/// Text form: one line per row, top row first. `#` is a solid tile, `.` is
/// empty, `S` and `G` are empty cells marking the start and goal.
#[derive(Debug, Clone)]
pub struct TileMap {
    width: i32,
    height: i32,
    cell_size: (f32, f32),
    cells: Vec<Cell>,
    start: Option<Coord>,
    goal: Option<Coord>,
}

impl TileMap {
    /// Dimensions beyond `i32::MAX` are clamped.
    pub fn new(width: usize, height: usize) -> Self {
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        let height = i32::try_from(height).unwrap_or(i32::MAX);
        TileMap {
            width,
            height,
            cell_size: (1.0, 1.0),
            cells: vec![Cell::Empty; (width as usize).saturating_mul(height as usize)],
            start: None,
            goal: None,
        }
    }

    pub fn with_cell_size(mut self, w: f32, h: f32) -> Self {
        self.cell_size = (w, h);
        self
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, at: Coord) -> bool {
        at.x >= 0 && at.x < self.width && at.y >= 0 && at.y < self.height
    }

    fn index(&self, at: Coord) -> Option<usize> {
        self.in_bounds(at)
            .then(|| at.y as usize * self.width as usize + at.x as usize)
    }

    pub fn cell(&self, at: Coord) -> Option<Cell> {
        self.index(at).map(|i| self.cells[i])
    }

    /// Returns `false` when `at` lies outside the map.
    pub fn set(&mut self, at: Coord, cell: Cell) -> bool {
        match self.index(at) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    pub fn fill_row(&mut self, y: i32, cell: Cell) {
        for x in 0..self.width {
            self.set(Coord::new(x, y), cell);
        }
    }

    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Solid).count()
    }

    pub fn start(&self) -> Option<Coord> {
        self.start
    }

    pub fn goal(&self) -> Option<Coord> {
        self.goal
    }

    pub fn set_start(&mut self, at: Coord) {
        self.start = Some(at);
    }

    pub fn set_goal(&mut self, at: Coord) {
        self.goal = Some(at);
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let text = std::fs::read_to_string(path)?;
        text.parse()
    }

    /// Scatter `num_tiles` solid tiles over a fresh map and pick a start in
    /// the left half and a goal in the right half.
    ///
    /// With `with_floor` the bottom row is solid and the endpoints are chosen
    /// among cells an agent can stand on.
    pub fn random(
        width: usize,
        height: usize,
        num_tiles: usize,
        with_floor: bool,
        seed: Option<u64>,
    ) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut map = TileMap::new(width, height);
        let min_y = if with_floor {
            map.fill_row(0, Cell::Solid);
            1
        } else {
            0
        };

        if map.height > min_y && map.width > 0 {
            let mut placed = 0;
            let mut attempts = 0;
            while placed < num_tiles && attempts < num_tiles.saturating_mul(3) {
                let at = Coord::new(
                    rng.gen_range(0..map.width),
                    rng.gen_range(min_y..map.height),
                );
                if map.cell(at) == Some(Cell::Empty) {
                    map.set(at, Cell::Solid);
                    placed += 1;
                }
                attempts += 1;
            }
        }

        let half = map.width / 2;
        map.start = map.pick(&mut rng, 0..half, with_floor);
        map.goal = map.pick(&mut rng, half..map.width, with_floor);
        map
    }

    fn pick(
        &self,
        rng: &mut StdRng,
        xs: std::ops::Range<i32>,
        standable: bool,
    ) -> Option<Coord> {
        let candidates: Vec<Coord> = xs
            .flat_map(|x| (0..self.height).map(move |y| Coord::new(x, y)))
            .filter(|at| self.cell(*at) == Some(Cell::Empty))
            .filter(|at| !standable || self.cell(at.below()) == Some(Cell::Solid))
            .collect();
        if candidates.is_empty() {
            None
        } else {
            Some(candidates[rng.gen_range(0..candidates.len())])
        }
    }
}

impl TileGrid for TileMap {
    fn grid_size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn cell_size(&self) -> (f32, f32) {
        self.cell_size
    }

    fn tile_at(&self, at: Coord) -> bool {
        self.cell(at) == Some(Cell::Solid)
    }
}

impl FromStr for TileMap {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();
        let expected = rows.first().ok_or(MapError::Empty)?.chars().count();

        let mut map = TileMap::new(expected, rows.len());
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != expected {
                return Err(MapError::RaggedRow {
                    row,
                    expected,
                    found,
                });
            }

            let y = map.height - 1 - row as i32;
            for (column, ch) in line.chars().enumerate() {
                let at = Coord::new(column as i32, y);
                match ch {
                    '#' => {
                        map.set(at, Cell::Solid);
                    }
                    '.' => {}
                    'S' => {
                        if map.start.replace(at).is_some() {
                            return Err(MapError::DuplicateMarker("start"));
                        }
                    }
                    'G' => {
                        if map.goal.replace(at).is_some() {
                            return Err(MapError::DuplicateMarker("goal"));
                        }
                    }
                    _ => return Err(MapError::UnknownTile { ch, row, column }),
                }
            }
        }
        Ok(map)
    }
}

impl fmt::Display for TileMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let at = Coord::new(x, y);
                let ch = if Some(at) == self.start {
                    'S'
                } else if Some(at) == self.goal {
                    'G'
                } else if self.tile_at(at) {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
