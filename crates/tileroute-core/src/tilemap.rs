//! A rectangular tile map exposed as a [`Graph`].
//!
//! Terrain decides passability: walls never show up as neighbors. Dynamic
//! occupancy is recorded per tile but left to the route resolver's exclusion
//! predicate, so that an occupied tile can still be a valid destination.

use std::fmt;

use crate::geom::{Point, Range};
use crate::graph::{Graph, Node};

/// Terrain kind of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    #[default]
    Open,
    Rough,
    Bridge,
    Wall,
}

impl Terrain {
    /// Whether units can stand on this terrain.
    #[inline]
    pub fn is_passable(self) -> bool {
        !matches!(self, Terrain::Wall)
    }

    /// Cost of stepping onto a tile of this terrain (before any diagonal
    /// factor). Walls cost `+∞`.
    #[inline]
    pub fn entry_cost(self) -> f64 {
        match self {
            Terrain::Open | Terrain::Bridge => 1.0,
            Terrain::Rough => 2.0,
            Terrain::Wall => f64::INFINITY,
        }
    }

    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Terrain::Open),
            ',' => Some(Terrain::Rough),
            '=' => Some(Terrain::Bridge),
            '#' => Some(Terrain::Wall),
            _ => None,
        }
    }
}

/// Per-tile payload: what route callbacks get to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub pos: Point,
    pub terrain: Terrain,
    pub occupied: bool,
}

/// Movement model between tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connectivity {
    /// Cardinal moves only.
    #[default]
    Four,
    /// Cardinal and diagonal moves. A diagonal needs both orthogonal tiles
    /// to be passable.
    Eight,
}

/// Errors from [`TileMap::from_rows`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileMapError {
    /// A row's width differs from the first row's.
    InconsistentWidth { row: usize, expected: usize, found: usize },
    /// A character outside the terrain legend.
    InvalidTerrain { ch: char, pos: Point },
}

impl fmt::Display for TileMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentWidth {
                row,
                expected,
                found,
            } => write!(
                f,
                "tile map: row {row} has width {found}, expected {expected}"
            ),
            Self::InvalidTerrain { ch, pos } => {
                write!(f, "tile map: invalid terrain \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for TileMapError {}

/// A grid of [`Tile`]s with origin (0, 0).
#[derive(Debug, Clone)]
pub struct TileMap {
    rng: Range,
    tiles: Vec<Tile>,
    connectivity: Connectivity,
}

impl TileMap {
    /// Create a map of open tiles.
    pub fn new(width: i32, height: i32, connectivity: Connectivity) -> Self {
        let rng = Range::new(0, 0, width.max(0), height.max(0));
        let tiles = rng
            .iter()
            .map(|pos| Tile {
                pos,
                ..Tile::default()
            })
            .collect();
        Self {
            rng,
            tiles,
            connectivity,
        }
    }

    /// Build a map from text rows: `.` open, `,` rough, `=` bridge, `#` wall.
    pub fn from_rows(rows: &[&str], connectivity: Connectivity) -> Result<Self, TileMapError> {
        let width = rows.first().map_or(0, |r| r.chars().count());
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(TileMapError::InconsistentWidth {
                    row,
                    expected: width,
                    found,
                });
            }
        }
        let mut map = Self::new(width as i32, rows.len() as i32, connectivity);
        for (y, line) in rows.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let terrain =
                    Terrain::from_char(ch).ok_or(TileMapError::InvalidTerrain { ch, pos })?;
                map.set_terrain(pos, terrain);
            }
        }
        Ok(map)
    }

    /// The map bounds.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// The movement model.
    #[inline]
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// The tile at `p`, or `None` outside the map.
    #[inline]
    pub fn tile(&self, p: Point) -> Option<&Tile> {
        self.rng.index_of(p).map(|i| &self.tiles[i])
    }

    /// Whether `p` is inside the map and not a wall.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.tile(p).is_some_and(|t| t.terrain.is_passable())
    }

    /// Change the terrain at `p`. Returns `false` outside the map.
    pub fn set_terrain(&mut self, p: Point, terrain: Terrain) -> bool {
        match self.rng.index_of(p) {
            Some(i) => {
                self.tiles[i].terrain = terrain;
                true
            }
            None => false,
        }
    }

    /// Mark or unmark `p` as occupied. Returns `false` outside the map.
    pub fn set_occupied(&mut self, p: Point, occupied: bool) -> bool {
        match self.rng.index_of(p) {
            Some(i) => {
                self.tiles[i].occupied = occupied;
                true
            }
            None => false,
        }
    }

    /// Clear every occupancy flag.
    pub fn clear_occupancy(&mut self) {
        for t in &mut self.tiles {
            t.occupied = false;
        }
    }

    /// Iterate over all tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }
}

impl Graph for TileMap {
    type Id = Point;
    type Data = Tile;

    fn node(&self, id: Point) -> Option<Node<'_, Point, Tile>> {
        self.tile(id).map(|t| Node::new(id, t))
    }

    fn neighbors(&self, id: Point, buf: &mut Vec<Point>) {
        for n in id.neighbors_4() {
            if self.is_passable(n) {
                buf.push(n);
            }
        }
        if self.connectivity == Connectivity::Eight {
            for d in id.diagonals() {
                let side_a = Point::new(d.x, id.y);
                let side_b = Point::new(id.x, d.y);
                if self.is_passable(d) && self.is_passable(side_a) && self.is_passable(side_b) {
                    buf.push(d);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &[&str] = &[
        "....", //
        ".#,.", //
        "..=.",
    ];

    fn neighbors_of(map: &TileMap, p: Point) -> Vec<Point> {
        let mut buf = Vec::new();
        map.neighbors(p, &mut buf);
        buf
    }

    #[test]
    fn parses_rows() {
        let map = TileMap::from_rows(ROOM, Connectivity::Four).unwrap();
        assert_eq!(map.range(), Range::new(0, 0, 4, 3));
        assert_eq!(map.tile(Point::new(1, 1)).unwrap().terrain, Terrain::Wall);
        assert_eq!(map.tile(Point::new(2, 1)).unwrap().terrain, Terrain::Rough);
        assert_eq!(map.tile(Point::new(2, 2)).unwrap().terrain, Terrain::Bridge);
        assert_eq!(map.tile(Point::new(2, 2)).unwrap().pos, Point::new(2, 2));
        assert!(map.tile(Point::new(4, 0)).is_none());
    }

    #[test]
    fn parse_errors() {
        let err = TileMap::from_rows(&["...", ".."], Connectivity::Four).unwrap_err();
        assert_eq!(
            err,
            TileMapError::InconsistentWidth {
                row: 1,
                expected: 3,
                found: 2
            }
        );
        let err = TileMap::from_rows(&["..x"], Connectivity::Four).unwrap_err();
        assert_eq!(
            err,
            TileMapError::InvalidTerrain {
                ch: 'x',
                pos: Point::new(2, 0)
            }
        );
        assert!(err.to_string().contains("(2, 0)"));
    }

    #[test]
    fn four_way_skips_walls_and_edges() {
        let map = TileMap::from_rows(ROOM, Connectivity::Four).unwrap();
        assert_eq!(
            neighbors_of(&map, Point::new(0, 0)),
            vec![Point::new(1, 0), Point::new(0, 1)]
        );
        // (1, 0) sits above the wall.
        assert_eq!(
            neighbors_of(&map, Point::new(1, 0)),
            vec![Point::new(2, 0), Point::new(0, 0)]
        );
    }

    #[test]
    fn eight_way_does_not_cut_corners() {
        let map = TileMap::from_rows(ROOM, Connectivity::Eight).unwrap();
        let n = neighbors_of(&map, Point::new(0, 0));
        // (1, 1) is a wall, so no diagonal from the corner.
        assert_eq!(n, vec![Point::new(1, 0), Point::new(0, 1)]);

        let n = neighbors_of(&map, Point::new(3, 0));
        assert!(n.contains(&Point::new(2, 1)));

        // (2, 0) -> (1, 1) is a wall; (2, 0) -> (3, 1) is fine.
        let n = neighbors_of(&map, Point::new(2, 0));
        assert!(!n.contains(&Point::new(1, 1)));
        assert!(n.contains(&Point::new(3, 1)));
        // (2, 1) -> (1, 0) would cut past the wall at (1, 1).
        let n = neighbors_of(&map, Point::new(2, 1));
        assert!(!n.contains(&Point::new(1, 0)));
    }

    #[test]
    fn occupancy_does_not_change_topology() {
        let mut map = TileMap::new(3, 1, Connectivity::Four);
        assert!(map.set_occupied(Point::new(1, 0), true));
        assert!(map.tile(Point::new(1, 0)).unwrap().occupied);
        assert_eq!(
            neighbors_of(&map, Point::new(0, 0)),
            vec![Point::new(1, 0)]
        );
        map.clear_occupancy();
        assert!(map.tiles().all(|t| !t.occupied));
        assert!(!map.set_occupied(Point::new(5, 5), true));
    }

    #[test]
    fn walls_resolve_but_are_never_neighbors() {
        let mut map = TileMap::new(2, 1, Connectivity::Four);
        map.set_terrain(Point::new(1, 0), Terrain::Wall);
        assert!(map.node(Point::new(1, 0)).is_some());
        assert!(neighbors_of(&map, Point::new(0, 0)).is_empty());
        assert_eq!(Terrain::Wall.entry_cost(), f64::INFINITY);
        assert_eq!(Terrain::Rough.entry_cost(), 2.0);
    }
}
