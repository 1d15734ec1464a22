pub mod generator;

use bracket_geometry::prelude::{Point, Rect};
use bracket_pathfinding::prelude::{Algorithm2D, BaseMap};

pub use generator::{Dungeon, GenerationParams, RoomPopulator, generate};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pub blocked: bool,
    pub blocks_sight: bool,
    explored: bool,
}

impl Default for Tile {
    fn default() -> Self {
        Tile::wall()
    }
}

impl Tile {
    pub fn wall() -> Self {
        Self {
            blocked: true,
            blocks_sight: true,
            explored: false,
        }
    }

    pub fn is_explored(&self) -> bool {
        self.explored
    }

    fn carve(&mut self) {
        self.blocked = false;
        self.blocks_sight = false;
    }
}

#[derive(Clone, Debug)]
pub struct TileGrid {
    pub width: i32,
    pub height: i32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn filled(width: i32, height: i32) -> Self {
        let size = (width.max(0) * height.max(0)) as usize;
        Self {
            width,
            height,
            tiles: vec![Tile::wall(); size],
        }
    }

    fn idx(&self, point: Point) -> Option<usize> {
        if self.in_bounds(point) {
            Some((point.y * self.width + point.x) as usize)
        } else {
            None
        }
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0 && point.x < self.width && point.y >= 0 && point.y < self.height
    }

    pub fn tile_at(&self, point: Point) -> Option<&Tile> {
        self.idx(point).map(|idx| &self.tiles[idx])
    }

    /// Out-of-bounds cells count as walls.
    pub fn is_wall(&self, point: Point) -> bool {
        self.tile_at(point).map_or(true, |tile| tile.blocked)
    }

    pub fn blocks_sight(&self, point: Point) -> bool {
        self.tile_at(point).map_or(true, |tile| tile.blocks_sight)
    }

    pub fn is_explored(&self, point: Point) -> bool {
        self.tile_at(point).is_some_and(Tile::is_explored)
    }

    /// Exploration is one-way; there is no way to forget a tile.
    pub fn mark_explored(&mut self, point: Point) {
        if let Some(idx) = self.idx(point) {
            self.tiles[idx].explored = true;
        }
    }

    pub fn carve_point(&mut self, point: Point) {
        if let Some(idx) = self.idx(point) {
            self.tiles[idx].carve();
        }
    }

    /// Opens the room's interior, leaving its border as wall.
    pub fn carve_room(&mut self, room: &Rect) {
        for y in (room.y1 + 1)..room.y2 {
            for x in (room.x1 + 1)..room.x2 {
                self.carve_point(Point::new(x, y));
            }
        }
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Point::new(x, y)))
    }

    pub fn floor_points(&self) -> Vec<Point> {
        self.points().filter(|point| !self.is_wall(*point)).collect()
    }
}

impl BaseMap for TileGrid {
    fn is_opaque(&self, idx: usize) -> bool {
        self.tiles.get(idx).map_or(true, |tile| tile.blocks_sight)
    }
}

impl Algorithm2D for TileGrid {
    fn dimensions(&self) -> Point {
        Point::new(self.width, self.height)
    }

    fn in_bounds(&self, point: Point) -> bool {
        TileGrid::in_bounds(self, point)
    }
}
