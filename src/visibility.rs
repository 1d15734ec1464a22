use std::collections::HashSet;

use bracket_geometry::prelude::Point;
use bracket_pathfinding::prelude::field_of_view;
use log::debug;

use crate::map::TileGrid;

/// Anything that can answer "which cells are visible from here".
pub trait FovOracle {
    fn compute(
        &self,
        origin: Point,
        radius: i32,
        light_walls: bool,
        grid: &TileGrid,
    ) -> HashSet<Point>;
}

/// Symmetric shadowcasting from bracket-pathfinding.
#[derive(Copy, Clone, Debug, Default)]
pub struct ShadowcastFov;

impl FovOracle for ShadowcastFov {
    fn compute(
        &self,
        origin: Point,
        radius: i32,
        light_walls: bool,
        grid: &TileGrid,
    ) -> HashSet<Point> {
        field_of_view(origin, radius, grid)
            .into_iter()
            .filter(|point| grid.in_bounds(*point))
            .filter(|point| light_walls || *point == origin || !grid.blocks_sight(*point))
            .collect()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TileView {
    Visible,
    /// Seen before, not in view now. Drawn dimmed.
    Remembered,
    Unseen,
}

/// Current field of view for the player. Only `recompute` changes it, and
/// the turn scheduler only calls that when the viewpoint moved.
#[derive(Clone, Debug)]
pub struct Visibility {
    radius: i32,
    light_walls: bool,
    visible: HashSet<Point>,
}

impl Visibility {
    pub fn new(radius: i32, light_walls: bool) -> Self {
        Self {
            radius,
            light_walls,
            visible: HashSet::new(),
        }
    }

    pub fn recompute(&mut self, oracle: &dyn FovOracle, origin: Point, grid: &mut TileGrid) {
        self.visible = oracle.compute(origin, self.radius, self.light_walls, grid);
        for point in &self.visible {
            grid.mark_explored(*point);
        }
        debug!(
            "fov from ({},{}) r={}: {} cells",
            origin.x,
            origin.y,
            self.radius,
            self.visible.len()
        );
    }

    pub fn can_see(&self, point: Point) -> bool {
        self.visible.contains(&point)
    }

    pub fn classify(&self, point: Point, grid: &TileGrid) -> TileView {
        if self.can_see(point) {
            TileView::Visible
        } else if grid.is_explored(point) {
            TileView::Remembered
        } else {
            TileView::Unseen
        }
    }
}
