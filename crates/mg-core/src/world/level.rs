//! Level grid

use serde::{Deserialize, Serialize};

use crate::creature::CreatureId;
use crate::geom::{LevelId, Rect, Vec2};
use crate::object::Item;

use super::furniture::Furniture;
use super::terrain::Terrain;

/// One map square
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub terrain: Terrain,
    pub furniture: Option<Furniture>,
    pub items: Vec<Item>,
    pub creature: Option<CreatureId>,
    /// Marks cells whose items are indexed as merchandise
    pub for_sale: bool,
}

impl Cell {
    pub fn blocks_sight(&self) -> bool {
        self.terrain.blocks_sight() || self.furniture.is_some_and(|f| f.kind.blocks_sight())
    }

    pub fn blocks_movement(&self) -> bool {
        self.furniture.is_some_and(|f| f.kind.blocks_movement())
    }

    /// Name used in crash messages: furniture first, then terrain
    pub fn name(&self) -> String {
        match self.furniture {
            Some(furniture) if furniture.kind.blocks_movement() => furniture.name(),
            _ => self.terrain.to_string(),
        }
    }
}

/// A rectangular map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: LevelId,
    pub name: String,
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Level {
    /// Create a level filled with one terrain
    pub fn new(name: impl Into<String>, width: i32, height: i32, terrain: Terrain) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let cells = (0..width * height)
            .map(|_| Cell {
                terrain,
                ..Default::default()
            })
            .collect();
        Self {
            id: LevelId::default(),
            name: name.into(),
            width,
            height,
            cells,
        }
    }

    /// Floor surrounded by a one-cell wall border
    pub fn walled(name: impl Into<String>, width: i32, height: i32) -> Self {
        let mut level = Self::new(name, width, height, Terrain::Floor);
        for v in level.bounds().iter() {
            if v.x == 0 || v.y == 0 || v.x == level.width - 1 || v.y == level.height - 1 {
                level.set_terrain(v, Terrain::Wall);
            }
        }
        level
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn in_bounds(&self, v: Vec2) -> bool {
        self.bounds().contains(v)
    }

    fn index(&self, v: Vec2) -> Option<usize> {
        self.in_bounds(v)
            .then(|| (v.y * self.width + v.x) as usize)
    }

    pub fn cell(&self, v: Vec2) -> Option<&Cell> {
        self.index(v).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, v: Vec2) -> Option<&mut Cell> {
        self.index(v).map(|i| &mut self.cells[i])
    }

    pub fn set_terrain(&mut self, v: Vec2, terrain: Terrain) {
        if let Some(cell) = self.cell_mut(v) {
            cell.terrain = terrain;
        }
    }

    pub fn set_furniture(&mut self, v: Vec2, furniture: Option<Furniture>) {
        if let Some(cell) = self.cell_mut(v) {
            cell.furniture = furniture;
        }
    }

    pub fn terrain(&self, v: Vec2) -> Option<Terrain> {
        self.cell(v).map(|c| c.terrain)
    }

    pub fn creature_at(&self, v: Vec2) -> Option<CreatureId> {
        self.cell(v).and_then(|c| c.creature)
    }

    /// Fill a rectangle with one terrain
    pub fn fill(&mut self, area: Rect, terrain: Terrain) {
        for v in area.intersection(&self.bounds()).iter() {
            self.set_terrain(v, terrain);
        }
    }

    /// Bresenham line of sight. A blocking cell is itself visible.
    pub fn has_line_of_sight(&self, from: Vec2, to: Vec2) -> bool {
        let mut x = from.x;
        let mut y = from.y;
        let dx = (to.x - x).abs();
        let dy = -(to.y - y).abs();
        let sx = if x < to.x { 1 } else { -1 };
        let sy = if y < to.y { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if (x, y) != (from.x, from.y) {
                let Some(cell) = self.cell(Vec2::new(x, y)) else {
                    return false;
                };
                if cell.blocks_sight() {
                    return x == to.x && y == to.y;
                }
            }

            if x == to.x && y == to.y {
                return true;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}
