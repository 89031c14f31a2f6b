//! Grid geometry: vectors, directions, rectangles and positions

use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Integer grid vector
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan length
    pub fn length4(self) -> i32 {
        self.x.abs() + self.y.abs()
    }

    /// Chebyshev length
    pub fn length8(self) -> i32 {
        self.x.abs().max(self.y.abs())
    }

    /// Chebyshev distance to another point
    pub fn dist8(self, other: Vec2) -> i32 {
        (other - self).length8()
    }

    pub fn signum(self) -> Vec2 {
        Vec2::new(self.x.signum(), self.y.signum())
    }

    /// The orthogonal unit steps that shorten this vector.
    ///
    /// Horizontal step first. A purely horizontal or vertical vector yields
    /// a single step; the zero vector yields none.
    pub fn approx_l1(self) -> Vec<Vec2> {
        let mut steps = Vec::with_capacity(2);
        if self.x != 0 {
            steps.push(Vec2::new(self.x.signum(), 0));
        }
        if self.y != 0 {
            steps.push(Vec2::new(0, self.y.signum()));
        }
        steps
    }

    /// The eight surrounding points
    pub fn neighbors8(self) -> impl Iterator<Item = Vec2> {
        DIRECTIONS8.iter().map(move |d| self + *d)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// All eight compass steps, clockwise from north-west
pub const DIRECTIONS8: [Vec2; 8] = [
    Vec2::new(-1, -1),
    Vec2::new(0, -1),
    Vec2::new(1, -1),
    Vec2::new(1, 0),
    Vec2::new(1, 1),
    Vec2::new(0, 1),
    Vec2::new(-1, 1),
    Vec2::new(-1, 0),
];

/// Orthogonal direction, used where a unit Manhattan step is required
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Dir4 {
    #[default]
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Dir4 {
    pub fn delta(self) -> Vec2 {
        match self {
            Dir4::North => Vec2::new(0, -1),
            Dir4::East => Vec2::new(1, 0),
            Dir4::South => Vec2::new(0, 1),
            Dir4::West => Vec2::new(-1, 0),
        }
    }

    /// Inverse of [`Dir4::delta`]
    pub fn from_delta(v: Vec2) -> Option<Dir4> {
        match (v.x, v.y) {
            (0, -1) => Some(Dir4::North),
            (1, 0) => Some(Dir4::East),
            (0, 1) => Some(Dir4::South),
            (-1, 0) => Some(Dir4::West),
            _ => None,
        }
    }

    pub fn opposite(self) -> Dir4 {
        match self {
            Dir4::North => Dir4::South,
            Dir4::East => Dir4::West,
            Dir4::South => Dir4::North,
            Dir4::West => Dir4::East,
        }
    }
}

/// Half-open rectangle `[x1, x2) x [y1, y2)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Square of side `2 * radius + 1` around `center`
    pub fn centered(center: Vec2, radius: i32) -> Self {
        Self::new(
            center.x - radius,
            center.y - radius,
            center.x + radius + 1,
            center.y + radius + 1,
        )
    }

    pub fn width(&self) -> i32 {
        (self.x2 - self.x1).max(0)
    }

    pub fn height(&self) -> i32 {
        (self.y2 - self.y1).max(0)
    }

    pub fn contains(&self, v: Vec2) -> bool {
        v.x >= self.x1 && v.x < self.x2 && v.y >= self.y1 && v.y < self.y2
    }

    /// Overlap of two rectangles (possibly empty)
    pub fn intersection(&self, other: &Rect) -> Rect {
        Rect::new(
            self.x1.max(other.x1),
            self.y1.max(other.y1),
            self.x2.min(other.x2),
            self.y2.min(other.y2),
        )
    }

    /// Every point, row by row
    pub fn iter(&self) -> impl Iterator<Item = Vec2> + use<> {
        let Rect { x1, y1, x2, y2 } = *self;
        (y1..y2).flat_map(move |y| (x1..x2).map(move |x| Vec2::new(x, y)))
    }
}

/// Index of a level in the world
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct LevelId(pub u32);

/// A point on a specific level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub level: LevelId,
    pub coord: Vec2,
}

impl Position {
    pub fn new(level: LevelId, coord: Vec2) -> Self {
        Self { level, coord }
    }

    pub fn plus(self, v: Vec2) -> Position {
        Position::new(self.level, self.coord + v)
    }

    pub fn is_same_level(&self, level: LevelId) -> bool {
        self.level == level
    }

    /// Chebyshev distance, or `None` across levels
    pub fn dist8(&self, other: &Position) -> Option<i32> {
        (self.level == other.level).then(|| self.coord.dist8(other.coord))
    }

    /// Vector from this position to `other`
    pub fn dir_to(&self, other: &Position) -> Vec2 {
        other.coord - self.coord
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths() {
        let v = Vec2::new(3, -5);
        assert_eq!(v.length4(), 8);
        assert_eq!(v.length8(), 5);
        assert_eq!(Vec2::new(1, 1).dist8(Vec2::new(4, 2)), 3);
    }

    #[test]
    fn test_approx_l1() {
        assert_eq!(
            Vec2::new(2, -3).approx_l1(),
            vec![Vec2::new(1, 0), Vec2::new(0, -1)]
        );
        assert_eq!(Vec2::new(0, 2).approx_l1(), vec![Vec2::new(0, 1)]);
        assert!(Vec2::ZERO.approx_l1().is_empty());
    }

    #[test]
    fn test_dir4_roundtrip() {
        for dir in [Dir4::North, Dir4::East, Dir4::South, Dir4::West] {
            assert_eq!(dir.delta().length4(), 1);
            assert_eq!(Dir4::from_delta(dir.delta()), Some(dir));
            assert_eq!(dir.opposite().delta(), -dir.delta());
        }
        assert_eq!(Dir4::from_delta(Vec2::new(1, 1)), None);
    }

    #[test]
    fn test_rect_centered() {
        let r = Rect::centered(Vec2::new(5, 5), 2);
        assert_eq!(r.width(), 5);
        assert!(r.contains(Vec2::new(3, 7)));
        assert!(!r.contains(Vec2::new(8, 5)));
        assert_eq!(r.iter().count(), 25);
        assert_eq!(r.iter().next(), Some(Vec2::new(3, 3)));
    }

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(-5, 5, 3, 20);
        assert_eq!(a.intersection(&b), Rect::new(0, 5, 3, 10));
        let empty = Rect::new(0, 0, 2, 2).intersection(&Rect::new(5, 5, 6, 6));
        assert_eq!(empty.iter().count(), 0);
    }

    #[test]
    fn test_position_distance() {
        let a = Position::new(LevelId(0), Vec2::new(1, 1));
        let b = Position::new(LevelId(0), Vec2::new(4, 3));
        let c = Position::new(LevelId(1), Vec2::new(4, 3));
        assert_eq!(a.dist8(&b), Some(3));
        assert_eq!(a.dist8(&c), None);
        assert_eq!(a.dir_to(&b), Vec2::new(3, 2));
    }
}
