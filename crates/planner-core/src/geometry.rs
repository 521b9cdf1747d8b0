use serde::{Deserialize, Serialize};

use crate::catalog::ObjectType;

/// A 2D point in continuous coordinates (scene pixels or fractional grid units).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// An integer grid position. One step is one grid unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self::default()
    }

    /// Shifted position, clamped at the ends of the `i64` range.
    pub fn offset(&self, dx: i64, dy: i64) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }
}

/// One of the four axis-aligned orientations, stored as quarter turns clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Number of quarter turns, 0..=3.
    pub fn steps(self) -> u8 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    pub fn from_steps(steps: u8) -> Self {
        Self::ALL[usize::from(steps % 4)]
    }

    pub fn degrees(self) -> f64 {
        f64::from(self.steps()) * 90.0
    }

    pub fn rotate_clockwise(self) -> Self {
        Self::from_steps(self.steps() + 1)
    }

    pub fn rotate_counterclockwise(self) -> Self {
        Self::from_steps(self.steps() + 3)
    }

    /// Width and length trade places at 90° and 270°.
    pub fn is_quarter_turn(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Raised when an integer does not name one of the four rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rotation must be between 0 and 3, got {0}")]
pub struct InvalidRotation(pub u8);

impl TryFrom<u8> for Rotation {
    type Error = InvalidRotation;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < 4 {
            Ok(Self::from_steps(value))
        } else {
            Err(InvalidRotation(value))
        }
    }
}

impl From<Rotation> for u8 {
    fn from(rotation: Rotation) -> Self {
        rotation.steps()
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl BBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Box spanned by two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn from_center(center: Point, width: f64, height: f64) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        Self::new(
            Point::new(center.x - half_w, center.y - half_h),
            Point::new(center.x + half_w, center.y + half_h),
        )
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Closed-interval overlap on both axes. Shared edges count.
    pub fn intersects(&self, other: &BBox) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Overlapping region, if any.
    pub fn intersection(&self, other: &BBox) -> Option<BBox> {
        if !self.intersects(other) {
            return None;
        }
        Some(Self {
            min: Point::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            max: Point::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        })
    }

    pub fn union(&self, other: &BBox) -> Self {
        Self {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Move every edge inward by `amount`.
    pub fn shrink(&self, amount: f64) -> Self {
        Self {
            min: Point::new(self.min.x + amount, self.min.y + amount),
            max: Point::new(self.max.x - amount, self.max.y - amount),
        }
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self {
            min: Point::new(self.min.x * factor, self.min.y * factor),
            max: Point::new(self.max.x * factor, self.max.y * factor),
        }
    }
}

// ── Grid snapping ────────────────────────────────────────────────────

/// Nearest multiple of `grid_size` to `value`, halves rounded away from zero.
///
/// Placement and dragging both go through this so a building never jitters
/// between neighbouring cells.
pub fn snap(value: f64, grid_size: f64) -> i64 {
    ((value / grid_size).round() * grid_size).round() as i64
}

/// Scene coordinates expressed in (fractional) grid units.
pub fn world_to_grid(point: Point, grid_size: f64) -> Point {
    Point::new(point.x / grid_size, point.y / grid_size)
}

/// Scene coordinates rounded to the nearest grid cell on each axis.
pub fn world_to_grid_snapped(point: Point, grid_size: f64) -> Position {
    let grid = world_to_grid(point, grid_size);
    Position::new(snap(grid.x, 1.0), snap(grid.y, 1.0))
}

/// Grid position back to scene coordinates.
pub fn grid_to_world(position: Position, grid_size: f64) -> Point {
    Point::new(position.x as f64 * grid_size, position.y as f64 * grid_size)
}

// ── Rotated extents ──────────────────────────────────────────────────

/// Offset from an instance's pivot to the centre of its rotated footprint,
/// scaled by `grid_size`.
///
/// The pivot is the stored position; rotation turns the footprint around it,
/// so the half-extent vector swaps and flips with each quarter turn:
/// `(w, l)`, `(-l, w)`, `(-w, -l)`, `(l, -w)`, all halved.
pub fn rotated_half_extent(ty: &ObjectType, rotation: Rotation, grid_size: f64) -> (f64, f64) {
    let w = ty.width as f64;
    let l = ty.length as f64;
    let (dx, dy) = match rotation {
        Rotation::Deg0 => (w, l),
        Rotation::Deg90 => (-l, w),
        Rotation::Deg180 => (-w, -l),
        Rotation::Deg270 => (l, -w),
    };
    (dx * grid_size / 2.0, dy * grid_size / 2.0)
}

/// Width and length of the footprint after rotation, in grid units.
pub fn rotated_size(ty: &ObjectType, rotation: Rotation) -> (f64, f64) {
    if rotation.is_quarter_turn() {
        (ty.length as f64, ty.width as f64)
    } else {
        (ty.width as f64, ty.length as f64)
    }
}

/// Axis-aligned area covered by a building in grid units.
pub fn footprint(ty: &ObjectType, position: Position, rotation: Rotation) -> BBox {
    let (dx, dy) = rotated_half_extent(ty, rotation, 1.0);
    let (width, height) = rotated_size(ty, rotation);
    BBox::from_center(position.to_point().translate(dx, dy), width, height)
}

/// Grid position that puts the building's centre under `cursor` (scene coordinates).
pub fn anchor_under_cursor(
    ty: &ObjectType,
    rotation: Rotation,
    cursor: Point,
    grid_size: f64,
) -> Position {
    let snapped = world_to_grid_snapped(cursor, grid_size);
    let (dx, dy) = rotated_half_extent(ty, rotation, 1.0);
    Position::new(
        snap(snapped.x as f64 - dx, 1.0),
        snap(snapped.y as f64 - dy, 1.0),
    )
}
