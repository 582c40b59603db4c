//! Rectangle arithmetic and clipping.
//!
//! Areas are inclusive on both ends: `x1..=x2`, `y1..=y2`. An area with
//! `x1 > x2` or `y1 > y2` is empty and every draw call against it is a no-op.

use core::fmt;

/// Screen coordinate.
pub type Coord = i16;

/// Last coordinate of a span of `len` pixels starting at `start`.
const fn last_coord(start: Coord, len: Coord) -> Coord {
    let end = start as i32 + len as i32 - 1;
    if end > Coord::MAX as i32 {
        Coord::MAX
    } else if end < Coord::MIN as i32 {
        Coord::MIN
    } else {
        end as Coord
    }
}

/// An axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Area {
    pub x1: Coord,
    pub y1: Coord,
    pub x2: Coord,
    pub y2: Coord,
}

impl Area {
    /// Canonical empty area.
    pub const EMPTY: Area = Area {
        x1: 0,
        y1: 0,
        x2: -1,
        y2: -1,
    };

    /// Create an area from inclusive corners.
    pub const fn new(x1: Coord, y1: Coord, x2: Coord, y2: Coord) -> Self {
        Area { x1, y1, x2, y2 }
    }

    /// Create an area from a top-left corner and a size.
    ///
    /// A zero width or height yields an empty area. The far edge is clamped
    /// to `Coord::MAX`.
    pub const fn from_size(x: Coord, y: Coord, width: Coord, height: Coord) -> Self {
        Area {
            x1: x,
            y1: y,
            x2: last_coord(x, width),
            y2: last_coord(y, height),
        }
    }

    /// Width in pixels (zero for empty areas).
    #[inline]
    pub const fn width(&self) -> i32 {
        if self.x2 < self.x1 {
            0
        } else {
            self.x2 as i32 - self.x1 as i32 + 1
        }
    }

    /// Height in pixels (zero for empty areas).
    #[inline]
    pub const fn height(&self) -> i32 {
        if self.y2 < self.y1 {
            0
        } else {
            self.y2 as i32 - self.y1 as i32 + 1
        }
    }

    /// Number of pixels covered.
    pub const fn size(&self) -> u32 {
        self.width() as u32 * self.height() as u32
    }

    /// Check whether the area covers no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.x1 > self.x2 || self.y1 > self.y2
    }

    /// Check if a point lies inside the area.
    #[inline]
    pub const fn contains(&self, x: Coord, y: Coord) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }

    /// Check if this area lies entirely inside `outer`.
    pub const fn is_inside(&self, outer: &Area) -> bool {
        !self.is_empty()
            && self.x1 >= outer.x1
            && self.y1 >= outer.y1
            && self.x2 <= outer.x2
            && self.y2 <= outer.y2
    }

    /// Move the area by `(dx, dy)`.
    pub const fn translate(&self, dx: Coord, dy: Coord) -> Area {
        Area {
            x1: self.x1.saturating_add(dx),
            y1: self.y1.saturating_add(dy),
            x2: self.x2.saturating_add(dx),
            y2: self.y2.saturating_add(dy),
        }
    }

    /// Intersect two areas.
    ///
    /// Returns `None` when they do not overlap or either one is empty.
    /// Touching edges overlap by one pixel row or column because bounds
    /// are inclusive.
    #[inline]
    pub fn intersect(&self, other: &Area) -> Option<Area> {
        let res = Area {
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
            x2: self.x2.min(other.x2),
            y2: self.y2.min(other.y2),
        };
        if res.is_empty() {
            None
        } else {
            Some(res)
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})..=({},{})", self.x1, self.y1, self.x2, self.y2)
    }
}
