//! Borrowed draw targets.
//!
//! A [`Surface`] never owns its pixels. It is a view (bounds + stride) over
//! a caller-owned buffer and cannot outlive the borrow that created it.

use crate::area::{Area, Coord};
use crate::color::{Color, Opa, OPA_COVER};
use crate::config::OPA_MIN;
use crate::DrawError;

/// A rectangular view into a pixel buffer.
///
/// `area` places the buffer in absolute coordinates: pixel `(x, y)` lives at
/// `buf[(y - area.y1) * stride + (x - area.x1)]`.
pub struct Surface<'a, C: Color> {
    buf: &'a mut [C],
    area: Area,
    stride: usize,
}

impl<'a, C: Color> Surface<'a, C> {
    /// Create a surface over `buf` covering `area`, with `stride` pixels per row.
    pub fn new(buf: &'a mut [C], area: Area, stride: usize) -> Result<Self, DrawError> {
        if area.is_empty() {
            return Err(DrawError::EmptyArea);
        }
        let width = area.width() as usize;
        if stride < width {
            return Err(DrawError::StrideTooSmall { stride, width });
        }
        // The last row only needs `width` pixels, not a full stride.
        let required = stride * (area.height() as usize - 1) + width;
        if buf.len() < required {
            return Err(DrawError::BufferTooSmall {
                len: buf.len(),
                required,
            });
        }
        Ok(Surface { buf, area, stride })
    }

    /// Create a tightly packed surface with its origin at `(0, 0)`.
    pub fn packed(buf: &'a mut [C], width: Coord, height: Coord) -> Result<Self, DrawError> {
        let area = Area::from_size(0, 0, width, height);
        Self::new(buf, area, width.max(0) as usize)
    }

    /// Surface bounds in absolute coordinates.
    pub fn area(&self) -> Area {
        self.area
    }

    /// Pixels per row in the underlying buffer.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn width(&self) -> i32 {
        self.area.width()
    }

    pub fn height(&self) -> i32 {
        self.area.height()
    }

    /// Restrict `requested` to the surface bounds.
    #[inline]
    pub fn clip(&self, requested: &Area) -> Option<Area> {
        self.area.intersect(requested)
    }

    /// Surface-clip then caller-clip, in that order.
    ///
    /// `shape` is the bounding box of what is about to be drawn and `clip`
    /// the caller's explicit clip area.
    #[inline]
    pub fn clip_draw(&self, shape: &Area, clip: &Area) -> Option<Area> {
        self.clip(clip)?.intersect(shape)
    }

    #[inline]
    fn index(&self, rel_x: i32, rel_y: i32) -> usize {
        debug_assert!(
            rel_x >= 0 && rel_x < self.width() && rel_y >= 0 && rel_y < self.height(),
            "pixel ({}, {}) outside {}x{} surface",
            rel_x,
            rel_y,
            self.width(),
            self.height()
        );
        rel_y as usize * self.stride + rel_x as usize
    }

    /// Pixel at surface-relative coordinates.
    ///
    /// Callers guarantee `0 <= rel_x < width` and `0 <= rel_y < height`.
    /// Out-of-range access is a caller bug; it trips a debug assertion and
    /// otherwise panics or reads a padding pixel.
    #[inline]
    pub fn pixel(&self, rel_x: i32, rel_y: i32) -> C {
        self.buf[self.index(rel_x, rel_y)]
    }

    /// Mutable pixel at surface-relative coordinates. Same contract as [`Surface::pixel`].
    #[inline]
    pub fn pixel_mut(&mut self, rel_x: i32, rel_y: i32) -> &mut C {
        let idx = self.index(rel_x, rel_y);
        &mut self.buf[idx]
    }

    /// One full row (`width` pixels) at a surface-relative `rel_y`.
    #[inline]
    pub fn row_mut(&mut self, rel_y: i32) -> &mut [C] {
        let start = self.index(0, rel_y);
        let width = self.width() as usize;
        &mut self.buf[start..start + width]
    }

    /// Pixel at absolute coordinates, or `None` outside the surface.
    pub fn get(&self, x: Coord, y: Coord) -> Option<C> {
        if !self.area.contains(x, y) {
            return None;
        }
        Some(self.pixel(
            x as i32 - self.area.x1 as i32,
            y as i32 - self.area.y1 as i32,
        ))
    }

    /// Fill `area` (absolute coordinates) with `color` at opacity `opa`.
    pub fn fill(&mut self, area: &Area, color: C, opa: Opa) {
        if opa < OPA_MIN {
            return;
        }
        let Some(draw) = self.clip(area) else {
            log::trace!("fill skipped: {} outside surface {}", area, self.area);
            return;
        };
        let x_start = (draw.x1 as i32 - self.area.x1 as i32) as usize;
        let x_end = (draw.x2 as i32 - self.area.x1 as i32) as usize;
        for y in draw.y1..=draw.y2 {
            let row = self.row_mut(y as i32 - self.area.y1 as i32);
            let span = &mut row[x_start..=x_end];
            if opa == OPA_COVER {
                span.fill(color);
            } else {
                for px in span.iter_mut() {
                    *px = color.mix(*px, opa);
                }
            }
        }
    }
}
