//! Alpha-masked icon blit.
//!
//! Icons store one 4-bit coverage sample per pixel, row-major, two pixels per
//! byte. The even column of each pair is the high nibble, the odd column the
//! low nibble. Rows start on a byte boundary, so an odd width leaves the low
//! nibble of each row's last byte unused.

use alloc::vec;
use alloc::vec::Vec;

use crate::area::{Area, Coord};
use crate::color::{Color, Opa, OPA_TRANSP};
use crate::config::OPA_MIN;
use crate::draw::blend_px;
use crate::surface::Surface;
use crate::DrawError;

/// Immutable 4-bit alpha bitmap.
///
/// Borrowed, not owned: icons are usually `static` asset tables shared by
/// every draw of the same glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconPixmap<'a> {
    width: u16,
    height: u16,
    data: &'a [u8],
}

impl<'a> IconPixmap<'a> {
    /// Wrap packed sample data, checking it covers `width x height`.
    pub fn new(width: u16, height: u16, data: &'a [u8]) -> Result<Self, DrawError> {
        let required = Self::stride_for(width) * height as usize;
        if data.len() < required {
            return Err(DrawError::IconDataTooShort {
                len: data.len(),
                required,
            });
        }
        Ok(IconPixmap {
            width,
            height,
            data,
        })
    }

    #[inline]
    const fn stride_for(width: u16) -> usize {
        (width as usize + 1) / 2
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        Self::stride_for(self.width)
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// 8-bit coverage of icon pixel `(x, y)`.
    ///
    /// The 4-bit sample is replicated into both nibbles, so 0x0 maps to 0x00
    /// and 0xF maps to 0xFF. Coordinates must be inside the icon.
    #[inline]
    pub fn coverage_at(&self, x: u16, y: u16) -> Opa {
        debug_assert!(x < self.width && y < self.height);
        let byte = self.data[y as usize * self.stride() + x as usize / 2];
        expand_nibble(nibble(byte, x))
    }

    /// Pack 8-bit coverages (row-major, `width * height` entries) into the
    /// 4-bit layout. Only the high nibble of each coverage survives.
    pub fn pack(width: u16, height: u16, coverages: &[Opa]) -> Result<Vec<u8>, DrawError> {
        let required = width as usize * height as usize;
        if coverages.len() < required {
            return Err(DrawError::IconDataTooShort {
                len: coverages.len(),
                required,
            });
        }
        let stride = Self::stride_for(width);
        let mut out = vec![0u8; stride * height as usize];
        for y in 0..height as usize {
            for x in 0..width as usize {
                let sample = coverages[y * width as usize + x] >> 4;
                let byte = &mut out[y * stride + x / 2];
                if x % 2 == 0 {
                    *byte |= sample << 4;
                } else {
                    *byte |= sample;
                }
            }
        }
        Ok(out)
    }
}

/// High nibble for even columns, low nibble for odd ones.
#[inline(always)]
fn nibble(byte: u8, x: u16) -> u8 {
    if x & 1 == 0 {
        byte >> 4
    } else {
        byte & 0x0F
    }
}

#[inline(always)]
fn expand_nibble(n: u8) -> Opa {
    n | (n << 4)
}

/// Blit `icon` with its top-left corner at `(x, y)`, tinted with `color`.
///
/// Each sample's coverage blends `color` into the destination; `opa` below
/// `OPA_COVER` then scales that result against the original destination.
pub fn blit_icon<C: Color>(
    surface: &mut Surface<'_, C>,
    clip: &Area,
    x: Coord,
    y: Coord,
    color: C,
    opa: Opa,
    icon: &IconPixmap<'_>,
) {
    if opa < OPA_MIN || icon.width == 0 || icon.height == 0 {
        return;
    }
    let shape = Area::from_size(
        x,
        y,
        icon.width.min(Coord::MAX as u16) as Coord,
        icon.height.min(Coord::MAX as u16) as Coord,
    );
    let Some(draw) = surface.clip_draw(&shape, clip) else {
        log::trace!("icon at ({}, {}) clipped away", x, y);
        return;
    };

    let surf = surface.area();
    let stride = icon.stride();
    for dy in draw.y1 as i32..=draw.y2 as i32 {
        let rel_y = (dy - y as i32) as usize;
        let src = &icon.data[rel_y * stride..(rel_y + 1) * stride];
        let row = surface.row_mut(dy - surf.y1 as i32);

        for dx in draw.x1 as i32..=draw.x2 as i32 {
            let rel_x = (dx - x as i32) as u16;
            let cov = expand_nibble(nibble(src[rel_x as usize / 2], rel_x));
            if cov == OPA_TRANSP {
                continue;
            }
            blend_px(&mut row[(dx - surf.x1 as i32) as usize], color, cov, opa);
        }
    }
}
