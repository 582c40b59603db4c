//! Anti-aliased filled ring (annulus).
//!
//! Pixels are classified by squared distance from the center, so the inner
//! loop is add/multiply/compare only. A square root is taken just for the
//! one-pixel-wide edge bands.
//!
//! ```text
//!   r² <  (r_in-1)²            hole, skipped
//!   r² <  r_in²                inner edge, coverage rises toward r_in²
//!   r² <= r_out²               solid
//!   r² <  (r_out+1)²           outer edge, coverage falls past r_out²
//!   r² >= (r_out+1)²           outside, skipped
//! ```

use crate::area::{Area, Coord};
use crate::color::{Color, Opa, OPA_COVER, OPA_TRANSP};
use crate::config::OPA_MIN;
use crate::draw::blend_px;
use crate::math::sqrt_q4;
use crate::surface::Surface;

/// Distance of `sqrt(r2)` past `base` as 0..=255 over one pixel.
#[inline]
fn edge_frac(r2: u32, base: i32) -> Opa {
    let d = sqrt_q4(r2) as i32 - (base << 4);
    ((d * 255) >> 4).clamp(0, 255) as Opa
}

/// Coverage of a pixel in the inner edge band of a ring with inner radius `r_in`.
///
/// 0 at `r2 == (r_in - 1)²`, rising monotonically toward 255 as `r2`
/// approaches `r_in²`.
#[inline]
pub fn inner_edge_coverage(r2: u32, r_in: Coord) -> Opa {
    edge_frac(r2, r_in as i32 - 1)
}

/// Coverage of a pixel in the outer edge band of a ring with outer radius `r_out`.
///
/// 255 at `r2 == r_out²`, falling monotonically to 0 at `(r_out + 1)²`.
#[inline]
pub fn outer_edge_coverage(r2: u32, r_out: Coord) -> Opa {
    OPA_COVER - edge_frac(r2, r_out as i32)
}

#[inline]
fn square(v: i32) -> u32 {
    let a = v.unsigned_abs();
    a * a
}

/// Precomputed squared radii for one ring.
#[derive(Debug, Clone, Copy)]
struct Radii {
    r_in: Coord,
    r_out: Coord,
    in2: u32,
    out2: u32,
    in_relaxed2: u32,
    out_relaxed2: u32,
}

impl Radii {
    fn new(r_in: Coord, r_out: Coord) -> Self {
        let (ri, ro) = (r_in as i32, r_out as i32);
        Radii {
            r_in,
            r_out,
            in2: square(ri),
            out2: square(ro),
            in_relaxed2: if ri > 0 { square(ri - 1) } else { 0 },
            out_relaxed2: square(ro + 1),
        }
    }

    /// Coverage at squared distance `r2`. Only valid inside the band
    /// `in_relaxed2 <= r2 < out_relaxed2`.
    #[inline]
    fn coverage(&self, r2: u32) -> Opa {
        if r2 < self.in2 {
            inner_edge_coverage(r2, self.r_in)
        } else if r2 > self.out2 {
            outer_edge_coverage(r2, self.r_out)
        } else {
            OPA_COVER
        }
    }
}

/// Fill the ring between `r_in` and `r_out` around `(cx, cy)`.
///
/// `clip` is the caller's clip area in absolute coordinates. Negative radii
/// are treated as zero; `r_in >= r_out` is not rejected and draws whatever
/// the distance tests produce.
#[allow(clippy::too_many_arguments)]
pub fn fill_annulus<C: Color>(
    surface: &mut Surface<'_, C>,
    clip: &Area,
    cx: Coord,
    cy: Coord,
    r_in: Coord,
    r_out: Coord,
    color: C,
    opa: Opa,
) {
    if opa < OPA_MIN {
        return;
    }
    let r_in = r_in.max(0);
    let r_out = r_out.max(0);
    let shape = Area::new(
        cx.saturating_sub(r_out),
        cy.saturating_sub(r_out),
        cx.saturating_add(r_out),
        cy.saturating_add(r_out),
    );
    let Some(draw) = surface.clip_draw(&shape, clip) else {
        log::trace!("ring at ({}, {}) r_out {} clipped away", cx, cy, r_out);
        return;
    };

    let radii = Radii::new(r_in, r_out);
    let surf = surface.area();
    let (cx, cy) = (cx as i32, cy as i32);
    let (x1, x2) = (draw.x1 as i32, draw.x2 as i32);

    for y in draw.y1 as i32..=draw.y2 as i32 {
        let dy2 = square(y - cy);
        if dy2 >= radii.out_relaxed2 {
            continue;
        }
        let row = surface.row_mut(y - surf.y1 as i32);

        let mut x = x1;
        while x <= x2 {
            let r2 = dy2.saturating_add(square(x - cx));

            if r2 >= radii.out_relaxed2 {
                // Distance only grows from here on.
                if x > cx {
                    break;
                }
                x += 1;
                continue;
            }

            if r2 < radii.in_relaxed2 {
                // Everything up to the mirrored column is in the hole too.
                x = if x < cx { 2 * cx - x + 1 } else { x + 1 };
                continue;
            }

            let cov = radii.coverage(r2);
            if cov != OPA_TRANSP {
                let px = &mut row[(x - surf.x1 as i32) as usize];
                blend_px(px, color, cov, opa);
            }
            x += 1;
        }
    }
}
