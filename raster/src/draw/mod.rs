//! Rasterizers.
//!
//! Each entry point takes a target [`Surface`](crate::Surface), a caller clip
//! [`Area`](crate::Area), geometry, a fill color and a global opacity. The
//! order of work is always the same: build the shape's bounding box, clip it
//! against the surface, clip it against the caller's area, return early if
//! nothing is left, then walk destination pixels.

pub mod icon;
pub mod ring;

use crate::color::{mix, Color, Opa, OPA_COVER};

/// Composite one pixel.
///
/// Coverage is applied first against the existing destination; the global
/// opacity then blends that result against the same destination again.
#[inline(always)]
pub(crate) fn blend_px<C: Color>(px: &mut C, color: C, coverage: Opa, opa: Opa) {
    let dst = *px;
    let edge = mix(color, dst, coverage);
    *px = if opa == OPA_COVER {
        edge
    } else {
        mix(edge, dst, opa)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Argb8888;

    #[test]
    fn test_blend_px_order() {
        let mut px = Argb8888::BLACK;
        blend_px(&mut px, Argb8888::WHITE, 255, 255);
        assert_eq!(px, Argb8888::WHITE);

        // Half coverage then half opacity: a quarter of the way to white.
        let mut px = Argb8888::BLACK;
        blend_px(&mut px, Argb8888::WHITE, 128, 128);
        assert_eq!(px.red(), 64);

        let mut px = Argb8888::rgb(10, 20, 30);
        blend_px(&mut px, Argb8888::WHITE, 0, 200);
        assert_eq!(px, Argb8888::rgb(10, 20, 30));
    }
}
