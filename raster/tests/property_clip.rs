//! Property: clipping equals exact rectangle intersection
//!
//! `Surface::clip` is empty iff the rectangles do not overlap; otherwise it
//! is exactly their intersection, including touching edges and containment.

use kpio_raster::{Area, Argb8888, Color, Surface};
use proptest::prelude::*;

/// Strategy for a non-empty area within a small coordinate window.
fn arb_area() -> impl Strategy<Value = Area> {
    (-20i16..20, -20i16..20, 1i16..16, 1i16..16)
        .prop_map(|(x, y, w, h)| Area::from_size(x, y, w, h))
}

/// Reference: does pixel (x, y) lie in both rectangles?
fn in_both(a: &Area, b: &Area, x: i16, y: i16) -> bool {
    a.contains(x, y) && b.contains(x, y)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Surface clip matches a per-pixel membership test.
    #[test]
    fn surface_clip_is_intersection(surf_area in arb_area(), req in arb_area()) {
        let mut buf = vec![Argb8888::BLACK; surf_area.size() as usize];
        let surface = Surface::new(&mut buf, surf_area, surf_area.width() as usize).unwrap();
        let clipped = surface.clip(&req);

        let mut any = false;
        for y in -40i16..40 {
            for x in -40i16..40 {
                let expected = in_both(&surf_area, &req, x, y);
                any |= expected;
                let got = clipped.map_or(false, |c| c.contains(x, y));
                prop_assert_eq!(got, expected, "pixel ({}, {})", x, y);
            }
        }
        prop_assert_eq!(clipped.is_none(), !any);
    }

    /// Intersection is symmetric.
    #[test]
    fn intersect_commutes(a in arb_area(), b in arb_area()) {
        prop_assert_eq!(a.intersect(&b), b.intersect(&a));
    }

    /// A clip result always lies inside both inputs.
    #[test]
    fn intersect_is_inside_both(a in arb_area(), b in arb_area()) {
        if let Some(c) = a.intersect(&b) {
            prop_assert!(c.is_inside(&a));
            prop_assert!(c.is_inside(&b));
        }
    }
}

#[test]
fn touching_and_contained() {
    let a = Area::new(0, 0, 9, 9);
    assert_eq!(a.intersect(&Area::new(9, 9, 20, 20)), Some(Area::new(9, 9, 9, 9)));
    assert_eq!(a.intersect(&Area::new(10, 0, 20, 9)), None);
    assert_eq!(a.intersect(&Area::new(2, 2, 3, 3)), Some(Area::new(2, 2, 3, 3)));
}
