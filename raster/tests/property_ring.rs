//! Property: ring rasterization symmetry and edge monotonicity
//!
//! An unclipped ring is mirror-symmetric about both axes through its center,
//! edge coverage is monotonic across each band, and nothing is written
//! outside the caller's clip.

use kpio_raster::draw::ring::{inner_edge_coverage, outer_edge_coverage};
use kpio_raster::{fill_annulus, Area, Argb8888, Color, Surface};
use proptest::prelude::*;

const SIZE: i16 = 64;
const C: i16 = 32;

fn render(r_in: i16, r_out: i16, clip: Area, opa: u8) -> Vec<Argb8888> {
    let mut buf = vec![Argb8888::BLACK; (SIZE as usize) * (SIZE as usize)];
    {
        let mut surface = Surface::packed(&mut buf, SIZE, SIZE).unwrap();
        fill_annulus(&mut surface, &clip, C, C, r_in, r_out, Argb8888::WHITE, opa);
    }
    buf
}

fn px(buf: &[Argb8888], x: i16, y: i16) -> Argb8888 {
    buf[y as usize * SIZE as usize + x as usize]
}

/// Strategy for (r_in, r_out) with a non-negative ring width.
fn arb_radii() -> impl Strategy<Value = (i16, i16)> {
    (0i16..24).prop_flat_map(|r_in| (Just(r_in), r_in..30))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ring_is_mirror_symmetric((r_in, r_out) in arb_radii(), opa in 2u8..=255) {
        let full = Area::new(0, 0, SIZE - 1, SIZE - 1);
        let buf = render(r_in, r_out, full, opa);
        for dy in 0..31i16 {
            for dx in 0..31i16 {
                let p = px(&buf, C + dx, C + dy);
                prop_assert_eq!(p, px(&buf, C - dx, C + dy), "horizontal mirror at ({}, {})", dx, dy);
                prop_assert_eq!(p, px(&buf, C + dx, C - dy), "vertical mirror at ({}, {})", dx, dy);
            }
        }
    }

    #[test]
    fn ring_stays_inside_clip((r_in, r_out) in arb_radii(), x1 in 0i16..64, y1 in 0i16..64, w in 1i16..40, h in 1i16..40) {
        let clip = Area::from_size(x1, y1, w, h);
        let buf = render(r_in, r_out, clip, 255);
        for y in 0..SIZE {
            for x in 0..SIZE {
                if !clip.contains(x, y) {
                    prop_assert_eq!(px(&buf, x, y), Argb8888::BLACK);
                }
            }
        }
    }

    #[test]
    fn inner_edge_rises(r_in in 1i16..2000) {
        let lo = ((r_in as u32) - 1).pow(2);
        let hi = (r_in as u32).pow(2);
        let mut prev = 0u8;
        for r2 in lo..hi {
            let c = inner_edge_coverage(r2, r_in);
            prop_assert!(c >= prev);
            prev = c;
        }
    }

    #[test]
    fn outer_edge_falls(r_out in 0i16..2000) {
        let lo = (r_out as u32).pow(2);
        let hi = (r_out as u32 + 1).pow(2);
        let mut prev = 255u8;
        for r2 in lo..hi {
            let c = outer_edge_coverage(r2, r_out);
            prop_assert!(c <= prev);
            prev = c;
        }
    }
}
