//! Property: the compositing primitive
//!
//! `mix(src, dst, 255) == src`, `mix(src, dst, 0) == dst`, and every channel
//! of a partial mix lies between the two endpoints.

use kpio_raster::{mix, Argb8888, Color, Rgb565};
use proptest::prelude::*;

fn between(v: u8, a: u8, b: u8) -> bool {
    v >= a.min(b) && v <= a.max(b)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn argb_identity(src in any::<u32>(), dst in any::<u32>()) {
        let (s, d) = (Argb8888(src), Argb8888(dst));
        prop_assert_eq!(s.mix(d, 255), s);
        prop_assert_eq!(s.mix(d, 0), d);
        prop_assert_eq!(mix(s, d, 255), s);
        prop_assert_eq!(mix(s, d, 0), d);
    }

    #[test]
    fn rgb565_identity(src in any::<u16>(), dst in any::<u16>()) {
        let (s, d) = (Rgb565(src), Rgb565(dst));
        prop_assert_eq!(s.mix(d, 255), s);
        prop_assert_eq!(s.mix(d, 0), d);
    }

    #[test]
    fn argb_partial_mix_is_bounded(src in any::<u32>(), dst in any::<u32>(), opa in any::<u8>()) {
        let (s, d) = (Argb8888(src), Argb8888(dst));
        let m = s.mix(d, opa);
        prop_assert!(between(m.alpha(), s.alpha(), d.alpha()));
        prop_assert!(between(m.red(), s.red(), d.red()));
        prop_assert!(between(m.green(), s.green(), d.green()));
        prop_assert!(between(m.blue(), s.blue(), d.blue()));
    }

    #[test]
    fn rgb565_partial_mix_is_bounded(src in any::<u16>(), dst in any::<u16>(), opa in any::<u8>()) {
        let (s, d) = (Rgb565(src), Rgb565(dst));
        let m = s.mix(d, opa);
        prop_assert!(between(m.red(), s.red(), d.red()));
        prop_assert!(between(m.green(), s.green(), d.green()));
        prop_assert!(between(m.blue(), s.blue(), d.blue()));
    }
}
