//! Packed pixel formats and the compositing primitive.
//!
//! Every rasterizer expresses anti-aliasing and translucency as one or two
//! calls to [`Color::mix`]. Nothing else in the crate looks at channels.

use core::fmt;

/// 8-bit opacity / coverage. 0 = transparent, 255 = opaque.
pub type Opa = u8;

/// Fully transparent.
pub const OPA_TRANSP: Opa = 0;
/// Fully opaque.
pub const OPA_COVER: Opa = 255;

/// Rounding integer divide by 255, exact for `x <= 255 * 255 + 128`.
#[inline(always)]
const fn udiv255(x: u32) -> u32 {
    (x * 0x8081) >> 23
}

/// Interpolate one channel: `fg` weighted by `opa`, `bg` by `255 - opa`.
#[inline(always)]
const fn mix_channel(fg: u32, bg: u32, opa: u32) -> u32 {
    udiv255(fg * opa + bg * (255 - opa) + 0x80)
}

/// A packed pixel value in a surface's native format.
pub trait Color: Copy + PartialEq + fmt::Debug {
    const BLACK: Self;
    const WHITE: Self;

    /// Blend `self` into `bg` by `opa`.
    ///
    /// `opa == OPA_COVER` yields `self`, `opa == OPA_TRANSP` yields `bg`.
    fn mix(self, bg: Self, opa: Opa) -> Self;
}

/// Free-function form of [`Color::mix`] with explicit identity fast paths.
#[inline]
pub fn mix<C: Color>(src: C, dst: C, opa: Opa) -> C {
    match opa {
        OPA_COVER => src,
        OPA_TRANSP => dst,
        _ => src.mix(dst, opa),
    }
}

/// 16-bit RGB565.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    /// Pack from 8-bit channels (low bits dropped).
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Rgb565(((r as u16 >> 3) << 11) | ((g as u16 >> 2) << 5) | (b as u16 >> 3))
    }

    /// 5-bit red channel.
    #[inline]
    pub const fn red(self) -> u8 {
        (self.0 >> 11) as u8
    }

    /// 6-bit green channel.
    #[inline]
    pub const fn green(self) -> u8 {
        ((self.0 >> 5) & 0x3F) as u8
    }

    /// 5-bit blue channel.
    #[inline]
    pub const fn blue(self) -> u8 {
        (self.0 & 0x1F) as u8
    }
}

impl Color for Rgb565 {
    const BLACK: Self = Rgb565(0x0000);
    const WHITE: Self = Rgb565(0xFFFF);

    #[inline]
    fn mix(self, bg: Self, opa: Opa) -> Self {
        let o = opa as u32;
        let r = mix_channel(self.red() as u32, bg.red() as u32, o);
        let g = mix_channel(self.green() as u32, bg.green() as u32, o);
        let b = mix_channel(self.blue() as u32, bg.blue() as u32, o);
        Rgb565(((r << 11) | (g << 5) | b) as u16)
    }
}

impl fmt::Debug for Rgb565 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgb565({:#06x})", self.0)
    }
}

/// 32-bit ARGB8888.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Argb8888(pub u32);

impl Argb8888 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(0xFF, r, g, b)
    }

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Argb8888(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    #[inline]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }
}

impl Color for Argb8888 {
    const BLACK: Self = Argb8888::rgb(0, 0, 0);
    const WHITE: Self = Argb8888::rgb(0xFF, 0xFF, 0xFF);

    #[inline]
    fn mix(self, bg: Self, opa: Opa) -> Self {
        let o = opa as u32;
        // Each channel sits in its own byte; mixing per byte never carries.
        let mut out = 0u32;
        for shift in [0u32, 8, 16, 24] {
            let fg_c = (self.0 >> shift) & 0xFF;
            let bg_c = (bg.0 >> shift) & 0xFF;
            out |= mix_channel(fg_c, bg_c, o) << shift;
        }
        Argb8888(out)
    }
}

impl fmt::Debug for Argb8888 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Argb8888({:#010x})", self.0)
    }
}
