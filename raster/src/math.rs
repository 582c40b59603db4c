//! Fixed-point helpers.

/// Integer square root, rounded down.
#[inline]
pub fn isqrt(x: u64) -> u64 {
    if x < 2 {
        return x;
    }
    let mut rem = x;
    let mut root = 0u64;
    // Highest power of four not above x.
    let mut bit = 1u64 << ((63 - x.leading_zeros()) & !1);
    while bit != 0 {
        if rem >= root + bit {
            rem -= root + bit;
            root = (root >> 1) + bit;
        } else {
            root >>= 1;
        }
        bit >>= 2;
    }
    root
}

/// Square root of `x` in Q4 fixed point (1/16 pixel steps), rounded down.
#[inline]
pub fn sqrt_q4(x: u32) -> u32 {
    isqrt((x as u64) << 8) as u32
}
