//! KPIO Raster Core
//!
//! Integer-only 2D rasterization for microcontroller-class framebuffers,
//! plus the memory pools that back object and bitmap allocation.
//!
//! # Architecture
//!
//! The crate is organized into:
//!
//! - `area`: Rectangle arithmetic and clipping
//! - `surface`: Borrowed views over caller-owned pixel buffers
//! - `color`: Packed pixel formats and the `mix` compositing primitive
//! - `math`: Fixed-point helpers (integer square root)
//! - `draw`: Rasterizers (anti-aliased ring, 4-bit alpha icon blit)
//! - `mem`: Bump and general-purpose memory pools behind one contract
//! - `config`: Compile-time configuration
//!
//! Every rasterizer clips against the surface first, then against the
//! caller's area, and only then touches pixels. All per-pixel work reduces
//! to [`Color::mix`]. Nothing in the draw path allocates.

#![no_std]

extern crate alloc;

pub mod area;
pub mod color;
pub mod config;
pub mod draw;
pub mod math;
pub mod mem;
pub mod surface;

pub use area::{Area, Coord};
pub use color::{mix, Argb8888, Color, Opa, Rgb565, OPA_COVER, OPA_TRANSP};
pub use draw::icon::{blit_icon, IconPixmap};
pub use draw::ring::fill_annulus;
pub use mem::{MemoryPool, PoolCaps, PoolError, PoolMonitor, PoolOp};
pub use surface::Surface;

/// Errors raised while constructing draw targets and assets.
///
/// Draw calls themselves never fail: degenerate geometry and empty clips
/// are no-ops.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DrawError {
    /// The surface bounds are empty.
    #[error("surface area is empty")]
    EmptyArea,
    /// Row pitch is narrower than the surface.
    #[error("stride {stride} is smaller than surface width {width}")]
    StrideTooSmall { stride: usize, width: usize },
    /// Pixel buffer cannot hold `stride * height` pixels.
    #[error("pixel buffer holds {len} pixels, {required} required")]
    BufferTooSmall { len: usize, required: usize },
    /// Packed icon data is shorter than its dimensions require.
    #[error("icon data is {len} bytes, {required} required")]
    IconDataTooShort { len: usize, required: usize },
}
