//! Raster configuration constants.
//!
//! This module contains compile-time configuration for the raster core.
//! The pool strategy is chosen here by Cargo feature and cannot change at
//! runtime.

use crate::color::Opa;

/// Opacities below this draw nothing.
pub const OPA_MIN: Opa = 2;

/// Alignment of every general-pool block, in bytes.
///
/// The hidden header in front of each block takes two of these units.
pub const GENERAL_ALIGN: usize = 8;

/// Pool strategy used by hosts that don't pick one explicitly.
#[cfg(feature = "bump-pool")]
pub type DefaultPool = crate::mem::bump::BumpPool;

/// Pool strategy used by hosts that don't pick one explicitly.
#[cfg(not(feature = "bump-pool"))]
pub type DefaultPool = crate::mem::general::GeneralPool;

/// Pool contract violations panic when set (debug builds).
pub const DEBUG_ENABLED: bool = cfg!(debug_assertions);

/// Maximum number of separate regions a general pool can manage.
///
/// Regions added at the top of the last one merge into it and do not count.
pub const MAX_POOL_REGIONS: usize = 4;

/// Regions smaller than this cannot hold allocator metadata.
pub const MIN_REGION_SIZE: usize = 64;
