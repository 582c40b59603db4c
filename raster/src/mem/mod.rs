//! Memory pools.
//!
//! Two interchangeable strategies implement [`MemoryPool`]:
//!
//! - [`bump::BumpPool`]: monotonic offset, O(1), no metadata, no reuse.
//!   Suited to a boot-time arena of long-lived objects.
//! - [`general::GeneralPool`]: first-fit allocator over one or more regions
//!   (`linked_list_allocator`), with resize and release.
//!
//! A pool is an explicit value owned by the host and passed by reference to
//! whatever allocates. There is no hidden global. The strategy is fixed when
//! the host picks a type (see [`crate::config::DefaultPool`]); the two are
//! never swapped at runtime.
//!
//! Pools do not synchronize. Hosts with more than one execution context
//! wrap the pool in `locked::LockedPool`.

pub mod bump;
pub mod general;
#[cfg(feature = "locked")]
pub mod locked;

use core::fmt;
use core::mem::MaybeUninit;
use core::ptr::NonNull;

use bitflags::bitflags;

use crate::config;

bitflags! {
    /// Optional operations a pool strategy supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PoolCaps: u8 {
        /// Regions can be added after `init`.
        const ADD_POOL = 1 << 0;
        /// Allocations can be resized.
        const REALLOC = 1 << 1;
        /// Allocations can be returned individually.
        const RELEASE = 1 << 2;
    }
}

/// Pool operations that a strategy may not support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolOp {
    AddPool,
    Reallocate,
    Release,
}

impl PoolOp {
    /// Capability a strategy must report to accept this operation.
    pub const fn required_cap(self) -> PoolCaps {
        match self {
            PoolOp::AddPool => PoolCaps::ADD_POOL,
            PoolOp::Reallocate => PoolCaps::REALLOC,
            PoolOp::Release => PoolCaps::RELEASE,
        }
    }
}

impl fmt::Display for PoolOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PoolOp::AddPool => "add_pool",
            PoolOp::Reallocate => "reallocate",
            PoolOp::Release => "release",
        })
    }
}

/// Pool errors. `Err` is the "null" result of every pool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Zero-byte allocations are a caller bug.
    #[error("zero-size allocation")]
    ZeroSize,
    /// Not enough capacity left.
    #[error("out of memory: {requested} bytes requested, {available} available")]
    OutOfMemory { requested: usize, available: usize },
    /// The strategy does not support this operation.
    #[error("{0} is not supported by this pool")]
    Unsupported(PoolOp),
    /// A region is too small to hold allocator metadata.
    #[error("region of {len} bytes is too small")]
    RegionTooSmall { len: usize },
    /// Every region slot is in use.
    #[error("region limit of {max} reached")]
    RegionLimit { max: usize },
    /// The pointer does not belong to this pool.
    #[error("pointer not owned by this pool")]
    ForeignPointer,
}

/// Report a call the strategy cannot honor.
///
/// Fatal in debug builds. Release builds get `PoolError::Unsupported` and the
/// pool is left untouched either way.
#[cold]
pub(crate) fn contract_violation(op: PoolOp) -> PoolError {
    log::error!("memory pool contract violation: {} is not supported", op);
    if config::DEBUG_ENABLED {
        panic!("memory pool contract violation: {} is not supported", op);
    }
    PoolError::Unsupported(op)
}

/// Snapshot of pool usage.
///
/// `used_rate` is fixed point: high byte = whole percent, low byte =
/// hundredths. 30.00% is `30 << 8`, 12.34% is `(12 << 8) | 34`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolMonitor {
    pub total_size: usize,
    pub free_size: usize,
    pub used_size: usize,
    pub used_rate: u16,
}

impl PoolMonitor {
    /// Build a snapshot from raw counters. `used` is clamped to `total`.
    pub fn new(total: usize, used: usize) -> Self {
        let used = used.min(total);
        let used_rate = if total == 0 {
            0
        } else {
            let permyriad = (used as u64 * 10_000 / total as u64) as u16;
            ((permyriad / 100) << 8) | (permyriad % 100)
        };
        PoolMonitor {
            total_size: total,
            free_size: total - used,
            used_size: used,
            used_rate,
        }
    }

    /// Whole-percent part of `used_rate`.
    pub fn used_pct(&self) -> u8 {
        (self.used_rate >> 8) as u8
    }

    /// Hundredths part of `used_rate`.
    pub fn frac_pct(&self) -> u8 {
        (self.used_rate & 0xFF) as u8
    }
}

impl fmt::Display for PoolMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.used_pct(), self.frac_pct())
    }
}

/// Allocation contract shared by every pool strategy.
pub trait MemoryPool {
    /// Optional operations this strategy supports.
    fn caps(&self) -> PoolCaps;

    /// Register the initial region. Calling it again discards all previous
    /// state. A pool that was never initialized has zero capacity.
    ///
    /// # Safety
    ///
    /// `start..start + len` must be valid for reads and writes, unused by
    /// anything else, and outlive the pool.
    unsafe fn init(&mut self, start: *mut u8, len: usize);

    /// Safe form of [`MemoryPool::init`] for a `'static` region.
    fn init_from_slice(&mut self, mem: &'static mut [MaybeUninit<u8>]) {
        let len = mem.len();
        // SAFETY: the region is exclusively borrowed for 'static.
        unsafe { self.init(mem.as_mut_ptr().cast(), len) }
    }

    /// Add another region.
    ///
    /// # Safety
    ///
    /// Same requirements as [`MemoryPool::init`].
    unsafe fn add_pool(&mut self, start: *mut u8, len: usize) -> Result<(), PoolError>;

    /// Hand out `size` bytes.
    fn allocate(&mut self, size: usize) -> Result<NonNull<u8>, PoolError>;

    /// Resize an allocation, preserving `min(old, new)` bytes.
    ///
    /// # Safety
    ///
    /// `ptr` must come from this pool and not have been released.
    unsafe fn reallocate(&mut self, ptr: NonNull<u8>, size: usize)
        -> Result<NonNull<u8>, PoolError>;

    /// Return an allocation.
    ///
    /// # Safety
    ///
    /// `ptr` must come from this pool, not have been released, and not be
    /// used afterwards.
    unsafe fn release(&mut self, ptr: NonNull<u8>) -> Result<(), PoolError>;

    /// Current usage, recomputed on every call.
    fn monitor(&self) -> PoolMonitor;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use alloc::boxed::Box;
    use alloc::format;
    use alloc::vec;

    /// Leak a fresh region for a test pool.
    pub(crate) fn arena(len: usize) -> &'static mut [MaybeUninit<u8>] {
        Box::leak(vec![MaybeUninit::<u8>::uninit(); len].into_boxed_slice())
    }

    #[test]
    fn test_monitor_rate() {
        let m = PoolMonitor::new(100, 30);
        assert_eq!(m.used_size, 30);
        assert_eq!(m.free_size, 70);
        assert_eq!(m.used_rate, 30 << 8);
        assert_eq!(format!("{m}"), "30.00%");

        let m = PoolMonitor::new(10_000, 1234);
        assert_eq!(m.used_rate, (12 << 8) | 34);
        assert_eq!(format!("{m}"), "12.34%");

        let m = PoolMonitor::new(3, 3);
        assert_eq!(m.used_rate, 100 << 8);
    }

    #[test]
    fn test_monitor_zero_total() {
        let m = PoolMonitor::new(0, 0);
        assert_eq!(m, PoolMonitor::default());
        assert_eq!(PoolMonitor::new(0, 5).used_size, 0);
    }

    #[test]
    fn test_caps_per_op() {
        assert_eq!(PoolOp::Release.required_cap(), PoolCaps::RELEASE);
        assert!(PoolCaps::all().contains(PoolOp::AddPool.required_cap()));
        assert!(!PoolCaps::empty().contains(PoolOp::Reallocate.required_cap()));
    }
}
