//! Monotonic bump allocator.
//!
//! Allocations are laid out back to back from the start of a single region
//! and never reclaimed. Memory is not cleared. `add_pool`, `reallocate` and
//! `release` would break the monotonic offset and are contract violations.

use core::ptr::NonNull;

use super::{contract_violation, MemoryPool, PoolCaps, PoolError, PoolMonitor, PoolOp};

/// Bump allocator over one caller-provided region.
pub struct BumpPool {
    start: *mut u8,
    total: usize,
    offset: usize,
}

// SAFETY: the pool is the only user of its region once initialized, and all
// access goes through `&mut self`.
unsafe impl Send for BumpPool {}

impl BumpPool {
    /// An uninitialized, zero-capacity pool.
    pub const fn empty() -> Self {
        BumpPool {
            start: core::ptr::null_mut(),
            total: 0,
            offset: 0,
        }
    }

    /// Bytes not yet handed out.
    pub fn remaining(&self) -> usize {
        self.total - self.offset
    }
}

impl Default for BumpPool {
    fn default() -> Self {
        Self::empty()
    }
}

impl MemoryPool for BumpPool {
    fn caps(&self) -> PoolCaps {
        PoolCaps::empty()
    }

    unsafe fn init(&mut self, start: *mut u8, len: usize) {
        self.start = start;
        self.total = if start.is_null() { 0 } else { len };
        self.offset = 0;
        log::info!("bump pool initialized: {} bytes at {:p}", self.total, start);
    }

    unsafe fn add_pool(&mut self, _start: *mut u8, _len: usize) -> Result<(), PoolError> {
        Err(contract_violation(PoolOp::AddPool))
    }

    fn allocate(&mut self, size: usize) -> Result<NonNull<u8>, PoolError> {
        if size == 0 {
            return Err(PoolError::ZeroSize);
        }
        let available = self.remaining();
        if size > available {
            return Err(PoolError::OutOfMemory {
                requested: size,
                available,
            });
        }
        // SAFETY: offset + size <= total, so the result stays inside the
        // region given to `init`; `total > 0` implies `start` is non-null.
        let ptr = unsafe { NonNull::new_unchecked(self.start.add(self.offset)) };
        self.offset += size;
        Ok(ptr)
    }

    unsafe fn reallocate(
        &mut self,
        _ptr: NonNull<u8>,
        _size: usize,
    ) -> Result<NonNull<u8>, PoolError> {
        Err(contract_violation(PoolOp::Reallocate))
    }

    unsafe fn release(&mut self, _ptr: NonNull<u8>) -> Result<(), PoolError> {
        Err(contract_violation(PoolOp::Release))
    }

    fn monitor(&self) -> PoolMonitor {
        PoolMonitor::new(self.total, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mem::tests::arena;

    fn pool(len: usize) -> BumpPool {
        let mut pool = BumpPool::empty();
        pool.init_from_slice(arena(len));
        pool
    }

    #[test]
    fn test_sequential_allocations_are_adjacent() {
        let mut pool = pool(100);
        let a = pool.allocate(10).unwrap();
        let b = pool.allocate(20).unwrap();
        assert_eq!(b.as_ptr() as usize - a.as_ptr() as usize, 10);
        assert_eq!(pool.remaining(), 70);
    }

    #[test]
    fn test_exhaustion_leaves_state_untouched() {
        let mut pool = pool(32);
        pool.allocate(30).unwrap();
        let before = pool.monitor();
        assert_eq!(
            pool.allocate(3),
            Err(PoolError::OutOfMemory {
                requested: 3,
                available: 2
            })
        );
        assert_eq!(pool.monitor(), before);
        assert!(pool.allocate(2).is_ok());
    }

    #[test]
    fn test_zero_size_rejected() {
        let mut pool = pool(8);
        assert_eq!(pool.allocate(0), Err(PoolError::ZeroSize));
        assert_eq!(pool.monitor().used_size, 0);
    }

    #[test]
    fn test_uninitialized_has_no_capacity() {
        let mut pool = BumpPool::empty();
        assert!(matches!(
            pool.allocate(1),
            Err(PoolError::OutOfMemory { available: 0, .. })
        ));
        assert_eq!(pool.monitor(), PoolMonitor::default());
    }

    #[test]
    fn test_monitor_after_allocation() {
        let mut pool = pool(100);
        pool.allocate(30).unwrap();
        let m = pool.monitor();
        assert_eq!(m.total_size, 100);
        assert_eq!(m.used_size, 30);
        assert_eq!(m.free_size, 70);
        assert_eq!(m.used_rate, 30 << 8);
    }

    #[test]
    fn test_reinit_resets_offset() {
        let mut pool = pool(16);
        pool.allocate(16).unwrap();
        pool.init_from_slice(arena(16));
        assert_eq!(pool.remaining(), 16);
    }

    #[test]
    fn test_no_optional_caps() {
        assert!(pool(4).caps().is_empty());
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "contract violation"))]
    fn test_add_pool_is_fatal() {
        let mut pool = pool(16);
        let extra = arena(16);
        let res = unsafe { pool.add_pool(extra.as_mut_ptr().cast(), extra.len()) };
        assert_eq!(res, Err(PoolError::Unsupported(PoolOp::AddPool)));
        assert_eq!(pool.monitor().total_size, 16);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "contract violation"))]
    fn test_reallocate_is_fatal() {
        let mut pool = pool(16);
        let p = pool.allocate(4).unwrap();
        let res = unsafe { pool.reallocate(p, 8) };
        assert_eq!(res, Err(PoolError::Unsupported(PoolOp::Reallocate)));
        assert_eq!(pool.monitor().used_size, 4);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "contract violation"))]
    fn test_release_is_fatal() {
        let mut pool = pool(16);
        let p = pool.allocate(4).unwrap();
        let res = unsafe { pool.release(p) };
        assert_eq!(res, Err(PoolError::Unsupported(PoolOp::Release)));
        assert_eq!(pool.monitor().used_size, 4);
    }
}
