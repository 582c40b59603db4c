//! Spin-locked pool wrapper.
//!
//! The pools themselves never lock. A host that calls into one pool from
//! several execution contexts (e.g. main loop and an interrupt-driven
//! loader) wraps it here and shares `&LockedPool`.

use core::ptr::NonNull;

use spin::{Mutex, MutexGuard};

use super::{MemoryPool, PoolError, PoolMonitor};

/// A pool behind a `spin::Mutex`.
pub struct LockedPool<P>(Mutex<P>);

impl<P: MemoryPool> LockedPool<P> {
    /// Wrap a pool. `const` so it can back a `static`.
    pub const fn new(pool: P) -> Self {
        LockedPool(Mutex::new(pool))
    }

    /// Lock for a sequence of calls.
    pub fn lock(&self) -> MutexGuard<'_, P> {
        self.0.lock()
    }

    /// See [`MemoryPool::init`].
    ///
    /// # Safety
    ///
    /// Same requirements as [`MemoryPool::init`].
    pub unsafe fn init(&self, start: *mut u8, len: usize) {
        self.0.lock().init(start, len)
    }

    /// See [`MemoryPool::add_pool`].
    ///
    /// # Safety
    ///
    /// Same requirements as [`MemoryPool::add_pool`].
    pub unsafe fn add_pool(&self, start: *mut u8, len: usize) -> Result<(), PoolError> {
        self.0.lock().add_pool(start, len)
    }

    pub fn allocate(&self, size: usize) -> Result<NonNull<u8>, PoolError> {
        self.0.lock().allocate(size)
    }

    /// See [`MemoryPool::reallocate`].
    ///
    /// # Safety
    ///
    /// Same requirements as [`MemoryPool::reallocate`].
    pub unsafe fn reallocate(&self, ptr: NonNull<u8>, size: usize) -> Result<NonNull<u8>, PoolError> {
        self.0.lock().reallocate(ptr, size)
    }

    /// See [`MemoryPool::release`].
    ///
    /// # Safety
    ///
    /// Same requirements as [`MemoryPool::release`].
    pub unsafe fn release(&self, ptr: NonNull<u8>) -> Result<(), PoolError> {
        self.0.lock().release(ptr)
    }

    pub fn monitor(&self) -> PoolMonitor {
        self.0.lock().monitor()
    }
}
