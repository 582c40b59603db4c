//! General-purpose pool.
//!
//! Wraps `linked_list_allocator::Heap` (one per region) and adds what the
//! pool contract needs on top of it: a header in front of every block so
//! `release` and `reallocate` only take a pointer, zeroed allocations, and
//! usage counters.
//!
//! The header holds two words: the capacity the block was allocated with and
//! the size currently in use. `reallocate` resizes in place whenever the new
//! size fits the capacity, so shrinking never needs free memory. `release`
//! always returns the full capacity to the heap.
//!
//! `used_size` in [`PoolMonitor`] counts bytes handed out by `allocate`
//! (including the new block of a `reallocate`) and is not reduced by
//! `release`. Callers that want the live figure use
//! [`GeneralPool::live_size`].

use core::alloc::Layout;
use core::ptr::{self, NonNull};

use linked_list_allocator::Heap;

use super::{MemoryPool, PoolCaps, PoolError, PoolMonitor};
use crate::config::{GENERAL_ALIGN, MAX_POOL_REGIONS, MIN_REGION_SIZE};

/// Bytes reserved in front of each block for its capacity and size.
const HEADER: usize = 2 * GENERAL_ALIGN;

const WORD: usize = core::mem::size_of::<usize>();

const _: () = assert!(HEADER >= 2 * WORD);

const EMPTY_HEAP: Heap = Heap::empty();

/// First-fit pool over up to `MAX_POOL_REGIONS` regions.
pub struct GeneralPool {
    heaps: [Heap; MAX_POOL_REGIONS],
    count: usize,
    allocated: usize,
}

impl GeneralPool {
    /// An uninitialized, zero-capacity pool.
    pub const fn empty() -> Self {
        GeneralPool {
            heaps: [EMPTY_HEAP; MAX_POOL_REGIONS],
            count: 0,
            allocated: 0,
        }
    }

    fn active(&self) -> &[Heap] {
        &self.heaps[..self.count]
    }

    /// Number of registered regions.
    pub fn regions(&self) -> usize {
        self.count
    }

    /// Bytes currently held by live blocks, headers and padding included.
    pub fn live_size(&self) -> usize {
        self.active().iter().map(Heap::used).sum()
    }

    /// Bytes not held by any live block.
    pub fn free_size(&self) -> usize {
        self.active().iter().map(Heap::free).sum()
    }

    fn block_layout(&self, size: usize) -> Result<Layout, PoolError> {
        size.checked_add(HEADER)
            .and_then(|total| Layout::from_size_align(total, GENERAL_ALIGN).ok())
            .ok_or(PoolError::OutOfMemory {
                requested: size,
                available: self.free_size(),
            })
    }

    /// Index of the region containing `addr`.
    fn owner(&self, addr: *mut u8) -> Option<usize> {
        self.active()
            .iter()
            .position(|heap| addr >= heap.bottom() && addr < heap.top())
    }

    /// Region, block start and header of a user pointer.
    ///
    /// Safety: `ptr` must have been returned by this pool and still be live.
    unsafe fn header(&self, ptr: NonNull<u8>) -> Result<(usize, NonNull<u8>, Header), PoolError> {
        let base = ptr.as_ptr().wrapping_sub(HEADER);
        let idx = self.owner(base).ok_or(PoolError::ForeignPointer)?;
        let header = Header {
            capacity: base.cast::<usize>().read(),
            size: base.add(WORD).cast::<usize>().read(),
        };
        Ok((idx, NonNull::new_unchecked(base), header))
    }

    /// Register a region, merging it into the last one when it starts at
    /// that region's top.
    unsafe fn add_region(&mut self, start: *mut u8, len: usize) -> Result<(), PoolError> {
        if start.is_null() || len < MIN_REGION_SIZE {
            return Err(PoolError::RegionTooSmall { len });
        }
        if let Some(last) = self.heaps[..self.count].last_mut() {
            if last.top() == start {
                last.extend(len);
                return Ok(());
            }
        }
        if self.count == MAX_POOL_REGIONS {
            return Err(PoolError::RegionLimit {
                max: MAX_POOL_REGIONS,
            });
        }
        self.heaps[self.count].init(start, len);
        self.count += 1;
        Ok(())
    }
}

/// Per-block bookkeeping stored in front of the user pointer.
#[derive(Clone, Copy)]
struct Header {
    capacity: usize,
    size: usize,
}

impl Header {
    /// Safety: `base` must point at `HEADER` writable bytes aligned to
    /// GENERAL_ALIGN.
    unsafe fn write(self, base: *mut u8) {
        base.cast::<usize>().write(self.capacity);
        base.add(WORD).cast::<usize>().write(self.size);
    }
}

impl Default for GeneralPool {
    fn default() -> Self {
        Self::empty()
    }
}

impl MemoryPool for GeneralPool {
    fn caps(&self) -> PoolCaps {
        PoolCaps::all()
    }

    unsafe fn init(&mut self, start: *mut u8, len: usize) {
        self.heaps = [EMPTY_HEAP; MAX_POOL_REGIONS];
        self.count = 0;
        self.allocated = 0;
        match self.add_region(start, len) {
            Ok(()) => log::info!("general pool initialized: {} bytes at {:p}", len, start),
            Err(err) => log::warn!("general pool left empty: {}", err),
        }
    }

    /// A region starting at the current top of the last one extends it in
    /// place. Otherwise it takes a new slot, and once `MAX_POOL_REGIONS`
    /// separate regions are registered further ones fail with
    /// [`PoolError::RegionLimit`]. Hosts that need more capacity should hand
    /// over fewer, larger or contiguous regions.
    unsafe fn add_pool(&mut self, start: *mut u8, len: usize) -> Result<(), PoolError> {
        self.add_region(start, len)?;
        log::debug!(
            "general pool grown by {} bytes, {} region(s)",
            len,
            self.count
        );
        Ok(())
    }

    fn allocate(&mut self, size: usize) -> Result<NonNull<u8>, PoolError> {
        if size == 0 {
            return Err(PoolError::ZeroSize);
        }
        let layout = self.block_layout(size)?;
        let count = self.count;
        for heap in self.heaps[..count].iter_mut() {
            if let Ok(base) = heap.allocate_first_fit(layout) {
                // SAFETY: the block is `size + HEADER` bytes, aligned to
                // GENERAL_ALIGN, and exclusively ours.
                let user = unsafe {
                    Header {
                        capacity: size,
                        size,
                    }
                    .write(base.as_ptr());
                    let user = base.as_ptr().add(HEADER);
                    ptr::write_bytes(user, 0, size);
                    NonNull::new_unchecked(user)
                };
                self.allocated = self.allocated.saturating_add(size);
                return Ok(user);
            }
        }
        Err(PoolError::OutOfMemory {
            requested: size,
            available: self.free_size(),
        })
    }

    unsafe fn reallocate(&mut self, ptr: NonNull<u8>, size: usize) -> Result<NonNull<u8>, PoolError> {
        if size == 0 {
            return Err(PoolError::ZeroSize);
        }
        let (_, base, header) = self.header(ptr)?;
        if size <= header.capacity {
            if size > header.size {
                ptr::write_bytes(ptr.as_ptr().add(header.size), 0, size - header.size);
            }
            Header { size, ..header }.write(base.as_ptr());
            return Ok(ptr);
        }
        let new = self.allocate(size)?;
        ptr::copy_nonoverlapping(ptr.as_ptr(), new.as_ptr(), header.size);
        self.release(ptr)?;
        Ok(new)
    }

    unsafe fn release(&mut self, ptr: NonNull<u8>) -> Result<(), PoolError> {
        let (idx, base, header) = self.header(ptr)?;
        let layout = self.block_layout(header.capacity)?;
        self.heaps[idx].deallocate(base, layout);
        Ok(())
    }

    fn monitor(&self) -> PoolMonitor {
        let total = self.active().iter().map(Heap::size).sum();
        PoolMonitor::new(total, self.allocated)
    }
}
