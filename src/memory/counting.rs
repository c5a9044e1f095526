/*!
 * Counting Allocator
 * Global allocator wrapper that keeps process-wide heap counters
 *
 * Install it at the binary root:
 *
 * ```ignore
 * #[global_allocator]
 * static GLOBAL: CountingAllocator = CountingAllocator::new(std::alloc::System);
 * ```
 *
 * The counters are shared by every instance, so reading them never needs a
 * handle to the installed allocator. When no instance is installed they stay
 * at zero.
 */

use crate::core::types::Size;
use serde::{Deserialize, Serialize};
use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Cumulative bytes handed out since process start
static TOTAL_ALLOCATED: AtomicUsize = AtomicUsize::new(0);

/// Bytes handed out and not yet returned
static LIVE_BYTES: AtomicUsize = AtomicUsize::new(0);

/// Set by the first allocation routed through a `CountingAllocator`
static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Snapshot of the global allocator counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatorCounters {
    pub total_allocated: Size,
    pub live: Size,
}

/// Read the current counters
pub fn counters() -> AllocatorCounters {
    AllocatorCounters {
        total_allocated: TOTAL_ALLOCATED.load(Ordering::Relaxed),
        live: LIVE_BYTES.load(Ordering::Relaxed),
    }
}

/// Whether a counting allocator is serving this process
pub fn is_installed() -> bool {
    INSTALLED.load(Ordering::Relaxed)
}

#[inline]
fn record_alloc(size: Size) {
    if !INSTALLED.load(Ordering::Relaxed) {
        INSTALLED.store(true, Ordering::Relaxed);
    }
    TOTAL_ALLOCATED.fetch_add(size, Ordering::Relaxed);
    LIVE_BYTES.fetch_add(size, Ordering::Relaxed);
}

#[inline]
fn record_dealloc(size: Size) {
    LIVE_BYTES.fetch_sub(size, Ordering::Relaxed);
}

/// Allocator wrapper counting every byte that passes through `inner`
pub struct CountingAllocator<A = System> {
    inner: A,
}

impl<A> CountingAllocator<A> {
    pub const fn new(inner: A) -> Self {
        Self { inner }
    }
}

// Safety: every call is forwarded unchanged to `inner`; only counters are added.
unsafe impl<A: GlobalAlloc> GlobalAlloc for CountingAllocator<A> {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = self.inner.alloc(layout);
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = self.inner.alloc_zeroed(layout);
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        self.inner.dealloc(ptr, layout);
        record_dealloc(layout.size());
    }

    // A successful realloc counts as releasing the old size and allocating the new one
    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = self.inner.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            record_dealloc(layout.size());
            record_alloc(new_size);
        }
        new_ptr
    }
}
