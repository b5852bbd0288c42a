/*!
 * Raw Memory Blocks
 * Untracked allocations obtained straight from the system allocator
 */

use std::alloc::{alloc, dealloc, Layout};
use std::ptr::NonNull;

use crate::core::types::{bytes_to_mb, Mb, Size};
use crate::memory::types::{Channel, StressError, StressResult};

/// Touch stride when committing a fresh block (one write per page)
const COMMIT_STRIDE: usize = 4096;

/// A raw memory block invisible to the allocator's retained accounting.
///
/// Must be released explicitly; the `Drop` impl guarantees the release, so a
/// block freed on eviction or clear never leaks.
pub struct RawBlock {
    ptr: NonNull<u8>,
    layout: Layout,
}

// The block is exclusively owned and its pointer never aliased.
unsafe impl Send for RawBlock {}

impl RawBlock {
    /// Allocate and commit `size` bytes. A refused allocation is an error,
    /// not a panic: the caller decides whether that ends the run.
    pub fn allocate(size: Size) -> StressResult<Self> {
        let layout = Layout::from_size_align(size.max(1), std::mem::align_of::<usize>())
            .map_err(|e| StressError::AllocationFailed {
                channel: Channel::Untracked,
                requested: size,
                reason: e.to_string(),
            })?;

        // SAFETY: layout has non-zero size
        let ptr = unsafe { alloc(layout) };
        let Some(ptr) = NonNull::new(ptr) else {
            return Err(StressError::AllocationFailed {
                channel: Channel::Untracked,
                requested: size,
                reason: "system allocator returned null".into(),
            });
        };

        // Touch one byte per page so the block is committed, not just reserved
        let mut offset = 0;
        while offset < layout.size() {
            // SAFETY: offset stays within the allocated layout
            unsafe { ptr.as_ptr().add(offset).write(0) };
            offset += COMMIT_STRIDE;
        }

        Ok(Self { ptr, layout })
    }

    pub fn size(&self) -> Size {
        self.layout.size()
    }

    pub fn size_mb(&self) -> Mb {
        bytes_to_mb(self.layout.size() as u64)
    }
}

impl Drop for RawBlock {
    fn drop(&mut self) {
        // SAFETY: ptr was returned by alloc with this exact layout and is
        // freed at most once
        unsafe { dealloc(self.ptr.as_ptr(), self.layout) };
    }
}
