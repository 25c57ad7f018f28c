use std::{
    alloc::{self, Layout},
    fmt,
    mem::{align_of, size_of},
    ops::{Deref, DerefMut},
    ptr::{self, NonNull},
    slice,
};

use log::debug;

use crate::error::{ParamsErr, Result};

/// An owned, zero initialized `f32` buffer whose start address is a multiple of a given
/// alignment.
///
/// The memory is released with the exact layout it was allocated with.
pub struct AlignedBuffer {
    ptr: NonNull<f32>,
    len: usize,
    layout: Layout,
}

// SAFETY: `AlignedBuffer` exclusively owns its allocation, just like a `Box<[f32]>`.
unsafe impl Send for AlignedBuffer {}
unsafe impl Sync for AlignedBuffer {}

impl AlignedBuffer {
    /// Allocates a new zeroed `AlignedBuffer`.
    ///
    /// # Arguments
    /// * `len` - The amount of `f32` slots.
    /// * `align` - The byte alignment of the first slot.
    ///
    /// # Returns
    /// `InvalidArgument` if `align` isn't a power of two of at least `align_of::<f32>()`,
    /// `OutOfMemory` if the size overflows or the allocator fails.
    pub fn zeroed(len: usize, align: usize) -> Result<Self> {
        let layout = Self::layout(len, align)?;

        if layout.size() == 0 {
            let ptr = NonNull::new(ptr::without_provenance_mut(layout.align()))
                .unwrap_or(NonNull::dangling());

            return Ok(Self { ptr, len, layout });
        }

        // SAFETY: `layout` has a non zero size.
        let raw = unsafe { alloc::alloc_zeroed(layout) };
        let Some(ptr) = NonNull::new(raw.cast::<f32>()) else {
            return Err(ParamsErr::OutOfMemory {
                params: len,
                bytes: layout.size(),
            });
        };

        debug!(params = len, bytes = layout.size(), align = layout.align(); "allocated parameter buffer");
        Ok(Self { ptr, len, layout })
    }

    fn layout(len: usize, align: usize) -> Result<Layout> {
        if !align.is_power_of_two() || align < align_of::<f32>() {
            return Err(ParamsErr::InvalidArgument(format!(
                "invalid buffer alignment {align}"
            )));
        }

        let out_of_memory = || ParamsErr::OutOfMemory {
            params: len,
            bytes: len.saturating_mul(size_of::<f32>()),
        };

        let bytes = len.checked_mul(size_of::<f32>()).ok_or_else(out_of_memory)?;
        Layout::from_size_align(bytes, align).map_err(|_| out_of_memory())
    }

    /// The byte alignment of the buffer.
    pub fn align(&self) -> usize {
        self.layout.align()
    }
}

impl Deref for AlignedBuffer {
    type Target = [f32];

    fn deref(&self) -> &Self::Target {
        // SAFETY: `ptr` is non null, aligned and valid for `len` initialized slots.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl DerefMut for AlignedBuffer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: same as `deref`, and `&mut self` guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for AlignedBuffer {
    fn drop(&mut self) {
        if self.layout.size() != 0 {
            // SAFETY: the pointer was returned by `alloc_zeroed` with this same layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), self.layout) };
        }
    }
}

impl fmt::Debug for AlignedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlignedBuffer")
            .field("len", &self.len)
            .field("align", &self.layout.align())
            .finish()
    }
}
