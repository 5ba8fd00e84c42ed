//! Heap allocated codec handles and the allocator they come from.
//!
//! A [`CodecHandle`] puts one [`Codec`] in memory obtained from the process-wide handle
//! allocator. That allocator is the system allocator unless [`set_allocator`] installs another
//! one. Only codec handles use it. Each handle keeps the allocator it was created with and
//! releases its memory through that allocator, even if the setting changes in the meantime.

use std::alloc::{GlobalAlloc, Layout, System};
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};
use std::sync::{PoisonError, RwLock};

use log::trace;

use crate::error::{AllocationError, Result};
use crate::huffman_coding::huffman::Codec;
use crate::FrequencyTable;

/// Allocator used for handles created from now on.
static HANDLE_ALLOCATOR: RwLock<&'static (dyn GlobalAlloc + Sync)> = RwLock::new(&System);

/// Choose the allocator for codec handles. `None` goes back to the system allocator.
pub fn set_allocator(allocator: Option<&'static (dyn GlobalAlloc + Sync)>) {
    let mut slot = HANDLE_ALLOCATOR
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *slot = allocator.unwrap_or(&System);
}

fn current_allocator() -> &'static (dyn GlobalAlloc + Sync) {
    *HANDLE_ALLOCATOR
        .read()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Owning pointer to a [`Codec`] living in handle allocator memory.
///
/// Dereferences to the codec, so `rebuild`, `encode`, `decode` and the bound helpers are called
/// directly on the handle.
pub struct CodecHandle {
    codec: NonNull<Codec>,
    allocator: &'static (dyn GlobalAlloc + Sync),
}

// The handle owns its codec exclusively, like a Box, and the allocator is Sync.
unsafe impl Send for CodecHandle {}
unsafe impl Sync for CodecHandle {}

impl CodecHandle {
    /// Allocate a codec and build it from `table` (a flat table if none is given).
    pub fn create(table: Option<&FrequencyTable>) -> Result<Self> {
        let layout = Layout::new::<Codec>();
        let allocator = current_allocator();

        // SAFETY: Codec is not zero sized, so the layout is valid for alloc.
        let raw = unsafe { allocator.alloc(layout) } as *mut Codec;
        let codec = NonNull::new(raw).ok_or(AllocationError {
            size: layout.size(),
        })?;
        // SAFETY: the memory is fresh, properly aligned for Codec, and large enough.
        unsafe { codec.as_ptr().write(Codec::empty()) };
        trace!("Allocated {} byte codec handle", layout.size());

        // On a rebuild error the handle is dropped here, which releases the memory.
        let mut handle = Self { codec, allocator };
        handle.rebuild(table)?;
        Ok(handle)
    }

    /// Release the handle. Same as dropping it.
    pub fn destroy(self) {
        drop(self)
    }
}

impl Deref for CodecHandle {
    type Target = Codec;

    fn deref(&self) -> &Codec {
        // SAFETY: the pointer was initialized in create and stays valid until drop.
        unsafe { self.codec.as_ref() }
    }
}

impl DerefMut for CodecHandle {
    fn deref_mut(&mut self) -> &mut Codec {
        // SAFETY: as above, and &mut self guarantees exclusive access.
        unsafe { self.codec.as_mut() }
    }
}

impl Drop for CodecHandle {
    fn drop(&mut self) {
        let layout = Layout::new::<Codec>();
        // SAFETY: the codec was written in create and was allocated by this allocator with
        // this layout. Nothing uses the pointer after this.
        unsafe {
            ptr::drop_in_place(self.codec.as_ptr());
            self.allocator.dealloc(self.codec.as_ptr() as *mut u8, layout);
        }
        trace!("Released {} byte codec handle", layout.size());
    }
}

impl std::fmt::Debug for CodecHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CodecHandle").field(&**self).finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tools::freq_count::freqs;

    #[test]
    fn create_and_roundtrip_test() {
        let data = b"This is a test string!!!";
        let table = freqs(data);
        let handle = CodecHandle::create(Some(&table)).unwrap();
        let (encoded, bits) = handle.encode_to_vec(data).unwrap();
        assert_eq!(handle.decode_to_vec(&encoded, bits).unwrap(), data.to_vec());
        handle.destroy();
    }

    #[test]
    fn rebuild_through_handle_test() {
        let mut handle = CodecHandle::create(None).unwrap();
        assert_eq!(handle.max_bits(), 8);
        let table = freqs(b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaab");
        handle.rebuild(Some(&table)).unwrap();
        assert!(handle.codeword(b'a').bit_length < 8);
    }
}
