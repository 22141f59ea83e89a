//! C-ABI shims for callers linking the decoder as a static library.
//!
//! Enabled with:
//!   cargo rustc --release --features c-abi --crate-type staticlib
//!
//! With `c-abi` the crate links std, which supplies the archive's panic
//! handler and allocator. `tests/staticlib.rs` runs this build.
//!
//! Matching declarations for C or C++ callers:
//!
//! ```c
//! bool ZigDecompress(void *pvSrc, long cbSrc, void *pvDst, long cbDst, long *pcbDst);
//! bool ZigDecompress2(void *pvSrc, long cbSrc, void *pvDst, long cbDst, long *pcbDst);
//! ```
//!
//! Both return `true` and store the decoded size in `*pcbDst` on success. On
//! failure they return `false` and leave `*pcbDst` untouched.

#![allow(unsafe_code)]

use core::ffi::{c_long, c_void};
use core::slice;

use crate::decompress::decompress;
use crate::format::Format;

/// Decodes a legacy-format stream.
///
/// # Safety
/// `src` must be readable for `src_len` bytes and `dst` writable for `dst_cap`
/// bytes, neither region may overlap the other, and `out_len` must point to a
/// writable `long`. Null buffer pointers are accepted only with a zero length.
#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub unsafe extern "C" fn ZigDecompress(
    src: *const c_void,
    src_len: c_long,
    dst: *mut c_void,
    dst_cap: c_long,
    out_len: *mut c_long,
) -> bool {
    // SAFETY: forwarded caller contract.
    unsafe { decompress_raw(src, src_len, dst, dst_cap, out_len, Format::Legacy) }
}

/// Decodes an extended-format stream. Same contract as [`ZigDecompress`].
///
/// # Safety
/// See [`ZigDecompress`].
#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub unsafe extern "C" fn ZigDecompress2(
    src: *const c_void,
    src_len: c_long,
    dst: *mut c_void,
    dst_cap: c_long,
    out_len: *mut c_long,
) -> bool {
    // SAFETY: forwarded caller contract.
    unsafe { decompress_raw(src, src_len, dst, dst_cap, out_len, Format::Extended) }
}

/// Validates the raw arguments, builds slices and runs the decoder.
///
/// # Safety
/// See [`ZigDecompress`].
unsafe fn decompress_raw(
    src: *const c_void,
    src_len: c_long,
    dst: *mut c_void,
    dst_cap: c_long,
    out_len: *mut c_long,
    format: Format,
) -> bool {
    log::trace!("{format:?} decode: src_len={src_len} dst_cap={dst_cap}");

    let (Ok(src_len), Ok(dst_cap)) = (usize::try_from(src_len), usize::try_from(dst_cap)) else {
        return false;
    };
    if out_len.is_null() || (src.is_null() && src_len != 0) || (dst.is_null() && dst_cap != 0) {
        return false;
    }

    let input: &[u8] = if src_len == 0 {
        &[]
    } else {
        // SAFETY: non-null, and the caller guarantees `src_len` readable bytes.
        unsafe { slice::from_raw_parts(src.cast::<u8>(), src_len) }
    };
    let output: &mut [u8] = if dst_cap == 0 {
        &mut []
    } else {
        // SAFETY: non-null, and the caller guarantees `dst_cap` writable bytes
        // that do not alias `input`.
        unsafe { slice::from_raw_parts_mut(dst.cast::<u8>(), dst_cap) }
    };

    match decompress(input, output, format) {
        Ok(written) => match c_long::try_from(written) {
            Ok(written) => {
                // SAFETY: checked non-null above; the caller guarantees it is writable.
                unsafe { out_len.write(written) };
                true
            }
            Err(_) => false,
        },
        Err(err) => {
            log::warn!("{format:?} decode rejected: {err}");
            false
        }
    }
}
