use crate::{handle_panic_ptr_return, into_raw_json, read_str};
use dz_nin::explain;
use std::ffi::c_char;

/// # Safety
///
/// This function dereferences `nin` and `error_out` which are pointers to c_char.
/// The caller must ensure that the pointers are valid.
///
/// Return value: the JSON encoded explanation, tagged by `status`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn explain_nin(
    nin: *const c_char,
    error_out: *mut *const c_char,
) -> *const c_char {
    handle_panic_ptr_return(Some(error_out), || {
        let nin = unsafe { read_str(nin) };
        into_raw_json(&explain(&nin))
    }) as *const c_char
}
