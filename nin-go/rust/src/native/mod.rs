#![allow(clippy::missing_safety_doc)]

use core::panic::UnwindSafe;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ffi::{c_char, CStr, CString};
use std::io::{Error, ErrorKind};

pub mod explain;
pub mod generate;
pub mod validate;

/// # Safety
///
/// The pointer passed in must be a valid cstr pointer.
pub unsafe fn read_json<T: DeserializeOwned>(raw_value: *const c_char) -> Result<T, Error> {
    let c_str = unsafe { CStr::from_ptr(raw_value) };
    let val = c_str.to_string_lossy();
    let jd = &mut serde_json::Deserializer::from_str(&val);

    match serde_path_to_error::deserialize(jd) {
        Ok(value) => Ok(value),
        Err(e) => {
            let path = e.path().to_string();
            // Convert the error to a more generic error type
            Err(Error::new(
                ErrorKind::InvalidData,
                format!("Failed to deserialize JSON: {e} at path: {path}"),
            ))
        }
    }
}

/// # Safety
///
/// The pointer passed in must be a valid cstr pointer.
pub unsafe fn read_str(raw_value: *const c_char) -> String {
    unsafe { CStr::from_ptr(raw_value) }
        .to_string_lossy()
        .into_owned()
}

/// Hands a string over to the caller, who must release it with [`free_string`].
/// Returns the pointer as an i64 so it can travel through [`handle_panic_ptr_return`].
pub fn into_raw_string(value: String) -> Result<i64, GoError> {
    let c_string = CString::new(value).map_err(|_| GoError {
        message: "Result contained a null byte".to_string(),
    })?;
    Ok(c_string.into_raw() as i64)
}

pub fn into_raw_json<T: Serialize>(value: &T) -> Result<i64, GoError> {
    let json = serde_json::to_string(value).map_err(|e| GoError {
        message: format!("Failed to serialize JSON: {e}"),
    })?;
    into_raw_string(json)
}

///
/// err: The error to handle
/// error_out: An optional pointer to store the error message (if one exists)
pub fn handle_go_error(err: GoError, error_out: Option<*mut *const c_char>) {
    // This code MUST NOT panic, since it is handling a panic.

    let c_str = CString::new(err.message).unwrap_or(
        // The error message contained null bytes, which shouldn't really happen,
        // but just in case.
        CString::new("Rust panicked. No more information is available.").unwrap(),
    );
    if let Some(error_out) = error_out {
        let raw = c_str.into_raw();
        unsafe {
            *error_out = raw;
        }
    }
}

#[derive(Debug)]
pub struct GoError {
    pub message: String,
}

/// Runs `f`, turning both a panic and a returned [`GoError`] into a message written to
/// `error_out`. Any failure returns `0`, which the caller sees as a null pointer.
pub fn handle_panic_ptr_return(
    error_out: Option<*mut *const c_char>,
    f: impl FnOnce() -> Result<i64, GoError> + UnwindSafe,
) -> i64 {
    match convert_panic_to_go_error(f) {
        Ok(Ok(ptr)) => ptr,
        Ok(Err(err)) | Err(err) => {
            handle_go_error(err, error_out);
            0
        }
    }
}

pub fn convert_panic_to_go_error<R>(f: impl FnOnce() -> R + UnwindSafe) -> Result<R, GoError> {
    match std::panic::catch_unwind(f) {
        Ok(result) => Ok(result),
        Err(err) => {
            let message = if let Some(string) = err.downcast_ref::<&str>() {
                string.to_string()
            } else if let Some(string) = err.downcast_ref::<String>() {
                string.to_string()
            } else {
                "Rust panicked. No more information is available.".to_string()
            };
            Err(GoError { message })
        }
    }
}

/// # Safety
///
/// `ptr` must have been returned by one of the functions of this library, and not freed yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn free_string(ptr: *const c_char) {
    if ptr.is_null() {
        return;
    }
    unsafe {
        drop(CString::from_raw(ptr as *mut c_char));
    }
}
