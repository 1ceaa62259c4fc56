use crate::{handle_panic_ptr_return, into_raw_string, read_str, GoError};
use dz_nin::generate;
use std::ffi::c_char;

/// # Safety
///
/// This function dereferences `base` and `error_out` which are pointers to c_char.
/// The caller must ensure that the pointers are valid.
///
/// Return value: the 18-digit identifier, or `null` with the reason written to `error_out`
/// if `base` isn't exactly 16 digits.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn generate_nin(
    base: *const c_char,
    error_out: *mut *const c_char,
) -> *const c_char {
    handle_panic_ptr_return(Some(error_out), || {
        let base = unsafe { read_str(base) };
        let nin = generate(&base).map_err(|err| GoError {
            message: err.to_string(),
        })?;
        into_raw_string(nin)
    }) as *const c_char
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::native::test_utils::call;

    #[test]
    fn generate_appends_key() {
        let (result, error) = call(generate_nin, "1000000000000000");
        assert_eq!(result.as_deref(), Some("100000000000000008"));
        assert_eq!(error, None);
    }

    #[test]
    fn generate_reports_malformed_base() {
        let (result, error) = call(generate_nin, "12345");
        assert_eq!(result, None);
        assert_eq!(
            error.as_deref(),
            Some("the base must contain exactly 16 digits.")
        );
    }
}
