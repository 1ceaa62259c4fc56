use crate::{handle_panic_ptr_return, into_raw_json, read_json, read_str, GoError};
use dz_nin::{validate_batch, validate_with_message, BatchSummary, ValidationResult};
use serde::Serialize;
use std::ffi::c_char;

#[derive(Serialize)]
struct BatchResponse {
    results: Vec<ValidationResult>,
    summary: BatchSummary,
}

/// # Safety
///
/// This function dereferences `nin` and `error_out` which are pointers to c_char.
/// The caller must ensure that the pointers are valid.
///
/// Thread Safety: This is safe to call simultaneously from multiple threads.
/// Return value: a JSON encoded validation result, to be released with `free_string`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn validate_nin(
    nin: *const c_char,
    error_out: *mut *const c_char,
) -> *const c_char {
    handle_panic_ptr_return(Some(error_out), || {
        let nin = unsafe { read_str(nin) };
        into_raw_json(&validate_with_message(&nin))
    }) as *const c_char
}

/// # Safety
///
/// `nins` must be a valid cstr pointer holding a JSON array of strings, and `error_out`
/// a valid pointer.
///
/// Return value: a JSON object with the per-identifier `results`, in input order, and their
/// `summary`. `null` if `nins` can't be parsed, with the reason written to `error_out`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn validate_nin_batch(
    nins: *const c_char,
    error_out: *mut *const c_char,
) -> *const c_char {
    handle_panic_ptr_return(Some(error_out), || {
        let nins: Vec<String> = unsafe { read_json(nins) }.map_err(|e| GoError {
            message: e.to_string(),
        })?;
        let results = validate_batch(&nins);
        let summary = BatchSummary::from_results(&results);
        into_raw_json(&BatchResponse { results, summary })
    }) as *const c_char
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::native::test_utils::call;

    #[test]
    fn validate_returns_json() {
        let (result, error) = call(validate_nin, "1000 0000 0000 0000 08");
        assert_eq!(error, None);
        let result: serde_json::Value = serde_json::from_str(&result.unwrap()).unwrap();
        assert_eq!(result["is_valid"], true);
        assert_eq!(result["details"]["raw"], "100000000000000008");
        assert_eq!(result["details"]["nationality"], "algerian");

        let (result, error) = call(validate_nin, "12345");
        assert_eq!(error, None);
        let result: serde_json::Value = serde_json::from_str(&result.unwrap()).unwrap();
        assert_eq!(result["is_valid"], false);
        assert_eq!(
            result["message"],
            "❌ the identifier must contain exactly 18 digits."
        );
    }

    #[test]
    fn validate_batch_returns_results_and_summary() {
        let (result, error) = call(
            validate_nin_batch,
            r#"["100000000000000008", "100000000000000099", "12345"]"#,
        );
        assert_eq!(error, None);
        let result: serde_json::Value = serde_json::from_str(&result.unwrap()).unwrap();
        assert_eq!(result["results"].as_array().unwrap().len(), 3);
        assert_eq!(result["results"][0]["is_valid"], true);
        assert_eq!(result["results"][1]["details"]["calculated_key"], "08");
        assert_eq!(
            result["summary"],
            serde_json::json!({"total": 3, "valid": 1, "invalid": 2})
        );
    }

    #[test]
    fn validate_batch_reports_invalid_json() {
        let (result, error) = call(validate_nin_batch, r#"["100000000000000008", 12]"#);
        assert_eq!(result, None);
        let error = error.unwrap();
        assert!(error.starts_with("Failed to deserialize JSON"));
        assert!(error.contains("at path: [1]"));
    }
}
