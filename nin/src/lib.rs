// This blocks accidental use of `println`. If one is actually needed, you can
// override with `#[allow(clippy::print_stdout)]`.
#![deny(clippy::print_stdout)]

mod config;
mod error;
mod explainer;
mod fields;
mod normalization;
mod observability;
mod secondary_validation;
mod validation;

// This is the public API of the NIN library
pub use config::{CenturyPolicy, NinValidatorConfig};
pub use error::NinError;
pub use explainer::{
    explain, ExplainedCalculation, ExplainedComponents, ExplainedValidation, MalformedExplanation,
    NinDiagnostic, NinExplanation, ALGORITHM_NAME,
};
pub use fields::{decode_birth_year, Nationality, NinFields, Sex};
pub use normalization::{normalize, strip_whitespace, MalformedNin, NormalizedNin};
pub use normalization::{BASE_LENGTH, NIN_LENGTH};
pub use observability::labels::Labels;
pub use secondary_validation::{
    AlgerianNinChecksum, ChecksumStep, ChecksumTrace, LuhnChecksum, Validator,
};
pub use validation::{
    generate, validate, validate_batch, validate_optional, validate_with_message, BatchSummary,
    NinDetails, NinValidator, ValidationResult, INVALID_MARKER, VALID_MARKER,
};
