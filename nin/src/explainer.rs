use crate::fields::NinFields;
use crate::normalization::normalize;
use crate::secondary_validation::{ChecksumStep, LuhnChecksum};
use crate::validation::default_validator;
use crate::{NinError, NinValidator};
use serde::{Deserialize, Serialize};

pub const ALGORITHM_NAME: &str = "modified Luhn";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NinExplanation {
    Malformed(MalformedExplanation),
    WellFormed(NinDiagnostic),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MalformedExplanation {
    pub input: String,
    pub cleaned: String,
    pub error: NinError,
    /// `error` rendered as text
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NinDiagnostic {
    pub input: String,
    pub cleaned: String,
    pub components: ExplainedComponents,
    pub validation: ExplainedValidation,
    pub calculation: ExplainedCalculation,
}

/// Each decoded value next to the raw code it came from, e.g. `"Male (0)"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainedComponents {
    pub nationality: String,
    pub sex: String,
    pub year: String,
    pub commune_or_country: String,
    pub birth_act: String,
    pub register_number: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainedValidation {
    pub provided_key: String,
    pub calculated_key: String,
    pub is_valid: bool,
    pub algorithm: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainedCalculation {
    pub base: String,
    pub steps: Vec<ChecksumStep>,
    pub sum: u32,
    pub remainder: u32,
    pub key: u32,
    /// `steps` and the final summary rendered as text
    pub lines: Vec<String>,
}

impl NinExplanation {
    pub fn is_valid(&self) -> bool {
        match self {
            NinExplanation::Malformed(_) => false,
            NinExplanation::WellFormed(diagnostic) => diagnostic.validation.is_valid,
        }
    }
}

impl NinValidator {
    /// Decodes `raw` like [`NinValidator::validate`] and replays the control key
    /// computation one digit at a time.
    ///
    /// This function is meant for debugging and auditing, and is not intended for use where
    /// performance is critical.
    pub fn explain(&self, raw: &str) -> NinExplanation {
        self.metrics.explanations.increment(1);

        let nin = match normalize(raw) {
            Ok(nin) => nin,
            Err(malformed) => {
                let error = NinError::MalformedIdentifier;
                return NinExplanation::Malformed(MalformedExplanation {
                    input: raw.to_string(),
                    cleaned: malformed.cleaned,
                    message: error.to_string(),
                    error,
                });
            }
        };

        let details = self.decode(&nin);
        let fields = NinFields::new(&nin);
        let trace = LuhnChecksum.trace(fields.base());
        let year = if details.year.is_empty() {
            "undetermined"
        } else {
            details.year.as_str()
        };

        NinExplanation::WellFormed(NinDiagnostic {
            input: raw.to_string(),
            cleaned: nin.as_str().to_string(),
            components: ExplainedComponents {
                nationality: format!("{} ({})", details.nationality, fields.nationality_code()),
                sex: format!("{} ({})", details.sex, fields.sex_code()),
                year: format!("{} ({})", year, fields.year_code()),
                commune_or_country: details.commune_or_country.clone(),
                birth_act: details.birth_act.clone(),
                register_number: details.register_number.clone(),
            },
            validation: ExplainedValidation {
                provided_key: details.control_key,
                calculated_key: details.calculated_key,
                is_valid: details.is_valid,
                algorithm: ALGORITHM_NAME.to_string(),
            },
            calculation: ExplainedCalculation {
                base: fields.base().to_string(),
                lines: trace.render(),
                steps: trace.steps,
                sum: trace.sum,
                remainder: trace.remainder,
                key: trace.key,
            },
        })
    }
}

pub fn explain(raw: &str) -> NinExplanation {
    default_validator().explain(raw)
}
