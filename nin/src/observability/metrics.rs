use crate::observability::labels::{Labels, NO_LABEL};
use metrics::{counter, Counter};

const OUTCOME: &str = "outcome";
const FIELD: &str = "field";

/// Counters emitted by a [`crate::NinValidator`]. Created once per validator so every
/// counter carries the labels of its configuration.
pub struct ValidatorMetrics {
    pub valid: Counter,
    pub checksum_mismatch: Counter,
    pub malformed: Counter,

    pub generated: Counter,
    pub malformed_base: Counter,

    pub explanations: Counter,

    // Well-formed identifiers holding a code the decoding tables don't know
    pub unclassified_nationality: Counter,
    pub unclassified_sex: Counter,
    pub undetermined_year: Counter,
}

impl ValidatorMetrics {
    pub fn new(labels: &Labels) -> Self {
        let with = |key: &str, value: &str| labels.clone_with_labels(Labels::new(&[(key, value)]));

        ValidatorMetrics {
            valid: counter!("nin.validations", with(OUTCOME, "valid")),
            checksum_mismatch: counter!("nin.validations", with(OUTCOME, "checksum_mismatch")),
            malformed: counter!("nin.validations", with(OUTCOME, "malformed")),
            generated: counter!("nin.generations", with(OUTCOME, "generated")),
            malformed_base: counter!("nin.generations", with(OUTCOME, "malformed")),
            explanations: counter!("nin.explanations", labels.clone()),
            unclassified_nationality: counter!(
                "nin.unclassified_codes",
                with(FIELD, "nationality")
            ),
            unclassified_sex: counter!("nin.unclassified_codes", with(FIELD, "sex")),
            undetermined_year: counter!("nin.unclassified_codes", with(FIELD, "year")),
        }
    }
}

impl Default for ValidatorMetrics {
    fn default() -> Self {
        ValidatorMetrics::new(&NO_LABEL)
    }
}
