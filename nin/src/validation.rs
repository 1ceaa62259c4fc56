use crate::config::{CenturyPolicy, NinValidatorConfig};
use crate::fields::{Nationality, NinFields, Sex};
use crate::normalization::{is_digit_string, normalize, NormalizedNin, BASE_LENGTH, NIN_LENGTH};
use crate::observability::metrics::ValidatorMetrics;
use crate::secondary_validation::LuhnChecksum;
use crate::NinError;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

pub const VALID_MARKER: &str = "✅";
pub const INVALID_MARKER: &str = "❌";

/// Everything decoded from one identifier.
///
/// When the input is malformed only `raw` (the input without whitespace) and `error` are
/// filled, the categories are `Unknown` and every other string is empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NinDetails {
    pub raw: String,
    pub nationality: Nationality,
    pub sex: Sex,
    /// Full birth year, empty when it can't be determined
    pub year: String,
    pub commune_or_country: String,
    pub birth_act: String,
    pub register_number: String,
    /// Key found in the identifier
    pub control_key: String,
    /// Key computed from the first 16 digits
    pub calculated_key: String,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<NinError>,
}

impl NinDetails {
    fn malformed(cleaned: String) -> Self {
        NinDetails {
            raw: cleaned,
            nationality: Nationality::Unknown,
            sex: Sex::Unknown,
            year: String::new(),
            commune_or_country: String::new(),
            birth_act: String::new(),
            register_number: String::new(),
            control_key: String::new(),
            calculated_key: String::new(),
            is_valid: false,
            error: Some(NinError::MalformedIdentifier),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub details: NinDetails,
    pub message: String,
}

impl From<NinDetails> for ValidationResult {
    fn from(details: NinDetails) -> Self {
        let message = if details.is_valid {
            let year = if details.year.is_empty() {
                "an undetermined year"
            } else {
                details.year.as_str()
            };
            format!(
                "{VALID_MARKER} valid NIN - {} {} born in {}",
                details.nationality, details.sex, year
            )
        } else {
            match &details.error {
                Some(error) => format!("{INVALID_MARKER} {error}"),
                None => format!("{INVALID_MARKER} invalid NIN"),
            }
        };
        ValidationResult {
            is_valid: details.is_valid,
            details,
            message,
        }
    }
}

/// Counts over a batch of results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[ValidationResult]) -> Self {
        let valid = results.iter().filter(|result| result.is_valid).count();
        BatchSummary {
            total: results.len(),
            valid,
            invalid: results.len() - valid,
        }
    }
}

/// Validates, generates and explains NINs according to a [`NinValidatorConfig`].
///
/// The validator holds no mutable state, so a single instance can be shared between
/// threads.
pub struct NinValidator {
    pub(crate) century_policy: CenturyPolicy,
    pub(crate) metrics: ValidatorMetrics,
}

impl Default for NinValidator {
    fn default() -> Self {
        NinValidator::new(&NinValidatorConfig::default())
    }
}

impl NinValidator {
    pub fn new(config: &NinValidatorConfig) -> Self {
        NinValidator {
            century_policy: config.century_policy,
            metrics: ValidatorMetrics::new(&config.labels),
        }
    }

    /// Never fails: malformed input and checksum mismatches are reported in
    /// [`NinDetails::error`].
    pub fn validate(&self, raw: &str) -> NinDetails {
        match normalize(raw) {
            Ok(nin) => {
                let details = self.decode(&nin);
                self.count_unclassified_codes(&details);
                if details.is_valid {
                    self.metrics.valid.increment(1);
                } else {
                    self.metrics.checksum_mismatch.increment(1);
                }
                details
            }
            Err(malformed) => {
                self.metrics.malformed.increment(1);
                NinDetails::malformed(malformed.cleaned)
            }
        }
    }

    /// Missing input is validated as an empty string.
    pub fn validate_optional(&self, raw: Option<&str>) -> NinDetails {
        self.validate(raw.unwrap_or_default())
    }

    pub fn validate_with_message(&self, raw: &str) -> ValidationResult {
        ValidationResult::from(self.validate(raw))
    }

    /// Results are in input order. A failing element doesn't stop the batch.
    pub fn validate_batch<S: AsRef<str>>(
        &self,
        raws: impl IntoIterator<Item = S>,
    ) -> Vec<ValidationResult> {
        raws.into_iter()
            .map(|raw| self.validate_with_message(raw.as_ref()))
            .collect()
    }

    /// Appends the control key to a 16-digit base. The base is taken verbatim, whitespace
    /// included, so `"1000 000000000000"` is rejected.
    pub fn generate(&self, base: &str) -> Result<String, NinError> {
        if !is_digit_string(base, BASE_LENGTH) {
            self.metrics.malformed_base.increment(1);
            return Err(NinError::MalformedBase);
        }

        let mut nin = String::with_capacity(NIN_LENGTH);
        nin.push_str(base);
        nin.push_str(&LuhnChecksum.compute_control_key(base));
        self.metrics.generated.increment(1);
        Ok(nin)
    }

    fn count_unclassified_codes(&self, details: &NinDetails) {
        if details.nationality == Nationality::Unknown {
            self.metrics.unclassified_nationality.increment(1);
        }
        if details.sex == Sex::Unknown {
            self.metrics.unclassified_sex.increment(1);
        }
        if details.year.is_empty() {
            self.metrics.undetermined_year.increment(1);
        }
    }

    /// Decodes a well-formed identifier without recording any metric.
    pub(crate) fn decode(&self, nin: &NormalizedNin) -> NinDetails {
        let fields = NinFields::new(nin);

        let year = fields
            .birth_year(self.century_policy)
            .map(|year| year.to_string())
            .unwrap_or_default();

        let control_key = fields.control_key();
        let calculated_key = LuhnChecksum.compute_control_key(fields.base());
        let is_valid = calculated_key == control_key;
        let error = (!is_valid).then(|| NinError::ChecksumMismatch {
            expected: calculated_key.clone(),
            supplied: control_key.to_string(),
        });

        NinDetails {
            raw: nin.as_str().to_string(),
            nationality: fields.nationality(),
            sex: fields.sex(),
            year,
            commune_or_country: fields.commune_or_country().to_string(),
            birth_act: fields.birth_act().to_string(),
            register_number: fields.register_number().to_string(),
            control_key: control_key.to_string(),
            calculated_key,
            is_valid,
            error,
        }
    }
}

lazy_static! {
    static ref DEFAULT_VALIDATOR: NinValidator = NinValidator::default();
}

/// Validator behind the free functions. Its counters are registered once, against the
/// recorder installed when it is first used.
pub(crate) fn default_validator() -> &'static NinValidator {
    &DEFAULT_VALIDATOR
}

pub fn validate(raw: &str) -> NinDetails {
    default_validator().validate(raw)
}

pub fn validate_optional(raw: Option<&str>) -> NinDetails {
    default_validator().validate_optional(raw)
}

pub fn validate_with_message(raw: &str) -> ValidationResult {
    default_validator().validate_with_message(raw)
}

pub fn validate_batch<S: AsRef<str>>(raws: impl IntoIterator<Item = S>) -> Vec<ValidationResult> {
    default_validator().validate_batch(raws)
}

pub fn generate(base: &str) -> Result<String, NinError> {
    default_validator().generate(base)
}

#[cfg(test)]
mod test {
    use crate::*;

    #[test]
    fn validate_generated_nins() {
        let cases = vec![
            ("1000000000000000", Nationality::Algerian, Sex::Male, "2000"),
            ("1100000000000000", Nationality::Algerian, Sex::Female, "2000"),
            ("2000000000000000", Nationality::Dual, Sex::Male, "2000"),
            ("1098316010012345", Nationality::Algerian, Sex::Male, "1983"),
            ("2100403050607080", Nationality::Dual, Sex::Female, "2004"),
        ];
        for (base, nationality, sex, year) in cases {
            let nin = generate(base).unwrap();
            println!("nin: {nin}");
            assert_eq!(nin.len(), 18);
            assert!(nin.starts_with(base));

            let details = validate(&nin);
            assert!(details.is_valid);
            assert_eq!(details.error, None);
            assert_eq!(details.raw, nin);
            assert_eq!(details.nationality, nationality);
            assert_eq!(details.sex, sex);
            assert_eq!(details.year, year);
            assert_eq!(details.control_key, details.calculated_key);
        }
    }

    #[test]
    fn generate_appends_the_control_key() {
        assert_eq!(generate("1000000000000000").unwrap(), "100000000000000008");
        assert_eq!(generate("0000000000000000").unwrap(), "000000000000000000");
    }

    #[test]
    fn decode_every_field() {
        let details = validate("109831601001234508");
        assert_eq!(
            details,
            NinDetails {
                raw: "109831601001234508".to_string(),
                nationality: Nationality::Algerian,
                sex: Sex::Male,
                year: "1983".to_string(),
                commune_or_country: "1601".to_string(),
                birth_act: "00123".to_string(),
                register_number: "45".to_string(),
                control_key: "08".to_string(),
                calculated_key: "08".to_string(),
                is_valid: true,
                error: None,
            }
        );
    }

    #[test]
    fn checksum_mismatch_keeps_the_decoded_fields() {
        let details = validate("100000000000000099");
        assert!(!details.is_valid);
        assert_eq!(details.control_key, "99");
        assert_eq!(details.calculated_key, "08");
        assert_eq!(details.nationality, Nationality::Algerian);
        assert_eq!(details.sex, Sex::Male);
        assert_eq!(details.year, "2000");
        assert_eq!(
            details.error,
            Some(NinError::ChecksumMismatch {
                expected: "08".to_string(),
                supplied: "99".to_string(),
            })
        );
    }

    #[test]
    fn malformed_input_decodes_nothing() {
        let inputs = vec![
            "",
            "12345",
            "1234567890123456789",
            "12345678901234567a",
            "1000-0000-0000-0000-08",
        ];
        for input in inputs {
            let details = validate(input);
            assert!(!details.is_valid);
            assert_eq!(details.error, Some(NinError::MalformedIdentifier));
            assert_eq!(
                details.error.unwrap().to_string(),
                "the identifier must contain exactly 18 digits."
            );
            assert_eq!(details.nationality, Nationality::Unknown);
            assert_eq!(details.sex, Sex::Unknown);
            assert!(details.year.is_empty());
            assert!(details.control_key.is_empty());
            assert!(details.calculated_key.is_empty());
        }
        assert_eq!(validate(" 12 345 ").raw, "12345");
    }

    #[test]
    fn missing_input_is_empty_input() {
        assert_eq!(validate_optional(None), validate(""));
        assert_eq!(
            validate_optional(Some("100000000000000008")),
            validate("100000000000000008")
        );
    }

    #[test]
    fn unknown_codes_are_still_valid() {
        // nationality 3
        let details = validate(&generate("3000000000000000").unwrap());
        assert!(details.is_valid);
        assert_eq!(details.nationality, Nationality::Unknown);
        assert_eq!(details.sex, Sex::Male);

        // sex 5
        let details = validate(&generate("1500000000000000").unwrap());
        assert!(details.is_valid);
        assert_eq!(details.nationality, Nationality::Algerian);
        assert_eq!(details.sex, Sex::Unknown);
    }

    #[test]
    fn year_outside_the_century_table() {
        let nin = generate("1050400000000000").unwrap();

        let details = validate(&nin);
        assert!(details.is_valid);
        assert_eq!(details.year, "");

        let legacy = NinValidatorConfig::new()
            .century_policy(CenturyPolicy::LegacyOffset)
            .build();
        let details = legacy.validate(&nin);
        assert!(details.is_valid);
        assert_eq!(details.year, "1504");
    }

    #[test]
    fn generate_rejects_malformed_bases() {
        let bases = vec![
            "",
            "12345",
            "12345678901234567",
            "123456789012345a",
            "1000 000000000000",
            " 100000000000000",
        ];
        for base in bases {
            let err = generate(base).unwrap_err();
            assert_eq!(err, NinError::MalformedBase);
            assert_eq!(err.to_string(), "the base must contain exactly 16 digits.");
        }
    }

    #[test]
    fn messages_carry_markers() {
        let result = validate_with_message("100000000000000008");
        assert!(result.is_valid);
        assert_eq!(
            result.message,
            "✅ valid NIN - Algerian nationality Male born in 2000"
        );

        let result = validate_with_message("100000000000000099");
        assert!(!result.is_valid);
        assert_eq!(
            result.message,
            "❌ invalid control key: expected 08, supplied 99"
        );

        let result = validate_with_message("12345");
        assert_eq!(
            result.message,
            "❌ the identifier must contain exactly 18 digits."
        );

        let result = validate_with_message(&generate("1050400000000000").unwrap());
        assert!(result.message.ends_with("born in an undetermined year"));
    }

    #[test]
    fn batch_preserves_order_and_does_not_short_circuit() {
        let results = validate_batch([
            "100000000000000008",
            "100000000000000099",
            "12345",
            "110000000000000007",
        ]);
        let validity: Vec<bool> = results.iter().map(|result| result.is_valid).collect();
        assert_eq!(validity, vec![true, false, false, true]);
        assert_eq!(results[3].details.sex, Sex::Female);

        assert_eq!(
            BatchSummary::from_results(&results),
            BatchSummary {
                total: 4,
                valid: 2,
                invalid: 2,
            }
        );
        assert_eq!(BatchSummary::from_results(&[]), BatchSummary::default());
    }

    #[test]
    fn batch_accepts_owned_strings() {
        let nins = vec![
            "200000000000000006".to_string(),
            "2000 0000 0000 0000 06".to_string(),
        ];
        let results = validate_batch(&nins);
        assert!(results.iter().all(|result| result.is_valid));
    }

    #[test]
    fn details_serialize_without_empty_error() {
        let value = serde_json::to_value(validate("100000000000000008")).unwrap();
        assert_eq!(value["nationality"], "algerian");
        assert_eq!(value["sex"], "male");
        assert_eq!(value["year"], "2000");
        assert!(value.get("error").is_none());

        let value = serde_json::to_value(validate("100000000000000099")).unwrap();
        assert_eq!(value["error"]["type"], "checksum_mismatch");
    }

    #[test]
    fn validator_is_shareable_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NinValidator>();

        let validator = NinValidator::default();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let validator = &validator;
                    scope.spawn(move || {
                        let base = format!("{i}000000000000000");
                        let nin = validator.generate(&base).unwrap();
                        validator.validate(&nin).is_valid
                    })
                })
                .collect();
            for handle in handles {
                assert!(handle.join().unwrap());
            }
        });
    }
}
