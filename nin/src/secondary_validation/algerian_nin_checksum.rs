use crate::fields::NinFields;
use crate::normalization::normalize;
use crate::secondary_validation::{LuhnChecksum, Validator};

/// Yes/no check of an 18-digit Algerian NIN, for callers that don't need the decoded fields.
pub struct AlgerianNinChecksum;

impl Validator for AlgerianNinChecksum {
    fn is_valid_match(&self, candidate: &str) -> bool {
        /*
         * The NIN is 18 digits: 16 digits of personal data followed by a 2-digit control
         * key computed with a modified Luhn algorithm over those 16 digits.
         * Whitespace may be used to group the digits.
         */
        let Ok(nin) = normalize(candidate) else {
            return false;
        };
        let fields = NinFields::new(&nin);
        LuhnChecksum.compute_control_key(fields.base()) == fields.control_key()
    }
}
