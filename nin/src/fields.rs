use crate::config::CenturyPolicy;
use crate::normalization::NormalizedNin;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Range;
use strum::{AsRefStr, Display, EnumIter};

// Byte ranges of each field inside a normalized NIN
pub const NATIONALITY_CODE: Range<usize> = 0..1;
pub const SEX_CODE: Range<usize> = 1..2;
pub const YEAR_CODE: Range<usize> = 2..5;
pub const COMMUNE_OR_COUNTRY: Range<usize> = 5..9;
pub const BIRTH_ACT: Range<usize> = 9..14;
pub const REGISTER_NUMBER: Range<usize> = 14..16;
pub const CONTROL_KEY: Range<usize> = 16..18;
pub const BASE: Range<usize> = 0..16;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
pub enum Nationality {
    #[strum(to_string = "Algerian nationality")]
    Algerian,
    #[strum(to_string = "Dual nationality")]
    Dual,
    #[strum(to_string = "Unknown")]
    Unknown,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    #[strum(to_string = "Male")]
    Male,
    #[strum(to_string = "Female")]
    Female,
    #[strum(to_string = "Unknown")]
    Unknown,
}

lazy_static! {
    static ref NATIONALITY_CODES: HashMap<&'static str, Nationality> =
        HashMap::from([("1", Nationality::Algerian), ("2", Nationality::Dual)]);
    static ref SEX_CODES: HashMap<&'static str, Sex> =
        HashMap::from([("0", Sex::Male), ("1", Sex::Female)]);
    /// Offset added to the 3-digit year code, keyed by its leading digit
    static ref CENTURY_OFFSETS: HashMap<&'static str, u16> =
        HashMap::from([("0", 2000), ("9", 1000)]);
}

/// Offset legacy registry tools applied to every code not starting with `0`.
const LEGACY_OFFSET: u16 = 1000;

impl Nationality {
    /// Codes missing from the table decode to [`Nationality::Unknown`].
    pub fn from_code(code: &str) -> Self {
        NATIONALITY_CODES
            .get(code)
            .copied()
            .unwrap_or(Nationality::Unknown)
    }
}

impl Sex {
    pub fn from_code(code: &str) -> Self {
        SEX_CODES.get(code).copied().unwrap_or(Sex::Unknown)
    }
}

/// Full birth year encoded by a 3-digit year code.
///
/// `0xx` is 20xx and `9xx` is 19xx. Every other leading digit is outside the documented
/// century table, so the result depends on `policy`:
/// * [`CenturyPolicy::Undetermined`] gives `None`
/// * [`CenturyPolicy::LegacyOffset`] adds 1000 like legacy registry tools
pub fn decode_birth_year(code: &str, policy: CenturyPolicy) -> Option<u16> {
    let value: u16 = code.parse().ok()?;
    let leading_digit = code.get(..1)?;
    match CENTURY_OFFSETS.get(leading_digit) {
        Some(offset) => Some(offset + value),
        None => match policy {
            CenturyPolicy::Undetermined => None,
            CenturyPolicy::LegacyOffset => Some(LEGACY_OFFSET + value),
        },
    }
}

/// Positional view over a normalized NIN.
#[derive(Clone, Copy, Debug)]
pub struct NinFields<'a> {
    nin: &'a str,
}

impl<'a> NinFields<'a> {
    pub fn new(nin: &'a NormalizedNin) -> Self {
        Self { nin: nin.as_str() }
    }

    pub fn nationality_code(&self) -> &'a str {
        &self.nin[NATIONALITY_CODE]
    }

    pub fn sex_code(&self) -> &'a str {
        &self.nin[SEX_CODE]
    }

    pub fn year_code(&self) -> &'a str {
        &self.nin[YEAR_CODE]
    }

    pub fn commune_or_country(&self) -> &'a str {
        &self.nin[COMMUNE_OR_COUNTRY]
    }

    pub fn birth_act(&self) -> &'a str {
        &self.nin[BIRTH_ACT]
    }

    pub fn register_number(&self) -> &'a str {
        &self.nin[REGISTER_NUMBER]
    }

    pub fn control_key(&self) -> &'a str {
        &self.nin[CONTROL_KEY]
    }

    /// The 16 digits the control key is computed from
    pub fn base(&self) -> &'a str {
        &self.nin[BASE]
    }

    pub fn nationality(&self) -> Nationality {
        Nationality::from_code(self.nationality_code())
    }

    pub fn sex(&self) -> Sex {
        Sex::from_code(self.sex_code())
    }

    pub fn birth_year(&self, policy: CenturyPolicy) -> Option<u16> {
        decode_birth_year(self.year_code(), policy)
    }
}
