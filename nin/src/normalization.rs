use crate::NinError;
use std::fmt;

pub const NIN_LENGTH: usize = 18;
pub const BASE_LENGTH: usize = 16;

/// An identifier that is known to be exactly [`NIN_LENGTH`] ASCII digits.
///
/// The only way to obtain one is through [`normalize`], so field slicing on it can never
/// go out of bounds or split a multi-byte character.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NormalizedNin(String);

impl NormalizedNin {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for NormalizedNin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedNin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Input rejected by [`normalize`]. Holds what was left after whitespace removal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MalformedNin {
    pub cleaned: String,
}

impl From<MalformedNin> for NinError {
    fn from(_value: MalformedNin) -> Self {
        NinError::MalformedIdentifier
    }
}

/// Removes every whitespace character, wherever it appears in the input.
pub fn strip_whitespace(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// True when `candidate` is exactly `length` ASCII digits.
pub fn is_digit_string(candidate: &str, length: usize) -> bool {
    candidate.len() == length && candidate.bytes().all(|b| b.is_ascii_digit())
}

pub fn normalize(raw: &str) -> Result<NormalizedNin, MalformedNin> {
    let cleaned = strip_whitespace(raw);
    if is_digit_string(&cleaned, NIN_LENGTH) {
        Ok(NormalizedNin(cleaned))
    } else {
        Err(MalformedNin { cleaned })
    }
}
