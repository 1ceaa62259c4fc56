use crate::secondary_validation::get_previous_digit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::Chars;

/// Modified Luhn engine producing the two-digit control key of a NIN.
///
/// Digits are walked from the right. The rightmost digit is taken as is, the next one is
/// doubled, and so on alternately. A doubled value above 9 has 9 subtracted. The key is
/// what must be added to the sum to reach the next multiple of 10.
pub struct LuhnChecksum;

/// One iteration of the engine, kept so the computation can be replayed for auditing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecksumStep {
    /// 1-based position of the digit, counted from the left of the input
    pub position: usize,
    pub digit: u32,
    pub doubled: bool,
    pub reduced: bool,
    /// What the digit contributed to the sum
    pub value: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecksumTrace {
    pub steps: Vec<ChecksumStep>,
    pub sum: u32,
    pub remainder: u32,
    pub key: u32,
}

struct Steps<'a> {
    chars: Chars<'a>,
    remaining: usize,
    alternate: bool,
}

impl Iterator for Steps<'_> {
    type Item = ChecksumStep;

    fn next(&mut self) -> Option<ChecksumStep> {
        let digit = get_previous_digit(&mut self.chars)?;
        let position = self.remaining;
        self.remaining -= 1;

        let doubled = self.alternate;
        self.alternate = !self.alternate;

        let mut value = digit;
        if doubled {
            value *= 2;
        }
        let reduced = value > 9;
        if reduced {
            value -= 9;
        }
        Some(ChecksumStep {
            position,
            digit,
            doubled,
            reduced,
            value,
        })
    }
}

fn key_from_sum(sum: u32) -> u32 {
    (10 - sum % 10) % 10
}

/// Keys are always rendered on two characters.
fn format_control_key(key: u32) -> String {
    format!("{key:02}")
}

impl LuhnChecksum {
    fn steps<'a>(&self, digits: &'a str) -> Steps<'a> {
        Steps {
            chars: digits.chars(),
            remaining: digits.chars().filter(|c| c.is_ascii_digit()).count(),
            alternate: false,
        }
    }

    /// Numeric key for `digits`. Characters other than ASCII digits are skipped.
    pub fn control_key(&self, digits: &str) -> u32 {
        key_from_sum(self.steps(digits).map(|step| step.value).sum())
    }

    /// Zero-padded two-character key, e.g. `"08"`.
    pub fn compute_control_key(&self, digits: &str) -> String {
        format_control_key(self.control_key(digits))
    }

    pub fn trace(&self, digits: &str) -> ChecksumTrace {
        let steps: Vec<ChecksumStep> = self.steps(digits).collect();
        let sum = steps.iter().map(|step| step.value).sum();
        ChecksumTrace {
            steps,
            sum,
            remainder: sum % 10,
            key: key_from_sum(sum),
        }
    }
}

impl fmt::Display for ChecksumStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doubled = self.digit * 2;
        match (self.doubled, self.reduced) {
            (false, _) => write!(f, "Position {}: {}", self.position, self.digit),
            (true, false) => write!(
                f,
                "Position {}: {} × 2 = {}",
                self.position, self.digit, doubled
            ),
            (true, true) => write!(
                f,
                "Position {}: {} × 2 = {} → {} ({} - 9)",
                self.position, self.digit, doubled, self.value, doubled
            ),
        }
    }
}

impl ChecksumTrace {
    /// Human readable lines: a header, one line per digit, then the sum, modulus and key.
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.steps.len() + 4);
        lines.push("Processing digits from right to left:".to_string());
        lines.extend(self.steps.iter().map(|step| format!("  {step}")));
        lines.push(format!("Total sum: {}", self.sum));
        lines.push(format!("{} mod 10 = {}", self.sum, self.remainder));
        if self.remainder == 0 {
            lines.push(format!("Control key: 0 = {}", self.key));
        } else {
            lines.push(format!(
                "Control key: 10 - {} = {}",
                self.remainder, self.key
            ));
        }
        lines
    }
}
