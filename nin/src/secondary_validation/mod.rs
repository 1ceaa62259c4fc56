mod algerian_nin_checksum;
mod luhn_checksum;

pub use crate::secondary_validation::algerian_nin_checksum::AlgerianNinChecksum;
pub use crate::secondary_validation::luhn_checksum::{ChecksumStep, ChecksumTrace, LuhnChecksum};
use std::str::Chars;

pub trait Validator: Send + Sync {
    fn is_valid_match(&self, candidate: &str) -> bool;
}

fn get_previous_digit(chars: &mut Chars<'_>) -> Option<u32> {
    while let Some(char) = chars.next_back() {
        if let Some(digit) = char.to_digit(10) {
            return Some(digit);
        }
    }
    None
}
