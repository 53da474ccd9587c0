//! Parsing of human-readable memory addresses.
//!
//! PLC memory is addressed by strings such as `"DM100"` or `"CIO20"`: an
//! alphabetic area prefix followed by a decimal word number. The parser only
//! splits the string; which areas exist, and how their word numbers map onto
//! the wire, is decided later by the [`AreaTable`](crate::AreaTable) lookup.
//!
//! Bit sub-addresses (`"CIO20.05"`) are not supported — this crate reads
//! words, not bits.

use crate::error::{FinsError, Result};

/// A decoded memory address: area prefix plus word number.
///
/// # Example
///
/// ```
/// use omron_fins_bulk::decode_address;
///
/// let address = decode_address("dm100").unwrap();
/// assert_eq!(address.area, "DM");
/// assert_eq!(address.word, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAddress {
    /// Uppercased area prefix, e.g. `"DM"` or `"CIO"`.
    pub area: String,
    /// Word number within the area.
    pub word: u32,
}

/// Parses an address string into its area prefix and word number.
///
/// The prefix is matched case-insensitively and returned uppercased. The
/// word number must be decimal with no sign, separators, or trailing text.
///
/// # Errors
///
/// Returns [`FinsError::InvalidAddressing`] if either part is missing or
/// malformed, or if the word number does not fit in 32 bits.
pub fn decode_address(text: &str) -> Result<DecodedAddress> {
    let split = text
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(text.len());
    let (prefix, digits) = text.split_at(split);

    if prefix.is_empty() {
        return Err(FinsError::invalid_addressing("missing area prefix"));
    }
    if digits.is_empty() {
        return Err(FinsError::invalid_addressing("missing word number"));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FinsError::invalid_addressing(format!(
            "invalid word number '{}'",
            digits
        )));
    }

    let word = digits.parse::<u32>().map_err(|_| {
        FinsError::invalid_addressing(format!("word number '{}' out of range", digits))
    })?;

    Ok(DecodedAddress {
        area: prefix.to_ascii_uppercase(),
        word,
    })
}
