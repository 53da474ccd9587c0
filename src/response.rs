//! FINS response parsing and block decoding.
//!
//! A FINS response consists of the 10-byte header, the echoed MRC/SRC pair,
//! two end-code bytes (0x00 0x00 on success), and the data. For a block
//! read the data is the chunk's 16-bit transfer units, big-endian on the
//! wire; its length must match the requested chunk exactly.
//!
//! # Example
//!
//! ```
//! use omron_fins_bulk::FinsResponse;
//!
//! let bytes = [
//!     0xC0, 0x00, 0x07, 0x00, 0x01, 0x00, 0x00, 0x0A, 0x00, 0x01, // header
//!     0x01, 0x01, // MRC, SRC
//!     0x00, 0x00, // end codes
//!     0x11, 0x22, 0x33, 0x44, // one 32-bit value, low word first
//! ];
//!
//! let response = FinsResponse::from_bytes(&bytes).unwrap();
//! assert!(response.is_success());
//! assert_eq!(response.block_words(2).unwrap(), vec![0x1122, 0x3344]);
//! ```

use crate::error::{FinsError, Result};
use crate::header::{FinsHeader, FINS_HEADER_SIZE};
use crate::utils::dword_from_words;

/// Minimum response size: header (10) + MRC (1) + SRC (1) + end codes (2).
pub const MIN_RESPONSE_SIZE: usize = FINS_HEADER_SIZE + 4;

/// Parsed FINS response.
#[derive(Debug, Clone)]
pub struct FinsResponse {
    /// Response header.
    pub header: FinsHeader,
    /// Main Response Code (MRC).
    pub mrc: u8,
    /// Sub Response Code (SRC).
    pub src: u8,
    /// Main end code (0x00 = success).
    pub main_code: u8,
    /// Sub end code (0x00 = success).
    pub sub_code: u8,
    /// Response data (if any).
    pub data: Vec<u8>,
}

impl FinsResponse {
    /// Parses a FINS response from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FinsError::InvalidResponse`] if the frame is shorter than
    /// [`MIN_RESPONSE_SIZE`].
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < MIN_RESPONSE_SIZE {
            return Err(FinsError::invalid_response(format!(
                "response too short: expected at least {} bytes, got {}",
                MIN_RESPONSE_SIZE,
                data.len()
            )));
        }

        let header = FinsHeader::from_bytes(&data[..FINS_HEADER_SIZE])?;

        Ok(Self {
            header,
            mrc: data[FINS_HEADER_SIZE],
            src: data[FINS_HEADER_SIZE + 1],
            main_code: data[FINS_HEADER_SIZE + 2],
            sub_code: data[FINS_HEADER_SIZE + 3],
            data: data[MIN_RESPONSE_SIZE..].to_vec(),
        })
    }

    /// Returns whether both end codes indicate success.
    pub fn is_success(&self) -> bool {
        self.main_code == 0x00 && self.sub_code == 0x00
    }

    /// Validates the end codes and returns an error on failure.
    ///
    /// End code 0x0040 (routing table warning) is accepted when data is
    /// present; Omron PLCs commonly raise it on otherwise valid replies.
    ///
    /// # Errors
    ///
    /// Returns [`FinsError::PlcError`] carrying the end codes.
    pub fn check_error(&self) -> Result<()> {
        if self.is_success() {
            Ok(())
        } else if self.main_code == 0x00 && self.sub_code == 0x40 && !self.data.is_empty() {
            Ok(())
        } else {
            Err(FinsError::plc_error(self.main_code, self.sub_code))
        }
    }

    /// Returns the chunk's 16-bit transfer units after checking the reply
    /// carries exactly `units` of them.
    ///
    /// # Errors
    ///
    /// Returns [`FinsError::BodyTooShort`] unless the data length is exactly
    /// two bytes per requested unit.
    pub fn block_words(&self, units: u16) -> Result<Vec<u16>> {
        let expected = usize::from(units) * 2;
        if self.data.len() != expected {
            return Err(FinsError::body_too_short(expected, self.data.len()));
        }

        Ok(self
            .data
            .chunks_exact(2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .collect())
    }
}

/// A value type that can be reassembled from wire words.
pub(crate) trait BlockValue: Copy {
    /// 16-bit transfer units per decoded value.
    const WORDS_PER_VALUE: u16;

    /// Reassembles one value from `WORDS_PER_VALUE` wire words.
    fn from_words(words: &[u16]) -> Self;
}

impl BlockValue for u16 {
    const WORDS_PER_VALUE: u16 = 1;

    fn from_words(words: &[u16]) -> Self {
        words[0]
    }
}

impl BlockValue for i16 {
    const WORDS_PER_VALUE: u16 = 1;

    fn from_words(words: &[u16]) -> Self {
        words[0] as i16
    }
}

impl BlockValue for u32 {
    const WORDS_PER_VALUE: u16 = 2;

    // Low word first: the remote device's native storage order, not an
    // ordinary big- or little-endian byte layout.
    fn from_words(words: &[u16]) -> Self {
        dword_from_words(words[0], words[1])
    }
}

impl BlockValue for i32 {
    const WORDS_PER_VALUE: u16 = 2;

    fn from_words(words: &[u16]) -> Self {
        dword_from_words(words[0], words[1]) as i32
    }
}

/// Decodes a whole chunk of wire words into values.
pub(crate) fn decode_block<T: BlockValue>(words: &[u16]) -> Vec<T> {
    words
        .chunks_exact(usize::from(T::WORDS_PER_VALUE))
        .map(T::from_words)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(main_code: u8, sub_code: u8, data: &[u8]) -> Vec<u8> {
        let mut bytes = vec![
            0xC0, 0x00, 0x07, 0x00, 0x01, 0x00, 0x00, 0x0A, 0x00, 0x01, // header
            0x01, 0x01, // MRC, SRC
            main_code, sub_code,
        ];
        bytes.extend_from_slice(data);
        bytes
    }

    #[test]
    fn test_from_bytes() {
        let bytes = make_response(0x00, 0x00, &[0x12, 0x34]);
        let response = FinsResponse::from_bytes(&bytes).unwrap();

        assert_eq!(response.header.icf, 0xC0);
        assert_eq!(response.header.sid, 0x01);
        assert_eq!(response.mrc, 0x01);
        assert_eq!(response.src, 0x01);
        assert!(response.is_success());
        assert_eq!(response.data, vec![0x12, 0x34]);
    }

    #[test]
    fn test_from_bytes_too_short() {
        assert!(FinsResponse::from_bytes(&[0xC0, 0x00, 0x07]).is_err());
    }

    #[test]
    fn test_check_error() {
        let ok = FinsResponse::from_bytes(&make_response(0x00, 0x00, &[])).unwrap();
        assert!(ok.check_error().is_ok());

        let err = FinsResponse::from_bytes(&make_response(0x11, 0x03, &[])).unwrap();
        match err.check_error().unwrap_err() {
            FinsError::PlcError {
                main_code,
                sub_code,
            } => {
                assert_eq!(main_code, 0x11);
                assert_eq!(sub_code, 0x03);
            }
            other => panic!("expected PlcError, got {:?}", other),
        }
    }

    #[test]
    fn test_check_error_accepts_routing_warning_with_data() {
        let warn = FinsResponse::from_bytes(&make_response(0x00, 0x40, &[0x00, 0x01])).unwrap();
        assert!(warn.check_error().is_ok());

        let warn_empty = FinsResponse::from_bytes(&make_response(0x00, 0x40, &[])).unwrap();
        assert!(warn_empty.check_error().is_err());
    }

    #[test]
    fn test_block_words_exact_length() {
        let reply = make_response(0x00, 0x00, &hex::decode("11223344").unwrap());
        let response = FinsResponse::from_bytes(&reply).unwrap();

        assert_eq!(response.block_words(2).unwrap(), vec![0x1122, 0x3344]);
        assert!(matches!(
            response.block_words(1),
            Err(FinsError::BodyTooShort {
                expected: 2,
                actual: 4
            })
        ));
        assert!(matches!(
            response.block_words(3),
            Err(FinsError::BodyTooShort {
                expected: 6,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_block_words_one_byte_short() {
        let reply = make_response(0x00, 0x00, &[0x11, 0x22, 0x33]);
        let response = FinsResponse::from_bytes(&reply).unwrap();
        assert!(matches!(
            response.block_words(2),
            Err(FinsError::BodyTooShort { .. })
        ));
    }

    #[test]
    fn test_dword_reassembly_order() {
        // Wire bytes 11 22 33 44 carry the low word 0x1122 first.
        let words = [0x1122u16, 0x3344];
        let values: Vec<u32> = decode_block(&words);
        assert_eq!(values, vec![0x3344_1122]);
    }

    #[test]
    fn test_signed_reinterprets_bit_pattern() {
        let words = [0xFFFFu16, 0xFFFF];
        let unsigned: Vec<u32> = decode_block(&words);
        let signed: Vec<i32> = decode_block(&words);
        assert_eq!(unsigned, vec![u32::MAX]);
        assert_eq!(signed, vec![-1]);

        let words = [0x0000u16, 0x8000];
        let signed: Vec<i32> = decode_block(&words);
        assert_eq!(signed, vec![i32::MIN]);
    }

    #[test]
    fn test_single_word_values() {
        let words = [0x8001u16, 0x0002];
        let unsigned: Vec<u16> = decode_block(&words);
        let signed: Vec<i16> = decode_block(&words);
        assert_eq!(unsigned, vec![0x8001, 0x0002]);
        assert_eq!(signed, vec![-32767, 2]);
    }
}
