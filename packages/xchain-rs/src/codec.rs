//! Fixed-width message codec
//!
//! The contracts carry the payload as a single `bytes32` value: UTF-8 bytes
//! zero-padded on the right. Encoding fails for anything wider than 32 bytes;
//! decoding strips the trailing padding.

use alloy::primitives::FixedBytes;

use crate::error::RelayError;

/// Payload width in bytes
pub const MESSAGE_WIDTH: usize = 32;

/// Encode a message into its fixed-width on-chain representation
///
/// Fails with [`RelayError::MessageTooLong`] when the UTF-8 byte length
/// exceeds [`MESSAGE_WIDTH`]; exactly 32 bytes is accepted.
pub fn encode_message(text: &str) -> Result<FixedBytes<32>, RelayError> {
    let bytes = text.as_bytes();
    if bytes.len() > MESSAGE_WIDTH {
        return Err(RelayError::MessageTooLong {
            len: bytes.len(),
            max: MESSAGE_WIDTH,
        });
    }

    let mut out = [0u8; MESSAGE_WIDTH];
    out[..bytes.len()].copy_from_slice(bytes);
    Ok(FixedBytes(out))
}

/// Decode a fixed-width payload back into its text form
///
/// Trailing zero padding is stripped before UTF-8 validation; a payload that
/// is not valid UTF-8 fails with [`RelayError::EventDecode`].
pub fn decode_message(payload: &FixedBytes<32>) -> Result<String, RelayError> {
    let end = payload
        .iter()
        .rposition(|b| *b != 0)
        .map_or(0, |last| last + 1);

    std::str::from_utf8(&payload[..end])
        .map(str::to_owned)
        .map_err(|e| RelayError::EventDecode(format!("payload is not valid UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for text in ["Hello from BSC", "", "a", "ping", "héllo wörld"] {
            let encoded = encode_message(text).unwrap();
            assert_eq!(decode_message(&encoded).unwrap(), text);
        }
    }

    #[test]
    fn test_short_text_is_zero_padded() {
        let encoded = encode_message("ab").unwrap();
        assert_eq!(&encoded[..2], b"ab");
        assert!(encoded[2..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_width_boundary() {
        let exactly_32 = "x".repeat(32);
        let encoded = encode_message(&exactly_32).unwrap();
        assert_eq!(decode_message(&encoded).unwrap(), exactly_32);

        let too_long = "x".repeat(33);
        assert_eq!(
            encode_message(&too_long),
            Err(RelayError::MessageTooLong { len: 33, max: 32 })
        );
    }

    #[test]
    fn test_multibyte_length_counts_bytes_not_chars() {
        // 11 four-byte chars = 44 bytes
        let wide = "\u{1F600}".repeat(11);
        assert!(matches!(
            encode_message(&wide),
            Err(RelayError::MessageTooLong { len: 44, max: 32 })
        ));
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let mut raw = [0u8; 32];
        raw[0] = 0xff;
        raw[1] = 0xfe;
        let result = decode_message(&FixedBytes(raw));
        assert!(matches!(result, Err(RelayError::EventDecode(_))));
    }

    #[test]
    fn test_decode_all_zero_payload_is_empty() {
        assert_eq!(decode_message(&FixedBytes([0u8; 32])).unwrap(), "");
    }
}
