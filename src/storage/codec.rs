//! Payload codec
//!
//! File payloads are stored on the virtual disk in bincode form, one encoded
//! string per write.

use crate::error::Result;

/// Encode a payload for storage
pub fn encode(payload: &str) -> Result<Vec<u8>> {
    Ok(bincode::serialize(payload)?)
}

/// Decode a payload previously produced by [`encode`]
pub fn decode(bytes: &[u8]) -> Result<String> {
    Ok(bincode::deserialize(bytes)?)
}

/// Size in bytes of the encoded form of `payload`
pub fn encoded_len(payload: &str) -> Result<usize> {
    Ok(bincode::serialized_size(payload)? as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_len_matches_encoding() {
        let payload = "'testing'";
        let bytes = encode(payload).unwrap();
        assert_eq!(bytes.len(), encoded_len(payload).unwrap());
        assert_eq!(decode(&bytes).unwrap(), payload);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode(&[0xff, 0xff]).is_err());
    }
}
