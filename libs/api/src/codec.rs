//! Payload codec: structured value <-> durable text.
//!
//! Stores keep the encoded text in a single opaque column and decode it on
//! read. `decode(encode(v)) == v` for every value accepted by the server.

use crate::error::CodecError;

/// Encode a payload into its compact JSON text.
pub fn encode(value: &serde_json::Value) -> Result<String, CodecError> {
    serde_json::to_string(value).map_err(CodecError::Encoding)
}

/// Decode stored text back into a payload.
pub fn decode(text: &str) -> Result<serde_json::Value, CodecError> {
    serde_json::from_str(text).map_err(CodecError::Decoding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trips_nested_values() {
        let values = [
            json!({"name": "bolt", "tags": ["m8", "zinc"], "dims": {"len": 40, "pitch": 1.25}}),
            json!([1, "two", null, true, {"three": [3]}]),
            json!("just a string"),
            json!(-17),
            json!(null),
            json!({}),
            json!({"unicode": "гайка ✓", "escaped": "line\nbreak \"quoted\""}),
        ];
        for value in values {
            let text = encode(&value).unwrap();
            assert_eq!(decode(&text).unwrap(), value, "text: {text}");
        }
    }

    #[test]
    fn encoding_is_compact() {
        let text = encode(&json!({"a": [1, 2]})).unwrap();
        assert_eq!(text, r#"{"a":[1,2]}"#);
    }

    #[test]
    fn malformed_text_is_a_decoding_error() {
        let err = decode(r#"{"name": "bolt""#).unwrap_err();
        assert!(matches!(err, CodecError::Decoding(_)));
        assert!(err.to_string().starts_with("decode payload"));
    }
}
