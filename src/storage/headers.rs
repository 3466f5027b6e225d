//! Text-column encoding of a request's header map

use crate::error::{Error, Result};
use crate::models::Headers;

/// JSON object text. An empty map encodes to `{}`, never to NULL.
pub(super) fn encode(headers: &Headers) -> Result<String> {
    serde_json::to_string(headers)
        .map_err(|err| Error::validation(format!("failed to serialize headers: {err}")))
}

/// Inverse of [`encode`]. NULL, empty text and a JSON `null` all decode to
/// an empty map.
pub(super) fn decode(raw: Option<&str>) -> Result<Headers> {
    match raw {
        None | Some("") => Ok(Headers::new()),
        Some(text) => serde_json::from_str::<Option<Headers>>(text)
            .map(Option::unwrap_or_default)
            .map_err(|err| Error::validation(format!("failed to deserialize headers: {err}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn empty_map_encodes_as_object() {
        assert_eq!(encode(&Headers::new()).unwrap(), "{}");
    }

    #[test]
    fn absent_values_decode_to_empty() {
        assert!(decode(None).unwrap().is_empty());
        assert!(decode(Some("")).unwrap().is_empty());
        assert!(decode(Some("null")).unwrap().is_empty());
        assert!(decode(Some("{}")).unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_a_validation_error() {
        let err = decode(Some("{\"X-Test\":")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().starts_with("failed to deserialize headers"));
    }

    #[test]
    fn non_string_values_are_rejected() {
        let err = decode(Some(r#"{"X-Count": 3}"#)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
