//! `data:image/png;base64,...` encoding for hand-off entries.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::DataUrlError;

const PNG_PREFIX: &str = "data:image/png;base64,";

pub fn encode_png(png: &[u8]) -> String {
    format!("{}{}", PNG_PREFIX, STANDARD.encode(png))
}

pub fn decode_png(url: &str) -> Result<Vec<u8>, DataUrlError> {
    let data = url.strip_prefix(PNG_PREFIX).ok_or(DataUrlError::NotPng)?;
    Ok(STANDARD.decode(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_identical_bytes() {
        let png = b"\x89PNG\r\n\x1a\n\x00\x01\x02\xff".to_vec();
        let url = encode_png(&png);
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(decode_png(&url).unwrap(), png);
    }

    #[test]
    fn rejects_other_media_types() {
        assert!(matches!(
            decode_png("data:text/plain;base64,aGk="),
            Err(DataUrlError::NotPng)
        ));
    }

    #[test]
    fn rejects_broken_base64() {
        assert!(matches!(
            decode_png("data:image/png;base64,***"),
            Err(DataUrlError::Decode(_))
        ));
    }
}
