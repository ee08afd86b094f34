use base64::{
    alphabet,
    engine::{general_purpose, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};

/// Padding-agnostic decoders; share links in the wild are inconsistent.
const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Standard alphabet, padded. Used for URI-list bodies and vmess links.
pub fn base64_encode(input: &str) -> String {
    general_purpose::STANDARD.encode(input)
}

/// URL-safe alphabet without padding, as SIP002 and Shadowrocket expect.
pub fn url_safe_base64_encode(input: &str) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(input)
}

/// Decode either alphabet, with or without padding. Invalid input decodes
/// to an empty string.
pub fn base64_decode(input: &str, url_safe: bool) -> String {
    let decoded = if url_safe {
        URL_SAFE_LENIENT.decode(input.trim())
    } else {
        STANDARD_LENIENT.decode(input.trim())
    };
    decoded
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_encoding() {
        let encoded = base64_encode("aes-128-gcm:pass");
        assert_eq!(encoded, "YWVzLTEyOC1nY206cGFzcw==");
        assert_eq!(base64_decode(&encoded, false), "aes-128-gcm:pass");
    }

    #[test]
    fn test_invalid_input_decodes_empty() {
        assert_eq!(base64_decode("!!!", false), "");
    }

    #[test]
    fn test_url_safe_has_no_padding() {
        assert_eq!(url_safe_base64_encode("a"), "YQ");
        assert_eq!(base64_decode("YQ", true), "a");
    }
}
