//! URL encoding utilities

/// Encodes a string using URL encoding
///
/// # Examples
/// ```
/// use subcompiler::utils::url::url_encode;
///
/// let encoded = url_encode("Hello World!");
/// assert_eq!(encoded, "Hello%20World%21");
/// ```
pub fn url_encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// Builds a query string from `(key, value)` pairs, skipping empty values.
/// Values are URL encoded, keys are emitted verbatim.
pub fn build_query(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{}={}", key, url_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_skips_empty() {
        let query = build_query(&[("security", "tls"), ("sni", ""), ("path", "/ws?ed=2048")]);
        assert_eq!(query, "security=tls&path=%2Fws%3Fed%3D2048");
    }

    #[test]
    fn test_url_encode_unicode() {
        assert_eq!(url_encode("香港 01"), "%E9%A6%99%E6%B8%AF%2001");
    }
}
