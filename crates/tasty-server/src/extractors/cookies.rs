//! Cookie header parsing

use axum::http::{header, HeaderMap};

/// Value of cookie `name` from any `Cookie` header
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_finds_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; ads_id=abc123"));
        assert_eq!(read_cookie(&headers, "ads_id").as_deref(), Some("abc123"));
        assert_eq!(read_cookie(&headers, "sessionid"), None);
    }
}
