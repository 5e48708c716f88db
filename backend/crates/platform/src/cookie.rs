//! Cookie Management Infrastructure

use axum::http::{HeaderMap, HeaderValue, header};
use std::fmt::{self, Write};

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        })
    }
}

/// Attributes of a cookie this service writes
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    /// Session cookie when `None`
    pub max_age_secs: Option<i64>,
}

impl CookieConfig {
    /// Build a `Set-Cookie` header value
    pub fn build_set_cookie(&self, value: &str) -> String {
        let mut cookie = format!("{}={}", self.name, value);

        // Writing to a String cannot fail
        if self.http_only {
            let _ = write!(cookie, "; HttpOnly");
        }
        if self.secure {
            let _ = write!(cookie, "; Secure");
        }
        let _ = write!(cookie, "; SameSite={}; Path={}", self.same_site, self.path);
        if let Some(max_age) = self.max_age_secs {
            let _ = write!(cookie, "; Max-Age={max_age}");
        }

        cookie
    }

    /// `Set-Cookie` as a header value; `None` if name or value is not ASCII
    pub fn header_value(&self, value: &str) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.build_set_cookie(value)).ok()
    }
}

/// Extract a cookie value from request headers
///
/// All `Cookie` headers are searched; browsers may split them over HTTP/2.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name).then(|| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_config_build() {
        let config = CookieConfig {
            name: "flash".to_string(),
            secure: false,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age_secs: Some(60),
        };

        let cookie = config.build_set_cookie("abc");
        assert_eq!(cookie, "flash=abc; HttpOnly; SameSite=Lax; Path=/; Max-Age=60");
        assert!(config.header_value("abc").is_some());
    }

    #[test]
    fn test_secure_session_cookie() {
        let config = CookieConfig {
            name: "session".to_string(),
            secure: true,
            http_only: false,
            same_site: SameSite::Strict,
            path: "/".to_string(),
            max_age_secs: None,
        };
        assert_eq!(
            config.build_set_cookie("v"),
            "session=v; Secure; SameSite=Strict; Path=/"
        );
        assert!(config.header_value("caf\u{e9}").is_none());
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; session=21.c2ln; other=xyz"),
        );

        assert_eq!(
            extract_cookie(&headers, "session"),
            Some("21.c2ln".to_string())
        );
        assert_eq!(extract_cookie(&headers, "foo"), Some("bar".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_cookie_from_split_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("foo=bar"));
        headers.append(header::COOKIE, HeaderValue::from_static("session=abc"));

        assert_eq!(extract_cookie(&headers, "session"), Some("abc".to_string()));
    }
}
