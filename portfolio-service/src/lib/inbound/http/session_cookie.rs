use axum::http::header;
use axum::http::header::InvalidHeaderValue;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use chrono::DateTime;
use chrono::Utc;

const COOKIE_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";
const COOKIE_ATTRIBUTES: &str = "Path=/; HttpOnly; Secure; SameSite=None";

/// The two carriers of a session token: an HTTP-only cookie and the
/// `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: String,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `Set-Cookie` value carrying a freshly issued token.
    pub fn issue(
        &self,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<HeaderValue, InvalidHeaderValue> {
        let max_age = (expires_at - Utc::now()).num_seconds().max(0);
        HeaderValue::from_str(&format!(
            "{}={}; Expires={}; Max-Age={}; {}",
            self.name,
            token,
            expires_at.format(COOKIE_DATE_FORMAT),
            max_age,
            COOKIE_ATTRIBUTES
        ))
    }

    /// `Set-Cookie` value that makes the client drop its token.
    pub fn expire(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::from_str(&format!(
            "{}=; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Max-Age=0; {}",
            self.name, COOKIE_ATTRIBUTES
        ))
    }

    /// Token from the cookie if present, otherwise from the Bearer header.
    pub fn read<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        let from_cookie = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|cookies| cookies.split(';'))
            .map(|c| c.trim())
            .find_map(|c| {
                c.strip_prefix(self.name.as_str())
                    .and_then(|rest| rest.strip_prefix('='))
                    .filter(|token| !token.is_empty())
            });

        from_cookie.or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "))
                .map(|token| token.trim())
                .filter(|token| !token.is_empty())
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_cookie_wins_over_bearer() {
        let cookie = SessionCookie::new("token");
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; token=from-cookie"),
        );
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );

        assert_eq!(cookie.read(&headers), Some("from-cookie"));
    }

    #[test]
    fn test_bearer_fallback() {
        let cookie = SessionCookie::new("token");
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("tokenish=x; token="));
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );

        assert_eq!(cookie.read(&headers), Some("from-header"));
    }

    #[test]
    fn test_empty_cookie_does_not_hide_later_one() {
        let cookie = SessionCookie::new("token");
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("token=; theme=dark; token=from-cookie"),
        );
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );

        assert_eq!(cookie.read(&headers), Some("from-cookie"));
    }

    #[test]
    fn test_nothing_to_read() {
        let cookie = SessionCookie::new("token");
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));

        assert_eq!(cookie.read(&headers), None);
    }

    #[test]
    fn test_issue_attributes() {
        let cookie = SessionCookie::new("token");
        let value = cookie
            .issue("abc.def.ghi", Utc::now() + Duration::days(7))
            .unwrap();
        let value = value.to_str().unwrap();

        assert!(value.starts_with("token=abc.def.ghi;"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("Secure"));
        assert!(value.contains("SameSite=None"));
        assert!(value.contains("GMT"));
    }

    #[test]
    fn test_expire_is_in_the_past() {
        let value = SessionCookie::new("token").expire().unwrap();
        let value = value.to_str().unwrap();

        assert!(value.starts_with("token=;"));
        assert!(value.contains("Max-Age=0"));
        assert!(value.contains("1970"));
    }
}
