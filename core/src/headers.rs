//! Header construction for outgoing requests.
//!
//! Caller-supplied headers are applied first; the framework rules
//! (Authorization, Content-Type, Accept) are applied after and win on a
//! case-insensitive name collision. The ordering matters: a caller cannot
//! accidentally ship a JSON body with a stale `Content-Type`.

use crate::credentials::CredentialProvider;

/// Options consumed by [`build_headers`].
#[derive(Debug, Clone, Default)]
pub struct HeaderOptions {
    /// Caller-supplied headers, lowest precedence.
    pub headers: Vec<(String, String)>,
    /// Attach `Authorization: Bearer <token>` from the credential provider.
    pub authorized: bool,
    /// Send `Content-Type: multipart/form-data` instead of JSON.
    pub form_data: bool,
}

/// Compute the header set for one outgoing request.
///
/// Pure given the token snapshot read from `credentials`. When `authorized`
/// is set but no token is available the Authorization header is omitted
/// entirely rather than sent with an empty token.
pub fn build_headers(
    options: &HeaderOptions,
    credentials: &dyn CredentialProvider,
) -> Vec<(String, String)> {
    let mut headers = options.headers.clone();

    if options.authorized {
        if let Some(token) = credentials.current_token() {
            set_header(&mut headers, "Authorization", format!("Bearer {token}"));
        }
    }

    let content_type = if options.form_data {
        "multipart/form-data"
    } else {
        "application/json"
    };
    set_header(&mut headers, "Content-Type", content_type.to_string());
    set_header(&mut headers, "Accept", "application/json".to_string());

    headers
}

/// Replace any same-named header (case-insensitive), keeping a single entry.
fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: String) {
    headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
    headers.push((name.to_string(), value));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{Anonymous, StaticToken};

    fn find<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
        headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn authorized_with_token_sets_bearer() {
        let options = HeaderOptions {
            authorized: true,
            ..Default::default()
        };
        let headers = build_headers(&options, &StaticToken::new("tok-1"));
        assert_eq!(find(&headers, "authorization"), Some("Bearer tok-1"));
    }

    #[test]
    fn authorized_without_token_omits_header() {
        let options = HeaderOptions {
            authorized: true,
            ..Default::default()
        };
        let headers = build_headers(&options, &Anonymous);
        assert_eq!(find(&headers, "authorization"), None);
    }

    #[test]
    fn unauthorized_never_reads_credentials_into_headers() {
        let headers = build_headers(&HeaderOptions::default(), &StaticToken::new("tok-1"));
        assert_eq!(find(&headers, "authorization"), None);
    }

    #[test]
    fn form_data_overrides_content_type() {
        let options = HeaderOptions {
            form_data: true,
            ..Default::default()
        };
        let headers = build_headers(&options, &Anonymous);
        assert_eq!(find(&headers, "content-type"), Some("multipart/form-data"));
    }

    #[test]
    fn default_content_type_is_json_and_accept_is_always_set() {
        let headers = build_headers(&HeaderOptions::default(), &Anonymous);
        assert_eq!(find(&headers, "content-type"), Some("application/json"));
        assert_eq!(find(&headers, "accept"), Some("application/json"));
    }

    #[test]
    fn framework_rules_win_over_caller_headers() {
        let options = HeaderOptions {
            headers: vec![
                ("content-type".to_string(), "text/plain".to_string()),
                ("X-Trace".to_string(), "abc".to_string()),
            ],
            form_data: true,
            ..Default::default()
        };
        let headers = build_headers(&options, &Anonymous);
        assert_eq!(find(&headers, "content-type"), Some("multipart/form-data"));
        // Unrelated caller headers survive.
        assert_eq!(find(&headers, "x-trace"), Some("abc"));
        // No duplicate Content-Type entries remain.
        let count = headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .count();
        assert_eq!(count, 1);
    }
}
