use base64::{Engine, engine::general_purpose::STANDARD};
use url::{Url, form_urlencoded};

use crate::wavy::UserUri;

/// Builds the `Authorization` header value for HTTP Basic client
/// authentication as described in RFC 6749 section 2.3.1.
///
/// Both the client id and the secret are form-urlencoded before they are
/// joined, so credentials containing `:` stay unambiguous.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let id: String = form_urlencoded::byte_serialize(client_id.as_bytes()).collect();
    let secret: String = form_urlencoded::byte_serialize(client_secret.as_bytes()).collect();
    format!("Basic {}", STANDARD.encode(format!("{id}:{secret}")))
}

/// Resolves a request target against the API base url.
///
/// Only the path and query of `target` are kept. An absolute url has its
/// scheme and host dropped, so every call reaches the configured API host.
pub fn resolve_url(base: &Url, target: &str) -> Result<Url, url::ParseError> {
    let suffix = match Url::parse(target) {
        Ok(absolute) => match absolute.query() {
            Some(query) => format!("{}?{}", absolute.path(), query),
            None => absolute.path().to_string(),
        },
        Err(_) => target.to_string(),
    };

    let base = base.as_str().trim_end_matches('/');
    let suffix = suffix.trim_start_matches('/');
    Url::parse(&format!("{base}/{suffix}"))
}

/// Parses a user URI argument on the command line.
pub fn parse_user_uri(s: &str) -> Result<UserUri, String> {
    UserUri::parse(s).map_err(|e| e.to_string())
}
