use url::Url;
use wavyfm::utils::*;
use wavyfm::wavy::{DEFAULT_BASE_URL, UserUri};

fn base() -> Url {
    Url::parse(DEFAULT_BASE_URL).unwrap()
}

#[test]
fn test_basic_auth_header() {
    assert_eq!(basic_auth_header("id", "secret"), "Basic aWQ6c2VjcmV0");
}

#[test]
fn test_basic_auth_header_escapes_credentials() {
    // "a:b c" / "s/&" are form-encoded to "a%3Ab+c" / "s%2F%26" before joining
    assert_eq!(
        basic_auth_header("a:b c", "s/&"),
        "Basic YSUzQWIrYzpzJTJGJTI2"
    );
}

#[test]
fn test_resolve_url_keeps_base_path() {
    let url = resolve_url(&base(), "/metrics/total-listens").unwrap();
    assert_eq!(
        url.as_str(),
        "https://wavy.fm/api/v1beta/metrics/total-listens"
    );

    // missing leading slash resolves the same way
    let url = resolve_url(&base(), "metrics/total-users").unwrap();
    assert_eq!(url.as_str(), "https://wavy.fm/api/v1beta/metrics/total-users");
}

#[test]
fn test_resolve_url_keeps_query() {
    let url = resolve_url(&base(), "/users/x/history/recent?limit=5").unwrap();
    assert_eq!(url.path(), "/api/v1beta/users/x/history/recent");
    assert_eq!(url.query(), Some("limit=5"));
}

#[test]
fn test_resolve_url_replaces_foreign_host() {
    let url = resolve_url(&base(), "http://evil.example.com/metrics/total-users?x=1").unwrap();
    assert_eq!(url.host_str(), Some("wavy.fm"));
    assert_eq!(url.scheme(), "https");
    assert_eq!(url.path(), "/api/v1beta/metrics/total-users");
    assert_eq!(url.query(), Some("x=1"));
}

#[test]
fn test_resolve_url_with_root_base() {
    let base = Url::parse("http://127.0.0.1:8080").unwrap();
    let url = resolve_url(&base, "/token").unwrap();
    assert_eq!(url.as_str(), "http://127.0.0.1:8080/token");
}

#[test]
fn test_resolve_url_with_user_uri_in_path() {
    let uri = UserUri::username("OGKevin").unwrap();
    let url = resolve_url(&base(), &format!("/users/{}", uri.to_path_segment())).unwrap();
    assert_eq!(
        url.path(),
        "/api/v1beta/users/wavyfm:user:username:OGKevin"
    );
}

#[test]
fn test_resolve_url_keeps_user_value_in_one_segment() {
    let cases = [
        ("a#b", "/api/v1beta/users/wavyfm:user:username:a%23b"),
        ("a?b", "/api/v1beta/users/wavyfm:user:username:a%3Fb"),
        ("../../token", "/api/v1beta/users/wavyfm:user:username:..%2F..%2Ftoken"),
        ("a\\b", "/api/v1beta/users/wavyfm:user:username:a%5Cb"),
    ];

    for (value, expected) in cases {
        let uri = UserUri::username(value).unwrap();
        let url = resolve_url(&base(), &format!("/users/{}", uri.to_path_segment())).unwrap();

        assert_eq!(url.host_str(), Some("wavy.fm"), "{value:?}");
        assert_eq!(url.path(), expected, "{value:?}");
        assert_eq!(url.query(), None, "{value:?}");
        assert_eq!(url.fragment(), None, "{value:?}");
    }
}

#[test]
fn test_parse_user_uri() {
    assert_eq!(
        parse_user_uri("wavyfm:user:discord:xyz"),
        Ok(UserUri::discord_id("xyz").unwrap())
    );

    let err = parse_user_uri("wavyfm:user").unwrap_err();
    assert!(err.contains("wavyfm:user"));
}
