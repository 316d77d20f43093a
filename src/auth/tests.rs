//! Tests for the auth module

use super::*;

#[test]
fn test_no_auth() {
    let auth = Authenticator::new(AuthConfig::None);
    let client = reqwest::Client::new();
    let req = auth.apply(client.get("https://example.com/api"));

    let built = req.build().unwrap();
    assert!(built.headers().get("Authorization").is_none());
}

#[test]
fn test_api_key_default_header() {
    let auth = Authenticator::new(AuthConfig::api_key("test-key-123"));

    let client = reqwest::Client::new();
    let req = auth.apply(client.get("https://example.com/api"));

    let built = req.build().unwrap();
    assert_eq!(built.headers().get("Authorization").unwrap(), "test-key-123");
}

#[test]
fn test_api_key_custom_header_with_prefix() {
    let auth = Authenticator::new(AuthConfig::ApiKey {
        header_name: Some("X-Api-Key".to_string()),
        prefix: Some("Token ".to_string()),
        value: "my-token".to_string(),
    });

    let client = reqwest::Client::new();
    let req = auth.apply(client.get("https://example.com/api"));

    let built = req.build().unwrap();
    assert_eq!(built.headers().get("X-Api-Key").unwrap(), "Token my-token");
}

#[test]
fn test_bearer_auth() {
    let auth = Authenticator::new(AuthConfig::Bearer {
        token: "my-bearer-token".to_string(),
    });

    let client = reqwest::Client::new();
    let req = auth.apply(client.get("https://example.com/api"));

    let built = req.build().unwrap();
    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Bearer my-bearer-token"
    );
}

#[test]
fn test_basic_auth() {
    let auth = Authenticator::new(AuthConfig::Basic {
        username: "user".to_string(),
        password: "pass".to_string(),
    });

    let client = reqwest::Client::new();
    let req = auth.apply(client.get("https://example.com/api"));

    let built = req.build().unwrap();
    let value = built
        .headers()
        .get("Authorization")
        .unwrap()
        .to_str()
        .unwrap();
    // base64("user:pass")
    assert_eq!(value, "Basic dXNlcjpwYXNz");
}
