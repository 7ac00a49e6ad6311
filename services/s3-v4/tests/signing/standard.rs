use crate::{init_test_signer, test_config, test_time};
use anyhow::Result;
use http::header::{AUTHORIZATION, CONTENT_LENGTH, HOST};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use pretty_assertions::assert_eq;
use s3sign_core::hash::hex_sha256;
use s3sign_core::time::{format_iso8601, FixedClock};
use s3sign_v4::{Body, Config, SignRequest, Signer};
use std::io::Cursor;
use test_case::test_case;

/// Header names are matched case-insensitively and stored lowercase.
fn header(name: &str) -> HeaderName {
    HeaderName::from_bytes(name.as_bytes()).expect("header name must be valid")
}

#[test_case("http://domain.com", "domain.com"; "http without port")]
#[test_case("http://domain.com:123", "domain.com:123"; "http with port")]
#[test_case("https://domain.com:123", "domain.com:123"; "https with port")]
#[test_case("https://domain.com:443", "domain.com"; "https with default port")]
fn test_host_header(url: &str, expected: &str) -> Result<()> {
    let signer = init_test_signer();

    let mut req = SignRequest::new(Method::GET, url);
    let sig = signer.sign_request(&mut req)?;

    assert_eq!(sig.headers()[HOST], expected);
    Ok(())
}

#[test]
fn test_host_header_from_request_wins() -> Result<()> {
    let signer = init_test_signer();

    let mut headers = HeaderMap::new();
    headers.insert(HOST, HeaderValue::from_static("bucket.domain.com"));
    let mut req = SignRequest::new(Method::GET, "http://127.0.0.1:9000").with_headers(headers);
    let sig = signer.sign_request(&mut req)?;

    assert_eq!(sig.headers()[HOST], "bucket.domain.com");
    Ok(())
}

#[test]
fn test_sets_x_amz_date_from_clock() -> Result<()> {
    let signer = init_test_signer();

    let mut req = SignRequest::new(Method::GET, "https://domain.com:123");
    let sig = signer.sign_request(&mut req)?;

    assert_eq!(sig.headers()["x-amz-date"], "20120101T112233Z");
    assert_eq!(sig.headers()["x-amz-date"], format_iso8601(test_time()).as_str());
    Ok(())
}

#[test]
fn test_uses_x_amz_date_of_request() -> Result<()> {
    let signer = init_test_signer();

    let mut headers = HeaderMap::new();
    headers.insert(header("X-Amz-Date"), HeaderValue::from_static("20240229T235959Z"));
    let mut req = SignRequest::new(Method::GET, "https://domain.com").with_headers(headers);
    let sig = signer.sign_request(&mut req)?;

    assert_eq!(sig.headers()["x-amz-date"], "20240229T235959Z");
    assert!(sig
        .string_to_sign()
        .contains("\n20240229T235959Z\n20240229/REGION/SERVICE/aws4_request\n"));
    Ok(())
}

#[test]
fn test_adds_content_sha256_by_default() -> Result<()> {
    let signer = init_test_signer();

    let mut req = SignRequest::new(Method::GET, "https://domain.com").with_body("abc");
    let sig = signer.sign_request(&mut req)?;

    assert_eq!(sig.headers()["x-amz-content-sha256"], hex_sha256(b"abc").as_str());
    assert_eq!(sig.content_sha256(), hex_sha256(b"abc"));
    Ok(())
}

#[test]
fn test_can_omit_content_sha256_header() -> Result<()> {
    let signer = init_test_signer();

    let mut req = SignRequest::new(Method::GET, "https://domain.com")
        .with_body("abc")
        .with_apply_checksum_header(false);
    let sig = signer.sign_request(&mut req)?;

    assert!(sig.headers().get("x-amz-content-sha256").is_none());
    assert_eq!(sig.content_sha256(), hex_sha256(b"abc"));
    // The payload hash is still the last line of the canonical request.
    assert!(sig.canonical_request().ends_with(&hex_sha256(b"abc")));
    Ok(())
}

#[test]
fn test_empty_body_hashes_as_empty_payload() -> Result<()> {
    let signer = init_test_signer();

    let mut req = SignRequest::new(Method::GET, "https://domain.com");
    let sig = signer.sign_request(&mut req)?;

    assert_eq!(sig.content_sha256(), s3sign_v4::EMPTY_STRING_SHA256);
    Ok(())
}

#[test]
fn test_authorization_is_not_applied_to_request_headers() -> Result<()> {
    let signer = init_test_signer();

    let mut req =
        SignRequest::new(Method::PUT, "http://domain.com").with_headers(HeaderMap::new());
    let sig = signer.sign_request(&mut req)?;

    // Applied to the signature headers, not the request.
    assert!(req.headers.get(AUTHORIZATION).is_none());
    assert!(req.headers.is_empty());
    assert!(sig.headers().get(AUTHORIZATION).is_some());
    Ok(())
}

#[test]
fn test_signs_the_request() -> Result<()> {
    let signer = init_test_signer();

    let mut headers = HeaderMap::new();
    headers.insert(header("Foo"), HeaderValue::from_static("foo"));
    headers.insert(header("Bar"), HeaderValue::from_static("bar  bar"));
    headers.insert(header("Bar2"), HeaderValue::from_static("\"bar  bar\""));
    headers.insert(CONTENT_LENGTH, HeaderValue::from(9u64));
    headers.insert(header("X-Amz-Date"), HeaderValue::from_static("20120101T112233Z"));

    let mut req = SignRequest::new(Method::PUT, "https://domain.com")
        .with_headers(headers)
        .with_body(Body::stream(Cursor::new("http-body")))
        .with_unsigned_headers(["content-length"]);
    let sig = signer.sign_request(&mut req)?;

    assert_eq!(
        sig.headers()[AUTHORIZATION],
        "AWS4-HMAC-SHA256 Credential=akid/20120101/REGION/SERVICE/aws4_request, SignedHeaders=bar;bar2;foo;host;x-amz-content-sha256;x-amz-date, Signature=4a7d3e06d1950eb64a3daa1becaa8ba030d9099858516cb2fa4533fab4e8937d"
    );
    assert_eq!(
        sig.signature(),
        "4a7d3e06d1950eb64a3daa1becaa8ba030d9099858516cb2fa4533fab4e8937d"
    );
    assert_eq!(sig.content_sha256(), hex_sha256(b"http-body"));
    Ok(())
}

#[test]
fn test_signature_headers() -> Result<()> {
    let signer = init_test_signer();

    let mut headers = HeaderMap::new();
    headers.insert("x-amz-meta-owner", HeaderValue::from_static("me"));
    let mut req = SignRequest::new(Method::GET, "http://domain.com/key").with_headers(headers);
    let sig = signer.sign_request(&mut req)?;

    let mut names = sig
        .headers()
        .keys()
        .map(|k| k.as_str().to_string())
        .collect::<Vec<_>>();
    names.sort();
    assert_eq!(
        names,
        vec!["authorization", "host", "x-amz-content-sha256", "x-amz-date"]
    );
    Ok(())
}

#[test]
fn test_extended_unsigned_headers_are_not_signed() -> Result<()> {
    let signer = init_test_signer();

    let mut headers = HeaderMap::new();
    headers.insert("user-agent", HeaderValue::from_static("s3sign"));
    let mut req = SignRequest::new(Method::GET, "http://domain.com/key").with_headers(headers);
    req.unsigned_headers.insert("User-Agent".to_string());
    let sig = signer.sign_request(&mut req)?;

    let auth = sig.headers()[AUTHORIZATION].to_str()?;
    assert!(
        auth.contains("SignedHeaders=host;x-amz-content-sha256;x-amz-date,"),
        "unexpected authorization: {auth}"
    );
    Ok(())
}

#[test]
fn test_session_token_is_signed() -> Result<()> {
    let signer = Signer::new(Config {
        session_token: Some("session-token".to_string()),
        ..test_config()
    })
    .with_clock(FixedClock::new(test_time()));

    let mut req = SignRequest::new(Method::GET, "http://domain.com/key");
    let sig = signer.sign_request(&mut req)?;

    assert_eq!(sig.headers()["x-amz-security-token"], "session-token");
    assert!(sig.headers()["x-amz-security-token"].is_sensitive());
    let auth = sig.headers()[AUTHORIZATION].to_str()?;
    assert!(
        auth.contains("SignedHeaders=host;x-amz-content-sha256;x-amz-date;x-amz-security-token,"),
        "unexpected authorization: {auth}"
    );
    Ok(())
}

#[test]
fn test_apply_signature() -> Result<()> {
    let signer = init_test_signer();

    let mut req = SignRequest::new(Method::GET, "http://domain.com/key");
    let sig = signer.sign_request(&mut req)?;

    let mut outgoing = HeaderMap::new();
    outgoing.insert(AUTHORIZATION, HeaderValue::from_static("stale"));
    sig.apply(&mut outgoing);

    assert_eq!(outgoing.len(), 4);
    assert_eq!(outgoing[AUTHORIZATION], sig.headers()[AUTHORIZATION]);
    assert_eq!(outgoing[HOST], "domain.com");
    Ok(())
}

#[test]
fn test_signing_is_deterministic_across_threads() -> Result<()> {
    let signer = init_test_signer();

    let sign = || {
        let mut req = SignRequest::new(Method::PUT, "http://domain.com/key").with_body("abc");
        signer
            .sign_request(&mut req)
            .expect("sign request must succeed")
            .signature()
            .to_string()
    };

    let expected = sign();
    std::thread::scope(|s| {
        let handles = (0..4).map(|_| s.spawn(sign)).collect::<Vec<_>>();
        for handle in handles {
            assert_eq!(handle.join().expect("thread must not panic"), expected);
        }
    });
    Ok(())
}
