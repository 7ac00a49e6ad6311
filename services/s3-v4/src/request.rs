use crate::constants::DEFAULT_UNSIGNED_HEADERS;
use crate::Body;
use http::{HeaderMap, Method};
use std::collections::HashSet;

/// SignRequest describes the request to sign.
///
/// Headers are read but never modified by the signer; the computed headers
/// are returned in a [`Signature`](crate::Signature) instead.
#[derive(Debug)]
pub struct SignRequest<'a> {
    /// HTTP method.
    pub method: Method,
    /// Full url of the request, including scheme and authority.
    pub url: String,
    /// Headers of the request.
    pub headers: HeaderMap,
    /// Payload of the request.
    pub body: Body<'a>,
    /// Whether `x-amz-content-sha256` should be added to the signature headers.
    ///
    /// The payload hash is signed either way.
    pub apply_checksum_header: bool,
    /// Names of headers that are not signed, matched case-insensitively.
    pub unsigned_headers: HashSet<String>,
}

impl<'a> SignRequest<'a> {
    /// Create a request without headers or body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: Body::Empty,
            apply_checksum_header: true,
            unsigned_headers: DEFAULT_UNSIGNED_HEADERS
                .iter()
                .map(|v| v.to_string())
                .collect(),
        }
    }

    /// Set the headers of this request.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Set the body of this request.
    pub fn with_body(mut self, body: impl Into<Body<'a>>) -> Self {
        self.body = body.into();
        self
    }

    /// Set whether `x-amz-content-sha256` is added to the signature headers.
    pub fn with_apply_checksum_header(mut self, apply: bool) -> Self {
        self.apply_checksum_header = apply;
        self
    }

    /// Replace the set of unsigned headers.
    ///
    /// Names are matched case-insensitively. Pass an empty iterator to sign
    /// every header, `content-length` included.
    pub fn with_unsigned_headers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.unsigned_headers = names
            .into_iter()
            .map(|v| v.as_ref().to_ascii_lowercase())
            .collect();
        self
    }

    /// Add one header to the set of unsigned headers.
    pub fn with_unsigned_header(mut self, name: impl AsRef<str>) -> Self {
        self.unsigned_headers.insert(name.as_ref().to_ascii_lowercase());
        self
    }

    /// Returns true if the header with this name is signed.
    pub(crate) fn is_signed_header(&self, name: &str) -> bool {
        !name.eq_ignore_ascii_case(http::header::AUTHORIZATION.as_str())
            && !self
                .unsigned_headers
                .iter()
                .any(|v| v.eq_ignore_ascii_case(name))
    }
}
