use http::HeaderMap;

/// Signature is the result of signing a request.
///
/// It owns the headers computed by the signer: `host`, `x-amz-date`,
/// `x-amz-content-sha256` (unless suppressed), `x-amz-security-token` (with a
/// session token) and `authorization`.
#[derive(Debug, Clone)]
pub struct Signature {
    pub(crate) headers: HeaderMap,
    pub(crate) content_sha256: String,
    pub(crate) canonical_request: String,
    pub(crate) string_to_sign: String,
    pub(crate) signature: String,
}

impl Signature {
    /// Headers computed by the signer, with lowercase names.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Hex encoded SHA256 of the payload.
    ///
    /// Always populated, even if `x-amz-content-sha256` was not emitted.
    pub fn content_sha256(&self) -> &str {
        &self.content_sha256
    }

    /// The canonical request that was signed.
    pub fn canonical_request(&self) -> &str {
        &self.canonical_request
    }

    /// The string to sign derived from the canonical request.
    pub fn string_to_sign(&self) -> &str {
        &self.string_to_sign
    }

    /// Hex encoded signature, the value after `Signature=` in `authorization`.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Insert the computed headers into `headers`, replacing existing values.
    pub fn apply(&self, headers: &mut HeaderMap) {
        for (name, value) in self.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }
    }
}
