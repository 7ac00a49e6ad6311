use crate::constants::{
    AWS4_HMAC_SHA256, AWS4_REQUEST, AWS_URI_ENCODE_SET, X_AMZ_CONTENT_SHA_256, X_AMZ_DATE,
    X_AMZ_SECURITY_TOKEN,
};
use crate::{Config, SignRequest, Signature};
use http::header::{AUTHORIZATION, HOST};
use http::{HeaderMap, HeaderValue, Uri};
use log::debug;
use percent_encoding::{percent_decode_str, percent_encode, utf8_percent_encode};
use s3sign_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use s3sign_core::time::{format_iso8601, Clock, SystemClock};
use s3sign_core::{Error, Result};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::Arc;

/// Signer that implements AWS SigV4 for S3-compatible services.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// The signer holds no mutable state: it can be shared across threads and
/// used for any number of requests.
#[derive(Debug, Clone)]
pub struct Signer {
    config: Arc<Config>,
    clock: Arc<dyn Clock>,
}

impl Signer {
    /// Create a new signer for the given config.
    pub fn new(config: impl Into<Arc<Config>>) -> Self {
        Self {
            config: config.into(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Specify the clock used when a request carries no `x-amz-date`.
    ///
    /// # Note
    ///
    /// Requests should always be signed with the current time. Pin the
    /// clock only to make signatures reproducible.
    pub fn with_clock(mut self, clock: impl Clock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Config used by this signer.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Sign the request, returning the headers to send with it.
    ///
    /// The headers of `req` are left untouched. A [`Body::Stream`](crate::Body::Stream)
    /// body is buffered into [`Body::Bytes`](crate::Body::Bytes) while hashing
    /// unless `x-amz-content-sha256` is already present.
    pub fn sign_request(&self, req: &mut SignRequest<'_>) -> Result<Signature> {
        let uri: Uri = req.url.parse()?;
        let mut sigv4_headers = HeaderMap::new();

        // Host, from the caller or derived from the url.
        let host = match req.headers.get(HOST) {
            Some(v) => v.clone(),
            None => HeaderValue::try_from(host_header_value(&uri)?)?,
        };
        sigv4_headers.insert(HOST, host);

        // Date, from the caller or the clock.
        let timestamp = match req.headers.get(X_AMZ_DATE) {
            Some(v) => v.to_str()?.to_string(),
            None => format_iso8601(self.clock.now()),
        };
        let date = timestamp.get(..8).ok_or_else(|| {
            Error::request_invalid(format!(
                "x-amz-date {timestamp:?} is not in YYYYMMDDTHHMMSSZ format"
            ))
        })?;
        sigv4_headers.insert(X_AMZ_DATE, HeaderValue::from_str(&timestamp)?);

        // Payload hash. A given x-amz-content-sha256 means the body is not touched.
        let content_sha256 = match req.headers.get(X_AMZ_CONTENT_SHA_256) {
            Some(v) => v.to_str()?.to_string(),
            None => req.body.digest()?,
        };
        if req.apply_checksum_header {
            sigv4_headers.insert(
                X_AMZ_CONTENT_SHA_256,
                HeaderValue::from_str(&content_sha256)?,
            );
        }

        if let Some(token) = &self.config.session_token {
            if !req.headers.contains_key(X_AMZ_SECURITY_TOKEN) {
                let mut value = HeaderValue::from_str(token)?;
                // Set token value sensitive to avoid leaking.
                value.set_sensitive(true);
                sigv4_headers.insert(X_AMZ_SECURITY_TOKEN, value);
            }
        }

        let signed_headers = canonicalize_headers(req, &sigv4_headers)?;
        let signed_header_names = signed_headers.keys().copied().collect::<Vec<_>>().join(";");

        let creq = canonical_request_string(
            req.method.as_str(),
            &uri,
            &signed_headers,
            &signed_header_names,
            &content_sha256,
        )?;
        debug!("calculated canonical request: {creq}");

        // Scope: "20220313/<region>/<service>/aws4_request"
        let scope = format!(
            "{}/{}/{}/{}",
            date, self.config.region, self.config.service, AWS4_REQUEST
        );
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // AWS4-HMAC-SHA256
        // 20220313T072004Z
        // 20220313/<region>/<service>/aws4_request
        // <hashed_canonical_request>
        let string_to_sign = format!(
            "{AWS4_HMAC_SHA256}\n{timestamp}\n{scope}\n{}",
            hex_sha256(creq.as_bytes())
        );
        debug!("calculated string to sign: {string_to_sign}");

        let (access_key, secret_key) = self.credential()?;
        let signing_key = generate_signing_key(
            secret_key,
            date,
            &self.config.region,
            &self.config.service,
        );
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        let mut authorization = HeaderValue::from_str(&format!(
            "{AWS4_HMAC_SHA256} Credential={access_key}/{scope}, SignedHeaders={signed_header_names}, Signature={signature}"
        ))?;
        authorization.set_sensitive(true);
        sigv4_headers.insert(AUTHORIZATION, authorization);

        Ok(Signature {
            headers: sigv4_headers,
            content_sha256,
            canonical_request: creq,
            string_to_sign,
            signature,
        })
    }

    fn credential(&self) -> Result<(&str, &str)> {
        let access_key = self
            .config
            .access_key
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::credential_invalid("access key is required for signing"))?;
        let secret_key = self
            .config
            .secret_key
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::credential_invalid("secret key is required for signing"))?;

        Ok((access_key, secret_key))
    }
}

/// Host header for the url: the port is kept only if it is not the
/// default port of the scheme.
fn host_header_value(uri: &Uri) -> Result<String> {
    let host = uri
        .host()
        .ok_or_else(|| Error::request_invalid("request without host is invalid for signing"))?;

    let default_port = match uri.scheme_str() {
        Some("http") => Some(80),
        Some("https") => Some(443),
        _ => None,
    };

    Ok(match uri.port_u16() {
        Some(port) if Some(port) != default_port => format!("{host}:{port}"),
        _ => host.to_string(),
    })
}

fn canonical_request_string(
    method: &str,
    uri: &Uri,
    headers: &BTreeMap<&str, String>,
    signed_headers: &str,
    content_sha256: &str,
) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    // Insert method
    writeln!(f, "{}", method.to_ascii_uppercase())?;
    // Insert encoded path
    writeln!(f, "{}", canonical_uri(uri.path()))?;
    // Insert query
    writeln!(f, "{}", canonical_query(uri.query()))?;
    // Insert signed headers
    for (name, value) in headers {
        writeln!(f, "{name}:{value}")?;
    }
    writeln!(f)?;
    writeln!(f, "{signed_headers}")?;
    write!(f, "{content_sha256}")?;

    Ok(f)
}

/// Encode every path segment on its own so that `/` is kept while an
/// encoded `%2F` inside a segment stays encoded.
fn canonical_uri(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }

    path.split('/')
        .map(|segment| {
            let decoded = percent_decode_str(segment).collect::<Vec<u8>>();
            percent_encode(&decoded, &AWS_URI_ENCODE_SET).to_string()
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Query pairs encoded and sorted by key, then by value.
fn canonical_query(query: Option<&str>) -> String {
    let Some(query) = query else {
        return String::new();
    };

    let mut pairs = form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| {
            (
                utf8_percent_encode(&k, &AWS_URI_ENCODE_SET).to_string(),
                utf8_percent_encode(&v, &AWS_URI_ENCODE_SET).to_string(),
            )
        })
        .collect::<Vec<_>>();
    pairs.sort();

    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Collect the signed headers sorted by name.
///
/// Headers computed by the signer take precedence over the caller's.
/// Multiple values of one header are joined with `,`.
fn canonicalize_headers<'h>(
    req: &'h SignRequest<'_>,
    sigv4_headers: &'h HeaderMap,
) -> Result<BTreeMap<&'h str, String>> {
    let mut headers = BTreeMap::new();

    for name in sigv4_headers.keys().chain(req.headers.keys()) {
        let name = name.as_str();
        if headers.contains_key(name) || !req.is_signed_header(name) {
            continue;
        }

        let source = if sigv4_headers.contains_key(name) {
            sigv4_headers
        } else {
            &req.headers
        };
        let values = source
            .get_all(name)
            .iter()
            .map(|v| v.to_str().map(normalize_header_value))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        headers.insert(name, values.join(","));
    }

    Ok(headers)
}

/// Trim the value and fold runs of whitespace into a single space.
///
/// Whitespace inside double quotes is kept as is. An unmatched quote keeps
/// the whitespace of everything after it.
fn normalize_header_value(value: &str) -> String {
    let mut s = String::with_capacity(value.len());
    let mut in_quotes = false;
    let mut pending_space = false;

    for c in value.trim().chars() {
        if c == '"' {
            in_quotes = !in_quotes;
        }
        if !in_quotes && c.is_ascii_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            s.push(' ');
            pending_space = false;
        }
        s.push(c);
    }

    s
}

fn generate_signing_key(secret: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), date.as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), AWS4_REQUEST.as_bytes())
}
