//! AWS SigV4 signer for S3-compatible services.
//!
//! The [`Signer`] turns a [`SignRequest`] into a [`Signature`] holding the
//! `host`, `x-amz-date`, `x-amz-content-sha256` and `authorization` headers.
//! It never sends requests and never modifies the caller's headers.
//!
//! # Example
//!
//! ```
//! use http::Method;
//! use s3sign_v4::{Config, SignRequest, Signer};
//!
//! # fn main() -> s3sign_core::Result<()> {
//! let signer = Signer::new(Config::new("access_key", "secret_key"));
//!
//! let mut req = SignRequest::new(Method::PUT, "http://127.0.0.1:9000/bucket/key")
//!     .with_body("Hello, World!");
//! let signature = signer.sign_request(&mut req)?;
//!
//! assert!(signature.headers().contains_key("authorization"));
//! assert_eq!(signature.headers()["host"], "127.0.0.1:9000");
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod body;
pub use body::{Body, ReadSeek};

mod config;
pub use config::Config;

mod constants;
pub use constants::{DEFAULT_UNSIGNED_HEADERS, EMPTY_STRING_SHA256};

mod request;
pub use request::SignRequest;

mod signature;
pub use signature::Signature;

mod sign_request;
pub use sign_request::Signer;
