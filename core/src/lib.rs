//! Core components for signing S3 requests.
//!
//! This crate provides the building blocks shared by the s3sign signers:
//!
//! - [`Error`] and [`ErrorKind`]: the error type returned by every signing operation
//! - [`hash`]: SHA256 and HMAC-SHA256 helpers, including streaming digests
//! - [`time`]: SigV4 time formats and the [`time::Clock`] used to read the current time
//! - [`utils`]: General utilities including secret redaction
//!
//! ## Example
//!
//! ```
//! use s3sign_core::hash::hex_sha256;
//! use s3sign_core::time::{format_iso8601, Clock, FixedClock};
//! use chrono::{TimeZone, Utc};
//!
//! let clock = FixedClock::new(Utc.with_ymd_and_hms(2012, 1, 1, 11, 22, 33).unwrap());
//! assert_eq!(format_iso8601(clock.now()), "20120101T112233Z");
//! assert_eq!(
//!     hex_sha256(b""),
//!     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
//! );
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};
