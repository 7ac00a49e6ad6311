use crate::constants::{DIGEST_CHUNK_SIZE, EMPTY_STRING_SHA256};
use bytes::Bytes;
use log::debug;
use s3sign_core::hash::{hex_sha256, hex_sha256_read};
use std::fmt::{Debug, Formatter};
use std::io::{Read, Seek, SeekFrom};

/// Readers that can also seek, like [`std::fs::File`].
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek + ?Sized> ReadSeek for T {}

/// Body of the request to sign.
///
/// The variant decides how the payload hash is computed:
///
/// - [`Body::Seekable`] is hashed from its start in bounded chunks and
///   rewound to where it was, so large files are never loaded into memory.
///   The position does not matter: a file that was just written hashes the
///   same as one that was rewound.
/// - [`Body::Stream`] is read into memory once and replaced by
///   [`Body::Bytes`] holding what was read.
/// - [`Body::Bytes`] is hashed directly.
/// - [`Body::Empty`] hashes as the empty payload.
#[derive(Default)]
pub enum Body<'a> {
    /// No payload.
    #[default]
    Empty,
    /// In-memory payload.
    Bytes(Bytes),
    /// Readable payload without seek support.
    Stream(Box<dyn Read + 'a>),
    /// Seekable payload, usually backed by a file.
    Seekable(&'a mut dyn ReadSeek),
}

impl<'a> Body<'a> {
    /// Create a body from a generic reader.
    pub fn stream(r: impl Read + 'a) -> Self {
        Body::Stream(Box::new(r))
    }

    /// Create a body from a seekable reader like an opened file.
    ///
    /// The whole content is the payload, whatever the current position is.
    pub fn seekable(r: &'a mut impl ReadSeek) -> Self {
        Body::Seekable(r)
    }

    /// Returns the in-memory payload, if there is one.
    ///
    /// After signing, a [`Body::Stream`] has been buffered and shows up here.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Body::Bytes(bs) => Some(bs),
            _ => None,
        }
    }

    /// Compute the hex encoded SHA256 of the payload.
    pub fn digest(&mut self) -> s3sign_core::Result<String> {
        match self {
            Body::Empty => Ok(EMPTY_STRING_SHA256.to_string()),
            Body::Bytes(bs) => Ok(hex_sha256(bs)),
            Body::Stream(r) => {
                let mut buf = Vec::new();
                r.read_to_end(&mut buf)?;
                debug!("buffered {} bytes of stream body", buf.len());

                let digest = hex_sha256(&buf);
                *self = Body::Bytes(Bytes::from(buf));
                Ok(digest)
            }
            Body::Seekable(r) => {
                let pos = r.stream_position()?;
                r.seek(SeekFrom::Start(0))?;
                let digest = hex_sha256_read(&mut **r, DIGEST_CHUNK_SIZE)?;
                r.seek(SeekFrom::Start(pos))?;
                Ok(digest)
            }
        }
    }
}

impl Debug for Body<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Body::Empty => f.write_str("Empty"),
            Body::Bytes(bs) => f.debug_tuple("Bytes").field(&bs.len()).finish(),
            Body::Stream(_) => f.write_str("Stream"),
            Body::Seekable(_) => f.write_str("Seekable"),
        }
    }
}

impl From<Bytes> for Body<'_> {
    fn from(bs: Bytes) -> Self {
        Body::Bytes(bs)
    }
}

impl From<Vec<u8>> for Body<'_> {
    fn from(bs: Vec<u8>) -> Self {
        Body::Bytes(Bytes::from(bs))
    }
}

impl From<String> for Body<'_> {
    fn from(s: String) -> Self {
        Body::Bytes(Bytes::from(s))
    }
}

impl From<&'static str> for Body<'_> {
    fn from(s: &'static str) -> Self {
        Body::Bytes(Bytes::from_static(s.as_bytes()))
    }
}

impl From<&'static [u8]> for Body<'_> {
    fn from(s: &'static [u8]) -> Self {
        Body::Bytes(Bytes::from_static(s))
    }
}
