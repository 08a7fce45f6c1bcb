//! String-in, hex-out MD5 used to sign outbound API requests.
//!
//! Callers build the signing string themselves and hand it to [`digest`]; the
//! returned 32 lowercase hex characters go on the wire next to the plain
//! fields. Every function here is pure and allocates its own working state, so
//! they can be called from any number of threads at once.

use core::fmt;
use core::str::FromStr;

use tracing::{debug, trace};

use crate::crypto::hash::md5::Md5;
use crate::encoding::{hex, prepare, PrepareOptions};
use crate::error::{Error, Result};

/// How text is turned into bytes before hashing.
pub type DigestOptions = PrepareOptions;

/// A raw 128-bit MD5 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest(pub [u8; Md5::DIGEST_LEN]);

impl Digest {
    pub const HEX_LEN: usize = Md5::DIGEST_LEN * 2;

    #[inline]
    pub fn of_bytes(data: &[u8]) -> Self {
        Self(Md5::oneshot(data))
    }

    #[inline]
    pub fn of_str(input: &str, options: &DigestOptions) -> Self {
        Self::of_bytes(&prepare(input, options))
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; Md5::DIGEST_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode_lower(&self.0)
    }
}

impl From<[u8; Md5::DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; Md5::DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; Self::HEX_LEN];
        hex::encode_lower_slice(&self.0, &mut buf).map_err(|_| fmt::Error)?;
        f.write_str(core::str::from_utf8(&buf).map_err(|_| fmt::Error)?)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({:x})", self)
    }
}

impl FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        hex::decode_array::<{ Md5::DIGEST_LEN }>(s).map(Self)
    }
}

/// MD5 of `input` as 32 lowercase hex characters.
///
/// Text is encoded with the default [`DigestOptions`]: code units expanded to
/// at most 3 bytes, line endings untouched. Total over all strings.
#[inline]
pub fn digest(input: &str) -> String {
    digest_with(input, &DigestOptions::default())
}

#[inline]
pub fn digest_with(input: &str, options: &DigestOptions) -> String {
    Digest::of_str(input, options).to_hex()
}

#[inline]
pub fn digest_bytes(data: &[u8]) -> String {
    Digest::of_bytes(data).to_hex()
}

/// [`digest`] behind argument validation, for callers whose input may be
/// absent.
pub fn try_digest(input: Option<&str>) -> Result<String> {
    let Some(input) = input else {
        debug!("rejecting digest request without input");
        return Err(Error::InvalidArgument("digest input is missing"));
    };
    trace!(len = input.len(), "computing digest");
    Ok(digest(input))
}

/// Check `expected` (hex, either case) against the digest of `input`.
///
/// A malformed `expected` is an error, a well-formed mismatch is `Ok(false)`.
pub fn verify(input: &str, expected: &str, options: &DigestOptions) -> Result<bool> {
    let expected: Digest = expected.trim().parse().inspect_err(|err| {
        debug!(%err, "expected digest is malformed");
    })?;
    let actual = Digest::of_str(input, options);
    let matched = crate::utils::constant_time_eq(actual.as_bytes(), expected.as_bytes());
    if !matched {
        debug!(expected = %expected, actual = %actual, "digest mismatch");
    }
    Ok(matched)
}
