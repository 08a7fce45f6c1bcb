#![deny(unsafe_code)]

pub mod crypto;
pub mod digest;
pub mod encoding;
pub mod error;
pub mod utils;

pub use tachyon_digest_macros::*;

pub use digest::{digest, digest_bytes, digest_with, try_digest, verify, Digest, DigestOptions};
pub use error::{Error, Result};
