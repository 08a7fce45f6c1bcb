pub mod hex;
pub mod text;

pub use text::{prepare, Newlines, PrepareOptions, TextEncoding};
