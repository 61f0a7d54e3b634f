//! Writing assembled archives to disk.

pub mod zip;

pub use self::zip::{to_zip_bytes, write_zip};
