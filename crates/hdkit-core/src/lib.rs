//! Core error taxonomy and hex helpers for hdkit.

#![forbid(unsafe_code)]

mod error;
pub mod hex;

pub use error::{Error, ErrorKind};

pub type Result<T> = std::result::Result<T, Error>;
