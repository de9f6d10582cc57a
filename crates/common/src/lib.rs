//! Pieces shared by the server crate and the binary: tracing setup and
//! small HTTP payload types.

pub mod types;
pub mod utils;
