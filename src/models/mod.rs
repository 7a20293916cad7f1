//! Data models

pub mod transaction;

pub use transaction::*;
