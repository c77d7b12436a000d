//! Configuration types
//!
//! Register address layout, stored as postcard binary data when the
//! `serde` feature is enabled.

pub mod layout;

pub use layout::*;
