//! Domain types, errors, and validation rules for the detection store.
//!
//! Nothing in this crate performs I/O; the storage and HTTP layers both
//! depend on it.

pub mod detection;
pub mod error;
pub mod pagination;
pub mod types;
