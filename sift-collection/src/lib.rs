//! Sift Collection - Ordered key/value store with case-insensitive lookup
//!
//! This crate provides [`Collection`], an insertion-ordered map of JSON values:
//!
//! - Case-insensitive lookup that keeps the key's latest spelling for export
//! - Index access (`collection["key"]`) returning `null` for absent keys
//! - Primitive casts on read
//! - JSON export and a text serialization round trip
//! - Read-only collections that reject every mutation

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod access;
pub mod collection;
pub mod export;

// Re-export commonly used types
pub use access::Access;
pub use collection::{Collection, Iter};
pub use sift_format::{Cast, JsonOptions, Result, SiftError};
