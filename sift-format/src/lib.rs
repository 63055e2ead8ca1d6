//! Sift Format - Core primitives for case-insensitive collections and validated input
//!
//! This crate provides the building blocks shared by the rest of the workspace
//! with no dependencies on the higher-level crates. It includes:
//!
//! - Constants and status codes
//! - Error types
//! - JSON codec with escaping options and nesting limits
//! - Loose numeric/truthiness/comparison helpers for raw values
//! - Primitive casts
//! - Date, datetime and timestamp validators
//! - Value kinds

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod cast;
pub mod constants;
pub mod error;
pub mod json;
pub mod limits;
pub mod types;
pub mod validate;
pub mod value;

// Re-export commonly used types
pub use cast::Cast;
pub use error::{Result, SiftError, StatusCode};
pub use json::JsonOptions;
pub use limits::Limits;
pub use types::ValueKind;
pub use validate::{is_date, is_datetime, is_timestamp};
