//! Sift Input - Typed, rule-checked accessors over untyped request data
//!
//! This crate provides [`Input`], a wrapper over a decoded request body that
//! hands out values of the type a handler asks for:
//!
//! - Required/optional parameters with caller defaults
//! - Integer, float, boolean, string, date, datetime, timestamp and array accessors
//! - Comparison [`Rule`]s (`>`, `>=`, `<`, `<=`, `==`, `===`, `in`) checked before coercion
//! - Typed errors carrying the key, the rejected value and a status code
//!
//! ```
//! use serde_json::json;
//! use sift_input::{Input, Rule};
//!
//! let input = Input::from_value(json!({"page": "2", "sort": "name"})).unwrap();
//! assert_eq!(input.int("page", true, 1, Some(&Rule::ge(1))).unwrap(), 2);
//! assert_eq!(input.string("order", false, "asc", None).unwrap(), "asc");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod input;
pub mod rule;

// Re-export commonly used types
pub use input::Input;
pub use rule::{Operator, Rule};
pub use sift_format::{Result, SiftError, StatusCode};
