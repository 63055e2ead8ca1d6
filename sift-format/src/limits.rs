//! JSON nesting limits and configuration

use crate::constants::{DEFAULT_JSON_DEPTH, MAX_JSON_DEPTH};
use crate::error::{Result, SiftError};

/// Limits applied by the JSON codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum container nesting depth (default: 512, hard: 65,536)
    pub max_depth: usize,
}

impl Limits {
    /// Limits with a custom depth
    pub fn with_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Check the configured values against the hard limits
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(SiftError::InvalidDepth);
        }
        if self.max_depth > MAX_JSON_DEPTH {
            return Err(SiftError::DepthExceeded {
                depth: self.max_depth,
                max_depth: MAX_JSON_DEPTH,
            });
        }
        Ok(())
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_JSON_DEPTH,
        }
    }
}
