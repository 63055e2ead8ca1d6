//! Access modes for collections

/// Whether a collection accepts mutations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Access {
    /// `set`, `remove` and `clear` are allowed
    #[default]
    ReadWrite,
    /// Every mutation fails with `SiftError::ReadOnlyViolation`
    ReadOnly,
}
