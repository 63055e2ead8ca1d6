//! Constants shared across Sift crates

/// Status code for invalid caller-supplied parameters (HTTP 400).
pub const E_400000: u32 = 400_000;
/// Status code for library misuse and internal failures (HTTP 500).
pub const E_500000: u32 = 500_000;

/// Smallest accepted timestamp.
pub const TIMESTAMP_MIN: i64 = 0;
/// Largest accepted timestamp; later values overflow 32-bit `time_t`.
pub const TIMESTAMP_MAX: i64 = i32::MAX as i64; // 2038-01-19 03:14:07 UTC

/// Layout accepted by date validation.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Layout accepted by datetime validation.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Example shown in date validation errors.
pub const DATE_EXAMPLE: &str = "2000-01-01";
/// Example shown in datetime validation errors.
pub const DATETIME_EXAMPLE: &str = "2000-01-01 00:00:00";

/// Escape `<` and `>` as `\u003C` and `\u003E`.
pub const JSON_HEX_TAG: u32 = 1 << 0;
/// Escape `&` as `\u0026`.
pub const JSON_HEX_AMP: u32 = 1 << 1;
/// Escape `'` as `\u0027`.
pub const JSON_HEX_APOS: u32 = 1 << 2;
/// Escape `"` as `\u0022`.
pub const JSON_HEX_QUOT: u32 = 1 << 3;
/// Write arrays as objects keyed by index.
pub const JSON_FORCE_OBJECT: u32 = 1 << 4;
/// Leave `/` unescaped.
pub const JSON_UNESCAPED_SLASHES: u32 = 1 << 6;
/// Indent output with four spaces.
pub const JSON_PRETTY_PRINT: u32 = 1 << 7;
/// Write non-ASCII characters verbatim.
pub const JSON_UNESCAPED_UNICODE: u32 = 1 << 8;

/// Default JSON depth limit.
pub const DEFAULT_JSON_DEPTH: usize = 512;
/// Hard ceiling for configurable JSON depth limits.
pub const MAX_JSON_DEPTH: usize = 65_536;
