//! Mapping engine limits and defaults
//!
//! # Tuning
//!
//! - **ERROR_PREFIX_WINDOW**: the classifier only parses bodies whose first
//!   bytes mention an error key. The API puts the `error` key first in every
//!   error payload observed so far; widen this if that ever changes.
//!
//! - **DEFAULT_REGISTRY_CAPACITY**: `None` keeps every resolved type. Bound it
//!   only for processes that map an open-ended set of generated types.

/// Bytes of the response body scanned for an error marker before parsing.
pub const ERROR_PREFIX_WINDOW: usize = 50;

/// Marker that must appear inside the prefix window of an error body.
///
/// Matches `"error"`, `"error_code"` and `"error_description"`.
pub const ERROR_MARKER: &[u8] = b"\"error";

/// Default bound on the number of cached registry entries.
pub const DEFAULT_REGISTRY_CAPACITY: Option<usize> = None;

/// Legacy error code the API uses for invalid access tokens.
pub const OAUTH_LEGACY_ERROR_CODE: i64 = 190;
