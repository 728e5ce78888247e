//! Composite call cid parsing.
//!
//! Several events identify the call by a composite `"type:id"` string
//! instead of custom metadata. The meeting id is the second segment.

use thiserror::Error;

/// Errors produced by [`parse_call_cid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CidParseError {
    /// No `:` delimiter present.
    #[error("call cid has no ':' delimiter: {0:?}")]
    MissingDelimiter(String),

    /// Delimiter present but the id segment is empty.
    #[error("call cid has an empty id segment: {0:?}")]
    EmptyId(String),
}

/// Recover the meeting id from a composite call cid.
///
/// `"default:abc123"` yields `"abc123"`. Cids with additional segments
/// yield the second segment only (`"a:b:c"` → `"b"`).
pub fn parse_call_cid(cid: &str) -> Result<&str, CidParseError> {
    let (_, rest) = cid
        .split_once(':')
        .ok_or_else(|| CidParseError::MissingDelimiter(cid.to_string()))?;

    let id = rest.split(':').next().unwrap_or_default();
    if id.is_empty() {
        return Err(CidParseError::EmptyId(cid.to_string()));
    }

    Ok(id)
}
