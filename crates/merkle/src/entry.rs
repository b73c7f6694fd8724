//! Allowlist entries and their JSON wire form.
//!
//! Input is an ordered JSON array of `{ "account": "0x…", "limit": … }`
//! records. Order is preserved exactly: it determines the leaf order and
//! therefore the root.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::digest::{Account, Limit};
use crate::error::{AllowlistError, EncodingError};

/// One allowance: an account and its limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Entry {
    pub account: Account,
    pub limit: Limit,
}

impl Entry {
    pub fn new(account: Account, limit: impl Into<Limit>) -> Self {
        Self {
            account,
            limit: limit.into(),
        }
    }

    /// Parse a hex account and a decimal or hex limit.
    pub fn parse(account: &str, limit: &str) -> Result<Self, EncodingError> {
        Ok(Self {
            account: account.parse()?,
            limit: limit.parse()?,
        })
    }
}

/// A limit as it appears in JSON.
///
/// Integers must fit in `u64`; anything wider has to be written as a string.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LimitValue {
    Integer(u64),
    Text(String),
}

impl LimitValue {
    pub fn to_limit(&self) -> Result<Limit, EncodingError> {
        match self {
            LimitValue::Integer(value) => Ok(Limit::from(*value)),
            LimitValue::Text(text) => text.parse(),
        }
    }
}

/// Untyped allowlist record, exactly as read from JSON.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AllowlistRecord {
    pub account: String,
    pub limit: LimitValue,
}

impl AllowlistRecord {
    pub fn to_entry(&self) -> Result<Entry, EncodingError> {
        Ok(Entry {
            account: self.account.parse()?,
            limit: self.limit.to_limit()?,
        })
    }
}

/// Parse a JSON array of records into typed entries, in order.
pub fn parse_entries(json: &str) -> Result<Vec<Entry>, AllowlistError> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(json)?;

    raw.into_iter()
        .enumerate()
        .map(|(index, value)| {
            let record: AllowlistRecord = serde_json::from_value(value)
                .map_err(|source| AllowlistError::Record { index, source })?;
            record
                .to_entry()
                .map_err(|source| AllowlistError::Entry { index, source })
        })
        .collect()
}

/// Read and parse an allowlist file.
pub fn load_entries(path: impl AsRef<Path>) -> Result<Vec<Entry>, AllowlistError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| AllowlistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = json.len(), "read allowlist file");
    parse_entries(&json)
}
