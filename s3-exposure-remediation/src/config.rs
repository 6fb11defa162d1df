//! Whitelist configuration, loaded once at process start.

use crate::error::{RemediationError, RemediationResult};
use std::collections::BTreeSet;

/// Environment variable holding the comma-delimited whitelist.
pub const WHITELIST_ENV_VAR: &str = "S3_WHITELIST";

/// Bucket names exempted from remediation.
///
/// Membership is exact and case-sensitive. The set is never mutated after
/// construction, so it can be shared across concurrent invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Whitelist {
    buckets: BTreeSet<String>,
}

impl Whitelist {
    /// Parse a comma-delimited list of bucket names.
    ///
    /// All whitespace is removed before splitting, so `" a , b "` yields
    /// `{"a", "b"}`. An empty value is an empty whitelist; an empty segment
    /// inside a non-empty value (`"a,,b"`, `"a,"`) is rejected.
    pub fn parse(raw: &str) -> RemediationResult<Self> {
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Ok(Self::default());
        }

        let mut buckets = BTreeSet::new();
        for (index, entry) in compact.split(',').enumerate() {
            if entry.is_empty() {
                return Err(RemediationError::configuration(format!(
                    "{WHITELIST_ENV_VAR} has an empty entry at position {index}: '{raw}'"
                )));
            }
            buckets.insert(entry.to_string());
        }

        Ok(Self { buckets })
    }

    /// Read and parse [`WHITELIST_ENV_VAR`]. A missing variable is a configuration error.
    pub fn from_env() -> RemediationResult<Self> {
        match std::env::var(WHITELIST_ENV_VAR) {
            Ok(raw) => Self::parse(&raw),
            Err(std::env::VarError::NotPresent) => Err(RemediationError::configuration(format!(
                "{WHITELIST_ENV_VAR} is not set"
            ))),
            Err(std::env::VarError::NotUnicode(_)) => Err(RemediationError::configuration(
                format!("{WHITELIST_ENV_VAR} is not valid unicode"),
            )),
        }
    }

    /// The gate decision: `true` means the bucket must be skipped.
    pub fn contains(&self, bucket: &str) -> bool {
        self.buckets.contains(bucket)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(String::as_str)
    }
}

impl std::fmt::Display for Whitelist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.iter().collect();
        write!(f, "[{}]", names.join(", "))
    }
}
