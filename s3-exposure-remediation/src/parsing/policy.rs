//! Validating parse of bucket policies carried in change events.

use crate::error::{RemediationError, RemediationResult};
use crate::types::PolicyDocument;
use serde_json::Value;

/// Parse `requestParameters.bucketPolicy`.
///
/// CloudTrail normally delivers the policy as a JSON object; a string holding
/// the JSON text is accepted too.
pub fn parse_bucket_policy(raw: &Value) -> RemediationResult<PolicyDocument> {
    let parsed = match raw {
        Value::String(text) => serde_json::from_str(text),
        Value::Object(_) => serde_json::from_value(raw.clone()),
        other => {
            return Err(RemediationError::malformed(format!(
                "bucketPolicy must be an object, got: {other}"
            )))
        }
    };

    parsed.map_err(|e| RemediationError::malformed(format!("Failed to parse bucketPolicy: {e}")))
}
