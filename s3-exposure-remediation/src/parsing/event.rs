//! Classification of inbound bucket change events.

use crate::error::{RemediationError, RemediationResult};
use serde_json::{Map, Value};

/// What changed on the bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    PolicyChanged,
    AclChanged,
    Other,
}

impl EventKind {
    pub fn from_event_name(name: &str) -> Self {
        match name {
            "PutBucketPolicy" => Self::PolicyChanged,
            "PutBucketAcl" => Self::AclChanged,
            _ => Self::Other,
        }
    }
}

/// A classified event. Immutable and scoped to one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketEvent {
    pub bucket_name: String,
    pub event_name: String,
    pub kind: EventKind,
    pub parameters: Map<String, Value>,
}

impl BucketEvent {
    /// `requestParameters.bucketPolicy`, if the event carries one.
    pub fn bucket_policy(&self) -> Option<&Value> {
        self.parameters.get("bucketPolicy")
    }
}

/// Extract bucket name, event kind and request parameters from the envelope
/// (`detail.eventName`, `detail.requestParameters`).
pub fn classify(envelope: &Value) -> RemediationResult<BucketEvent> {
    let detail = envelope
        .get("detail")
        .and_then(Value::as_object)
        .ok_or_else(|| RemediationError::malformed("event has no 'detail' object"))?;

    let event_name = detail
        .get("eventName")
        .and_then(Value::as_str)
        .ok_or_else(|| RemediationError::malformed("'detail.eventName' is missing or not a string"))?;

    let parameters = detail
        .get("requestParameters")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            RemediationError::malformed("'detail.requestParameters' is missing or not an object")
        })?;

    let bucket_name = parameters
        .get("bucketName")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            RemediationError::malformed(
                "'detail.requestParameters.bucketName' is missing or not a string",
            )
        })?;

    if bucket_name.is_empty() {
        return Err(RemediationError::malformed(
            "'detail.requestParameters.bucketName' is empty",
        ));
    }

    Ok(BucketEvent {
        bucket_name: bucket_name.to_string(),
        event_name: event_name.to_string(),
        kind: EventKind::from_event_name(event_name),
        parameters: parameters.clone(),
    })
}
