//! Event dispatch for the remediation service

use crate::error::{RemediationError, RemediationResult};
use crate::parsing::{classify, parse_bucket_policy, EventKind};
use crate::remediation::{remediate_acl, remediate_policy};
use crate::types::Outcome;
use log::{debug, info};
use serde_json::Value;

impl super::service::RemediationService {
    /// Handle one bucket change event.
    ///
    /// Classifies the event, skips whitelisted buckets, then routes policy
    /// changes to the policy remediator and ACL changes to the ACL
    /// remediator. Any other event kind is ignored. Errors are never
    /// recovered here; they fail the invocation.
    pub async fn handle(&self, envelope: &Value) -> RemediationResult<Outcome> {
        let event = classify(envelope)?;
        let bucket = event.bucket_name.as_str();
        debug!("Classified {} on {bucket} as {:?}", event.event_name, event.kind);

        if self.whitelist.contains(bucket) {
            info!("{bucket} found in whitelist: {} - skipping.", self.whitelist);
            return Ok(Outcome::Skipped {
                bucket: bucket.to_string(),
            });
        }
        info!(
            "{bucket} not found in whitelist: {} - validating permissions...",
            self.whitelist
        );

        let outcome = match event.kind {
            EventKind::PolicyChanged => {
                let raw = event.bucket_policy().ok_or_else(|| {
                    RemediationError::malformed(
                        "PutBucketPolicy event has no 'requestParameters.bucketPolicy'",
                    )
                })?;
                let policy = parse_bucket_policy(raw)?;
                remediate_policy(self.identity.as_ref(), self.storage.as_ref(), bucket, policy)
                    .await?
            }
            EventKind::AclChanged => remediate_acl(self.storage.as_ref(), bucket).await?,
            EventKind::Other => {
                debug!("Ignoring {} on {bucket}", event.event_name);
                Outcome::Ignored {
                    bucket: bucket.to_string(),
                    event_name: event.event_name.clone(),
                }
            }
        };

        debug!("Completed {} on {bucket}: mutation={}", event.event_name, outcome.is_mutation());
        Ok(outcome)
    }
}
