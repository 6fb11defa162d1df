//! Bucket policy remediation: narrow public-read statements to the caller's account.

use crate::aws::{resolve_account_identity, BucketControl, IdentityResolver};
use crate::error::RemediationResult;
use crate::types::{Outcome, PolicyDocument, Principal, WriteOperation, WriteResponse};
use log::{debug, info, warn};

/// Replace the principal of every public-read statement with `restricted`.
///
/// Returns the number of statements changed. Statements are visited in
/// order and each one is changed at most once; all others are untouched.
pub fn restrict_public_read(policy: &mut PolicyDocument, restricted: &Principal) -> usize {
    let mut changed = 0;
    for statement in policy.statements_mut() {
        if statement.grants_public_read() {
            statement.set_principal(restricted.clone());
            changed += 1;
        }
    }
    changed
}

/// Rewrite `policy` and submit it as a full replacement when it grants public read.
///
/// The caller identity is only resolved when at least one statement needs
/// rewriting, so an already-restricted policy costs no upstream calls.
pub async fn remediate_policy(
    identity: &dyn IdentityResolver,
    storage: &dyn BucketControl,
    bucket: &str,
    mut policy: PolicyDocument,
) -> RemediationResult<Outcome> {
    let exposed = policy.statements().filter(|s| s.grants_public_read()).count();
    if exposed == 0 {
        debug!("Policy for {bucket} grants no public read access - nothing to do.");
        return Ok(Outcome::NoChange {
            bucket: bucket.to_string(),
        });
    }

    warn!("Policy for {bucket} has {exposed} statement(s) granting public read access.");

    let account = resolve_account_identity(identity).await?;
    let restricted = Principal::account_root(&account);
    let changed = restrict_public_read(&mut policy, &restricted);

    info!(
        "Setting bucket policy for {bucket} back to:\n{}",
        serde_json::to_string(&policy).unwrap_or_default()
    );

    let ack = storage.put_bucket_policy(bucket, &policy, true).await?;
    info!(
        "Restricted {changed} statement(s) on {bucket} to {}",
        account.root_arn()
    );

    Ok(Outcome::Updated(WriteResponse {
        bucket: bucket.to_string(),
        operation: WriteOperation::PutBucketPolicy,
        request_id: ack.request_id,
        policy: Some(policy),
        acl: None,
        remediated_at: chrono::Utc::now(),
    }))
}
