//! Bucket ACL remediation.

use crate::aws::BucketControl;
use crate::error::RemediationResult;
use crate::types::{CannedAcl, Grant, GranteeType, Outcome, WriteOperation, WriteResponse};
use log::{debug, info, warn};

/// Group URIs that make a grant public: any authenticated AWS user, and anyone.
pub const PUBLIC_GROUP_URIS: [&str; 2] = [
    "http://acs.amazonaws.com/groups/global/AuthenticatedUsers",
    "http://acs.amazonaws.com/groups/global/AllUsers",
];

/// The first grant that exposes the bucket publicly, if any.
pub fn find_public_grant(grants: &[Grant]) -> Option<&Grant> {
    grants.iter().find(|grant| {
        grant.grantee_type == GranteeType::Group
            && PUBLIC_GROUP_URIS.contains(&grant.grantee_identifier.as_str())
    })
}

/// Reset the bucket ACL to `private` when any grant is public.
///
/// The reset replaces every grant, including non-public custom ones.
pub async fn remediate_acl(storage: &dyn BucketControl, bucket: &str) -> RemediationResult<Outcome> {
    info!("Checking ACLs for {bucket}...");
    let grants = storage.get_bucket_acl(bucket).await?;

    let Some(public) = find_public_grant(&grants) else {
        debug!("ACL for {bucket} has no public grants ({} grant(s) checked).", grants.len());
        return Ok(Outcome::NoChange {
            bucket: bucket.to_string(),
        });
    };

    warn!(
        "ACL for {bucket} grants {:?} to {}",
        public.permission, public.grantee_identifier
    );
    info!("Setting ACLs for {bucket} back to private...");

    let ack = storage.put_bucket_acl(bucket, CannedAcl::Private).await?;

    Ok(Outcome::Updated(WriteResponse {
        bucket: bucket.to_string(),
        operation: WriteOperation::PutBucketAcl,
        request_id: ack.request_id,
        policy: None,
        acl: Some(CannedAcl::Private),
        remediated_at: chrono::Utc::now(),
    }))
}
