//! Caller identity resolution through STS.

use crate::aws::{AwsError, AwsResult, IdentityResolver};
use crate::types::AccountIdentity;
use async_trait::async_trait;
use aws_sdk_sts::Client as StsClient;

pub struct StsIdentityResolver {
    client: StsClient,
}

impl StsIdentityResolver {
    pub fn new(client: StsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityResolver for StsIdentityResolver {
    async fn caller_arn(&self) -> AwsResult<String> {
        let response = self
            .client
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| AwsError::Sts(format!("Failed to get caller identity: {e}")))?;

        response
            .arn()
            .map(str::to_string)
            .ok_or_else(|| AwsError::UnexpectedResponse("GetCallerIdentity returned no ARN".into()))
    }
}

/// Resolve the caller's account. Re-resolved on every call; nothing is cached.
pub async fn resolve_account_identity(
    resolver: &dyn IdentityResolver,
) -> AwsResult<AccountIdentity> {
    let arn = resolver.caller_arn().await?;
    parse_account_identity(&arn)
}

/// Split `arn:partition:service:region:account-id:resource` and keep the
/// partition (field 1) and 12-digit account id (field 4).
pub fn parse_account_identity(arn: &str) -> AwsResult<AccountIdentity> {
    let parts: Vec<&str> = arn.split(':').collect();
    if parts.len() < 6 || parts[0] != "arn" || parts[1].is_empty() {
        return Err(AwsError::UnexpectedResponse(format!(
            "caller identity is not an ARN: '{arn}'"
        )));
    }

    let account_id = parts[4];
    if account_id.len() != 12 || !account_id.chars().all(|c| c.is_ascii_digit()) {
        return Err(AwsError::UnexpectedResponse(format!(
            "caller identity ARN has no account id: '{arn}'"
        )));
    }

    Ok(AccountIdentity {
        partition: parts[1].to_string(),
        account_id: account_id.to_string(),
    })
}
