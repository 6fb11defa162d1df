//! AWS S3 client wrapper for bucket ACL and policy operations

use crate::aws::{AwsError, AwsResult, BucketControl};
use crate::types::{CannedAcl, Grant, GranteeType, Permission, PolicyDocument, WriteAck};
use async_trait::async_trait;
use aws_sdk_s3::operation::RequestId;
use aws_sdk_s3::types::{BucketCannedAcl, Permission as SdkPermission, Type as SdkGranteeType};
use aws_sdk_s3::Client as S3Client;

pub struct S3BucketControl {
    client: S3Client,
}

impl S3BucketControl {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BucketControl for S3BucketControl {
    async fn get_bucket_acl(&self, bucket: &str) -> AwsResult<Vec<Grant>> {
        let response = self
            .client
            .get_bucket_acl()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| AwsError::S3(format!("Failed to get ACL for bucket '{bucket}': {e}")))?;

        response.grants().iter().map(convert_grant).collect()
    }

    async fn put_bucket_acl(&self, bucket: &str, acl: CannedAcl) -> AwsResult<WriteAck> {
        let canned = match acl {
            CannedAcl::Private => BucketCannedAcl::Private,
        };

        let response = self
            .client
            .put_bucket_acl()
            .bucket(bucket)
            .acl(canned)
            .send()
            .await
            .map_err(|e| {
                AwsError::S3(format!("Failed to put ACL on bucket '{bucket}': {e:?}"))
            })?;

        Ok(WriteAck {
            request_id: response.request_id().map(str::to_string),
        })
    }

    async fn put_bucket_policy(
        &self,
        bucket: &str,
        policy: &PolicyDocument,
        confirm_remove_self_bucket_access: bool,
    ) -> AwsResult<WriteAck> {
        let policy_json = serde_json::to_string(policy)
            .map_err(|e| AwsError::Policy(format!("Failed to serialize policy: {e}")))?;

        let response = self
            .client
            .put_bucket_policy()
            .bucket(bucket)
            .confirm_remove_self_bucket_access(confirm_remove_self_bucket_access)
            .policy(policy_json)
            .send()
            .await
            .map_err(|e| {
                AwsError::S3(format!("Failed to put policy on bucket '{bucket}': {e:?}"))
            })?;

        Ok(WriteAck {
            request_id: response.request_id().map(str::to_string),
        })
    }
}

fn convert_grant(grant: &aws_sdk_s3::types::Grant) -> AwsResult<Grant> {
    let grantee = grant
        .grantee()
        .ok_or_else(|| AwsError::UnexpectedResponse("ACL grant without grantee".into()))?;

    let (grantee_type, identifier) = match grantee.r#type() {
        SdkGranteeType::Group => (GranteeType::Group, grantee.uri()),
        SdkGranteeType::CanonicalUser => (GranteeType::CanonicalUser, grantee.id()),
        SdkGranteeType::AmazonCustomerByEmail => (GranteeType::Email, grantee.email_address()),
        other => {
            return Err(AwsError::UnexpectedResponse(format!(
                "unsupported grantee type '{}'",
                other.as_str()
            )))
        }
    };

    let permission = match grant.permission() {
        Some(SdkPermission::FullControl) => Permission::FullControl,
        Some(SdkPermission::Read) => Permission::Read,
        Some(SdkPermission::ReadAcp) => Permission::ReadAcp,
        Some(SdkPermission::Write) => Permission::Write,
        Some(SdkPermission::WriteAcp) => Permission::WriteAcp,
        Some(other) => {
            return Err(AwsError::UnexpectedResponse(format!(
                "unsupported ACL permission '{}'",
                other.as_str()
            )))
        }
        None => {
            return Err(AwsError::UnexpectedResponse(
                "ACL grant without permission".into(),
            ))
        }
    };

    Ok(Grant::new(
        grantee_type,
        identifier.unwrap_or_default(),
        permission,
    ))
}
