//! AWS SDK integration: identity resolution and S3 bucket control.
//!
//! The remediators only see the [`IdentityResolver`] and [`BucketControl`]
//! traits; the SDK-backed implementations live in [`sts`] and [`s3_client`].

pub(crate) mod s3_client;
pub(crate) mod sts;

use crate::types::{CannedAcl, Grant, PolicyDocument, WriteAck};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("STS client error: {0}")]
    Sts(String),
    #[error("S3 client error: {0}")]
    S3(String),
    #[error("Policy error: {0}")]
    Policy(String),
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

pub type AwsResult<T> = Result<T, AwsError>;

/// Resolves the identity of the credentials the responder runs with.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// ARN of the calling identity (`GetCallerIdentity`).
    async fn caller_arn(&self) -> AwsResult<String>;
}

/// Reads and writes bucket access configuration.
#[async_trait]
pub trait BucketControl: Send + Sync {
    async fn get_bucket_acl(&self, bucket: &str) -> AwsResult<Vec<Grant>>;

    async fn put_bucket_acl(&self, bucket: &str, acl: CannedAcl) -> AwsResult<WriteAck>;

    /// Replace the whole bucket policy.
    ///
    /// `confirm_remove_self_bucket_access` is forwarded as S3's
    /// `ConfirmRemoveSelfBucketAccess` flag.
    async fn put_bucket_policy(
        &self,
        bucket: &str,
        policy: &PolicyDocument,
        confirm_remove_self_bucket_access: bool,
    ) -> AwsResult<WriteAck>;
}

pub use s3_client::S3BucketControl;
pub use sts::{parse_account_identity, resolve_account_identity, StsIdentityResolver};
