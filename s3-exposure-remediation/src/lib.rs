//! This crate provides the core business logic for S3 exposure remediation:
//! - Classification of bucket change events
//! - Whitelist gating
//! - Bucket policy rewriting (public read narrowed to the owning account)
//! - Bucket ACL exposure detection and reset to `private`
//!

mod aws;
pub mod commands;
mod config;
mod error;
mod parsing;
mod remediation;
mod types;

// Re-exports for a small, focused public API
pub use aws::{
    parse_account_identity, resolve_account_identity, AwsError, AwsResult, BucketControl,
    IdentityResolver, S3BucketControl, StsIdentityResolver,
};
pub use commands::RemediationService;
pub use config::{Whitelist, WHITELIST_ENV_VAR};
pub use error::{RemediationError, RemediationResult};
pub use parsing::{classify, parse_bucket_policy, BucketEvent, EventKind};
pub use remediation::{
    find_public_grant, remediate_acl, remediate_policy, restrict_public_read, PUBLIC_GROUP_URIS,
};
pub use types::{
    AccountIdentity, CannedAcl, Effect, Grant, GranteeType, OneOrMany, Outcome, Permission,
    PolicyDocument, Principal, Statement, WriteAck, WriteOperation, WriteResponse,
    READ_PERMISSIONS,
};
