//! Remediators for bucket policy and bucket ACL exposure

pub mod acl;
pub mod policy;

pub use acl::{find_public_grant, remediate_acl, PUBLIC_GROUP_URIS};
pub use policy::{remediate_policy, restrict_public_read};
