//! Remediation Service Layer
//!
//! This module provides the service interface that encapsulates the remediation
//! business logic. The service holds the whitelist and the two upstream seams
//! (identity and bucket control) and exposes `handle()`, the single
//! event-handling operation used by the entry point.

use crate::aws::{BucketControl, IdentityResolver, S3BucketControl, StsIdentityResolver};
use crate::config::Whitelist;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_sts::Client as StsClient;
use std::sync::Arc;

/// Main service struct that holds configuration and upstream clients
pub struct RemediationService {
    pub(crate) whitelist: Arc<Whitelist>,
    pub(crate) identity: Box<dyn IdentityResolver>,
    pub(crate) storage: Box<dyn BucketControl>,
}

impl RemediationService {
    /// Create a service backed by the AWS SDK.
    ///
    /// Configuration is loaded using the default credential provider chain;
    /// `region` overrides the region from the environment when given. No
    /// network call is made until an event needs one.
    pub async fn new(whitelist: Arc<Whitelist>, region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region));
        }
        let config = loader.load().await;

        Self::with_clients(
            whitelist,
            Box::new(StsIdentityResolver::new(StsClient::new(&config))),
            Box::new(S3BucketControl::new(S3Client::new(&config))),
        )
    }

    /// Create a service from explicit seam implementations.
    pub fn with_clients(
        whitelist: Arc<Whitelist>,
        identity: Box<dyn IdentityResolver>,
        storage: Box<dyn BucketControl>,
    ) -> Self {
        Self {
            whitelist,
            identity,
            storage,
        }
    }

    pub fn whitelist(&self) -> &Whitelist {
        &self.whitelist
    }

    // handle() is implemented in handle.rs
}
