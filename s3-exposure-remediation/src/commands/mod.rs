//! Commands module - service layer for remediation operations

mod handle;
pub(crate) mod service;

pub use service::RemediationService;
