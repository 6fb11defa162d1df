//! Event classification and policy parsing (pure Rust)

pub mod event;
pub mod policy;

pub use event::{classify, BucketEvent, EventKind};
pub use policy::parse_bucket_policy;
