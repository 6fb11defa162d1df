//! Shared data types: bucket policy documents, ACL grants, identities and outcomes.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Actions that make a wildcard statement a public-read exposure.
pub const READ_PERMISSIONS: [&str; 2] = ["s3:GetObject", "s3:ListBucket"];

/// Either a single value or a list of values; the original shape is kept on output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Self::One(item) => std::slice::from_ref(item).iter(),
            Self::Many(items) => items.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        match self {
            Self::One(item) => std::slice::from_mut(item).iter_mut(),
            Self::Many(items) => items.iter_mut(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Policy principal: the `"*"` marker or a structured value such as `{"AWS": "..."}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Principal {
    Wildcard,
    Structured(Map<String, Value>),
}

impl Principal {
    /// `{"AWS": "arn:<partition>:iam::<account>:root"}` for the given account.
    pub fn account_root(identity: &AccountIdentity) -> Self {
        let mut map = Map::new();
        map.insert("AWS".to_string(), Value::String(identity.root_arn()));
        Self::Structured(map)
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Wildcard => Value::String("*".to_string()),
            Self::Structured(map) => Value::Object(map.clone()),
        }
    }
}

impl Serialize for Principal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Wildcard => serializer.serialize_str("*"),
            Self::Structured(map) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) if s == "*" => Ok(Self::Wildcard),
            Value::Object(map) => Ok(Self::Structured(map)),
            other => Err(D::Error::custom(format!(
                "unsupported Principal shape: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Allow,
    Deny,
}

/// Typed fields of a statement, used for validation and matching only.
#[derive(Deserialize)]
struct StatementView {
    #[serde(rename = "Principal", default)]
    principal: Option<Principal>,
    #[serde(rename = "Action", default)]
    action: Option<OneOrMany<String>>,
    #[serde(rename = "Effect")]
    effect: Effect,
    #[serde(rename = "Resource", default)]
    resource: Option<OneOrMany<String>>,
}

/// One bucket policy statement.
///
/// The statement is written back from its original key/value map, so key
/// order and every key this crate does not interpret (`Sid`, `Condition`,
/// `NotPrincipal`, `NotAction`, ...) survive unchanged. Only `Principal` is
/// ever replaced, in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    principal: Option<Principal>,
    action: Option<OneOrMany<String>>,
    effect: Effect,
    resource: Option<OneOrMany<String>>,
    raw: Map<String, Value>,
}

impl Statement {
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn action(&self) -> Option<&OneOrMany<String>> {
        self.action.as_ref()
    }

    pub fn effect(&self) -> Effect {
        self.effect
    }

    pub fn resource(&self) -> Option<&OneOrMany<String>> {
        self.resource.as_ref()
    }

    /// Keys of the statement as written in the source document.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// Replace the principal without moving the `Principal` key.
    pub fn set_principal(&mut self, principal: Principal) {
        self.raw.insert("Principal".to_string(), principal.to_value());
        self.principal = Some(principal);
    }

    /// Wildcard principal combined with at least one read permission.
    ///
    /// `Effect` is deliberately not consulted: a `Deny` statement matching
    /// this test is narrowed as well. Whether that is wanted is still an open
    /// question; see DESIGN.md.
    pub fn grants_public_read(&self) -> bool {
        let wildcard = self.principal.as_ref().is_some_and(Principal::is_wildcard);
        wildcard
            && self.action.as_ref().is_some_and(|actions| {
                actions
                    .iter()
                    .any(|action| READ_PERMISSIONS.contains(&action.as_str()))
            })
    }
}

impl Serialize for Statement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Statement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::deserialize(deserializer)?;
        let view: StatementView =
            serde_json::from_value(Value::Object(raw.clone())).map_err(D::Error::custom)?;
        Ok(Self {
            principal: view.principal,
            action: view.action,
            effect: view.effect,
            resource: view.resource,
            raw,
        })
    }
}

/// A bucket policy document.
///
/// Like [`Statement`], the document keeps its original top-level map; the
/// `Statement` entry is emitted from the parsed statements at its original
/// position.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyDocument {
    statement: OneOrMany<Statement>,
    raw: Map<String, Value>,
}

impl PolicyDocument {
    pub fn version(&self) -> Option<&str> {
        self.raw.get("Version").and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.raw.get("Id").and_then(Value::as_str)
    }

    pub fn statements(&self) -> std::slice::Iter<'_, Statement> {
        self.statement.iter()
    }

    pub fn statements_mut(&mut self) -> std::slice::IterMut<'_, Statement> {
        self.statement.iter_mut()
    }
}

impl Serialize for PolicyDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.raw.len()))?;
        for (key, value) in &self.raw {
            if key == "Statement" {
                map.serialize_entry(key, &self.statement)?;
            } else {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PolicyDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut raw = Map::deserialize(deserializer)?;

        for key in ["Version", "Id"] {
            if let Some(value) = raw.get(key) {
                if !value.is_string() {
                    return Err(D::Error::custom(format!("{key} must be a string")));
                }
            }
        }

        // The statements are held parsed; the raw slot only keeps the key's position.
        let statement = raw
            .get_mut("Statement")
            .map(Value::take)
            .ok_or_else(|| D::Error::missing_field("Statement"))?;
        let statement = serde_json::from_value(statement).map_err(D::Error::custom)?;

        Ok(Self { statement, raw })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GranteeType {
    Group,
    CanonicalUser,
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    FullControl,
    Read,
    ReadAcp,
    Write,
    WriteAcp,
}

/// One ACL grant. `grantee_identifier` is the group URI, canonical id or email,
/// depending on `grantee_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub grantee_type: GranteeType,
    pub grantee_identifier: String,
    pub permission: Permission,
}

impl Grant {
    pub fn new(
        grantee_type: GranteeType,
        grantee_identifier: impl Into<String>,
        permission: Permission,
    ) -> Self {
        Self {
            grantee_type,
            grantee_identifier: grantee_identifier.into(),
            permission,
        }
    }
}

/// Canned ACLs this crate can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CannedAcl {
    Private,
}

/// The caller's account, as parsed from its identity ARN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountIdentity {
    pub partition: String,
    pub account_id: String,
}

impl AccountIdentity {
    /// `arn:<partition>:iam::<account>:root`.
    ///
    /// The partition is the caller's own rather than a fixed `aws`, so
    /// GovCloud and China accounts get a valid principal. For the commercial
    /// partition this is exactly `arn:aws:iam::<account>:root`.
    pub fn root_arn(&self) -> String {
        format!("arn:{}:iam::{}:root", self.partition, self.account_id)
    }
}

/// Acknowledgement of a successful write call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteAck {
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WriteOperation {
    PutBucketPolicy,
    PutBucketAcl,
}

/// Record of the single mutating call issued by an invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteResponse {
    pub bucket: String,
    pub operation: WriteOperation,
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<PolicyDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl: Option<CannedAcl>,
    pub remediated_at: DateTime<Utc>,
}

/// Terminal state of one invocation that did not fault.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum Outcome {
    /// Bucket is whitelisted.
    Skipped { bucket: String },
    /// Event kind is not one this responder acts on.
    Ignored {
        bucket: String,
        #[serde(rename = "eventName")]
        event_name: String,
    },
    /// Nothing was exposed; no write was issued.
    NoChange { bucket: String },
    /// Exposure was reverted.
    Updated(WriteResponse),
}

impl Outcome {
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Updated(_))
    }
}
