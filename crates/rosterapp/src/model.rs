//! # Domain Model
//!
//! Three record sets make up the persisted state:
//!
//! - [`Owner`]: the person record with its fixed fields.
//! - [`AttributeDefinition`]: a runtime-declared field (name + kind + flags).
//! - [`AttributeValue`]: one typed value tying an owner to a definition.
//!
//! Values reference both an owner and a definition and are removed together
//! with either of them. The (owner, definition) pair is not unique; lookups
//! resolve duplicates with [`first_match`], which picks the earliest-inserted
//! value.
//!
//! The request types ([`NewOwner`], [`DefinitionRequest`], [`ValueRequest`] and
//! the `*Patch` types) mirror the bodies a transport layer hands in. They are
//! deserializable so any transport can decode straight into them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attributes::{decode_data_uri, ArtifactPayload, AttributeKind};

pub type OwnerId = u64;
pub type DefinitionId = u64;
pub type ValueId = u64;

/// The person record that attribute values hang off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: OwnerId,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// `YYYY-MM-DD`
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub document_type: Option<String>,
    pub document_number: Option<String>,
    pub is_active: bool,
    pub registration_date: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Request body for creating an owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewOwner {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub document_type: Option<String>,
    pub document_number: Option<String>,
    pub is_active: Option<bool>,
    pub notes: Option<String>,
}

impl NewOwner {
    pub fn named(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            ..Default::default()
        }
    }
}

/// Partial owner update. `None` leaves a field untouched; an empty string
/// clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OwnerPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub document_type: Option<String>,
    pub document_number: Option<String>,
    pub is_active: Option<bool>,
    pub notes: Option<String>,
}

/// A runtime-declared attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    pub id: DefinitionId,
    /// Unique among all definitions, active or not (case-sensitive)
    pub name: String,
    pub kind: AttributeKind,
    /// Advisory only; existing values are not checked against it
    pub required: bool,
    /// Inactive definitions are hidden from catalogs but keep their values
    pub active: bool,
}

/// Request body for creating a definition.
///
/// `kind` stays a string here so an unrecognized kind surfaces as
/// `InvalidInput` from the registry rather than as a decode failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DefinitionRequest {
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl DefinitionRequest {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            required: None,
            active: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
}

/// Partial definition update.
///
/// `kind` is accepted only so that a request restating the current kind does
/// not fail; any actual change of kind is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DefinitionPatch {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub required: Option<bool>,
    pub active: Option<bool>,
}

/// A typed value attached to an owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub id: ValueId,
    pub owner_id: OwnerId,
    pub definition_id: DefinitionId,
    /// Canonical encoding; a `data:` URI for image/file kinds
    pub value: String,
    /// Original filename, image/file kinds only
    pub artifact_name: Option<String>,
}

/// Request body for attaching a value, as a transport would deliver it.
///
/// Clients that upload artifacts send the content already encoded as a data
/// URI together with the original filename.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValueRequest {
    pub owner_id: OwnerId,
    pub definition_id: DefinitionId,
    pub value: String,
    #[serde(default)]
    pub artifact_name: Option<String>,
}

impl ValueRequest {
    /// Split into the raw value and, when the value carries encoded content,
    /// the decoded artifact payload.
    pub fn into_parts(self) -> (String, Option<ArtifactPayload>) {
        let payload = decode_data_uri(&self.value).map(|(mime, bytes)| {
            ArtifactPayload::new(self.artifact_name.clone().unwrap_or_default(), bytes)
                .with_mime(mime)
        });
        (self.value, payload)
    }
}

/// Resolve the value shown for an (owner, definition) pair.
///
/// When duplicates exist the earliest-inserted one wins.
pub fn first_match(
    values: &[AttributeValue],
    owner_id: OwnerId,
    definition_id: DefinitionId,
) -> Option<&AttributeValue> {
    values
        .iter()
        .find(|v| v.owner_id == owner_id && v.definition_id == definition_id)
}
