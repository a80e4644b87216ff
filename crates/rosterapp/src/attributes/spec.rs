//! Attribute kinds and their static specification table.
//!
//! This module is the single source of truth for which value kinds exist and
//! which search operator each one implies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validate::{validate, ValidationError};
use super::value::{looks_like_data_uri, ArtifactPayload, CanonicalValue, DisplayValue};
use crate::error::RosterError;

/// The kind of value an attribute definition holds.
///
/// Kinds are fixed at definition creation; existing values are never migrated
/// to a different kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Text,
    Number,
    Date,
    Email,
    Url,
    Boolean,
    /// Uploaded image, stored inline as a data URI
    Image,
    /// Uploaded file of any type, stored inline as a data URI
    File,
}

/// How a field of a given kind is searched.
///
/// The operator is derived from the kind, never chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Case-insensitive substring match against the stored value.
    Contains,
    /// Case-insensitive substring match against the artifact's filename.
    ArtifactName,
    /// Inclusive numeric range, each bound optional.
    NumberRange,
    /// Inclusive calendar-date range, each bound optional.
    DateRange,
    /// Substring match against the visible `active` / `inactive` label.
    StatusLabel,
}

/// Specification for a single attribute kind.
#[derive(Debug, Clone)]
pub struct KindSpec {
    pub kind: AttributeKind,

    /// Wire name used in requests and persisted records (e.g. "text")
    pub name: &'static str,

    /// Search operator implied by this kind
    pub search: SearchMode,

    /// Whether values carry a binary payload encoded as a data URI
    pub artifact: bool,
}

impl KindSpec {
    const fn new(kind: AttributeKind, name: &'static str, search: SearchMode) -> Self {
        Self {
            kind,
            name,
            search,
            artifact: false,
        }
    }

    const fn artifact(mut self) -> Self {
        self.artifact = true;
        self
    }
}

/// Registry of all recognized kinds, in declaration order.
///
/// Indexed by `AttributeKind as usize`, see [`AttributeKind::spec`].
pub const KINDS: &[KindSpec] = &[
    KindSpec::new(AttributeKind::Text, "text", SearchMode::Contains),
    KindSpec::new(AttributeKind::Number, "number", SearchMode::NumberRange),
    KindSpec::new(AttributeKind::Date, "date", SearchMode::DateRange),
    KindSpec::new(AttributeKind::Email, "email", SearchMode::Contains),
    KindSpec::new(AttributeKind::Url, "url", SearchMode::Contains),
    KindSpec::new(AttributeKind::Boolean, "boolean", SearchMode::StatusLabel),
    KindSpec::new(AttributeKind::Image, "image", SearchMode::ArtifactName).artifact(),
    KindSpec::new(AttributeKind::File, "file", SearchMode::ArtifactName).artifact(),
];

/// All recognized kind names, in declaration order.
pub fn kind_names() -> impl Iterator<Item = &'static str> {
    KINDS.iter().map(|spec| spec.name)
}

impl AttributeKind {
    pub fn spec(self) -> &'static KindSpec {
        &KINDS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn search_mode(self) -> SearchMode {
        self.spec().search
    }

    pub fn is_artifact(self) -> bool {
        self.spec().artifact
    }

    /// Validate a raw value for this kind and produce its canonical form.
    pub fn validate(
        self,
        raw: &str,
        artifact: Option<&ArtifactPayload>,
    ) -> Result<CanonicalValue, ValidationError> {
        validate(self, raw, artifact)
    }

    /// Format a stored value for display in a grid cell.
    ///
    /// Artifact kinds show the captured filename, falling back to a generic
    /// label when the value still looks like encoded content.
    pub fn format_value(self, value: &str, artifact_name: Option<&str>) -> DisplayValue {
        match self {
            AttributeKind::Image | AttributeKind::File => {
                match artifact_name.map(str::trim).filter(|name| !name.is_empty()) {
                    Some(name) => DisplayValue::Text(name.to_string()),
                    None if looks_like_data_uri(value) => DisplayValue::UnnamedArtifact,
                    None => DisplayValue::Placeholder,
                }
            }
            AttributeKind::Text
            | AttributeKind::Number
            | AttributeKind::Date
            | AttributeKind::Email
            | AttributeKind::Url
            | AttributeKind::Boolean => DisplayValue::text_or_placeholder(value),
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AttributeKind {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KINDS
            .iter()
            .find(|spec| spec.name == s)
            .map(|spec| spec.kind)
            .ok_or_else(|| {
                RosterError::InvalidInput(format!(
                    "Unrecognized attribute kind '{}' (expected one of: {})",
                    s,
                    kind_names().collect::<Vec<_>>().join(", ")
                ))
            })
    }
}
