//! # Field Catalog
//!
//! A [`FieldDescriptor`] is a uniform view over the two kinds of columns an
//! owner grid can show:
//!
//! - **Fixed** fields, hand-enumerated in [`FixedField`] and read straight off
//!   the [`Owner`] record.
//! - **Dynamic** fields, one per *active* [`AttributeDefinition`], read through
//!   the attribute value store.
//!
//! The catalog is a projection, not state: [`catalog`] rebuilds it from the
//! current definitions on every call and nothing caches it, so a definition
//! change is visible on the very next filter or render.

use std::borrow::Cow;

use crate::attributes::AttributeKind;
use crate::model::{first_match, AttributeDefinition, AttributeValue, DefinitionId, Owner};

const DYNAMIC_PREFIX: &str = "dynamic_";

/// The fixed owner fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedField {
    FullName,
    Email,
    Phone,
    Address,
    DateOfBirth,
    Gender,
    DocumentType,
    DocumentNumber,
    IsActive,
}

impl FixedField {
    pub const ALL: [FixedField; 9] = [
        FixedField::FullName,
        FixedField::Email,
        FixedField::Phone,
        FixedField::Address,
        FixedField::DateOfBirth,
        FixedField::Gender,
        FixedField::DocumentType,
        FixedField::DocumentNumber,
        FixedField::IsActive,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FixedField::FullName => "full_name",
            FixedField::Email => "email",
            FixedField::Phone => "phone",
            FixedField::Address => "address",
            FixedField::DateOfBirth => "date_of_birth",
            FixedField::Gender => "gender",
            FixedField::DocumentType => "document_type",
            FixedField::DocumentNumber => "document_number",
            FixedField::IsActive => "is_active",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FixedField::FullName => "Name",
            FixedField::Email => "Email",
            FixedField::Phone => "Phone",
            FixedField::Address => "Address",
            FixedField::DateOfBirth => "Date of birth",
            FixedField::Gender => "Gender",
            FixedField::DocumentType => "Document type",
            FixedField::DocumentNumber => "Document number",
            FixedField::IsActive => "Status",
        }
    }

    /// The kind that drives search and formatting for this field.
    ///
    /// Phone and document numbers search as numeric ranges.
    pub fn kind(self) -> AttributeKind {
        match self {
            FixedField::FullName
            | FixedField::Address
            | FixedField::Gender
            | FixedField::DocumentType => AttributeKind::Text,
            FixedField::Email => AttributeKind::Email,
            FixedField::Phone | FixedField::DocumentNumber => AttributeKind::Number,
            FixedField::DateOfBirth => AttributeKind::Date,
            FixedField::IsActive => AttributeKind::Boolean,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Read the field off an owner. `None` means the field has no value.
    pub fn read(self, owner: &Owner) -> Option<Cow<'_, str>> {
        fn borrowed(v: &Option<String>) -> Option<Cow<'_, str>> {
            v.as_deref().map(Cow::Borrowed)
        }

        match self {
            FixedField::FullName => Some(Cow::Borrowed(owner.full_name.as_str())),
            FixedField::Email => borrowed(&owner.email),
            FixedField::Phone => borrowed(&owner.phone),
            FixedField::Address => borrowed(&owner.address),
            FixedField::DateOfBirth => borrowed(&owner.date_of_birth),
            FixedField::Gender => borrowed(&owner.gender),
            FixedField::DocumentType => borrowed(&owner.document_type),
            FixedField::DocumentNumber => borrowed(&owner.document_number),
            FixedField::IsActive => Some(Cow::Borrowed(if owner.is_active {
                "true"
            } else {
                "false"
            })),
        }
    }
}

/// Where a field's values come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    Fixed(FixedField),
    Dynamic(DefinitionId),
}

/// A selectable, searchable, renderable column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub key: String,
    pub label: String,
    pub kind: AttributeKind,
    pub source: FieldSource,
}

/// What a predicate or a cell renderer sees for one (owner, field).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSubject<'a> {
    pub value: Cow<'a, str>,
    pub artifact_name: Option<&'a str>,
}

impl FieldDescriptor {
    pub fn fixed(field: FixedField) -> Self {
        Self {
            key: field.key().to_string(),
            label: field.label().to_string(),
            kind: field.kind(),
            source: FieldSource::Fixed(field),
        }
    }

    pub fn dynamic(definition: &AttributeDefinition) -> Self {
        Self {
            key: dynamic_key(definition.id),
            label: definition.name.clone(),
            kind: definition.kind,
            source: FieldSource::Dynamic(definition.id),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self.source, FieldSource::Dynamic(_))
    }

    pub fn definition_id(&self) -> Option<DefinitionId> {
        match self.source {
            FieldSource::Dynamic(id) => Some(id),
            FieldSource::Fixed(_) => None,
        }
    }

    /// Resolve this field for one owner.
    ///
    /// Dynamic fields go through the first-match rule; `None` means the owner
    /// has no value for the field.
    pub fn subject<'a>(
        &self,
        owner: &'a Owner,
        values: &'a [AttributeValue],
    ) -> Option<FieldSubject<'a>> {
        match self.source {
            FieldSource::Fixed(field) => field.read(owner).map(|value| FieldSubject {
                value,
                artifact_name: None,
            }),
            FieldSource::Dynamic(definition_id) => {
                first_match(values, owner.id, definition_id).map(|v| FieldSubject {
                    value: Cow::Borrowed(v.value.as_str()),
                    artifact_name: v.artifact_name.as_deref(),
                })
            }
        }
    }
}

pub fn dynamic_key(definition_id: DefinitionId) -> String {
    format!("{}{}", DYNAMIC_PREFIX, definition_id)
}

/// Fixed fields only, in display order.
pub fn fixed_fields() -> Vec<FieldDescriptor> {
    FixedField::ALL.into_iter().map(FieldDescriptor::fixed).collect()
}

/// Build the merged catalog: fixed fields first, then one field per active
/// definition in insertion order.
pub fn catalog(definitions: &[AttributeDefinition]) -> Vec<FieldDescriptor> {
    let mut fields = fixed_fields();
    fields.extend(
        definitions
            .iter()
            .filter(|d| d.active)
            .map(FieldDescriptor::dynamic),
    );
    fields
}

pub fn find_field<'a>(fields: &'a [FieldDescriptor], key: &str) -> Option<&'a FieldDescriptor> {
    fields.iter().find(|f| f.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn definition(id: DefinitionId, name: &str, kind: AttributeKind, active: bool) -> AttributeDefinition {
        AttributeDefinition {
            id,
            name: name.to_string(),
            kind,
            required: false,
            active,
        }
    }

    fn owner() -> Owner {
        Owner {
            id: 1,
            full_name: "Ana Pérez".into(),
            email: Some("ana@example.com".into()),
            phone: None,
            address: None,
            date_of_birth: Some("1990-05-01".into()),
            gender: None,
            document_type: None,
            document_number: None,
            is_active: false,
            registration_date: Utc::now(),
            notes: None,
        }
    }

    #[test]
    fn catalog_lists_fixed_then_active_dynamic() {
        let defs = vec![
            definition(3, "Blood type", AttributeKind::Text, true),
            definition(4, "Retired", AttributeKind::Boolean, false),
            definition(5, "Photo", AttributeKind::Image, true),
        ];
        let keys: Vec<_> = catalog(&defs).into_iter().map(|f| f.key).collect();

        assert_eq!(keys.len(), FixedField::ALL.len() + 2);
        assert_eq!(keys[0], "full_name");
        assert_eq!(keys[FixedField::ALL.len()], "dynamic_3");
        assert_eq!(keys[FixedField::ALL.len() + 1], "dynamic_5");
        assert!(!keys.contains(&"dynamic_4".to_string()));
    }

    #[test]
    fn dynamic_descriptor_carries_definition_metadata() {
        let field = FieldDescriptor::dynamic(&definition(7, "Website", AttributeKind::Url, true));
        assert_eq!(field.key, "dynamic_7");
        assert_eq!(field.label, "Website");
        assert_eq!(field.kind, AttributeKind::Url);
        assert!(field.is_dynamic());
        assert_eq!(field.definition_id(), Some(7));
    }

    #[test]
    fn fixed_keys_round_trip() {
        for field in FixedField::ALL {
            assert_eq!(FixedField::from_key(field.key()), Some(field));
        }
        assert_eq!(FixedField::from_key("dynamic_1"), None);
    }

    #[test]
    fn fixed_subject_reads_owner_fields() {
        let owner = owner();
        let name = FieldDescriptor::fixed(FixedField::FullName);
        let phone = FieldDescriptor::fixed(FixedField::Phone);
        let status = FieldDescriptor::fixed(FixedField::IsActive);

        assert_eq!(name.subject(&owner, &[]).unwrap().value, "Ana Pérez");
        assert!(phone.subject(&owner, &[]).is_none());
        assert_eq!(status.subject(&owner, &[]).unwrap().value, "false");
    }

    #[test]
    fn dynamic_subject_uses_first_match() {
        let owner = owner();
        let values = vec![
            AttributeValue {
                id: 1,
                owner_id: 1,
                definition_id: 5,
                value: "data:image/png;base64,AA==".into(),
                artifact_name: Some("a.png".into()),
            },
            AttributeValue {
                id: 2,
                owner_id: 1,
                definition_id: 5,
                value: "data:image/png;base64,AQ==".into(),
                artifact_name: Some("b.png".into()),
            },
        ];
        let field = FieldDescriptor::dynamic(&definition(5, "Photo", AttributeKind::Image, true));
        let subject = field.subject(&owner, &values).unwrap();
        assert_eq!(subject.artifact_name, Some("a.png"));
    }
}
