//! # Column Composition
//!
//! [`ColumnComposer`] turns the field catalog into grid columns and cells.
//! It is built from the current definitions on every render, so the set of
//! dynamic columns always matches the registry.
//!
//! [`ColumnPreference`] is the viewer's chosen set of column keys. It lives in
//! a [`PreferenceStore`] outside the record snapshot and is reconciled against
//! the catalog on each render: keys for fields that no longer exist (deleted
//! or deactivated definitions) are dropped quietly.
//!
//! Visible columns always come out in catalog order, fixed fields first and
//! then dynamic ones, whatever order the preference lists them in.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::attributes::{status_label, DisplayValue};
use crate::config::RosterConfig;
use crate::error::Result;
use crate::fields::{catalog, FieldDescriptor, FieldSource, FixedField};
use crate::model::{AttributeDefinition, AttributeValue, Owner};
use crate::store::prefs::PreferenceStore;

/// Ordered set of field keys the viewer wants to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnPreference {
    keys: Vec<String>,
}

impl Default for ColumnPreference {
    /// Every fixed field.
    fn default() -> Self {
        Self {
            keys: FixedField::ALL.iter().map(|f| f.key().to_string()).collect(),
        }
    }
}

impl ColumnPreference {
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let mut preference = Self { keys: Vec::new() };
        for key in keys {
            let key = key.into();
            if !preference.contains(&key) {
                preference.keys.push(key);
            }
        }
        preference
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Show the column if hidden, hide it if shown. Returns whether the
    /// column is visible afterwards.
    pub fn toggle(&mut self, key: &str) -> bool {
        if let Some(position) = self.keys.iter().position(|k| k == key) {
            self.keys.remove(position);
            false
        } else {
            self.keys.push(key.to_string());
            true
        }
    }

    /// Drop keys that are not in `fields`, returning how many were dropped.
    pub fn retain_known(&mut self, fields: &[FieldDescriptor]) -> usize {
        let before = self.keys.len();
        self.keys.retain(|k| fields.iter().any(|f| &f.key == k));
        let dropped = before - self.keys.len();
        if dropped > 0 {
            warn!(dropped, "dropped column preference keys for unknown fields");
        }
        dropped
    }

    /// Read the stored preference under `key`.
    ///
    /// Nothing stored, an unreadable store and an unparseable payload all
    /// fall back to the default; the preference is never authoritative
    /// enough to fail a render.
    pub fn load<P: PreferenceStore>(prefs: &P, key: &str) -> Self {
        let raw = match prefs.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!(key, error = %e, "could not read column preference");
                return Self::default();
            }
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(keys) => Self::new(keys),
            Err(e) => {
                warn!(key, error = %e, "ignoring unparseable column preference");
                Self::default()
            }
        }
    }

    pub fn save<P: PreferenceStore>(&self, prefs: &mut P, key: &str) -> Result<()> {
        let raw = serde_json::to_string(&self.keys)?;
        prefs.set(key, &raw)?;
        debug!(key, count = self.keys.len(), "saved column preference");
        Ok(())
    }
}

/// Merges fixed and active dynamic fields into renderable columns.
#[derive(Debug, Clone)]
pub struct ColumnComposer {
    fields: Vec<FieldDescriptor>,
    placeholder: String,
    unnamed_artifact: String,
}

impl ColumnComposer {
    pub fn new(definitions: &[AttributeDefinition]) -> Self {
        Self {
            fields: catalog(definitions),
            placeholder: DisplayValue::DEFAULT_PLACEHOLDER.to_string(),
            unnamed_artifact: DisplayValue::DEFAULT_UNNAMED_ARTIFACT.to_string(),
        }
    }

    /// Use the configured labels for empty and unnamed-upload cells.
    pub fn with_config(mut self, config: &RosterConfig) -> Self {
        self.placeholder = config.placeholder.clone();
        self.unnamed_artifact = config.unnamed_artifact_label.clone();
        self
    }

    pub fn available_fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// The preferred fields that still exist, in catalog order.
    pub fn visible_fields(&self, preference: &ColumnPreference) -> Vec<&FieldDescriptor> {
        self.fields
            .iter()
            .filter(|f| preference.contains(&f.key))
            .collect()
    }

    /// The display value of one cell.
    ///
    /// Dynamic fields resolve through the first-match rule. The fixed status
    /// field shows the same label status searches match against.
    pub fn render_cell(
        &self,
        owner: &Owner,
        field: &FieldDescriptor,
        values: &[AttributeValue],
    ) -> DisplayValue {
        let Some(subject) = field.subject(owner, values) else {
            return DisplayValue::Placeholder;
        };
        if field.source == FieldSource::Fixed(FixedField::IsActive) {
            return DisplayValue::Text(status_label(&subject.value).to_string());
        }
        field.kind.format_value(&subject.value, subject.artifact_name)
    }

    /// Render a cell value to text using the composer's labels.
    pub fn cell_text(&self, value: &DisplayValue) -> String {
        value.render(&self.placeholder, &self.unnamed_artifact)
    }

    /// One owner's cells for `fields`, as text.
    pub fn render_row(
        &self,
        owner: &Owner,
        fields: &[&FieldDescriptor],
        values: &[AttributeValue],
    ) -> Vec<String> {
        fields
            .iter()
            .map(|field| self.cell_text(&self.render_cell(owner, field, values)))
            .collect()
    }
}
