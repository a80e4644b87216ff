//! Owner filtering over heterogeneous typed fields.
//!
//! The caller picks a field and supplies a [`SearchInput`]; the operator is
//! derived from the field's kind via [`Predicate::for_kind`]. Fixed and dynamic
//! fields go through the same predicate once resolved to a
//! [`FieldSubject`](crate::fields::FieldSubject).

use chrono::NaiveDate;
use tracing::debug;

use super::spec::{AttributeKind, SearchMode};
use crate::fields::{find_field, FieldDescriptor, FieldSubject};
use crate::model::{AttributeValue, Owner};

const ACTIVE_LABEL: &str = "active";
const INACTIVE_LABEL: &str = "inactive";

/// Operator-specific search inputs. Which of them are consulted depends on the
/// selected field's kind; the rest are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchInput {
    /// Substring for text-like, artifact-name and status searches
    pub text: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl SearchInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn number_range(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min,
            max,
            ..Default::default()
        }
    }

    pub fn date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start,
            end,
            ..Default::default()
        }
    }
}

/// A search condition bound to one field kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Lowercased needle matched against the value
    Contains(String),
    /// Lowercased needle matched against the artifact filename
    ArtifactName(String),
    NumberRange { min: Option<f64>, max: Option<f64> },
    DateRange {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    /// Lowercased needle matched against `active` / `inactive`
    StatusLabel(String),
}

impl Predicate {
    pub fn for_kind(kind: AttributeKind, input: &SearchInput) -> Self {
        let needle = || input.text.to_lowercase();
        match kind.search_mode() {
            SearchMode::Contains => Predicate::Contains(needle()),
            SearchMode::ArtifactName => Predicate::ArtifactName(needle()),
            SearchMode::NumberRange => Predicate::NumberRange {
                min: input.min,
                max: input.max,
            },
            SearchMode::DateRange => Predicate::DateRange {
                start: input.start,
                end: input.end,
            },
            SearchMode::StatusLabel => Predicate::StatusLabel(needle()),
        }
    }

    /// Evaluate against one resolved field; `None` means the owner has no
    /// value for it. `dynamic` tells whether the field is a definition-backed
    /// attribute rather than a fixed owner column.
    pub fn matches(&self, subject: Option<&FieldSubject<'_>>, dynamic: bool) -> bool {
        let Some(subject) = subject else {
            return absent_value_passes(self, dynamic);
        };

        match self {
            Predicate::Contains(needle) => subject.value.to_lowercase().contains(needle.as_str()),
            Predicate::ArtifactName(needle) => subject
                .artifact_name
                .unwrap_or_default()
                .to_lowercase()
                .contains(needle.as_str()),
            Predicate::NumberRange { min, max } => {
                in_range(subject.value.trim().parse::<f64>().ok(), *min, *max)
            }
            Predicate::DateRange { start, end } => {
                if subject.value.trim().is_empty() {
                    return absent_value_passes(self, dynamic);
                }
                in_range(
                    NaiveDate::parse_from_str(subject.value.trim(), "%Y-%m-%d").ok(),
                    *start,
                    *end,
                )
            }
            Predicate::StatusLabel(needle) => {
                if needle.is_empty() {
                    return true;
                }
                status_label(&subject.value).contains(needle.as_str())
            }
        }
    }
}

/// The visible label of a canonical boolean. Status searches match against
/// this label, not the stored value.
pub fn status_label(value: &str) -> &'static str {
    if value == "true" {
        ACTIVE_LABEL
    } else {
        INACTIVE_LABEL
    }
}

/// Whether an owner with no value for the searched field is kept.
///
/// Date and status searches keep such owners; text and artifact-name searches
/// drop them. Number searches drop them for dynamic fields, while a fixed
/// column only drops them once a bound is set. This asymmetry is long-standing
/// observed behavior and lives here alone so it can be changed in one place.
pub fn absent_value_passes(predicate: &Predicate, dynamic: bool) -> bool {
    match predicate {
        Predicate::DateRange { .. } | Predicate::StatusLabel(_) => true,
        Predicate::Contains(_) | Predicate::ArtifactName(_) => false,
        Predicate::NumberRange { min, max } => !dynamic && min.is_none() && max.is_none(),
    }
}

/// Inclusive range check with optional bounds.
///
/// A value that failed to parse only passes when no bound is set.
fn in_range<T: PartialOrd>(value: Option<T>, low: Option<T>, high: Option<T>) -> bool {
    match value {
        Some(v) => {
            low.as_ref().map_or(true, |lo| &v >= lo) && high.as_ref().map_or(true, |hi| &v <= hi)
        }
        None => low.is_none() && high.is_none(),
    }
}

/// Keep the owners that satisfy the search on `field_key`.
///
/// An unknown field key filters nothing out. Order of `owners` is preserved.
pub fn filter_owners<'a>(
    fields: &[FieldDescriptor],
    field_key: &str,
    input: &SearchInput,
    owners: &'a [Owner],
    values: &[AttributeValue],
) -> Vec<&'a Owner> {
    let Some(field) = find_field(fields, field_key) else {
        debug!(field_key, "unknown search field, no filtering applied");
        return owners.iter().collect();
    };

    let predicate = Predicate::for_kind(field.kind, input);
    let kept: Vec<&Owner> = owners
        .iter()
        .filter(|owner| {
            predicate.matches(field.subject(owner, values).as_ref(), field.is_dynamic())
        })
        .collect();

    debug!(
        field_key,
        total = owners.len(),
        kept = kept.len(),
        "filtered owners"
    );
    kept
}
