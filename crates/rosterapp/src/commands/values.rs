//! Attribute value store.
//!
//! Every create and update runs the raw input through the definition's kind
//! validator inside the write cycle, so either the canonical value is stored
//! or nothing changes.
//!
//! The (owner, definition) pair is not unique by default. With
//! [`DuplicatePolicy::Upsert`] a create on an existing pair rewrites the first
//! match instead of appending.

use crate::attributes::ArtifactPayload;
use crate::commands::helpers::{require_definition, require_owner, transact};
use crate::error::{Result, RosterError};
use crate::model::{
    first_match, AttributeDefinition, AttributeValue, DefinitionId, OwnerId, ValueId,
    ValueRequest,
};
use crate::store::DataStore;
use tracing::{debug, info};

/// What `create` does when the (owner, definition) pair already has a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Store another value; lookups keep resolving to the earliest one
    #[default]
    Append,
    /// Overwrite the earliest existing value in place
    Upsert,
}

impl DuplicatePolicy {
    pub fn from_config(enforce_single_value: bool) -> Self {
        if enforce_single_value {
            DuplicatePolicy::Upsert
        } else {
            DuplicatePolicy::Append
        }
    }
}

pub fn list_by_owner<S: DataStore>(store: &S, owner_id: OwnerId) -> Result<Vec<AttributeValue>> {
    let records = store.load()?;
    let values: Vec<AttributeValue> = records
        .values
        .into_iter()
        .filter(|v| v.owner_id == owner_id)
        .collect();
    debug!(owner_id, count = values.len(), "listed owner values");
    Ok(values)
}

pub fn list_all<S: DataStore>(store: &S) -> Result<Vec<AttributeValue>> {
    Ok(store.load()?.values)
}

pub fn get<S: DataStore>(store: &S, id: ValueId) -> Result<AttributeValue> {
    let records = store.load()?;
    records
        .value(id)
        .cloned()
        .ok_or_else(|| RosterError::value_not_found(id))
}

/// Validate and attach a value to an owner.
///
/// Both the owner and the definition must exist. Inactive definitions still
/// accept values.
pub fn create<S: DataStore>(
    store: &mut S,
    owner_id: OwnerId,
    definition_id: DefinitionId,
    raw: &str,
    artifact: Option<ArtifactPayload>,
    policy: DuplicatePolicy,
) -> Result<AttributeValue> {
    let value = transact(store, |records| {
        require_owner(records, owner_id)?;
        let kind = require_definition(records, definition_id)?.kind;
        let canonical = kind.validate(raw, artifact.as_ref())?;

        if policy == DuplicatePolicy::Upsert {
            let existing = first_match(&records.values, owner_id, definition_id).map(|v| v.id);
            if let Some(id) = existing {
                let value = records
                    .value_mut(id)
                    .ok_or_else(|| RosterError::value_not_found(id))?;
                value.value = canonical.value;
                value.artifact_name = canonical.artifact_name;
                return Ok(value.clone());
            }
        }

        let value = AttributeValue {
            id: records.next_value_id(),
            owner_id,
            definition_id,
            value: canonical.value,
            artifact_name: canonical.artifact_name,
        };
        records.values.push(value.clone());
        Ok(value)
    })?;

    info!(
        id = value.id,
        owner_id,
        definition_id,
        "stored attribute value"
    );
    Ok(value)
}

/// Create from a transport-shaped request, decoding an inline data URI into
/// an artifact payload first.
pub fn create_from_request<S: DataStore>(
    store: &mut S,
    request: ValueRequest,
    policy: DuplicatePolicy,
) -> Result<AttributeValue> {
    let owner_id = request.owner_id;
    let definition_id = request.definition_id;
    let (raw, artifact) = request.into_parts();
    create(store, owner_id, definition_id, &raw, artifact, policy)
}

/// Replace a value, re-running validation against its definition's kind.
///
/// A missing `raw` keeps the stored value as the input; a missing `artifact`
/// on an image or file value keeps the stored content. With neither, the
/// value is returned unchanged.
pub fn update<S: DataStore>(
    store: &mut S,
    id: ValueId,
    raw: Option<&str>,
    artifact: Option<ArtifactPayload>,
) -> Result<AttributeValue> {
    if raw.is_none() && artifact.is_none() {
        return get(store, id);
    }

    let value = transact(store, |records| {
        let current = records
            .value(id)
            .ok_or_else(|| RosterError::value_not_found(id))?;
        let kind = require_definition(records, current.definition_id)?.kind;

        if kind.is_artifact() && artifact.is_none() {
            // Nothing new to encode; only the display name may change
            let name = raw.map(str::trim).filter(|n| !n.is_empty());
            let value = records
                .value_mut(id)
                .ok_or_else(|| RosterError::value_not_found(id))?;
            if let Some(name) = name {
                value.artifact_name = Some(name.to_string());
            }
            return Ok(value.clone());
        }

        let input = raw.unwrap_or(current.value.as_str()).to_string();
        let canonical = kind.validate(&input, artifact.as_ref())?;
        let value = records
            .value_mut(id)
            .ok_or_else(|| RosterError::value_not_found(id))?;
        value.value = canonical.value;
        value.artifact_name = canonical.artifact_name;
        Ok(value.clone())
    })?;

    info!(id, "updated attribute value");
    Ok(value)
}

pub fn delete<S: DataStore>(store: &mut S, id: ValueId) -> Result<AttributeValue> {
    let value = transact(store, |records| {
        let position = records
            .values
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| RosterError::value_not_found(id))?;
        Ok(records.values.remove(position))
    })?;
    info!(id, "deleted attribute value");
    Ok(value)
}

/// Remove every value of one owner, returning how many were removed.
pub fn delete_by_owner<S: DataStore>(store: &mut S, owner_id: OwnerId) -> Result<usize> {
    let removed = transact(store, |records| {
        Ok(records.remove_values_where(|v| v.owner_id == owner_id))
    })?;
    info!(owner_id, removed, "deleted owner values");
    Ok(removed)
}

/// Active, required definitions the owner has no value for.
///
/// Advisory only: nothing prevents storing an owner with gaps.
pub fn missing_required<S: DataStore>(
    store: &S,
    owner_id: OwnerId,
) -> Result<Vec<AttributeDefinition>> {
    let records = store.load()?;
    require_owner(&records, owner_id)?;
    Ok(records
        .definitions
        .iter()
        .filter(|d| d.active && d.required)
        .filter(|d| first_match(&records.values, owner_id, d.id).is_none())
        .cloned()
        .collect())
}
