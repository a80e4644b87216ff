//! Attribute definition registry.
//!
//! - `list`: all definitions, or only active ones, in insertion order
//! - `get`: one definition by id
//! - `create`: declare a new field (unique name, recognized kind)
//! - `update`: rename or toggle flags; the kind is fixed at creation
//! - `delete`: remove a definition and every value attached to it
//!
//! Names are stored trimmed of surrounding whitespace, and that trimmed form
//! is the one compared for uniqueness: an exact, case-sensitive match. So
//! `" Nombre"` and `"Nombre"` name the same field, while `"nombre"` does not.
//!
//! Deactivation (`update` with `active = false`) is the soft delete: the
//! definition disappears from catalogs and searches but its values stay.

use crate::attributes::AttributeKind;
use crate::commands::helpers::{require_definition, require_name, transact};
use crate::error::{Result, RosterError};
use crate::model::{AttributeDefinition, DefinitionId, DefinitionPatch, DefinitionRequest};
use crate::store::{DataStore, Records};
use tracing::{debug, info};

/// Outcome of a definition delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedDefinition {
    pub definition: AttributeDefinition,
    /// Values removed by the cascade
    pub removed_values: usize,
}

pub fn list<S: DataStore>(store: &S, active_only: bool) -> Result<Vec<AttributeDefinition>> {
    let records = store.load()?;
    let definitions: Vec<AttributeDefinition> = records
        .definitions
        .into_iter()
        .filter(|d| !active_only || d.active)
        .collect();
    debug!(active_only, count = definitions.len(), "listed definitions");
    Ok(definitions)
}

pub fn get<S: DataStore>(store: &S, id: DefinitionId) -> Result<AttributeDefinition> {
    let records = store.load()?;
    require_definition(&records, id).cloned()
}

/// Names are compared exactly: "Nombre" and "nombre" are different
/// definitions.
fn ensure_name_free(records: &Records, name: &str, except: Option<DefinitionId>) -> Result<()> {
    let taken = records
        .definitions
        .iter()
        .any(|d| d.name == name && Some(d.id) != except);
    if taken {
        return Err(RosterError::Conflict(format!(
            "Attribute '{}' already exists",
            name
        )));
    }
    Ok(())
}

pub fn create<S: DataStore>(
    store: &mut S,
    request: &DefinitionRequest,
) -> Result<AttributeDefinition> {
    let name = require_name(&request.name, "Attribute name")?;
    let kind: AttributeKind = request.kind.trim().parse()?;

    let definition = transact(store, |records| {
        ensure_name_free(records, &name, None)?;
        let definition = AttributeDefinition {
            id: records.next_definition_id(),
            name,
            kind,
            required: request.required.unwrap_or(false),
            active: request.active.unwrap_or(true),
        };
        records.definitions.push(definition.clone());
        Ok(definition)
    })?;

    info!(
        id = definition.id,
        name = %definition.name,
        kind = %definition.kind,
        "created attribute definition"
    );
    Ok(definition)
}

/// Apply a partial update.
///
/// A patch that restates the current kind is accepted; any other kind is
/// rejected, since stored values were validated against the original one.
pub fn update<S: DataStore>(
    store: &mut S,
    id: DefinitionId,
    patch: &DefinitionPatch,
) -> Result<AttributeDefinition> {
    let name = patch
        .name
        .as_deref()
        .map(|n| require_name(n, "Attribute name"))
        .transpose()?;
    let kind = patch
        .kind
        .as_deref()
        .map(|k| k.trim().parse::<AttributeKind>())
        .transpose()?;

    let definition = transact(store, |records| {
        let current = require_definition(records, id)?;
        if let Some(kind) = kind {
            if kind != current.kind {
                return Err(RosterError::InvalidInput(format!(
                    "Cannot change kind of '{}' from {} to {}",
                    current.name, current.kind, kind
                )));
            }
        }
        if let Some(name) = &name {
            ensure_name_free(records, name, Some(id))?;
        }

        let definition = records
            .definition_mut(id)
            .ok_or_else(|| RosterError::definition_not_found(id))?;
        if let Some(name) = name {
            definition.name = name;
        }
        if let Some(required) = patch.required {
            definition.required = required;
        }
        if let Some(active) = patch.active {
            definition.active = active;
        }
        Ok(definition.clone())
    })?;

    info!(
        id,
        name = %definition.name,
        active = definition.active,
        required = definition.required,
        "updated attribute definition"
    );
    Ok(definition)
}

/// Delete a definition together with all of its values, in one write.
pub fn delete<S: DataStore>(store: &mut S, id: DefinitionId) -> Result<DeletedDefinition> {
    let deleted = transact(store, |records| {
        let position = records
            .definitions
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| RosterError::definition_not_found(id))?;
        let definition = records.definitions.remove(position);
        let removed_values = records.remove_values_where(|v| v.definition_id == id);
        Ok(DeletedDefinition {
            definition,
            removed_values,
        })
    })?;

    info!(
        id,
        name = %deleted.definition.name,
        removed_values = deleted.removed_values,
        "deleted attribute definition"
    );
    Ok(deleted)
}
