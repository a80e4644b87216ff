//! Owner (person) registry.
//!
//! Owners carry the fixed fields. Email and birth date follow the email and
//! date attribute rules. Email and document number are unique when present;
//! blank optional fields are stored as absent. Deleting an owner removes all
//! of its attribute values in the same write.

use chrono::Utc;
use tracing::{debug, info};

use crate::attributes::AttributeKind;
use crate::commands::helpers::{normalize_optional, require_name, require_owner, transact};
use crate::error::{Result, RosterError};
use crate::model::{NewOwner, Owner, OwnerId, OwnerPatch};
use crate::store::{DataStore, Records};

/// Outcome of an owner delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedOwner {
    pub owner: Owner,
    /// Values removed by the cascade
    pub removed_values: usize,
}

pub fn list<S: DataStore>(store: &S) -> Result<Vec<Owner>> {
    let owners = store.load()?.owners;
    debug!(count = owners.len(), "listed owners");
    Ok(owners)
}

pub fn get<S: DataStore>(store: &S, id: OwnerId) -> Result<Owner> {
    let records = store.load()?;
    require_owner(&records, id).cloned()
}

/// Typed fixed fields must pass the same rule as an attribute of that kind.
fn check_kind(kind: AttributeKind, value: &Option<String>) -> Result<()> {
    if let Some(value) = value {
        kind.validate(value, None)?;
    }
    Ok(())
}

fn ensure_unique(records: &Records, candidate: &Owner) -> Result<()> {
    for other in records.owners.iter().filter(|o| o.id != candidate.id) {
        if candidate.email.is_some() && other.email == candidate.email {
            return Err(RosterError::Conflict(format!(
                "Email '{}' is already registered",
                candidate.email.as_deref().unwrap_or_default()
            )));
        }
        if candidate.document_number.is_some() && other.document_number == candidate.document_number
        {
            return Err(RosterError::Conflict(format!(
                "Document number '{}' is already registered",
                candidate.document_number.as_deref().unwrap_or_default()
            )));
        }
    }
    Ok(())
}

pub fn create<S: DataStore>(store: &mut S, new_owner: NewOwner) -> Result<Owner> {
    let full_name = require_name(&new_owner.full_name, "Full name")?;
    let email = normalize_optional(new_owner.email);
    check_kind(AttributeKind::Email, &email)?;
    let date_of_birth = normalize_optional(new_owner.date_of_birth);
    check_kind(AttributeKind::Date, &date_of_birth)?;

    let owner = transact(store, |records| {
        let owner = Owner {
            id: records.next_owner_id(),
            full_name,
            email,
            phone: normalize_optional(new_owner.phone),
            address: normalize_optional(new_owner.address),
            date_of_birth,
            gender: normalize_optional(new_owner.gender),
            document_type: normalize_optional(new_owner.document_type),
            document_number: normalize_optional(new_owner.document_number),
            is_active: new_owner.is_active.unwrap_or(true),
            registration_date: Utc::now(),
            notes: normalize_optional(new_owner.notes),
        };
        ensure_unique(records, &owner)?;
        records.owners.push(owner.clone());
        Ok(owner)
    })?;

    info!(id = owner.id, name = %owner.full_name, "created owner");
    Ok(owner)
}

/// Apply a partial update. `Some("")` clears an optional field; the full
/// name cannot be cleared.
pub fn update<S: DataStore>(store: &mut S, id: OwnerId, patch: OwnerPatch) -> Result<Owner> {
    let full_name = patch
        .full_name
        .as_deref()
        .map(|n| require_name(n, "Full name"))
        .transpose()?;
    let email = patch.email.map(|e| normalize_optional(Some(e)));
    if let Some(email) = &email {
        check_kind(AttributeKind::Email, email)?;
    }
    let date_of_birth = patch.date_of_birth.map(|d| normalize_optional(Some(d)));
    if let Some(date_of_birth) = &date_of_birth {
        check_kind(AttributeKind::Date, date_of_birth)?;
    }

    let owner = transact(store, |records| {
        let mut owner = require_owner(records, id)?.clone();

        fn apply(slot: &mut Option<String>, change: Option<String>) {
            if let Some(change) = change {
                *slot = normalize_optional(Some(change));
            }
        }

        if let Some(full_name) = full_name {
            owner.full_name = full_name;
        }
        if let Some(email) = email {
            owner.email = email;
        }
        apply(&mut owner.phone, patch.phone);
        apply(&mut owner.address, patch.address);
        if let Some(date_of_birth) = date_of_birth {
            owner.date_of_birth = date_of_birth;
        }
        apply(&mut owner.gender, patch.gender);
        apply(&mut owner.document_type, patch.document_type);
        apply(&mut owner.document_number, patch.document_number);
        apply(&mut owner.notes, patch.notes);
        if let Some(is_active) = patch.is_active {
            owner.is_active = is_active;
        }

        ensure_unique(records, &owner)?;
        let slot = records
            .owner_mut(id)
            .ok_or_else(|| RosterError::owner_not_found(id))?;
        *slot = owner.clone();
        Ok(owner)
    })?;

    info!(id, "updated owner");
    Ok(owner)
}

/// Delete an owner and all of its values, in one write.
pub fn delete<S: DataStore>(store: &mut S, id: OwnerId) -> Result<DeletedOwner> {
    let deleted = transact(store, |records| {
        let position = records
            .owners
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| RosterError::owner_not_found(id))?;
        let owner = records.owners.remove(position);
        let removed_values = records.remove_values_where(|v| v.owner_id == id);
        Ok(DeletedOwner {
            owner,
            removed_values,
        })
    })?;

    info!(
        id,
        removed_values = deleted.removed_values,
        "deleted owner"
    );
    Ok(deleted)
}
