use crate::error::{Result, RosterError};
use crate::model::{AttributeDefinition, DefinitionId, Owner, OwnerId};
use crate::store::{DataStore, Records};

/// Run `mutate` against a fresh snapshot and commit it in one write.
///
/// If `mutate` fails nothing is written, so validation, lookups and
/// uniqueness checks done inside it never leave partial state behind.
pub fn transact<S, T, F>(store: &mut S, mutate: F) -> Result<T>
where
    S: DataStore,
    F: FnOnce(&mut Records) -> Result<T>,
{
    let mut records = store.load()?;
    let out = mutate(&mut records)?;
    store.commit(&records)?;
    Ok(out)
}

pub fn require_owner(records: &Records, id: OwnerId) -> Result<&Owner> {
    records
        .owner(id)
        .ok_or_else(|| RosterError::owner_not_found(id))
}

pub fn require_definition(records: &Records, id: DefinitionId) -> Result<&AttributeDefinition> {
    records
        .definition(id)
        .ok_or_else(|| RosterError::definition_not_found(id))
}

/// Trim an optional text field, mapping blank to `None`.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reject blank names, returning the trimmed form.
pub fn require_name(name: &str, what: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RosterError::InvalidInput(format!("{} cannot be empty", what)));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn test_transact_commits_on_success() {
        let mut store = InMemoryStore::new();
        let id = transact(&mut store, |records| Ok(records.next_owner_id())).unwrap();
        assert_eq!(id, 1);
        assert_eq!(store.load().unwrap().sequences.owner, 1);
    }

    #[test]
    fn test_transact_discards_on_error() {
        let mut store = InMemoryStore::new();
        let result: Result<()> = transact(&mut store, |records| {
            records.next_owner_id();
            Err(RosterError::InvalidInput("nope".into()))
        });
        assert!(result.is_err());
        assert_eq!(store.load().unwrap().sequences.owner, 0);
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(None), None);
        assert_eq!(normalize_optional(Some("  ".into())), None);
        assert_eq!(normalize_optional(Some(" x ".into())), Some("x".into()));
    }

    #[test]
    fn test_require_name() {
        assert_eq!(require_name(" Blood type ", "Name").unwrap(), "Blood type");
        match require_name("   ", "Name") {
            Err(RosterError::InvalidInput(msg)) => assert!(msg.contains("Name")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }
}
