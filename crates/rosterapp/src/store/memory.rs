use super::mem_backend::MemBackend;
use super::record_store::RecordStore;

pub type InMemoryStore = RecordStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        RecordStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::attributes::ArtifactPayload;
    use crate::commands::{definitions, owners, values};
    use crate::model::{AttributeDefinition, AttributeValue, DefinitionRequest, NewOwner, Owner};

    /// Builder for a populated store. Panics on setup errors, which is what
    /// tests want.
    pub struct StoreFixture {
        pub store: InMemoryStore,
        pub owners: Vec<Owner>,
        pub definitions: Vec<AttributeDefinition>,
        pub values: Vec<AttributeValue>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                owners: Vec::new(),
                definitions: Vec::new(),
                values: Vec::new(),
            }
        }

        pub fn with_owners(mut self, count: usize) -> Self {
            for i in 0..count {
                let owner = owners::create(
                    &mut self.store,
                    NewOwner::named(format!("Test Person {}", i + 1)),
                )
                .unwrap();
                self.owners.push(owner);
            }
            self
        }

        pub fn with_owner(mut self, new_owner: NewOwner) -> Self {
            let owner = owners::create(&mut self.store, new_owner).unwrap();
            self.owners.push(owner);
            self
        }

        pub fn with_definition(mut self, name: &str, kind: &str) -> Self {
            let def = definitions::create(&mut self.store, &DefinitionRequest::new(name, kind))
                .unwrap();
            self.definitions.push(def);
            self
        }

        pub fn with_inactive_definition(mut self, name: &str, kind: &str) -> Self {
            let def = definitions::create(
                &mut self.store,
                &DefinitionRequest::new(name, kind).active(false),
            )
            .unwrap();
            self.definitions.push(def);
            self
        }

        /// Attach a value to the owner and definition at the given fixture
        /// positions.
        pub fn with_value(mut self, owner_idx: usize, definition_idx: usize, raw: &str) -> Self {
            let value = values::create(
                &mut self.store,
                self.owners[owner_idx].id,
                self.definitions[definition_idx].id,
                raw,
                None,
                values::DuplicatePolicy::Append,
            )
            .unwrap();
            self.values.push(value);
            self
        }

        pub fn with_artifact(
            mut self,
            owner_idx: usize,
            definition_idx: usize,
            payload: ArtifactPayload,
        ) -> Self {
            let value = values::create(
                &mut self.store,
                self.owners[owner_idx].id,
                self.definitions[definition_idx].id,
                "",
                Some(payload),
                values::DuplicatePolicy::Append,
            )
            .unwrap();
            self.values.push(value);
            self
        }
    }
}
