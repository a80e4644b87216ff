use serde::{Deserialize, Serialize};

use crate::model::{
    AttributeDefinition, AttributeValue, DefinitionId, Owner, OwnerId, ValueId,
};

/// Last id handed out per record set. Ids are never reused, even after
/// deletion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequences {
    pub owner: OwnerId,
    pub definition: DefinitionId,
    pub value: ValueId,
}

/// Snapshot of every persisted record set, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Records {
    #[serde(default)]
    pub owners: Vec<Owner>,
    #[serde(default)]
    pub definitions: Vec<AttributeDefinition>,
    #[serde(default)]
    pub values: Vec<AttributeValue>,
    #[serde(default)]
    pub sequences: Sequences,
}

impl Records {
    pub fn next_owner_id(&mut self) -> OwnerId {
        self.sequences.owner += 1;
        self.sequences.owner
    }

    pub fn next_definition_id(&mut self) -> DefinitionId {
        self.sequences.definition += 1;
        self.sequences.definition
    }

    pub fn next_value_id(&mut self) -> ValueId {
        self.sequences.value += 1;
        self.sequences.value
    }

    pub fn owner(&self, id: OwnerId) -> Option<&Owner> {
        self.owners.iter().find(|o| o.id == id)
    }

    pub fn owner_mut(&mut self, id: OwnerId) -> Option<&mut Owner> {
        self.owners.iter_mut().find(|o| o.id == id)
    }

    pub fn definition(&self, id: DefinitionId) -> Option<&AttributeDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    pub fn definition_mut(&mut self, id: DefinitionId) -> Option<&mut AttributeDefinition> {
        self.definitions.iter_mut().find(|d| d.id == id)
    }

    pub fn value(&self, id: ValueId) -> Option<&AttributeValue> {
        self.values.iter().find(|v| v.id == id)
    }

    pub fn value_mut(&mut self, id: ValueId) -> Option<&mut AttributeValue> {
        self.values.iter_mut().find(|v| v.id == id)
    }

    /// Remove every value matching `pred`, returning how many were removed.
    pub fn remove_values_where(&mut self, pred: impl Fn(&AttributeValue) -> bool) -> usize {
        let before = self.values.len();
        self.values.retain(|v| !pred(v));
        before - self.values.len()
    }

    /// Drop values pointing at a missing owner or definition.
    pub fn remove_orphans(&mut self) -> usize {
        let owners: Vec<OwnerId> = self.owners.iter().map(|o| o.id).collect();
        let definitions: Vec<DefinitionId> = self.definitions.iter().map(|d| d.id).collect();
        self.remove_values_where(|v| {
            !owners.contains(&v.owner_id) || !definitions.contains(&v.definition_id)
        })
    }

    /// Bring sequences up to the highest existing id. Returns the number of
    /// sequences that had to move.
    pub fn repair_sequences(&mut self) -> usize {
        let mut fixed = 0;
        let mut bump = |seq: &mut u64, max: Option<u64>| {
            if let Some(max) = max {
                if *seq < max {
                    *seq = max;
                    fixed += 1;
                }
            }
        };
        bump(
            &mut self.sequences.owner,
            self.owners.iter().map(|o| o.id).max(),
        );
        bump(
            &mut self.sequences.definition,
            self.definitions.iter().map(|d| d.id).max(),
        );
        bump(
            &mut self.sequences.value,
            self.values.iter().map(|v| v.id).max(),
        );
        fixed
    }
}
