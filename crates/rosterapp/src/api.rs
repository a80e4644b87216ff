//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the pure
//! query modules. It is the single entry point for every roster operation,
//! whatever client sits on top.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the registry functions in [`crate::commands`]
//! - **Applies configuration** (duplicate policy, page size, cell labels)
//! - **Composes the grid**: fresh catalog → filter → paginate → render
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **Output**: returns data structures, not printed text
//!
//! ## Generic Over Storage
//!
//! `RosterApi<S: DataStore, P: PreferenceStore>`:
//! - Production: `RosterApi<FileStore, FsPreferences>`
//! - Testing: `RosterApi<InMemoryStore, MemPreferences>`
//!
//! ## The Grid Data Flow
//!
//! [`RosterApi::owner_grid`] rebuilds the field catalog from the definitions
//! in storage on every call. Nothing derived from definitions is kept between
//! calls, so a definition created, renamed or deactivated since the last
//! render shows up immediately.

use crate::attributes::{filter_owners, ArtifactPayload, SearchInput};
use crate::columns::{ColumnComposer, ColumnPreference};
use crate::commands::definitions::{self, DeletedDefinition};
use crate::commands::owners::{self, DeletedOwner};
use crate::commands::values::{self, DuplicatePolicy};
use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use crate::fields::{catalog, find_field, FieldDescriptor};
use crate::model::{
    AttributeDefinition, AttributeValue, DefinitionId, DefinitionPatch, DefinitionRequest,
    NewOwner, Owner, OwnerId, OwnerPatch, ValueId, ValueRequest,
};
use crate::paginate::{Page, PageState};
use crate::store::prefs::PreferenceStore;
use crate::store::{DataStore, DoctorReport};
use tracing::debug;

/// A grid column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridColumn {
    pub key: String,
    pub label: String,
}

/// One rendered grid row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub owner_id: OwnerId,
    pub cells: Vec<String>,
}

/// A filtered, paginated, rendered page of owners.
#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    pub columns: Vec<GridColumn>,
    pub page: Page<GridRow>,
}

/// The main API facade for roster operations.
pub struct RosterApi<S: DataStore, P: PreferenceStore> {
    store: S,
    prefs: P,
    config: RosterConfig,
}

impl<S: DataStore, P: PreferenceStore> RosterApi<S, P> {
    pub fn new(store: S, prefs: P, config: RosterConfig) -> Self {
        Self {
            store,
            prefs,
            config,
        }
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn duplicate_policy(&self) -> DuplicatePolicy {
        DuplicatePolicy::from_config(self.config.enforce_single_value)
    }

    // --- Owners ---

    pub fn list_owners(&self) -> Result<Vec<Owner>> {
        owners::list(&self.store)
    }

    pub fn get_owner(&self, id: OwnerId) -> Result<Owner> {
        owners::get(&self.store, id)
    }

    pub fn create_owner(&mut self, new_owner: NewOwner) -> Result<Owner> {
        owners::create(&mut self.store, new_owner)
    }

    pub fn update_owner(&mut self, id: OwnerId, patch: OwnerPatch) -> Result<Owner> {
        owners::update(&mut self.store, id, patch)
    }

    pub fn delete_owner(&mut self, id: OwnerId) -> Result<DeletedOwner> {
        owners::delete(&mut self.store, id)
    }

    // --- Attribute definitions ---

    pub fn list_definitions(&self, active_only: bool) -> Result<Vec<AttributeDefinition>> {
        definitions::list(&self.store, active_only)
    }

    /// One page of the definition management list.
    pub fn definition_page(
        &self,
        active_only: bool,
        page_state: &PageState,
    ) -> Result<Page<AttributeDefinition>> {
        let definitions = definitions::list(&self.store, active_only)?;
        Ok(page_state.apply(&definitions))
    }

    pub fn get_definition(&self, id: DefinitionId) -> Result<AttributeDefinition> {
        definitions::get(&self.store, id)
    }

    pub fn create_definition(&mut self, request: &DefinitionRequest) -> Result<AttributeDefinition> {
        definitions::create(&mut self.store, request)
    }

    pub fn update_definition(
        &mut self,
        id: DefinitionId,
        patch: &DefinitionPatch,
    ) -> Result<AttributeDefinition> {
        definitions::update(&mut self.store, id, patch)
    }

    pub fn delete_definition(&mut self, id: DefinitionId) -> Result<DeletedDefinition> {
        definitions::delete(&mut self.store, id)
    }

    // --- Attribute values ---

    pub fn list_values(&self, owner_id: OwnerId) -> Result<Vec<AttributeValue>> {
        values::list_by_owner(&self.store, owner_id)
    }

    pub fn list_all_values(&self) -> Result<Vec<AttributeValue>> {
        values::list_all(&self.store)
    }

    pub fn get_value(&self, id: ValueId) -> Result<AttributeValue> {
        values::get(&self.store, id)
    }

    pub fn create_value(
        &mut self,
        owner_id: OwnerId,
        definition_id: DefinitionId,
        raw: &str,
        artifact: Option<ArtifactPayload>,
    ) -> Result<AttributeValue> {
        let policy = self.duplicate_policy();
        values::create(&mut self.store, owner_id, definition_id, raw, artifact, policy)
    }

    pub fn create_value_from_request(&mut self, request: ValueRequest) -> Result<AttributeValue> {
        let policy = self.duplicate_policy();
        values::create_from_request(&mut self.store, request, policy)
    }

    pub fn update_value(
        &mut self,
        id: ValueId,
        raw: Option<&str>,
        artifact: Option<ArtifactPayload>,
    ) -> Result<AttributeValue> {
        values::update(&mut self.store, id, raw, artifact)
    }

    pub fn delete_value(&mut self, id: ValueId) -> Result<AttributeValue> {
        values::delete(&mut self.store, id)
    }

    pub fn delete_owner_values(&mut self, owner_id: OwnerId) -> Result<usize> {
        values::delete_by_owner(&mut self.store, owner_id)
    }

    pub fn missing_required(&self, owner_id: OwnerId) -> Result<Vec<AttributeDefinition>> {
        values::missing_required(&self.store, owner_id)
    }

    // --- Catalog, columns and grid ---

    /// A composer over the current definitions, using configured labels.
    pub fn composer(&self) -> Result<ColumnComposer> {
        let definitions = definitions::list(&self.store, false)?;
        Ok(ColumnComposer::new(&definitions).with_config(&self.config))
    }

    pub fn available_fields(&self) -> Result<Vec<FieldDescriptor>> {
        let definitions = definitions::list(&self.store, false)?;
        Ok(catalog(&definitions))
    }

    /// The stored column preference, reconciled against the current catalog.
    pub fn column_preference(&self) -> Result<ColumnPreference> {
        let mut preference = ColumnPreference::load(&self.prefs, &self.config.preference_key);
        preference.retain_known(&self.available_fields()?);
        Ok(preference)
    }

    pub fn save_column_preference(&mut self, preference: &ColumnPreference) -> Result<()> {
        preference.save(&mut self.prefs, &self.config.preference_key)
    }

    /// Show or hide one column and persist the result. Returns whether the
    /// column is now visible.
    pub fn toggle_column(&mut self, key: &str) -> Result<bool> {
        let fields = self.available_fields()?;
        if find_field(&fields, key).is_none() {
            return Err(RosterError::InvalidInput(format!("Unknown column '{}'", key)));
        }
        let mut preference = self.column_preference()?;
        let visible = preference.toggle(key);
        self.save_column_preference(&preference)?;
        Ok(visible)
    }

    /// Owners matching a search on `field_key`, in insertion order.
    pub fn search_owners(&self, field_key: &str, input: &SearchInput) -> Result<Vec<Owner>> {
        let records = self.store.load()?;
        let fields = catalog(&records.definitions);
        Ok(
            filter_owners(&fields, field_key, input, &records.owners, &records.values)
                .into_iter()
                .cloned()
                .collect(),
        )
    }

    /// Filter, paginate and render one page of the owner grid.
    ///
    /// `page_state` observes the search first, so a changed field or input
    /// lands on the first page.
    pub fn owner_grid(
        &self,
        field_key: &str,
        input: &SearchInput,
        page_state: &mut PageState,
        preference: &ColumnPreference,
    ) -> Result<GridView> {
        let records = self.store.load()?;
        let composer = ColumnComposer::new(&records.definitions).with_config(&self.config);

        let kept = filter_owners(
            composer.available_fields(),
            field_key,
            input,
            &records.owners,
            &records.values,
        );
        page_state.observe_search(field_key, input);
        let page = page_state.apply(&kept);

        let visible = composer.visible_fields(preference);
        let columns = visible
            .iter()
            .map(|f| GridColumn {
                key: f.key.clone(),
                label: f.label.clone(),
            })
            .collect();
        let page = page.map(|owner| GridRow {
            owner_id: owner.id,
            cells: composer.render_row(owner, &visible, &records.values),
        });

        debug!(
            field_key,
            page = page.page_index,
            total_pages = page.total_pages,
            rows = page.items.len(),
            "rendered owner grid"
        );
        Ok(GridView { columns, page })
    }

    pub fn doctor(&mut self) -> Result<DoctorReport> {
        self.store.doctor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeKind;
    use crate::store::memory::InMemoryStore;
    use crate::store::prefs::MemPreferences;

    fn api() -> RosterApi<InMemoryStore, MemPreferences> {
        RosterApi::new(
            InMemoryStore::new(),
            MemPreferences::new(),
            RosterConfig::default(),
        )
    }

    #[test]
    fn test_owner_and_definition_dispatch() {
        let mut api = api();
        let owner = api.create_owner(NewOwner::named("Ana")).unwrap();
        let def = api
            .create_definition(&DefinitionRequest::new("Height", "number"))
            .unwrap();

        assert_eq!(api.get_owner(owner.id).unwrap().full_name, "Ana");
        assert_eq!(api.get_definition(def.id).unwrap().kind, AttributeKind::Number);
        assert_eq!(api.list_owners().unwrap().len(), 1);
        assert_eq!(api.list_definitions(true).unwrap().len(), 1);
    }

    #[test]
    fn test_create_value_respects_single_value_config() {
        let mut api = RosterApi::new(
            InMemoryStore::new(),
            MemPreferences::new(),
            RosterConfig {
                enforce_single_value: true,
                ..Default::default()
            },
        );
        let owner = api.create_owner(NewOwner::named("Ana")).unwrap();
        let def = api
            .create_definition(&DefinitionRequest::new("Height", "number"))
            .unwrap();

        api.create_value(owner.id, def.id, "170", None).unwrap();
        api.create_value(owner.id, def.id, "171", None).unwrap();

        let values = api.list_values(owner.id).unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].value, "171");
    }

    #[test]
    fn test_column_preference_defaults_and_toggle() {
        let mut api = api();
        let def = api
            .create_definition(&DefinitionRequest::new("Height", "number"))
            .unwrap();

        assert_eq!(api.column_preference().unwrap(), ColumnPreference::default());

        let key = crate::fields::dynamic_key(def.id);
        assert!(api.toggle_column(&key).unwrap());
        assert!(api.column_preference().unwrap().contains(&key));
        assert!(!api.toggle_column("email").unwrap());
        assert!(!api.column_preference().unwrap().contains("email"));

        assert!(matches!(
            api.toggle_column("dynamic_404"),
            Err(RosterError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_column_preference_drops_deactivated() {
        let mut api = api();
        let def = api
            .create_definition(&DefinitionRequest::new("Height", "number"))
            .unwrap();
        let key = crate::fields::dynamic_key(def.id);
        api.toggle_column(&key).unwrap();

        let patch = DefinitionPatch {
            active: Some(false),
            ..Default::default()
        };
        api.update_definition(def.id, &patch).unwrap();
        assert!(!api.column_preference().unwrap().contains(&key));
    }

    #[test]
    fn test_owner_grid_composes_filter_page_and_cells() {
        let mut api = api();
        let height = api
            .create_definition(&DefinitionRequest::new("Height", "number"))
            .unwrap();
        for (name, h) in [("Ana", "150"), ("Bea", "165"), ("Cai", "180"), ("Dan", "9")] {
            let owner = api.create_owner(NewOwner::named(name)).unwrap();
            api.create_value(owner.id, height.id, h, None).unwrap();
        }
        api.create_owner(NewOwner::named("Eve")).unwrap();

        let key = crate::fields::dynamic_key(height.id);
        let preference = ColumnPreference::new(["full_name", key.as_str()]);
        let mut page_state = PageState::new(2);
        let input = SearchInput::number_range(Some(10.0), Some(170.0));

        let grid = api
            .owner_grid(&key, &input, &mut page_state, &preference)
            .unwrap();

        assert_eq!(
            grid.columns,
            vec![
                GridColumn {
                    key: "full_name".into(),
                    label: "Name".into()
                },
                GridColumn {
                    key: key.clone(),
                    label: "Height".into()
                },
            ]
        );
        assert_eq!(grid.page.total_items, 2);
        assert_eq!(grid.page.total_pages, 1);
        assert_eq!(grid.page.items[0].cells, vec!["Ana", "150"]);
        assert_eq!(grid.page.items[1].cells, vec!["Bea", "165"]);
    }

    #[test]
    fn test_owner_grid_resets_page_on_new_search() {
        let mut api = api();
        for i in 0..5 {
            api.create_owner(NewOwner::named(format!("Person {}", i))).unwrap();
        }
        let preference = ColumnPreference::default();
        let mut page_state = PageState::new(2);
        let everyone = SearchInput::text("person");

        api.owner_grid("full_name", &everyone, &mut page_state, &preference)
            .unwrap();
        page_state.last(3);
        let grid = api
            .owner_grid("full_name", &everyone, &mut page_state, &preference)
            .unwrap();
        assert_eq!(grid.page.page_index, 2);
        assert_eq!(grid.page.items.len(), 1);

        let narrowed = SearchInput::text("person 1");
        let grid = api
            .owner_grid("full_name", &narrowed, &mut page_state, &preference)
            .unwrap();
        assert_eq!(grid.page.page_index, 0);
        assert_eq!(grid.page.total_items, 1);
    }

    #[test]
    fn test_definition_page() {
        let mut api = api();
        for name in ["A", "B", "C"] {
            api.create_definition(&DefinitionRequest::new(name, "text"))
                .unwrap();
        }
        let mut state = PageState::new(2);
        state.next(2);
        let page = api.definition_page(false, &state).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "C");
        assert_eq!(page.display_range(), Some((3, 3)));
    }

    #[test]
    fn test_search_owners_unknown_field_keeps_all() {
        let mut api = api();
        api.create_owner(NewOwner::named("Ana")).unwrap();
        api.create_owner(NewOwner::named("Bea")).unwrap();
        let found = api
            .search_owners("no_such_field", &SearchInput::text("zzz"))
            .unwrap();
        assert_eq!(found.len(), 2);
    }
}
