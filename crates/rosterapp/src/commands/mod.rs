//! # Command Layer
//!
//! The business logic of roster. Each registry lives in its own submodule as
//! free functions generic over [`DataStore`](crate::store::DataStore), so the
//! same code runs against the file store and the in-memory test store.
//!
//! ## Role and Responsibilities
//!
//! Commands are where the rules live:
//! - Enforce uniqueness (definition names, owner email and document number)
//! - Run every value through the kind validator before it is stored
//! - Apply cascades inside the same write as the triggering delete
//! - Return domain records, never formatted text
//!
//! ## What Commands Do NOT Do
//!
//! - **Any output**: no stdout/stderr, no table layout
//! - **Argument parsing**: that's the CLI layer's job
//! - **Filtering and rendering**: see [`crate::attributes`], [`crate::columns`]
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Command tests use
//! [`InMemoryStore`](crate::store::memory::InMemoryStore) and the
//! [`StoreFixture`](crate::store::memory::fixtures::StoreFixture) builder, and
//! check both the returned records and what ended up in the store, including
//! that failed operations left it untouched.
//!
//! ## Command Modules
//!
//! - [`definitions`]: attribute definition registry
//! - [`values`]: attribute value store
//! - [`owners`]: owner (person) registry
//! - [`helpers`]: the load/mutate/commit cycle and lookups shared by the above

pub mod definitions;
pub mod helpers;
pub mod owners;
pub mod values;
