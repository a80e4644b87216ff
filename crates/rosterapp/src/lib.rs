//! # rosterapp
//!
//! A person registry with an open-ended set of runtime-defined attributes.
//!
//! The fixed [`model::Owner`] record is plain CRUD. The interesting part is the
//! attribute subsystem layered on top of it: operators declare typed fields at
//! runtime ([`model::AttributeDefinition`]), attach values to any owner
//! ([`model::AttributeValue`]), and the presentation side filters,
//! paginates and renders a grid that mixes fixed and dynamic columns.
//!
//! ## Layering
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  api.rs           RosterApi facade, grid composition     │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────────────────────────────────────────────────┐
//! │  commands/*       definition, value and owner operations │
//! │  fields/columns   field catalog, cell rendering          │
//! │  paginate         pure slicing + page state              │
//! │  attributes/*     kinds, validation, filter predicates   │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────────────────────────────────────────────────┐
//! │  store/*          Records snapshot, backends, prefs      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything above `store` is free of I/O. Filtering, column composition and
//! pagination operate on snapshots and never mutate shared state.

pub mod api;
pub mod attributes;
pub mod columns;
pub mod commands;
pub mod config;
pub mod error;
pub mod fields;
pub mod init;
pub mod model;
pub mod paginate;
pub mod store;
