//! Core types and traits for the Temps menu import system
//!
//! This crate provides the foundational abstractions for importing navigation
//! menus from a JSON document into a content-management system.
//!
//! # Architecture
//!
//! - **Definitions**: `MenuDefinition` / `ItemDefinition`, parsed from the import document
//! - **Store**: `ContentStore` is the only way the engine reaches the target system
//! - **Policies**: `ImportMode` and `MissingPolicy` control conflicts and unresolved references
//! - **Report**: `ImportReport` records every created, updated, unchanged and skipped item
//! - **Errors**: fatal `MenuImportError` and per-call `StoreError`
//!
//! # Usage
//!
//! The engine (`temps-menu-import`) and any `ContentStore` implementation depend
//! on this crate.

pub mod definition;
pub mod error;
pub mod policy;
pub mod report;
pub mod store;
pub mod target;

pub use definition::{parse_document, ItemDefinition, MenuDefinition, TargetReference};
pub use error::{ImportResult, MenuImportError, StoreError, StoreResult};
pub use policy::{ImportMode, ImportOptions, MissingPolicy, ParsePolicyError};
pub use report::{
    ImportReport, ImportSummary, ItemOutcome, ItemReport, MenuReport, MenuSkipReason, SkipReason,
};
pub use store::{
    ContentObject, ContentStore, ExistingItem, ItemId, ItemPayload, ItemTarget, MenuId,
    MenuSummary, ObjectId, PUBLISHED_STATUS,
};
pub use target::ResolvedTarget;
