//! Temps Menu Import Engine
//!
//! This crate turns a JSON menu document into navigation menus inside a
//! content store, resolving page references, linking parents to children and
//! applying the configured conflict and missing-reference policies.
//!
//! # Architecture
//!
//! - **Services**: resolver, builder, tree assembler, menu locator and the
//!   `MenuImporter` orchestrator that drives them
//! - **Site**: `SiteContext` (home URL) and absolute URL sanitization
//! - **Site store**: `SiteStore`, a JSON-file backed `ContentStore`
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use temps_menu_import::{ImportOptions, MenuImporter, SiteContext, SiteStore};
//!
//! let mut store = SiteStore::load(Path::new("site.json")).unwrap();
//! let site = SiteContext::new("https://example.com").unwrap();
//! let mut importer = MenuImporter::new(&mut store, site, ImportOptions::default());
//! let report = importer.import_file(Path::new("menus.json")).unwrap();
//! println!("{} items created", report.summary.items_created);
//! ```

pub mod services;
pub mod site;
pub mod site_store;

pub use services::{
    AssembleError, ItemBuilder, ItemDraft, LocateError, LocatedMenu, MenuImporter,
    MenuItemRecord, MenuLocator, MenuTreeAssembler, ReferenceResolver, ResolveError,
};
pub use site::{sanitize_absolute_url, SiteContext};
pub use site_store::{SiteStore, SiteStoreError, StoredItem, StoredMenu};

pub use temps_menu_import_types::*;
