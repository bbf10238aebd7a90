//! Content store collaborator
//!
//! The import engine never talks to a CMS directly. Everything it needs from
//! the target system goes through `ContentStore`, so a run can be pointed at a
//! real site, a JSON snapshot, or a test double.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::StoreResult;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identifier of a content object (page, term)
    ObjectId
);
id_type!(
    /// Identifier of a menu container
    MenuId
);
id_type!(
    /// Identifier of a persisted menu item
    ItemId
);

/// A content object found by path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentObject {
    pub id: ObjectId,
    pub path: String,
    pub title: String,
}

/// A menu container as known to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSummary {
    pub id: MenuId,
    pub name: String,
}

/// An item that was already in a menu before the import touched it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingItem {
    pub id: ItemId,
    pub slug: String,
}

/// What a persisted menu item links to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemTarget {
    Page { object_id: ObjectId },
    Term { object_id: ObjectId },
    Url { url: String },
}

/// Normalized item handed to `ContentStore::save_item`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPayload {
    pub slug: String,
    pub title: String,
    pub status: String,
    pub target: ItemTarget,
    pub parent_id: Option<ItemId>,
    /// 1-based declaration index within the menu
    pub position: u32,
}

/// Status given to every imported item
pub const PUBLISHED_STATUS: &str = "publish";

/// Target system the importer reads from and writes to
///
/// All calls are blocking; the engine issues them strictly in order, so a
/// child's `save_item` only happens after its parent's returned an id.
pub trait ContentStore {
    /// Look up a page by its path; leading and trailing `/` are ignored
    fn find_by_path(&self, path: &str) -> StoreResult<Option<ContentObject>>;

    /// Look up a menu by exact name
    fn find_menu_by_name(&self, name: &str) -> StoreResult<Option<MenuSummary>>;

    /// Create an empty menu
    fn create_menu(&mut self, name: &str) -> StoreResult<MenuId>;

    /// Change a menu's name
    fn rename_menu(&mut self, menu_id: MenuId, name: &str) -> StoreResult<()>;

    /// Current theme location assignments
    fn location_assignments(&self) -> StoreResult<HashMap<String, MenuId>>;

    /// Assign a menu to a theme location
    fn assign_location(&mut self, location: &str, menu_id: MenuId) -> StoreResult<()>;

    /// Items currently in a menu
    fn menu_items(&self, menu_id: MenuId) -> StoreResult<Vec<ExistingItem>>;

    /// Create an item, or overwrite `existing` when given
    fn save_item(
        &mut self,
        menu_id: MenuId,
        existing: Option<ItemId>,
        payload: &ItemPayload,
    ) -> StoreResult<ItemId>;
}
