//! JSON-file backed content store
//!
//! A serializable snapshot of the parts of a site the importer touches: pages,
//! menus with their items, and theme location assignments. Loading, importing
//! and saving a snapshot gives re-import runs a store that remembers state.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use temps_menu_import_types::{
    ContentObject, ContentStore, ExistingItem, ItemId, ItemPayload, MenuId, MenuSummary,
    ObjectId, StoreError, StoreResult,
};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SiteStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid site snapshot: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A menu item as persisted in the snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredItem {
    pub id: ItemId,
    #[serde(flatten)]
    pub payload: ItemPayload,
}

/// A menu container as persisted in the snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMenu {
    pub id: MenuId,
    pub name: String,
    #[serde(default)]
    pub items: Vec<StoredItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteStore {
    /// Home URL of the site, used for relative menu links
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub pages: Vec<ContentObject>,
    #[serde(default)]
    pub menus: Vec<StoredMenu>,
    #[serde(default)]
    pub locations: BTreeMap<String, MenuId>,
    /// Last id handed out; pages, menus and items share one id space
    #[serde(default)]
    next_id: u64,
}

impl SiteStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: Some(base_url.to_string()),
            ..Default::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self, SiteStoreError> {
        let text = fs::read_to_string(path)?;
        let store: SiteStore = serde_json::from_str(&text)?;
        debug!(
            "Loaded site snapshot {} ({} pages, {} menus)",
            path.display(),
            store.pages.len(),
            store.menus.len()
        );
        Ok(store)
    }

    pub fn save(&self, path: &Path) -> Result<(), SiteStoreError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        debug!("Saved site snapshot {}", path.display());
        Ok(())
    }

    pub fn add_page(&mut self, path: &str, title: &str) -> ObjectId {
        let id = ObjectId(self.allocate_id());
        self.pages.push(ContentObject {
            id,
            path: normalize_path(path).to_string(),
            title: title.to_string(),
        });
        id
    }

    pub fn add_menu(&mut self, name: &str) -> MenuId {
        let id = MenuId(self.allocate_id());
        self.menus.push(StoredMenu {
            id,
            name: name.to_string(),
            items: Vec::new(),
        });
        id
    }

    pub fn menu(&self, id: MenuId) -> Option<&StoredMenu> {
        self.menus.iter().find(|menu| menu.id == id)
    }

    pub fn menu_by_name(&self, name: &str) -> Option<&StoredMenu> {
        self.menus.iter().find(|menu| menu.name == name)
    }

    pub fn item(&self, menu_id: MenuId, item_id: ItemId) -> Option<&StoredItem> {
        self.menu(menu_id)?
            .items
            .iter()
            .find(|item| item.id == item_id)
    }

    fn menu_mut(&mut self, id: MenuId) -> StoreResult<&mut StoredMenu> {
        self.menus
            .iter_mut()
            .find(|menu| menu.id == id)
            .ok_or_else(|| StoreError::Rejected(format!("Menu {} does not exist", id)))
    }

    fn allocate_id(&mut self) -> u64 {
        let highest = self
            .pages
            .iter()
            .map(|page| page.id.0)
            .chain(self.menus.iter().map(|menu| menu.id.0))
            .chain(
                self.menus
                    .iter()
                    .flat_map(|menu| menu.items.iter().map(|item| item.id.0)),
            )
            .max()
            .unwrap_or(0);
        self.next_id = self.next_id.max(highest) + 1;
        self.next_id
    }
}

fn normalize_path(path: &str) -> &str {
    path.trim().trim_matches('/')
}

impl ContentStore for SiteStore {
    fn find_by_path(&self, path: &str) -> StoreResult<Option<ContentObject>> {
        let wanted = normalize_path(path);
        Ok(self
            .pages
            .iter()
            .find(|page| normalize_path(&page.path) == wanted)
            .cloned())
    }

    fn find_menu_by_name(&self, name: &str) -> StoreResult<Option<MenuSummary>> {
        Ok(self.menu_by_name(name).map(|menu| MenuSummary {
            id: menu.id,
            name: menu.name.clone(),
        }))
    }

    fn create_menu(&mut self, name: &str) -> StoreResult<MenuId> {
        if self.menu_by_name(name).is_some() {
            return Err(StoreError::Rejected(format!(
                "A menu named '{}' already exists",
                name
            )));
        }
        Ok(self.add_menu(name))
    }

    fn rename_menu(&mut self, menu_id: MenuId, name: &str) -> StoreResult<()> {
        self.menu_mut(menu_id)?.name = name.to_string();
        Ok(())
    }

    fn location_assignments(&self) -> StoreResult<HashMap<String, MenuId>> {
        Ok(self
            .locations
            .iter()
            .map(|(location, id)| (location.clone(), *id))
            .collect())
    }

    fn assign_location(&mut self, location: &str, menu_id: MenuId) -> StoreResult<()> {
        self.menu_mut(menu_id)?;
        self.locations.insert(location.to_string(), menu_id);
        Ok(())
    }

    fn menu_items(&self, menu_id: MenuId) -> StoreResult<Vec<ExistingItem>> {
        let menu = self
            .menu(menu_id)
            .ok_or_else(|| StoreError::Rejected(format!("Menu {} does not exist", menu_id)))?;
        Ok(menu
            .items
            .iter()
            .map(|item| ExistingItem {
                id: item.id,
                slug: item.payload.slug.clone(),
            })
            .collect())
    }

    fn save_item(
        &mut self,
        menu_id: MenuId,
        existing: Option<ItemId>,
        payload: &ItemPayload,
    ) -> StoreResult<ItemId> {
        match existing {
            Some(item_id) => {
                let item = self
                    .menu_mut(menu_id)?
                    .items
                    .iter_mut()
                    .find(|item| item.id == item_id)
                    .ok_or_else(|| {
                        StoreError::Rejected(format!(
                            "Item {} is not in menu {}",
                            item_id, menu_id
                        ))
                    })?;
                item.payload = payload.clone();
                Ok(item_id)
            }
            None => {
                self.menu_mut(menu_id)?;
                let id = ItemId(self.allocate_id());
                self.menu_mut(menu_id)?.items.push(StoredItem {
                    id,
                    payload: payload.clone(),
                });
                Ok(id)
            }
        }
    }
}
