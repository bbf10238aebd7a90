//! Menu locator
//!
//! Resolves a menu definition to a menu container: the menu assigned to its
//! theme location, else the menu with its name, else a newly created one.

use std::collections::HashMap;
use temps_menu_import_types::{ContentStore, ImportMode, MenuDefinition, MenuId};
use tracing::{debug, info, warn};

use super::LocateError;

/// Menu container a definition resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatedMenu {
    pub id: MenuId,
    pub created: bool,
    pub renamed: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct MenuLocator {
    mode: ImportMode,
}

impl MenuLocator {
    pub fn new(mode: ImportMode) -> Self {
        Self { mode }
    }

    /// Find or create the menu for `menu`
    ///
    /// `locations` is the run's view of theme location assignments; it is
    /// updated when this call assigns a location.
    pub fn locate(
        &self,
        store: &mut dyn ContentStore,
        menu: &MenuDefinition,
        locations: &mut HashMap<String, MenuId>,
    ) -> Result<LocatedMenu, LocateError> {
        if let Some(location) = &menu.location_key {
            if let Some(&id) = locations.get(location) {
                debug!("Location '{}' is assigned to menu {}", location, id);
                let renamed = self.rename_if_updating(store, id, menu.name.as_deref())?;
                return Ok(LocatedMenu {
                    id,
                    created: false,
                    renamed,
                });
            }
        }

        let Some(name) = &menu.name else {
            return Err(LocateError::Unplaceable);
        };

        let (id, created) = match store.find_menu_by_name(name)? {
            Some(existing) => (existing.id, false),
            None => {
                let id = store.create_menu(name)?;
                info!("Created menu '{}' ({})", name, id);
                (id, true)
            }
        };

        if let Some(location) = &menu.location_key {
            match store.assign_location(location, id) {
                Ok(()) => {
                    info!("Assigned menu {} to location '{}'", id, location);
                    locations.insert(location.clone(), id);
                }
                Err(e) if e.is_fatal() => return Err(e.into()),
                Err(e) => warn!(
                    "Could not assign menu {} to location '{}': {}",
                    id, location, e
                ),
            }
        }

        Ok(LocatedMenu {
            id,
            created,
            renamed: false,
        })
    }

    /// In update mode a located menu takes the definition's name, unless
    /// another menu already carries it. A rejected rename keeps the old name.
    fn rename_if_updating(
        &self,
        store: &mut dyn ContentStore,
        id: MenuId,
        name: Option<&str>,
    ) -> Result<bool, LocateError> {
        let Some(name) = name else {
            return Ok(false);
        };
        if self.mode != ImportMode::Update {
            return Ok(false);
        }

        match store.find_menu_by_name(name)? {
            Some(existing) if existing.id == id => Ok(false),
            Some(existing) => {
                warn!(
                    "Not renaming menu {} to '{}': the name belongs to menu {}",
                    id, name, existing.id
                );
                Ok(false)
            }
            None => match store.rename_menu(id, name) {
                Ok(()) => {
                    info!("Renamed menu {} to '{}'", id, name);
                    Ok(true)
                }
                Err(e) if e.is_fatal() => Err(e.into()),
                Err(e) => {
                    warn!("Could not rename menu {} to '{}': {}", id, name, e);
                    Ok(false)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SiteStore;

    fn definition(location: Option<&str>, name: Option<&str>) -> MenuDefinition {
        MenuDefinition {
            location_key: location.map(str::to_string),
            name: name.map(str::to_string),
            items: Vec::new(),
        }
    }

    fn locations(store: &SiteStore) -> HashMap<String, MenuId> {
        store.location_assignments().unwrap()
    }

    #[test]
    fn test_location_wins_over_name() {
        let mut store = SiteStore::new("http://example.com");
        let primary = store.add_menu("Primary");
        store.assign_location("header", primary).unwrap();
        store.add_menu("Other");

        let mut locs = locations(&store);
        let located = MenuLocator::new(ImportMode::Append)
            .locate(&mut store, &definition(Some("header"), Some("Other")), &mut locs)
            .unwrap();

        assert_eq!(
            located,
            LocatedMenu {
                id: primary,
                created: false,
                renamed: false
            }
        );
    }

    #[test]
    fn test_existing_menu_by_name() {
        let mut store = SiteStore::new("http://example.com");
        let main = store.add_menu("Main");

        let mut locs = locations(&store);
        let located = MenuLocator::new(ImportMode::Append)
            .locate(&mut store, &definition(None, Some("Main")), &mut locs)
            .unwrap();

        assert_eq!(located.id, main);
        assert!(!located.created);
    }

    #[test]
    fn test_creates_menu_and_assigns_location() {
        let mut store = SiteStore::new("http://example.com");

        let mut locs = locations(&store);
        let located = MenuLocator::new(ImportMode::Skip)
            .locate(&mut store, &definition(Some("footer"), Some("Footer")), &mut locs)
            .unwrap();

        assert!(located.created);
        assert_eq!(store.find_menu_by_name("Footer").unwrap().unwrap().id, located.id);
        assert_eq!(locs.get("footer"), Some(&located.id));
        assert_eq!(locations(&store).get("footer"), Some(&located.id));
    }

    #[test]
    fn test_unassigned_location_without_name_is_unplaceable() {
        let mut store = SiteStore::new("http://example.com");
        let mut locs = locations(&store);

        let err = MenuLocator::new(ImportMode::Append)
            .locate(&mut store, &definition(Some("sidebar"), None), &mut locs)
            .unwrap_err();
        assert_eq!(err, LocateError::Unplaceable);
    }

    #[test]
    fn test_update_mode_renames_located_menu() {
        let mut store = SiteStore::new("http://example.com");
        let id = store.add_menu("Old Name");
        store.assign_location("header", id).unwrap();

        let mut locs = locations(&store);
        let located = MenuLocator::new(ImportMode::Update)
            .locate(&mut store, &definition(Some("header"), Some("New Name")), &mut locs)
            .unwrap();

        assert!(located.renamed);
        assert_eq!(store.menu(id).unwrap().name, "New Name");
    }

    #[test]
    fn test_other_modes_keep_menu_name() {
        for mode in [ImportMode::Skip, ImportMode::Append] {
            let mut store = SiteStore::new("http://example.com");
            let id = store.add_menu("Old Name");
            store.assign_location("header", id).unwrap();

            let mut locs = locations(&store);
            let located = MenuLocator::new(mode)
                .locate(&mut store, &definition(Some("header"), Some("New Name")), &mut locs)
                .unwrap();

            assert!(!located.renamed);
            assert_eq!(store.menu(id).unwrap().name, "Old Name");
        }
    }

    #[test]
    fn test_update_mode_does_not_steal_another_menus_name() {
        let mut store = SiteStore::new("http://example.com");
        let id = store.add_menu("Header");
        store.add_menu("Taken");
        store.assign_location("header", id).unwrap();

        let mut locs = locations(&store);
        let located = MenuLocator::new(ImportMode::Update)
            .locate(&mut store, &definition(Some("header"), Some("Taken")), &mut locs)
            .unwrap();

        assert!(!located.renamed);
        assert_eq!(store.menu(id).unwrap().name, "Header");
    }
}
