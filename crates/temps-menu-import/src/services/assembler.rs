//! Menu tree assembler
//!
//! Walks a menu's items in declaration order, persists each one and records its
//! id under its slug so later items can name it as their parent. Parents must
//! therefore appear before their children; a parent slug that has not been
//! recorded yet is an `UnknownParent` failure for that item only.

use slug::slugify;
use std::collections::HashMap;
use temps_menu_import_types::{
    ContentStore, ImportMode, ImportResult, ItemDefinition, ItemId, ItemOutcome, ItemReport,
    MenuId,
};
use tracing::{debug, warn};

use super::{AssembleError, ItemBuilder, ReferenceResolver};

/// An item persisted during the current menu's import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemRecord {
    pub slug: String,
    pub created_id: ItemId,
    pub parent_slug: Option<String>,
}

pub struct MenuTreeAssembler<'a> {
    resolver: ReferenceResolver<'a>,
    builder: ItemBuilder,
    mode: ImportMode,
}

impl<'a> MenuTreeAssembler<'a> {
    pub fn new(resolver: ReferenceResolver<'a>, mode: ImportMode) -> Self {
        Self {
            resolver,
            builder: ItemBuilder::new(),
            mode,
        }
    }

    /// Import `items` into `menu_id`
    ///
    /// Item-level failures are reported and skipped. Only a store that has
    /// become unavailable stops the walk, as `MenuImportError::StoreUnavailable`.
    pub fn assemble(
        &self,
        store: &mut dyn ContentStore,
        menu_id: MenuId,
        items: &[ItemDefinition],
    ) -> ImportResult<Vec<ItemReport>> {
        let existing = self.existing_items(&*store, menu_id)?;
        let mut records: HashMap<String, MenuItemRecord> = HashMap::new();
        let mut reports = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            let position = u32::try_from(index + 1).unwrap_or(u32::MAX);

            let report = match self.place_item(store, menu_id, item, position, &existing, &mut records)
            {
                Ok((slug, outcome)) => {
                    debug!(
                        "Menu {} item #{} '{}': {:?}",
                        menu_id, position, slug, outcome
                    );
                    ItemReport {
                        position,
                        slug: Some(slug),
                        outcome,
                    }
                }
                Err(e) => {
                    if let Some(fatal) = e.fatal_store_error().and_then(|s| s.to_fatal()) {
                        return Err(fatal);
                    }
                    warn!(
                        "Skipping menu {} item #{} ({}): {}",
                        menu_id,
                        position,
                        e.reason(),
                        e
                    );
                    ItemReport {
                        position,
                        slug: item.slug.clone(),
                        outcome: ItemOutcome::Skipped {
                            reason: e.reason(),
                            detail: e.to_string(),
                        },
                    }
                }
            };
            reports.push(report);
        }

        Ok(reports)
    }

    /// Slug -> id of the items in the menu before this import touched it
    ///
    /// Only these count as "existing" for the mode policy; items created earlier
    /// in the same run never do.
    fn existing_items(
        &self,
        store: &dyn ContentStore,
        menu_id: MenuId,
    ) -> ImportResult<HashMap<String, ItemId>> {
        if self.mode == ImportMode::Append {
            return Ok(HashMap::new());
        }

        match store.menu_items(menu_id) {
            Ok(items) => {
                let mut existing = HashMap::new();
                for item in items {
                    existing.entry(item.slug).or_insert(item.id);
                }
                Ok(existing)
            }
            Err(e) => match e.to_fatal() {
                Some(fatal) => Err(fatal),
                None => {
                    warn!(
                        "Could not list items of menu {}, treating it as empty: {}",
                        menu_id, e
                    );
                    Ok(HashMap::new())
                }
            },
        }
    }

    fn place_item(
        &self,
        store: &mut dyn ContentStore,
        menu_id: MenuId,
        item: &ItemDefinition,
        position: u32,
        existing: &HashMap<String, ItemId>,
        records: &mut HashMap<String, MenuItemRecord>,
    ) -> Result<(String, ItemOutcome), AssembleError> {
        let target = self.resolver.resolve(&*store, item)?;
        let draft = self.builder.build(item, &target);

        let slug = match &item.slug {
            Some(slug) => slug.clone(),
            None => slugify(&draft.title),
        };
        if slug.is_empty() {
            return Err(AssembleError::EmptySlug { title: draft.title });
        }

        let parent_id = match &draft.parent_slug {
            Some(parent) => Some(
                records
                    .get(parent)
                    .map(|record| record.created_id)
                    .ok_or_else(|| AssembleError::UnknownParent {
                        parent: parent.clone(),
                    })?,
            ),
            None => None,
        };

        let parent_slug = draft.parent_slug.clone();
        let payload = draft.into_payload(slug.clone(), parent_id, position);

        let (id, outcome) = match (self.mode, existing.get(&slug).copied()) {
            (ImportMode::Skip, Some(id)) => (id, ItemOutcome::Unchanged { id }),
            (ImportMode::Update, Some(existing_id)) => {
                let id = store.save_item(menu_id, Some(existing_id), &payload)?;
                (id, ItemOutcome::Updated { id })
            }
            _ => {
                let id = store.save_item(menu_id, None, &payload)?;
                (id, ItemOutcome::Created { id })
            }
        };

        let record = MenuItemRecord {
            slug: slug.clone(),
            created_id: id,
            parent_slug,
        };
        if let Some(previous) = records.insert(slug.clone(), record) {
            warn!(
                "Duplicate slug '{}' in menu {}: item {} replaces item {} as parent for later items",
                slug, menu_id, id, previous.created_id
            );
        }

        Ok((slug, outcome))
    }
}
