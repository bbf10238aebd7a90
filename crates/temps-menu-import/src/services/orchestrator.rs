//! Menu import orchestrator
//!
//! Runs a whole import: parse the document, place each menu, assemble its
//! items, and collect everything into an `ImportReport`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use temps_menu_import_types::{
    parse_document, ContentStore, ImportOptions, ImportReport, ImportResult, MenuDefinition,
    MenuId, MenuImportError, MenuReport, MenuSkipReason,
};
use tracing::{debug, info, warn};

use super::{MenuLocator, MenuTreeAssembler, ReferenceResolver};
use crate::site::SiteContext;

/// Imports menu documents into a content store
pub struct MenuImporter<'a> {
    store: &'a mut dyn ContentStore,
    site: SiteContext,
    options: ImportOptions,
}

impl<'a> MenuImporter<'a> {
    pub fn new(store: &'a mut dyn ContentStore, site: SiteContext, options: ImportOptions) -> Self {
        Self {
            store,
            site,
            options,
        }
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// Import the menu document at `path`
    pub fn import_file(&mut self, path: &Path) -> ImportResult<ImportReport> {
        if !path.is_file() {
            return Err(MenuImportError::FileNotFound(path.to_path_buf()));
        }

        debug!("Reading menu document {}", path.display());
        let text = fs::read_to_string(path)?;
        self.import_str(&text)
    }

    /// Import a menu document held in memory
    pub fn import_str(&mut self, text: &str) -> ImportResult<ImportReport> {
        let menus = parse_document(text)?;
        self.import_menus(&menus)
    }

    /// Import already parsed menu definitions, in order
    pub fn import_menus(&mut self, menus: &[MenuDefinition]) -> ImportResult<ImportReport> {
        info!(
            "Importing {} menu definition(s) (mode: {}, missing: {})",
            menus.len(),
            self.options.mode,
            self.options.missing
        );

        let mut locations = self.location_assignments()?;
        let mut report = ImportReport::new();

        for (index, menu) in menus.iter().enumerate() {
            let menu_report = self.import_menu(index, menu, &mut locations)?;
            report.add_menu(menu_report);
        }

        let summary = &report.summary;
        info!(
            "Menu import finished: {} menu(s) processed, {} skipped; items: {} created, {} updated, {} unchanged, {} skipped",
            summary.menus_processed,
            summary.menus_skipped,
            summary.items_created,
            summary.items_updated,
            summary.items_unchanged,
            summary.items_skipped
        );
        for (reason, count) in &summary.skipped_by_reason {
            info!("  skipped ({}): {}", reason, count);
        }

        Ok(report)
    }

    fn location_assignments(&self) -> ImportResult<HashMap<String, MenuId>> {
        match self.store.location_assignments() {
            Ok(locations) => Ok(locations),
            Err(e) => match e.to_fatal() {
                Some(fatal) => Err(fatal),
                None => {
                    warn!("Could not read theme locations, continuing without: {}", e);
                    Ok(HashMap::new())
                }
            },
        }
    }

    fn import_menu(
        &mut self,
        index: usize,
        menu: &MenuDefinition,
        locations: &mut HashMap<String, MenuId>,
    ) -> ImportResult<MenuReport> {
        let label = menu.label();

        if !menu.is_placeable() {
            warn!("Skipping menu #{}: no location or name given", index);
            return Ok(MenuReport::skipped(index, label, MenuSkipReason::Unplaceable));
        }

        let locator = MenuLocator::new(self.options.mode);
        let located = match locator.locate(&mut *self.store, menu, locations) {
            Ok(located) => located,
            Err(e) => {
                if let Some(fatal) = e.fatal_store_error().and_then(|s| s.to_fatal()) {
                    return Err(fatal);
                }
                warn!("Skipping menu #{} '{}': {}", index, label, e);
                return Ok(MenuReport::skipped(index, label, e.reason()));
            }
        };

        info!(
            "Importing {} item(s) into menu '{}' ({})",
            menu.items.len(),
            label,
            located.id
        );

        let resolver = ReferenceResolver::new(&self.site, &self.options);
        let assembler = MenuTreeAssembler::new(resolver, self.options.mode);
        let items = assembler.assemble(&mut *self.store, located.id, &menu.items)?;

        let mut menu_report = MenuReport::new(index, label);
        menu_report.menu_id = Some(located.id);
        menu_report.created = located.created;
        menu_report.renamed = located.renamed;
        menu_report.items = items;
        Ok(menu_report)
    }
}
