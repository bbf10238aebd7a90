//! Item builder
//!
//! Pure transform from an item definition and its resolved target to the
//! normalized fields of a menu item. Parent ids are filled in by the assembler.

use temps_menu_import_types::{
    ItemDefinition, ItemId, ItemPayload, ItemTarget, ResolvedTarget, TargetReference,
    PUBLISHED_STATUS,
};

/// Normalized item, not yet linked to a parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub title: String,
    pub status: String,
    pub target: ItemTarget,
    pub parent_slug: Option<String>,
}

impl ItemDraft {
    pub fn into_payload(self, slug: String, parent_id: Option<ItemId>, position: u32) -> ItemPayload {
        ItemPayload {
            slug,
            title: self.title,
            status: self.status,
            target: self.target,
            parent_id,
            position,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ItemBuilder;

impl ItemBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Title precedence: explicit title, then the target's own title, then the
    /// raw reference string from the document.
    pub fn build(&self, item: &ItemDefinition, target: &ResolvedTarget) -> ItemDraft {
        let title = item
            .title
            .clone()
            .or_else(|| non_blank(target.title()))
            .unwrap_or_else(|| raw_reference(item));

        ItemDraft {
            title,
            status: PUBLISHED_STATUS.to_string(),
            target: target.to_item_target(),
            parent_slug: item.parent_slug.clone(),
        }
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn raw_reference(item: &ItemDefinition) -> String {
    match item.target() {
        TargetReference::Page(path) => path.to_string(),
        TargetReference::Term { term, .. } => term.to_string(),
        TargetReference::Url(url) => url.to_string(),
        TargetReference::None => String::new(),
    }
}
