//! Import report types
//!
//! A run never fails because of a single bad item or menu. Those are skipped and
//! recorded here, so callers can show what happened and why.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::store::{ItemId, MenuId};

/// Why an item was left out
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// None of page, taxonomy+term or url was given
    NoTarget,
    /// Page not found and the missing policy gave up
    MissingReference,
    /// Taxonomy/term targets are not supported yet
    UnsupportedTargetKind,
    /// Missing policy `create` is not supported for pages
    UnsupportedCreate,
    /// Absolute url failed sanitization, or the relative url could not be resolved
    InvalidUrl,
    /// No slug given and the title slugifies to nothing
    EmptySlug,
    /// Parent slug was not created earlier in the same menu
    UnknownParent,
    /// The store rejected the item
    StoreError,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NoTarget => "no_target",
            SkipReason::MissingReference => "missing_reference",
            SkipReason::UnsupportedTargetKind => "unsupported_target_kind",
            SkipReason::UnsupportedCreate => "unsupported_create",
            SkipReason::InvalidUrl => "invalid_url",
            SkipReason::EmptySlug => "empty_slug",
            SkipReason::UnknownParent => "unknown_parent",
            SkipReason::StoreError => "store_error",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a whole menu definition was left out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuSkipReason {
    /// Neither a usable location nor a name
    Unplaceable,
    /// The store rejected the menu lookup or creation
    StoreError,
}

impl fmt::Display for MenuSkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuSkipReason::Unplaceable => write!(f, "unplaceable"),
            MenuSkipReason::StoreError => write!(f, "store_error"),
        }
    }
}

/// What happened to one item definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemOutcome {
    Created { id: ItemId },
    Updated { id: ItemId },
    /// Already present and left alone (skip mode)
    Unchanged { id: ItemId },
    Skipped { reason: SkipReason, detail: String },
}

impl ItemOutcome {
    /// Id the item ended up with in the store, if any
    pub fn item_id(&self) -> Option<ItemId> {
        match self {
            ItemOutcome::Created { id }
            | ItemOutcome::Updated { id }
            | ItemOutcome::Unchanged { id } => Some(*id),
            ItemOutcome::Skipped { .. } => None,
        }
    }
}

/// Report for one item definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemReport {
    /// 1-based declaration index within the menu
    pub position: u32,
    pub slug: Option<String>,
    pub outcome: ItemOutcome,
}

/// Report for one menu definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuReport {
    /// 0-based index of the definition in the document
    pub index: usize,
    pub label: String,
    pub menu_id: Option<MenuId>,
    /// A new menu container was created
    pub created: bool,
    /// An existing menu was renamed (update mode)
    pub renamed: bool,
    pub skipped: Option<MenuSkipReason>,
    pub items: Vec<ItemReport>,
}

impl MenuReport {
    pub fn new(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
            menu_id: None,
            created: false,
            renamed: false,
            skipped: None,
            items: Vec::new(),
        }
    }

    pub fn skipped(index: usize, label: impl Into<String>, reason: MenuSkipReason) -> Self {
        Self {
            skipped: Some(reason),
            ..Self::new(index, label)
        }
    }
}

/// Totals across the whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub menus_processed: usize,
    pub menus_created: usize,
    pub menus_skipped: usize,
    pub items_created: usize,
    pub items_updated: usize,
    pub items_unchanged: usize,
    pub items_skipped: usize,
    pub skipped_by_reason: BTreeMap<SkipReason, usize>,
}

/// Complete result of an import run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub menus: Vec<MenuReport>,
    pub summary: ImportSummary,
}

impl ImportReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a finished menu and fold it into the summary
    pub fn add_menu(&mut self, menu: MenuReport) {
        if menu.skipped.is_some() {
            self.summary.menus_skipped += 1;
        } else {
            self.summary.menus_processed += 1;
        }
        if menu.created {
            self.summary.menus_created += 1;
        }

        for item in &menu.items {
            match &item.outcome {
                ItemOutcome::Created { .. } => self.summary.items_created += 1,
                ItemOutcome::Updated { .. } => self.summary.items_updated += 1,
                ItemOutcome::Unchanged { .. } => self.summary.items_unchanged += 1,
                ItemOutcome::Skipped { reason, .. } => {
                    self.summary.items_skipped += 1;
                    *self.summary.skipped_by_reason.entry(*reason).or_insert(0) += 1;
                }
            }
        }

        self.menus.push(menu);
    }

    /// Nothing was skipped
    pub fn is_clean(&self) -> bool {
        self.summary.items_skipped == 0 && self.summary.menus_skipped == 0
    }

    /// Number of items skipped for `reason`
    pub fn skipped_count(&self, reason: SkipReason) -> usize {
        self.summary
            .skipped_by_reason
            .get(&reason)
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(position: u32, outcome: ItemOutcome) -> ItemReport {
        ItemReport {
            position,
            slug: None,
            outcome,
        }
    }

    #[test]
    fn test_summary_counts() {
        let mut report = ImportReport::new();

        let mut menu = MenuReport::new(0, "Main");
        menu.menu_id = Some(MenuId(1));
        menu.created = true;
        menu.items = vec![
            item(1, ItemOutcome::Created { id: ItemId(10) }),
            item(2, ItemOutcome::Updated { id: ItemId(11) }),
            item(
                3,
                ItemOutcome::Skipped {
                    reason: SkipReason::UnknownParent,
                    detail: "parent 'x' not found".to_string(),
                },
            ),
            item(
                4,
                ItemOutcome::Skipped {
                    reason: SkipReason::UnknownParent,
                    detail: "parent 'y' not found".to_string(),
                },
            ),
        ];
        report.add_menu(menu);
        report.add_menu(MenuReport::skipped(1, "<unnamed>", MenuSkipReason::Unplaceable));

        assert_eq!(report.summary.menus_processed, 1);
        assert_eq!(report.summary.menus_created, 1);
        assert_eq!(report.summary.menus_skipped, 1);
        assert_eq!(report.summary.items_created, 1);
        assert_eq!(report.summary.items_updated, 1);
        assert_eq!(report.summary.items_skipped, 2);
        assert_eq!(report.skipped_count(SkipReason::UnknownParent), 2);
        assert_eq!(report.skipped_count(SkipReason::NoTarget), 0);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_empty_report_is_clean() {
        assert!(ImportReport::new().is_clean());
    }

    #[test]
    fn test_outcome_json_shape() {
        let outcome = ItemOutcome::Skipped {
            reason: SkipReason::UnsupportedTargetKind,
            detail: "category/news".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "skipped");
        assert_eq!(json["reason"], "unsupported_target_kind");

        let json = serde_json::to_value(ItemOutcome::Created { id: ItemId(4) }).unwrap();
        assert_eq!(json["status"], "created");
        assert_eq!(json["id"], 4);
    }
}
