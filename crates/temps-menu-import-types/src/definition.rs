//! Parsed menu definitions
//!
//! Immutable views of the import document. A document is either a single menu
//! object or an array of them:
//!
//! ```json
//! [
//!   {
//!     "location": "primary",
//!     "name": "Main Menu",
//!     "items": [
//!       { "slug": "about", "title": "About", "page": "about" },
//!       { "slug": "team", "parent": "about", "url": "/about/team" }
//!     ]
//!   }
//! ]
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{ImportResult, MenuImportError};

/// One menu container and the items to place in it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDefinition {
    /// Theme location the menu should be assigned to
    #[serde(default, rename = "location", deserialize_with = "non_empty")]
    pub location_key: Option<String>,
    /// Menu name, used for lookup and creation
    #[serde(default, deserialize_with = "non_empty")]
    pub name: Option<String>,
    /// Items in declaration order; parents must precede their children
    #[serde(default, deserialize_with = "items_or_empty")]
    pub items: Vec<ItemDefinition>,
}

impl MenuDefinition {
    /// A menu needs a location or a name to be placed anywhere
    pub fn is_placeable(&self) -> bool {
        self.location_key.is_some() || self.name.is_some()
    }

    /// Label used in logs and reports
    pub fn label(&self) -> String {
        match (&self.name, &self.location_key) {
            (Some(name), _) => name.clone(),
            (None, Some(location)) => format!("@{}", location),
            (None, None) => "<unnamed>".to_string(),
        }
    }
}

/// One menu item as declared in the document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDefinition {
    #[serde(default, deserialize_with = "non_empty")]
    pub slug: Option<String>,
    #[serde(default, rename = "parent", deserialize_with = "non_empty")]
    pub parent_slug: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub title: Option<String>,
    #[serde(default, rename = "page", deserialize_with = "non_empty")]
    pub page_ref: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub taxonomy: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub term: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub url: Option<String>,
}

/// The symbolic target an item points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetReference<'a> {
    Page(&'a str),
    Term { taxonomy: &'a str, term: &'a str },
    Url(&'a str),
    None,
}

impl ItemDefinition {
    /// Target kind, by precedence: page, then taxonomy+term, then url
    pub fn target(&self) -> TargetReference<'_> {
        if let Some(page) = &self.page_ref {
            return TargetReference::Page(page);
        }
        if let (Some(taxonomy), Some(term)) = (&self.taxonomy, &self.term) {
            return TargetReference::Term { taxonomy, term };
        }
        match &self.url {
            Some(url) => TargetReference::Url(url),
            None => TargetReference::None,
        }
    }
}

/// Parse an import document into its menu definitions
pub fn parse_document(text: &str) -> ImportResult<Vec<MenuDefinition>> {
    let value: Value = serde_json::from_str(text).map_err(|e| MenuImportError::MalformedJson {
        path: ".".to_string(),
        message: e.to_string(),
    })?;

    match value {
        Value::Array(entries) => entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                serde_path_to_error::deserialize(entry).map_err(|e| {
                    let inner = e.path().to_string();
                    let path = if inner == "." {
                        format!("[{}]", index)
                    } else {
                        format!("[{}].{}", index, inner)
                    };
                    MenuImportError::MalformedJson {
                        path,
                        message: e.into_inner().to_string(),
                    }
                })
            })
            .collect(),
        Value::Object(_) => Ok(vec![serde_path_to_error::deserialize(&value)?]),
        other => Err(MenuImportError::MalformedJson {
            path: ".".to_string(),
            message: format!(
                "expected a menu object or an array of menus, found {}",
                json_kind(&other)
            ),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Trimmed string; blank and `null` read as absent
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

fn items_or_empty<'de, D>(deserializer: D) -> Result<Vec<ItemDefinition>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ItemDefinition>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_menu_object() {
        let menus = parse_document(
            r#"{ "name": "Main", "items": [ { "title": "Home", "url": "/" } ] }"#,
        )
        .unwrap();

        assert_eq!(menus.len(), 1);
        assert_eq!(menus[0].name.as_deref(), Some("Main"));
        assert_eq!(menus[0].items.len(), 1);
        assert_eq!(menus[0].items[0].url.as_deref(), Some("/"));
    }

    #[test]
    fn test_array_of_menus_keeps_order() {
        let menus = parse_document(
            r#"[ { "name": "First" }, { "location": "footer" }, { "name": "Third" } ]"#,
        )
        .unwrap();

        assert_eq!(menus.len(), 3);
        assert_eq!(menus[0].label(), "First");
        assert_eq!(menus[1].label(), "@footer");
        assert_eq!(menus[2].label(), "Third");
    }

    #[test]
    fn test_json_field_names() {
        let menus = parse_document(
            r#"{ "location": "primary", "items": [ { "slug": "b", "parent": "a", "page": "about" } ] }"#,
        )
        .unwrap();

        let item = &menus[0].items[0];
        assert_eq!(menus[0].location_key.as_deref(), Some("primary"));
        assert_eq!(item.parent_slug.as_deref(), Some("a"));
        assert_eq!(item.page_ref.as_deref(), Some("about"));
    }

    #[test]
    fn test_empty_and_null_fields_are_absent() {
        let menus = parse_document(
            r#"{ "name": "  ", "items": [ { "title": "", "url": null } ] }"#,
        )
        .unwrap();

        assert!(menus[0].name.is_none());
        assert!(!menus[0].is_placeable());
        assert!(menus[0].items[0].title.is_none());
        assert_eq!(menus[0].items[0].target(), TargetReference::None);
    }

    #[test]
    fn test_values_are_trimmed() {
        let menus = parse_document(
            r#"{ "name": " Main ", "items": [
                { "slug": " about ", "url": "/about" },
                { "slug": "team", "parent": "about ", "url": " /team " }
            ] }"#,
        )
        .unwrap();

        assert_eq!(menus[0].name.as_deref(), Some("Main"));
        assert_eq!(menus[0].items[0].slug.as_deref(), Some("about"));
        assert_eq!(menus[0].items[1].parent_slug, menus[0].items[0].slug);
        assert_eq!(menus[0].items[1].target(), TargetReference::Url("/team"));
    }

    #[test]
    fn test_missing_and_null_items() {
        let menus = parse_document(r#"[ { "name": "A" }, { "name": "B", "items": null } ]"#)
            .unwrap();
        assert!(menus[0].items.is_empty());
        assert!(menus[1].items.is_empty());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let menus = parse_document(r#"{ "name": "A", "extra": [1, 2, 3] }"#).unwrap();
        assert_eq!(menus[0].name.as_deref(), Some("A"));
    }

    #[test]
    fn test_syntax_error_is_malformed() {
        let err = parse_document(r#"{ "name": "#).unwrap_err();
        assert!(matches!(err, MenuImportError::MalformedJson { .. }));
    }

    #[test]
    fn test_scalar_document_is_malformed() {
        let err = parse_document("42").unwrap_err();
        match err {
            MenuImportError::MalformedJson { message, .. } => {
                assert!(message.contains("a number"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_wrong_field_type_reports_path() {
        let err = parse_document(r#"[ { "name": "A" }, { "name": "B", "items": [ {}, { "title": 5 } ] } ]"#)
            .unwrap_err();
        match err {
            MenuImportError::MalformedJson { path, .. } => {
                assert_eq!(path, "[1].items[1].title");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_target_precedence() {
        let item = ItemDefinition {
            page_ref: Some("about".to_string()),
            taxonomy: Some("category".to_string()),
            term: Some("news".to_string()),
            url: Some("/x".to_string()),
            ..Default::default()
        };
        assert_eq!(item.target(), TargetReference::Page("about"));

        let item = ItemDefinition {
            taxonomy: Some("category".to_string()),
            term: Some("news".to_string()),
            url: Some("/x".to_string()),
            ..Default::default()
        };
        assert_eq!(
            item.target(),
            TargetReference::Term {
                taxonomy: "category",
                term: "news"
            }
        );

        // taxonomy without a term is not a term target
        let item = ItemDefinition {
            taxonomy: Some("category".to_string()),
            url: Some("/x".to_string()),
            ..Default::default()
        };
        assert_eq!(item.target(), TargetReference::Url("/x"));
    }
}
