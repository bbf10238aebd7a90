//! Resolved item targets

use serde::{Deserialize, Serialize};

use crate::store::{ItemTarget, ObjectId};

/// Concrete target an item definition resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedTarget {
    Page { id: ObjectId, title: String },
    Term { id: ObjectId, title: String },
    /// Absolute URL; `title` is the url string as written in the document
    Url { url: String, title: String },
}

impl ResolvedTarget {
    /// Title derived from the target itself
    pub fn title(&self) -> &str {
        match self {
            ResolvedTarget::Page { title, .. }
            | ResolvedTarget::Term { title, .. }
            | ResolvedTarget::Url { title, .. } => title,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ResolvedTarget::Page { .. } => "page",
            ResolvedTarget::Term { .. } => "term",
            ResolvedTarget::Url { .. } => "url",
        }
    }

    /// Persisted form of the target
    pub fn to_item_target(&self) -> ItemTarget {
        match self {
            ResolvedTarget::Page { id, .. } => ItemTarget::Page { object_id: *id },
            ResolvedTarget::Term { id, .. } => ItemTarget::Term { object_id: *id },
            ResolvedTarget::Url { url, .. } => ItemTarget::Url { url: url.clone() },
        }
    }
}
