//! Menu import services

mod assembler;
mod builder;
mod locator;
mod orchestrator;
mod resolver;

pub use assembler::{MenuItemRecord, MenuTreeAssembler};
pub use builder::{ItemBuilder, ItemDraft};
pub use locator::{LocatedMenu, MenuLocator};
pub use orchestrator::MenuImporter;
pub use resolver::ReferenceResolver;

use temps_menu_import_types::{MenuSkipReason, SkipReason, StoreError};
use thiserror::Error;

/// Why an item's target could not be resolved
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Item has no page, taxonomy/term or url target")]
    NoTarget,

    #[error("Page '{path}' not found")]
    MissingReference { path: String },

    #[error("Taxonomy term targets are not supported yet ({taxonomy}/{term})")]
    UnsupportedTargetKind { taxonomy: String, term: String },

    #[error("Creating missing page '{path}' is not supported")]
    UnsupportedCreate { path: String },

    #[error("Invalid url: {url}")]
    InvalidUrl { url: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ResolveError {
    pub fn reason(&self) -> SkipReason {
        match self {
            ResolveError::NoTarget => SkipReason::NoTarget,
            ResolveError::MissingReference { .. } => SkipReason::MissingReference,
            ResolveError::UnsupportedTargetKind { .. } => SkipReason::UnsupportedTargetKind,
            ResolveError::UnsupportedCreate { .. } => SkipReason::UnsupportedCreate,
            ResolveError::InvalidUrl { .. } => SkipReason::InvalidUrl,
            ResolveError::Store(_) => SkipReason::StoreError,
        }
    }
}

/// Why a single item was not persisted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssembleError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Title '{title}' produces an empty slug")]
    EmptySlug { title: String },

    #[error("Parent '{parent}' was not created earlier in this menu")]
    UnknownParent { parent: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AssembleError {
    pub fn reason(&self) -> SkipReason {
        match self {
            AssembleError::Resolve(e) => e.reason(),
            AssembleError::EmptySlug { .. } => SkipReason::EmptySlug,
            AssembleError::UnknownParent { .. } => SkipReason::UnknownParent,
            AssembleError::Store(_) => SkipReason::StoreError,
        }
    }

    /// Store failure that must abort the run, if this is one
    pub fn fatal_store_error(&self) -> Option<&StoreError> {
        match self {
            AssembleError::Store(e) | AssembleError::Resolve(ResolveError::Store(e))
                if e.is_fatal() =>
            {
                Some(e)
            }
            _ => None,
        }
    }
}

/// Why a menu definition could not be placed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    #[error("Menu has no assigned location and no name")]
    Unplaceable,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LocateError {
    pub fn reason(&self) -> MenuSkipReason {
        match self {
            LocateError::Unplaceable => MenuSkipReason::Unplaceable,
            LocateError::Store(_) => MenuSkipReason::StoreError,
        }
    }

    /// Store failure that must abort the run, if this is one
    pub fn fatal_store_error(&self) -> Option<&StoreError> {
        match self {
            LocateError::Store(e) if e.is_fatal() => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_error_reasons() {
        assert_eq!(ResolveError::NoTarget.reason(), SkipReason::NoTarget);
        assert_eq!(
            ResolveError::UnsupportedCreate {
                path: "about".to_string()
            }
            .reason(),
            SkipReason::UnsupportedCreate
        );
        assert_eq!(
            AssembleError::from(ResolveError::InvalidUrl {
                url: "httpx".to_string()
            })
            .reason(),
            SkipReason::InvalidUrl
        );
    }

    #[test]
    fn test_only_unavailable_store_errors_are_fatal() {
        let rejected = AssembleError::Store(StoreError::Rejected("nope".to_string()));
        assert!(rejected.fatal_store_error().is_none());

        let down = AssembleError::Resolve(ResolveError::Store(StoreError::Unavailable(
            "timeout".to_string(),
        )));
        assert_eq!(
            down.fatal_store_error(),
            Some(&StoreError::Unavailable("timeout".to_string()))
        );
    }
}
