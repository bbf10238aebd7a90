//! Reference resolver
//!
//! Maps an item's symbolic target (page path, taxonomy term, url) to a concrete
//! object or absolute URL, applying the missing-reference policy for pages.

use temps_menu_import_types::{
    ContentObject, ContentStore, ImportOptions, ItemDefinition, MissingPolicy, ResolvedTarget,
    TargetReference,
};
use tracing::{debug, warn};

use super::ResolveError;
use crate::site::{sanitize_absolute_url, SiteContext};

pub struct ReferenceResolver<'a> {
    site: &'a SiteContext,
    options: &'a ImportOptions,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(site: &'a SiteContext, options: &'a ImportOptions) -> Self {
        Self { site, options }
    }

    pub fn resolve(
        &self,
        store: &dyn ContentStore,
        item: &ItemDefinition,
    ) -> Result<ResolvedTarget, ResolveError> {
        match item.target() {
            TargetReference::Page(path) => self.resolve_page(store, path),
            // TODO: resolve terms once ContentStore exposes a taxonomy term lookup
            TargetReference::Term { taxonomy, term } => {
                warn!(
                    "Taxonomy term targets are not supported yet, skipping {}/{}",
                    taxonomy, term
                );
                Err(ResolveError::UnsupportedTargetKind {
                    taxonomy: taxonomy.to_string(),
                    term: term.to_string(),
                })
            }
            TargetReference::Url(url) => self.resolve_url(url),
            TargetReference::None => Err(ResolveError::NoTarget),
        }
    }

    fn resolve_page(
        &self,
        store: &dyn ContentStore,
        path: &str,
    ) -> Result<ResolvedTarget, ResolveError> {
        if let Some(object) = store.find_by_path(path)? {
            return Ok(page_target(object));
        }

        debug!(
            "Page '{}' not found, applying missing policy '{}'",
            path, self.options.missing
        );

        match self.options.missing {
            MissingPolicy::Create => Err(ResolveError::UnsupportedCreate {
                path: path.to_string(),
            }),
            MissingPolicy::Skip => Err(ResolveError::MissingReference {
                path: path.to_string(),
            }),
            MissingPolicy::Default => {
                let Some(default_path) = self.options.default_path.as_deref() else {
                    return Err(ResolveError::MissingReference {
                        path: path.to_string(),
                    });
                };

                match store.find_by_path(default_path)? {
                    Some(object) => {
                        debug!("Using default page '{}' for '{}'", default_path, path);
                        Ok(page_target(object))
                    }
                    None => Err(ResolveError::MissingReference {
                        path: format!("{} (default '{}' not found either)", path, default_path),
                    }),
                }
            }
        }
    }

    fn resolve_url(&self, url: &str) -> Result<ResolvedTarget, ResolveError> {
        let raw = url.trim();
        let absolute = if raw.starts_with("http") {
            sanitize_absolute_url(raw)
        } else {
            self.site.home_url(raw)
        };

        match absolute {
            Some(absolute) => Ok(ResolvedTarget::Url {
                url: absolute,
                title: raw.to_string(),
            }),
            None => Err(ResolveError::InvalidUrl {
                url: raw.to_string(),
            }),
        }
    }
}

fn page_target(object: ContentObject) -> ResolvedTarget {
    ResolvedTarget::Page {
        id: object.id,
        title: object.title,
    }
}
