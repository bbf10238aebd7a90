//! Site context used to resolve relative links

use temps_menu_import_types::{ImportResult, MenuImportError};
use url::Url;

/// Characters that must never reach a rendered href
const UNSAFE_URL_CHARS: &[char] = &['"', '\'', '<', '>', '`', '\\'];

/// Facts about the target site the importer needs, passed in explicitly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteContext {
    base_url: Url,
}

impl SiteContext {
    /// Create a context from the site's home URL (http or https)
    pub fn new(base_url: &str) -> ImportResult<Self> {
        let parsed = Url::parse(base_url.trim())
            .map_err(|e| MenuImportError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(MenuImportError::InvalidBaseUrl(format!(
                "{}: must be an http or https URL",
                base_url
            )));
        }

        Ok(Self { base_url: parsed })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for a site-relative path
    ///
    /// The path is appended to the home URL, so sub-directory installs keep
    /// their prefix (`/about` on `http://example.com/blog` is
    /// `http://example.com/blog/about`). Returns `None` when the result is not
    /// a safe URL.
    pub fn home_url(&self, path: &str) -> Option<String> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let joined = format!("{}/{}", base, path.trim().trim_start_matches('/'));
        sanitize_absolute_url(&joined)
    }
}

/// Validate an absolute http(s) URL, returning it unchanged when acceptable
pub fn sanitize_absolute_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty()
        || raw.chars().any(|c| c.is_whitespace() || c.is_control())
        || raw.contains(UNSAFE_URL_CHARS)
    {
        return None;
    }

    match Url::parse(raw) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => {
            Some(raw.to_string())
        }
        _ => None,
    }
}
