//! Conflict and missing-reference policies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a policy name is not recognised
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} '{value}', expected one of: {expected}")]
pub struct ParsePolicyError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// How existing menus and items are treated on re-import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Matching menus and items are overwritten
    Update,
    /// Matching items are left untouched
    Skip,
    /// Every item is created, even when a same-slug item exists
    #[default]
    Append,
}

impl ImportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportMode::Update => "update",
            ImportMode::Skip => "skip",
            ImportMode::Append => "append",
        }
    }
}

impl FromStr for ImportMode {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "update" => Ok(ImportMode::Update),
            "skip" => Ok(ImportMode::Skip),
            "append" => Ok(ImportMode::Append),
            _ => Err(ParsePolicyError {
                kind: "mode",
                value: s.to_string(),
                expected: "update, skip, append",
            }),
        }
    }
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What to do when a page reference cannot be resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
    /// Create the missing object (not supported for pages)
    Create,
    /// Drop the item
    #[default]
    Skip,
    /// Point the item at the configured default page instead
    Default,
}

impl MissingPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissingPolicy::Create => "create",
            MissingPolicy::Skip => "skip",
            MissingPolicy::Default => "default",
        }
    }
}

impl FromStr for MissingPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "create" => Ok(MissingPolicy::Create),
            "skip" => Ok(MissingPolicy::Skip),
            "default" => Ok(MissingPolicy::Default),
            _ => Err(ParsePolicyError {
                kind: "missing policy",
                value: s.to_string(),
                expected: "create, skip, default",
            }),
        }
    }
}

impl fmt::Display for MissingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options for one import run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOptions {
    pub mode: ImportMode,
    pub missing: MissingPolicy,
    /// Page path used by `MissingPolicy::Default`
    pub default_path: Option<String>,
}

impl ImportOptions {
    pub fn new(mode: ImportMode, missing: MissingPolicy, default_path: Option<String>) -> Self {
        Self {
            mode,
            missing,
            default_path: default_path.filter(|p| !p.trim().is_empty()),
        }
    }
}
