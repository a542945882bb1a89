//! The resource being scaffolded.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{TemplateError, TemplateResult};
use crate::names::NameForms;


/// A resource name paired with the module that owns it.
///
/// Only constructible through [`ResourceSpec::new`], so every instance
/// satisfies the naming rules the renderer and file layout depend on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceSpec {
    raw_name: String,
    owner_module: String,
}

impl ResourceSpec {
    /// Validate and build a resource spec.
    pub fn new(
        raw_name: impl Into<String>,
        owner_module: impl Into<String>,
    ) -> TemplateResult<Self> {
        let raw_name = raw_name.into();
        let owner_module = owner_module.into();

        validate_resource_name(&raw_name)?;
        validate_module_name(&owner_module)?;

        Ok(Self {
            raw_name,
            owner_module,
        })
    }

    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    pub fn owner_module(&self) -> &str {
        &self.owner_module
    }

    /// Casing variants of the resource name.
    pub fn forms(&self) -> NameForms {
        NameForms::derive(&self.raw_name)
    }
}

/// Check a resource name against the identifier rules.
pub fn validate_resource_name(name: &str) -> TemplateResult<()> {
    if name.is_empty() {
        return Err(TemplateError::InvalidResourceName {
            name: name.to_string(),
            reason: "name must not be empty".to_string(),
        });
    }

    if !resource_pattern().is_match(name) {
        let reason = if name.starts_with(|c: char| c.is_ascii_lowercase()) {
            "name must start with an uppercase letter (e.g. 'Publisher')"
        } else {
            "name may only contain ASCII letters and digits"
        };
        return Err(TemplateError::InvalidResourceName {
            name: name.to_string(),
            reason: reason.to_string(),
        });
    }

    Ok(())
}

/// Check a module name; it becomes a directory under the source root.
pub fn validate_module_name(name: &str) -> TemplateResult<()> {
    if name.is_empty() {
        return Err(TemplateError::InvalidModuleName {
            name: name.to_string(),
            reason: "name must not be empty".to_string(),
        });
    }

    if !module_pattern().is_match(name) {
        return Err(TemplateError::InvalidModuleName {
            name: name.to_string(),
            reason: "name must start with a letter and contain only letters, digits, '-' or '_'"
                .to_string(),
        });
    }

    Ok(())
}

fn resource_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").expect("Invalid regex"))
}

fn module_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("Invalid regex"))
}
