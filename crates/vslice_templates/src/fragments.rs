//! Registration fragments spliced into the composition-root manifest.

use serde::{Deserialize, Serialize};

use crate::resource::ResourceSpec;

/// Manifest section a fragment belongs to. Each section ends at an anchor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Imports,
    Models,
    Services,
    Controllers,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Imports => "imports",
            Section::Models => "models",
            Section::Services => "services",
            Section::Controllers => "controllers",
        }
    }

    pub fn all() -> [Section; 4] {
        [
            Section::Imports,
            Section::Models,
            Section::Services,
            Section::Controllers,
        ]
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordering of the three import lines within the imports section.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImportOrder {
    /// Model, service implementation, controller.
    #[default]
    Declared,
    /// Controller, service implementation, model.
    Reversed,
}

/// Every manifest line one resource contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationFragments {
    /// Model, service implementation and controller imports, in declared order.
    pub imports: [String; 3],
    pub model: String,
    pub service: String,
    pub controller: String,
}

impl RegistrationFragments {
    pub fn for_resource(resource: &ResourceSpec) -> Self {
        let forms = resource.forms();
        let module = resource.owner_module();
        let p = &forms.pascal;

        Self {
            imports: [
                format!("import {{ {p}Model }} from '@/{module}/models';"),
                format!("import {{ {p}ServiceImpl }} from '@/{module}/services';"),
                format!("import {{ {p}Controller }} from '@/{module}/controllers';"),
            ],
            model: format!("    {}: asValue({}),", forms.model_key(), forms.model_export()),
            service: format!("    {}: asClass({p}ServiceImpl),", forms.service_key()),
            controller: format!("    {}: asClass({p}Controller),", forms.controller_key()),
        }
    }

    /// Fragments in insertion order, imports arranged by `order`.
    pub fn ordered(&self, order: ImportOrder) -> Vec<(Section, &str)> {
        let mut imports: Vec<&str> = self.imports.iter().map(String::as_str).collect();
        if order == ImportOrder::Reversed {
            imports.reverse();
        }

        let mut fragments: Vec<(Section, &str)> =
            imports.into_iter().map(|i| (Section::Imports, i)).collect();
        fragments.push((Section::Models, self.model.as_str()));
        fragments.push((Section::Services, self.service.as_str()));
        fragments.push((Section::Controllers, self.controller.as_str()));
        fragments
    }
}
