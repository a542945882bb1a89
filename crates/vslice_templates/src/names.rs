//! Casing variants derived from a resource name.
//!
//! The transformation is intentionally naive: names are treated as a single
//! word, so `BookAuthor` becomes `bookAuthor` and `bookauthor` rather than
//! `book-author`. Every artifact derives its identifiers from the same
//! [`NameForms`], which keeps cross-file references in agreement.

use serde::Serialize;

/// The three casing forms used across generated artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameForms {
    /// Type names (`Publisher`).
    pub pascal: String,
    /// Variable names and container keys (`publisher`).
    pub lower_camel: String,
    /// File name stems (`publisher`).
    pub kebab: String,
}

impl NameForms {
    /// Derive every form from a raw resource name.
    pub fn derive(raw: &str) -> Self {
        Self {
            pascal: raw.to_string(),
            lower_camel: lower_first(raw),
            kebab: raw.to_lowercase(),
        }
    }

    /// Exported model constant, e.g. `PublisherModel`.
    pub fn model_export(&self) -> String {
        format!("{}Model", self.pascal)
    }

    /// Container key of the model handle, e.g. `publisherModel`.
    pub fn model_key(&self) -> String {
        format!("{}Model", self.lower_camel)
    }

    /// Container key of the service, e.g. `publisherService`.
    pub fn service_key(&self) -> String {
        format!("{}Service", self.lower_camel)
    }

    /// Container key of the controller, e.g. `publisherController`.
    pub fn controller_key(&self) -> String {
        format!("{}Controller", self.lower_camel)
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publisher_forms() {
        let forms = NameForms::derive("Publisher");
        assert_eq!(forms.pascal, "Publisher");
        assert_eq!(forms.lower_camel, "publisher");
        assert_eq!(forms.kebab, "publisher");
        assert_eq!(forms.model_export(), "PublisherModel");
        assert_eq!(forms.service_key(), "publisherService");
        assert_eq!(forms.controller_key(), "publisherController");
    }

    #[test]
    fn test_candy_forms() {
        let forms = NameForms::derive("Candy");
        assert_eq!(forms.model_export(), "CandyModel");
        assert_eq!(forms.model_key(), "candyModel");
        assert_eq!(forms.service_key(), "candyService");
        assert_eq!(forms.controller_key(), "candyController");
        assert_eq!(forms.kebab, "candy");
    }

    #[test]
    fn test_multi_word_names_are_not_split() {
        let forms = NameForms::derive("BookAuthor");
        assert_eq!(forms.pascal, "BookAuthor");
        assert_eq!(forms.lower_camel, "bookAuthor");
        assert_eq!(forms.kebab, "bookauthor");
    }

    #[test]
    fn test_empty_name() {
        let forms = NameForms::derive("");
        assert_eq!(forms.lower_camel, "");
        assert_eq!(forms.kebab, "");
    }
}
