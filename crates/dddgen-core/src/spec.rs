use serde::Serialize;

use crate::error::NameError;
use crate::naming::{self, NormalizedName};

/// Everything a single generation run knows about the module being scaffolded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSpec {
    /// Lowercased module identifier, e.g. `order`.
    pub name: String,
    /// Human-readable label used in generated comments.
    pub display_name: String,
    /// Import path of the hosting project, e.g. `github.com/acme/shop`.
    pub module_path: String,
    pub names: NormalizedName,
}

impl ModuleSpec {
    pub fn new(raw_name: &str, display_name: Option<&str>, module_path: impl Into<String>) -> Self {
        Self {
            name: raw_name.to_lowercase(),
            display_name: display_name.unwrap_or(raw_name).to_string(),
            module_path: module_path.into(),
            names: NormalizedName::from_raw(raw_name),
        }
    }

    /// Like [`ModuleSpec::new`], but rejects names that would escape the
    /// target directories or collapse to empty identifiers.
    pub fn try_new(
        raw_name: &str,
        display_name: Option<&str>,
        module_path: impl Into<String>,
    ) -> Result<Self, NameError> {
        validate_name(raw_name)?;
        Ok(Self::new(raw_name, display_name, module_path))
    }

    /// The flat record templates are rendered against.
    pub fn context(&self) -> TemplateContext<'_> {
        TemplateContext {
            name: &self.name,
            display_name: &self.display_name,
            module_path: &self.module_path,
            pascal_name: &self.names.pascal_case,
            camel_name: &self.names.camel_case,
            snake_name: &self.names.snake_case,
            kebab_name: &self.names.kebab_case,
            plural_name: &self.names.plural,
        }
    }
}

/// Accept only ASCII letters, digits, `_` and `-`, with at least one word.
pub fn validate_name(raw_name: &str) -> Result<(), NameError> {
    if raw_name.is_empty() {
        return Err(NameError::Empty);
    }
    if let Some(found) = raw_name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(NameError::InvalidChar {
            name: raw_name.to_string(),
            found,
        });
    }
    if naming::split_words(raw_name).is_empty() {
        return Err(NameError::NoWords {
            name: raw_name.to_string(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TemplateContext<'a> {
    pub name: &'a str,
    pub display_name: &'a str,
    pub module_path: &'a str,
    pub pascal_name: &'a str,
    pub camel_name: &'a str,
    pub snake_name: &'a str,
    pub kebab_name: &'a str,
    pub plural_name: &'a str,
}
