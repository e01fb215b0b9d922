//! Error types for the template store.

use crate::store::Template;

/// Alias for Results returning [`PromptError`].
pub type Result<T> = std::result::Result<T, PromptError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromptError {
    /// A required placeholder had no value at render time.
    #[error("missing binding `{placeholder}` for the {template} template")]
    MissingBinding {
        template: Template,
        placeholder: &'static str,
    },

    #[error("unknown template: {0}")]
    UnknownTemplate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binding_display() {
        let err = PromptError::MissingBinding {
            template: Template::TripletExtraction,
            placeholder: "text",
        };
        assert_eq!(
            err.to_string(),
            "missing binding `text` for the triplet_extraction template"
        );
    }

    #[test]
    fn test_unknown_template_display() {
        let err = PromptError::UnknownTemplate("graph_summary".to_string());
        assert!(err.to_string().contains("graph_summary"));
    }
}
