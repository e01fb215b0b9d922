use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::{PromptError, Result};
use crate::templates::{
    COMMUNITY_SUMMARY_TMPL, KG_TRIPLET_EXTRACT_TMPL, MAX_KNOWLEDGE_TRIPLETS, TEXT,
};

/// `{name}` with an identifier inside. JSON braces in the templates never
/// match because they are followed by whitespace or a quote.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([a-z_][a-z0-9_]*)\}").expect("placeholder pattern must compile")
});

const TRIPLET_PLACEHOLDERS: &[&str] = &[MAX_KNOWLEDGE_TRIPLETS, TEXT];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    TripletExtraction,
    CommunitySummary,
}

impl Template {
    pub const ALL: [Template; 2] = [Template::TripletExtraction, Template::CommunitySummary];

    pub fn name(self) -> &'static str {
        match self {
            Template::TripletExtraction => "triplet_extraction",
            Template::CommunitySummary => "community_summary",
        }
    }

    /// Raw template text, placeholders unresolved.
    pub fn source(self) -> &'static str {
        match self {
            Template::TripletExtraction => KG_TRIPLET_EXTRACT_TMPL,
            Template::CommunitySummary => COMMUNITY_SUMMARY_TMPL,
        }
    }

    /// Required placeholders, in order of first appearance.
    pub fn placeholders(self) -> &'static [&'static str] {
        match self {
            Template::TripletExtraction => TRIPLET_PLACEHOLDERS,
            Template::CommunitySummary => &[],
        }
    }

    /// Substitute `bindings` into the template.
    ///
    /// Every declared placeholder must be bound; the first one missing is
    /// reported as [`PromptError::MissingBinding`] before anything is
    /// substituted. Bindings the template does not declare are ignored.
    pub fn render(self, bindings: &Bindings) -> Result<String> {
        if self.placeholders().is_empty() {
            if !bindings.is_empty() {
                debug!(
                    template = self.name(),
                    ignored = bindings.len(),
                    "Template has no placeholders, ignoring bindings"
                );
            }
            return Ok(self.source().to_owned());
        }

        if let Some(&missing) = self
            .placeholders()
            .iter()
            .find(|name| !bindings.contains(name))
        {
            return Err(PromptError::MissingBinding {
                template: self,
                placeholder: missing,
            });
        }

        let rendered = substitute(self, bindings);
        debug!(
            template = self.name(),
            bindings = bindings.len(),
            rendered_len = rendered.len(),
            "Rendered prompt"
        );
        Ok(rendered)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Template {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Template::ALL
            .into_iter()
            .find(|t| t.name() == normalized)
            .ok_or_else(|| PromptError::UnknownTemplate(s.to_string()))
    }
}

/// Render `template` with `bindings`. See [`Template::render`].
pub fn render(template: Template, bindings: &Bindings) -> Result<String> {
    template.render(bindings)
}

/// Triplet extraction prompt from typed arguments. Cannot fail since both
/// placeholders are always supplied.
pub fn triplet_extraction_prompt(max_knowledge_triplets: u64, text: &str) -> String {
    let bindings = Bindings::new()
        .with(MAX_KNOWLEDGE_TRIPLETS, max_knowledge_triplets)
        .with(TEXT, text);
    substitute(Template::TripletExtraction, &bindings)
}

/// One pass over the template source. Inserted values are never re-scanned,
/// so a document containing `{text}` or the delimiter line stays inert.
fn substitute(template: Template, bindings: &Bindings) -> String {
    let declared = template.placeholders();
    PLACEHOLDER
        .replace_all(template.source(), |caps: &Captures| {
            let name = &caps[1];
            match bindings.get(name) {
                Some(value) if declared.contains(&name) => value.to_string(),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Placeholder names appearing in `source`, in order, without duplicates.
pub fn scan_placeholders(source: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(source) {
        if let Some(name) = caps.get(1).map(|m| m.as_str()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BindingValue {
    Integer(u64),
    Text(String),
}

impl fmt::Display for BindingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingValue::Integer(n) => write!(f, "{}", n),
            BindingValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for BindingValue {
    fn from(n: u64) -> Self {
        BindingValue::Integer(n)
    }
}

impl From<u32> for BindingValue {
    fn from(n: u32) -> Self {
        BindingValue::Integer(u64::from(n))
    }
}

impl From<usize> for BindingValue {
    fn from(n: usize) -> Self {
        BindingValue::Integer(n as u64)
    }
}

impl From<&str> for BindingValue {
    fn from(s: &str) -> Self {
        BindingValue::Text(s.to_string())
    }
}

impl From<String> for BindingValue {
    fn from(s: String) -> Self {
        BindingValue::Text(s)
    }
}

/// Placeholder name -> value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bindings(BTreeMap<String, BindingValue>);

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<BindingValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the previous value, if any.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<BindingValue>,
    ) -> Option<BindingValue> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&BindingValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BindingValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Bindings
where
    K: Into<String>,
    V: Into<BindingValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bindings = Bindings::new();
        for (name, value) in iter {
            bindings.insert(name, value);
        }
        bindings
    }
}
