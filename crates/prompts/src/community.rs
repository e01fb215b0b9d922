use serde::{Deserialize, Serialize};
use std::fmt;

use crate::templates::COMMUNITY_SUMMARY_TMPL;

/// One knowledge-graph relationship as the community summary prompt expects
/// it: `source->target->relation->description`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipLine {
    pub source: String,
    pub target: String,
    pub relation: String,
    pub description: String,
}

impl RelationshipLine {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        relation: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relation: relation.into(),
            description: description.into(),
        }
    }
}

impl fmt::Display for RelationshipLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}->{}->{}->{}",
            single_line(&self.source),
            single_line(&self.target),
            single_line(&self.relation),
            single_line(&self.description)
        )
    }
}

/// System and user message texts for a chat-style model call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Community summary instructions as the system message, the relationships
/// (one per line) as the user message.
pub fn community_summary_prompt(relationships: &[RelationshipLine]) -> PromptPair {
    let user = relationships
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join("\n");

    PromptPair {
        system: COMMUNITY_SUMMARY_TMPL.to_owned(),
        user,
    }
}

// A field spanning lines would read as several relationships.
fn single_line(field: &str) -> String {
    field.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_line_format() {
        let line = RelationshipLine::new(
            "Albert Einstein",
            "Theory of Relativity",
            "developed",
            "Albert Einstein is the developer of the theory of relativity.",
        );
        assert_eq!(
            line.to_string(),
            "Albert Einstein->Theory of Relativity->developed->Albert Einstein is the developer of the theory of relativity."
        );
    }

    #[test]
    fn test_multiline_description_collapsed() {
        let line = RelationshipLine::new("A", "B", "knows", "met in\n1921,\n  in Stockholm");
        assert_eq!(line.to_string(), "A->B->knows->met in 1921, in Stockholm");
    }

    #[test]
    fn test_prompt_pair() {
        let relationships = vec![
            RelationshipLine::new("Marie Curie", "Radium", "discovered", "She isolated radium in 1902."),
            RelationshipLine::new("Marie Curie", "Pierre Curie", "married", "They married in 1895."),
        ];
        let pair = community_summary_prompt(&relationships);

        assert_eq!(pair.system, COMMUNITY_SUMMARY_TMPL);
        assert_eq!(pair.user.lines().count(), 2);
        assert!(pair.user.starts_with("Marie Curie->Radium->discovered->"));
    }

    #[test]
    fn test_empty_relationships() {
        let pair = community_summary_prompt(&[]);
        assert_eq!(pair.system, COMMUNITY_SUMMARY_TMPL);
        assert!(pair.user.is_empty());
    }

    #[test]
    fn test_relationship_from_json() {
        let lines: Vec<RelationshipLine> = serde_json::from_str(
            r#"[{"source": "A", "target": "B", "relation": "r", "description": "d"}]"#,
        )
        .unwrap();
        assert_eq!(lines[0].to_string(), "A->B->r->d");
    }
}
