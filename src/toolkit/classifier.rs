use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use strum::IntoEnumIterator;

use crate::core::models::{CommitTechniques, QualityAttribute};


/// Which refactoring techniques are considered relevant to each quality attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TechniquePolicy {
    techniques: BTreeMap<QualityAttribute, BTreeSet<String>>,
}

impl TechniquePolicy {
    pub fn new() -> Self {
        Self {
            techniques: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with<I, S>(mut self, attribute: QualityAttribute, techniques: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.techniques
            .entry(attribute)
            .or_default()
            .extend(techniques.into_iter().map(Into::into));
        self
    }

    pub fn techniques(&self, attribute: QualityAttribute) -> Vec<&str> {
        self.techniques
            .get(&attribute)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn is_relevant(&self, attribute: QualityAttribute, technique: &str) -> bool {
        self.techniques
            .get(&attribute)
            .is_some_and(|set| set.contains(technique))
    }

    fn intersects(&self, attribute: QualityAttribute, applied: &BTreeSet<String>) -> bool {
        match self.techniques.get(&attribute) {
            Some(relevant) => !relevant.is_disjoint(applied),
            None => false,
        }
    }
}

impl Default for TechniquePolicy {
    fn default() -> Self {
        Self::new()
            .with(QualityAttribute::Complexity, ["MOVE", "MOVE_RENAME"])
            .with(
                QualityAttribute::Size,
                ["MOVE_RENAME", "EXTRACT", "INLINE", "RENAME"],
            )
    }
}


/// Commits whose applied techniques share at least one label with the attribute's policy.
pub fn classify_attribute(
    commits: &CommitTechniques,
    policy: &TechniquePolicy,
    attribute: QualityAttribute,
) -> Vec<String> {
    commits
        .iter()
        .filter(|(_, applied)| policy.intersects(attribute, applied))
        .map(|(commit_id, _)| commit_id.clone())
        .collect()
}


pub fn classify(
    commits: &CommitTechniques,
    policy: &TechniquePolicy,
) -> BTreeMap<QualityAttribute, Vec<String>> {
    QualityAttribute::iter()
        .map(|attribute| (attribute, classify_attribute(commits, policy, attribute)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn commits(entries: &[(&str, &[&str])]) -> CommitTechniques {
        entries
            .iter()
            .map(|(id, techniques)| {
                (
                    id.to_string(),
                    techniques.iter().map(|t| t.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_default_policy() {
        let policy = TechniquePolicy::default();
        assert_eq!(policy.techniques(QualityAttribute::Complexity), vec!["MOVE", "MOVE_RENAME"]);
        assert_eq!(
            policy.techniques(QualityAttribute::Size),
            vec!["EXTRACT", "INLINE", "MOVE_RENAME", "RENAME"]
        );
    }

    #[test]
    fn test_classify_complexity() {
        let commits = commits(&[("c1", &["MOVE", "RENAME"]), ("c2", &["EXTRACT"])]);
        let policy = TechniquePolicy::new().with(QualityAttribute::Complexity, ["MOVE", "MOVE_RENAME"]);
        assert_eq!(
            classify_attribute(&commits, &policy, QualityAttribute::Complexity),
            vec!["c1".to_string()]
        );
    }

    #[test]
    fn test_commit_can_join_several_attributes() {
        let commits = commits(&[("c1", &["MOVE_RENAME"]), ("c2", &["INLINE"]), ("c3", &["PULL_UP"])]);
        let groups = classify(&commits, &TechniquePolicy::default());
        assert_eq!(groups[&QualityAttribute::Complexity], vec!["c1"]);
        assert_eq!(groups[&QualityAttribute::Size], vec!["c1", "c2"]);
    }

    #[test]
    fn test_empty_technique_set_joins_nothing() {
        let commits = commits(&[("c1", &[])]);
        let groups = classify(&commits, &TechniquePolicy::default());
        assert!(groups.values().all(Vec::is_empty));
    }

    #[test]
    fn test_attribute_missing_from_policy() {
        let commits = commits(&[("c1", &["MOVE"])]);
        let policy = TechniquePolicy::new().with(QualityAttribute::Complexity, ["MOVE"]);
        let groups = classify(&commits, &policy);
        assert_eq!(groups.len(), 2);
        assert!(groups[&QualityAttribute::Size].is_empty());
    }

    proptest! {
        #[test]
        fn prop_membership_iff_intersection(
            raw in prop::collection::btree_map(
                "c[0-9]{1,2}",
                prop::collection::btree_set(prop::sample::select(vec!["MOVE", "MOVE_RENAME", "EXTRACT", "INLINE", "RENAME", "PULL_UP"]), 0..4),
                0..20,
            )
        ) {
            let commits: CommitTechniques = raw
                .into_iter()
                .map(|(id, set)| (id, set.into_iter().map(String::from).collect()))
                .collect();
            let policy = TechniquePolicy::default();
            let groups = classify(&commits, &policy);

            for attribute in QualityAttribute::iter() {
                for (id, applied) in &commits {
                    let expected = applied.iter().any(|t| policy.is_relevant(attribute, t));
                    prop_assert_eq!(groups[&attribute].contains(id), expected);
                }
            }
        }
    }
}
