use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};


pub type CommitTechniques = BTreeMap<String, BTreeSet<String>>;


pub type CommitMeasures = BTreeMap<String, CommitMeasure>;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Metrics {
    pub comment_lines: u64,
    pub complexity: u64,
    pub lines: u64,
    pub statements: u64,
}

impl Metrics {
    pub fn new(comment_lines: u64, complexity: u64, lines: u64, statements: u64) -> Self {
        Self {
            comment_lines,
            complexity,
            lines,
            statements,
        }
    }
}


/// Snapshots taken around one commit. Either side may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMeasure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Metrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Metrics>,
}

impl CommitMeasure {
    pub fn new(before: Option<Metrics>, after: Option<Metrics>) -> Self {
        Self { before, after }
    }

    /// Both sides, or `None` when the measure cannot be compared.
    pub fn pair(&self) -> Option<(&Metrics, &Metrics)> {
        match (&self.before, &self.after) {
            (Some(before), Some(after)) => Some((before, after)),
            _ => None,
        }
    }

    pub(crate) fn slot_mut(&mut self, side: SnapshotSide) -> &mut Option<Metrics> {
        match side {
            SnapshotSide::Before => &mut self.before,
            SnapshotSide::After => &mut self.after,
        }
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum SnapshotSide {
    #[strum(serialize = "before")]
    Before,
    #[strum(serialize = "after")]
    After,
}


#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MetricField {
    CommentLines,
    Complexity,
    Lines,
    Statements,
}

impl MetricField {
    #[must_use]
    pub fn value(&self, metrics: &Metrics) -> u64 {
        match self {
            Self::CommentLines => metrics.comment_lines,
            Self::Complexity => metrics.complexity,
            Self::Lines => metrics.lines,
            Self::Statements => metrics.statements,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::CommentLines => "Lines with comments",
            Self::Complexity => "Cyclomatic Complexity",
            Self::Lines => "Lines",
            Self::Statements => "Statements",
        }
    }

    #[must_use]
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::CommentLines => "CLOC",
            Self::Complexity => "CC",
            Self::Lines => "LOC",
            Self::Statements => "STMTC",
        }
    }
}


/// Internal quality attribute a group of refactoring techniques is believed to affect.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum QualityAttribute {
    Complexity,
    Size,
}

impl QualityAttribute {
    /// Metrics reported for commits classified under this attribute.
    #[must_use]
    pub fn metrics(&self) -> &'static [MetricField] {
        match self {
            Self::Complexity => &[MetricField::Complexity],
            Self::Size => &[
                MetricField::Lines,
                MetricField::CommentLines,
                MetricField::Statements,
            ],
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Complexity => "Complexity metrics",
            Self::Size => "Size metrics",
        }
    }
}


#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSnapshot {
    pub dataset: String,
    pub commits: CommitTechniques,
    pub measures: CommitMeasures,
}

impl DatasetSnapshot {
    pub fn new(dataset: impl Into<String>, commits: CommitTechniques, measures: CommitMeasures) -> Self {
        Self {
            dataset: dataset.into(),
            commits,
            measures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_pair_requires_both_sides() {
        let m = Metrics::new(1, 2, 3, 4);
        assert!(CommitMeasure::new(Some(m), None).pair().is_none());
        assert!(CommitMeasure::new(None, Some(m)).pair().is_none());
        assert!(CommitMeasure::default().pair().is_none());
        assert_eq!(CommitMeasure::new(Some(m), Some(m)).pair(), Some((&m, &m)));
    }

    #[test]
    fn test_metric_field_selects_value() {
        let m = Metrics::new(2, 5, 40, 10);
        assert_eq!(MetricField::CommentLines.value(&m), 2);
        assert_eq!(MetricField::Complexity.value(&m), 5);
        assert_eq!(MetricField::Lines.value(&m), 40);
        assert_eq!(MetricField::Statements.value(&m), 10);
    }

    #[test]
    fn test_enum_names() {
        assert_eq!(QualityAttribute::from_str("size").unwrap(), QualityAttribute::Size);
        assert_eq!(MetricField::from_str("comment_lines").unwrap(), MetricField::CommentLines);
        let name: &'static str = QualityAttribute::Complexity.into();
        assert_eq!(name, "complexity");
    }

    #[test]
    fn test_measure_json_omits_missing_side() {
        let measure = CommitMeasure::new(Some(Metrics::new(2, 5, 40, 10)), None);
        let json = serde_json::to_value(measure).unwrap();
        assert_eq!(json["before"]["complexity"], 5);
        assert!(json.get("after").is_none());

        let back: CommitMeasure = serde_json::from_value(json).unwrap();
        assert_eq!(back, measure);
    }
}
