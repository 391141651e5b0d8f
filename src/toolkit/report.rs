use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use super::aggregator::{MetricDelta, Percentages, aggregate};
use super::classifier::{TechniquePolicy, classify};
use crate::core::models::{DatasetSnapshot, MetricField, QualityAttribute};


#[derive(Debug, Clone, Serialize)]
pub struct MetricSection {
    pub field: MetricField,
    pub delta: MetricDelta,
    /// `None` when no classified commit had both snapshots.
    pub percentages: Option<Percentages>,
}

impl MetricSection {
    fn new(field: MetricField, delta: MetricDelta) -> Self {
        let percentages = delta.balance.percentages();
        Self {
            field,
            delta,
            percentages,
        }
    }
}


#[derive(Debug, Clone, Serialize)]
pub struct AttributeSection {
    pub attribute: QualityAttribute,
    pub commits: Vec<String>,
    pub metrics: Vec<MetricSection>,
}


#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub dataset: String,
    pub generated_at: DateTime<Utc>,
    pub sections: Vec<AttributeSection>,
}

impl DashboardReport {

    pub fn build(snapshot: &DatasetSnapshot, policy: &TechniquePolicy) -> Self {
        let sections = classify(&snapshot.commits, policy)
            .into_iter()
            .map(|(attribute, commits)| {
                let metrics = attribute
                    .metrics()
                    .iter()
                    .map(|field| MetricSection::new(*field, aggregate(&snapshot.measures, commits.as_slice(), *field)))
                    .collect();
                AttributeSection {
                    attribute,
                    commits,
                    metrics,
                }
            })
            .collect();

        Self {
            dataset: snapshot.dataset.clone(),
            generated_at: Utc::now(),
            sections,
        }
    }


    pub fn section(&self, attribute: QualityAttribute) -> Option<&AttributeSection> {
        self.sections.iter().find(|s| s.attribute == attribute)
    }


    pub fn metric(&self, attribute: QualityAttribute, field: MetricField) -> Option<&MetricSection> {
        self.section(attribute)?
            .metrics
            .iter()
            .find(|m| m.field == field)
    }

    /// Plain-text rendering; `with_transitions` appends each `before -> after` pair.
    pub fn render(&self, with_transitions: bool) -> String {
        Rendering {
            report: self,
            with_transitions,
        }
        .to_string()
    }

    fn write_to(&self, out: &mut fmt::Formatter<'_>, with_transitions: bool) -> fmt::Result {
        writeln!(
            out,
            "Dataset: {} ({})",
            self.dataset,
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;

        for section in &self.sections {
            writeln!(out)?;
            writeln!(out, "== {} ==", section.attribute.title())?;
            writeln!(out, "Classified commits: {}", section.commits.len())?;

            for metric in &section.metrics {
                let abbr = metric.field.abbreviation();
                let balance = &metric.delta.balance;
                writeln!(out)?;
                writeln!(out, "-- {} ({}) --", metric.field.label(), abbr)?;
                writeln!(out, "Total of commits: {}", metric.delta.counted())?;
                writeln!(out, "Commits that increased the {}: {}", abbr, balance.increase)?;
                writeln!(out, "Commits that decreased the {}: {}", abbr, balance.decrease)?;
                writeln!(out, "Commits that maintained the {}: {}", abbr, balance.maintain)?;

                match &metric.percentages {
                    Some(pct) => {
                        writeln!(out, "{:.2}% of worsening", pct.worsening())?;
                        writeln!(out, "{:.2}% of improvement", pct.improvement())?;
                        writeln!(out, "{:.2}% do not impact", pct.unchanged())?;
                    }
                    None => writeln!(out, "no data")?,
                }

                if with_transitions {
                    for transition in &metric.delta.transitions {
                        writeln!(out, "  {}", transition)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for DashboardReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, false)
    }
}

struct Rendering<'a> {
    report: &'a DashboardReport,
    with_transitions: bool,
}

impl fmt::Display for Rendering<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.report.write_to(f, self.with_transitions)
    }
}
