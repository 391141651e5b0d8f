
pub mod aggregator;
pub mod classifier;
pub mod report;

pub use aggregator::{Balance, MetricDelta, PercentShares, Percentages, aggregate};
pub use classifier::{TechniquePolicy, classify, classify_attribute};
pub use report::{AttributeSection, DashboardReport, MetricSection};
