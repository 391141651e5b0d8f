use tracing::{debug, warn};

use super::numbered_lines;
use crate::core::error::ParseError;
use crate::core::models::{CommitMeasures, Metrics, SnapshotSide};


const FIELD_SEPARATOR: char = ';';

/// First field of the header row.
pub const HEADER_SENTINEL: &str = "isAfterCommit";

const FIELD_COUNT: usize = 6;


#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeasuresOptions {
    /// Fail on a second snapshot for the same commit and side instead of
    /// letting the later line win.
    pub reject_duplicates: bool,
}

impl MeasuresOptions {
    pub fn strict() -> Self {
        Self {
            reject_duplicates: true,
        }
    }
}


/// Parses `isAfterCommit;commitId;comment_lines;complexity;lines;statements` rows.
///
/// Any malformed row fails the whole parse; no partial result is returned.
pub fn parse_measures(text: &str, options: MeasuresOptions) -> Result<CommitMeasures, ParseError> {
    let mut measures = CommitMeasures::new();

    for (line_no, line) in numbered_lines(text) {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
        if fields[0] == HEADER_SENTINEL {
            continue;
        }
        if fields.len() < FIELD_COUNT {
            return Err(ParseError::MissingFields {
                line: line_no,
                expected: FIELD_COUNT,
                found: fields.len(),
            });
        }

        let side = match fields[0] {
            "true" => SnapshotSide::After,
            "false" => SnapshotSide::Before,
            other => {
                return Err(ParseError::InvalidFlag {
                    line: line_no,
                    value: other.to_string(),
                });
            }
        };
        let commit_id = fields[1];
        if commit_id.is_empty() {
            return Err(ParseError::MissingCommitId { line: line_no });
        }
        let metrics = Metrics::new(
            parse_count(line_no, "comment_lines", fields[2])?,
            parse_count(line_no, "complexity", fields[3])?,
            parse_count(line_no, "lines", fields[4])?,
            parse_count(line_no, "statements", fields[5])?,
        );

        let slot = measures.entry(commit_id.to_string()).or_default().slot_mut(side);
        if slot.is_some() {
            let side_name: &'static str = side.into();
            if options.reject_duplicates {
                return Err(ParseError::DuplicateSnapshot {
                    line: line_no,
                    commit_id: commit_id.to_string(),
                    side: side_name,
                });
            }
            warn!(
                "Line {} overwrites the `{}` snapshot of commit {}",
                line_no, side_name, commit_id
            );
        }
        *slot = Some(metrics);
    }

    debug!("Parsed measures for {} commits", measures.len());
    Ok(measures)
}

fn parse_count(line: usize, field: &'static str, raw: &str) -> Result<u64, ParseError> {
    raw.parse::<u64>().map_err(|_| ParseError::InvalidNumber {
        line,
        field,
        value: raw.to_string(),
    })
}
