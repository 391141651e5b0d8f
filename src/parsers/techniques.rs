use tracing::{debug, warn};

use super::numbered_lines;
use crate::core::models::CommitTechniques;


const FIELD_SEPARATOR: char = ',';


/// Parses `<commit>,<technique>[,...]` lines into each commit's distinct techniques.
///
/// There is no header row. Lines without both a commit id and a technique are
/// skipped with a warning; extra fields are ignored.
pub fn parse_techniques(text: &str) -> CommitTechniques {
    let mut commits = CommitTechniques::new();
    let mut skipped = 0usize;

    for (line_no, line) in numbered_lines(text) {
        let mut fields = line.split(FIELD_SEPARATOR).map(str::trim);
        let (commit_id, technique) = match (fields.next(), fields.next()) {
            (Some(commit_id), Some(technique)) if !commit_id.is_empty() && !technique.is_empty() => {
                (commit_id, technique)
            }
            _ => {
                warn!("Skipping technique line {}: expected `commit,technique`, got {:?}", line_no, line);
                skipped += 1;
                continue;
            }
        };

        commits
            .entry(commit_id.to_string())
            .or_default()
            .insert(technique.to_string());
    }

    debug!("Parsed techniques for {} commits ({} lines skipped)", commits.len(), skipped);
    commits
}
