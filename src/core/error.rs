

use thiserror::Error;


#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: field `{field}` is not a non-negative integer: {value:?}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: field `isAfterCommit` must be `true` or `false`, got {value:?}")]
    InvalidFlag { line: usize, value: String },

    #[error("line {line}: expected {expected} fields, found {found}")]
    MissingFields {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: field `commitId` is empty")]
    MissingCommitId { line: usize },

    #[error("line {line}: duplicate `{side}` snapshot for commit {commit_id}")]
    DuplicateSnapshot {
        line: usize,
        commit_id: String,
        side: &'static str,
    },
}

impl ParseError {
    /// 1-based line of the source text the error points at.
    pub fn line(&self) -> usize {
        match self {
            Self::InvalidNumber { line, .. }
            | Self::InvalidFlag { line, .. }
            | Self::MissingFields { line, .. }
            | Self::MissingCommitId { line }
            | Self::DuplicateSnapshot { line, .. } => *line,
        }
    }
}


#[derive(Error, Debug)]
pub enum ImpactError {
    #[error("Please, provide a valid source")]
    MissingInput,

    #[error("Invalid dataset name: {0}")]
    InvalidDatasetName(String),

    #[error("Dataset not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ImpactError {
    /// Errors caused by the caller's request rather than by the data behind it.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingInput | Self::InvalidDatasetName(_))
    }
}

impl From<config::ConfigError> for ImpactError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}


pub type Result<T> = std::result::Result<T, ImpactError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_reports_line() {
        let err = ParseError::InvalidNumber {
            line: 3,
            field: "complexity",
            value: "abc".to_string(),
        };
        assert_eq!(err.line(), 3);
        let msg = err.to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("complexity"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn test_client_errors() {
        assert!(ImpactError::MissingInput.is_client_error());
        assert!(ImpactError::InvalidDatasetName("../x".into()).is_client_error());
        assert!(!ImpactError::NotFound("x".into()).is_client_error());
    }
}
