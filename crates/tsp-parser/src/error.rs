use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while reading an instance file. Every
/// variant here is an `IoOpen`- or `IoParse`-class failure in the CLI's
/// error taxonomy; the CLI decides the diagnostic/exit-code treatment.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("could not open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("missing header line (expected `n m`) at line {line}")]
    MissingHeader { line: usize },
    #[error("expected {expected} edges but the file only contains {found}")]
    EdgeCountMismatch { expected: usize, found: usize },
    #[error("line {line}: malformed field `{field}` in `{found}`")]
    InvalidNumber { line: usize, field: String, found: String },
    #[error("line {line}: expected whitespace-separated fields, got `{found}`")]
    MalformedLine { line: usize, found: String },
    #[error(transparent)]
    Graph(#[from] tsp_core::GraphError),
}
