use thiserror::Error;

/// Top-level CLI failure classes, mirroring the dispositions laid out for
/// argument handling, I/O, and graph construction: each surfaces as a
/// diagnostic on stderr plus a non-zero exit.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("usage: tsp <inputfile> <ceiling>")]
    BadArgs,
    #[error("ceiling must be a positive number, got {0:?}")]
    BadCeiling(String),
    #[error(transparent)]
    Parse(#[from] tsp_parser::ParseError),
}
