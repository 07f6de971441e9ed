use thiserror::Error;

/// Errors from strict single-clause parsing. The lenient [`parse_filters`]
/// entry point never surfaces these; it drops the offending clause instead.
///
/// [`parse_filters`]: crate::parser::parse_filters
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("empty filter expression")]
    Empty,
    #[error("malformed clause: {0}")]
    MalformedClause(String),
    #[error("expected a single clause, got trailing input: {0}")]
    TrailingInput(String),
    #[error("marker '{marker}' cannot combine with a trailing '*'")]
    ConflictingMarkers { marker: &'static str },
    #[error("marker '{marker}' requires a trailing '*'")]
    UnsupportedMarker { marker: &'static str },
}
