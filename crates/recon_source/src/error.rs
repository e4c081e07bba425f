//! Error types for source-location parsing.

/// Errors produced while parsing a `"start:length:unit"` descriptor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    /// The descriptor did not have exactly three colon-separated fields.
    #[error("source location '{descriptor}' must have three fields, found {found}")]
    FieldCount {
        /// The descriptor as it appeared in the syntax tree.
        descriptor: String,
        /// The number of fields found.
        found: usize,
    },

    /// One of the fields was not an unsigned integer.
    #[error("invalid {field} '{value}' in source location '{descriptor}'")]
    InvalidField {
        /// The descriptor as it appeared in the syntax tree.
        descriptor: String,
        /// Which field failed to parse (`start`, `length` or `unit`).
        field: &'static str,
        /// The offending field text.
        value: String,
    },
}
