use thiserror::Error;

/// Fatal errors. Anything that can degrade to a default goes through
/// `Diagnostics` instead.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{kind}.name could not be found for \"{reference}\"")]
    MissingName { kind: &'static str, reference: String },

    #[error("attr.valueType could not be found for \"{reference}\"")]
    MissingValueType { reference: String },

    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("{path}: expected {expected}")]
    Shape { path: String, expected: String },

    #[error("{path}: reference \"{target}\" does not resolve")]
    BrokenReference { path: String, target: String },

    #[error("role inheritance cycle through \"{reference}\"")]
    InheritanceCycle { reference: String },

    #[error("unknown role \"{0}\"")]
    UnknownRole(String),
}
