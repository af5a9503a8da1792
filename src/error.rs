use thiserror::Error;

use crate::items::ResourceKind;

/// Failures of the normalization pipeline.
///
/// Malformed items and unrecognized envelopes are not errors: they are dropped
/// or yield an empty sequence. Only a broken contract on a candidate item ends
/// up here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("{kind} {name}: `{path}` is missing")]
    UnexpectedNesting {
        kind: ResourceKind,
        name: String,
        path: &'static str,
    },

    #[error("Failed to decode payload: {0}")]
    Decode(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("Input fields cannot be empty: {0}")]
    EmptyField(&'static str),

    #[error("Labels are not following the format <key>=<value>,<key>=<value>...: `{0}`")]
    InvalidLabel(String),

    #[error("Label key cannot be empty: `{0}`")]
    EmptyLabelKey(String),

    #[error("Name is required")]
    MissingName,
}
