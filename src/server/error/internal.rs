use thiserror::Error;

use crate::model::UnknownVariant;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A stored status or kind column holds a value no enum variant matches.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Failed to parse {kind} from stored value '{value}'")]
    ParseEnum {
        /// Name of the enum being parsed
        kind: &'static str,
        /// The stored value that failed to parse
        value: String,
    },

    /// Failure to encode or decode a JSON column.
    #[error("JSON column error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<UnknownVariant> for InternalError {
    fn from(err: UnknownVariant) -> Self {
        Self::ParseEnum {
            kind: err.kind,
            value: err.value,
        }
    }
}
