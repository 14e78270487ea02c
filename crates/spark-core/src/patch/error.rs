use thiserror::Error;

/// Failures of the patch engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PatchError {
    /// The text could not be parsed as XML at all.
    #[error("document is not well-formed XML: {reason}")]
    MalformedDocument { reason: String },

    /// None of the rule's anchors exist in the document.
    #[error("rule '{rule}' found no insertion point (tried: {})", tried.join(" | "))]
    StructuralPrecondition { rule: String, tried: Vec<String> },

    /// A structural path expression failed to parse.
    #[error("invalid structural path '{path}' at byte {position}: {reason}")]
    InvalidPath {
        path: String,
        position: usize,
        reason: String,
    },

    /// An anchor was used against a document other than the one it came from.
    #[error("anchor does not belong to this document")]
    StaleAnchor,
}
