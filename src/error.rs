use thiserror::Error;

/// Errors produced while building a [`crate::Trie`] from a dictionary.
///
/// All variants are produced synchronously at build time; a failed build
/// never leaves a partially constructed automaton observable to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The dictionary failed validation before any trie construction began.
    #[error("invalid dictionary: {reason}")]
    InvalidDictionary { reason: String },
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Error {
        Error::InvalidDictionary {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
