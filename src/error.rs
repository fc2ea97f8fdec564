/*!
Errors surfaced while configuring a chunker or chunking text.
*/

use thiserror::Error;

use crate::tokenizer::TokenizerError;

/// Indicates there was an error with the rules or chunker configuration.
/// The `Display` implementation will provide a human-readable error message to
/// help debug the issue that caused the error.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct ConfigError(#[from] ConfigErrorRepr);

/// Private error and free to change across minor version of the crate.
#[derive(Error, Debug)]
pub(crate) enum ConfigErrorRepr {
    #[error("A level can split on delimiters or on whitespace, but not both")]
    DelimitersWithWhitespace,
    #[error("A delimiter level needs at least one delimiter")]
    NoDelimiters,
    #[error("Delimiters must not be empty strings")]
    EmptyDelimiter,
    #[error("A single space is not a valid delimiter, use a whitespace level instead")]
    SpaceDelimiter,
    #[error("Rules must contain at least one level")]
    NoLevels,
    #[error("Chunk size must be greater than zero")]
    ZeroChunkSize,
    #[error("Minimum characters per chunk must be greater than zero")]
    ZeroMinCharacters,
}

/// A bug in how the splitter and merger were paired. Should never happen with
/// well-formed rules, and is reported instead of silently truncating output.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct InternalInvariantError(#[from] InternalInvariantErrorRepr);

/// Private error and free to change across minor version of the crate.
#[derive(Error, Debug)]
pub(crate) enum InternalInvariantErrorRepr {
    #[error("Received {fragments} fragments but {counts} token counts")]
    LengthMismatch { fragments: usize, counts: usize },
    #[error("No rule at level {level}, only {levels} levels are configured")]
    LevelOutOfRange { level: usize, levels: usize },
}

/// Errors that can occur while chunking a piece of text.
///
/// `chunk()` never returns partial results: on error the whole call fails.
#[derive(Error, Debug)]
pub enum ChunkError {
    /// The tokenizer backend failed. Passed through unchanged.
    #[error(transparent)]
    Tokenizer(#[from] TokenizerError),
    /// The chunker reached a state that should be impossible.
    #[error(transparent)]
    Internal(#[from] InternalInvariantError),
}

impl From<InternalInvariantErrorRepr> for ChunkError {
    fn from(repr: InternalInvariantErrorRepr) -> Self {
        Self::Internal(repr.into())
    }
}
