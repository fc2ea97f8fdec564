use thiserror::Error;

use crate::{Tokenizer, TokenizerError};

/// Tokenizes text one character at a time. Each token id is the Unicode
/// scalar value of the character, so no vocabulary is needed.
///
/// ```
/// use recursive_chunker::{Characters, Tokenizer};
///
/// let ids = Characters.encode("hé").unwrap();
/// assert_eq!(ids, vec![104, 233]);
/// assert_eq!(Characters.decode(&ids).unwrap(), "hé");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Characters;

#[derive(Error, Debug)]
#[error("Token id {0} is not a valid character")]
struct InvalidCharacterId(u32);

impl Tokenizer for Characters {
    fn encode(&self, text: &str) -> Result<Vec<u32>, TokenizerError> {
        Ok(text.chars().map(u32::from).collect())
    }

    fn decode(&self, ids: &[u32]) -> Result<String, TokenizerError> {
        ids.iter()
            .map(|&id| {
                char::from_u32(id).ok_or_else(|| TokenizerError::new(InvalidCharacterId(id)))
            })
            .collect()
    }

    /// Determine the number of characters, without allocating ids.
    fn count_tokens(&self, text: &str) -> Result<usize, TokenizerError> {
        Ok(text.chars().count())
    }
}
