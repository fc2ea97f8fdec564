use std::error::Error as StdError;

use thiserror::Error;

mod characters;
#[cfg(feature = "tokenizers")]
mod huggingface;
#[cfg(feature = "tiktoken-rs")]
mod tiktoken;

pub use characters::Characters;

/// An error raised by a tokenizer backend, such as a model that failed to
/// load or ids that can't be decoded. The chunker passes these through
/// unchanged.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct TokenizerError(Box<dyn StdError + Send + Sync + 'static>);

impl TokenizerError {
    /// Wrap an error coming from a tokenizer backend.
    pub fn new(err: impl Into<Box<dyn StdError + Send + Sync + 'static>>) -> Self {
        Self(err.into())
    }
}

/// The capabilities the chunker needs from a tokenizer.
///
/// Implementations should satisfy `decode(encode(x)) == x` for the text they
/// support, and `count_tokens(x) == encode(x).len()`.
pub trait Tokenizer {
    /// Convert text into token ids.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend can't tokenize the text.
    fn encode(&self, text: &str) -> Result<Vec<u32>, TokenizerError>;

    /// Convert token ids back into text.
    ///
    /// # Errors
    ///
    /// Returns an error if the ids are not valid for this tokenizer.
    fn decode(&self, ids: &[u32]) -> Result<String, TokenizerError>;

    /// Decode several id sequences at once. Backends with a native batch
    /// method should override this.
    ///
    /// # Errors
    ///
    /// Returns the first decoding error encountered.
    fn decode_batch(&self, batches: &[&[u32]]) -> Result<Vec<String>, TokenizerError> {
        batches.iter().map(|ids| self.decode(ids)).collect()
    }

    /// Number of tokens in the text.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend can't tokenize the text.
    fn count_tokens(&self, text: &str) -> Result<usize, TokenizerError> {
        self.encode(text).map(|ids| ids.len())
    }
}

impl<T> Tokenizer for &T
where
    T: Tokenizer + ?Sized,
{
    fn encode(&self, text: &str) -> Result<Vec<u32>, TokenizerError> {
        (**self).encode(text)
    }

    fn decode(&self, ids: &[u32]) -> Result<String, TokenizerError> {
        (**self).decode(ids)
    }

    fn decode_batch(&self, batches: &[&[u32]]) -> Result<Vec<String>, TokenizerError> {
        (**self).decode_batch(batches)
    }

    fn count_tokens(&self, text: &str) -> Result<usize, TokenizerError> {
        (**self).count_tokens(text)
    }
}
