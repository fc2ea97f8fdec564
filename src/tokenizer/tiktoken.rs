use tiktoken_rs::CoreBPE;

use crate::{Tokenizer, TokenizerError};

impl Tokenizer for CoreBPE {
    fn encode(&self, text: &str) -> Result<Vec<u32>, TokenizerError> {
        self.encode_ordinary(text)
            .into_iter()
            .map(|rank| u32::try_from(rank).map_err(TokenizerError::new))
            .collect()
    }

    fn decode(&self, ids: &[u32]) -> Result<String, TokenizerError> {
        CoreBPE::decode(self, ids.iter().map(|&id| id as usize).collect())
            .map_err(TokenizerError::new)
    }

    /// Returns the number of tokens in a given text after tokenization.
    fn count_tokens(&self, text: &str) -> Result<usize, TokenizerError> {
        Ok(self.encode_ordinary(text).len())
    }
}
