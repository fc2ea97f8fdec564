use crate::{Tokenizer, TokenizerError};

/// Token ids with any leading or trailing padding removed, so padding doesn't
/// count towards the chunk size.
fn encode_without_padding(
    tokenizer: &tokenizers::Tokenizer,
    text: &str,
) -> Result<Vec<u32>, TokenizerError> {
    let encoding = (**tokenizer).encode(text, false).map_err(TokenizerError::new)?;
    let pad_id = tokenizer.get_padding().map(|params| params.pad_id);

    Ok(encoding
        .get_ids()
        .iter()
        .skip_while(|&&id| pad_id.is_some_and(|pad_id| id == pad_id))
        .take_while(|&&id| pad_id.map_or(true, |pad_id| id != pad_id))
        .copied()
        .collect())
}

impl Tokenizer for tokenizers::Tokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>, TokenizerError> {
        encode_without_padding(self, text)
    }

    fn decode(&self, ids: &[u32]) -> Result<String, TokenizerError> {
        (**self).decode(ids, false).map_err(TokenizerError::new)
    }

    fn decode_batch(&self, batches: &[&[u32]]) -> Result<Vec<String>, TokenizerError> {
        (**self).decode_batch(batches, false).map_err(TokenizerError::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_tokens() {
        let tokenizer = tokenizers::Tokenizer::from_pretrained("bert-base-cased", None).unwrap();
        let size = Tokenizer::count_tokens(&tokenizer, "An apple a").unwrap();
        assert_eq!(size, 3);
    }

    #[test]
    fn handles_padding() {
        let tokenizer =
            tokenizers::Tokenizer::from_pretrained("thenlper/gte-small", None).unwrap();
        let size = Tokenizer::count_tokens(&tokenizer, "An apple a").unwrap();
        assert_eq!(size, 3);
    }

    #[test]
    fn decodes_batches() {
        let tokenizer = tokenizers::Tokenizer::from_pretrained("bert-base-cased", None).unwrap();
        let ids = Tokenizer::encode(&tokenizer, "An apple a").unwrap();
        let decoded = Tokenizer::decode_batch(&tokenizer, &[&ids[..1], &ids[1..]]).unwrap();
        assert_eq!(decoded, vec!["An", "apple a"]);
    }
}
