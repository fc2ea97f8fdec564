use serde::Serialize;

/// A contiguous piece of the source text, with its character offsets and
/// token count.
///
/// Offsets are counted in characters (Unicode scalar values), not bytes, and
/// `end_index` is exclusive.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Chunk {
    text: String,
    start_index: usize,
    end_index: usize,
    token_count: usize,
    level: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    embedding: Option<Vec<f32>>,
}

impl Chunk {
    pub(crate) fn new(text: String, start_index: usize, token_count: usize, level: usize) -> Self {
        let end_index = start_index + text.chars().count();
        Self {
            text,
            start_index,
            end_index,
            token_count,
            level,
            embedding: None,
        }
    }

    /// Text of the chunk.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Character offset where the chunk starts in the source text.
    #[must_use]
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Character offset one past the end of the chunk.
    #[must_use]
    pub fn end_index(&self) -> usize {
        self.end_index
    }

    /// Number of tokens in the chunk.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.token_count
    }

    /// Index of the rule that produced this chunk. Equal to the number of
    /// levels when no rule applied.
    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Number of characters in the chunk.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    /// Whether the chunk has no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Embedding vector, if one was attached.
    #[must_use]
    pub fn embedding(&self) -> Option<&[f32]> {
        self.embedding.as_deref()
    }

    /// Attach an embedding computed for this chunk.
    #[must_use]
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }
}
