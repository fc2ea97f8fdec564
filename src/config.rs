use crate::{
    error::{ConfigError, ConfigErrorRepr},
    Characters, RecursiveRules, Tokenizer,
};

/// Fragments shorter than this many characters are folded into their
/// neighbors unless configured otherwise.
pub const DEFAULT_MIN_CHARACTERS_PER_CHUNK: usize = 24;

/// Configuration for how chunks should be created. Validated when it is
/// built, so a chunker never sees an invalid configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkConfig<T>
where
    T: Tokenizer,
{
    /// Maximum number of tokens in a chunk
    chunk_size: usize,
    /// Delimiter fragments shorter than this are merged forward
    min_characters_per_chunk: usize,
    /// Whether token counting may fan out over the rayon pool
    parallel: bool,
    /// Splitting hierarchy, coarse to fine
    rules: RecursiveRules,
    /// Tokenizer used for counting and for the terminal level
    tokenizer: T,
}

impl ChunkConfig<Characters> {
    /// Create a configuration with the required chunk size, in tokens.
    ///
    /// By default, tokens are counted per character and the default rules
    /// are used. Use [`Self::with_tokenizer`] and [`Self::with_rules`] to
    /// change them.
    ///
    /// ```
    /// use recursive_chunker::ChunkConfig;
    ///
    /// let config = ChunkConfig::new(512).unwrap();
    /// assert_eq!(config.chunk_size(), 512);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if `chunk_size` is zero.
    pub fn new(chunk_size: usize) -> Result<Self, ConfigError> {
        if chunk_size == 0 {
            return Err(ConfigErrorRepr::ZeroChunkSize.into());
        }

        Ok(Self {
            chunk_size,
            min_characters_per_chunk: DEFAULT_MIN_CHARACTERS_PER_CHUNK,
            parallel: true,
            rules: RecursiveRules::default(),
            tokenizer: Characters,
        })
    }
}

impl<T> ChunkConfig<T>
where
    T: Tokenizer,
{
    /// Maximum number of tokens in a chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Minimum fragment length, in characters, before merging forward.
    pub fn min_characters_per_chunk(&self) -> usize {
        self.min_characters_per_chunk
    }

    /// Set the minimum fragment length, in characters. Shorter fragments
    /// produced by a delimiter level are merged with the fragments that
    /// follow them.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_characters` is zero.
    pub fn with_min_characters_per_chunk(
        mut self,
        min_characters: usize,
    ) -> Result<Self, ConfigError> {
        if min_characters == 0 {
            Err(ConfigErrorRepr::ZeroMinCharacters.into())
        } else {
            self.min_characters_per_chunk = min_characters;
            Ok(self)
        }
    }

    /// Whether token counting may run in parallel.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Allow or forbid counting tokens for sibling fragments in parallel.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Retrieve the splitting rules.
    pub fn rules(&self) -> &RecursiveRules {
        &self.rules
    }

    /// Use a custom splitting hierarchy.
    #[must_use]
    pub fn with_rules(mut self, rules: RecursiveRules) -> Self {
        self.rules = rules;
        self
    }

    /// Retrieve a reference to the tokenizer.
    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    /// Set the tokenizer used to measure chunks and cut token windows.
    ///
    /// ```
    /// use recursive_chunker::{Characters, ChunkConfig};
    ///
    /// let config = ChunkConfig::new(512).unwrap().with_tokenizer(Characters);
    /// ```
    #[must_use]
    pub fn with_tokenizer<U: Tokenizer>(self, tokenizer: U) -> ChunkConfig<U> {
        ChunkConfig {
            chunk_size: self.chunk_size,
            min_characters_per_chunk: self.min_characters_per_chunk,
            parallel: self.parallel,
            rules: self.rules,
            tokenizer,
        }
    }
}
