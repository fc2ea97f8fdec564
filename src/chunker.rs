/*!
# [`RecursiveChunker`]
Splits text with a cascade of rules, recursing into anything still too large.
*/

use std::borrow::Cow;

use ahash::AHashMap;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::{
    error::{ChunkError, InternalInvariantErrorRepr},
    merge::{merge_splits, JoinMode},
    splitter::split_level,
    Chunk, ChunkConfig, LevelRule, Tokenizer, TokenizerError,
};

/// Rough number of characters per token. Text whose length implies more
/// tokens than the chunk size is treated as over budget without tokenizing.
pub const CHARS_PER_TOKEN: f64 = 6.5;

/// Below this many distinct fragments, counting runs on the calling thread.
const PARALLEL_MIN_FRAGMENTS: usize = 32;

/// Splits text into chunks of at most `chunk_size` tokens.
///
/// Each level of the configured rules splits the text, neighboring fragments
/// are merged as long as they fit, and any merged run that is still too
/// large is split again with the next level. The final terminal level cuts
/// fixed token windows, so every chunk ends up within budget.
///
/// A chunker holds no state between calls and can be shared across threads.
#[derive(Clone, Debug)]
pub struct RecursiveChunker<T>
where
    T: Tokenizer,
{
    /// Chunk size, rules and tokenizer
    config: ChunkConfig<T>,
}

impl<T> RecursiveChunker<T>
where
    T: Tokenizer + Sync,
{
    /// Creates a new [`RecursiveChunker`].
    ///
    /// ```
    /// use recursive_chunker::{ChunkConfig, RecursiveChunker};
    ///
    /// let chunker = RecursiveChunker::new(ChunkConfig::new(512).unwrap());
    /// ```
    #[must_use]
    pub fn new(config: ChunkConfig<T>) -> Self {
        Self { config }
    }

    /// Retrieve the chunk configuration.
    pub fn config(&self) -> &ChunkConfig<T> {
        &self.config
    }

    /// Split text into an ordered list of chunks.
    ///
    /// With rules that keep delimiters ([`IncludeDelim::Prev`] or
    /// [`IncludeDelim::Next`]) joining the chunk texts gives back the
    /// original text, and each chunk starts where the previous one ended.
    ///
    /// ```
    /// use recursive_chunker::{ChunkConfig, RecursiveChunker};
    ///
    /// let chunker = RecursiveChunker::new(ChunkConfig::new(500).unwrap());
    /// let chunks = chunker.chunk("Hello world.").unwrap();
    ///
    /// assert_eq!(chunks.len(), 1);
    /// assert_eq!(chunks[0].text(), "Hello world.");
    /// assert_eq!((chunks[0].start_index(), chunks[0].end_index()), (0, 12));
    /// ```
    ///
    /// [`IncludeDelim::Prev`]: crate::IncludeDelim::Prev
    /// [`IncludeDelim::Next`]: crate::IncludeDelim::Next
    ///
    /// # Errors
    ///
    /// Returns an error if the tokenizer fails. No partial output is returned.
    pub fn chunk(&self, text: &str) -> Result<Vec<Chunk>, ChunkError> {
        let mut chunks = Vec::new();
        if text.is_empty() {
            return Ok(chunks);
        }

        debug!(
            characters = text.chars().count(),
            chunk_size = self.config.chunk_size(),
            levels = self.config.rules().len(),
            "chunking text"
        );
        self.chunk_level(text, 0, 0, &mut chunks)?;
        debug!(chunks = chunks.len(), "chunked text");

        Ok(chunks)
    }

    /// Chunk `text`, which starts at character `offset` in the source, with
    /// the rule at `level`, pushing results onto `chunks`.
    fn chunk_level(
        &self,
        text: &str,
        level: usize,
        offset: usize,
        chunks: &mut Vec<Chunk>,
    ) -> Result<(), ChunkError> {
        let rules = self.config.rules();
        let chunk_size = self.config.chunk_size();

        if level == rules.len() {
            let token_count = self.estimate_token_count(text)?;
            chunks.push(Chunk::new(text.to_string(), offset, token_count, level));
            return Ok(());
        }

        let rule = rules
            .get(level)
            .ok_or(InternalInvariantErrorRepr::LevelOutOfRange {
                level,
                levels: rules.len(),
            })?;

        let fragments = split_level(text, rule, &self.config)?;
        let token_counts = self.estimate_token_counts(&fragments)?;

        let join_mode = match rule.rule() {
            LevelRule::Whitespace => JoinMode::Space,
            LevelRule::Delimiters(_) | LevelRule::Terminal => JoinMode::Concat,
        };
        let runs = merge_splits(&fragments, &token_counts, chunk_size, join_mode)?;

        trace!(
            level,
            fragments = fragments.len(),
            runs = runs.len(),
            "split level"
        );

        let mut offset = offset;
        for (run, token_count) in runs {
            if run.is_empty() {
                continue;
            }

            let length = run.chars().count();
            if token_count > chunk_size {
                self.chunk_level(&run, level + 1, offset, chunks)?;
            } else {
                chunks.push(Chunk::new(run, offset, token_count, level));
            }
            offset += length;
        }

        Ok(())
    }

    /// Token counts for each fragment, in order. Identical fragments are
    /// only counted once.
    fn estimate_token_counts(
        &self,
        fragments: &[Cow<'_, str>],
    ) -> Result<Vec<usize>, TokenizerError> {
        let mut positions: AHashMap<&str, usize> = AHashMap::with_capacity(fragments.len());
        let mut unique = Vec::new();
        for fragment in fragments {
            let fragment: &str = fragment;
            positions.entry(fragment).or_insert_with(|| {
                unique.push(fragment);
                unique.len() - 1
            });
        }

        let counts = if self.config.parallel() && unique.len() >= PARALLEL_MIN_FRAGMENTS {
            unique
                .par_iter()
                .map(|fragment| self.estimate_token_count(fragment))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            unique
                .iter()
                .map(|fragment| self.estimate_token_count(fragment))
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(fragments
            .iter()
            .map(|fragment| {
                let fragment: &str = fragment;
                counts[positions[fragment]]
            })
            .collect())
    }

    /// Token count of the text, or `chunk_size + 1` if its length alone
    /// shows it can't fit.
    fn estimate_token_count(&self, text: &str) -> Result<usize, TokenizerError> {
        let chunk_size = self.config.chunk_size();
        if heuristic_token_count(text.chars().count()) > chunk_size {
            Ok(chunk_size.saturating_add(1))
        } else {
            self.config.tokenizer().count_tokens(text)
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn heuristic_token_count(characters: usize) -> usize {
    ((characters as f64 / CHARS_PER_TOKEN) as usize).max(1)
}
