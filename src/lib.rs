/*!
# recursive-chunker

Large language models (LLMs) and embedding models can only look at a limited number of tokens at a time, often fewer than the documents you want to feed them. To use longer documents, you have to split them into chunks that fit within that budget.

This crate splits text into chunks of at most a given number of tokens, cutting at the coarsest sensible boundary first and only falling back to finer ones when a piece is still too large. Every chunk knows where it came from: its character offsets in the source and its token count.

## Get Started

### By Number of Characters

```rust
use recursive_chunker::{ChunkConfig, RecursiveChunker};

// Maximum number of characters in a chunk
let max_characters = 1000;
// Default tokenizer counts one token per character
let chunker = RecursiveChunker::new(ChunkConfig::new(max_characters).unwrap());

let chunks = chunker.chunk("your document text").unwrap();
```

### With Huggingface Tokenizer

Requires the `tokenizers` feature to be activated.

```rust
# #[cfg(feature = "tokenizers")]
# {
use recursive_chunker::{ChunkConfig, RecursiveChunker};
// Can also use anything else that implements the Tokenizer
// trait from the recursive_chunker crate.
use tokenizers::Tokenizer;

let tokenizer = Tokenizer::from_pretrained("bert-base-cased", None).unwrap();
let max_tokens = 1000;
let chunker = RecursiveChunker::new(ChunkConfig::new(max_tokens).unwrap().with_tokenizer(tokenizer));

let chunks = chunker.chunk("your document text").unwrap();
# }
```

### With Tiktoken Tokenizer

Requires the `tiktoken-rs` feature to be activated.

```rust
# #[cfg(feature = "tiktoken-rs")]
# {
use recursive_chunker::{ChunkConfig, RecursiveChunker};
use tiktoken_rs::cl100k_base;

let tokenizer = cl100k_base().unwrap();
let max_tokens = 1000;
let chunker = RecursiveChunker::new(ChunkConfig::new(max_tokens).unwrap().with_tokenizer(tokenizer));

let chunks = chunker.chunk("your document text").unwrap();
# }
```

### Custom Rules

Rules are an ordered list of levels, from coarse to fine. They can be built in code or deserialized from a recipe.

```rust
use recursive_chunker::{ChunkConfig, IncludeDelim, RecursiveChunker, RecursiveLevel, RecursiveRules};

let rules = RecursiveRules::new(vec![
    RecursiveLevel::delimiters(["\n\n"]).unwrap(),
    RecursiveLevel::delimiters(["# ", "## "])
        .unwrap()
        .with_include_delim(IncludeDelim::Next),
    RecursiveLevel::whitespace(),
    RecursiveLevel::terminal(),
])
.unwrap();
let chunker = RecursiveChunker::new(ChunkConfig::new(256).unwrap().with_rules(rules));
```

## Method

To preserve as much semantic meaning within a chunk as possible, each level of the rules splits the text and neighboring pieces are merged back together for as long as they fit. Any merged piece that is still too large is split again with the next level.

The default rules descend in the following order:

1. Paragraph breaks (`\n\n`, `\r\n`, `\n`, `\r`)
2. Sentence endings (`. `, `! `, `? `)
3. Pauses such as brackets, quotes, colons, commas and dashes
4. Spaces between words
5. Fixed windows of tokens, which always fit

Delimiter fragments shorter than `min_characters_per_chunk` are folded into the fragments that follow them, so a chunk doesn't end up holding a lone newline.

Token counting is skipped for text whose length alone shows it can't fit, using an estimate of 6.5 characters per token, and sibling fragments may be counted in parallel.

## Inspiration

This crate was inspired by [LangChain's TextSplitter](https://python.langchain.com/en/latest/modules/indexes/text_splitters/examples/recursive_text_splitter.html) and by recursive chunkers that describe their splitting hierarchy as data.

*/

#![warn(
    clippy::cargo,
    clippy::pedantic,
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    rust_2018_compatibility,
    rust_2018_idioms,
    rust_2021_compatibility,
    unused
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]

mod chunk;
mod chunker;
mod config;
mod error;
mod merge;
mod rules;
mod splitter;
mod tokenizer;

pub use chunk::Chunk;
pub use chunker::{RecursiveChunker, CHARS_PER_TOKEN};
pub use config::{ChunkConfig, DEFAULT_MIN_CHARACTERS_PER_CHUNK};
pub use error::{ChunkError, ConfigError, InternalInvariantError};
pub use merge::{merge_splits, pack_runs, JoinMode};
pub use rules::{
    DelimiterConfig, IncludeDelim, LevelConfig, LevelRule, RecursiveLevel, RecursiveRules,
    RulesConfig,
};
pub use tokenizer::{Characters, Tokenizer, TokenizerError};
