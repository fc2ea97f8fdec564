#![allow(missing_docs)]

use divan::AllocProfiler;
use fake::{faker::lorem::en::Paragraphs, Fake};
use once_cell::sync::Lazy;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

const CHUNK_SIZES: [usize; 3] = [64, 1024, 16384];

/// Same text for every benchmark, so runs are comparable.
static TEXT: Lazy<String> = Lazy::new(|| Paragraphs(200..201).fake::<Vec<String>>().join("\n\n"));

fn main() {
    // Run registered benchmarks.
    divan::main();
}

#[divan::bench_group]
mod text {
    use divan::{black_box_drop, counter::BytesCount, Bencher};
    use recursive_chunker::{ChunkConfig, RecursiveChunker, Tokenizer};

    use crate::{CHUNK_SIZES, TEXT};

    fn bench<T, G>(bencher: Bencher<'_, '_>, gen_chunker: G)
    where
        G: Fn() -> RecursiveChunker<T> + Sync,
        T: Tokenizer + Sync,
    {
        bencher
            .with_inputs(|| (gen_chunker(), TEXT.clone()))
            .input_counter(|(_, text)| BytesCount::of_str(text))
            .bench_values(|(chunker, text)| {
                chunker.chunk(&text).unwrap().into_iter().for_each(black_box_drop);
            });
    }

    #[divan::bench(consts = CHUNK_SIZES)]
    fn characters<const N: usize>(bencher: Bencher<'_, '_>) {
        bench(bencher, || RecursiveChunker::new(ChunkConfig::new(N).unwrap()));
    }

    #[divan::bench(consts = CHUNK_SIZES)]
    fn characters_sequential<const N: usize>(bencher: Bencher<'_, '_>) {
        bench(bencher, || {
            RecursiveChunker::new(ChunkConfig::new(N).unwrap().with_parallel(false))
        });
    }

    #[cfg(feature = "tiktoken-rs")]
    #[divan::bench(consts = CHUNK_SIZES)]
    fn tiktoken<const N: usize>(bencher: Bencher<'_, '_>) {
        bench(bencher, || {
            RecursiveChunker::new(
                ChunkConfig::new(N)
                    .unwrap()
                    .with_tokenizer(tiktoken_rs::cl100k_base().unwrap()),
            )
        });
    }

    #[cfg(feature = "tokenizers")]
    #[divan::bench(consts = CHUNK_SIZES)]
    fn tokenizers<const N: usize>(bencher: Bencher<'_, '_>) {
        bench(bencher, || {
            RecursiveChunker::new(ChunkConfig::new(N).unwrap().with_tokenizer(
                tokenizers::Tokenizer::from_pretrained("bert-base-cased", None).unwrap(),
            ))
        });
    }
}
