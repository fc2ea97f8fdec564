use fake::{
    faker::lorem::en::{Paragraphs, Sentences},
    Fake, Faker,
};
use more_asserts::assert_le;
use recursive_chunker::{
    pack_runs, Characters, Chunk, ChunkConfig, IncludeDelim, JoinMode, RecursiveChunker,
    RecursiveLevel, RecursiveRules, Tokenizer,
};

const CHUNK_SIZES: [usize; 5] = [1, 10, 50, 100, 1000];

fn lorem() -> String {
    Paragraphs(3..10).fake::<Vec<String>>().join("\n\n")
}

fn assert_well_formed(text: &str, chunks: &[Chunk], chunk_size: usize) {
    assert_eq!(chunks.iter().map(Chunk::text).collect::<String>(), text);

    let mut offset = 0;
    for chunk in chunks {
        assert!(!chunk.text().is_empty());
        assert_eq!(chunk.start_index(), offset);
        assert_eq!(chunk.end_index() - chunk.start_index(), chunk.text().chars().count());
        assert_le!(chunk.token_count(), chunk_size);
        assert_le!(Characters.count_tokens(chunk.text()).unwrap(), chunk_size);
        offset = chunk.end_index();
    }
    assert_eq!(offset, text.chars().count());
}

#[test]
fn returns_one_chunk_if_text_is_shorter_than_max_chunk_size() {
    let text = Faker.fake::<String>();
    let chunker = RecursiveChunker::new(ChunkConfig::new(text.chars().count().max(1)).unwrap());
    let chunks = chunker.chunk(&text).unwrap();

    assert_eq!(chunks.iter().map(Chunk::text).collect::<String>(), text);
    assert_le!(chunks.len(), 1);
}

#[test]
fn random_text_is_reconstructed() {
    let text = Faker.fake::<String>();

    for chunk_size in CHUNK_SIZES {
        let chunker = RecursiveChunker::new(ChunkConfig::new(chunk_size).unwrap());
        let chunks = chunker.chunk(&text).unwrap();

        assert_well_formed(&text, &chunks, chunk_size);
    }
}

#[test]
fn prose_is_reconstructed_within_budget() {
    let text = lorem();

    for chunk_size in CHUNK_SIZES {
        let chunker = RecursiveChunker::new(ChunkConfig::new(chunk_size).unwrap());
        let chunks = chunker.chunk(&text).unwrap();

        assert_well_formed(&text, &chunks, chunk_size);
    }
}

#[test]
fn prose_is_reconstructed_without_short_fragment_merging() {
    let text = Sentences(5..20).fake::<Vec<String>>().join("\n");

    for chunk_size in CHUNK_SIZES {
        let config = ChunkConfig::new(chunk_size)
            .unwrap()
            .with_min_characters_per_chunk(1)
            .unwrap()
            .with_parallel(false);
        let chunks = RecursiveChunker::new(config).chunk(&text).unwrap();

        assert_well_formed(&text, &chunks, chunk_size);
    }
}

#[test]
fn delimiters_attached_to_next_fragment_keep_text() {
    let text = lorem();
    let rules = RecursiveRules::new(vec![
        RecursiveLevel::delimiters(["\n\n", "\n"])
            .unwrap()
            .with_include_delim(IncludeDelim::Next),
        RecursiveLevel::delimiters([". ", "! ", "? "])
            .unwrap()
            .with_include_delim(IncludeDelim::Next),
        RecursiveLevel::whitespace(),
        RecursiveLevel::terminal(),
    ])
    .unwrap();

    for chunk_size in CHUNK_SIZES {
        let config = ChunkConfig::new(chunk_size).unwrap().with_rules(rules.clone());
        let chunks = RecursiveChunker::new(config).chunk(&text).unwrap();

        assert_well_formed(&text, &chunks, chunk_size);
    }
}

#[test]
fn empty_text_has_no_chunks() {
    let chunker = RecursiveChunker::new(ChunkConfig::new(10).unwrap());
    assert!(chunker.chunk("").unwrap().is_empty());
}

#[test]
fn short_text_is_a_single_chunk() {
    let chunker = RecursiveChunker::new(ChunkConfig::new(500).unwrap());
    let chunks = chunker.chunk("Hello world.").unwrap();

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text(), "Hello world.");
    assert_eq!(chunks[0].start_index(), 0);
    assert_eq!(chunks[0].end_index(), 12);
    assert_eq!(chunks[0].token_count(), 12);
    assert_eq!(chunks[0].level(), 0);
    assert!(chunks[0].embedding().is_none());
}

#[test]
fn equal_fragments_pack_from_the_left() {
    assert_eq!(
        pack_runs(&[3, 3, 3, 3], 6, JoinMode::Concat),
        vec![0..2, 2..4]
    );
}

#[test]
fn unbroken_text_terminates_in_token_windows() {
    let text = "a".repeat(10_000);
    let chunker = RecursiveChunker::new(ChunkConfig::new(50).unwrap());
    let chunks = chunker.chunk(&text).unwrap();

    assert_eq!(chunks.len(), 200);
    assert!(chunks.iter().all(|chunk| chunk.level() == 4));
    assert_well_formed(&text, &chunks, 50);
}

#[test]
fn chunking_is_deterministic() {
    let text = lorem();
    let first = RecursiveChunker::new(ChunkConfig::new(64).unwrap());
    let second = RecursiveChunker::new(ChunkConfig::new(64).unwrap());

    assert_eq!(first.chunk(&text).unwrap(), first.chunk(&text).unwrap());
    assert_eq!(first.chunk(&text).unwrap(), second.chunk(&text).unwrap());
}

#[test]
fn rechunking_a_chunk_returns_it_unchanged() {
    let text = lorem();
    let chunker = RecursiveChunker::new(ChunkConfig::new(64).unwrap());

    for chunk in chunker.chunk(&text).unwrap() {
        let rechunked = chunker.chunk(chunk.text()).unwrap();

        assert_eq!(rechunked.len(), 1);
        assert_eq!(rechunked[0].text(), chunk.text());
    }
}

#[test]
fn offsets_count_characters() {
    let text = "Ça va? Très bien! Und dir? Mir geht's gut. ";
    let chunker = RecursiveChunker::new(
        ChunkConfig::new(12)
            .unwrap()
            .with_min_characters_per_chunk(1)
            .unwrap(),
    );
    let chunks = chunker.chunk(text).unwrap();

    assert_well_formed(text, &chunks, 12);
    assert_eq!(chunks[0].text(), "Ça va? ");
    assert_eq!(chunks[1].start_index(), 7);
}

#[test]
fn discarded_delimiters_are_dropped_from_output() {
    let rules = RecursiveRules::new(vec![
        RecursiveLevel::delimiters([". "])
            .unwrap()
            .with_include_delim(IncludeDelim::None),
        RecursiveLevel::terminal(),
    ])
    .unwrap();
    let config = ChunkConfig::new(100)
        .unwrap()
        .with_rules(rules)
        .with_min_characters_per_chunk(1)
        .unwrap();
    let chunks = RecursiveChunker::new(config)
        .chunk("One. Two. Three")
        .unwrap();

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text(), "OneTwoThree");
    assert_eq!(chunks[0].token_count(), 11);
}

#[test]
fn chunks_serialize_to_json() {
    let chunker = RecursiveChunker::new(ChunkConfig::new(500).unwrap());
    let chunks = chunker.chunk("Hello world.").unwrap();
    let embedded = chunks[0].clone().with_embedding(vec![0.5]);

    assert_eq!(
        serde_json::to_value(&embedded).unwrap(),
        serde_json::json!({
            "text": "Hello world.",
            "start_index": 0,
            "end_index": 12,
            "token_count": 12,
            "level": 0,
            "embedding": [0.5],
        })
    );
}

#[test]
fn chunker_can_be_shared_across_threads() {
    let chunker = RecursiveChunker::new(ChunkConfig::new(32).unwrap());
    let texts = (0..4).map(|_| lorem()).collect::<Vec<_>>();

    std::thread::scope(|scope| {
        for text in &texts {
            let chunker = &chunker;
            scope.spawn(move || {
                let chunks = chunker.chunk(text).unwrap();
                assert_well_formed(text, &chunks, 32);
            });
        }
    });
}
