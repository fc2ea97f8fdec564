/*!
Splits the text of one level into ordered fragments.
*/

use std::{borrow::Cow, ops::Range};

use itertools::Itertools;

use crate::{ChunkConfig, IncludeDelim, LevelRule, RecursiveLevel, Tokenizer, TokenizerError};

/// Split text according to a single level's rule.
///
/// Delimiter fragments keep the text they were cut from (except for
/// [`IncludeDelim::None`]), whitespace fragments rejoin with single spaces,
/// and terminal fragments are decoded token windows.
pub(crate) fn split_level<'text, T>(
    text: &'text str,
    level: &RecursiveLevel,
    config: &ChunkConfig<T>,
) -> Result<Vec<Cow<'text, str>>, TokenizerError>
where
    T: Tokenizer,
{
    Ok(match level.rule() {
        LevelRule::Delimiters(delimiters) => merge_short_sections(
            text,
            delimiter_sections(text, delimiters, level.include_delim()),
            config.min_characters_per_chunk(),
        ),
        LevelRule::Whitespace => text.split(' ').map(Cow::Borrowed).collect(),
        LevelRule::Terminal => token_windows(text, config.tokenizer(), config.chunk_size())?,
    })
}

/// Byte ranges of the sections between delimiter boundaries.
///
/// Every non-overlapping occurrence of each delimiter marks a boundary.
/// Empty sections are dropped.
fn delimiter_sections(
    text: &str,
    delimiters: &[String],
    include_delim: IncludeDelim,
) -> Vec<Range<usize>> {
    let matches = delimiters.iter().flat_map(|delimiter| {
        text.match_indices(delimiter.as_str())
            .map(|(start, found)| start..start + found.len())
    });

    match include_delim {
        IncludeDelim::Prev | IncludeDelim::Next => matches
            .map(|m| {
                if include_delim == IncludeDelim::Prev {
                    m.end
                } else {
                    m.start
                }
            })
            .chain([0, text.len()])
            .sorted_unstable()
            .dedup()
            .tuple_windows()
            .map(|(start, end)| start..end)
            .collect(),
        IncludeDelim::None => {
            let mut cursor = 0;
            let mut sections = Vec::new();
            // Overlapping delimiter matches are discarded as one span
            for m in matches.sorted_unstable_by_key(|m| m.start) {
                if m.start > cursor {
                    sections.push(cursor..m.start);
                }
                cursor = cursor.max(m.end);
            }
            if cursor < text.len() {
                sections.push(cursor..text.len());
            }
            sections
        }
    }
}

/// Fold sections shorter than `min_characters` into the sections after them.
/// A buffer is flushed as soon as it reaches `min_characters`, or at the end
/// of the input whatever its length.
fn merge_short_sections(
    text: &str,
    sections: Vec<Range<usize>>,
    min_characters: usize,
) -> Vec<Cow<'_, str>> {
    let mut merged = Vec::with_capacity(sections.len());
    let mut pending: Vec<Range<usize>> = Vec::new();
    let mut pending_chars = 0;

    for section in sections {
        let chars = text[section.clone()].chars().count();

        if chars >= min_characters && pending.is_empty() {
            merged.push(Cow::Borrowed(&text[section]));
            continue;
        }

        pending.push(section);
        pending_chars += chars;

        if pending_chars >= min_characters {
            merged.push(join_sections(text, &pending));
            pending.clear();
            pending_chars = 0;
        }
    }

    if !pending.is_empty() {
        merged.push(join_sections(text, &pending));
    }

    merged
}

/// Join sections into one fragment, borrowing when they are contiguous in
/// the source text.
fn join_sections<'text>(text: &'text str, sections: &[Range<usize>]) -> Cow<'text, str> {
    let contiguous = sections
        .iter()
        .tuple_windows()
        .all(|(a, b)| a.end == b.start);

    match (sections.first(), sections.last()) {
        (Some(first), Some(last)) if contiguous => Cow::Borrowed(&text[first.start..last.end]),
        _ => Cow::Owned(sections.iter().map(|s| &text[s.clone()]).collect()),
    }
}

/// Cut the text into windows of at most `window` tokens, decoded back to text.
fn token_windows<'text, T>(
    text: &str,
    tokenizer: &T,
    window: usize,
) -> Result<Vec<Cow<'text, str>>, TokenizerError>
where
    T: Tokenizer,
{
    let ids = tokenizer.encode(text)?;
    let windows = ids.chunks(window).collect::<Vec<_>>();

    let decoded = match tokenizer.decode_batch(&windows) {
        Ok(decoded) => decoded,
        // A window can end partway through a character spread over several tokens
        Err(err) => decode_at_boundaries(tokenizer, &ids, window).ok_or(err)?,
    };

    Ok(decoded.into_iter().map(Cow::Owned).collect())
}

/// Decode windows of at most `window` ids, moving each window's end back
/// until it decodes. If no shorter window decodes, the window is extended
/// instead, so a character needing more than `window` tokens stays whole.
///
/// Returns `None` if some ids can't be decoded at any length.
fn decode_at_boundaries<T>(tokenizer: &T, ids: &[u32], window: usize) -> Option<Vec<String>>
where
    T: Tokenizer,
{
    let mut decoded = Vec::new();
    let mut start = 0;
    while start < ids.len() {
        let limit = (start + window).min(ids.len());
        let (end, text) = (start + 1..=limit)
            .rev()
            .chain(limit + 1..=ids.len())
            .find_map(|end| {
                tokenizer
                    .decode(&ids[start..end])
                    .ok()
                    .map(|text| (end, text))
            })?;
        decoded.push(text);
        start = end;
    }
    Some(decoded)
}
