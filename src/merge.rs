/*!
Greedy packing of neighboring fragments into runs that fit a token budget.
*/

use std::{borrow::Borrow, ops::Range};

use crate::error::{InternalInvariantError, InternalInvariantErrorRepr};

/// How the fragments of a run are glued back together.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JoinMode {
    /// Fragments were split on spaces. Each boundary between fragments costs
    /// one token for its space, whether it ends up inside a run or at the
    /// start of the run that follows it.
    Space,
    /// Fragments are concatenated as-is.
    Concat,
}

impl JoinMode {
    /// Tokens charged for each boundary between fragments.
    fn separator_cost(self) -> usize {
        match self {
            Self::Space => 1,
            Self::Concat => 0,
        }
    }

    fn separator(self) -> &'static str {
        match self {
            Self::Space => " ",
            Self::Concat => "",
        }
    }
}

/// Pack fragments with the given token counts into runs of neighbors.
///
/// Each run is as long as possible without its total exceeding `budget`,
/// searching from the leftmost fragment not yet packed. With
/// [`JoinMode::Space`], the total includes the spaces between fragments and
/// the leading space of every run after the first. A fragment that is over
/// budget on its own becomes a run by itself. If every fragment is over
/// budget, each is returned as its own run.
///
/// ```
/// use recursive_chunker::{pack_runs, JoinMode};
///
/// let runs = pack_runs(&[3, 3, 3, 3], 6, JoinMode::Concat);
/// assert_eq!(runs, vec![0..2, 2..4]);
/// ```
#[must_use]
pub fn pack_runs(token_counts: &[usize], budget: usize, join_mode: JoinMode) -> Vec<Range<usize>> {
    if token_counts.iter().all(|&count| count > budget) {
        return (0..token_counts.len()).map(|i| i..i + 1).collect();
    }

    let prefix_sums = prefix_sums(token_counts, join_mode);

    let mut runs = Vec::new();
    let mut start = 0;
    while start < token_counts.len() {
        let limit = prefix_sums[start]
            .saturating_add(budget)
            .saturating_add(leading_discount(start, join_mode));
        // Number of prefix sums that fit is one past the furthest end that fits
        let end = prefix_sums.partition_point(|&sum| sum <= limit) - 1;
        let end = end.max(start + 1);
        runs.push(start..end);
        start = end;
    }

    runs
}

/// Running totals of token counts, starting at zero. Every fragment is
/// charged the separator in front of it, so the cost of fragments `a..b`
/// is `sums[b] - sums[a]` minus the separator the first run never gets.
fn prefix_sums(token_counts: &[usize], join_mode: JoinMode) -> Vec<usize> {
    let separator_cost = join_mode.separator_cost();
    let mut sums = Vec::with_capacity(token_counts.len() + 1);
    sums.push(0);
    let mut total = 0usize;
    for count in token_counts {
        total = total.saturating_add(count.saturating_add(separator_cost));
        sums.push(total);
    }
    sums
}

/// The first run has no separator in front of it.
fn leading_discount(start: usize, join_mode: JoinMode) -> usize {
    if start == 0 {
        join_mode.separator_cost()
    } else {
        0
    }
}

/// Merge fragments into runs that fit the budget, returning each run's text
/// with its total token count.
///
/// With [`JoinMode::Space`], fragments within a run are joined by a single
/// space and every run after the first starts with the space that preceded
/// it, so the runs concatenate back to the space-joined fragments. Counts
/// include one token per space in the run's text.
///
/// ```
/// use recursive_chunker::{merge_splits, JoinMode};
///
/// let runs = merge_splits(&["ab", "cd", "ef"], &[2, 2, 2], 5, JoinMode::Space).unwrap();
/// assert_eq!(runs, vec![("ab cd".to_string(), 5), (" ef".to_string(), 3)]);
/// ```
///
/// # Errors
///
/// Returns an error if the number of fragments and counts differ.
pub fn merge_splits<S>(
    fragments: &[S],
    token_counts: &[usize],
    budget: usize,
    join_mode: JoinMode,
) -> Result<Vec<(String, usize)>, InternalInvariantError>
where
    S: Borrow<str>,
{
    if fragments.len() != token_counts.len() {
        return Err(InternalInvariantErrorRepr::LengthMismatch {
            fragments: fragments.len(),
            counts: token_counts.len(),
        }
        .into());
    }

    let prefix_sums = prefix_sums(token_counts, join_mode);
    let separator = join_mode.separator();

    Ok(pack_runs(token_counts, budget, join_mode)
        .into_iter()
        .map(|run| {
            let count = (prefix_sums[run.end] - prefix_sums[run.start])
                .saturating_sub(leading_discount(run.start, join_mode));
            let mut text = if run.start == 0 {
                String::new()
            } else {
                separator.to_string()
            };
            text.push_str(&fragments[run].join(separator));
            (text, count)
        })
        .collect())
}
