use std::{cmp::Reverse, collections::BTreeMap};

use crate::engine::candidates::Candidate;

/// Pick a non-overlapping subset of `candidates`.
///
/// Longer spans (in characters) win, then earlier ones. A span overlapping
/// one already picked is dropped entirely. The result is in text order.
pub(crate) fn select(mut candidates: Vec<Candidate<'_>>) -> Vec<Candidate<'_>> {
  candidates.sort_by_key(|candidate| (Reverse(candidate.chars), candidate.start, Reverse(candidate.end)));

  let mut taken: BTreeMap<usize, usize> = BTreeMap::new();
  let mut selected = Vec::new();

  for candidate in candidates {
    let overlaps = taken.range(..candidate.end).next_back().is_some_and(|(_, end)| *end > candidate.start);

    if overlaps {
      continue;
    }

    taken.insert(candidate.start, candidate.end);
    selected.push(candidate);
  }

  selected.sort_by_key(|candidate| candidate.start);
  selected
}
