use std::collections::HashMap;

use ahash::RandomState;
use itertools::Itertools;

use crate::{
  config::NormalizerConfig,
  engine::index::Indices,
  model::{DictionaryEntry, PartOfSpeech},
  tokenizer::Morpheme,
};

/// A dictionary match aligned on morpheme boundaries.
#[derive(Debug)]
pub(crate) struct Candidate<'i> {
  pub(crate) start: usize,
  pub(crate) end: usize,
  /// Length in characters, used to rank overlapping spans.
  pub(crate) chars: usize,
  pub(crate) matched: Matched<'i>,
}

#[derive(Debug)]
pub(crate) enum Matched<'i> {
  Custom(&'i DictionaryEntry),
  /// Surviving builtin entries, all from the same synonym group.
  Builtin(Vec<&'i DictionaryEntry>),
}

/// Find every span of `text` that a dictionary can normalize under `config`.
///
/// `lemmas` tells whether morpheme lemmas can be trusted for predicate lookup.
pub(crate) fn generate<'i>(indices: &'i Indices, text: &str, morphemes: &[Morpheme], config: &NormalizerConfig, lemmas: bool) -> Vec<Candidate<'i>> {
  let mut starts: HashMap<usize, usize, RandomState> = HashMap::default();
  let mut ends: HashMap<usize, usize, RandomState> = HashMap::default();
  let mut runs = Vec::with_capacity(morphemes.len());

  for (index, morpheme) in morphemes.iter().enumerate() {
    starts.insert(morpheme.start, index);
    ends.insert(morpheme.end, index);

    let run = match index {
      0 => 0,
      _ if morphemes[index - 1].end == morpheme.start => runs[index - 1],
      _ => runs[index - 1] + 1,
    };

    runs.push(run);
  }

  let mut candidates = Vec::new();

  for mat in indices.automaton.find_overlapping_iter(text) {
    let (Some(&first), Some(&last)) = (starts.get(&mat.start()), ends.get(&mat.end())) else {
      continue;
    };

    if first > last || runs[first] != runs[last] {
      continue;
    }

    let surface = &text[mat.start()..mat.end()];
    let class = span_class(&morphemes[first..=last]);

    if let Some(matched) = lookup(indices, surface, class, config) {
      candidates.push(Candidate {
        start: mat.start(),
        end: mat.end(),
        chars: surface.chars().count(),
        matched,
      });
    }
  }

  if lemmas && config.yougen {
    for morpheme in morphemes.iter().filter(|morpheme| morpheme.pos == PartOfSpeech::Yougen && morpheme.lemma != morpheme.surface) {
      if candidates.iter().any(|candidate| candidate.start == morpheme.start && candidate.end == morpheme.end) {
        continue;
      }

      let entries = indices.synonyms.lookup(&morpheme.lemma).filter(|entry| entry.pos == PartOfSpeech::Yougen && config.accepts(entry)).collect::<Vec<_>>();

      if let Some(entries) = unambiguous(&morpheme.lemma, entries) {
        candidates.push(Candidate {
          start: morpheme.start,
          end: morpheme.end,
          chars: morpheme.surface.chars().count(),
          matched: Matched::Builtin(entries),
        });
      }
    }
  }

  candidates
}

fn lookup<'i>(indices: &'i Indices, surface: &str, class: PartOfSpeech, config: &NormalizerConfig) -> Option<Matched<'i>> {
  if let Some(entry) = indices.custom.as_deref().filter(|_| config.custom_synonym).and_then(|custom| custom.lookup(surface)) {
    return Some(Matched::Custom(entry));
  }

  let entries = indices
    .synonyms
    .lookup(surface)
    .filter(|entry| config.accepts(entry) && (entry.pos == class || (class == PartOfSpeech::Other && entry.pos == PartOfSpeech::Taigen)))
    .collect::<Vec<_>>();

  unambiguous(surface, entries).map(Matched::Builtin)
}

fn unambiguous<'i>(surface: &str, entries: Vec<&'i DictionaryEntry>) -> Option<Vec<&'i DictionaryEntry>> {
  if entries.is_empty() {
    return None;
  }

  if entries.iter().map(|entry| entry.group_id).all_equal() {
    return Some(entries);
  }

  tracing::warn!(surface, groups = ?entries.iter().map(|entry| entry.group_id).unique().collect::<Vec<_>>(), "ambiguous surface belongs to several synonym groups, leaving it unchanged");

  None
}

/// The class of the last morpheme in the span that has one.
fn span_class(morphemes: &[Morpheme]) -> PartOfSpeech {
  morphemes.iter().rev().map(|morpheme| morpheme.pos).find(|pos| *pos != PartOfSpeech::Other).unwrap_or(PartOfSpeech::Other)
}
