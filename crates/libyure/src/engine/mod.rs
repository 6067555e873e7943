use compact_str::CompactString;
use metrics::counter;
use serde::Serialize;

use crate::{
  config::NormalizerConfig,
  engine::{
    candidates::{Candidate, Matched},
    index::Indices,
  },
  error::YureError,
  model::{Category, Source},
  tokenizer::Morpheme,
};

pub(crate) mod candidates;
pub(crate) mod index;
pub(crate) mod resolve;

/// One span of the input that was rewritten.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Replacement {
  /// Byte offsets of the span in the input.
  pub start: usize,
  pub end: usize,
  pub original: CompactString,
  pub replacement: CompactString,
  /// Finest rule class of the matched entry. Unset when a predicate was
  /// matched through its lemma on a representative entry.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category: Option<Category>,
  pub source: Source,
}

/// Normalized text along with the replacements that produced it.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Normalized {
  pub text: String,
  pub replacements: Vec<Replacement>,
}

impl Normalized {
  pub(crate) fn unchanged(text: &str) -> Normalized {
    Normalized {
      text: text.to_string(),
      replacements: Vec::new(),
    }
  }
}

pub(crate) fn normalize(indices: &Indices, text: &str, morphemes: &[Morpheme], config: &NormalizerConfig, lemmas: bool) -> Normalized {
  let candidates = candidates::generate(indices, text, morphemes, config, lemmas);
  let selected = resolve::select(candidates);

  let mut out = String::with_capacity(text.len());
  let mut replacements = Vec::new();
  let mut cursor = 0;

  for candidate in selected {
    let original = &text[candidate.start..candidate.end];

    let (representative, category, source) = match representative(indices, &candidate, config) {
      Ok(resolved) => resolved,

      Err(err) => {
        tracing::warn!(error = err.to_string(), surface = original, "could not resolve representative, leaving span unchanged");
        continue;
      }
    };

    if representative == original {
      continue;
    }

    tracing::debug!(original, replacement = representative, %source, "replacing span");

    counter!("yure_replacements_total", "source" => source.to_string()).increment(1);

    out.push_str(&text[cursor..candidate.start]);
    out.push_str(representative);
    cursor = candidate.end;

    replacements.push(Replacement {
      start: candidate.start,
      end: candidate.end,
      original: CompactString::from(original),
      replacement: CompactString::from(representative),
      category,
      source,
    });
  }

  out.push_str(&text[cursor..]);

  Normalized { text: out, replacements }
}

fn representative<'i>(indices: &'i Indices, candidate: &Candidate<'i>, config: &NormalizerConfig) -> Result<(&'i str, Option<Category>, Source), YureError> {
  match &candidate.matched {
    Matched::Custom(entry) => {
      let custom = indices.custom.as_deref().ok_or_else(|| YureError::NoRepresentativeFound(format!("custom entry {} without a custom dictionary", entry.surface)))?;

      Ok((custom.representative_for(entry)?, Some(Category::Custom), Source::Custom))
    }

    Matched::Builtin(entries) => {
      let entry = entries.first().ok_or_else(|| YureError::NoRepresentativeFound("empty candidate".into()))?;
      let representative = indices.synonyms.representative_for(entry, config.unify_level)?;

      Ok((representative.surface.as_str(), entry.category(), Source::Builtin))
    }
  }
}
