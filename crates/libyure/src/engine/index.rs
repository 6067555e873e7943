use std::{sync::Arc, time::Instant};

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use anyhow::Context;
use compact_str::CompactString;
use itertools::Itertools;
use metrics::histogram;

use crate::{custom::CustomDictionary, dictionary::SynonymDictionary, error::YureError};

/// Everything a normalization call reads: both dictionaries and the
/// automaton over all of their surfaces.
///
/// A value is never modified after it is built. Reloading a dictionary builds
/// a new one.
#[derive(Debug)]
pub struct Indices {
  pub(crate) synonyms: Arc<SynonymDictionary>,
  pub(crate) custom: Option<Arc<CustomDictionary>>,
  pub(crate) automaton: AhoCorasick,
}

impl Indices {
  pub(crate) fn build(synonyms: Arc<SynonymDictionary>, custom: Option<Arc<CustomDictionary>>) -> Result<Indices, YureError> {
    let start = Instant::now();

    let patterns = synonyms.surfaces().chain(custom.iter().flat_map(|custom| custom.surfaces())).filter(|surface| !surface.is_empty()).map(CompactString::as_str).unique().collect::<Vec<&str>>();

    let automaton = AhoCorasickBuilder::new()
      .match_kind(MatchKind::Standard)
      .build(&patterns)
      .context("could not build surface automaton")?;

    histogram!("yure_index_build_latency_seconds").record(start.elapsed().as_secs_f64());

    tracing::info!(
      patterns = patterns.len(),
      synonyms = synonyms.len(),
      custom = custom.as_ref().map(|custom| custom.len()).unwrap_or_default(),
      "built normalization index"
    );

    Ok(Indices { synonyms, custom, automaton })
  }

  pub fn synonyms(&self) -> &SynonymDictionary {
    &self.synonyms
  }

  pub fn custom(&self) -> Option<&CustomDictionary> {
    self.custom.as_deref()
  }
}
