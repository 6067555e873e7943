use libyure::prelude::*;

use crate::api::{AppState, config::Config};


pub(crate) const SYNONYMS: &str = include_str!("../../../libyure/tests/fixtures/synonyms.csv");
pub(crate) const CUSTOM_JSON: &str = include_str!("../../../libyure/tests/fixtures/custom.json");

pub(crate) fn state(config: Config, custom: Option<CustomDictionary>) -> AppState {
  let normalizer = Normalizer::new(Box::new(ScriptTokenizer) as Box<dyn Tokenizer>)
    .synonyms(SynonymDictionary::from_reader(SYNONYMS.as_bytes()).unwrap())
    .maybe_custom(custom)
    .build()
    .unwrap();

  AppState { config, prometheus: None, normalizer }
}
