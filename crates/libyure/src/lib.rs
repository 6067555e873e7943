mod config;
mod custom;
mod dictionary;
mod engine;
mod error;
mod model;
mod normalizer;
mod tokenizer;

pub mod batch;

#[cfg(test)]
mod tests;

pub mod prelude {
  pub use crate::config::{Expansion, NormalizerConfig, UnifyLevel};
  pub use crate::custom::{CustomDictionary, CustomFormat, CustomRow};
  pub use crate::dictionary::SynonymDictionary;
  pub use crate::engine::{Normalized, Replacement, index::Indices};
  pub use crate::error::YureError;
  pub use crate::model::{Abbreviation, Category, DictionaryEntry, ExpansionFlag, PartOfSpeech, Source, Spelling, WordForm};
  pub use crate::normalizer::Normalizer;
  pub use crate::tokenizer::{LinderaTokenizer, Morpheme, ScriptTokenizer, Tokenizer};
}
