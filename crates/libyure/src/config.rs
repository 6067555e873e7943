use std::str::FromStr;

use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_inline_default::serde_inline_default;

use crate::{
  error::YureError,
  model::{Category, DictionaryEntry, ExpansionFlag, PartOfSpeech, Source},
};

/// Which id-tuple prefix defines "same group" when picking a representative.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum UnifyLevel {
  /// Coarsest: every entry of the lexeme collapses to its representative.
  #[default]
  #[serde(rename = "lexeme")]
  Lexeme,
  #[serde(rename = "word_form")]
  WordForm,
  /// Finest: only spelling variants of the same abbreviation collapse.
  #[serde(rename = "abbreviation")]
  Abbreviation,
}

impl FromStr for UnifyLevel {
  type Err = YureError;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "lexeme" => Ok(UnifyLevel::Lexeme),
      "word_form" => Ok(UnifyLevel::WordForm),
      "abbreviation" => Ok(UnifyLevel::Abbreviation),
      other => Err(YureError::InvalidConfiguration(format!("unknown unify level: {other}"))),
    }
  }
}

impl std::fmt::Display for UnifyLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(match self {
      UnifyLevel::Lexeme => "lexeme",
      UnifyLevel::WordForm => "word_form",
      UnifyLevel::Abbreviation => "abbreviation",
    })
  }
}

/// Expansion policy applied to the dictionary's expansion control flag.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum Expansion {
  /// Only entries flagged for unconditional expansion are rewritten.
  #[default]
  #[serde(rename = "from_another")]
  FromAnother,
  /// Entries that only expand from another headword are rewritten too.
  #[serde(rename = "any")]
  Any,
}

impl Expansion {
  pub(crate) fn allows(&self, flag: ExpansionFlag) -> bool {
    match (self, flag) {
      (_, ExpansionFlag::Never) => false,
      (_, ExpansionFlag::Always) => true,
      (Expansion::Any, ExpansionFlag::FromAnother) => true,
      (Expansion::FromAnother, ExpansionFlag::FromAnother) => false,
    }
  }
}

impl FromStr for Expansion {
  type Err = YureError;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "from_another" => Ok(Expansion::FromAnother),
      "any" => Ok(Expansion::Any),
      other => Err(YureError::InvalidConfiguration(format!("unknown expansion policy: {other}"))),
    }
  }
}

/// Normalization options.
///
/// Every option has a default, so an empty JSON object or
/// `NormalizerConfig::default()` gives the standard behavior: lexeme-level
/// unification of nouns, every category enabled, custom synonyms on.
///
/// ```rust
/// # use libyure::prelude::*;
/// let config = NormalizerConfig::builder().unify_level(UnifyLevel::WordForm).orthographic_variation(false).build();
///
/// assert!(config.taigen);
/// assert!(!config.orthographic_variation);
/// ```
#[serde_inline_default]
#[derive(Builder, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NormalizerConfig {
  #[serde(default)]
  #[builder(default)]
  pub unify_level: UnifyLevel,
  #[serde_inline_default(true)]
  #[builder(default = true)]
  pub taigen: bool,
  #[serde_inline_default(false)]
  #[builder(default = false)]
  pub yougen: bool,
  #[serde(default)]
  #[builder(default)]
  pub expansion: Expansion,
  #[serde_inline_default(true)]
  #[builder(default = true)]
  pub other_language: bool,
  #[serde_inline_default(true)]
  #[builder(default = true)]
  pub alias: bool,
  #[serde_inline_default(true)]
  #[builder(default = true)]
  pub old_name: bool,
  #[serde_inline_default(true)]
  #[builder(default = true)]
  pub misuse: bool,
  #[serde_inline_default(true)]
  #[builder(default = true)]
  pub alphabetic_abbreviation: bool,
  #[serde_inline_default(true)]
  #[builder(default = true)]
  pub non_alphabetic_abbreviation: bool,
  #[serde_inline_default(true)]
  #[builder(default = true)]
  pub alphabet: bool,
  #[serde_inline_default(true)]
  #[builder(default = true)]
  pub orthographic_variation: bool,
  #[serde_inline_default(true)]
  #[builder(default = true)]
  pub misspelling: bool,
  #[serde_inline_default(true)]
  #[builder(default = true)]
  pub custom_synonym: bool,
}

impl Default for NormalizerConfig {
  fn default() -> Self {
    NormalizerConfig::builder().build()
  }
}

impl NormalizerConfig {
  pub fn from_json(json: &str) -> Result<NormalizerConfig, YureError> {
    serde_json::from_str(json).map_err(|err| YureError::InvalidConfiguration(err.to_string()))
  }

  pub fn is_enabled(&self, category: Category) -> bool {
    match category {
      Category::OtherLanguage => self.other_language,
      Category::Alias => self.alias,
      Category::OldName => self.old_name,
      Category::Misuse => self.misuse,
      Category::AlphabeticAbbreviation => self.alphabetic_abbreviation,
      Category::NonAlphabeticAbbreviation => self.non_alphabetic_abbreviation,
      Category::AlphabetVariant => self.alphabet,
      Category::OrthographicVariation => self.orthographic_variation,
      Category::Misspelling => self.misspelling,
      Category::Custom => self.custom_synonym,
    }
  }

  pub(crate) fn includes(&self, pos: PartOfSpeech) -> bool {
    match pos {
      PartOfSpeech::Taigen => self.taigen,
      PartOfSpeech::Yougen => self.yougen,
      PartOfSpeech::Other => false,
    }
  }

  /// Whether `entry` survives the part-of-speech, category and expansion filters.
  pub(crate) fn accepts(&self, entry: &DictionaryEntry) -> bool {
    match entry.source {
      Source::Custom => self.custom_synonym,
      Source::Builtin => self.includes(entry.pos) && self.expansion.allows(entry.expansion) && entry.categories().all(|category| self.is_enabled(category)),
    }
  }

  /// Nothing can be rewritten under this configuration.
  pub(crate) fn is_noop(&self) -> bool {
    !self.taigen && !self.yougen && !self.custom_synonym
  }
}

#[cfg(test)]
mod tests {
  use crate::{
    error::YureError,
    model::{ExpansionFlag, PartOfSpeech},
    tests::entry,
  };

  use super::{Expansion, NormalizerConfig, UnifyLevel};

  #[test]
  fn defaults() {
    let config = NormalizerConfig::default();

    assert_eq!(config, NormalizerConfig::from_json("{}").unwrap());
    assert_eq!(config.unify_level, UnifyLevel::Lexeme);
    assert_eq!(config.expansion, Expansion::FromAnother);
    assert!(config.taigen);
    assert!(!config.yougen);
    assert!(config.custom_synonym);
  }

  #[test]
  fn parse_from_json() {
    let config = NormalizerConfig::from_json(r#"{ "unify_level": "word_form", "expansion": "any", "alphabet": false }"#).unwrap();

    assert_eq!(config.unify_level, UnifyLevel::WordForm);
    assert_eq!(config.expansion, Expansion::Any);
    assert!(!config.alphabet);
    assert!(config.misspelling);
  }

  #[test]
  fn reject_unknown_values() {
    assert!(matches!(NormalizerConfig::from_json(r#"{ "unify_level": "sentence" }"#), Err(YureError::InvalidConfiguration(_))));
    assert!(matches!(NormalizerConfig::from_json(r#"{ "expansion": "not_all" }"#), Err(YureError::InvalidConfiguration(_))));
    assert!(matches!(NormalizerConfig::from_json(r#"{ "unknown_flag": true }"#), Err(YureError::InvalidConfiguration(_))));

    assert!(matches!("sentence".parse::<UnifyLevel>(), Err(YureError::InvalidConfiguration(_))));
    assert_eq!("abbreviation".parse::<UnifyLevel>().unwrap(), UnifyLevel::Abbreviation);
    assert_eq!("any".parse::<Expansion>().unwrap(), Expansion::Any);
  }

  #[test]
  fn expansion_policies() {
    assert!(Expansion::FromAnother.allows(ExpansionFlag::Always));
    assert!(!Expansion::FromAnother.allows(ExpansionFlag::FromAnother));
    assert!(Expansion::Any.allows(ExpansionFlag::FromAnother));
    assert!(!Expansion::Any.allows(ExpansionFlag::Never));
  }

  #[test]
  fn accepts_requires_every_category() {
    let abbreviation = entry("PC", 0, 1, 0);
    let misspelled_abbreviation = entry("ＰＣ", 0, 1, 3);

    let config = NormalizerConfig::builder().misspelling(false).build();

    assert!(config.accepts(&abbreviation));
    assert!(!config.accepts(&misspelled_abbreviation));

    let config = NormalizerConfig::builder().alphabetic_abbreviation(false).build();

    assert!(!config.accepts(&abbreviation));
    assert!(!config.accepts(&misspelled_abbreviation));
  }

  #[test]
  fn accepts_filters_part_of_speech() {
    let mut verb = entry("確める", 0, 0, 2);
    verb.pos = PartOfSpeech::Yougen;

    assert!(!NormalizerConfig::default().accepts(&verb));
    assert!(NormalizerConfig::builder().yougen(true).build().accepts(&verb));
  }

  #[test]
  fn noop() {
    assert!(!NormalizerConfig::default().is_noop());
    assert!(NormalizerConfig::builder().taigen(false).custom_synonym(false).build().is_noop());
  }
}
