use compact_str::CompactString;

use crate::{
  model::{Abbreviation, DictionaryEntry, ExpansionFlag, PartOfSpeech, Source, Spelling, WordForm},
  tokenizer::{LinderaTokenizer, Morpheme},
};

pub(crate) const SYNONYMS: &str = include_str!("../../tests/fixtures/synonyms.csv");
pub(crate) const CUSTOM_JSON: &str = include_str!("../../tests/fixtures/custom.json");
pub(crate) const CUSTOM_YAML: &str = include_str!("../../tests/fixtures/custom.yaml");
pub(crate) const CUSTOM_CSV: &str = include_str!("../../tests/fixtures/custom.csv");
pub(crate) const CUSTOM_TSV: &str = include_str!("../../tests/fixtures/custom.tsv");

const LINDERA_SOURCES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/lindera");

/// A tokenizer over the small lexicon in `tests/fixtures/lindera`. The
/// directory holding the compiled dictionary must outlive the tokenizer.
pub(crate) fn lindera_tokenizer() -> (tempfile::TempDir, LinderaTokenizer) {
  let directory = tempfile::tempdir().unwrap();

  LinderaTokenizer::compile(LINDERA_SOURCES, directory.path()).unwrap();

  let tokenizer = LinderaTokenizer::from_path(directory.path()).unwrap();

  (directory, tokenizer)
}

/// A builtin taigen entry of group 1 with the given column codes.
pub(crate) fn entry(surface: &str, word_form: u8, abbreviation: u8, spelling: u8) -> DictionaryEntry {
  DictionaryEntry {
    surface: CompactString::from(surface),
    group_id: 1,
    lexeme_id: 1,
    word_form: WordForm::from_code(word_form).unwrap(),
    abbreviation: Abbreviation::from_code(abbreviation).unwrap(),
    spelling: Spelling::from_code(spelling).unwrap(),
    pos: PartOfSpeech::Taigen,
    expansion: ExpansionFlag::Always,
    field: None,
    source: Source::Builtin,
  }
}

/// Lay `parts` out over `text`, each part starting at the first occurrence
/// after the previous one. Parts are `(surface, lemma, class)`.
pub(crate) fn morphemes(text: &str, parts: &[(&str, &str, PartOfSpeech)]) -> Vec<Morpheme> {
  let mut cursor = 0;

  parts
    .iter()
    .map(|(surface, lemma, pos)| {
      let start = cursor + text[cursor..].find(surface).unwrap();
      cursor = start + surface.len();

      Morpheme {
        surface: CompactString::from(*surface),
        lemma: CompactString::from(*lemma),
        pos: *pos,
        start,
        end: cursor,
      }
    })
    .collect()
}
