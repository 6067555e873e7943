use std::{borrow::Cow, fmt, path::Path};

use compact_str::CompactString;
use lindera::{
  dictionary::{Dictionary, DictionaryBuilder, Metadata, load_fs_dictionary},
  mode::Mode,
  segmenter::Segmenter,
};

use crate::{error::YureError, model::PartOfSpeech};

use super::{Morpheme, Tokenizer};

const POS_FIELD: usize = 0;
const BASE_FORM_FIELD: usize = 6;

/// Morphological analyzer backed by a compiled lindera system dictionary.
///
/// Feature columns are read with the IPADIC layout: the first one is the
/// major part of speech and the seventh is the base form. Nouns are taigen,
/// verbs and adjectives are yougen.
pub struct LinderaTokenizer {
  segmenter: Segmenter,
}

impl LinderaTokenizer {
  pub fn new(dictionary: Dictionary) -> LinderaTokenizer {
    LinderaTokenizer {
      segmenter: Segmenter::new(Mode::Normal, dictionary, None),
    }
  }

  /// Load the compiled dictionary stored in the `path` directory.
  pub fn from_path(path: impl AsRef<Path>) -> Result<LinderaTokenizer, YureError> {
    let path = path.as_ref();

    let dictionary = load_fs_dictionary(path).map_err(|err| YureError::TokenizerDictionary {
      path: path.display().to_string(),
      reason: err.to_string(),
    })?;

    tracing::info!(path = %path.display(), "loaded tokenizer dictionary");

    Ok(LinderaTokenizer::new(dictionary))
  }

  /// Compile MeCab-format sources (`char.def`, `unk.def`, `matrix.def` and
  /// `*.csv` lexicons in the IPADIC column layout) from `source` into a
  /// dictionary directory at `output`.
  pub fn compile(source: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<(), YureError> {
    let (source, output) = (source.as_ref(), output.as_ref());

    DictionaryBuilder::new(Metadata::default())
      .build_dictionary(source, output)
      .map_err(|err| YureError::TokenizerDictionary {
        path: source.display().to_string(),
        reason: err.to_string(),
      })
  }
}

impl fmt::Debug for LinderaTokenizer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LinderaTokenizer").finish_non_exhaustive()
  }
}

impl Tokenizer for LinderaTokenizer {
  fn tokenize(&self, text: &str) -> Vec<Morpheme> {
    let tokens = match self.segmenter.segment(Cow::Borrowed(text)) {
      Ok(tokens) => tokens,
      Err(err) => {
        tracing::warn!(error = err.to_string(), "could not segment text");

        return Vec::new();
      }
    };

    let mut morphemes = Vec::with_capacity(tokens.len());

    for mut token in tokens {
      if token.surface.trim().is_empty() {
        continue;
      }

      let pos = part_of_speech(token.get_detail(POS_FIELD));
      let lemma = token.get_detail(BASE_FORM_FIELD).filter(|lemma| !lemma.is_empty() && *lemma != "*").map(CompactString::from);
      let surface = CompactString::from(token.surface.as_ref());

      morphemes.push(Morpheme {
        lemma: lemma.unwrap_or_else(|| surface.clone()),
        surface,
        pos,
        start: token.byte_start,
        end: token.byte_end,
      });
    }

    morphemes
  }

  fn name(&self) -> &'static str {
    "lindera"
  }
}

fn part_of_speech(major: Option<&str>) -> PartOfSpeech {
  match major {
    Some("名詞") => PartOfSpeech::Taigen,
    Some("動詞" | "形容詞") => PartOfSpeech::Yougen,
    _ => PartOfSpeech::Other,
  }
}

#[cfg(test)]
mod tests {
  use crate::{
    model::PartOfSpeech,
    tests::lindera_tokenizer,
    tokenizer::{Tokenizer, validate},
  };

  use super::LinderaTokenizer;

  fn split(tokenizer: &LinderaTokenizer, text: &str) -> Vec<(String, String, PartOfSpeech)> {
    tokenizer
      .tokenize(text)
      .into_iter()
      .map(|morpheme| (morpheme.surface.to_string(), morpheme.lemma.to_string(), morpheme.pos))
      .collect()
  }

  #[test]
  fn hiragana_words_are_split_from_particles() {
    let (_directory, tokenizer) = lindera_tokenizer();

    assert_eq!(
      split(&tokenizer, "ゆうはくが好き"),
      vec![
        ("ゆうはく".into(), "ゆうはく".into(), PartOfSpeech::Taigen),
        ("が".into(), "が".into(), PartOfSpeech::Other),
        ("好き".into(), "好き".into(), PartOfSpeech::Taigen),
      ]
    );
  }

  #[test]
  fn kanji_runs_and_inflections() {
    let (_directory, tokenizer) = lindera_tokenizer();
    let text = "昨日幽白を読んだ";
    let morphemes = tokenizer.tokenize(text);

    assert_eq!(
      morphemes.iter().map(|morpheme| morpheme.surface.as_str()).collect::<Vec<_>>(),
      vec!["昨日", "幽白", "を", "読ん", "だ"]
    );
    assert_eq!(morphemes[3].lemma, "読む");
    assert_eq!(morphemes[3].pos, PartOfSpeech::Yougen);
    assert_eq!((morphemes[1].start, morphemes[1].end), (6, 12));
    assert!(validate(text, &morphemes).is_ok());
  }

  #[test]
  fn compounds_expose_their_parts() {
    let (_directory, tokenizer) = lindera_tokenizer();

    assert_eq!(
      tokenizer.tokenize("江戸時代のパソコンショップ").into_iter().map(|morpheme| morpheme.surface.to_string()).collect::<Vec<_>>(),
      vec!["江戸", "時代", "の", "パソコン", "ショップ"]
    );
  }

  #[test]
  fn unknown_words_fall_back_to_their_surface() {
    let (_directory, tokenizer) = lindera_tokenizer();
    let text = "ゆうはく　ゾンビ";
    let morphemes = tokenizer.tokenize(text);

    assert_eq!(morphemes.iter().map(|morpheme| morpheme.surface.as_str()).collect::<Vec<_>>(), vec!["ゆうはく", "ゾンビ"]);
    assert_eq!(morphemes[1].lemma, "ゾンビ");
    assert_eq!(morphemes[1].pos, PartOfSpeech::Taigen);
    assert!(validate(text, &morphemes).is_ok());
  }

  #[test]
  fn metadata() {
    let (_directory, tokenizer) = lindera_tokenizer();

    assert_eq!(tokenizer.name(), "lindera");
    assert!(tokenizer.provides_lemmas());
    assert!(tokenizer.tokenize("").is_empty());
  }

  #[test]
  fn missing_dictionary() {
    let directory = tempfile::tempdir().unwrap();

    assert!(LinderaTokenizer::from_path(directory.path().join("missing")).is_err());
    assert!(LinderaTokenizer::compile(directory.path().join("missing"), directory.path().join("out")).is_err());
  }
}
