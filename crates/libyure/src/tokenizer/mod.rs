use compact_str::CompactString;
use serde::Serialize;

use crate::model::PartOfSpeech;

mod lindera;
mod script;

pub use self::lindera::LinderaTokenizer;
pub use script::ScriptTokenizer;

/// One unit of segmented text.
///
/// `start` and `end` are byte offsets into the text that was tokenized, and
/// `surface` is exactly `text[start..end]`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Morpheme {
  pub surface: CompactString,
  /// Dictionary (citation) form. Equal to `surface` when the segmenter does
  /// not know better.
  pub lemma: CompactString,
  pub pos: PartOfSpeech,
  pub start: usize,
  pub end: usize,
}

/// Segments text into morphemes.
///
/// Morphemes must be in text order and must not overlap. Text between two
/// morphemes is treated as a gap and is never part of a match.
pub trait Tokenizer: Send + Sync {
  fn tokenize(&self, text: &str) -> Vec<Morpheme>;

  fn name(&self) -> &'static str;

  /// Whether [`Morpheme::lemma`] carries real citation forms. Predicate
  /// normalization is skipped when it does not.
  fn provides_lemmas(&self) -> bool {
    true
  }
}

impl<T: Tokenizer + ?Sized> Tokenizer for Box<T> {
  fn tokenize(&self, text: &str) -> Vec<Morpheme> {
    (**self).tokenize(text)
  }

  fn name(&self) -> &'static str {
    (**self).name()
  }

  fn provides_lemmas(&self) -> bool {
    (**self).provides_lemmas()
  }
}

/// Check that `morphemes` can be trusted as a segmentation of `text`.
pub(crate) fn validate(text: &str, morphemes: &[Morpheme]) -> Result<(), String> {
  let mut cursor = 0;

  for (index, morpheme) in morphemes.iter().enumerate() {
    if morpheme.start < cursor || morpheme.start >= morpheme.end {
      return Err(format!("morpheme {index} is out of order or empty ({}..{})", morpheme.start, morpheme.end));
    }

    match text.get(morpheme.start..morpheme.end) {
      Some(surface) if surface == morpheme.surface => {}
      Some(surface) => return Err(format!("morpheme {index} surface {:?} does not match text {surface:?}", morpheme.surface)),
      None => return Err(format!("morpheme {index} is not on character boundaries ({}..{})", morpheme.start, morpheme.end)),
    }

    cursor = morpheme.end;
  }

  Ok(())
}
