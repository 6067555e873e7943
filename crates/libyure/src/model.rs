use compact_str::CompactString;
use serde::Serialize;

use crate::config::UnifyLevel;

/// Morphological class of a dictionary entry or a morpheme.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
  /// Noun-like.
  Taigen,
  /// Predicate-like (verbs and adjectives).
  Yougen,
  Other,
}

impl PartOfSpeech {
  pub(crate) fn from_code(code: u8) -> Option<PartOfSpeech> {
    match code {
      1 => Some(PartOfSpeech::Taigen),
      2 => Some(PartOfSpeech::Yougen),
      _ => None,
    }
  }
}

/// Dictionary-authored bit gating whether an entry triggers its own expansion.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionFlag {
  Always,
  FromAnother,
  Never,
}

impl ExpansionFlag {
  pub(crate) fn from_code(code: u8) -> Option<ExpansionFlag> {
    match code {
      0 => Some(ExpansionFlag::Always),
      1 => Some(ExpansionFlag::FromAnother),
      2 => Some(ExpansionFlag::Never),
      _ => None,
    }
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WordForm {
  Representative,
  OtherLanguage,
  Alias,
  OldName,
  Misuse,
}

impl WordForm {
  pub(crate) fn from_code(code: u8) -> Option<WordForm> {
    match code {
      0 => Some(WordForm::Representative),
      1 => Some(WordForm::OtherLanguage),
      2 => Some(WordForm::Alias),
      3 => Some(WordForm::OldName),
      4 => Some(WordForm::Misuse),
      _ => None,
    }
  }

  fn category(&self) -> Option<Category> {
    match self {
      WordForm::Representative => None,
      WordForm::OtherLanguage => Some(Category::OtherLanguage),
      WordForm::Alias => Some(Category::Alias),
      WordForm::OldName => Some(Category::OldName),
      WordForm::Misuse => Some(Category::Misuse),
    }
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Abbreviation {
  Representative,
  Alphabetic,
  NonAlphabetic,
}

impl Abbreviation {
  pub(crate) fn from_code(code: u8) -> Option<Abbreviation> {
    match code {
      0 => Some(Abbreviation::Representative),
      1 => Some(Abbreviation::Alphabetic),
      2 => Some(Abbreviation::NonAlphabetic),
      _ => None,
    }
  }

  fn category(&self) -> Option<Category> {
    match self {
      Abbreviation::Representative => None,
      Abbreviation::Alphabetic => Some(Category::AlphabeticAbbreviation),
      Abbreviation::NonAlphabetic => Some(Category::NonAlphabeticAbbreviation),
    }
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Spelling {
  Representative,
  Alphabet,
  OrthographicVariation,
  Misspelling,
}

impl Spelling {
  pub(crate) fn from_code(code: u8) -> Option<Spelling> {
    match code {
      0 => Some(Spelling::Representative),
      1 => Some(Spelling::Alphabet),
      2 => Some(Spelling::OrthographicVariation),
      3 => Some(Spelling::Misspelling),
      _ => None,
    }
  }

  fn category(&self) -> Option<Category> {
    match self {
      Spelling::Representative => None,
      Spelling::Alphabet => Some(Category::AlphabetVariant),
      Spelling::OrthographicVariation => Some(Category::OrthographicVariation),
      Spelling::Misspelling => Some(Category::Misspelling),
    }
  }
}

/// Normalization rule class an entry belongs to, used for enable/disable filtering.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
  OtherLanguage,
  Alias,
  OldName,
  Misuse,
  AlphabeticAbbreviation,
  NonAlphabeticAbbreviation,
  #[serde(rename = "alphabet")]
  AlphabetVariant,
  OrthographicVariation,
  Misspelling,
  Custom,
}

impl std::fmt::Display for Category {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(match self {
      Category::OtherLanguage => "other_language",
      Category::Alias => "alias",
      Category::OldName => "old_name",
      Category::Misuse => "misuse",
      Category::AlphabeticAbbreviation => "alphabetic_abbreviation",
      Category::NonAlphabeticAbbreviation => "non_alphabetic_abbreviation",
      Category::AlphabetVariant => "alphabet",
      Category::OrthographicVariation => "orthographic_variation",
      Category::Misspelling => "misspelling",
      Category::Custom => "custom",
    })
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
  Builtin,
  Custom,
}

impl std::fmt::Display for Source {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(match self {
      Source::Builtin => "builtin",
      Source::Custom => "custom",
    })
  }
}

/// One row of a synonym dictionary, builtin or custom.
///
/// `group_id` and `lexeme_id` together identify the lexeme: every entry sharing
/// them is a candidate synonym of the others. `word_form` and `abbreviation`
/// narrow the grouping for the finer unify levels, and `spelling` marks
/// orthographic variants inside the finest group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DictionaryEntry {
  pub surface: CompactString,
  pub group_id: u32,
  pub lexeme_id: u32,
  pub word_form: WordForm,
  pub abbreviation: Abbreviation,
  pub spelling: Spelling,
  pub pos: PartOfSpeech,
  pub expansion: ExpansionFlag,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<CompactString>,
  pub source: Source,
}

impl DictionaryEntry {
  pub(crate) fn custom(surface: impl Into<CompactString>, group_id: u32) -> DictionaryEntry {
    DictionaryEntry {
      surface: surface.into(),
      group_id,
      lexeme_id: 0,
      word_form: WordForm::Representative,
      abbreviation: Abbreviation::Representative,
      spelling: Spelling::Representative,
      pos: PartOfSpeech::Taigen,
      expansion: ExpansionFlag::Always,
      field: None,
      source: Source::Custom,
    }
  }

  pub fn is_representative(&self) -> bool {
    self.word_form == WordForm::Representative && self.abbreviation == Abbreviation::Representative && self.spelling == Spelling::Representative
  }

  /// Whether this entry can stand for its whole group at `level`, i.e. every
  /// column finer than the level is the representative one.
  pub(crate) fn is_representative_at(&self, level: UnifyLevel) -> bool {
    match level {
      UnifyLevel::Lexeme => self.is_representative(),
      UnifyLevel::WordForm => self.abbreviation == Abbreviation::Representative && self.spelling == Spelling::Representative,
      UnifyLevel::Abbreviation => self.spelling == Spelling::Representative,
    }
  }

  /// Every rule class this entry belongs to.
  pub fn categories(&self) -> impl Iterator<Item = Category> + use<> {
    let custom = match self.source {
      Source::Custom => Some(Category::Custom),
      Source::Builtin => None,
    };

    [self.word_form.category(), self.abbreviation.category(), self.spelling.category(), custom].into_iter().flatten()
  }

  /// The finest rule class of this entry, if it is not a representative.
  pub fn category(&self) -> Option<Category> {
    self.categories().last()
  }

  pub(crate) fn group_key(&self, level: UnifyLevel) -> GroupKey {
    GroupKey {
      source: self.source,
      group: self.group_id,
      pos: self.pos,
      lexeme: self.lexeme_id,
      word_form: matches!(level, UnifyLevel::WordForm | UnifyLevel::Abbreviation).then_some(self.word_form),
      abbreviation: matches!(level, UnifyLevel::Abbreviation).then_some(self.abbreviation),
    }
  }
}

/// Identifies the set of entries sharing a representative at a given unify level.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) struct GroupKey {
  source: Source,
  group: u32,
  pos: PartOfSpeech,
  lexeme: u32,
  word_form: Option<WordForm>,
  abbreviation: Option<Abbreviation>,
}

impl std::fmt::Display for GroupKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} group {} lexeme {}", self.source, self.group, self.lexeme)?;

    if let Some(word_form) = self.word_form {
      write!(f, " word form {word_form:?}")?;
    }
    if let Some(abbreviation) = self.abbreviation {
      write!(f, " abbreviation {abbreviation:?}")?;
    }

    Ok(())
  }
}
