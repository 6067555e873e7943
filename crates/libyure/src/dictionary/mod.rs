use std::{collections::HashMap, fs::File, io::Read, path::Path};

use ahash::RandomState;
use anyhow::Context;
use compact_str::CompactString;
use itertools::Itertools;

use crate::{
  config::UnifyLevel,
  error::YureError,
  model::{DictionaryEntry, GroupKey},
};

pub(crate) mod loader;

const LEVELS: [UnifyLevel; 3] = [UnifyLevel::Lexeme, UnifyLevel::WordForm, UnifyLevel::Abbreviation];

/// Index over a synonym table.
///
/// Entries keep their registration order, which decides the representative
/// when the table carries more than one candidate for the same group. The
/// index is immutable once built.
#[derive(Debug, Default)]
pub struct SynonymDictionary {
  entries: Vec<DictionaryEntry>,
  by_surface: HashMap<CompactString, Vec<usize>, RandomState>,
  by_lexeme: HashMap<GroupKey, Vec<usize>, RandomState>,
  representatives: HashMap<GroupKey, usize, RandomState>,
  warnings: Vec<YureError>,
}

impl SynonymDictionary {
  /// Load a synonym table from a file.
  pub fn from_path<P: AsRef<Path>>(path: P) -> Result<SynonymDictionary, YureError> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("could not open synonym dictionary at {}", path.display()))?;

    let dictionary = SynonymDictionary::from_reader(file)?;

    tracing::info!(path = %path.display(), entries = dictionary.len(), skipped = dictionary.warnings.len(), "loaded synonym dictionary");

    Ok(dictionary)
  }

  /// Load a synonym table from any CSV source.
  pub fn from_reader<R: Read>(reader: R) -> Result<SynonymDictionary, YureError> {
    SynonymDictionary::from_numbered_rows(loader::read_rows(reader))
  }

  /// Build the index from rows already split into columns.
  ///
  /// Rows are numbered from 1 in iteration order. Malformed rows are skipped
  /// and kept in [`SynonymDictionary::warnings`]; the build only fails when no
  /// row at all could be used.
  pub fn build<I, R, S>(rows: I) -> Result<SynonymDictionary, YureError>
  where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
  {
    let rows = rows.into_iter().enumerate().map(|(index, row)| Ok((index + 1, row.as_ref().iter().map(|field| field.as_ref().to_string()).collect())));

    SynonymDictionary::from_numbered_rows(rows)
  }

  fn from_numbered_rows(rows: impl Iterator<Item = Result<(usize, Vec<String>), YureError>>) -> Result<SynonymDictionary, YureError> {
    let mut dictionary = SynonymDictionary::default();

    for row in rows {
      match row.and_then(|(line, fields)| loader::parse_row(line, &fields)) {
        Ok(Some(entry)) => dictionary.insert(entry),
        Ok(None) => {}

        Err(err) => {
          tracing::warn!(error = err.to_string(), "skipping malformed dictionary row");

          dictionary.warnings.push(err);
        }
      }
    }

    if dictionary.entries.is_empty() {
      return Err(YureError::EmptyDictionary(format!("synonym table yielded no entries ({} malformed rows)", dictionary.warnings.len())));
    }

    Ok(dictionary)
  }

  fn insert(&mut self, entry: DictionaryEntry) {
    let index = self.entries.len();

    for level in LEVELS {
      if !entry.is_representative_at(level) {
        continue;
      }

      let key = entry.group_key(level);

      match self.representatives.get(&key) {
        None => {
          self.representatives.insert(key, index);
        }

        Some(existing) if self.entries[*existing].surface != entry.surface => {
          let existing = &self.entries[*existing].surface;

          tracing::warn!(group = %key, kept = %existing, ignored = %entry.surface, "duplicate representative in synonym group");

          self.warnings.push(YureError::DuplicateRepresentative(format!("{key}, keeping {existing}")));
        }

        Some(_) => {}
      }
    }

    self.by_surface.entry(entry.surface.clone()).or_default().push(index);
    self.by_lexeme.entry(entry.group_key(UnifyLevel::Lexeme)).or_default().push(index);
    self.entries.push(entry);
  }

  /// Every entry whose surface is exactly `surface`.
  pub fn lookup<'d>(&'d self, surface: &str) -> impl Iterator<Item = &'d DictionaryEntry> + use<'d> {
    self.by_surface.get(surface).into_iter().flatten().map(move |index| &self.entries[*index])
  }

  /// The entry standing for the group of `entry` at `level`.
  pub fn representative_for(&self, entry: &DictionaryEntry, level: UnifyLevel) -> Result<&DictionaryEntry, YureError> {
    let key = entry.group_key(level);

    self.representatives.get(&key).map(|index| &self.entries[*index]).ok_or_else(|| YureError::NoRepresentativeFound(key.to_string()))
  }

  /// Surfaces sharing a group with `surface` at `level`, in table order.
  ///
  /// The queried surface is included when it belongs to the group.
  pub fn synonyms_of(&self, surface: &str, level: UnifyLevel) -> Vec<&DictionaryEntry> {
    self
      .lookup(surface)
      .flat_map(move |entry| {
        let key = entry.group_key(level);

        self
          .by_lexeme
          .get(&entry.group_key(UnifyLevel::Lexeme))
          .into_iter()
          .flatten()
          .map(move |index| &self.entries[*index])
          .filter(move |candidate| candidate.group_key(level) == key)
      })
      .unique_by(|entry| entry.surface.clone())
      .collect()
  }

  pub(crate) fn surfaces(&self) -> impl Iterator<Item = &CompactString> {
    self.by_surface.keys()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Recoverable problems met while loading.
  pub fn warnings(&self) -> &[YureError] {
    &self.warnings
  }
}
