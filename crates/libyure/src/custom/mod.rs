use std::{collections::HashMap, fs::File, io::Read, path::Path};

use ahash::RandomState;
use anyhow::Context;
use compact_str::CompactString;

use crate::{error::YureError, model::DictionaryEntry};

mod formats;

pub use formats::{CustomFormat, CustomRow};

/// User-supplied mapping from representatives to their variants.
///
/// Every row becomes one synthetic group. The representative is registered
/// as a surface of its own group, so it is never rewritten by the builtin
/// dictionary either. A surface keeps the first group it was registered in.
#[derive(Debug, Default)]
pub struct CustomDictionary {
  entries: Vec<DictionaryEntry>,
  by_surface: HashMap<CompactString, usize, RandomState>,
  representatives: Vec<CompactString>,
  warnings: Vec<YureError>,
}

impl CustomDictionary {
  /// Load a custom dictionary, picking the format from the file extension.
  pub fn from_path<P: AsRef<Path>>(path: P) -> Result<CustomDictionary, YureError> {
    let path = path.as_ref();
    let format = CustomFormat::from_path(path)?;
    let file = File::open(path).with_context(|| format!("could not open custom dictionary at {}", path.display()))?;

    let dictionary = CustomDictionary::from_reader(file, format)?;

    tracing::info!(path = %path.display(), ?format, groups = dictionary.representatives.len(), entries = dictionary.len(), "loaded custom dictionary");

    Ok(dictionary)
  }

  pub fn from_reader<R: Read>(reader: R, format: CustomFormat) -> Result<CustomDictionary, YureError> {
    let parsed = formats::parse(reader, format)?;

    CustomDictionary::build_with_errors(parsed.rows, parsed.errors)
  }

  /// Build from in-memory `(representative, variants)` pairs.
  pub fn from_mapping<I, K, V, S>(mapping: I) -> Result<CustomDictionary, YureError>
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let rows = mapping.into_iter().enumerate().map(|(index, (representative, variants))| CustomRow {
      line: index + 1,
      representative: representative.into(),
      variants: variants.into_iter().map(Into::into).collect(),
    });

    CustomDictionary::build(rows)
  }

  pub fn build<I: IntoIterator<Item = CustomRow>>(rows: I) -> Result<CustomDictionary, YureError> {
    CustomDictionary::build_with_errors(rows, Vec::new())
  }

  fn build_with_errors<I: IntoIterator<Item = CustomRow>>(rows: I, errors: Vec<YureError>) -> Result<CustomDictionary, YureError> {
    let mut dictionary = CustomDictionary::default();

    for err in errors {
      tracing::warn!(error = err.to_string(), "skipping malformed custom dictionary entry");

      dictionary.warnings.push(err);
    }

    for row in rows {
      let representative = row.representative.trim();

      if representative.is_empty() {
        let err = YureError::MalformedCustomDictionary(format!("entry {}: empty representative", row.line));

        tracing::warn!(error = err.to_string(), "skipping malformed custom dictionary entry");

        dictionary.warnings.push(err);
        continue;
      }

      let group_id = dictionary.representatives.len() as u32;

      dictionary.representatives.push(CompactString::from(representative));

      for surface in std::iter::once(representative).chain(row.variants.iter().map(|variant| variant.trim())) {
        dictionary.insert(row.line, surface, group_id);
      }
    }

    if dictionary.representatives.is_empty() {
      return Err(YureError::MalformedCustomDictionary(format!("no usable entries ({} malformed)", dictionary.warnings.len())));
    }

    Ok(dictionary)
  }

  fn insert(&mut self, line: usize, surface: &str, group_id: u32) {
    if surface.is_empty() {
      return;
    }

    if let Some(existing) = self.by_surface.get(surface) {
      let existing = &self.entries[*existing];

      if existing.group_id != group_id {
        let kept = &self.representatives[existing.group_id as usize];

        tracing::warn!(line, surface, kept = %kept, "custom surface registered twice, keeping first mapping");

        self.warnings.push(YureError::MalformedCustomDictionary(format!("entry {line}: {surface} already maps to {kept}")));
      }

      return;
    }

    self.by_surface.insert(CompactString::from(surface), self.entries.len());
    self.entries.push(DictionaryEntry::custom(surface, group_id));
  }

  pub fn lookup(&self, surface: &str) -> Option<&DictionaryEntry> {
    self.by_surface.get(surface).map(|index| &self.entries[*index])
  }

  /// The mapping key of the row `entry` was registered from.
  pub fn representative_for(&self, entry: &DictionaryEntry) -> Result<&str, YureError> {
    self
      .representatives
      .get(entry.group_id as usize)
      .map(CompactString::as_str)
      .ok_or_else(|| YureError::NoRepresentativeFound(format!("custom group {}", entry.group_id)))
  }

  pub(crate) fn surfaces(&self) -> impl Iterator<Item = &CompactString> {
    self.by_surface.keys()
  }

  /// Number of registered surfaces, representatives included.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn warnings(&self) -> &[YureError] {
    &self.warnings
  }
}
