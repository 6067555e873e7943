use std::{io::Read, path::Path};

use crate::error::YureError;

/// Encoding of a custom dictionary file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CustomFormat {
  /// `{ "representative": ["variant", ...] }`
  Json,
  /// Same shape as JSON, as a YAML mapping.
  Yaml,
  /// `representative,variant,variant`
  Csv,
  /// `representative<TAB>variant<TAB>variant`
  Tsv,
}

impl CustomFormat {
  /// Pick the format from a file extension.
  pub fn from_path(path: &Path) -> Result<CustomFormat, YureError> {
    let extension = path.extension().and_then(|extension| extension.to_str()).map(str::to_ascii_lowercase);

    match extension.as_deref() {
      Some("json") => Ok(CustomFormat::Json),
      Some("yaml" | "yml") => Ok(CustomFormat::Yaml),
      Some("csv") => Ok(CustomFormat::Csv),
      Some("tsv") => Ok(CustomFormat::Tsv),
      _ => Err(YureError::MalformedCustomDictionary(format!("unsupported custom dictionary format: {}", path.display()))),
    }
  }
}

/// One representative and its variants, whatever file format it came from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CustomRow {
  /// Row number in the delimited formats, key position in the keyed ones.
  pub line: usize,
  pub representative: String,
  pub variants: Vec<String>,
}

/// Rows that could be decoded, and the per-row failures.
pub(crate) struct Parsed {
  pub(crate) rows: Vec<CustomRow>,
  pub(crate) errors: Vec<YureError>,
}

pub(crate) fn parse<R: Read>(reader: R, format: CustomFormat) -> Result<Parsed, YureError> {
  match format {
    CustomFormat::Json => parse_json(reader),
    CustomFormat::Yaml => parse_yaml(reader),
    CustomFormat::Csv => parse_delimited(reader, b','),
    CustomFormat::Tsv => parse_delimited(reader, b'\t'),
  }
}

fn parse_json<R: Read>(reader: R) -> Result<Parsed, YureError> {
  let value: serde_json::Value = serde_json::from_reader(reader).map_err(|err| YureError::MalformedCustomDictionary(err.to_string()))?;

  let serde_json::Value::Object(mapping) = value else {
    return Err(YureError::MalformedCustomDictionary("top-level value must be an object".into()));
  };

  let mut parsed = Parsed { rows: Vec::new(), errors: Vec::new() };

  for (index, (representative, variants)) in mapping.into_iter().enumerate() {
    let line = index + 1;

    let variants = match variants {
      serde_json::Value::Array(variants) => variants
        .into_iter()
        .map(|variant| match variant {
          serde_json::Value::String(variant) => Ok(variant),
          other => Err(malformed(line, &representative, format!("variant is not a string: {other}"))),
        })
        .collect::<Result<Vec<_>, _>>(),

      other => Err(malformed(line, &representative, format!("expected a list of variants, found {other}"))),
    };

    parsed.push(line, representative, variants);
  }

  Ok(parsed)
}

fn parse_yaml<R: Read>(reader: R) -> Result<Parsed, YureError> {
  let value: serde_yaml::Value = serde_yaml::from_reader(reader).map_err(|err| YureError::MalformedCustomDictionary(err.to_string()))?;

  let serde_yaml::Value::Mapping(mapping) = value else {
    return Err(YureError::MalformedCustomDictionary("top-level value must be a mapping".into()));
  };

  let mut parsed = Parsed { rows: Vec::new(), errors: Vec::new() };

  for (index, (representative, variants)) in mapping.into_iter().enumerate() {
    let line = index + 1;

    let Some(representative) = yaml_scalar(representative) else {
      parsed.errors.push(YureError::MalformedCustomDictionary(format!("entry {line}: key is not a string")));
      continue;
    };

    let variants = match variants {
      serde_yaml::Value::Sequence(variants) => variants
        .into_iter()
        .map(|variant| yaml_scalar(variant).ok_or_else(|| malformed(line, &representative, "variant is not a string")))
        .collect::<Result<Vec<_>, _>>(),

      _ => Err(malformed(line, &representative, "expected a list of variants")),
    };

    parsed.push(line, representative, variants);
  }

  Ok(parsed)
}

fn yaml_scalar(value: serde_yaml::Value) -> Option<String> {
  match value {
    serde_yaml::Value::String(value) => Some(value),
    serde_yaml::Value::Number(value) => Some(value.to_string()),
    _ => None,
  }
}

fn parse_delimited<R: Read>(reader: R, delimiter: u8) -> Result<Parsed, YureError> {
  let reader = csv::ReaderBuilder::new().has_headers(false).flexible(true).delimiter(delimiter).from_reader(reader);

  let mut parsed = Parsed { rows: Vec::new(), errors: Vec::new() };

  for (index, record) in reader.into_records().enumerate() {
    let record = match record {
      Ok(record) => record,
      Err(err) => {
        parsed.errors.push(YureError::MalformedCustomDictionary(format!("row {}: {err}", index + 1)));
        continue;
      }
    };

    let line = record.position().map(|position| position.line() as usize).unwrap_or(index + 1);

    if record.len() < 2 {
      parsed.errors.push(YureError::MalformedCustomDictionary(format!("row {line}: expected a representative and at least one more field")));
      continue;
    }

    let representative = record[0].trim().to_string();
    let variants = record.iter().skip(1).map(str::trim).filter(|variant| !variant.is_empty()).map(ToString::to_string).collect();

    parsed.push(line, representative, Ok(variants));
  }

  Ok(parsed)
}

fn malformed(line: usize, representative: &str, reason: impl std::fmt::Display) -> YureError {
  YureError::MalformedCustomDictionary(format!("entry {line} ({representative}): {reason}"))
}

impl Parsed {
  fn push(&mut self, line: usize, representative: String, variants: Result<Vec<String>, YureError>) {
    if representative.trim().is_empty() {
      self.errors.push(YureError::MalformedCustomDictionary(format!("entry {line}: empty representative")));
      return;
    }

    match variants {
      Ok(variants) => self.rows.push(CustomRow { line, representative, variants }),
      Err(err) => self.errors.push(err),
    }
  }
}
