use std::io::{Read, Write};

use crate::{config::NormalizerConfig, error::YureError, normalizer::Normalizer, tokenizer::Tokenizer};

/// Normalize the first column of every row of a CSV document.
///
/// The output is a CSV document with a `raw,normalized` header and one row
/// per non-empty input row. Returns the number of rows written.
pub fn normalize_csv<R, W, T>(reader: R, writer: W, normalizer: &Normalizer<T>, config: &NormalizerConfig) -> Result<usize, YureError>
where
  R: Read,
  W: Write,
  T: Tokenizer,
{
  let mut reader = csv::ReaderBuilder::new().has_headers(false).flexible(true).from_reader(reader);
  let mut writer = csv::Writer::from_writer(writer);
  let mut count = 0;

  writer.write_record(["raw", "normalized"])?;

  for record in reader.records() {
    let record = record?;

    let Some(raw) = record.get(0) else {
      continue;
    };

    writer.write_record([raw, normalizer.normalize(raw, config).as_str()])?;
    count += 1;
  }

  writer.flush()?;

  tracing::info!(rows = count, "normalized csv document");

  Ok(count)
}
