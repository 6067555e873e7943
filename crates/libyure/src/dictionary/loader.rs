use std::io::Read;

use compact_str::CompactString;

use crate::{
  error::YureError,
  model::{Abbreviation, DictionaryEntry, ExpansionFlag, PartOfSpeech, Source, Spelling, WordForm},
};

const MIN_COLUMNS: usize = 9;

/// Read every row of a synonym table, keeping the line each came from.
///
/// Fields are taken verbatim: quotes and `#` are ordinary characters in a
/// surface. Rows the CSV reader cannot decode are returned as errors in place
/// so the caller can skip them without aborting the whole load.
pub(crate) fn read_rows<R: Read>(reader: R) -> impl Iterator<Item = Result<(usize, Vec<String>), YureError>> {
  let reader = csv::ReaderBuilder::new().has_headers(false).flexible(true).quoting(false).from_reader(reader);

  reader.into_records().enumerate().map(|(index, record)| match record {
    Ok(record) => {
      let line = record.position().map(|position| position.line() as usize).unwrap_or(index + 1);

      Ok((line, record.iter().map(ToString::to_string).collect()))
    }

    Err(err) => {
      let line = err.position().map(|position| position.line() as usize).unwrap_or(index + 1);

      Err(YureError::row(line, err.to_string()))
    }
  })
}

/// Parse one row of the table. Blank rows yield `None`.
pub(crate) fn parse_row<S: AsRef<str>>(line: usize, fields: &[S]) -> Result<Option<DictionaryEntry>, YureError> {
  if fields.iter().all(|field| field.as_ref().trim().is_empty()) {
    return Ok(None);
  }

  if fields.len() < MIN_COLUMNS {
    return Err(YureError::row(line, format!("expected at least {MIN_COLUMNS} columns, found {}", fields.len())));
  }

  let column = |index: usize| fields[index].as_ref().trim();

  let group_id = number::<u32>(line, "group", column(0))?;
  let pos = PartOfSpeech::from_code(number(line, "taigen/yougen", column(1))?).ok_or_else(|| YureError::row(line, format!("unknown taigen/yougen code: {}", column(1))))?;
  let expansion = ExpansionFlag::from_code(number(line, "expansion flag", column(2))?).ok_or_else(|| YureError::row(line, format!("unknown expansion flag: {}", column(2))))?;
  let lexeme_id = number::<u32>(line, "lexeme", column(3).split('/').next().unwrap_or_default())?;
  let word_form = WordForm::from_code(number(line, "word form", column(4))?).ok_or_else(|| YureError::row(line, format!("unknown word form: {}", column(4))))?;
  let abbreviation = Abbreviation::from_code(number(line, "abbreviation", column(5))?).ok_or_else(|| YureError::row(line, format!("unknown abbreviation: {}", column(5))))?;
  let spelling = Spelling::from_code(number(line, "spelling variation", column(6))?).ok_or_else(|| YureError::row(line, format!("unknown spelling variation: {}", column(6))))?;

  let surface = column(8);

  if surface.is_empty() {
    return Err(YureError::row(line, "empty surface"));
  }

  let field = match column(7) {
    "" => None,
    field => Some(CompactString::from(field)),
  };

  Ok(Some(DictionaryEntry {
    surface: CompactString::from(surface),
    group_id,
    lexeme_id,
    word_form,
    abbreviation,
    spelling,
    pos,
    expansion,
    field,
    source: Source::Builtin,
  }))
}

fn number<T: std::str::FromStr>(line: usize, name: &str, value: &str) -> Result<T, YureError> {
  value.parse::<T>().map_err(|_| YureError::row(line, format!("non-numeric {name}: {value:?}")))
}

#[cfg(test)]
mod tests {
  use crate::{
    error::YureError,
    model::{Abbreviation, ExpansionFlag, PartOfSpeech, Spelling, WordForm},
  };

  #[test]
  fn parse_sudachi_row() {
    let entry = super::parse_row(1, &["000003", "1", "1", "1/2", "1", "1", "0", "(地名)", "USA", "", ""]).unwrap().unwrap();

    assert_eq!(entry.surface, "USA");
    assert_eq!(entry.group_id, 3);
    assert_eq!(entry.lexeme_id, 1);
    assert_eq!(entry.pos, PartOfSpeech::Taigen);
    assert_eq!(entry.expansion, ExpansionFlag::FromAnother);
    assert_eq!(entry.word_form, WordForm::OtherLanguage);
    assert_eq!(entry.abbreviation, Abbreviation::Alphabetic);
    assert_eq!(entry.spelling, Spelling::Representative);
    assert_eq!(entry.field.as_deref(), Some("(地名)"));
  }

  #[test]
  fn blank_rows_are_skipped() {
    assert!(super::parse_row::<&str>(3, &[""]).unwrap().is_none());
    assert!(super::parse_row::<&str>(3, &[]).unwrap().is_none());
  }

  #[test]
  fn malformed_rows() {
    let cases: [&[&str]; 5] = [
      &["1", "1", "0", "1", "0", "0", "0", ""],
      &["x", "1", "0", "1", "0", "0", "0", "", "テスト"],
      &["1", "3", "0", "1", "0", "0", "0", "", "テスト"],
      &["1", "1", "0", "1", "7", "0", "0", "", "テスト"],
      &["1", "1", "0", "1", "0", "0", "0", "", ""],
    ];

    for fields in cases {
      assert!(matches!(super::parse_row(12, fields), Err(YureError::MalformedDictionaryRow { line: 12, .. })), "{fields:?}");
    }
  }

  #[test]
  fn read_rows_keeps_line_numbers() {
    let rows = super::read_rows("1,1,0,1,0,0,0,,東京\n\n1,1,0,1,3,0,0,,江戸\n".as_bytes()).collect::<Result<Vec<_>, _>>().unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].0, 1);
    assert_eq!(rows[1].0, 3);
    assert_eq!(rows[1].1[8], "江戸");
  }

  #[test]
  fn quotes_and_hashes_are_literal() {
    let rows = super::read_rows("7,1,0,1,0,0,0,,\"引用\"\n8,1,0,1,0,0,0,,#タグ\n9,1,0,1,0,0,0,,C#\n".as_bytes()).collect::<Result<Vec<_>, _>>().unwrap();

    assert_eq!(rows.len(), 3);

    let surfaces = rows.iter().map(|(line, fields)| super::parse_row(*line, fields).unwrap().unwrap().surface).collect::<Vec<_>>();

    assert_eq!(surfaces, vec!["\"引用\"", "#タグ", "C#"]);
  }
}
