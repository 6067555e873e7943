#[derive(Debug, thiserror::Error)]
pub enum YureError {
  #[error("malformed dictionary row at line {line}: {reason}")]
  MalformedDictionaryRow { line: usize, reason: String },
  #[error("malformed custom dictionary: {0}")]
  MalformedCustomDictionary(String),
  #[error("invalid configuration: {0}")]
  InvalidConfiguration(String),
  #[error("no representative found for {0}")]
  NoRepresentativeFound(String),
  #[error("several representatives registered for {0}")]
  DuplicateRepresentative(String),
  #[error("could not load tokenizer dictionary {path}: {reason}")]
  TokenizerDictionary { path: String, reason: String },
  #[error("dictionary has no usable entries: {0}")]
  EmptyDictionary(String),
  #[error(transparent)]
  IoError(#[from] std::io::Error),
  #[error(transparent)]
  CsvError(#[from] csv::Error),
  #[error(transparent)]
  OtherError(#[from] anyhow::Error),
}

impl YureError {
  pub(crate) fn row(line: usize, reason: impl Into<String>) -> YureError {
    YureError::MalformedDictionaryRow { line, reason: reason.into() }
  }
}
