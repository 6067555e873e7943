use std::{
  env::{self, VarError},
  fmt::Display,
  path::PathBuf,
  str::FromStr,
  time::Duration,
};

use crate::api::errors::AppError;

#[derive(Clone, Debug)]
pub struct Config {
  pub env: Env,
  pub listen_addr: String,

  // Dictionaries
  pub synonym_file: PathBuf,
  pub custom_synonym_file: Option<PathBuf>,
  pub custom_reload_interval: Option<Duration>,
  pub tokenizer_dictionary: Option<PathBuf>,

  // Debugging
  pub enable_prometheus: bool,
}

impl Default for Config {
  fn default() -> Config {
    Config {
      env: Env::Dev,
      listen_addr: "0.0.0.0:8000".into(),
      synonym_file: PathBuf::from("synonyms.txt"),
      custom_synonym_file: None,
      custom_reload_interval: None,
      tokenizer_dictionary: None,
      enable_prometheus: false,
    }
  }
}

impl Config {
  pub fn from_env() -> Result<Config, AppError> {
    let config = Config {
      env: Env::from(env::var("ENV").unwrap_or("dev".into())),
      listen_addr: env::var("LISTEN_ADDR").unwrap_or("0.0.0.0:8000".into()),
      synonym_file: parse_env("SYNONYM_FILE", PathBuf::from("synonyms.txt"))?,
      custom_synonym_file: env::var("CUSTOM_SYNONYM_FILE").ok().filter(|path| !path.is_empty()).map(PathBuf::from),
      custom_reload_interval: match parse_env::<u64>("CUSTOM_RELOAD_INTERVAL", 0)? {
        0 => None,
        seconds => Some(Duration::from_secs(seconds)),
      },
      tokenizer_dictionary: env::var("TOKENIZER_DICTIONARY").ok().filter(|path| !path.is_empty()).map(PathBuf::from),
      enable_prometheus: env::var("ENABLE_PROMETHEUS").unwrap_or_default() == "1",
    };

    if config.custom_reload_interval.is_some() && config.custom_synonym_file.is_none() {
      return Err(AppError::ConfigError("CUSTOM_RELOAD_INTERVAL requires CUSTOM_SYNONYM_FILE to be set".into()));
    }

    Ok(config)
  }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Env {
  Dev,
  Production,
}

impl From<String> for Env {
  fn from(value: String) -> Self {
    match value.as_ref() {
      "dev" => Env::Dev,
      "production" => Env::Production,
      _ => Env::Dev,
    }
  }
}

pub fn parse_env<T>(name: &str, default: T) -> Result<T, AppError>
where
  T: FromStr,
  T::Err: Display,
{
  match env::var(name) {
    Ok(value) if value.is_empty() => Ok(default),
    Ok(value) => value.parse::<T>().map_err(|err| AppError::ConfigError(format!("could not read {name}: {err}"))),
    Err(err) => match err {
      VarError::NotPresent => Ok(default),
      _ => Err(AppError::ConfigError(format!("could not read {name}: {err}"))),
    },
  }
}
