use std::path::PathBuf;

use axum::{
  Router,
  middleware,
  routing::{get, post},
};
use libyure::prelude::*;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

use crate::{
  api::{config::Config, errors::AppError},
  trace,
};

pub mod config;
pub mod dto;
pub mod errors;

pub mod handlers;
mod middlewares;

pub type SharedNormalizer = Normalizer<Box<dyn Tokenizer>>;

#[derive(Clone)]
pub struct AppState {
  pub config: Config,
  pub prometheus: Option<PrometheusHandle>,
  pub normalizer: SharedNormalizer,
}

pub async fn routes(config: &Config) -> anyhow::Result<Router> {
  let synonyms = SynonymDictionary::from_path(&config.synonym_file)?;

  let custom = match &config.custom_synonym_file {
    Some(path) => Some(CustomDictionary::from_path(path)?),
    None => None,
  };

  let normalizer = Normalizer::new(tokenizer(config)?).synonyms(synonyms).maybe_custom(custom).build()?;

  if let (Some(path), Some(interval)) = (config.custom_synonym_file.clone(), config.custom_reload_interval) {
    tokio::spawn({
      let normalizer = normalizer.clone();

      async move {
        loop {
          tokio::time::sleep(interval).await;

          if let Err(err) = reload_custom(&normalizer, path.clone()).await {
            tracing::warn!(error = err.to_string(), path = %path.display(), "could not reload custom dictionary, keeping the previous one");
          }
        }
      }
    });
  }

  let prometheus = match config.enable_prometheus {
    true => Some(trace::build_prometheus()?),
    false => None,
  };

  let state = AppState {
    config: config.clone(),
    prometheus,
    normalizer,
  };

  Ok(router(state))
}

/// The morphological analyzer when a system dictionary is configured, the
/// script splitter otherwise.
pub fn tokenizer(config: &Config) -> anyhow::Result<Box<dyn Tokenizer>> {
  match &config.tokenizer_dictionary {
    Some(path) => Ok(Box::new(LinderaTokenizer::from_path(path)?)),

    None => {
      tracing::warn!("TOKENIZER_DICTIONARY is not set, segmenting on script changes without lemmas");

      Ok(Box::new(ScriptTokenizer))
    }
  }
}

pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/normalize", post(handlers::normalize))
    .route("/normalize/batch", post(handlers::normalize_batch))
    .route("/dictionary/reload", post(handlers::reload_dictionary))
    .route("/synonyms/{surface}", get(handlers::synonyms))
    .fallback(handlers::not_found)
    .layer(middleware::from_fn(middlewares::metrics))
    .layer(TraceLayer::new_for_http().make_span_with(middlewares::create_request_span))
    // The routes below will not go through the observability middlewares above
    .route("/healthz", get(handlers::healthz))
    .route("/metrics", get(handlers::prometheus))
    .layer(middleware::from_fn(middlewares::logging::api_logger))
    .layer(middleware::from_fn(middlewares::request_id))
    .with_state(state)
}

/// Load the custom dictionary from `path` and publish it.
///
/// The previous dictionary stays in place if loading fails. Returns the
/// number of registered surfaces and of skipped rows.
pub(crate) async fn reload_custom(normalizer: &SharedNormalizer, path: PathBuf) -> Result<(usize, usize), AppError> {
  let normalizer = normalizer.clone();

  tokio::task::spawn_blocking(move || -> Result<(usize, usize), AppError> {
    let custom = normalizer.reload_custom_with(|| CustomDictionary::from_path(&path))?;

    Ok((custom.len(), custom.warnings().len()))
  })
  .await
  .map_err(|err| AppError::OtherError(err.into()))?
}
