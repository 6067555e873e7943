use axum::{Json, extract::State, response::IntoResponse};
use itertools::Itertools;
use tracing::{Span, instrument};

use crate::api::{
  AppState,
  dto::{BatchPayload, BatchResponse, NormalizePayload, NormalizeResponse},
  errors::AppError,
  middlewares::json_rejection::TypedJson,
};

#[instrument(skip_all)]
pub async fn normalize(State(state): State<AppState>, TypedJson(body): TypedJson<NormalizePayload>) -> Result<impl IntoResponse, AppError> {
  let NormalizePayload { text, config, details } = body;
  let config = config.unwrap_or_default();
  let normalizer = state.normalizer.clone();
  let span = Span::current();

  let normalized = tokio::task::spawn_blocking(move || span.in_scope(|| normalizer.normalize_detailed(&text, &config)))
    .await
    .map_err(|err| AppError::OtherError(err.into()))?;

  Ok(Json(NormalizeResponse {
    text: normalized.text,
    replacements: details.then_some(normalized.replacements),
  }))
}

#[instrument(skip_all)]
pub async fn normalize_batch(State(state): State<AppState>, TypedJson(body): TypedJson<BatchPayload>) -> Result<impl IntoResponse, AppError> {
  let config = body.config.unwrap_or_default();

  tracing::debug!(texts = body.texts.len(), "normalizing batch");

  let tasks = body.texts.into_iter().map(|text| {
    let normalizer = state.normalizer.clone();
    let config = config.clone();
    let span = Span::current();

    tokio::task::spawn_blocking(move || span.in_scope(|| normalizer.normalize(&text, &config)))
  });

  let mut results = Vec::new();

  for task in tasks.collect_vec() {
    results.push(task.await.map_err(|err| AppError::OtherError(err.into()))?);
  }

  Ok(Json(BatchResponse { results }))
}
