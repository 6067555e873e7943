use axum::{
  Json,
  extract::{Path, Query, State, rejection::QueryRejection},
  response::IntoResponse,
};
use tracing::instrument;

use crate::api::{
  self, AppState,
  dto::{ReloadResponse, SynonymsParams, SynonymsResponse},
  errors::AppError,
};

#[instrument(skip_all)]
pub async fn reload_dictionary(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
  let Some(path) = state.config.custom_synonym_file.clone() else {
    return Err(AppError::ResourceNotFound);
  };

  let (entries, warnings) = api::reload_custom(&state.normalizer, path).await?;

  Ok(Json(ReloadResponse { entries, warnings }))
}

#[instrument(skip_all)]
pub async fn synonyms(State(state): State<AppState>, Path(surface): Path<String>, query: Result<Query<SynonymsParams>, QueryRejection>) -> Result<impl IntoResponse, AppError> {
  let Query(params) = query?;
  let synonyms = state.normalizer.synonyms(&surface, params.unify_level);

  Ok(Json(SynonymsResponse {
    surface,
    unify_level: params.unify_level,
    synonyms,
  }))
}
