use libyure::prelude::*;
use serde::{Deserialize, Serialize};
use serde_inline_default::serde_inline_default;
use validator::Validate;

#[serde_inline_default]
#[derive(Clone, Debug, Deserialize, Validate)]
pub(crate) struct NormalizePayload {
  #[validate(length(min = 1, message = "text must not be empty"))]
  pub text: String,
  #[serde(default)]
  pub config: Option<NormalizerConfig>,
  #[serde_inline_default(false)]
  pub details: bool,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub(crate) struct BatchPayload {
  #[validate(length(min = 1, message = "at least one text must be provided"))]
  pub texts: Vec<String>,
  #[serde(default)]
  pub config: Option<NormalizerConfig>,
}

#[derive(Serialize)]
pub(super) struct NormalizeResponse {
  pub text: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub replacements: Option<Vec<Replacement>>,
}

#[derive(Serialize)]
pub(super) struct BatchResponse {
  pub results: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct SynonymsParams {
  #[serde(default)]
  pub unify_level: UnifyLevel,
}

#[derive(Serialize)]
pub(super) struct SynonymsResponse {
  pub surface: String,
  pub unify_level: UnifyLevel,
  pub synonyms: Vec<String>,
}

#[derive(Serialize)]
pub(super) struct ReloadResponse {
  pub entries: usize,
  pub warnings: usize,
}
