use std::{
  sync::{Arc, Mutex, PoisonError, RwLock},
  time::Instant,
};

use bon::bon;
use metrics::histogram;
use tracing::instrument;

use crate::{
  config::{NormalizerConfig, UnifyLevel},
  custom::CustomDictionary,
  dictionary::SynonymDictionary,
  engine::{self, Normalized, index::Indices},
  error::YureError,
  tokenizer::{self, Morpheme, Tokenizer},
};

/// The main entrypoint for normalizing text.
///
/// A normalizer owns a tokenizer and a snapshot of the dictionaries. Every
/// call reads the snapshot that is current when it starts, so dictionaries
/// can be reloaded while other threads keep normalizing.
///
/// This struct can be safely cloned and sent across thread boundaries. Clones
/// share the same dictionaries.
///
/// # Examples
///
/// ```rust
/// # use libyure::prelude::*;
/// let synonyms = SynonymDictionary::from_reader("1,1,0,1,0,0,0,,パーソナルコンピューター\n1,1,0,1,0,2,0,,パソコン\n".as_bytes()).unwrap();
/// let normalizer = Normalizer::new(ScriptTokenizer).synonyms(synonyms).build().unwrap();
///
/// assert_eq!(normalizer.normalize("「パソコン」", &NormalizerConfig::default()), "「パーソナルコンピューター」");
/// ```
#[derive(Debug)]
pub struct Normalizer<T: Tokenizer> {
  tokenizer: Arc<T>,
  indices: Arc<RwLock<Arc<Indices>>>,
  /// Held by reloads from reading the current snapshot until the rebuilt
  /// one is published.
  rebuild: Arc<Mutex<()>>,
}

impl<T: Tokenizer> Clone for Normalizer<T> {
  fn clone(&self) -> Self {
    Normalizer {
      tokenizer: Arc::clone(&self.tokenizer),
      indices: Arc::clone(&self.indices),
      rebuild: Arc::clone(&self.rebuild),
    }
  }
}

#[bon]
impl<T: Tokenizer> Normalizer<T> {
  /// Create a new normalizer.
  ///
  /// Both dictionaries are indexed here, which is the expensive part of the
  /// setup. The custom dictionary is optional.
  #[allow(clippy::new_ret_no_self)]
  #[builder(start_fn = new, finish_fn = build)]
  pub fn _new(#[builder(start_fn)] tokenizer: T, synonyms: SynonymDictionary, custom: Option<CustomDictionary>) -> Result<Normalizer<T>, YureError> {
    let indices = Indices::build(Arc::new(synonyms), custom.map(Arc::new))?;

    Ok(Normalizer {
      tokenizer: Arc::new(tokenizer),
      indices: Arc::new(RwLock::new(Arc::new(indices))),
      rebuild: Arc::default(),
    })
  }
}

impl<T: Tokenizer> Normalizer<T> {
  pub fn tokenizer(&self) -> &T {
    &self.tokenizer
  }

  /// The dictionaries currently in use.
  pub fn snapshot(&self) -> Arc<Indices> {
    Arc::clone(&self.indices.read().unwrap_or_else(PoisonError::into_inner))
  }

  /// Normalize `text`, returning the rewritten string.
  pub fn normalize(&self, text: &str, config: &NormalizerConfig) -> String {
    self.normalize_detailed(text, config).text
  }

  /// Normalize `text`, also returning every replacement that was applied.
  #[instrument(name = "normalize", skip_all, fields(tokenizer = self.tokenizer.name(), length = text.len()))]
  pub fn normalize_detailed(&self, text: &str, config: &NormalizerConfig) -> Normalized {
    if text.is_empty() || config.is_noop() {
      return Normalized::unchanged(text);
    }

    let lemmas = self.tokenizer.provides_lemmas();

    if config.yougen && !lemmas {
      tracing::warn!(tokenizer = self.tokenizer.name(), "tokenizer does not provide lemmas, predicate normalization is skipped");
    }

    let morphemes = self.tokenizer.tokenize(text);

    self.apply(text, &morphemes, config, lemmas)
  }

  /// Normalize `text` using a segmentation computed elsewhere.
  ///
  /// Lemmas carried by `morphemes` are trusted. A segmentation that does not
  /// line up with `text` leaves the text unchanged.
  pub fn normalize_morphemes(&self, text: &str, morphemes: &[Morpheme], config: &NormalizerConfig) -> Normalized {
    if text.is_empty() || config.is_noop() {
      return Normalized::unchanged(text);
    }

    self.apply(text, morphemes, config, true)
  }

  fn apply(&self, text: &str, morphemes: &[Morpheme], config: &NormalizerConfig, lemmas: bool) -> Normalized {
    let start = Instant::now();

    if let Err(reason) = tokenizer::validate(text, morphemes) {
      tracing::warn!(tokenizer = self.tokenizer.name(), reason, "invalid segmentation, leaving text unchanged");

      return Normalized::unchanged(text);
    }

    let result = engine::normalize(&self.snapshot(), text, morphemes, config, lemmas);

    histogram!("yure_normalize_latency_seconds").record(start.elapsed().as_secs_f64());

    result
  }

  /// Surfaces of the builtin dictionary sharing a group with `surface` at
  /// `level`, including `surface` itself when it is known.
  pub fn synonyms(&self, surface: &str, level: UnifyLevel) -> Vec<String> {
    self.snapshot().synonyms.synonyms_of(surface, level).into_iter().map(|entry| entry.surface.to_string()).collect()
  }

  /// Replace the custom dictionary.
  ///
  /// The new index is built before it is published, calls already running
  /// finish against the previous one. Concurrent reloads are applied one
  /// after the other.
  pub fn reload_custom(&self, custom: Option<CustomDictionary>) -> Result<(), YureError> {
    let _rebuild = self.rebuild.lock().unwrap_or_else(PoisonError::into_inner);

    self.rebuild_custom(custom.map(Arc::new))
  }

  /// Load a custom dictionary with `load` and publish it.
  ///
  /// Loading happens under the same lock as the rebuild, so of two reloads
  /// racing on one file, the one that read it last is published last. The
  /// current dictionary stays in place when `load` fails.
  pub fn reload_custom_with<F>(&self, load: F) -> Result<Arc<CustomDictionary>, YureError>
  where
    F: FnOnce() -> Result<CustomDictionary, YureError>,
  {
    let _rebuild = self.rebuild.lock().unwrap_or_else(PoisonError::into_inner);
    let custom = Arc::new(load()?);

    self.rebuild_custom(Some(Arc::clone(&custom)))?;

    Ok(custom)
  }

  fn rebuild_custom(&self, custom: Option<Arc<CustomDictionary>>) -> Result<(), YureError> {
    let synonyms = Arc::clone(&self.snapshot().synonyms);

    self.publish(Indices::build(synonyms, custom)?);

    Ok(())
  }

  /// Replace the builtin synonym dictionary, keeping the custom one.
  pub fn reload_synonyms(&self, synonyms: SynonymDictionary) -> Result<(), YureError> {
    let _rebuild = self.rebuild.lock().unwrap_or_else(PoisonError::into_inner);
    let custom = self.snapshot().custom.clone();

    self.publish(Indices::build(Arc::new(synonyms), custom)?);

    Ok(())
  }

  fn publish(&self, indices: Indices) {
    *self.indices.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(indices);

    tracing::info!("published new normalization index");
  }
}
