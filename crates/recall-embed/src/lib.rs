//! recall-embed
//!
//! Embedding providers. [`EmbeddingProvider`] is chosen once at startup by
//! [`select_provider`] and held for the life of the process; a model that is
//! missing, fails to load, or does not answer within the probe timeout is
//! replaced by the deterministic [`HashEmbedder`] and never retried.

pub mod device;
pub mod fallback;
pub mod model;
pub mod pool;
pub mod tokenize;

use std::path::PathBuf;
use std::time::Duration;

use recall_core::config::{expand_path, EmbeddingSettings};
use recall_core::traits::Embedder;
use recall_core::{Embedding, Error, Result};

pub use fallback::{HashEmbedder, FALLBACK_DIM};
pub use model::ModelEmbedder;
pub use pool::masked_mean_l2;

pub enum EmbeddingProvider {
    ModelBacked(ModelEmbedder),
    Fallback(HashEmbedder),
}

impl EmbeddingProvider {
    pub fn fallback(dim: usize) -> Self { Self::Fallback(HashEmbedder::new(dim)) }

    pub fn is_fallback(&self) -> bool { matches!(self, Self::Fallback(_)) }

    fn inner(&self) -> &dyn Embedder {
        match self {
            Self::ModelBacked(m) => m,
            Self::Fallback(f) => f,
        }
    }
}

impl Embedder for EmbeddingProvider {
    fn name(&self) -> &str { self.inner().name() }
    fn dim(&self) -> usize { self.inner().dim() }
    fn encode(&self, texts: &[String]) -> Result<Vec<Embedding>> { self.inner().encode(texts) }
}

/// Pick the provider for this process. Never fails: every problem with the
/// model path degrades to the fallback with a warning.
pub async fn select_provider(settings: &EmbeddingSettings) -> EmbeddingProvider {
    let (max_len, batch_size) = (settings.max_len, settings.batch_size);
    select_provider_with(settings, move |dir| {
        let model = ModelEmbedder::load(&dir, max_len, batch_size).map_err(|e| Error::Embedding(format!("{e:#}")))?;
        model.encode(&["warm-up".to_string()])?;
        Ok(model)
    })
    .await
}

/// [`select_provider`] with a custom loader for the model directory. The
/// loader runs under [`probe_model`], so it is bounded by `probe_timeout_ms`.
pub async fn select_provider_with<F>(settings: &EmbeddingSettings, load: F) -> EmbeddingProvider
where
    F: FnOnce(PathBuf) -> Result<ModelEmbedder> + Send + 'static,
{
    if settings.use_fallback {
        tracing::info!("fallback embeddings requested; using {}-dim hash embedder", settings.dim);
        return EmbeddingProvider::fallback(settings.dim);
    }
    let Some(dir) = settings.model_dir.as_deref() else {
        tracing::info!("no embedding.model_dir configured; using {}-dim hash embedder", settings.dim);
        return EmbeddingProvider::fallback(settings.dim);
    };
    let dir = expand_path(dir);
    match probe_model(Duration::from_millis(settings.probe_timeout_ms), move || load(dir)).await {
        Ok(model) => {
            tracing::info!(provider = model.name(), dim = model.dim(), "using model-backed embeddings");
            EmbeddingProvider::ModelBacked(model)
        }
        Err(e) => {
            tracing::warn!("embedding model unavailable ({e}); using {}-dim hash embedder", settings.dim);
            EmbeddingProvider::fallback(settings.dim)
        }
    }
}

/// Run a blocking model load on tokio's blocking pool, bounded by `timeout`.
/// A load that overruns is left to finish in the background and reported as
/// [`Error::Unavailable`].
pub async fn probe_model<F>(timeout: Duration, load: F) -> Result<ModelEmbedder>
where
    F: FnOnce() -> Result<ModelEmbedder> + Send + 'static,
{
    match tokio::time::timeout(timeout, tokio::task::spawn_blocking(load)).await {
        Ok(Ok(loaded)) => loaded,
        Ok(Err(e)) => Err(Error::Operation(format!("model probe task failed: {e}"))),
        Err(_) => Err(Error::Unavailable(format!("model probe exceeded {timeout:?}"))),
    }
}
