//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `APP_*` env vars (nested keys separated by `__`, e.g.
//! `APP_EMBEDDING__MODEL_DIR`). Provides helpers to expand `~` and `${VAR}` and
//! to resolve relative paths against a known base directory.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::file("config.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            other => tracing::debug!("no environment overlay for RUST_ENV={other}"),
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self::from_figment(figment);
        config.settings()?.validate()?;
        Ok(config)
    }

    pub fn from_figment(figment: Figment) -> Self { Self { figment } }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{key}': {e}")))
    }

    /// Typed view of the whole configuration. `APP_USE_FAKE_EMBEDDINGS=1|true`
    /// forces the deterministic embedding fallback.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings: Settings = self.figment.extract().map_err(|e| Error::InvalidConfig(e.to_string()))?;
        if fake_embeddings_requested() {
            settings.embedding.use_fallback = true;
        }
        Ok(settings)
    }
}

fn fake_embeddings_requested() -> bool {
    env::var("APP_USE_FAKE_EMBEDDINGS").ok().is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data: DataSettings,
    pub embedding: EmbeddingSettings,
    pub retrieval: RetrievalSettings,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        let e = &self.embedding;
        if e.dim == 0 { return Err(Error::InvalidConfig("embedding.dim must be > 0".into())); }
        if e.batch_size == 0 { return Err(Error::InvalidConfig("embedding.batch_size must be > 0".into())); }
        if e.max_len == 0 { return Err(Error::InvalidConfig("embedding.max_len must be > 0".into())); }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub corpus_path: String,
    pub eval_path: Option<String>,
}

impl Default for DataSettings {
    fn default() -> Self { Self { corpus_path: "data/processed/chunks.json".to_string(), eval_path: None } }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Directory holding `config.json`, `tokenizer.json` and `model.safetensors`.
    pub model_dir: Option<String>,
    pub use_fallback: bool,
    /// Dimension of the fallback embedding.
    pub dim: usize,
    pub max_len: usize,
    pub batch_size: usize,
    pub probe_timeout_ms: u64,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self { model_dir: None, use_fallback: false, dim: 384, max_len: 256, batch_size: 32, probe_timeout_ms: 30_000 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    pub default_k: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self { Self { default_k: 3 } }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
