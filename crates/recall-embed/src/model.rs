//! Model-backed sentence embeddings (BERT family, e.g. all-MiniLM-L6-v2).

use anyhow::{Context, Result, anyhow};
use std::path::{Path, PathBuf};
use std::time::Instant;

use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use tokenizers::Tokenizer;

use recall_core::traits::Embedder;
use recall_core::{Embedding, Error};

use crate::device::select_device;
use crate::pool::masked_mean_l2;
use crate::tokenize::tokenize_batch;

pub struct ModelEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    dim: usize,
    max_len: usize,
    batch_size: usize,
    pad_id: u32,
    name: String,
}

impl ModelEmbedder {
    /// Load `config.json`, `tokenizer.json` and `model.safetensors` from `model_dir`.
    pub fn load(model_dir: &Path, max_len: usize, batch_size: usize) -> Result<Self> {
        let files = ModelFiles::resolve(model_dir)?;
        let device = select_device();
        tracing::info!(dir = %model_dir.display(), "loading embedding model");

        let tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| anyhow!("Failed to load tokenizer from {}: {}", files.tokenizer.display(), e))?;
        let pad_id = tokenizer.token_to_id("[PAD]").unwrap_or(0);

        let config: BertConfig = serde_json::from_str(&std::fs::read_to_string(&files.config)?)
            .context("Failed to parse model config.json")?;
        // SAFETY: the weights file is only read, and is not modified while mapped.
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[&files.weights], DType::F32, &device) }
            .context("Failed to load safetensors weights")?;
        let model = BertModel::load(vb, &config).context("Failed to initialize BERT model from weights")?;

        let dim = config.hidden_size;
        let name = format!("model:{}:d{dim}", model_dir.file_name().map_or_else(|| "bert".into(), |n| n.to_string_lossy()));
        tracing::info!(%name, layers = config.num_hidden_layers, "embedding model loaded");
        Ok(Self { model, tokenizer, device, dim, max_len, batch_size: batch_size.max(1), pad_id, name })
    }

    fn encode_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        let (input_ids, attention_mask) = tokenize_batch(&self.tokenizer, texts, self.max_len, self.pad_id, &self.device)?;
        let token_type_ids = input_ids.zeros_like()?;
        let hidden = self.model.forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let pooled = masked_mean_l2(&hidden, &attention_mask)?;
        Ok(pooled.to_device(&Device::Cpu)?.to_dtype(DType::F32)?.to_vec2::<f32>()?)
    }

    pub fn encode_all(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        let start = Instant::now();
        let mut out = Vec::with_capacity(texts.len());
        for batch in texts.chunks(self.batch_size) {
            out.extend(self.encode_batch(batch)?);
        }
        tracing::debug!(texts = texts.len(), elapsed_ms = start.elapsed().as_millis() as u64, "model encode");
        Ok(out)
    }
}

impl Embedder for ModelEmbedder {
    fn name(&self) -> &str { &self.name }
    fn dim(&self) -> usize { self.dim }
    fn encode(&self, texts: &[String]) -> recall_core::Result<Vec<Embedding>> {
        if texts.is_empty() { return Ok(Vec::new()); }
        self.encode_all(texts).map_err(|e| Error::Embedding(format!("{e:#}")))
    }
}

struct ModelFiles {
    config: PathBuf,
    tokenizer: PathBuf,
    weights: PathBuf,
}

impl ModelFiles {
    fn resolve(dir: &Path) -> Result<Self> {
        let files = Self {
            config: dir.join("config.json"),
            tokenizer: dir.join("tokenizer.json"),
            weights: dir.join("model.safetensors"),
        };
        for p in [&files.config, &files.tokenizer, &files.weights] {
            if !p.exists() { return Err(anyhow!(Error::NotFound(p.display().to_string()))); }
        }
        Ok(files)
    }
}
