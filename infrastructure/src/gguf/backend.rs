//! Quantized llama-family chat backend

use super::chat_template::{ChatHistory, IM_END};
use super::config::GgufConfig;
use super::device::{device_label, select_device};
use super::error::GgufError;
use candle_core::quantized::gguf_file;
use candle_core::{Device, Tensor};
use candle_transformers::generation::{LogitsProcessor, Sampling};
use candle_transformers::models::quantized_llama::ModelWeights;
use orca_application::{BackendError, ModelBackend};
use orca_domain::GenerationParams;
use std::fs::File;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

const EOS_TOKENS: [&str; 2] = [IM_END, "</s>"];

/// Tokens the rendered prompt may take. At least half the context stays
/// reserved for the prompt however large the token limit is.
fn prompt_budget(context_length: usize, max_tokens: usize) -> usize {
    context_length
        .saturating_sub(max_tokens)
        .max(context_length / 2)
        .max(1)
}

/// New tokens that still fit in the context behind `prompt_len` tokens.
fn new_token_budget(context_length: usize, prompt_len: usize, max_tokens: usize) -> usize {
    max_tokens.min(context_length.saturating_sub(prompt_len))
}

/// GGUF model loaded from local files.
///
/// Weights and chat history sit behind one mutex: generation is
/// single-flight and every call rebuilds the KV cache from position 0.
pub struct GgufChatBackend {
    model_name: String,
    config: GgufConfig,
    tokenizer: Tokenizer,
    device: Device,
    stop_tokens: Vec<u32>,
    state: Mutex<ModelState>,
}

struct ModelState {
    weights: ModelWeights,
    history: Option<ChatHistory>,
    calls: u64,
}

impl GgufChatBackend {
    /// Load weights and tokenizer. Blocks for as long as reading the model
    /// takes; nothing is downloaded.
    pub fn load(config: GgufConfig) -> Result<Self, GgufError> {
        for path in [&config.model_path, &config.tokenizer_path] {
            if !path.is_file() {
                return Err(GgufError::MissingFile(path.clone()));
            }
        }

        let device = select_device(config.prefer_gpu);
        info!(
            "Loading {} on {}",
            config.model_path.display(),
            device_label(&device)
        );
        let start = Instant::now();

        let mut file = File::open(&config.model_path)?;
        let content =
            gguf_file::Content::read(&mut file).map_err(|e| e.with_path(&config.model_path))?;
        debug!(
            "GGUF: {} tensors, {} metadata entries",
            content.tensor_infos.len(),
            content.metadata.len()
        );
        let weights = ModelWeights::from_gguf(content, &mut file, &device)?;

        let tokenizer = Tokenizer::from_file(&config.tokenizer_path).map_err(GgufError::tokenizer)?;
        let stop_tokens: Vec<u32> = EOS_TOKENS
            .iter()
            .filter_map(|token| tokenizer.token_to_id(token))
            .collect();
        if stop_tokens.is_empty() {
            warn!("Tokenizer has no end-of-turn token; replies stop at the token limit");
        }

        let model_name = config.model_name();
        info!(
            "Model {} loaded in {:.1}s",
            model_name,
            start.elapsed().as_secs_f32()
        );

        Ok(Self {
            model_name,
            config,
            tokenizer,
            device,
            stop_tokens,
            state: Mutex::new(ModelState {
                weights,
                history: None,
                calls: 0,
            }),
        })
    }

    /// A panicking generation leaves nothing half-done worth protecting:
    /// the next call starts again from position 0.
    fn lock_state(&self) -> MutexGuard<'_, ModelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn count_tokens(&self, text: &str) -> usize {
        self.tokenizer
            .encode(text, true)
            .map(|encoding| encoding.len())
            .unwrap_or(usize::MAX)
    }

    fn sampler(&self, params: &GenerationParams, call: u64) -> LogitsProcessor {
        let temperature = f64::from(params.temperature);
        let sampling = if temperature <= 0.0 {
            Sampling::ArgMax
        } else {
            Sampling::All { temperature }
        };
        LogitsProcessor::from_sampling(self.config.seed.wrapping_add(call), sampling)
    }

    fn run(
        &self,
        weights: &mut ModelWeights,
        text: &str,
        params: &GenerationParams,
        mut sampler: LogitsProcessor,
    ) -> Result<String, GgufError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(GgufError::tokenizer)?;
        let mut tokens = encoding.get_ids().to_vec();

        let context_length = self.config.context_length;
        let requested = params.max_tokens as usize;
        let budget = prompt_budget(context_length, requested);
        if tokens.len() > budget {
            warn!(
                "Prompt is {} tokens, keeping the last {}",
                tokens.len(),
                budget
            );
            tokens.drain(..tokens.len() - budget);
        }
        let prompt_len = tokens.len();

        let max_new = new_token_budget(context_length, prompt_len, requested);
        if max_new < requested {
            warn!(
                "Token limit {} does not fit behind a {}-token prompt, stopping after {}",
                requested, prompt_len, max_new
            );
        }

        let mut index_pos = 0;
        for _ in 0..max_new {
            let context = if index_pos == 0 {
                &tokens[..]
            } else {
                &tokens[tokens.len() - 1..]
            };
            let input = Tensor::new(context, &self.device)?.unsqueeze(0)?;
            let logits = weights.forward(&input, index_pos)?.squeeze(0)?;
            index_pos += context.len();

            let logits = if self.config.repeat_penalty == 1.0 {
                logits
            } else {
                let start = tokens.len().saturating_sub(self.config.repeat_last_n);
                candle_transformers::utils::apply_repeat_penalty(
                    &logits,
                    self.config.repeat_penalty,
                    &tokens[start..],
                )?
            };

            let next = sampler.sample(&logits)?;
            if self.stop_tokens.contains(&next) {
                break;
            }
            tokens.push(next);
        }

        let generated = &tokens[prompt_len..];
        debug!(
            prompt_tokens = prompt_len,
            generated_tokens = generated.len(),
            "Generation finished"
        );
        self.tokenizer
            .decode(generated, true)
            .map_err(GgufError::tokenizer)
    }
}

impl ModelBackend for GgufChatBackend {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn start_chat(&self) -> Result<(), BackendError> {
        let mut state = self.lock_state();
        state.history = Some(ChatHistory::new(self.config.system_prompt.clone()));
        debug!("Chat history started");
        Ok(())
    }

    fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, BackendError> {
        let mut guard = self.lock_state();
        let state = &mut *guard;
        state.calls += 1;

        let budget = prompt_budget(self.config.context_length, params.max_tokens as usize);
        let text = match &state.history {
            Some(history) => {
                let (text, skipped) =
                    history.render_within(prompt, budget, |t| self.count_tokens(t));
                if skipped > 0 {
                    debug!("Dropped {} old exchanges to fit the context", skipped);
                }
                text
            }
            None => ChatHistory::new(self.config.system_prompt.clone()).render(prompt),
        };

        let sampler = self.sampler(params, state.calls);
        let reply = self.run(&mut state.weights, &text, params, sampler)?;

        if let Some(history) = state.history.as_mut() {
            history.push(prompt, reply.trim());
        }
        Ok(reply)
    }

    fn end_chat(&self) {
        let mut state = self.lock_state();
        if let Some(history) = state.history.take() {
            debug!("Chat history ended after {} exchanges", history.len());
        }
    }
}
