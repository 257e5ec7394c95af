//! Profession Generation — prompt construction, one backend call, prompt stripping.
//!
//! Flow: build_prompt → TextGenerator::generate (fixed parameters) → strip_prompt → return.
//!
//! Fail-fast: a backend failure is returned to the caller as-is. No retry, no
//! fallback list, no partial result.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::PROFESSIONS_PROMPT_TEMPLATE;
use crate::llm_client::{GenerationParams, TextGenerator};

/// Sampling preset for profession suggestions. Not configurable.
pub const PROFESSION_PARAMS: GenerationParams = GenerationParams {
    max_length: 50,
    num_return_sequences: 3,
    temperature: 0.7,
    top_k: 50,
    top_p: 0.95,
};

/// Interpolates `traits` verbatim into the prompt template.
/// No trimming, escaping, or validation; an empty string is allowed.
pub fn build_prompt(traits: &str) -> String {
    PROFESSIONS_PROMPT_TEMPLATE.replace("{traits}", traits)
}

/// Removes the first occurrence of `prompt` from a raw completion.
///
/// - Starts with the prompt: the prefix and the whitespace after it are removed.
/// - Contains the prompt elsewhere: that occurrence is deleted.
/// - No occurrence: returned unchanged.
///
/// A mismatch is logged, never treated as an error.
pub fn strip_prompt(raw: &str, prompt: &str) -> String {
    if let Some(continuation) = raw.strip_prefix(prompt) {
        return continuation.trim_start().to_string();
    }

    warn!(
        "Completion does not start with the prompt: {:?}",
        raw.chars().take(60).collect::<String>()
    );
    raw.replacen(prompt, "", 1)
}

/// Generates profession suggestions for the given traits.
///
/// Issues exactly one backend call with `PROFESSION_PARAMS` and returns one
/// suggestion per completion, in backend order.
pub async fn generate_professions(
    generator: &dyn TextGenerator,
    traits: &str,
) -> Result<Vec<String>, AppError> {
    let prompt = build_prompt(traits);
    info!("Generating professions for traits {:?}", traits);

    let completions = generator
        .generate(&prompt, &PROFESSION_PARAMS)
        .await
        .map_err(|e| AppError::Llm(format!("Profession generation failed: {e}")))?;

    let professions: Vec<String> = completions
        .iter()
        .map(|raw| strip_prompt(raw, &prompt))
        .collect();

    info!("Generated {} profession suggestions", professions.len());
    Ok(professions)
}
