//! Token estimation and the context size guard.
//!
//! Uses a character-based heuristic: ~4 characters per token. This
//! approximation is accurate within ~10% for BPE tokenizers on English text,
//! which is enough here — the estimate is advisory, not billed, and it avoids
//! a real tokenizer dependency.

use lectern_core::error::MaterialsError;

/// The generation API's input-size ceiling, in estimated tokens.
pub const MAX_CONTEXT_TOKENS: usize = 1_000_000;

/// Estimate the token count for a string.
///
/// Heuristic: 1 token ≈ 4 characters. Rounds up.
pub fn estimate_tokens(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    (text.len() + 3) / 4
}

/// Reject assembled context that would overflow the generation API's input
/// ceiling. Oversized context is a hard failure, never silently truncated.
///
/// Returns the estimate on success so callers can record it.
pub fn guard_context_size(text: &str) -> Result<usize, MaterialsError> {
    let estimated_tokens = estimate_tokens(text);
    if estimated_tokens >= MAX_CONTEXT_TOKENS {
        tracing::warn!(estimated_tokens, limit = MAX_CONTEXT_TOKENS, "Context too large");
        return Err(MaterialsError::ContextTooLarge {
            estimated_tokens,
            limit: MAX_CONTEXT_TOKENS,
        });
    }
    Ok(estimated_tokens)
}
