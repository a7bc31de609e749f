//! Per-provider default tokenizer table.
//!
//! Resolves the approximate prompt-token count for a family of models when
//! no provider-native tokenizer is linked in, and when upstream usage is
//! missing from a response (cancellation, some older provider responses).
//! Grounded in the teacher's `utils::ai::counter` approximate-BPE counter and
//! `utils::ai::models::utils` family dispatch.

/// Identifies which counter a model family should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerFamily {
    /// cl100k-style approximate BPE counter (OpenAI, Azure, Groq, DeepInfra,
    /// OpenRouter, v0, xAI, Moonshot, DeepSeek).
    Cl100kApprox,
    /// Claude-shaped counter (Anthropic, and Anthropic models served through
    /// Bedrock).
    ClaudeApprox,
    /// Gemini-shaped counter (Gemini, Vertex AI), CJK-density adjusted.
    GeminiApprox,
    /// `chars.len() / 4` fallback for every other family.
    CharsOverFour,
}

impl TokenizerFamily {
    /// Human-readable name recorded on the log row's `routing_metadata` for
    /// auditability (spec §9 open question on cancellation tokenizer choice).
    pub fn name(self) -> &'static str {
        match self {
            Self::Cl100kApprox => "cl100k_approx",
            Self::ClaudeApprox => "claude_approx",
            Self::GeminiApprox => "gemini_approx",
            Self::CharsOverFour => "chars_over_four",
        }
    }

    /// Resolve the family for a provider id, as consumed by C5 (auto-route
    /// context estimate), C6 (`max_tokens` validation), and C11 (missing-usage
    /// estimate).
    pub fn for_provider(provider_id: &str, is_anthropic_model: bool) -> Self {
        match provider_id {
            "openai" | "azure" | "azure_ai" | "groq" | "deepinfra" | "openrouter" | "v0"
            | "xai" | "moonshot" | "deepseek" => Self::Cl100kApprox,
            "anthropic" => Self::ClaudeApprox,
            "bedrock" if is_anthropic_model => Self::ClaudeApprox,
            "gemini" | "vertex_ai" => Self::GeminiApprox,
            _ => Self::CharsOverFour,
        }
    }

    /// Estimate the token count of `text` under this family's counter.
    pub fn count(self, text: &str) -> u32 {
        if text.is_empty() {
            return 0;
        }
        match self {
            Self::Cl100kApprox => cl100k_approx_count(text),
            Self::ClaudeApprox => claude_approx_count(text),
            Self::GeminiApprox => gemini_approx_count(text),
            Self::CharsOverFour => chars_over_four(text),
        }
    }
}

fn chars_over_four(text: &str) -> u32 {
    ((text.chars().count() as f64) / 4.0).ceil() as u32
}

/// Approximates cl100k-style BPE token boundaries by counting words and
/// punctuation runs rather than raw characters: most English tokens are
/// roughly one word or one punctuation run, with long words split further.
fn cl100k_approx_count(text: &str) -> u32 {
    let mut tokens = 0u32;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        tokens += if len == 0 {
            0
        } else {
            // a BPE token is ~4 characters on average for English prose
            ((len as f64) / 4.0).ceil().max(1.0) as u32
        };
    }
    tokens.max(chars_over_four(text) / 2)
}

/// Claude models tokenize slightly more coarsely than GPT's cl100k on
/// average prose (~3.5 chars/token), and are more sensitive to whitespace and
/// punctuation than GPT's counter.
fn claude_approx_count(text: &str) -> u32 {
    ((text.chars().count() as f64) / 3.5).ceil() as u32
}

/// Gemini's SentencePiece tokenizer runs closer to 4 chars/token on Latin
/// script, but CJK text is essentially one token per character; detect CJK
/// density cheaply and blend the two estimates.
fn gemini_approx_count(text: &str) -> u32 {
    let total = text.chars().count();
    if total == 0 {
        return 0;
    }
    let cjk = text.chars().filter(|c| is_cjk(*c)).count();
    let cjk_tokens = cjk as f64;
    let other_tokens = ((total - cjk) as f64) / 4.0;
    (cjk_tokens + other_tokens).ceil() as u32
}

fn is_cjk(c: char) -> bool {
    matches!(
        c as u32,
        0x4E00..=0x9FFF | 0x3040..=0x30FF | 0xAC00..=0xD7A3
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_dispatch_matches_table() {
        assert_eq!(
            TokenizerFamily::for_provider("openai", false),
            TokenizerFamily::Cl100kApprox
        );
        assert_eq!(
            TokenizerFamily::for_provider("anthropic", false),
            TokenizerFamily::ClaudeApprox
        );
        assert_eq!(
            TokenizerFamily::for_provider("bedrock", true),
            TokenizerFamily::ClaudeApprox
        );
        assert_eq!(
            TokenizerFamily::for_provider("bedrock", false),
            TokenizerFamily::CharsOverFour
        );
        assert_eq!(
            TokenizerFamily::for_provider("gemini", false),
            TokenizerFamily::GeminiApprox
        );
        assert_eq!(
            TokenizerFamily::for_provider("some_unknown_family", false),
            TokenizerFamily::CharsOverFour
        );
    }

    #[test]
    fn empty_text_counts_zero() {
        assert_eq!(TokenizerFamily::Cl100kApprox.count(""), 0);
    }

    #[test]
    fn cjk_heavy_text_counts_higher_than_latin_equivalent_length() {
        let latin = "abcdefghij";
        let cjk = "一二三四五六七八九十";
        assert!(TokenizerFamily::GeminiApprox.count(cjk) > TokenizerFamily::GeminiApprox.count(latin));
    }
}
