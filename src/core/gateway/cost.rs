//! Cost Accountant (C11): computes input/output/cached/request/image/
//! web-search/data-storage costs, applies discounts, and reports key
//! health. Grounded in `core::cost::types::{UsageTokens, CostBreakdown}`'s
//! field shape, specialized to the exact cost components spec §4.11 names
//! (that existing type is kept as-is for the teacher's generic cost-summary
//! reporting; this one is the gateway-attempt-shaped sibling).

use crate::core::gateway::capability::ProviderMapping;
use crate::core::tokenizer::TokenizerFamily;

/// Per-attempt usage counters as received (or estimated) from the upstream
/// response.
#[derive(Debug, Clone, Default)]
pub struct AttemptUsage {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: u32,
    pub cached_tokens: u32,
    pub reasoning_tokens: u32,
    pub input_image_count: u32,
    pub output_image_count: u32,
    pub web_search_count: u32,
}

/// Approximate per-image token cost some providers omit from usage;
/// ~560 tokens per input image (spec §4.11).
pub const IMAGE_TOKEN_ESTIMATE: u32 = 560;

#[derive(Debug, Clone)]
pub struct CostBreakdown {
    pub input_cost: f64,
    pub output_cost: f64,
    pub cached_input_cost: f64,
    pub request_cost: f64,
    pub web_search_cost: f64,
    pub image_input_cost: f64,
    pub image_output_cost: f64,
    pub data_storage_cost: f64,
    pub total_cost: f64,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub discount: Option<f64>,
    pub discount_savings: f64,
    pub pricing_tier: Option<String>,
}

/// Fixed price for retained request/response payload storage, per million
/// tokens stored (spec §4.11).
pub const DATA_STORAGE_PRICE_PER_MILLION_TOKENS: f64 = 0.50;

/// A fixed per-web-search-unit price; the catalog does not carry one per
/// mapping, so it is charged as a billing-policy constant.
pub const WEB_SEARCH_UNIT_PRICE: f64 = 0.01;

pub struct CostInputs<'a> {
    pub mapping: &'a ProviderMapping,
    pub usage: &'a AttemptUsage,
    pub excludes_image_input_tokens: bool,
    pub prompt_text_for_fallback: &'a str,
    pub tokenizer: TokenizerFamily,
    pub retain_payloads: bool,
}

/// Computes the full breakdown for one attempt, per spec §4.11's rules:
/// missing-usage tokenizer fallback, image-input-token backfill, discount
/// application, and conditional data-storage cost.
pub fn calculate(inputs: &CostInputs<'_>) -> CostBreakdown {
    let mapping = inputs.mapping;
    let usage = inputs.usage;

    let mut prompt_tokens = usage
        .prompt_tokens
        .unwrap_or_else(|| inputs.tokenizer.count(inputs.prompt_text_for_fallback));
    if inputs.excludes_image_input_tokens {
        prompt_tokens += usage.input_image_count * IMAGE_TOKEN_ESTIMATE;
    }

    let billable_prompt_tokens = prompt_tokens.saturating_sub(usage.cached_tokens);
    let input_cost = price(billable_prompt_tokens, mapping.input_price);
    let cached_input_cost = mapping
        .cached_input_price
        .map(|p| price(usage.cached_tokens, p))
        .unwrap_or(0.0);
    let output_cost = price(usage.completion_tokens, mapping.output_price);
    let request_cost = mapping.request_price.unwrap_or(0.0);
    let web_search_cost = usage.web_search_count as f64 * WEB_SEARCH_UNIT_PRICE;
    let image_input_cost = mapping
        .image_input_price
        .map(|p| p * usage.input_image_count as f64)
        .unwrap_or(0.0);
    let image_output_cost = mapping
        .image_output_price
        .map(|p| p * usage.output_image_count as f64)
        .unwrap_or(0.0);
    let data_storage_cost = if inputs.retain_payloads {
        (prompt_tokens + usage.completion_tokens) as f64 / 1_000_000.0 * DATA_STORAGE_PRICE_PER_MILLION_TOKENS
    } else {
        0.0
    };

    let subtotal = input_cost
        + cached_input_cost
        + output_cost
        + request_cost
        + web_search_cost
        + image_input_cost
        + image_output_cost;

    let (total_before_storage, discount_savings) = apply_discount(subtotal, mapping.discount);

    CostBreakdown {
        input_cost,
        output_cost,
        cached_input_cost,
        request_cost,
        web_search_cost,
        image_input_cost,
        image_output_cost,
        data_storage_cost,
        total_cost: total_before_storage + data_storage_cost,
        prompt_tokens,
        completion_tokens: usage.completion_tokens,
        discount: valid_discount(mapping.discount),
        discount_savings,
        pricing_tier: mapping.stability.clone(),
    }
}

fn price(tokens: u32, price_per_1k: f64) -> f64 {
    tokens as f64 / 1000.0 * price_per_1k
}

fn valid_discount(discount: Option<f64>) -> Option<f64> {
    discount.filter(|d| *d > 0.0 && *d < 1.0)
}

/// `savings = cost * discount / (1 - discount)` when `discount in (0,1)`,
/// excluded otherwise (spec §4.11, invariant 9 in §8).
fn apply_discount(cost: f64, discount: Option<f64>) -> (f64, f64) {
    match valid_discount(discount) {
        Some(d) => {
            let savings = cost * d / (1.0 - d);
            (cost - savings, savings)
        }
        None => (cost, 0.0),
    }
}

/// Cancellation billing per the `SHOULD_BILL_CANCELLED_REQUESTS` policy
/// flag (spec §4.11): zero cost when disabled, prompt-token cost (plus one
/// web-search unit if active) when enabled.
pub fn cancellation_cost(
    mapping: &ProviderMapping,
    prompt_tokens: u32,
    web_search_active: bool,
    bill_cancelled_requests: bool,
) -> f64 {
    if !bill_cancelled_requests {
        return 0.0;
    }
    let mut cost = price(prompt_tokens, mapping.input_price);
    if web_search_active {
        cost += WEB_SEARCH_UNIT_PRICE;
    }
    cost
}

/// Holds the billing policy flags that are process-wide rather than
/// per-request, so callers don't have to thread `bill_cancelled_requests`
/// through every call site.
#[derive(Debug, Clone, Copy)]
pub struct CostAccountant {
    pub bill_cancelled_requests: bool,
}

impl CostAccountant {
    pub fn new(bill_cancelled_requests: bool) -> Self {
        Self { bill_cancelled_requests }
    }

    pub fn calculate(&self, inputs: &CostInputs<'_>) -> CostBreakdown {
        calculate(inputs)
    }

    pub fn cancellation_cost(&self, mapping: &ProviderMapping, prompt_tokens: u32, web_search_active: bool) -> f64 {
        cancellation_cost(mapping, prompt_tokens, web_search_active, self.bill_cancelled_requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> ProviderMapping {
        ProviderMapping {
            provider_id: "openai".to_string(),
            model_name: "gpt-4o".to_string(),
            input_price: 2.5,
            output_price: 10.0,
            cached_input_price: Some(1.25),
            request_price: None,
            image_input_price: None,
            image_output_price: None,
            context_size: 128_000,
            max_output: 4096,
            vision: true,
            tools: true,
            reasoning: false,
            reasoning_max_tokens: false,
            json_output: true,
            json_output_schema: true,
            streaming: true,
            web_search: true,
            image_generations: false,
            supported_parameters: vec![],
            stability: Some("stable".to_string()),
            deprecated_at: None,
            deactivated_at: None,
            discount: None,
        }
    }

    #[test]
    fn discount_savings_matches_formula() {
        let (total, savings) = apply_discount(0.8, Some(0.2));
        assert!((savings - (0.8 * 0.2 / 0.8)).abs() < 1e-9);
        assert!((total - (0.8 - savings)).abs() < 1e-9);
    }

    #[test]
    fn discount_outside_range_is_excluded() {
        let (total, savings) = apply_discount(1.0, Some(1.0));
        assert_eq!(savings, 0.0);
        assert_eq!(total, 1.0);
        let (total, savings) = apply_discount(1.0, Some(0.0));
        assert_eq!(savings, 0.0);
        assert_eq!(total, 1.0);
    }

    #[test]
    fn cancellation_cost_is_zero_when_policy_disabled() {
        assert_eq!(cancellation_cost(&mapping(), 1000, true, false), 0.0);
    }

    #[test]
    fn cancellation_cost_bills_prompt_and_web_search_when_enabled() {
        let cost = cancellation_cost(&mapping(), 1000, true, true);
        assert!((cost - (2.5 + WEB_SEARCH_UNIT_PRICE)).abs() < 1e-9);
    }

    #[test]
    fn cached_tokens_are_billed_at_the_discounted_rate() {
        let usage = AttemptUsage { prompt_tokens: Some(1000), completion_tokens: 100, cached_tokens: 400, reasoning_tokens: 0, input_image_count: 0, output_image_count: 0, web_search_count: 0 };
        let breakdown = calculate(&CostInputs {
            mapping: &mapping(),
            usage: &usage,
            excludes_image_input_tokens: false,
            prompt_text_for_fallback: "",
            tokenizer: TokenizerFamily::Cl100kApprox,
            retain_payloads: false,
        });
        assert!((breakdown.input_cost - price(600, 2.5)).abs() < 1e-9);
        assert!((breakdown.cached_input_cost - price(400, 1.25)).abs() < 1e-9);
    }
}
