//! Cheapest-from-available scoring rule shared by all three routing branches.
//!
//! Candidates are ordered on `(price, uptime, latency, throughput, priority)`
//! with price dominating; ties are broken by higher uptime, then lower
//! latency, then higher throughput, then higher priority. Providers with
//! `uptime < 80%` are demoted below every provider that clears the bar,
//! regardless of price.

use super::types::ProviderScore;

const UPTIME_DEMOTION_THRESHOLD: f64 = 80.0;

/// Order candidates best-first and assign each a monotonically decreasing
/// `score` so the top entry is always `provider_scores[0]`.
pub fn score_and_rank(mut candidates: Vec<ProviderScore>) -> Vec<ProviderScore> {
    candidates.sort_by(|a, b| {
        let a_demoted = a.uptime < UPTIME_DEMOTION_THRESHOLD;
        let b_demoted = b.uptime < UPTIME_DEMOTION_THRESHOLD;
        if a_demoted != b_demoted {
            return a_demoted.cmp(&b_demoted);
        }

        a.price
            .partial_cmp(&b.price)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                b.uptime
                    .partial_cmp(&a.uptime)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| {
                a.latency
                    .partial_cmp(&b.latency)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| {
                b.throughput
                    .partial_cmp(&a.throughput)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| b.priority.cmp(&a.priority))
    });

    let len = candidates.len() as f64;
    for (i, candidate) in candidates.iter_mut().enumerate() {
        candidate.score = len - i as f64;
    }
    candidates
}

/// Pick the top-ranked candidate, if any.
pub fn select_best(candidates: &[ProviderScore]) -> Option<&ProviderScore> {
    candidates.first()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(provider_id: &str, price: f64, uptime: f64) -> ProviderScore {
        ProviderScore {
            provider_id: provider_id.to_string(),
            score: 0.0,
            price,
            uptime,
            latency: 100.0,
            throughput: 10.0,
            priority: 0,
            failed: false,
            status_code: None,
            error_type: None,
        }
    }

    #[test]
    fn cheaper_wins_when_both_healthy() {
        let ranked = score_and_rank(vec![score("a", 2.0, 99.0), score("b", 1.0, 99.0)]);
        assert_eq!(ranked[0].provider_id, "b");
    }

    #[test]
    fn low_uptime_is_demoted_even_if_cheaper() {
        let ranked = score_and_rank(vec![score("cheap-flaky", 0.1, 50.0), score("pricier", 1.0, 99.0)]);
        assert_eq!(ranked[0].provider_id, "pricier");
    }

    #[test]
    fn ties_broken_by_uptime_then_latency() {
        let mut a = score("a", 1.0, 95.0);
        a.latency = 50.0;
        let mut b = score("b", 1.0, 95.0);
        b.latency = 10.0;
        let ranked = score_and_rank(vec![a, b]);
        assert_eq!(ranked[0].provider_id, "b");
    }
}
