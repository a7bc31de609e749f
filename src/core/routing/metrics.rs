//! Recent per-(model, provider) metrics used to score routing candidates.
//!
//! Grounded in the teacher's `core/router/health.rs` cooldown tracker and
//! `core/router/metrics.rs` rolling counters, simplified to the three fields
//! the scoring rule actually consumes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// A snapshot of a provider's recent standing for a given model.
#[derive(Debug, Clone, Copy)]
pub struct ProviderMetrics {
    pub price: f64,
    pub uptime: f64,
    pub average_latency: f64,
    pub throughput: f64,
    pub priority: i32,
}

impl Default for ProviderMetrics {
    fn default() -> Self {
        Self {
            price: 0.0,
            uptime: 100.0,
            average_latency: 0.0,
            throughput: 0.0,
            priority: 0,
        }
    }
}

/// Supplies recent (5-minute window) metrics for a `(model, provider)` pair.
#[async_trait]
pub trait ProviderMetricsSource: Send + Sync {
    async fn recent_metrics(&self, model: &str, provider_id: &str) -> ProviderMetrics;

    /// Report the outcome of a dispatch so future lookups reflect it.
    async fn record_outcome(&self, model: &str, provider_id: &str, success: bool, latency_ms: f64);
}

struct Bucket {
    success: u64,
    failure: u64,
    latency_ema_ms: f64,
    updated_at: Instant,
}

impl Default for Bucket {
    fn default() -> Self {
        Self {
            success: 0,
            failure: 0,
            latency_ema_ms: 0.0,
            updated_at: Instant::now(),
        }
    }
}

/// In-process rolling window implementation, the default used outside tests.
///
/// Buckets reset after `WINDOW` of inactivity so a stale failure streak does
/// not permanently demote a provider that nobody has called recently.
pub struct InMemoryMetricsSource {
    buckets: RwLock<HashMap<(String, String), Bucket>>,
    base_prices: HashMap<String, f64>,
}

const WINDOW: Duration = Duration::from_secs(5 * 60);

impl InMemoryMetricsSource {
    pub fn new(base_prices: HashMap<String, f64>) -> Self {
        Self {
            buckets: RwLock::new(HashMap::new()),
            base_prices,
        }
    }

    fn key(model: &str, provider_id: &str) -> (String, String) {
        (model.to_string(), provider_id.to_string())
    }
}

#[async_trait]
impl ProviderMetricsSource for InMemoryMetricsSource {
    async fn recent_metrics(&self, model: &str, provider_id: &str) -> ProviderMetrics {
        let key = Self::key(model, provider_id);
        let price = *self.base_prices.get(provider_id).unwrap_or(&0.0);

        let buckets = self.buckets.read().unwrap();
        match buckets.get(&key) {
            Some(bucket) if bucket.updated_at.elapsed() < WINDOW => {
                let total = bucket.success + bucket.failure;
                let uptime = if total == 0 {
                    100.0
                } else {
                    (bucket.success as f64 / total as f64) * 100.0
                };
                ProviderMetrics {
                    price,
                    uptime,
                    average_latency: bucket.latency_ema_ms,
                    throughput: bucket.success as f64,
                    priority: 0,
                }
            }
            _ => ProviderMetrics {
                price,
                ..Default::default()
            },
        }
    }

    async fn record_outcome(&self, model: &str, provider_id: &str, success: bool, latency_ms: f64) {
        let key = Self::key(model, provider_id);
        let mut buckets = self.buckets.write().unwrap();
        let bucket = buckets.entry(key).or_default();
        if bucket.updated_at.elapsed() >= WINDOW {
            *bucket = Bucket::default();
        }
        if success {
            bucket.success += 1;
        } else {
            bucket.failure += 1;
        }
        // exponential moving average, alpha = 0.2
        bucket.latency_ema_ms = if bucket.latency_ema_ms == 0.0 {
            latency_ms
        } else {
            0.8 * bucket.latency_ema_ms + 0.2 * latency_ms
        };
        bucket.updated_at = Instant::now();
    }
}
