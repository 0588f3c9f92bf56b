//! Randomized metric snapshots.
//!
//! Every call draws fresh independent values; there is no persisted seed, so
//! production snapshots are not reproducible across runs. Tests pass a seeded
//! RNG.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::format::group_thousands;
use super::MetricId;

/// One formatted value per metric.
///
/// Serializes as a map keyed by [`MetricId::as_str`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    #[serde(rename = "performance-metric")]
    pub performance: String,
    #[serde(rename = "users-metric")]
    pub users: String,
    #[serde(rename = "requests-metric")]
    pub requests: String,
    #[serde(rename = "uptime-metric")]
    pub uptime: String,
}

impl MetricSnapshot {
    /// Formatted value for one metric.
    pub fn value(&self, id: MetricId) -> &str {
        match id {
            MetricId::Performance => &self.performance,
            MetricId::Users => &self.users,
            MetricId::Requests => &self.requests,
            MetricId::Uptime => &self.uptime,
        }
    }
}

/// Generate a snapshot.
///
/// - performance: 95.0–100.0 %
/// - users: 1200–1299, thousands grouped
/// - requests: 2.0–3.0 k
/// - uptime: 99.8–100.0 %
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> MetricSnapshot {
    let performance = 95.0 + rng.random::<f64>() * 5.0;
    let users = (1200.0 + rng.random::<f64>() * 100.0).floor() as u64;
    let requests = 2.0 + rng.random::<f64>();
    let uptime = 99.8 + rng.random::<f64>() * 0.2;

    MetricSnapshot {
        performance: format!("{:.1}%", performance),
        users: group_thousands(users),
        requests: format!("{:.1}k", requests),
        uptime: format!("{:.1}%", uptime),
    }
}
