//! Usage accounting for vdrive.
//!
//! Aggregates stored bytes across the tree and reports utilization against
//! an advisory quota estimate. Quota sources may be unavailable; that is
//! expected and never fatal.

use tracing::debug;

use crate::db::Database;
use crate::drive::DriveStore;
use crate::Result;

/// Default quota assumed when no estimate is available (1GB).
pub const DEFAULT_QUOTA_BYTES: u64 = 1024 * 1024 * 1024;

/// Source of a quota estimate.
///
/// Implementations wrap whatever the host platform offers. Returning `None`
/// signals that no estimate is currently available.
pub trait QuotaSource {
    /// Current quota estimate in bytes, or `None` when unavailable.
    fn quota_bytes(&self) -> Option<u64>;
}

/// A fixed quota value.
#[derive(Debug, Clone, Copy)]
pub struct FixedQuota(pub u64);

impl QuotaSource for FixedQuota {
    fn quota_bytes(&self) -> Option<u64> {
        Some(self.0)
    }
}

/// A quota source that is never available.
///
/// Every refresh falls back to the configured default quota.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoQuota;

impl QuotaSource for NoQuota {
    fn quota_bytes(&self) -> Option<u64> {
        None
    }
}

/// Snapshot of drive utilization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageReport {
    /// Total bytes across file nodes.
    pub used_bytes: u64,
    /// Number of persisted nodes, folders included.
    pub node_count: u64,
    /// Quota the percentage was computed against.
    pub quota_bytes: u64,
    /// Utilization percentage, clamped to `[0, 100]`.
    pub percent: f64,
}

/// Computes utilization snapshots on demand.
///
/// Quotas are advisory, not enforced: a store that outgrew its quota still
/// accepts writes until the backend itself refuses them.
pub struct UsageMonitor<'a, Q> {
    db: &'a Database,
    quota: Q,
    default_quota: u64,
}

impl<'a, Q: QuotaSource> UsageMonitor<'a, Q> {
    /// Create a new UsageMonitor over the given database and quota source.
    pub fn new(db: &'a Database, quota: Q) -> Self {
        Self {
            db,
            quota,
            default_quota: DEFAULT_QUOTA_BYTES,
        }
    }

    /// Use a custom fallback quota for unavailable estimates.
    pub fn with_default_quota(mut self, bytes: u64) -> Self {
        self.default_quota = bytes;
        self
    }

    /// Recompute usage from the store and the current quota estimate.
    pub async fn refresh(&self) -> Result<UsageReport> {
        let usage = DriveStore::new(self.db).aggregate_usage().await?;

        let quota_bytes = self.quota.quota_bytes().unwrap_or(self.default_quota);
        let percent = utilization_percent(usage.used_bytes, quota_bytes);

        debug!(
            used_bytes = usage.used_bytes,
            quota_bytes, percent, "refreshed usage"
        );

        Ok(UsageReport {
            used_bytes: usage.used_bytes,
            node_count: usage.node_count,
            quota_bytes,
            percent,
        })
    }
}

/// used/quota as a percentage, clamped into `[0, 100]`.
fn utilization_percent(used: u64, quota: u64) -> f64 {
    if quota == 0 {
        return if used == 0 { 0.0 } else { 100.0 };
    }
    ((used as f64 / quota as f64) * 100.0).clamp(0.0, 100.0)
}
