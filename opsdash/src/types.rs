//! Types that mirror the backend's JSON schema.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Collector heartbeat. Timestamps are RFC3339 from the backend.
#[derive(Debug, Deserialize, Clone)]
pub struct Health {
    pub status: String,
    pub now: DateTime<Utc>,
    #[serde(rename = "lastCollectorAt")]
    pub last_collector_at: DateTime<Utc>,
}

impl Health {
    /// The collector is considered live when its last sample is under two
    /// minutes old, measured against the server's own clock.
    pub fn sampling_active(&self) -> bool {
        self.now - self.last_collector_at < Duration::seconds(120)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CpuPoint {
    #[serde(rename = "t")]
    pub at: DateTime<Utc>,
    pub v: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MemPoint {
    #[serde(rename = "t")]
    pub at: DateTime<Utc>,
    pub v: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DiskPoint {
    #[serde(rename = "t")]
    pub at: DateTime<Utc>,
    pub mount: String,
    #[serde(rename = "usedPct")]
    pub used_pct: f64,
    #[serde(rename = "usedGB")]
    pub used_gb: f64,
    #[serde(rename = "totalGB")]
    pub total_gb: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DiskIoPoint {
    #[serde(rename = "t")]
    pub at: DateTime<Utc>,
    #[serde(rename = "readMBs")]
    pub read_mbs: f64,
    #[serde(rename = "writeMBs")]
    pub write_mbs: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NetPoint {
    #[serde(rename = "t")]
    pub at: DateTime<Utc>,
    #[serde(rename = "rxKBs")]
    pub rx_kbs: f64,
    #[serde(rename = "txKBs")]
    pub tx_kbs: f64,
}

// Range-scoped responses. Summary fields (avg, p95, latest) are computed
// server-side and passed through untouched.

#[derive(Debug, Deserialize, Clone)]
pub struct CpuMetrics {
    pub range: String,
    pub points: Vec<CpuPoint>,
    pub avg: f64,
    pub p95: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MemMetrics {
    pub range: String,
    pub points: Vec<MemPoint>,
    pub latest: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MountSeries {
    pub mount: String,
    pub points: Vec<DiskPoint>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DiskMetrics {
    pub range: String,
    pub mounts: Vec<MountSeries>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DiskIoMetrics {
    pub range: String,
    pub points: Vec<DiskIoPoint>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NetMetrics {
    pub range: String,
    pub points: Vec<NetPoint>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogEntry {
    #[serde(rename = "t")]
    pub at: DateTime<Utc>,
    pub level: String,
    pub msg: String,
}

/// A scheduled maintenance task. The backend owns every field; the client
/// never edits `status` or `last_run` locally — it reloads instead.
#[derive(Debug, Deserialize, Clone)]
pub struct Task {
    pub id: String,
    pub name: String,
    #[serde(rename = "everyMinutes")]
    pub every_minutes: u32,
    #[serde(rename = "lastRun")]
    pub last_run: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub enabled: bool,
}

/// Body for `POST /api/tasks`.
#[derive(Debug, Serialize, Clone)]
pub struct CreateTask {
    pub name: String,
    #[serde(rename = "everyMinutes")]
    pub every_minutes: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_staleness_threshold() {
        let now = Utc::now();
        let fresh = Health {
            status: "ok".into(),
            now,
            last_collector_at: now - Duration::seconds(30),
        };
        let stale = Health {
            status: "ok".into(),
            now,
            last_collector_at: now - Duration::seconds(180),
        };
        assert!(fresh.sampling_active());
        assert!(!stale.sampling_active());
    }

    #[test]
    fn task_decodes_backend_field_names() {
        let t: Task = serde_json::from_str(
            r#"{"id":"t1","name":"Clear Temp","everyMinutes":60,
                "lastRun":"2026-08-01T12:00:00Z","status":"OK","enabled":true}"#,
        )
        .unwrap();
        assert_eq!(t.every_minutes, 60);
        assert!(t.last_run.is_some());
    }

    #[test]
    fn task_tolerates_missing_optionals() {
        let t: Task = serde_json::from_str(
            r#"{"id":"t2","name":"Prune","everyMinutes":15,"lastRun":null}"#,
        )
        .unwrap();
        assert!(t.last_run.is_none());
        assert_eq!(t.status, "");
    }
}
