use crate::core::{QuotaPolicy, RequestHistory, RequestRecord};
use crate::utils::error::{DinnerError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

// Check-and-append in one step; callers hold the records lock.
fn try_append(
    policy: &QuotaPolicy,
    records: &mut Vec<RequestRecord>,
    user_id: i64,
    now: DateTime<Utc>,
) -> Result<()> {
    if !policy.allows(records.as_slice(), user_id, now) {
        return Err(DinnerError::QuotaExceeded { user_id });
    }
    records.push(RequestRecord {
        user_id,
        timestamp: now,
    });
    Ok(())
}

/// Request history kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryRequestHistory {
    policy: QuotaPolicy,
    records: Mutex<Vec<RequestRecord>>,
}

impl InMemoryRequestHistory {
    pub fn new(policy: QuotaPolicy) -> Self {
        Self::with_records(policy, Vec::new())
    }

    pub fn with_records(policy: QuotaPolicy, records: Vec<RequestRecord>) -> Self {
        Self {
            policy,
            records: Mutex::new(records),
        }
    }

    pub async fn records(&self) -> Vec<RequestRecord> {
        self.records.lock().await.clone()
    }

    pub async fn count_for(&self, user_id: i64) -> usize {
        let records = self.records.lock().await;
        records.iter().filter(|r| r.user_id == user_id).count()
    }
}

#[async_trait]
impl RequestHistory for InMemoryRequestHistory {
    async fn within_quota(&self, user_id: i64) -> Result<bool> {
        let records = self.records.lock().await;
        Ok(self.policy.allows(&records, user_id, Utc::now()))
    }

    async fn record_request(&self, user_id: i64) -> Result<()> {
        let mut records = self.records.lock().await;
        try_append(&self.policy, &mut records, user_id, Utc::now())
    }
}

/// Request history persisted as a JSON array of records.
///
/// The whole file is rewritten on every accepted request. Records that fell
/// out of the quota window are dropped on write.
#[derive(Debug)]
pub struct JsonFileRequestHistory {
    path: PathBuf,
    policy: QuotaPolicy,
    records: Mutex<Vec<RequestRecord>>,
}

impl JsonFileRequestHistory {
    /// Loads existing records from `path`; a missing file starts an empty history.
    pub async fn open(path: impl Into<PathBuf>, policy: QuotaPolicy) -> Result<Self> {
        let path = path.into();
        let records: Vec<RequestRecord> = match tokio::fs::read(&path).await {
            Ok(data) if data.is_empty() => Vec::new(),
            Ok(data) => serde_json::from_slice(&data)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No history at {}, starting empty", path.display());
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };
        tracing::debug!("Loaded {} history records", records.len());

        Ok(Self {
            path,
            policy,
            records: Mutex::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn records(&self) -> Vec<RequestRecord> {
        self.records.lock().await.clone()
    }

    async fn persist(&self, records: &[RequestRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let data = serde_json::to_vec_pretty(records)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, data).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl RequestHistory for JsonFileRequestHistory {
    async fn within_quota(&self, user_id: i64) -> Result<bool> {
        let records = self.records.lock().await;
        Ok(self.policy.allows(&records, user_id, Utc::now()))
    }

    async fn record_request(&self, user_id: i64) -> Result<()> {
        let mut records = self.records.lock().await;
        let now = Utc::now();

        let mut updated: Vec<RequestRecord> = records
            .iter()
            .filter(|r| !self.policy.is_expired(r, now))
            .cloned()
            .collect();
        try_append(&self.policy, &mut updated, user_id, now)?;

        // Memory only changes once the file is written, so a failed write
        // does not use up quota.
        self.persist(&updated).await.map_err(|e| {
            tracing::error!(error = %e, "failed to persist request history");
            DinnerError::storage(format!("{}: {}", self.path.display(), e))
        })?;
        *records = updated;
        Ok(())
    }
}
