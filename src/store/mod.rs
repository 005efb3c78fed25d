mod supabase;

pub use supabase::SupabaseStore;

use log::info;
use std::sync::{
    Arc,
    Mutex,
};

use crate::errors::StoreError;
use crate::types::ExecutionRecord;

/// Append-only sink for execution attempts.
#[async_trait::async_trait]
pub trait ExecutionStore: Send + Sync {
    async fn append(&self, record: &ExecutionRecord) -> Result<(), StoreError>;
}

/// Used when no database is configured; records only reach the log.
#[derive(Debug, Clone, Default)]
pub struct LogStore;

#[async_trait::async_trait]
impl ExecutionStore for LogStore {
    async fn append(&self, record: &ExecutionRecord) -> Result<(), StoreError> {
        info!(
            "execution record: session={:?} language={} failed={}",
            record.session_id,
            record.language,
            record.error.is_some()
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Vec<ExecutionRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<ExecutionRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait::async_trait]
impl ExecutionStore for MemoryStore {
    async fn append(&self, record: &ExecutionRecord) -> Result<(), StoreError> {
        match self.records.lock() {
            Ok(mut records) => records.push(record.clone()),
            Err(poisoned) => poisoned.into_inner().push(record.clone()),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(language: &str) -> ExecutionRecord {
        ExecutionRecord {
            session_id: Some("s".to_string()),
            language: language.to_string(),
            code: String::new(),
            output: None,
            error: None,
        }
    }

    #[tokio::test]
    async fn test_memory_store_appends_in_order() {
        let store = MemoryStore::new();
        store.append(&record("python")).await.unwrap();
        store.append(&record("css")).await.unwrap();

        let languages: Vec<String> = store.records().into_iter().map(|r| r.language).collect();
        assert_eq!(languages, vec!["python", "css"]);
    }

    #[tokio::test]
    async fn test_clones_share_records() {
        let store = MemoryStore::new();
        let handle = store.clone();
        handle.append(&record("cpp")).await.unwrap();
        assert_eq!(store.records().len(), 1);
    }

    #[tokio::test]
    async fn test_log_store_accepts_everything() {
        assert!(LogStore.append(&record("ruby")).await.is_ok());
    }
}
