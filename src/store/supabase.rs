use log::{
    debug,
    error,
};
use reqwest::header::{
    HeaderMap,
    HeaderValue,
    AUTHORIZATION,
    CONTENT_TYPE,
};
use std::time::Duration;

use crate::config::SupabaseConfig;
use crate::errors::{
    ConfigError,
    StoreError,
};
use crate::store::ExecutionStore;
use crate::types::ExecutionRecord;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Inserts records through the PostgREST endpoint of a Supabase project.
pub struct SupabaseStore {
    client: reqwest::Client,
    endpoint: String,
}

fn header(value: &str, name: &'static str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|_| ConfigError::InvalidValue {
        name,
        value: "<redacted>".to_string(),
    })
}

impl SupabaseStore {
    pub fn new(config: &SupabaseConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert("apikey", header(&config.service_key, "SUPABASE_SERVICE_ROLE_KEY")?);
        headers.insert(
            AUTHORIZATION,
            header(&format!("Bearer {}", config.service_key), "SUPABASE_SERVICE_ROLE_KEY")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("prefer", HeaderValue::from_static("return=minimal"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(SupabaseStore {
            client,
            endpoint: Self::endpoint(config),
        })
    }

    fn endpoint(config: &SupabaseConfig) -> String {
        format!("{}/rest/v1/{}", config.url, config.table)
    }
}

#[async_trait::async_trait]
impl ExecutionStore for SupabaseStore {
    async fn append(&self, record: &ExecutionRecord) -> Result<(), StoreError> {
        debug!("Inserting execution record into {}", self.endpoint);
        let response = self.client.post(&self.endpoint).json(record).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Store rejected execution record: {} {}", status, body);
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
