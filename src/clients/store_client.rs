//! Remote object store client.
//!
//! The store is a hosted Postgres-over-REST service exposing two
//! collections: `subjects` (newest first by creation time) and
//! `test_results` (newest first by completion time). Inserts ask the store
//! to echo the stored record so generated identifiers and timestamps can be
//! reconciled locally.
//!
//! Every failure maps to `PersistenceError`; callers are expected to treat
//! these as recoverable (optimistic local fallback), never fatal.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, AppResult, PersistenceError};
use crate::models::{Subject, TestResult};

/// Storage seam for the orchestrator. The production implementation is
/// [`StoreClient`]; tests substitute in-memory fakes.
#[allow(async_fn_in_trait)]
pub trait ObjectStore {
    async fn list_subjects(&self) -> AppResult<Vec<Subject>>;
    async fn insert_subject(&self, subject: &Subject) -> AppResult<Subject>;
    async fn delete_subject(&self, id: &str) -> AppResult<()>;
    async fn list_results(&self) -> AppResult<Vec<TestResult>>;
    async fn insert_result(&self, result: &TestResult) -> AppResult<TestResult>;
}

/// REST client for the remote store.
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl StoreClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.store_base_url.trim_end_matches('/').to_string(),
            api_key: config.store_api_key.clone(),
        }
    }

    fn endpoint(&self, path_and_query: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, path_and_query)
    }

    async fn fetch_list<T: DeserializeOwned>(&self, path_and_query: &str) -> AppResult<Vec<T>> {
        let url = self.endpoint(path_and_query);
        let response = self
            .http
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| AppError::request_failed(&url, e))?;

        check_status(&url, response.status())?;
        response.json().await.map_err(|e| {
            AppError::Persistence(PersistenceError::DecodeFailed {
                source: Box::new(e),
            })
        })
    }

    /// POST one record and return the stored copy echoed by the store.
    async fn insert_one<T: Serialize + DeserializeOwned>(
        &self,
        collection: &str,
        record: &T,
    ) -> AppResult<T> {
        let url = self.endpoint(collection);
        debug!("inserting into {}", collection);

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            .json(&[record])
            .send()
            .await
            .map_err(|e| AppError::request_failed(&url, e))?;

        check_status(&url, response.status())?;
        let mut stored: Vec<T> = response.json().await.map_err(|e| {
            AppError::Persistence(PersistenceError::DecodeFailed {
                source: Box::new(e),
            })
        })?;

        if stored.is_empty() {
            return Err(AppError::Persistence(PersistenceError::EmptyResponse {
                endpoint: url,
            }));
        }
        Ok(stored.remove(0))
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> AppResult<()> {
        let url = self.endpoint(&format!("{}?id=eq.{}", collection, id));
        let response = self
            .http
            .delete(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| AppError::request_failed(&url, e))?;

        check_status(&url, response.status())
    }
}

fn check_status(url: &str, status: reqwest::StatusCode) -> AppResult<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(AppError::Persistence(PersistenceError::BadStatus {
            endpoint: url.to_string(),
            status: status.as_u16(),
        }))
    }
}

impl ObjectStore for StoreClient {
    async fn list_subjects(&self) -> AppResult<Vec<Subject>> {
        self.fetch_list("subjects?select=*&order=createdAt.desc").await
    }

    async fn insert_subject(&self, subject: &Subject) -> AppResult<Subject> {
        self.insert_one("subjects", subject).await
    }

    async fn delete_subject(&self, id: &str) -> AppResult<()> {
        self.delete_by_id("subjects", id).await
    }

    async fn list_results(&self) -> AppResult<Vec<TestResult>> {
        self.fetch_list("test_results?select=*&order=date.desc").await
    }

    async fn insert_result(&self, result: &TestResult) -> AppResult<TestResult> {
        self.insert_one("test_results", result).await
    }
}
