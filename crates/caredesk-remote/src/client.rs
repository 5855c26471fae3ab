//! HTTP client for the hosted backend's data API

use crate::query::Query;
use caredesk_core::{Error, Result};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for reading and writing collections on the hosted backend
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RemoteClient {
    /// Create a new client
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Create a client from configuration, honoring the request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_config(config: &caredesk_core::config::RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .map_err(|e| Error::Configuration {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn collection_url(&self, collection: &str, query_string: &str) -> String {
        let mut url = format!("{}/rest/v1/{collection}", self.base_url);
        if !query_string.is_empty() {
            url.push('?');
            url.push_str(query_string);
        }
        url
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    /// Fetch matching records, deserialized into `T`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the backend reports a
    /// non-success status, or the response cannot be parsed.
    pub async fn fetch<T: DeserializeOwned>(&self, query: &Query) -> Result<Vec<T>> {
        let collection = query.collection();
        let url = self.collection_url(collection, &query.to_query_string());

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| Error::Backend(format!("Failed to fetch {collection}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Backend(format!(
                "API returned error for {collection}: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Backend(format!("Failed to parse {collection} response: {e}")))
    }

    /// Fetch matching records as untyped rows for the record browser
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the backend reports a
    /// non-success status, or the response cannot be parsed.
    pub async fn fetch_rows(&self, query: &Query) -> Result<Vec<serde_json::Value>> {
        self.fetch(query).await
    }

    /// Count matching records without fetching them
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the backend does not
    /// report a count.
    pub async fn count(&self, query: &Query) -> Result<u64> {
        let collection = query.collection();
        let url = self.collection_url(collection, &query.to_query_string());

        let response = self
            .authorize(self.client.head(&url))
            .header("Prefer", "count=exact")
            .send()
            .await
            .map_err(|e| Error::Backend(format!("Failed to count {collection}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Backend(format!(
                "API returned error for {collection}: {}",
                response.status()
            )));
        }

        // The count rides in the Content-Range header: "0-24/3573"
        response
            .headers()
            .get("content-range")
            .and_then(|value| value.to_str().ok())
            .and_then(|range| range.rsplit('/').next())
            .and_then(|total| total.parse().ok())
            .ok_or_else(|| {
                Error::Backend(format!("Missing count in {collection} response"))
            })
    }

    /// Insert a record into a collection
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the backend reports a
    /// non-success status.
    pub async fn insert<T: Serialize + Sync>(&self, collection: &str, record: &T) -> Result<()> {
        let url = self.collection_url(collection, "");

        let response = self
            .authorize(self.client.post(&url))
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await
            .map_err(|e| Error::Backend(format!("Failed to insert into {collection}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Backend(format!(
                "API returned error for {collection}: {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Update records matching the query's equality filters
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the backend reports a
    /// non-success status.
    pub async fn update(&self, query: &Query, patch: &serde_json::Value) -> Result<()> {
        let collection = query.collection();
        let url = self.collection_url(collection, &query.to_filter_string());

        let response = self
            .authorize(self.client.patch(&url))
            .header("Prefer", "return=minimal")
            .json(patch)
            .send()
            .await
            .map_err(|e| Error::Backend(format!("Failed to update {collection}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Backend(format!(
                "API returned error for {collection}: {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Delete records matching the query's equality filters
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the backend reports a
    /// non-success status.
    pub async fn delete(&self, query: &Query) -> Result<()> {
        let collection = query.collection();
        let url = self.collection_url(collection, &query.to_filter_string());

        let response = self
            .authorize(self.client.delete(&url))
            .send()
            .await
            .map_err(|e| Error::Backend(format!("Failed to delete from {collection}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Backend(format!(
                "API returned error for {collection}: {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq, Eq)]
    struct PlanRow {
        name: String,
        duration_days: i32,
    }

    #[tokio::test]
    async fn test_fetch_deserializes_rows() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/subscription_plans"))
            .and(query_param("order", "created_at.desc"))
            .and(header("apikey", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "Family Plus", "duration_days": 30},
                {"name": "Single", "duration_days": 7}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = RemoteClient::new(server.uri(), "test-key");
        let query = Query::new("subscription_plans").order_desc("created_at");
        let plans: Vec<PlanRow> = client.fetch(&query).await.unwrap();

        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].name, "Family Plus");
        assert_eq!(plans[1].duration_days, 7);
    }

    #[tokio::test]
    async fn test_fetch_rows_untyped() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/users"))
            .and(query_param("role", "eq.doctor"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"full_name": "Dr. Karim Uddin", "role": "doctor"}
            ])))
            .mount(&server)
            .await;

        let client = RemoteClient::new(server.uri(), "test-key");
        let rows = client
            .fetch_rows(&Query::new("users").eq("role", "doctor"))
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["full_name"], "Dr. Karim Uddin");
    }

    #[tokio::test]
    async fn test_fetch_non_success_is_backend_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/users"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = RemoteClient::new(server.uri(), "test-key");
        let result = client.fetch_rows(&Query::new("users")).await;

        let error = result.unwrap_err();
        let message = error.to_string();
        assert!(message.contains("users"));
        assert!(message.contains("503"));
    }

    #[tokio::test]
    async fn test_count_parses_content_range() {
        let server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/rest/v1/consultations"))
            .and(header("Prefer", "count=exact"))
            .respond_with(ResponseTemplate::new(200).insert_header("content-range", "0-24/3573"))
            .mount(&server)
            .await;

        let client = RemoteClient::new(server.uri(), "test-key");
        let total = client.count(&Query::new("consultations")).await.unwrap();

        assert_eq!(total, 3573);
    }

    #[tokio::test]
    async fn test_count_missing_header_is_error() {
        let server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/rest/v1/consultations"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = RemoteClient::new(server.uri(), "test-key");
        let result = client.count(&Query::new("consultations")).await;

        assert!(result.unwrap_err().to_string().contains("Missing count"));
    }

    #[tokio::test]
    async fn test_insert_posts_record() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/doctors"))
            .and(header("Prefer", "return=minimal"))
            .and(body_json(json!({
                "user_id": "u-1",
                "specialization": "Cardiology"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = RemoteClient::new(server.uri(), "test-key");
        let record = json!({"user_id": "u-1", "specialization": "Cardiology"});

        client.insert("doctors", &record).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_patches_filtered_rows() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/rest/v1/subscriptions"))
            .and(query_param("id", "eq.sub-1"))
            .and(body_json(json!({"status": "cancelled"})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = RemoteClient::new(server.uri(), "test-key");
        let query = Query::new("subscriptions").eq("id", "sub-1");

        client
            .update(&query, &json!({"status": "cancelled"}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_uses_filters_only() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/rest/v1/ratings"))
            .and(query_param("id", "eq.r-9"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = RemoteClient::new(server.uri(), "test-key");
        let query = Query::new("ratings").eq("id", "r-9").order_desc("created_at");

        client.delete(&query).await.unwrap();
    }

    #[tokio::test]
    async fn test_write_failure_is_backend_error() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/rest/v1/users"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&server)
            .await;

        let client = RemoteClient::new(server.uri(), "test-key");
        let result = client.delete(&Query::new("users").eq("id", "u-1")).await;

        assert!(result.unwrap_err().to_string().contains("409"));
    }
}
