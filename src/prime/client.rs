//! Client for the external nth-prime service.
//!
//! The service is a Wolfram|Alpha-compatible query endpoint. One GET is
//! issued per lookup and only the primary pod's plaintext is consumed.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::LookupConfig;

use super::error::LookupError;
use super::oracle::extract_first_integer;

/// Narrow seam between the lookup workflow and whatever answers "what is the nth prime?".
#[async_trait]
pub trait PrimeLookup: Send + Sync {
    /// Ask for the `n`th prime.
    async fn fetch_nth_prime(&self, n: i64) -> Result<i64, LookupError>;
}

/// HTTP client for a Wolfram|Alpha-style query API.
pub struct WolframAlphaClient {
    client: Client,
    base_url: String,
    app_id: String,
}

impl WolframAlphaClient {
    /// Build a client from lookup configuration.
    ///
    /// The configured timeouts apply to every request.
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            app_id: config.resolved_app_id().unwrap_or_default(),
        })
    }

    async fn query(&self, input: &str) -> Result<QueryResponse, LookupError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("input", input),
                ("format", "plaintext"),
                ("output", "JSON"),
                ("appid", self.app_id.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(error = %e, "Lookup response is not a query result");
            LookupError::Unparseable { answer: body }
        })
    }
}

#[async_trait]
impl PrimeLookup for WolframAlphaClient {
    async fn fetch_nth_prime(&self, n: i64) -> Result<i64, LookupError> {
        let input = format!("prime {}", n);
        tracing::debug!(url = %self.base_url, input = %input, "Sending nth prime query");

        let start = Instant::now();
        let result = self.query(&input).await?;
        let latency_ms = start.elapsed().as_millis() as u64;

        let answer = primary_plaintext(result)?;
        tracing::debug!(latency_ms, answer = %answer, "Nth prime query answered");

        extract_first_integer(&answer).ok_or(LookupError::Unparseable { answer })
    }
}

/// Pick the first subpod text of the first pod marked primary.
fn primary_plaintext(response: QueryResponse) -> Result<String, LookupError> {
    let pod = response
        .queryresult
        .pods
        .into_iter()
        .find(|pod| pod.primary == Some(true))
        .ok_or_else(|| LookupError::ServiceError {
            reason: "no primary pod in answer".to_string(),
        })?;

    let text = pod
        .subpods
        .into_iter()
        .next()
        .map(|subpod| subpod.plaintext)
        .ok_or_else(|| LookupError::ServiceError {
            reason: "primary pod has no subpods".to_string(),
        })?;

    if text.trim().is_empty() {
        return Err(LookupError::ServiceError {
            reason: "primary pod text is empty".to_string(),
        });
    }

    Ok(text)
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    queryresult: QueryResult,
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    #[serde(default)]
    pods: Vec<Pod>,
}

#[derive(Debug, Deserialize)]
struct Pod {
    primary: Option<bool>,
    #[serde(default)]
    subpods: Vec<SubPod>,
}

#[derive(Debug, Deserialize)]
struct SubPod {
    #[serde(default)]
    plaintext: String,
}
