//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_service;

use async_trait::async_trait;
use parking_lot::Mutex;
use prime_counter::config::LookupConfig;
use prime_counter::prime::{LookupError, PrimeLookup};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::Semaphore;

/// Scripted lookup that blocks each call until released.
///
/// Responses are returned in enqueue order. A call with nothing queued
/// fails with `ServiceError`.
pub struct GatedLookup {
    calls: AtomicUsize,
    requested: Mutex<Vec<i64>>,
    responses: Mutex<VecDeque<Result<i64, LookupError>>>,
    gate: Semaphore,
}

impl GatedLookup {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
            gate: Semaphore::new(0),
        })
    }

    /// A lookup whose calls never block.
    pub fn ungated() -> Arc<Self> {
        let lookup = Self::new();
        lookup.gate.add_permits(Semaphore::MAX_PERMITS / 2);
        lookup
    }

    pub fn enqueue(&self, response: Result<i64, LookupError>) {
        self.responses.lock().push_back(response);
    }

    /// Let one blocked (or future) call proceed.
    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<i64> {
        self.requested.lock().clone()
    }
}

#[async_trait]
impl PrimeLookup for GatedLookup {
    async fn fetch_nth_prime(&self, n: i64) -> Result<i64, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().push(n);

        let permit = self.gate.acquire().await.expect("gate closed");
        permit.forget();

        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| {
                Err(LookupError::ServiceError {
                    reason: "no scripted response".to_string(),
                })
            })
    }
}

/// Poll `condition` until it holds or `timeout` elapses.
pub async fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}

/// Lookup config pointing at `base_url` with short timeouts.
pub fn lookup_config(base_url: &str) -> LookupConfig {
    LookupConfig {
        base_url: base_url.to_string(),
        app_id: Some("test-app".to_string()),
        timeout_seconds: 2,
        connect_timeout_seconds: 1,
    }
}

/// Write `content` to a config file in a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Query-result body with one primary pod carrying `plaintext`.
pub fn primary_answer(plaintext: &str) -> String {
    serde_json::json!({
        "queryresult": {
            "success": true,
            "pods": [
                { "title": "Input", "subpods": [{ "plaintext": "prime(n)" }] },
                { "title": "Result", "primary": true, "subpods": [{ "plaintext": plaintext }] }
            ]
        }
    })
    .to_string()
}
