// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Candidate-address failover and stale-response detection
//!
//! Deployments expose the generation backend on an ordered list of base
//! addresses. Each fetch tries candidates in order and the first success
//! wins; once a base answers it stays active until it fails again. A fetch
//! issued for a superseded request is detected by its generation token and
//! discarded by the caller, regardless of arrival order.

use crate::error::{Error, Result};
use crate::types::{Artifact, FileAddress, FileLocator, RunEvent};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Fallback candidate list when no addresses are configured.
const DEFAULT_BASES: &str = "http://localhost:8000,http://127.0.0.1:8000";
/// Sentinel for "no base has answered yet".
const NO_ACTIVE_BASE: usize = usize::MAX;

/// Identity of one logical fetch; a newer token supersedes older ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Monotonic request-generation counter
///
/// `begin` stamps a new request; `is_current` tells whether a completed
/// fetch still speaks for the viewer. Keyed by identity, not arrival order:
/// a slow response for an old token stays stale even if it lands last.
#[derive(Debug, Default)]
pub struct RequestGuard {
    generation: AtomicU64,
}

impl RequestGuard {
    pub fn begin(&self) -> RequestToken {
        RequestToken(self.generation.fetch_add(1, Ordering::Relaxed) + 1)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.generation.load(Ordering::Relaxed) == token.0
    }
}

/// HTTP access to the generation backend over ordered candidate bases
#[derive(Debug)]
pub struct BackendPool {
    bases: Vec<String>,
    http: reqwest::Client,
    active_base: AtomicUsize,
}

impl BackendPool {
    pub fn new(bases: Vec<String>) -> Self {
        Self {
            bases,
            http: reqwest::Client::new(),
            active_base: AtomicUsize::new(NO_ACTIVE_BASE),
        }
    }

    /// Candidate list from `PLAN_BACKEND_URLS` (comma-separated), with the
    /// local development addresses as the default.
    pub fn from_env() -> Self {
        let raw = std::env::var("PLAN_BACKEND_URLS").unwrap_or_else(|_| DEFAULT_BASES.into());
        Self::new(parse_base_list(&raw))
    }

    pub fn bases(&self) -> &[String] {
        &self.bases
    }

    /// Fetch a text document (the plan SVG) at an opaque path.
    pub async fn fetch_text(&self, path: &str) -> Result<String> {
        let response = self.request(path).await?;
        let url = response.url().to_string();
        response
            .text()
            .await
            .map_err(|source| Error::Payload { url, source })
    }

    /// Fetch raw bytes (the glTF model) at an opaque path.
    pub async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let response = self.request(path).await?;
        let url = response.url().to_string();
        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|source| Error::Payload { url, source })
    }

    /// Fetch a plan or model file through the caller's locator.
    pub async fn fetch_file(
        &self,
        locator: &impl FileLocator,
        address: &FileAddress,
    ) -> Result<Vec<u8>> {
        self.fetch_bytes(&locator.resolve(address)).await
    }

    /// List the artifacts one run produced.
    pub async fn fetch_run_artifacts(&self, run_id: &str) -> Result<Vec<Artifact>> {
        self.fetch_json(&format!("runs/{}/artifacts", run_id)).await
    }

    /// Run progress events, newest last; doubles as the run-status surface.
    pub async fn fetch_run_events(&self, run_id: &str) -> Result<Vec<RunEvent>> {
        self.fetch_json(&format!("runs/{}/events", run_id)).await
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(path).await?;
        let url = response.url().to_string();
        response
            .json::<T>()
            .await
            .map_err(|source| Error::Payload { url, source })
    }

    /// Issue one GET, preferring the base that last answered.
    ///
    /// With an active base, a failure is a one-shot [`Error::Retrieval`] and
    /// the base is demoted; the next call rescans every candidate. With no
    /// active base, all candidates are tried in order and exhausting them is
    /// [`Error::BackendUnavailable`].
    async fn request(&self, path: &str) -> Result<reqwest::Response> {
        let active = self.active_base.load(Ordering::Relaxed);
        if let Some(base) = self.bases.get(active) {
            let url = join_url(base, path);
            match self.try_get(&url).await {
                Ok(response) => return Ok(response),
                Err(source) => {
                    tracing::warn!(url = %url, error = %source, "Active backend failed");
                    self.active_base.store(NO_ACTIVE_BASE, Ordering::Relaxed);
                    return Err(Error::Retrieval { url, source });
                }
            }
        }

        for (index, base) in self.bases.iter().enumerate() {
            let url = join_url(base, path);
            match self.try_get(&url).await {
                Ok(response) => {
                    self.active_base.store(index, Ordering::Relaxed);
                    return Ok(response);
                }
                Err(error) => {
                    tracing::debug!(url = %url, error = %error, "Candidate backend failed");
                }
            }
        }

        tracing::warn!(attempts = self.bases.len(), "No backend candidate responded");
        Err(Error::BackendUnavailable {
            attempts: self.bases.len(),
        })
    }

    async fn try_get(&self, url: &str) -> std::result::Result<reqwest::Response, reqwest::Error> {
        let response = self.http.get(url).send().await?;
        response.error_for_status()
    }
}

fn parse_base_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_list_parsing_trims_and_drops_empties() {
        let bases = parse_base_list(" http://a:8000/ ,, http://b:9000");
        assert_eq!(bases, ["http://a:8000", "http://b:9000"]);
    }

    #[test]
    fn join_url_normalizes_slashes() {
        assert_eq!(join_url("http://a:8000/", "/runs/1/artifacts"), "http://a:8000/runs/1/artifacts");
        assert_eq!(join_url("http://a:8000", "files/p/r/f.svg"), "http://a:8000/files/p/r/f.svg");
    }

    #[test]
    fn newer_request_supersedes_older_regardless_of_arrival() {
        let guard = RequestGuard::default();
        let first = guard.begin();
        let second = guard.begin();
        // The slow first response lands after the second was issued.
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn locator_closure_resolves_addresses() {
        let locator = |address: &FileAddress| {
            format!(
                "files/{}/{}/{}",
                address.project_id, address.run_id, address.file_name
            )
        };
        let address = FileAddress {
            project_id: "p1".into(),
            run_id: "r9".into(),
            file_name: "tower_plan.svg".into(),
        };
        assert_eq!(locator.resolve(&address), "files/p1/r9/tower_plan.svg");
    }

    #[tokio::test]
    async fn exhausting_unreachable_candidates_is_backend_unavailable() {
        // Nothing listens on the loopback discard ports, so both candidates
        // fail fast without touching the network.
        let pool = BackendPool::new(vec![
            "http://127.0.0.1:9".into(),
            "http://127.0.0.1:10".into(),
        ]);
        match pool.fetch_text("files/p/r/plan.svg").await {
            Err(Error::BackendUnavailable { attempts }) => assert_eq!(attempts, 2),
            other => panic!("expected BackendUnavailable, got {:?}", other.map(|_| ())),
        }
    }
}
