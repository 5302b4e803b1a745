// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Plan-Lite Retrieval Client
//!
//! Async access to the generation backend: run events, artifact listings,
//! and the plan/model files themselves. The backend may be reachable on any
//! of an ordered list of candidate base addresses; each fetch tries them in
//! order and the first success wins. When every candidate fails the caller
//! gets a distinct [`Error::BackendUnavailable`] so the UI can show a
//! persistent banner instead of a one-shot error — and in either case the
//! previous known-good state is kept, never cleared.
//!
//! ```rust,ignore
//! use plan_lite_client::{select_plan_artifact, BackendPool, RequestGuard};
//!
//! let pool = BackendPool::from_env();
//! let guard = RequestGuard::default();
//!
//! let token = guard.begin();
//! let artifacts = pool.fetch_run_artifacts("run-42").await?;
//! if let Some(plan) = select_plan_artifact(&artifacts) {
//!     let svg = pool.fetch_text(&format!("files/p1/run-42/{}", plan.file_name)).await?;
//!     if guard.is_current(token) {
//!         // adopt the document; stale responses are dropped here
//!     }
//! }
//! ```

pub mod artifacts;
pub mod error;
pub mod fetch;
pub mod types;

pub use artifacts::{select_model_artifact, select_plan_artifact};
pub use error::{Error, Result};
pub use fetch::{BackendPool, RequestGuard, RequestToken};
pub use types::{Artifact, FileAddress, FileLocator, RunEvent};
