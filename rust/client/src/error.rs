// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for retrieval operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the retrieval client
///
/// A one-shot `Retrieval` failure warrants a retry action in the UI; a
/// `BackendUnavailable` means every candidate address failed and deserves a
/// persistent banner. Neither clears previously fetched state.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Retrieval failed for {url}: {source}")]
    Retrieval {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("All {attempts} candidate backend addresses are unavailable")]
    BackendUnavailable { attempts: usize },

    #[error("Unexpected payload from {url}: {source}")]
    Payload {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
