// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire types for the run/artifact registry

use serde::{Deserialize, Serialize};

/// One named output file produced by a generation run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artifact {
    pub id: String,
    pub run_id: String,
    pub kind: String,
    pub file_name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// One progress event emitted while a run executes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunEvent {
    pub id: String,
    pub run_id: String,
    pub message: String,
    pub level: String,
    pub step: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A file address within one run's output set
///
/// Resolution to a retrieval URL belongs to the file-serving collaborator;
/// the client treats the resolved path as opaque.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileAddress {
    pub project_id: String,
    pub run_id: String,
    pub file_name: String,
}

/// Maps a file address to a retrieval path, relative to a backend base
pub trait FileLocator {
    fn resolve(&self, address: &FileAddress) -> String;
}

impl<F> FileLocator for F
where
    F: Fn(&FileAddress) -> String,
{
    fn resolve(&self, address: &FileAddress) -> String {
        self(address)
    }
}
