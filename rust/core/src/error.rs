// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for plan parsing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while interpreting a plan document
///
/// Per-element problems (degenerate geometry, unparseable attributes) never
/// surface here; affected elements are dropped and affected fields default.
/// The only fatal condition is a document with no drawing root at all.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed document: no drawing root element")]
    MalformedDocument,
}
