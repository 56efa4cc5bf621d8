// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for loading plans and configuration.
//!
//! The pipeline itself never fails; only the I/O edge returns these.

use std::path::PathBuf;

/// Result type alias for plan I/O
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading or writing a file failed
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Plan or config JSON was malformed
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Mesh generation failed
    #[error("geometry error: {0}")]
    Geometry(#[from] planview_geometry::Error),
}
