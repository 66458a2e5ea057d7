use std::path::PathBuf;

use thiserror::Error;

/// Failures while decoding a route or probe request
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("failed to read request file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed request JSON")]
    Json(#[from] serde_json::Error),

    #[error("waypoint {index} has invalid turn radius {value}")]
    InvalidTurnRadius { index: usize, value: f64 },
}
