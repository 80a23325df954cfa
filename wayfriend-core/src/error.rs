use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Route request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Routing backend returned status {status}: {body}")]
    Backend { status: u16, body: String },
    #[error("Failed to decode routing response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
