use thiserror::Error;

/// Errors that can occur while loading or browsing recipes
#[derive(Error, Debug)]
pub enum BrowserError {
    /// Failed to fetch the recipe list over HTTP
    #[error("Failed to fetch recipes: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The recipe server answered with a non-success status
    #[error("Recipe source {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the recipe list from disk
    #[error("Failed to read recipes: {0}")]
    Io(#[from] std::io::Error),

    /// The recipe list is not a valid JSON array of recipes
    #[error("Invalid recipe data: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    Builder(String),
}
