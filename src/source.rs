use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::BrowserError;
use crate::model::{parse_recipes, Recipe};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Somewhere a recipe list can be loaded from
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Load the full recipe list once
    async fn load(&self) -> Result<Vec<Recipe>, BrowserError>;

    /// Human-readable location, used in log messages
    fn location(&self) -> String;
}

/// Reads a JSON recipe list from disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecipeSource for FileSource {
    async fn load(&self) -> Result<Vec<Recipe>, BrowserError> {
        debug!("Reading recipes from {}", self.path.display());
        let json = tokio::fs::read_to_string(&self.path).await?;
        Ok(keep_valid(parse_recipes(&json)?))
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fetches a JSON recipe list over HTTP
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, BrowserError> {
        let client = Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .user_agent(concat!("recipe-browser/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl RecipeSource for HttpSource {
    async fn load(&self) -> Result<Vec<Recipe>, BrowserError> {
        debug!("Fetching recipes from {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BrowserError::Status {
                url: self.url.clone(),
                status,
            });
        }

        let json = response.text().await?;
        Ok(keep_valid(parse_recipes(&json)?))
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}

/// Where the recipe list lives, as written in configuration or on the
/// command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Http(String),
}

impl DataSource {
    /// `http://` and `https://` locations are fetched, anything else is a path
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            DataSource::Http(location.to_string())
        } else {
            DataSource::File(PathBuf::from(location))
        }
    }

    pub fn into_source(
        self,
        timeout: Option<Duration>,
    ) -> Result<Box<dyn RecipeSource>, BrowserError> {
        Ok(match self {
            DataSource::File(path) => Box::new(FileSource::new(path)),
            DataSource::Http(url) => Box::new(HttpSource::new(url, timeout)?),
        })
    }
}

/// Drop recipes that break the `servings > 0` invariant
fn keep_valid(recipes: Vec<Recipe>) -> Vec<Recipe> {
    let total = recipes.len();
    let valid: Vec<Recipe> = recipes
        .into_iter()
        .filter(|recipe| {
            if !recipe.is_valid() {
                warn!("Skipping recipe '{}': servings must be positive", recipe.title);
            }
            recipe.is_valid()
        })
        .collect();

    info!("Loaded {} of {} recipes", valid.len(), total);
    valid
}
