pub mod browser;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod route;
pub mod scaling;
pub mod source;
pub mod view;

pub use browser::{RecipeBrowser, RecipeBrowserBuilder};
pub use config::BrowserConfig;
pub use error::BrowserError;
pub use model::{Author, Recipe};
pub use route::Route;
pub use scaling::{gcd, rescale};
pub use source::{DataSource, FileSource, HttpSource, RecipeSource};
pub use view::{render_cards, render_detail, render_tags, CardList, DetailView, ServingControl};

/// Load every valid recipe from a path or http(s) URL
pub async fn load_recipes(location: &str) -> Result<Vec<Recipe>, BrowserError> {
    DataSource::parse(location).into_source(None)?.load().await
}

/// Load a recipe list and render the results page for a query string
pub async fn browse(location: &str, query: &str) -> Result<CardList, BrowserError> {
    let browser = RecipeBrowser::builder().location(location).build().await?;
    Ok(browser.page_for_query(query))
}
