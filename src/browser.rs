use log::{debug, error};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::BrowserConfig;
use crate::error::BrowserError;
use crate::filter::collect_tags;
use crate::model::Recipe;
use crate::route::Route;
use crate::source::{DataSource, RecipeSource};
use crate::view::{
    render_cards_with_limit, render_detail, render_detail_for_servings, render_tags, CardList,
    DetailView, Link, DEFAULT_DESCRIPTION_LIMIT,
};

/// A loaded recipe list and the pages rendered from it.
///
/// The list is loaded once and never changes for the lifetime of the browser.
#[derive(Debug, Clone)]
pub struct RecipeBrowser {
    recipes: Vec<Recipe>,
    tags: Vec<String>,
    description_limit: usize,
}

impl RecipeBrowser {
    /// Creates a new builder for loading a recipe list
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_browser::RecipeBrowser;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let browser = RecipeBrowser::builder()
    ///     .path("./data.json")
    ///     .build()
    ///     .await?;
    /// println!("{} recipes", browser.recipes().len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> RecipeBrowserBuilder {
        RecipeBrowserBuilder::default()
    }

    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        let tags = collect_tags(&recipes);
        Self {
            recipes,
            tags,
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
        }
    }

    pub fn with_description_limit(mut self, limit: usize) -> Self {
        self.description_limit = limit;
        self
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Every tag in use, first-seen order
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn tag_links(&self) -> Vec<Link> {
        render_tags(&self.tags)
    }

    /// Result cards for a route
    pub fn page(&self, route: &Route) -> CardList {
        render_cards_with_limit(route, &self.recipes, self.description_limit)
    }

    /// Result cards for a raw query string such as `?tag=vegan`
    pub fn page_for_query(&self, query: &str) -> CardList {
        self.page(&Route::from_query(query))
    }

    pub fn recipe(&self, index: usize) -> Option<&Recipe> {
        self.recipes.get(index)
    }

    /// Index of the first recipe whose title matches, ignoring case
    pub fn find_by_title(&self, title: &str) -> Option<usize> {
        let title = title.to_lowercase();
        self.recipes
            .iter()
            .position(|recipe| recipe.title.to_lowercase() == title)
    }

    pub fn detail(&self, index: usize) -> Option<DetailView> {
        self.recipe(index).map(render_detail)
    }

    pub fn detail_for_servings(&self, index: usize, servings: u32) -> Option<DetailView> {
        self.recipe(index)
            .map(|recipe| render_detail_for_servings(recipe, servings))
    }

    /// Ingredients of the recipe at `index` rescaled to `servings`
    pub fn change_servings(&self, index: usize, servings: u32) -> Option<Vec<String>> {
        self.detail_for_servings(index, servings)
            .map(|detail| detail.ingredients)
    }
}

enum SourceSpec {
    Data(DataSource),
    Custom(Box<dyn RecipeSource>),
}

/// Builder for loading a [`RecipeBrowser`]
#[derive(Default)]
pub struct RecipeBrowserBuilder {
    source: Option<SourceSpec>,
    timeout: Option<Duration>,
    description_limit: Option<usize>,
}

impl RecipeBrowserBuilder {
    /// Load the recipe list from a JSON file
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(SourceSpec::Data(DataSource::File(path.into())));
        self
    }

    /// Fetch the recipe list over HTTP
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.source = Some(SourceSpec::Data(DataSource::Http(url.into())));
        self
    }

    /// Path or URL, decided by the scheme
    pub fn location(mut self, location: &str) -> Self {
        self.source = Some(SourceSpec::Data(DataSource::parse(location)));
        self
    }

    /// Use any other [`RecipeSource`]
    pub fn source(mut self, source: impl RecipeSource + 'static) -> Self {
        self.source = Some(SourceSpec::Custom(Box::new(source)));
        self
    }

    /// Set a timeout for HTTP requests
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn description_limit(mut self, limit: usize) -> Self {
        self.description_limit = Some(limit);
        self
    }

    /// Take the source, timeout and card description limit from configuration.
    /// Settings made explicitly on the builder take precedence.
    pub fn config(mut self, config: &BrowserConfig) -> Self {
        if self.source.is_none() {
            self.source = Some(SourceSpec::Data(DataSource::parse(&config.data_source)));
        }
        self.timeout.get_or_insert(config.timeout());
        self.description_limit.get_or_insert(config.description_limit);
        self
    }

    /// Load the recipe list
    ///
    /// # Errors
    /// Returns `BrowserError` if:
    /// - No source was specified
    /// - The file cannot be read or the request fails
    /// - The data is not a JSON array of recipes
    pub async fn build(self) -> Result<RecipeBrowser, BrowserError> {
        let limit = self.description_limit.unwrap_or(DEFAULT_DESCRIPTION_LIMIT);

        let source = match self.source {
            Some(SourceSpec::Data(data)) => data.into_source(self.timeout)?,
            Some(SourceSpec::Custom(source)) => source,
            None => {
                return Err(BrowserError::Builder(
                    "No recipe source specified. Use .path() or .url()".to_string(),
                ))
            }
        };

        debug!("Loading recipes from {}", source.location());
        let recipes = source.load().await?;

        Ok(RecipeBrowser::from_recipes(recipes).with_description_limit(limit))
    }

    /// Load the recipe list, logging any failure and falling back to an empty
    /// browser
    pub async fn load_or_empty(self) -> RecipeBrowser {
        let limit = self.description_limit.unwrap_or(DEFAULT_DESCRIPTION_LIMIT);

        match self.build().await {
            Ok(browser) => browser,
            Err(e) => {
                error!("Failed to load recipes: {}", e);
                RecipeBrowser::from_recipes(Vec::new()).with_description_limit(limit)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StaticSource(Vec<Recipe>);

    #[async_trait]
    impl RecipeSource for StaticSource {
        async fn load(&self) -> Result<Vec<Recipe>, BrowserError> {
            Ok(self.0.clone())
        }

        fn location(&self) -> String {
            "memory".to_string()
        }
    }

    fn recipes() -> Vec<Recipe> {
        vec![
            Recipe {
                title: "Chili".to_string(),
                description: "Spicy beans".to_string(),
                servings: 4,
                ingredients: vec!["2 can beans".to_string(), "1 tsp chili".to_string()],
                tags: vec!["dinner".to_string(), "spicy".to_string()],
                ..Default::default()
            },
            Recipe {
                title: "Porridge".to_string(),
                description: "Oats".to_string(),
                servings: 1,
                ingredients: vec!["1/2 cup oats".to_string()],
                tags: vec!["breakfast".to_string(), "dinner".to_string()],
                ..Default::default()
            },
        ]
    }

    #[tokio::test]
    async fn test_build_with_custom_source() {
        let browser = RecipeBrowser::builder()
            .source(StaticSource(recipes()))
            .build()
            .await
            .unwrap();

        assert_eq!(browser.recipes().len(), 2);
        assert_eq!(browser.tags(), &["dinner", "spicy", "breakfast"]);
    }

    #[tokio::test]
    async fn test_build_without_source_fails() {
        let result = RecipeBrowser::builder().build().await;
        assert!(matches!(result, Err(BrowserError::Builder(_))));
    }

    #[tokio::test]
    async fn test_load_or_empty_on_failure() {
        let browser = RecipeBrowser::builder()
            .path("/nonexistent/data.json")
            .load_or_empty()
            .await;
        assert!(browser.is_empty());
        assert!(browser.page(&Route::All).cards.is_empty());
        assert!(browser.tags().is_empty());
    }

    #[tokio::test]
    async fn test_config_does_not_override_explicit_settings() {
        let config = BrowserConfig {
            data_source: "/nonexistent/data.json".to_string(),
            timeout: 1,
            description_limit: 3,
        };
        let browser = RecipeBrowser::builder()
            .source(StaticSource(recipes()))
            .config(&config)
            .build()
            .await
            .unwrap();

        let page = browser.page(&Route::All);
        assert_eq!(page.cards[0].description, "Spi");
    }

    #[test]
    fn test_pages() {
        let browser = RecipeBrowser::from_recipes(recipes());
        assert_eq!(browser.page(&Route::All).cards.len(), 2);
        assert_eq!(browser.page_for_query("?tag=dinner").cards.len(), 2);
        assert_eq!(browser.page_for_query("?tag=spicy").cards[0].title, "Chili");
        assert_eq!(browser.page_for_query("?search=OATS").cards[0].index, 1);
    }

    #[test]
    fn test_tag_links() {
        let browser = RecipeBrowser::from_recipes(recipes());
        let links = browser.tag_links();
        assert_eq!(links.len(), 3);
        assert_eq!(links[2].href, "?tag=breakfast");
    }

    #[test]
    fn test_find_and_detail() {
        let browser = RecipeBrowser::from_recipes(recipes());
        assert_eq!(browser.find_by_title("porridge"), Some(1));
        assert_eq!(browser.find_by_title("lasagne"), None);
        assert_eq!(browser.detail(0).unwrap().title, "Chili");
        assert!(browser.detail(5).is_none());
    }

    #[test]
    fn test_change_servings() {
        let browser = RecipeBrowser::from_recipes(recipes());
        assert_eq!(
            browser.change_servings(0, 2).unwrap(),
            vec!["1 can beans", "1/2 tsp chili"]
        );
        assert_eq!(browser.change_servings(1, 3).unwrap(), vec!["1 1/2 cup oats"]);
        assert!(browser.change_servings(9, 2).is_none());
    }
}
