//! Display-independent view models.
//!
//! Rendering produces plain data; whatever surface shows it (the CLI, a web
//! page fed with JSON) only has to walk these structures.

use serde::Serialize;

use crate::filter::filter_recipes;
use crate::model::Recipe;
use crate::route::{tag_href, Route, CLEAR_HREF};
use crate::scaling::rescale;

/// Characters of the description shown on a result card
pub const DEFAULT_DESCRIPTION_LIMIT: usize = 150;

pub const VIEW_ACTION_LABEL: &str = "View Recipe";
pub const CLEAR_ACTION_LABEL: &str = "Clear";
pub const AUTHOR_PREFIX: &str = "View more fantastic recipes by ";
pub const MIN_SERVINGS: u32 = 1;

/// A page of result cards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardList {
    /// Present only when the page is narrowed by a search or tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<Banner>,
    pub cards: Vec<Card>,
}

/// Describes the active filter and how to clear it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Banner {
    pub text: String,
    pub clear: Link,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    /// Position of the recipe in the full recipe list
    pub index: usize,
    pub title: String,
    pub description: String,
    pub action: String,
}

/// Everything needed to show a single recipe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,
    pub servings: ServingControl,
    pub ingredients: Vec<String>,
    pub directions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorLine {
    pub prefix: String,
    pub link: Link,
}

/// The decrement / number field / increment control of the detail view.
///
/// The control owns only the displayed number; the recipe is handed in by
/// value on every change, so there is nothing captured that could go stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServingControl {
    pub value: u32,
    pub min: u32,
    pub step: u32,
}

impl ServingControl {
    pub fn for_recipe(recipe: &Recipe) -> Self {
        Self {
            value: recipe.servings.max(MIN_SERVINGS),
            min: MIN_SERVINGS,
            step: recipe.servings,
        }
    }

    /// One serving more; returns the rescaled ingredients
    pub fn increment(&mut self, recipe: &Recipe) -> Vec<String> {
        self.set(recipe, self.value.saturating_add(1))
    }

    /// One serving fewer (never below the minimum); returns the rescaled
    /// ingredients
    pub fn decrement(&mut self, recipe: &Recipe) -> Vec<String> {
        self.set(recipe, self.value.saturating_sub(1))
    }

    /// Set the serving count directly, clamped to the minimum
    pub fn set(&mut self, recipe: &Recipe, servings: u32) -> Vec<String> {
        self.value = servings.max(self.min);
        rescale(&recipe.ingredients, recipe.servings, self.value)
    }
}

/// Render the result cards for `route`, truncating descriptions to
/// [`DEFAULT_DESCRIPTION_LIMIT`] characters.
pub fn render_cards(route: &Route, recipes: &[Recipe]) -> CardList {
    render_cards_with_limit(route, recipes, DEFAULT_DESCRIPTION_LIMIT)
}

pub fn render_cards_with_limit(route: &Route, recipes: &[Recipe], limit: usize) -> CardList {
    let banner = route.describe().map(|text| Banner {
        text,
        clear: Link {
            label: CLEAR_ACTION_LABEL.to_string(),
            href: CLEAR_HREF.to_string(),
        },
    });

    let cards = filter_recipes(route, recipes)
        .into_iter()
        .map(|(index, recipe)| Card {
            index,
            title: recipe.title.clone(),
            description: truncate_chars(&recipe.description, limit),
            action: VIEW_ACTION_LABEL.to_string(),
        })
        .collect();

    CardList { banner, cards }
}

/// One link per tag, filtering the results by that tag
pub fn render_tags<S: AsRef<str>>(tags: &[S]) -> Vec<Link> {
    tags.iter()
        .map(|tag| Link {
            label: tag.as_ref().to_string(),
            href: tag_href(tag.as_ref()),
        })
        .collect()
}

pub fn render_detail(recipe: &Recipe) -> DetailView {
    let author = recipe.author.as_ref().map(|author| AuthorLine {
        prefix: AUTHOR_PREFIX.to_string(),
        link: Link {
            label: author.name.clone(),
            href: author.url.clone(),
        },
    });

    let description = Some(recipe.description.clone()).filter(|d| !d.is_empty());

    // Zero minutes is treated as not given.
    let prep_time = recipe
        .prep_time_min
        .filter(|&m| m > 0)
        .map(|m| format!("Preparation Time: {}", m));
    let cook_time = recipe
        .cook_time_min
        .filter(|&m| m > 0)
        .map(|m| format!("Cooking Time: {}", m));

    DetailView {
        title: recipe.title.clone(),
        author,
        description,
        prep_time,
        cook_time,
        servings: ServingControl::for_recipe(recipe),
        ingredients: recipe.ingredients.clone(),
        directions: recipe.directions.clone(),
    }
}

/// Detail view with the ingredients rescaled to `servings`.
///
/// Quantities are always rewritten, even for the recipe's own serving count,
/// so `0.5 cup` shows as `1/2 cup` just as it does after any other change.
pub fn render_detail_for_servings(recipe: &Recipe, servings: u32) -> DetailView {
    let mut detail = render_detail(recipe);
    detail.ingredients = detail.servings.set(recipe, servings);
    detail
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
