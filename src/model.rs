use serde::{Deserialize, Serialize};

/// A single recipe record as stored in the recipe list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Number of servings the ingredient quantities are written for
    pub servings: u32,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub directions: Vec<String>,
    /// Free-text labels; the source list may repeat a tag
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time_min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time_min: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl Recipe {
    /// A recipe is usable only if it serves at least one person, since
    /// rescaling divides by the original serving count.
    pub fn is_valid(&self) -> bool {
        self.servings > 0
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Parse a JSON array of recipes
pub fn parse_recipes(json: &str) -> Result<Vec<Recipe>, serde_json::Error> {
    serde_json::from_str(json)
}
