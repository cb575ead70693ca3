use std::collections::HashSet;

use log::debug;

use crate::model::Recipe;
use crate::route::Route;

/// Recipes whose title, description or any ingredient contains `term`,
/// ignoring case. Source order is kept.
pub fn search_recipes<'a>(term: &str, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
    let term = term.to_lowercase();

    recipes
        .iter()
        .filter(|recipe| matches_search(recipe, &term))
        .collect()
}

fn matches_search(recipe: &Recipe, term: &str) -> bool {
    recipe.title.to_lowercase().contains(term)
        || recipe.description.to_lowercase().contains(term)
        || recipe
            .ingredients
            .iter()
            .any(|ingredient| ingredient.to_lowercase().contains(term))
}

/// Recipes carrying exactly `tag`
pub fn filter_by_tag<'a>(tag: &str, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
    recipes.iter().filter(|recipe| recipe.has_tag(tag)).collect()
}

/// Apply a route, returning `(index, recipe)` pairs so callers can refer back
/// to the recipe's position in the full list.
pub fn filter_recipes<'a>(route: &Route, recipes: &'a [Recipe]) -> Vec<(usize, &'a Recipe)> {
    let indexed = recipes.iter().enumerate();

    let filtered: Vec<_> = match route {
        Route::All => indexed.collect(),
        Route::Search(term) => {
            let term = term.to_lowercase();
            indexed.filter(|(_, r)| matches_search(r, &term)).collect()
        }
        Route::Tag(tag) => indexed.filter(|(_, r)| r.has_tag(tag)).collect(),
    };

    debug!(
        "Route {:?} matched {} of {} recipes",
        route,
        filtered.len(),
        recipes.len()
    );
    filtered
}

/// Every tag used by any recipe, without duplicates, in first-seen order
pub fn collect_tags(recipes: &[Recipe]) -> Vec<String> {
    let mut seen = HashSet::new();

    recipes
        .iter()
        .flat_map(|recipe| recipe.tags.iter())
        .filter(|tag| seen.insert(tag.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(title: &str, description: &str, ingredients: &[&str], tags: &[&str]) -> Recipe {
        Recipe {
            title: title.to_string(),
            description: description.to_string(),
            servings: 2,
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn sample() -> Vec<Recipe> {
        vec![
            recipe("Tomato Soup", "Warming bowl", &["4 tomato", "1 onion"], &["soup", "vegan"]),
            recipe("Pancakes", "Sunday Breakfast", &["2 cup flour", "1 egg"], &["breakfast"]),
            recipe("Fried Rice", "Leftover rice", &["2 cup Basmati Rice"], &["vegan", "dinner"]),
        ]
    }

    fn titles(recipes: &[&Recipe]) -> Vec<String> {
        recipes.iter().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn test_search_title_case_insensitive() {
        let recipes = sample();
        assert_eq!(titles(&search_recipes("PANCAKE", &recipes)), vec!["Pancakes"]);
    }

    #[test]
    fn test_search_description() {
        let recipes = sample();
        assert_eq!(titles(&search_recipes("breakfast", &recipes)), vec!["Pancakes"]);
    }

    #[test]
    fn test_search_ingredients_case_insensitive() {
        let recipes = sample();
        assert_eq!(titles(&search_recipes("basmati", &recipes)), vec!["Fried Rice"]);
        assert_eq!(titles(&search_recipes("onion", &recipes)), vec!["Tomato Soup"]);
    }

    #[test]
    fn test_search_keeps_order() {
        let recipes = sample();
        assert_eq!(
            titles(&search_recipes("o", &recipes)),
            vec!["Tomato Soup", "Pancakes", "Fried Rice"]
        );
    }

    #[test]
    fn test_search_no_match() {
        let recipes = sample();
        assert!(search_recipes("lasagne", &recipes).is_empty());
    }

    #[test]
    fn test_tag_exact_membership() {
        let recipes = sample();
        assert_eq!(
            titles(&filter_by_tag("vegan", &recipes)),
            vec!["Tomato Soup", "Fried Rice"]
        );
        assert!(filter_by_tag("Vegan", &recipes).is_empty());
        assert!(filter_by_tag("veg", &recipes).is_empty());
    }

    #[test]
    fn test_filter_all_returns_everything_in_order() {
        let recipes = sample();
        let all = filter_recipes(&Route::All, &recipes);
        let indices: Vec<usize> = all.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_filter_keeps_source_index() {
        let recipes = sample();
        let tagged = filter_recipes(&Route::tag("dinner"), &recipes);
        assert_eq!(tagged.len(), 1);
        assert_eq!(tagged[0].0, 2);
    }

    #[test]
    fn test_filter_search_route() {
        let recipes = sample();
        let found = filter_recipes(&Route::search("RICE"), &recipes);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].1.title, "Fried Rice");
    }

    #[test]
    fn test_collect_tags_dedupes_in_first_seen_order() {
        let mut recipes = sample();
        recipes.push(recipe("Dal", "", &[], &["vegan", "dinner", "vegan"]));
        assert_eq!(
            collect_tags(&recipes),
            vec!["soup", "vegan", "breakfast", "dinner"]
        );
    }
}
