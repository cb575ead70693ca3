use serde::Serialize;
use url::form_urlencoded;

pub const SEARCH_PARAM: &str = "search";
pub const TAG_PARAM: &str = "tag";

/// Where the "clear" action on a filtered page navigates to
pub const CLEAR_HREF: &str = "/";

/// Which recipes a results page shows, driven by the `search` and `tag`
/// query-string parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Route {
    /// No parameter: every recipe, in source order
    #[default]
    All,
    /// Free-text search; the term is stored lower-cased
    Search(String),
    /// Exact tag membership
    Tag(String),
}

impl Route {
    pub fn search(term: impl AsRef<str>) -> Self {
        Route::Search(term.as_ref().to_lowercase())
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        Route::Tag(tag.into())
    }

    /// Parse a query string such as `?search=rice`, `tag=vegan` or a full URL
    /// ending in one. When both parameters are present the search wins; when a
    /// parameter is repeated its first value is used.
    pub fn from_query(query: &str) -> Self {
        let query = match query.split_once('?') {
            Some((_, q)) => q,
            None => query,
        };
        let query = query.split('#').next().unwrap_or_default();

        Self::from_params(form_urlencoded::parse(query.as_bytes()))
    }

    /// Build a route from already-decoded key/value pairs.
    pub fn from_params<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut search = None;
        let mut tag = None;

        for (key, value) in params {
            match key.as_ref() {
                SEARCH_PARAM if search.is_none() => search = Some(value.as_ref().to_string()),
                TAG_PARAM if tag.is_none() => tag = Some(value.as_ref().to_string()),
                _ => {}
            }
        }

        match (search, tag) {
            (Some(term), _) => Route::search(term),
            (None, Some(tag)) => Route::Tag(tag),
            (None, None) => Route::All,
        }
    }

    /// Text describing the active filter, if any; a page shows its banner and
    /// clear action only when this is `Some`
    pub fn describe(&self) -> Option<String> {
        match self {
            Route::All => None,
            Route::Search(term) => Some(format!("You searched for: {}", term)),
            Route::Tag(tag) => Some(format!("You filtered by tag: {}", tag)),
        }
    }

    /// Render the route back into a query string (`""` for [`Route::All`])
    pub fn to_query(&self) -> String {
        match self {
            Route::All => String::new(),
            Route::Search(term) => encode_param(SEARCH_PARAM, term),
            Route::Tag(tag) => encode_param(TAG_PARAM, tag),
        }
    }
}

/// Link target that filters the results by `tag`
pub fn tag_href(tag: &str) -> String {
    encode_param(TAG_PARAM, tag)
}

fn encode_param(key: &str, value: &str) -> String {
    let encoded = form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish();
    format!("?{}", encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_all() {
        assert_eq!(Route::from_query(""), Route::All);
        assert_eq!(Route::from_query("?"), Route::All);
        assert_eq!(Route::from_query("?page=2"), Route::All);
    }

    #[test]
    fn test_search_is_lowercased_and_decoded() {
        assert_eq!(
            Route::from_query("?search=Fried%20Rice"),
            Route::Search("fried rice".to_string())
        );
        assert_eq!(
            Route::from_query("search=Chili+Con+Carne"),
            Route::Search("chili con carne".to_string())
        );
    }

    #[test]
    fn test_tag_keeps_case() {
        assert_eq!(Route::from_query("?tag=Main%20Course"), Route::Tag("Main Course".to_string()));
    }

    #[test]
    fn test_search_wins_over_tag() {
        assert_eq!(
            Route::from_query("?tag=vegan&search=soup"),
            Route::Search("soup".to_string())
        );
    }

    #[test]
    fn test_first_value_wins() {
        assert_eq!(Route::from_query("?tag=a&tag=b"), Route::Tag("a".to_string()));
    }

    #[test]
    fn test_full_url() {
        assert_eq!(
            Route::from_query("https://example.com/recipes/?tag=dessert#top"),
            Route::Tag("dessert".to_string())
        );
    }

    #[test]
    fn test_empty_search_term_is_still_a_search() {
        assert_eq!(Route::from_query("?search="), Route::Search(String::new()));
    }

    #[test]
    fn test_describe() {
        assert_eq!(Route::All.describe(), None);
        assert_eq!(
            Route::search("Soup").describe().unwrap(),
            "You searched for: soup"
        );
        assert_eq!(
            Route::tag("Vegan").describe().unwrap(),
            "You filtered by tag: Vegan"
        );
    }

    #[test]
    fn test_tag_href_encodes() {
        assert_eq!(tag_href("vegan"), "?tag=vegan");
        assert_eq!(tag_href("main course"), "?tag=main+course");
        assert_eq!(tag_href("a&b"), "?tag=a%26b");
    }

    #[test]
    fn test_to_query_round_trips_through_from_query() {
        let route = Route::tag("sweet & sour");
        assert_eq!(Route::from_query(&route.to_query()), route);
        assert_eq!(Route::All.to_query(), "");
    }
}
