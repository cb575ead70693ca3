use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;

use recipe_browser::view::{CardList, DetailView, Link};
use recipe_browser::{rescale, BrowserConfig, RecipeBrowser, Route};

#[derive(Parser)]
#[command(name = "recipe-browser")]
#[command(about = "Browse, filter and rescale recipes from a JSON recipe list")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, value_name = "FILE", help = "Config file (default: ./recipe-browser.toml)")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "PATH|URL", help = "Recipe list location, overrides config")]
    pub data: Option<String>,

    #[arg(long, help = "Print view models as JSON")]
    pub json: bool,

    #[arg(short, long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List recipe cards, optionally filtered
    List(ListArgs),

    /// List every tag
    Tags,

    /// Show a single recipe
    Show(ShowArgs),

    /// Rescale ingredient strings without loading any recipes
    Scale(ScaleArgs),
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(short, long, conflicts_with = "query", help = "Free-text search")]
    pub search: Option<String>,

    #[arg(short, long, conflicts_with = "query", help = "Exact tag")]
    pub tag: Option<String>,

    #[arg(short, long, help = "Raw query string, e.g. '?tag=vegan'")]
    pub query: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Card index or recipe title
    pub recipe: String,

    #[arg(short, long, help = "Rescale ingredients to this many servings")]
    pub servings: Option<u32>,
}

#[derive(Args)]
pub struct ScaleArgs {
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub from: u32,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub to: u32,

    #[arg(required = true)]
    pub ingredients: Vec<String>,
}

impl ListArgs {
    fn route(&self) -> Route {
        match &self.query {
            Some(query) => Route::from_query(query),
            None => {
                let params = [("search", &self.search), ("tag", &self.tag)];
                Route::from_params(
                    params
                        .into_iter()
                        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v))),
                )
            }
        }
    }
}

impl Cli {
    pub fn load_config(&self) -> Result<BrowserConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => BrowserConfig::load_from(path)?,
            None => BrowserConfig::load()?,
        };
        if let Some(data) = &self.data {
            config.data_source = data.clone();
        }
        Ok(config)
    }

    pub async fn execute(self, config: BrowserConfig) -> Result<(), Box<dyn Error>> {
        if let Commands::Scale(args) = &self.command {
            let scaled = rescale(&args.ingredients, args.from, args.to);
            if self.json {
                return print_json(&scaled);
            }
            for ingredient in scaled {
                println!("{}", ingredient);
            }
            return Ok(());
        }

        let browser = RecipeBrowser::builder()
            .config(&config)
            .load_or_empty()
            .await;

        match &self.command {
            Commands::List(args) => {
                let page = browser.page(&args.route());
                if self.json {
                    print_json(&page)?;
                } else {
                    print_cards(&page);
                }
            }
            Commands::Tags => {
                let links = browser.tag_links();
                if self.json {
                    print_json(&links)?;
                } else {
                    print_tags(&links);
                }
            }
            Commands::Show(args) => {
                let index = resolve_recipe(&browser, &args.recipe)
                    .ok_or_else(|| format!("No recipe matches '{}'", args.recipe))?;
                let detail = match args.servings {
                    Some(servings) => browser.detail_for_servings(index, servings),
                    None => browser.detail(index),
                }
                .ok_or_else(|| format!("No recipe at index {}", index))?;

                if self.json {
                    print_json(&detail)?;
                } else {
                    print_detail(&detail);
                }
            }
            Commands::Scale(_) => {}
        }

        Ok(())
    }
}

fn resolve_recipe(browser: &RecipeBrowser, recipe: &str) -> Option<usize> {
    match recipe.parse::<usize>() {
        Ok(index) if index < browser.recipes().len() => Some(index),
        _ => browser.find_by_title(recipe),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_cards(page: &CardList) {
    if let Some(banner) = &page.banner {
        println!("{}  [{}: {}]", banner.text, banner.clear.label, banner.clear.href);
        println!();
    }

    for card in &page.cards {
        println!("[{}] {}", card.index, card.title);
        if !card.description.is_empty() {
            println!("    {}", card.description);
        }
    }
}

fn print_tags(links: &[Link]) {
    for link in links {
        println!("{}\t{}", link.label, link.href);
    }
}

fn print_detail(detail: &DetailView) {
    println!("{}", detail.title);
    println!();

    if let Some(author) = &detail.author {
        println!("{}{} <{}>", author.prefix, author.link.label, author.link.href);
    }
    if let Some(description) = &detail.description {
        println!("{}", description);
    }
    if let Some(prep_time) = &detail.prep_time {
        println!("{}", prep_time);
    }
    if let Some(cook_time) = &detail.cook_time {
        println!("{}", cook_time);
    }
    println!("Serves {}", detail.servings.value);

    println!();
    println!("Ingredients");
    for ingredient in &detail.ingredients {
        println!("  - {}", ingredient);
    }

    println!();
    println!("Directions");
    for (step, direction) in detail.directions.iter().enumerate() {
        println!("  {}. {}", step + 1, direction);
    }
}
