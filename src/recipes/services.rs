use std::collections::HashSet;

use serde::Serialize;
use tracing::warn;

use crate::clients::{Recipe, RecipeSource};
use crate::error::{AppError, AppResult};

pub const DEFAULT_LETTER: char = 'a';
pub const RECIPES_OF_THE_DAY: usize = 3;
const RANDOM_ATTEMPTS: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct RecipeList {
    pub title: String,
    pub q: String,
    pub f: String,
    pub meals: Vec<Recipe>,
    /// Set when the recipe source could not be reached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Search by name, or list by first letter when no name is given.
pub async fn search(source: &dyn RecipeSource, q: &str, f: &str) -> RecipeList {
    let q = q.trim();
    let letter = f
        .trim()
        .chars()
        .next()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .unwrap_or(DEFAULT_LETTER);

    let (title, f, result) = if q.is_empty() {
        (
            format!("Recipes (letter: {letter})"),
            letter.to_string(),
            source.search_by_first_letter(letter).await,
        )
    } else {
        (
            format!("Recipes for: {q}"),
            String::new(),
            source.search_by_name(q).await,
        )
    };

    let (meals, error) = match result {
        Ok(meals) => (meals, None),
        Err(e) => {
            warn!(error = %e, "recipe search failed");
            (
                Vec::new(),
                Some("Could not fetch recipes. Please try again later.".to_string()),
            )
        }
    };
    RecipeList {
        title,
        q: q.to_string(),
        f,
        meals,
        error,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Ingredient {
    pub name: String,
    pub measure: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub ingredients: Vec<Ingredient>,
}

pub async fn detail(source: &dyn RecipeSource, id: &str) -> AppResult<RecipeDetail> {
    let not_found = || AppError::NotFound("Recipe not found".into());
    let recipe = match source.lookup_by_id(id.trim()).await {
        Ok(Some(recipe)) => recipe,
        Ok(None) => return Err(not_found()),
        Err(e) => {
            warn!(error = %e, id, "recipe lookup failed");
            return Err(not_found());
        }
    };
    let ingredients = recipe
        .ingredients()
        .into_iter()
        .map(|(name, measure)| Ingredient { name, measure })
        .collect();
    Ok(RecipeDetail {
        recipe,
        ingredients,
    })
}

/// Up to three distinct random recipes. Any source failure yields none.
pub async fn recipes_of_the_day(source: &dyn RecipeSource) -> Vec<Recipe> {
    let mut picked = Vec::with_capacity(RECIPES_OF_THE_DAY);
    let mut seen = HashSet::new();

    for _ in 0..RANDOM_ATTEMPTS {
        if picked.len() >= RECIPES_OF_THE_DAY {
            break;
        }
        match source.random().await {
            Ok(Some(recipe)) => {
                if !recipe.id.is_empty() && seen.insert(recipe.id.clone()) {
                    picked.push(recipe);
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "random recipe failed");
                return Vec::new();
            }
        }
    }
    picked
}
