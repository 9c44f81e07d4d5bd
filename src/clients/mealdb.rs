use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

use super::{host_of, Recipe, RecipeSource};

/// TheMealDB over RapidAPI.
#[derive(Clone)]
pub struct MealDbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MealsEnvelope {
    #[serde(default)]
    meals: Option<Vec<Recipe>>,
}

impl MealDbClient {
    pub fn new(http: reqwest::Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    async fn get_meals(&self, path: &str, query: &[(&str, &str)]) -> anyhow::Result<Vec<Recipe>> {
        let key = self
            .api_key
            .as_deref()
            .context("RAPIDAPI_KEY is not set")?;

        let envelope: MealsEnvelope = self
            .http
            .get(format!("{}/{}", self.base_url, path))
            .header("x-rapidapi-key", key)
            .header("x-rapidapi-host", host_of(&self.base_url))
            .query(query)
            .send()
            .await
            .with_context(|| format!("mealdb {} request", path))?
            .error_for_status()
            .with_context(|| format!("mealdb {} status", path))?
            .json()
            .await
            .with_context(|| format!("mealdb {} body", path))?;

        Ok(envelope.meals.unwrap_or_default())
    }
}

#[async_trait]
impl RecipeSource for MealDbClient {
    async fn search_by_name(&self, name: &str) -> anyhow::Result<Vec<Recipe>> {
        self.get_meals("search.php", &[("s", name)]).await
    }

    async fn search_by_first_letter(&self, letter: char) -> anyhow::Result<Vec<Recipe>> {
        let letter = letter.to_ascii_lowercase().to_string();
        self.get_meals("search.php", &[("f", letter.as_str())]).await
    }

    async fn lookup_by_id(&self, id: &str) -> anyhow::Result<Option<Recipe>> {
        let meals = self.get_meals("lookup.php", &[("i", id)]).await?;
        Ok(meals.into_iter().next())
    }

    async fn random(&self) -> anyhow::Result<Option<Recipe>> {
        let meals = self.get_meals("random.php", &[]).await?;
        Ok(meals.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_meals_decode_as_empty() {
        let envelope: MealsEnvelope = serde_json::from_str(r#"{"meals":null}"#).unwrap();
        assert!(envelope.meals.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let client = MealDbClient::new(reqwest::Client::new(), "https://themealdb.p.rapidapi.com", None);
        assert!(client.random().await.is_err());
        assert!(client.search_by_first_letter('A').await.is_err());
    }
}
