use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

use crate::clients::{
    build_http_client, ExerciseDbClient, ExerciseSource, MealDbClient, OpenFoodFactsClient,
    ProductSource, RecipeSource,
};
use crate::config::AppConfig;
use crate::db;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub exercises: Arc<dyn ExerciseSource>,
    pub recipes: Arc<dyn RecipeSource>,
    pub products: Arc<dyn ProductSource>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = db::connect(&config.database_url).await?;

        let sources = &config.sources;
        let http = build_http_client(Duration::from_secs(sources.http_timeout_secs))?;
        if sources.rapidapi_key.is_none() {
            tracing::warn!("RAPIDAPI_KEY not set; exercise import and recipes are unavailable");
        }

        let exercises = Arc::new(ExerciseDbClient::new(
            http.clone(),
            &sources.exercisedb_base_url,
            sources.rapidapi_key.clone(),
        )) as Arc<dyn ExerciseSource>;
        let recipes = Arc::new(MealDbClient::new(
            http.clone(),
            &sources.mealdb_base_url,
            sources.rapidapi_key.clone(),
        )) as Arc<dyn RecipeSource>;
        let products = Arc::new(OpenFoodFactsClient::new(
            http,
            &sources.openfoodfacts_base_url,
        )) as Arc<dyn ProductSource>;

        Ok(Self::from_parts(db, config, exercises, recipes, products))
    }

    pub fn from_parts(
        db: SqlitePool,
        config: Arc<AppConfig>,
        exercises: Arc<dyn ExerciseSource>,
        recipes: Arc<dyn RecipeSource>,
        products: Arc<dyn ProductSource>,
    ) -> Self {
        Self {
            db,
            config,
            exercises,
            recipes,
            products,
        }
    }
}
