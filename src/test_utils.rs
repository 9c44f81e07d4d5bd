//! In-memory database, fake catalogs and a ready-made `AppState` for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::repo_types::User;
use crate::clients::{
    ExerciseRecord, ExerciseSource, Product, ProductSource, Recipe, RecipeSource,
};
use crate::config::{AppConfig, ExerciseSeedConfig, JwtConfig, SourcesConfig};
use crate::db;
use crate::state::AppState;

pub fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        database_url: "sqlite::memory:".into(),
        jwt: JwtConfig {
            secret: "test".into(),
            issuer: "test-issuer".into(),
            audience: "test-aud".into(),
            ttl_minutes: 5,
            refresh_ttl_minutes: 60,
        },
        sources: SourcesConfig {
            rapidapi_key: None,
            exercisedb_base_url: "http://exercisedb.invalid".into(),
            mealdb_base_url: "http://mealdb.invalid".into(),
            openfoodfacts_base_url: "http://openfoodfacts.invalid".into(),
            http_timeout_secs: 1,
        },
        exercise_seed: ExerciseSeedConfig {
            max_total: 150,
            page_size: 2,
        },
    }
}

pub async fn test_pool() -> SqlitePool {
    db::connect_in_memory().await.expect("in-memory database")
}

pub async fn create_user(db: &SqlitePool, email: &str) -> Uuid {
    User::create(db, email, "not-a-real-hash")
        .await
        .expect("create user")
        .id
}

pub async fn create_exercise(db: &SqlitePool, name: &str) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO exercises (name, muscle_group, equipment) VALUES (?, 'Chest', 'Barbell') RETURNING id",
    )
    .bind(name)
    .fetch_one(db)
    .await
    .expect("create exercise");
    id
}

/// Serves `pages[offset / limit]`, then empty pages.
#[derive(Default)]
pub struct FakeExercises {
    pub pages: Vec<Vec<ExerciseRecord>>,
    pub fail_at_call: Option<usize>,
    pub calls: AtomicUsize,
}

impl FakeExercises {
    pub fn with_pages(pages: Vec<Vec<ExerciseRecord>>) -> Self {
        Self {
            pages,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExerciseSource for FakeExercises {
    async fn fetch_page(&self, offset: u32, limit: u32) -> anyhow::Result<Vec<ExerciseRecord>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_at_call == Some(call) {
            anyhow::bail!("exercise source unavailable");
        }
        let index = (offset / limit.max(1)) as usize;
        Ok(self.pages.get(index).cloned().unwrap_or_default())
    }
}

pub fn exercise(id: &str, name: &str, target: &str, equipment: &str) -> ExerciseRecord {
    ExerciseRecord {
        id: Some(id.into()),
        name: name.into(),
        body_part: None,
        target: Some(target.into()),
        equipment: Some(equipment.into()),
    }
}

/// `random()` cycles through `recipes`.
#[derive(Default)]
pub struct FakeRecipes {
    pub recipes: Vec<Recipe>,
    pub fail: bool,
    cursor: AtomicUsize,
}

impl FakeRecipes {
    pub fn with(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("recipe source unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl RecipeSource for FakeRecipes {
    async fn search_by_name(&self, name: &str) -> anyhow::Result<Vec<Recipe>> {
        self.check()?;
        let needle = name.to_lowercase();
        Ok(self
            .recipes
            .iter()
            .filter(|r| {
                r.name
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    async fn search_by_first_letter(&self, letter: char) -> anyhow::Result<Vec<Recipe>> {
        self.check()?;
        let letter = letter.to_ascii_lowercase();
        Ok(self
            .recipes
            .iter()
            .filter(|r| {
                r.name
                    .as_deref()
                    .and_then(|n| n.chars().next())
                    .is_some_and(|c| c.to_ascii_lowercase() == letter)
            })
            .cloned()
            .collect())
    }

    async fn lookup_by_id(&self, id: &str) -> anyhow::Result<Option<Recipe>> {
        self.check()?;
        Ok(self.recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn random(&self) -> anyhow::Result<Option<Recipe>> {
        self.check()?;
        if self.recipes.is_empty() {
            return Ok(None);
        }
        let i = self.cursor.fetch_add(1, Ordering::SeqCst) % self.recipes.len();
        Ok(Some(self.recipes[i].clone()))
    }
}

pub fn recipe(id: &str, name: &str) -> Recipe {
    Recipe {
        id: id.into(),
        name: Some(name.into()),
        category: None,
        area: None,
        instructions: None,
        thumbnail: None,
        extra: Default::default(),
    }
}

#[derive(Default)]
pub struct FakeProducts {
    pub products: Vec<Product>,
    pub fail: bool,
}

#[async_trait]
impl ProductSource for FakeProducts {
    async fn lookup(&self, barcode: &str) -> anyhow::Result<Option<Product>> {
        if self.fail {
            anyhow::bail!("product source unavailable");
        }
        Ok(self.products.iter().find(|p| p.barcode == barcode).cloned())
    }
}

pub struct TestStateBuilder {
    exercises: Arc<dyn ExerciseSource>,
    recipes: Arc<dyn RecipeSource>,
    products: Arc<dyn ProductSource>,
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self {
            exercises: Arc::new(FakeExercises::default()),
            recipes: Arc::new(FakeRecipes::default()),
            products: Arc::new(FakeProducts::default()),
        }
    }
}

impl TestStateBuilder {
    pub fn exercises(mut self, source: Arc<dyn ExerciseSource>) -> Self {
        self.exercises = source;
        self
    }

    pub fn recipes(mut self, source: Arc<dyn RecipeSource>) -> Self {
        self.recipes = source;
        self
    }

    pub fn products(mut self, source: Arc<dyn ProductSource>) -> Self {
        self.products = source;
        self
    }

    pub async fn build(self) -> AppState {
        AppState::from_parts(
            test_pool().await,
            Arc::new(test_config()),
            self.exercises,
            self.recipes,
            self.products,
        )
    }
}

pub async fn test_state() -> AppState {
    TestStateBuilder::default().build().await
}
