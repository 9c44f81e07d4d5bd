//! Energy needs from a user's profile.
//!
//! BMR follows Mifflin-St Jeor, TDEE scales it by the activity multiplier and
//! the goal adjustment is added on top. The recommended intake never drops
//! below [`MIN_TARGET_KCAL`].

use std::str::FromStr;

use serde::Serialize;
use sqlx::SqlitePool;
use time::Date;
use tracing::info;
use uuid::Uuid;

use super::repo;
use super::repo_types::{ActivityLevel, Goal, UserProfile};
use crate::error::{AppError, AppResult};
use crate::nutrition::{
    repo as nutrition_repo,
    repo_types::DailyTarget,
    services::{MAX_DAILY_KCAL, MIN_DAILY_KCAL},
};
use crate::weight::repo as weight_repo;

pub const MIN_TARGET_KCAL: f64 = 1200.0;

pub const WEIGHT_RANGE_KG: (f64, f64) = (30.0, 250.0);
pub const HEIGHT_RANGE_CM: (f64, f64) = (120.0, 230.0);
pub const AGE_RANGE_YEARS: (i32, i32) = (10, 100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl FromStr for Sex {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            _ => Err(AppError::validation("sex", "Choose a valid sex (male or female)")),
        }
    }
}

pub fn mifflin_st_jeor(sex: Sex, weight_kg: f64, height_cm: f64, age_years: i32) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years);
    match sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyEstimate {
    pub bmr: f64,
    pub tdee: f64,
    pub target: f64,
}

/// Pure derivation. Inputs are assumed to be validated.
pub fn derive_target(
    sex: Sex,
    weight_kg: f64,
    height_cm: f64,
    age_years: i32,
    activity_multiplier: f64,
    goal_adjustment: f64,
) -> EnergyEstimate {
    let bmr = mifflin_st_jeor(sex, weight_kg, height_cm, age_years);
    let tdee = bmr * activity_multiplier;
    EnergyEstimate {
        bmr,
        tdee,
        target: (tdee + goal_adjustment).max(MIN_TARGET_KCAL),
    }
}

/// Raw calculator submission; every field may be missing.
#[derive(Debug, Clone, Default)]
pub struct ProfileInput {
    pub sex: Option<String>,
    pub birth_year: Option<i32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity_level_id: Option<i64>,
    pub goal_id: Option<i64>,
}

fn in_range(value: Option<f64>, (min, max): (f64, f64)) -> Option<f64> {
    value.filter(|v| (min..=max).contains(v))
}

#[derive(Debug, Clone, Serialize)]
pub struct Calculation {
    pub profile: UserProfile,
    pub weight_kg: f64,
    pub estimate: EnergyEstimate,
}

/// Validate a submission, store it as the user's profile and derive the
/// energy estimate. Any invalid field aborts before the profile is written.
/// The estimate is not adopted as the daily target.
pub async fn calculate(
    db: &SqlitePool,
    user_id: Uuid,
    input: ProfileInput,
    today: Date,
) -> AppResult<Calculation> {
    let sex: Sex = input.sex.as_deref().unwrap_or_default().parse()?;

    let birth_year = input.birth_year.unwrap_or(0);
    let age = today
        .year()
        .checked_sub(birth_year)
        .filter(|age| (AGE_RANGE_YEARS.0..=AGE_RANGE_YEARS.1).contains(age))
        .ok_or_else(|| AppError::validation("birth_year", "Birth year does not look right"))?;
    let height_cm = in_range(input.height_cm, HEIGHT_RANGE_CM)
        .ok_or_else(|| AppError::validation("height_cm", "Height does not look right"))?;
    let weight_kg = in_range(input.weight_kg, WEIGHT_RANGE_KG)
        .ok_or_else(|| AppError::validation("weight_kg", "Weight does not look right"))?;

    let activity = match input.activity_level_id {
        Some(id) => repo::find_activity_level(db, id).await?,
        None => None,
    }
    .ok_or_else(|| AppError::validation("activity_level_id", "Choose a valid activity level"))?;
    let goal = match input.goal_id {
        Some(id) => repo::find_goal(db, id).await?,
        None => None,
    }
    .ok_or_else(|| AppError::validation("goal_id", "Choose a valid goal"))?;

    let estimate = derive_target(
        sex,
        weight_kg,
        height_cm,
        age,
        activity.multiplier,
        goal.kcal_adjustment,
    );

    let profile = UserProfile {
        sex: sex.as_str().to_string(),
        birth_year,
        height_cm,
        activity_level_id: activity.id,
        goal_id: goal.id,
    };
    repo::upsert_profile(db, user_id, &profile).await?;

    info!(%user_id, target = estimate.target, "energy target derived");
    Ok(Calculation {
        profile,
        weight_kg,
        estimate,
    })
}

/// Store a calculated kcal value as the user's daily target.
pub async fn adopt_target(
    db: &SqlitePool,
    user_id: Uuid,
    kcal: Option<f64>,
) -> AppResult<DailyTarget> {
    let kcal = kcal
        .filter(|k| (MIN_DAILY_KCAL..=MAX_DAILY_KCAL).contains(k))
        .ok_or_else(|| {
            AppError::validation(
                "kcal_target",
                "Could not save kcal target (must be between 500 and 10000)",
            )
        })?;
    let target = nutrition_repo::upsert_kcal_target(db, user_id, kcal).await?;
    info!(%user_id, kcal, "calculated target adopted");
    Ok(target)
}

#[derive(Debug, Clone, Serialize)]
pub struct CalculatorView {
    pub activity_levels: Vec<ActivityLevel>,
    pub goals: Vec<Goal>,
    pub profile: Option<UserProfile>,
    /// Latest logged weight, offered as the default input.
    pub weight_kg: Option<f64>,
}

pub async fn calculator_view(db: &SqlitePool, user_id: Uuid) -> AppResult<CalculatorView> {
    Ok(CalculatorView {
        activity_levels: repo::list_activity_levels(db).await?,
        goals: repo::list_goals(db).await?,
        profile: repo::get_profile(db, user_id).await?,
        weight_kg: weight_repo::latest(db, user_id).await?.map(|w| w.weight),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_user, test_pool};
    use time::macros::date;

    const TODAY: Date = date!(2024 - 06 - 01);

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn valid_input() -> ProfileInput {
        ProfileInput {
            sex: Some("male".into()),
            birth_year: Some(1994),
            height_cm: Some(180.0),
            weight_kg: Some(80.0),
            activity_level_id: Some(3),
            goal_id: Some(2),
        }
    }

    #[test]
    fn bmr_formula() {
        // 800 + 1125 - 150
        assert!(close(mifflin_st_jeor(Sex::Male, 80.0, 180.0, 30), 1780.0));
        assert!(close(mifflin_st_jeor(Sex::Female, 80.0, 180.0, 30), 1614.0));
    }

    #[test]
    fn male_and_female_differ_by_166() {
        for (w, h, a) in [(30.0, 120.0, 10), (62.5, 171.3, 45), (250.0, 230.0, 100)] {
            let diff = mifflin_st_jeor(Sex::Male, w, h, a) - mifflin_st_jeor(Sex::Female, w, h, a);
            assert!(close(diff, 166.0), "{diff}");
        }
    }

    #[test]
    fn target_never_drops_below_floor() {
        let est = derive_target(Sex::Female, 50.0, 160.0, 30, 1.2, -5000.0);
        assert_eq!(est.target, 1200.0);

        let est = derive_target(Sex::Male, 80.0, 180.0, 30, 1.55, 0.0);
        assert!(close(est.tdee, 1780.0 * 1.55));
        assert!(close(est.target, est.tdee));
    }

    #[test]
    fn parses_sex() {
        assert_eq!("female".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!(" male ".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("other".parse::<Sex>().unwrap_err().field(), Some("sex"));
    }

    #[tokio::test]
    async fn calculate_saves_profile_but_not_target() {
        let db = test_pool().await;
        let user = create_user(&db, "a@example.com").await;

        let calc = calculate(&db, user, valid_input(), TODAY).await.unwrap();
        assert!(close(calc.estimate.bmr, 1780.0));
        assert!(close(calc.estimate.target, 1780.0 * 1.55));

        let stored = repo::get_profile(&db, user).await.unwrap().unwrap();
        assert_eq!(stored, calc.profile);
        assert!(nutrition_repo::get_target(&db, user).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn invalid_fields_write_no_profile() {
        let db = test_pool().await;
        let user = create_user(&db, "a@example.com").await;

        let cases: [(&str, fn(&mut ProfileInput)); 11] = [
            ("sex", |i| i.sex = Some("x".into())),
            ("sex", |i| i.sex = None),
            ("birth_year", |i| i.birth_year = Some(2020)),
            ("birth_year", |i| i.birth_year = None),
            ("birth_year", |i| i.birth_year = Some(i32::MIN)),
            ("birth_year", |i| i.birth_year = Some(i32::MAX)),
            ("height_cm", |i| i.height_cm = Some(119.9)),
            ("weight_kg", |i| i.weight_kg = Some(250.1)),
            ("weight_kg", |i| i.weight_kg = None),
            ("activity_level_id", |i| i.activity_level_id = Some(42)),
            ("goal_id", |i| i.goal_id = Some(0)),
        ];
        for (field, mutate) in cases {
            let mut input = valid_input();
            mutate(&mut input);
            let err = calculate(&db, user, input, TODAY).await.unwrap_err();
            assert_eq!(err.field(), Some(field));
        }

        assert!(repo::get_profile(&db, user).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn range_bounds_are_inclusive() {
        let db = test_pool().await;
        let user = create_user(&db, "a@example.com").await;

        let input = ProfileInput {
            birth_year: Some(1924),
            height_cm: Some(230.0),
            weight_kg: Some(30.0),
            ..valid_input()
        };
        calculate(&db, user, input, TODAY).await.unwrap();

        let input = ProfileInput {
            birth_year: Some(2014),
            height_cm: Some(120.0),
            weight_kg: Some(250.0),
            ..valid_input()
        };
        calculate(&db, user, input, TODAY).await.unwrap();
    }

    #[tokio::test]
    async fn adopting_keeps_macro_targets() {
        let db = test_pool().await;
        let user = create_user(&db, "a@example.com").await;
        nutrition_repo::upsert_target(
            &db,
            user,
            &DailyTarget {
                kcal_target: 2000.0,
                protein_target: Some(140.0),
                carbs_target: None,
                fat_target: None,
            },
        )
        .await
        .unwrap();

        let target = adopt_target(&db, user, Some(2759.0)).await.unwrap();
        assert_eq!(target.kcal_target, 2759.0);
        assert_eq!(target.protein_target, Some(140.0));

        for kcal in [None, Some(0.0), Some(20_000.0)] {
            let err = adopt_target(&db, user, kcal).await.unwrap_err();
            assert_eq!(err.field(), Some("kcal_target"));
        }
    }

    #[tokio::test]
    async fn view_offers_latest_weight() {
        let db = test_pool().await;
        let user = create_user(&db, "a@example.com").await;

        let view = calculator_view(&db, user).await.unwrap();
        assert_eq!(view.activity_levels.len(), 5);
        assert_eq!(view.goals.len(), 3);
        assert!(view.profile.is_none());
        assert!(view.weight_kg.is_none());

        weight_repo::insert(&db, user, date!(2024 - 05 - 30), 77.7)
            .await
            .unwrap();
        let view = calculator_view(&db, user).await.unwrap();
        assert_eq!(view.weight_kg, Some(77.7));
    }
}
