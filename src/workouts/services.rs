use sqlx::SqlitePool;
use time::Date;
use tracing::{info, warn};
use uuid::Uuid;

use super::repo;
use super::repo_types::{Workout, WorkoutDetail};
use crate::error::{is_unique_violation, AppError, AppResult};
use crate::exercises::repo as exercise_repo;

pub const RECENT_LIMIT: i64 = 20;

pub async fn create_workout(
    db: &SqlitePool,
    user_id: Uuid,
    workout_date: Option<Date>,
    workout_type: &str,
    notes: Option<&str>,
) -> AppResult<Workout> {
    let workout_date =
        workout_date.ok_or_else(|| AppError::validation("workout_date", "Enter a date"))?;
    let workout_type = workout_type.trim();
    if workout_type.is_empty() {
        return Err(AppError::validation("workout_type", "Enter a workout type"));
    }
    let notes = notes.map(str::trim).unwrap_or_default();

    let workout = repo::insert(db, user_id, workout_date, workout_type, notes).await?;
    info!(%user_id, workout_id = workout.id, "workout created");
    Ok(workout)
}

pub async fn workout_detail(
    db: &SqlitePool,
    user_id: Uuid,
    workout_id: i64,
) -> AppResult<WorkoutDetail> {
    let workout = repo::find_owned(db, user_id, workout_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout not found".into()))?;
    let items = repo::items(db, workout.id).await?;
    Ok(WorkoutDetail { workout, items })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AddExerciseInput {
    pub exercise_id: Option<i64>,
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
}

/// Add a catalog exercise to one of the user's workouts.
///
/// An exercise can appear in a workout only once; a second add is a conflict
/// and leaves the existing entry as it was.
pub async fn add_exercise(
    db: &SqlitePool,
    user_id: Uuid,
    workout_id: i64,
    input: AddExerciseInput,
) -> AppResult<WorkoutDetail> {
    let sets = input
        .sets
        .filter(|s| *s >= 1)
        .ok_or_else(|| AppError::validation("sets", "Sets must be a whole number of at least 1"))?;
    let reps = input
        .reps
        .filter(|r| *r >= 1)
        .ok_or_else(|| AppError::validation("reps", "Reps must be a whole number of at least 1"))?;
    if input.weight.is_some_and(|w| w < 0.0) {
        return Err(AppError::validation("weight", "Weight cannot be negative"));
    }

    let workout = repo::find_owned(db, user_id, workout_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout not found".into()))?;

    let exercise = match input.exercise_id {
        Some(id) => exercise_repo::find(db, id).await?,
        None => None,
    }
    .ok_or_else(|| AppError::validation("exercise_id", "Choose an exercise from the list"))?;

    repo::insert_item(db, workout.id, exercise.id, sets, reps, input.weight)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                warn!(workout_id, exercise_id = exercise.id, "exercise already in workout");
                AppError::Conflict(
                    "This exercise is already part of the workout; edit the existing entry or choose another"
                        .into(),
                )
            } else {
                AppError::Database(e)
            }
        })?;

    info!(%user_id, workout_id, exercise_id = exercise.id, "exercise added to workout");
    let items = repo::items(db, workout.id).await?;
    Ok(WorkoutDetail { workout, items })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_exercise, create_user, test_pool};
    use time::macros::date;

    fn add(exercise_id: i64, sets: i64, reps: i64) -> AddExerciseInput {
        AddExerciseInput {
            exercise_id: Some(exercise_id),
            sets: Some(sets),
            reps: Some(reps),
            weight: None,
        }
    }

    #[tokio::test]
    async fn create_validates_and_trims() {
        let db = test_pool().await;
        let user = create_user(&db, "a@example.com").await;

        let w = create_workout(&db, user, Some(date!(2024 - 03 - 01)), " Push day ", None)
            .await
            .unwrap();
        assert_eq!(w.workout_type, "Push day");
        assert_eq!(w.notes, "");

        let err = create_workout(&db, user, None, "Legs", None).await.unwrap_err();
        assert_eq!(err.field(), Some("workout_date"));
        let err = create_workout(&db, user, Some(date!(2024 - 03 - 01)), "  ", None)
            .await
            .unwrap_err();
        assert_eq!(err.field(), Some("workout_type"));
    }

    #[tokio::test]
    async fn recent_lists_newest_twenty() {
        let db = test_pool().await;
        let user = create_user(&db, "a@example.com").await;
        let start = date!(2024 - 01 - 01);
        for day in 0..25 {
            create_workout(&db, user, Some(start + time::Duration::days(day)), "Run", None)
                .await
                .unwrap();
        }

        let list = repo::recent(&db, user, RECENT_LIMIT).await.unwrap();
        assert_eq!(list.len(), 20);
        assert_eq!(list[0].workout_date, date!(2024 - 01 - 25));
        assert_eq!(
            repo::count_since(&db, user, date!(2024 - 01 - 22)).await.unwrap(),
            4
        );
    }

    #[tokio::test]
    async fn adding_same_exercise_twice_conflicts() {
        let db = test_pool().await;
        let user = create_user(&db, "a@example.com").await;
        let bench = create_exercise(&db, "Bench Press").await;
        let squat = create_exercise(&db, "Squat").await;
        let w = create_workout(&db, user, Some(date!(2024 - 03 - 01)), "Gym", None)
            .await
            .unwrap();

        add_exercise(&db, user, w.id, add(squat, 5, 5)).await.unwrap();
        let detail = add_exercise(
            &db,
            user,
            w.id,
            AddExerciseInput {
                weight: Some(60.0),
                ..add(bench, 3, 8)
            },
        )
        .await
        .unwrap();
        let names: Vec<&str> = detail.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Squat", "Bench Press"]);

        let err = add_exercise(&db, user, w.id, add(bench, 4, 10)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let detail = workout_detail(&db, user, w.id).await.unwrap();
        assert_eq!(detail.items.len(), 2);
        assert_eq!(detail.items[1].sets, 3);
        assert_eq!(detail.items[1].weight, Some(60.0));
    }

    #[tokio::test]
    async fn add_exercise_validation() {
        let db = test_pool().await;
        let user = create_user(&db, "a@example.com").await;
        let bench = create_exercise(&db, "Bench Press").await;
        let w = create_workout(&db, user, Some(date!(2024 - 03 - 01)), "Gym", None)
            .await
            .unwrap();

        let err = add_exercise(&db, user, w.id, add(bench, 0, 8)).await.unwrap_err();
        assert_eq!(err.field(), Some("sets"));
        let err = add_exercise(&db, user, w.id, add(bench, 3, 0)).await.unwrap_err();
        assert_eq!(err.field(), Some("reps"));
        let err = add_exercise(&db, user, w.id, add(9999, 3, 8)).await.unwrap_err();
        assert_eq!(err.field(), Some("exercise_id"));

        assert!(workout_detail(&db, user, w.id).await.unwrap().items.is_empty());
    }

    #[tokio::test]
    async fn other_users_workouts_are_invisible() {
        let db = test_pool().await;
        let alice = create_user(&db, "alice@example.com").await;
        let bob = create_user(&db, "bob@example.com").await;
        let bench = create_exercise(&db, "Bench Press").await;
        let w = create_workout(&db, alice, Some(date!(2024 - 03 - 01)), "Gym", None)
            .await
            .unwrap();

        assert!(matches!(
            workout_detail(&db, bob, w.id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            add_exercise(&db, bob, w.id, add(bench, 3, 8)).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(repo::recent(&db, bob, RECENT_LIMIT).await.unwrap().is_empty());
    }
}
