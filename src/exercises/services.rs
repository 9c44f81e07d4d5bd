//! One-off population of the exercise catalog from the external source.

use std::collections::HashSet;

use anyhow::Context;
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::repo;
use super::repo_types::NewExercise;
use crate::clients::{ExerciseRecord, ExerciseSource};
use crate::config::ExerciseSeedConfig;

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub skipped: bool,
    pub fetched: usize,
    pub inserted: usize,
}

/// Capitalise the first letter of every alphabetic run, lowercase the rest.
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_alpha = false;
    for c in raw.trim().chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Catalog row for a record, or `None` when it has no usable name.
pub fn normalize(record: &ExerciseRecord) -> Option<NewExercise> {
    let name = non_blank(Some(&record.name))?;
    let muscle_group = non_blank(record.target.as_deref())
        .or_else(|| non_blank(record.body_part.as_deref()))
        .map(title_case)
        .unwrap_or_else(|| UNKNOWN.to_string());
    let equipment = non_blank(record.equipment.as_deref())
        .map(title_case)
        .unwrap_or_else(|| UNKNOWN.to_string());
    Some(NewExercise {
        name: title_case(name),
        muscle_group,
        equipment,
    })
}

fn page_key(record: &ExerciseRecord) -> String {
    non_blank(record.id.as_deref())
        .map(|id| format!("id:{id}"))
        .unwrap_or_else(|| format!("name:{}", record.name.trim()))
}

/// Fetch pages until an empty page, a page seen before or `max_total` records.
async fn fetch_all(
    source: &dyn ExerciseSource,
    config: ExerciseSeedConfig,
) -> anyhow::Result<Vec<ExerciseRecord>> {
    let page_size = config.page_size.max(1);
    let mut records = Vec::new();
    let mut seen = HashSet::new();
    let mut offset = 0u32;

    while records.len() < config.max_total {
        let page = source
            .fetch_page(offset, page_size)
            .await
            .with_context(|| format!("fetch exercises at offset {offset}"))?;
        let Some(first) = page.first() else {
            break;
        };
        if !seen.insert(page_key(first)) {
            debug!(offset, "exercise source repeated a page");
            break;
        }

        let room = config.max_total - records.len();
        records.extend(page.into_iter().take(room));
        offset = offset.saturating_add(page_size);
    }
    Ok(records)
}

/// Fill an empty exercise catalog. A populated catalog is left as it is.
///
/// Every page is fetched before anything is written, so a failed fetch leaves
/// the catalog untouched. Rows are inserted in one transaction and names that
/// already exist are ignored.
pub async fn import_catalog(
    db: &SqlitePool,
    source: &dyn ExerciseSource,
    config: ExerciseSeedConfig,
) -> anyhow::Result<ImportReport> {
    if repo::count(db).await? > 0 {
        debug!("exercise catalog already populated");
        return Ok(ImportReport {
            skipped: true,
            ..Default::default()
        });
    }

    let records = fetch_all(source, config).await?;

    let mut tx = db.begin().await?;
    let mut inserted = 0;
    for exercise in records.iter().filter_map(normalize) {
        if repo::insert_or_ignore_tx(&mut tx, &exercise).await? {
            inserted += 1;
        }
    }
    tx.commit().await.context("commit exercise import")?;

    info!(fetched = records.len(), inserted, "exercise catalog imported");
    Ok(ImportReport {
        skipped: false,
        fetched: records.len(),
        inserted,
    })
}
