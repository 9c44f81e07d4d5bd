use fittrack::{app, db, exercises, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "fittrack=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = AppState::init().await?;
    db::migrate(&app_state.db).await?;

    // The catalog is optional; the app runs without it.
    match exercises::import_catalog(
        &app_state.db,
        app_state.exercises.as_ref(),
        app_state.config.exercise_seed,
    )
    .await
    {
        Ok(report) if report.skipped => tracing::debug!("exercise catalog already present"),
        Ok(report) => tracing::info!(inserted = report.inserted, "exercise catalog seeded"),
        Err(e) => tracing::warn!(error = %e, "exercise catalog seed failed; continuing"),
    }

    let addr = app_state.config.listen_addr()?;
    app::serve(app::build_app(app_state), addr).await
}
