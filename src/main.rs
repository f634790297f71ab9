use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fitlog::config::Config;
use fitlog::handlers::{dashboard, exercises, stats, workouts};
use fitlog::repositories::{ExerciseRepository, WorkoutRepository};
use fitlog::version::GIT_VERSION;
use fitlog::{db, migrations, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fitlog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("fitlog {} starting", GIT_VERSION);
    tracing::info!("Connecting to database: {}", config.database_url);

    // Create database pool
    let pool = db::create_pool(&config.database_url)?;

    // Run migrations
    migrations::run_migrations(&pool)?;

    // Create repositories
    let exercise_repo = ExerciseRepository::new(pool.clone());
    let workout_repo = WorkoutRepository::new(pool.clone());

    if config.seed_exercises {
        exercise_repo.seed_defaults().await?;
    }

    // Create handler states
    let dashboard_state = dashboard::DashboardState {
        workout_repo: workout_repo.clone(),
        exercise_repo: exercise_repo.clone(),
        total_weight_mode: config.total_weight_mode,
    };
    let exercises_state = exercises::ExercisesState {
        exercise_repo: exercise_repo.clone(),
    };
    let workouts_state = workouts::WorkoutsState {
        workout_repo: workout_repo.clone(),
        total_weight_mode: config.total_weight_mode,
    };
    let stats_state = stats::StatsState {
        workout_repo: workout_repo.clone(),
        total_weight_mode: config.total_weight_mode,
    };

    // Build router
    let app = routes::create_router(dashboard_state, exercises_state, workouts_state, stats_state);

    // Start server
    let addr = config.server_addr();
    tracing::info!(
        "Starting server at http://{} (total weight: {})",
        addr,
        config.total_weight_mode.as_str()
    );

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
