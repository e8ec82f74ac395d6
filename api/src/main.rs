//! Pongboard API Server
//!
//! Records table-tennis results, keeps Elo ratings and awards achievements.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{PostgresAchievementRepository, PostgresMatchRepository, PostgresPlayerRepository};
use app::{AchievementClassifier, AchievementService, MatchService, PlayerService, RatingService};
use config::Config;
use domain::ports::{AchievementRepository, MatchRepository, PlayerRepository};

type DynPlayerRepo = dyn PlayerRepository;
type DynMatchRepo = dyn MatchRepository;
type DynAchievementRepo = dyn AchievementRepository;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub player_service: Arc<PlayerService<DynPlayerRepo, DynMatchRepo, DynAchievementRepo>>,
    pub match_service: Arc<MatchService<DynPlayerRepo, DynMatchRepo, DynAchievementRepo>>,
    pub rating_service: Arc<RatingService<DynPlayerRepo>>,
}

impl AppState {
    /// Wire the services over the given repositories
    pub fn new(
        players: Arc<DynPlayerRepo>,
        matches: Arc<DynMatchRepo>,
        achievements: Arc<DynAchievementRepo>,
        config: &Config,
    ) -> Self {
        let rating_service = Arc::new(RatingService::new(players.clone()));
        let achievement_service = Arc::new(AchievementService::new(
            matches.clone(),
            achievements.clone(),
            AchievementClassifier::new(config.timezone),
            config.history_limit,
            config.achievement_workers,
        ));

        Self {
            player_service: Arc::new(PlayerService::new(
                players.clone(),
                matches.clone(),
                achievements,
            )),
            match_service: Arc::new(MatchService::new(
                players,
                matches,
                rating_service.clone(),
                achievement_service,
            )),
            rating_service,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the HTTP router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/players", post(handlers::register))
        .route("/players/:id", get(handlers::player_profile))
        .route("/players/:id/achievements", get(handlers::player_achievements))
        .route("/leaderboard", get(handlers::leaderboard))
        .route("/achievements", get(handlers::list_achievements))
        .route("/matches", post(handlers::submit_match))
        .route("/win-probabilities", get(handlers::win_probabilities))
        .route("/head-to-head", get(handlers::head_to_head))
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pongboard_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Pongboard API...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        timezone = %config.timezone,
        achievement_workers = config.achievement_workers,
        "Configuration loaded"
    );

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Create adapters
    let players: Arc<DynPlayerRepo> = Arc::new(PostgresPlayerRepository::new(db.clone()));
    let matches: Arc<DynMatchRepo> = Arc::new(PostgresMatchRepository::new(db.clone()));
    let achievements: Arc<DynAchievementRepo> =
        Arc::new(PostgresAchievementRepository::new(db));

    let app = router(AppState::new(players, matches, achievements, &config));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
