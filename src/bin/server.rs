use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use counterpick_engine::{CounterpickEngine, PickDetails, Recommendation};

#[derive(Clone)]
struct AppState {
    engine: Arc<CounterpickEngine>,
}

#[derive(Debug, Deserialize)]
struct RecommendRequest {
    user_id: u64,
    roster: String,
    #[serde(default)]
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct DetailsRequest {
    user_id: u64,
    character: String,
}

#[derive(Debug, Deserialize)]
struct UserQuery {
    user_id: u64,
}

#[derive(Debug, Deserialize)]
struct BanRequest {
    user_id: u64,
    /// Absent character on DELETE means "clear the whole list"
    #[serde(default)]
    character: Option<String>,
}

#[derive(Debug, Serialize)]
struct BanResponse {
    banned: Vec<String>,
    size: usize,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    characters: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "counterpick_server=debug,counterpick_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let dataset_path =
        std::env::var("DATASET_PATH").unwrap_or_else(|_| "data/winrates.json".to_string());
    let db_path = std::env::var("DB_PATH").unwrap_or_else(|_| "counterpick.db".to_string());
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8090);

    tracing::info!("Starting Counterpick Engine Server");
    tracing::info!("Dataset: {}", dataset_path);
    tracing::info!("Ban database: {}", db_path);

    // Fail fast: a bad dataset must never serve requests
    let engine = CounterpickEngine::new(&dataset_path, &db_path)?;
    tracing::info!("{} characters loaded", engine.characters().len());

    let state = AppState {
        engine: Arc::new(engine),
    };

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/characters", get(characters_handler))
        .route("/v1/recommend", post(recommend_handler))
        .route("/v1/details", post(details_handler))
        .route(
            "/v1/bans",
            get(bans_handler).post(ban_handler).delete(unban_handler),
        )
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: counterpick_engine::VERSION.to_string(),
        characters: state.engine.characters().len(),
    })
}

async fn characters_handler(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.engine.characters().to_vec())
}

async fn recommend_handler(
    State(state): State<AppState>,
    Json(req): Json<RecommendRequest>,
) -> Result<Json<Recommendation>, AppError> {
    tracing::debug!("Recommend request: {:?}", req);

    let rec = state
        .engine
        .recommend(req.user_id, &req.roster, req.limit)
        .await?;

    tracing::info!(
        "user {} → roster {:?} → {} picks",
        req.user_id,
        rec.roster,
        rec.picks.len()
    );

    Ok(Json(rec))
}

async fn details_handler(
    State(state): State<AppState>,
    Json(req): Json<DetailsRequest>,
) -> Result<Json<PickDetails>, AppError> {
    let details = state
        .engine
        .candidate_details(req.user_id, &req.character)
        .await?;
    Ok(Json(details))
}

async fn bans_handler(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<BanResponse>, AppError> {
    let banned = state.engine.bans(query.user_id).await?;
    let size = banned.len();
    Ok(Json(BanResponse { banned, size }))
}

async fn ban_handler(
    State(state): State<AppState>,
    Json(req): Json<BanRequest>,
) -> Result<Json<BanResponse>, AppError> {
    let character = req
        .character
        .ok_or_else(|| counterpick_engine::CounterpickError::from("missing field: character"))?;

    state.engine.ban(req.user_id, &character).await?;
    let banned = state.engine.bans(req.user_id).await?;
    let size = banned.len();
    Ok(Json(BanResponse { banned, size }))
}

async fn unban_handler(
    State(state): State<AppState>,
    Json(req): Json<BanRequest>,
) -> Result<Json<BanResponse>, AppError> {
    match req.character {
        Some(character) => {
            state.engine.unban(req.user_id, &character).await?;
        }
        None => {
            state.engine.clear_bans(req.user_id).await?;
        }
    }

    let banned = state.engine.bans(req.user_id).await?;
    let size = banned.len();
    Ok(Json(BanResponse { banned, size }))
}

// Error handling
struct AppError(counterpick_engine::CounterpickError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        use counterpick_engine::CounterpickError;

        let (status, message) = match &self.0 {
            CounterpickError::InvalidRoster { .. } | CounterpickError::NoMatches(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.0.to_string())
            }
            CounterpickError::UnknownCharacter(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()),
        };

        tracing::error!("Error: {} - {}", status, message);

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<counterpick_engine::CounterpickError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
