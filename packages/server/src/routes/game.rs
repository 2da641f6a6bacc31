use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use gabi_engine::GameError;

use crate::models::game::{NewGameRequest, NightActionRequest, VoteRequest};
use crate::services::game_service::{self, ApiError};
use crate::state::AppState;
use crate::utils::websocket;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/new", post(new_game_handler))
        .route("/state", get(get_game_state))
        .route("/prompt", get(prompt_handler))
        .nest(
            "/actions",
            Router::new()
                .route("/night", post(night_action_handler))
                .route("/vote", post(cast_vote_handler)),
        )
        .route("/phase/proceed", post(proceed_handler))
        .route("/resume", post(resume_handler))
        .route("/check-winner", get(check_winner_handler))
        .route("/ws", get(websocket::handler))
        .with_state(state)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            GameError::WrongPhase { .. } => StatusCode::CONFLICT,
            GameError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };

        let body = Json(serde_json::json!({
            "success": false,
            "error": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}

async fn new_game_handler(
    State(state): State<AppState>,
    Json(req): Json<NewGameRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = game_service::new_game(state, req.player_count).await?;
    Ok((StatusCode::OK, Json(session)))
}

pub async fn get_game_state(State(state): State<AppState>) -> impl IntoResponse {
    Json(game_service::get_game_state(state).await)
}

async fn prompt_handler(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(game_service::get_prompt(state).await?))
}

async fn night_action_handler(
    State(state): State<AppState>,
    Json(action_req): Json<NightActionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        game_service::process_night_action(state, action_req).await?,
    ))
}

async fn proceed_handler(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(game_service::proceed_to_vote(state).await?))
}

async fn cast_vote_handler(
    State(state): State<AppState>,
    Json(vote): Json<VoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(game_service::handle_vote(state, vote.target_id).await?))
}

async fn resume_handler(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(game_service::resume(state).await?))
}

async fn check_winner_handler(State(state): State<AppState>) -> impl IntoResponse {
    let result = game_service::check_winner(state).await;
    Json(serde_json::json!({
        "result": result,
        "announcement": result.announcement(),
    }))
}
