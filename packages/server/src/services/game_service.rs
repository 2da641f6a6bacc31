use gabi_engine::models::{GameResult, PlayerId, Session};
use gabi_engine::{GameError, TurnPrompt, VoteOutcome};
use log::info;

use crate::models::game::NightActionRequest;
use crate::state::AppState;

/// Failure of a game command, rendered as `{ "success": false, "error": ... }`.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub GameError);

pub async fn new_game(state: AppState, player_count: usize) -> Result<Session, ApiError> {
    let mut game = state.game.lock().await;
    let session = game.new_game(player_count)?;
    info!("Started a {} player game", player_count);
    Ok(session)
}

pub async fn get_game_state(state: AppState) -> Session {
    state.game.lock().await.state()
}

pub async fn get_prompt(state: AppState) -> Result<Option<TurnPrompt>, ApiError> {
    Ok(state.game.lock().await.prompt()?)
}

pub async fn process_night_action(
    state: AppState,
    action_req: NightActionRequest,
) -> Result<Session, ApiError> {
    let mut game = state.game.lock().await;
    let session = game.submit(action_req.actor_id, action_req.kind, action_req.target_id)?;
    Ok(session)
}

pub async fn proceed_to_vote(state: AppState) -> Result<Session, ApiError> {
    Ok(state.game.lock().await.proceed()?)
}

pub async fn handle_vote(state: AppState, target_id: PlayerId) -> Result<VoteOutcome, ApiError> {
    let mut game = state.game.lock().await;
    let outcome = game.cast_vote(target_id)?;
    info!(
        "Player {} was voted out, deaths: {:?}",
        target_id, outcome.report.deaths
    );
    Ok(outcome)
}

pub async fn resume(state: AppState) -> Result<Session, ApiError> {
    Ok(state.game.lock().await.resume()?)
}

pub async fn check_winner(state: AppState) -> GameResult {
    state.game.lock().await.evaluate_win()
}
