use crate::db::{Breed, BreedRepository, LEADERBOARD_SIZE, NewBreed, RANDOM_PAIR_SIZE};
use crate::{BallotError, router::BallotState};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

/// GET /leaderboard -> the ten rows with the most votes.
pub async fn leaderboard<S: BreedRepository>(
    State(state): State<BallotState<S>>,
) -> Result<Json<Vec<Breed>>, BallotError> {
    let rows = state.store.top_by_votes(LEADERBOARD_SIZE).await?;
    Ok(Json(rows))
}

/// GET /random -> two rows to vote between; fewer when the table is smaller.
pub async fn random_pair<S: BreedRepository>(
    State(state): State<BallotState<S>>,
) -> Result<Json<Vec<Breed>>, BallotError> {
    let rows = state.store.random(RANDOM_PAIR_SIZE).await?;
    Ok(Json(rows))
}

/// GET / -> every row.
pub async fn list_breeds<S: BreedRepository>(
    State(state): State<BallotState<S>>,
) -> Result<Json<Vec<Breed>>, BallotError> {
    let rows = state.store.list_all().await?;
    Ok(Json(rows))
}

/// POST / -> insert a row and echo it back.
pub async fn create_breed<S: BreedRepository>(
    State(state): State<BallotState<S>>,
    Json(body): Json<NewBreed>,
) -> Result<(StatusCode, Json<Breed>), BallotError> {
    let row = state.store.insert(body).await?;
    info!(id = row.id, breed = %row.breed, "breed created");
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /{id} -> add one vote. Answers `null` when the id is unknown.
pub async fn vote<S: BreedRepository>(
    State(state): State<BallotState<S>>,
    Path(id): Path<i32>,
) -> Result<Json<Option<Breed>>, BallotError> {
    let row = state.store.increment_votes(id).await?;
    Ok(Json(row))
}
