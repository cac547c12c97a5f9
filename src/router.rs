use crate::db::BreedRepository;
use crate::handlers::breeds::{create_breed, leaderboard, list_breeds, random_pair, vote};
use axum::{
    Router,
    routing::{get, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared state handed to every route: the injected store handle.
#[derive(Clone)]
pub struct BallotState<S> {
    pub store: S,
}

impl<S: BreedRepository> BallotState<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

pub fn ballot_router<S: BreedRepository>(state: BallotState<S>) -> Router {
    Router::new()
        .route("/leaderboard", get(leaderboard::<S>))
        .route("/random", get(random_pair::<S>))
        .route("/", get(list_breeds::<S>).post(create_breed::<S>))
        .route("/{id}", put(vote::<S>))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
