use crate::db::models::{Breed, NewBreed};
use crate::error::BallotError;
use std::future::Future;

/// Rows returned by the leaderboard.
pub const LEADERBOARD_SIZE: i64 = 10;
/// Rows offered per voting round.
pub const RANDOM_PAIR_SIZE: i64 = 2;

/// Storage operations shared by the HTTP routes and the seeder.
///
/// Every method is a single statement against the store; callers get no
/// transaction boundaries.
pub trait BreedRepository: Clone + Send + Sync + 'static {
    /// Total number of rows.
    fn count(&self) -> impl Future<Output = Result<i64, BallotError>> + Send;

    /// Insert one row and return it with its assigned id.
    fn insert(&self, row: NewBreed) -> impl Future<Output = Result<Breed, BallotError>> + Send;

    /// Every row, ordered by id.
    fn list_all(&self) -> impl Future<Output = Result<Vec<Breed>, BallotError>> + Send;

    /// At most `limit` rows ordered by votes, highest first.
    fn top_by_votes(
        &self,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<Breed>, BallotError>> + Send;

    /// At most `limit` rows in random order.
    fn random(&self, limit: i64) -> impl Future<Output = Result<Vec<Breed>, BallotError>> + Send;

    /// Add one vote to row `id`. `None` when no such row exists.
    fn increment_votes(
        &self,
        id: i32,
    ) -> impl Future<Output = Result<Option<Breed>, BallotError>> + Send;
}
