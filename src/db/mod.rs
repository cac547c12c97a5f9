//! Database module: breed rows and the store that persists them.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and insert payloads
//! - `schema.rs`: SQL DDL for bootstrapping an empty database (Postgres)
//! - `postgres.rs`: the pooled Postgres store
//! - `repository.rs`: the trait routes and the seeder talk to

pub mod models;
pub mod postgres;
pub mod repository;
pub mod schema;

pub use models::{Breed, NewBreed};
pub use postgres::{BreedStore, connect};
pub use repository::{BreedRepository, LEADERBOARD_SIZE, RANDOM_PAIR_SIZE};
