#![allow(dead_code)]

use breed_ballot::BallotError;
use breed_ballot::api::BreedCatalog;
use breed_ballot::db::{Breed, BreedRepository, NewBreed};
use breed_ballot::types::catalog::BreedList;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the Postgres store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    rows: Arc<Mutex<Vec<Breed>>>,
}

impl MemoryStore {
    pub fn with_rows(rows: Vec<Breed>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
        }
    }

    pub fn snapshot(&self) -> Vec<Breed> {
        self.rows.lock().unwrap().clone()
    }
}

impl BreedRepository for MemoryStore {
    async fn count(&self) -> Result<i64, BallotError> {
        Ok(self.rows.lock().unwrap().len() as i64)
    }

    async fn insert(&self, row: NewBreed) -> Result<Breed, BallotError> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let breed = Breed {
            id,
            breed: row.breed,
            subbreed: row.subbreed,
            votes: row.votes,
            image: row.image,
        };
        rows.push(breed.clone());
        Ok(breed)
    }

    async fn list_all(&self) -> Result<Vec<Breed>, BallotError> {
        let mut rows = self.snapshot();
        rows.sort_by_key(|r| r.id);
        Ok(rows)
    }

    async fn top_by_votes(&self, limit: i64) -> Result<Vec<Breed>, BallotError> {
        let mut rows = self.snapshot();
        rows.sort_by(|a, b| b.votes.cmp(&a.votes));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn random(&self, limit: i64) -> Result<Vec<Breed>, BallotError> {
        let mut rows = self.snapshot();
        rows.reverse();
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn increment_votes(&self, id: i32) -> Result<Option<Breed>, BallotError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|r| r.id == id).map(|r| {
            r.votes += 1;
            r.clone()
        }))
    }
}

/// Store whose every call fails like a dropped connection.
#[derive(Clone, Default)]
pub struct BrokenStore;

fn broken() -> BallotError {
    BallotError::DatabaseError(sqlx::Error::PoolClosed)
}

impl BreedRepository for BrokenStore {
    async fn count(&self) -> Result<i64, BallotError> {
        Err(broken())
    }

    async fn insert(&self, _row: NewBreed) -> Result<Breed, BallotError> {
        Err(broken())
    }

    async fn list_all(&self) -> Result<Vec<Breed>, BallotError> {
        Err(broken())
    }

    async fn top_by_votes(&self, _limit: i64) -> Result<Vec<Breed>, BallotError> {
        Err(broken())
    }

    async fn random(&self, _limit: i64) -> Result<Vec<Breed>, BallotError> {
        Err(broken())
    }

    async fn increment_votes(&self, _id: i32) -> Result<Option<Breed>, BallotError> {
        Err(broken())
    }
}

/// Catalog answering from a fixed breed list.
#[derive(Clone, Default)]
pub struct FakeCatalog {
    breeds: BreedList,
    failing_paths: Arc<HashSet<String>>,
    list_fails: bool,
    image_calls: Arc<AtomicUsize>,
}

impl FakeCatalog {
    /// `breeds` pairs a breed name with its space-separated sub-breeds.
    pub fn new(breeds: &[(&str, &str)]) -> Self {
        let breeds: BTreeMap<String, Vec<String>> = breeds
            .iter()
            .map(|(name, subs)| {
                (
                    name.to_string(),
                    subs.split_whitespace().map(str::to_string).collect(),
                )
            })
            .collect();
        Self {
            breeds,
            ..Default::default()
        }
    }

    pub fn failing_on(mut self, paths: &[&str]) -> Self {
        self.failing_paths = Arc::new(paths.iter().map(|p| p.to_string()).collect());
        self
    }

    pub fn with_list_failure(mut self) -> Self {
        self.list_fails = true;
        self
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }
}

impl BreedCatalog for FakeCatalog {
    async fn list_all_breeds(&self) -> Result<BreedList, BallotError> {
        if self.list_fails {
            return Err(BallotError::CatalogStatus("error".to_string()));
        }
        Ok(self.breeds.clone())
    }

    async fn list_images(&self, breed_path: &str) -> Result<Vec<String>, BallotError> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_paths.contains(breed_path) {
            return Err(BallotError::CatalogStatus("error".to_string()));
        }
        Ok(vec![
            format!("https://images.example/{breed_path}/1.jpg"),
            format!("https://images.example/{breed_path}/2.jpg"),
        ])
    }
}

pub fn breed(id: i32, name: &str, votes: i32) -> Breed {
    Breed {
        id,
        breed: name.to_string(),
        subbreed: name.contains('-'),
        votes,
        image: vec![format!("https://images.example/{name}.jpg")],
    }
}
