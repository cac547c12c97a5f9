use crate::api::catalog::BreedCatalog;
use crate::db::{Breed, BreedRepository, NewBreed};
use crate::error::BallotError;

/// One unit of seeding work: a catalog path such as `hound/afghan`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedTask {
    pub path: String,
}

#[derive(Debug)]
pub enum SeedOutcome {
    Inserted(Breed),
    Failed(SeedTask, BallotError),
}

impl SeedTask {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Fetch the images for this path and insert one row.
    pub async fn execute<C, S>(self, catalog: &C, store: &S) -> SeedOutcome
    where
        C: BreedCatalog,
        S: BreedRepository,
    {
        match self.run(catalog, store).await {
            Ok(row) => SeedOutcome::Inserted(row),
            Err(e) => SeedOutcome::Failed(self, e),
        }
    }

    async fn run<C, S>(&self, catalog: &C, store: &S) -> Result<Breed, BallotError>
    where
        C: BreedCatalog,
        S: BreedRepository,
    {
        let images = catalog.list_images(&self.path).await?;
        store
            .insert(NewBreed::from_catalog_path(&self.path, images))
            .await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedFailure {
    pub path: String,
    pub error: String,
}

/// Aggregate result of one seeding pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedReport {
    /// The store already held rows; nothing was fetched.
    Skipped { existing: i64 },
    Completed {
        inserted: Vec<String>,
        failed: Vec<SeedFailure>,
    },
}

impl SeedReport {
    pub fn inserted(&self) -> &[String] {
        match self {
            SeedReport::Skipped { .. } => &[],
            SeedReport::Completed { inserted, .. } => inserted,
        }
    }

    pub fn failed(&self) -> &[SeedFailure] {
        match self {
            SeedReport::Skipped { .. } => &[],
            SeedReport::Completed { failed, .. } => failed,
        }
    }
}
