use crate::api::catalog::BreedCatalog;
use crate::db::BreedRepository;
use crate::error::BallotError;
use crate::types::catalog::breed_paths;
use crate::types::seed::{SeedFailure, SeedOutcome, SeedReport, SeedTask};
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

/// Populates an empty store from the catalog, once.
pub struct Seeder<S, C> {
    store: S,
    catalog: C,
    concurrency: usize,
}

impl<S, C> Seeder<S, C>
where
    S: BreedRepository,
    C: BreedCatalog,
{
    pub fn new(store: S, catalog: C, concurrency: usize) -> Self {
        Self {
            store,
            catalog,
            concurrency: concurrency.max(1),
        }
    }

    /// Seed the store unless it already holds rows.
    ///
    /// Errors only when the row count or the breed list cannot be read.
    /// Per-breed failures are collected into the report and never cancel the
    /// remaining tasks.
    pub async fn run(&self) -> Result<SeedReport, BallotError> {
        let existing = self.store.count().await?;
        if existing != 0 {
            info!(existing, "breed store already populated; skipping seed");
            return Ok(SeedReport::Skipped { existing });
        }

        let list = self.catalog.list_all_breeds().await?;
        let tasks: Vec<SeedTask> = breed_paths(&list).into_iter().map(SeedTask::new).collect();
        info!(
            breeds = list.len(),
            tasks = tasks.len(),
            concurrency = self.concurrency,
            "seeding breed store"
        );

        let outcomes: Vec<SeedOutcome> = stream::iter(tasks)
            .map(|task| task.execute(&self.catalog, &self.store))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut inserted = Vec::new();
        let mut failed = Vec::new();
        for outcome in outcomes {
            match outcome {
                SeedOutcome::Inserted(row) => inserted.push(row.breed),
                SeedOutcome::Failed(task, e) => {
                    warn!(path = %task.path, error = %e, "failed to seed breed");
                    failed.push(SeedFailure {
                        path: task.path,
                        error: e.to_string(),
                    });
                }
            }
        }
        inserted.sort();
        failed.sort_by(|a, b| a.path.cmp(&b.path));

        info!(
            inserted = inserted.len(),
            failed = failed.len(),
            "seeding finished"
        );
        Ok(SeedReport::Completed { inserted, failed })
    }
}
