//! SQL DDL for bootstrapping the breed table.

/// Postgres schema with:
/// - `id` SERIAL PRIMARY KEY
/// - `breed` holding either `breed` or `breed-subbreed`; not unique
/// - `subbreed` BOOLEAN, true for rows seeded from a sub-breed
/// - `votes` INTEGER defaulting to 0
/// - `image` TEXT[] with every image URL for the breed path
pub const POSTGRES_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS breeds (
    id SERIAL PRIMARY KEY,
    breed TEXT NOT NULL,
    subbreed BOOLEAN NOT NULL DEFAULT FALSE,
    votes INTEGER NOT NULL DEFAULT 0,
    image TEXT[] NOT NULL DEFAULT '{}'
);

CREATE INDEX IF NOT EXISTS idx_breeds_votes ON breeds(votes DESC);
"#;
