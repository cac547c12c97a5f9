pub mod catalog;

pub use catalog::{BreedCatalog, CatalogClient};
