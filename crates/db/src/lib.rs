pub mod catalog_file;
pub mod fixtures;
pub mod repositories;

pub use catalog_file::load_catalog_file;
pub use fixtures::{DemoCatalog, SeedResult};
pub use repositories::{InMemoryPreferenceStore, InMemoryScentCatalog, RepositoryError};
