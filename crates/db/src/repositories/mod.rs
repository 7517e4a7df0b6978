//! Repository layer.
//!
//! Each adapter implements [`jobstore_core::repository::JobRepository`];
//! callers hold them behind the trait.

pub mod job_repo;
pub mod memory_job_repo;

pub use job_repo::PgJobRepo;
pub use memory_job_repo::InMemoryJobRepo;
