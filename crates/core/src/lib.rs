//! Core domain types for the job store.
//!
//! Holds the [`JobData`](job::JobData) entity, the storage-agnostic
//! [`JobRepository`](repository::JobRepository) capability and the single
//! [`DataAccessError`](error::DataAccessError) type every adapter reports.

pub mod error;
pub mod job;
pub mod repository;
pub mod types;
