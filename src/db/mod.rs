pub mod connection;
pub mod job_repository;
pub mod migrations;
pub mod models;
pub mod static_repository;

pub use job_repository::{JobRepository, PgJobRepository, RepositoryError};
pub use static_repository::StaticJobRepository;
