//! Infrastructure Layer
//!
//! Store implementations: PostgreSQL for deployments, in-memory for
//! database-less runs and tests.

pub mod memory;
pub mod postgres;

pub use memory::MemoryAuthRepository;
pub use postgres::PgAuthRepository;
