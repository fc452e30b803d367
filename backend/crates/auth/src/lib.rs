//! Accounts and Authentication Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits, JWT codec
//! - `application/` - Use cases and application services
//! - `infra/` - PostgreSQL and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Registration with email, password, phone number, height and bio
//! - Bearer login issuing an access/refresh JWT pair
//! - Single-use refresh tokens, token revocation list
//! - Server-side sessions behind an `HttpOnly` cookie
//! - `GET /users/me` accepting either credential
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional application pepper
//! - Unknown email and wrong password are reported identically
//! - Revocations keyed by SHA-256 of the token, swept after expiry

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::sweep::{SweepExpiredUseCase, SweepReport, spawn_sweeper};
pub use domain::repository::AuthStore;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::MemoryAuthRepository, postgres::PgAuthRepository};
pub use presentation::router::api_router;
