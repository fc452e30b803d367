//! Domain Layer
//!
//! Contains entities, value objects, repository traits and the token codec.

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::{auth_session::AuthSession, revoked_token::RevokedToken, user::User};
pub use repository::{AuthSessionRepository, AuthStore, RevokedTokenRepository, UserRepository};
